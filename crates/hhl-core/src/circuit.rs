//! HHL circuit assembly and execution.
//!
//! The circuit is built from data first ([`HhlCircuit::build`]) and run
//! afterwards. It is an ordered list of [`Stage`]s, each a list of
//! [`Step`]s, over three registers:
//!
//! ```text
//! breg  = qubit 0            (holds b)
//! clock = qubits 1..=k       (eigenvalue estimate, little-endian)
//! anc   = qubit k + 1        (rotation ancilla, post-selected to |1>)
//! ```
//!
//! Every stage can be applied on its own with [`HhlCircuit::run_stage`],
//! which never mutates its input.

use std::fmt;

use hhl_state::{Gate, Operator, QubitId, Register, RegisterFile, Statevector};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::validate_clock_bits;
use crate::error::{HhlError, HhlResult};
use crate::report::{Event, Reporter};

/// Clock width for which `lam` is read out exactly (`N = dim² = 4`).
pub const EXACT_CLOCK_BITS: u32 = 2;

/// Tolerance for recognising `b` as a computational basis state.
const BASIS_TOLERANCE: f64 = 1e-12;

/// The nine stages of the HHL circuit, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Load b into breg.
    Init,
    /// Hadamard on every clock qubit.
    Superpose,
    /// Controlled `U^(2^k)` from `clock[k]` onto breg.
    PhaseEstimation,
    /// Inverse QFT on the clock register.
    InverseQft,
    /// Controlled Y rotations of the ancilla.
    Rotation,
    /// Force the ancilla to |1>.
    PostSelect,
    /// Forward QFT on the clock register.
    Qft,
    /// Undo phase estimation.
    Uncompute,
    /// Hadamard on every clock qubit again.
    DeHadamard,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 9] = [
        Stage::Init,
        Stage::Superpose,
        Stage::PhaseEstimation,
        Stage::InverseQft,
        Stage::Rotation,
        Stage::PostSelect,
        Stage::Qft,
        Stage::Uncompute,
        Stage::DeHadamard,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::Superpose => "superpose",
            Stage::PhaseEstimation => "phase-estimation",
            Stage::InverseQft => "inverse-qft",
            Stage::Rotation => "rotation",
            Stage::PostSelect => "post-select",
            Stage::Qft => "qft",
            Stage::Uncompute => "uncompute",
            Stage::DeHadamard => "de-hadamard",
        };
        f.write_str(name)
    }
}

/// One instruction of a stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Apply a gate.
    Gate(Gate),
    /// Project `qubit` onto `outcome` and renormalize.
    PostSelect {
        /// Measured qubit.
        qubit: QubitId,
        /// Forced outcome.
        outcome: u8,
    },
}

/// Ancilla rotation angles for the two scaled eigenvalues.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationAngles {
    /// Angle applied from `clock[0]` and `clock[1]`.
    pub angles: [f64; 2],
    /// True when `angles[1]` had `angles[0]` subtracted.
    pub corrected: bool,
}

/// Compute `2·asin(C / lam[i])` for both eigenvalues.
///
/// If `lam[1]` rounded half-to-even is odd its binary form shares bit 0 with `lam[0] = 1`,
/// so both controls fire for that clock value and `angles[0]` is removed
/// from `angles[1]`. Only that single overlap is handled.
pub fn rotation_angles(lam: [f64; 2], c: f64) -> HhlResult<RotationAngles> {
    let mut angles = [0.0; 2];
    for (angle, &l) in angles.iter_mut().zip(lam.iter()) {
        let x = c / l;
        if !(-1.0..=1.0).contains(&x) {
            return Err(HhlError::RotationOutOfRange { constant: c, lam });
        }
        *angle = 2.0 * x.asin();
    }

    let corrected = (lam[1].round_ties_even() as i64) & 1 == 1;
    if corrected {
        angles[1] -= angles[0];
    }
    Ok(RotationAngles { angles, corrected })
}

/// A fully specified HHL circuit for one (A, b) pair.
#[derive(Debug, Clone)]
pub struct HhlCircuit {
    registers: RegisterFile,
    breg: Register,
    clock: Register,
    anc: Register,
    powers: Vec<Operator>,
    rotation: RotationAngles,
    stages: Vec<(Stage, Vec<Step>)>,
    warnings: Vec<String>,
}

impl HhlCircuit {
    /// Assemble the circuit.
    ///
    /// `b` selects the breg initial state: it is flipped to |1> when
    /// `b[1] == 1`, otherwise left at |0>. `u` is the time-evolution
    /// operator, `lam` and `c` the scaled eigenvalues and rotation constant.
    pub fn build(
        b: [f64; 2],
        lam: [f64; 2],
        u: &Operator,
        c: f64,
        clock_bits: u32,
    ) -> HhlResult<Self> {
        validate_clock_bits(clock_bits)?;
        if u.dim() != Some(2) {
            return Err(HhlError::InvalidInput(format!(
                "U must be 2x2, got {}x{}",
                u.rows(),
                u.cols()
            )));
        }

        let mut warnings = Vec::new();
        let is_one = |x: f64| (x - 1.0).abs() < BASIS_TOLERANCE;
        let is_zero = |x: f64| x.abs() < BASIS_TOLERANCE;
        if !((is_one(b[0]) && is_zero(b[1])) || (is_zero(b[0]) && is_one(b[1]))) {
            warnings.push(format!(
                "b = ({}, {}) is not a basis state; breg is prepared as |0>",
                b[0], b[1]
            ));
        }
        if clock_bits != EXACT_CLOCK_BITS {
            warnings.push(format!(
                "{clock_bits} clock bits do not read out the scaled eigenvalues exactly; \
                 only {EXACT_CLOCK_BITS} do"
            ));
        }

        let mut registers = RegisterFile::new();
        let breg = registers.reg("breg", 1, 0)?;
        let clock = registers.reg("clock", clock_bits, 0)?;
        let anc = registers.reg("anc", 1, 0)?;

        let target = breg[0];
        let clock_qubits = clock.qubits().to_vec();
        let rotation = rotation_angles(lam, c)?;

        let init = if b[1] == 1.0 {
            vec![Step::Gate(Gate::X(target))]
        } else {
            Vec::new()
        };
        let hadamards = || -> Vec<Step> {
            clock_qubits
                .iter()
                .map(|&q| Step::Gate(Gate::H(q)))
                .collect()
        };

        let mut powers = Vec::with_capacity(clock_qubits.len());
        let mut phase_estimation = Vec::with_capacity(clock_qubits.len());
        let mut running = u.clone();
        for &control in &clock_qubits {
            phase_estimation.push(Gate::ControlledUnitary {
                control,
                target,
                matrix: running.as_unitary2x2()?,
            });
            let next = running.squared()?;
            powers.push(running);
            running = next;
        }

        let uncompute: Vec<Step> = phase_estimation
            .iter()
            .rev()
            .map(|g| Step::Gate(g.inverse()))
            .collect();

        let rotate = vec![
            Step::Gate(Gate::CRy {
                control: clock[0],
                target: anc[0],
                theta: rotation.angles[0],
            }),
            Step::Gate(Gate::CRy {
                control: clock[1],
                target: anc[0],
                theta: rotation.angles[1],
            }),
        ];

        let stages = vec![
            (Stage::Init, init),
            (Stage::Superpose, hadamards()),
            (
                Stage::PhaseEstimation,
                phase_estimation.into_iter().map(Step::Gate).collect(),
            ),
            (
                Stage::InverseQft,
                vec![Step::Gate(Gate::InverseQft {
                    qubits: clock_qubits.clone(),
                    swap: true,
                })],
            ),
            (Stage::Rotation, rotate),
            (
                Stage::PostSelect,
                vec![Step::PostSelect {
                    qubit: anc[0],
                    outcome: 1,
                }],
            ),
            (
                Stage::Qft,
                vec![Step::Gate(Gate::Qft {
                    qubits: clock_qubits.clone(),
                    swap: true,
                })],
            ),
            (Stage::Uncompute, uncompute),
            (Stage::DeHadamard, hadamards()),
        ];

        debug!(
            qubits = registers.num_qubits(),
            clock_bits,
            angle0 = rotation.angles[0],
            angle1 = rotation.angles[1],
            corrected = rotation.corrected,
            "built HHL circuit"
        );

        Ok(Self {
            registers,
            breg,
            clock,
            anc,
            powers,
            rotation,
            stages,
            warnings,
        })
    }

    /// The b register.
    pub fn breg(&self) -> &Register {
        &self.breg
    }

    /// The clock register.
    pub fn clock(&self) -> &Register {
        &self.clock
    }

    /// The ancilla register.
    pub fn anc(&self) -> &Register {
        &self.anc
    }

    /// Total number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.registers.num_qubits()
    }

    /// `U^(2^k)` used for `clock[k]`, in clock order.
    pub fn powers(&self) -> &[Operator] {
        &self.powers
    }

    /// The ancilla rotation angles.
    pub fn rotation(&self) -> RotationAngles {
        self.rotation
    }

    /// Diagnostics raised while building.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Steps of `stage`.
    pub fn steps(&self, stage: Stage) -> &[Step] {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map_or(&[], |(_, steps)| steps.as_slice())
    }

    /// The all-zero starting state over every register.
    pub fn initial_state(&self) -> Statevector {
        self.registers.statevector()
    }

    /// Apply one stage to a copy of `state`.
    pub fn run_stage(&self, stage: Stage, state: &Statevector) -> HhlResult<Statevector> {
        let (next, _) = apply_steps(self.steps(stage), state)?;
        Ok(next)
    }

    /// Run every stage on a fresh state and return the final state.
    pub fn run(&self, reporter: &mut dyn Reporter) -> HhlResult<Statevector> {
        for message in &self.warnings {
            reporter.report(&Event::Warning {
                message: message.clone(),
            });
        }
        reporter.report(&Event::RotationAngles {
            angles: self.rotation.angles,
            corrected: self.rotation.corrected,
        });

        let mut state = self.initial_state();
        for (stage, steps) in &self.stages {
            let (next, probability) = apply_steps(steps, &state)?;
            state = next;
            if let Some(probability) = probability {
                reporter.report(&Event::PostSelected { probability });
            }
            reporter.report(&Event::StageApplied {
                stage: *stage,
                norm: state.norm(),
            });
        }
        Ok(state)
    }
}

/// Apply `steps` to a copy of `state`; also returns the probability of the
/// last post-selection, if any.
fn apply_steps(steps: &[Step], state: &Statevector) -> HhlResult<(Statevector, Option<f64>)> {
    let mut next = state.clone();
    let mut selected = None;
    for step in steps {
        match step {
            Step::Gate(gate) => next.apply(gate)?,
            Step::PostSelect { qubit, outcome } => {
                let p = next.measure_forced(*qubit, *outcome)?;
                trace!(%qubit, outcome, probability = p, "post-selected");
                selected = Some(p);
            }
        }
    }
    Ok((next, selected))
}

//! End-to-end scenario execution.

use hhl_state::Statevector;
use serde::Serialize;
use tracing::{info, warn};

use crate::circuit::{HhlCircuit, RotationAngles};
use crate::config::PipelineConfig;
use crate::eigen::compute_eigen;
use crate::error::HhlResult;
use crate::hamiltonian::build_unitary;
use crate::planner::{Parameters, plan_parameters};
use crate::report::{Event, Reporter};
use crate::scenario::Scenario;
use crate::verify::{classical_ratios, compare_ratios, quantum_ratios};

/// Everything a successful scenario run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub name: String,
    /// Ascending eigenvalues of A.
    pub eigenvalues: [f64; 2],
    /// Derived time, scaled eigenvalues and rotation constant.
    pub parameters: Parameters,
    /// Ancilla rotation angles.
    pub rotation: RotationAngles,
    /// Significant amplitudes of the final state, one line each.
    pub state_lines: Vec<String>,
    /// Classical `|x_i|² / |x_0|²`.
    pub classical: Vec<f64>,
    /// Quantum `ψ_j² / ψ_0²`.
    pub quantum: Vec<f64>,
    /// `Some(true)` if verified, `None` if verification was not requested.
    pub verified: Option<bool>,
    /// The final statevector.
    #[serde(skip)]
    pub final_state: Statevector,
}

/// Run one scenario through eigen analysis, planning, unitary construction,
/// circuit execution and (optionally) verification.
///
/// Ratios are computed for every scenario; only `scenario.verify` turns a
/// mismatch into an error.
pub fn run_scenario(
    scenario: &Scenario,
    config: &PipelineConfig,
    reporter: &mut dyn Reporter,
) -> HhlResult<ScenarioOutcome> {
    reporter.report(&Event::ScenarioStarted {
        name: scenario.name.clone(),
    });
    let result = execute(scenario, config, reporter);
    let passed = match &result {
        Ok(outcome) => outcome.verified,
        Err(_) => Some(false),
    };
    reporter.report(&Event::ScenarioFinished {
        name: scenario.name.clone(),
        passed,
    });
    result
}

fn execute(
    scenario: &Scenario,
    config: &PipelineConfig,
    reporter: &mut dyn Reporter,
) -> HhlResult<ScenarioOutcome> {
    let clock_bits = scenario.clock_bits.unwrap_or(config.clock_bits);
    let a = scenario.matrix()?;
    let b = scenario.rhs()?;

    let eig = compute_eigen(&a, config.hermitian_tolerance, config.eigen_tolerance)?;
    let eigenvalues = [eig.w[0], eig.w[1]];
    reporter.report(&Event::Eigen {
        values: eigenvalues,
    });

    let parameters = plan_parameters(&eig.w)?;
    reporter.report(&Event::Parameters {
        t: parameters.t,
        lam: parameters.lam,
        ratio: parameters.ratio,
        c: parameters.c,
    });

    let u = build_unitary(&eig.w, &eig.v, parameters.t, config.unitary_tolerance)?;
    reporter.report(&Event::Unitary {
        unitarity_error: u.unitarity_error().unwrap_or(f64::NAN),
    });

    let circuit = HhlCircuit::build(scenario.b, parameters.lam, &u, parameters.c, clock_bits)?;
    let final_state = circuit.run(reporter)?;

    let state_lines = final_state.dump(config.amplitude_threshold);
    reporter.report(&Event::FinalState {
        lines: state_lines.clone(),
    });

    let classical = classical_ratios(&a, &b)?;
    let quantum = quantum_ratios(&final_state, config.amplitude_threshold);
    reporter.report(&Event::Ratios {
        classical: classical.clone(),
        quantum: quantum.clone(),
    });

    let verified = if scenario.verify {
        compare_ratios(&classical, &quantum, config.verify_tolerance)?;
        Some(true)
    } else {
        None
    };

    Ok(ScenarioOutcome {
        name: scenario.name.clone(),
        eigenvalues,
        parameters,
        rotation: circuit.rotation(),
        state_lines,
        classical,
        quantum,
        verified,
        final_state,
    })
}

/// Result of one scenario inside a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    /// Scenario name.
    pub name: String,
    /// Whether the scenario asked for verification.
    pub verify: bool,
    /// The outcome, or the rendered error.
    pub result: Result<ScenarioOutcome, String>,
}

/// Results of a batch run, in scenario order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// One entry per scenario.
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// True if every scenario ran and every requested verification passed.
    pub fn all_passed(&self) -> bool {
        self.entries.iter().all(|e| e.result.is_ok())
    }

    /// Entries that failed.
    pub fn failures(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter().filter(|e| e.result.is_err())
    }
}

/// Run every scenario, isolating failures so one broken scenario does not
/// stop the rest.
pub fn run_batch(
    scenarios: &[Scenario],
    config: &PipelineConfig,
    reporter: &mut dyn Reporter,
) -> BatchReport {
    let entries: Vec<BatchEntry> = scenarios
        .iter()
        .map(|scenario| {
            let result = run_scenario(scenario, config, reporter).map_err(|e| {
                warn!(scenario = %scenario.name, error = %e, "scenario failed");
                e.to_string()
            });
            BatchEntry {
                name: scenario.name.clone(),
                verify: scenario.verify,
                result,
            }
        })
        .collect();

    let report = BatchReport { entries };
    info!(
        total = report.entries.len(),
        failed = report.failures().count(),
        "batch finished"
    );
    report
}

//! Diagnostic events and the reporter interface.
//!
//! The pipeline never prints. Every diagnostic it produces is handed to a
//! caller-supplied [`Reporter`] as an [`Event`], and the numeric results are
//! returned in the scenario outcome.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::circuit::Stage;

/// A diagnostic produced while running one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A scenario is about to run.
    ScenarioStarted {
        /// Scenario name.
        name: String,
    },
    /// Sorted eigenvalues of A.
    Eigen {
        /// Ascending eigenvalues.
        values: [f64; 2],
    },
    /// Derived evolution and rotation parameters.
    Parameters {
        /// Evolution time.
        t: f64,
        /// Scaled eigenvalues.
        lam: [f64; 2],
        /// w[1] / w[0].
        ratio: f64,
        /// Rotation constant.
        c: f64,
    },
    /// The time-evolution unitary was built.
    Unitary {
        /// Largest entry of `|U·U† − I|`.
        unitarity_error: f64,
    },
    /// Rotation angles for the two scaled eigenvalues.
    RotationAngles {
        /// Angles after the overlap correction.
        angles: [f64; 2],
        /// Whether the overlap correction fired.
        corrected: bool,
    },
    /// A circuit stage finished.
    StageApplied {
        /// The stage.
        stage: Stage,
        /// Norm of the state afterwards.
        norm: f64,
    },
    /// The ancilla was post-selected.
    PostSelected {
        /// Probability mass of the kept subspace.
        probability: f64,
    },
    /// Significant amplitudes of the final state.
    FinalState {
        /// One line per basis state.
        lines: Vec<String>,
    },
    /// Solution ratios relative to component 0.
    Ratios {
        /// From the classical solve.
        classical: Vec<f64>,
        /// From the final statevector.
        quantum: Vec<f64>,
    },
    /// Something suspicious that does not abort the run.
    Warning {
        /// Human-readable message.
        message: String,
    },
    /// A scenario completed or failed.
    ScenarioFinished {
        /// Scenario name.
        name: String,
        /// `Some(true/false)` when verified, `None` when verification was
        /// skipped; an error in the run is reported as `Some(false)`.
        passed: Option<bool>,
    },
}

/// Receives diagnostic events from the pipeline.
pub trait Reporter {
    /// Handle one event.
    fn report(&mut self, event: &Event);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, event: &Event) {
        match event {
            Event::ScenarioStarted { name } => info!(scenario = %name, "scenario started"),
            Event::Eigen { values } => {
                debug!(w0 = values[0], w1 = values[1], "eigenvalues");
            }
            Event::Parameters { t, lam, ratio, c } => info!(
                t,
                lam0 = lam[0],
                lam1 = lam[1],
                ratio,
                c,
                "scaled lambdas {:.1}, {:.1}; ratio {:.1}; C = {:.1}",
                lam[0],
                lam[1],
                ratio,
                c
            ),
            Event::Unitary { unitarity_error } => debug!(unitarity_error, "built U"),
            Event::RotationAngles { angles, corrected } => debug!(
                angle0 = angles[0],
                angle1 = angles[1],
                corrected,
                "rotation angles"
            ),
            Event::StageApplied { stage, norm } => debug!(?stage, norm, "stage applied"),
            Event::PostSelected { probability } => {
                debug!(probability, "ancilla post-selected");
            }
            Event::FinalState { lines } => {
                for line in lines {
                    debug!("{line}");
                }
            }
            Event::Ratios { classical, quantum } => {
                info!(?classical, ?quantum, "solution^2 ratios");
            }
            Event::Warning { message } => warn!("{message}"),
            Event::ScenarioFinished { name, passed } => {
                info!(scenario = %name, ?passed, "scenario finished");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _event: &Event) {}
}

/// Keeps every event in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    /// Events received so far.
    pub events: Vec<Event>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages reported as applied, in order.
    pub fn stages(&self) -> Vec<Stage> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::StageApplied { stage, .. } => Some(*stage),
                _ => None,
            })
            .collect()
    }

    /// Warning messages received.
    pub fn warnings(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Warning { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}

/// Fan-out to two reporters.
impl<A: Reporter, B: Reporter> Reporter for (A, B) {
    fn report(&mut self, event: &Event) {
        self.0.report(event);
        self.1.report(event);
    }
}

//! HHL linear-system pipeline for 2x2 Hermitian matrices.
//!
//! One scenario flows through five stages:
//!
//! 1. [`compute_eigen`]: sorted spectral decomposition of A
//! 2. [`plan_parameters`]: evolution time, scaled eigenvalues `lam` and the
//!    rotation constant `C`
//! 3. [`build_unitary`]: `U = exp(i·A·t)` in the computational basis
//! 4. [`HhlCircuit`]: phase estimation, conditional rotation, ancilla
//!    post-selection and uncomputation over a small statevector
//! 5. [`verify`]: quantum vs. classical solution ratios
//!
//! [`run_scenario`] chains them and [`run_batch`] runs many scenarios with
//! failures isolated per scenario. Diagnostics go to a caller-supplied
//! [`Reporter`]; nothing here prints.
//!
//! # Example
//!
//! ```rust
//! use hhl_core::{NullReporter, PipelineConfig, Scenario, run_scenario};
//!
//! let scenario = &Scenario::defaults()[0];
//! let outcome = run_scenario(scenario, &PipelineConfig::default(), &mut NullReporter).unwrap();
//! assert_eq!(outcome.verified, Some(true));
//! assert!((outcome.quantum[0] - 9.0).abs() < 1e-4);
//! ```

pub mod circuit;
pub mod config;
pub mod eigen;
pub mod error;
pub mod hamiltonian;
pub mod pipeline;
pub mod planner;
pub mod report;
pub mod scenario;
pub mod selfcheck;
pub mod verify;

pub use circuit::{EXACT_CLOCK_BITS, HhlCircuit, RotationAngles, Stage, Step, rotation_angles};
pub use config::{MAX_CLOCK_BITS, PipelineConfig};
pub use eigen::{EigenDecomposition, compute_eigen};
pub use error::{HhlError, HhlResult};
pub use hamiltonian::build_unitary;
pub use pipeline::{BatchEntry, BatchReport, ScenarioOutcome, run_batch, run_scenario};
pub use planner::{Parameters, plan_parameters};
pub use report::{Event, NullReporter, RecordingReporter, Reporter, TracingReporter};
pub use scenario::Scenario;
pub use selfcheck::check_rotate_ry;
pub use verify::{Verification, classical_ratios, compare_ratios, quantum_ratios, verify};

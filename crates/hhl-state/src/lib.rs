//! Statevector substrate for the HHL pipeline.
//!
//! This crate provides the small quantum-state toolkit the HHL circuit is
//! assembled from:
//!
//! - **Operators**: [`Operator`], a dense complex matrix with Hermitian and
//!   unitarity checks, eigen-decomposition and linear solve
//! - **Registers**: [`RegisterFile`] allocates named little-endian
//!   [`Register`]s over one composite qubit space
//! - **Gates**: [`Gate`] covers H, X, Y-rotations, phases, swaps, controlled
//!   rotations, controlled arbitrary 2x2 unitaries and (inverse) QFT
//! - **Statevector**: [`Statevector`] applies gates in place, or purely via
//!   [`transition`], and supports forced-outcome measurement
//!
//! State size is `2^n` amplitudes; the engine is meant for a handful of
//! qubits.
//!
//! # Example
//!
//! ```rust
//! use hhl_state::{Gate, RegisterFile};
//!
//! let mut file = RegisterFile::new();
//! let data = file.reg("data", 1, 0).unwrap();
//! let anc = file.reg("anc", 1, 0).unwrap();
//! let mut psi = file.statevector();
//!
//! psi.apply(&Gate::H(data[0])).unwrap();
//! psi.apply(&Gate::CRy { control: data[0], target: anc[0], theta: std::f64::consts::PI }).unwrap();
//!
//! let p = psi.measure_forced(anc[0], 1).unwrap();
//! assert!((p - 0.5).abs() < 1e-12);
//! ```

pub mod error;
pub mod gate;
pub mod operator;
pub mod qft;
pub mod register;
pub mod statevector;
pub mod unitary;

pub use error::{StateError, StateResult};
pub use gate::Gate;
pub use operator::{Operator, RawEigen};
pub use register::{QubitId, Register, RegisterFile};
pub use statevector::{MIN_OUTCOME_PROBABILITY, Statevector, transition};
pub use unitary::Unitary2x2;

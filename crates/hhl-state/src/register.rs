//! Qubit identifiers and named registers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::error::{StateError, StateResult};
use crate::statevector::Statevector;

/// Unique identifier for a qubit within a state.
///
/// Qubit `q` is bit `1 << q` of a basis-state index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Bit mask of this qubit in a basis-state index.
    pub fn mask(self) -> usize {
        1usize << self.0
    }

    /// Position of this qubit as a `usize`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// A named group of qubits with a classical initial value.
///
/// Registers are little-endian: `reg[0]` holds the least significant bit of
/// the register value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    name: String,
    qubits: Vec<QubitId>,
    initial: u64,
}

impl Register {
    /// Register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qubits of the register, least significant first.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Number of qubits.
    pub fn width(&self) -> usize {
        self.qubits.len()
    }

    /// Initial classical value.
    pub fn initial(&self) -> u64 {
        self.initial
    }

    /// The `i`-th qubit, if present.
    pub fn qubit(&self, i: usize) -> Option<QubitId> {
        self.qubits.get(i).copied()
    }

    /// Register value encoded in a basis-state index.
    pub fn value_of(&self, basis_index: usize) -> u64 {
        self.qubits
            .iter()
            .enumerate()
            .filter(|(_, q)| basis_index & q.mask() != 0)
            .map(|(bit, _)| 1u64 << bit)
            .sum()
    }
}

impl Index<usize> for Register {
    type Output = QubitId;

    fn index(&self, i: usize) -> &QubitId {
        &self.qubits[i]
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.qubits.len())
    }
}

/// Allocates registers over one composite qubit space.
#[derive(Debug, Clone, Default)]
pub struct RegisterFile {
    registers: Vec<Register>,
    next_qubit_id: u32,
}

impl RegisterFile {
    /// Create an empty register file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a register of `width` qubits initialised to `initial`.
    pub fn reg(&mut self, name: impl Into<String>, width: u32, initial: u64) -> StateResult<Register> {
        let name = name.into();
        if width < 64 && initial >> width != 0 {
            return Err(StateError::InitialValueOutOfRange {
                name,
                width,
                value: initial,
            });
        }
        let qubits = (0..width)
            .map(|i| QubitId(self.next_qubit_id + i))
            .collect();
        self.next_qubit_id += width;
        let reg = Register {
            name,
            qubits,
            initial,
        };
        self.registers.push(reg.clone());
        Ok(reg)
    }

    /// Total number of allocated qubits.
    pub fn num_qubits(&self) -> usize {
        self.next_qubit_id as usize
    }

    /// All registers in allocation order.
    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    /// Basis-state index holding every register's initial value.
    pub fn initial_index(&self) -> usize {
        self.registers
            .iter()
            .flat_map(|r| {
                r.qubits
                    .iter()
                    .enumerate()
                    .filter(move |(bit, _)| (r.initial >> bit) & 1 == 1)
                    .map(|(_, q)| q.mask())
            })
            .fold(0, |acc, m| acc | m)
    }

    /// The basis state holding each register's initial value.
    pub fn statevector(&self) -> Statevector {
        Statevector::basis(self.num_qubits(), self.initial_index())
    }
}

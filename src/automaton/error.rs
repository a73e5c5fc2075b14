//! Errors reported by construction, decoding and binary operations.

use crate::automaton::{StateId, Symbol};

/// Malformed initial, final or transition data handed to a constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    #[error("state {state} is out of range for an automaton with {state_count} states")]
    StateOutOfRange { state: StateId, state_count: u32 },
    /// Labels up to and including `alphabet_size` are valid, the latter
    /// standing for epsilon.
    #[error("label {label} is out of range for alphabet size {alphabet_size}")]
    SymbolOutOfRange { label: u32, alphabet_size: u32 },
    #[error("{what} {value} exceeds the largest encodable value {max}")]
    CapacityExceeded {
        what: &'static str,
        value: u32,
        max: u32,
    },
    #[error("a deterministic automaton needs exactly one initial state, got {0}")]
    MultipleInitialStatesForDfa(usize),
    #[error("a deterministic automaton needs an initial state")]
    NoInitialStateForDfa,
    #[error("state {state} has conflicting transitions on symbol {symbol}")]
    AmbiguousTransition { state: StateId, symbol: Symbol },
    #[error("epsilon transition {from} -> {to} is not allowed in a deterministic automaton")]
    EpsilonTransitionInDfa { from: StateId, to: StateId },
}

/// A malformed integer or byte stream. Decoding never yields a partially
/// populated automaton.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeserializationError {
    #[error("byte stream of {0} bytes is not a whole number of 32-bit integers")]
    UnalignedBytes(usize),
    #[error("length field {declared} does not match the {actual} integers that follow it")]
    LengthMismatch { declared: i32, actual: usize },
    #[error("unexpected end of stream while reading {0}")]
    Truncated(&'static str),
    #[error("negative value {value} for {field}")]
    NegativeValue { field: &'static str, value: i32 },
    #[error("{field} {value} is out of range, expected a value below {bound}")]
    OutOfRange {
        field: &'static str,
        value: i32,
        bound: u32,
    },
    #[error(
        "{state_count} states over {alphabet_size} symbols exceed the table limit of {max} slots"
    )]
    TableTooLarge {
        state_count: u32,
        alphabet_size: u32,
        max: u64,
    },
    #[error("{0} integers left over after the transition table")]
    TrailingData(usize),
    #[error("stream does not describe a deterministic automaton: {0}")]
    NotDeterministic(#[from] ConstructionError),
}

/// Two automata that cannot be combined since their alphabets differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operands have different alphabet sizes ({left} and {right})")]
pub struct IncompatibleOperand {
    pub left: u32,
    pub right: u32,
}

impl IncompatibleOperand {
    pub fn check(left: u32, right: u32) -> Result<(), IncompatibleOperand> {
        if left == right {
            Ok(())
        } else {
            Err(IncompatibleOperand { left, right })
        }
    }
}

/// Any error of the engine, for callers that do not need to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Deserialization(#[from] DeserializationError),
    #[error(transparent)]
    IncompatibleOperand(#[from] IncompatibleOperand),
}

//! The integer stream format of automata.
//!
//! An automaton is written as a sequence of 32 bit integers
//!
//! ```text
//! [length][alphabet_size][state_count]
//! [n_initial][initial...][n_final][final...]
//! [n_transitions][(source, label, destination)...]
//! ```
//!
//! where `length` counts all integers after itself and epsilon transitions
//! carry the label `-1`. [encode] and [decode] turn the stream into big endian
//! bytes.
//!
//! Streams are untrusted. Besides range checks, a decoded automaton may have
//! at most [MAX_TABLE_SIZE] transition table slots (`state_count` times
//! `alphabet_size`, counting an empty alphabet as one symbol).

use crate::automaton::{
    Automaton, StateId,
    construct::AutomatonParts,
    dfa::Dfa,
    error::DeserializationError,
    nfa::NfaEdge,
};

/// Label of epsilon transitions in the stream.
pub const EPSILON_LABEL: i32 = -1;

/// Largest `state_count * alphabet_size` accepted by [deserialize].
pub const MAX_TABLE_SIZE: u64 = 1 << 24;

/// Writes the automaton in its canonical form, see [Automaton::to_parts].
pub fn serialize(automaton: &Automaton) -> Vec<i32> {
    let parts = automaton.to_parts();

    let mut body = Vec::with_capacity(
        6 + parts.initial.len() + parts.final_states.len() + 3 * parts.transitions.len(),
    );
    body.push(parts.alphabet_size as i32);
    body.push(parts.state_count as i32);

    body.push(parts.initial.len() as i32);
    body.extend(parts.initial.iter().map(|s| *s as i32));

    body.push(parts.final_states.len() as i32);
    body.extend(parts.final_states.iter().map(|s| *s as i32));

    body.push(parts.transitions.len() as i32);
    for (from, label, to) in &parts.transitions {
        let label = match label {
            NfaEdge::Symbol(symbol) => *symbol as i32,
            NfaEdge::Epsilon => EPSILON_LABEL,
        };
        body.extend([*from as i32, label, *to as i32]);
    }

    let mut stream = Vec::with_capacity(body.len() + 1);
    stream.push(body.len() as i32);
    stream.extend(body);
    stream
}

struct StreamReader<'a> {
    data: &'a [i32],
    position: usize,
}

impl StreamReader<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    fn next(&mut self, field: &'static str) -> Result<i32, DeserializationError> {
        let value = *self
            .data
            .get(self.position)
            .ok_or(DeserializationError::Truncated(field))?;
        self.position += 1;
        Ok(value)
    }

    fn non_negative(&mut self, field: &'static str) -> Result<u32, DeserializationError> {
        let value = self.next(field)?;
        u32::try_from(value).map_err(|_| DeserializationError::NegativeValue { field, value })
    }

    /// Reads a count of items that each take `width` integers and checks that
    /// the stream is long enough to hold them.
    fn count(&mut self, field: &'static str, width: usize) -> Result<usize, DeserializationError> {
        let count = self.non_negative(field)? as usize;
        match count.checked_mul(width) {
            Some(needed) if needed <= self.remaining() => Ok(count),
            _ => Err(DeserializationError::Truncated(field)),
        }
    }

    fn bounded(&mut self, field: &'static str, bound: u32) -> Result<u32, DeserializationError> {
        let value = self.next(field)?;
        match u32::try_from(value) {
            Ok(v) if v < bound => Ok(v),
            Ok(_) => Err(DeserializationError::OutOfRange {
                field,
                value,
                bound,
            }),
            Err(_) => Err(DeserializationError::NegativeValue { field, value }),
        }
    }

    fn label(&mut self, alphabet_size: u32) -> Result<NfaEdge, DeserializationError> {
        let value = self.next("label")?;
        match value {
            EPSILON_LABEL => Ok(NfaEdge::Epsilon),
            v if v < 0 => Err(DeserializationError::NegativeValue {
                field: "label",
                value,
            }),
            v if (v as u32) < alphabet_size => Ok(NfaEdge::Symbol(v as u32)),
            _ => Err(DeserializationError::OutOfRange {
                field: "label",
                value,
                bound: alphabet_size,
            }),
        }
    }

    fn states(
        &mut self,
        field: &'static str,
        state_count: u32,
    ) -> Result<Vec<StateId>, DeserializationError> {
        let count = self.count(field, 1)?;
        (0..count).map(|_| self.bounded(field, state_count)).collect()
    }
}

fn check_table_size(state_count: u32, alphabet_size: u32) -> Result<(), DeserializationError> {
    let size = u64::from(state_count) * u64::from(alphabet_size.max(1));
    if size > MAX_TABLE_SIZE {
        return Err(DeserializationError::TableTooLarge {
            state_count,
            alphabet_size,
            max: MAX_TABLE_SIZE,
        });
    }
    Ok(())
}

/// Reads and validates the stream without building an automaton.
fn read_parts(stream: &[i32]) -> Result<AutomatonParts, DeserializationError> {
    let Some((&length, body)) = stream.split_first() else {
        return Err(DeserializationError::Truncated("length"));
    };

    if usize::try_from(length).ok() != Some(body.len()) {
        return Err(DeserializationError::LengthMismatch {
            declared: length,
            actual: body.len(),
        });
    }

    let mut reader = StreamReader {
        data: body,
        position: 0,
    };

    let alphabet_size = reader.non_negative("alphabet size")?;
    let state_count = reader.non_negative("state count")?;
    check_table_size(state_count, alphabet_size)?;
    let initial = reader.states("initial state", state_count)?;
    let final_states = reader.states("final state", state_count)?;

    let transition_count = reader.count("transition", 3)?;
    let mut transitions = Vec::with_capacity(transition_count);
    for _ in 0..transition_count {
        let from = reader.bounded("source", state_count)?;
        let label = reader.label(alphabet_size)?;
        let to = reader.bounded("destination", state_count)?;
        transitions.push((from, label, to));
    }

    if reader.remaining() > 0 {
        return Err(DeserializationError::TrailingData(reader.remaining()));
    }

    Ok(AutomatonParts {
        alphabet_size,
        state_count,
        initial,
        final_states,
        transitions,
    })
}

/// Reads an automaton from its integer stream. Like [crate::automaton::construct::construct],
/// the result is deterministic whenever the described automaton is.
pub fn deserialize(stream: &[i32]) -> Result<Automaton, DeserializationError> {
    read_parts(stream)
        .map(|parts| parts.assemble())
        .inspect_err(|err| tracing::debug!(%err, "rejected serialized automaton"))
}

/// Reads a stream that must describe a deterministic automaton.
pub fn deserialize_deterministic(stream: &[i32]) -> Result<Dfa, DeserializationError> {
    read_parts(stream)
        .and_then(|parts| parts.build_dfa().map_err(DeserializationError::from))
        .inspect_err(|err| tracing::debug!(%err, "rejected serialized DFA"))
}

/// The serialized stream as big endian bytes.
pub fn encode(automaton: &Automaton) -> Vec<u8> {
    serialize(automaton)
        .into_iter()
        .flat_map(i32::to_be_bytes)
        .collect()
}

/// Reads an automaton from big endian bytes written by [encode].
pub fn decode(bytes: &[u8]) -> Result<Automaton, DeserializationError> {
    let chunks = bytes.chunks_exact(4);
    if !chunks.remainder().is_empty() {
        return Err(DeserializationError::UnalignedBytes(bytes.len()));
    }

    let stream: Vec<i32> = chunks
        .map(|chunk| i32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    deserialize(&stream)
}

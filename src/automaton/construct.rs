use hashbrown::HashMap;
use itertools::Itertools;

use crate::automaton::{
    Automaton, StateId, Symbol,
    dfa::Dfa,
    error::ConstructionError,
    nfa::{Nfa, NfaEdge},
    node::StateNode,
};

/// The largest alphabet size and state count that can be represented in the
/// signed 32 bit wire format.
pub const MAX_ENCODABLE: u32 = i32::MAX as u32;

/// The explicit description of an automaton: its sizes, the initial and final
/// states and the transition relation. This is what [construct] validates and
/// what serialization writes out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatonParts {
    pub alphabet_size: u32,
    pub state_count: u32,
    pub initial: Vec<StateId>,
    pub final_states: Vec<StateId>,
    pub transitions: Vec<(StateId, NfaEdge, StateId)>,
}

impl AutomatonParts {
    /// Checks that every state and symbol lies in its declared range.
    pub fn validate(&self) -> Result<(), ConstructionError> {
        for (what, value) in [
            ("alphabet size", self.alphabet_size),
            ("state count", self.state_count),
        ] {
            if value > MAX_ENCODABLE {
                return Err(ConstructionError::CapacityExceeded {
                    what,
                    value,
                    max: MAX_ENCODABLE,
                });
            }
        }

        let check_state = |state: StateId| {
            if state < self.state_count {
                Ok(())
            } else {
                Err(ConstructionError::StateOutOfRange {
                    state,
                    state_count: self.state_count,
                })
            }
        };

        for state in self.initial.iter().chain(self.final_states.iter()) {
            check_state(*state)?;
        }

        for (from, label, to) in &self.transitions {
            check_state(*from)?;
            check_state(*to)?;

            if let NfaEdge::Symbol(symbol) = label
                && *symbol >= self.alphabet_size
            {
                return Err(ConstructionError::SymbolOutOfRange {
                    label: *symbol,
                    alphabet_size: self.alphabet_size,
                });
            }
        }

        Ok(())
    }

    /// Builds a DFA from validated parts. Fails if the parts need the
    /// nondeterministic representation. The transition function stays
    /// partial where no transition is given.
    pub(crate) fn build_dfa(&self) -> Result<Dfa, ConstructionError> {
        let initial = match self.initial.iter().unique().collect_vec().as_slice() {
            [] => return Err(ConstructionError::NoInitialStateForDfa),
            [initial] => **initial,
            more => return Err(ConstructionError::MultipleInitialStatesForDfa(more.len())),
        };

        let is_final = |state: StateId| self.final_states.contains(&state);

        let mut dfa = Dfa::new(self.alphabet_size, StateNode::new(is_final(0)));
        for state in 1..self.state_count {
            dfa.add_state(StateNode::new(is_final(state)));
        }
        dfa.set_initial(initial);

        for (from, label, to) in &self.transitions {
            match label {
                NfaEdge::Symbol(symbol) => dfa.add_transition(*from, *symbol, *to)?,
                NfaEdge::Epsilon => {
                    return Err(ConstructionError::EpsilonTransitionInDfa {
                        from: *from,
                        to: *to,
                    });
                }
            }
        }

        Ok(dfa)
    }

    /// Builds an NFA from validated parts.
    pub(crate) fn build_nfa(&self) -> Nfa {
        let mut nfa = Nfa::new(self.alphabet_size);

        for _ in 0..self.state_count {
            nfa.add_state(StateNode::non_accepting());
        }
        for state in &self.final_states {
            nfa.set_accepting(*state, true);
        }
        for state in &self.initial {
            nfa.add_initial(*state);
        }
        for (from, label, to) in &self.transitions {
            nfa.add_transition(*from, *label, *to);
        }

        nfa
    }

    /// Builds the deterministic representation if the parts allow it and
    /// falls back to the nondeterministic one otherwise.
    pub(crate) fn assemble(&self) -> Automaton {
        match self.build_dfa() {
            Ok(dfa) => Automaton::Deterministic(dfa),
            Err(reason) => {
                tracing::trace!(%reason, "building nondeterministic automaton");
                Automaton::Nondeterministic(self.build_nfa())
            }
        }
    }
}

/// Maps the raw construction labels to edges. A label equal to the alphabet
/// size is epsilon, larger labels are rejected.
fn parse_transitions(
    alphabet_size: u32,
    transitions: impl IntoIterator<Item = (StateId, u32, StateId)>,
) -> Result<Vec<(StateId, NfaEdge, StateId)>, ConstructionError> {
    transitions
        .into_iter()
        .map(|(from, label, to)| {
            let edge = match label.cmp(&alphabet_size) {
                std::cmp::Ordering::Less => NfaEdge::Symbol(label),
                std::cmp::Ordering::Equal => NfaEdge::Epsilon,
                std::cmp::Ordering::Greater => {
                    return Err(ConstructionError::SymbolOutOfRange {
                        label,
                        alphabet_size,
                    });
                }
            };
            Ok((from, edge, to))
        })
        .collect()
}

fn collect_parts(
    alphabet_size: u32,
    state_count: u32,
    initial: impl IntoIterator<Item = StateId>,
    final_states: impl IntoIterator<Item = StateId>,
    transitions: impl IntoIterator<Item = (StateId, u32, StateId)>,
) -> Result<AutomatonParts, ConstructionError> {
    let parts = AutomatonParts {
        alphabet_size,
        state_count,
        initial: initial.into_iter().collect(),
        final_states: final_states.into_iter().collect(),
        transitions: parse_transitions(alphabet_size, transitions)?,
    };
    parts.validate()?;
    Ok(parts)
}

/// Builds an automaton from an explicit description.
///
/// Transitions are `(source, label, destination)` triples where a label equal
/// to `alphabet_size` denotes epsilon. A deterministic automaton is produced
/// if there is exactly one initial state, no epsilon transition and no two
/// transitions with the same source and symbol but different destinations;
/// its transition function is partial where the table has gaps. Otherwise the
/// result is nondeterministic. Use [construct_deterministic] to get an error
/// instead of the nondeterministic fallback.
pub fn construct(
    alphabet_size: u32,
    state_count: u32,
    initial: impl IntoIterator<Item = StateId>,
    final_states: impl IntoIterator<Item = StateId>,
    transitions: impl IntoIterator<Item = (StateId, u32, StateId)>,
) -> Result<Automaton, ConstructionError> {
    let parts = collect_parts(alphabet_size, state_count, initial, final_states, transitions)?;
    Ok(parts.assemble())
}

/// Like [construct], but requires the data to describe a deterministic
/// automaton.
pub fn construct_deterministic(
    alphabet_size: u32,
    state_count: u32,
    initial: impl IntoIterator<Item = StateId>,
    final_states: impl IntoIterator<Item = StateId>,
    transitions: impl IntoIterator<Item = (StateId, u32, StateId)>,
) -> Result<Dfa, ConstructionError> {
    collect_parts(alphabet_size, state_count, initial, final_states, transitions)?.build_dfa()
}

impl Automaton {
    /// Validates the parts and assembles the automaton, see [construct].
    pub fn from_parts(parts: AutomatonParts) -> Result<Automaton, ConstructionError> {
        parts.validate()?;
        Ok(parts.assemble())
    }

    /// The explicit description of this automaton. Initial and final states
    /// are sorted, transitions are sorted and free of duplicates.
    pub fn to_parts(&self) -> AutomatonParts {
        let mut transitions = self.transitions();
        transitions.sort_unstable();
        transitions.dedup();

        AutomatonParts {
            alphabet_size: crate::automaton::Alphabet::alphabet_size(self),
            state_count: self.state_count() as u32,
            initial: self.initial_states().to_vec(),
            final_states: self.final_states().to_vec(),
            transitions,
        }
    }

    /// Counts the transitions leaving each state on each symbol. Used to tell
    /// whether the relation is functional.
    pub fn max_out_degree(&self) -> usize {
        let mut counts: HashMap<(StateId, Symbol), usize> = HashMap::new();
        for (from, label, _) in self.to_parts().transitions {
            if let NfaEdge::Symbol(symbol) = label {
                *counts.entry((from, symbol)).or_default() += 1;
            }
        }
        counts.values().copied().max().unwrap_or(0)
    }
}

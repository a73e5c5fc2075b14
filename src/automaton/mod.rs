use std::{borrow::Cow, fmt::Debug};

use crate::automaton::{
    dfa::Dfa,
    nfa::{Nfa, NfaEdge},
    state_set::StateSet,
};

pub mod algebra;
pub mod construct;
pub mod dfa;
pub mod dot;
pub mod error;
pub mod index_map;
pub mod nfa;
pub mod node;
pub mod serialization;
pub mod state_set;

/// States are identified by their index in `0..state_count`.
pub type StateId = u32;
/// Symbols are the integers `0..alphabet_size`.
pub type Symbol = u32;
/// A finite word over the alphabet.
pub type Word = Vec<Symbol>;

/// Which of the two representations an automaton uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutomatonKind {
    Deterministic,
    Nondeterministic,
}

/// Anything defined over the alphabet `0..alphabet_size`.
pub trait Alphabet {
    fn alphabet_size(&self) -> u32;

    fn symbols(&self) -> std::ops::Range<Symbol> {
        0..self.alphabet_size()
    }
}

/// The basic trait for anything that defines a language over a set alphabet.
pub trait Language: Alphabet {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Symbol>) -> bool;
}

/// A finite automaton in either representation.
///
/// Operations that need a specific representation coerce their operands
/// locally (see [Automaton::as_dfa] and [Automaton::as_nfa]) and never mutate
/// them. Only [Automaton::lang_complement] and minimization mutate in place.
#[derive(Clone)]
pub enum Automaton {
    Deterministic(Dfa),
    Nondeterministic(Nfa),
}

impl Automaton {
    pub fn kind(&self) -> AutomatonKind {
        match self {
            Automaton::Deterministic(_) => AutomatonKind::Deterministic,
            Automaton::Nondeterministic(_) => AutomatonKind::Nondeterministic,
        }
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self, Automaton::Deterministic(_))
    }

    pub fn state_count(&self) -> usize {
        match self {
            Automaton::Deterministic(dfa) => dfa.state_count(),
            Automaton::Nondeterministic(nfa) => nfa.state_count(),
        }
    }

    pub fn initial_states(&self) -> StateSet {
        match self {
            Automaton::Deterministic(dfa) => StateSet::singleton(dfa.get_initial()),
            Automaton::Nondeterministic(nfa) => nfa.initial_states().clone(),
        }
    }

    pub fn final_states(&self) -> StateSet {
        match self {
            Automaton::Deterministic(dfa) => dfa.final_states(),
            Automaton::Nondeterministic(nfa) => nfa.final_states(),
        }
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        match self {
            Automaton::Deterministic(dfa) => dfa.is_accepting(state),
            Automaton::Nondeterministic(nfa) => nfa.is_accepting(state),
        }
    }

    /// Checks whether the automaton accepts `word`. Words containing symbols
    /// outside the alphabet are rejected.
    pub fn contains(&self, word: &[Symbol]) -> bool {
        self.accepts(word)
    }

    /// Checks if the language is empty.
    pub fn is_empty(&self) -> bool {
        self.sample_word().is_none()
    }

    /// The shortest accepted word, lexicographically least among the shortest
    /// ones, or `None` if the language is empty.
    pub fn sample_word(&self) -> Option<Word> {
        match self {
            Automaton::Deterministic(dfa) => dfa.shortest_word(),
            Automaton::Nondeterministic(nfa) => nfa.shortest_word(),
        }
    }

    /// The states reachable from `states` using only epsilon transitions.
    /// Deterministic automata have none, so the set is returned as is.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        match self {
            Automaton::Deterministic(_) => states.clone(),
            Automaton::Nondeterministic(nfa) => nfa.epsilon_closure(states),
        }
    }

    /// The states that reach `states` using only epsilon transitions.
    pub fn inverted_epsilon_closure(&self, states: &StateSet) -> StateSet {
        match self {
            Automaton::Deterministic(_) => states.clone(),
            Automaton::Nondeterministic(nfa) => nfa.inverted_epsilon_closure(states),
        }
    }

    /// The states reachable from `states` by reading `symbol`.
    pub fn successor_states(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        match self {
            Automaton::Deterministic(dfa) => states
                .iter()
                .filter_map(|state| dfa.successor(state, symbol))
                .collect(),
            Automaton::Nondeterministic(nfa) => nfa.successor_states(states, symbol),
        }
    }

    /// The states from which reading `symbol` can lead into `states`.
    pub fn predecessor_states(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        match self {
            Automaton::Deterministic(dfa) => dfa.predecessor_states(states, symbol),
            Automaton::Nondeterministic(nfa) => nfa.predecessor_states(states, symbol),
        }
    }

    /// Returns an equivalent DFA, built by subset construction when needed.
    pub fn determinize(&self) -> Automaton {
        Automaton::Deterministic(self.as_dfa().into_owned())
    }

    /// Returns the same automaton in the nondeterministic representation.
    pub fn nondeterminize(&self) -> Automaton {
        Automaton::Nondeterministic(self.as_nfa().into_owned())
    }

    /// Borrows the DFA or builds one without touching `self`.
    pub fn as_dfa(&self) -> Cow<'_, Dfa> {
        match self {
            Automaton::Deterministic(dfa) => Cow::Borrowed(dfa),
            Automaton::Nondeterministic(nfa) => Cow::Owned(nfa.determinize()),
        }
    }

    /// Borrows the NFA or lifts the DFA into one without touching `self`.
    pub fn as_nfa(&self) -> Cow<'_, Nfa> {
        match self {
            Automaton::Deterministic(dfa) => Cow::Owned(dfa.nondeterminize()),
            Automaton::Nondeterministic(nfa) => Cow::Borrowed(nfa),
        }
    }

    /// Replaces a nondeterministic automaton by its determinization and
    /// returns the DFA.
    pub fn determinize_mut(&mut self) -> &mut Dfa {
        if let Automaton::Nondeterministic(nfa) = self {
            *self = Automaton::Deterministic(nfa.determinize());
        }

        match self {
            Automaton::Deterministic(dfa) => dfa,
            Automaton::Nondeterministic(_) => unreachable!("automaton was just determinized"),
        }
    }

    /// Iterates over all transitions as `(source, label, destination)`.
    pub fn transitions(&self) -> Vec<(StateId, NfaEdge, StateId)> {
        match self {
            Automaton::Deterministic(dfa) => dfa
                .transitions()
                .map(|(from, symbol, to)| (from, NfaEdge::Symbol(symbol), to))
                .collect(),
            Automaton::Nondeterministic(nfa) => nfa.transitions().collect(),
        }
    }
}

impl Alphabet for Automaton {
    fn alphabet_size(&self) -> u32 {
        match self {
            Automaton::Deterministic(dfa) => dfa.alphabet_size(),
            Automaton::Nondeterministic(nfa) => nfa.alphabet_size(),
        }
    }
}

impl Language for Automaton {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Symbol>) -> bool {
        match self {
            Automaton::Deterministic(dfa) => dfa.accepts(input),
            Automaton::Nondeterministic(nfa) => nfa.accepts(input),
        }
    }
}

impl From<Dfa> for Automaton {
    fn from(value: Dfa) -> Self {
        Automaton::Deterministic(value)
    }
}

impl From<Nfa> for Automaton {
    fn from(value: Nfa) -> Self {
        Automaton::Nondeterministic(value)
    }
}

impl Debug for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Automaton::Deterministic(dfa) => dfa.fmt(f),
            Automaton::Nondeterministic(nfa) => nfa.fmt(f),
        }
    }
}

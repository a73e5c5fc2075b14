use std::{borrow::Cow, collections::VecDeque, fmt::Debug};

use hashbrown::HashMap;
use itertools::Itertools;

use crate::automaton::{
    Alphabet, Language, StateId, Symbol, Word,
    error::ConstructionError,
    index_map::{IndexMap, IndexSet},
    nfa::{Nfa, NfaEdge},
    node::StateNode,
    state_set::StateSet,
};

pub mod minimization;

/// A deterministic finite automaton over the alphabet `0..alphabet_size`.
///
/// The transition function is stored as a flat table with one row per state
/// and one column per symbol. A missing entry means the function is partial
/// at that point; reading such a symbol rejects the word. Use
/// [Dfa::complete] to obtain a total transition function.
#[derive(Clone, PartialEq, Eq)]
pub struct Dfa {
    alphabet_size: u32,
    initial: StateId,
    states: Vec<StateNode>,
    transitions: Vec<Option<StateId>>,
}

impl Dfa {
    /// Creates a DFA with a single state, which is the initial state.
    pub fn new(alphabet_size: u32, initial: StateNode) -> Self {
        Dfa {
            alphabet_size,
            initial: 0,
            states: vec![initial],
            transitions: vec![None; alphabet_size as usize],
        }
    }

    pub fn add_state(&mut self, node: StateNode) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(node);
        self.transitions
            .extend(std::iter::repeat_n(None, self.alphabet_size as usize));
        id
    }

    pub(crate) fn set_initial(&mut self, state: StateId) {
        assert!(
            (state as usize) < self.states.len(),
            "Initial state {} is not part of the DFA",
            state
        );
        self.initial = state;
    }

    pub fn get_initial(&self) -> StateId {
        self.initial
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn node(&self, state: StateId) -> &StateNode {
        &self.states[state as usize]
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.states
            .get(state as usize)
            .map(|node| node.accepting)
            .unwrap_or(false)
    }

    pub fn final_states(&self) -> StateSet {
        self.iter_states()
            .filter(|state| self.is_accepting(*state))
            .collect()
    }

    pub fn iter_states(&self) -> std::ops::Range<StateId> {
        0..self.states.len() as StateId
    }

    fn slot(&self, state: StateId, symbol: Symbol) -> usize {
        state as usize * self.alphabet_size as usize + symbol as usize
    }

    /// The target of the transition from `state` on `symbol`, if defined.
    pub fn successor(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        if symbol >= self.alphabet_size || state as usize >= self.states.len() {
            return None;
        }

        self.transitions[self.slot(state, symbol)]
    }

    fn check_state(&self, state: StateId) -> Result<(), ConstructionError> {
        if (state as usize) < self.states.len() {
            Ok(())
        } else {
            Err(ConstructionError::StateOutOfRange {
                state,
                state_count: self.states.len() as u32,
            })
        }
    }

    /// Adds the transition `from -symbol-> to`. Adding a transition that
    /// conflicts with an existing one is an error, adding the same transition
    /// twice is not. States and symbol must exist.
    pub fn add_transition(
        &mut self,
        from: StateId,
        symbol: Symbol,
        to: StateId,
    ) -> Result<(), ConstructionError> {
        self.check_state(from)?;
        self.check_state(to)?;
        if symbol >= self.alphabet_size {
            return Err(ConstructionError::SymbolOutOfRange {
                label: symbol,
                alphabet_size: self.alphabet_size,
            });
        }

        match self.successor(from, symbol) {
            Some(existing) if existing != to => Err(ConstructionError::AmbiguousTransition {
                state: from,
                symbol,
            }),
            _ => {
                self.set_transition(from, symbol, to);
                Ok(())
            }
        }
    }

    /// Sets the transition `from -symbol-> to`, overriding a previous one.
    /// Callers guarantee that states and symbol are in range.
    pub(crate) fn set_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        let slot = self.slot(from, symbol);
        self.transitions[slot] = Some(to);
    }

    /// Iterates over all defined transitions, ordered by source and symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.iter_states().flat_map(move |state| {
            self.symbols()
                .filter_map(move |symbol| self.successor(state, symbol).map(|t| (state, symbol, t)))
        })
    }

    pub fn is_complete(&self) -> bool {
        self.transitions.iter().all(|t| t.is_some())
    }

    /// Adds a failure state if needed. This turns the DFA into a complete DFA,
    /// which is needed for complementation and product constructions.
    /// Returns the failure state if one was added.
    pub fn complete(&mut self) -> Option<StateId> {
        if self.is_complete() {
            return None;
        }

        let failure_state = self.add_state(StateNode::non_accepting());

        for slot in self.transitions.iter_mut() {
            if slot.is_none() {
                *slot = Some(failure_state);
            }
        }

        Some(failure_state)
    }

    /// A complete version of this DFA, borrowing `self` if it already is.
    pub fn completed(&self) -> Cow<'_, Dfa> {
        if self.is_complete() {
            Cow::Borrowed(self)
        } else {
            let mut dfa = self.clone();
            dfa.complete();
            Cow::Owned(dfa)
        }
    }

    /// Inverts the accepting states in place. The DFA must be complete.
    pub fn invert_mut(&mut self) {
        assert!(self.is_complete(), "DFA must be complete to invert");

        for node in self.states.iter_mut() {
            node.invert_mut();
        }
    }

    /// Complements the language in place, completing the DFA first.
    pub fn complement(&mut self) {
        self.complete();
        self.invert_mut();
    }

    /// The states reachable from the initial state.
    pub fn reachable_states(&self) -> IndexSet<StateId> {
        let mut visited = IndexSet::new(self.state_count());
        let mut stack = vec![self.initial];
        visited.insert(self.initial);

        while let Some(state) = stack.pop() {
            for symbol in self.symbols() {
                if let Some(target) = self.successor(state, symbol)
                    && visited.insert(target)
                {
                    stack.push(target);
                }
            }
        }

        visited
    }

    /// Removes all states that cannot be reached from the initial state and
    /// renumbers the remaining ones, keeping their relative order.
    pub fn remove_unreachable_states(&mut self) {
        let reachable = self.reachable_states();
        if reachable.len() == self.state_count() {
            return;
        }

        let mut state_map = IndexMap::<StateId, Option<StateId>>::new(self.state_count());
        let mut pruned = Dfa {
            alphabet_size: self.alphabet_size,
            initial: 0,
            states: Vec::with_capacity(reachable.len()),
            transitions: Vec::new(),
        };

        for state in reachable.iter() {
            let new_state = pruned.add_state(self.states[state as usize]);
            state_map.insert(state, Some(new_state));
        }

        for state in reachable.iter() {
            for symbol in self.symbols() {
                if let Some(target) = self.successor(state, symbol)
                    && let Some(new_target) = state_map.get(target)
                    && let Some(new_state) = state_map.get(state)
                {
                    pruned.set_transition(*new_state, symbol, *new_target);
                }
            }
        }

        if let Some(initial) = state_map.get(self.initial) {
            pruned.initial = *initial;
        }

        *self = pruned;
    }

    /// Builds the product DFA of two DFAs with the same alphabet. Only pairs
    /// reachable from the pair of initial states are created. A product
    /// state is accepting iff `accept` holds for the acceptance of its
    /// components. Both operands are completed locally.
    pub fn product(&self, other: &Dfa, accept: impl Fn(bool, bool) -> bool) -> Dfa {
        assert_eq!(
            self.alphabet_size, other.alphabet_size,
            "Alphabets must be the same to build a product"
        );

        let left = self.completed();
        let right = other.completed();

        let start = (left.initial, right.initial);
        let mut product = Dfa::new(
            self.alphabet_size,
            left.node(start.0).join(right.node(start.1), &accept),
        );

        // state map to map combinations of states to the new product states
        let mut state_map = HashMap::new();
        state_map.insert(start, product.initial);

        let mut queue = VecDeque::from([start]);

        while let Some((state1, state2)) = queue.pop_front() {
            let new_state = state_map[&(state1, state2)];

            for symbol in left.symbols() {
                let (Some(target1), Some(target2)) =
                    (left.successor(state1, symbol), right.successor(state2, symbol))
                else {
                    continue;
                };

                let next_state = *state_map.entry((target1, target2)).or_insert_with(|| {
                    queue.push_back((target1, target2));
                    product.add_state(left.node(target1).join(right.node(target2), &accept))
                });

                product.set_transition(new_state, symbol, next_state);
            }
        }

        tracing::trace!(
            left_states = left.state_count(),
            right_states = right.state_count(),
            product_states = product.state_count(),
            "built product DFA"
        );

        product
    }

    /// Builds an intersection DFA from two DFAs.
    pub fn intersect(&self, other: &Dfa) -> Dfa {
        self.product(other, |a, b| a && b)
    }

    /// Builds a DFA for `L(self) \ L(other)`.
    pub fn difference(&self, other: &Dfa) -> Dfa {
        self.product(other, |a, b| a && !b)
    }

    /// Lifts the DFA into an NFA with the same states and transitions.
    pub fn nondeterminize(&self) -> Nfa {
        let mut nfa = Nfa::new(self.alphabet_size);

        for state in self.iter_states() {
            nfa.add_state(*self.node(state));
        }
        nfa.add_initial(self.initial);

        for (from, symbol, to) in self.transitions() {
            nfa.add_transition(from, NfaEdge::Symbol(symbol), to);
        }

        nfa
    }

    /// The states from which reading `symbol` leads into `states`.
    pub fn predecessor_states(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        self.iter_states()
            .filter(|state| {
                self.successor(*state, symbol)
                    .is_some_and(|target| states.contains(target))
            })
            .collect()
    }

    /// Breadth first search for the shortest accepted word. Symbols are
    /// explored in ascending order, so the word is the lexicographically least
    /// among the shortest ones.
    pub fn shortest_word(&self) -> Option<Word> {
        let mut words = IndexMap::<StateId, Option<Word>>::new(self.state_count());
        let mut queue = VecDeque::from([self.initial]);
        words.insert(self.initial, Some(vec![]));

        while let Some(state) = queue.pop_front() {
            if self.is_accepting(state) {
                return words.get(state).clone();
            }

            for symbol in self.symbols() {
                let Some(target) = self.successor(state, symbol) else {
                    continue;
                };

                if !words.has_key(target) {
                    let mut word = words.get(state).clone().unwrap_or_default();
                    word.push(symbol);
                    words.insert(target, Some(word));
                    queue.push_back(target);
                }
            }
        }

        None
    }

    /// Checks if `L(Self) = ∅` by checking if there is no accepting run in the
    /// DFA.
    pub fn is_language_empty(&self) -> bool {
        self.shortest_word().is_none()
    }

    /// Checks if self is a subset of other. Both must have the same alphabet.
    ///
    /// The inclusion holds if there is no accepting run in the intersection of
    /// self and the inverse of other. `L(Self) ⊆ L(Other) iff L(Self) ∩
    /// L(invert(Other)) = ∅`
    pub fn is_subset_of(&self, other: &Dfa) -> bool {
        self.difference(other).is_language_empty()
    }

    /// Checks whether the two languages share no word.
    pub fn is_disjoint_from(&self, other: &Dfa) -> bool {
        self.intersect(other).is_language_empty()
    }
}

impl Alphabet for Dfa {
    fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }
}

impl Language for Dfa {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Symbol>) -> bool {
        let mut current_state = self.initial;

        for &symbol in input {
            match self.successor(current_state, symbol) {
                Some(next_state) => current_state = next_state,
                None => return false,
            }
        }

        self.is_accepting(current_state)
    }
}

impl Debug for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DFA")
            .field("alphabet_size", &self.alphabet_size)
            .field("state_count", &self.states.len())
            .field("initial_state", &self.initial)
            .field("final_states", &self.final_states())
            .field(
                "transitions",
                &self
                    .transitions()
                    .map(|(from, symbol, to)| format!("{from} --- {symbol} --> {to}"))
                    .collect_vec(),
            )
            .finish()
    }
}

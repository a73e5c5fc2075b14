use std::collections::VecDeque;

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::{
    Alphabet, Language, StateId, Symbol, Word,
    dfa::Dfa,
    index_map::IndexSet,
    node::StateNode,
    state_set::StateSet,
};

/// The label of an NFA transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NfaEdge {
    Epsilon,
    Symbol(Symbol),
}

impl NfaEdge {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, NfaEdge::Epsilon)
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            NfaEdge::Symbol(s) => Some(*s),
            NfaEdge::Epsilon => None,
        }
    }
}

fn node(state: StateId) -> NodeIndex {
    NodeIndex::new(state as usize)
}

fn state(node: NodeIndex) -> StateId {
    node.index() as StateId
}

/// A nondeterministic finite automaton with epsilon transitions.
///
/// States are the nodes of the graph, so their ids are the node indices.
/// Parallel edges with the same label are allowed and have no effect on the
/// language.
#[derive(Debug, Clone)]
pub struct Nfa {
    alphabet_size: u32,
    initial: StateSet,
    pub graph: DiGraph<StateNode, NfaEdge>,
}

impl Nfa {
    /// Creates an NFA without any states.
    pub fn new(alphabet_size: u32) -> Self {
        Nfa {
            alphabet_size,
            initial: StateSet::new(),
            graph: DiGraph::new(),
        }
    }

    pub fn add_state(&mut self, node: StateNode) -> StateId {
        state(self.graph.add_node(node))
    }

    pub fn add_transition(&mut self, from: StateId, label: NfaEdge, to: StateId) {
        self.graph.add_edge(node(from), node(to), label);
    }

    pub fn add_initial(&mut self, state: StateId) {
        self.initial.insert(state);
    }

    pub fn set_initial(&mut self, states: StateSet) {
        self.initial = states;
    }

    pub fn initial_states(&self) -> &StateSet {
        &self.initial
    }

    pub fn set_accepting(&mut self, state: StateId, accepting: bool) {
        self.graph[node(state)].accepting = accepting;
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.graph
            .node_weight(node(state))
            .map(|n| n.accepting)
            .unwrap_or(false)
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &StateSet) -> bool {
        states.iter().any(|s| self.is_accepting(s))
    }

    pub fn final_states(&self) -> StateSet {
        self.iter_states()
            .filter(|state| self.is_accepting(*state))
            .collect()
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn iter_states(&self) -> std::ops::Range<StateId> {
        0..self.graph.node_count() as StateId
    }

    /// Iterates over all transitions as `(source, label, destination)`, in
    /// insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, NfaEdge, StateId)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (state(edge.source()), *edge.weight(), state(edge.target())))
    }

    pub fn has_epsilon_transitions(&self) -> bool {
        self.graph.edge_weights().any(|label| label.is_epsilon())
    }

    fn targets(&self, from: StateId, label: NfaEdge) -> impl Iterator<Item = StateId> + '_ {
        self.graph
            .edges_directed(node(from), Direction::Outgoing)
            .filter(move |edge| *edge.weight() == label)
            .map(|edge| state(edge.target()))
    }

    fn sources(&self, to: StateId, label: NfaEdge) -> impl Iterator<Item = StateId> + '_ {
        self.graph
            .edges_directed(node(to), Direction::Incoming)
            .filter(move |edge| *edge.weight() == label)
            .map(|edge| state(edge.source()))
    }

    /// Worklist search that extends `states` along edges labeled epsilon,
    /// following them forward or backward.
    fn close(&self, states: &StateSet, direction: Direction) -> StateSet {
        let mut closure = states.clone();
        let mut stack = states.to_vec();

        while let Some(current) = stack.pop() {
            let next = match direction {
                Direction::Outgoing => self.targets(current, NfaEdge::Epsilon).collect_vec(),
                Direction::Incoming => self.sources(current, NfaEdge::Epsilon).collect_vec(),
            };

            for target in next {
                if closure.insert(target) {
                    stack.push(target);
                }
            }
        }

        closure
    }

    /// Calculates the epsilon closure of a set of states, i.e. all states
    /// reachable from the set using only epsilon transitions.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        self.close(states, Direction::Outgoing)
    }

    /// All states from which the set can be reached using only epsilon
    /// transitions.
    pub fn inverted_epsilon_closure(&self, states: &StateSet) -> StateSet {
        self.close(states, Direction::Incoming)
    }

    /// The direct `symbol` successors of a set of states, without closing
    /// over epsilon transitions.
    pub fn post(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        states
            .iter()
            .flat_map(|s| self.targets(s, NfaEdge::Symbol(symbol)))
            .collect()
    }

    /// The epsilon closed set of states reached from the epsilon closure of
    /// `states` by reading `symbol`.
    pub fn successor_states(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        let closed = self.epsilon_closure(states);
        self.epsilon_closure(&self.post(&closed, symbol))
    }

    /// All states from which reading `symbol`, with epsilon transitions
    /// before and after, can lead into `states`.
    pub fn predecessor_states(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        let closed = self.inverted_epsilon_closure(states);
        let predecessors = closed
            .iter()
            .flat_map(|s| self.sources(s, NfaEdge::Symbol(symbol)))
            .collect();
        self.inverted_epsilon_closure(&predecessors)
    }

    /// Determinizes a NFA to a DFA.
    /// This is done by creating a new DFA where each state is a set of states
    /// from the NFA, starting from the epsilon closure of the initial states.
    /// Only reachable sets are created, in breadth first order. The result is
    /// complete; the empty set becomes the failure state if it is reachable.
    pub fn determinize(&self) -> Dfa {
        let start_set = self.epsilon_closure(&self.initial);
        let mut dfa = Dfa::new(
            self.alphabet_size,
            StateNode::new(self.is_accepting_set(&start_set)),
        );

        let mut state_map = HashMap::new();
        state_map.insert(start_set.clone(), dfa.get_initial());

        let mut queue = VecDeque::from([start_set]);

        while let Some(set) = queue.pop_front() {
            let from = state_map[&set];

            for symbol in self.symbols() {
                let target_set = self.epsilon_closure(&self.post(&set, symbol));

                let target = match state_map.get(&target_set) {
                    Some(&target) => target,
                    None => {
                        let target = dfa.add_state(StateNode::new(self.is_accepting_set(&target_set)));
                        state_map.insert(target_set.clone(), target);
                        queue.push_back(target_set);
                        target
                    }
                };

                dfa.set_transition(from, symbol, target);
            }
        }

        tracing::debug!(
            nfa_states = self.state_count(),
            dfa_states = dfa.state_count(),
            "determinized NFA"
        );

        dfa
    }

    /// Returns an equivalent NFA without epsilon transitions. A state gets
    /// every symbol transition of its epsilon closure and is accepting if its
    /// closure contains an accepting state. States and initial states are
    /// kept as they are.
    pub fn remove_epsilon(&self) -> Nfa {
        let mut result = Nfa::new(self.alphabet_size);

        let closures = self
            .iter_states()
            .map(|s| self.epsilon_closure(&StateSet::singleton(s)))
            .collect_vec();

        for closure in &closures {
            result.add_state(StateNode::new(self.is_accepting_set(closure)));
        }
        result.initial = self.initial.clone();

        for (from, closure) in closures.iter().enumerate() {
            let mut added = hashbrown::HashSet::new();

            for member in closure {
                for edge in self.graph.edges_directed(node(member), Direction::Outgoing) {
                    if let NfaEdge::Symbol(symbol) = *edge.weight()
                        && added.insert((symbol, edge.target()))
                    {
                        result.add_transition(from as StateId, NfaEdge::Symbol(symbol), state(edge.target()));
                    }
                }
            }
        }

        result
    }

    /// Copies all states and transitions of `other` into `self`. The states of
    /// `other` are shifted by the returned offset. Initial states are not
    /// copied.
    fn append(&mut self, other: &Nfa) -> StateId {
        let offset = self.state_count() as StateId;

        for s in other.iter_states() {
            self.add_state(other.graph[node(s)]);
        }
        for (from, label, to) in other.transitions() {
            self.add_transition(from + offset, label, to + offset);
        }

        offset
    }

    /// The union of both languages: the state disjoint union of both NFAs,
    /// started in the initial states of either.
    pub fn union(&self, other: &Nfa) -> Nfa {
        let mut result = self.clone();
        let offset = result.append(other);

        for s in other.initial.iter() {
            result.add_initial(s + offset);
        }

        result
    }

    /// The concatenation of both languages. Final states of `self` get
    /// epsilon transitions into the initial states of `other` and only stay
    /// final if `other` accepts the empty word.
    pub fn concat(&self, other: &Nfa) -> Nfa {
        let mut result = self.clone();
        let offset = result.append(other);

        let own_finals = self.final_states();
        let other_accepts_empty = other.is_accepting_set(&other.epsilon_closure(&other.initial));

        for f in own_finals.iter() {
            for i in other.initial.iter() {
                result.add_transition(f, NfaEdge::Epsilon, i + offset);
            }
            result.set_accepting(f, other_accepts_empty);
        }

        result
    }

    /// The Kleene star of the language. A fresh accepting initial state leads
    /// into the old initial states, every final state leads back to it.
    pub fn star(&self) -> Nfa {
        let mut result = self.clone();
        let start = result.add_state(StateNode::accepting());

        for i in self.initial.iter() {
            result.add_transition(start, NfaEdge::Epsilon, i);
        }
        for f in self.final_states().iter() {
            result.add_transition(f, NfaEdge::Epsilon, start);
        }

        result.set_initial(StateSet::singleton(start));
        result
    }

    /// The NFA for the reversed language: every transition is flipped and
    /// initial and final states swap roles.
    pub fn reverse(&self) -> Nfa {
        let mut reversed = Nfa::new(self.alphabet_size);

        for s in self.iter_states() {
            reversed.add_state(StateNode::new(self.initial.contains(s)));
        }
        reversed.initial = self.final_states();

        for (from, label, to) in self.transitions() {
            reversed.add_transition(to, label, from);
        }

        reversed
    }

    /// Breadth first search for the shortest accepted word.
    ///
    /// The queue holds the states first reached by a word, grouped by that
    /// word. Groups are expanded with the symbols in ascending order, which
    /// keeps the queue sorted by length and then lexicographically, so the
    /// result is the least among the shortest accepted words.
    pub fn shortest_word(&self) -> Option<Word> {
        let mut visited = IndexSet::<StateId>::new(self.state_count());
        let start = self.epsilon_closure(&self.initial);
        for state in start.iter() {
            visited.insert(state);
        }

        let mut queue = VecDeque::from([(start, Vec::new())]);

        while let Some((states, word)) = queue.pop_front() {
            if self.is_accepting_set(&states) {
                return Some(word);
            }

            for symbol in self.symbols() {
                let discovered: StateSet = self
                    .successor_states(&states, symbol)
                    .iter()
                    .filter(|target| visited.insert(*target))
                    .collect();

                if !discovered.is_empty() {
                    let mut next = word.clone();
                    next.push(symbol);
                    queue.push_back((discovered, next));
                }
            }
        }

        None
    }
}

impl Alphabet for Nfa {
    fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }
}

impl Language for Nfa {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Symbol>) -> bool {
        let mut current_states = self.epsilon_closure(&self.initial);

        for &symbol in input {
            if symbol >= self.alphabet_size {
                return false;
            }

            current_states = self.epsilon_closure(&self.post(&current_states, symbol));

            if current_states.is_empty() {
                return false;
            }
        }

        self.is_accepting_set(&current_states)
    }
}

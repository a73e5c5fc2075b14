use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::automaton::{
    Alphabet, Automaton, StateId,
    dfa::Dfa,
    index_map::IndexMap,
    node::StateNode,
};

/// The table used in the minimization of a DFA.
///
/// Every reachable state of the (completed) DFA gets one row, numbered in
/// breadth first order from the initial state, so row 0 is the initial state.
/// Each row stores whether the state is final and the row index of the target
/// for every symbol. Minimization assigns every row a block; two rows end up
/// in the same block iff their states are language equivalent.
#[derive(Debug, Clone)]
pub struct PartitionTable {
    alphabet_size: u32,
    accepting: Vec<bool>,
    transitions: Vec<Vec<usize>>,
    blocks: Vec<usize>,
    block_count: usize,
}

impl PartitionTable {
    /// Builds the table from the reachable part of `dfa`. The DFA must be
    /// complete.
    pub fn new(dfa: &Dfa) -> Self {
        assert!(dfa.is_complete(), "DFA must be complete to minimize");

        let mut rows = IndexMap::<StateId, Option<usize>>::new(dfa.state_count());
        let mut order = vec![dfa.get_initial()];
        rows.insert(dfa.get_initial(), Some(0));

        let mut queue = VecDeque::from([dfa.get_initial()]);
        while let Some(state) = queue.pop_front() {
            for symbol in dfa.symbols() {
                if let Some(target) = dfa.successor(state, symbol)
                    && !rows.has_key(target)
                {
                    rows.insert(target, Some(order.len()));
                    order.push(target);
                    queue.push_back(target);
                }
            }
        }

        let accepting = order.iter().map(|s| dfa.is_accepting(*s)).collect();
        let transitions = order
            .iter()
            .map(|state| {
                dfa.symbols()
                    .filter_map(|symbol| dfa.successor(*state, symbol))
                    .filter_map(|target| *rows.get(target))
                    .collect()
            })
            .collect();

        PartitionTable {
            alphabet_size: dfa.alphabet_size(),
            accepting,
            transitions,
            blocks: vec![0; order.len()],
            block_count: 0,
        }
    }

    pub fn row_count(&self) -> usize {
        self.accepting.len()
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Moore's partition refinement. Starts from the split into final and
    /// non-final rows and splits blocks whose rows disagree on the block of
    /// some successor, until no block splits anymore.
    pub fn refine(&mut self) {
        let initial = self.accepting.iter().map(|a| vec![*a as usize]).collect();
        self.assign_blocks(initial);

        loop {
            let previous = self.block_count;
            let signatures = (0..self.row_count())
                .map(|row| self.signature(row))
                .collect();
            self.assign_blocks(signatures);

            // refinement only ever splits blocks, so an unchanged count means
            // the partition is stable
            if self.block_count == previous {
                break;
            }
        }
    }

    /// The current block of a row followed by the blocks of its successors.
    fn signature(&self, row: usize) -> Vec<usize> {
        std::iter::once(self.blocks[row])
            .chain(self.transitions[row].iter().map(|target| self.blocks[*target]))
            .collect()
    }

    /// Assigns one block per distinct signature. Blocks are numbered in order
    /// of their first row, which keeps the block of the initial row at 0.
    fn assign_blocks(&mut self, signatures: Vec<Vec<usize>>) {
        let mut ids: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut blocks = Vec::with_capacity(signatures.len());

        for signature in signatures {
            let next_id = ids.len();
            blocks.push(*ids.entry(signature).or_insert(next_id));
        }

        self.block_count = ids.len();
        self.blocks = blocks;
    }

    /// Builds the quotient DFA with one state per block.
    pub fn to_dfa(&self) -> Dfa {
        let mut representatives = vec![None; self.block_count];
        for (row, block) in self.blocks.iter().enumerate() {
            if representatives[*block].is_none() {
                representatives[*block] = Some(row);
            }
        }

        let mut dfa = Dfa::new(self.alphabet_size, StateNode::new(self.accepting[0]));
        for row in representatives.iter().skip(1).flatten() {
            dfa.add_state(StateNode::new(self.accepting[*row]));
        }

        for (block, row) in representatives.iter().enumerate() {
            let Some(row) = row else {
                continue;
            };

            for (symbol, target) in self.transitions[*row].iter().enumerate() {
                dfa.set_transition(
                    block as StateId,
                    symbol as u32,
                    self.blocks[*target] as StateId,
                );
            }
        }

        dfa
    }
}

/// Types that can be turned into an equivalent automaton with the least
/// number of states.
pub trait Minimizable: Sized {
    /// Returns the minimal equivalent automaton.
    fn minimized(&self) -> Self;

    /// Replaces `self` by its minimal equivalent.
    fn minimize(&mut self) {
        *self = self.minimized();
    }
}

impl Minimizable for Dfa {
    /// The unique minimal complete DFA for the language, with states numbered
    /// by first appearance in a breadth first traversal from the initial
    /// state.
    fn minimized(&self) -> Self {
        let complete = self.completed();

        let mut table = PartitionTable::new(&complete);
        table.refine();

        tracing::debug!(
            states = self.state_count(),
            reachable = table.row_count(),
            blocks = table.block_count(),
            "minimized DFA"
        );

        table.to_dfa()
    }
}

impl Minimizable for Automaton {
    /// Minimization always yields the deterministic representation. A
    /// nondeterministic automaton is determinized first.
    fn minimized(&self) -> Self {
        Automaton::Deterministic(self.as_dfa().minimized())
    }

    fn minimize(&mut self) {
        let dfa = self.determinize_mut();
        *dfa = dfa.minimized();
    }
}

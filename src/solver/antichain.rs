//! Language inclusion `L(A) ⊆ L(B)` with the backward antichain algorithm of
//! De Wulf, Doyen, Henzinger and Raskin.
//!
//! The solver explores pairs `(ℓ, S)` of a state `ℓ` of `A` and a set `S` of
//! states of `B`, together with a word `w` such that `A` accepts `w` from `ℓ`
//! and no state in `S` accepts `w`. Starting from the final states of `A`
//! paired with the non-final states of `B`, it prepends symbols using the
//! controllable predecessor `cpre_a(S) = { q | post_a(q) ⊆ S }`. Only pairs
//! with a maximal set are kept, which is sound since `cpre` is monotone.
//! Inclusion fails as soon as a pair `(ℓ, S)` with `ℓ` initial and all
//! initial states of `B` inside `S` shows up; its word is the counterexample.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{
    automaton::{
        Alphabet, Automaton, StateId, Symbol, Word, error::IncompatibleOperand, nfa::Nfa,
        state_set::StateSet,
    },
    config::AntichainConfig,
    solver::{SolverResult, SolverStatus},
};

/// Why the solver gave up without an answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AntichainSolverError {
    /// We ran out of time.
    Timeout,
    /// We hit the maximum number of iterations.
    MaxIterationsReached,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntichainSolverStatistics {
    /// Number of antichain elements whose predecessors were computed.
    pub step_count: u64,
    /// Number of elements in the antichain when the solver stopped.
    pub antichain_size: usize,
    pub time: std::time::Duration,
}

/// `True` if the inclusion holds, `False` with a word in `L(A) \ L(B)`
/// otherwise.
pub type AntichainSolverStatus = SolverStatus<(), Word, AntichainSolverError>;

pub type AntichainSolverResult =
    SolverResult<(), Word, AntichainSolverError, AntichainSolverStatistics>;

impl AntichainSolverResult {
    /// A word accepted by the left automaton but not by the right one.
    pub fn counterexample(&self) -> Option<&Word> {
        self.status.failure()
    }
}

#[derive(Debug, Clone)]
struct AntichainElement {
    set: StateSet,
    witness: Word,
}

#[derive(Debug)]
pub struct AntichainInclusionSolver {
    config: AntichainConfig,
    alphabet_size: u32,
    left_initial: StateSet,
    left_final: StateSet,
    /// `left_pre[symbol][state]`: the states of `A` with a `symbol`
    /// transition into `state`.
    left_pre: Vec<Vec<Vec<StateId>>>,
    right_state_count: usize,
    right_initial: StateSet,
    right_final: StateSet,
    /// `right_post[state][symbol]`: the `symbol` successors of `state` in `B`.
    right_post: Vec<Vec<StateSet>>,
    /// Maximal elements, grouped by the state of `A`.
    antichain: Vec<Vec<AntichainElement>>,
    queue: VecDeque<(StateId, StateSet, Word)>,
    step_count: u64,
    solver_start_time: Option<std::time::Instant>,
}

impl AntichainInclusionSolver {
    /// Prepares a solver for `L(left) ⊆ L(right)`. Both automata are turned
    /// into epsilon free NFAs; neither operand is modified.
    pub fn new(
        left: &Automaton,
        right: &Automaton,
        config: AntichainConfig,
    ) -> Result<Self, IncompatibleOperand> {
        IncompatibleOperand::check(left.alphabet_size(), right.alphabet_size())?;

        let left = left.as_nfa().remove_epsilon();
        let right = right.as_nfa().remove_epsilon();
        let alphabet_size = left.alphabet_size();

        let mut left_pre = vec![vec![Vec::new(); left.state_count()]; alphabet_size as usize];
        for (from, label, to) in left.transitions() {
            if let Some(symbol) = label.symbol() {
                left_pre[symbol as usize][to as usize].push(from);
            }
        }

        let right_post = Self::post_table(&right);

        Ok(AntichainInclusionSolver {
            config,
            alphabet_size,
            left_initial: left.initial_states().clone(),
            left_final: left.final_states(),
            left_pre,
            right_state_count: right.state_count(),
            right_initial: right.initial_states().clone(),
            right_final: right.final_states(),
            right_post,
            antichain: vec![Vec::new(); left.state_count()],
            queue: VecDeque::new(),
            step_count: 0,
            solver_start_time: None,
        })
    }

    fn post_table(nfa: &Nfa) -> Vec<Vec<StateSet>> {
        nfa.iter_states()
            .map(|state| {
                nfa.symbols()
                    .map(|symbol| nfa.post(&StateSet::singleton(state), symbol))
                    .collect()
            })
            .collect()
    }

    pub fn solve(&mut self) -> AntichainSolverResult {
        self.solver_start_time = Some(std::time::Instant::now());

        self.print_start_banner();

        let status = match self.solve_inner() {
            Ok(()) => SolverStatus::True(()),
            Err(status) => status,
        };
        let result = AntichainSolverResult::new(status, self.get_solver_statistics());
        self.print_end_banner(&result);

        result
    }

    /// Runs the fixpoint. Returns `Ok` once the antichain is saturated
    /// without a counterexample and the final status as `Err` otherwise.
    fn solve_inner(&mut self) -> Result<(), AntichainSolverStatus> {
        let rejecting = self.right_final.complement(self.right_state_count);
        for state in self.left_final.clone().iter() {
            self.insert(state, rejecting.clone(), Vec::new())?;
        }

        while let Some((state, set, witness)) = self.queue.pop_front() {
            // dropped by a larger set in the meantime
            if !self.antichain[state as usize].iter().any(|e| e.set == set) {
                continue;
            }

            self.step_count += 1;

            self.max_iterations_reached()?;
            self.max_time_reached()?;

            for symbol in 0..self.alphabet_size {
                let predecessor_set = self.cpre(&set, symbol);

                let mut next_witness = Vec::with_capacity(witness.len() + 1);
                next_witness.push(symbol);
                next_witness.extend_from_slice(&witness);

                for predecessor in self.left_pre[symbol as usize][state as usize].clone() {
                    self.insert(predecessor, predecessor_set.clone(), next_witness.clone())?;
                }
            }
        }

        tracing::debug!(
            antichain_size = self.antichain_size(),
            "antichain saturated without counterexample"
        );

        Ok(())
    }

    /// The states of `B` whose `symbol` successors all lie in `set`.
    fn cpre(&self, set: &StateSet, symbol: Symbol) -> StateSet {
        (0..self.right_state_count as StateId)
            .filter(|state| self.right_post[*state as usize][symbol as usize].is_subset_of(set))
            .collect()
    }

    /// Adds `(state, set)` unless a pair with a superset is already known,
    /// removing the pairs it dominates. Fails with the counterexample if the
    /// pair proves that inclusion does not hold.
    fn insert(
        &mut self,
        state: StateId,
        set: StateSet,
        witness: Word,
    ) -> Result<(), AntichainSolverStatus> {
        if self.left_initial.contains(state) && self.right_initial.is_subset_of(&set) {
            tracing::info!(counterexample = ?witness, "Found word outside of the right language");
            return Err(SolverStatus::False(witness));
        }

        let elements = &mut self.antichain[state as usize];
        if elements.iter().any(|e| set.is_subset_of(&e.set)) {
            return Ok(());
        }
        elements.retain(|e| !e.set.is_subset_of(&set));

        if *self.config.get_trace_antichain() {
            tracing::trace!(state, set = ?set, witness = ?witness, "antichain insert");
        }

        elements.push(AntichainElement {
            set: set.clone(),
            witness: witness.clone(),
        });
        self.queue.push_back((state, set, witness));

        Ok(())
    }

    pub fn antichain_size(&self) -> usize {
        self.antichain.iter().map(Vec::len).sum()
    }

    /// The maximal sets found so far for a state of the left automaton,
    /// each with a word that witnesses it.
    pub fn elements(&self, state: StateId) -> impl Iterator<Item = (&StateSet, &Word)> {
        self.antichain
            .get(state as usize)
            .into_iter()
            .flatten()
            .map(|e| (&e.set, &e.witness))
    }

    /// Checks if the maximum number of iterations has been reached.
    /// If so, returns an `Err` value.
    fn max_iterations_reached(&self) -> Result<(), AntichainSolverStatus> {
        if let Some(max_iterations) = *self.config.get_max_iterations()
            && max_iterations < self.step_count
        {
            return Err(SolverStatus::Unknown(
                AntichainSolverError::MaxIterationsReached,
            ));
        }

        Ok(())
    }

    /// Checks if the time limit has been reached.
    /// If so, returns an `Err` value.
    fn max_time_reached(&self) -> Result<(), AntichainSolverStatus> {
        if let Some(t) = self.get_solver_time()
            && let Some(max_time) = self.config.get_timeout()
            && &t > max_time
        {
            return Err(SolverStatus::Unknown(AntichainSolverError::Timeout));
        }

        Ok(())
    }

    fn get_solver_statistics(&self) -> AntichainSolverStatistics {
        AntichainSolverStatistics {
            step_count: self.step_count,
            antichain_size: self.antichain_size(),
            time: self.get_solver_time().unwrap_or_default(),
        }
    }

    fn get_solver_time(&self) -> Option<std::time::Duration> {
        self.solver_start_time.map(|x| x.elapsed())
    }

    fn print_start_banner(&self) {
        tracing::info!(
            alphabet_size = %self.alphabet_size,
            left_states = %self.antichain.len(),
            right_states = %self.right_state_count,
            "Antichain Solver Info"
        );
    }

    fn print_end_banner(&self, result: &AntichainSolverResult) {
        tracing::info!(
            result = ?result.status,
            step_count = %result.statistics.step_count,
            antichain_size = %result.statistics.antichain_size,
            time = ?result.statistics.time,
            "Result"
        );
    }
}

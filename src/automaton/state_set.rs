use std::{fmt::Debug, slice};

use itertools::Itertools;

use crate::automaton::StateId;

/// A set of states, stored as a sorted, duplicate free vector. The sorted
/// representation makes the set usable as a hash key during subset
/// construction and allows subset checks in linear time.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet(Vec<StateId>);

impl StateSet {
    pub fn new() -> Self {
        StateSet(Vec::new())
    }

    pub fn singleton(state: StateId) -> Self {
        StateSet(vec![state])
    }

    pub fn from_unsorted(mut states: Vec<StateId>) -> Self {
        states.sort_unstable();
        states.dedup();
        StateSet(states)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.0.binary_search(&state).is_ok()
    }

    /// Inserts a state, returns true if it was not yet part of the set.
    pub fn insert(&mut self, state: StateId) -> bool {
        match self.0.binary_search(&state) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, state);
                true
            }
        }
    }

    pub fn iter(&self) -> std::iter::Copied<slice::Iter<'_, StateId>> {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[StateId] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<StateId> {
        self.0.clone()
    }

    pub fn is_subset_of(&self, other: &StateSet) -> bool {
        if self.len() > other.len() {
            return false;
        }

        let mut other_iter = other.0.iter();
        'outer: for state in &self.0 {
            for candidate in other_iter.by_ref() {
                if candidate == state {
                    continue 'outer;
                }
                if candidate > state {
                    return false;
                }
            }
            return false;
        }

        true
    }

    pub fn intersects(&self, other: &StateSet) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return true,
            }
        }
        false
    }

    pub fn union(&self, other: &StateSet) -> StateSet {
        StateSet(self.0.iter().merge(other.0.iter()).dedup().copied().collect())
    }

    /// All states of `{0, ..., count - 1}` that are not in this set.
    pub fn complement(&self, count: usize) -> StateSet {
        StateSet(
            (0..count as StateId)
                .filter(|state| !self.contains(*state))
                .collect(),
        )
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<T: IntoIterator<Item = StateId>>(iter: T) -> Self {
        StateSet::from_unsorted(iter.into_iter().collect())
    }
}

impl From<Vec<StateId>> for StateSet {
    fn from(value: Vec<StateId>) -> Self {
        StateSet::from_unsorted(value)
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = StateId;
    type IntoIter = std::iter::Copied<slice::Iter<'a, StateId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_and_intersection() {
        let a = StateSet::from(vec![3, 1, 1]);
        let b = StateSet::from(vec![0, 1, 2, 3]);
        let c = StateSet::from(vec![0, 2]);

        assert_eq!(a.as_slice(), &[1, 3]);
        assert!(a.is_subset_of(&b));
        assert!(!b.is_subset_of(&a));
        assert!(!a.is_subset_of(&c));
        assert!(StateSet::new().is_subset_of(&c));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!StateSet::new().intersects(&b));
    }

    #[test]
    fn union_complement_insert() {
        let mut a = StateSet::from(vec![4, 0]);
        assert!(a.insert(2));
        assert!(!a.insert(4));
        assert_eq!(a.as_slice(), &[0, 2, 4]);

        let b = StateSet::from(vec![1, 2]);
        assert_eq!(a.union(&b).as_slice(), &[0, 1, 2, 4]);
        assert_eq!(a.complement(6).as_slice(), &[1, 3, 5]);
    }
}

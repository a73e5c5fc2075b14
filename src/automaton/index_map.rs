use crate::automaton::StateId;

pub trait IndexMapData: Clone + PartialEq {
    fn empty() -> Self;
}

impl<T: Clone + PartialEq> IndexMapData for Option<T> {
    fn empty() -> Self {
        None
    }
}

pub trait IndexMapKey: Copy {
    fn new(index: usize) -> Self;
    fn index(self) -> usize;
}

impl IndexMapKey for StateId {
    fn new(index: usize) -> Self {
        index as StateId
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A map over a compact index space, backed by a [Vec]. Lookups of keys that
/// were never inserted return the empty value of `V`.
#[derive(Debug, Clone)]
pub struct IndexMap<K: IndexMapKey, V: IndexMapData> {
    data: Vec<V>,
    _marker: std::marker::PhantomData<K>,
}

impl<K: IndexMapKey, V: IndexMapData> IndexMap<K, V> {
    pub fn new(max_index: usize) -> Self {
        IndexMap {
            data: vec![V::empty(); max_index],
            _marker: std::marker::PhantomData,
        }
    }

    pub fn has_key(&self, key: K) -> bool {
        let index = key.index();

        index < self.data.len() && self.data[index] != V::empty()
    }

    pub fn get(&self, key: K) -> &V {
        &self.data[key.index()]
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.data[key.index()] = value;
    }
}

/// A set over a compact index space, backed by a [Vec] of flags.
#[derive(Debug, Clone)]
pub struct IndexSet<K: IndexMapKey> {
    data: Vec<bool>,
    len: usize,
    _marker: std::marker::PhantomData<K>,
}

impl<K: IndexMapKey> IndexSet<K> {
    pub fn new(max_index: usize) -> Self {
        IndexSet {
            data: vec![false; max_index],
            len: 0,
            _marker: std::marker::PhantomData,
        }
    }

    /// Inserts the key, returns true if it was not yet present.
    pub fn insert(&mut self, key: K) -> bool {
        let slot = &mut self.data[key.index()];
        if *slot {
            return false;
        }
        *slot = true;
        self.len += 1;
        true
    }

    pub fn contains(&self, key: K) -> bool {
        self.data.get(key.index()).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, present)| **present)
            .map(|(i, _)| K::new(i))
    }
}

#[test]
fn test_index_set() {
    let mut set = IndexSet::<StateId>::new(5);
    assert!(set.insert(3));
    assert!(set.insert(1));
    assert!(!set.insert(3));
    assert!(set.contains(1));
    assert!(!set.contains(0));
    assert!(!set.contains(17));
    assert_eq!(set.len(), 2);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3]);
}

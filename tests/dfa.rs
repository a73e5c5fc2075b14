use fa_engine::{
    automaton::{Language, dfa::Dfa, error::ConstructionError, node::StateNode},
    validation::same_language::{
        assert_inverse_language, assert_same_language, assert_subset_language, same_language,
    },
};

const A: u32 = 0;
const B: u32 = 1;

/// a(ba)*b over {a, b}, without a failure state.
fn ab_dfa() -> Dfa {
    let mut dfa = Dfa::new(2, StateNode::non_accepting());
    let q0 = dfa.get_initial();
    let q1 = dfa.add_state(StateNode::non_accepting());
    let q2 = dfa.add_state(StateNode::accepting());

    dfa.add_transition(q0, A, q1).unwrap();
    dfa.add_transition(q1, B, q2).unwrap();
    dfa.add_transition(q2, A, q1).unwrap();

    dfa
}

#[test]
fn test_dfa() {
    let dfa = ab_dfa();

    assert!(dfa.accepts(&[A, B, A, B, A, B]));
    assert!(!dfa.accepts(&[A, B, A, B, A]));
    assert!(!dfa.accepts(&[]));
    assert!(!dfa.accepts(&[B]));
    assert!(!dfa.accepts(&[A, 2]));
}

#[test]
fn test_dfa_transitions() {
    let mut dfa = ab_dfa();

    assert_eq!(dfa.successor(0, A), Some(1));
    assert_eq!(dfa.successor(0, B), None);
    assert_eq!(dfa.successor(7, A), None);

    assert_eq!(
        dfa.add_transition(0, A, 2),
        Err(ConstructionError::AmbiguousTransition {
            state: 0,
            symbol: A
        })
    );
    assert_eq!(dfa.add_transition(0, A, 1), Ok(()));

    assert_eq!(
        dfa.transitions().collect::<Vec<_>>(),
        vec![(0, A, 1), (1, B, 2), (2, A, 1)]
    );
}

#[test]
fn test_dfa_transition_out_of_range() {
    let mut dfa = Dfa::new(1, StateNode::accepting());

    assert_eq!(
        dfa.add_transition(0, 0, 99),
        Err(ConstructionError::StateOutOfRange {
            state: 99,
            state_count: 1
        })
    );
    assert_eq!(
        dfa.add_transition(5, 0, 0),
        Err(ConstructionError::StateOutOfRange {
            state: 5,
            state_count: 1
        })
    );
    assert_eq!(
        dfa.add_transition(0, 1, 0),
        Err(ConstructionError::SymbolOutOfRange {
            label: 1,
            alphabet_size: 1
        })
    );

    // rejected transitions leave the DFA untouched
    assert_eq!(dfa.transitions().count(), 0);
    let intersection = dfa.intersect(&dfa);
    assert!(intersection.accepts(&[]));
    assert!(!intersection.accepts(&[0]));
}

#[test]
fn test_dfa_complete() {
    let mut dfa = ab_dfa();
    let original = dfa.clone();
    assert!(!dfa.is_complete());

    let failure_state = dfa.complete();
    assert_eq!(failure_state, Some(3));
    assert!(dfa.is_complete());
    assert!(!dfa.is_accepting(3));
    assert_eq!(dfa.complete(), None);

    assert_same_language(&original, &dfa, 6);
}

#[test]
fn test_dfa_inversion() {
    let dfa = ab_dfa();

    let mut inverted = dfa.clone();
    inverted.complement();

    assert_inverse_language(&dfa, &inverted, 6);

    let mut double_inverted = inverted.clone();
    double_inverted.complement();

    assert_same_language(&dfa, &double_inverted, 6);
    assert_eq!(double_inverted.state_count(), inverted.state_count());
}

#[test]
fn test_dfa_remove_unreachable() {
    let mut dfa = ab_dfa();
    let unreachable = dfa.add_state(StateNode::accepting());
    dfa.add_transition(unreachable, B, 2).unwrap();
    let original = dfa.clone();

    assert_eq!(dfa.reachable_states().len(), 3);

    dfa.remove_unreachable_states();
    assert_eq!(dfa.state_count(), 3);
    assert_same_language(&original, &dfa, 6);
}

#[test]
fn test_dfa_shortest_word() {
    let dfa = ab_dfa();
    assert_eq!(dfa.shortest_word(), Some(vec![A, B]));

    let empty = Dfa::new(2, StateNode::non_accepting());
    assert_eq!(empty.shortest_word(), None);
    assert!(empty.is_language_empty());
}

#[test]
fn test_dfa_product() {
    // words with an even number of b
    let mut even_b = Dfa::new(2, StateNode::accepting());
    let odd = even_b.add_state(StateNode::non_accepting());
    even_b.add_transition(0, A, 0).unwrap();
    even_b.add_transition(0, B, odd).unwrap();
    even_b.add_transition(odd, A, odd).unwrap();
    even_b.add_transition(odd, B, 0).unwrap();

    let ab = ab_dfa();
    let intersection = ab.intersect(&even_b);
    let difference = ab.difference(&even_b);

    assert!(intersection.is_complete());
    assert!(intersection.accepts(&[A, B, A, B]));
    assert!(!intersection.accepts(&[A, B]));
    assert!(difference.accepts(&[A, B]));
    assert!(!difference.accepts(&[A, B, A, B]));

    assert_subset_language(&intersection, &ab, 6);
    assert_subset_language(&intersection, &even_b, 6);
    assert!(intersection.is_subset_of(&ab));
    assert!(!ab.is_subset_of(&even_b));
    assert!(intersection.is_disjoint_from(&difference));
    assert!(!same_language(&intersection, &difference, 4));
}

#[test]
fn test_dfa_nondeterminize() {
    let dfa = ab_dfa();
    let nfa = dfa.nondeterminize();

    assert_eq!(nfa.state_count(), dfa.state_count());
    assert_eq!(nfa.transitions().count(), 3);
    assert_same_language(&dfa, &nfa, 6);
}

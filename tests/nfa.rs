use fa_engine::{
    automaton::{
        Automaton, AutomatonKind, Language,
        construct::construct,
        nfa::{Nfa, NfaEdge},
        node::StateNode,
        state_set::StateSet,
    },
    validation::{same_language::assert_same_language, test_sample_word},
};

/// alphabet {0, 1}, epsilon is label 2
fn closure_example() -> Automaton {
    construct(
        2,
        6,
        [0],
        [4],
        [(0, 0, 5), (1, 2, 2), (2, 1, 3), (3, 2, 4), (3, 1, 4), (5, 0, 3)],
    )
    .unwrap()
}

#[test]
fn test_epsilon_closure() {
    let nfa = closure_example();
    assert_eq!(nfa.kind(), AutomatonKind::Nondeterministic);

    assert_eq!(
        nfa.epsilon_closure(&StateSet::singleton(1)),
        StateSet::from(vec![1, 2])
    );
    assert_eq!(
        nfa.epsilon_closure(&StateSet::singleton(3)),
        StateSet::from(vec![3, 4])
    );
    assert_eq!(
        nfa.epsilon_closure(&StateSet::singleton(0)),
        StateSet::singleton(0)
    );
    assert_eq!(
        nfa.inverted_epsilon_closure(&StateSet::singleton(4)),
        StateSet::from(vec![3, 4])
    );
}

#[test]
fn test_nfa_steps() {
    let nfa = closure_example();

    assert_eq!(
        nfa.successor_states(&StateSet::singleton(0), 0),
        StateSet::singleton(5)
    );
    assert_eq!(
        nfa.successor_states(&StateSet::singleton(5), 0),
        StateSet::from(vec![3, 4])
    );
    assert_eq!(
        nfa.successor_states(&StateSet::singleton(1), 1),
        StateSet::from(vec![3, 4])
    );
    assert_eq!(
        nfa.predecessor_states(&StateSet::singleton(4), 1),
        StateSet::from(vec![1, 2, 3])
    );
}

#[test]
fn test_nfa_accepts() {
    let nfa = closure_example();

    assert!(!nfa.contains(&[]));
    assert!(!nfa.contains(&[0]));
    assert!(nfa.contains(&[0, 0]));
    assert!(nfa.contains(&[0, 0, 1]));
    assert!(!nfa.contains(&[0, 0, 1, 1]));
    assert!(!nfa.contains(&[1]));
    assert!(!nfa.contains(&[0, 2]));

    assert_eq!(nfa.sample_word(), Some(vec![0, 0]));
    test_sample_word(&nfa, &vec![0, 0]);
}

#[test]
fn test_nfa_determinize() {
    let nfa = closure_example();
    let dfa = nfa.determinize();

    assert_eq!(dfa.kind(), AutomatonKind::Deterministic);
    assert_same_language(&nfa, &dfa, 6);

    let Automaton::Deterministic(dfa) = dfa else {
        unreachable!()
    };
    assert!(dfa.is_complete());
}

#[test]
fn test_remove_epsilon() {
    let Automaton::Nondeterministic(nfa) = closure_example() else {
        panic!("expected an NFA");
    };
    assert!(nfa.has_epsilon_transitions());

    let without = nfa.remove_epsilon();
    assert!(!without.has_epsilon_transitions());
    assert_eq!(without.state_count(), nfa.state_count());
    assert_eq!(without.initial_states(), nfa.initial_states());
    assert_same_language(&nfa, &without, 6);
}

#[test]
fn test_nfa_multiple_initial_states() {
    let mut nfa = Nfa::new(2);
    let q0 = nfa.add_state(StateNode::non_accepting());
    let q1 = nfa.add_state(StateNode::non_accepting());
    let q2 = nfa.add_state(StateNode::accepting());
    nfa.add_initial(q0);
    nfa.add_initial(q1);

    nfa.add_transition(q0, NfaEdge::Symbol(0), q2);
    nfa.add_transition(q1, NfaEdge::Symbol(1), q2);
    nfa.add_transition(q1, NfaEdge::Symbol(1), q1);

    assert!(nfa.accepts(&[0]));
    assert!(nfa.accepts(&[1]));
    assert!(nfa.accepts(&[1, 1, 1]));
    assert!(!nfa.accepts(&[0, 1]));
    assert!(!nfa.accepts(&[]));

    assert_eq!(nfa.shortest_word(), Some(vec![0]));
    assert_same_language(&nfa, &nfa.determinize(), 6);
}

#[test]
fn test_nfa_without_initial_states() {
    let mut nfa = Nfa::new(1);
    let q0 = nfa.add_state(StateNode::accepting());
    nfa.add_transition(q0, NfaEdge::Symbol(0), q0);

    assert!(!nfa.accepts(&[]));
    assert_eq!(nfa.shortest_word(), None);

    let dfa = nfa.determinize();
    assert_eq!(dfa.state_count(), 1);
    assert!(dfa.is_language_empty());
}

#[test]
fn test_nfa_shortest_word_through_epsilon() {
    // 0 -ε-> 1 -1-> 2 and 0 -0-> 3 -0-> 2, only 2 is final
    let nfa = construct(2, 4, [0], [2], [(0, 2, 1), (1, 1, 2), (0, 0, 3), (3, 0, 2)]).unwrap();

    assert_eq!(nfa.sample_word(), Some(vec![1]));
    assert!(!nfa.is_empty());
}

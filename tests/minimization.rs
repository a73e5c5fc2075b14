use fa_engine::{
    automaton::{
        AutomatonKind, construct::construct, dfa::Dfa, dfa::minimization::Minimizable,
        node::StateNode,
    },
    validation::same_language::assert_same_language,
};

#[test]
fn test_dfa_minimize() {
    // words of even length, spread over four states
    let mut dfa = Dfa::new(1, StateNode::accepting());
    let q1 = dfa.add_state(StateNode::non_accepting());
    let q2 = dfa.add_state(StateNode::accepting());
    let q3 = dfa.add_state(StateNode::non_accepting());
    dfa.add_transition(0, 0, q1).unwrap();
    dfa.add_transition(q1, 0, q2).unwrap();
    dfa.add_transition(q2, 0, q3).unwrap();
    dfa.add_transition(q3, 0, 0).unwrap();

    let minimized = dfa.minimized();

    assert_eq!(minimized.state_count(), 2);
    assert_eq!(minimized.get_initial(), 0);
    assert!(minimized.is_accepting(0));
    assert_same_language(&dfa, &minimized, 8);

    let twice = minimized.minimized();
    assert_eq!(twice, minimized);
}

#[test]
fn test_dfa_minimize_partial() {
    // only the word [0] over {0, 1}
    let mut dfa = Dfa::new(2, StateNode::non_accepting());
    let accepting = dfa.add_state(StateNode::accepting());
    dfa.add_transition(0, 0, accepting).unwrap();

    let minimized = dfa.minimized();

    assert!(minimized.is_complete());
    assert_eq!(minimized.state_count(), 3);
    assert_same_language(&dfa, &minimized, 5);
}

#[test]
fn test_dfa_minimize_drops_unreachable() {
    let mut dfa = Dfa::new(1, StateNode::accepting());
    dfa.add_transition(0, 0, 0).unwrap();
    let unreachable = dfa.add_state(StateNode::non_accepting());
    dfa.add_transition(unreachable, 0, 0).unwrap();

    let minimized = dfa.minimized();
    assert_eq!(minimized.state_count(), 1);
}

#[test]
fn test_empty_language_minimize() {
    let dfa = Dfa::new(3, StateNode::non_accepting());
    let minimized = dfa.minimized();

    assert_eq!(minimized.state_count(), 1);
    assert!(minimized.is_complete());
    assert!(minimized.is_language_empty());
}

#[test]
fn test_automaton_minimize_in_place() {
    // (0 | 1)* 1 with nondeterministic guessing of the last letter
    let mut automaton = construct(2, 2, [0], [1], [(0, 0, 0), (0, 1, 0), (0, 1, 1)]).unwrap();
    let original = automaton.clone();
    assert_eq!(automaton.kind(), AutomatonKind::Nondeterministic);

    automaton.minimize();

    assert_eq!(automaton.kind(), AutomatonKind::Deterministic);
    assert_eq!(automaton.state_count(), 2);
    assert_same_language(&original, &automaton, 6);

    let again = automaton.minimized();
    assert_eq!(again.state_count(), automaton.state_count());
}

use fa_engine::automaton::{construct::construct, dot::generate_dotfile};

#[test]
fn test_generate_dotfile() {
    // 0 -0-> 1, 0 -1-> 1, 1 -ε-> 0
    let automaton = construct(2, 2, [0], [1], [(0, 0, 1), (0, 1, 1), (1, 2, 0)]).unwrap();
    let dot = generate_dotfile(&automaton);

    assert!(dot.starts_with("digraph finite_state_machine {\n"));
    assert!(dot.ends_with("}\n"));
    assert!(dot.contains("node [shape = doublecircle]; 1;\n"));
    assert!(dot.contains("START -> 0;\n"));
    assert!(dot.contains("0 -> 1 [ label=\"0,1\" ];\n"));
    assert!(dot.contains("1 -> 0 [ label=\"ε\" ];\n"));
}

#[test]
fn test_dotfile_without_final_states() {
    let automaton = construct(1, 1, [0], [], [(0, 0, 0)]).unwrap();
    let dot = generate_dotfile(&automaton);

    assert!(!dot.contains("doublecircle"));
    assert!(dot.contains("0 -> 0 [ label=\"0\" ];\n"));
}

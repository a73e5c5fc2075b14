use itertools::Itertools;

use crate::automaton::{Automaton, nfa::NfaEdge};

/// Formats the automaton as a graphviz digraph. The output is built from the
/// same canonical parts that serialization writes, so equal streams give equal
/// dot files. Parallel transitions are merged into one edge with a comma
/// separated label.
pub fn generate_dotfile(automaton: &Automaton) -> String {
    let parts = automaton.to_parts();

    let mut dot = String::new();
    dot.push_str("digraph finite_state_machine {\n");
    dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
    dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
    dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
    dot.push_str("rankdir=LR;\n");
    dot.push_str("node [shape=point,label=\"\"]START\n");

    if !parts.final_states.is_empty() {
        dot.push_str(&format!(
            "node [shape = doublecircle]; {};\n",
            parts.final_states.iter().join(" ")
        ));
    }
    dot.push_str("node [shape = circle];\n");

    for state in 0..parts.state_count {
        dot.push_str(&format!("{state} [ label=\"{state}\" ];\n"));
    }

    for initial in &parts.initial {
        dot.push_str(&format!("START -> {initial};\n"));
    }

    let mut transitions = parts.transitions;
    transitions.sort_by_key(|(from, label, to)| (*from, *to, *label));

    let grouped = transitions
        .iter()
        .chunk_by(|(from, _, to)| (*from, *to));

    for ((from, to), group) in &grouped {
        let label = group
            .map(|(_, label, _)| match label {
                NfaEdge::Symbol(symbol) => symbol.to_string(),
                NfaEdge::Epsilon => "ε".to_string(),
            })
            .join(",");

        dot.push_str(&format!("{from} -> {to} [ label=\"{label}\" ];\n"));
    }

    dot.push_str("}\n");
    dot
}

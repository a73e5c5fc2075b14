use crate::automaton::{Language, Word};

pub mod same_language;

/// Tests that the witness of a non-empty language is accepted and that no
/// shorter word is.
pub fn test_sample_word(automaton: &impl Language, witness: &Word) {
    assert!(
        automaton.accepts(witness),
        "{:?} is returned as a witness but not accepted",
        witness
    );

    if let Some(shorter) = same_language::all_words(automaton.alphabet_size(), witness.len())
        .take_while(|word| word.len() < witness.len())
        .find(|word| automaton.accepts(word))
    {
        panic!(
            "{:?} is accepted but shorter than the witness {:?}",
            shorter, witness
        );
    }
}

use std::iter::repeat_n;

use itertools::Itertools;

use crate::automaton::{Language, Symbol, Word};

/// All words over `0..alphabet_size` of length at most `max_word_length`,
/// shortest first and lexicographically ordered within each length.
pub fn all_words(alphabet_size: u32, max_word_length: usize) -> impl Iterator<Item = Word> {
    std::iter::once(Vec::new()).chain((1..=max_word_length).flat_map(move |length| {
        repeat_n(0..alphabet_size, length).multi_cartesian_product()
    }))
}

/// Checks if two automata accept the same language.
/// This is done by checking if the alphabets are the same and then checking if
/// the automata accept the same words up to a certain length.
pub fn same_language(a: &impl Language, b: &impl Language, max_word_length: usize) -> bool {
    // first we need to check if the alphabets are the same
    if a.alphabet_size() != b.alphabet_size() {
        return false;
    }

    all_words(a.alphabet_size(), max_word_length).all(|word| a.accepts(&word) == b.accepts(&word))
}

/// The first word of length at most `max_word_length` on which `predicate`
/// holds, given whether `a` and `b` accept it.
fn find_word(
    a: &impl Language,
    b: &impl Language,
    max_word_length: usize,
    predicate: impl Fn(bool, bool) -> bool,
) -> Option<Vec<Symbol>> {
    // first we need to check if the alphabets are the same
    if a.alphabet_size() != b.alphabet_size() {
        panic!("Alphabets are not the same");
    }

    all_words(a.alphabet_size(), max_word_length)
        .find(|word| predicate(a.accepts(word), b.accepts(word)))
}

pub fn assert_same_language(a: &impl Language, b: &impl Language, max_word_length: usize) {
    if let Some(word) = find_word(a, b, max_word_length, |x, y| x != y) {
        if a.accepts(&word) {
            panic!(
                "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                word
            );
        } else {
            panic!(
                "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                word
            );
        }
    }
}

/// Assert that the language accepted by automaton `a` is the inverse of the
/// language accepted by automaton `b`. Meaning no word is accepted by both and
/// no word is accepted by none.
pub fn assert_inverse_language(a: &impl Language, b: &impl Language, max_word_length: usize) {
    if let Some(word) = find_word(a, b, max_word_length, |x, y| x == y) {
        panic!(
            "{:?} is accepted by both or by neither automaton. Thus their languages are not inverse.",
            word
        );
    }
}

/// Assert that the language accepted by automaton `a` is a subset of the
/// language accepted by automaton `b`.
pub fn assert_subset_language(a: &impl Language, b: &impl Language, max_word_length: usize) {
    if let Some(word) = find_word(a, b, max_word_length, |x, y| x && !y) {
        panic!(
            "{:?} is accepted by automaton `a` but not by automaton `b`. Thus the language of `a` is not a subset of `b`.",
            word
        );
    }
}

#[test]
fn test_all_words() {
    let words = all_words(2, 2).collect_vec();
    assert_eq!(
        words,
        vec![
            vec![],
            vec![0],
            vec![1],
            vec![0, 0],
            vec![0, 1],
            vec![1, 0],
            vec![1, 1]
        ]
    );

    assert_eq!(all_words(0, 3).collect_vec(), vec![Vec::<Symbol>::new()]);
}

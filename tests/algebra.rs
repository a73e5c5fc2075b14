use fa_engine::{
    automaton::{
        Automaton, AutomatonKind, construct::construct, error::IncompatibleOperand,
    },
    validation::{
        same_language::{assert_inverse_language, assert_same_language, same_language},
        test_sample_word,
    },
};

/// Exactly the given word over {0, 1}.
fn word(word: &[u32]) -> Automaton {
    let length = word.len() as u32;
    let transitions = word
        .iter()
        .enumerate()
        .map(|(i, symbol)| (i as u32, *symbol, i as u32 + 1));

    construct(2, length + 1, [0], [length], transitions).unwrap()
}

/// Words over {0, 1} with an even number of 0.
fn even_zeros() -> Automaton {
    construct(2, 2, [0], [0], [(0, 0, 1), (0, 1, 0), (1, 0, 0), (1, 1, 1)]).unwrap()
}

/// Words over {0, 1} ending in 1, guessing the last letter.
fn ends_with_one() -> Automaton {
    construct(2, 2, [0], [1], [(0, 0, 0), (0, 1, 0), (0, 1, 1)]).unwrap()
}

#[test]
fn test_union() {
    let a = word(&[0]);
    let b = word(&[1, 1]);
    let union = a.lang_union(&b).unwrap();

    assert_eq!(union.kind(), AutomatonKind::Nondeterministic);
    assert!(union.contains(&[0]));
    assert!(union.contains(&[1, 1]));
    assert!(!union.contains(&[]));
    assert!(!union.contains(&[1]));
    assert!(!union.contains(&[0, 1, 1]));

    // operands are left alone
    assert_eq!(a.kind(), AutomatonKind::Deterministic);
    assert_eq!(b.state_count(), 3);
}

#[test]
fn test_intersect_difference() {
    let even = even_zeros();
    let ends = ends_with_one();

    let intersection = even.lang_intersect(&ends).unwrap();
    assert_eq!(intersection.kind(), AutomatonKind::Deterministic);
    assert!(intersection.contains(&[0, 0, 1]));
    assert!(!intersection.contains(&[0, 1]));
    assert!(!intersection.contains(&[0, 0]));

    let difference = even.lang_difference(&ends).unwrap();
    assert!(difference.contains(&[]));
    assert!(difference.contains(&[0, 0]));
    assert!(!difference.contains(&[1]));

    let symmetric = even.lang_symmetric_difference(&ends).unwrap();
    assert!(symmetric.contains(&[]));
    assert!(symmetric.contains(&[0, 1]));
    assert!(!symmetric.contains(&[1]));
    assert!(!symmetric.contains(&[0]));

    assert_eq!(ends.kind(), AutomatonKind::Nondeterministic);
}

#[test]
fn test_concat() {
    let a = word(&[0]);
    let ones = construct(2, 1, [0], [0], [(0, 1, 0)]).unwrap();

    let concat = a.lang_concat(&ones).unwrap();
    assert!(concat.contains(&[0]));
    assert!(concat.contains(&[0, 1, 1]));
    assert!(!concat.contains(&[]));
    assert!(!concat.contains(&[1]));
    assert!(!concat.contains(&[0, 0]));

    let concat = ones.lang_concat(&a).unwrap();
    assert!(concat.contains(&[0]));
    assert!(concat.contains(&[1, 1, 0]));
    assert!(!concat.contains(&[1]));
    assert!(!concat.contains(&[0, 1]));
}

#[test]
fn test_concat_epsilon_word() {
    // the second operand accepts the empty word through an epsilon transition
    let a = word(&[0]);
    let b = construct(2, 3, [0], [1], [(0, 2, 1), (0, 1, 2), (2, 1, 1)]).unwrap();

    let concat = a.lang_concat(&b).unwrap();
    assert!(concat.contains(&[0]));
    assert!(concat.contains(&[0, 1, 1]));
    assert!(!concat.contains(&[0, 1]));
    assert!(!concat.contains(&[]));
}

#[test]
fn test_star_and_reverse() {
    let a = word(&[0, 1]);

    let star = a.lang_star();
    assert!(star.contains(&[]));
    assert!(star.contains(&[0, 1]));
    assert!(star.contains(&[0, 1, 0, 1]));
    assert!(!star.contains(&[0]));
    assert!(!star.contains(&[1, 0]));

    let reversed = a.lang_reverse();
    assert!(reversed.contains(&[1, 0]));
    assert!(!reversed.contains(&[0, 1]));

    let star_reversed = star.lang_reverse();
    assert!(star_reversed.contains(&[1, 0, 1, 0]));
    assert_same_language(&star_reversed.lang_reverse(), &star, 6);
}

#[test]
fn test_complement_in_place() {
    let original = ends_with_one();
    let mut complement = original.clone();
    complement.lang_complement();

    assert_eq!(complement.kind(), AutomatonKind::Deterministic);
    assert_inverse_language(&original, &complement, 6);
    assert!(complement.contains(&[]));
    assert!(complement.contains(&[1, 0]));

    let complemented = original.lang_complemented();
    assert_same_language(&complement, &complemented, 6);
    assert_eq!(original.kind(), AutomatonKind::Nondeterministic);
}

#[test]
fn test_de_morgan() {
    let a = even_zeros();
    let b = ends_with_one().determinize();

    let union = a.lang_union(&b).unwrap();

    let mut not_a = a.clone();
    not_a.lang_complement();
    let mut not_b = b.clone();
    not_b.lang_complement();
    let mut de_morgan = not_a.lang_intersect(&not_b).unwrap();
    de_morgan.lang_complement();

    assert_same_language(&union, &de_morgan, 6);
}

#[test]
fn test_decision_queries() {
    let even = even_zeros();
    let ends = ends_with_one();
    let intersection = even.lang_intersect(&ends).unwrap();

    assert_eq!(intersection.lang_subset_of(&even), Ok(true));
    assert_eq!(intersection.lang_subset_of(&ends), Ok(true));
    assert_eq!(even.lang_subset_of(&ends), Ok(false));

    assert_eq!(ends.equals(&ends.determinize()), Ok(true));
    assert_eq!(ends.equals(&even), Ok(false));

    let difference = even.lang_difference(&ends).unwrap();
    assert_eq!(difference.lang_disjoint_to(&ends), Ok(true));
    assert_eq!(even.lang_disjoint_to(&ends), Ok(false));
}

#[test]
fn test_incompatible_operands() {
    let binary = even_zeros();
    let unary = construct(1, 1, [0], [0], [(0, 0, 0)]).unwrap();
    let err = IncompatibleOperand { left: 2, right: 1 };

    assert_eq!(binary.lang_union(&unary).unwrap_err(), err);
    assert_eq!(binary.lang_intersect(&unary).unwrap_err(), err);
    assert_eq!(binary.lang_difference(&unary).unwrap_err(), err);
    assert_eq!(binary.lang_symmetric_difference(&unary).unwrap_err(), err);
    assert_eq!(binary.lang_concat(&unary).unwrap_err(), err);
    assert_eq!(binary.equals(&unary), Err(err));
    assert_eq!(binary.lang_subset_of(&unary), Err(err));
    assert_eq!(binary.lang_disjoint_to(&unary), Err(err));
    assert_eq!(binary.antichain_subset_of(&unary), Err(err));
}

#[test]
fn test_sample_word_is_minimal() {
    let a = word(&[1, 0]);
    let b = word(&[0, 1]);
    let c = word(&[1, 1, 1]);
    let union = a.lang_union(&b).unwrap().lang_union(&c).unwrap();

    assert_eq!(union.sample_word(), Some(vec![0, 1]));
    test_sample_word(&union, &vec![0, 1]);

    let determinized = union.determinize();
    assert_eq!(determinized.sample_word(), Some(vec![0, 1]));

    let empty = a.lang_intersect(&b).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.sample_word(), None);
    assert!(!same_language(&empty, &a, 3));
}

//! Hand-transcribed conformance scenarios.
//!
//! These stand in for a `BidiTest.txt`/`BidiCharacterTest.txt` conformance
//! run: the real UCD files are not vendored, so the concrete scenarios this
//! crate's own specification enumerates are checked here as ordinary tests.

use bidi_core::{get_embedding_levels, get_reordered_indices, BaseDirection};

#[test]
fn plain_ascii_stays_at_base_level_zero() {
    let levels = get_embedding_levels("abc", BaseDirection::Auto);
    assert_eq!(levels.levels, vec![0, 0, 0]);
    assert_eq!(levels.paragraphs[0].level, 0);

    let order = get_reordered_indices("abc", &levels, None, None);
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn arabic_letters_resolve_to_paragraph_level_one() {
    let text = "\u{0627} \u{0628} \u{062C}";
    let levels = get_embedding_levels(text, BaseDirection::Auto);
    assert_eq!(levels.levels, vec![1; 5]);
    assert_eq!(levels.paragraphs[0].level, 1);

    let order = get_reordered_indices(text, &levels, None, None);
    assert_eq!(order, vec![4, 3, 2, 1, 0]);
}

#[test]
fn rlo_override_reorders_only_the_overridden_span() {
    // "A" RLO "B" "C" PDF "D"
    let text = "A\u{202E}BC\u{202C}D";
    let levels = get_embedding_levels(text, BaseDirection::Auto);
    assert_eq!(levels.levels, vec![0, 0, 1, 1, 0, 0]);

    let order = get_reordered_indices(text, &levels, None, None);
    // C before B; A and D stay put.
    assert_eq!(order, vec![0, 1, 3, 2, 4, 5]);
}

#[test]
fn parenthesized_letter_takes_the_surrounding_rtl_level() {
    let levels = get_embedding_levels("(a)", BaseDirection::Rtl);
    assert_eq!(levels.paragraphs[0].level, 1);
    assert_eq!(levels.levels[0], 1);
    assert_eq!(levels.levels[2], 1);
}

#[test]
fn lone_surrogate_pair_keeps_equal_levels_on_both_units() {
    let levels = get_embedding_levels("\u{1F600}", BaseDirection::Auto);
    assert_eq!(levels.levels, vec![0, 0]);

    let order = get_reordered_indices("\u{1F600}", &levels, None, None);
    assert_eq!(order, vec![0, 1]);
}

#[test]
fn paragraphs_split_on_u2029_resolve_independently() {
    let text = "abc\u{2029}\u{062F}\u{0639}";
    let levels = get_embedding_levels(text, BaseDirection::Auto);
    assert_eq!(levels.paragraphs.len(), 2);
    assert_eq!(levels.paragraphs[0].level, 0);
    assert_eq!(levels.paragraphs[1].level, 1);
    assert_eq!(&levels.levels[0..4], &[0, 0, 0, 0]);
    assert_eq!(&levels.levels[4..6], &[1, 1]);
}

#![forbid(unsafe_code)]

//! Unicode Bidirectional Algorithm (UAX #9) resolution engine.
//!
//! This crate resolves an embedding level per character in a logical-order
//! string, reports paragraph boundaries, and derives the visual-order
//! index permutation and mirrored-bracket substitutions from those levels.
//! It implements the core of UAX #9: paragraph splitting (P1-P3), the
//! explicit-level stack (X1-X8), isolating run sequence construction (X10,
//! BD13), weak/neutral/bracket resolution (W1-W7, N0-N2), implicit levels
//! and the L1 trailing-whitespace reset (I1-I2, L1), and visual reordering
//! (L2).
//!
//! Character-class, bracket, and mirror data are supplied by [`tables`];
//! line wrapping, shaping, and any CLI or public data source beyond this
//! crate's own hand-authored tables are out of scope.
//!
//! # Example
//!
//! ```rust
//! use bidi_core::{get_embedding_levels, get_reordered_string, BaseDirection};
//!
//! // Pure LTR text passes through unchanged.
//! let levels = get_embedding_levels("Hello, world!", BaseDirection::Auto);
//! assert!(levels.levels.iter().all(|&l| l == 0));
//!
//! // Arabic text reorders right-to-left.
//! let text = "\u{0627}\u{0628}\u{062C}";
//! let levels = get_embedding_levels(text, BaseDirection::Auto);
//! let result = get_reordered_string(text, &levels, None, None);
//! assert_eq!(result, "\u{062C}\u{0628}\u{0627}");
//! ```

pub mod char_type;
pub mod explicit;
pub mod implicit;
pub mod index_map;
pub mod mirror;
pub mod neutral;
pub mod paragraph;
pub mod reorder;
pub mod resolver;
pub mod runs;
pub mod tables;
pub mod weak;

use std::collections::HashMap;

pub use char_type::CharType;
pub use paragraph::BaseDirection;
pub use resolver::{EmbeddingLevels, ParagraphInfo};

/// Resolve embedding levels for `text` (P1-P3, X1-X8, X10/BD13, W1-W7,
/// N0-N2, I1-I2, L1), returning one level per UTF-16 code unit plus the
/// paragraph boundaries found.
///
/// `base_direction` forces the paragraph base level (`Ltr` ⇒ 0, `Rtl` ⇒ 1)
/// or applies P2-P3 auto-detection (`Auto`).
#[must_use]
pub fn get_embedding_levels(text: &str, base_direction: BaseDirection) -> EmbeddingLevels {
    resolver::resolve(text, base_direction)
}

fn clamp_range(len: usize, start: Option<usize>, end: Option<usize>) -> (usize, usize) {
    if len == 0 {
        return (0, 0);
    }
    let last = len - 1;
    let start = start.unwrap_or(0).min(last);
    let end = end.unwrap_or(last).min(last);
    (start, end)
}

/// Visual-order code-unit index permutation (L2) over `[start, end]`
/// (inclusive, defaulting to the whole string). `embed_result` is the
/// value a prior call to [`get_embedding_levels`] returned for `text`.
///
/// Out-of-range `start`/`end` are clamped to `[0, len-1]`, matching this
/// crate's total/non-panicking design (see the crate-level docs).
#[must_use]
pub fn get_reordered_indices(
    text: &str,
    embed_result: &EmbeddingLevels,
    start: Option<usize>,
    end: Option<usize>,
) -> Vec<usize> {
    let (start, end) = clamp_range(text.encode_utf16().count(), start, end);
    reorder::reordered_indices(&embed_result.levels, start, end)
}

/// The `(from, to)` inclusive code-unit segments L2 would reverse over
/// `[start, end]` (defaulting to the whole string).
#[must_use]
pub fn get_reorder_segments(
    text: &str,
    embed_result: &EmbeddingLevels,
    start: Option<usize>,
    end: Option<usize>,
) -> Vec<(usize, usize)> {
    let (start, end) = clamp_range(text.encode_utf16().count(), start, end);
    let trailing_ws = trailing_whitespace_code_units(text, start, end);
    reorder::reorder_segments(&embed_result.levels, start, end, trailing_ws)
}

/// Count of trailing original-`WS` code units at the end of `[start, end]`,
/// excluded from the final (lowest-level) reversal so a line's trailing
/// whitespace never appears reversed at the visual line edge.
fn trailing_whitespace_code_units(text: &str, start: usize, end: usize) -> usize {
    let scan = index_map::scan(text);
    let mut count = 0usize;
    for cp in (0..scan.len()).rev() {
        let cu = scan.cp_to_cu[cp] as usize;
        let width = scan.chars[cp].len_utf16();
        if cu < start || cu > end {
            continue;
        }
        if cu + width - 1 > end {
            break;
        }
        if scan.classes[cp] == CharType::WS {
            count += width;
        } else {
            break;
        }
    }
    count
}

/// The visually reordered form of `[start, end]` of `text` (defaulting to
/// the whole string), with mirrored brackets substituted where applicable.
/// `embed_result` is the value a prior call to [`get_embedding_levels`]
/// returned for `text`.
#[must_use]
pub fn get_reordered_string(
    text: &str,
    embed_result: &EmbeddingLevels,
    start: Option<usize>,
    end: Option<usize>,
) -> String {
    let mut order = get_reordered_indices(text, embed_result, start, end);
    let mirrors = get_mirrored_characters_map(text, embed_result, start, end);
    let units: Vec<u16> = text.encode_utf16().collect();
    restore_surrogate_pair_order(&mut order, &units);

    let mut result_units = Vec::with_capacity(order.len());
    for logical_cu in order {
        if let Some(&mirrored) = mirrors.get(&logical_cu) {
            let mut buf = [0u16; 2];
            result_units.extend_from_slice(mirrored.encode_utf16(&mut buf));
        } else {
            result_units.push(units[logical_cu]);
        }
    }
    String::from_utf16_lossy(&result_units)
}

/// L2 reverses runs of code units without regard for surrogate-pair
/// boundaries, so a pair whose run gets reversed comes out as (low, high)
/// instead of (high, low). Restore the pair's internal order in place,
/// wherever it lands visually, without disturbing anything else.
fn restore_surrogate_pair_order(order: &mut [usize], units: &[u16]) {
    let is_high = |u: u16| (0xD800..=0xDBFF).contains(&u);
    let is_low = |u: u16| (0xDC00..=0xDFFF).contains(&u);
    let mut i = 0;
    while i + 1 < order.len() {
        let (a, b) = (order[i], order[i + 1]);
        if a == b + 1 && is_low(units[a]) && is_high(units[b]) {
            order.swap(i, i + 1);
            i += 2;
        } else {
            i += 1;
        }
    }
}

/// Mapping from code-unit index to replacement glyph, for every code point
/// in `[start, end]` (defaulting to the whole string) whose resolved level
/// is odd and that has a mirror glyph.
#[must_use]
pub fn get_mirrored_characters_map(
    text: &str,
    embed_result: &EmbeddingLevels,
    start: Option<usize>,
    end: Option<usize>,
) -> HashMap<usize, char> {
    let (start, end) = clamp_range(text.encode_utf16().count(), start, end);
    let scan = index_map::scan(text);
    let full = mirror::mirrored_characters_map(&scan.chars, &scan.cp_to_cu, &embed_result.levels);
    full.into_iter().filter(|&(cu, _)| cu >= start && cu <= end).collect()
}

/// The UAX #9 bidi class of `c`.
#[must_use]
pub fn bidi_char_type(c: char) -> CharType {
    tables::class_of(c)
}

/// Short UAX #9 abbreviation for `c`'s bidi class (e.g. `"ON"`, `"AL"`).
#[must_use]
pub fn bidi_char_type_name(c: char) -> &'static str {
    tables::class_of(c).short_name()
}

/// Closing bracket for an opening bracket, if `c` opens one.
#[must_use]
pub fn opening_to_closing_bracket(c: char) -> Option<char> {
    tables::opening_to_closing(c)
}

/// Opening bracket for a closing bracket, if `c` closes one.
#[must_use]
pub fn closing_to_opening_bracket(c: char) -> Option<char> {
    tables::closing_to_opening(c)
}

/// Canonical equivalent of a bracket character used for N0 matching,
/// defaulting to the character itself when it has none.
#[must_use]
pub fn canonical_bracket(c: char) -> char {
    tables::canonical_bracket(c)
}

/// The mirror glyph for `c`, if any.
#[must_use]
pub fn mirrored_character(c: char) -> Option<char> {
    tables::mirrored_character(c)
}

#![forbid(unsafe_code)]

//! Neutral and bracket-pair resolution (N0-N2).

use smallvec::SmallVec;

use crate::char_type::CharType;
use crate::runs::IsolatingRunSequence;
use crate::tables;

/// Bracket-opener stack cap (BD16).
const BRACKET_STACK_CAP: usize = 63;

fn embedding_direction(level: u8) -> CharType {
    if level % 2 == 1 { CharType::R } else { CharType::L }
}

/// Map a resolved class to a strong direction for N0-N2 purposes, treating
/// EN and AN as R.
fn as_strong(c: CharType) -> Option<CharType> {
    match c {
        CharType::L => Some(CharType::L),
        CharType::R | CharType::EN | CharType::AN => Some(CharType::R),
        _ => None,
    }
}

fn is_neutral_or_isolate(c: CharType) -> bool {
    c.intersects(CharType::NEUTRAL_ISOLATES)
}

struct OpenBracket {
    canonical: char,
    pos: usize,
}

/// Apply N0-N2 to `classes` over `seq`. `chars` gives the original
/// character at each code-point index (bracket identity never changes
/// through resolution) and `original` gives the pre-W1 class, needed to
/// find NSM characters that N0 must propagate a bracket's direction onto.
pub fn resolve(
    classes: &mut [CharType],
    chars: &[char],
    original: &[CharType],
    seq: &IsolatingRunSequence,
) {
    n0_brackets(classes, chars, original, seq);
    n1_n2(classes, seq);
}

fn n0_brackets(
    classes: &mut [CharType],
    chars: &[char],
    original: &[CharType],
    seq: &IsolatingRunSequence,
) {
    let e = embedding_direction(seq.level);
    let mut stack: SmallVec<[OpenBracket; 64]> = SmallVec::new();
    let mut pairs: Vec<(usize, usize)> = Vec::new();

    for (pos, &idx) in seq.indices.iter().enumerate() {
        let c = chars[idx];
        if tables::opening_to_closing(c).is_some() {
            if stack.len() == BRACKET_STACK_CAP {
                // BD16: once the opener stack is full, stop processing BD16
                // for the remainder of the isolating run sequence.
                break;
            }
            stack.push(OpenBracket { canonical: tables::canonical_bracket(c), pos });
        } else if tables::closing_to_opening(c).is_some() {
            let canonical_close = tables::canonical_bracket(c);
            let expected_open = tables::closing_to_opening(c)
                .map(tables::canonical_bracket)
                .unwrap_or(canonical_close);
            if let Some(match_at) = stack.iter().rposition(|b| b.canonical == expected_open) {
                pairs.push((stack[match_at].pos, pos));
                stack.truncate(match_at);
            }
        }
    }

    pairs.sort_by_key(|&(opener_pos, _)| opener_pos);

    for (opener_pos, closer_pos) in pairs {
        let opener_idx = seq.indices[opener_pos];
        let closer_idx = seq.indices[closer_pos];

        let mut saw_matching = false;
        let mut saw_opposite = false;
        for &i in &seq.indices[opener_pos + 1..closer_pos] {
            if let Some(dir) = as_strong(classes[i]) {
                if dir == e {
                    saw_matching = true;
                    break;
                }
                saw_opposite = true;
            }
        }

        let resolved = if saw_matching {
            Some(e)
        } else if saw_opposite {
            let before = (0..opener_pos)
                .rev()
                .map(|p| seq.indices[p])
                .find_map(|i| as_strong(classes[i]))
                .unwrap_or(if seq.sos == CharType::R { CharType::R } else { CharType::L });
            Some(if before != e { before } else { e })
        } else {
            None
        };

        if let Some(dir) = resolved {
            classes[opener_idx] = dir;
            classes[closer_idx] = dir;
            propagate_to_trailing_nsm(classes, original, seq, opener_pos, dir);
            propagate_to_trailing_nsm(classes, original, seq, closer_pos, dir);
        }
    }
}

/// N0's final clause: characters that were NSM before W1 ran and
/// immediately follow a bracket that N0 just resolved take the same
/// direction, for as many such characters as follow consecutively.
fn propagate_to_trailing_nsm(
    classes: &mut [CharType],
    original: &[CharType],
    seq: &IsolatingRunSequence,
    bracket_pos: usize,
    dir: CharType,
) {
    let mut pos = bracket_pos + 1;
    while pos < seq.indices.len() {
        let idx = seq.indices[pos];
        if original[idx] != CharType::NSM {
            break;
        }
        classes[idx] = dir;
        pos += 1;
    }
}

fn n1_n2(classes: &mut [CharType], seq: &IsolatingRunSequence) {
    let e = embedding_direction(seq.level);
    let n = seq.indices.len();
    let mut pos = 0usize;
    while pos < n {
        if !is_neutral_or_isolate(classes[seq.indices[pos]]) {
            pos += 1;
            continue;
        }
        let start = pos;
        while pos < n && is_neutral_or_isolate(classes[seq.indices[pos]]) {
            pos += 1;
        }
        let end = pos;

        let before = if start == 0 {
            seq.sos
        } else {
            as_strong(classes[seq.indices[start - 1]]).unwrap_or(e)
        };
        let after = if end == n {
            seq.eos
        } else {
            as_strong(classes[seq.indices[end]]).unwrap_or(e)
        };
        let dir = if before == after { before } else { e };

        for &i in &seq.indices[start..end] {
            classes[i] = dir;
        }
    }
}

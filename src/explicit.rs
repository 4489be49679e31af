#![forbid(unsafe_code)]

//! Explicit embedding levels (X1-X8): the directional status stack and
//! the per-character pass that produces level-run levels and resolves
//! isolate-initiator/PDI pairs.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::char_type::CharType;
use crate::paragraph::Paragraph;

/// Maximum embedding depth (UAX #9 X1).
const MAX_DEPTH: u8 = 125;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Override {
    None,
    L,
    R,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    level: u8,
    over: Override,
    isolate: bool,
}

/// Output of the X1-X8 pass over one paragraph.
pub struct ExplicitResult {
    /// `levels[i]` is the embedding level assigned to code point `i`.
    pub levels: Vec<u8>,
    /// Bijection between an isolate initiator's index and its matching
    /// PDI's index, keyed from both sides.
    pub isolate_pairs: HashMap<usize, usize>,
}

fn next_odd(level: u8) -> u8 {
    level + 1 + (level % 2 == 0) as u8
}

fn next_even(level: u8) -> u8 {
    level + 1 + (level % 2 == 1) as u8
}

/// Run X1-X8 over the paragraph `[para.start, para.end]` of `classes`,
/// mutating `classes` in place for rule X6's override substitution (the
/// caller must keep an unmutated copy for N0/L1's original-class tests).
pub fn process(classes: &mut [CharType], para: &Paragraph) -> ExplicitResult {
    let mut stack: SmallVec<[Frame; 128]> = SmallVec::new();
    stack.push(Frame {
        level: para.level,
        over: Override::None,
        isolate: false,
    });

    let mut overflow_isolate: u32 = 0;
    let mut overflow_embedding: u32 = 0;
    let mut valid_isolate: u32 = 0;
    let mut traced_overflow = false;

    let mut levels = vec![para.level; classes.len()];
    let mut isolate_pairs = HashMap::new();
    // Stack of indices of isolate initiators currently open, parallel to
    // the isolate frames on `stack`, used to record pair matches on PDI.
    let mut open_initiators: SmallVec<[usize; 128]> = SmallVec::new();

    let mut i = para.start;
    while i <= para.end && i < classes.len() {
        let class = classes[i];
        let top = *stack.last().expect("stack never empties");

        match class {
            CharType::RLE | CharType::LRE => {
                levels[i] = top.level;
                let new_level = if class == CharType::RLE {
                    next_odd(top.level)
                } else {
                    next_even(top.level)
                };
                if new_level <= MAX_DEPTH && overflow_isolate == 0 && overflow_embedding == 0 {
                    stack.push(Frame {
                        level: new_level,
                        over: Override::None,
                        isolate: false,
                    });
                } else if overflow_isolate == 0 {
                    overflow_embedding += 1;
                    trace_overflow_once(&mut traced_overflow, i);
                }
            }
            CharType::RLO | CharType::LRO => {
                levels[i] = top.level;
                let new_level = if class == CharType::RLO {
                    next_odd(top.level)
                } else {
                    next_even(top.level)
                };
                if new_level <= MAX_DEPTH && overflow_isolate == 0 && overflow_embedding == 0 {
                    stack.push(Frame {
                        level: new_level,
                        over: if class == CharType::RLO {
                            Override::R
                        } else {
                            Override::L
                        },
                        isolate: false,
                    });
                } else if overflow_isolate == 0 {
                    overflow_embedding += 1;
                    trace_overflow_once(&mut traced_overflow, i);
                }
            }
            CharType::RLI | CharType::LRI | CharType::FSI => {
                levels[i] = top.level;
                apply_override(classes, i, top.over);
                let resolved_rtl = if class == CharType::FSI {
                    resolve_fsi_is_rtl(classes, i, para.end)
                } else {
                    class == CharType::RLI
                };
                let new_level = if resolved_rtl {
                    next_odd(top.level)
                } else {
                    next_even(top.level)
                };
                if new_level <= MAX_DEPTH && overflow_isolate == 0 && overflow_embedding == 0 {
                    valid_isolate += 1;
                    open_initiators.push(i);
                    stack.push(Frame {
                        level: new_level,
                        over: Override::None,
                        isolate: true,
                    });
                } else {
                    overflow_isolate += 1;
                    trace_overflow_once(&mut traced_overflow, i);
                }
            }
            CharType::PDI => {
                if overflow_isolate > 0 {
                    overflow_isolate -= 1;
                } else if valid_isolate > 0 {
                    while !stack.last().unwrap().isolate {
                        stack.pop();
                    }
                    let initiator = open_initiators.pop().expect("valid_isolate tracked it");
                    isolate_pairs.insert(initiator, i);
                    isolate_pairs.insert(i, initiator);
                    stack.pop();
                    overflow_embedding = 0;
                    valid_isolate -= 1;
                }
                let top = *stack.last().unwrap();
                levels[i] = top.level;
                apply_override(classes, i, top.over);
            }
            CharType::PDF => {
                if overflow_isolate == 0 {
                    if overflow_embedding > 0 {
                        overflow_embedding -= 1;
                    } else if !top.isolate && stack.len() > 1 {
                        stack.pop();
                    }
                }
                levels[i] = stack.last().unwrap().level;
            }
            CharType::B => {
                levels[i] = para.level;
            }
            _ => {
                levels[i] = top.level;
                apply_override(classes, i, top.over);
            }
        }
        i += 1;
    }

    ExplicitResult { levels, isolate_pairs }
}

fn apply_override(classes: &mut [CharType], i: usize, over: Override) {
    if classes[i] == CharType::BN {
        return;
    }
    match over {
        Override::L => classes[i] = CharType::L,
        Override::R => classes[i] = CharType::R,
        Override::None => {}
    }
}

fn trace_overflow_once(traced: &mut bool, index: usize) {
    if !*traced {
        *traced = true;
        tracing::trace!(index, "embedding stack overflow");
    }
}

/// Resolve an FSI to the RLI/LRI it behaves as, per X5c: apply P2-P3
/// starting after the FSI, treating any PDI at this nesting level as
/// terminating the scan, up to the FSI's own matching PDI or paragraph end.
fn resolve_fsi_is_rtl(classes: &[CharType], fsi_index: usize, para_end: usize) -> bool {
    let scan_end = crate::paragraph::index_of_matching_pdi(classes, fsi_index)
        .map(|pdi| pdi - 1)
        .unwrap_or(para_end);
    let mut i = fsi_index + 1;
    while i <= scan_end && i < classes.len() {
        let c = classes[i];
        if c.is_isolate_initiator() {
            match crate::paragraph::index_of_matching_pdi(classes, i) {
                Some(pdi) => {
                    i = pdi + 1;
                    continue;
                }
                None => break,
            }
        }
        if c == CharType::L {
            return false;
        }
        if c == CharType::R || c == CharType::AL {
            return true;
        }
        i += 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paragraph::Paragraph;
    use crate::tables::class_of;

    fn run(s: &str, level: u8) -> (Vec<CharType>, ExplicitResult) {
        let mut classes: Vec<CharType> = s.chars().map(class_of).collect();
        let para = Paragraph { start: 0, end: classes.len() - 1, level };
        let result = process(&mut classes, &para);
        (classes, result)
    }

    #[test]
    fn plain_text_stays_at_paragraph_level() {
        let (_, r) = run("abc", 0);
        assert_eq!(r.levels, vec![0, 0, 0]);
    }

    #[test]
    fn rlo_override_forces_r_class() {
        // A RLO B C PDF D
        let (classes, r) = run("A\u{202E}BC\u{202C}D", 0);
        assert_eq!(r.levels, vec![0, 0, 1, 1, 0, 0]);
        assert_eq!(classes[2], CharType::R);
        assert_eq!(classes[3], CharType::R);
    }

    #[test]
    fn lri_opens_isolate_and_pdi_closes_it() {
        let (_, r) = run("A\u{2066}B\u{2069}C", 0);
        // A=0 LRI=0 B=2 PDI=0 C=0
        assert_eq!(r.levels, vec![0, 0, 2, 0, 0]);
        assert_eq!(r.isolate_pairs.get(&1), Some(&3));
        assert_eq!(r.isolate_pairs.get(&3), Some(&1));
    }

    #[test]
    fn unmatched_pdi_is_absorbed() {
        let (_, r) = run("A\u{2069}B", 0);
        assert_eq!(r.levels, vec![0, 0, 0]);
        assert!(r.isolate_pairs.is_empty());
    }

    #[test]
    fn rli_increments_to_next_odd_level() {
        let (_, r) = run("\u{2067}A\u{2069}", 0);
        assert_eq!(r.levels[1], 1);
    }

    #[test]
    fn pdf_without_matching_embedding_is_ignored() {
        let (_, r) = run("A\u{202C}B", 0);
        assert_eq!(r.levels, vec![0, 0, 0]);
    }

    #[test]
    fn deep_embedding_overflows_gracefully() {
        let mut s = String::new();
        for _ in 0..200 {
            s.push('\u{202A}');
        }
        s.push('A');
        let (_, r) = run(&s, 0);
        assert!(r.levels.last().copied().unwrap_or(0) <= MAX_DEPTH);
    }

    #[tracing_test::traced_test]
    #[test]
    fn stack_overflow_emits_one_trace_event() {
        let mut s = String::new();
        for _ in 0..200 {
            s.push('\u{202A}');
        }
        s.push('A');
        run(&s, 0);
        assert!(logs_contain("embedding stack overflow"));
    }
}

#![forbid(unsafe_code)]

//! Implicit levels (I1-I2) and the L1 trailing-whitespace reset, which
//! also carries out rule 5.2's treatment of BN-like characters.

use crate::char_type::CharType;
use crate::paragraph::Paragraph;

/// Apply I1-I2 to `levels` in place, reading resolved classes.
///
/// For a code point at an even level: R raises it by 1, AN or EN by 2.
/// For a code point at an odd level: L, EN, or AN raise it by 1.
fn apply_implicit(classes: &[CharType], levels: &mut [u8], para: &Paragraph) {
    for i in para.start..=para.end.min(levels.len().saturating_sub(1)) {
        let c = classes[i];
        let level = levels[i];
        let bump = if level % 2 == 0 {
            match c {
                CharType::R => 1,
                CharType::AN | CharType::EN => 2,
                _ => 0,
            }
        } else {
            match c {
                CharType::L | CharType::EN | CharType::AN => 1,
                _ => 0,
            }
        };
        levels[i] = level + bump;
    }
}

/// L1: reset every trailing run (ending at the paragraph end, or at an
/// original S or B) to the paragraph base level. `original` is the
/// pre-resolution class array: L1's TRAILING test reads original types,
/// never the resolved ones.
///
/// Rule 5.2 says to treat BN-like characters (the explicit formatting
/// characters and genuine boundary-neutrals) like WS for the purposes of
/// this rule. X1-X8 already gives every BN-like character a level tied to
/// its position on the directional status stack, which is already the
/// level it should keep; what it must not do is block L1's backward scan,
/// so the walk passes through BN-like positions without letting them
/// terminate the run, and resets them to the base level along with the
/// whitespace they sit next to.
fn apply_l1(original: &[CharType], levels: &mut [u8], para: &Paragraph) {
    let mut reset_from = |levels: &mut [u8], from: usize| {
        let mut i = from;
        loop {
            if !original[i].intersects(CharType::TRAILING | CharType::BN_LIKE) {
                break;
            }
            levels[i] = para.level;
            if i == para.start {
                break;
            }
            i -= 1;
        }
    };

    if para.end < levels.len() {
        reset_from(levels, para.end);
    }
    for i in para.start..=para.end.min(original.len().saturating_sub(1)) {
        if original[i] == CharType::S || original[i] == CharType::B {
            if i > para.start {
                reset_from(levels, i - 1);
            }
            levels[i] = para.level;
        }
    }
}

/// Run I1-I2 and L1 for one paragraph.
///
/// `classes` holds the fully weak/neutral-resolved classes; `original`
/// holds the pre-resolution classes captured before X1-X8 ran.
pub fn resolve(classes: &[CharType], original: &[CharType], levels: &mut [u8], para: &Paragraph) {
    apply_implicit(classes, levels, para);
    apply_l1(original, levels, para);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(start: usize, end: usize, level: u8) -> Paragraph {
        Paragraph { start, end, level }
    }

    #[test]
    fn even_level_r_bumps_by_one() {
        let classes = vec![CharType::R];
        let mut levels = vec![0u8];
        apply_implicit(&classes, &mut levels, &para(0, 0, 0));
        assert_eq!(levels[0], 1);
    }

    #[test]
    fn even_level_number_bumps_by_two() {
        let classes = vec![CharType::EN, CharType::AN];
        let mut levels = vec![0u8, 0u8];
        apply_implicit(&classes, &mut levels, &para(0, 1, 0));
        assert_eq!(levels, vec![2, 2]);
    }

    #[test]
    fn odd_level_l_bumps_by_one() {
        let classes = vec![CharType::L, CharType::EN, CharType::AN];
        let mut levels = vec![1u8, 1u8, 1u8];
        apply_implicit(&classes, &mut levels, &para(0, 2, 1));
        assert_eq!(levels, vec![2, 2, 2]);
    }

    #[test]
    fn l1_resets_trailing_whitespace_to_base() {
        // "abc   " at base 0, all resolved to level 2 by implicit rules.
        let original = vec![
            CharType::L, CharType::L, CharType::L, CharType::WS, CharType::WS, CharType::WS,
        ];
        let mut levels = vec![2, 2, 2, 2, 2, 2];
        apply_l1(&original, &mut levels, &para(0, 5, 0));
        assert_eq!(levels, vec![2, 2, 2, 0, 0, 0]);
    }

    #[test]
    fn l1_resets_before_segment_separator() {
        let original = vec![CharType::R, CharType::WS, CharType::S];
        let mut levels = vec![1, 1, 1];
        apply_l1(&original, &mut levels, &para(0, 2, 0));
        assert_eq!(levels, vec![1, 0, 0]);
    }

    #[test]
    fn l1_does_not_touch_non_trailing_content() {
        let original = vec![CharType::L, CharType::R, CharType::L];
        let mut levels = vec![0, 1, 2];
        apply_l1(&original, &mut levels, &para(0, 2, 0));
        assert_eq!(levels, vec![0, 1, 2]);
    }

    #[test]
    fn bn_like_formatter_does_not_mask_trailing_whitespace_from_l1() {
        // A formatting character sitting between real content and trailing
        // whitespace must not block L1's backward scan, and is itself
        // reset along with the whitespace it sits next to.
        let original = vec![CharType::L, CharType::RLE, CharType::WS];
        let mut levels = vec![0, 3, 0];
        apply_l1(&original, &mut levels, &para(0, 2, 0));
        assert_eq!(levels, vec![0, 0, 0]);
    }

    #[test]
    fn explicit_stage_level_of_bn_like_is_preserved_outside_trailing_runs() {
        // A RLO B C PDF D: the RLO/PDF formatting characters already carry
        // the correct outer-scope level from the explicit stage and are not
        // part of any trailing run, so L1 must leave them untouched.
        let original = vec![
            CharType::L,
            CharType::RLO,
            CharType::R,
            CharType::R,
            CharType::PDF,
            CharType::L,
        ];
        let mut levels = vec![0, 0, 1, 1, 0, 0];
        apply_l1(&original, &mut levels, &para(0, 5, 0));
        assert_eq!(levels, vec![0, 0, 1, 1, 0, 0]);
    }
}

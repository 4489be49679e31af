#![forbid(unsafe_code)]

//! The mirroring helper: locating code units whose glyph should be
//! substituted by its mirror image when displayed in a right-to-left run.

use std::collections::HashMap;

use crate::tables;

/// Build a map from code-unit index to replacement glyph, for every code
/// point whose resolved code-unit level is odd and that has a mirror
/// glyph in the mirror table.
#[must_use]
pub fn mirrored_characters_map(
    chars: &[char],
    cp_to_cu: &[u32],
    code_unit_levels: &[u8],
) -> HashMap<usize, char> {
    let mut map = HashMap::new();
    for (i, &c) in chars.iter().enumerate() {
        let cu = cp_to_cu[i] as usize;
        let Some(&level) = code_unit_levels.get(cu) else {
            continue;
        };
        if level % 2 == 1 {
            if let Some(mirrored) = tables::mirrored_character(c) {
                map.insert(cu, mirrored);
            }
        }
    }
    map
}

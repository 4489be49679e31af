#![forbid(unsafe_code)]

//! Visual reordering (L2): turning a per-code-unit level array into a
//! visual-order index permutation and the list of reversed segments.

/// UAX #9 rule L2: from the highest level in `[start, end]` down to the
/// lowest odd level, reverse every maximal contiguous run of code units
/// at or above that level. Returns the code-unit index that appears at
/// each visual position.
#[must_use]
pub fn reordered_indices(levels: &[u8], start: usize, end: usize) -> Vec<usize> {
    if levels.is_empty() || start > end {
        return Vec::new();
    }
    let end = end.min(levels.len() - 1);
    let start = start.min(end);
    let slice = &levels[start..=end];
    let n = slice.len();

    let mut order: Vec<usize> = (start..=end).collect();

    let max_level = slice.iter().copied().max().unwrap_or(0);
    let min_odd_level = slice
        .iter()
        .copied()
        .filter(|l| l % 2 == 1)
        .min()
        .unwrap_or(max_level.saturating_add(1));

    for level in (min_odd_level..=max_level).rev() {
        let mut i = 0;
        while i < n {
            if levels[order[i]] >= level {
                let run_start = i;
                while i < n && levels[order[i]] >= level {
                    i += 1;
                }
                order[run_start..i].reverse();
            } else {
                i += 1;
            }
        }
    }

    order
}

/// The `(start, end)` inclusive code-unit segments L2 reverses, in the
/// order they were reversed (highest level first). Trailing whitespace
/// at the line edge is excluded from the final (lowest-level) reversal
/// so it never appears reversed at a visual line boundary.
#[must_use]
pub fn reorder_segments(levels: &[u8], start: usize, end: usize, trailing_ws: usize) -> Vec<(usize, usize)> {
    if levels.is_empty() || start > end {
        return Vec::new();
    }
    let end = end.min(levels.len() - 1);
    let start = start.min(end);
    let effective_end = end.saturating_sub(trailing_ws).max(start);

    let max_level = levels[start..=effective_end.min(end)].iter().copied().max().unwrap_or(0);
    let min_odd_level = levels[start..=effective_end.min(end)]
        .iter()
        .copied()
        .filter(|l| l % 2 == 1)
        .min()
        .unwrap_or(max_level.saturating_add(1));

    let mut segments = Vec::new();
    for level in (min_odd_level..=max_level).rev() {
        let mut i = start;
        while i <= effective_end {
            if levels[i] >= level {
                let seg_start = i;
                while i <= effective_end && levels[i] >= level {
                    i += 1;
                }
                segments.push((seg_start, i - 1));
            } else {
                i += 1;
            }
        }
    }
    segments
}

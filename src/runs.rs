#![forbid(unsafe_code)]

//! Level runs and isolating run sequences (X10, BD13).

use std::collections::{HashMap, HashSet};

use crate::char_type::CharType;
use crate::paragraph::Paragraph;

/// A chain of level runs joined across isolate-initiator/PDI pairs,
/// flattened to the code-point indices it covers, plus its sos/eos
/// boundary types.
pub struct IsolatingRunSequence {
    /// Code-point indices covered by this sequence, in order.
    pub indices: Vec<usize>,
    /// Embedding level shared by every run in this sequence.
    pub level: u8,
    /// Synthetic strong type bounding the start of the sequence.
    pub sos: CharType,
    /// Synthetic strong type bounding the end of the sequence.
    pub eos: CharType,
}

fn level_of(level: u8) -> CharType {
    if level % 2 == 1 { CharType::R } else { CharType::L }
}

fn boundary_type(outside_level: u8, seq_level: u8) -> CharType {
    level_of(outside_level.max(seq_level))
}

/// Build the maximal level runs of `para`, skipping BN-like characters
/// entirely. Each run is a non-empty list of ascending code-point indices
/// sharing one embedding level.
fn level_runs(classes: &[CharType], levels: &[u8], para: &Paragraph) -> Vec<Vec<usize>> {
    let mut runs = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_level: Option<u8> = None;

    for i in para.start..=para.end.min(classes.len().saturating_sub(1)) {
        if classes[i].is_bn_like() {
            continue;
        }
        match current_level {
            Some(l) if l == levels[i] => current.push(i),
            _ => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
                current_level = Some(levels[i]);
                current.push(i);
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn level_before(classes: &[CharType], levels: &[u8], index: usize, para: &Paragraph) -> u8 {
    if index == para.start {
        return para.level;
    }
    let mut i = index;
    while i > para.start {
        i -= 1;
        if !classes[i].is_bn_like() {
            return levels[i];
        }
    }
    para.level
}

fn level_after(classes: &[CharType], levels: &[u8], index: usize, para: &Paragraph) -> u8 {
    let mut i = index + 1;
    while i <= para.end && i < classes.len() {
        if !classes[i].is_bn_like() {
            return levels[i];
        }
        i += 1;
    }
    para.level
}

/// Build the isolating run sequences of `para` (X10, BD13).
#[must_use]
pub fn isolating_run_sequences(
    classes: &[CharType],
    levels: &[u8],
    para: &Paragraph,
    isolate_pairs: &HashMap<usize, usize>,
) -> Vec<IsolatingRunSequence> {
    let runs = level_runs(classes, levels, para);
    if runs.is_empty() {
        return Vec::new();
    }

    let mut run_by_start: HashMap<usize, usize> = HashMap::new();
    for (run_idx, run) in runs.iter().enumerate() {
        run_by_start.insert(run[0], run_idx);
    }

    let mut consumed: HashSet<usize> = HashSet::new();
    let mut sequences = Vec::new();

    for (run_idx, run) in runs.iter().enumerate() {
        let first = run[0];
        // A run started by a PDI whose matching initiator is known is a
        // continuation, not the start of a new sequence.
        let is_continuation = classes[first] == CharType::PDI && isolate_pairs.contains_key(&first);
        if is_continuation || consumed.contains(&run_idx) {
            continue;
        }

        let mut indices = run.clone();
        consumed.insert(run_idx);
        let mut last_in_chain = run_idx;

        loop {
            let last_index = runs[last_in_chain][runs[last_in_chain].len() - 1];
            let last_class = classes[last_index];
            if !last_class.is_isolate_initiator() {
                break;
            }
            let Some(&pdi_index) = isolate_pairs.get(&last_index) else {
                break;
            };
            let Some(&next_run_idx) = run_by_start.get(&pdi_index) else {
                break;
            };
            indices.extend_from_slice(&runs[next_run_idx]);
            consumed.insert(next_run_idx);
            last_in_chain = next_run_idx;
        }

        let level = levels[first];
        let seq_first = indices[0];
        let seq_last = *indices.last().unwrap();
        let sos = boundary_type(level_before(classes, levels, seq_first, para), level);
        // X10: if the sequence ends on an isolate initiator with no matching
        // PDI (the chain loop above breaks on it), eos is computed against
        // the paragraph embedding level, not the level of the isolate body
        // that follows it.
        let eos_outside_level = if classes[seq_last].is_isolate_initiator() {
            para.level
        } else {
            level_after(classes, levels, seq_last, para)
        };
        let eos = boundary_type(eos_outside_level, level);

        sequences.push(IsolatingRunSequence { indices, level, sos, eos });
    }

    sequences
}

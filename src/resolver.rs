#![forbid(unsafe_code)]

//! Per-paragraph pipeline orchestration: the top-level driver that turns
//! a scanned string into resolved, code-unit-indexed embedding levels.

use crate::char_type::CharType;
use crate::explicit;
use crate::implicit;
use crate::index_map::{self, Scan};
use crate::neutral;
use crate::paragraph::{self, BaseDirection, Paragraph};
use crate::runs;
use crate::weak;

/// One resolved paragraph, in code-unit offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphInfo {
    /// First code-unit offset of the paragraph.
    pub start: u32,
    /// Last code-unit offset of the paragraph, inclusive.
    pub end: u32,
    /// Resolved paragraph base level: 0 or 1.
    pub level: u8,
}

/// The result of [`crate::get_embedding_levels`]: one level per code
/// unit, plus the paragraph boundaries discovered.
#[derive(Debug, Clone)]
pub struct EmbeddingLevels {
    /// `levels[u]` is the resolved embedding level of code unit `u`.
    pub levels: Vec<u8>,
    /// Paragraphs found in the input, in order.
    pub paragraphs: Vec<ParagraphInfo>,
}

/// Resolve embedding levels for `text` under `base`, running the full
/// X1-X8 / W1-W7 / N0-N2 / I1-I2 / L1 pipeline independently per paragraph.
#[must_use]
pub fn resolve(text: &str, base: BaseDirection) -> EmbeddingLevels {
    let scan = index_map::scan(text);
    if scan.is_empty() {
        return EmbeddingLevels { levels: Vec::new(), paragraphs: Vec::new() };
    }

    let original = scan.classes.clone();
    let mut classes = scan.classes.clone();
    let paragraphs = paragraph::split(&classes, base);
    let mut levels = vec![0u8; scan.len()];

    for para in &paragraphs {
        resolve_paragraph(&scan, &mut classes, &original, &mut levels, para);
    }

    let code_unit_levels = scan.expand_to_code_units(&levels);
    let paragraph_infos = paragraphs.iter().map(|p| to_paragraph_info(&scan, p)).collect();

    EmbeddingLevels { levels: code_unit_levels, paragraphs: paragraph_infos }
}

fn resolve_paragraph(
    scan: &Scan,
    classes: &mut [CharType],
    original: &[CharType],
    levels: &mut [u8],
    para: &Paragraph,
) {
    let _span = tracing::trace_span!(
        "bidi_paragraph",
        start = para.start,
        end = para.end,
        base_level = para.level
    )
    .entered();

    let result = explicit::process(classes, para);
    levels[para.start..=para.end].copy_from_slice(&result.levels[para.start..=para.end]);

    let sequences = runs::isolating_run_sequences(classes, levels, para, &result.isolate_pairs);
    for seq in &sequences {
        weak::resolve(classes, seq);
    }
    for seq in &sequences {
        neutral::resolve(classes, &scan.chars, original, seq);
    }

    implicit::resolve(classes, original, levels, para);
}

fn to_paragraph_info(scan: &Scan, para: &Paragraph) -> ParagraphInfo {
    let start_cu = scan.cp_to_cu[para.start];
    let last_char_width = scan.chars[para.end].len_utf16() as u32;
    let end_cu = scan.cp_to_cu[para.end] + last_char_width - 1;
    ParagraphInfo { start: start_cu, end: end_cu, level: para.level }
}

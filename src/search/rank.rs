//! Result ordering.
//!
//! Names that start with a letter come first, then everything else (digits,
//! symbols, empty names). Inside each group names are compared with a
//! Brazilian Portuguese collation: base letters first, accents only break
//! ties (`maca` < `maçã` < `macas`). Names are lowercased first, so names
//! that differ only by case tie and keep their input order.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::model::types::Record;

const WEIGHT_SPACE: u32 = 0x0000_0001;
const BAND_OTHER: u32 = 0x0001_0000;
const BAND_DIGIT: u32 = 0x0100_0000;
const BAND_LETTER: u32 = 0x0200_0000;

/// Secondary weight of an unaccented character.
const SECONDARY_BASE: u32 = 1;

/// Whether a name starts with a letter (accented letters included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LeadClass {
    Letter,
    Other,
}

/// Precomputed comparison key for one display name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    class: LeadClass,
    primary: Vec<u32>,
    secondary: Vec<u32>,
}

impl SortKey {
    /// Build the key for a raw display name (lowercased here).
    pub fn new(name: &str) -> Self {
        let lowered = name.to_lowercase();
        let class = match lowered.chars().next() {
            Some(c) if c.is_alphabetic() => LeadClass::Letter,
            _ => LeadClass::Other,
        };

        let mut primary = Vec::with_capacity(lowered.len());
        let mut secondary = Vec::with_capacity(lowered.len());
        for c in lowered.nfd() {
            if is_combining_mark(c) {
                // A leading mark has no base to attach to; it only counts
                // at the secondary level.
                secondary.push(mark_weight(c));
                continue;
            }
            primary.push(primary_weight(c));
            secondary.push(SECONDARY_BASE);
        }

        Self {
            class,
            primary,
            secondary,
        }
    }

    pub fn class(&self) -> LeadClass {
        self.class
    }
}

fn primary_weight(c: char) -> u32 {
    if c.is_whitespace() {
        WEIGHT_SPACE
    } else if let Some(d) = c.to_digit(10) {
        BAND_DIGIT + d
    } else if c.is_numeric() {
        BAND_DIGIT + 0x10 + c as u32
    } else if c.is_alphabetic() {
        BAND_LETTER + c as u32
    } else {
        BAND_OTHER + c as u32
    }
}

/// Accent order at the secondary level (acute < grave < breve < circumflex
/// < caron < ring < diaeresis < double acute < tilde < dot < cedilla).
fn mark_weight(mark: char) -> u32 {
    match mark {
        '\u{0301}' => 2,
        '\u{0300}' => 3,
        '\u{0306}' => 4,
        '\u{0302}' => 5,
        '\u{030C}' => 6,
        '\u{030A}' => 7,
        '\u{0308}' => 8,
        '\u{030B}' => 9,
        '\u{0303}' => 10,
        '\u{0307}' => 11,
        '\u{0327}' => 12,
        other => 0x100 + other as u32,
    }
}

/// Compare two display names the way the result list is ordered.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    SortKey::new(a).cmp(&SortKey::new(b))
}

/// Order records by display name. Stable: records with equal keys keep
/// their input order.
pub fn rank(records: Vec<&Record>) -> Vec<&Record> {
    let mut keyed: Vec<(SortKey, &Record)> = records
        .into_iter()
        .map(|r| (SortKey::new(r.display_name()), r))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, r)| r).collect()
}

//! Fuzzy-phrase detection.
//!
//! Backstop for ASR/OCR noise: a canonical phrase still fires when the
//! transcript renders it with a dropped character, a joined word or a small
//! misspelling. Matching is a partial best-alignment ratio ("does some
//! substring of the text read almost exactly like this phrase") on a 0-100
//! scale, against a caller-supplied threshold.

use std::collections::BTreeSet;

use crate::registry::phrases::{self, PhraseSet};

/// Run every fuzzy phrase set against `text`.
///
/// A label fires when any of its phrases scores at or above `threshold`;
/// evaluation short-circuits per label on the first success. Thresholds above
/// 100 can never fire.
pub(crate) fn fuzzy_hits(text: &str, threshold: u8) -> BTreeSet<&'static str> {
    fuzzy_hits_in(text, phrases::FUZZY_PHRASES, threshold)
}

pub(crate) fn fuzzy_hits_in(text: &str, sets: &[PhraseSet], threshold: u8) -> BTreeSet<&'static str> {
    let mut fired = BTreeSet::new();
    let base = text.to_lowercase();

    for set in sets {
        for phrase in set.phrases {
            if partial_ratio(&phrase.to_lowercase(), &base) >= f64::from(threshold) {
                fired.insert(set.label);
                break;
            }
        }
    }

    fired
}

/// Best-alignment similarity of the shorter string inside the longer, as a
/// normalized character-overlap ratio scaled to 0–100.
///
/// Slides windows across the longer string and keeps the best normalized
/// Levenshtein similarity against the shorter one. Windows one character
/// shorter and longer than the phrase are tried too, so a single insertion or
/// deletion is not additionally penalized by a misaligned window edge. Either
/// side empty scores 0 (an empty phrase must never fire a label).
pub(crate) fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };
    if short.is_empty() || long.is_empty() {
        return 0.0;
    }

    let long_chars: Vec<char> = long.chars().collect();
    let len = short.chars().count();

    let mut best = 0.0f64;
    'lengths: for window_len in [len.saturating_sub(1).max(1), len, len + 1] {
        if window_len > long_chars.len() {
            continue;
        }
        for start in 0..=(long_chars.len() - window_len) {
            let window: String = long_chars[start..start + window_len].iter().collect();
            let score = strsim::normalized_levenshtein(short, &window) * 100.0;
            if score > best {
                best = score;
                if best >= 100.0 {
                    break 'lengths;
                }
            }
        }
    }

    best
}

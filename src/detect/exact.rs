//! Exact-phrase detection.
//!
//! The span-aware detector: every registered pattern is matched against the
//! joint text and all non-overlapping match spans are recorded. The other
//! detectors report presence only; the spans collected here feed audit/UI
//! display downstream.

use crate::registry::patterns;
use crate::{HitMap, Span};

/// Match every exact pattern against `text`.
///
/// Returns label → match spans; labels with zero matches are absent. Empty
/// text yields an empty map. Pure and deterministic.
pub(crate) fn find_hits(text: &str) -> HitMap {
    let mut hits = HitMap::new();
    if text.is_empty() {
        return hits;
    }

    for pattern in patterns::all() {
        let spans: Vec<Span> =
            pattern.regex.find_iter(text).map(|m| Span { start: m.start(), end: m.end() }).collect();
        if !spans.is_empty() {
            hits.insert(pattern.label, spans);
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_empty_map() {
        assert!(find_hits("").is_empty());
    }

    #[test]
    fn records_every_non_overlapping_span() {
        let hits = find_hits("risk free today, totally risk-free tomorrow");
        let spans = &hits["risk_free"];
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (0, 9));
        assert_eq!(&"risk free today, totally risk-free tomorrow"[spans[1].start..spans[1].end], "risk-free");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let hits = find_hits("GUARANTEED WIN, sure bet!");
        assert!(hits.contains_key("guaranteed"));
    }

    #[test]
    fn word_boundaries_hold() {
        // "freedom" must not fire the bare-"free" pattern
        assert!(!find_hits("freedom of choice").contains_key("free_but_risky"));
        assert!(find_hits("your first bet is free").contains_key("free_but_risky"));
    }

    #[test]
    fn absent_labels_are_omitted_entirely() {
        let hits = find_hits("use a vpn to play");
        assert!(hits.contains_key("vpn_proxy"));
        assert!(!hits.contains_key("helpline"));
    }

    #[test]
    fn driving_pattern_fires_its_own_label() {
        let hits = find_hits("placing bets while driving to work");
        assert!(hits.contains_key("danger_driving"));
    }
}

//! Static detection configuration.
//!
//! Everything the detectors and the scoring engine treat as read-only data
//! lives under `src/registry/`: compiled regex patterns, canonical phrase
//! sets, the operator/brand alias table and the weight table. All of it is
//! loaded once (lazily, on first use) and never mutated afterwards.
//!
//! ## Responsibilities by module
//!
//! - `patterns.rs`: exact-match rules: one stable label plus one compiled
//!   case-insensitive regex each.
//! - `phrases.rs`: canonical phrase lists for the fuzzy and semantic
//!   detectors. Both tables share the label namespace with `patterns.rs`, so
//!   a concept detected three different ways still fires a single label.
//! - `operators.rs`: the brand registry: canonical names, case-insensitive
//!   aliases (domains included) and offshore membership. Replaceable at
//!   startup from JSON without touching code.
//! - `weights.rs`: rule-label → weight entries, partitioned by category. The
//!   scoring engine validates itself against this table when constructed.
//!
//! ## The ruleset is a single superset
//!
//! There is exactly one ruleset. Signals that only some deployments want
//! (semantic phrases, visual logos) are gated per invocation by
//! [`crate::Detectors`] and by provider availability, never by swapping in a
//! second, diverging table.

#[path = "registry/operators.rs"]
pub(crate) mod operators;
#[path = "registry/patterns.rs"]
pub(crate) mod patterns;
#[path = "registry/phrases.rs"]
pub(crate) mod phrases;
#[path = "registry/weights.rs"]
pub(crate) mod weights;


/// Feature-key → pattern-label wiring for the boolean features derived from
/// exact hits.
///
/// Kept as data (rather than inline `contains_key` calls) so the registry
/// tests can assert that every feature resolves to a registered pattern; a
/// label renamed on one side but not the other would otherwise produce a
/// feature that silently never fires.
pub(crate) const FEATURE_LABELS: &[(&str, &str)] = &[
    ("has_helpline", "helpline"),
    ("has_21plus", "age21"),
    ("has_promo_terms", "promo_terms"),
    ("youth_context", "youth_context"),
    ("college_cues", "college_cues"),
    ("vpn_proxy", "vpn_proxy"),
    ("socially_irresponsible", "danger_social"),
    ("danger_driving", "danger_driving"),
];

/// Look up the pattern label backing a derived feature.
///
/// The table is compile-time data and covered by tests; an unknown feature
/// key here is a programming error, not a runtime condition.
pub(crate) fn feature_label(feature: &str) -> &'static str {
    FEATURE_LABELS
        .iter()
        .find(|(key, _)| *key == feature)
        .map(|(_, label)| *label)
        .unwrap_or_else(|| panic!("feature `{feature}` is not wired in FEATURE_LABELS"))
}

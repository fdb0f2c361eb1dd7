//! Feature aggregation.
//!
//! Merges the independent detector outputs into one canonical
//! [`FeatureRecord`], the only thing the scoring engine ever looks at. The
//! record is built in a single shot and never mutated afterwards; scoring is
//! a pure function of it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::HitMap;
use crate::registry;

/// Caller-supplied facts about the clip that no text or visual detector can
/// derive (creator age verification lives with the platform, not the ad).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// The promoting creator is known to be under 21.
    #[serde(default)]
    pub under21_endorser: bool,
}

/// Canonical per-clip feature record.
///
/// `phrases` is the union of every fired label across the exact, fuzzy and
/// semantic detectors; `operators` unions text-alias hits with any supplied
/// visual-logo hits. Sets deduplicate by construction: membership, not
/// multiplicity, is what scoring consumes.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRecord {
    pub phrases: BTreeSet<&'static str>,
    pub operators: BTreeSet<String>,
    pub has_helpline: bool,
    pub has_21plus: bool,
    pub has_promo_terms: bool,
    pub youth_context: bool,
    pub college_cues: bool,
    pub danger_driving: bool,
    pub socially_irresponsible: bool,
    pub vpn_proxy: bool,
    pub affiliate_undisclosed: bool,
    pub unapproved_ref: bool,
    pub under21_endorser: bool,
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub(crate) fn normalize(text: &str) -> String {
    regex!(r"\s+").replace_all(text.trim(), " ").into_owned()
}

/// Build the feature record from detector outputs.
///
/// `hits` is the exact detector's span map (the named booleans derive from it
/// through the registry's feature-label table), `phrases` the unioned fired
/// labels, `operators` the unioned brand names, `offshore` the registry's
/// offshore-brand set, and `joint` the normalized joint text (needed for the
/// disclosure-marker check).
pub(crate) fn assemble(
    hits: &HitMap,
    phrases: BTreeSet<&'static str>,
    operators: BTreeSet<String>,
    offshore: &BTreeSet<String>,
    joint: &str,
    metadata: Option<&Metadata>,
) -> FeatureRecord {
    let fired = |feature: &str| hits.contains_key(registry::feature_label(feature));

    let promo = phrases.contains("promo");
    // Undisclosed affiliate: promo code offered but no #ad/#sponsored marker
    // anywhere in transcript or on-screen text.
    let disclosed = regex!(r"(?i)#(ad|sponsored)\b").is_match(joint);
    let offshore_mentioned = operators.iter().any(|name| offshore.contains(name));

    FeatureRecord {
        has_helpline: fired("has_helpline"),
        has_21plus: fired("has_21plus"),
        has_promo_terms: fired("has_promo_terms"),
        youth_context: fired("youth_context"),
        college_cues: fired("college_cues"),
        danger_driving: fired("danger_driving"),
        socially_irresponsible: fired("socially_irresponsible"),
        vpn_proxy: fired("vpn_proxy"),
        affiliate_undisclosed: promo && !disclosed,
        unapproved_ref: offshore_mentioned && promo,
        under21_endorser: metadata.map(|m| m.under21_endorser).unwrap_or_default(),
        phrases,
        operators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::exact;

    fn offshore() -> BTreeSet<String> {
        BTreeSet::from(["bovada".to_string(), "stake".to_string()])
    }

    fn build(joint: &str, operators: &[&str], metadata: Option<&Metadata>) -> FeatureRecord {
        let hits = exact::find_hits(joint);
        let phrases: BTreeSet<&'static str> = hits.keys().copied().collect();
        let operators = operators.iter().map(|s| s.to_string()).collect();
        assemble(&hits, phrases, operators, &offshore(), joint, metadata)
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  use\t\tcode \n BET100  "), "use code BET100");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn booleans_follow_their_pattern_labels() {
        let record = build("call 1-800-GAMBLER, must be 21, wager requirement applies", &[], None);
        assert!(record.has_helpline);
        assert!(record.has_21plus);
        assert!(record.has_promo_terms);
        assert!(!record.youth_context);
    }

    #[test]
    fn driving_feature_is_wired_to_the_driving_pattern() {
        let record = build("betting parlays while driving home", &[], None);
        assert!(record.danger_driving);
    }

    #[test]
    fn disclosure_marker_clears_affiliate_flag() {
        let undisclosed = build("use promo code WIN100", &[], None);
        assert!(undisclosed.affiliate_undisclosed);

        let disclosed = build("use promo code WIN100 #ad", &[], None);
        assert!(!disclosed.affiliate_undisclosed);

        // the marker must be a hashtag token, not any word containing "ad"
        let adjacent = build("use promo code WIN100 adjacent", &[], None);
        assert!(adjacent.affiliate_undisclosed);
    }

    #[test]
    fn unapproved_ref_needs_offshore_brand_and_promo() {
        assert!(build("promo code on bovada", &["bovada"], None).unapproved_ref);
        assert!(!build("just bovada highlights", &["bovada"], None).unapproved_ref);
        assert!(!build("promo code on draftkings", &["draftkings"], None).unapproved_ref);
    }

    #[test]
    fn under21_endorser_comes_from_metadata_only() {
        assert!(!build("any text", &[], None).under21_endorser);
        let meta = Metadata { under21_endorser: true };
        assert!(build("any text", &[], Some(&meta)).under21_endorser);
    }
}

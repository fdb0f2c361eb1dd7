//! Deterministic weighted-rule scoring.
//!
//! A fixed, ordered rule table is evaluated against the [`FeatureRecord`];
//! each firing rule appends one [`Flag`] and adds its weight-table entry to
//! its category's subscore. Categories evaluate in a fixed order and rules
//! within a category in their listed order, which pins the flag-list ordering
//! for byte-for-byte reproducible output.
//!
//! The engine is stateless across calls. The one hard failure it can raise is
//! a rule label missing from the weight table; that means the ruleset and
//! the weight configuration have drifted apart and every score would be
//! wrong, so it propagates instead of being absorbed.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Error;
use crate::features::FeatureRecord;
use crate::registry::weights;

/// Risk categories, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Claims,
    Age,
    RgMessaging,
    Offshore,
    Danger,
    Endorsement,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Claims,
        Category::Age,
        Category::RgMessaging,
        Category::Offshore,
        Category::Danger,
        Category::Endorsement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Claims => "claims",
            Category::Age => "age",
            Category::RgMessaging => "rg_messaging",
            Category::Offshore => "offshore",
            Category::Danger => "danger",
            Category::Endorsement => "endorsement",
        }
    }
}

/// One fired scoring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Flag {
    pub category: Category,
    pub label: &'static str,
}

/// The scoring engine's output.
///
/// `categories` always carries all six categories (zero when quiet) with
/// pre-clamp subscores; `overall` is their sum clamped to 100; `flags` lists
/// fired rules in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub overall: u32,
    pub categories: BTreeMap<Category, u32>,
    pub flags: Vec<Flag>,
}

type Predicate = Box<dyn Fn(&FeatureRecord) -> bool + Send + Sync>;

/// A scoring rule: category, label and a predicate over the feature record.
struct ScoreRule {
    category: Category,
    label: &'static str,
    predicate: Predicate,
}

/// Evaluates the fixed rule table against feature records.
pub(crate) struct ScoringEngine {
    rules: Vec<ScoreRule>,
}

impl ScoringEngine {
    /// Build the engine, validating that every rule label has a weight-table
    /// entry. A miss here is a deployment/configuration mismatch and refuses
    /// construction outright.
    pub(crate) fn new(offshore: std::collections::BTreeSet<String>) -> Result<Self, Error> {
        let rules = build_rules(offshore);
        for rule in &rules {
            if weights::weight_in(rule.category, rule.label).is_none() {
                return Err(Error::MissingWeight(rule.label));
            }
        }
        Ok(Self { rules })
    }

    /// Score one feature record.
    ///
    /// Pure: identical records produce identical results. The weight lookup
    /// re-checks the startup invariant so evaluation can never silently score
    /// with a partial table.
    pub(crate) fn score(&self, features: &FeatureRecord) -> Result<ScoreResult, Error> {
        let mut categories: BTreeMap<Category, u32> = Category::ALL.iter().map(|c| (*c, 0)).collect();
        let mut flags = Vec::new();

        for rule in &self.rules {
            if (rule.predicate)(features) {
                let weight =
                    weights::weight_in(rule.category, rule.label).ok_or(Error::MissingWeight(rule.label))?;
                *categories.entry(rule.category).or_insert(0) += weight;
                flags.push(Flag { category: rule.category, label: rule.label });
            }
        }

        let overall = categories.values().sum::<u32>().min(100);
        Ok(ScoreResult { overall, categories, flags })
    }
}

/// The canonical rule table, in evaluation order.
fn build_rules(offshore: std::collections::BTreeSet<String>) -> Vec<ScoreRule> {
    fn rule(category: Category, label: &'static str, predicate: Predicate) -> ScoreRule {
        ScoreRule { category, label, predicate }
    }

    fn phrase(label: &'static str) -> Predicate {
        Box::new(move |f: &FeatureRecord| f.phrases.contains(label))
    }

    vec![
        // Deceptive claims
        rule(Category::Claims, "risk_free", phrase("risk_free")),
        rule(Category::Claims, "guaranteed", phrase("guaranteed")),
        rule(Category::Claims, "chasing_losses", phrase("chasing_losses")),
        rule(Category::Claims, "solve_financial_problems", phrase("solve_financial_problems")),
        rule(Category::Claims, "misrep_odds", phrase("misrep_odds")),
        rule(Category::Claims, "wage_wager", phrase("wage_wager")),
        // "free" with wagering terms attached is an ordinary promo, not a claim
        rule(
            Category::Claims,
            "free_but_risky",
            Box::new(|f| f.phrases.contains("free_but_risky") && !f.has_promo_terms),
        ),
        // Underage targeting
        rule(Category::Age, "youth_context", Box::new(|f| f.youth_context)),
        rule(Category::Age, "college_cues", Box::new(|f| f.college_cues)),
        rule(Category::Age, "under21_endorser", Box::new(|f| f.under21_endorser)),
        // Responsible-gaming messaging: required once any brand or promo
        // content is present
        rule(
            Category::RgMessaging,
            "missing_helpline",
            Box::new(|f| (!f.operators.is_empty() || f.phrases.contains("promo")) && !f.has_helpline),
        ),
        rule(
            Category::RgMessaging,
            "missing_21plus",
            Box::new(|f| (!f.operators.is_empty() || f.phrases.contains("promo")) && !f.has_21plus),
        ),
        rule(
            Category::RgMessaging,
            "missing_terms",
            Box::new(|f| f.phrases.contains("promo") && !f.has_promo_terms),
        ),
        // Offshore / availability
        rule(
            Category::Offshore,
            "offshore_brand",
            Box::new(move |f| f.operators.iter().any(|name| offshore.contains(name))),
        ),
        rule(Category::Offshore, "vpn_proxy", Box::new(|f| f.vpn_proxy)),
        rule(Category::Offshore, "unapproved_ref", Box::new(|f| f.unapproved_ref)),
        // Dangerous behavior
        rule(Category::Danger, "danger_driving", Box::new(|f| f.danger_driving)),
        rule(Category::Danger, "socially_irresponsible", Box::new(|f| f.socially_irresponsible)),
        // Endorsements
        rule(Category::Endorsement, "undisclosed_affiliate", Box::new(|f| f.affiliate_undisclosed)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(BTreeSet::from(["bovada".to_string()])).unwrap()
    }

    fn empty_record() -> FeatureRecord {
        FeatureRecord {
            phrases: BTreeSet::new(),
            operators: BTreeSet::new(),
            has_helpline: false,
            has_21plus: false,
            has_promo_terms: false,
            youth_context: false,
            college_cues: false,
            danger_driving: false,
            socially_irresponsible: false,
            vpn_proxy: false,
            affiliate_undisclosed: false,
            unapproved_ref: false,
            under21_endorser: false,
        }
    }

    #[test]
    fn empty_record_scores_zero_with_no_flags() {
        let result = engine().score(&empty_record()).unwrap();
        assert_eq!(result.overall, 0);
        assert!(result.flags.is_empty());
        assert_eq!(result.categories.len(), 6);
        assert!(result.categories.values().all(|v| *v == 0));
    }

    #[test]
    fn claims_sum_their_weights() {
        let mut record = empty_record();
        record.phrases.insert("guaranteed");
        record.phrases.insert("risk_free");

        let result = engine().score(&record).unwrap();
        assert_eq!(result.categories[&Category::Claims], 30 + 25);
        // no operator and no promo content: nothing outside claims fires
        assert_eq!(
            result.flags,
            vec![
                Flag { category: Category::Claims, label: "risk_free" },
                Flag { category: Category::Claims, label: "guaranteed" },
            ]
        );
        assert_eq!(result.overall, 55);
    }

    #[test]
    fn free_but_risky_is_suppressed_by_promo_terms() {
        let mut record = empty_record();
        record.phrases.insert("free_but_risky");
        record.has_promo_terms = true;

        let result = engine().score(&record).unwrap();
        assert!(!result.flags.iter().any(|f| f.label == "free_but_risky"));
    }

    #[test]
    fn rg_rules_are_quiet_without_brand_or_promo_content() {
        let result = engine().score(&empty_record()).unwrap();
        assert_eq!(result.categories[&Category::RgMessaging], 0);
    }

    #[test]
    fn rg_rules_are_suppressed_by_their_markers() {
        let mut record = empty_record();
        record.operators.insert("bovada".to_string());
        record.has_helpline = true;
        record.has_21plus = true;
        record.has_promo_terms = true;

        let result = engine().score(&record).unwrap();
        assert!(!result.flags.iter().any(|f| f.category == Category::RgMessaging));
    }

    #[test]
    fn offshore_brand_fires_only_for_registry_offshore_entries() {
        let mut record = empty_record();
        record.operators.insert("draftkings".to_string());
        let result = engine().score(&record).unwrap();
        assert!(!result.flags.iter().any(|f| f.label == "offshore_brand"));

        record.operators.insert("bovada".to_string());
        let result = engine().score(&record).unwrap();
        assert!(result.flags.iter().any(|f| f.label == "offshore_brand"));
    }

    #[test]
    fn overall_clamps_at_one_hundred_but_subscores_do_not() {
        let mut record = empty_record();
        for label in
            ["risk_free", "guaranteed", "free_but_risky", "chasing_losses", "solve_financial_problems"]
        {
            record.phrases.insert(label);
        }
        record.youth_context = true;
        record.college_cues = true;

        let result = engine().score(&record).unwrap();
        assert_eq!(result.overall, 100);
        let raw: u32 = result.categories.values().sum();
        assert!(raw > 100);
    }

    #[test]
    fn category_subscores_match_their_flags() {
        let mut record = empty_record();
        record.phrases.insert("risk_free");
        record.danger_driving = true;
        record.vpn_proxy = true;

        let result = engine().score(&record).unwrap();
        for category in Category::ALL {
            let from_flags: u32 = result
                .flags
                .iter()
                .filter(|f| f.category == category)
                .map(|f| weights::weight_in(f.category, f.label).unwrap())
                .sum();
            assert_eq!(result.categories[&category], from_flags, "category {category:?}");
        }
    }

    #[test]
    fn scoring_is_deterministic() {
        let mut record = empty_record();
        record.phrases.insert("guaranteed");
        record.operators.insert("bovada".to_string());

        let first = engine().score(&record).unwrap();
        let second = engine().score(&record).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_rule_label_is_weighted() {
        // construction validates the invariant; a drifted table must refuse
        assert!(ScoringEngine::new(BTreeSet::new()).is_ok());
    }
}

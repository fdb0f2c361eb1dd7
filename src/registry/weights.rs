use crate::score::Category;

/// One weight-table entry: the category a rule belongs to and the points it
/// contributes when it fires.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WeightEntry {
    pub category: Category,
    pub label: &'static str,
    pub weight: u32,
}

/// The full weight table, partitioned by category.
///
/// Every label the scoring engine can fire must appear here exactly once;
/// `ScoringEngine::new` refuses to construct otherwise. Weights are tuned so
/// that any two serious claims alone saturate the 0–100 range.
pub(crate) const WEIGHTS: &[WeightEntry] = &[
    // Deceptive claims
    WeightEntry { category: Category::Claims, label: "risk_free", weight: 30 },
    WeightEntry { category: Category::Claims, label: "guaranteed", weight: 25 },
    WeightEntry { category: Category::Claims, label: "free_but_risky", weight: 30 },
    WeightEntry { category: Category::Claims, label: "chasing_losses", weight: 18 },
    WeightEntry { category: Category::Claims, label: "solve_financial_problems", weight: 15 },
    WeightEntry { category: Category::Claims, label: "misrep_odds", weight: 12 },
    WeightEntry { category: Category::Claims, label: "wage_wager", weight: 12 },
    // Underage targeting
    WeightEntry { category: Category::Age, label: "youth_context", weight: 22 },
    WeightEntry { category: Category::Age, label: "college_cues", weight: 22 },
    WeightEntry { category: Category::Age, label: "under21_endorser", weight: 25 },
    // Responsible-gaming messaging
    WeightEntry { category: Category::RgMessaging, label: "missing_helpline", weight: 12 },
    WeightEntry { category: Category::RgMessaging, label: "missing_21plus", weight: 10 },
    WeightEntry { category: Category::RgMessaging, label: "missing_terms", weight: 10 },
    // Offshore / availability
    WeightEntry { category: Category::Offshore, label: "offshore_brand", weight: 22 },
    WeightEntry { category: Category::Offshore, label: "vpn_proxy", weight: 10 },
    WeightEntry { category: Category::Offshore, label: "unapproved_ref", weight: 18 },
    // Dangerous behavior
    WeightEntry { category: Category::Danger, label: "danger_driving", weight: 15 },
    WeightEntry { category: Category::Danger, label: "socially_irresponsible", weight: 10 },
    // Endorsements
    WeightEntry { category: Category::Endorsement, label: "undisclosed_affiliate", weight: 12 },
];

/// Weight for `label` within `category`'s partition.
///
/// A label filed under a different category is treated as absent: the rule
/// table and the weight table must agree on both name and partition.
pub(crate) fn weight_in(category: Category, label: &str) -> Option<u32> {
    WEIGHTS.iter().find(|e| e.category == category && e.label == label).map(|e| e.weight)
}

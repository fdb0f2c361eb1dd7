use once_cell::sync::Lazy;
use regex::Regex;

/// One exact-match rule: a stable label and a compiled case-insensitive
/// regex with word-boundary-aware alternations.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExactPattern {
    pub label: &'static str,
    pub regex: &'static Regex,
}

/// The full exact-pattern table.
///
/// Labels double as scoring-rule labels (`risk_free`, `guaranteed`, ...) or as
/// backing for derived features (`helpline`, `age21`, `promo_terms`, ...); the
/// registry tests keep both namespaces consistent.
static PATTERNS: Lazy<Vec<ExactPattern>> = Lazy::new(|| {
    vec![
        ExactPattern { label: "risk_free", regex: regex!(r"(?i)\b(risk[-\s]?free|no\s*risk)\b") },
        ExactPattern {
            label: "guaranteed",
            regex: regex!(r"(?i)\b(guaranteed\s*(win|profit)|can('?|no)t\s*lose|sure\s*bet|lock\s*of\s*the\s*day)\b"),
        },
        // "free" alone is only a claims problem when no wagering terms temper it;
        // the scoring rule checks the promo_terms feature before firing.
        ExactPattern { label: "free_but_risky", regex: regex!(r"(?i)\bfree\b") },
        ExactPattern {
            label: "chasing_losses",
            regex: regex!(r"(?i)\b(chase\s*loss(es)?|make\s*it\s*all\s*back|win\s*it\s*back|double\s*down\s*(your)?\s*loss(es)?)\b"),
        },
        ExactPattern {
            label: "solve_financial_problems",
            regex: regex!(r"(?i)\b(pay\s*rent|bail\s*money|cover\s*fines|fix\s*debt|pay\s*off\s*(debt|loans))\b"),
        },
        ExactPattern {
            label: "misrep_odds",
            regex: regex!(r"(?i)\b(guaranteed\s*streak|higher\s*odds\s*guarantee\s*wins|rigged\s*to\s*win)\b"),
        },
        ExactPattern {
            label: "promo",
            regex: regex!(r"(?i)\b(code|ref(erral)?\s*code|promo\s*code|link\s*in\s*bio)\b"),
        },
        ExactPattern {
            label: "vpn_proxy",
            regex: regex!(r"(?i)\b(use\s*a?\s*vpn|spoof\s*location|change\s*your\s*ip)\b"),
        },
        ExactPattern { label: "youth_context", regex: regex!(r"(?i)\b(high\s*school|prom|teen(ager)?s?)\b") },
        ExactPattern {
            label: "college_cues",
            regex: regex!(r"(?i)\b(campus|dorm|university|college\s*(move[ -]?in|students?|freshman|frat|sorority)|NCAA)\b"),
        },
        ExactPattern {
            label: "danger_social",
            regex: regex!(r"(?i)(rite\s*of\s*passage|trash(ed)?\s*(the|my)\s*room)"),
        },
        ExactPattern {
            label: "danger_driving",
            regex: regex!(r"(?i)\b(while\s*driving|drive\s+and\s+gambl(e|ing)|behind\s+the\s+wheel)\b"),
        },
        ExactPattern {
            label: "wage_wager",
            regex: regex!(r"(?i)\b(paycheck|pay\s*check|my\s*(tips?|wages?|pay)|what\s+i\s+made?\s+(today|at\s*work)|my\s+shift\s+money)\b"),
        },
        // Responsible-gaming markers. These never add risk on their own; their
        // absence is what the rg-messaging rules score.
        ExactPattern { label: "helpline", regex: regex!(r"(?i)(1[-\s]*800[-\s]*GAMBLER|GAMBLER)") },
        ExactPattern { label: "age21", regex: regex!(r"(?i)(21\+|must\s*be\s*21)") },
        ExactPattern {
            label: "promo_terms",
            regex: regex!(r"(?i)(terms|wager\s*requirement|min(imum)?\s*odds|playthrough|rollover)"),
        },
    ]
});

/// All registered exact patterns, compiled once per process.
pub(crate) fn all() -> &'static [ExactPattern] {
    &PATTERNS
}

/// True if `label` names a registered exact pattern.
#[cfg(test)]
pub(crate) fn is_registered(label: &str) -> bool {
    PATTERNS.iter().any(|p| p.label == label)
}

/// A label plus the canonical phrases that represent it for approximate
/// matching.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PhraseSet {
    pub label: &'static str,
    pub phrases: &'static [&'static str],
}

/// Canonical phrases for the fuzzy detector.
///
/// These are the surface forms creators actually say; the fuzzy matcher
/// exists to catch them through ASR/OCR noise (dropped characters, joined
/// words, small misspellings), so the lists favor short literal wordings.
pub(crate) const FUZZY_PHRASES: &[PhraseSet] = &[
    PhraseSet {
        label: "chasing_losses",
        phrases: &[
            "chase losses",
            "win it back",
            "make it all back",
            "double down to recover",
            "double down to win it back",
            "get it back",
            "earn it back",
            "regain my money",
            "recover my losses",
            "win back my losses",
            "win back what i lost",
            "get back what i lost",
            "earn back what i lost",
            "recover what i lost",
            "regain what i lost",
        ],
    },
    PhraseSet {
        label: "wage_wager",
        phrases: &[
            "gambling my paycheck",
            "gamble my paycheck",
            "gamble my pay check",
            "gamble my wages",
            "bet my paycheck",
            "bet my pay check",
            "bet my wages",
            "wager my paycheck",
            "wager my pay check",
            "betting my tips",
            "gambling what i make at work",
            "put my shift money on it",
        ],
    },
    PhraseSet {
        label: "risk_free",
        phrases: &[
            "risk free",
            "no risk",
            "free risk",
            "no lose",
            "no lose strategy",
            "no lose system",
            "can't lose",
        ],
    },
    PhraseSet {
        label: "solve_financial_problems",
        phrases: &[
            "pay rent with gambling",
            "cover fines with gambling",
            "bail money from gambling",
            "fix debt by gambling",
            "pay off debt",
            "pay off loans",
            "pay my debts",
            "pay my loans",
            "pay my rent",
            "pay my fines",
            "pay bookie",
        ],
    },
];

/// Canonical phrases for the semantic detector.
///
/// Deliberately disjoint in wording from the exact/fuzzy tables: the
/// embedding comparison is the backstop for paraphrases with no lexical
/// overlap, so each phrase is a full natural sentence for the concept.
pub(crate) const SEMANTIC_PHRASES: &[PhraseSet] = &[
    PhraseSet {
        label: "chasing_losses",
        phrases: &[
            "i need to recover what i lost gambling",
            "one more bet and i break even",
            "betting bigger after a losing streak to get even",
        ],
    },
    PhraseSet {
        label: "solve_financial_problems",
        phrases: &[
            "gambling to cover my bills",
            "a parlay that pays my rent this month",
            "betting my way out of debt",
        ],
    },
    PhraseSet {
        label: "wage_wager",
        phrases: &[
            "putting my whole salary on tonight's game",
            "staking everything i earned this week",
        ],
    },
    PhraseSet {
        label: "risk_free",
        phrases: &[
            "you literally cannot lose this bet",
            "your money is completely safe on this play",
        ],
    },
];

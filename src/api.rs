use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::HitMap;
use crate::detect::semantic::{DEFAULT_THRESHOLD, SemanticDetector};
use crate::detect::{DetectorOutcome, exact, fuzzy, operator};
use crate::error::Error;
use crate::features::{self, FeatureRecord, Metadata};
use crate::providers::TextEmbedder;
use crate::registry::operators::OperatorRegistry;
use crate::score::{ScoreResult, ScoringEngine};

static DEFAULT_ANALYZER: Lazy<Analyzer> = Lazy::new(|| {
    Analyzer::new(AnalyzerConfig::default()).expect("built-in ruleset and weight table stay in sync")
});

bitflags::bitflags! {
    /// Optional detectors enabled for one analysis.
    ///
    /// Exact-phrase and operator detection always run; these gate the
    /// best-effort signals. Disabling a detector and that detector being
    /// unavailable produce the same reduced coverage; the difference shows
    /// up in [`Analysis::unavailable`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Detectors: u8 {
        const FUZZY    = 1 << 0;
        const SEMANTIC = 1 << 1;
        const LOGOS    = 1 << 2;
    }
}

/// Options that affect a single analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Which optional detectors to run.
    pub detectors: Detectors,
    /// Fuzzy partial-ratio threshold, 0–100 scale. 82 is deliberately lenient
    /// for short-form ASR transcripts; values above 100 disable fuzzy hits.
    pub fuzzy_threshold: u8,
    /// Upper bound for each external embedding call.
    pub embed_timeout: Duration,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self { detectors: Detectors::all(), fuzzy_threshold: 82, embed_timeout: Duration::from_secs(10) }
    }
}

/// Startup wiring for an [`Analyzer`].
///
/// Capabilities are passed in explicitly (there is no hidden global model
/// handle) so tests can substitute deterministic providers.
#[derive(Default)]
pub struct AnalyzerConfig {
    /// Brand registry; defaults to the built-in table.
    pub operators: OperatorRegistry,
    /// Text-embedding capability for the semantic detector. `None` runs every
    /// analysis without semantic coverage.
    pub text_embedder: Option<Arc<dyn TextEmbedder>>,
    /// Cosine threshold for semantic phrase hits.
    pub semantic_threshold: Option<f32>,
}

/// Result of one analysis: the canonical feature record, its score, and the
/// raw exact-match spans for audit display.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub features: FeatureRecord,
    pub score: ScoreResult,
    pub hits: HitMap,
    /// Optional detectors that were requested but could not run (provider
    /// missing, failed or timed out). Empty on a full-coverage analysis.
    pub unavailable: Vec<&'static str>,
}

/// The detection-and-scoring engine, constructed once and shared across
/// requests.
///
/// Holds only read-mostly state (registries, the validated rule table, the
/// phrase-embedding cache), so concurrent [`Analyzer::analyze`] calls are
/// safe.
pub struct Analyzer {
    operators: OperatorRegistry,
    offshore: BTreeSet<String>,
    scoring: ScoringEngine,
    semantic: Option<SemanticDetector>,
}

impl Analyzer {
    /// Build an analyzer from explicit wiring.
    ///
    /// Fails only when the scoring ruleset and the weight table disagree,
    /// a configuration mismatch that must stop the deployment rather than
    /// score incorrectly.
    pub fn new(config: AnalyzerConfig) -> Result<Self, Error> {
        let offshore = config.operators.offshore_set();
        let scoring = ScoringEngine::new(offshore.clone())?;
        let semantic = config
            .text_embedder
            .map(|embedder| SemanticDetector::new(embedder, config.semantic_threshold.unwrap_or(DEFAULT_THRESHOLD)));

        Ok(Self { operators: config.operators, offshore, scoring, semantic })
    }

    /// Analyze one clip's evidence.
    ///
    /// `transcript` and `ocr_text` may be empty (zero hits, not an error).
    /// `logo_hits` is the output of a [`crate::LogoDetector`] run over the
    /// caller's sampled frames, consumed when `Detectors::LOGOS` is set.
    /// Optional-detector failures degrade to reduced coverage; the analysis
    /// itself always completes unless the rule/weight configuration is
    /// broken.
    pub fn analyze(
        &self,
        transcript: &str,
        ocr_text: &str,
        metadata: Option<&Metadata>,
        logo_hits: Option<&BTreeSet<String>>,
        options: &AnalyzeOptions,
    ) -> Result<Analysis, Error> {
        let transcript = features::normalize(transcript);
        let ocr_text = features::normalize(ocr_text);
        let joint = format!("{transcript}\n{ocr_text}");

        let hits = exact::find_hits(&joint);
        let mut phrases: BTreeSet<&'static str> = hits.keys().copied().collect();
        let mut unavailable = Vec::new();

        if options.detectors.contains(Detectors::FUZZY) {
            phrases.extend(fuzzy::fuzzy_hits(&joint, options.fuzzy_threshold));
        }

        if options.detectors.contains(Detectors::SEMANTIC) {
            match &self.semantic {
                Some(detector) => match detector.detect(&joint, options.embed_timeout) {
                    DetectorOutcome::Hits(fired) => phrases.extend(fired),
                    DetectorOutcome::Unavailable => unavailable.push("semantic"),
                },
                None => unavailable.push("semantic"),
            }
        }

        let mut operators = operator::detect_operators(&joint, &self.operators);
        if options.detectors.contains(Detectors::LOGOS) {
            if let Some(logos) = logo_hits {
                operators.extend(logos.iter().cloned());
            }
        }

        let features = features::assemble(&hits, phrases, operators, &self.offshore, &joint, metadata);
        let score = self.scoring.score(&features)?;

        tracing::debug!(
            overall = score.overall,
            flags = score.flags.len(),
            degraded = !unavailable.is_empty(),
            "analysis complete"
        );

        Ok(Analysis { features, score, hits, unavailable })
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("operators", &self.operators.entries().len())
            .field("offshore", &self.offshore.len())
            .field("semantic", &self.semantic.is_some())
            .finish()
    }
}

/// Analyze with the built-in registry, default options and no embedding
/// providers (semantic coverage reported unavailable).
///
/// # Example
/// ```
/// let analysis = betscreen::analyze("this is a guaranteed win, risk free!", "").unwrap();
/// assert!(analysis.score.overall > 0);
/// ```
pub fn analyze(transcript: &str, ocr_text: &str) -> Result<Analysis, Error> {
    DEFAULT_ANALYZER.analyze(transcript, ocr_text, None, None, &AnalyzeOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::EmbedError;
    use crate::score::{Category, Flag};

    fn text_options() -> AnalyzeOptions {
        // text detectors only; keeps `unavailable` empty without an embedder
        AnalyzeOptions { detectors: Detectors::FUZZY, ..AnalyzeOptions::default() }
    }

    #[test]
    fn claims_example_scores_both_claims() {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        let analysis = analyzer
            .analyze("this is a guaranteed win, risk free!", "", None, None, &text_options())
            .unwrap();

        let flags = &analysis.score.flags;
        assert!(flags.contains(&Flag { category: Category::Claims, label: "guaranteed" }));
        assert!(flags.contains(&Flag { category: Category::Claims, label: "risk_free" }));
        // the bare word "free" also trips free_but_risky (no wagering terms
        // in sight), so claims carries all three weights
        assert!(flags.contains(&Flag { category: Category::Claims, label: "free_but_risky" }));
        assert_eq!(analysis.score.categories[&Category::Claims], 30 + 25 + 30);
    }

    #[test]
    fn offshore_promo_without_disclosure_fires_both_composites() {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        let analysis = analyzer
            .analyze("deposit on bovada with promo code WIN", "", None, None, &text_options())
            .unwrap();

        assert!(analysis.features.unapproved_ref);
        assert!(analysis.features.affiliate_undisclosed);
        let flags = &analysis.score.flags;
        assert!(flags.contains(&Flag { category: Category::Offshore, label: "unapproved_ref" }));
        assert!(flags.contains(&Flag { category: Category::Endorsement, label: "undisclosed_affiliate" }));
    }

    #[test]
    fn rg_markers_suppress_the_missing_rules() {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        let analysis = analyzer
            .analyze(
                "bet with draftkings, wager requirement applies",
                "21+ | 1-800-GAMBLER",
                None,
                None,
                &text_options(),
            )
            .unwrap();

        let labels: Vec<&str> = analysis.score.flags.iter().map(|f| f.label).collect();
        assert!(!labels.contains(&"missing_helpline"));
        assert!(!labels.contains(&"missing_21plus"));
        assert!(!labels.contains(&"missing_terms"));
    }

    #[test]
    fn empty_inputs_score_zero() {
        let analysis = analyze("", "").unwrap();
        assert_eq!(analysis.score.overall, 0);
        assert!(analysis.score.flags.is_empty());
        assert!(analysis.hits.is_empty());
    }

    #[test]
    fn repeated_analysis_is_bit_for_bit_identical() {
        let transcript = "guaranteed win on bovada, promo code in bio, win it back";
        let first = analyze(transcript, "21+").unwrap();
        let second = analyze(transcript, "21+").unwrap();
        assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
    }

    #[test]
    fn logo_hits_union_into_operators() {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        let logos = BTreeSet::from(["stake".to_string()]);
        let options = AnalyzeOptions {
            detectors: Detectors::FUZZY | Detectors::LOGOS,
            ..AnalyzeOptions::default()
        };
        let analysis =
            analyzer.analyze("no brand mentioned out loud", "", None, Some(&logos), &options).unwrap();

        assert!(analysis.features.operators.contains("stake"));
        assert!(analysis.score.flags.iter().any(|f| f.label == "offshore_brand"));
    }

    #[test]
    fn logo_hits_are_ignored_when_logos_detector_is_off() {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        let logos = BTreeSet::from(["stake".to_string()]);
        let analysis =
            analyzer.analyze("no brand mentioned", "", None, Some(&logos), &text_options()).unwrap();
        assert!(analysis.features.operators.is_empty());
    }

    #[test]
    fn semantic_without_provider_is_reported_unavailable() {
        let analysis = analyze("whatever", "").unwrap();
        assert_eq!(analysis.unavailable, vec!["semantic"]);
    }

    #[test]
    fn failing_embedder_degrades_without_losing_text_signals() {
        struct Failing;
        impl TextEmbedder for Failing {
            fn embed(&self, _text: &str, timeout: Duration) -> Result<Vec<f32>, EmbedError> {
                Err(EmbedError::Timeout(timeout))
            }
        }

        let analyzer = Analyzer::new(AnalyzerConfig {
            text_embedder: Some(Arc::new(Failing)),
            ..AnalyzerConfig::default()
        })
        .unwrap();
        let analysis = analyzer
            .analyze("guaranteed win tonight", "", None, None, &AnalyzeOptions::default())
            .unwrap();

        assert_eq!(analysis.unavailable, vec!["semantic"]);
        assert!(analysis.score.flags.iter().any(|f| f.label == "guaranteed"));
    }

    #[test]
    fn metadata_feeds_the_under21_rule() {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        let metadata = Metadata { under21_endorser: true };
        let analysis =
            analyzer.analyze("any clip", "", Some(&metadata), None, &text_options()).unwrap();
        assert!(analysis.score.flags.iter().any(|f| f.label == "under21_endorser"));
    }

    #[test]
    fn fuzzy_toggle_controls_fuzzy_labels() {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        // fuzzy-only wording: "win it bck" misses the exact pattern
        let transcript = "time to win it bck tonight";

        let with_fuzzy = analyzer.analyze(transcript, "", None, None, &text_options()).unwrap();
        assert!(with_fuzzy.features.phrases.contains("chasing_losses"));

        let exact_only = AnalyzeOptions { detectors: Detectors::empty(), ..AnalyzeOptions::default() };
        let without = analyzer.analyze(transcript, "", None, None, &exact_only).unwrap();
        assert!(!without.features.phrases.contains("chasing_losses"));
    }
}

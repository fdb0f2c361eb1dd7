//! Detection layer.
//!
//! Five independent detectors turn raw evidence (joint transcript + OCR text,
//! sampled frame images) into fired labels and brand names. They share no
//! state and are order-insensitive; only the scoring engine downstream imposes
//! an evaluation order.
//!
//! ## How the parts work together
//!
//! ```text
//! transcript ─┐
//!             ├─ normalize + join ──┬─ exact::find_hits      (exact.rs, span-aware)
//! ocr text  ──┘                     ├─ fuzzy::fuzzy_hits     (fuzzy.rs, optional)
//!                                   ├─ SemanticDetector      (semantic.rs, optional,
//!                                   │                         needs a TextEmbedder)
//!                                   └─ operator::detect      (operator.rs)
//!
//! frame images ── LogoDetector (logo.rs, optional, needs an ImageEmbedder)
//!                                   │
//!                                   v
//!                        FeatureRecord (features.rs)
//! ```
//!
//! ## Degrade, don't fail
//!
//! The exact and operator detectors are pure local computation and always
//! complete. The fuzzy detector is local too. The semantic and logo detectors
//! depend on embedding providers that can time out or be missing entirely;
//! they report [`DetectorOutcome::Unavailable`] instead of an empty hit set so
//! the caller can tell "nothing found" from "could not look". An analysis
//! always finishes on the signals that did run.

#[path = "detect/exact.rs"]
pub(crate) mod exact;
#[path = "detect/fuzzy.rs"]
pub(crate) mod fuzzy;
#[path = "detect/logo.rs"]
pub(crate) mod logo;
#[path = "detect/operator.rs"]
pub(crate) mod operator;
#[path = "detect/semantic.rs"]
pub(crate) mod semantic;

use std::collections::BTreeSet;

/// Result of one optional detector run.
///
/// `Unavailable` means the detector could not execute (provider failure or
/// timeout), not that it found nothing; callers surface the distinction in
/// [`crate::Analysis::unavailable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DetectorOutcome {
    Hits(BTreeSet<&'static str>),
    Unavailable,
}

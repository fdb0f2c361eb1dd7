extern crate self as betscreen;

use serde::Serialize;

#[macro_use]
mod macros;
mod api;
mod detect;
mod error;
mod features;
mod providers;
mod registry;
mod score;

pub use api::{Analysis, AnalyzeOptions, Analyzer, AnalyzerConfig, Detectors, analyze};
pub use detect::logo::{DEFAULT_LOGO_THRESHOLD, LogoAsset, LogoDetector};
pub use error::Error;
pub use features::{FeatureRecord, Metadata};
pub use providers::{EmbedError, ImageEmbedder, TextEmbedder};
pub use registry::operators::{OperatorEntry, OperatorRegistry};
pub use score::{Category, Flag, ScoreResult};

// --- Shared audit types ------------------------------------------------------

/// Byte span of one exact-pattern match in the joint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

/// Exact-detector output: pattern label → every non-overlapping match span.
///
/// Kept on the analysis result for audit/UI display; scoring consumes the
/// derived [`FeatureRecord`] instead.
pub type HitMap = std::collections::BTreeMap<&'static str, Vec<Span>>;

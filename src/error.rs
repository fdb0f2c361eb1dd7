use thiserror::Error;

/// Errors surfaced by the public API.
///
/// Detector failures never appear here: optional detectors degrade to an empty
/// contribution and are reported through `Analysis::unavailable`. The only
/// hard failure an analysis can produce is a rule/weight configuration
/// mismatch, which means the deployment is broken and results would be wrong.
#[derive(Debug, Error)]
pub enum Error {
    /// A scoring rule references a label the weight table does not carry.
    #[error("no weight-table entry for scoring rule `{0}`")]
    MissingWeight(&'static str),

    /// The operator-registry JSON could not be parsed.
    #[error("invalid operator registry: {0}")]
    InvalidRegistry(#[from] serde_json::Error),
}

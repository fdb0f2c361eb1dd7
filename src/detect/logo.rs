//! Visual logo detection.
//!
//! Matches sampled frame images against reference brand logos by
//! image-embedding similarity. The detector is a standalone public component:
//! the caller runs it over whichever frames it sampled and feeds the
//! resulting name set into [`crate::Analyzer::analyze`] as precomputed logo
//! hits.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use crate::providers::{ImageEmbedder, cosine, l2_normalize};

/// Default cosine-similarity threshold for a frame to report a logo.
pub const DEFAULT_LOGO_THRESHOLD: f32 = 0.3;

/// One reference logo image tagged with its canonical brand name.
#[derive(Debug, Clone)]
pub struct LogoAsset {
    pub name: String,
    pub image: Vec<u8>,
}

/// Reference-logo registry plus the embedder used to compare frames to it.
///
/// Construction embeds and L2-normalizes each reference image once.
/// Initialization failures (missing assets, provider down) shrink the
/// registry instead of aborting; an empty registry detects nothing and the
/// rest of the analysis is unaffected.
pub struct LogoDetector {
    embedder: Arc<dyn ImageEmbedder>,
    references: Vec<(String, Vec<f32>)>,
    threshold: f32,
}

impl LogoDetector {
    pub fn new(embedder: Arc<dyn ImageEmbedder>, assets: &[LogoAsset], timeout: Duration) -> Self {
        Self::with_threshold(embedder, assets, timeout, DEFAULT_LOGO_THRESHOLD)
    }

    pub fn with_threshold(
        embedder: Arc<dyn ImageEmbedder>,
        assets: &[LogoAsset],
        timeout: Duration,
        threshold: f32,
    ) -> Self {
        let mut references = Vec::with_capacity(assets.len());
        for asset in assets {
            match embedder.embed_image(&asset.image, timeout) {
                Ok(mut vector) => {
                    l2_normalize(&mut vector);
                    references.push((asset.name.to_lowercase(), vector));
                }
                Err(err) => {
                    tracing::warn!(logo = %asset.name, %err, "skipping reference logo");
                }
            }
        }

        if references.is_empty() && !assets.is_empty() {
            tracing::warn!("logo registry is empty; visual detection is disabled");
        }

        Self { embedder, references, threshold }
    }

    /// True when no reference logo survived initialization.
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Report every reference name similar to any of `frames`.
    ///
    /// Frames whose embedding fails are skipped; one bad frame must not hide
    /// logos visible in the others.
    pub fn detect(&self, frames: &[Vec<u8>], timeout: Duration) -> BTreeSet<String> {
        let mut hits = BTreeSet::new();
        if self.references.is_empty() {
            return hits;
        }

        for frame in frames {
            let mut vector = match self.embedder.embed_image(frame, timeout) {
                Ok(vector) => vector,
                Err(err) => {
                    tracing::warn!(%err, "skipping frame in logo detection");
                    continue;
                }
            };
            l2_normalize(&mut vector);

            for (name, reference) in &self.references {
                if cosine(&vector, reference) >= self.threshold {
                    hits.insert(name.clone());
                }
            }
        }

        hits
    }
}

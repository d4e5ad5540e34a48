//! Toxicity scorer trait and common types

use async_trait::async_trait;
use modscreen_core::Result;
use std::collections::HashMap;

/// Scores keyed by the scoring model's native label names.
///
/// The serving layer remaps these to the fixed output vocabulary; a key
/// missing from this map is treated as a score of 0.0.
pub type NativeScores = HashMap<String, f32>;

/// Trait for toxicity scoring capabilities
#[async_trait]
pub trait ToxicityScorer: Send + Sync {
    /// Score the given text, returning one score per native label
    async fn score(&self, text: &str) -> Result<NativeScores>;

    /// Identifier reported in response metadata
    fn model_id(&self) -> &str;
}

//! modscreen Classifiers
//!
//! Capabilities backing the classification endpoint: a pretrained
//! multilingual toxicity scorer, a PII analyzer, and a PII anonymizer.
//!
//! All capabilities are loaded once at process startup and shared
//! read-only across requests behind `Arc<dyn Trait>` handles.

pub mod anonymizer;
pub mod detoxify;
pub mod lexicon;
pub mod model_loader;
pub mod pii;
pub mod scorer;

pub use anonymizer::{PiiAnonymizer, ReplaceAnonymizer};
pub use detoxify::{DetoxifyOptions, DetoxifyScorer, DETOXIFY_MODEL_ID};
pub use lexicon::LexiconScorer;
pub use model_loader::{resolve_device, resolve_model_dir, ModelSource};
pub use pii::{PiiAnalyzer, RegexPiiAnalyzer};
pub use scorer::{NativeScores, ToxicityScorer};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::anonymizer::{PiiAnonymizer, ReplaceAnonymizer};
    pub use crate::detoxify::DetoxifyScorer;
    pub use crate::lexicon::LexiconScorer;
    pub use crate::pii::{PiiAnalyzer, RegexPiiAnalyzer};
    pub use crate::scorer::{NativeScores, ToxicityScorer};
}

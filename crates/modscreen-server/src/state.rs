//! Shared application state
//!
//! The three capability handles are built once at startup and shared
//! read-only across all requests. Tests inject their own capabilities
//! through [`AppState::with_capabilities`].

use crate::config::{ScorerKind, ServerConfig};
use anyhow::Result;
use modscreen_classifiers::{
    DetoxifyOptions, DetoxifyScorer, LexiconScorer, ModelSource, PiiAnalyzer, PiiAnonymizer,
    RegexPiiAnalyzer, ReplaceAnonymizer, ToxicityScorer,
};
use std::sync::Arc;
use tracing::info;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Toxicity scoring capability
    pub scorer: Arc<dyn ToxicityScorer>,

    /// PII analysis capability
    pub analyzer: Arc<dyn PiiAnalyzer>,

    /// PII anonymization capability
    pub anonymizer: Arc<dyn PiiAnonymizer>,
}

impl AppState {
    /// Initialize application state from configuration.
    ///
    /// Loads the configured scorer up front; a model load failure here is
    /// fatal, there is no runtime fallback.
    pub async fn new(config: ServerConfig) -> Result<Self> {
        let scorer: Arc<dyn ToxicityScorer> = match config.scorer {
            ScorerKind::Detoxify => {
                let options = DetoxifyOptions {
                    source: match &config.model.local_dir {
                        Some(dir) => ModelSource::local(dir.clone()),
                        None => ModelSource::HuggingFace {
                            repo_id: config.model.repo_id.clone(),
                            revision: config.model.revision.clone(),
                        },
                    },
                    device: config.model.device.clone(),
                    max_length: config.model.max_length,
                };
                Arc::new(DetoxifyScorer::load(&options)?)
            }
            ScorerKind::Lexicon => Arc::new(LexiconScorer::new()?),
        };
        info!("Mounted toxicity scorer: {}", scorer.model_id());

        let analyzer = Arc::new(RegexPiiAnalyzer::new()?);
        let anonymizer = Arc::new(ReplaceAnonymizer::new());

        Ok(Self {
            config: Arc::new(config),
            scorer,
            analyzer,
            anonymizer,
        })
    }

    /// Build state around externally supplied capabilities
    pub fn with_capabilities(
        config: ServerConfig,
        scorer: Arc<dyn ToxicityScorer>,
        analyzer: Arc<dyn PiiAnalyzer>,
        anonymizer: Arc<dyn PiiAnonymizer>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            scorer,
            analyzer,
            anonymizer,
        }
    }
}

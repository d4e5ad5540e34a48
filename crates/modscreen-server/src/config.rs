//! Server configuration

use modscreen_classifiers::detoxify;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Which toxicity scorer to mount
    #[serde(default)]
    pub scorer: ScorerKind,

    /// Model checkpoint settings (detoxify scorer only)
    #[serde(default)]
    pub model: ModelSettings,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &crate::cli::Cli) -> anyhow::Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            config.port = port;
        }

        if let Some(scorer) = cli.scorer {
            config.scorer = scorer;
        }

        if let Some(model_dir) = &cli.model_dir {
            config.model.local_dir = Some(model_dir.clone());
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            scorer: ScorerKind::default(),
            model: ModelSettings::default(),
        }
    }
}

/// Toxicity scorer selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    /// Pretrained multilingual model
    #[default]
    Detoxify,
    /// Lexicon fallback for weight-less deployments
    Lexicon,
}

/// Model checkpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Hugging Face repository to pull the checkpoint from
    #[serde(default = "default_repo_id")]
    pub repo_id: String,

    /// Optional repository revision
    #[serde(default)]
    pub revision: Option<String>,

    /// Local checkpoint directory; takes precedence over the repository
    #[serde(default)]
    pub local_dir: Option<PathBuf>,

    /// Inference device ("cpu", "cuda", "metal")
    #[serde(default = "default_device")]
    pub device: String,

    /// Maximum input sequence length
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            repo_id: default_repo_id(),
            revision: None,
            local_dir: None,
            device: default_device(),
            max_length: default_max_length(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_repo_id() -> String {
    detoxify::DEFAULT_REPO_ID.to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

fn default_max_length() -> usize {
    512
}

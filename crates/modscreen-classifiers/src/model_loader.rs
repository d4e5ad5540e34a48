//! Model resolution and loading for Candle-based scorers

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use modscreen_core::{Error, Result};
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

/// Source location for model weights
#[derive(Debug, Clone)]
pub enum ModelSource {
    /// Load from a local directory containing config.json, tokenizer.json
    /// and model.safetensors
    LocalDir(PathBuf),

    /// Download from the Hugging Face Hub
    HuggingFace {
        repo_id: String,
        revision: Option<String>,
    },
}

impl ModelSource {
    /// Create a Hugging Face source for the given repository
    pub fn huggingface(repo_id: impl Into<String>) -> Self {
        Self::HuggingFace {
            repo_id: repo_id.into(),
            revision: None,
        }
    }

    /// Create a local directory source
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::LocalDir(path.into())
    }
}

/// Resolve a model source to a local directory holding the checkpoint files.
///
/// Hub sources are downloaded into the modscreen cache and resolved to the
/// cache directory; local sources are validated and returned as-is.
pub fn resolve_model_dir(source: &ModelSource) -> Result<PathBuf> {
    match source {
        ModelSource::LocalDir(path) => {
            if !path.exists() {
                return Err(Error::config(format!(
                    "Model directory does not exist: {}",
                    path.display()
                )));
            }
            Ok(path.clone())
        }
        ModelSource::HuggingFace { repo_id, revision } => {
            download_from_huggingface(repo_id, revision.as_deref())
        }
    }
}

fn download_from_huggingface(repo_id: &str, revision: Option<&str>) -> Result<PathBuf> {
    tracing::info!("Downloading model from Hugging Face: {}", repo_id);

    let cache_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cache/modscreen/models");
    std::fs::create_dir_all(&cache_dir).ok();

    let api = hf_hub::api::sync::ApiBuilder::new()
        .with_cache_dir(cache_dir)
        .build()
        .map_err(|e| Error::config(format!("Failed to initialize Hugging Face API: {}", e)))?;

    let repo = api.repo(hf_hub::Repo::with_revision(
        repo_id.to_string(),
        hf_hub::RepoType::Model,
        revision.unwrap_or("main").to_string(),
    ));

    for filename in ["model.safetensors", "tokenizer.json"] {
        repo.get(filename).map_err(|e| {
            Error::classifier(format!("Failed to download {}: {}", filename, e))
        })?;
    }

    let config_path = repo
        .get("config.json")
        .map_err(|e| Error::classifier(format!("Failed to download config.json: {}", e)))?;

    let model_dir = config_path
        .parent()
        .ok_or_else(|| Error::classifier("Invalid model cache path"))?;

    tracing::info!("Model available at: {}", model_dir.display());
    Ok(model_dir.to_path_buf())
}

/// Select the inference device from a configuration string
pub fn resolve_device(device: &str) -> Result<Device> {
    match device.to_lowercase().as_str() {
        "cuda" | "cuda:0" => Device::new_cuda(0)
            .map_err(|e| Error::classifier(format!("Failed to initialize CUDA: {}", e))),
        "mps" | "metal" => Device::new_metal(0)
            .map_err(|e| Error::classifier(format!("Failed to initialize Metal: {}", e))),
        _ => Ok(Device::Cpu),
    }
}

/// Load the checkpoint's tokenizer
pub fn load_tokenizer(model_dir: &Path) -> Result<Tokenizer> {
    let tokenizer_path = model_dir.join("tokenizer.json");
    if !tokenizer_path.exists() {
        return Err(Error::classifier(format!(
            "tokenizer.json not found in {}",
            model_dir.display()
        )));
    }

    Tokenizer::from_file(&tokenizer_path)
        .map_err(|e| Error::classifier(format!("Failed to load tokenizer.json: {}", e)))
}

/// Memory-map the checkpoint's safetensors weights
pub fn load_var_builder(model_dir: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let weights_path = model_dir.join("model.safetensors");
    if !weights_path.exists() {
        return Err(Error::classifier(format!(
            "model.safetensors not found in {}",
            model_dir.display()
        )));
    }

    let vb = unsafe {
        VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)
            .map_err(|e| Error::classifier(format!("Failed to load weights: {}", e)))?
    };

    Ok(vb)
}

/// Parse a JSON file from the checkpoint directory
pub fn parse_json_config<T: serde::de::DeserializeOwned>(config_path: &Path) -> Result<T> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        Error::classifier(format!(
            "Failed to read config {}: {}",
            config_path.display(),
            e
        ))
    })?;

    serde_json::from_str(&config_str).map_err(|e| {
        Error::classifier(format!(
            "Failed to parse config {}: {}",
            config_path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_local_dir_is_config_error() {
        let source = ModelSource::local("/nonexistent/model/dir");
        let err = resolve_model_dir(&source).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_cpu_device_always_resolves() {
        assert!(resolve_device("cpu").is_ok());
        assert!(resolve_device("anything-else").is_ok());
    }
}

//! Multilingual toxicity scorer backed by an XLM-RoBERTa checkpoint
//!
//! Loads the `detoxify-multilingual` sequence-classification checkpoint
//! with Candle and scores text against its native labels. The head is
//! multilabel: each logit passes through a sigmoid independently.

use crate::model_loader::{
    load_tokenizer, load_var_builder, parse_json_config, resolve_device, resolve_model_dir,
    ModelSource,
};
use crate::scorer::{NativeScores, ToxicityScorer};
use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{
    Config as XlmRobertaConfig, XLMRobertaForSequenceClassification,
};
use modscreen_core::{Error, Result};
use tokenizers::{Tokenizer, TruncationDirection};

/// Identifier reported in response metadata for this scorer
pub const DETOXIFY_MODEL_ID: &str = "detoxify-multilingual";

/// Default Hub repository holding the multilingual detoxify weights
pub const DEFAULT_REPO_ID: &str = "unitary/multilingual-toxic-xlm-roberta";

/// Native labels of the multilingual detoxify head, in head order.
/// Used when the checkpoint's config carries no id2label map.
const DEFAULT_LABELS: [&str; 7] = [
    "toxicity",
    "severe_toxicity",
    "obscene",
    "identity_attack",
    "insult",
    "threat",
    "sexual_explicit",
];

/// Options for loading the detoxify scorer
#[derive(Debug, Clone)]
pub struct DetoxifyOptions {
    /// Where the checkpoint lives
    pub source: ModelSource,

    /// Inference device ("cpu", "cuda", "metal")
    pub device: String,

    /// Maximum input sequence length; longer inputs are truncated
    pub max_length: usize,
}

impl Default for DetoxifyOptions {
    fn default() -> Self {
        Self {
            source: ModelSource::huggingface(DEFAULT_REPO_ID),
            device: "cpu".to_string(),
            max_length: 512,
        }
    }
}

/// Pretrained multilingual toxicity scorer
pub struct DetoxifyScorer {
    tokenizer: Tokenizer,
    model: XLMRobertaForSequenceClassification,
    device: Device,
    labels: Vec<String>,
    max_length: usize,
}

impl DetoxifyScorer {
    /// Load the scorer from the configured checkpoint.
    ///
    /// Resolves the checkpoint directory, loads tokenizer and weights, and
    /// builds the sequence-classification head. Fails if any checkpoint
    /// file is missing or malformed; there is no degraded mode.
    pub fn load(options: &DetoxifyOptions) -> Result<Self> {
        let model_dir = resolve_model_dir(&options.source)?;
        let device = resolve_device(&options.device)?;

        let tokenizer = load_tokenizer(&model_dir)?;
        let vb = load_var_builder(&model_dir, &device)?;

        let config_path = model_dir.join("config.json");
        let xlm_config: XlmRobertaConfig = parse_json_config(&config_path)?;
        let labels = read_labels(&config_path)?;

        let model = load_sequence_model(&vb, labels.len(), &xlm_config)?;

        tracing::info!(
            "Loaded {} with {} labels: {:?}",
            DETOXIFY_MODEL_ID,
            labels.len(),
            labels
        );

        Ok(Self {
            tokenizer,
            model,
            device,
            labels,
            max_length: options.max_length,
        })
    }
}

#[async_trait]
impl ToxicityScorer for DetoxifyScorer {
    async fn score(&self, text: &str) -> Result<NativeScores> {
        let mut encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::classifier(format!("Tokenization failed: {}", e)))?;
        encoding.truncate(self.max_length, 0, TruncationDirection::Right);

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| Error::classifier(format!("Failed to build input ids tensor: {}", e)))?;

        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| {
                Error::classifier(format!("Failed to build attention mask tensor: {}", e))
            })?;

        let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| {
                Error::classifier(format!("Failed to build token type ids tensor: {}", e))
            })?;

        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids)
            .map_err(|e| Error::classifier(format!("Model forward pass failed: {}", e)))?;

        let probs = to_label_probabilities(&logits)?;

        Ok(self
            .labels
            .iter()
            .cloned()
            .zip(probs)
            .collect::<NativeScores>())
    }

    fn model_id(&self) -> &str {
        DETOXIFY_MODEL_ID
    }
}

/// Multilabel head: independent sigmoid per logit
fn to_label_probabilities(logits: &Tensor) -> Result<Vec<f32>> {
    candle_nn::ops::sigmoid(logits)
        .and_then(|t| t.squeeze(0))
        .and_then(|t| t.to_vec1())
        .map_err(|e| Error::classifier(format!("Failed to read label probabilities: {}", e)))
}

/// Read the head's label names from the checkpoint config's id2label map,
/// ordered by label id
fn read_labels(config_path: &std::path::Path) -> Result<Vec<String>> {
    let raw: serde_json::Value = parse_json_config(config_path)?;

    let Some(id2label) = raw.get("id2label").and_then(|v| v.as_object()) else {
        return Ok(DEFAULT_LABELS.iter().map(|s| s.to_string()).collect());
    };

    let mut entries: Vec<(usize, String)> = Vec::with_capacity(id2label.len());
    for (id, label) in id2label {
        let idx = id
            .parse::<usize>()
            .map_err(|_| Error::classifier(format!("Non-numeric label id in config: {}", id)))?;
        let name = label
            .as_str()
            .ok_or_else(|| Error::classifier(format!("Non-string label for id {}", idx)))?;
        entries.push((idx, name.to_string()));
    }
    entries.sort_by_key(|(idx, _)| *idx);

    Ok(entries.into_iter().map(|(_, name)| name).collect())
}

fn load_sequence_model(
    vb: &VarBuilder,
    num_labels: usize,
    config: &XlmRobertaConfig,
) -> Result<XLMRobertaForSequenceClassification> {
    let mut errors = Vec::new();

    for prefix in ["", "model"] {
        let vb_prefix = if prefix.is_empty() {
            vb.clone()
        } else {
            vb.pp(prefix)
        };

        match XLMRobertaForSequenceClassification::new(num_labels, config, vb_prefix) {
            Ok(model) => {
                let effective_prefix = if prefix.is_empty() { "<root>" } else { prefix };
                tracing::info!("Loaded XLM-RoBERTa backbone from '{}'", effective_prefix);
                return Ok(model);
            }
            Err(e) => {
                errors.push(format!(
                    "{}: {}",
                    if prefix.is_empty() { "<root>" } else { prefix },
                    e
                ));
            }
        }
    }

    Err(Error::classifier(format!(
        "Failed to load XLM-RoBERTa sequence model with tried prefixes [{}]",
        errors.join(" | ")
    )))
}

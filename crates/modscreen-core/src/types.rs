//! Core types for modscreen

use serde::{Deserialize, Serialize};

/// Constant `source` value reported for model-produced scores
pub const SCORE_SOURCE: &str = "model";

/// Request body for the classification endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    /// Text to classify
    pub text: String,

    /// Optional language hint; accepted but not used by the scoring path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// Whether to redact detected PII before scoring
    #[serde(default)]
    pub pii_redact: bool,
}

impl ClassifyRequest {
    /// Create a request for plain scoring without redaction
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: None,
            pii_redact: false,
        }
    }

    /// Enable PII redaction
    pub fn with_redaction(mut self) -> Self {
        self.pii_redact = true;
        self
    }
}

/// A detected PII span, with offsets into the original text
///
/// Offsets are character offsets (half-open range, `start <= end`), not
/// byte offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiSpan {
    /// Entity label, e.g. "EMAIL_ADDRESS" or "PHONE_NUMBER"
    pub entity_type: String,

    /// Start character offset into the original text
    pub start: usize,

    /// End character offset into the original text (exclusive)
    pub end: usize,

    /// Detection confidence (0.0-1.0)
    pub score: f32,
}

/// The fixed output category vocabulary, in canonical response order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Toxicity,
    IdentityAttack,
    ViolenceThreat,
    SexualExplicit,
    Profanity,
    Insult,
}

impl Category {
    /// All categories in the order they appear in every response
    pub const ALL: [Category; 6] = [
        Category::Toxicity,
        Category::IdentityAttack,
        Category::ViolenceThreat,
        Category::SexualExplicit,
        Category::Profanity,
        Category::Insult,
    ];

    /// Output name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toxicity => "toxicity",
            Self::IdentityAttack => "identity_attack",
            Self::ViolenceThreat => "violence_threat",
            Self::SexualExplicit => "sexual_explicit",
            Self::Profanity => "profanity",
            Self::Insult => "insult",
        }
    }

    /// The model-native score key this category is remapped from
    pub fn native_key(&self) -> &'static str {
        match self {
            Self::Toxicity => "toxicity",
            Self::IdentityAttack => "identity_attack",
            Self::ViolenceThreat => "threat",
            Self::SexualExplicit => "sexual_explicit",
            Self::Profanity => "obscene",
            Self::Insult => "insult",
        }
    }
}

/// A single scored category in the response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Category name
    pub name: Category,

    /// Score in [0.0, 1.0]
    pub score: f32,

    /// Score provenance; always [`SCORE_SOURCE`]
    pub source: String,
}

impl CategoryScore {
    /// Create a model-sourced category score
    pub fn model(name: Category, score: f32) -> Self {
        Self {
            name,
            score,
            source: SCORE_SOURCE.to_string(),
        }
    }
}

/// Explanatory metadata attached to every response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explain {
    /// Identifier of the scoring model
    pub model: String,

    /// PII spans detected in the original text; empty unless redaction ran
    pub pii_spans: Vec<PiiSpan>,
}

/// Response body for the classification endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    /// Exactly six category scores, in [`Category::ALL`] order
    pub categories: Vec<CategoryScore>,

    /// Explanatory metadata
    pub explain: Explain,
}

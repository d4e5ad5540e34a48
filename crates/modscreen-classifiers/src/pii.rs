//! PII analysis capability
//!
//! Regex recognizers producing typed, scored spans. Recognizers are
//! registered for English only; analysis in any other language yields no
//! spans.

use async_trait::async_trait;
use modscreen_core::{Error, PiiSpan, Result};
use regex::Regex;

/// Trait for PII analysis capabilities
#[async_trait]
pub trait PiiAnalyzer: Send + Sync {
    /// Detect PII spans in the given text.
    ///
    /// Returned offsets are character offsets into `text`. Span order is
    /// the analyzer's own and must be preserved by callers.
    async fn analyze(&self, text: &str, language: &str) -> Result<Vec<PiiSpan>>;
}

struct Recognizer {
    entity_type: &'static str,
    pattern: Regex,
    score: f32,
}

/// Regex-based PII analyzer
pub struct RegexPiiAnalyzer {
    recognizers: Vec<Recognizer>,
}

impl RegexPiiAnalyzer {
    /// Create an analyzer with the built-in English recognizers
    pub fn new() -> Result<Self> {
        let recognizers = vec![
            Recognizer {
                entity_type: "EMAIL_ADDRESS",
                pattern: compile("EMAIL_ADDRESS", r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")?,
                score: 1.0,
            },
            Recognizer {
                entity_type: "PHONE_NUMBER",
                pattern: compile("PHONE_NUMBER", r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b")?,
                score: 0.75,
            },
            Recognizer {
                entity_type: "US_SSN",
                pattern: compile("US_SSN", r"\b\d{3}-\d{2}-\d{4}\b")?,
                score: 0.85,
            },
            Recognizer {
                entity_type: "CREDIT_CARD",
                pattern: compile("CREDIT_CARD", r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b")?,
                score: 1.0,
            },
            Recognizer {
                entity_type: "IP_ADDRESS",
                pattern: compile("IP_ADDRESS", r"\b(?:\d{1,3}\.){3}\d{1,3}\b")?,
                score: 0.6,
            },
        ];

        Ok(Self { recognizers })
    }
}

fn compile(entity_type: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::classifier(format!("Failed to compile {} regex: {}", entity_type, e)))
}

#[async_trait]
impl PiiAnalyzer for RegexPiiAnalyzer {
    async fn analyze(&self, text: &str, language: &str) -> Result<Vec<PiiSpan>> {
        if language != "en" {
            tracing::debug!("No PII recognizers registered for language '{}'", language);
            return Ok(Vec::new());
        }

        let mut spans = Vec::new();

        for recognizer in &self.recognizers {
            for mat in recognizer.pattern.find_iter(text) {
                spans.push(PiiSpan {
                    entity_type: recognizer.entity_type.to_string(),
                    start: char_offset(text, mat.start()),
                    end: char_offset(text, mat.end()),
                    score: recognizer.score,
                });
            }
        }

        Ok(spans)
    }
}

/// Convert a byte offset into a character offset
fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_email_detection() {
        let analyzer = RegexPiiAnalyzer::new().unwrap();

        let text = "Contact John at john@example.com";
        let spans = analyzer.analyze(text, "en").await.unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].entity_type, "EMAIL_ADDRESS");
        assert_eq!(&text[spans[0].start..spans[0].end], "john@example.com");
        assert_eq!(spans[0].score, 1.0);
    }

    #[tokio::test]
    async fn test_no_pii() {
        let analyzer = RegexPiiAnalyzer::new().unwrap();

        let spans = analyzer.analyze("This is clean text", "en").await.unwrap();
        assert!(spans.is_empty());
    }

    #[tokio::test]
    async fn test_phone_detection() {
        let analyzer = RegexPiiAnalyzer::new().unwrap();

        let spans = analyzer.analyze("Call me at 555-123-4567", "en").await.unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].entity_type, "PHONE_NUMBER");
    }

    #[tokio::test]
    async fn test_multiple_entities() {
        let analyzer = RegexPiiAnalyzer::new().unwrap();

        let spans = analyzer
            .analyze("Mail a@b.io or dial 555-123-4567", "en")
            .await
            .unwrap();

        let types: Vec<&str> = spans.iter().map(|s| s.entity_type.as_str()).collect();
        assert!(types.contains(&"EMAIL_ADDRESS"));
        assert!(types.contains(&"PHONE_NUMBER"));
    }

    #[tokio::test]
    async fn test_non_english_language_yields_no_spans() {
        let analyzer = RegexPiiAnalyzer::new().unwrap();

        let spans = analyzer
            .analyze("Contact john@example.com", "ru")
            .await
            .unwrap();
        assert!(spans.is_empty());
    }

    #[tokio::test]
    async fn test_offsets_are_character_offsets() {
        let analyzer = RegexPiiAnalyzer::new().unwrap();

        // Two-byte characters before the match shift byte offsets but not
        // character offsets.
        let text = "héllo wörld john@example.com";
        let spans = analyzer.analyze(text, "en").await.unwrap();

        assert_eq!(spans.len(), 1);
        let chars: Vec<char> = text.chars().collect();
        let matched: String = chars[spans[0].start..spans[0].end].iter().collect();
        assert_eq!(matched, "john@example.com");
    }
}

//! PII anonymization capability
//!
//! Replaces detected spans with `<ENTITY_TYPE>` placeholder tokens.

use modscreen_core::PiiSpan;

/// Trait for PII anonymization capabilities
pub trait PiiAnonymizer: Send + Sync {
    /// Produce a redacted copy of `text` with each span replaced by a
    /// placeholder. Span offsets are character offsets into `text`.
    fn anonymize(&self, text: &str, spans: &[PiiSpan]) -> String;
}

/// Anonymizer that substitutes `<ENTITY_TYPE>` placeholders for spans
#[derive(Debug, Default)]
pub struct ReplaceAnonymizer;

impl ReplaceAnonymizer {
    pub fn new() -> Self {
        Self
    }
}

impl PiiAnonymizer for ReplaceAnonymizer {
    fn anonymize(&self, text: &str, spans: &[PiiSpan]) -> String {
        if spans.is_empty() {
            return text.to_string();
        }

        // Byte position of each character boundary, plus the end sentinel.
        let byte_at: Vec<usize> = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_len = byte_at.len() - 1;

        // Apply right-to-left so earlier offsets stay valid.
        let mut ordered: Vec<&PiiSpan> = spans.iter().collect();
        ordered.sort_by(|a, b| b.start.cmp(&a.start));

        let mut redacted = text.to_string();
        let mut replaced_from = char_len + 1;

        for span in ordered {
            if span.start > span.end || span.end > char_len {
                tracing::warn!(
                    "Skipping out-of-range span {}..{} for {}",
                    span.start,
                    span.end,
                    span.entity_type
                );
                continue;
            }
            // Skip spans overlapping an already-replaced region.
            if span.end > replaced_from {
                continue;
            }

            redacted.replace_range(
                byte_at[span.start]..byte_at[span.end],
                &format!("<{}>", span.entity_type),
            );
            replaced_from = span.start;
        }

        redacted
    }
}

//! Classification pipeline
//!
//! One request, four steps: optional PII redaction, toxicity scoring on
//! the working text, remapping of native scores onto the fixed category
//! vocabulary, response assembly.

use crate::state::AppState;
use modscreen_classifiers::NativeScores;
use modscreen_core::{Category, CategoryScore, ClassifyRequest, ClassifyResponse, Explain, Result};
use tracing::debug;

/// PII analysis language.
///
/// Hard-coded to English regardless of the request's `lang` hint; only
/// English recognizers are registered.
const PII_LANGUAGE: &str = "en";

/// Run the classification pipeline for one request
pub async fn classify_text(state: &AppState, request: &ClassifyRequest) -> Result<ClassifyResponse> {
    let mut working_text = request.text.clone();
    let mut pii_spans = Vec::new();

    if request.pii_redact {
        pii_spans = state.analyzer.analyze(&request.text, PII_LANGUAGE).await?;
        debug!("Detected {} PII spans", pii_spans.len());

        working_text = state.anonymizer.anonymize(&request.text, &pii_spans);
    }

    let native_scores = state.scorer.score(&working_text).await?;

    Ok(ClassifyResponse {
        categories: map_native_scores(&native_scores),
        explain: Explain {
            model: state.scorer.model_id().to_string(),
            pii_spans,
        },
    })
}

/// Remap native score keys onto the fixed output vocabulary.
///
/// Total over all inputs: a native key absent from `scores` yields 0.0
/// for its category, and every category is always present exactly once,
/// in declaration order.
fn map_native_scores(scores: &NativeScores) -> Vec<CategoryScore> {
    Category::ALL
        .iter()
        .map(|category| {
            let score = scores.get(category.native_key()).copied().unwrap_or(0.0);
            CategoryScore::model(*category, score)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_full_native_scores() {
        let mut scores = NativeScores::new();
        scores.insert("toxicity".to_string(), 0.9);
        scores.insert("identity_attack".to_string(), 0.1);
        scores.insert("threat".to_string(), 0.2);
        scores.insert("sexual_explicit".to_string(), 0.3);
        scores.insert("obscene".to_string(), 0.4);
        scores.insert("insult".to_string(), 0.5);

        let mapped = map_native_scores(&scores);

        assert_eq!(mapped.len(), 6);
        assert_eq!(mapped[0].name, Category::Toxicity);
        assert_eq!(mapped[0].score, 0.9);
        assert_eq!(mapped[2].name, Category::ViolenceThreat);
        assert_eq!(mapped[2].score, 0.2);
        assert_eq!(mapped[4].name, Category::Profanity);
        assert_eq!(mapped[4].score, 0.4);
    }

    #[test]
    fn test_missing_native_keys_default_to_zero() {
        let mut scores = NativeScores::new();
        scores.insert("toxicity".to_string(), 0.7);

        let mapped = map_native_scores(&scores);

        assert_eq!(mapped.len(), 6);
        assert_eq!(mapped[0].score, 0.7);
        for entry in &mapped[1..] {
            assert_eq!(entry.score, 0.0);
        }
    }

    #[test]
    fn test_empty_native_scores_still_yield_all_categories() {
        let mapped = map_native_scores(&NativeScores::new());

        let names: Vec<Category> = mapped.iter().map(|c| c.name).collect();
        assert_eq!(names, Category::ALL.to_vec());
    }

    #[test]
    fn test_unknown_native_keys_are_ignored() {
        let mut scores = NativeScores::new();
        scores.insert("severe_toxicity".to_string(), 0.99);

        let mapped = map_native_scores(&scores);
        assert!(mapped.iter().all(|c| c.score == 0.0));
    }
}

//! Lexicon-based toxicity scorer
//!
//! Weight-less fallback for deployments that cannot ship model files.
//! Scores are bounded: lexicon hits can flag, not certify.

use crate::scorer::{NativeScores, ToxicityScorer};
use aho_corasick::AhoCorasick;
use async_trait::async_trait;
use modscreen_core::{Error, Result};

/// Identifier reported in response metadata for this scorer
pub const LEXICON_MODEL_ID: &str = "toxicity-lexicon";

const MATCH_WEIGHT: f32 = 0.35;
const MAX_SCORE: f32 = 0.95;

struct CategoryLexicon {
    native_key: &'static str,
    matcher: AhoCorasick,
}

/// Lexicon scorer emitting the same native keys as the pretrained model
pub struct LexiconScorer {
    lexicons: Vec<CategoryLexicon>,
}

impl LexiconScorer {
    pub fn new() -> Result<Self> {
        let lexicons = vec![
            build_lexicon(
                "toxicity",
                &[
                    "hate", "stupid", "idiot", "dumb", "worst", "terrible", "awful", "sucks",
                    "garbage", "trash",
                ],
            )?,
            build_lexicon(
                "obscene",
                &["shit", "fuck", "damn", "hell", "crap", "piss"],
            )?,
            build_lexicon(
                "insult",
                &["idiot", "moron", "loser", "clown", "pathetic", "asshole", "bastard", "bitch"],
            )?,
            build_lexicon(
                "threat",
                &["kill", "die", "hurt you", "beat you", "destroy you", "make you pay"],
            )?,
            build_lexicon(
                "identity_attack",
                &["go back to", "your kind", "you people", "subhuman"],
            )?,
            build_lexicon(
                "sexual_explicit",
                &["porn", "nude", "explicit"],
            )?,
        ];

        Ok(Self { lexicons })
    }
}

fn build_lexicon(native_key: &'static str, terms: &[&str]) -> Result<CategoryLexicon> {
    let matcher = AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(terms)
        .map_err(|e| {
            Error::classifier(format!(
                "Failed to build {} lexicon matcher: {}",
                native_key, e
            ))
        })?;

    Ok(CategoryLexicon {
        native_key,
        matcher,
    })
}

#[async_trait]
impl ToxicityScorer for LexiconScorer {
    async fn score(&self, text: &str) -> Result<NativeScores> {
        let mut scores = NativeScores::with_capacity(self.lexicons.len());

        for lexicon in &self.lexicons {
            let matches = lexicon.matcher.find_iter(text).count() as f32;
            let score = (matches * MATCH_WEIGHT).clamp(0.0, MAX_SCORE);
            scores.insert(lexicon.native_key.to_string(), score);
        }

        Ok(scores)
    }

    fn model_id(&self) -> &str {
        LEXICON_MODEL_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clean_text_scores_zero() {
        let scorer = LexiconScorer::new().unwrap();
        let scores = scorer.score("What a lovely morning").await.unwrap();

        for (key, score) in &scores {
            assert_eq!(*score, 0.0, "unexpected score for {}", key);
        }
    }

    #[tokio::test]
    async fn test_toxic_text_scores_high() {
        let scorer = LexiconScorer::new().unwrap();
        let scores = scorer
            .score("I hate you, you stupid idiot")
            .await
            .unwrap();

        assert!(scores["toxicity"] > 0.5);
        assert!(scores["insult"] > 0.0);
    }

    #[tokio::test]
    async fn test_scores_are_bounded() {
        let scorer = LexiconScorer::new().unwrap();
        let scores = scorer
            .score("hate stupid idiot dumb worst terrible awful sucks garbage trash")
            .await
            .unwrap();

        assert!(scores["toxicity"] <= MAX_SCORE);
    }

    #[tokio::test]
    async fn test_emits_all_remapped_native_keys() {
        let scorer = LexiconScorer::new().unwrap();
        let scores = scorer.score("anything").await.unwrap();

        for key in ["toxicity", "identity_attack", "threat", "sexual_explicit", "obscene", "insult"]
        {
            assert!(scores.contains_key(key), "missing native key {}", key);
        }
    }

    #[tokio::test]
    async fn test_case_insensitive_matching() {
        let scorer = LexiconScorer::new().unwrap();
        let scores = scorer.score("I HATE this").await.unwrap();
        assert!(scores["toxicity"] > 0.0);
    }
}

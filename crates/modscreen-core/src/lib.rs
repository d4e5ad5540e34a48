//! modscreen Core
//!
//! Core types and error handling shared across modscreen components.
//!
//! This crate provides:
//! - Wire-level types for the classification endpoint
//! - The fixed category vocabulary and its model-native key mapping
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    Category, CategoryScore, ClassifyRequest, ClassifyResponse, Explain, PiiSpan, SCORE_SOURCE,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        Category, CategoryScore, ClassifyRequest, ClassifyResponse, Explain, PiiSpan,
    };
}

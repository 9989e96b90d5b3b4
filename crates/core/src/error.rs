//! Error types shared across the translation pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the translation pipeline.
///
/// There is no retriable category: a failed engine call aborts the whole
/// `translate` call and the caller falls back to showing the source text.
#[derive(Error, Debug)]
pub enum Error {
    /// A required model or tokenizer file is absent on disk.
    #[error("Required model asset missing: {}", .0.display())]
    AssetMissing(PathBuf),

    /// The inference engine call failed or returned malformed tensors.
    #[error("Inference engine failure: {0}")]
    Model(String),

    /// The subword tokenizer failed to load or run.
    #[error("Tokenizer failure: {0}")]
    Tokenizer(String),

    /// The model configuration could not be parsed or failed validation.
    #[error("Invalid model configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

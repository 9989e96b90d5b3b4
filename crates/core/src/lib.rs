//! Core traits and types for the zh→en translation pipeline
//!
//! This crate provides the foundational pieces used by the pipeline crate:
//! - Capability traits for pluggable backends (tokenizer, sequence model)
//! - The CJK script gate
//! - Generated-sequence types with observable stop reasons
//! - Error types

pub mod error;
pub mod script;
pub mod sequence;
pub mod traits;

pub use error::{Error, Result};
pub use script::{contains_cjk, needs_translation};
pub use sequence::{attention_mask, GeneratedSequence, StopReason, TokenId};
pub use traits::{SequenceModel, TextEncoder};

//! Capability traits for pluggable backends
//!
//! The pipeline talks to its two external collaborators through these
//! seams so the codec and decode-loop logic can be tested against
//! deterministic stubs without loading real model weights.

use ndarray::Array3;

use crate::error::Result;
use crate::sequence::TokenId;

/// Raw pretrained subword tokenizer: deterministic, bidirectional mapping
/// between text and token-id sequences.
///
/// Implementations do not apply any framing policy (no eos appending, no
/// truncation, no special-token stripping) — that belongs to the codec.
pub trait TextEncoder: Send + Sync {
    /// Tokenize `text` into raw subword ids.
    fn encode(&self, text: &str) -> Result<Vec<TokenId>>;

    /// Detokenize content ids back into text, verbatim.
    fn decode(&self, ids: &[TokenId]) -> Result<String>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Encoder/decoder sequence model: two independently invokable pretrained
/// computations over batch-of-one integer tensors.
///
/// Both calls are blocking; failures are fatal to the request and are
/// propagated, never retried.
pub trait SequenceModel: Send + Sync {
    /// Run the encoder over the source ids and attention mask, returning
    /// the per-token hidden states with shape `(1, src_len, hidden_dim)`.
    fn encode(
        &self,
        input_ids: &[TokenId],
        attention_mask: &[TokenId],
    ) -> Result<Array3<f32>>;

    /// Run one decode step over the output prefix, returning logits with
    /// shape `(1, prefix_len, vocab_size)`.
    fn decode_step(
        &self,
        output_ids: &[TokenId],
        encoder_hidden_states: &Array3<f32>,
        encoder_attention_mask: &[TokenId],
    ) -> Result<Array3<f32>>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

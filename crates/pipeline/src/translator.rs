//! Translation orchestrator
//!
//! Composes the script gate, subword codec, encoder invocation, and
//! greedy decoder into the single public operation
//! `translate(text) -> text`.

#[cfg(feature = "onnx")]
use std::path::Path;

use nmt_core::{attention_mask, needs_translation, Result, SequenceModel, TextEncoder};
use tracing::debug;

use crate::codec::SubwordCodec;
use crate::config::ModelConfig;
use crate::decoder::GreedyDecoder;

/// zh→en translator over pluggable tokenizer and model backends.
///
/// Holds no per-request state: each `translate` call owns its id
/// sequences and tensors and releases them on return, so one loaded
/// translator can serve multiple threads as long as the backends are
/// thread-safe.
pub struct Translator<T: TextEncoder, M: SequenceModel> {
    codec: SubwordCodec<T>,
    model: M,
    decoder: GreedyDecoder,
}

impl<T: TextEncoder, M: SequenceModel> Translator<T, M> {
    pub fn new(tokenizer: T, model: M, config: ModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            codec: SubwordCodec::new(tokenizer, &config),
            decoder: GreedyDecoder::new(&config),
            model,
        })
    }

    /// Translate one short run of Chinese text into English.
    ///
    /// Pass-through cases (not errors): empty/whitespace-only input,
    /// input with no CJK code points, and input whose tokenization is
    /// empty — all return the trimmed input unchanged without touching
    /// the inference engine.
    pub fn translate(&self, text: &str) -> Result<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
        if !needs_translation(trimmed) {
            debug!("no CJK content, skipping translation");
            return Ok(trimmed.to_string());
        }

        let source_ids = self.codec.encode(trimmed)?;
        if source_ids.is_empty() {
            debug!("empty tokenization, nothing to translate");
            return Ok(trimmed.to_string());
        }

        let mask = attention_mask(source_ids.len());
        let hidden = self.model.encode(&source_ids, &mask)?;
        let generated = self.decoder.decode(&self.model, &hidden, &mask)?;
        debug!(
            source_tokens = source_ids.len(),
            new_tokens = generated.new_tokens().len(),
            stop = ?generated.stop,
            model = self.model.name(),
            "decode finished"
        );

        self.codec.decode(&generated.ids)
    }
}

#[cfg(feature = "onnx")]
impl Translator<crate::hf::HfTokenizer, crate::onnx::OrtSequenceModel> {
    /// Build the ONNX-backed translator from a model directory holding
    /// `encoder.onnx`, `decoder.onnx`, `tokenizer.json`, and optionally
    /// `config.json`.
    ///
    /// Any missing model or tokenizer file is an asset-missing error,
    /// surfaced immediately and never retried.
    pub fn from_model_dir(model_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = model_dir.as_ref();
        let config = ModelConfig::from_model_dir(dir)?;
        let tokenizer = crate::hf::HfTokenizer::from_file(dir.join(crate::config::TOKENIZER_FILE))?;
        let model = crate::onnx::OrtSequenceModel::from_files(
            dir.join(crate::config::ENCODER_FILE),
            dir.join(crate::config::DECODER_FILE),
        )?;
        Self::new(tokenizer, model, config)
    }
}

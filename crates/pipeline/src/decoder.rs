//! Greedy autoregressive decoder
//!
//! The one real loop in the pipeline: repeatedly run the decode step over
//! the growing output prefix, append the argmax token, and stop on a
//! terminal token or the iteration bound. The full prefix is recomputed
//! every step — no key/value cache is assumed, and adding one later must
//! not change observable output.

use ndarray::{s, Array3, ArrayView1};
use nmt_core::{Error, GeneratedSequence, Result, SequenceModel, StopReason, TokenId};
use tracing::{debug, trace};

use crate::config::ModelConfig;

/// Greedy decode loop over any [`SequenceModel`].
pub struct GreedyDecoder {
    pad_id: TokenId,
    eos_id: TokenId,
    decoder_start_id: TokenId,
    max_new_tokens: usize,
}

impl GreedyDecoder {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            pad_id: config.pad_token_id,
            eos_id: config.eos_token_id,
            decoder_start_id: config.decoder_start_token_id,
            max_new_tokens: config.max_new_tokens,
        }
    }

    /// Generate target-side ids for one request.
    ///
    /// The output always starts with the decoder-start id. Terminal
    /// tokens (eos, pad) are never appended; the iteration bound
    /// guarantees termination even for models that never emit one.
    pub fn decode<M: SequenceModel>(
        &self,
        model: &M,
        encoder_hidden_states: &Array3<f32>,
        encoder_attention_mask: &[TokenId],
    ) -> Result<GeneratedSequence> {
        let mut ids = vec![self.decoder_start_id];

        for step in 0..self.max_new_tokens {
            let logits = model.decode_step(&ids, encoder_hidden_states, encoder_attention_mask)?;
            let (batch, cur_len, vocab) = logits.dim();
            if batch != 1 || cur_len == 0 || vocab == 0 {
                return Err(Error::Model(format!(
                    "decode step {step} returned malformed logits shape ({batch}, {cur_len}, {vocab})"
                )));
            }

            let next = argmax(logits.slice(s![0, cur_len - 1, ..]));
            trace!(step, next, "decode step");

            if next == self.eos_id {
                return Ok(GeneratedSequence {
                    ids,
                    stop: StopReason::EosReached,
                });
            }
            if next == self.pad_id {
                return Ok(GeneratedSequence {
                    ids,
                    stop: StopReason::PadReached,
                });
            }
            ids.push(next);
        }

        debug!(
            max_new_tokens = self.max_new_tokens,
            "decode hit iteration bound without terminal token"
        );
        Ok(GeneratedSequence {
            ids,
            stop: StopReason::MaxTokensHit,
        })
    }
}

/// Index of the maximum logit, keeping the first maximum found.
///
/// The linear scan is the tie-break contract: equal scores resolve to the
/// lowest id.
fn argmax(logits: ArrayView1<'_, f32>) -> TokenId {
    let mut best_idx = 0usize;
    let mut best_val = f32::NEG_INFINITY;
    for (i, &v) in logits.iter().enumerate() {
        if v > best_val {
            best_val = v;
            best_idx = i;
        }
    }
    best_idx as TokenId
}

//! Subword codec
//!
//! Wraps a raw [`TextEncoder`] and applies the framing policy the model
//! expects: eos appending and right-truncation on the source side,
//! special-token stripping on the target side.

use nmt_core::{Result, TextEncoder, TokenId};
use tracing::debug;

use crate::config::ModelConfig;

/// Source/target codec over a raw subword tokenizer.
pub struct SubwordCodec<T: TextEncoder> {
    tokenizer: T,
    pad_id: TokenId,
    eos_id: TokenId,
    decoder_start_id: TokenId,
    max_source_tokens: usize,
}

impl<T: TextEncoder> SubwordCodec<T> {
    pub fn new(tokenizer: T, config: &ModelConfig) -> Self {
        Self {
            tokenizer,
            pad_id: config.pad_token_id,
            eos_id: config.eos_token_id,
            decoder_start_id: config.decoder_start_token_id,
            max_source_tokens: config.max_source_tokens,
        }
    }

    /// Encode source text into the id sequence the encoder consumes.
    ///
    /// An empty raw tokenization stays empty (the caller treats it as
    /// nothing to translate). Otherwise the eos id is appended and the
    /// sequence is truncated from the right to `max_source_tokens`.
    ///
    /// Known truncation edge case: when the raw tokenization alone
    /// already fills the budget, the token dropped is the appended eos,
    /// never a content token. Intentional and pinned by tests; do not
    /// special-case it without re-checking against the exported model.
    pub fn encode(&self, text: &str) -> Result<Vec<TokenId>> {
        let mut ids = self.tokenizer.encode(text)?;
        if ids.is_empty() {
            return Ok(ids);
        }
        ids.push(self.eos_id);
        if ids.len() > self.max_source_tokens {
            debug!(
                raw = ids.len(),
                budget = self.max_source_tokens,
                "truncating source sequence"
            );
            ids.truncate(self.max_source_tokens);
        }
        Ok(ids)
    }

    /// Decode a generated id sequence back into text.
    ///
    /// Drops a single leading decoder-start id if present, then strips
    /// trailing pad/eos ids. If nothing remains, the translation is the
    /// empty string. The remaining content ids are detokenized verbatim.
    pub fn decode(&self, ids: &[TokenId]) -> Result<String> {
        let mut start = 0;
        if ids.first() == Some(&self.decoder_start_id) {
            start = 1;
        }
        let mut end = ids.len();
        while end > start {
            let id = ids[end - 1];
            if id == self.pad_id || id == self.eos_id {
                end -= 1;
            } else {
                break;
            }
        }
        if end <= start {
            return Ok(String::new());
        }
        self.tokenizer.decode(&ids[start..end])
    }

    /// Backend name of the wrapped tokenizer, for logging.
    pub fn tokenizer_name(&self) -> &str {
        self.tokenizer.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nmt_core::Error;

    /// Tokenizer stub: one id per whitespace-separated word, decode joins
    /// ids back as `t<id>` words.
    struct WordTokenizer;

    impl TextEncoder for WordTokenizer {
        fn encode(&self, text: &str) -> Result<Vec<TokenId>> {
            Ok(text
                .split_whitespace()
                .enumerate()
                .map(|(i, _)| 10 + i as TokenId)
                .collect())
        }

        fn decode(&self, ids: &[TokenId]) -> Result<String> {
            if ids.iter().any(|&id| id < 0) {
                return Err(Error::Tokenizer("negative id".into()));
            }
            Ok(ids
                .iter()
                .map(|id| format!("t{id}"))
                .collect::<Vec<_>>()
                .join(" "))
        }

        fn name(&self) -> &str {
            "word-stub"
        }
    }

    fn codec(max_source_tokens: usize) -> SubwordCodec<WordTokenizer> {
        let config = ModelConfig {
            pad_token_id: 3,
            eos_token_id: 2,
            decoder_start_token_id: 3,
            max_source_tokens,
            max_new_tokens: 8,
        };
        SubwordCodec::new(WordTokenizer, &config)
    }

    #[test]
    fn encode_appends_eos() {
        let ids = codec(128).encode("a b").unwrap();
        assert_eq!(ids, vec![10, 11, 2]);
    }

    #[test]
    fn encode_empty_stays_empty() {
        assert!(codec(128).encode("").unwrap().is_empty());
    }

    #[test]
    fn encode_budget_full_drops_eos_not_content() {
        // Raw tokenization already fills the budget: the appended eos is
        // what gets truncated, the last content token survives.
        let ids = codec(3).encode("a b c").unwrap();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn encode_truncates_overlong_input() {
        let ids = codec(3).encode("a b c d e").unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn decode_strips_start_and_trailing_specials() {
        let out = codec(128).decode(&[3, 20, 21, 2, 3, 3]).unwrap();
        assert_eq!(out, "t20 t21");
    }

    #[test]
    fn decode_start_plus_eos_is_empty() {
        assert_eq!(codec(128).decode(&[3, 2]).unwrap(), "");
    }

    #[test]
    fn decode_empty_is_empty() {
        assert_eq!(codec(128).decode(&[]).unwrap(), "");
    }

    #[test]
    fn decode_keeps_interior_specials() {
        // Only *trailing* pad/eos are stripped; an interior pad is content
        // as far as the codec is concerned.
        let out = codec(128).decode(&[3, 20, 3, 21]).unwrap();
        assert_eq!(out, "t20 t3 t21");
    }

    #[test]
    fn decode_without_leading_start() {
        let out = codec(128).decode(&[20, 21, 2]).unwrap();
        assert_eq!(out, "t20 t21");
    }
}

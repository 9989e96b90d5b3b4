//! HuggingFace `tokenizers` backend
//!
//! [`TextEncoder`] implementation over a pretrained `tokenizer.json`
//! artifact. The artifact must be the one the model weights were exported
//! with; the segmentation scheme is a property of the artifact, not of
//! this code.

use std::path::Path;

use nmt_core::{Error, Result, TextEncoder, TokenId};
use tokenizers::Tokenizer;
use tracing::info;

/// Pretrained subword tokenizer loaded from a `tokenizer.json` file.
pub struct HfTokenizer {
    inner: Tokenizer,
}

impl HfTokenizer {
    /// Load the tokenizer artifact, failing with an asset-missing error
    /// if the file is absent.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::AssetMissing(path.to_path_buf()));
        }
        let inner = Tokenizer::from_file(path)
            .map_err(|e| Error::Tokenizer(format!("failed to load {}: {e}", path.display())))?;
        info!("loaded tokenizer from {}", path.display());
        Ok(Self { inner })
    }
}

impl TextEncoder for HfTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<TokenId>> {
        // Raw ids only: the codec owns eos framing and truncation.
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| Error::Tokenizer(e.to_string()))?;
        Ok(encoding.get_ids().iter().map(|&id| id as TokenId).collect())
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String> {
        let ids: Vec<u32> = ids
            .iter()
            .map(|&id| {
                u32::try_from(id).map_err(|_| Error::Tokenizer(format!("invalid token id {id}")))
            })
            .collect::<Result<_>>()?;
        self.inner
            .decode(&ids, true)
            .map_err(|e| Error::Tokenizer(e.to_string()))
    }

    fn name(&self) -> &str {
        "hf-tokenizers"
    }
}

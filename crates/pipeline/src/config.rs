//! Model configuration
//!
//! Reserved token ids and capacity limits for the opus-mt-zh-en export.
//! Loaded once from the model directory's `config.json` (HuggingFace
//! layout, unknown fields ignored); a missing file means the documented
//! defaults. Read-only after load.

use std::fs;
use std::path::Path;

use nmt_core::{Error, Result, TokenId};
use serde::Deserialize;
use tracing::{debug, info};

/// Encoder graph file name inside the model directory.
pub const ENCODER_FILE: &str = "encoder.onnx";
/// Decoder graph file name inside the model directory.
pub const DECODER_FILE: &str = "decoder.onnx";
/// Tokenizer artifact file name inside the model directory.
pub const TOKENIZER_FILE: &str = "tokenizer.json";
/// Model configuration file name inside the model directory.
pub const CONFIG_FILE: &str = "config.json";

/// Static model configuration.
///
/// Defaults match the opus-mt-zh-en export: Marian models share one
/// reserved id (65000) for pad and decoder-start, and use 0 for eos.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub pad_token_id: TokenId,
    pub eos_token_id: TokenId,
    pub decoder_start_token_id: TokenId,
    /// Source-side token budget, eos included.
    pub max_source_tokens: usize,
    /// Upper bound on generated tokens per request; the safety net that
    /// guarantees decode-loop termination for degenerate models.
    pub max_new_tokens: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            pad_token_id: 65000,
            eos_token_id: 0,
            decoder_start_token_id: 65000,
            max_source_tokens: 128,
            max_new_tokens: 64,
        }
    }
}

impl ModelConfig {
    /// Load the configuration from `<model_dir>/config.json`.
    ///
    /// A missing file yields the defaults; a file that exists but does
    /// not parse is a configuration error rather than a silent fallback.
    pub fn from_model_dir(model_dir: impl AsRef<Path>) -> Result<Self> {
        let path = model_dir.as_ref().join(CONFIG_FILE);
        let config = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
            let config: ModelConfig = serde_json::from_str(&raw)
                .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;
            info!(
                pad = config.pad_token_id,
                eos = config.eos_token_id,
                decoder_start = config.decoder_start_token_id,
                "loaded model config from {}",
                path.display()
            );
            config
        } else {
            debug!("no {} present, using defaults", path.display());
            ModelConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot operate under.
    pub fn validate(&self) -> Result<()> {
        if self.max_source_tokens == 0 {
            return Err(Error::Config("max_source_tokens must be > 0".into()));
        }
        if self.max_new_tokens == 0 {
            return Err(Error::Config("max_new_tokens must be > 0".into()));
        }
        if self.pad_token_id < 0 || self.eos_token_id < 0 || self.decoder_start_token_id < 0 {
            return Err(Error::Config("reserved token ids must be non-negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_match_opus_mt_zh_en() {
        let config = ModelConfig::default();
        assert_eq!(config.pad_token_id, 65000);
        assert_eq!(config.eos_token_id, 0);
        assert_eq!(config.decoder_start_token_id, 65000);
        assert_eq!(config.max_source_tokens, 128);
        assert_eq!(config.max_new_tokens, 64);
    }

    #[test]
    fn loads_ids_from_config_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"pad_token_id": 3, "eos_token_id": 2, "decoder_start_token_id": 3,
                "architectures": ["MarianMTModel"], "d_model": 512}"#,
        )
        .unwrap();

        let config = ModelConfig::from_model_dir(dir.path()).unwrap();
        assert_eq!(config.pad_token_id, 3);
        assert_eq!(config.eos_token_id, 2);
        assert_eq!(config.decoder_start_token_id, 3);
        // Unspecified limits keep their defaults
        assert_eq!(config.max_source_tokens, 128);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelConfig::from_model_dir(dir.path()).unwrap();
        assert_eq!(config.pad_token_id, ModelConfig::default().pad_token_id);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{not json").unwrap();
        assert!(matches!(
            ModelConfig::from_model_dir(dir.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn zero_budgets_rejected() {
        let config = ModelConfig {
            max_new_tokens: 0,
            ..ModelConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ModelConfig {
            max_source_tokens: 0,
            ..ModelConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

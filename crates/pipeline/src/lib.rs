//! zh→en translation pipeline
//!
//! Single-pass Chinese→English neural translation over a pretrained
//! Marian-style encoder/decoder pair exported to ONNX:
//!
//! - `config`: model configuration (`config.json` + documented defaults)
//! - `codec`: subword codec (eos framing, truncation, special stripping)
//! - `decoder`: autoregressive greedy decode loop
//! - `hf`: `tokenizers`-backed `TextEncoder` implementation
//! - `onnx`: ort-backed `SequenceModel` (feature `onnx`)
//! - `translator`: orchestrator exposing `translate(text) -> text`
//!
//! Control flow per request is strictly sequential and single-shot:
//! gate → encode → encoder → decode loop → detokenize. No state is held
//! across calls.

pub mod codec;
pub mod config;
pub mod decoder;
pub mod hf;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod translator;

pub use codec::SubwordCodec;
pub use config::ModelConfig;
pub use decoder::GreedyDecoder;
pub use hf::HfTokenizer;
#[cfg(feature = "onnx")]
pub use onnx::OrtSequenceModel;
pub use translator::Translator;

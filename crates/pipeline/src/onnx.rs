//! ONNX Runtime sequence model
//!
//! [`SequenceModel`] implementation over the exported Marian graphs:
//! `encoder.onnx` (input_ids, attention_mask → last_hidden_state) and
//! `decoder.onnx` (input_ids, encoder_hidden_states,
//! encoder_attention_mask → logits). Sessions are loaded once and shared
//! behind mutexes; every call owns its tensors.

use std::path::Path;

use ndarray::{Array2, Array3};
use nmt_core::{Error, Result, SequenceModel, TokenId};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use parking_lot::Mutex;
use tracing::info;

/// Marian encoder/decoder pair on ONNX Runtime.
pub struct OrtSequenceModel {
    encoder: Mutex<Session>,
    decoder: Mutex<Session>,
}

impl OrtSequenceModel {
    /// Load both computation graphs, failing with an asset-missing error
    /// if either file is absent.
    pub fn from_files(
        encoder_path: impl AsRef<Path>,
        decoder_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let encoder_path = encoder_path.as_ref();
        let decoder_path = decoder_path.as_ref();
        for path in [encoder_path, decoder_path] {
            if !path.exists() {
                return Err(Error::AssetMissing(path.to_path_buf()));
            }
        }

        let encoder = Self::load_session(encoder_path)?;
        let decoder = Self::load_session(decoder_path)?;
        info!(
            encoder = %encoder_path.display(),
            decoder = %decoder_path.display(),
            "loaded ONNX translation sessions"
        );

        Ok(Self {
            encoder: Mutex::new(encoder),
            decoder: Mutex::new(decoder),
        })
    }

    fn load_session(path: &Path) -> Result<Session> {
        Session::builder()
            .map_err(|e| Error::Model(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::Model(e.to_string()))?
            .with_intra_threads(1)
            .map_err(|e| Error::Model(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| Error::Model(e.to_string()))
    }

    fn batch_of_one(ids: &[TokenId]) -> Result<Array2<i64>> {
        Array2::from_shape_vec((1, ids.len()), ids.to_vec())
            .map_err(|e| Error::Model(e.to_string()))
    }

    /// Reassemble an extracted output as a 3-D f32 tensor.
    fn to_array3(dims: &[usize], data: &[f32], name: &str) -> Result<Array3<f32>> {
        if dims.len() != 3 || data.len() != dims[0] * dims[1] * dims[2] {
            return Err(Error::Model(format!(
                "output {name} has malformed shape {dims:?} for {} values",
                data.len()
            )));
        }
        Array3::from_shape_vec((dims[0], dims[1], dims[2]), data.to_vec())
            .map_err(|e| Error::Model(e.to_string()))
    }
}

impl SequenceModel for OrtSequenceModel {
    fn encode(
        &self,
        input_ids: &[TokenId],
        attention_mask: &[TokenId],
    ) -> Result<Array3<f32>> {
        let ids_tensor = Tensor::from_array(Self::batch_of_one(input_ids)?)
            .map_err(|e| Error::Model(e.to_string()))?;
        let mask_tensor = Tensor::from_array(Self::batch_of_one(attention_mask)?)
            .map_err(|e| Error::Model(e.to_string()))?;

        let mut session = self.encoder.lock();
        let outputs = session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
            ])
            .map_err(|e| Error::Model(e.to_string()))?;

        let (shape, data) = outputs
            .get("last_hidden_state")
            .ok_or_else(|| Error::Model("missing output tensor last_hidden_state".into()))?
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Model(e.to_string()))?;
        let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        Self::to_array3(&dims, data, "last_hidden_state")
    }

    fn decode_step(
        &self,
        output_ids: &[TokenId],
        encoder_hidden_states: &Array3<f32>,
        encoder_attention_mask: &[TokenId],
    ) -> Result<Array3<f32>> {
        let ids_tensor = Tensor::from_array(Self::batch_of_one(output_ids)?)
            .map_err(|e| Error::Model(e.to_string()))?;
        // The hidden states are identical every step; the graph takes them
        // by value, so each call gets its own copy.
        let hidden_tensor = Tensor::from_array(encoder_hidden_states.clone())
            .map_err(|e| Error::Model(e.to_string()))?;
        let mask_tensor = Tensor::from_array(Self::batch_of_one(encoder_attention_mask)?)
            .map_err(|e| Error::Model(e.to_string()))?;

        let mut session = self.decoder.lock();
        let outputs = session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "encoder_hidden_states" => hidden_tensor,
                "encoder_attention_mask" => mask_tensor,
            ])
            .map_err(|e| Error::Model(e.to_string()))?;

        let (shape, data) = outputs
            .get("logits")
            .ok_or_else(|| Error::Model("missing output tensor logits".into()))?
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Model(e.to_string()))?;
        let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        Self::to_array3(&dims, data, "logits")
    }

    fn name(&self) -> &str {
        "ort-marian"
    }
}

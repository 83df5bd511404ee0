use candle_core::{DType, Device, Result, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

/// BERT encoder with attention-masked mean pooling (sentence-transformers layout).
pub(crate) struct MeanPooledBert {
    bert: BertModel,
    hidden_size: usize,
}

impl MeanPooledBert {
    pub(crate) fn load(config_path: &Path, weights_path: &Path, device: &Device) -> Result<Self> {
        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle_core::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let weights = [weights_path.to_path_buf()];
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&weights, DType::F32, device)? };

        // Exports differ on whether the encoder weights sit under a `bert.` prefix.
        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &config)?
        } else {
            BertModel::load(vb, &config)?
        };

        Ok(Self {
            bert,
            hidden_size: config.hidden_size,
        })
    }

    pub(crate) fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Runs one sequence and returns its mean-pooled hidden state (not normalized).
    pub(crate) fn embed(
        &self,
        token_ids: &[u32],
        type_ids: &[u32],
        attention_mask: &[u32],
        device: &Device,
    ) -> Result<Vec<f32>> {
        let input_ids = Tensor::new(token_ids, device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(type_ids, device)?.unsqueeze(0)?;
        let mask = Tensor::new(attention_mask, device)?.unsqueeze(0)?;

        // [1, seq_len, hidden]
        let hidden = self
            .bert
            .forward(&input_ids, &token_type_ids, Some(&mask))?;

        // [1, seq_len, 1]
        let mask = mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        // [CLS] and [SEP] are always unmasked, so the count is never zero.
        let counts = mask.sum(1)?;
        let pooled = summed.broadcast_div(&counts)?;

        pooled.squeeze(0)?.to_vec1::<f32>()
    }
}

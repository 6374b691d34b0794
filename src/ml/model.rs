use burn::{
    nn::{
        gru::{Gru, GruConfig},
        loss::CrossEntropyLossConfig,
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{relu, softmax},
};

use crate::domain::error::PipelineError;
use crate::domain::topology::Topology;

#[derive(Config, Debug)]
pub struct Seq2SeqConfig {
    pub topology:          Topology,
    pub source_vocab_size: usize,
    pub target_vocab_size: usize,
    pub max_length:        usize,
    /// Units per recurrent direction.
    pub hidden_size:       usize,
    #[config(default = 256)]
    pub embedding_dim:     usize,
    #[config(default = 1024)]
    pub dense_size:        usize,
    #[config(default = 0.5)]
    pub dropout:           f64,
}

impl Seq2SeqConfig {
    /// The standard hyperparameters for `topology`.
    pub fn for_topology(
        topology:          Topology,
        source_vocab_size: usize,
        target_vocab_size: usize,
        max_length:        usize,
    ) -> Self {
        Self::new(
            topology,
            source_vocab_size,
            target_vocab_size,
            max_length,
            topology.hidden_size(),
        )
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        let sizes = [
            ("source_vocab_size", self.source_vocab_size),
            ("target_vocab_size", self.target_vocab_size),
            ("max_length",        self.max_length),
            ("hidden_size",       self.hidden_size),
            ("embedding_dim",     self.embedding_dim),
            ("dense_size",        self.dense_size),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| *v == 0) {
            return Err(PipelineError::InvalidConfig(format!("{name} must be positive")));
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return Err(PipelineError::InvalidConfig(format!(
                "dropout {} is outside [0, 1)",
                self.dropout
            )));
        }
        Ok(())
    }

    pub fn recurrent_output_size(&self) -> usize {
        if self.topology.is_bidirectional() {
            self.hidden_size * 2
        } else {
            self.hidden_size
        }
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> Seq2SeqModel<B> {
        let (embedding, rnn_input) = if self.topology.uses_embedding() {
            let embedding = EmbeddingConfig::new(self.source_vocab_size, self.embedding_dim)
                .init(device);
            (Some(embedding), self.embedding_dim)
        } else {
            // each time step sees its token id as a single feature
            (None, 1)
        };

        let forward_rnn  = GruConfig::new(rnn_input, self.hidden_size, true).init(device);
        let backward_rnn = self
            .topology
            .is_bidirectional()
            .then(|| GruConfig::new(rnn_input, self.hidden_size, true).init(device));

        let dense      = LinearConfig::new(self.recurrent_output_size(), self.dense_size).init(device);
        let dropout    = DropoutConfig::new(self.dropout).init();
        let projection = LinearConfig::new(self.dense_size, self.target_vocab_size).init(device);

        Seq2SeqModel {
            embedding, forward_rnn, backward_rnn,
            dense, dropout, projection,
            max_length: self.max_length,
        }
    }
}

/// Recurrent sequence-to-sequence network.
///
/// ```text
/// ids [B, L] ─► (embedding | ids as [B, L, 1])
///            ─► GRU (→) [+ GRU (←), concatenated per step]
///            ─► Dense(1024) ReLU ─► Dropout ─► Dense(target_vocab)
///            ─► logits [B, L, target_vocab]
/// ```
#[derive(Module, Debug)]
pub struct Seq2SeqModel<B: Backend> {
    pub embedding:    Option<Embedding<B>>,
    pub forward_rnn:  Gru<B>,
    pub backward_rnn: Option<Gru<B>>,
    pub dense:        Linear<B>,
    pub dropout:      Dropout,
    pub projection:   Linear<B>,
    pub max_length:   usize,
}

pub struct Seq2SeqOutput<B: Backend> {
    pub loss:   Tensor<B, 1>,
    pub logits: Tensor<B, 3>,
}

impl<B: Backend> Seq2SeqModel<B> {
    /// input: [batch, seq_len] → logits: [batch, seq_len, target_vocab]
    pub fn forward(&self, input: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let x = match &self.embedding {
            Some(embedding) => embedding.forward(input),
            None            => input.float().unsqueeze_dim::<3>(2),
        };
        let x = self.recurrent(x);
        let x = relu(self.dense.forward(x));
        let x = self.dropout.forward(x);
        self.projection.forward(x)
    }

    /// Per-position probability distributions over the target vocabulary.
    pub fn predict(&self, input: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        softmax(self.forward(input), 2)
    }

    /// Mean token-level cross-entropy against integer labels [batch, seq_len].
    pub fn forward_loss(&self, input: Tensor<B, 2, Int>, targets: Tensor<B, 2, Int>) -> Seq2SeqOutput<B> {
        let logits = self.forward(input);
        let [batch, len, vocab] = logits.dims();

        let loss = CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(
                logits.clone().reshape([batch * len, vocab]),
                targets.reshape([batch * len]),
            );

        Seq2SeqOutput { loss, logits }
    }

    /// Reject inputs padded to a different width than the model was built for.
    pub fn check_width(&self, width: usize) -> Result<(), PipelineError> {
        if width != self.max_length {
            return Err(PipelineError::shape("input sequence width", self.max_length, width));
        }
        Ok(())
    }

    /// Compare parameter shapes with the sizes `config` describes.
    /// Loading a record does not check shapes itself.
    pub fn check_shapes(&self, config: &Seq2SeqConfig) -> Result<(), PipelineError> {
        check_dims(
            "projection weight",
            [config.dense_size, config.target_vocab_size],
            self.projection.weight.val().dims(),
        )?;
        check_dims(
            "dense weight",
            [config.recurrent_output_size(), config.dense_size],
            self.dense.weight.val().dims(),
        )?;
        match &self.embedding {
            Some(embedding) => check_dims(
                "embedding weight",
                [config.source_vocab_size, config.embedding_dim],
                embedding.weight.val().dims(),
            ),
            None => Ok(()),
        }
    }

    fn recurrent(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let forward = self.forward_rnn.forward(x.clone(), None);
        match &self.backward_rnn {
            Some(backward) => {
                // run over the reversed sequence, then restore step order
                let backward = backward.forward(x.flip([1]), None).flip([1]);
                Tensor::cat(vec![forward, backward], 2)
            }
            None => forward,
        }
    }
}

fn check_dims(what: &'static str, expected: [usize; 2], actual: [usize; 2]) -> Result<(), PipelineError> {
    for (e, a) in expected.into_iter().zip(actual) {
        if e != a {
            return Err(PipelineError::shape(what, e, a));
        }
    }
    Ok(())
}

/// (correct, total) arg-max predictions over every position,
/// padding included.
pub fn token_accuracy<B: Backend>(logits: Tensor<B, 3>, targets: Tensor<B, 2, Int>) -> (usize, usize) {
    let [batch, len, _] = logits.dims();
    let predicted = logits.argmax(2).reshape([batch * len]);
    let expected  = targets.reshape([batch * len]);
    let correct: i64 = predicted
        .equal(expected)
        .int().sum().into_scalar().elem::<i64>();
    (correct as usize, batch * len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::TensorData;

    type B = NdArray;

    fn ids(rows: &[&[i64]]) -> Tensor<B, 2, Int> {
        let width = rows[0].len();
        let flat: Vec<i64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Tensor::from_data(TensorData::new(flat, [rows.len(), width]), &Default::default())
    }

    #[test]
    fn test_output_shape_for_every_topology() {
        let device = Default::default();
        for topology in Topology::ALL {
            let model: Seq2SeqModel<B> =
                Seq2SeqConfig::for_topology(topology, 200, 345, 21).init(&device);
            let input = Tensor::<B, 2, Int>::zeros([2, 21], &device);
            assert_eq!(model.forward(input).dims(), [2, 21, 345], "{topology}");
        }
    }

    #[test]
    fn test_predict_rows_are_distributions() {
        let device = Default::default();
        let model: Seq2SeqModel<B> =
            Seq2SeqConfig::for_topology(Topology::Bidirectional, 10, 12, 4).init(&device);
        let probs = model.predict(ids(&[&[1, 2, 3, 0]]));
        let sums: Vec<f32> = probs.sum_dim(2).into_data().iter::<f32>().collect();
        assert_eq!(sums.len(), 4);
        for s in sums {
            assert!((s - 1.0).abs() < 1e-4, "row sums to {s}");
        }
    }

    #[test]
    fn test_inference_backend_is_deterministic() {
        let device = Default::default();
        let model: Seq2SeqModel<B> =
            Seq2SeqConfig::for_topology(Topology::EmbeddingBidirectional, 10, 8, 5).init(&device);
        let input = ids(&[&[1, 2, 3, 4, 0], &[5, 6, 0, 0, 0]]);
        let a: Vec<f32> = model.forward(input.clone()).into_data().iter::<f32>().collect();
        let b: Vec<f32> = model.forward(input).into_data().iter::<f32>().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_loss_is_finite_and_positive() {
        let device = Default::default();
        let model: Seq2SeqModel<B> =
            Seq2SeqConfig::for_topology(Topology::Plain, 6, 7, 3).init(&device);
        let out = model.forward_loss(ids(&[&[1, 2, 3]]), ids(&[&[4, 5, 0]]));
        let loss = out.loss.into_scalar().elem::<f64>();
        assert!(loss.is_finite() && loss > 0.0);
        assert_eq!(out.logits.dims(), [1, 3, 7]);
    }

    #[test]
    fn test_token_accuracy_counts_matches() {
        let device = Default::default();
        // position 0 favours id 1, position 1 favours id 0
        let logits = Tensor::<B, 3>::from_data(
            TensorData::new(vec![0.1f32, 0.9, 0.8, 0.2], [1, 2, 2]),
            &device,
        );
        assert_eq!(token_accuracy(logits.clone(), ids(&[&[1, 0]])), (2, 2));
        assert_eq!(token_accuracy(logits, ids(&[&[1, 1]])), (1, 2));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cfg = Seq2SeqConfig::for_topology(Topology::Plain, 0, 7, 3);
        assert!(cfg.validate().is_err());
        let cfg = Seq2SeqConfig::for_topology(Topology::Plain, 5, 7, 3).with_dropout(1.0);
        assert!(cfg.validate().is_err());
        let cfg = Seq2SeqConfig::for_topology(Topology::Plain, 5, 7, 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_check_shapes_against_other_config() {
        let device = Default::default();
        let config = Seq2SeqConfig::for_topology(Topology::EmbeddingBidirectional, 5, 7, 3)
            .with_dense_size(16);
        let model: Seq2SeqModel<B> = config.init(&device);
        assert!(model.check_shapes(&config).is_ok());

        let wider_target = Seq2SeqConfig { target_vocab_size: 9, ..config.clone() };
        assert!(matches!(
            model.check_shapes(&wider_target),
            Err(PipelineError::ShapeMismatch { what: "projection weight", expected: 9, actual: 7 })
        ));

        let wider_source = Seq2SeqConfig { source_vocab_size: 6, ..config };
        assert!(matches!(
            model.check_shapes(&wider_source),
            Err(PipelineError::ShapeMismatch { what: "embedding weight", expected: 6, actual: 5 })
        ));
    }

    #[test]
    fn test_check_width() {
        let model: Seq2SeqModel<B> =
            Seq2SeqConfig::for_topology(Topology::Plain, 5, 7, 3).init(&Default::default());
        assert!(model.check_width(3).is_ok());
        assert!(model.check_width(4).is_err());
    }
}

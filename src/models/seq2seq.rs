use serde::Deserialize;

use crate::error::ModelLoadError;

pub const EMB_DIM: usize = 128;
pub const HID_DIM: usize = 256;

/// LSTM (hidden, cell) carried between decode steps. Owned by one decode call.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelState {
    hidden: Vec<f32>,
    cell: Vec<f32>,
}

impl ModelState {
    #[must_use]
    pub fn zeros(hidden_dim: usize) -> Self {
        Self {
            hidden: vec![0.0; hidden_dim],
            cell: vec![0.0; hidden_dim],
        }
    }
}

/// Encoder/decoder pair driven by the greedy decode loop.
pub trait GlossModel: Send + Sync {
    fn encode(&self, source: &[usize]) -> ModelState;

    /// Returns logits over the output vocabulary and the next state.
    fn decode_step(&self, input: usize, state: ModelState) -> (Vec<f32>, ModelState);
}

/// Weight blob, keyed by the PyTorch state-dict names of the trained model.
#[derive(Debug, Deserialize)]
pub struct Seq2SeqWeights {
    #[serde(rename = "encoder.embedding.weight")]
    pub encoder_embedding: Vec<Vec<f32>>,
    #[serde(rename = "encoder.lstm.weight_ih_l0")]
    pub encoder_weight_ih: Vec<Vec<f32>>,
    #[serde(rename = "encoder.lstm.weight_hh_l0")]
    pub encoder_weight_hh: Vec<Vec<f32>>,
    #[serde(rename = "encoder.lstm.bias_ih_l0")]
    pub encoder_bias_ih: Vec<f32>,
    #[serde(rename = "encoder.lstm.bias_hh_l0")]
    pub encoder_bias_hh: Vec<f32>,

    #[serde(rename = "decoder.embedding.weight")]
    pub decoder_embedding: Vec<Vec<f32>>,
    #[serde(rename = "decoder.lstm.weight_ih_l0")]
    pub decoder_weight_ih: Vec<Vec<f32>>,
    #[serde(rename = "decoder.lstm.weight_hh_l0")]
    pub decoder_weight_hh: Vec<Vec<f32>>,
    #[serde(rename = "decoder.lstm.bias_ih_l0")]
    pub decoder_bias_ih: Vec<f32>,
    #[serde(rename = "decoder.lstm.bias_hh_l0")]
    pub decoder_bias_hh: Vec<f32>,
    #[serde(rename = "decoder.fc_out.weight")]
    pub fc_out_weight: Vec<Vec<f32>>,
    #[serde(rename = "decoder.fc_out.bias")]
    pub fc_out_bias: Vec<f32>,
}

#[derive(Clone, Debug)]
struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    fn from_rows(
        name: &'static str,
        rows: Vec<Vec<f32>>,
        expect_rows: usize,
        expect_cols: usize,
    ) -> Result<Self, ModelLoadError> {
        let found_cols = rows.first().map_or(0, Vec::len);
        if rows.len() != expect_rows || rows.iter().any(|r| r.len() != expect_cols) {
            return Err(ModelLoadError::Shape {
                name,
                expected: format!("{expect_rows}x{expect_cols}"),
                found: format!("{}x{found_cols}", rows.len()),
            });
        }
        Ok(Self {
            rows: expect_rows,
            cols: expect_cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    fn row(&self, r: usize) -> Option<&[f32]> {
        if r >= self.rows {
            return None;
        }
        Some(&self.data[r * self.cols..(r + 1) * self.cols])
    }

    /// out += self * x
    fn matvec_acc(&self, x: &[f32], out: &mut [f32]) {
        for (r, acc) in out.iter_mut().enumerate().take(self.rows) {
            let row = &self.data[r * self.cols..(r + 1) * self.cols];
            *acc += row.iter().zip(x).map(|(w, v)| w * v).sum::<f32>();
        }
    }
}

fn check_len(name: &'static str, v: &[f32], expect: usize) -> Result<(), ModelLoadError> {
    if v.len() != expect {
        return Err(ModelLoadError::Shape {
            name,
            expected: expect.to_string(),
            found: v.len().to_string(),
        });
    }
    Ok(())
}

#[derive(Clone, Debug)]
struct Lstm {
    hidden: usize,
    weight_ih: Matrix,
    weight_hh: Matrix,
    bias: Vec<f32>,
}

impl Lstm {
    #[allow(clippy::too_many_arguments)]
    fn new(
        names: [&'static str; 4],
        weight_ih: Vec<Vec<f32>>,
        weight_hh: Vec<Vec<f32>>,
        bias_ih: Vec<f32>,
        bias_hh: Vec<f32>,
        input: usize,
        hidden: usize,
    ) -> Result<Self, ModelLoadError> {
        let gates = 4 * hidden;
        let weight_ih = Matrix::from_rows(names[0], weight_ih, gates, input)?;
        let weight_hh = Matrix::from_rows(names[1], weight_hh, gates, hidden)?;
        check_len(names[2], &bias_ih, gates)?;
        check_len(names[3], &bias_hh, gates)?;
        let bias = bias_ih.iter().zip(&bias_hh).map(|(a, b)| a + b).collect();
        Ok(Self {
            hidden,
            weight_ih,
            weight_hh,
            bias,
        })
    }

    // Gate layout follows torch.nn.LSTM: input, forget, cell, output.
    fn step(&self, x: &[f32], state: ModelState) -> ModelState {
        let h = self.hidden;
        let mut gates = self.bias.clone();
        self.weight_ih.matvec_acc(x, &mut gates);
        self.weight_hh.matvec_acc(&state.hidden, &mut gates);

        let mut hidden = vec![0.0; h];
        let mut cell = vec![0.0; h];
        for j in 0..h {
            let i = sigmoid(gates[j]);
            let f = sigmoid(gates[h + j]);
            let g = gates[2 * h + j].tanh();
            let o = sigmoid(gates[3 * h + j]);
            cell[j] = f * state.cell[j] + i * g;
            hidden[j] = o * cell[j].tanh();
        }
        ModelState { hidden, cell }
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Index of the largest value; the lowest index wins ties and NaN never wins.
/// `None` for an empty slice. Softmax preserves this order, so decoding picks
/// straight from the logits and an infinite logit still wins.
#[must_use]
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ if v.is_nan() => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Embedding + single-layer LSTM encoder, Embedding + LSTM + Linear decoder.
#[derive(Clone, Debug)]
pub struct Seq2SeqModel {
    encoder_embedding: Matrix,
    encoder: Lstm,
    decoder_embedding: Matrix,
    decoder: Lstm,
    fc_out: Matrix,
    fc_bias: Vec<f32>,
}

impl Seq2SeqModel {
    pub fn from_weights(
        w: Seq2SeqWeights,
        input_vocab: usize,
        output_vocab: usize,
    ) -> Result<Self, ModelLoadError> {
        let emb_dim = w.encoder_embedding.first().map_or(EMB_DIM, Vec::len);
        let hid_dim = w.encoder_weight_hh.first().map_or(HID_DIM, Vec::len);

        let encoder_embedding = Matrix::from_rows(
            "encoder.embedding.weight",
            w.encoder_embedding,
            input_vocab,
            emb_dim,
        )?;
        let encoder = Lstm::new(
            [
                "encoder.lstm.weight_ih_l0",
                "encoder.lstm.weight_hh_l0",
                "encoder.lstm.bias_ih_l0",
                "encoder.lstm.bias_hh_l0",
            ],
            w.encoder_weight_ih,
            w.encoder_weight_hh,
            w.encoder_bias_ih,
            w.encoder_bias_hh,
            emb_dim,
            hid_dim,
        )?;
        let decoder_embedding = Matrix::from_rows(
            "decoder.embedding.weight",
            w.decoder_embedding,
            output_vocab,
            emb_dim,
        )?;
        let decoder = Lstm::new(
            [
                "decoder.lstm.weight_ih_l0",
                "decoder.lstm.weight_hh_l0",
                "decoder.lstm.bias_ih_l0",
                "decoder.lstm.bias_hh_l0",
            ],
            w.decoder_weight_ih,
            w.decoder_weight_hh,
            w.decoder_bias_ih,
            w.decoder_bias_hh,
            emb_dim,
            hid_dim,
        )?;
        let fc_out = Matrix::from_rows("decoder.fc_out.weight", w.fc_out_weight, output_vocab, hid_dim)?;
        check_len("decoder.fc_out.bias", &w.fc_out_bias, output_vocab)?;

        Ok(Self {
            encoder_embedding,
            encoder,
            decoder_embedding,
            decoder,
            fc_out,
            fc_bias: w.fc_out_bias,
        })
    }

    fn embed<'a>(table: &'a Matrix, index: usize, zeros: &'a [f32]) -> &'a [f32] {
        table.row(index).unwrap_or(zeros)
    }
}

impl GlossModel for Seq2SeqModel {
    fn encode(&self, source: &[usize]) -> ModelState {
        let zeros = vec![0.0; self.encoder_embedding.cols];
        let mut state = ModelState::zeros(self.encoder.hidden);
        for &idx in source {
            let x = Self::embed(&self.encoder_embedding, idx, &zeros);
            state = self.encoder.step(x, state);
        }
        state
    }

    fn decode_step(&self, input: usize, state: ModelState) -> (Vec<f32>, ModelState) {
        let zeros = vec![0.0; self.decoder_embedding.cols];
        let x = Self::embed(&self.decoder_embedding, input, &zeros);
        let state = self.decoder.step(x, state);
        let mut logits = self.fc_bias.clone();
        self.fc_out.matvec_acc(&state.hidden, &mut logits);
        (logits, state)
    }
}

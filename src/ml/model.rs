use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ml::optimizer::RmsProp;

/// Shape of the classifier network.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub input_dim: usize,
    pub hidden_dim: usize,
    pub classes: usize,
    /// Seed for weight initialization; fixed seed, fixed weights.
    pub seed: u64,
}

/// A dense layer with its RMSprop accumulators.
#[derive(Debug, Clone)]
struct Dense {
    w: Array2<f32>,
    b: Array1<f32>,
    vw: Array2<f32>,
    vb: Array1<f32>,
}

impl Dense {
    /// Xavier-uniform initialization.
    fn new(input: usize, output: usize, rng: &mut StdRng) -> Self {
        let scale = (6.0 / (input + output) as f32).sqrt();
        Self {
            w: Array2::random_using((input, output), Uniform::new(-scale, scale), rng),
            b: Array1::zeros(output),
            vw: Array2::zeros((input, output)),
            vb: Array1::zeros(output),
        }
    }

    fn forward(&self, x: ArrayView2<f32>) -> Array2<f32> {
        x.dot(&self.w) + &self.b
    }

    fn update(&mut self, dw: &Array2<f32>, db: &Array1<f32>, opt: &RmsProp) {
        opt.step2(&mut self.w, &mut self.vw, dw);
        opt.step1(&mut self.b, &mut self.vb, db);
    }
}

/// Feed-forward softmax classifier:
/// `input → hidden ReLU → hidden ReLU → classes softmax`,
/// trained with categorical cross-entropy.
#[derive(Debug, Clone)]
pub struct Classifier {
    h1: Dense,
    h2: Dense,
    out: Dense,
}

impl Classifier {
    #[must_use]
    pub fn new(config: &ClassifierConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Self {
            h1: Dense::new(config.input_dim, config.hidden_dim, &mut rng),
            h2: Dense::new(config.hidden_dim, config.hidden_dim, &mut rng),
            out: Dense::new(config.hidden_dim, config.classes, &mut rng),
        }
    }

    /// Class probabilities for a batch, one row per sample.
    #[must_use]
    pub fn forward(&self, x: ArrayView2<f32>) -> Array2<f32> {
        let a1 = relu(&self.h1.forward(x));
        let a2 = relu(&self.h2.forward(a1.view()));
        softmax(&self.out.forward(a2.view()))
    }

    /// One gradient step on a batch; returns the batch loss.
    pub fn train_batch(
        &mut self,
        x: ArrayView2<f32>,
        y: ArrayView2<f32>,
        opt: &RmsProp,
    ) -> f32 {
        let n = x.nrows().max(1) as f32;
        let z1 = self.h1.forward(x);
        let a1 = relu(&z1);
        let z2 = self.h2.forward(a1.view());
        let a2 = relu(&z2);
        let probs = softmax(&self.out.forward(a2.view()));
        let loss = cross_entropy(&probs, y);

        // Softmax plus cross-entropy collapse to (p - y) / n.
        let dz3 = (&probs - &y) / n;
        let dw3 = a2.t().dot(&dz3);
        let db3 = dz3.sum_axis(Axis(0));
        let da2 = dz3.dot(&self.out.w.t());
        let dz2 = &da2 * &relu_mask(&z2);
        let dw2 = a1.t().dot(&dz2);
        let db2 = dz2.sum_axis(Axis(0));
        let da1 = dz2.dot(&self.h2.w.t());
        let dz1 = &da1 * &relu_mask(&z1);
        let dw1 = x.t().dot(&dz1);
        let db1 = dz1.sum_axis(Axis(0));

        self.out.update(&dw3, &db3, opt);
        self.h2.update(&dw2, &db2, opt);
        self.h1.update(&dw1, &db1, opt);
        loss
    }

    /// Mean loss and accuracy over a labelled set.
    #[must_use]
    pub fn evaluate(&self, x: ArrayView2<f32>, y: ArrayView2<f32>) -> (f32, f32) {
        let probs = self.forward(x);
        let loss = cross_entropy(&probs, y);
        let mut correct = 0usize;
        for (p_row, y_row) in probs.outer_iter().zip(y.outer_iter()) {
            if argmax(p_row) == argmax(y_row) {
                correct += 1;
            }
        }
        (loss, correct as f32 / x.nrows().max(1) as f32)
    }
}

fn relu(z: &Array2<f32>) -> Array2<f32> {
    z.mapv(|v| v.max(0.0))
}

fn relu_mask(z: &Array2<f32>) -> Array2<f32> {
    z.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 })
}

/// Row-wise softmax, shifted by the row max for numerical stability.
fn softmax(z: &Array2<f32>) -> Array2<f32> {
    let mut out = z.clone();
    for mut row in out.rows_mut() {
        let max = row.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
    out
}

/// Mean categorical cross-entropy.
fn cross_entropy(probs: &Array2<f32>, y: ArrayView2<f32>) -> f32 {
    let eps = 1e-7;
    let n = probs.nrows().max(1) as f32;
    let log_probs = probs.mapv(|p| (p + eps).ln());
    -(&y * &log_probs).sum() / n
}

fn argmax(row: ArrayView1<f32>) -> usize {
    let mut best = 0;
    let mut best_value = f32::NEG_INFINITY;
    for (i, &v) in row.iter().enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}

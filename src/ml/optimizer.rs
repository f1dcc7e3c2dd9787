use ndarray::{Array1, Array2, Zip};

/// RMSprop with the classic defaults (rho 0.9, epsilon 1e-7).
///
/// Stateless over parameters: each parameter owns its accumulator and
/// passes it in alongside the gradient.
#[derive(Debug, Clone)]
pub struct RmsProp {
    pub learning_rate: f32,
    pub rho: f32,
    pub epsilon: f32,
}

impl RmsProp {
    #[must_use]
    pub fn new(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            rho: 0.9,
            epsilon: 1e-7,
        }
    }

    /// One update step for a weight matrix.
    pub fn step2(&self, param: &mut Array2<f32>, cache: &mut Array2<f32>, grad: &Array2<f32>) {
        cache.zip_mut_with(grad, |c, &g| *c = self.rho * *c + (1.0 - self.rho) * g * g);
        Zip::from(param)
            .and(&*cache)
            .and(grad)
            .for_each(|p, &c, &g| *p -= self.learning_rate * g / (c.sqrt() + self.epsilon));
    }

    /// One update step for a bias vector.
    pub fn step1(&self, param: &mut Array1<f32>, cache: &mut Array1<f32>, grad: &Array1<f32>) {
        cache.zip_mut_with(grad, |c, &g| *c = self.rho * *c + (1.0 - self.rho) * g * g);
        Zip::from(param)
            .and(&*cache)
            .and(grad)
            .for_each(|p, &c, &g| *p -= self.learning_rate * g / (c.sqrt() + self.epsilon));
    }
}

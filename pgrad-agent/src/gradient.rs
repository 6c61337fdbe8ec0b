//! Arithmetic on policy parameters.
use ndarray::Array2;
use std::fmt::Debug;

/// Parameters of a policy model, which are also the type of its gradients.
///
/// Update rules only need these few vector-space operations, so they work
/// unchanged for every model.
pub trait Gradient: Clone + Debug {
    /// A value of the same shape filled with zeros.
    fn zeros_like(&self) -> Self;

    /// `self += alpha * other`.
    fn axpy(&mut self, alpha: f64, other: &Self);

    /// Returns `true` if no element is NaN or infinite.
    fn is_finite(&self) -> bool;

    /// Euclidean norm over all elements.
    fn norm(&self) -> f64;
}

impl Gradient for () {
    fn zeros_like(&self) -> Self {}

    fn axpy(&mut self, _alpha: f64, _other: &Self) {}

    fn is_finite(&self) -> bool {
        true
    }

    fn norm(&self) -> f64 {
        0.0
    }
}

impl Gradient for Array2<f64> {
    fn zeros_like(&self) -> Self {
        Array2::zeros(self.raw_dim())
    }

    fn axpy(&mut self, alpha: f64, other: &Self) {
        self.scaled_add(alpha, other);
    }

    fn is_finite(&self) -> bool {
        self.iter().all(|x| x.is_finite())
    }

    fn norm(&self) -> f64 {
        self.iter().map(|x| x * x).sum::<f64>().sqrt()
    }
}

use pgrad_core::Obs;

/// A state vector.
#[derive(Clone, Debug, PartialEq)]
pub struct VecObs(pub Vec<f64>);

impl Obs for VecObs {}

impl AsRef<[f64]> for VecObs {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for VecObs {
    fn from(v: Vec<f64>) -> Self {
        Self(v)
    }
}

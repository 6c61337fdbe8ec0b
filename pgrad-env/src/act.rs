use pgrad_core::Act;

/// Index of a discrete action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscreteAct(pub usize);

impl Act for DiscreteAct {}

impl From<usize> for DiscreteAct {
    fn from(a: usize) -> Self {
        Self(a)
    }
}

impl From<DiscreteAct> for usize {
    fn from(a: DiscreteAct) -> Self {
        a.0
    }
}

//! Configuration of [`Trainer`](super::Trainer).
use crate::error::PgError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// Total number of environment transitions, spanning many episodes.
    pub n_steps: usize,

    /// Per-step decay factor of rewards in `(0, 1]`.
    pub discount: f64,

    /// Seed of the agent and of the first environment reset.
    pub seed: u64,

    /// Requests visual display from the environment after every step.
    pub render: bool,

    /// Interval of flushing records in completed episodes.
    pub flush_record_interval: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            n_steps: 10_000,
            discount: 0.99,
            seed: 0,
            render: false,
            flush_record_interval: usize::MAX,
        }
    }
}

impl TrainerConfig {
    /// Sets the total number of environment steps.
    pub fn n_steps(mut self, v: usize) -> Self {
        self.n_steps = v;
        self
    }

    /// Sets the discount factor.
    pub fn discount(mut self, v: f64) -> Self {
        self.discount = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Enables or disables rendering.
    pub fn render(mut self, v: bool) -> Self {
        self.render = v;
        self
    }

    /// Sets the interval of flushing records in episodes.
    pub fn flush_record_interval(mut self, v: usize) -> Self {
        self.flush_record_interval = v;
        self
    }

    /// Checks that values are in their valid ranges.
    pub fn validate(&self) -> Result<(), PgError> {
        if !(self.discount > 0.0 && self.discount <= 1.0) {
            return Err(PgError::InvalidConfig(format!(
                "discount must be in (0, 1], got {}",
                self.discount
            )));
        }
        if self.flush_record_interval == 0 {
            return Err(PgError::InvalidConfig(
                "flush_record_interval must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_trainer_config() -> Result<()> {
        let config = TrainerConfig::default()
            .n_steps(500)
            .discount(0.9)
            .seed(42)
            .flush_record_interval(10);

        let dir = TempDir::new("trainer_config")?;
        let path = dir.path().join("trainer_config.yaml");

        config.save(&path)?;
        let config_ = TrainerConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_validate_discount() {
        assert!(TrainerConfig::default().discount(1.0).validate().is_ok());
        for d in [0.0, -0.5, 1.01, f64::NAN] {
            assert!(matches!(
                TrainerConfig::default().discount(d).validate(),
                Err(PgError::InvalidConfig(_))
            ));
        }
    }
}

//! Configuration of [`PgAgent`](super::PgAgent).
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`PgAgent`](super::PgAgent).
///
/// `MC` and `UC` are the configurations of the policy model and of the
/// update rule.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PgAgentConfig<MC, UC> {
    /// Policy model.
    pub model: MC,

    /// Update rule.
    pub update: UC,

    /// Seed of the random source used for parameter initialisation and
    /// action sampling.
    #[serde(default)]
    pub seed: u64,
}

impl<MC, UC> PgAgentConfig<MC, UC>
where
    MC: Serialize + DeserializeOwned,
    UC: Serialize + DeserializeOwned,
{
    /// Sets the seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Loads [`PgAgentConfig`] from YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PgAgentConfig`] as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BatchedReinforceConfig, Baseline, MlpConfig};
    use tempdir::TempDir;

    #[test]
    fn test_serde_agent_config() -> Result<()> {
        let config = PgAgentConfig {
            model: MlpConfig::new(4, vec![16, 16], 2),
            update: BatchedReinforceConfig::default()
                .n_episodes(4)
                .baseline(Baseline::MeanReturn),
            seed: 3,
        };

        let dir = TempDir::new("pg_agent_config")?;
        let path = dir.path().join("pg_agent_config.yaml");
        config.save(&path)?;
        let config_ = PgAgentConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}

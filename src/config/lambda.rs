use crate::core::generator::{GenerationLimits, MazeGenerator, DEFAULT_MAX_CELLS};
use crate::utils::error::{MazeError, Result};
use crate::utils::validation::{validate_positive_number, Validate};
use std::env;

/// Settings for the lambda handler, read from the function environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaConfig {
    pub max_cells: usize,
    pub seed: Option<u64>,
}

impl Default for LambdaConfig {
    fn default() -> Self {
        Self {
            max_cells: DEFAULT_MAX_CELLS,
            seed: None,
        }
    }
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_cells = match lookup("MAZE_MAX_CELLS") {
            Some(raw) => parse_var("MAZE_MAX_CELLS", &raw)?,
            None => DEFAULT_MAX_CELLS,
        };
        let seed = lookup("MAZE_SEED")
            .map(|raw| parse_var("MAZE_SEED", &raw))
            .transpose()?;

        Ok(Self { max_cells, seed })
    }

    pub fn generator(&self) -> MazeGenerator {
        let generator = MazeGenerator::new(GenerationLimits {
            max_cells: self.max_cells,
        });
        match self.seed {
            Some(seed) => generator.with_seed(seed),
            None => generator,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| MazeError::InvalidConfigValueError {
            field: name.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("MAZE_MAX_CELLS", self.max_cells, 1)?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = LambdaConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, LambdaConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reads_limits_and_seed() {
        let config =
            LambdaConfig::from_lookup(lookup(&[("MAZE_MAX_CELLS", "400"), ("MAZE_SEED", " 12 ")]))
                .unwrap();
        assert_eq!(config.max_cells, 400);
        assert_eq!(config.seed, Some(12));
        assert_eq!(config.generator().limits().max_cells, 400);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            LambdaConfig::from_lookup(lookup(&[("MAZE_MAX_CELLS", "lots")])),
            Err(MazeError::InvalidConfigValueError { .. })
        ));

        let config = LambdaConfig::from_lookup(lookup(&[("MAZE_MAX_CELLS", "0")])).unwrap();
        assert!(config.validate().is_err());
    }
}

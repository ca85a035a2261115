use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use schoolrun_routing::{Gazetteer, Router, RouterParams};
use tracing::debug;

const GAZETTEER_ENV_VAR: &str = "SCHOOLRUN_GAZETTEER";
const SEED_ENV_VAR: &str = "SCHOOLRUN_SEED";

/// Settings read from the environment. Command line flags take precedence.
#[derive(Debug, Default)]
pub struct Config {
    pub gazetteer: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::from_filename("./.env.local").ok();
        dotenvy::dotenv().ok();

        let gazetteer = std::env::var_os(GAZETTEER_ENV_VAR).map(PathBuf::from);
        let seed = match std::env::var(SEED_ENV_VAR) {
            Ok(value) => Some(
                value
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("{} must be an unsigned integer", SEED_ENV_VAR))?,
            ),
            Err(_) => None,
        };

        Ok(Config { gazetteer, seed })
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    pub fn router(&self) -> Result<Router, anyhow::Error> {
        let params = RouterParams {
            seed: self.seed,
            ..RouterParams::default()
        };

        let gazetteer = match &self.gazetteer {
            Some(path) => {
                debug!("Loading extra places from {}", path.display());
                Gazetteer::builtin_with_file(path)
                    .with_context(|| format!("Failed to load gazetteer {}", path.display()))?
            }
            None => Gazetteer::builtin().clone(),
        };

        Ok(Router::with_gazetteer(Arc::new(gazetteer), params))
    }
}

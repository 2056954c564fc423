//! Application configuration management.
//!
//! Configuration is layered from default values, an optional TOML file, and
//! environment variables, in increasing order of precedence.

use crate::SolverLib;
use moo_engine::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Where the catalog and model are loaded from
    #[serde(default)]
    pub data: DataConfig,

    /// Blend weights for the combined score
    #[serde(default)]
    pub scoring: ScoringWeights,

    /// Which solver backend to use
    #[serde(default)]
    pub solver: SolverConfig,
}

/// Locations of the inputs shared by every request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Offer records, as a JSON array or a `.csv` table
    pub offers: PathBuf,
    /// JSON logistic model parameters
    pub model: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            offers: PathBuf::from("offers.json"),
            model: PathBuf::from("model.json"),
        }
    }
}

/// Solver backend selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolverConfig {
    /// The backend
    #[serde(default)]
    pub lib: SolverLib,
    /// The largest program the exhaustive backend will attempt
    #[serde(default = "default_max_variables")]
    pub max_variables: usize,
}

fn default_max_variables() -> usize {
    moo_solver::exhaustive::ExhaustiveSolver::DEFAULT_MAX_VARIABLES
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lib: SolverLib::default(),
            max_variables: default_max_variables(),
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. The given config file
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `APP_<SECTION>__<KEY>` to `<section>.<key>`:
    ///
    /// ```bash
    /// export APP_DATA__OFFERS="/srv/catalog/offers.json"
    /// export APP_SCORING__PROPENSITY=0.6
    /// export APP_SOLVER__LIB=greedy
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}

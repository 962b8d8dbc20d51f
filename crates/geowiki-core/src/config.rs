//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `GEOWIKI_*` env
//! vars. Pipeline tuning lives under the `[pipeline]` table.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let cwd = env::current_dir()?;
        Self::load_from(&cwd)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("GEOWIKI_").split("__"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// Pipeline settings from the `pipeline` table, defaults when it is absent.
    pub fn pipeline(&self) -> Result<PipelineSettings> {
        let settings = if self.figment.contains("pipeline") {
            self.get::<PipelineSettings>("pipeline")?
        } else {
            PipelineSettings::default()
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Queue capacities and diagnostics knobs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub entity_queue: usize,
    pub page_queue: usize,
    pub output_queue: usize,
    /// Number of per-record lookups logged during build and match.
    pub log_sample: usize,
    pub progress: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self { entity_queue: 200, page_queue: 30, output_queue: 10_000, log_sample: 50, progress: false }
    }
}

impl PipelineSettings {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("entity_queue", self.entity_queue),
            ("page_queue", self.page_queue),
            ("output_queue", self.output_queue),
        ] {
            // tokio's bounded channel panics on zero capacity
            if value == 0 {
                return Err(Error::InvalidConfig(format!("pipeline.{} must be at least 1", name)));
            }
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

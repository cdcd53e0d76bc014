use crate::Result;
use crate::extraction::AttributeFilter;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dvschema.toml";

const MAX_CONCURRENT_LOOKUPS_LIMIT: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Web API version segment (e.g. `v9.2`)
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Only extract attributes whose logical name starts with this prefix
    #[serde(default)]
    pub attribute_prefix: Option<String>,

    /// Attribute logical names to leave out
    #[serde(default)]
    pub exclude_attributes: Vec<String>,

    /// Bound on concurrent entity lookups during solution resolution
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,

    /// Per-request timeout, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_version() -> String {
    "v9.2".to_string()
}

const fn default_max_concurrent_lookups() -> usize {
    crate::extraction::DEFAULT_MAX_CONCURRENT_LOOKUPS
}

const fn default_request_timeout_secs() -> u64 {
    120
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `dvschema.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading dvschema configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading dvschema configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!(target: "    config", "loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let api_version = self.api_version.trim();
        if api_version.is_empty() || api_version.contains('/') {
            return Err(app_err!("api_version must be a single path segment such as 'v9.2', got '{}'", self.api_version));
        }

        if !(1..=MAX_CONCURRENT_LOOKUPS_LIMIT).contains(&self.max_concurrent_lookups) {
            return Err(app_err!(
                "max_concurrent_lookups must be between 1 and {MAX_CONCURRENT_LOOKUPS_LIMIT}, got {}",
                self.max_concurrent_lookups
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(app_err!("request_timeout_secs must be greater than 0"));
        }

        Ok(())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Combine the configured attribute filtering with command-line overrides.
    ///
    /// A command-line prefix replaces the configured one; command-line exclusions
    /// are added to the configured ones.
    #[must_use]
    pub fn attribute_filter(&self, prefix: Option<&str>, exclude: &[String]) -> AttributeFilter {
        let prefix = prefix.or(self.attribute_prefix.as_deref());
        AttributeFilter::new(prefix, self.exclude_attributes.iter().chain(exclude).map(String::as_str))
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

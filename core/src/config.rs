//! Configuration loaded from `config.toml` and merged with CLI overrides.
//!
//! Precedence is CLI override, then the config file, then the built-in
//! defaults below.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::ingest::IngestLimits;

pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MAX_INGEST_ENTRIES: usize = 100_000;
pub const DEFAULT_MAX_PROMPT_ENTRIES: usize = 200;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

pub const CONFIG_TOML_FILE: &str = "config.toml";

const LOGLENS_HOME_ENV_VAR: &str = "LOGLENS_HOME";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub limits: Limits,
    pub ollama: OllamaConfig,
}

/// Resource ceilings. The ingestion cap and the prompt cap are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Files larger than this are rejected whole.
    pub max_file_bytes: u64,

    /// Hard stop on the number of entries ingestion produces.
    pub max_ingest_entries: usize,

    /// Number of raw entries embedded in the model prompt.
    pub max_prompt_entries: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_ingest_entries: DEFAULT_MAX_INGEST_ENTRIES,
            max_prompt_entries: DEFAULT_MAX_PROMPT_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub request_timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    #[serde(default)]
    pub limits: Option<LimitsToml>,
    #[serde(default)]
    pub ollama: Option<OllamaToml>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsToml {
    pub max_file_bytes: Option<u64>,
    pub max_ingest_entries: Option<usize>,
    pub max_prompt_entries: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaToml {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub max_file_bytes: Option<u64>,
    pub max_ingest_entries: Option<usize>,
    pub max_prompt_entries: Option<usize>,
}

impl Config {
    /// Loads `config_path` when given, otherwise `$LOGLENS_HOME/config.toml`
    /// if it exists, and applies `overrides` on top.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load(
        config_path: Option<&Path>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let config_toml = match config_path {
            Some(path) => load_config_toml(path)?,
            None => match find_loglens_home() {
                Ok(home) => {
                    let path = home.join(CONFIG_TOML_FILE);
                    if path.is_file() {
                        load_config_toml(&path)?
                    } else {
                        debug!("no config file at {}, using defaults", path.display());
                        ConfigToml::default()
                    }
                }
                Err(err) => {
                    debug!("unable to resolve loglens home ({err}), using defaults");
                    ConfigToml::default()
                }
            },
        };
        Ok(Self::from_toml(config_toml, overrides))
    }

    pub fn from_toml(config_toml: ConfigToml, overrides: ConfigOverrides) -> Self {
        let ConfigToml { limits, ollama } = config_toml;
        let limits = limits.unwrap_or_default();
        let ollama = ollama.unwrap_or_default();
        let ConfigOverrides {
            model,
            base_url,
            max_file_bytes,
            max_ingest_entries,
            max_prompt_entries,
        } = overrides;

        let default_limits = Limits::default();
        let default_ollama = OllamaConfig::default();

        Self {
            limits: Limits {
                max_file_bytes: max_file_bytes
                    .or(limits.max_file_bytes)
                    .unwrap_or(default_limits.max_file_bytes),
                max_ingest_entries: max_ingest_entries
                    .or(limits.max_ingest_entries)
                    .unwrap_or(default_limits.max_ingest_entries),
                max_prompt_entries: max_prompt_entries
                    .or(limits.max_prompt_entries)
                    .unwrap_or(default_limits.max_prompt_entries),
            },
            ollama: OllamaConfig {
                base_url: base_url
                    .or(ollama.base_url)
                    .unwrap_or(default_ollama.base_url),
                model: model.or(ollama.model).unwrap_or(default_ollama.model),
                request_timeout: ollama
                    .request_timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(default_ollama.request_timeout),
            },
        }
    }

    pub fn ingest_limits(&self) -> IngestLimits {
        IngestLimits {
            max_file_bytes: self.limits.max_file_bytes,
            max_entries: self.limits.max_ingest_entries,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(ConfigToml::default(), ConfigOverrides::default())
    }
}

pub fn load_config_toml(path: &Path) -> Result<ConfigToml, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns `$LOGLENS_HOME` when set and non-empty, otherwise `~/.loglens`.
/// The directory is not required to exist.
pub fn find_loglens_home() -> std::io::Result<PathBuf> {
    if let Ok(val) = std::env::var(LOGLENS_HOME_ENV_VAR)
        && !val.is_empty()
    {
        return Ok(PathBuf::from(val));
    }

    let mut home = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not find home directory",
        )
    })?;
    home.push(".loglens");
    Ok(home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_documented_ceilings() {
        let config = Config::default();
        assert_eq!(config.limits.max_file_bytes, 5_242_880);
        assert_eq!(config.limits.max_ingest_entries, 100_000);
        assert_eq!(config.limits.max_prompt_entries, 200);
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert_eq!(config.ollama.model, "llama3");
    }

    #[test]
    fn file_values_override_defaults_and_cli_overrides_file() {
        let config_toml: ConfigToml = toml::from_str(
            r#"
[limits]
max_file_bytes = 1024
max_prompt_entries = 5

[ollama]
model = "mistral"
request_timeout_secs = 7
"#,
        )
        .expect("parse config");

        let overrides = ConfigOverrides {
            max_prompt_entries: Some(9),
            base_url: Some("http://10.0.0.2:11434".to_string()),
            ..Default::default()
        };
        let config = Config::from_toml(config_toml, overrides);

        assert_eq!(
            config,
            Config {
                limits: Limits {
                    max_file_bytes: 1024,
                    max_ingest_entries: DEFAULT_MAX_INGEST_ENTRIES,
                    max_prompt_entries: 9,
                },
                ollama: OllamaConfig {
                    base_url: "http://10.0.0.2:11434".to_string(),
                    model: "mistral".to_string(),
                    request_timeout: Duration::from_secs(7),
                },
            }
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join(CONFIG_TOML_FILE);
        std::fs::write(&path, "[limits]\nmax_entries = 3\n").expect("write config");

        let err = load_config_toml(&path).expect_err("unknown key should fail");
        assert_matches!(err, ConfigError::Parse { .. });
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("missing.toml");

        let err = Config::load(Some(&path), ConfigOverrides::default())
            .expect_err("missing explicit config should fail");
        assert_matches!(err, ConfigError::Read { .. });
    }

    #[test]
    fn ingest_limits_carry_the_ingestion_cap_not_the_prompt_cap() {
        let config = Config::from_toml(
            ConfigToml::default(),
            ConfigOverrides {
                max_ingest_entries: Some(50),
                max_prompt_entries: Some(10),
                ..Default::default()
            },
        );
        let limits = config.ingest_limits();
        assert_eq!(limits.max_entries, 50);
        assert_eq!(limits.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
    }
}

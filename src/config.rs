use crate::core::FormRecord;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "resume-wizard.yaml";

pub const ENV_BACKEND_URL: &str = "RESUME_WIZARD_BACKEND_URL";
pub const ENV_LOG: &str = "RESUME_WIZARD_LOG";
pub const ENV_LOG_FILE: &str = "RESUME_WIZARD_LOG_FILE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub wizard: WizardConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 60,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WizardConfig {
    pub summary_max_chars: usize,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            summary_max_chars: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `resume_wizard=debug`.
    pub filter: String,
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: PathBuf::from("resume-wizard.log"),
        }
    }
}

impl AppConfig {
    /// Reads `path` if given, else the default file when it exists, else
    /// defaults. An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Applies the `RESUME_WIZARD_*` overrides from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.is_empty()) {
            self.backend.base_url = url;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.is_empty()) {
            self.logging.filter = filter;
        }
        if let Some(file) = lookup(ENV_LOG_FILE).filter(|v| !v.is_empty()) {
            self.logging.file = PathBuf::from(file);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::invalid(format!(
                "backend.base_url must be an http(s) URL, got `{url}`"
            )));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::invalid("backend.timeout_secs must be positive"));
        }
        if self.wizard.summary_max_chars == 0 {
            return Err(ConfigError::invalid("wizard.summary_max_chars must be positive"));
        }
        Ok(())
    }
}

/// Loads seed data for the wizard. `.json` files are read as JSON, anything
/// else as YAML.
pub fn load_seed(path: &Path) -> Result<FormRecord, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

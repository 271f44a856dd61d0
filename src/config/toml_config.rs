use crate::domain::configuration::Configuration;
use crate::domain::model::ColumnKind;
use crate::domain::ports::CompletionMode;
use crate::utils::error::{BuilderError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path_segment, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Column build request described in a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    pub service: ServiceConfig,
    pub column: ColumnConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub data_id: String,
    /// Path the builder was launched from; decides the completion action.
    pub launch_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    pub kind: ColumnKind,
    pub cfg: Option<serde_json::Value>,
}

impl BuildConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BuilderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BuilderError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DTALE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| BuilderError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn completion_mode(&self) -> CompletionMode {
        CompletionMode::from_launch_path(self.service.launch_path.as_deref().unwrap_or_default())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.service.timeout_seconds.map(Duration::from_secs)
    }
}

impl ColumnConfig {
    /// Typed configuration for `kind`; an absent `cfg` is the kind's default.
    pub fn configuration(&self) -> Result<Configuration> {
        let raw = self.cfg.clone().unwrap_or(serde_json::Value::Null);
        Configuration::from_value(self.kind, raw).map_err(|e| BuilderError::ValidationError {
            message: format!("Invalid {} configuration: {}", self.kind, e),
        })
    }
}

impl Validate for BuildConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service.base_url", &self.service.base_url)?;
        validate_path_segment("service.data_id", &self.service.data_id)?;
        if let Some(timeout) = self.service.timeout_seconds {
            validate_range("service.timeout_seconds", timeout, 1, 3600)?;
        }
        validate_non_empty_string("column.name", &self.column.name)?;
        self.column.configuration()?;
        Ok(())
    }
}

pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::{BuildConfig, ColumnConfig, ServiceConfig};
#[cfg(feature = "cli")]
use crate::domain::model::ColumnKind;
#[cfg(feature = "cli")]
use crate::utils::error::{BuilderError, Result};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "column-builder")]
#[command(about = "Validate and submit derived-column specifications to a dataset service")]
pub struct CliConfig {
    /// Path to a TOML build file; flags below override its values
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub data_id: Option<String>,

    /// Name of the new column
    #[arg(long)]
    pub name: Option<String>,

    /// Column kind, e.g. numeric, bins, winsorize
    #[arg(long)]
    pub kind: Option<ColumnKind>,

    /// Kind-specific configuration as JSON
    #[arg(long)]
    pub cfg: Option<String>,

    /// Launch path; paths under /dtale/popup/build complete as a standalone window
    #[arg(long)]
    pub launch_path: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Validate and print the code preview without contacting the service
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merges the optional build file with command line overrides.
    pub fn into_build_config(self) -> Result<BuildConfig> {
        let base = match &self.config {
            Some(path) => Some(BuildConfig::from_file(path)?),
            None => None,
        };

        let cfg = match &self.cfg {
            Some(raw) => Some(serde_json::from_str::<serde_json::Value>(raw)?),
            None => None,
        };

        let (service, column) = match base {
            Some(b) => (Some(b.service), Some(b.column)),
            None => (None, None),
        };

        let service = ServiceConfig {
            base_url: pick(
                "service.base_url",
                self.base_url,
                service.as_ref().map(|s| s.base_url.clone()),
            )?,
            data_id: pick(
                "service.data_id",
                self.data_id,
                service.as_ref().map(|s| s.data_id.clone()),
            )?,
            launch_path: self
                .launch_path
                .or_else(|| service.as_ref().and_then(|s| s.launch_path.clone())),
            timeout_seconds: self
                .timeout_seconds
                .or_else(|| service.as_ref().and_then(|s| s.timeout_seconds)),
        };

        let column = ColumnConfig {
            name: pick("column.name", self.name, column.as_ref().map(|c| c.name.clone()))?,
            kind: self
                .kind
                .or_else(|| column.as_ref().map(|c| c.kind))
                .unwrap_or_default(),
            cfg: cfg.or_else(|| column.and_then(|c| c.cfg)),
        };

        Ok(BuildConfig { service, column })
    }
}

#[cfg(feature = "cli")]
fn pick(field: &str, flag: Option<String>, file: Option<String>) -> Result<String> {
    flag.or(file).ok_or_else(|| BuilderError::MissingConfigError {
        field: field.to_string(),
    })
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_flags_build_a_config() {
        let cli = CliConfig::parse_from([
            "column-builder",
            "--base-url",
            "http://localhost:40000",
            "--data-id",
            "1",
            "--name",
            "conv_col",
            "--kind",
            "winsorize",
            "--cfg",
            r#"{"col": "col1"}"#,
        ]);
        let config = cli.into_build_config().unwrap();
        assert_eq!(config.column.kind, ColumnKind::Winsorize);
        assert_eq!(config.column.cfg, Some(serde_json::json!({"col": "col1"})));
    }

    #[test]
    fn test_missing_base_url() {
        let cli = CliConfig::parse_from(["column-builder", "--data-id", "1", "--name", "x"]);
        match cli.into_build_config() {
            Err(BuilderError::MissingConfigError { field }) => {
                assert_eq!(field, "service.base_url")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_flag_is_rejected() {
        let parsed = CliConfig::try_parse_from(["column-builder", "--kind", "histogram"]);
        assert!(parsed.is_err());
    }
}

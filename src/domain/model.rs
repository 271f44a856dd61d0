use crate::domain::configuration::Configuration;
use crate::utils::error::{BuilderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminant selecting which derived-column algorithm is active.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    #[default]
    Numeric,
    Bins,
    Datetime,
    Random,
    TypeConversion,
    Transform,
    Winsorize,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Bins => "bins",
            ColumnKind::Datetime => "datetime",
            ColumnKind::Random => "random",
            ColumnKind::TypeConversion => "type_conversion",
            ColumnKind::Transform => "transform",
            ColumnKind::Winsorize => "winsorize",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnKind {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self> {
        crate::core::registry::list_kinds()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BuilderError::InvalidConfigValueError {
                field: "kind".to_string(),
                value: s.to_string(),
                reason: format!(
                    "Unknown column kind. Valid kinds: {}",
                    crate::core::registry::list_kinds()
                        .iter()
                        .map(ColumnKind::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

/// One entry of the dataset's `dtypes` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    #[serde(default)]
    pub index: Option<usize>,
}

/// Read-only snapshot of the dataset's existing columns, in service order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    #[serde(rename = "dtypes")]
    pub columns: Vec<ColumnInfo>,
}

impl ColumnMetadata {
    pub fn new(columns: Vec<ColumnInfo>) -> Self {
        Self { columns }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn dtype_of(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.dtype.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Error represented as data, the shape the dataset service uses for failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

impl ErrorMessage {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            traceback: None,
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error)
    }
}

impl From<BuilderError> for ErrorMessage {
    fn from(err: BuilderError) -> Self {
        match err {
            BuilderError::ServiceError { message, traceback } => ErrorMessage {
                error: message,
                traceback,
            },
            other => ErrorMessage::new(other.to_string()),
        }
    }
}

/// The finalized `{name, type, cfg}` triple sent to the materialization service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpecification {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    pub cfg: Configuration,
}

impl ColumnSpecification {
    /// Query parameters for the creation request; `cfg` travels JSON-encoded.
    pub fn to_query_pairs(&self) -> Result<Vec<(&'static str, String)>> {
        Ok(vec![
            ("name", self.name.clone()),
            ("type", self.kind.as_str().to_string()),
            ("cfg", serde_json::to_string(&self.cfg)?),
        ])
    }
}

// Domain: kind-specific configurations, serialized as the `cfg` query parameter.
// Unset fields go out as null, except random which omits them.

use crate::domain::model::ColumnKind;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideType {
    #[default]
    Col,
    Val,
}

/// One operand of a numeric column: either an existing column or a static value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericSide {
    #[serde(rename = "type", default)]
    pub side_type: SideType,
    #[serde(default)]
    pub col: Option<String>,
    #[serde(default)]
    pub val: Option<String>,
}

impl NumericSide {
    pub fn column(col: impl Into<String>) -> Self {
        Self {
            side_type: SideType::Col,
            col: Some(col.into()),
            val: None,
        }
    }

    pub fn value(val: impl Into<String>) -> Self {
        Self {
            side_type: SideType::Val,
            col: None,
            val: Some(val.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericOperation {
    Sum,
    Difference,
    Multiply,
    Divide,
}

impl NumericOperation {
    pub fn symbol(&self) -> &'static str {
        match self {
            NumericOperation::Sum => "+",
            NumericOperation::Difference => "-",
            NumericOperation::Multiply => "*",
            NumericOperation::Divide => "/",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericConfig {
    #[serde(default)]
    pub left: NumericSide,
    #[serde(default)]
    pub right: NumericSide,
    #[serde(default)]
    pub operation: Option<NumericOperation>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinsOperation {
    #[default]
    Cut,
    Qcut,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinsConfig {
    #[serde(default)]
    pub col: Option<String>,
    #[serde(default)]
    pub operation: BinsOperation,
    #[serde(default)]
    pub bins: Option<u32>,
    /// Comma-separated labels, one per bin.
    #[serde(default)]
    pub labels: Option<String>,
}

impl BinsConfig {
    pub fn label_list(&self) -> Vec<String> {
        self.labels
            .as_deref()
            .map(split_list)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatetimeOperation {
    #[default]
    Property,
    Conversion,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatetimeConfig {
    #[serde(default)]
    pub col: Option<String>,
    #[serde(default)]
    pub operation: DatetimeOperation,
    /// e.g. `hour`, `weekday`, `month`
    #[serde(default)]
    pub property: Option<String>,
    /// `<freq>_<start|end>`, e.g. `month_end`
    #[serde(default)]
    pub conversion: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomType {
    #[default]
    Float,
    Int,
    String,
    Choice,
    Bool,
    Date,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RandomConfig {
    #[serde(rename = "type", default)]
    pub random_type: RandomType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chars: Option<String>,
    /// Comma-separated choices for the `choice` type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(
        rename = "businessDay",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub business_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<bool>,
}

impl RandomConfig {
    pub fn choice_list(&self) -> Vec<String> {
        self.choices
            .as_deref()
            .map(split_list)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConversionConfig {
    #[serde(default)]
    pub col: Option<String>,
    /// dtype of the source column, as reported by the dtypes listing
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub fmt: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default)]
    pub group: Vec<String>,
    #[serde(default)]
    pub col: Option<String>,
    #[serde(default)]
    pub agg: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WinsorizeConfig {
    #[serde(default)]
    pub col: Option<String>,
    #[serde(default)]
    pub group: Option<Vec<String>>,
    #[serde(default)]
    pub limits: Option<[f64; 2]>,
    #[serde(default)]
    pub inclusive: Option<[bool; 2]>,
}

/// Tagged union of every kind's configuration. The tag lives outside the
/// payload (the `type` query parameter), so the variant serializes untagged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Configuration {
    Numeric(NumericConfig),
    Bins(BinsConfig),
    Datetime(DatetimeConfig),
    Random(RandomConfig),
    TypeConversion(TypeConversionConfig),
    Transform(TransformConfig),
    Winsorize(WinsorizeConfig),
}

impl Configuration {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Configuration::Numeric(_) => ColumnKind::Numeric,
            Configuration::Bins(_) => ColumnKind::Bins,
            Configuration::Datetime(_) => ColumnKind::Datetime,
            Configuration::Random(_) => ColumnKind::Random,
            Configuration::TypeConversion(_) => ColumnKind::TypeConversion,
            Configuration::Transform(_) => ColumnKind::Transform,
            Configuration::Winsorize(_) => ColumnKind::Winsorize,
        }
    }

    /// Empty configuration for `kind`, i.e. what an untouched editor represents.
    pub fn default_for(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Numeric => Configuration::Numeric(NumericConfig::default()),
            ColumnKind::Bins => Configuration::Bins(BinsConfig::default()),
            ColumnKind::Datetime => Configuration::Datetime(DatetimeConfig::default()),
            ColumnKind::Random => Configuration::Random(RandomConfig::default()),
            ColumnKind::TypeConversion => {
                Configuration::TypeConversion(TypeConversionConfig::default())
            }
            ColumnKind::Transform => Configuration::Transform(TransformConfig::default()),
            ColumnKind::Winsorize => Configuration::Winsorize(WinsorizeConfig::default()),
        }
    }

    /// Reads a raw JSON configuration using `kind` to pick the shape.
    /// `null` yields the kind's default.
    pub fn from_value(kind: ColumnKind, value: serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default_for(kind));
        }
        let cfg = match kind {
            ColumnKind::Numeric => Configuration::Numeric(serde_json::from_value(value)?),
            ColumnKind::Bins => Configuration::Bins(serde_json::from_value(value)?),
            ColumnKind::Datetime => Configuration::Datetime(serde_json::from_value(value)?),
            ColumnKind::Random => Configuration::Random(serde_json::from_value(value)?),
            ColumnKind::TypeConversion => {
                Configuration::TypeConversion(serde_json::from_value(value)?)
            }
            ColumnKind::Transform => Configuration::Transform(serde_json::from_value(value)?),
            ColumnKind::Winsorize => Configuration::Winsorize(serde_json::from_value(value)?),
        };
        Ok(cfg)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

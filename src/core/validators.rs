// Core: one pure validator per column kind; a missing config is checked as the kind's default.

use crate::core::registry;
use crate::domain::configuration::{
    BinsConfig, Configuration, DatetimeConfig, DatetimeOperation, NumericConfig, NumericSide,
    RandomConfig, RandomType, SideType, TransformConfig, TypeConversionConfig, WinsorizeConfig,
};
use crate::domain::model::ColumnKind;
use chrono::NaiveDate;

pub type Validator = fn(Option<&Configuration>) -> Option<String>;

/// Runs the validator registered for `kind`.
pub fn validate(kind: ColumnKind, cfg: Option<&Configuration>) -> Option<String> {
    (registry::entry(kind).validator)(cfg)
}

/// Validates raw input as received from an untyped source. Unknown tags use the
/// numeric validator and payloads of the wrong shape come back as messages.
pub fn validate_tagged(tag: &str, cfg: &serde_json::Value) -> Option<String> {
    let kind = registry::resolve_tag(tag);
    match Configuration::from_value(kind, cfg.clone()) {
        Ok(cfg) => validate(kind, Some(&cfg)),
        Err(e) => Some(format!("Invalid {} configuration: {}", kind, e)),
    }
}

pub fn numeric(cfg: Option<&Configuration>) -> Option<String> {
    match cfg {
        Some(Configuration::Numeric(c)) => validate_numeric_cfg(c),
        Some(other) => Some(mismatch(ColumnKind::Numeric, other)),
        None => validate_numeric_cfg(&NumericConfig::default()),
    }
}

pub fn bins(cfg: Option<&Configuration>) -> Option<String> {
    match cfg {
        Some(Configuration::Bins(c)) => validate_bins_cfg(c),
        Some(other) => Some(mismatch(ColumnKind::Bins, other)),
        None => validate_bins_cfg(&BinsConfig::default()),
    }
}

pub fn datetime(cfg: Option<&Configuration>) -> Option<String> {
    match cfg {
        Some(Configuration::Datetime(c)) => validate_datetime_cfg(c),
        Some(other) => Some(mismatch(ColumnKind::Datetime, other)),
        None => validate_datetime_cfg(&DatetimeConfig::default()),
    }
}

pub fn random(cfg: Option<&Configuration>) -> Option<String> {
    match cfg {
        Some(Configuration::Random(c)) => validate_random_cfg(c),
        Some(other) => Some(mismatch(ColumnKind::Random, other)),
        None => validate_random_cfg(&RandomConfig::default()),
    }
}

pub fn type_conversion(cfg: Option<&Configuration>) -> Option<String> {
    match cfg {
        Some(Configuration::TypeConversion(c)) => validate_type_conversion_cfg(c),
        Some(other) => Some(mismatch(ColumnKind::TypeConversion, other)),
        None => validate_type_conversion_cfg(&TypeConversionConfig::default()),
    }
}

pub fn transform(cfg: Option<&Configuration>) -> Option<String> {
    match cfg {
        Some(Configuration::Transform(c)) => validate_transform_cfg(c),
        Some(other) => Some(mismatch(ColumnKind::Transform, other)),
        None => validate_transform_cfg(&TransformConfig::default()),
    }
}

pub fn winsorize(cfg: Option<&Configuration>) -> Option<String> {
    match cfg {
        Some(Configuration::Winsorize(c)) => validate_winsorize_cfg(c),
        Some(other) => Some(mismatch(ColumnKind::Winsorize, other)),
        None => validate_winsorize_cfg(&WinsorizeConfig::default()),
    }
}

fn mismatch(expected: ColumnKind, cfg: &Configuration) -> String {
    format!(
        "Expected a {} configuration but received {}!",
        registry::label_for(expected),
        registry::label_for(cfg.kind())
    )
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

pub fn validate_numeric_cfg(cfg: &NumericConfig) -> Option<String> {
    if cfg.operation.is_none() {
        return Some("Please select an operation!".to_string());
    }
    validate_numeric_side("Left", &cfg.left).or_else(|| validate_numeric_side("Right", &cfg.right))
}

fn validate_numeric_side(label: &str, side: &NumericSide) -> Option<String> {
    match side.side_type {
        SideType::Col if is_blank(side.col.as_deref()) => {
            Some(format!("{} side is missing a column selection!", label))
        }
        SideType::Val if is_blank(side.val.as_deref()) => {
            Some(format!("{} side is missing a static value!", label))
        }
        _ => None,
    }
}

pub fn validate_bins_cfg(cfg: &BinsConfig) -> Option<String> {
    if is_blank(cfg.col.as_deref()) {
        return Some("Missing a column selection!".to_string());
    }
    let bins = match cfg.bins {
        Some(bins) if bins > 0 => bins,
        _ => return Some("Missing a bins selection!".to_string()),
    };
    let labels = cfg.label_list();
    if !labels.is_empty() && labels.len() != bins as usize {
        return Some(format!(
            "There are {} labels, but {} bins!",
            labels.len(),
            bins
        ));
    }
    None
}

pub fn validate_datetime_cfg(cfg: &DatetimeConfig) -> Option<String> {
    if is_blank(cfg.col.as_deref()) {
        return Some("Missing a column selection!".to_string());
    }
    match cfg.operation {
        DatetimeOperation::Property if is_blank(cfg.property.as_deref()) => {
            Some("Missing a property selection!".to_string())
        }
        DatetimeOperation::Conversion if is_blank(cfg.conversion.as_deref()) => {
            Some("Missing a conversion selection!".to_string())
        }
        _ => None,
    }
}

pub fn validate_random_cfg(cfg: &RandomConfig) -> Option<String> {
    match cfg.random_type {
        RandomType::Float | RandomType::Int => match (cfg.low, cfg.high) {
            (Some(low), Some(high)) if low >= high => {
                Some("Invalid range specification, low must be less than high!".to_string())
            }
            _ => None,
        },
        RandomType::Date => {
            let start = parse_date(cfg.start.as_deref());
            let end = parse_date(cfg.end.as_deref());
            match (start, end) {
                (Err(()), _) | (_, Err(())) => Some("Invalid date specification!".to_string()),
                (Ok(Some(start)), Ok(Some(end))) if start > end => {
                    Some("Start must be before End!".to_string())
                }
                _ => None,
            }
        }
        RandomType::Choice if cfg.choice_list().is_empty() => {
            Some("Please specify a comma-separated list of choices!".to_string())
        }
        RandomType::String if cfg.length == Some(0) => {
            Some("String length must be greater than zero!".to_string())
        }
        _ => None,
    }
}

/// `Ok(None)` for an unset date, `Err(())` for one that isn't `YYYY-MM-DD`.
fn parse_date(value: Option<&str>) -> std::result::Result<Option<NaiveDate>, ()> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ()),
    }
}

pub fn validate_type_conversion_cfg(cfg: &TypeConversionConfig) -> Option<String> {
    if is_blank(cfg.col.as_deref()) {
        return Some("Missing a column selection!".to_string());
    }
    let to = match cfg.to.as_deref() {
        Some(to) if !to.trim().is_empty() => to,
        _ => return Some("Missing a conversion selection!".to_string()),
    };
    let from_int = cfg
        .from
        .as_deref()
        .is_some_and(|from| from.starts_with("int") || from.starts_with("uint"));
    if from_int && to == "datetime" && is_blank(cfg.unit.as_deref()) {
        return Some("Missing a unit selection!".to_string());
    }
    None
}

pub fn validate_transform_cfg(cfg: &TransformConfig) -> Option<String> {
    if cfg.group.iter().all(|g| g.trim().is_empty()) {
        return Some("Please select a group!".to_string());
    }
    if is_blank(cfg.col.as_deref()) {
        return Some("Please select a column to transform!".to_string());
    }
    if is_blank(cfg.agg.as_deref()) {
        return Some("Please select an aggregation!".to_string());
    }
    None
}

pub fn validate_winsorize_cfg(cfg: &WinsorizeConfig) -> Option<String> {
    if cfg.col.is_none() {
        return Some("Please select a column to winsorize!".to_string());
    }
    None
}

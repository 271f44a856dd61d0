use crate::core::code::build_code;
use crate::domain::configuration::{Configuration, WinsorizeConfig};
use crate::domain::model::ColumnMetadata;

/// Partial state reported by an editor after each interaction.
///
/// `code` carries the editor's complete current preview, not a delta.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorUpdate {
    pub cfg: Option<Configuration>,
    pub code: Option<Vec<String>>,
}

impl EditorUpdate {
    /// Update carrying `cfg` together with its generated preview.
    pub fn from_config(cfg: Configuration) -> Self {
        let code = build_code(&cfg);
        Self {
            cfg: Some(cfg),
            code: Some(code),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

/// Numeric dtypes as reported by pandas (`int64`, `uint8`, `float32`, ...).
pub fn is_numeric_dtype(dtype: &str) -> bool {
    ["int", "uint", "float"]
        .iter()
        .any(|prefix| dtype.starts_with(prefix))
}

/// Editor state behind the winsorize form: a column, optional group-by columns,
/// a two-handled percentile slider and one inclusive toggle per bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinsorizeEditor {
    col: Option<String>,
    group: Vec<String>,
    percentiles: [u8; 2],
    inclusive: [bool; 2],
}

impl Default for WinsorizeEditor {
    fn default() -> Self {
        Self {
            col: None,
            group: Vec::new(),
            percentiles: [10, 90],
            inclusive: [true, true],
        }
    }
}

impl WinsorizeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns the editor offers. Without metadata there is nothing to offer.
    pub fn column_options(columns: Option<&ColumnMetadata>) -> Vec<String> {
        columns
            .map(|metadata| {
                metadata
                    .columns
                    .iter()
                    .filter(|c| is_numeric_dtype(&c.dtype))
                    .map(|c| c.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Group-by candidates: every column except the one being winsorized.
    pub fn group_options(&self, columns: Option<&ColumnMetadata>) -> Vec<String> {
        columns
            .map(|metadata| {
                metadata
                    .names()
                    .filter(|name| self.col.as_deref() != Some(*name))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn select_column(&mut self, col: impl Into<String>) -> EditorUpdate {
        self.col = Some(col.into());
        self.update()
    }

    pub fn select_group(&mut self, group: Vec<String>) -> EditorUpdate {
        self.group = group;
        self.update()
    }

    /// Slider handles in percent. Values are clamped to 0..=100 and ordered.
    pub fn set_percentiles(&mut self, lower: u8, upper: u8) -> EditorUpdate {
        let lower = lower.min(100);
        let upper = upper.min(100);
        self.percentiles = [lower.min(upper), lower.max(upper)];
        self.update()
    }

    pub fn toggle_inclusive(&mut self, bound: Bound) -> EditorUpdate {
        let index = match bound {
            Bound::Lower => 0,
            Bound::Upper => 1,
        };
        self.inclusive[index] = !self.inclusive[index];
        self.update()
    }

    /// Fraction clipped from each tail: `[lower/100, (100-upper)/100]`.
    pub fn limits(&self) -> [f64; 2] {
        let [lower, upper] = self.percentiles;
        [
            f64::from(lower) / 100.0,
            f64::from(100 - upper) / 100.0,
        ]
    }

    pub fn config(&self) -> WinsorizeConfig {
        WinsorizeConfig {
            col: self.col.clone(),
            group: if self.group.is_empty() {
                None
            } else {
                Some(self.group.clone())
            },
            limits: Some(self.limits()),
            inclusive: Some(self.inclusive),
        }
    }

    pub fn update(&self) -> EditorUpdate {
        EditorUpdate::from_config(Configuration::Winsorize(self.config()))
    }
}

// Core: fixed, ordered registry of column kinds.

use crate::core::validators::{self, Validator};
use crate::domain::configuration::{Configuration, RandomConfig};
use crate::domain::model::ColumnKind;

/// What an editor consumes besides its own configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorInput {
    /// Choices are drawn from the dataset's column listing.
    Columns,
    /// Self-contained; the column listing is never consulted.
    Standalone,
}

pub struct KindEntry {
    pub kind: ColumnKind,
    pub validator: Validator,
    /// Configuration seeded on selection when the kind has none yet.
    pub seed: Option<fn() -> Configuration>,
    pub editor: EditorInput,
}

const KINDS: [ColumnKind; 7] = [
    ColumnKind::Numeric,
    ColumnKind::Bins,
    ColumnKind::Datetime,
    ColumnKind::Random,
    ColumnKind::TypeConversion,
    ColumnKind::Transform,
    ColumnKind::Winsorize,
];

static REGISTRY: [KindEntry; 7] = [
    KindEntry {
        kind: ColumnKind::Numeric,
        validator: validators::numeric,
        seed: None,
        editor: EditorInput::Columns,
    },
    KindEntry {
        kind: ColumnKind::Bins,
        validator: validators::bins,
        seed: None,
        editor: EditorInput::Columns,
    },
    KindEntry {
        kind: ColumnKind::Datetime,
        validator: validators::datetime,
        seed: None,
        editor: EditorInput::Columns,
    },
    KindEntry {
        kind: ColumnKind::Random,
        validator: validators::random,
        seed: Some(seed_random),
        editor: EditorInput::Standalone,
    },
    KindEntry {
        kind: ColumnKind::TypeConversion,
        validator: validators::type_conversion,
        seed: None,
        editor: EditorInput::Columns,
    },
    KindEntry {
        kind: ColumnKind::Transform,
        validator: validators::transform,
        seed: None,
        editor: EditorInput::Columns,
    },
    KindEntry {
        kind: ColumnKind::Winsorize,
        validator: validators::winsorize,
        seed: None,
        editor: EditorInput::Columns,
    },
];

fn seed_random() -> Configuration {
    Configuration::Random(RandomConfig::default())
}

/// Kinds in display order.
pub fn list_kinds() -> &'static [ColumnKind] {
    &KINDS
}

pub fn entry(kind: ColumnKind) -> &'static KindEntry {
    // REGISTRY is laid out in the same order as KINDS.
    let position = KINDS.iter().position(|k| *k == kind).unwrap_or(0);
    &REGISTRY[position]
}

/// Resolves a raw kind tag, falling back to `numeric` for anything unknown.
pub fn resolve_tag(tag: &str) -> ColumnKind {
    match tag.parse::<ColumnKind>() {
        Ok(kind) => kind,
        Err(_) => {
            tracing::warn!("Unknown column kind '{}', falling back to numeric", tag);
            ColumnKind::Numeric
        }
    }
}

/// `type_conversion` -> `Type Conversion`
pub fn build_label(tag: &str) -> String {
    tag.split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn label_for(kind: ColumnKind) -> String {
    build_label(kind.as_str())
}

pub fn description_for(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Numeric => {
            "Combine two columns, or a column and a static value, with a basic arithmetic operation."
        }
        ColumnKind::Bins => {
            "Bucket a numeric column into equal-width (cut) or equal-frequency (qcut) bins."
        }
        ColumnKind::Datetime => {
            "Extract a property (hour, weekday, month...) from a datetime column or snap it to a period boundary."
        }
        ColumnKind::Random => "Generate a column of random floats, integers, strings, choices, booleans or dates.",
        ColumnKind::TypeConversion => "Convert a column from one data type to another.",
        ColumnKind::Transform => "Apply a group-wise aggregation and broadcast it back onto every row.",
        ColumnKind::Winsorize => {
            "Clip the extreme values of a numeric column to the given percentile limits, optionally per group."
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

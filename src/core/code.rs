// Core: pandas code preview for a configuration.

use crate::domain::configuration::{
    BinsConfig, BinsOperation, Configuration, DatetimeConfig, DatetimeOperation, NumericConfig,
    NumericSide, RandomConfig, RandomType, SideType, TransformConfig, TypeConversionConfig,
    WinsorizeConfig,
};

pub const HOVER_HINT: &str = "hover to see more...";

/// How a preview is shown in the builder's footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeSummary {
    Empty,
    Lines(Vec<String>),
    /// First two lines are shown, the rest sits behind `HOVER_HINT`.
    Truncated { head: Vec<String>, full: String },
}

pub fn summarize(lines: &[String]) -> CodeSummary {
    match lines.len() {
        0 => CodeSummary::Empty,
        1 | 2 => CodeSummary::Lines(lines.to_vec()),
        _ => CodeSummary::Truncated {
            head: lines[..2].to_vec(),
            full: lines.join("\n"),
        },
    }
}

/// Lines are empty until the configuration has enough to say something useful.
pub fn build_code(cfg: &Configuration) -> Vec<String> {
    match cfg {
        Configuration::Numeric(c) => numeric_code(c),
        Configuration::Bins(c) => bins_code(c),
        Configuration::Datetime(c) => datetime_code(c),
        Configuration::Random(c) => random_code(c),
        Configuration::TypeConversion(c) => type_conversion_code(c),
        Configuration::Transform(c) => transform_code(c),
        Configuration::Winsorize(c) => winsorize_code(c),
    }
}

fn py_str(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn py_list<S: AsRef<str>>(items: &[S]) -> String {
    let inner: Vec<String> = items.iter().map(|i| py_str(i.as_ref())).collect();
    format!("[{}]", inner.join(", "))
}

fn py_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn column_ref(col: &str) -> String {
    format!("df[{}]", py_str(col))
}

fn numeric_side(side: &NumericSide) -> Option<String> {
    match side.side_type {
        SideType::Col => side.col.as_deref().map(column_ref),
        SideType::Val => side.val.clone(),
    }
}

fn numeric_code(cfg: &NumericConfig) -> Vec<String> {
    let (Some(left), Some(op), Some(right)) = (
        numeric_side(&cfg.left),
        cfg.operation,
        numeric_side(&cfg.right),
    ) else {
        return Vec::new();
    };
    vec![format!("{} {} {}", left, op.symbol(), right)]
}

fn bins_code(cfg: &BinsConfig) -> Vec<String> {
    let (Some(col), Some(bins)) = (cfg.col.as_deref(), cfg.bins) else {
        return Vec::new();
    };
    let labels = cfg.label_list();
    let labels = if labels.is_empty() {
        String::new()
    } else {
        format!(", labels={}", py_list(&labels))
    };
    let line = match cfg.operation {
        BinsOperation::Cut => format!("pd.cut({}, bins={}{})", column_ref(col), bins, labels),
        BinsOperation::Qcut => format!("pd.qcut({}, q={}{})", column_ref(col), bins, labels),
    };
    vec![line]
}

fn datetime_code(cfg: &DatetimeConfig) -> Vec<String> {
    let Some(col) = cfg.col.as_deref() else {
        return Vec::new();
    };
    match cfg.operation {
        DatetimeOperation::Property => match cfg.property.as_deref() {
            Some("weekday_name") => vec![format!("{}.dt.day_name()", column_ref(col))],
            Some(property) => vec![format!("{}.dt.{}", column_ref(col), property)],
            None => Vec::new(),
        },
        DatetimeOperation::Conversion => match cfg.conversion.as_deref() {
            Some(conversion) => {
                let (freq, how) = conversion.split_once('_').unwrap_or((conversion, "start"));
                let period = match freq {
                    "month" => "M",
                    "quarter" => "Q",
                    "year" => "Y",
                    "week" => "W",
                    other => other,
                };
                vec![format!(
                    "{}.dt.to_period('{}').dt.to_timestamp(how='{}')",
                    column_ref(col),
                    period,
                    how
                )]
            }
            None => Vec::new(),
        },
    }
}

fn random_code(cfg: &RandomConfig) -> Vec<String> {
    match cfg.random_type {
        RandomType::Float => vec![format!(
            "np.random.uniform({}, {}, size=len(df))",
            cfg.low.unwrap_or(0.0),
            cfg.high.unwrap_or(1.0)
        )],
        RandomType::Int => vec![format!(
            "np.random.randint({}, {}, size=len(df))",
            cfg.low.unwrap_or(0.0) as i64,
            cfg.high.unwrap_or(100.0) as i64
        )],
        RandomType::String => {
            let chars = match cfg.chars.as_deref() {
                Some(chars) => py_str(chars),
                None => "string.ascii_letters".to_string(),
            };
            vec![
                format!("chars = {}", chars),
                format!(
                    "pd.Series([''.join(random.choice(chars) for _ in range({})) for _ in range(len(df))])",
                    cfg.length.unwrap_or(10)
                ),
            ]
        }
        RandomType::Choice => {
            let choices = cfg.choice_list();
            if choices.is_empty() {
                return Vec::new();
            }
            vec![format!("np.random.choice({}, len(df))", py_list(&choices))]
        }
        RandomType::Bool => vec!["np.random.choice([True, False], len(df))".to_string()],
        RandomType::Date => {
            let start = cfg.start.as_deref().unwrap_or("1900-01-01");
            let end = cfg.end.as_deref().unwrap_or("2099-12-31");
            let freq = if cfg.business_day.unwrap_or(false) {
                "B"
            } else {
                "D"
            };
            let mut lines = vec![format!(
                "dates = pd.date_range({}, {}, freq='{}')",
                py_str(start),
                py_str(end),
                freq
            )];
            if cfg.timestamps.unwrap_or(false) {
                lines.push(
                    "dates = dates + pd.to_timedelta(np.random.randint(0, 86400, len(dates)), unit='s')"
                        .to_string(),
                );
            }
            lines.push("np.random.choice(dates, len(df))".to_string());
            lines
        }
    }
}

fn type_conversion_code(cfg: &TypeConversionConfig) -> Vec<String> {
    let (Some(col), Some(to)) = (cfg.col.as_deref(), cfg.to.as_deref()) else {
        return Vec::new();
    };
    let from = cfg.from.as_deref().unwrap_or_default();
    let line = match to {
        "datetime" if from.starts_with("int") || from.starts_with("uint") => format!(
            "pd.to_datetime({}, unit={})",
            column_ref(col),
            py_str(cfg.unit.as_deref().unwrap_or("D"))
        ),
        "datetime" => match cfg.fmt.as_deref() {
            Some(fmt) => format!("pd.to_datetime({}, format={})", column_ref(col), py_str(fmt)),
            None => format!(
                "pd.to_datetime({}, infer_datetime_format=True)",
                column_ref(col)
            ),
        },
        "str" if from.starts_with("datetime") => format!(
            "{}.dt.strftime({})",
            column_ref(col),
            py_str(cfg.fmt.as_deref().unwrap_or("%Y%m%d"))
        ),
        other => format!("{}.astype({})", column_ref(col), py_str(other)),
    };
    vec![line]
}

fn transform_code(cfg: &TransformConfig) -> Vec<String> {
    let (Some(col), Some(agg)) = (cfg.col.as_deref(), cfg.agg.as_deref()) else {
        return Vec::new();
    };
    if cfg.group.is_empty() {
        return Vec::new();
    }
    vec![format!(
        "df.groupby({})[{}].transform({})",
        py_list(&cfg.group),
        py_str(col),
        py_str(agg)
    )]
}

fn winsorize_code(cfg: &WinsorizeConfig) -> Vec<String> {
    let Some(col) = cfg.col.as_deref() else {
        return Vec::new();
    };
    let mut kwargs = Vec::new();
    if let Some([lower, upper]) = cfg.limits {
        kwargs.push(format!("limits=[{}, {}]", lower, upper));
    }
    if let Some([lower, upper]) = cfg.inclusive {
        kwargs.push(format!(
            "inclusive=[{}, {}]",
            py_bool(lower),
            py_bool(upper)
        ));
    }
    let kwargs = if kwargs.is_empty() {
        String::new()
    } else {
        format!(", {}", kwargs.join(", "))
    };

    let mut lines = vec!["from scipy.stats import mstats".to_string(), String::new()];
    match cfg.group.as_deref() {
        Some(group) if !group.is_empty() => {
            lines.push("def winsorize_series(group):".to_string());
            lines.push(format!("\treturn mstats.winsorize(group{})", kwargs));
            lines.push(String::new());
            lines.push(format!(
                "df.groupby({})[{}].transform(winsorize_series)",
                py_list(group),
                py_str(col)
            ));
        }
        _ => lines.push(format!("mstats.winsorize({}{})", column_ref(col), kwargs)),
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::configuration::NumericOperation;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_summarize_truncates_after_two_lines() {
        assert_eq!(summarize(&[]), CodeSummary::Empty);
        assert_eq!(
            summarize(&lines(&["a", "b"])),
            CodeSummary::Lines(lines(&["a", "b"]))
        );
        assert_eq!(
            summarize(&lines(&["a", "b", "c"])),
            CodeSummary::Truncated {
                head: lines(&["a", "b"]),
                full: "a\nb\nc".to_string(),
            }
        );
    }

    #[test]
    fn test_numeric_code() {
        let cfg = Configuration::Numeric(NumericConfig {
            left: NumericSide::column("a"),
            right: NumericSide::value("2"),
            operation: Some(NumericOperation::Multiply),
        });
        assert_eq!(build_code(&cfg), vec!["df['a'] * 2"]);
        assert!(build_code(&Configuration::Numeric(NumericConfig::default())).is_empty());
    }

    #[test]
    fn test_grouped_winsorize_code() {
        let cfg = Configuration::Winsorize(WinsorizeConfig {
            col: Some("col1".to_string()),
            group: Some(vec!["col2".to_string()]),
            limits: Some([0.2, 0.2]),
            inclusive: Some([true, false]),
        });
        assert_eq!(
            build_code(&cfg),
            vec![
                "from scipy.stats import mstats",
                "",
                "def winsorize_series(group):",
                "\treturn mstats.winsorize(group, limits=[0.2, 0.2], inclusive=[True, False])",
                "",
                "df.groupby(['col2'])['col1'].transform(winsorize_series)",
            ]
        );
    }

    #[test]
    fn test_ungrouped_winsorize_code() {
        let cfg = Configuration::Winsorize(WinsorizeConfig {
            col: Some("col1".to_string()),
            ..Default::default()
        });
        assert_eq!(
            build_code(&cfg).last().map(String::as_str),
            Some("mstats.winsorize(df['col1'])")
        );
    }

    #[test]
    fn test_datetime_conversion_code() {
        let cfg = Configuration::Datetime(DatetimeConfig {
            col: Some("ts".to_string()),
            operation: DatetimeOperation::Conversion,
            property: None,
            conversion: Some("quarter_end".to_string()),
        });
        assert_eq!(
            build_code(&cfg),
            vec!["df['ts'].dt.to_period('Q').dt.to_timestamp(how='end')"]
        );
    }

    #[test]
    fn test_transform_code_quotes_names() {
        let cfg = Configuration::Transform(TransformConfig {
            group: vec!["o'brien".to_string()],
            col: Some("a".to_string()),
            agg: Some("mean".to_string()),
        });
        assert_eq!(
            build_code(&cfg),
            vec!["df.groupby(['o\\'brien'])['a'].transform('mean')"]
        );
    }

    #[test]
    fn test_type_conversion_code() {
        let cfg = Configuration::TypeConversion(TypeConversionConfig {
            col: Some("a".to_string()),
            from: Some("int64".to_string()),
            to: Some("datetime".to_string()),
            fmt: None,
            unit: Some("ms".to_string()),
        });
        assert_eq!(build_code(&cfg), vec!["pd.to_datetime(df['a'], unit='ms')"]);
    }
}

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::http::HttpDatasetService;
pub use crate::config::toml_config::BuildConfig;
pub use crate::core::pipeline::{SubmissionPipeline, SubmitOutcome};
pub use crate::core::state::{Effect, Event, SpecificationState, Stage};
pub use crate::domain::configuration::Configuration;
pub use crate::domain::model::{ColumnKind, ColumnMetadata, ColumnSpecification, ErrorMessage};
pub use crate::domain::ports::{CompletionHandler, CompletionMode, CompletionSignal, DatasetService};
pub use crate::utils::error::{BuilderError, Result};

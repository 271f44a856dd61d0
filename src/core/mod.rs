pub mod code;
pub mod editors;
pub mod pipeline;
pub mod registry;
pub mod state;
pub mod validators;

pub use crate::domain::configuration::Configuration;
pub use crate::domain::model::{ColumnKind, ColumnMetadata, ColumnSpecification, ErrorMessage};
pub use crate::domain::ports::{CompletionHandler, CompletionMode, CompletionSignal, DatasetService};
pub use crate::utils::error::Result;

use crate::domain::model::{ColumnMetadata, ColumnSpecification};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote dataset service: supplies column metadata and materializes new columns.
#[async_trait]
pub trait DatasetService: Send + Sync {
    async fn fetch_columns(&self) -> Result<ColumnMetadata>;
    async fn build_column(&self, spec: &ColumnSpecification) -> Result<()>;
}

/// How the builder was launched, which decides what happens after a column is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMode {
    StandaloneWindow,
    EmbeddedPanel,
}

impl CompletionMode {
    pub const POPUP_PATH_PREFIX: &'static str = "/dtale/popup/build";

    pub fn from_launch_path(path: &str) -> Self {
        if path.starts_with(Self::POPUP_PATH_PREFIX) {
            CompletionMode::StandaloneWindow
        } else {
            CompletionMode::EmbeddedPanel
        }
    }

    pub fn signal(&self) -> CompletionSignal {
        match self {
            CompletionMode::StandaloneWindow => CompletionSignal::ReloadOpenerAndClose,
            CompletionMode::EmbeddedPanel => CompletionSignal::RefreshPanelAndClose,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionSignal {
    /// Reload the window that opened the popup, then close the popup.
    ReloadOpenerAndClose,
    /// Ask the parent panel to refresh its data, then close the modal.
    RefreshPanelAndClose,
}

pub trait CompletionHandler: Send + Sync {
    fn complete(&self, signal: CompletionSignal);
}

impl<F> CompletionHandler for F
where
    F: Fn(CompletionSignal) + Send + Sync,
{
    fn complete(&self, signal: CompletionSignal) {
        (self)(signal);
    }
}

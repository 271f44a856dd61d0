use crate::core::editors::EditorUpdate;
use crate::core::state::{Effect, Event, SpecificationState};
use crate::domain::model::{ColumnKind, ErrorMessage};
use crate::domain::ports::{CompletionHandler, CompletionMode, CompletionSignal, DatasetService};

/// Result of one submit action, as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight, or the session cannot submit.
    Ignored,
    /// Local validation failed; nothing was sent.
    Rejected(ErrorMessage),
    /// The service refused the column, or could not be reached.
    Failed(ErrorMessage),
    Completed(CompletionSignal),
}

/// One builder session: loads column metadata, applies edits and submits the
/// finished specification to the dataset service.
pub struct SubmissionPipeline<S: DatasetService, H: CompletionHandler> {
    service: S,
    mode: CompletionMode,
    on_complete: H,
    state: SpecificationState,
}

impl<S: DatasetService, H: CompletionHandler> SubmissionPipeline<S, H> {
    pub fn new(service: S, mode: CompletionMode, on_complete: H) -> Self {
        Self {
            service,
            mode,
            on_complete,
            state: SpecificationState::new(),
        }
    }

    pub fn state(&self) -> &SpecificationState {
        &self.state
    }

    pub fn mode(&self) -> CompletionMode {
        self.mode
    }

    /// Issues the single metadata request of the session. Failures are kept
    /// in the state as a dismissible error.
    pub async fn load_columns(&mut self) {
        if self.state.dispatch(Event::ColumnsRequested) != Effect::FetchColumns {
            return;
        }
        tracing::info!("📥 Loading column metadata");
        let event = match self.service.fetch_columns().await {
            Ok(columns) => Event::ColumnsLoaded(columns),
            Err(e) => {
                tracing::error!("❌ Column metadata request failed: {}", e);
                Event::ColumnsFailed(e.into())
            }
        };
        self.state.dispatch(event);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.state.dispatch(Event::NameChanged(name.into()));
    }

    pub fn select_kind(&mut self, kind: ColumnKind) {
        self.state.dispatch(Event::KindSelected(kind));
    }

    pub fn apply_editor_update(&mut self, update: EditorUpdate) {
        self.state.dispatch(Event::EditorUpdated(update));
    }

    pub fn dismiss_error(&mut self) {
        self.state.dispatch(Event::ErrorDismissed);
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let spec = match self.state.dispatch(Event::SubmitRequested) {
            Effect::Submit(spec) => spec,
            _ => {
                return match self.state.error() {
                    Some(error) if !self.state.submitting() => {
                        SubmitOutcome::Rejected(error.clone())
                    }
                    _ => SubmitOutcome::Ignored,
                };
            }
        };

        match self.service.build_column(&spec).await {
            Ok(()) => {
                if self.state.dispatch(Event::SubmitSucceeded) == Effect::Complete {
                    let signal = self.mode.signal();
                    tracing::info!("Completing session with {:?}", signal);
                    self.on_complete.complete(signal);
                    SubmitOutcome::Completed(signal)
                } else {
                    SubmitOutcome::Ignored
                }
            }
            Err(e) => {
                tracing::error!("❌ Column creation failed: {}", e);
                let error: ErrorMessage = e.into();
                self.state.dispatch(Event::SubmitFailed(error.clone()));
                SubmitOutcome::Failed(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::configuration::{Configuration, WinsorizeConfig};
    use crate::domain::model::{ColumnInfo, ColumnMetadata, ColumnSpecification};
    use crate::utils::error::{BuilderError, Result};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockService {
        fail_columns: bool,
        reject_with: Option<String>,
        submitted: Arc<Mutex<Vec<ColumnSpecification>>>,
    }

    #[async_trait]
    impl DatasetService for MockService {
        async fn fetch_columns(&self) -> Result<ColumnMetadata> {
            if self.fail_columns {
                return Err(BuilderError::ServiceError {
                    message: "No data found".to_string(),
                    traceback: None,
                });
            }
            Ok(ColumnMetadata::new(vec![ColumnInfo {
                name: "col1".to_string(),
                dtype: "float64".to_string(),
                index: Some(0),
            }]))
        }

        async fn build_column(&self, spec: &ColumnSpecification) -> Result<()> {
            self.submitted.lock().unwrap().push(spec.clone());
            match &self.reject_with {
                Some(message) => Err(BuilderError::ServiceError {
                    message: message.clone(),
                    traceback: Some("Traceback (most recent call last)".to_string()),
                }),
                None => Ok(()),
            }
        }
    }

    fn winsorize_update() -> EditorUpdate {
        EditorUpdate::from_config(Configuration::Winsorize(WinsorizeConfig {
            col: Some("col1".to_string()),
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn test_submit_completes_with_mode_signal() {
        let service = MockService::default();
        let signals = Arc::new(Mutex::new(Vec::new()));
        let recorded = signals.clone();
        let mut pipeline = SubmissionPipeline::new(
            service.clone(),
            CompletionMode::StandaloneWindow,
            move |signal: CompletionSignal| recorded.lock().unwrap().push(signal),
        );

        pipeline.load_columns().await;
        pipeline.set_name("clipped");
        pipeline.select_kind(ColumnKind::Winsorize);
        pipeline.apply_editor_update(winsorize_update());

        assert_eq!(
            pipeline.submit().await,
            SubmitOutcome::Completed(CompletionSignal::ReloadOpenerAndClose)
        );
        assert_eq!(
            *signals.lock().unwrap(),
            vec![CompletionSignal::ReloadOpenerAndClose]
        );
        assert_eq!(service.submitted.lock().unwrap().len(), 1);
        assert_eq!(pipeline.submit().await, SubmitOutcome::Ignored);
        assert_eq!(service.submitted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_locally_never_reaches_service() {
        let service = MockService::default();
        let mut pipeline = SubmissionPipeline::new(
            service.clone(),
            CompletionMode::EmbeddedPanel,
            |_: CompletionSignal| {},
        );
        pipeline.load_columns().await;
        pipeline.set_name("col1");
        pipeline.select_kind(ColumnKind::Winsorize);
        pipeline.apply_editor_update(winsorize_update());

        assert_eq!(
            pipeline.submit().await,
            SubmitOutcome::Rejected(ErrorMessage::new("The column 'col1' already exists!"))
        );
        assert!(service.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_before_load_waits_for_columns() {
        let service = MockService::default();
        let mut pipeline = SubmissionPipeline::new(
            service.clone(),
            CompletionMode::EmbeddedPanel,
            |_: CompletionSignal| {},
        );
        pipeline.set_name("col1");
        pipeline.select_kind(ColumnKind::Winsorize);
        pipeline.apply_editor_update(winsorize_update());

        assert_eq!(pipeline.submit().await, SubmitOutcome::Ignored);
        assert!(service.submitted.lock().unwrap().is_empty());

        pipeline.load_columns().await;
        assert!(pipeline.state().columns().is_some());
        assert_eq!(
            pipeline.submit().await,
            SubmitOutcome::Rejected(ErrorMessage::new("The column 'col1' already exists!"))
        );
        assert!(service.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_service_rejection_is_retryable() {
        let service = MockService {
            reject_with: Some("cannot winsorize strings".to_string()),
            ..Default::default()
        };
        let mut pipeline = SubmissionPipeline::new(
            service.clone(),
            CompletionMode::EmbeddedPanel,
            |_: CompletionSignal| {},
        );
        pipeline.load_columns().await;
        pipeline.set_name("clipped");
        pipeline.select_kind(ColumnKind::Winsorize);
        pipeline.apply_editor_update(winsorize_update());

        match pipeline.submit().await {
            SubmitOutcome::Failed(error) => {
                assert_eq!(error.error, "cannot winsorize strings");
                assert!(error.traceback.is_some());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!pipeline.state().submitting());
        pipeline.dismiss_error();
        assert!(pipeline.state().error().is_none());

        assert!(matches!(pipeline.submit().await, SubmitOutcome::Failed(_)));
        assert_eq!(service.submitted.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_metadata_failure_is_surfaced() {
        let service = MockService {
            fail_columns: true,
            ..Default::default()
        };
        let mut pipeline = SubmissionPipeline::new(
            service,
            CompletionMode::EmbeddedPanel,
            |_: CompletionSignal| {},
        );
        pipeline.load_columns().await;
        assert_eq!(pipeline.state().error().unwrap().error, "No data found");
        assert!(pipeline.state().columns().is_none());
        assert!(!pipeline.state().loading_columns());
    }
}

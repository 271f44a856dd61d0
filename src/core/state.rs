// Core: the in-progress column specification and its transitions.
// dispatch() mutates the state and returns the Effect the caller must run; no I/O here.

use crate::core::code::{summarize, CodeSummary};
use crate::core::editors::EditorUpdate;
use crate::core::registry::{self, EditorInput};
use crate::core::validators;
use crate::domain::configuration::Configuration;
use crate::domain::model::{ColumnKind, ColumnMetadata, ColumnSpecification, ErrorMessage};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    LoadingColumns,
    Ready,
    /// Metadata could not be loaded; editing and submitting still work.
    LoadFailed,
    Validating,
    Submitting,
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ColumnsRequested,
    ColumnsLoaded(ColumnMetadata),
    ColumnsFailed(ErrorMessage),
    KindSelected(ColumnKind),
    EditorUpdated(EditorUpdate),
    NameChanged(String),
    ErrorDismissed,
    SubmitRequested,
    SubmitSucceeded,
    SubmitFailed(ErrorMessage),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FetchColumns,
    Submit(ColumnSpecification),
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecificationState {
    kind: ColumnKind,
    name: String,
    configs: BTreeMap<ColumnKind, Configuration>,
    code: BTreeMap<ColumnKind, Vec<String>>,
    columns: Option<ColumnMetadata>,
    stage: Stage,
    error: Option<ErrorMessage>,
}

impl Default for SpecificationState {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecificationState {
    pub fn new() -> Self {
        Self {
            kind: ColumnKind::default(),
            name: String::new(),
            configs: BTreeMap::new(),
            code: BTreeMap::new(),
            columns: None,
            stage: Stage::Idle,
            error: None,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn columns(&self) -> Option<&ColumnMetadata> {
        self.columns.as_ref()
    }

    /// Column listing handed to the selected kind's editor, if it takes one.
    pub fn editor_columns(&self) -> Option<&ColumnMetadata> {
        match registry::entry(self.kind).editor {
            EditorInput::Columns => self.columns.as_ref(),
            EditorInput::Standalone => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorMessage> {
        self.error.as_ref()
    }

    pub fn loading_columns(&self) -> bool {
        self.stage == Stage::LoadingColumns
    }

    pub fn submitting(&self) -> bool {
        self.stage == Stage::Submitting
    }

    /// The configuration of the selected kind, the only one that is ever validated or sent.
    pub fn active_config(&self) -> Option<&Configuration> {
        self.configs.get(&self.kind)
    }

    pub fn config_for(&self, kind: ColumnKind) -> Option<&Configuration> {
        self.configs.get(&kind)
    }

    pub fn code_for(&self, kind: ColumnKind) -> &[String] {
        self.code.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn code_summary(&self) -> CodeSummary {
        summarize(self.code_for(self.kind))
    }

    pub fn dispatch(&mut self, event: Event) -> Effect {
        match event {
            Event::ColumnsRequested => self.request_columns(),
            Event::ColumnsLoaded(columns) => {
                tracing::info!("📋 Loaded {} columns", columns.len());
                self.columns = Some(columns);
                self.error = None;
                if self.stage == Stage::LoadingColumns {
                    self.stage = Stage::Ready;
                }
                Effect::None
            }
            Event::ColumnsFailed(error) => {
                tracing::warn!("Failed to load columns: {}", error);
                self.error = Some(error);
                if self.stage == Stage::LoadingColumns {
                    self.stage = Stage::LoadFailed;
                }
                Effect::None
            }
            Event::KindSelected(kind) => {
                self.select_kind(kind);
                Effect::None
            }
            Event::EditorUpdated(update) => {
                self.apply_editor_update(update);
                Effect::None
            }
            Event::NameChanged(name) => {
                self.name = name;
                Effect::None
            }
            Event::ErrorDismissed => {
                self.error = None;
                Effect::None
            }
            Event::SubmitRequested => self.request_submit(),
            Event::SubmitSucceeded => {
                if self.stage != Stage::Submitting {
                    tracing::warn!("Ignoring submission result in stage {:?}", self.stage);
                    return Effect::None;
                }
                tracing::info!("✅ Column '{}' created", self.name);
                self.stage = Stage::Completed;
                Effect::Complete
            }
            Event::SubmitFailed(error) => {
                if self.stage != Stage::Submitting {
                    tracing::warn!("Ignoring submission result in stage {:?}", self.stage);
                    return Effect::None;
                }
                tracing::warn!("Column creation rejected: {}", error);
                self.error = Some(error);
                self.stage = Stage::Ready;
                Effect::None
            }
        }
    }

    fn request_columns(&mut self) -> Effect {
        if self.stage != Stage::Idle {
            tracing::debug!("Columns already requested (stage {:?})", self.stage);
            return Effect::None;
        }
        self.stage = Stage::LoadingColumns;
        Effect::FetchColumns
    }

    /// Other kinds keep their configuration and code so switching back restores them.
    fn select_kind(&mut self, kind: ColumnKind) {
        tracing::debug!("Column kind {} -> {}", self.kind, kind);
        self.kind = kind;
        if let Some(seed) = registry::entry(kind).seed {
            self.configs.entry(kind).or_insert_with(seed);
        }
    }

    /// Updates from an editor that is no longer selected are dropped whole.
    fn apply_editor_update(&mut self, update: EditorUpdate) {
        if let Some(target) = update.cfg.as_ref().map(Configuration::kind) {
            if target != self.kind {
                tracing::warn!(
                    "Dropping update from the {} editor while {} is selected",
                    target,
                    self.kind
                );
                return;
            }
        }
        if let Some(cfg) = update.cfg {
            tracing::debug!("Configuration for {} updated", self.kind);
            self.configs.insert(self.kind, cfg);
        }
        if let Some(code) = update.code {
            self.code.insert(self.kind, code);
        }
    }

    fn request_submit(&mut self) -> Effect {
        // Idle means metadata was never requested; the duplicate check needs it.
        match self.stage {
            Stage::Ready | Stage::LoadFailed => {}
            stage => {
                tracing::debug!("Submit ignored in stage {:?}", stage);
                return Effect::None;
            }
        }

        self.stage = Stage::Validating;
        match self.validate() {
            Ok(spec) => {
                tracing::info!("🚀 Submitting {} column '{}'", spec.kind, spec.name);
                self.error = None;
                self.stage = Stage::Submitting;
                Effect::Submit(spec)
            }
            Err(error) => {
                tracing::warn!("Column specification rejected: {}", error);
                self.error = Some(error);
                self.stage = Stage::Ready;
                Effect::None
            }
        }
    }

    /// Name, then uniqueness, then the selected kind's validator. First failure wins.
    pub fn validate(&self) -> Result<ColumnSpecification, ErrorMessage> {
        if self.name.is_empty() {
            return Err(ErrorMessage::new("Name is required!"));
        }
        if self
            .columns
            .as_ref()
            .is_some_and(|columns| columns.contains(&self.name))
        {
            return Err(ErrorMessage::new(format!(
                "The column '{}' already exists!",
                self.name
            )));
        }
        if let Some(error) = validators::validate(self.kind, self.active_config()) {
            return Err(ErrorMessage::new(error));
        }
        Ok(ColumnSpecification {
            name: self.name.clone(),
            kind: self.kind,
            cfg: self
                .active_config()
                .cloned()
                .unwrap_or_else(|| Configuration::default_for(self.kind)),
        })
    }
}

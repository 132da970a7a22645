use crate::model::ModelDescriptor;
use crate::run::RunId;

/// Inbound events: user intent from the view and completions from the
/// asynchronous collaborators.
///
/// Collaborator completions carry the id of the run they belong to; the
/// update function drops them when a newer run has become current. Failures
/// arrive pre-formatted as display strings so the core stays free of
/// transport-level error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User activated the toolbar action for the page at `url`.
    PanelToggled { url: String },
    /// Storage collaborator finished loading the model configuration.
    ModelsLoaded {
        saved: Option<ModelDescriptor>,
        enabled: Vec<ModelDescriptor>,
    },
    /// User asked for a fresh summary of the current page.
    RefreshRequested,
    /// User picked a model from the menu.
    ModelSelected(ModelDescriptor),
    /// The page under the panel changed.
    PageNavigated { url: String },
    /// User dismissed the panel.
    CloseRequested,
    /// Extraction collaborator finished for `run_id`.
    ArticleExtracted {
        run_id: RunId,
        result: Result<String, String>,
    },
    /// Summarization collaborator finished for `run_id`.
    SummaryReady {
        run_id: RunId,
        result: Result<String, String>,
    },
    /// Markdown renderer finished for `run_id`.
    SummaryRendered {
        run_id: RunId,
        result: Result<String, String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

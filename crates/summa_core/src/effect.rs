use crate::model::ModelDescriptor;
use crate::run::RunId;

/// Requests from the update function to the outside world. The core never
/// performs IO itself; the driver executes these against the engine and the
/// configuration store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the persisted model selection and the enabled model list.
    LoadModels,
    /// Extract the readable article for `url` as markdown.
    ExtractArticle { run_id: RunId, url: String },
    /// Summarize `article` with `model`.
    Summarize {
        run_id: RunId,
        model: ModelDescriptor,
        article: String,
    },
    /// Render the summary markdown to HTML.
    RenderSummary { run_id: RunId, markdown: String },
    /// Persist the current model choice.
    PersistModelChoice(ModelDescriptor),
}

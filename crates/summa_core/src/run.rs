use crate::model::ModelDescriptor;

/// Generation counter distinguishing summarization attempts. Assigned at run
/// start and compared against the panel's current id to detect supersession.
pub type RunId = u64;

/// Pipeline stage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Phase {
    #[default]
    Idle,
    Extracting,
    Summarizing,
    Parsing,
    Completed,
    Failed,
}

impl Phase {
    /// Terminal phases receive no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Completed | Phase::Failed)
    }
}

/// Placeholder summary shown when no model is configured.
pub const MODEL_NOT_CONFIGURED: &str = "### Error\n\nNo language model is configured";

/// Placeholder summary shown when extraction produced no article text.
pub const EMPTY_ARTICLE: &str = "### Error\n\nCould not extract the page article";

/// Placeholder summary shown when the model replied with empty content.
pub const EMPTY_SUMMARY: &str = "### Error\n\nThe language model returned an empty summary";

/// Display string used when markdown rendering itself fails.
pub const RENDER_FAILURE_HTML: &str = "<p>Could not render the summary.</p>";

/// Formats a transport-level summarization failure as a renderable summary.
pub fn transport_failure_summary(message: &str) -> String {
    format!("### Error\n\nSummarization failed: {message}")
}

/// One summarization attempt for one (page URL, model) pair.
///
/// `article` and `summary` are written exactly once, when their phase
/// completes; `rendered_html` is derived from `summary` during Parsing. A run
/// that has been superseded by a newer one is dropped and never written again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub id: RunId,
    pub url: String,
    pub model: Option<ModelDescriptor>,
    pub phase: Phase,
    pub article: String,
    pub summary: String,
    pub rendered_html: String,
}

impl Run {
    /// A fresh run that still needs its article extracted.
    pub fn new(id: RunId, url: String, model: Option<ModelDescriptor>) -> Self {
        Self {
            id,
            url,
            model,
            phase: Phase::Extracting,
            article: String::new(),
            summary: String::new(),
            rendered_html: String::new(),
        }
    }

    /// A run reusing an already extracted article; starts at Summarizing.
    pub fn with_article(
        id: RunId,
        url: String,
        model: Option<ModelDescriptor>,
        article: String,
    ) -> Self {
        Self {
            id,
            url,
            model,
            phase: Phase::Summarizing,
            article,
            summary: String::new(),
            rendered_html: String::new(),
        }
    }
}

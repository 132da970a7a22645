//! Summa core: pure pipeline state machine and view-model helpers.
mod effect;
mod model;
mod msg;
mod run;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{reconcile, ModelDescriptor};
pub use msg::Msg;
pub use run::{
    transport_failure_summary, Phase, Run, RunId, EMPTY_ARTICLE, EMPTY_SUMMARY,
    MODEL_NOT_CONFIGURED, RENDER_FAILURE_HTML,
};
pub use state::{normalize_url_for_compare, PanelState};
pub use update::update;
pub use view_model::{PanelViewModel, ProgressStep, StepState};

use url::Url;

use crate::model::ModelDescriptor;
use crate::run::{Run, RunId};
use crate::view_model::PanelViewModel;

/// Instance-scoped panel state. Mutated only by the update function, which
/// keeps the "current run id" single-writer: every start allocates the next
/// id before any collaborator completion for an older run can be observed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelState {
    visible: bool,
    current_url: String,
    models_loaded: bool,
    models: Vec<ModelDescriptor>,
    current_model: Option<ModelDescriptor>,
    run: Option<Run>,
    next_run_id: RunId,
    dirty: bool,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PanelViewModel {
        PanelViewModel::project(
            self.visible,
            &self.current_url,
            self.current_model.as_ref(),
            self.run.as_ref(),
        )
    }

    /// Returns whether a re-render is due, resetting the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn current_model(&self) -> Option<&ModelDescriptor> {
        self.current_model.as_ref()
    }

    /// The enabled model list, for building the model menu.
    pub fn enabled_models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn current_run(&self) -> Option<&Run> {
        self.run.as_ref()
    }

    pub(crate) fn models_loaded(&self) -> bool {
        self.models_loaded
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.dirty = true;
        }
    }

    pub(crate) fn set_current_url(&mut self, url: String) {
        self.current_url = url;
        self.dirty = true;
    }

    pub(crate) fn set_models(&mut self, models: Vec<ModelDescriptor>) {
        self.models = models;
        self.models_loaded = true;
        self.dirty = true;
    }

    pub(crate) fn set_current_model(&mut self, model: Option<ModelDescriptor>) {
        self.current_model = model;
        self.dirty = true;
    }

    /// Allocates a fresh run id; the last caller always wins supersession.
    pub(crate) fn allocate_run_id(&mut self) -> RunId {
        self.next_run_id += 1;
        self.next_run_id
    }

    /// Installs `run` as current. The previous run, if any, is dropped here:
    /// abandoned runs receive no further transitions.
    pub(crate) fn install_run(&mut self, run: Run) {
        self.run = Some(run);
        self.dirty = true;
    }

    /// Mutable access to the current run when `run_id` is still current.
    /// Returns `None` for superseded ids, which callers must treat as a
    /// request to do nothing at all.
    pub(crate) fn run_if_current(&mut self, run_id: RunId) -> Option<&mut Run> {
        match self.run.as_mut() {
            Some(run) if run.id == run_id => {
                self.dirty = true;
                Some(run)
            }
            _ => None,
        }
    }
}

/// Normalizes a URL for change detection: parsed URLs get a lowercased scheme
/// and host and lose their fragment, so `#section` jumps do not restart the
/// pipeline. Unparseable input falls back to a trimmed string compare.
pub fn normalize_url_for_compare(raw: &str) -> String {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => trimmed.to_string(),
    }
}

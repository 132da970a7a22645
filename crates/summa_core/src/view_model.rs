use crate::model::ModelDescriptor;
use crate::run::{Phase, Run};

/// Progress indicator state for one pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Active,
    Done,
}

/// One row of the progress indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStep {
    pub label: &'static str,
    pub state: StepState,
}

/// Everything the panel needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelViewModel {
    pub visible: bool,
    pub url: String,
    pub model_name: Option<String>,
    pub phase: Phase,
    pub steps: Vec<ProgressStep>,
    /// Raw summary markdown, for copy-to-clipboard.
    pub raw_summary: String,
    /// Rendered summary, shown once the run is terminal.
    pub summary_html: String,
}

impl PanelViewModel {
    pub(crate) fn project(
        visible: bool,
        url: &str,
        model: Option<&ModelDescriptor>,
        run: Option<&Run>,
    ) -> Self {
        let phase = run.map(|r| r.phase).unwrap_or(Phase::Idle);
        Self {
            visible,
            url: url.to_string(),
            model_name: model.map(|m| m.display_name.clone()),
            phase,
            steps: progress_steps(phase),
            raw_summary: run.map(|r| r.summary.clone()).unwrap_or_default(),
            summary_html: run.map(|r| r.rendered_html.clone()).unwrap_or_default(),
        }
    }

    /// Whether the current run has reached a terminal, renderable state.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }
}

/// Derives the three progress rows from the run phase: steps before the
/// current phase are done, the current one is active, later ones pending.
fn progress_steps(phase: Phase) -> Vec<ProgressStep> {
    const STEPS: [(&str, Phase); 3] = [
        ("Extracting", Phase::Extracting),
        ("Summarizing", Phase::Summarizing),
        ("Parsing", Phase::Parsing),
    ];
    STEPS
        .iter()
        .map(|&(label, step_phase)| ProgressStep {
            label,
            state: if phase > step_phase {
                StepState::Done
            } else if phase == step_phase {
                StepState::Active
            } else {
                StepState::Pending
            },
        })
        .collect()
}

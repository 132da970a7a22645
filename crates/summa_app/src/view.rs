//! Terminal rendering of the panel view model: progress on stderr, the final
//! summary on stdout.

use summa_core::{PanelViewModel, StepState};

/// Prints each pipeline step once, when it becomes active.
pub struct ProgressPrinter {
    last: Option<&'static str>,
}

impl ProgressPrinter {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn render(&mut self, view: &PanelViewModel) {
        let Some(active) = view.steps.iter().find(|s| s.state == StepState::Active) else {
            return;
        };
        if self.last != Some(active.label) {
            eprintln!("{}…", active.label);
            self.last = Some(active.label);
        }
    }
}

pub fn print_result(view: &PanelViewModel, emit_html: bool) {
    if let Some(name) = &view.model_name {
        eprintln!("Summary by {name}:");
    }
    let output = if emit_html {
        &view.summary_html
    } else {
        &view.raw_summary
    };
    println!("{output}");
}

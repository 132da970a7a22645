use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::bail;
use summa_core::{update, ModelDescriptor, Msg, PanelState};

use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::view::{self, ProgressPrinter};

pub struct AppOptions {
    pub url: String,
    pub model_override: Option<ModelDescriptor>,
    pub config_path: PathBuf,
    pub emit_html: bool,
}

/// Drives one summarization run to its terminal state: dispatch messages,
/// apply the update function, execute effects, render on dirty.
pub fn run(options: AppOptions, config: AppConfig) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let mut runner = EffectRunner::new(
        msg_tx.clone(),
        config,
        options.config_path,
        options.model_override,
    );

    let mut state = PanelState::new();
    let mut progress = ProgressPrinter::new();

    if msg_tx
        .send(Msg::PanelToggled { url: options.url })
        .is_err()
    {
        bail!("dispatch channel closed before the run started");
    }

    loop {
        let msg = match msg_rx.recv() {
            Ok(msg) => msg,
            Err(_) => bail!("engine disconnected before the run finished"),
        };

        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.run(effects);

        if state.consume_dirty() {
            let view = state.view();
            progress.render(&view);
            if view.is_terminal() {
                view::print_result(&view, options.emit_html);
                return Ok(());
            }
        }
    }
}

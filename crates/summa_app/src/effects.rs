use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use summa_core::{Effect, ModelDescriptor, Msg};
use summa_engine::{EngineConfig, EngineEvent, EngineHandle, FetchSettings, ModelSpec};
use summa_logging::summa_info;

use crate::config::AppConfig;

/// Executes core effects: pipeline work goes to the engine, configuration
/// reads and writes are handled here. Engine events come back as messages
/// through the pump thread.
pub struct EffectRunner {
    commands: summa_engine::CommandSender,
    config: AppConfig,
    config_path: PathBuf,
    model_override: Option<ModelDescriptor>,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        msg_tx: mpsc::Sender<Msg>,
        config: AppConfig,
        config_path: PathBuf,
        model_override: Option<ModelDescriptor>,
    ) -> Self {
        let engine = EngineHandle::new(EngineConfig {
            fetch: FetchSettings::default(),
            summarizer: config.summarizer_settings(),
        });
        let commands = engine.commands();
        spawn_event_pump(engine, msg_tx.clone());
        Self {
            commands,
            config,
            config_path,
            model_override,
            msg_tx,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadModels => {
                    let enabled = self.config.enabled_models();
                    // A --model override takes the place of the persisted
                    // choice; reconciliation still validates it.
                    let saved = self
                        .model_override
                        .clone()
                        .or_else(|| self.config.saved_model());
                    let _ = self.msg_tx.send(Msg::ModelsLoaded { saved, enabled });
                }
                Effect::ExtractArticle { run_id, url } => {
                    summa_info!("run {} extracting {}", run_id, url);
                    self.commands.extract(run_id, url);
                }
                Effect::Summarize {
                    run_id,
                    model,
                    article,
                } => {
                    summa_info!(
                        "run {} summarizing with {}:{}",
                        run_id,
                        model.provider_id,
                        model.model_id
                    );
                    self.commands.summarize(
                        run_id,
                        ModelSpec::new(model.provider_id, model.model_id),
                        article,
                    );
                }
                Effect::RenderSummary { run_id, markdown } => {
                    self.commands.render(run_id, markdown);
                }
                Effect::PersistModelChoice(model) => {
                    self.config.remember_model(&model);
                    self.config.save(&self.config_path);
                }
            }
        }
    }
}

fn spawn_event_pump(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || loop {
        match engine.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    });
}

/// Engine completions become core messages; errors cross the boundary as
/// display strings.
fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ArticleExtracted { run_id, result } => Msg::ArticleExtracted {
            run_id,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::SummaryReady { run_id, result } => Msg::SummaryReady {
            run_id,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::SummaryRendered { run_id, result } => Msg::SummaryRendered {
            run_id,
            result: result.map_err(|err| err.to_string()),
        },
    }
}

use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use summa_logging::{summa_debug, summa_warn};

use crate::article::ArticleExtractor;
use crate::convert::Html2MdConverter;
use crate::extract::ReadabilityExtractor;
use crate::fetch::{FetchSettings, ReqwestFetcher};
use crate::render::{MarkdownRenderer, PulldownRenderer};
use crate::summarize::{HttpSummarizer, Summarizer, SummarizerSettings};
use crate::types::{EngineEvent, ModelSpec, RunId};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub summarizer: SummarizerSettings,
}

enum EngineCommand {
    Extract {
        run_id: RunId,
        url: String,
    },
    Summarize {
        run_id: RunId,
        model: ModelSpec,
        article: String,
    },
    Render {
        run_id: RunId,
        markdown: String,
    },
}

/// Clonable side of the engine: submits commands. Sends after the engine is
/// gone are dropped silently.
#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<EngineCommand>,
}

impl CommandSender {
    pub fn extract(&self, run_id: RunId, url: impl Into<String>) {
        let _ = self.tx.send(EngineCommand::Extract {
            run_id,
            url: url.into(),
        });
    }

    pub fn summarize(&self, run_id: RunId, model: ModelSpec, article: impl Into<String>) {
        let _ = self.tx.send(EngineCommand::Summarize {
            run_id,
            model,
            article: article.into(),
        });
    }

    pub fn render(&self, run_id: RunId, markdown: impl Into<String>) {
        let _ = self.tx.send(EngineCommand::Render {
            run_id,
            markdown: markdown.into(),
        });
    }
}

/// Owns the worker thread running the asynchronous collaborators. Commands go
/// in, one completion event comes out per command; ordering across commands
/// is not guaranteed, which is why every event carries its run id.
pub struct EngineHandle {
    commands: CommandSender,
    event_rx: mpsc::Receiver<EngineEvent>,
}

struct Collaborators {
    article: ArticleExtractor,
    summarizer: Arc<dyn Summarizer>,
    renderer: Arc<dyn MarkdownRenderer>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        let collaborators = Arc::new(Collaborators {
            article: ArticleExtractor::new(
                Arc::new(ReqwestFetcher::new(config.fetch)),
                Arc::new(ReadabilityExtractor),
                Arc::new(Html2MdConverter),
            ),
            summarizer: Arc::new(HttpSummarizer::new(config.summarizer)),
            renderer: Arc::new(PulldownRenderer::default()),
        });

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    summa_warn!("engine runtime failed to start: {err}");
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let collaborators = collaborators.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&collaborators, command, event_tx).await;
                });
            }
        });

        Self {
            commands: CommandSender { tx: cmd_tx },
            event_rx,
        }
    }

    pub fn commands(&self) -> CommandSender {
        self.commands.clone()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }
}

async fn handle_command(
    collaborators: &Collaborators,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Extract { run_id, url } => {
            summa_debug!("extract run_id={run_id} url={url}");
            let result = collaborators.article.from_url(&url).await;
            if let Err(err) = &result {
                summa_warn!("extraction failed for run {run_id}: {err}");
            }
            EngineEvent::ArticleExtracted { run_id, result }
        }
        EngineCommand::Summarize {
            run_id,
            model,
            article,
        } => {
            summa_debug!(
                "summarize run_id={run_id} provider={} model={} article_len={}",
                model.provider_id,
                model.model_id,
                article.len()
            );
            let result = collaborators.summarizer.summarize(&model, &article).await;
            if let Err(err) = &result {
                summa_warn!("summarization failed for run {run_id}: {err}");
            }
            EngineEvent::SummaryReady { run_id, result }
        }
        EngineCommand::Render { run_id, markdown } => {
            let result = collaborators.renderer.render(&markdown);
            EngineEvent::SummaryRendered { run_id, result }
        }
    };
    let _ = event_tx.send(event);
}

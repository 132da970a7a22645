use crate::model::reconcile;
use crate::run::{
    transport_failure_summary, Phase, Run, RunId, EMPTY_ARTICLE, EMPTY_SUMMARY,
    MODEL_NOT_CONFIGURED, RENDER_FAILURE_HTML,
};
use crate::state::{normalize_url_for_compare, PanelState};
use crate::{Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Completion messages that carry a superseded run id fall through without
/// touching state: the panel always reflects the most recent user intent,
/// not the most recently resolved collaborator call.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::PanelToggled { url } => {
            if !state.models_loaded() {
                // First open: show the panel and resolve models before the
                // first run starts.
                state.set_visible(true);
                state.set_current_url(url);
                vec![Effect::LoadModels]
            } else if state.is_visible() {
                state.set_visible(false);
                Vec::new()
            } else {
                state.set_visible(true);
                if url_changed(&state, &url) {
                    state.set_current_url(url);
                    start_run(&mut state, None)
                } else if state.current_run().is_none() {
                    start_run(&mut state, None)
                } else {
                    Vec::new()
                }
            }
        }
        Msg::ModelsLoaded { saved, enabled } => {
            let resolved = reconcile(saved.as_ref(), &enabled);
            state.set_models(enabled);
            state.set_current_model(resolved.clone());

            let mut effects = Vec::new();
            // A fallback choice is persisted, so the next open reuses it.
            if let Some(resolved) = &resolved {
                let unchanged = saved.as_ref().is_some_and(|s| s.same_model(resolved));
                if !unchanged {
                    effects.push(Effect::PersistModelChoice(resolved.clone()));
                }
            }
            if state.is_visible() {
                effects.extend(start_run(&mut state, None));
            }
            effects
        }
        Msg::RefreshRequested => {
            if state.models_loaded() {
                start_run(&mut state, None)
            } else {
                Vec::new()
            }
        }
        Msg::ModelSelected(model) => {
            if !state.models_loaded() {
                Vec::new()
            } else {
                state.set_current_model(Some(model.clone()));
                let mut effects = vec![Effect::PersistModelChoice(model)];
                // Only the model changed: reuse the article already extracted
                // for this page instead of running extraction again.
                let reusable = state
                    .current_run()
                    .filter(|run| {
                        !run.article.trim().is_empty() && !url_changed(&state, &run.url)
                    })
                    .map(|run| run.article.clone());
                effects.extend(start_run(&mut state, reusable));
                effects
            }
        }
        Msg::PageNavigated { url } => {
            if !url_changed(&state, &url) {
                Vec::new()
            } else {
                state.set_current_url(url);
                if state.is_visible() && state.models_loaded() {
                    start_run(&mut state, None)
                } else {
                    Vec::new()
                }
            }
        }
        Msg::CloseRequested => {
            state.set_visible(false);
            Vec::new()
        }
        Msg::ArticleExtracted { run_id, result } => on_article_extracted(&mut state, run_id, result),
        Msg::SummaryReady { run_id, result } => on_summary_ready(&mut state, run_id, result),
        Msg::SummaryRendered { run_id, result } => on_summary_rendered(&mut state, run_id, result),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn url_changed(state: &PanelState, url: &str) -> bool {
    normalize_url_for_compare(url) != normalize_url_for_compare(state.current_url())
}

/// Creates and installs a new current run, superseding any previous one.
/// With a reusable article the run skips straight to Summarizing.
fn start_run(state: &mut PanelState, reuse_article: Option<String>) -> Vec<Effect> {
    let id = state.allocate_run_id();
    let url = state.current_url().to_string();
    let model = state.current_model().cloned();
    match reuse_article {
        Some(article) if !article.is_empty() => {
            state.install_run(Run::with_article(id, url, model, article));
            advance_to_summarizing(state, id)
        }
        _ => {
            state.install_run(Run::new(id, url.clone(), model));
            vec![Effect::ExtractArticle { run_id: id, url }]
        }
    }
}

fn on_article_extracted(
    state: &mut PanelState,
    run_id: RunId,
    result: Result<String, String>,
) -> Vec<Effect> {
    {
        let Some(run) = state.run_if_current(run_id) else {
            return Vec::new();
        };
        if run.phase != Phase::Extracting {
            return Vec::new();
        }
        // An extraction failure is recovered locally: the run continues with
        // an empty article and the summarizing guard reports it.
        if let Ok(text) = result {
            run.article = text;
        }
    }
    advance_to_summarizing(state, run_id)
}

/// Moves a current run into Summarizing. Missing model and missing article
/// are detected here, before the collaborator is invoked, and become
/// placeholder summaries.
fn advance_to_summarizing(state: &mut PanelState, run_id: RunId) -> Vec<Effect> {
    let Some(run) = state.run_if_current(run_id) else {
        return Vec::new();
    };
    run.phase = Phase::Summarizing;
    let Some(model) = run.model.clone() else {
        run.summary = MODEL_NOT_CONFIGURED.to_string();
        return begin_parsing(run);
    };
    if run.article.trim().is_empty() {
        run.summary = EMPTY_ARTICLE.to_string();
        return begin_parsing(run);
    }
    vec![Effect::Summarize {
        run_id,
        model,
        article: run.article.clone(),
    }]
}

fn on_summary_ready(
    state: &mut PanelState,
    run_id: RunId,
    result: Result<String, String>,
) -> Vec<Effect> {
    let Some(run) = state.run_if_current(run_id) else {
        return Vec::new();
    };
    if run.phase != Phase::Summarizing {
        return Vec::new();
    }
    // Every outcome leaves renderable markdown in `summary`; transport
    // failures surface as an error block instead of an exception.
    run.summary = match result {
        Ok(text) if text.trim().is_empty() => EMPTY_SUMMARY.to_string(),
        Ok(text) => text,
        Err(message) => transport_failure_summary(&message),
    };
    begin_parsing(run)
}

fn begin_parsing(run: &mut Run) -> Vec<Effect> {
    run.phase = Phase::Parsing;
    vec![Effect::RenderSummary {
        run_id: run.id,
        markdown: run.summary.clone(),
    }]
}

fn on_summary_rendered(
    state: &mut PanelState,
    run_id: RunId,
    result: Result<String, String>,
) -> Vec<Effect> {
    let Some(run) = state.run_if_current(run_id) else {
        return Vec::new();
    };
    if run.phase != Phase::Parsing {
        return Vec::new();
    }
    match result {
        Ok(html) => {
            run.rendered_html = html;
            run.phase = Phase::Completed;
        }
        Err(_) => {
            run.rendered_html = RENDER_FAILURE_HTML.to_string();
            run.phase = Phase::Failed;
        }
    }
    Vec::new()
}

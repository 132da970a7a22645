use std::sync::Once;

use pretty_assertions::assert_eq;
use summa_core::{
    transport_failure_summary, update, Effect, ModelDescriptor, Msg, PanelState, Phase,
    EMPTY_ARTICLE, EMPTY_SUMMARY, MODEL_NOT_CONFIGURED, RENDER_FAILURE_HTML,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(summa_logging::initialize_for_tests);
}

fn model_a() -> ModelDescriptor {
    ModelDescriptor::new("ANTHROPIC", "claude-3-5-sonnet-latest", "Claude 3.5 Sonnet")
}

fn model_b() -> ModelDescriptor {
    ModelDescriptor::new("OPENAI", "gpt-4o", "GPT-4o")
}

/// Opens the panel for `url` and resolves the model list, returning the state
/// with its first run started and the effects of the ModelsLoaded step.
fn open_panel(
    url: &str,
    saved: Option<ModelDescriptor>,
    enabled: Vec<ModelDescriptor>,
) -> (PanelState, Vec<Effect>) {
    let state = PanelState::new();
    let (state, effects) = update(state, Msg::PanelToggled { url: url.to_string() });
    assert_eq!(effects, vec![Effect::LoadModels]);
    update(state, Msg::ModelsLoaded { saved, enabled })
}

fn extract_effect(effects: &[Effect]) -> (u64, String) {
    match effects.iter().find_map(|e| match e {
        Effect::ExtractArticle { run_id, url } => Some((*run_id, url.clone())),
        _ => None,
    }) {
        Some(found) => found,
        None => panic!("no ExtractArticle effect in {effects:?}"),
    }
}

#[test]
fn happy_path_reaches_completed_with_rendered_summary() {
    init_logging();
    let (state, effects) = open_panel("https://x", Some(model_a()), vec![model_a()]);
    let (run_id, url) = extract_effect(&effects);
    assert_eq!(url, "https://x");
    assert_eq!(state.view().phase, Phase::Extracting);

    let (state, effects) = update(
        state,
        Msg::ArticleExtracted {
            run_id,
            result: Ok("# Title\nBody".to_string()),
        },
    );
    assert_eq!(state.view().phase, Phase::Summarizing);
    assert_eq!(
        effects,
        vec![Effect::Summarize {
            run_id,
            model: model_a(),
            article: "# Title\nBody".to_string(),
        }]
    );

    let (state, effects) = update(
        state,
        Msg::SummaryReady {
            run_id,
            result: Ok("## Summary\nOK".to_string()),
        },
    );
    assert_eq!(state.view().phase, Phase::Parsing);
    assert_eq!(
        effects,
        vec![Effect::RenderSummary {
            run_id,
            markdown: "## Summary\nOK".to_string(),
        }]
    );

    let (state, effects) = update(
        state,
        Msg::SummaryRendered {
            run_id,
            result: Ok("<h2>Summary</h2>\n<p>OK</p>".to_string()),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::Completed);
    assert_eq!(view.raw_summary, "## Summary\nOK");
    assert!(view.summary_html.contains("<h2>Summary</h2>"));
}

#[test]
fn phases_are_monotonic_for_an_unsuperseded_run() {
    init_logging();
    let (state, effects) = open_panel("https://x", None, vec![model_a()]);
    let (run_id, _) = extract_effect(&effects);

    let mut observed = vec![state.view().phase];
    let steps = vec![
        Msg::ArticleExtracted {
            run_id,
            result: Ok("text".to_string()),
        },
        Msg::SummaryReady {
            run_id,
            result: Ok("summary".to_string()),
        },
        Msg::SummaryRendered {
            run_id,
            result: Ok("<p>summary</p>".to_string()),
        },
    ];
    let mut state = state;
    for msg in steps {
        let (next, _) = update(state, msg);
        observed.push(next.view().phase);
        state = next;
    }
    assert!(observed.windows(2).all(|w| w[0] <= w[1]), "{observed:?}");
    assert_eq!(*observed.last().unwrap(), Phase::Completed);
}

#[test]
fn late_results_of_a_superseded_run_are_discarded() {
    init_logging();
    let (state, effects) = open_panel("https://x", Some(model_a()), vec![model_a()]);
    let (first_run, _) = extract_effect(&effects);

    // A refresh before the first extraction resolves supersedes run 1.
    let (state, effects) = update(state, Msg::RefreshRequested);
    let (second_run, _) = extract_effect(&effects);
    assert_ne!(first_run, second_run);

    // Run 1 resolves late: no effects, no state change.
    let (state, effects) = update(
        state,
        Msg::ArticleExtracted {
            run_id: first_run,
            result: Ok("stale article".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().phase, Phase::Extracting);
    assert_eq!(state.current_run().unwrap().article, "");

    // Run 2 completes normally and its outcome is what the panel shows.
    let (state, _) = update(
        state,
        Msg::ArticleExtracted {
            run_id: second_run,
            result: Ok("fresh article".to_string()),
        },
    );
    let (state, _) = update(
        state,
        Msg::SummaryReady {
            run_id: second_run,
            result: Ok("fresh summary".to_string()),
        },
    );
    // Run 1's summary arrives even later and changes nothing.
    let (state, effects) = update(
        state,
        Msg::SummaryReady {
            run_id: first_run,
            result: Ok("stale summary".to_string()),
        },
    );
    assert!(effects.is_empty());
    let (state, _) = update(
        state,
        Msg::SummaryRendered {
            run_id: second_run,
            result: Ok("<p>fresh summary</p>".to_string()),
        },
    );
    let view = state.view();
    assert_eq!(view.phase, Phase::Completed);
    assert_eq!(view.raw_summary, "fresh summary");
    assert_eq!(view.summary_html, "<p>fresh summary</p>");
}

#[test]
fn missing_model_short_circuits_without_calling_the_summarizer() {
    init_logging();
    let (state, effects) = open_panel("https://x", None, Vec::new());
    let (run_id, _) = extract_effect(&effects);

    let (state, effects) = update(
        state,
        Msg::ArticleExtracted {
            run_id,
            result: Ok("article text".to_string()),
        },
    );
    // Straight to Parsing with the placeholder; no Summarize effect.
    assert_eq!(
        effects,
        vec![Effect::RenderSummary {
            run_id,
            markdown: MODEL_NOT_CONFIGURED.to_string(),
        }]
    );
    assert_eq!(state.view().raw_summary, MODEL_NOT_CONFIGURED);
}

#[test]
fn empty_article_short_circuits_with_placeholder() {
    init_logging();
    let (state, effects) = open_panel("https://x", Some(model_a()), vec![model_a()]);
    let (run_id, _) = extract_effect(&effects);

    let (state, effects) = update(
        state,
        Msg::ArticleExtracted {
            run_id,
            result: Ok(String::new()),
        },
    );
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::Summarize { .. })));
    assert!(state.view().raw_summary.starts_with("### Error"));
    assert_eq!(state.view().raw_summary, EMPTY_ARTICLE);
}

#[test]
fn extraction_failure_degrades_to_empty_article_placeholder() {
    init_logging();
    let (state, effects) = open_panel("https://x", Some(model_a()), vec![model_a()]);
    let (run_id, _) = extract_effect(&effects);

    let (state, effects) = update(
        state,
        Msg::ArticleExtracted {
            run_id,
            result: Err("fetch failed".to_string()),
        },
    );
    assert_eq!(state.view().raw_summary, EMPTY_ARTICLE);
    let (state, _) = update(
        state,
        Msg::SummaryRendered {
            run_id,
            result: Ok("<h3>Error</h3>".to_string()),
        },
    );
    assert_eq!(state.view().phase, Phase::Completed);
    assert_eq!(effects.len(), 1);
}

#[test]
fn transport_failure_terminates_with_error_summary() {
    init_logging();
    let (state, effects) = open_panel("https://x", Some(model_a()), vec![model_a()]);
    let (run_id, _) = extract_effect(&effects);

    let (state, _) = update(
        state,
        Msg::ArticleExtracted {
            run_id,
            result: Ok("article".to_string()),
        },
    );
    let (state, effects) = update(
        state,
        Msg::SummaryReady {
            run_id,
            result: Err("connection reset".to_string()),
        },
    );
    let expected = transport_failure_summary("connection reset");
    assert_eq!(state.view().raw_summary, expected);
    assert_eq!(
        effects,
        vec![Effect::RenderSummary {
            run_id,
            markdown: expected,
        }]
    );
    let (state, _) = update(
        state,
        Msg::SummaryRendered {
            run_id,
            result: Ok("<h3>Error</h3>".to_string()),
        },
    );
    assert_eq!(state.view().phase, Phase::Completed);
    assert!(!state.view().summary_html.is_empty());
}

#[test]
fn empty_summary_becomes_placeholder() {
    init_logging();
    let (state, effects) = open_panel("https://x", Some(model_a()), vec![model_a()]);
    let (run_id, _) = extract_effect(&effects);

    let (state, _) = update(
        state,
        Msg::ArticleExtracted {
            run_id,
            result: Ok("article".to_string()),
        },
    );
    let (state, _) = update(
        state,
        Msg::SummaryReady {
            run_id,
            result: Ok("   \n".to_string()),
        },
    );
    assert_eq!(state.view().raw_summary, EMPTY_SUMMARY);
}

#[test]
fn render_failure_is_terminal_and_still_renderable() {
    init_logging();
    let (state, effects) = open_panel("https://x", Some(model_a()), vec![model_a()]);
    let (run_id, _) = extract_effect(&effects);

    let (state, _) = update(
        state,
        Msg::ArticleExtracted {
            run_id,
            result: Ok("article".to_string()),
        },
    );
    let (state, _) = update(
        state,
        Msg::SummaryReady {
            run_id,
            result: Ok("summary".to_string()),
        },
    );
    let (state, effects) = update(
        state,
        Msg::SummaryRendered {
            run_id,
            result: Err("parser choked".to_string()),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::Failed);
    assert!(view.is_terminal());
    assert_eq!(view.summary_html, RENDER_FAILURE_HTML);
    assert_eq!(view.raw_summary, "summary");
}

#[test]
fn model_switch_reuses_extracted_article() {
    init_logging();
    let (state, effects) = open_panel("https://x", Some(model_a()), vec![model_a(), model_b()]);
    let (run_id, _) = extract_effect(&effects);

    // Complete the first run.
    let (state, _) = update(
        state,
        Msg::ArticleExtracted {
            run_id,
            result: Ok("the article".to_string()),
        },
    );
    let (state, _) = update(
        state,
        Msg::SummaryReady {
            run_id,
            result: Ok("first summary".to_string()),
        },
    );
    let (state, _) = update(
        state,
        Msg::SummaryRendered {
            run_id,
            result: Ok("<p>first summary</p>".to_string()),
        },
    );

    // Switching models must not re-run extraction.
    let (state, effects) = update(state, Msg::ModelSelected(model_b()));
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::ExtractArticle { .. })));
    assert!(effects.contains(&Effect::PersistModelChoice(model_b())));
    let summarize = effects
        .iter()
        .find_map(|e| match e {
            Effect::Summarize {
                run_id,
                model,
                article,
            } => Some((*run_id, model.clone(), article.clone())),
            _ => None,
        })
        .expect("model switch should go straight to summarizing");
    assert!(summarize.0 > run_id);
    assert_eq!(summarize.1, model_b());
    assert_eq!(summarize.2, "the article");
    assert_eq!(state.current_run().unwrap().article, "the article");
    assert_eq!(state.view().phase, Phase::Summarizing);
}

#[test]
fn model_switch_without_article_runs_full_pipeline() {
    init_logging();
    let (state, effects) = open_panel("https://x", Some(model_a()), vec![model_a(), model_b()]);
    let (run_id, _) = extract_effect(&effects);

    // Extraction failed: the run has no article to reuse.
    let (state, _) = update(
        state,
        Msg::ArticleExtracted {
            run_id,
            result: Err("fetch failed".to_string()),
        },
    );
    let (_state, effects) = update(state, Msg::ModelSelected(model_b()));
    let (new_run, _) = extract_effect(&effects);
    assert!(new_run > run_id);
}

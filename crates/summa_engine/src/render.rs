use pulldown_cmark::{html, Options, Parser};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("markdown parse error: {0}")]
    Parse(String),
}

pub trait MarkdownRenderer: Send + Sync {
    /// Renders markdown to HTML. Total on empty input (empty in, empty out).
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// pulldown-cmark renderer with the GFM-ish extensions summaries tend to use.
#[derive(Debug, Clone, Copy)]
pub struct PulldownRenderer {
    options: Options,
}

impl Default for PulldownRenderer {
    fn default() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        if markdown.is_empty() {
            return Ok(String::new());
        }
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::{MarkdownRenderer, PulldownRenderer};

    #[test]
    fn headings_become_html() {
        let html = PulldownRenderer::default()
            .render("## Summary\nOK")
            .unwrap();
        assert!(html.contains("<h2>Summary</h2>"));
        assert!(html.contains("OK"));
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(PulldownRenderer::default().render("").unwrap(), "");
    }

    #[test]
    fn gfm_strikethrough_is_enabled() {
        let html = PulldownRenderer::default().render("~~gone~~").unwrap();
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn tables_are_enabled() {
        let html = PulldownRenderer::default()
            .render("| a | b |\n| - | - |\n| 1 | 2 |")
            .unwrap();
        assert!(html.contains("<table>"));
    }
}

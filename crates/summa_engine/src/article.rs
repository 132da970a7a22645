use std::sync::Arc;

use crate::convert::Converter;
use crate::decode::decode_page;
use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::types::ExtractError;

/// Produces article markdown for a page: fetch, decode, scope to the readable
/// content, convert to markdown, and make sure the page title leads the
/// document.
pub struct ArticleExtractor {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    converter: Arc<dyn Converter>,
}

impl ArticleExtractor {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
        converter: Arc<dyn Converter>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            converter,
        }
    }

    pub async fn from_url(&self, url: &str) -> Result<String, ExtractError> {
        let page = self.fetcher.fetch(url).await?;
        let decoded = decode_page(&page.bytes, page.content_type.as_deref())?;
        self.from_html(&decoded.html)
    }

    /// Extraction for markup that is already UTF-8.
    pub fn from_html(&self, html: &str) -> Result<String, ExtractError> {
        let article = self.extractor.extract(html);
        let markdown = self.converter.to_markdown(&article.content_html);
        let markdown = promote_title(article.title.as_deref(), &markdown);
        if markdown.trim().is_empty() {
            return Err(ExtractError::NoContent);
        }
        Ok(markdown)
    }
}

/// Ensures the document opens with a single `#` heading carrying the page
/// title: an existing top-level heading is kept, a leading `##` that repeats
/// the title is promoted, anything else gets the title prepended.
fn promote_title(title: Option<&str>, markdown: &str) -> String {
    let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) else {
        return markdown.to_string();
    };
    let body = markdown.trim_start_matches('\n');
    if let Some(first_line) = body.lines().next() {
        if first_line.starts_with("# ") {
            return body.to_string();
        }
        if let Some(heading) = first_line.strip_prefix("## ") {
            if heading.contains(title) {
                return format!("# {}", &body["## ".len()..]);
            }
        }
    }
    format!("# {title}\n\n{body}")
}

#[cfg(test)]
mod tests {
    use super::promote_title;

    #[test]
    fn missing_title_leaves_markdown_untouched() {
        assert_eq!(promote_title(None, "text"), "text");
        assert_eq!(promote_title(Some("  "), "text"), "text");
    }

    #[test]
    fn existing_top_heading_is_kept() {
        assert_eq!(
            promote_title(Some("Title"), "# Something else\n\nbody"),
            "# Something else\n\nbody"
        );
    }

    #[test]
    fn matching_second_level_heading_is_promoted() {
        assert_eq!(
            promote_title(Some("Title"), "## The Title of it\n\nbody"),
            "# The Title of it\n\nbody"
        );
    }

    #[test]
    fn title_is_prepended_otherwise() {
        assert_eq!(
            promote_title(Some("Title"), "plain paragraph"),
            "# Title\n\nplain paragraph"
        );
    }
}

use scraper::{Html, Selector};

/// Article content scoped out of a full page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: Option<String>,
    pub content_html: String,
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractedArticle;
}

/// Readability-style extractor:
/// - pulls `<title>` text if present
/// - scopes content to `<article>`, then `<main>`, then `<body>`
/// - falls back to the full document
/// - strips HTML comments from the result.
#[derive(Debug, Default)]
pub struct ReadabilityExtractor;

impl Extractor for ReadabilityExtractor {
    fn extract(&self, html: &str) -> ExtractedArticle {
        let doc = Html::parse_document(html);

        let title = Selector::parse("title")
            .ok()
            .and_then(|sel| doc.select(&sel).next())
            .map(|node| node.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());

        let content_html = ["article", "main", "body"]
            .into_iter()
            .filter_map(|name| Selector::parse(name).ok())
            .find_map(|sel| doc.select(&sel).next())
            .map(|node| node.inner_html())
            .unwrap_or_else(|| doc.root_element().html());

        ExtractedArticle {
            title,
            content_html: strip_comments(&content_html),
        }
    }
}

/// Removes `<!-- … -->` spans; an unterminated comment runs to end of input.
fn strip_comments(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        match rest[start..].find("-->") {
            Some(end) => rest = &rest[start + end + "-->".len()..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

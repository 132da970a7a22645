/// System prompt used when the configuration does not override it.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
Analyze and summarize the given article. Read the whole text, paying \
attention to its structure, main arguments, and technical detail, then \
organize the summary into three sections:

## Overview

A concise recap of the article's content, core ideas, and conclusions, \
200-300 words.

## Main Content

Follow the article's own structure, section by section, listing the key \
points: central claims, technical details, notable insights.

## Key Takeaways

The 3-5 most important or novel conclusions, each with a short note on why \
it matters.

Output clean markdown with headings and lists. Stay objective, keep \
technical terms accurate, and preserve the context needed to understand \
simplified concepts.";

/// Frames the extracted article as the user message of the request.
pub fn build_user_prompt(article: &str) -> String {
    format!("Here is the article to summarize:\n\n{article}")
}

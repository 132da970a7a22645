//! Summa engine: the asynchronous collaborators of the summarization
//! pipeline — page fetch, article extraction, LLM summarization, markdown
//! rendering — and the handle that runs them off-thread.
mod article;
mod convert;
mod decode;
mod engine;
mod extract;
mod fetch;
mod prompt;
mod providers;
mod render;
mod summarize;
mod types;

pub use article::ArticleExtractor;
pub use convert::{Converter, Html2MdConverter};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use engine::{CommandSender, EngineConfig, EngineHandle};
pub use extract::{ExtractedArticle, Extractor, ReadabilityExtractor};
pub use fetch::{FetchSettings, Fetcher, PageSnapshot, ReqwestFetcher};
pub use prompt::{build_user_prompt, DEFAULT_SYSTEM_PROMPT};
pub use providers::{provider_by_id, ProviderInfo, ProviderKind, PROVIDERS};
pub use render::{MarkdownRenderer, PulldownRenderer, RenderError};
pub use summarize::{HttpSummarizer, SummarizeError, Summarizer, SummarizerSettings};
pub use types::{EngineEvent, ExtractError, FetchError, ModelSpec, RunId};

/// Wire dialect a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// `POST {base}/chat/completions` with a bearer token.
    OpenAiCompatible,
    /// `POST {base}/v1/messages` with `x-api-key` + `anthropic-version`.
    Anthropic,
}

/// Static description of a supported provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub kind: ProviderKind,
    /// None means the user must configure a base URL (OpenAI-like endpoints).
    pub default_base_url: Option<&'static str>,
    /// Local endpoints run without credentials.
    pub requires_api_key: bool,
    /// (model id, display name) pairs offered before any configuration.
    pub default_models: &'static [(&'static str, &'static str)],
}

pub const PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        id: "ANTHROPIC",
        display_name: "Anthropic",
        kind: ProviderKind::Anthropic,
        default_base_url: Some("https://api.anthropic.com"),
        requires_api_key: true,
        default_models: &[
            ("claude-3-5-sonnet-latest", "Claude 3.5 Sonnet"),
            ("claude-3-opus-latest", "Claude 3 Opus"),
        ],
    },
    ProviderInfo {
        id: "OPENAI",
        display_name: "OpenAI",
        kind: ProviderKind::OpenAiCompatible,
        default_base_url: Some("https://api.openai.com/v1"),
        requires_api_key: true,
        default_models: &[
            ("gpt-4o", "GPT-4o"),
            ("gpt-4o-mini", "GPT-4o-mini"),
            ("o1-mini", "o1-mini"),
        ],
    },
    ProviderInfo {
        id: "GROQ",
        display_name: "Groq",
        kind: ProviderKind::OpenAiCompatible,
        default_base_url: Some("https://api.groq.com/openai/v1"),
        requires_api_key: true,
        default_models: &[
            ("llama3-8b-8192", "LLaMA3 8B"),
            ("llama3-70b-8192", "LLaMA3 70B"),
            ("mixtral-8x7b-32768", "Mixtral 8x7B"),
            ("gemma-7b-it", "Gemma 7B"),
        ],
    },
    ProviderInfo {
        id: "OPENROUTER",
        display_name: "OpenRouter",
        kind: ProviderKind::OpenAiCompatible,
        default_base_url: Some("https://openrouter.ai/api/v1"),
        requires_api_key: true,
        default_models: &[
            ("google/gemma-2-9b-it:free", "Google: Gemma 2 9B"),
            (
                "microsoft/phi-3-medium-128k-instruct:free",
                "Phi-3 Medium 128K Instruct",
            ),
            (
                "meta-llama/llama-3-8b-instruct:free",
                "Meta: Llama 3 8B Instruct",
            ),
            ("mistralai/mistral-7b-instruct:free", "Mistral 7B Instruct"),
        ],
    },
    ProviderInfo {
        id: "DEEPSEEK",
        display_name: "DeepSeek",
        kind: ProviderKind::OpenAiCompatible,
        default_base_url: Some("https://api.deepseek.com/v1"),
        requires_api_key: true,
        default_models: &[
            ("deepseek-chat", "DeepSeek Chat"),
            ("deepseek-coder", "DeepSeek Coder"),
        ],
    },
    ProviderInfo {
        id: "MISTRAL",
        display_name: "Mistral AI",
        kind: ProviderKind::OpenAiCompatible,
        default_base_url: Some("https://api.mistral.ai/v1"),
        requires_api_key: true,
        default_models: &[
            ("pixtral-12b-2409", "Pixtral-12B-2409"),
            ("open-mistral-nemo", "Open-Mistral-Nemo"),
        ],
    },
    ProviderInfo {
        id: "TOGETHER",
        display_name: "Together",
        kind: ProviderKind::OpenAiCompatible,
        default_base_url: Some("https://api.together.xyz/v1"),
        requires_api_key: true,
        default_models: &[],
    },
    ProviderInfo {
        id: "OPENAI_LIKE",
        display_name: "OpenAI Like",
        kind: ProviderKind::OpenAiCompatible,
        default_base_url: None,
        requires_api_key: false,
        default_models: &[],
    },
    ProviderInfo {
        id: "LMSTUDIO",
        display_name: "LMStudio",
        kind: ProviderKind::OpenAiCompatible,
        default_base_url: Some("http://localhost:1234/v1"),
        requires_api_key: false,
        default_models: &[],
    },
    ProviderInfo {
        id: "OLLAMA",
        display_name: "Ollama",
        kind: ProviderKind::OpenAiCompatible,
        default_base_url: Some("http://localhost:11434/v1"),
        requires_api_key: false,
        default_models: &[],
    },
];

pub fn provider_by_id(id: &str) -> Option<&'static ProviderInfo> {
    PROVIDERS.iter().find(|provider| provider.id == id)
}

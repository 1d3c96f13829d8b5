use std::fmt;
use std::time::Duration;

pub mod keywords;
pub mod models;
pub mod text;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Summarization settings.
#[derive(Clone)]
pub struct Config {
    /// Use the remote seq2seq model instead of TextRank.
    pub use_abstractive: bool,
    /// Endpoint of the summarization model; the public distilbart endpoint when unset.
    pub model_url: Option<String>,
    pub api_token: Option<String>,
    /// Summaries generated at the same time against the model.
    pub max_concurrent_inference: usize,
    pub request_timeout: Duration,
    /// Probe the model once at startup.
    pub warm_up: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("use_abstractive", &self.use_abstractive)
            .field("model_url", &self.model_url)
            .field("api_token", &self.api_token.as_deref().map(|_| "<redacted>"))
            .field("max_concurrent_inference", &self.max_concurrent_inference)
            .field("request_timeout", &self.request_timeout)
            .field("warm_up", &self.warm_up)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_abstractive: false,
            model_url: None,
            api_token: None,
            max_concurrent_inference: 1,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            warm_up: true,
        }
    }
}

/// Truthiness of flag-like environment values: `1`, `true` or `yes`,
/// case-insensitive.
pub fn parse_flag(value: &str) -> bool {
    ["1", "true", "yes"]
        .iter()
        .any(|accepted| value.eq_ignore_ascii_case(accepted))
}

pub mod prelude {
    pub use super::Config;
    pub use super::keywords::YakeExtractor;
    pub use super::models::create_summarizer;
    pub use ap_core::{KeywordExtractor, Result, Summarizer, Error};
}

pub use keywords::YakeExtractor;
pub use models::create_summarizer;
pub use models::remote::RemoteSummarizer;
pub use models::textrank::TextRankSummarizer;

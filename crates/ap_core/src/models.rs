use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;

    /// Summarize an article body. `max_sentences` bounds extractive
    /// strategies; generative ones bring their own length bounds.
    async fn summarize(&self, text: &str, max_sentences: usize) -> Result<String>;
}

pub trait KeywordExtractor: Send + Sync {
    /// Return up to `top_k` keywords, best first.
    fn extract_keywords(&self, text: &str, top_k: usize, language: &str) -> Result<Vec<String>>;
}

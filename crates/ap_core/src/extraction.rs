use async_trait::async_trait;
use crate::types::ExtractedArticle;
use crate::Result;

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Download the raw markup behind `url`. `Ok(None)` means nothing could
    /// be retrieved.
    async fn fetch(&self, url: &str) -> Result<Option<String>>;
}

pub trait ArticleExtractor: Send + Sync {
    /// Strip boilerplate from `markup` and collect the article metadata.
    /// `Ok(None)` means the markup holds nothing extractable.
    fn extract(&self, markup: &str) -> Result<Option<ExtractedArticle>>;
}

use std::sync::Arc;
use tracing::info;
use ap_core::{Result, Summarizer};
use crate::Config;

pub mod remote;
pub mod textrank;

use remote::RemoteSummarizer;
use textrank::TextRankSummarizer;

/// Build the summarizer selected by `config`. The remote model is probed
/// first when `config.warm_up` is set, so an unreachable model fails here.
pub async fn create_summarizer(config: &Config) -> Result<Arc<dyn Summarizer>> {
    if !config.use_abstractive {
        info!("📝 Using extractive TextRank summaries");
        return Ok(Arc::new(TextRankSummarizer::new()));
    }

    let summarizer = RemoteSummarizer::new(config)?;
    info!("🤖 Using abstractive summaries from {}", summarizer.model_url());
    if config.warm_up {
        summarizer.warm_up().await?;
        info!("✅ Summarization model is ready");
    }
    Ok(Arc::new(summarizer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extractive_by_default() {
        let summarizer = create_summarizer(&Config::default()).await.unwrap();
        assert_eq!(summarizer.name(), "TextRank");
    }

    #[tokio::test]
    async fn test_abstractive_without_warm_up() {
        let config = Config {
            use_abstractive: true,
            model_url: Some("http://127.0.0.1:9/models/none".to_string()),
            warm_up: false,
            ..Default::default()
        };
        let summarizer = create_summarizer(&config).await.unwrap();
        assert_eq!(summarizer.name(), "Remote seq2seq");
    }

    #[tokio::test]
    async fn test_unreachable_model_fails_at_startup() {
        let config = Config {
            use_abstractive: true,
            model_url: Some("http://127.0.0.1:9/models/none".to_string()),
            request_timeout: std::time::Duration::from_secs(2),
            ..Default::default()
        };
        assert!(create_summarizer(&config).await.is_err());
    }
}

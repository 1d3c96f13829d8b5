use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Provide url or html")]
    InvalidRequest,

    #[error("Could not fetch content")]
    FetchFailed,

    #[error("Could not extract article")]
    ExtractionFailed,

    #[error("Article text empty")]
    EmptyArticle,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Keyword extraction error: {0}")]
    Keywords(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Errors the caller caused or can act on. Their `Display` text is the
    /// detail message sent back to clients; everything else stays opaque.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidRequest | Error::FetchFailed | Error::ExtractionFailed | Error::EmptyArticle
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_messages() {
        assert_eq!(Error::InvalidRequest.to_string(), "Provide url or html");
        assert_eq!(Error::FetchFailed.to_string(), "Could not fetch content");
        assert_eq!(Error::ExtractionFailed.to_string(), "Could not extract article");
        assert_eq!(Error::EmptyArticle.to_string(), "Article text empty");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::InvalidRequest.is_client_error());
        assert!(Error::EmptyArticle.is_client_error());
        assert!(!Error::Summarization("model crashed".to_string()).is_client_error());
        assert!(!Error::Inference("timeout".to_string()).is_client_error());
    }
}

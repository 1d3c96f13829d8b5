use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use crate::extraction::{ArticleExtractor, ContentFetcher};
use crate::models::{KeywordExtractor, Summarizer};
use crate::normalize::normalize_metadata;
use crate::types::{ArticleRecord, ParseRequest};
use crate::{Error, Result};

/// Sentences kept by extractive summaries. The request's
/// `max_summary_sentences` is accepted but not used.
pub const SUMMARY_SENTENCES: usize = 4;

/// Tags returned per article. The request's `num_tags` is accepted but not used.
pub const TAG_COUNT: usize = 8;

/// Stop-word language for tagging. The request's `language` is accepted but not used.
pub const TAG_LANGUAGE: &str = "en";

/// Number of whitespace-separated tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Turns a [`ParseRequest`] into an [`ArticleRecord`]: fetch, extract,
/// normalize metadata, summarize, tag.
#[derive(Clone)]
pub struct ArticleParser {
    fetcher: Arc<dyn ContentFetcher>,
    extractor: Arc<dyn ArticleExtractor>,
    summarizer: Arc<dyn Summarizer>,
    keywords: Arc<dyn KeywordExtractor>,
}

impl fmt::Debug for ArticleParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleParser")
            .field("summarizer", &self.summarizer.name())
            .finish_non_exhaustive()
    }
}

impl ArticleParser {
    pub fn new(
        fetcher: Arc<dyn ContentFetcher>,
        extractor: Arc<dyn ArticleExtractor>,
        summarizer: Arc<dyn Summarizer>,
        keywords: Arc<dyn KeywordExtractor>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            summarizer,
            keywords,
        }
    }

    pub fn summarizer_name(&self) -> &str {
        self.summarizer.name()
    }

    pub async fn parse(&self, request: &ParseRequest) -> Result<ArticleRecord> {
        let url = request.url.as_deref().filter(|u| !u.is_empty());
        let html = request.html.as_deref().filter(|h| !h.is_empty());

        let downloaded = match (html, url) {
            (Some(html), _) => Some(html.to_string()),
            (None, Some(url)) => {
                info!("🌐 Fetching {}", url);
                self.fetcher.fetch(url).await?
            }
            (None, None) => return Err(Error::InvalidRequest),
        };
        let downloaded = downloaded
            .filter(|content| !content.is_empty())
            .ok_or(Error::FetchFailed)?;

        let extracted = self
            .extractor
            .extract(&downloaded)?
            .ok_or(Error::ExtractionFailed)?;

        let text = extracted.text.as_deref().unwrap_or_default();
        if text.trim().is_empty() {
            return Err(Error::EmptyArticle);
        }

        let metadata = normalize_metadata(&extracted);
        debug!("Normalized metadata: {:?}", metadata);

        let summary = self.summarizer.summarize(text, SUMMARY_SENTENCES).await?;
        let tags = self.keywords.extract_keywords(text, TAG_COUNT, TAG_LANGUAGE)?;

        let record = ArticleRecord {
            title: extracted.title.clone(),
            author: metadata.author,
            date_published: metadata.date_published,
            summary,
            tags,
            word_count: word_count(text),
            source_url: url.map(str::to_string),
        };
        info!(
            "📰 Parsed article {:?} ({} words, {} tags)",
            record.title.as_deref().unwrap_or_default(),
            record.word_count,
            record.tags.len()
        );
        Ok(record)
    }
}

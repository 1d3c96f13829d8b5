pub mod error;
pub mod extraction;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
pub use extraction::{ArticleExtractor, ContentFetcher};
pub use models::{KeywordExtractor, Summarizer};
pub use parser::{word_count, ArticleParser};
pub use types::{ArticleRecord, AuthorField, ExtractedArticle, Metadata, ParseRequest};

pub mod prelude {
    pub use crate::{ArticleParser, ArticleRecord, Error, ParseRequest, Result};
}

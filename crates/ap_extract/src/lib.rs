pub mod fetcher;
pub mod jsonld;
pub mod readability;

pub use fetcher::HttpFetcher;
pub use readability::ReadabilityExtractor;

pub mod prelude {
    pub use super::{HttpFetcher, ReadabilityExtractor};
    pub use ap_core::{ArticleExtractor, ContentFetcher, ExtractedArticle, Result, Error};
}

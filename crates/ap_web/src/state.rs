use ap_core::ArticleParser;

/// Largest accepted `POST /extract` body. Leaves room for a fetched-size
/// page sent inline with JSON escaping.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

pub struct AppState {
    pub parser: ArticleParser,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(parser: ArticleParser) -> Self {
        Self {
            parser,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

use serde::{Deserialize, Serialize};

fn default_max_summary_sentences() -> i64 {
    4
}

fn default_num_tags() -> i64 {
    8
}

fn default_language() -> String {
    "en".to_string()
}

/// Body of `POST /extract`.
///
/// At least one of `url` or `html` has to be present; that is checked by the
/// parser, not by deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default = "default_max_summary_sentences")]
    pub max_summary_sentences: i64,
    #[serde(default = "default_num_tags")]
    pub num_tags: i64,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for ParseRequest {
    fn default() -> Self {
        Self {
            url: None,
            html: None,
            max_summary_sentences: default_max_summary_sentences(),
            num_tags: default_num_tags(),
            language: default_language(),
        }
    }
}

impl ParseRequest {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Self::default()
        }
    }
}

/// Author metadata as extractors report it: a single name or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorField {
    One(String),
    Many(Vec<String>),
}

impl AuthorField {
    pub fn is_empty(&self) -> bool {
        match self {
            AuthorField::One(name) => name.is_empty(),
            AuthorField::Many(names) => names.is_empty(),
        }
    }
}

impl From<&str> for AuthorField {
    fn from(name: &str) -> Self {
        AuthorField::One(name.to_string())
    }
}

impl From<Vec<String>> for AuthorField {
    fn from(names: Vec<String>) -> Self {
        AuthorField::Many(names)
    }
}

/// Main text plus raw metadata pulled out of a page. Date and author may sit
/// under several keys depending on where the extractor found them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<AuthorField>,
    #[serde(default)]
    pub authors: Option<AuthorField>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Normalized author and publication date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub author: String,
    pub date_published: Option<String>,
}

/// Response body of a successful `POST /extract`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: Option<String>,
    pub author: String,
    pub date_published: Option<String>,
    pub summary: String,
    pub tags: Vec<String>,
    pub word_count: usize,
    pub source_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_defaults() {
        let req: ParseRequest = serde_json::from_str(r#"{"url": "https://example.com/a"}"#).unwrap();
        assert_eq!(req.url.as_deref(), Some("https://example.com/a"));
        assert!(req.html.is_none());
        assert_eq!(req.max_summary_sentences, 4);
        assert_eq!(req.num_tags, 8);
        assert_eq!(req.language, "en");
    }

    #[test]
    fn test_parse_request_rejects_wrong_types() {
        assert!(serde_json::from_str::<ParseRequest>(r#"{"num_tags": "many"}"#).is_err());
        assert!(serde_json::from_str::<ParseRequest>(r#"{"url": 42}"#).is_err());
    }

    #[test]
    fn test_author_field_shapes() {
        let one: ExtractedArticle = serde_json::from_str(r#"{"author": "Alice"}"#).unwrap();
        assert_eq!(one.author, Some(AuthorField::One("Alice".to_string())));

        let many: ExtractedArticle = serde_json::from_str(r#"{"authors": ["Alice", "Bob"]}"#).unwrap();
        assert_eq!(
            many.authors,
            Some(AuthorField::Many(vec!["Alice".to_string(), "Bob".to_string()]))
        );
    }

    #[test]
    fn test_record_serializes_absent_fields_as_null() {
        let record = ArticleRecord {
            title: None,
            author: String::new(),
            date_published: None,
            summary: "s".to_string(),
            tags: vec![],
            word_count: 1,
            source_url: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["title"].is_null());
        assert!(value["date_published"].is_null());
        assert!(value["source_url"].is_null());
        assert_eq!(value["author"], "");
    }
}

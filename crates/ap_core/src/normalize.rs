//! Coercion of extractor metadata into the shape of an [`ArticleRecord`].
//!
//! Nothing here fails: values that cannot be interpreted are passed through
//! as they came in.
//!
//! [`ArticleRecord`]: crate::types::ArticleRecord

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use crate::types::{AuthorField, ExtractedArticle, Metadata};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Collapse author metadata into one string. The first non-empty candidate
/// wins; lists are joined with `", "` in order. No author gives `""`.
pub fn normalize_author(author: Option<&AuthorField>, authors: Option<&AuthorField>) -> String {
    match author.filter(|a| !a.is_empty()).or(authors.filter(|a| !a.is_empty())) {
        Some(AuthorField::One(name)) => name.clone(),
        Some(AuthorField::Many(names)) => names.join(", "),
        None => String::new(),
    }
}

/// Pick the first non-empty date candidate and reduce it to `YYYY-MM-DD`
/// when it parses as an ISO 8601 date or timestamp. Anything else is
/// returned unchanged.
pub fn normalize_date(
    date: Option<&str>,
    published: Option<&str>,
    publication_date: Option<&str>,
) -> Option<String> {
    let raw = [date, published, publication_date]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())?;

    Some(parse_iso_date(raw).unwrap_or_else(|| {
        tracing::debug!("Keeping unparseable date as-is: {}", raw);
        raw.to_string()
    }))
}

/// Date portion of an ISO 8601 value. A trailing `Z` is read as `+00:00`;
/// with an offset present the date is taken in that offset.
pub fn parse_iso_date(value: &str) -> Option<String> {
    let value = value.replace('Z', "+00:00");

    let date = DateTime::parse_from_rfc3339(&value)
        .ok()
        .map(|dt| dt.date_naive())
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(&value, fmt).ok())
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(&value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(&value, "%Y-%m-%d").ok())?;

    Some(date.format("%Y-%m-%d").to_string())
}

pub fn normalize_metadata(article: &ExtractedArticle) -> Metadata {
    Metadata {
        author: normalize_author(article.author.as_ref(), article.authors.as_ref()),
        date_published: normalize_date(
            article.date.as_deref(),
            article.published.as_deref(),
            article.publication_date.as_deref(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_list_is_joined() {
        let authors = AuthorField::Many(vec!["Alice".to_string(), "Bob".to_string()]);
        assert_eq!(normalize_author(Some(&authors), None), "Alice, Bob");
    }

    #[test]
    fn test_author_single_name() {
        assert_eq!(normalize_author(Some(&"Alice".into()), None), "Alice");
    }

    #[test]
    fn test_author_falls_back_to_authors_key() {
        let empty = AuthorField::One(String::new());
        let authors = AuthorField::Many(vec!["Carol".to_string()]);
        assert_eq!(normalize_author(Some(&empty), Some(&authors)), "Carol");
        assert_eq!(normalize_author(None, Some(&authors)), "Carol");
    }

    #[test]
    fn test_author_missing_is_empty_string() {
        assert_eq!(normalize_author(None, None), "");
        assert_eq!(normalize_author(Some(&AuthorField::Many(vec![])), None), "");
    }

    #[test]
    fn test_date_utc_timestamp() {
        assert_eq!(
            normalize_date(Some("2024-05-01T10:00:00Z"), None, None).as_deref(),
            Some("2024-05-01")
        );
    }

    #[test]
    fn test_date_unparseable_is_kept() {
        assert_eq!(
            normalize_date(Some("not-a-date"), None, None).as_deref(),
            Some("not-a-date")
        );
        assert_eq!(
            normalize_date(Some("May 1st, 2024"), None, None).as_deref(),
            Some("May 1st, 2024")
        );
    }

    #[test]
    fn test_date_key_priority() {
        assert_eq!(
            normalize_date(None, Some("2023-01-02"), Some("2022-03-04")).as_deref(),
            Some("2023-01-02")
        );
        assert_eq!(
            normalize_date(Some(""), None, Some("2022-03-04T00:00:00")).as_deref(),
            Some("2022-03-04")
        );
        assert_eq!(normalize_date(None, None, None), None);
        assert_eq!(normalize_date(Some(""), Some(""), None), None);
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(parse_iso_date("2024-05-01").as_deref(), Some("2024-05-01"));
        assert_eq!(parse_iso_date("2024-05-01 08:30:00").as_deref(), Some("2024-05-01"));
        assert_eq!(parse_iso_date("2024-05-01T08:30").as_deref(), Some("2024-05-01"));
        assert_eq!(
            parse_iso_date("2024-05-01T08:30:00.123456+02:00").as_deref(),
            Some("2024-05-01")
        );
        // the offset's local date is kept, not converted to UTC
        assert_eq!(
            parse_iso_date("2024-05-01T23:30:00-05:00").as_deref(),
            Some("2024-05-01")
        );
        assert_eq!(parse_iso_date("2024-13-01"), None);
        assert_eq!(parse_iso_date("yesterday"), None);
    }

    #[test]
    fn test_normalize_metadata() {
        let article = ExtractedArticle {
            authors: Some(AuthorField::Many(vec!["Alice".to_string(), "Bob".to_string()])),
            published: Some("2024-05-01T10:00:00Z".to_string()),
            ..Default::default()
        };
        let meta = normalize_metadata(&article);
        assert_eq!(meta.author, "Alice, Bob");
        assert_eq!(meta.date_published.as_deref(), Some("2024-05-01"));
    }
}

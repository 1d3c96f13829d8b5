use scraper::{Html, Selector};
use serde_json::Value;

const ARTICLE_TYPES: &[&str] = &[
    "Article",
    "NewsArticle",
    "BlogPosting",
    "ReportageNewsArticle",
    "AnalysisNewsArticle",
    "OpinionNewsArticle",
    "TechArticle",
    "ScholarlyArticle",
];

/// Article fields found in JSON-LD metadata.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JsonLdArticle {
    pub headline: Option<String>,
    pub authors: Vec<String>,
    pub date_published: Option<String>,
}

impl JsonLdArticle {
    pub fn is_empty(&self) -> bool {
        self.headline.is_none() && self.authors.is_empty() && self.date_published.is_none()
    }
}

/// Reads the first article-typed JSON-LD object in the document, looking
/// inside top-level arrays and `@graph` containers.
pub fn extract_article(document: &Html) -> JsonLdArticle {
    let Ok(script_selector) = Selector::parse("script[type='application/ld+json']") else {
        return JsonLdArticle::default();
    };

    for script in document.select(&script_selector) {
        let raw = script.text().collect::<String>();
        let Ok(json) = serde_json::from_str::<Value>(raw.trim()) else {
            tracing::debug!("Skipping malformed JSON-LD block");
            continue;
        };
        if let Some(node) = find_article_node(&json) {
            return JsonLdArticle {
                headline: string_field(node, "headline").or_else(|| string_field(node, "name")),
                authors: node.get("author").map(extract_authors).unwrap_or_default(),
                date_published: string_field(node, "datePublished")
                    .or_else(|| string_field(node, "dateCreated")),
            };
        }
    }

    JsonLdArticle::default()
}

fn find_article_node(json: &Value) -> Option<&Value> {
    match json {
        Value::Array(items) => items.iter().find_map(find_article_node),
        Value::Object(obj) => {
            if is_article_type(obj.get("@type")) {
                return Some(json);
            }
            obj.get("@graph").and_then(find_article_node)
        }
        _ => None,
    }
}

fn is_article_type(ty: Option<&Value>) -> bool {
    match ty {
        Some(Value::String(s)) => ARTICLE_TYPES.contains(&s.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|s| ARTICLE_TYPES.contains(&s)),
        _ => false,
    }
}

fn string_field(node: &Value, key: &str) -> Option<String> {
    node.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Author names from a JSON-LD `author` value: a plain string, a
/// `Person`/`Organization` object, or an array of either.
pub fn extract_authors(author: &Value) -> Vec<String> {
    let mut authors = Vec::new();
    match author {
        Value::Array(arr) => {
            for author_obj in arr {
                authors.extend(extract_authors(author_obj));
            }
        }
        Value::Object(obj) => {
            if let Some(name) = obj.get("name").and_then(|n| n.as_str()) {
                authors.push(name.trim().to_string());
            }
        }
        Value::String(s) => {
            authors.push(s.trim().to_string());
        }
        _ => {}
    }
    authors.retain(|name| !name.is_empty());
    authors
}

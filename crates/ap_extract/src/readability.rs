use ap_core::{ArticleExtractor, AuthorField, Error, ExtractedArticle, Result};
use dom_smoothie::Readability;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;
use crate::jsonld;

/// Elements whose content starts on a line of its own.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "ol",
    "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// What Readability recovered from a page.
#[derive(Debug, Default)]
struct ReadableContent {
    title: Option<String>,
    byline: Option<String>,
    published_time: Option<String>,
    text: String,
}

/// Article extractor built on `dom_smoothie`'s Readability port.
///
/// Readability removes the page chrome and yields the body text along with
/// its own title, byline and publication time. JSON-LD and `<meta>` tags are
/// read with `scraper` and take precedence for metadata, as they are what
/// publishers mark up deliberately.
#[derive(Debug, Clone, Default)]
pub struct ReadabilityExtractor;

impl ReadabilityExtractor {
    pub fn new() -> Self {
        Self
    }

    fn readable_content(&self, markup: &str) -> ReadableContent {
        let mut readability = match Readability::new(markup, None, None) {
            Ok(readability) => readability,
            Err(e) => {
                debug!("Readability could not load the document: {}", e);
                return ReadableContent::default();
            }
        };
        match readability.parse() {
            Ok(article) => ReadableContent {
                title: non_empty(&article.title),
                byline: article.byline.as_deref().and_then(non_empty),
                published_time: article.published_time.as_deref().and_then(non_empty),
                text: block_text(&article.content),
            },
            Err(e) => {
                debug!("Readability found no article content: {}", e);
                ReadableContent::default()
            }
        }
    }
}

impl ArticleExtractor for ReadabilityExtractor {
    fn extract(&self, markup: &str) -> Result<Option<ExtractedArticle>> {
        let readable = self.readable_content(markup);
        let document = Html::parse_document(markup);
        let ld = jsonld::extract_article(&document);

        let title = ld
            .headline
            .clone()
            .or(meta_content(&document, "meta[property='og:title']")?)
            .or(readable.title)
            .or(first_text(&document, "title")?)
            .or(first_text(&document, "h1")?);

        let (author, authors) = match ld.authors.len() {
            0 => (
                meta_content(&document, "meta[name='author']")?
                    .or(meta_content(&document, "meta[property='article:author']")?
                        .filter(|a| !a.starts_with("http")))
                    .or(readable.byline)
                    .map(AuthorField::One),
                None,
            ),
            1 => (Some(AuthorField::One(ld.authors[0].clone())), None),
            _ => (None, Some(AuthorField::Many(ld.authors.clone()))),
        };

        let date = ld.date_published.clone();
        let published = meta_content(&document, "meta[property='article:published_time']")?
            .or(meta_content(&document, "meta[itemprop='datePublished']")?)
            .or(readable.published_time);
        let publication_date = meta_content(&document, "meta[name='date']")?
            .or(meta_content(&document, "meta[name='pubdate']")?)
            .or(meta_content(&document, "meta[name='publish-date']")?)
            .or(attr_value(&document, "time[datetime]", "datetime")?);

        let text = readable.text;

        if title.is_none()
            && author.is_none()
            && authors.is_none()
            && date.is_none()
            && published.is_none()
            && publication_date.is_none()
            && text.is_empty()
        {
            debug!("Nothing extractable in {} bytes of markup", markup.len());
            return Ok(None);
        }

        Ok(Some(ExtractedArticle {
            title,
            author,
            authors,
            date,
            published,
            publication_date,
            text: Some(text),
        }))
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Extraction(format!("Invalid selector {}: {}", css, e)))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: &str) -> Option<String> {
    Some(collapse_whitespace(text)).filter(|t| !t.is_empty())
}

fn flush_line(line: &mut String, lines: &mut Vec<String>) {
    let collapsed = collapse_whitespace(line);
    if !collapsed.is_empty() {
        lines.push(collapsed);
    }
    line.clear();
}

fn collect_blocks(element: ElementRef, line: &mut String, lines: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => line.push_str(text),
            Node::Element(el) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                if matches!(el.name(), "script" | "style" | "noscript") {
                    continue;
                }
                let block = BLOCK_TAGS.contains(&el.name());
                if block {
                    flush_line(line, lines);
                }
                collect_blocks(child, line, lines);
                if block {
                    flush_line(line, lines);
                }
            }
            _ => {}
        }
    }
}

/// Text of an HTML fragment, one whitespace-collapsed line per block.
fn block_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut lines = Vec::new();
    let mut line = String::new();
    collect_blocks(fragment.root_element(), &mut line, &mut lines);
    flush_line(&mut line, &mut lines);
    lines.join("\n")
}

fn attr_value(document: &Html, css: &str, attr: &str) -> Result<Option<String>> {
    let selector = selector(css)?;
    Ok(document
        .select(&selector)
        .filter_map(|el| el.value().attr(attr))
        .map(collapse_whitespace)
        .find(|value| !value.is_empty()))
}

fn meta_content(document: &Html, css: &str) -> Result<Option<String>> {
    attr_value(document, css, "content")
}

fn first_text(document: &Html, css: &str) -> Result<Option<String>> {
    let selector = selector(css)?;
    Ok(document
        .select(&selector)
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .find(|text| !text.is_empty()))
}

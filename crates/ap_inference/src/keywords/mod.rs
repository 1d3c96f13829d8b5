//! Statistical single-word keyword extraction in the style of YAKE.
//!
//! Each term is scored from its casing, position, frequency, relatedness to
//! its neighbours and spread over sentences; lower scores are better. Near
//! duplicate keywords are dropped by normalized Levenshtein similarity.

use std::collections::{BTreeSet, HashMap, HashSet};
use ap_core::{KeywordExtractor, Result};
use crate::text::{self, Token};

mod stopwords;

pub const DEFAULT_DEDUP_THRESHOLD: f64 = 0.9;
pub const DEFAULT_WINDOW_SIZE: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Digit,
    Unparsable,
    Acronym,
    Proper,
    Plain,
}

impl Tag {
    fn of(word: &str, position: usize) -> Self {
        if word.replace(',', "").parse::<f64>().is_ok() {
            return Tag::Digit;
        }
        let digits = word.chars().filter(char::is_ascii_digit).count();
        let alpha = word.chars().filter(|c| c.is_alphabetic()).count();
        let punct = word.chars().filter(char::is_ascii_punctuation).count();
        if (digits > 0 && alpha > 0) || (digits == 0 && alpha == 0) || punct > 1 {
            return Tag::Unparsable;
        }
        let cased: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
        if word.chars().count() > 1 && cased.iter().all(|c| c.is_uppercase()) {
            return Tag::Acronym;
        }
        if position != 0 && word.chars().next().is_some_and(char::is_uppercase) {
            return Tag::Proper;
        }
        Tag::Plain
    }

    fn is_discarded(self) -> bool {
        matches!(self, Tag::Digit | Tag::Unparsable)
    }
}

#[derive(Debug, Default)]
struct Term {
    tf: f64,
    tf_acronym: f64,
    tf_proper: f64,
    sentences: BTreeSet<usize>,
    left: HashMap<usize, f64>,
    right: HashMap<usize, f64>,
    stopword: bool,
    score: f64,
}

impl Term {
    fn relatedness(edges: &HashMap<usize, f64>) -> f64 {
        let total: f64 = edges.values().sum();
        if total == 0.0 {
            0.0
        } else {
            edges.len() as f64 / total
        }
    }

    fn median_sentence(&self) -> f64 {
        let ids: Vec<usize> = self.sentences.iter().copied().collect();
        let mid = ids.len() / 2;
        match ids.len() {
            0 => 0.0,
            n if n % 2 == 1 => ids[mid] as f64,
            _ => (ids[mid - 1] + ids[mid]) as f64 / 2.0,
        }
    }

    fn update_score(&mut self, max_tf: f64, avg_tf: f64, std_tf: f64, sentence_count: f64) {
        let rel = (0.5 + Self::relatedness(&self.left) * (self.tf / max_tf))
            + (0.5 + Self::relatedness(&self.right) * (self.tf / max_tf));
        let freq = self.tf / (avg_tf + std_tf);
        let spread = self.sentences.len() as f64 / sentence_count;
        let case = self.tf_acronym.max(self.tf_proper) / (1.0 + self.tf.ln());
        let position = (3.0 + self.median_sentence()).ln().ln();
        self.score = (position * rel) / (case + (freq / rel) + (spread / rel));
    }
}

#[derive(Debug)]
struct Candidate {
    surface: String,
    key: String,
    term: usize,
    tf: usize,
    valid: bool,
}

/// Similarity in `[0, 1]` derived from the Levenshtein edit distance.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    1.0 - previous[b.len()] as f64 / longest as f64
}

fn stopwords_for(language: &str) -> HashSet<&'static str> {
    let primary = language.split(['-', '_']).next().unwrap_or_default();
    if primary.eq_ignore_ascii_case("en") {
        stopwords::ENGLISH.iter().copied().collect()
    } else {
        HashSet::new()
    }
}

#[derive(Debug, Clone)]
pub struct YakeExtractor {
    dedup_threshold: f64,
    window_size: usize,
}

impl Default for YakeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl YakeExtractor {
    pub fn new() -> Self {
        Self {
            dedup_threshold: DEFAULT_DEDUP_THRESHOLD,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }

    pub fn with_dedup_threshold(mut self, threshold: f64) -> Self {
        self.dedup_threshold = threshold;
        self
    }

    fn term_id(
        word: &str,
        stopwords: &HashSet<&str>,
        terms: &mut Vec<Term>,
        index: &mut HashMap<String, usize>,
    ) -> usize {
        let lower = word.to_lowercase();
        let listed = stopwords.contains(lower.as_str());
        let key = match lower.strip_suffix('s') {
            Some(singular) if lower.chars().count() > 3 => singular.to_string(),
            _ => lower,
        };
        if let Some(&id) = index.get(&key) {
            return id;
        }

        let bare_len = key.chars().filter(|c| !c.is_ascii_punctuation()).count();
        terms.push(Term {
            stopword: listed || stopwords.contains(key.as_str()) || bare_len < 3,
            ..Default::default()
        });
        index.insert(key, terms.len() - 1);
        terms.len() - 1
    }

    /// Scored keywords, best first, before deduplication.
    fn ranked_candidates(&self, text: &str, language: &str) -> Vec<(String, String, f64)> {
        let sentences = text::sentences(text);
        let stopwords = stopwords_for(language);

        let mut terms: Vec<Term> = Vec::new();
        let mut term_index: HashMap<String, usize> = HashMap::new();
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut candidate_index: HashMap<String, usize> = HashMap::new();

        for (sentence_id, sentence) in sentences.iter().enumerate() {
            let mut block: Vec<(Tag, usize)> = Vec::new();
            for (position, token) in text::tokens(sentence).into_iter().enumerate() {
                let word = match token {
                    Token::Punct(_) => {
                        block.clear();
                        continue;
                    }
                    Token::Word(word) => word,
                };

                let tag = Tag::of(word, position);
                let id = Self::term_id(word, &stopwords, &mut terms, &mut term_index);
                let term = &mut terms[id];
                term.tf += 1.0;
                term.sentences.insert(sentence_id);
                match tag {
                    Tag::Acronym => term.tf_acronym += 1.0,
                    Tag::Proper => term.tf_proper += 1.0,
                    _ => {}
                }

                if !tag.is_discarded() {
                    let start = block.len().saturating_sub(self.window_size);
                    for &(left_tag, left_id) in &block[start..] {
                        if !left_tag.is_discarded() {
                            *terms[left_id].right.entry(id).or_insert(0.0) += 1.0;
                            *terms[id].left.entry(left_id).or_insert(0.0) += 1.0;
                        }
                    }
                }

                let key = word.to_lowercase();
                let slot = *candidate_index.entry(key.clone()).or_insert_with(|| {
                    candidates.push(Candidate {
                        surface: word.to_string(),
                        key,
                        term: id,
                        tf: 0,
                        valid: false,
                    });
                    candidates.len() - 1
                });
                candidates[slot].tf += 1;
                candidates[slot].valid |= !tag.is_discarded();

                block.push((tag, id));
            }
        }

        let valid_tfs: Vec<f64> = terms.iter().filter(|t| !t.stopword).map(|t| t.tf).collect();
        if valid_tfs.is_empty() {
            return Vec::new();
        }
        let avg_tf = valid_tfs.iter().sum::<f64>() / valid_tfs.len() as f64;
        let std_tf = (valid_tfs.iter().map(|tf| (tf - avg_tf).powi(2)).sum::<f64>()
            / valid_tfs.len() as f64)
            .sqrt();
        let max_tf = terms.iter().map(|t| t.tf).fold(0.0, f64::max);
        let sentence_count = sentences.len() as f64;
        for term in terms.iter_mut() {
            term.update_score(max_tf, avg_tf, std_tf, sentence_count);
        }

        let mut scored: Vec<(String, String, f64)> = candidates
            .into_iter()
            .filter(|c| c.valid && !terms[c.term].stopword)
            .map(|c| {
                let h = terms[c.term].score;
                let score = h / ((h + 1.0) * c.tf as f64);
                (c.surface, c.key, score)
            })
            .collect();
        scored.sort_by(|a, b| a.2.total_cmp(&b.2));
        scored
    }
}

impl KeywordExtractor for YakeExtractor {
    fn extract_keywords(&self, text: &str, top_k: usize, language: &str) -> Result<Vec<String>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let mut selected: Vec<(String, String)> = Vec::new();
        for (surface, key, _) in self.ranked_candidates(text, language) {
            let duplicate = self.dedup_threshold < 1.0
                && selected
                    .iter()
                    .any(|(_, kept)| similarity(&key, kept) > self.dedup_threshold);
            if !duplicate {
                selected.push((surface, key));
            }
            if selected.len() == top_k {
                break;
            }
        }

        tracing::debug!("Extracted {} keywords", selected.len());
        Ok(selected.into_iter().map(|(surface, _)| surface).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Rust is a systems programming language. \
        Developers choose Rust for memory safety without garbage collection. \
        The Rust compiler checks ownership and borrowing at compile time. \
        Many companies now ship Rust in production services. \
        Memory safety bugs become rare when teams adopt Rust. \
        In 2023 the survey counted 3,000 answers.";

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("rust", "rust"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert!((similarity("color", "colour") - (1.0 - 1.0 / 6.0)).abs() < 1e-12);
        assert!(similarity("organisation", "organization") > DEFAULT_DEDUP_THRESHOLD);
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_tags() {
        assert_eq!(Tag::of("2023", 1), Tag::Digit);
        assert_eq!(Tag::of("3,000", 1), Tag::Digit);
        assert_eq!(Tag::of("mp3", 1), Tag::Unparsable);
        assert_eq!(Tag::of("NASA", 0), Tag::Acronym);
        assert_eq!(Tag::of("Rust", 3), Tag::Proper);
        assert_eq!(Tag::of("Rust", 0), Tag::Plain);
        assert_eq!(Tag::of("memory", 2), Tag::Plain);
    }

    #[test]
    fn test_most_characteristic_word_first() {
        let tags = YakeExtractor::new().extract_keywords(TEXT, 8, "en").unwrap();
        assert_eq!(tags.first().map(String::as_str), Some("Rust"));
    }

    #[test]
    fn test_keywords_exclude_stopwords_and_numbers() {
        let tags = YakeExtractor::new().extract_keywords(TEXT, 50, "en").unwrap();
        for tag in &tags {
            let lower = tag.to_lowercase();
            assert!(!stopwords::ENGLISH.contains(&lower.as_str()), "stopword {}", tag);
            assert!(lower.chars().count() >= 3, "short word {}", tag);
            assert!(tag.parse::<f64>().is_err() && tag != "3,000", "number {}", tag);
        }
        assert!(tags.iter().any(|t| t == "memory"));
    }

    #[test]
    fn test_top_k_and_uniqueness() {
        let extractor = YakeExtractor::new();
        let tags = extractor.extract_keywords(TEXT, 8, "en").unwrap();
        assert!(tags.len() <= 8);
        let unique: HashSet<String> = tags.iter().map(|t| t.to_lowercase()).collect();
        assert_eq!(unique.len(), tags.len());

        assert_eq!(extractor.extract_keywords(TEXT, 3, "en").unwrap().len(), 3);
        assert!(extractor.extract_keywords(TEXT, 0, "en").unwrap().is_empty());
        assert!(extractor.extract_keywords("", 8, "en").unwrap().is_empty());
    }

    #[test]
    fn test_near_duplicates_are_dropped() {
        let text = "The organisation grew quickly. \
            Our organization hired engineers. \
            Engineers joined the organisation from abroad.";
        let tags = YakeExtractor::new().extract_keywords(text, 20, "en").unwrap();
        let variants = tags
            .iter()
            .filter(|t| t.to_lowercase().starts_with("organi"))
            .count();
        assert_eq!(variants, 1);

        let tags = YakeExtractor::new()
            .with_dedup_threshold(1.0)
            .extract_keywords(text, 20, "en")
            .unwrap();
        let variants = tags
            .iter()
            .filter(|t| t.to_lowercase().starts_with("organi"))
            .count();
        assert_eq!(variants, 2);
    }

    #[test]
    fn test_unknown_language_has_no_stopwords() {
        let tags = YakeExtractor::new().extract_keywords(TEXT, 50, "xx").unwrap();
        assert!(tags.iter().any(|t| t.eq_ignore_ascii_case("the")));
    }

    #[test]
    fn test_deterministic() {
        let extractor = YakeExtractor::new();
        assert_eq!(
            extractor.extract_keywords(TEXT, 8, "en").unwrap(),
            extractor.extract_keywords(TEXT, 8, "en").unwrap()
        );
    }
}

//! English text segmentation shared by the summarizer and the keyword
//! extractor.

use unicode_segmentation::UnicodeSegmentation;

/// Abbreviations after which a period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "rev", "gen", "col", "lt", "sgt",
    "capt", "gov", "sen", "rep", "pres", "vs", "etc", "inc", "ltd", "co", "corp", "jan", "feb",
    "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "no", "fig", "u.s",
    "u.k", "e.g", "i.e", "a.m", "p.m",
];

fn ends_with_abbreviation(sentence: &str) -> bool {
    let Some(last) = sentence.split_whitespace().last() else {
        return false;
    };
    let Some(stem) = last.strip_suffix('.') else {
        return false;
    };
    let stem = stem.trim_start_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
    let is_initial = stem.chars().count() == 1 && stem.chars().all(char::is_alphabetic);
    is_initial || ABBREVIATIONS.contains(&stem.as_str())
}

/// Split `text` into trimmed sentences using Unicode sentence boundaries,
/// re-joining splits that fall right after an English abbreviation or an
/// initial.
pub fn sentences(text: &str) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    let mut carry = false;

    for raw in text.unicode_sentences() {
        let sentence = raw.trim();
        if sentence.is_empty() {
            continue;
        }
        match result.last_mut() {
            Some(previous) if carry => {
                previous.push(' ');
                previous.push_str(sentence);
            }
            _ => result.push(sentence.to_string()),
        }
        carry = !raw.contains('\n') && result.last().is_some_and(|s| ends_with_abbreviation(s));
    }

    result
}

fn is_alphabetic_word(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_alphabetic)
        && word
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '\'' | '\u{2019}' | '-'))
}

/// Lowercased word tokens of `sentence`. Punctuation and tokens holding
/// digits are dropped.
pub fn words(sentence: &str) -> Vec<String> {
    sentence
        .unicode_words()
        .filter(|word| is_alphabetic_word(word))
        .map(str::to_lowercase)
        .collect()
}

/// A token of a sentence in reading order: either a word or a run of
/// punctuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Word(&'a str),
    Punct(&'a str),
}

/// Word and punctuation tokens of `sentence`, whitespace removed.
pub fn tokens(sentence: &str) -> Vec<Token<'_>> {
    sentence
        .split_word_bounds()
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| {
            if segment.chars().any(char::is_alphanumeric) {
                Token::Word(segment)
            } else {
                Token::Punct(segment)
            }
        })
        .collect()
}

use std::fmt;
use ap_core::{Result, Summarizer};
use crate::text;

const DAMPING: f64 = 0.85;
const EPSILON: f64 = 1e-4;
const ZERO_DIVISION_PREVENTION: f64 = 1e-7;
/// The matrix is stochastic so iteration converges; this only bounds
/// pathological float behaviour.
const MAX_ITERATIONS: usize = 10_000;

/// Graph-based extractive summarizer: sentences are ranked with PageRank
/// over a word-overlap similarity graph and the best ones are returned in
/// document order.
#[derive(Clone)]
pub struct TextRankSummarizer {
    damping: f64,
    epsilon: f64,
}

impl fmt::Debug for TextRankSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextRankSummarizer")
            .field("damping", &self.damping)
            .field("epsilon", &self.epsilon)
            .finish()
    }
}

impl Default for TextRankSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRankSummarizer {
    pub fn new() -> Self {
        Self {
            damping: DAMPING,
            epsilon: EPSILON,
        }
    }

    /// Pick up to `count` sentences of `text`, kept in document order.
    pub fn select_sentences(&self, text: &str, count: usize) -> Vec<String> {
        let sentences = text::sentences(text);
        if sentences.is_empty() || count == 0 {
            return Vec::new();
        }

        let words: Vec<Vec<String>> = sentences.iter().map(|s| text::words(s)).collect();
        let ranks = self.rank(&words);

        let mut order: Vec<usize> = (0..sentences.len()).collect();
        // stable sort: equal ranks keep document order
        order.sort_by(|&a, &b| ranks[b].total_cmp(&ranks[a]));
        order.truncate(count);
        order.sort_unstable();

        order.into_iter().map(|i| sentences[i].clone()).collect()
    }

    fn rank(&self, sentences: &[Vec<String>]) -> Vec<f64> {
        let n = sentences.len();
        let mut weights = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i..n {
                let rating = edge_weight(&sentences[i], &sentences[j]);
                weights[i][j] = rating;
                weights[j][i] = rating;
            }
        }

        let base = (1.0 - self.damping) / n as f64;
        for row in weights.iter_mut() {
            let sum: f64 = row.iter().sum::<f64>() + ZERO_DIVISION_PREVENTION;
            for weight in row.iter_mut() {
                *weight = base + self.damping * (*weight / sum);
            }
        }

        power_method(&weights, self.epsilon)
    }
}

/// Shared-word count between two sentences, normalized by their lengths.
fn edge_weight(a: &[String], b: &[String]) -> f64 {
    let shared: usize = a.iter().map(|w| b.iter().filter(|x| *x == w).count()).sum();
    if shared == 0 {
        return 0.0;
    }
    let norm = (a.len() as f64).ln() + (b.len() as f64).ln();
    if norm.abs() < 1e-8 {
        // both sentences are a single identical word
        shared as f64
    } else {
        shared as f64 / norm
    }
}

/// Stationary distribution of the row-stochastic `matrix`.
fn power_method(matrix: &[Vec<f64>], epsilon: f64) -> Vec<f64> {
    let n = matrix.len();
    let mut p = vec![1.0 / n as f64; n];

    for _ in 0..MAX_ITERATIONS {
        let next: Vec<f64> = (0..n)
            .map(|j| (0..n).map(|i| matrix[i][j] * p[i]).sum())
            .collect();
        let delta = next
            .iter()
            .zip(&p)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt();
        p = next;
        if delta <= epsilon {
            break;
        }
    }

    p
}

#[async_trait::async_trait]
impl Summarizer for TextRankSummarizer {
    fn name(&self) -> &str {
        "TextRank"
    }

    async fn summarize(&self, text: &str, max_sentences: usize) -> Result<String> {
        let selected = self.select_sentences(text, max_sentences);
        tracing::debug!("TextRank selected {} sentences", selected.len());
        Ok(selected.join(" "))
    }
}

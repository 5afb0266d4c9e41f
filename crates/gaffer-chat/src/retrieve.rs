//! Retriever: ranks knowledge-base documents against a free-text query.
//!
//! TF-IDF style scoring over the tokenised, stop-word-filtered query.
//! Runs in time proportional to corpus size times query length, which is
//! fine for a corpus of tens to low hundreds of documents.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::intent::tokenize;
use crate::kb::KnowledgeBase;
use crate::types::RetrievalResult;

/// Default cap on results fed to the answer composer.
pub const DEFAULT_TOP_K: usize = 5;

/// Common words carrying no retrieval signal.
static STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "i", "me", "my", "we", "our",
    "you", "your", "he", "she", "it", "they", "them", "his", "her", "its", "their", "what",
    "which", "who", "this", "that", "these", "those", "of", "in", "to", "for", "with", "on",
    "at", "from", "by", "about", "as", "and", "but", "or", "not", "no", "so", "if", "then",
    "do", "does", "did", "will", "would", "should", "could", "can", "how", "when", "where",
    "why", "tell", "show", "give",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Ranks documents by term-frequency relevance, highest first.
#[derive(Debug, Clone)]
pub struct Retriever {
    /// Maximum number of results returned.
    top_k: usize,
}

impl Default for Retriever {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K }
    }
}

impl Retriever {
    /// Create a retriever returning at most `top_k` results.
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Rank documents against the query.
    ///
    /// Zero-scoring documents are excluded; ties break by document
    /// insertion order, so identical queries against an unchanged index
    /// always return the same ordered sequence.
    pub fn retrieve(&self, text: &str, kb: &KnowledgeBase) -> Vec<RetrievalResult> {
        if kb.is_empty() || self.top_k == 0 {
            return Vec::new();
        }

        let mut query_tf: HashMap<String, usize> = HashMap::new();
        for token in tokenize(text) {
            if !is_stop_word(&token) {
                *query_tf.entry(token).or_insert(0) += 1;
            }
        }
        if query_tf.is_empty() {
            return Vec::new();
        }

        let total_docs = kb.len() as f64;
        let mut scored: Vec<RetrievalResult> = Vec::new();

        for (index, indexed) in kb.indexed_docs().iter().enumerate() {
            let mut score = 0.0;
            let mut matched_terms = Vec::new();

            for (term, q_tf) in &query_tf {
                let Some(tf) = indexed.term_freq.get(term) else {
                    continue;
                };
                let idf = ((total_docs + 1.0) / (kb.doc_freq(term) as f64 + 1.0)).ln() + 1.0;
                score += *q_tf as f64 * *tf as f64 * idf;
                matched_terms.push(term.clone());
            }

            if score > 0.0 {
                matched_terms.sort();
                scored.push(RetrievalResult {
                    doc_index: index,
                    score,
                    matched_terms,
                });
            }
        }

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.doc_index.cmp(&b.doc_index))
        });
        scored.truncate(self.top_k);
        scored
    }
}

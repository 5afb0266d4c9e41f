//! Knowledge base index: a small corpus of short advisory documents,
//! built once per process lifetime and queried many times.
//!
//! The index is immutable post-build; rebuilding means discarding and
//! reconstructing the whole thing. At this corpus size (tens to low
//! hundreds of documents) nothing incremental is needed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::intent::tokenize;
use crate::retrieve::Retriever;
use crate::types::RetrievalResult;

/// Fixed category enumeration for knowledge documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocCategory {
    Predictions,
    ChipStrategy,
    Transfers,
    LeagueProjections,
}

/// One advisory document in the curated corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    pub id: String,
    pub category: DocCategory,
    pub title: String,
    pub body: String,
    /// Gameweek the document refers to, when it is time-bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gameweek: Option<u32>,
}

impl KnowledgeDocument {
    pub fn new(
        id: impl Into<String>,
        category: DocCategory,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            title: title.into(),
            body: body.into(),
            gameweek: None,
        }
    }

    pub fn for_gameweek(mut self, gameweek: u32) -> Self {
        self.gameweek = Some(gameweek);
        self
    }
}

/// A document plus its precomputed term frequencies.
#[derive(Debug, Clone)]
pub(crate) struct IndexedDocument {
    pub(crate) doc: KnowledgeDocument,
    pub(crate) term_freq: HashMap<String, usize>,
}

/// Read-only inverted statistics over the corpus.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    docs: Vec<IndexedDocument>,
    doc_freq: HashMap<String, usize>,
}

impl KnowledgeBase {
    /// Build the index from a document corpus.
    ///
    /// Documents with an empty body violate the corpus invariant and are
    /// skipped with a warning; an empty corpus is valid and searchable.
    pub fn build(documents: Vec<KnowledgeDocument>) -> Self {
        let mut docs = Vec::with_capacity(documents.len());
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            if doc.body.trim().is_empty() {
                warn!(id = %doc.id, "Skipping knowledge document with empty body");
                continue;
            }

            let mut term_freq: HashMap<String, usize> = HashMap::new();
            for token in tokenize(&doc.title).into_iter().chain(tokenize(&doc.body)) {
                *term_freq.entry(token).or_insert(0) += 1;
            }
            for token in term_freq.keys() {
                *doc_freq.entry(token.clone()).or_insert(0) += 1;
            }
            docs.push(IndexedDocument { doc, term_freq });
        }

        Self { docs, doc_freq }
    }

    /// Rank documents against free text. Delegates to the retriever with
    /// its default result limit.
    pub fn search(&self, text: &str) -> Vec<RetrievalResult> {
        Retriever::default().retrieve(text, self)
    }

    /// The document at a given insertion index.
    pub fn document(&self, index: usize) -> Option<&KnowledgeDocument> {
        self.docs.get(index).map(|d| &d.doc)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// How many documents contain the given term.
    pub(crate) fn doc_freq(&self, term: &str) -> usize {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    pub(crate) fn indexed_docs(&self) -> &[IndexedDocument] {
        &self.docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, category: DocCategory, title: &str, body: &str) -> KnowledgeDocument {
        KnowledgeDocument::new(id, category, title, body)
    }

    #[test]
    fn test_build_indexes_title_and_body() {
        let kb = KnowledgeBase::build(vec![doc(
            "chip-1",
            DocCategory::ChipStrategy,
            "Wildcard timing",
            "Play the wildcard around a blank gameweek.",
        )]);
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.doc_freq("wildcard"), 1);
        assert_eq!(kb.doc_freq("gameweek"), 1);
        assert_eq!(kb.doc_freq("unrelated"), 0);
    }

    #[test]
    fn test_empty_body_documents_are_skipped() {
        let kb = KnowledgeBase::build(vec![
            doc("ok", DocCategory::Transfers, "Sell note", "Sell flagged players."),
            doc("bad", DocCategory::Transfers, "Empty", "   "),
        ]);
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.document(0).unwrap().id, "ok");
    }

    #[test]
    fn test_empty_corpus_searches_without_failing() {
        let kb = KnowledgeBase::build(vec![]);
        assert!(kb.is_empty());
        assert!(kb.search("wildcard advice").is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let kb = KnowledgeBase::build(vec![
            doc("a", DocCategory::Predictions, "A", "alpha text"),
            doc("b", DocCategory::Predictions, "B", "beta text"),
        ]);
        assert_eq!(kb.document(0).unwrap().id, "a");
        assert_eq!(kb.document(1).unwrap().id, "b");
        assert!(kb.document(2).is_none());
    }

    #[test]
    fn test_doc_freq_counts_documents_not_occurrences() {
        let kb = KnowledgeBase::build(vec![
            doc("a", DocCategory::Transfers, "T", "transfer transfer transfer"),
            doc("b", DocCategory::Transfers, "T", "one transfer here"),
        ]);
        assert_eq!(kb.doc_freq("transfer"), 2);
    }

    #[test]
    fn test_gameweek_tag_roundtrip() {
        let d = doc("gw", DocCategory::Predictions, "GW12", "points forecast")
            .for_gameweek(12);
        assert_eq!(d.gameweek, Some(12));
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["gameweek"], 12);
        assert_eq!(json["category"], "predictions");
    }
}

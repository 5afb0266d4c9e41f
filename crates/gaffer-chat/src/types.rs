//! Per-request value types and the external analytics seam.

use std::collections::BTreeMap;

use async_trait::async_trait;

use gaffer_core::types::{FeaturePayload, SessionContext, Suggestion};

use crate::error::ChatError;

/// An incoming chat turn: raw text plus the ambient session context.
///
/// Owned exclusively by a single request's processing flow; discarded
/// once the reply is produced.
#[derive(Debug, Clone)]
pub struct Query {
    pub text: String,
    pub session: SessionContext,
}

/// Outcome of intent matching for one query.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// The query maps to a deterministic analytics feature.
    Matched {
        feature_id: String,
        /// Bound parameters, keyed by the schema's parameter name.
        params: BTreeMap<String, String>,
        /// 1.0 for exact trigger matches; keyword-overlap score otherwise.
        confidence: f64,
    },
    /// No feature cleared the confidence threshold.
    Unmatched,
}

impl Intent {
    pub fn is_matched(&self) -> bool {
        matches!(self, Intent::Matched { .. })
    }
}

/// One ranked knowledge-base hit.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalResult {
    /// Insertion index of the document in the knowledge base.
    pub doc_index: usize,
    /// Non-negative relevance score; higher is more relevant.
    pub score: f64,
    /// Query terms found in the document, for explainability.
    pub matched_terms: Vec<String>,
}

/// The unit returned to the caller for each chat turn.
///
/// Exactly one of `feature` / `feature_id` is populated when an intent
/// matched; neither is populated on the retrieval path.
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// Always non-empty.
    pub reply: String,
    /// Full payload, when the feature was resolved inline.
    pub feature: Option<FeaturePayload>,
    /// Feature id, when the payload is fetched separately.
    pub feature_id: Option<String>,
    /// Quick prompts to display next.
    pub suggestions: Vec<Suggestion>,
}

/// What the external analytics function produced for a matched feature.
#[derive(Debug, Clone)]
pub enum FeatureOutcome {
    /// The payload was computed inline and ships with the reply.
    Payload(FeaturePayload),
    /// The payload is fetched separately; the reply carries the feature id.
    Deferred,
}

/// Seam to the external feature registry's analytics functions.
///
/// The chat engine calls features by identifier and receives opaque
/// structured payloads; it never computes analytics itself.
#[async_trait]
pub trait FeatureDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        feature_id: &str,
        params: &BTreeMap<String, String>,
        session: &SessionContext,
    ) -> Result<FeatureOutcome, ChatError>;
}

/// Default dispatcher: every feature payload is fetched separately by the
/// dashboard through its own endpoint, so dispatch always defers.
#[derive(Debug, Default)]
pub struct DeferredDispatcher;

#[async_trait]
impl FeatureDispatcher for DeferredDispatcher {
    async fn dispatch(
        &self,
        _feature_id: &str,
        _params: &BTreeMap<String, String>,
        _session: &SessionContext,
    ) -> Result<FeatureOutcome, ChatError> {
        Ok(FeatureOutcome::Deferred)
    }
}

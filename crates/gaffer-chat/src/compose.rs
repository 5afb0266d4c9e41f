//! Answer composer: turns retrieved documents, or a resolved feature,
//! into reply text.
//!
//! Two strategies for the retrieval path: the template strategy is always
//! available and has no external dependency; the paraphrase strategy is
//! used only when a model client is configured, and on any failure the
//! composer falls back to the exact text the template strategy produces.

use std::sync::Arc;

use tracing::{debug, warn};

use gaffer_core::types::FeatureDescriptor;

use crate::kb::KnowledgeBase;
use crate::llm::ParaphraseModel;
use crate::types::RetrievalResult;

/// Fixed reply when neither a feature nor any document matched.
pub const NO_MATCH_REPLY: &str =
    "I don't have information on that — try one of the suggestions below.";

/// Reply when a matched feature's analytics function failed.
pub const FEATURE_FAILURE_REPLY: &str =
    "Sorry, I couldn't run that analysis just now. Please try again in a moment.";

/// Per-document excerpt cap inside the context block.
const EXCERPT_CHARS: usize = 240;

/// Composes reply text for both the feature path and the retrieval path.
pub struct AnswerComposer {
    max_context_chars: usize,
    model: Option<Arc<dyn ParaphraseModel>>,
}

impl AnswerComposer {
    /// Create a template-only composer.
    pub fn new(max_context_chars: usize) -> Self {
        Self {
            max_context_chars,
            model: None,
        }
    }

    /// Enable the paraphrase strategy with the given model client.
    pub fn with_model(mut self, model: Arc<dyn ParaphraseModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Short acknowledgement for a resolved feature. The structured
    /// payload ships with the response; it is never narrated here.
    pub fn acknowledge_feature(&self, descriptor: &FeatureDescriptor) -> String {
        format!("Here's your {} analysis.", descriptor.label)
    }

    /// Compose a reply from ranked retrieval results.
    ///
    /// Empty results yield the fixed no-match reply. With a model client
    /// configured the paraphrase strategy runs first; any error, timeout
    /// or blank completion falls back to the template text, so the
    /// user-visible turn never fails on the optional dependency.
    pub async fn compose_retrieval(
        &self,
        query: &str,
        results: &[RetrievalResult],
        kb: &KnowledgeBase,
    ) -> String {
        if results.is_empty() {
            return NO_MATCH_REPLY.to_string();
        }

        let template = self.template_reply(results, kb);

        if let Some(model) = &self.model {
            let context = self.context_block(results, kb);
            match model.paraphrase(query, &context).await {
                Ok(text) if !text.trim().is_empty() => {
                    debug!("Using paraphrased reply");
                    return text;
                }
                Ok(_) => warn!("Model returned a blank reply; using template"),
                Err(e) => warn!(error = %e, "Paraphrase failed; using template"),
            }
        }

        template
    }

    /// The always-available structured summary of the retrieved documents.
    fn template_reply(&self, results: &[RetrievalResult], kb: &KnowledgeBase) -> String {
        let mut lines = vec!["Here's what I found:".to_string()];
        let mut budget = self.max_context_chars;

        for (rank, result) in results.iter().enumerate() {
            let Some(doc) = kb.document(result.doc_index) else {
                continue;
            };
            let excerpt = excerpt(&doc.body, EXCERPT_CHARS.min(budget));
            if excerpt.is_empty() {
                break;
            }
            budget = budget.saturating_sub(excerpt.chars().count());
            lines.push(format!("{}. {}: {}", rank + 1, doc.title, excerpt));
        }

        lines.join("\n")
    }

    /// Bounded context block handed to the paraphrase model.
    fn context_block(&self, results: &[RetrievalResult], kb: &KnowledgeBase) -> String {
        let mut parts = Vec::new();
        let mut budget = self.max_context_chars;

        for result in results {
            let Some(doc) = kb.document(result.doc_index) else {
                continue;
            };
            let excerpt = excerpt(&doc.body, EXCERPT_CHARS.min(budget));
            if excerpt.is_empty() {
                break;
            }
            budget = budget.saturating_sub(excerpt.chars().count());
            parts.push(format!("- {}: {}", doc.title, excerpt));
        }

        parts.join("\n")
    }
}

/// First `limit` characters of a text, cut on a char boundary, with an
/// ellipsis when truncated.
fn excerpt(body: &str, limit: usize) -> String {
    let trimmed = body.trim();
    if limit == 0 {
        return String::new();
    }
    if trimmed.chars().count() <= limit {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(limit).collect();
    format!("{}...", cut.trim_end())
}

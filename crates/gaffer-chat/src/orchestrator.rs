//! Dialogue orchestrator: the chat engine's entry point.
//!
//! Sequences intent matching, feature dispatch or retrieval, answer
//! composition, and suggestion updating. Each turn runs the same path:
//! `Received -> Matching -> {DirectDispatch | Retrieving} -> Composing ->
//! Responded`, and no state survives the call.

use std::sync::Arc;

use tracing::{debug, warn};

use gaffer_core::config::ChatConfig;
use gaffer_core::types::{FeatureRegistry, SessionContext};

use crate::compose::{AnswerComposer, FEATURE_FAILURE_REPLY};
use crate::error::ChatError;
use crate::intent::IntentMatcher;
use crate::kb::KnowledgeBase;
use crate::llm::ParaphraseModel;
use crate::retrieve::Retriever;
use crate::suggest::SuggestionUpdater;
use crate::types::{ChatReply, FeatureDispatcher, FeatureOutcome, Intent};

/// Maximum message length in characters.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Central coordinator wiring matcher, retriever, composer and
/// suggestions over read-only shared state.
///
/// The registry and knowledge base are built once at startup and shared
/// read-only across concurrent requests; the orchestrator itself holds no
/// mutable state.
pub struct DialogueOrchestrator {
    matcher: IntentMatcher,
    retriever: Retriever,
    composer: AnswerComposer,
    suggestions: SuggestionUpdater,
    registry: Arc<FeatureRegistry>,
    knowledge: Arc<KnowledgeBase>,
    dispatcher: Arc<dyn FeatureDispatcher>,
}

impl DialogueOrchestrator {
    /// Create an orchestrator over the given read-only collaborators.
    pub fn new(
        config: &ChatConfig,
        registry: Arc<FeatureRegistry>,
        knowledge: Arc<KnowledgeBase>,
        dispatcher: Arc<dyn FeatureDispatcher>,
    ) -> Self {
        Self {
            matcher: IntentMatcher::new(config.confidence_threshold),
            retriever: Retriever::new(config.retrieval_top_k),
            composer: AnswerComposer::new(config.max_context_chars),
            suggestions: SuggestionUpdater::new(),
            registry,
            knowledge,
            dispatcher,
        }
    }

    /// Enable the paraphrase strategy for the retrieval path.
    pub fn with_model(mut self, model: Arc<dyn ParaphraseModel>) -> Self {
        self.composer = self.composer.with_model(model);
        self
    }

    /// Replace the default suggestion policy.
    pub fn with_suggestions(mut self, suggestions: SuggestionUpdater) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Handle one chat turn.
    ///
    /// Only caller misuse (empty or over-long message) returns an error;
    /// every internal failure degrades to a textual reply so the turn
    /// completes end-to-end.
    pub async fn handle_message(
        &self,
        message: &str,
        session: &SessionContext,
    ) -> Result<ChatReply, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(ChatError::MessageTooLong(MAX_MESSAGE_LENGTH));
        }

        let intent = self.matcher.resolve(message, &self.registry);

        let mut reply = match &intent {
            Intent::Matched {
                feature_id,
                params,
                confidence,
            } => {
                debug!(feature_id = %feature_id, confidence, "Direct feature dispatch");
                self.dispatch_feature(feature_id, params, session).await
            }
            Intent::Unmatched => {
                let results = self.retriever.retrieve(message, &self.knowledge);
                debug!(hits = results.len(), "Retrieval path");
                let text = self
                    .composer
                    .compose_retrieval(message, &results, &self.knowledge)
                    .await;
                ChatReply {
                    reply: text,
                    feature: None,
                    feature_id: None,
                    suggestions: vec![],
                }
            }
        };

        reply.suggestions = self.suggestions.update(&intent, &self.registry);
        Ok(reply)
    }

    /// Invoke the external analytics function for a matched feature.
    ///
    /// Deterministic features take priority over retrieval, so this path
    /// never consults the knowledge base. Failures degrade to an apology
    /// reply with no payload.
    async fn dispatch_feature(
        &self,
        feature_id: &str,
        params: &std::collections::BTreeMap<String, String>,
        session: &SessionContext,
    ) -> ChatReply {
        let Some(descriptor) = self.registry.get(feature_id) else {
            warn!(feature_id = %feature_id, "Matched feature missing from registry");
            return degraded_reply();
        };

        match self.dispatcher.dispatch(feature_id, params, session).await {
            Ok(FeatureOutcome::Payload(payload)) => ChatReply {
                reply: self.composer.acknowledge_feature(descriptor),
                feature: Some(payload),
                feature_id: None,
                suggestions: vec![],
            },
            Ok(FeatureOutcome::Deferred) => ChatReply {
                reply: self.composer.acknowledge_feature(descriptor),
                feature: None,
                feature_id: Some(descriptor.id.clone()),
                suggestions: vec![],
            },
            Err(e) => {
                warn!(feature_id = %feature_id, error = %e, "Feature dispatch failed");
                degraded_reply()
            }
        }
    }
}

fn degraded_reply() -> ChatReply {
    ChatReply {
        reply: FEATURE_FAILURE_REPLY.to_string(),
        feature: None,
        feature_id: None,
        suggestions: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use async_trait::async_trait;

    use gaffer_core::types::FeaturePayload;

    use crate::compose::NO_MATCH_REPLY;
    use crate::llm::ParaphraseModel;
    use crate::seed::default_corpus;
    use crate::types::DeferredDispatcher;

    struct InlineDispatcher;

    #[async_trait]
    impl FeatureDispatcher for InlineDispatcher {
        async fn dispatch(
            &self,
            _feature_id: &str,
            _params: &BTreeMap<String, String>,
            _session: &SessionContext,
        ) -> Result<FeatureOutcome, ChatError> {
            Ok(FeatureOutcome::Payload(FeaturePayload::Text {
                text: "inline result".to_string(),
            }))
        }
    }

    struct FailingDispatcher;

    #[async_trait]
    impl FeatureDispatcher for FailingDispatcher {
        async fn dispatch(
            &self,
            _feature_id: &str,
            _params: &BTreeMap<String, String>,
            _session: &SessionContext,
        ) -> Result<FeatureOutcome, ChatError> {
            Err(ChatError::DispatchError("analytics offline".to_string()))
        }
    }

    struct TimingOutModel;

    #[async_trait]
    impl ParaphraseModel for TimingOutModel {
        async fn paraphrase(&self, _query: &str, _context: &str) -> Result<String, ChatError> {
            Err(ChatError::ModelError("request timed out".to_string()))
        }
    }

    fn session() -> SessionContext {
        SessionContext {
            team_id: 1042,
            league_id: 77,
            current_gameweek: 12,
        }
    }

    fn orchestrator_with(
        dispatcher: Arc<dyn FeatureDispatcher>,
        corpus: Vec<crate::kb::KnowledgeDocument>,
    ) -> DialogueOrchestrator {
        DialogueOrchestrator::new(
            &ChatConfig::default(),
            Arc::new(FeatureRegistry::standard()),
            Arc::new(KnowledgeBase::build(corpus)),
            dispatcher,
        )
    }

    fn default_orchestrator() -> DialogueOrchestrator {
        orchestrator_with(Arc::new(DeferredDispatcher), default_corpus())
    }

    // ---- Validation ----

    #[tokio::test]
    async fn test_empty_message_rejected_before_matching() {
        let orch = default_orchestrator();
        let result = orch.handle_message("", &session()).await;
        assert!(matches!(result.unwrap_err(), ChatError::EmptyMessage));

        let result = orch.handle_message("   ", &session()).await;
        assert!(matches!(result.unwrap_err(), ChatError::EmptyMessage));
    }

    #[tokio::test]
    async fn test_over_long_message_rejected() {
        let orch = default_orchestrator();
        let long = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        let result = orch.handle_message(&long, &session()).await;
        assert!(matches!(result.unwrap_err(), ChatError::MessageTooLong(_)));
    }

    // ---- Direct dispatch path ----

    #[tokio::test]
    async fn test_trigger_match_yields_feature_id() {
        let orch = default_orchestrator();
        let reply = orch
            .handle_message("Who is my captain right now?", &session())
            .await
            .unwrap();
        assert_eq!(reply.feature_id.as_deref(), Some("current-captain"));
        assert!(reply.feature.is_none());
        assert!(reply.reply.contains("Current Captain"));
    }

    #[tokio::test]
    async fn test_inline_dispatch_carries_payload_not_id() {
        let orch = orchestrator_with(Arc::new(InlineDispatcher), default_corpus());
        let reply = orch
            .handle_message("who is my captain right now", &session())
            .await
            .unwrap();
        assert!(reply.feature_id.is_none());
        assert!(matches!(
            reply.feature,
            Some(FeaturePayload::Text { ref text }) if text == "inline result"
        ));
    }

    #[tokio::test]
    async fn test_dispatch_failure_degrades_to_apology() {
        let orch = orchestrator_with(Arc::new(FailingDispatcher), default_corpus());
        let reply = orch
            .handle_message("who is my captain right now", &session())
            .await
            .unwrap();
        assert_eq!(reply.reply, FEATURE_FAILURE_REPLY);
        assert!(reply.feature.is_none());
        assert!(reply.feature_id.is_none());
    }

    // ---- Retrieval path ----

    #[tokio::test]
    async fn test_unmatched_with_empty_corpus_gives_fixed_fallback() {
        let orch = orchestrator_with(Arc::new(DeferredDispatcher), vec![]);
        let reply = orch
            .handle_message("will I beat Alex?", &session())
            .await
            .unwrap();
        assert_eq!(reply.reply, NO_MATCH_REPLY);
        assert!(reply.feature.is_none());
        assert!(reply.feature_id.is_none());
    }

    #[tokio::test]
    async fn test_unmatched_composes_from_chip_documents() {
        let orch = default_orchestrator();
        let reply = orch
            .handle_message("when should I use my wildcard?", &session())
            .await
            .unwrap();
        assert!(reply.reply.starts_with("Here's what I found:"));
        assert!(reply.reply.contains("Wildcard timing"));
        assert!(reply.feature.is_none());
        assert!(reply.feature_id.is_none());
    }

    #[tokio::test]
    async fn test_model_timeout_matches_template_only_reply() {
        let template_only = default_orchestrator();
        let with_model = orchestrator_with(Arc::new(DeferredDispatcher), default_corpus())
            .with_model(Arc::new(TimingOutModel));

        let message = "when should I use my wildcard?";
        let expected = template_only
            .handle_message(message, &session())
            .await
            .unwrap();
        let actual = with_model.handle_message(message, &session()).await.unwrap();
        assert_eq!(actual.reply, expected.reply);
    }

    // ---- Suggestions ----

    #[tokio::test]
    async fn test_every_turn_carries_suggestions() {
        let orch = default_orchestrator();
        let matched = orch
            .handle_message("who is my captain right now", &session())
            .await
            .unwrap();
        let unmatched = orch
            .handle_message("will I beat Alex?", &session())
            .await
            .unwrap();
        assert_eq!(matched.suggestions.len(), FeatureRegistry::standard().len());
        assert_eq!(matched.suggestions.len(), unmatched.suggestions.len());
    }

    #[tokio::test]
    async fn test_suggestions_stable_across_repeated_turns() {
        let orch = default_orchestrator();
        let a = orch
            .handle_message("chip strategy", &session())
            .await
            .unwrap();
        let b = orch
            .handle_message("chip strategy", &session())
            .await
            .unwrap();
        assert_eq!(a.suggestions, b.suggestions);
    }

    // ---- Turn isolation ----

    #[tokio::test]
    async fn test_reply_is_always_non_empty() {
        let orch = default_orchestrator();
        for message in [
            "who is my captain right now",
            "when should I use my wildcard",
            "complete gibberish zzzz",
        ] {
            let reply = orch.handle_message(message, &session()).await.unwrap();
            assert!(!reply.reply.is_empty(), "empty reply for {:?}", message);
        }
    }

    #[tokio::test]
    async fn test_concurrent_turns_share_read_only_state() {
        let orch = Arc::new(default_orchestrator());
        let mut handles = Vec::new();
        for i in 0..8 {
            let orch = Arc::clone(&orch);
            handles.push(tokio::spawn(async move {
                let message = if i % 2 == 0 {
                    "who is my captain right now".to_string()
                } else {
                    "when should I use my wildcard".to_string()
                };
                orch.handle_message(&message, &session()).await.unwrap()
            }));
        }
        for handle in handles {
            let reply = handle.await.unwrap();
            assert!(!reply.reply.is_empty());
        }
    }
}

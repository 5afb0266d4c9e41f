//! Conversational query-resolution engine for Gaffer.
//!
//! Takes a free-text message, resolves it to a deterministic analytics
//! feature when possible, and otherwise falls back to retrieval over a
//! small curated knowledge base, composing an answer that may be
//! paraphrased by an external model.

pub mod compose;
pub mod error;
pub mod intent;
pub mod kb;
pub mod llm;
pub mod orchestrator;
pub mod retrieve;
pub mod seed;
pub mod suggest;
pub mod types;

pub use compose::{AnswerComposer, FEATURE_FAILURE_REPLY, NO_MATCH_REPLY};
pub use error::ChatError;
pub use intent::IntentMatcher;
pub use kb::{DocCategory, KnowledgeBase, KnowledgeDocument};
pub use llm::{HttpParaphraseModel, ParaphraseModel};
pub use orchestrator::DialogueOrchestrator;
pub use retrieve::Retriever;
pub use suggest::SuggestionUpdater;
pub use types::{
    ChatReply, DeferredDispatcher, FeatureDispatcher, FeatureOutcome, Intent, Query,
    RetrievalResult,
};

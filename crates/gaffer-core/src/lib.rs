//! Shared foundation for the Gaffer fantasy-football assistant.
//!
//! Holds the configuration model, the top-level error type, and the
//! contract types (feature registry, payload shapes, session context)
//! shared between the chat engine and the API surface.

pub mod config;
pub mod error;
pub mod types;

pub use config::GafferConfig;
pub use error::{GafferError, Result};
pub use types::{
    FeatureDescriptor, FeaturePayload, FeatureRegistry, ParamSpec, SessionContext, Suggestion,
    TeamSlot,
};

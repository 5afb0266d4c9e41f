//! REST surface for the Gaffer assistant.
//!
//! A thin axum layer over the chat engine: login stores the session
//! context, the chat endpoint runs one dialogue turn, and the dashboard
//! pulls its quick prompts from the suggestions endpoint.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

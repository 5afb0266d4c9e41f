//! Route handler functions for all API endpoints.
//!
//! Each handler extracts its JSON body via axum extractors, interacts
//! with AppState, and returns JSON responses.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use gaffer_core::types::{FeaturePayload, SessionContext, Suggestion};
use gaffer_chat::suggest::registry_suggestions;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub team_id: u32,
    pub league_id: u32,
    /// Optional; defaults to gameweek 1 until league data is fetched.
    pub current_gameweek: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub team_id: u32,
    pub league_id: u32,
}

/// The chat response contract consumed by the dashboard.
///
/// `feature` and `featureId` are mutually exclusive; both are absent on
/// the retrieval path.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponseBody {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<FeaturePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /health - liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/login - validate ids and store the session context.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if req.team_id == 0 || req.league_id == 0 {
        return Err(ApiError::BadRequest(
            "team_id and league_id are required".to_string(),
        ));
    }

    let context = SessionContext {
        team_id: req.team_id,
        league_id: req.league_id,
        current_gameweek: req.current_gameweek.unwrap_or(1),
    };

    let mut session = state
        .session
        .lock()
        .map_err(|e| ApiError::Internal(format!("session lock poisoned: {}", e)))?;
    *session = Some(context);

    info!(team_id = req.team_id, league_id = req.league_id, "Session established");

    Ok(Json(LoginResponse {
        message: format!("Welcome, manager of team {}!", req.team_id),
        team_id: req.team_id,
        league_id: req.league_id,
    }))
}

/// POST /api/chat - run one dialogue turn.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponseBody>, ApiError> {
    let session = state
        .session_context()
        .ok_or_else(|| ApiError::Unauthorized("log in before chatting".to_string()))?;

    let reply = state
        .orchestrator
        .handle_message(&req.message, &session)
        .await?;

    Ok(Json(ChatResponseBody {
        reply: reply.reply,
        feature: reply.feature,
        feature_id: reply.feature_id,
        suggestions: reply.suggestions,
    }))
}

/// GET /api/suggestions - the registry-derived quick prompts.
pub async fn suggestions(State(state): State<AppState>) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: registry_suggestions(&state.registry),
    })
}

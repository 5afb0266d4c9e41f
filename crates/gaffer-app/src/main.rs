//! Gaffer application binary - composition root.
//!
//! Ties the workspace crates into a single executable:
//! 1. Parse CLI args and load configuration from TOML
//! 2. Build the feature registry and knowledge-base index once
//! 3. Wire the dialogue orchestrator (paraphrase model if configured)
//! 4. Start the axum REST API server

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gaffer_api::{create_router, AppState};
use gaffer_chat::seed::default_corpus;
use gaffer_chat::{DeferredDispatcher, DialogueOrchestrator, HttpParaphraseModel, KnowledgeBase};
use gaffer_core::config::GafferConfig;
use gaffer_core::types::FeatureRegistry;

mod cli;

use cli::CliArgs;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let config_path = args.resolve_config_path();
    let config = GafferConfig::load_or_default(&config_path);

    let log_level = args.resolve_log_level(&config.general.log_level);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let port = args.resolve_port(config.general.port);

    // Read-only shared state, built once per process lifetime.
    let registry = Arc::new(FeatureRegistry::standard());
    let knowledge = Arc::new(KnowledgeBase::build(default_corpus()));
    tracing::info!(
        features = registry.len(),
        documents = knowledge.len(),
        "Registry and knowledge base built"
    );

    let mut orchestrator = DialogueOrchestrator::new(
        &config.chat,
        Arc::clone(&registry),
        knowledge,
        Arc::new(DeferredDispatcher),
    );
    match HttpParaphraseModel::from_config(&config.model) {
        Some(model) => {
            tracing::info!(model = %config.model.model_id, "Paraphrase strategy enabled");
            orchestrator = orchestrator.with_model(Arc::new(model));
        }
        None => tracing::info!("No model credential; template strategy only"),
    }

    let state = AppState::new(config, orchestrator, registry);
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!(%addr, "Starting Gaffer API server");
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

// SPDX-License-Identifier: MIT

//! Paceline sync runner.
//!
//! Runs one synchronization for the user given on the command line,
//! logging each phase as the engine reports it.

use std::sync::Arc;

use paceline::{
    config::Config,
    db::FirestoreRecordStore,
    services::HttpWorkoutSource,
    SyncEngine, SyncPhase,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let user_id = std::env::args()
        .nth(1)
        .ok_or("usage: paceline <user-id>")?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(user_id = %user_id, "Starting Paceline sync");

    // Initialize the Firestore record store
    let store = FirestoreRecordStore::new(&config.gcp_project_id).await?;

    // Initialize the workout source client
    let source = HttpWorkoutSource::new(
        config.source_base_url.clone(),
        config.source_api_key.clone(),
    );

    let engine = Arc::new(SyncEngine::new(Arc::new(source), Arc::new(store)));

    let mut phases = engine.synchronize(user_id);
    while let Some(phase) = phases.recv().await {
        match &phase {
            SyncPhase::Syncing { current, total } => {
                tracing::info!(current, total, "Syncing workout details");
            }
            SyncPhase::Completed { count } => {
                tracing::info!(count, "Sync completed");
            }
            SyncPhase::Failed { cause } => {
                tracing::error!(cause = %cause, "Sync failed");
                return Err(cause.clone().into());
            }
            other => {
                tracing::info!(phase = ?other, "Sync phase");
            }
        }
    }

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("paceline=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(format)
        .init();
}

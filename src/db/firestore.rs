// SPDX-License-Identifier: MIT

//! Firestore-backed record store.
//!
//! Stores one document per synced workout. Each record is written as a
//! single document (all fields or nothing); there is no partial-record
//! state for a workout.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::db::{collections, RecordStore};
use crate::error::{AppError, Result};
use crate::models::WorkoutRecord;

/// Firestore record store client.
#[derive(Clone)]
pub struct FirestoreRecordStore {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreRecordStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All store operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Document ID for one user's workout record.
    fn document_id(user_id: &str, workout_id: &str) -> String {
        format!(
            "{}_{}",
            urlencoding::encode(user_id),
            urlencoding::encode(workout_id)
        )
    }
}

#[async_trait]
impl RecordStore for FirestoreRecordStore {
    async fn existing_timestamps(&self, user_id: &str) -> Result<Vec<DateTime<Utc>>> {
        let user_id = user_id.to_string();
        let records: Vec<WorkoutRecord> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(records.into_iter().map(|r| r.start_date).collect())
    }

    async fn write_records(&self, user_id: &str, records: &[WorkoutRecord]) -> Result<usize> {
        let client = self.get_client().map_err(|e| AppError::Write {
            cause: e.to_string(),
            written: 0,
        })?;

        let mut written = 0usize;
        for record in records {
            let doc_id = Self::document_id(user_id, &record.workout_id);

            // Abort on the first failure; what is written stays written
            // and the next run's diff will skip it.
            let _: () = client
                .fluent()
                .update()
                .in_col(collections::WORKOUTS)
                .document_id(&doc_id)
                .object(record)
                .execute()
                .await
                .map_err(|e| AppError::Write {
                    cause: e.to_string(),
                    written,
                })?;
            written += 1;

            tracing::debug!(
                user_id,
                workout_id = %record.workout_id,
                "Workout record written"
            );
        }

        tracing::info!(user_id, written, "Workout records stored");
        Ok(written)
    }
}

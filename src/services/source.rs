// SPDX-License-Identifier: MIT

//! Workout source adapter.
//!
//! [`WorkoutSource`] is the seam between the engine and whatever
//! platform records workouts; [`HttpWorkoutSource`] implements it over a
//! fitness-platform REST API. Handles:
//! - Per-user access tokens with expiry-margin caching
//! - Basic summary listing (cheap, for diffing)
//! - Detail, location-trace, and heart-rate stream fetches

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{HeartRateSample, RoutePoint, WorkoutDetail, WorkoutSummary};

/// Margin before token expiration when we proactively re-authorize.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Source of raw workout data.
///
/// All methods take the user whose data is requested; implementations
/// are shared across runs and must be safe to call concurrently for
/// different users.
#[async_trait]
pub trait WorkoutSource: Send + Sync {
    /// Request access to the user's workout data. Denied or unavailable
    /// sources fail the sync run; the engine never retries this.
    async fn request_authorization(&self, user_id: &str) -> Result<()>;

    /// All-time list of basic workout summaries, most recent first.
    async fn fetch_basic_workouts(&self, user_id: &str) -> Result<Vec<WorkoutSummary>>;

    /// Detailed metrics for one workout (the expensive call; only made
    /// for workouts the diff identified as new).
    async fn fetch_workout_detail(&self, user_id: &str, workout_id: &str)
        -> Result<WorkoutDetail>;

    /// Ordered GPS trace for one workout.
    async fn fetch_location_trace(&self, user_id: &str, workout_id: &str)
        -> Result<Vec<RoutePoint>>;

    /// Ordered heart-rate sample stream for one workout.
    async fn fetch_heart_rate_samples(
        &self,
        user_id: &str,
        workout_id: &str,
    ) -> Result<Vec<HeartRateSample>>;
}

/// Cached access token with expiry information.
#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// REST-backed workout source.
pub struct HttpWorkoutSource {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    /// In-memory cache of per-user access tokens.
    tokens: DashMap<String, CachedToken>,
}

impl HttpWorkoutSource {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            tokens: DashMap::new(),
        }
    }

    // ─── Token Management ────────────────────────────────────────────

    /// Get a valid (non-expired) access token for the user, authorizing
    /// with the source if the cached one is missing or expiring soon.
    async fn valid_token(&self, user_id: &str) -> Result<String> {
        let now = Utc::now();
        let margin = Duration::seconds(TOKEN_REFRESH_MARGIN_SECS);

        if let Some(cached) = self.tokens.get(user_id) {
            if now + margin < cached.expires_at {
                return Ok(cached.access_token.clone());
            }
        }

        let response = self
            .http
            .post(format!("{}/oauth/token", self.base_url))
            .form(&[
                ("api_key", self.api_key.as_str()),
                ("user_id", user_id),
                ("grant_type", "api_key"),
            ])
            .send()
            .await
            .map_err(|e| AppError::SourceUnavailable(format!("Token request failed: {}", e)))?;

        let token: TokenResponse = check_response_json(response).await?;
        let expires_at = DateTime::from_timestamp(token.expires_at, 0).unwrap_or_default();

        self.tokens.insert(
            user_id.to_string(),
            CachedToken {
                access_token: token.access_token.clone(),
                expires_at,
            },
        );

        tracing::debug!(user_id, "Source access token obtained");
        Ok(token.access_token)
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str, user_id: &str) -> Result<T> {
        let access_token = self.valid_token(user_id).await?;
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        check_response_json(response).await
    }

    fn workout_url(&self, workout_id: &str, suffix: &str) -> String {
        format!(
            "{}/workouts/{}/{}",
            self.base_url,
            urlencoding::encode(workout_id),
            suffix
        )
    }
}

#[async_trait]
impl WorkoutSource for HttpWorkoutSource {
    async fn request_authorization(&self, user_id: &str) -> Result<()> {
        self.valid_token(user_id).await?;
        Ok(())
    }

    async fn fetch_basic_workouts(&self, user_id: &str) -> Result<Vec<WorkoutSummary>> {
        let url = format!(
            "{}/users/{}/workouts",
            self.base_url,
            urlencoding::encode(user_id)
        );
        let dtos: Vec<WorkoutSummaryDto> = self.get_json(&url, user_id).await?;
        dtos.into_iter().map(WorkoutSummaryDto::into_model).collect()
    }

    async fn fetch_workout_detail(
        &self,
        user_id: &str,
        workout_id: &str,
    ) -> Result<WorkoutDetail> {
        let url = self.workout_url(workout_id, "detail");
        let dto: WorkoutDetailDto = self.get_json(&url, user_id).await?;
        Ok(dto.into_model())
    }

    async fn fetch_location_trace(
        &self,
        user_id: &str,
        workout_id: &str,
    ) -> Result<Vec<RoutePoint>> {
        let url = self.workout_url(workout_id, "route");
        let dtos: Vec<RoutePointDto> = self.get_json(&url, user_id).await?;
        dtos.into_iter().map(RoutePointDto::into_model).collect()
    }

    async fn fetch_heart_rate_samples(
        &self,
        user_id: &str,
        workout_id: &str,
    ) -> Result<Vec<HeartRateSample>> {
        let url = self.workout_url(workout_id, "heartrate");
        let dto: HeartRateStreamDto = self.get_json(&url, user_id).await?;
        dto.into_samples()
    }
}

/// Check response status and parse the JSON body.
///
/// 401 means the user or platform revoked access; 503 means the source
/// itself is down. Everything else non-2xx is a plain fetch failure.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(AppError::AuthorizationDenied);
        }
        if status.as_u16() == 503 {
            tracing::warn!("Workout source reported unavailable (503)");
            return Err(AppError::SourceUnavailable(body));
        }
        return Err(AppError::Fetch(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Fetch(format!("JSON parse error: {}", e)))
}

// ─── Wire DTOs ───────────────────────────────────────────────────────
// Decoded at the boundary with explicit per-field presence; the core
// only ever sees the typed models.

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_at: i64,
}

#[derive(Debug, Deserialize)]
struct WorkoutSummaryDto {
    id: String,
    start_date: String,
    distance_meters: f64,
    duration_seconds: f64,
}

impl WorkoutSummaryDto {
    fn into_model(self) -> Result<WorkoutSummary> {
        Ok(WorkoutSummary {
            start_date: parse_rfc3339(&self.start_date)?,
            id: self.id,
            distance_meters: self.distance_meters,
            duration_seconds: self.duration_seconds,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct WorkoutDetailDto {
    #[serde(default)]
    calories: Option<f64>,
    #[serde(default)]
    avg_heart_rate: Option<f64>,
    #[serde(default)]
    max_heart_rate: Option<f64>,
    #[serde(default)]
    min_heart_rate: Option<f64>,
    #[serde(default)]
    cadence: Option<f64>,
    #[serde(default)]
    stride_length: Option<f64>,
    #[serde(default)]
    step_count: Option<u32>,
}

impl WorkoutDetailDto {
    fn into_model(self) -> WorkoutDetail {
        WorkoutDetail {
            calories: self.calories,
            avg_heart_rate: self.avg_heart_rate,
            max_heart_rate: self.max_heart_rate,
            min_heart_rate: self.min_heart_rate,
            cadence: self.cadence,
            stride_length: self.stride_length,
            step_count: self.step_count,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RoutePointDto {
    latitude: f64,
    longitude: f64,
    timestamp: String,
}

impl RoutePointDto {
    fn into_model(self) -> Result<RoutePoint> {
        Ok(RoutePoint {
            latitude: self.latitude,
            longitude: self.longitude,
            timestamp: parse_rfc3339(&self.timestamp)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct HeartRateStreamDto {
    workout_start: String,
    samples: Vec<HeartRateSampleDto>,
}

#[derive(Debug, Deserialize)]
struct HeartRateSampleDto {
    timestamp: String,
    bpm: f64,
}

impl HeartRateStreamDto {
    fn into_samples(self) -> Result<Vec<HeartRateSample>> {
        let workout_start = parse_rfc3339(&self.workout_start)?;
        self.samples
            .into_iter()
            .map(|dto| {
                Ok(HeartRateSample::new(
                    parse_rfc3339(&dto.timestamp)?,
                    dto.bpm,
                    workout_start,
                ))
            })
            .collect()
    }
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Fetch(format!("Invalid timestamp '{}': {}", value, e)))
}

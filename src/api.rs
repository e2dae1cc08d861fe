//! JSON API surface for the single-page form
//!
//! Three routes, nested under `/api` by the web server: form defaults and
//! diagnostics, a live connectivity test, and plan generation.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::VERSION;
use crate::config::DefaultsConfig;
use crate::error::TripForgeError;
use crate::export;
use crate::gemini::GeminiClient;
use crate::models::TripRequest;
use crate::planner::PlannerService;

/// Shared state behind the router, built once at startup
pub struct AppState {
    /// Generation pipeline
    pub planner: PlannerService<GeminiClient>,
    /// Form defaults served to the page
    pub defaults: DefaultsConfig,
    /// Model resource name, for the diagnostics panel
    pub model: String,
    /// Masked credential preview, for the diagnostics panel
    pub api_key_preview: String,
    /// Recorded outcome of the startup self-test
    pub startup: StartupStatus,
}

/// Outcome of the startup connectivity self-test.
///
/// A failed self-test is reported in the diagnostics panel but does not
/// block the form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupStatus {
    pub api_connection: bool,
    pub detail: String,
}

impl StartupStatus {
    /// Self-test reached the model and got text back
    #[must_use]
    pub fn passed() -> Self {
        Self {
            api_connection: true,
            detail: "API connection successful".to_string(),
        }
    }

    /// Self-test failed with the given reason
    #[must_use]
    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            api_connection: false,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTripRequest {
    pub destination: String,
    pub party_size: Option<u32>,
    pub num_days: Option<u32>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ApiTripRequest {
    /// Fill omitted fields from the configured form defaults
    fn into_trip_request(self, defaults: &DefaultsConfig) -> TripRequest {
        TripRequest {
            destination: self.destination,
            party_size: self.party_size.unwrap_or(defaults.party_size),
            num_days: self.num_days.unwrap_or(defaults.num_days),
            description: self.description.unwrap_or_default(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTravelPlan {
    pub destination: String,
    pub markdown: String,
    pub generated_at: DateTime<Utc>,
    pub export: ApiExport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiExport {
    pub filename: String,
    pub content_base64: String,
    pub media_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub version: &'static str,
    pub model: String,
    #[serde(rename = "apiKeyPreview")]
    pub api_key_preview: String,
    pub startup: StartupStatus,
    pub defaults: ApiDefaults,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDefaults {
    pub party_size: u32,
    pub num_days: u32,
}

#[derive(Debug, Serialize)]
pub struct ApiSelfTest {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/self-test", post(run_self_test))
        .route("/plan", post(generate_plan))
        .with_state(state)
}

async fn get_status(State(state): State<Arc<AppState>>) -> Json<ApiStatus> {
    Json(ApiStatus {
        version: VERSION,
        model: state.model.clone(),
        api_key_preview: state.api_key_preview.clone(),
        startup: state.startup.clone(),
        defaults: ApiDefaults {
            party_size: state.defaults.party_size,
            num_days: state.defaults.num_days,
        },
    })
}

async fn run_self_test(State(state): State<Arc<AppState>>) -> Json<ApiSelfTest> {
    match state.planner.self_test().await {
        Ok(_) => Json(ApiSelfTest {
            success: true,
            message: "API connection successful!".to_string(),
        }),
        Err(e) => Json(ApiSelfTest {
            success: false,
            message: format!("API connection failed: {}", e.user_message()),
        }),
    }
}

async fn generate_plan(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ApiTripRequest>,
) -> Result<Json<ApiTravelPlan>, (StatusCode, Json<ApiErrorBody>)> {
    let request = payload.into_trip_request(&state.defaults);

    match state.planner.generate_plan(&request).await {
        Ok(plan) => {
            let export_text =
                export::format_export(&plan.destination, &plan.markdown, plan.generated_at);
            Ok(Json(ApiTravelPlan {
                export: ApiExport {
                    filename: export::export_filename(&plan.destination),
                    content_base64: export::export_payload(&export_text),
                    media_type: export::EXPORT_MEDIA_TYPE,
                },
                destination: plan.destination,
                markdown: plan.markdown,
                generated_at: plan.generated_at,
            }))
        }
        Err(e) => {
            error!("Plan generation failed: {e}");
            Err((
                error_status(&e),
                Json(ApiErrorBody {
                    error: e.user_message(),
                }),
            ))
        }
    }
}

/// HTTP status for a pipeline error: bad input is the caller's fault,
/// everything else is a failed upstream call
fn error_status(error: &TripForgeError) -> StatusCode {
    match error {
        TripForgeError::Validation { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    }
}

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use fitplan_core::config::DefaultsConfig;
use fitplan_core::{
    generate_plan, get_default_catalog, Catalog, Error, Plan, PlanRegistry,
    ProfileRequest,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<PlanRegistry>,
    pub defaults: Arc<DefaultsConfig>,
    pub catalog: &'static Catalog,
}

impl AppState {
    pub fn new(defaults: DefaultsConfig) -> Self {
        Self {
            registry: Arc::new(PlanRegistry::new()),
            defaults: Arc::new(defaults),
            catalog: get_default_catalog(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::MissingFields(fields) => {
                tracing::debug!("Rejected request missing {:?}", fields);
                Self::bad_request("Missing required fields")
            }
            Error::InvalidProfile(reason) => {
                Self::bad_request(format!("Invalid profile: {reason}"))
            }
            other => {
                tracing::error!("Plan generation failed: {}", other);
                Self::internal("Error generating workout plan")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "success": false, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PlanResponse<'a> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: &'a Plan,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate-workout", post(generate_workout))
        .route("/api/export-workout/{id}", get(export_workout))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(state: AppState, bind: &str, port: u16) -> fitplan_core::Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .map_err(|e| Error::Config(format!("invalid bind address {bind}:{port}: {e}")))?;
    tracing::info!("fitplan serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("fitplan serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> &'static str {
    "ok"
}

async fn generate_workout(
    State(state): State<AppState>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Malformed generate request: {}", rejection.body_text());
        AppError::bad_request(rejection.body_text())
    })?;

    let profile = request.into_profile(&state.defaults)?;
    let plan = state.registry.put(generate_plan(state.catalog, &profile)?);

    let body = PlanResponse {
        success: true,
        message: Some("Workout plan generated successfully"),
        data: &plan,
    };
    Ok(Json(body).into_response())
}

async fn export_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let plan = state
        .registry
        .find(&id)
        .ok_or_else(|| AppError::not_found("Workout plan not found"))?;

    let format = query.format.as_deref().map(str::to_ascii_lowercase);
    match format.as_deref() {
        None | Some("json") => {
            let body = PlanResponse {
                success: true,
                message: None,
                data: &plan,
            };
            Ok(Json(body).into_response())
        }
        Some(other) => Err(AppError::bad_request(format!(
            "Unsupported export format '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    // -----------------------------------------------------------------------
    // HTTP helpers
    // -----------------------------------------------------------------------

    fn test_state() -> AppState {
        AppState::new(DefaultsConfig::default())
    }

    async fn get_request(state: AppState, uri: &str) -> Response {
        build_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(state: AppState, uri: &str, body: serde_json::Value) -> Response {
        build_router(state)
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 4_194_304)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn full_profile() -> serde_json::Value {
        serde_json::json!({
            "name": "Riley",
            "age": 34,
            "gender": "female",
            "goal": "fat_loss",
            "experience": "intermediate",
            "equipment": ["dumbbells", "bodyweight"],
            "days_per_week": 3
        })
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_health() {
        let resp = get_request(test_state(), "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_generate_workout_registers_plan() {
        let state = test_state();
        let resp = post_json(state.clone(), "/api/generate-workout", full_profile()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Workout plan generated successfully");
        assert_eq!(json["data"]["workoutSplit"], "full_body");
        assert_eq!(json["data"]["sessions"].as_array().unwrap().len(), 12);
        assert_eq!(json["data"]["user"]["name"], "Riley");

        let id = json["data"]["id"].as_str().unwrap();
        assert_eq!(state.registry.len(), 1);
        assert!(state.registry.find(id).is_some());
    }

    #[tokio::test]
    async fn test_generate_workout_fills_defaults() {
        let mut profile = full_profile();
        let map = profile.as_object_mut().unwrap();
        map.remove("equipment");
        map.remove("days_per_week");

        let resp = post_json(test_state(), "/api/generate-workout", profile).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["data"]["user"]["equipment"], serde_json::json!(["bodyweight"]));
        assert_eq!(json["data"]["user"]["days_per_week"], 3);
    }

    #[tokio::test]
    async fn test_generate_workout_missing_fields() {
        let state = test_state();
        let body = serde_json::json!({ "name": "Riley", "age": 34 });
        let resp = post_json(state.clone(), "/api/generate-workout", body).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Missing required fields");
        assert!(state.registry.is_empty());
    }

    #[tokio::test]
    async fn test_generate_workout_rejects_zero_days() {
        let mut profile = full_profile();
        profile["days_per_week"] = serde_json::json!(0);

        let resp = post_json(test_state(), "/api/generate-workout", profile).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("days_per_week"));
    }

    #[tokio::test]
    async fn test_generate_workout_rejects_unknown_experience() {
        let mut profile = full_profile();
        profile["experience"] = serde_json::json!("expert");

        let resp = post_json(test_state(), "/api/generate-workout", profile).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["success"], false);
    }

    #[tokio::test]
    async fn test_export_workout_round_trip() {
        let state = test_state();
        let resp = post_json(state.clone(), "/api/generate-workout", full_profile()).await;
        let generated = body_json(resp).await;
        let id = generated["data"]["id"].as_str().unwrap().to_string();

        let resp = get_request(state, &format!("/api/export-workout/{id}?format=json")).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["success"], true);
        assert!(json.get("message").is_none());
        assert_eq!(json["data"], generated["data"]);
    }

    #[tokio::test]
    async fn test_export_workout_format_ignores_case() {
        let state = test_state();
        let resp = post_json(state.clone(), "/api/generate-workout", full_profile()).await;
        let id = body_json(resp).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let resp = get_request(state, &format!("/api/export-workout/{id}?format=JSON")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_export_workout_not_found() {
        let resp = get_request(test_state(), "/api/export-workout/unknown-id?format=json").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Workout plan not found");
    }

    #[tokio::test]
    async fn test_export_workout_unsupported_format() {
        let state = test_state();
        let resp = post_json(state.clone(), "/api/generate-workout", full_profile()).await;
        let id = body_json(resp).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let resp = get_request(state, &format!("/api/export-workout/{id}?format=pdf")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json["message"].as_str().unwrap().contains("pdf"));
    }
}

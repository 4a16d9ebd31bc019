// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use axum::{
    Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use sign_inference::model::DEFAULT_MODEL;
use sign_inference::{Classification, OnnxDetectorFactory, Sentinel, Session, SharedSession, vocabulary};
use std::env;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

// Shared application state
struct AppState {
    session: SharedSession,
}

// Request body for sign detection
#[derive(Debug, Deserialize, ToSchema)]
struct DetectRequest {
    /// Frame as a data URL: `data:image/jpeg;base64,...`
    image: Option<String>,
}

#[derive(Serialize, ToSchema)]
struct DetectResponse {
    success: bool,
    /// Gesture (HELLO, BYE, PEACE, CALL_ME, YES, NO, UNKNOWN) or sentinel
    /// (INVALID_FRAME, INVALID_IMAGE, NO_HAND, UNSUPPORTED_ENV, ERROR)
    label: String,
    /// Confidence of the current frame (0.0 - 1.0)
    confidence: f32,
}

impl From<Classification> for DetectResponse {
    fn from(result: Classification) -> Self {
        Self {
            success: true,
            label: result.label.to_string(),
            confidence: result.confidence,
        }
    }
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    success: bool,
    /// Error message
    error: String,
}

// Query parameters for voice lookup
#[derive(Debug, Deserialize, IntoParams)]
struct VoiceParams {
    /// Transcribed text, e.g. "hello thankyou"
    text: Option<String>,
}

#[derive(Serialize, ToSchema)]
struct SignItem {
    /// Sign label
    label: String,
    /// Image path
    image: String,
}

#[derive(Serialize, ToSchema)]
struct VoiceResponse {
    /// Signs in spoken order; unknown words are skipped
    sequence: Vec<SignItem>,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Server status
    status: String,
    /// API version
    version: String,
}

// OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sign Inference Server",
        description = "Hand-sign recognition from webcam frames and voice-to-sign lookup.\n\nPost consecutive frames from one camera to `/detect-sign`; labels are smoothed over the last seven frames.",
        version = "0.1.0",
        license(name = "AGPL-3.0", url = "https://ultralytics.com/license")
    ),
    paths(root, health, detect_sign, voice_map),
    components(schemas(DetectRequest, DetectResponse, ErrorResponse, SignItem, VoiceResponse, HealthResponse)),
    tags(
        (name = "signs", description = "Sign recognition and lookup endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
struct ApiDoc;

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/detect-sign", post(detect_sign))
        .route("/voice-map", get(voice_map))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let model_path = env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    tracing::info!("Loading model: {model_path}");

    let session = SharedSession::new(Session::with_factory(OnnxDetectorFactory::new(&model_path)));
    // On failure every frame is answered with UNSUPPORTED_ENV
    if let Err(e) = session.warm_up() {
        tracing::warn!("Sign detection unavailable: {e}");
    }

    let state = Arc::new(AppState { session });

    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!("Swagger UI available at http://localhost:{port}/swagger-ui/");
    axum::serve(listener, app(state)).await?;
    Ok(())
}

/// Root endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Welcome message", body = String)
    )
)]
async fn root() -> &'static str {
    "Sign Inference Server - POST /detect-sign with {\"image\": <data URL>}. Swagger UI at /swagger-ui/"
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse)
    )
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: sign_inference::VERSION.to_string(),
    })
}

/// Classify one webcam frame
///
/// Frames are classified in arrival order by a single session. Decoding and
/// detection faults come back as sentinel labels with `success: true`.
#[utoipa::path(
    post,
    path = "/detect-sign",
    tag = "signs",
    request_body = DetectRequest,
    responses(
        (status = 200, description = "Frame classified", body = DetectResponse),
        (status = 400, description = "Missing body or no image provided", body = ErrorResponse)
    )
)]
async fn detect_sign(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DetectRequest>, JsonRejection>,
) -> Result<Json<DetectResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) =
        payload.map_err(|e| bad_request(format!("Invalid request body: {}", e.body_text())))?;
    let Some(image) = request.image.filter(|s| !s.is_empty()) else {
        return Err(bad_request("No image provided".to_string()));
    };

    // Landmark inference is CPU-bound
    let session = state.session.clone();
    let result = tokio::task::spawn_blocking(move || session.classify_frame(&image))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Classification task failed: {e}");
            Classification::sentinel(Sentinel::Error)
        });

    Ok(Json(result.into()))
}

fn bad_request(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { success: false, error }))
}

/// Translate text into signs
#[utoipa::path(
    get,
    path = "/voice-map",
    tag = "signs",
    params(VoiceParams),
    responses(
        (status = 200, description = "Sign sequence", body = VoiceResponse)
    )
)]
async fn voice_map(Query(params): Query<VoiceParams>) -> Json<VoiceResponse> {
    let text = params.text.unwrap_or_default();
    let sequence = vocabulary::lookup(&text)
        .into_iter()
        .map(|sign| SignItem {
            label: sign.label.to_string(),
            image: sign.image,
        })
        .collect();
    Json(VoiceResponse { sequence })
}

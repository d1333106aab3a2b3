//! HTTP control plane: axum router and request handlers.
//!
//! The server runs on the tokio runtime while the render loop runs on a
//! plain `std::thread`. Handlers share the environment with it and hold
//! the lock only long enough to swap the active animation or read status.
//!
//! ## Rust concepts
//! - `async fn` handlers with axum extractors: `State`, `Json`
//! - `Arc<Mutex<T>>` shared between async tasks and a sync thread
//! - `utoipa` derives for the OpenAPI document served at `/docs`

use crate::animation::AnimationId;
use crate::render::{EnvironmentStatus, SharedEnvironment, lock};
use axum::Router;
use axum::extract::State;
use axum::response::{Html, Json};
use axum::routing::{get, post};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// ── App State ────────────────────────────────────────────────────────

/// Shared application state, passed to every handler via axum's `State`
/// extractor. Cloning only bumps the `Arc` count.
#[derive(Clone)]
pub struct AppState {
    pub env: SharedEnvironment,
    /// What `/on` selects
    pub on: AnimationId,
}

// ── OpenAPI Documentation ────────────────────────────────────────────

#[derive(OpenApi)]
#[openapi(
    paths(get_status, get_animations, post_animation, post_toggle),
    components(schemas(EnvironmentStatus, AnimationId, AnimationRequest)),
    tags(
        (name = "lights", description = "Animation control endpoints"),
        (name = "system", description = "System status endpoints"),
    ),
    info(
        title = "APA102 Lights API",
        version = env!("CARGO_PKG_VERSION"),
        description = "HTTP API for choosing what an APA102 LED strip shows"
    )
)]
pub struct ApiDoc;

// ── Request types ────────────────────────────────────────────────────

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AnimationRequest {
    /// Animation to make active. Use GET /api/v1/animations for the list.
    #[schema(example = "candy_cane")]
    animation: AnimationId,
}

// ── Router ───────────────────────────────────────────────────────────

/// Build the axum router: the plain HTML switch pages plus the JSON API.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(
            SwaggerUi::new("/docs")
                .url("/api-docs/openapi.json", ApiDoc::openapi())
                .config(
                    utoipa_swagger_ui::Config::new(["/api-docs/openapi.json"])
                        .validator_url("none"),
                ),
        )
        .route("/", get(get_index))
        .route("/on", get(get_on))
        .route("/off", get(get_off))
        .route("/toggle", get(get_toggle))
        .route("/api/v1/status", get(get_status))
        .route("/api/v1/animations", get(get_animations))
        .route("/api/v1/animation", post(post_animation))
        .route("/api/v1/toggle", post(post_toggle))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── HTML switch ──────────────────────────────────────────────────────

const INDEX_PAGE: &str = r#"<html>
<body>
<h1><a href="/on">on</a></h1>
<h1><a href="/off">off</a></h1>
<h1><a href="/toggle">toggle</a></h1>
</body>
"#;
const LIGHTS_ON: &str = "<html><body><h1>lights ON</h1>";
const LIGHTS_OFF: &str = "<html><body><h1>lights OFF</h1>";

fn switched(now: AnimationId) -> Html<&'static str> {
    match now {
        AnimationId::Off => Html(LIGHTS_OFF),
        _ => Html(LIGHTS_ON),
    }
}

/// GET /: links to on, off and toggle
async fn get_index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// GET /on: switch to the configured "on" animation
async fn get_on(State(state): State<AppState>) -> Html<&'static str> {
    lock(&state.env).select(state.on);
    switched(state.on)
}

/// GET /off: switch the strip off
async fn get_off(State(state): State<AppState>) -> Html<&'static str> {
    lock(&state.env).select(AnimationId::Off);
    switched(AnimationId::Off)
}

/// GET /toggle: off becomes the last lit animation, anything else off
async fn get_toggle(State(state): State<AppState>) -> Html<&'static str> {
    let now = lock(&state.env).toggle();
    switched(now)
}

// ── JSON API ─────────────────────────────────────────────────────────

/// GET /api/v1/status: what the strip is showing
#[utoipa::path(
    get,
    path = "/api/v1/status",
    tag = "system",
    responses(
        (status = 200, description = "Current environment status", body = EnvironmentStatus)
    )
)]
async fn get_status(State(state): State<AppState>) -> Json<EnvironmentStatus> {
    Json(lock(&state.env).status())
}

/// GET /api/v1/animations: every selectable animation
#[utoipa::path(
    get,
    path = "/api/v1/animations",
    tag = "lights",
    responses(
        (status = 200, description = "Animation names", body = Vec<AnimationId>)
    )
)]
async fn get_animations() -> Json<Vec<AnimationId>> {
    Json(AnimationId::ALL.to_vec())
}

/// POST /api/v1/animation: make an animation active
///
/// The animation always starts fresh, even if it was already running.
#[utoipa::path(
    post,
    path = "/api/v1/animation",
    tag = "lights",
    request_body = AnimationRequest,
    responses(
        (status = 200, description = "Animation switched", body = EnvironmentStatus),
        (status = 422, description = "Unknown animation name")
    )
)]
async fn post_animation(
    State(state): State<AppState>,
    Json(req): Json<AnimationRequest>,
) -> Json<EnvironmentStatus> {
    let mut env = lock(&state.env);
    env.select(req.animation);
    Json(env.status())
}

/// POST /api/v1/toggle: toggle between off and the last lit animation
#[utoipa::path(
    post,
    path = "/api/v1/toggle",
    tag = "lights",
    responses(
        (status = 200, description = "Animation switched", body = EnvironmentStatus)
    )
)]
async fn post_toggle(State(state): State<AppState>) -> Json<EnvironmentStatus> {
    let mut env = lock(&state.env);
    env.toggle();
    Json(env.status())
}

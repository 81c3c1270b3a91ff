use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use signbridge::config::DEFAULT_STATIC_DIR;
use signbridge::{SignConfig, SignError, SignTranslator, Translation};

/// HTTP service translating spoken text into sign clip playlists
#[derive(Parser, Debug)]
#[command(name = "signbridge-web", version, about)]
struct Args {
    /// Media root containing words/ and alphabet/, served under /static
    #[arg(long, env = "SIGNBRIDGE_STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
    static_dir: PathBuf,

    /// Word-vector table enabling embedding similarity
    #[arg(long, env = "SIGNBRIDGE_VECTORS")]
    vectors: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "SIGNBRIDGE_BIND", default_value = "0.0.0.0:5000")]
    bind: String,
}

#[derive(Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<SignTranslator>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = SignConfig::new(&args.static_dir).with_vectors(args.vectors.clone());
    config.validate()?;

    info!("🤟 Starting signbridge web server");

    // Catalog, letters and scorer are built once and shared by all requests
    let translator = SignTranslator::from_config(&config);
    info!("📊 {:?}", translator);
    let state = AppState {
        translator: Arc::new(translator),
    };

    let app = app(state, config.static_dir());

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("🚀 Server running at http://{}", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}

fn app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/translate", post(translate))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<Translation>, ApiError> {
    let text = match payload {
        Ok(Json(TranslateRequest { text: Some(text) })) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!("Translate request without text");
            return Err(invalid_input());
        }
        Err(rejection) => {
            warn!("Rejected translate request: {}", rejection);
            return Err(invalid_input());
        }
    };

    info!("🗣️ Received text: '{}'", text);

    // Segmentation is CPU-bound; a panic in it fails only this request
    let translator = Arc::clone(&state.translator);
    let translation = tokio::task::spawn_blocking(move || translator.translate(&text))
        .await
        .map_err(|e| {
            let err = SignError::Internal(e.to_string());
            error!("🔥 Error in /translate: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Server error".to_string(),
                }),
            )
        })?;

    if !translation.unmatched.is_empty() {
        warn!("No sign for: {}", translation.unmatched.join(", "));
    }
    info!("✅ Translated into {} clips", translation.results.len());

    Ok(Json(translation))
}

fn invalid_input() -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Missing 'text' field".to_string(),
        }),
    )
}

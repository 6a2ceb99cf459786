//! Serve command - HTTP upload endpoint returning the extraction JSON.

use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Args;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use nfse_core::{
    extract_from_file, DocumentKind, ExtractionResult, NfseConfig, NfseError, NfseParser, OcrError,
};

use super::load_config;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: SocketAddr,

    /// Maximum upload size in megabytes
    #[arg(long, default_value = "20")]
    max_upload_mb: usize,
}

#[derive(Clone)]
struct AppState {
    config: Arc<NfseConfig>,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    // Fail at startup rather than on every request
    NfseParser::from_config(&config.extraction)?;

    let app = router(Arc::new(config), args.max_upload_mb * 1024 * 1024);

    let listener = TcpListener::bind(&args.addr).await?;
    info!("NFSe extractor listening on {}", args.addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(config: Arc<NfseConfig>, body_limit: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/extract", post(extract_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { config })
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "online",
        "service": "nfse-extractor",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Error response with a JSON body.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<NfseError> for ApiError {
    fn from(err: NfseError) -> Self {
        let status = match &err {
            NfseError::UnsupportedType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            NfseError::Ocr(OcrError::EngineUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            e if e.is_processing() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Extraction failed: {}", err);
        } else {
            warn!("Rejected upload: {}", err);
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

/// Accept one uploaded document and return its provider fields.
///
/// The field named `file` is used; without one, the first field is.
async fn extract_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResult>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Upload error: {}", e)))?
    {
        let is_file = field.name() == Some("file");
        if !is_file && upload.is_some() {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Read error: {}", e)))?;

        upload = Some((filename, data));
        if is_file {
            break;
        }
    }

    let (filename, data) = upload.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    if data.is_empty() {
        return Err(ApiError::bad_request("Uploaded file is empty"));
    }

    let kind = DocumentKind::from_path(Path::new(&filename))?;
    info!("Received {} upload: {} ({} bytes)", kind, filename, data.len());

    let extension = Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    let config = state.config.clone();

    let result = tokio::task::spawn_blocking(move || {
        extract_bytes(&data, &extension, kind, &config)
    })
    .await
    .map_err(|e| ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: format!("Extraction task failed: {}", e),
    })??;

    Ok(Json(result))
}

/// Run extraction on uploaded bytes through a temporary file.
///
/// The file is removed when it goes out of scope, on success and on error.
fn extract_bytes(
    data: &[u8],
    extension: &str,
    kind: DocumentKind,
    config: &NfseConfig,
) -> nfse_core::Result<ExtractionResult> {
    let mut file = tempfile::Builder::new()
        .prefix("nfse-upload-")
        .suffix(&format!(".{}", extension))
        .tempfile()?;
    file.write_all(data)?;
    file.flush()?;

    extract_from_file(file.path(), kind, config)
}

#[cfg(test)]
#[path = "../../tests/common/mod.rs"]
mod fixtures;

use axum::http::header;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use crate::catalog::store::MotifCatalog;
use crate::cli::ServeArgs;
use crate::scanning::analysis::{analyze, AnalysisError, AnalysisRequest, InputSource};
use crate::scanning::scanner::MotifScanner;
use crate::utils::validation::{validate_upload, ValidationError};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_MULTIPART_FIELDS: usize = 12;
pub const MAX_FILE_FIELD_SIZE: usize = 16 * 1024 * 1024; // 16MB
pub const MAX_TEXT_FIELD_SIZE: usize = 4 * 1024 * 1024; // 4MB

/// Filename offered for CSV downloads
pub const RESULTS_CSV_FILENAME: &str = "motif_analysis_results.csv";

/// Shared application state
pub struct AppState {
    pub catalog: MotifCatalog,
}

/// How the client wants the result table returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseFormat {
    Json,
    Csv,
}

/// Input extracted from the multipart form
#[derive(Debug)]
struct RequestData {
    request: AnalysisRequest,
    format: ResponseFormat,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

fn error_response(
    status: StatusCode,
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> Response {
    (
        status,
        Json(create_safe_error_response(
            error_type,
            user_message,
            internal_error,
        )),
    )
        .into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Build the application router with routes, security headers, timeouts and
/// body limits. Per-IP rate limiting is added by [`create_router`].
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/motifs", get(motifs_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(120),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(32))
                // Accommodate the largest file plus multipart overhead
                .layer(DefaultBodyLimit::max(64 * 1024 * 1024)),
        )
}

/// Create the full application router with the built-in catalog and
/// IP-based rate limiting.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
#[allow(clippy::missing_panics_doc)] // Panics only on invalid governor config (constants are valid)
pub fn create_router() -> anyhow::Result<Router> {
    let catalog = MotifCatalog::load_builtin()?;
    let state = Arc::new(AppState { catalog });

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(2) // 2 requests per second per IP
        .burst_size(20)
        .finish()
        .unwrap();

    Ok(build_router(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let app = create_router()?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting nonb-finder web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

/// API endpoint: scan uploaded FASTA files and/or a pasted sequence
async fn analyze_handler(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let start_time = Instant::now();

    let RequestData { request, format } = match extract_request_data(&mut multipart).await {
        Ok(data) => data,
        Err(error_response) => return error_response,
    };

    // Scanning is CPU-bound; keep it off the async workers
    let scan_state = Arc::clone(&state);
    let outcome = tokio::task::spawn_blocking(move || {
        let scanner = MotifScanner::new(&scan_state.catalog);
        analyze(&scanner, &request)
    })
    .await;

    #[allow(clippy::cast_possible_truncation)] // Processing time won't exceed u64
    let processing_time = start_time.elapsed().as_millis() as u64;

    let table = match outcome {
        Ok(Ok(table)) => table,
        Ok(Err(AnalysisError::NoMotifsFound { sequences })) => {
            return Json(serde_json::json!({
                "status": "no_motifs_found",
                "message": "No motifs found in the submitted sequences",
                "rows": [],
                "summary": [],
                "processing_info": {
                    "sequence_count": sequences,
                    "match_count": 0,
                    "processing_time_ms": processing_time,
                },
            }))
            .into_response();
        }
        Ok(Err(AnalysisError::InputFormat {
            source_name,
            source,
        })) => {
            let user_message = format!(
                "Unable to parse {source_name} as FASTA. Please check the file format and try again."
            );
            return error_response(
                StatusCode::BAD_REQUEST,
                "invalid_input",
                &user_message,
                Some(&source.to_string()),
            );
        }
        Ok(Err(AnalysisError::NoInput)) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "missing_input",
                "No sequence data received. Please upload a FASTA file or paste a sequence.",
                None,
            );
        }
        Ok(Err(AnalysisError::Scan(e))) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "scan_failed",
                "An error occurred while scanning the sequences.",
                Some(&e.to_string()),
            );
        }
        Err(join_error) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred. Please try again.",
                Some(&join_error.to_string()),
            );
        }
    };

    info!(
        "Analyzed request: {} matches in {}ms",
        table.len(),
        processing_time
    );

    match format {
        ResponseFormat::Csv => match table.to_csv_string() {
            Ok(csv) => (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{RESULTS_CSV_FILENAME}\""),
                    ),
                ],
                csv,
            )
                .into_response(),
            Err(e) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "export_failed",
                "Unable to export results as CSV.",
                Some(&e.to_string()),
            ),
        },
        ResponseFormat::Json => Json(serde_json::json!({
            "status": "ok",
            "rows": table.rows(),
            "summary": table.motif_counts(),
            "processing_info": {
                "sequence_count": table.sequence_ids().len(),
                "match_count": table.len(),
                "processing_time_ms": processing_time,
            },
        }))
        .into_response(),
    }
}

/// Extract uploaded files, pasted text and options from the multipart form
async fn extract_request_data(multipart: &mut Multipart) -> Result<RequestData, Response> {
    let mut request = AnalysisRequest::new();
    let mut format = ResponseFormat::Json;
    let mut fields_received = 0usize;

    loop {
        // Check field count limit before processing
        if fields_received >= MAX_MULTIPART_FIELDS {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "field_limit_exceeded",
                "Too many form fields",
                None,
            ));
        }

        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    "malformed_upload",
                    "Failed to read upload. Please try again.",
                    Some(&e.to_string()),
                ));
            }
        };
        fields_received += 1;

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().map(ToString::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        "malformed_upload",
                        "Failed to read uploaded file.",
                        Some(&e.to_string()),
                    )
                })?;

                // Browsers send an empty part when no file was chosen
                if bytes.is_empty() && filename.as_deref().map_or(true, str::is_empty) {
                    continue;
                }

                if bytes.len() > MAX_FILE_FIELD_SIZE {
                    return Err(error_response(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        "file_too_large",
                        "File size exceeds limit",
                        None,
                    ));
                }

                let validated = validate_upload(filename.as_deref(), &bytes)
                    .map_err(|e| validation_error_response(&e))?;
                let source_name = validated
                    .unwrap_or_else(|| format!("upload {}", request.sources.len() + 1));

                request = request.with_source(InputSource::Bytes {
                    name: source_name,
                    content: bytes.to_vec(),
                });
            }
            "sequence" => {
                let text = field.text().await.map_err(|e| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        "malformed_upload",
                        "Failed to read pasted sequence.",
                        Some(&e.to_string()),
                    )
                })?;

                if text.len() > MAX_TEXT_FIELD_SIZE {
                    return Err(error_response(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        "text_too_large",
                        "Text field size exceeds limit",
                        None,
                    ));
                }

                if !text.is_empty() {
                    request = request.with_pasted(text);
                }
            }
            "format" => {
                if let Ok(text) = field.text().await {
                    format = match text.trim().to_ascii_lowercase().as_str() {
                        "csv" => ResponseFormat::Csv,
                        _ => ResponseFormat::Json,
                    };
                }
            }
            _ => {} // Ignore unknown fields
        }
    }

    if request.is_empty() {
        let error_msg = if fields_received == 0 {
            "No data received. Please upload a FASTA file or paste a sequence."
        } else {
            "No sequence data found in upload."
        };
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "missing_input",
            error_msg,
            None,
        ));
    }

    Ok(RequestData { request, format })
}

fn validation_error_response(error: &ValidationError) -> Response {
    let (error_type, message) = match error {
        ValidationError::FilenameTooLong => (
            "filename_too_long",
            "Filename exceeds maximum length limit",
        ),
        ValidationError::InvalidFilename | ValidationError::EmptyFilename => (
            "invalid_filename",
            "Filename contains invalid or dangerous characters",
        ),
        ValidationError::FormatValidationFailed => (
            "format_mismatch",
            "File does not look like FASTA (expected a '>' header line or gzip data)",
        ),
        ValidationError::InvalidFileContent => (
            "invalid_content",
            "File content appears malformed or corrupted",
        ),
    };
    error_response(StatusCode::BAD_REQUEST, error_type, message, None)
}

/// Return the motifs in the catalog
async fn motifs_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let motifs: Vec<serde_json::Value> = state
        .catalog
        .iter()
        .map(|m| {
            serde_json::json!({
                "name": m.name(),
                "pattern": m.pattern(),
                "description": m.description(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": motifs.len(),
        "motifs": motifs,
    }))
}

use std::fmt;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;

use crate::core::{self, formats};
use crate::server::{cleanup, pages, ServerConfig};

#[derive(Debug)]
pub enum UploadError {
    MissingFilePart,
    EmptyFilename,
    UnsupportedType(String),
    Multipart(String),
    Io(std::io::Error),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFilePart => write!(f, "no file part in the request"),
            Self::EmptyFilename => write!(f, "no file selected"),
            Self::UnsupportedType(name) => write!(
                f,
                "unsupported file type for {name}; allowed extensions: {}",
                formats::ALLOWED_EXTENSIONS.join(", ")
            ),
            Self::Multipart(msg) => write!(f, "malformed upload request: {msg}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<std::io::Error> for UploadError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        tracing::debug!(error = %self, "rejecting upload");
        (status, Html(pages::error_page(&self.to_string()))).into_response()
    }
}

pub async fn index() -> Html<&'static str> {
    Html(pages::INDEX_PAGE)
}

/// Accepts one image as multipart form data, inspects it, and renders the
/// metadata report. The stored copy only lives for the duration of the
/// request.
pub async fn upload(
    State(config): State<Arc<ServerConfig>>,
    mut multipart: Multipart,
) -> Result<Html<String>, UploadError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| UploadError::Multipart(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().map(str::to_string).unwrap_or_default();
        let data = field
            .bytes()
            .await
            .map_err(|err| UploadError::Multipart(err.to_string()))?;
        file = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) = file.ok_or(UploadError::MissingFilePart)?;
    if filename.is_empty() {
        return Err(UploadError::EmptyFilename);
    }
    if !formats::is_allowed(&filename) {
        return Err(UploadError::UnsupportedType(filename));
    }

    let stored = config.upload_dir.join(format!(
        "{}-{}",
        Utc::now().format("%Y%m%d%H%M%S%3f"),
        sanitize_filename(&filename)
    ));

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tokio::fs::write(&stored, &data).await?;

    tracing::info!(filename = %filename, bytes = data.len(), "inspecting upload");
    let report = core::inspect(&stored, &filename);

    if !cleanup::remove_with_retry(&stored, 5).await {
        tracing::warn!(path = %stored.display(), "could not remove uploaded file");
    }

    Ok(Html(pages::report_page(&report)))
}

/// Reduces a client-supplied filename to a safe basename: path components
/// are dropped and anything outside `[A-Za-z0-9._-]` is replaced.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        String::from("upload")
    } else {
        trimmed.to_string()
    }
}

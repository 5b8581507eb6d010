/// Resume endpoints
///
/// Multipart upload with size/extension validation, and regex-based text
/// extraction for pre-filling application forms.
///
/// # Endpoints
///
/// - `POST /v1/resumes/upload` - Store a resume file (5 MB limit, pdf/doc/docx/txt)
/// - `POST /v1/resumes/parse` - Extract structured fields from raw resume text

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{extract::Multipart, extract::State, Extension, Json};
use jobwala_shared::{
    auth::middleware::AuthContext,
    resume::extractor::{extract, ExtractedResume},
};
use serde::{Deserialize, Serialize};

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Stored path to reference from an application's `resume_path`
    pub resume_path: String,

    /// Generated filename under the upload directory
    pub stored_name: String,

    /// Stored size in bytes
    pub size: usize,
}

/// Parse request
#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    /// Raw resume text
    pub text: String,
}

/// Store an uploaded resume file
///
/// Takes the first file field of the multipart body. The file is validated
/// (size, extension) and written under a generated name; the returned path
/// goes into the application form.
///
/// # Errors
///
/// - `400 Bad Request`: No file, missing filename, too large, or bad extension
pub async fn upload(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthContext>,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<UploadResponse>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|f| f.to_string()) else {
            // Skip non-file fields
            continue;
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        // Disk write happens off the async runtime
        let store = state.resumes.clone();
        let stored = tokio::task::spawn_blocking(move || store.save(&filename, &data))
            .await
            .map_err(|e| ApiError::InternalError(format!("Upload task failed: {}", e)))??;

        return Ok(Json(ApiResponse::new(
            "Resume uploaded",
            UploadResponse {
                resume_path: stored.path.display().to_string(),
                stored_name: stored.stored_name,
                size: stored.size,
            },
        )));
    }

    Err(ApiError::BadRequest(
        "No resume file found in request".to_string(),
    ))
}

/// Extract structured fields from raw resume text
///
/// Best-effort regex extraction; unmatched fields come back empty.
pub async fn parse(
    State(_state): State<AppState>,
    Extension(_auth): Extension<AuthContext>,
    Json(req): Json<ParseRequest>,
) -> ApiResult<Json<ApiResponse<ExtractedResume>>> {
    let parsed = extract(&req.text);

    Ok(Json(ApiResponse::new("Resume parsed", parsed)))
}

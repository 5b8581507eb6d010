/// Application endpoints
///
/// Candidates apply to open jobs with a snapshot of their details; employers
/// review and move applications through the status pipeline.
///
/// # Endpoints
///
/// - `POST   /v1/applications` - Apply to a job
/// - `GET    /v1/applications/mine` - Candidate's own applications
/// - `GET    /v1/applications/job/:job_id` - Applications received for a job
/// - `PUT    /v1/applications/:id/status` - Move an application through review
/// - `DELETE /v1/applications/:id` - Withdraw a pending application

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
    response::{ApiResponse, PageParams, Paginated},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use jobwala_shared::{
    auth::authorization::{require_job_access, require_jobseeker},
    auth::middleware::AuthContext,
    models::application::{Application, ApplicationStatus, CreateApplication},
    models::job::{Job, JobType},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Apply request: the job plus the candidate-supplied snapshot
#[derive(Debug, Deserialize, Validate)]
pub struct ApplyRequest {
    /// Job to apply to
    pub job_id: Uuid,

    // --- personal ---
    #[validate(length(min = 1, max = 255, message = "Full name must be 1-255 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 7, max = 20, message = "Phone must be 7-20 characters"))]
    pub phone: String,

    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub current_location: Option<String>,

    #[serde(default)]
    pub willing_to_relocate: bool,

    // --- professional ---
    pub current_title: Option<String>,
    pub current_company: Option<String>,

    #[validate(range(min = 0, max = 60, message = "Experience must be 0-60 years"))]
    #[serde(default)]
    pub total_experience_years: i32,

    pub current_salary: Option<i32>,
    pub expected_salary: Option<i32>,
    pub notice_period_days: Option<i32>,

    #[serde(default)]
    pub skills: Vec<String>,

    /// Stored path returned by the resume upload endpoint
    pub resume_path: Option<String>,

    pub cover_letter: Option<String>,

    // --- education ---
    pub highest_qualification: Option<String>,
    pub field_of_study: Option<String>,
    pub institution: Option<String>,
    pub graduation_year: Option<i32>,

    // --- preferences ---
    pub preferred_job_type: Option<JobType>,

    #[serde(default)]
    pub preferred_locations: Vec<String>,
}

/// Status update request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status
    pub status: ApplicationStatus,
}

/// Apply to a job
///
/// One application per (user, job) pair; the unique index backs this, so a
/// concurrent double-submit still produces exactly one row.
///
/// # Errors
///
/// - `400 Bad Request`: Job is closed or past its deadline
/// - `404 Not Found`: No such job
/// - `409 Conflict`: Already applied to this job
/// - `422 Unprocessable Entity`: Validation failed
pub async fn apply(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ApplyRequest>,
) -> ApiResult<Json<ApiResponse<Application>>> {
    require_jobseeker(&auth)?;
    req.validate().map_err(validation_error)?;

    let job = Job::find_by_id(&state.db, req.job_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    if !job.status.accepts_applications() {
        return Err(ApiError::BadRequest(
            "This job is no longer accepting applications".to_string(),
        ));
    }

    if let Some(deadline) = job.application_deadline {
        if deadline < Utc::now() {
            return Err(ApiError::BadRequest(
                "The application deadline for this job has passed".to_string(),
            ));
        }
    }

    let application = Application::create(
        &state.db,
        CreateApplication {
            user_id: auth.user_id,
            job_id: req.job_id,
            full_name: req.full_name,
            email: req.email,
            phone: req.phone,
            date_of_birth: req.date_of_birth,
            gender: req.gender,
            current_location: req.current_location,
            willing_to_relocate: req.willing_to_relocate,
            current_title: req.current_title,
            current_company: req.current_company,
            total_experience_years: req.total_experience_years,
            current_salary: req.current_salary,
            expected_salary: req.expected_salary,
            notice_period_days: req.notice_period_days,
            skills: req.skills,
            resume_path: req.resume_path,
            cover_letter: req.cover_letter,
            highest_qualification: req.highest_qualification,
            field_of_study: req.field_of_study,
            institution: req.institution,
            graduation_year: req.graduation_year,
            preferred_job_type: req.preferred_job_type,
            preferred_locations: req.preferred_locations,
        },
    )
    .await?;

    Job::increment_applications(&state.db, req.job_id).await?;

    Ok(Json(ApiResponse::new("Application submitted", application)))
}

/// Candidate's own applications
pub async fn list_mine(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<ApiResponse<Paginated<Application>>>> {
    let (limit, offset, page_no, per_page) = page.resolve();

    let applications = Application::list_by_user(&state.db, auth.user_id, limit, offset).await?;
    let total = Application::count_by_user(&state.db, auth.user_id, None).await?;

    Ok(Json(ApiResponse::new(
        "Applications fetched",
        Paginated {
            items: applications,
            total,
            page: page_no,
            per_page,
        },
    )))
}

/// Applications received for a job
///
/// Visible to the poster, their subusers with `applications:read`, and
/// admins.
pub async fn list_for_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(job_id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<ApiResponse<Paginated<Application>>>> {
    let job = Job::find_by_id(&state.db, job_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    require_job_access(&state.db, &auth, &job, "applications:read").await?;

    let (limit, offset, page_no, per_page) = page.resolve();

    let applications = Application::list_by_job(&state.db, job_id, limit, offset).await?;
    let total = Application::count_by_job(&state.db, job_id).await?;

    Ok(Json(ApiResponse::new(
        "Applications fetched",
        Paginated {
            items: applications,
            total,
            page: page_no,
            per_page,
        },
    )))
}

/// Move an application through the review pipeline
///
/// Valid transitions: pending → reviewed → shortlisted → hired, with
/// rejection possible from any non-terminal state.
///
/// # Errors
///
/// - `400 Bad Request`: Transition not valid from the current status
/// - `403 Forbidden`: Caller may not manage this job's applications
/// - `404 Not Found`: No such application
pub async fn update_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<ApiResponse<Application>>> {
    let application = Application::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))?;

    let job = Job::find_by_id(&state.db, application.job_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    require_job_access(&state.db, &auth, &job, "applications:manage").await?;

    if !application.status.can_transition_to(req.status) {
        return Err(ApiError::BadRequest(format!(
            "Cannot move application from {} to {}",
            application.status.as_str(),
            req.status.as_str(),
        )));
    }

    // The UPDATE re-checks the current status, so a concurrent transition
    // loses cleanly instead of skipping states
    let updated = Application::transition_to(&state.db, id, req.status)
        .await?
        .ok_or_else(|| {
            ApiError::BadRequest("Application status changed concurrently".to_string())
        })?;

    Ok(Json(ApiResponse::new("Application status updated", updated)))
}

/// Withdraw a pending application
///
/// # Errors
///
/// - `400 Bad Request`: Application is already under review
/// - `403 Forbidden`: Not the applicant
/// - `404 Not Found`: No such application
pub async fn withdraw(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let application = Application::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))?;

    if application.user_id != auth.user_id {
        return Err(ApiError::Forbidden(
            "Only the applicant can withdraw an application".to_string(),
        ));
    }

    if application.status != ApplicationStatus::Pending {
        return Err(ApiError::BadRequest(
            "Only pending applications can be withdrawn".to_string(),
        ));
    }

    Application::withdraw(&state.db, id, auth.user_id).await?;

    Ok(Json(ApiResponse::new(
        "Application withdrawn",
        serde_json::json!({ "withdrawn": true }),
    )))
}

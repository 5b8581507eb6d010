/// Job posting endpoints
///
/// Public browsing plus employer-side management.
///
/// # Endpoints
///
/// - `GET  /v1/jobs` - List open jobs (public, filterable)
/// - `GET  /v1/jobs/:id` - Job detail, counts a view (public)
/// - `POST /v1/employer/jobs` - Create posting
/// - `GET  /v1/employer/jobs` - List own postings
/// - `PUT  /v1/employer/jobs/:id` - Update posting
/// - `POST /v1/employer/jobs/:id/close` - Stop accepting applications
/// - `DELETE /v1/employer/jobs/:id` - Delete posting

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult, ValidationErrorDetail},
    response::{ApiResponse, PageParams, Paginated},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use jobwala_shared::{
    auth::authorization::{require_employer, require_job_access},
    auth::middleware::AuthContext,
    models::job::{CreateJob, ExperienceLevel, Job, JobFilter, JobStatus, JobType, UpdateJob},
    models::subuser::Subuser,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Query parameters for the public job list
#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    /// Filter by listing category
    pub category: Option<String>,

    /// Filter by employment type
    pub job_type: Option<JobType>,

    /// Filter by seniority band
    pub experience_level: Option<ExperienceLevel>,

    /// Substring match on location
    pub location: Option<String>,

    /// Substring match on title or company name
    pub search: Option<String>,

    /// 1-based page number (default 1)
    pub page: Option<i64>,

    /// Page size (default 20, capped at 100)
    pub per_page: Option<i64>,
}

/// Create job request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobRequest {
    /// Post on behalf of this employer (subusers only); defaults to the caller
    pub employer_id: Option<Uuid>,

    #[validate(length(min = 1, max = 255, message = "Company name must be 1-255 characters"))]
    pub company_name: String,

    #[validate(length(max = 512, message = "Company website must be at most 512 characters"))]
    pub company_website: Option<String>,

    pub company_logo_url: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: String,

    pub job_type: JobType,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: String,

    pub experience_level: ExperienceLevel,

    /// Lower salary bound; required
    pub salary_min: Option<i32>,

    /// Upper salary bound; required
    pub salary_max: Option<i32>,

    /// Salary currency code (default INR)
    pub salary_currency: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    /// Number of open positions (default 1)
    pub openings: Option<i32>,

    pub application_deadline: Option<DateTime<Utc>>,
}

/// Update job request
#[derive(Debug, Default, Deserialize)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub job_type: Option<JobType>,
    pub location: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub skills: Option<Vec<String>>,
    pub openings: Option<i32>,
    pub application_deadline: Option<Option<DateTime<Utc>>>,
    pub status: Option<JobStatus>,
}

/// List open jobs (public)
///
/// # Endpoint
///
/// ```text
/// GET /v1/jobs?category=Engineering&job_type=full_time&search=backend&page=1&per_page=20
/// ```
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListJobsQuery>,
) -> ApiResult<Json<ApiResponse<Paginated<Job>>>> {
    let (limit, offset, page, per_page) = PageParams {
        page: query.page,
        per_page: query.per_page,
    }
    .resolve();

    let filter = JobFilter {
        category: query.category,
        job_type: query.job_type,
        experience_level: query.experience_level,
        location: query.location,
        search: query.search,
    };

    let jobs = Job::list_open(&state.db, &filter, limit, offset).await?;
    let total = Job::count_open(&state.db, &filter).await?;

    Ok(Json(ApiResponse::new(
        "Jobs fetched",
        Paginated {
            items: jobs,
            total,
            page,
            per_page,
        },
    )))
}

/// Job detail (public); every read increments the view counter
///
/// # Endpoint
///
/// ```text
/// GET /v1/jobs/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such job
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Job>>> {
    let job = Job::find_by_id_counting_view(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    Ok(Json(ApiResponse::new("Job fetched", job)))
}

/// Create a job posting
///
/// Employers post for themselves. A subuser can post on behalf of their
/// employer by passing `employer_id` and holding the `jobs:write` scope.
///
/// # Errors
///
/// - `403 Forbidden`: Caller may not post for the target employer
/// - `422 Unprocessable Entity`: Validation failed (names the field, e.g.
///   a missing `salary_min`)
pub async fn create_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateJobRequest>,
) -> ApiResult<Json<ApiResponse<Job>>> {
    req.validate().map_err(validation_error)?;

    let salary_min = require_field(req.salary_min, "salary_min")?;
    let salary_max = require_field(req.salary_max, "salary_max")?;

    if salary_min > salary_max {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "salary_min".to_string(),
            message: "salary_min cannot exceed salary_max".to_string(),
        }]));
    }

    // Resolve who the posting belongs to
    let posted_by = match req.employer_id {
        Some(employer_id) if employer_id != auth.user_id => {
            let subuser = Subuser::find(&state.db, employer_id, auth.user_id)
                .await?
                .ok_or_else(|| {
                    ApiError::Forbidden("Not a team member of this employer".to_string())
                })?;
            if !subuser.has_permission("jobs:write") {
                return Err(ApiError::Forbidden(
                    "Missing required permission: jobs:write".to_string(),
                ));
            }
            employer_id
        }
        _ => {
            require_employer(&auth)?;
            auth.user_id
        }
    };

    let job = Job::create(
        &state.db,
        CreateJob {
            posted_by,
            company_name: req.company_name,
            company_website: req.company_website,
            company_logo_url: req.company_logo_url,
            title: req.title,
            description: req.description,
            category: req.category,
            job_type: req.job_type,
            location: req.location,
            experience_level: req.experience_level,
            salary_min,
            salary_max,
            salary_currency: req.salary_currency.unwrap_or_else(|| "INR".to_string()),
            skills: req.skills,
            openings: req.openings.unwrap_or(1),
            application_deadline: req.application_deadline,
        },
    )
    .await?;

    Ok(Json(ApiResponse::new("Job created", job)))
}

/// List the caller's own postings
pub async fn list_my_jobs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<ApiResponse<Paginated<Job>>>> {
    require_employer(&auth)?;

    let (limit, offset, page_no, per_page) = page.resolve();

    let jobs = Job::list_by_poster(&state.db, auth.user_id, limit, offset).await?;
    let total = Job::count_by_poster(&state.db, auth.user_id, None).await?;

    Ok(Json(ApiResponse::new(
        "Jobs fetched",
        Paginated {
            items: jobs,
            total,
            page: page_no,
            per_page,
        },
    )))
}

/// Update a posting
///
/// Allowed for the poster, their subusers with `jobs:write`, and admins.
pub async fn update_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateJobRequest>,
) -> ApiResult<Json<ApiResponse<Job>>> {
    let job = Job::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    require_job_access(&state.db, &auth, &job, "jobs:write").await?;

    if let (Some(min), Some(max)) = (req.salary_min, req.salary_max) {
        if min > max {
            return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "salary_min".to_string(),
                message: "salary_min cannot exceed salary_max".to_string(),
            }]));
        }
    }

    let updated = Job::update(
        &state.db,
        id,
        UpdateJob {
            title: req.title,
            description: req.description,
            category: req.category,
            job_type: req.job_type,
            location: req.location,
            experience_level: req.experience_level,
            salary_min: req.salary_min,
            salary_max: req.salary_max,
            skills: req.skills,
            openings: req.openings,
            application_deadline: req.application_deadline,
            status: req.status,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    Ok(Json(ApiResponse::new("Job updated", updated)))
}

/// Close a posting so it stops accepting applications
///
/// # Errors
///
/// - `400 Bad Request`: Posting is not open
/// - `404 Not Found`: No such job
pub async fn close_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Job>>> {
    let job = Job::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    require_job_access(&state.db, &auth, &job, "jobs:write").await?;

    let closed = Job::close(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Job is not open".to_string()))?;

    Ok(Json(ApiResponse::new("Job closed", closed)))
}

/// Delete a posting
///
/// Restricted to the poster and admins; subuser scopes do not cover deletion.
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let job = Job::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    if !auth.is_admin() && job.posted_by != auth.user_id {
        return Err(ApiError::Forbidden(
            "Only the poster or an admin can delete a job".to_string(),
        ));
    }

    Job::delete(&state.db, id).await?;

    Ok(Json(ApiResponse::new(
        "Job deleted",
        serde_json::json!({ "deleted": true }),
    )))
}

/// Validates that a required field is present, naming it in the error
fn require_field<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: field.to_string(),
            message: format!("{} is required", field),
        }])
    })
}

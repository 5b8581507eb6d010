/// Profile and dashboard endpoints
///
/// # Endpoints
///
/// - `GET /v1/users/me` - Authenticated profile
/// - `PUT /v1/users/me` - Update profile
/// - `GET /v1/users/me/dashboard` - Role-branched dashboard summary

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{extract::State, Extension, Json};
use jobwala_shared::{
    auth::middleware::AuthContext,
    models::application::{Application, ApplicationStatus},
    models::blog::Blog,
    models::job::{Job, JobStatus},
    models::subuser::Subuser,
    models::user::{UpdateUser, User, UserRole},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Profile update request
///
/// Field semantics: absent = unchanged, null = cleared.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub headline: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub company_name: Option<Option<String>>,
}

/// Distinguishes an absent field (outer None, via `default`) from an explicit
/// JSON null (Some(None))
fn double_option<'de, T, D>(de: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    T::deserialize(de).map(Some)
}

/// Job seeker dashboard summary
#[derive(Debug, Serialize)]
pub struct SeekerDashboard {
    pub role: UserRole,
    pub total_applications: i64,
    pub pending: i64,
    pub reviewed: i64,
    pub shortlisted: i64,
    pub rejected: i64,
    pub hired: i64,
    pub recent_applications: Vec<Application>,
}

/// Employer dashboard summary (company and consultancy views share the data)
#[derive(Debug, Serialize)]
pub struct EmployerDashboard {
    pub role: UserRole,
    pub employer_type: Option<jobwala_shared::models::user::EmployerType>,
    pub total_jobs: i64,
    pub open_jobs: i64,
    pub closed_jobs: i64,
    pub applications_received: i64,
    pub team_members: i64,
    pub recent_jobs: Vec<Job>,
}

/// Admin dashboard summary (platform totals)
#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub role: UserRole,
    pub total_users: i64,
    pub total_jobs: i64,
    pub total_applications: i64,
    pub total_blogs: i64,
}

/// Authenticated profile
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::new("Profile fetched", user)))
}

/// Update the authenticated profile
pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateMeRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    req.validate().map_err(validation_error)?;

    let user = User::update(
        &state.db,
        auth.user_id,
        UpdateUser {
            name: req.name,
            phone: req.phone,
            location: req.location,
            headline: req.headline,
            avatar_url: req.avatar_url,
            company_name: req.company_name,
            password_hash: None,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::new("Profile updated", user)))
}

/// Role-branched dashboard summary
///
/// The payload shape depends on the caller's role; this is the data behind
/// the per-role dashboard views.
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let data = match auth.role {
        UserRole::Jobseeker => {
            let summary = seeker_dashboard(&state, auth.user_id).await?;
            serde_json::to_value(summary)
                .map_err(|e| ApiError::InternalError(format!("Serialization failed: {}", e)))?
        }
        UserRole::Employer => {
            let summary = employer_dashboard(&state, auth.user_id).await?;
            serde_json::to_value(summary)
                .map_err(|e| ApiError::InternalError(format!("Serialization failed: {}", e)))?
        }
        UserRole::Admin | UserRole::Superadmin => {
            let summary = admin_dashboard(&state, auth.role).await?;
            serde_json::to_value(summary)
                .map_err(|e| ApiError::InternalError(format!("Serialization failed: {}", e)))?
        }
    };

    Ok(Json(ApiResponse::new("Dashboard fetched", data)))
}

async fn seeker_dashboard(
    state: &AppState,
    user_id: uuid::Uuid,
) -> Result<SeekerDashboard, ApiError> {
    let total = Application::count_by_user(&state.db, user_id, None).await?;
    let pending =
        Application::count_by_user(&state.db, user_id, Some(ApplicationStatus::Pending)).await?;
    let reviewed =
        Application::count_by_user(&state.db, user_id, Some(ApplicationStatus::Reviewed)).await?;
    let shortlisted =
        Application::count_by_user(&state.db, user_id, Some(ApplicationStatus::Shortlisted))
            .await?;
    let rejected =
        Application::count_by_user(&state.db, user_id, Some(ApplicationStatus::Rejected)).await?;
    let hired =
        Application::count_by_user(&state.db, user_id, Some(ApplicationStatus::Hired)).await?;
    let recent = Application::list_by_user(&state.db, user_id, 5, 0).await?;

    Ok(SeekerDashboard {
        role: UserRole::Jobseeker,
        total_applications: total,
        pending,
        reviewed,
        shortlisted,
        rejected,
        hired,
        recent_applications: recent,
    })
}

async fn employer_dashboard(
    state: &AppState,
    user_id: uuid::Uuid,
) -> Result<EmployerDashboard, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let total_jobs = Job::count_by_poster(&state.db, user_id, None).await?;
    let open_jobs = Job::count_by_poster(&state.db, user_id, Some(JobStatus::Open)).await?;
    let closed_jobs = Job::count_by_poster(&state.db, user_id, Some(JobStatus::Closed)).await?;
    let applications_received =
        Application::count_received_by_employer(&state.db, user_id).await?;
    let team_members = Subuser::count_by_employer(&state.db, user_id).await?;
    let recent_jobs = Job::list_by_poster(&state.db, user_id, 5, 0).await?;

    Ok(EmployerDashboard {
        role: UserRole::Employer,
        employer_type: user.employer_type,
        total_jobs,
        open_jobs,
        closed_jobs,
        applications_received,
        team_members,
        recent_jobs,
    })
}

async fn admin_dashboard(state: &AppState, role: UserRole) -> Result<AdminDashboard, ApiError> {
    let total_users = User::count(&state.db).await?;
    let total_jobs = Job::count(&state.db, None).await?;
    let total_applications = Application::count(&state.db).await?;
    let total_blogs = Blog::count(&state.db, false).await?;

    Ok(AdminDashboard {
        role,
        total_users,
        total_jobs,
        total_applications,
        total_blogs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_absent_vs_null() {
        // Absent field: unchanged
        let req: UpdateMeRequest = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert!(req.phone.is_none());

        // Explicit null: cleared
        let req: UpdateMeRequest = serde_json::from_str(r#"{"phone":null}"#).unwrap();
        assert_eq!(req.phone, Some(None));

        // Value: replaced
        let req: UpdateMeRequest = serde_json::from_str(r#"{"phone":"9876543210"}"#).unwrap();
        assert_eq!(req.phone, Some(Some("9876543210".to_string())));
    }
}

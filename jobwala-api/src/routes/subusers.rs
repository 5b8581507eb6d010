/// Employer team management endpoints
///
/// Employers invite existing users as subusers with scoped permissions over
/// their jobs and applications.
///
/// # Endpoints
///
/// - `POST   /v1/employer/subusers` - Invite a team member
/// - `GET    /v1/employer/subusers` - List team members
/// - `PUT    /v1/employer/subusers/:member_id` - Replace a member's scopes
/// - `DELETE /v1/employer/subusers/:member_id` - Revoke a member

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult, ValidationErrorDetail},
    response::ApiResponse,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use jobwala_shared::{
    auth::authorization::require_employer,
    auth::middleware::AuthContext,
    models::subuser::{parse_scopes, CreateSubuser, Subuser},
    models::user::User,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Invite request
#[derive(Debug, Deserialize, Validate)]
pub struct InviteRequest {
    /// Email of the existing user to invite
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Comma-separated scopes (e.g., "jobs:read,applications:read")
    ///
    /// Available scopes:
    /// - `*`: All permissions
    /// - `jobs:*` / `jobs:read` / `jobs:write`
    /// - `applications:*` / `applications:read` / `applications:manage`
    #[validate(length(min = 1, message = "At least one scope is required"))]
    pub permissions: String,
}

/// Scope update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePermissionsRequest {
    /// Comma-separated scopes, replacing the current set
    #[validate(length(min = 1, message = "At least one scope is required"))]
    pub permissions: String,
}

/// A team member with profile details joined in
#[derive(Debug, Serialize)]
pub struct SubuserItem {
    /// Member account ID
    pub member_id: String,

    /// Member display name
    pub name: String,

    /// Member email
    pub email: String,

    /// Granted scopes
    pub permissions: Vec<String>,

    /// When the member was invited
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Invite an existing user as a team member
///
/// # Errors
///
/// - `404 Not Found`: No user with that email
/// - `409 Conflict`: Already a team member
/// - `422 Unprocessable Entity`: No valid scopes supplied
pub async fn invite(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<InviteRequest>,
) -> ApiResult<Json<ApiResponse<Subuser>>> {
    require_employer(&auth)?;
    req.validate().map_err(validation_error)?;

    let scopes = parse_scopes(&req.permissions);
    if scopes.is_empty() {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "permissions".to_string(),
            message: "At least one valid scope is required".to_string(),
        }]));
    }

    let member = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("No user with that email".to_string()))?;

    if member.id == auth.user_id {
        return Err(ApiError::BadRequest(
            "You cannot invite yourself".to_string(),
        ));
    }

    let subuser = Subuser::create(
        &state.db,
        CreateSubuser {
            employer_id: auth.user_id,
            member_id: member.id,
            permissions: scopes,
        },
    )
    .await?;

    Ok(Json(ApiResponse::new("Team member invited", subuser)))
}

/// List the caller's team members with their profiles
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<Vec<SubuserItem>>>> {
    require_employer(&auth)?;

    let subusers = Subuser::list_by_employer(&state.db, auth.user_id).await?;

    let mut items = Vec::with_capacity(subusers.len());
    for subuser in subusers {
        // A member whose account was deleted is cascade-removed, so this
        // lookup only misses in a race; skip rather than fail the listing
        if let Some(member) = User::find_by_id(&state.db, subuser.member_id).await? {
            items.push(SubuserItem {
                member_id: member.id.to_string(),
                name: member.name,
                email: member.email,
                permissions: subuser.permissions,
                created_at: subuser.created_at,
            });
        }
    }

    Ok(Json(ApiResponse::new("Team members fetched", items)))
}

/// Replace a member's scopes
pub async fn update_permissions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(member_id): Path<Uuid>,
    Json(req): Json<UpdatePermissionsRequest>,
) -> ApiResult<Json<ApiResponse<Subuser>>> {
    require_employer(&auth)?;
    req.validate().map_err(validation_error)?;

    let scopes = parse_scopes(&req.permissions);
    if scopes.is_empty() {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "permissions".to_string(),
            message: "At least one valid scope is required".to_string(),
        }]));
    }

    let subuser = Subuser::update_permissions(&state.db, auth.user_id, member_id, scopes)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team member not found".to_string()))?;

    Ok(Json(ApiResponse::new("Permissions updated", subuser)))
}

/// Revoke a team member
pub async fn revoke(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(member_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    require_employer(&auth)?;

    let revoked = Subuser::revoke(&state.db, auth.user_id, member_id).await?;
    if !revoked {
        return Err(ApiError::NotFound("Team member not found".to_string()));
    }

    Ok(Json(ApiResponse::new(
        "Team member revoked",
        serde_json::json!({ "revoked": true }),
    )))
}

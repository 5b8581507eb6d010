/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration (job seeker or employer)
/// - Login
/// - Token refresh
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Register new user
/// - `POST /v1/auth/login` - Login and get tokens
/// - `POST /v1/auth/refresh` - Refresh access token

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult, ValidationErrorDetail},
    response::ApiResponse,
};
use axum::{extract::State, Json};
use jobwala_shared::{
    auth::{authorization::registerable_role, jwt, password},
    models::user::{CreateUser, EmployerType, User, UserRole},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (strength-checked separately)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Requested role; only jobseeker and employer can self-register
    pub role: UserRole,

    /// Employer sub-type (required for employer registrations)
    pub employer_type: Option<EmployerType>,

    /// Company name (employers)
    #[validate(length(max = 100, message = "Company name must be at most 100 characters"))]
    pub company_name: Option<String>,
}

/// Token pair returned by register and login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// User ID
    pub user_id: String,

    /// Account role
    pub role: UserRole,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,
}

/// Register a new user
///
/// Creates a job seeker or employer account and returns a token pair.
/// Admin roles cannot be self-assigned through this endpoint.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "jobwala123",
///   "name": "Asha Verma",
///   "role": "jobseeker"
/// }
/// ```
///
/// # Errors
///
/// - `403 Forbidden`: Admin role requested
/// - `409 Conflict`: Email already exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<ApiResponse<TokenResponse>>> {
    req.validate().map_err(validation_error)?;

    if !registerable_role(req.role) {
        return Err(ApiError::Forbidden(
            "Admin accounts cannot be self-registered".to_string(),
        ));
    }

    // Employers must say whether they are a company or a consultancy
    if req.role == UserRole::Employer && req.employer_type.is_none() {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "employer_type".to_string(),
            message: "Employer registrations must specify company or consultancy".to_string(),
        }]));
    }

    password::validate_password_strength(&req.password).map_err(|e| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message: e,
        }])
    })?;

    let password_hash = password::hash_password(&req.password)?;

    let employer_type = if req.role == UserRole::Employer {
        req.employer_type
    } else {
        None
    };

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
            name: req.name,
            role: req.role,
            employer_type,
            company_name: req.company_name,
        },
    )
    .await?;

    let tokens = issue_tokens(&state, &user)?;

    Ok(Json(ApiResponse::new("Account created", tokens)))
}

/// Login endpoint
///
/// Authenticates a user and returns JWT tokens. Unknown email and wrong
/// password produce the same response.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "jobwala123"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials
/// - `422 Unprocessable Entity`: Validation failed
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<TokenResponse>>> {
    req.validate().map_err(validation_error)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    User::update_last_login(&state.db, user.id).await?;

    let tokens = issue_tokens(&state, &user)?;

    Ok(Json(ApiResponse::new("Logged in", tokens)))
}

/// Token refresh endpoint
///
/// Exchanges a refresh token for a new access token.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/refresh
/// Content-Type: application/json
///
/// { "refresh_token": "eyJ..." }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid or expired refresh token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<ApiResponse<RefreshResponse>>> {
    let access_token = jwt::refresh_access_token(&req.refresh_token, state.jwt_secret())?;

    Ok(Json(ApiResponse::new(
        "Token refreshed",
        RefreshResponse { access_token },
    )))
}

/// Creates the access/refresh token pair for a user
fn issue_tokens(state: &AppState, user: &User) -> Result<TokenResponse, ApiError> {
    let access_claims = jwt::Claims::new(user.id, user.role, jwt::TokenType::Access);
    let refresh_claims = jwt::Claims::new(user.id, user.role, jwt::TokenType::Refresh);

    let access_token = jwt::create_token(&access_claims, state.jwt_secret())?;
    let refresh_token = jwt::create_token(&refresh_claims, state.jwt_secret())?;

    Ok(TokenResponse {
        user_id: user.id.to_string(),
        role: user.role,
        access_token,
        refresh_token,
    })
}

/// Authorization helpers and permission checks
///
/// Role and ownership checks used by route handlers. The permission model is:
///
/// 1. **Role gates**: a route requires a role class (employer, admin,
///    superadmin).
/// 2. **Ownership**: employers manage their own jobs and the applications
///    received against them.
/// 3. **Subuser scopes**: a team member invited by an employer acts on the
///    employer's resources within granted scopes (e.g. `jobs:write`).
/// 4. **Admin override**: admins pass ownership checks everywhere.
///
/// # Example
///
/// ```no_run
/// use jobwala_shared::auth::authorization::require_job_access;
/// use jobwala_shared::auth::middleware::AuthContext;
/// use jobwala_shared::models::job::Job;
/// use sqlx::PgPool;
///
/// async fn check(pool: &PgPool, auth: &AuthContext, job: &Job) -> Result<(), String> {
///     require_job_access(pool, auth, job, "jobs:write")
///         .await
///         .map_err(|e| e.to_string())
/// }
/// ```

use sqlx::PgPool;
use uuid::Uuid;

use super::middleware::AuthContext;
use crate::models::job::Job;
use crate::models::subuser::Subuser;
use crate::models::user::UserRole;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Caller's role doesn't allow the operation
    #[error("Requires {required} role")]
    InsufficientRole {
        /// Human-readable role class, e.g. "employer" or "admin"
        required: &'static str,
    },

    /// Caller doesn't hold the required subuser scope
    #[error("Missing required permission: {0}")]
    MissingScope(String),

    /// Caller doesn't own the resource
    #[error("Not authorized to access this resource")]
    NotAuthorized,

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Requires the caller to be an admin or superadmin
pub fn require_admin(auth: &AuthContext) -> Result<(), AuthzError> {
    if auth.role.is_admin() {
        Ok(())
    } else {
        Err(AuthzError::InsufficientRole { required: "admin" })
    }
}

/// Requires the caller to be a superadmin
pub fn require_superadmin(auth: &AuthContext) -> Result<(), AuthzError> {
    if auth.role.is_superadmin() {
        Ok(())
    } else {
        Err(AuthzError::InsufficientRole {
            required: "superadmin",
        })
    }
}

/// Requires the caller to be an employer
pub fn require_employer(auth: &AuthContext) -> Result<(), AuthzError> {
    if auth.role.can_post_jobs() {
        Ok(())
    } else {
        Err(AuthzError::InsufficientRole {
            required: "employer",
        })
    }
}

/// Requires the caller to be a job seeker
pub fn require_jobseeker(auth: &AuthContext) -> Result<(), AuthzError> {
    if auth.role.can_apply() {
        Ok(())
    } else {
        Err(AuthzError::InsufficientRole {
            required: "jobseeker",
        })
    }
}

/// Checks access to an employer-owned resource
///
/// Passes when the caller is the owner, an admin, or a subuser of the owner
/// holding `required_scope`.
pub async fn require_employer_resource(
    pool: &PgPool,
    auth: &AuthContext,
    owner_id: Uuid,
    required_scope: &str,
) -> Result<(), AuthzError> {
    if auth.role.is_admin() || auth.user_id == owner_id {
        return Ok(());
    }

    // Subusers act on their employer's resources within granted scopes
    if let Some(subuser) = Subuser::find(pool, owner_id, auth.user_id).await? {
        if subuser.has_permission(required_scope) {
            return Ok(());
        }
        return Err(AuthzError::MissingScope(required_scope.to_string()));
    }

    Err(AuthzError::NotAuthorized)
}

/// Checks access to a job posting
///
/// Convenience wrapper around [`require_employer_resource`] keyed on the
/// job's poster.
pub async fn require_job_access(
    pool: &PgPool,
    auth: &AuthContext,
    job: &Job,
    required_scope: &str,
) -> Result<(), AuthzError> {
    require_employer_resource(pool, auth, job.posted_by, required_scope).await
}

/// Checks whether a role may be self-assigned at registration
///
/// Admin roles can only be provisioned out of band, never through the public
/// registration endpoint.
pub fn registerable_role(role: UserRole) -> bool {
    matches!(role, UserRole::Jobseeker | UserRole::Employer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(role: UserRole) -> AuthContext {
        AuthContext::from_jwt(Uuid::new_v4(), role)
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&auth(UserRole::Admin)).is_ok());
        assert!(require_admin(&auth(UserRole::Superadmin)).is_ok());
        assert!(require_admin(&auth(UserRole::Employer)).is_err());
        assert!(require_admin(&auth(UserRole::Jobseeker)).is_err());
    }

    #[test]
    fn test_require_superadmin() {
        assert!(require_superadmin(&auth(UserRole::Superadmin)).is_ok());
        assert!(require_superadmin(&auth(UserRole::Admin)).is_err());
    }

    #[test]
    fn test_require_employer() {
        assert!(require_employer(&auth(UserRole::Employer)).is_ok());
        assert!(require_employer(&auth(UserRole::Jobseeker)).is_err());
        assert!(require_employer(&auth(UserRole::Admin)).is_err());
    }

    #[test]
    fn test_require_jobseeker() {
        assert!(require_jobseeker(&auth(UserRole::Jobseeker)).is_ok());
        assert!(require_jobseeker(&auth(UserRole::Employer)).is_err());
    }

    #[test]
    fn test_registerable_role() {
        assert!(registerable_role(UserRole::Jobseeker));
        assert!(registerable_role(UserRole::Employer));
        assert!(!registerable_role(UserRole::Admin));
        assert!(!registerable_role(UserRole::Superadmin));
    }

    // require_employer_resource subuser paths are exercised in database
    // integration tests
}

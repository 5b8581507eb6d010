/// Subuser model and database operations
///
/// A subuser is a team-member account invited by an employer, holding scoped
/// permissions over the employer's jobs and applications. This is a
/// many-to-many relationship row between the employer account and the member
/// account.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE subusers (
///     employer_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     member_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     permissions TEXT[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (employer_id, member_id)
/// );
/// ```
///
/// # Permissions
///
/// Permissions are scope strings:
///
/// - `*`: everything
/// - `jobs:*` / `jobs:read` / `jobs:write`
/// - `applications:*` / `applications:read` / `applications:manage`
///
/// # Example
///
/// ```no_run
/// use jobwala_shared::models::subuser::{CreateSubuser, Subuser};
/// use jobwala_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let subuser = Subuser::create(&pool, CreateSubuser {
///     employer_id: Uuid::new_v4(),
///     member_id: Uuid::new_v4(),
///     permissions: vec!["jobs:read".to_string(), "applications:read".to_string()],
/// }).await?;
///
/// assert!(subuser.has_permission("jobs:read"));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Subuser model representing an employer team member with scoped permissions
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subuser {
    /// Employer account that owns the team
    pub employer_id: Uuid,

    /// Member account invited onto the team
    pub member_id: Uuid,

    /// Granted permission scopes
    pub permissions: Vec<String>,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

/// Input for inviting a subuser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubuser {
    /// Employer account
    pub employer_id: Uuid,

    /// Member account to invite
    pub member_id: Uuid,

    /// Permission scopes to grant
    pub permissions: Vec<String>,
}

impl Subuser {
    /// Whether this subuser holds the required scope
    ///
    /// Supports `*` and `resource:*` wildcards.
    pub fn has_permission(&self, required: &str) -> bool {
        scope_matches(&self.permissions, required)
    }

    /// Invites a member onto an employer's team
    ///
    /// # Errors
    ///
    /// Returns an error if the member is already on the team (primary key
    /// violation) or the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateSubuser) -> Result<Self, sqlx::Error> {
        let subuser = sqlx::query_as::<_, Subuser>(
            r#"
            INSERT INTO subusers (employer_id, member_id, permissions)
            VALUES ($1, $2, $3)
            RETURNING employer_id, member_id, permissions, created_at
            "#,
        )
        .bind(data.employer_id)
        .bind(data.member_id)
        .bind(data.permissions)
        .fetch_one(pool)
        .await?;

        Ok(subuser)
    }

    /// Finds a membership row for (employer, member)
    pub async fn find(
        pool: &PgPool,
        employer_id: Uuid,
        member_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let subuser = sqlx::query_as::<_, Subuser>(
            r#"
            SELECT employer_id, member_id, permissions, created_at
            FROM subusers
            WHERE employer_id = $1 AND member_id = $2
            "#,
        )
        .bind(employer_id)
        .bind(member_id)
        .fetch_optional(pool)
        .await?;

        Ok(subuser)
    }

    /// Lists an employer's team members
    pub async fn list_by_employer(
        pool: &PgPool,
        employer_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let subusers = sqlx::query_as::<_, Subuser>(
            r#"
            SELECT employer_id, member_id, permissions, created_at
            FROM subusers
            WHERE employer_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(employer_id)
        .fetch_all(pool)
        .await?;

        Ok(subusers)
    }

    /// Replaces a member's permission scopes
    pub async fn update_permissions(
        pool: &PgPool,
        employer_id: Uuid,
        member_id: Uuid,
        permissions: Vec<String>,
    ) -> Result<Option<Self>, sqlx::Error> {
        let subuser = sqlx::query_as::<_, Subuser>(
            r#"
            UPDATE subusers
            SET permissions = $3
            WHERE employer_id = $1 AND member_id = $2
            RETURNING employer_id, member_id, permissions, created_at
            "#,
        )
        .bind(employer_id)
        .bind(member_id)
        .bind(permissions)
        .fetch_optional(pool)
        .await?;

        Ok(subuser)
    }

    /// Revokes a membership
    ///
    /// # Returns
    ///
    /// True if the membership was removed
    pub async fn revoke(
        pool: &PgPool,
        employer_id: Uuid,
        member_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subusers WHERE employer_id = $1 AND member_id = $2")
            .bind(employer_id)
            .bind(member_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts an employer's team members
    pub async fn count_by_employer(pool: &PgPool, employer_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM subusers WHERE employer_id = $1")
                .bind(employer_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}

/// Known permission scopes, used to validate invite requests
pub const KNOWN_SCOPES: &[&str] = &[
    "*",
    "jobs:*",
    "jobs:read",
    "jobs:write",
    "applications:*",
    "applications:read",
    "applications:manage",
];

/// Checks whether a granted scope list satisfies a required scope
///
/// `*` grants everything; `resource:*` grants every action on a resource.
pub fn scope_matches(granted: &[String], required: &str) -> bool {
    for scope in granted {
        if scope == "*" || scope == required {
            return true;
        }

        if let Some(resource) = scope.strip_suffix(":*") {
            if required.starts_with(resource)
                && required[resource.len()..].starts_with(':')
            {
                return true;
            }
        }
    }

    false
}

/// Parses a comma-separated scope string into a normalized list
///
/// Unknown scopes are dropped; duplicates are removed.
pub fn parse_scopes(raw: &str) -> Vec<String> {
    let mut scopes: Vec<String> = Vec::new();

    for part in raw.split(',') {
        let scope = part.trim().to_lowercase();
        if scope.is_empty() || !KNOWN_SCOPES.contains(&scope.as_str()) {
            continue;
        }
        if !scopes.contains(&scope) {
            scopes.push(scope);
        }
    }

    scopes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn granted(scopes: &[&str]) -> Vec<String> {
        scopes.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scope_matches_exact() {
        assert!(scope_matches(&granted(&["jobs:read"]), "jobs:read"));
        assert!(!scope_matches(&granted(&["jobs:read"]), "jobs:write"));
        assert!(!scope_matches(&granted(&["jobs:read"]), "applications:read"));
    }

    #[test]
    fn test_scope_matches_global_wildcard() {
        assert!(scope_matches(&granted(&["*"]), "jobs:write"));
        assert!(scope_matches(&granted(&["*"]), "applications:manage"));
    }

    #[test]
    fn test_scope_matches_resource_wildcard() {
        assert!(scope_matches(&granted(&["jobs:*"]), "jobs:read"));
        assert!(scope_matches(&granted(&["jobs:*"]), "jobs:write"));
        assert!(!scope_matches(&granted(&["jobs:*"]), "applications:read"));
    }

    #[test]
    fn test_scope_matches_no_prefix_confusion() {
        // "jobs:*" must not grant scopes on a resource that merely starts
        // with "jobs"
        assert!(!scope_matches(&granted(&["jobs:*"]), "jobsboard:read"));
    }

    #[test]
    fn test_scope_matches_empty() {
        assert!(!scope_matches(&granted(&[]), "jobs:read"));
    }

    #[test]
    fn test_parse_scopes() {
        assert_eq!(
            parse_scopes("jobs:read, applications:read"),
            vec!["jobs:read".to_string(), "applications:read".to_string()]
        );
    }

    #[test]
    fn test_parse_scopes_drops_unknown_and_duplicates() {
        assert_eq!(
            parse_scopes("jobs:read,jobs:read,bogus:scope, JOBS:WRITE"),
            vec!["jobs:read".to_string(), "jobs:write".to_string()]
        );
    }

    #[test]
    fn test_parse_scopes_empty() {
        assert!(parse_scopes("").is_empty());
        assert!(parse_scopes(" , ,").is_empty());
    }

    #[test]
    fn test_subuser_has_permission() {
        let subuser = Subuser {
            employer_id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            permissions: granted(&["jobs:*", "applications:read"]),
            created_at: Utc::now(),
        };

        assert!(subuser.has_permission("jobs:write"));
        assert!(subuser.has_permission("applications:read"));
        assert!(!subuser.has_permission("applications:manage"));
    }

    // Integration tests for database operations require a running database
}

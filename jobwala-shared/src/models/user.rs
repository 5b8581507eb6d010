/// User model and database operations
///
/// This module provides the User model and CRUD operations for managing accounts.
/// A user is either a job seeker, an employer (company or consultancy), or a
/// platform admin. Employers can additionally invite team members via the
/// Subuser model.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('jobseeker', 'employer', 'admin', 'superadmin');
/// CREATE TYPE employer_kind AS ENUM ('company', 'consultancy');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email TEXT NOT NULL,  -- unique on LOWER(email)
///     password_hash VARCHAR(255) NOT NULL,
///     name VARCHAR(255) NOT NULL,
///     phone VARCHAR(32),
///     location VARCHAR(255),
///     headline VARCHAR(255),
///     avatar_url VARCHAR(512),
///     role user_role NOT NULL DEFAULT 'jobseeker',
///     employer_type employer_kind,
///     company_name VARCHAR(255),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use jobwala_shared::models::user::{CreateUser, User, UserRole};
/// use jobwala_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     email: "seeker@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     name: "Asha Verma".to_string(),
///     role: UserRole::Jobseeker,
///     employer_type: None,
///     company_name: None,
/// }).await?;
///
/// let found = User::find_by_email(&pool, "seeker@example.com").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Candidate browsing and applying to jobs
    Jobseeker,

    /// Company or consultancy posting jobs
    Employer,

    /// Platform administrator (content moderation, blog CMS, stats)
    Admin,

    /// Full administrator, can also manage admin accounts
    Superadmin,
}

impl UserRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Jobseeker => "jobseeker",
            UserRole::Employer => "employer",
            UserRole::Admin => "admin",
            UserRole::Superadmin => "superadmin",
        }
    }

    /// Admin or superadmin
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Superadmin)
    }

    /// Can create and manage job postings
    pub fn can_post_jobs(&self) -> bool {
        matches!(self, UserRole::Employer)
    }

    /// Can submit applications
    pub fn can_apply(&self) -> bool {
        matches!(self, UserRole::Jobseeker)
    }

    /// Can delete admin accounts
    pub fn is_superadmin(&self) -> bool {
        matches!(self, UserRole::Superadmin)
    }
}

/// Employer sub-classification, gating which dashboard view is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "employer_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EmployerType {
    /// Hiring directly for itself
    Company,

    /// Hiring on behalf of client companies
    Consultancy,
}

impl EmployerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployerType::Company => "company",
            EmployerType::Consultancy => "consultancy",
        }
    }
}

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext. The hash is
/// never serialized into API responses.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address
    ///
    /// Unique across all users, compared case-insensitively
    pub email: String,

    /// Argon2id password hash
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Display name
    pub name: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Optional location (city)
    pub location: Option<String>,

    /// Optional profile headline (e.g., "Backend engineer, 5 yrs")
    pub headline: Option<String>,

    /// Optional avatar/profile picture URL
    pub avatar_url: Option<String>,

    /// Account role
    pub role: UserRole,

    /// Employer sub-type (None for non-employers)
    pub employer_type: Option<EmployerType>,

    /// Company name (employers)
    pub company_name: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,

    /// When the user last logged in (None if never logged in)
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    /// Display name
    pub name: String,

    /// Account role
    pub role: UserRole,

    /// Employer sub-type (required when role is Employer)
    pub employer_type: Option<EmployerType>,

    /// Company name (employers)
    pub company_name: Option<String>,
}

/// Input for updating a user profile
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New display name
    pub name: Option<String>,

    /// New phone number (use Some(None) to clear)
    pub phone: Option<Option<String>>,

    /// New location (use Some(None) to clear)
    pub location: Option<Option<String>>,

    /// New headline (use Some(None) to clear)
    pub headline: Option<Option<String>>,

    /// New avatar URL (use Some(None) to clear)
    pub avatar_url: Option<Option<String>>,

    /// New company name (employers)
    pub company_name: Option<Option<String>>,

    /// New password hash
    pub password_hash: Option<String>,
}

const USER_COLUMNS: &str = "id, email, password_hash, name, phone, location, headline, avatar_url, \
     role, employer_type, company_name, created_at, updated_at, last_login_at";

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash, name, role, employer_type, company_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.name)
        .bind(data.role)
        .bind(data.employer_type)
        .bind(data.company_name)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Email lookup is case-insensitive.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)",
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Updates a user's profile
    ///
    /// Only non-None fields in `data` will be updated. The `updated_at`
    /// timestamp is automatically set to the current time.
    ///
    /// # Returns
    ///
    /// The updated user if found, None if the user doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE users SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.phone.is_some() {
            bind_count += 1;
            query.push_str(&format!(", phone = ${}", bind_count));
        }
        if data.location.is_some() {
            bind_count += 1;
            query.push_str(&format!(", location = ${}", bind_count));
        }
        if data.headline.is_some() {
            bind_count += 1;
            query.push_str(&format!(", headline = ${}", bind_count));
        }
        if data.avatar_url.is_some() {
            bind_count += 1;
            query.push_str(&format!(", avatar_url = ${}", bind_count));
        }
        if data.company_name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", company_name = ${}", bind_count));
        }
        if data.password_hash.is_some() {
            bind_count += 1;
            query.push_str(&format!(", password_hash = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {USER_COLUMNS}"));

        let mut q = sqlx::query_as::<_, User>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(phone) = data.phone {
            q = q.bind(phone);
        }
        if let Some(location) = data.location {
            q = q.bind(location);
        }
        if let Some(headline) = data.headline {
            q = q.bind(headline);
        }
        if let Some(avatar_url) = data.avatar_url {
            q = q.bind(avatar_url);
        }
        if let Some(company_name) = data.company_name {
            q = q.bind(company_name);
        }
        if let Some(password_hash) = data.password_hash {
            q = q.bind(password_hash);
        }

        let user = q.fetch_optional(pool).await?;

        Ok(user)
    }

    /// Updates the last login timestamp for a user
    ///
    /// Called after successful authentication.
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user by ID
    ///
    /// Cascades to jobs, applications, and subuser rows via foreign keys.
    ///
    /// # Returns
    ///
    /// True if the user was deleted, false if the user didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists users with pagination, newest first
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Counts total number of users
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Counts users by role
    pub async fn count_by_role(pool: &PgPool, role: UserRole) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_as_str() {
        assert_eq!(UserRole::Jobseeker.as_str(), "jobseeker");
        assert_eq!(UserRole::Employer.as_str(), "employer");
        assert_eq!(UserRole::Admin.as_str(), "admin");
        assert_eq!(UserRole::Superadmin.as_str(), "superadmin");
    }

    #[test]
    fn test_user_role_permissions() {
        assert!(UserRole::Admin.is_admin());
        assert!(UserRole::Superadmin.is_admin());
        assert!(!UserRole::Employer.is_admin());
        assert!(!UserRole::Jobseeker.is_admin());

        assert!(UserRole::Employer.can_post_jobs());
        assert!(!UserRole::Jobseeker.can_post_jobs());
        assert!(!UserRole::Admin.can_post_jobs());

        assert!(UserRole::Jobseeker.can_apply());
        assert!(!UserRole::Employer.can_apply());

        assert!(UserRole::Superadmin.is_superadmin());
        assert!(!UserRole::Admin.is_superadmin());
    }

    #[test]
    fn test_employer_type_as_str() {
        assert_eq!(EmployerType::Company.as_str(), "company");
        assert_eq!(EmployerType::Consultancy.as_str(), "consultancy");
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Jobseeker).unwrap(),
            "\"jobseeker\""
        );
        let role: UserRole = serde_json::from_str("\"superadmin\"").unwrap();
        assert_eq!(role, UserRole::Superadmin);
    }

    #[test]
    fn test_update_user_default() {
        let update = UpdateUser::default();
        assert!(update.name.is_none());
        assert!(update.phone.is_none());
        assert!(update.password_hash.is_none());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            name: "A".to_string(),
            phone: None,
            location: None,
            headline: None,
            avatar_url: None,
            role: UserRole::Jobseeker,
            employer_type: None,
            company_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }

    // Integration tests for database operations require a running database
}

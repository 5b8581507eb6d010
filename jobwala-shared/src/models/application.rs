/// Application model and database operations
///
/// This module provides the Application model: a candidate's submission
/// against a specific job posting, carrying a snapshot of the candidate's
/// personal, professional, education, and preference details as entered at
/// apply time.
///
/// One application per (user, job) pair is enforced by a unique index; a
/// second insert for the same pair fails with a constraint violation and no
/// duplicate row is created.
///
/// # State Machine
///
/// ```text
/// pending → reviewed → shortlisted → hired
///        ↘          ↘             ↘ rejected
/// ```
///
/// `hired` and `rejected` are terminal.
///
/// # Schema (abridged)
///
/// ```sql
/// CREATE TYPE application_status AS ENUM
///     ('pending', 'reviewed', 'shortlisted', 'rejected', 'hired');
///
/// CREATE TABLE applications (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     job_id UUID NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
///     status application_status NOT NULL DEFAULT 'pending',
///     -- candidate snapshot columns (personal / professional / education / preferences)
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT applications_user_job_key UNIQUE (user_id, job_id)
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::job::JobType;

/// Application review state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Submitted, not yet looked at
    Pending,

    /// Seen by the employer
    Reviewed,

    /// Selected for the interview pipeline
    Shortlisted,

    /// Turned down (terminal)
    Rejected,

    /// Offer accepted (terminal)
    Hired,
}

impl ApplicationStatus {
    /// Converts status to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Hired => "hired",
        }
    }

    /// Checks if the status is terminal (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Rejected | ApplicationStatus::Hired)
    }

    /// Checks if a transition to the target status is valid
    ///
    /// Rejection is allowed from any non-terminal state; forward movement is
    /// pending → reviewed → shortlisted → hired.
    pub fn can_transition_to(&self, target: ApplicationStatus) -> bool {
        match (self, target) {
            (ApplicationStatus::Pending, ApplicationStatus::Reviewed) => true,
            (ApplicationStatus::Reviewed, ApplicationStatus::Shortlisted) => true,
            (ApplicationStatus::Shortlisted, ApplicationStatus::Hired) => true,

            (ApplicationStatus::Pending, ApplicationStatus::Rejected) => true,
            (ApplicationStatus::Reviewed, ApplicationStatus::Rejected) => true,
            (ApplicationStatus::Shortlisted, ApplicationStatus::Rejected) => true,

            _ => false,
        }
    }
}

/// Application model: a candidate's submission against a job posting
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Application {
    /// Unique application ID
    pub id: Uuid,

    /// Candidate who applied
    pub user_id: Uuid,

    /// Job applied to
    pub job_id: Uuid,

    /// Review state
    pub status: ApplicationStatus,

    // --- personal ---
    /// Candidate full name as entered on the form
    pub full_name: String,

    /// Contact email
    pub email: String,

    /// Contact phone
    pub phone: String,

    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub current_location: Option<String>,
    pub willing_to_relocate: bool,

    // --- professional ---
    pub current_title: Option<String>,
    pub current_company: Option<String>,

    /// Total years of experience
    pub total_experience_years: i32,

    pub current_salary: Option<i32>,
    pub expected_salary: Option<i32>,
    pub notice_period_days: Option<i32>,

    /// Self-reported skills
    pub skills: Vec<String>,

    /// Path to the uploaded resume file, if any
    pub resume_path: Option<String>,

    pub cover_letter: Option<String>,

    // --- education ---
    pub highest_qualification: Option<String>,
    pub field_of_study: Option<String>,
    pub institution: Option<String>,
    pub graduation_year: Option<i32>,

    // --- preferences ---
    pub preferred_job_type: Option<JobType>,
    pub preferred_locations: Vec<String>,

    /// When the application was submitted
    pub created_at: DateTime<Utc>,

    /// When the application was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApplication {
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub current_location: Option<String>,
    pub willing_to_relocate: bool,
    pub current_title: Option<String>,
    pub current_company: Option<String>,
    pub total_experience_years: i32,
    pub current_salary: Option<i32>,
    pub expected_salary: Option<i32>,
    pub notice_period_days: Option<i32>,
    pub skills: Vec<String>,
    pub resume_path: Option<String>,
    pub cover_letter: Option<String>,
    pub highest_qualification: Option<String>,
    pub field_of_study: Option<String>,
    pub institution: Option<String>,
    pub graduation_year: Option<i32>,
    pub preferred_job_type: Option<JobType>,
    pub preferred_locations: Vec<String>,
}

const APPLICATION_COLUMNS: &str = "id, user_id, job_id, status, full_name, email, phone, date_of_birth, gender, \
     current_location, willing_to_relocate, current_title, current_company, \
     total_experience_years, current_salary, expected_salary, notice_period_days, skills, \
     resume_path, cover_letter, highest_qualification, field_of_study, institution, \
     graduation_year, preferred_job_type, preferred_locations, created_at, updated_at";

impl Application {
    /// Creates a new application in pending state
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The (user, job) pair already has an application
    ///   (`applications_user_job_key` unique violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateApplication) -> Result<Self, sqlx::Error> {
        let application = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications (user_id, job_id, full_name, email, phone, date_of_birth,
                                      gender, current_location, willing_to_relocate, current_title,
                                      current_company, total_experience_years, current_salary,
                                      expected_salary, notice_period_days, skills, resume_path,
                                      cover_letter, highest_qualification, field_of_study,
                                      institution, graduation_year, preferred_job_type,
                                      preferred_locations)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    $18, $19, $20, $21, $22, $23, $24)
            RETURNING {APPLICATION_COLUMNS}
            "#,
        ))
        .bind(data.user_id)
        .bind(data.job_id)
        .bind(data.full_name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.date_of_birth)
        .bind(data.gender)
        .bind(data.current_location)
        .bind(data.willing_to_relocate)
        .bind(data.current_title)
        .bind(data.current_company)
        .bind(data.total_experience_years)
        .bind(data.current_salary)
        .bind(data.expected_salary)
        .bind(data.notice_period_days)
        .bind(data.skills)
        .bind(data.resume_path)
        .bind(data.cover_letter)
        .bind(data.highest_qualification)
        .bind(data.field_of_study)
        .bind(data.institution)
        .bind(data.graduation_year)
        .bind(data.preferred_job_type)
        .bind(data.preferred_locations)
        .fetch_one(pool)
        .await?;

        Ok(application)
    }

    /// Finds an application by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(application)
    }

    /// Finds the application a user submitted for a job, if any
    pub async fn find_by_user_and_job(
        pool: &PgPool,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE user_id = $1 AND job_id = $2",
        ))
        .bind(user_id)
        .bind(job_id)
        .fetch_optional(pool)
        .await?;

        Ok(application)
    }

    /// Moves an application to a new status
    ///
    /// The transition is guarded in SQL: the row is only updated when its
    /// current status is one the target can legally be reached from, so
    /// concurrent updates cannot skip states.
    ///
    /// # Returns
    ///
    /// The updated application, or None if the application doesn't exist or
    /// the transition is not valid from its current status.
    pub async fn transition_to(
        pool: &PgPool,
        id: Uuid,
        target: ApplicationStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let allowed_from: &[&str] = match target {
            ApplicationStatus::Reviewed => &["pending"],
            ApplicationStatus::Shortlisted => &["reviewed"],
            ApplicationStatus::Hired => &["shortlisted"],
            ApplicationStatus::Rejected => &["pending", "reviewed", "shortlisted"],
            // Nothing transitions back to pending
            ApplicationStatus::Pending => return Ok(None),
        };

        let placeholders: Vec<String> = (0..allowed_from.len())
            .map(|i| format!("${}", i + 3))
            .collect();
        let query = format!(
            "UPDATE applications SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status::text IN ({}) RETURNING {APPLICATION_COLUMNS}",
            placeholders.join(", "),
        );

        let mut q = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(target);
        for from in allowed_from {
            q = q.bind(*from);
        }

        let application = q.fetch_optional(pool).await?;

        Ok(application)
    }

    /// Withdraws (deletes) a pending application
    ///
    /// Only the pending state can be withdrawn; later states are in the
    /// employer's pipeline.
    ///
    /// # Returns
    ///
    /// True if the application was deleted
    pub async fn withdraw(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM applications WHERE id = $1 AND user_id = $2 AND status = 'pending'",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists a candidate's applications, newest first
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(applications)
    }

    /// Lists applications received for a job, newest first
    pub async fn list_by_job(
        pool: &PgPool,
        job_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE job_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        ))
        .bind(job_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(applications)
    }

    /// Counts a candidate's applications, optionally restricted to one status
    pub async fn count_by_user(
        pool: &PgPool,
        user_id: Uuid,
        status: Option<ApplicationStatus>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = match status {
            Some(status) => {
                sqlx::query_as(
                    "SELECT COUNT(*) FROM applications WHERE user_id = $1 AND status = $2",
                )
                .bind(user_id)
                .bind(status)
                .fetch_one(pool)
                .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM applications WHERE user_id = $1")
                    .bind(user_id)
                    .fetch_one(pool)
                    .await?
            }
        };

        Ok(count)
    }

    /// Counts applications received for a job
    pub async fn count_by_job(pool: &PgPool, job_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM applications WHERE job_id = $1")
                .bind(job_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Counts applications received across all of an employer's jobs
    pub async fn count_received_by_employer(
        pool: &PgPool,
        employer_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE j.posted_by = $1
            "#,
        )
        .bind(employer_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Counts all applications on the platform
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM applications")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_status_as_str() {
        assert_eq!(ApplicationStatus::Pending.as_str(), "pending");
        assert_eq!(ApplicationStatus::Reviewed.as_str(), "reviewed");
        assert_eq!(ApplicationStatus::Shortlisted.as_str(), "shortlisted");
        assert_eq!(ApplicationStatus::Rejected.as_str(), "rejected");
        assert_eq!(ApplicationStatus::Hired.as_str(), "hired");
    }

    #[test]
    fn test_application_status_is_terminal() {
        assert!(!ApplicationStatus::Pending.is_terminal());
        assert!(!ApplicationStatus::Reviewed.is_terminal());
        assert!(!ApplicationStatus::Shortlisted.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
        assert!(ApplicationStatus::Hired.is_terminal());
    }

    #[test]
    fn test_application_status_transitions() {
        // Forward movement
        assert!(ApplicationStatus::Pending.can_transition_to(ApplicationStatus::Reviewed));
        assert!(ApplicationStatus::Reviewed.can_transition_to(ApplicationStatus::Shortlisted));
        assert!(ApplicationStatus::Shortlisted.can_transition_to(ApplicationStatus::Hired));

        // Rejection from any non-terminal state
        assert!(ApplicationStatus::Pending.can_transition_to(ApplicationStatus::Rejected));
        assert!(ApplicationStatus::Reviewed.can_transition_to(ApplicationStatus::Rejected));
        assert!(ApplicationStatus::Shortlisted.can_transition_to(ApplicationStatus::Rejected));

        // No skipping states
        assert!(!ApplicationStatus::Pending.can_transition_to(ApplicationStatus::Shortlisted));
        assert!(!ApplicationStatus::Pending.can_transition_to(ApplicationStatus::Hired));
        assert!(!ApplicationStatus::Reviewed.can_transition_to(ApplicationStatus::Hired));

        // Terminal states cannot transition
        assert!(!ApplicationStatus::Rejected.can_transition_to(ApplicationStatus::Reviewed));
        assert!(!ApplicationStatus::Hired.can_transition_to(ApplicationStatus::Rejected));

        // Nothing goes back to pending
        assert!(!ApplicationStatus::Reviewed.can_transition_to(ApplicationStatus::Pending));
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Shortlisted).unwrap(),
            "\"shortlisted\""
        );
        let status: ApplicationStatus = serde_json::from_str("\"hired\"").unwrap();
        assert_eq!(status, ApplicationStatus::Hired);
    }

    // Integration tests for database operations (including the unique
    // (user, job) index) require a running database
}

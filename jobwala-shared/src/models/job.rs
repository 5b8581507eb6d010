/// Job posting model and database operations
///
/// This module provides the Job model representing postings created by
/// employers. Jobs carry denormalized company info, role/location/salary
/// details, and two per-row counters (`views`, `applications_count`) that are
/// incremented with single-statement updates.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE job_type AS ENUM ('full_time', 'part_time', 'contract', 'internship', 'remote');
/// CREATE TYPE experience_level AS ENUM ('entry', 'mid', 'senior', 'lead');
/// CREATE TYPE job_status AS ENUM ('open', 'closed', 'draft');
///
/// CREATE TABLE jobs (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     posted_by UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     company_name VARCHAR(255) NOT NULL,
///     company_website VARCHAR(512),
///     company_logo_url VARCHAR(512),
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL,
///     category VARCHAR(100) NOT NULL,
///     job_type job_type NOT NULL,
///     location VARCHAR(255) NOT NULL,
///     experience_level experience_level NOT NULL,
///     salary_min INTEGER NOT NULL,
///     salary_max INTEGER NOT NULL,
///     salary_currency VARCHAR(8) NOT NULL DEFAULT 'INR',
///     skills TEXT[] NOT NULL DEFAULT '{}',
///     openings INTEGER NOT NULL DEFAULT 1,
///     application_deadline TIMESTAMPTZ,
///     status job_status NOT NULL DEFAULT 'open',
///     views BIGINT NOT NULL DEFAULT 0,
///     applications_count BIGINT NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use jobwala_shared::models::job::{CreateJob, ExperienceLevel, Job, JobType};
/// use jobwala_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let job = Job::create(&pool, CreateJob {
///     posted_by: Uuid::new_v4(),
///     company_name: "Acme Corp".to_string(),
///     company_website: None,
///     company_logo_url: None,
///     title: "Backend Engineer".to_string(),
///     description: "Build and run our REST APIs".to_string(),
///     category: "Engineering".to_string(),
///     job_type: JobType::FullTime,
///     location: "Pune".to_string(),
///     experience_level: ExperienceLevel::Mid,
///     salary_min: 1_200_000,
///     salary_max: 1_800_000,
///     salary_currency: "INR".to_string(),
///     skills: vec!["rust".to_string(), "postgres".to_string()],
///     openings: 2,
///     application_deadline: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Employment type of a posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Remote,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full_time",
            JobType::PartTime => "part_time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
            JobType::Remote => "remote",
        }
    }
}

/// Seniority band of a posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "experience_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
        }
    }
}

/// Posting lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Visible in listings and accepting applications
    Open,

    /// No longer accepting applications
    Closed,

    /// Not yet published by the employer
    Draft,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Closed => "closed",
            JobStatus::Draft => "draft",
        }
    }

    /// Whether candidates may apply to a posting in this state
    pub fn accepts_applications(&self) -> bool {
        matches!(self, JobStatus::Open)
    }
}

/// Job posting model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    /// Unique job ID
    pub id: Uuid,

    /// Employer who created the posting
    pub posted_by: Uuid,

    /// Hiring company name (denormalized; consultancies post for clients)
    pub company_name: String,

    /// Optional company website URL
    pub company_website: Option<String>,

    /// Optional company logo URL
    pub company_logo_url: Option<String>,

    /// Role title
    pub title: String,

    /// Full role description
    pub description: String,

    /// Listing category (e.g., "Engineering", "Sales")
    pub category: String,

    /// Employment type
    pub job_type: JobType,

    /// Role location
    pub location: String,

    /// Seniority band
    pub experience_level: ExperienceLevel,

    /// Lower salary bound
    pub salary_min: i32,

    /// Upper salary bound
    pub salary_max: i32,

    /// Salary currency code
    pub salary_currency: String,

    /// Required skills
    pub skills: Vec<String>,

    /// Number of open positions
    pub openings: i32,

    /// Optional application deadline
    pub application_deadline: Option<DateTime<Utc>>,

    /// Posting lifecycle state
    pub status: JobStatus,

    /// Detail-page view counter
    pub views: i64,

    /// Number of applications received
    pub applications_count: i64,

    /// When the posting was created
    pub created_at: DateTime<Utc>,

    /// When the posting was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJob {
    pub posted_by: Uuid,
    pub company_name: String,
    pub company_website: Option<String>,
    pub company_logo_url: Option<String>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub job_type: JobType,
    pub location: String,
    pub experience_level: ExperienceLevel,
    pub salary_min: i32,
    pub salary_max: i32,
    pub salary_currency: String,
    pub skills: Vec<String>,
    pub openings: i32,
    pub application_deadline: Option<DateTime<Utc>>,
}

/// Input for updating a job posting
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJob {
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

/// Filters for the public job listing
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Restrict to a listing category
    pub category: Option<String>,

    /// Restrict to an employment type
    pub job_type: Option<JobType>,

    /// Restrict to a seniority band
    pub experience_level: Option<ExperienceLevel>,

    /// Case-insensitive substring match on location
    pub location: Option<String>,

    /// Case-insensitive substring match on title or company name
    pub search: Option<String>,
}

const JOB_COLUMNS: &str = "id, posted_by, company_name, company_website, company_logo_url, title, \
     description, category, job_type, location, experience_level, salary_min, salary_max, \
     salary_currency, skills, openings, application_deadline, status, views, applications_count, \
     created_at, updated_at";

impl Job {
    /// Creates a new job posting in the open state
    pub async fn create(pool: &PgPool, data: CreateJob) -> Result<Self, sqlx::Error> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (posted_by, company_name, company_website, company_logo_url, title,
                              description, category, job_type, location, experience_level,
                              salary_min, salary_max, salary_currency, skills, openings,
                              application_deadline)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {JOB_COLUMNS}
            "#,
        ))
        .bind(data.posted_by)
        .bind(data.company_name)
        .bind(data.company_website)
        .bind(data.company_logo_url)
        .bind(data.title)
        .bind(data.description)
        .bind(data.category)
        .bind(data.job_type)
        .bind(data.location)
        .bind(data.experience_level)
        .bind(data.salary_min)
        .bind(data.salary_max)
        .bind(data.salary_currency)
        .bind(data.skills)
        .bind(data.openings)
        .bind(data.application_deadline)
        .fetch_one(pool)
        .await?;

        Ok(job)
    }

    /// Finds a job by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(job)
    }

    /// Finds a job by ID and atomically increments its view counter
    ///
    /// Used by the public detail endpoint so every read is counted in a
    /// single statement.
    pub async fn find_by_id_counting_view(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET views = views + 1
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#,
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(job)
    }

    /// Updates a job posting
    ///
    /// Only non-None fields in `data` will be updated.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateJob,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE jobs SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.category.is_some() {
            bind_count += 1;
            query.push_str(&format!(", category = ${}", bind_count));
        }
        if data.job_type.is_some() {
            bind_count += 1;
            query.push_str(&format!(", job_type = ${}", bind_count));
        }
        if data.location.is_some() {
            bind_count += 1;
            query.push_str(&format!(", location = ${}", bind_count));
        }
        if data.experience_level.is_some() {
            bind_count += 1;
            query.push_str(&format!(", experience_level = ${}", bind_count));
        }
        if data.salary_min.is_some() {
            bind_count += 1;
            query.push_str(&format!(", salary_min = ${}", bind_count));
        }
        if data.salary_max.is_some() {
            bind_count += 1;
            query.push_str(&format!(", salary_max = ${}", bind_count));
        }
        if data.skills.is_some() {
            bind_count += 1;
            query.push_str(&format!(", skills = ${}", bind_count));
        }
        if data.openings.is_some() {
            bind_count += 1;
            query.push_str(&format!(", openings = ${}", bind_count));
        }
        if data.application_deadline.is_some() {
            bind_count += 1;
            query.push_str(&format!(", application_deadline = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {JOB_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Job>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(category) = data.category {
            q = q.bind(category);
        }
        if let Some(job_type) = data.job_type {
            q = q.bind(job_type);
        }
        if let Some(location) = data.location {
            q = q.bind(location);
        }
        if let Some(level) = data.experience_level {
            q = q.bind(level);
        }
        if let Some(salary_min) = data.salary_min {
            q = q.bind(salary_min);
        }
        if let Some(salary_max) = data.salary_max {
            q = q.bind(salary_max);
        }
        if let Some(skills) = data.skills {
            q = q.bind(skills);
        }
        if let Some(openings) = data.openings {
            q = q.bind(openings);
        }
        if let Some(deadline) = data.application_deadline {
            q = q.bind(deadline);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }

        let job = q.fetch_optional(pool).await?;

        Ok(job)
    }

    /// Closes a posting
    ///
    /// Only an open posting can be closed; closing an already-closed or draft
    /// posting returns None.
    pub async fn close(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET status = 'closed', updated_at = NOW()
            WHERE id = $1 AND status = 'open'
            RETURNING {JOB_COLUMNS}
            "#,
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(job)
    }

    /// Atomically increments the application counter
    pub async fn increment_applications(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE jobs SET applications_count = applications_count + 1 WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a job posting
    ///
    /// Related applications are removed via CASCADE.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists open jobs matching the filter, newest first
    ///
    /// The filter is compiled into a WHERE clause with positional binds; text
    /// filters use case-insensitive substring matching.
    pub async fn list_open(
        pool: &PgPool,
        filter: &JobFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let (where_clause, _) = filter_clause(filter, 3);
        let query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE status = 'open'{where_clause} \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        );

        let mut q = sqlx::query_as::<_, Job>(&query).bind(limit).bind(offset);
        q = bind_filter(q, filter);

        let jobs = q.fetch_all(pool).await?;

        Ok(jobs)
    }

    /// Counts open jobs matching the filter
    pub async fn count_open(pool: &PgPool, filter: &JobFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = filter_clause(filter, 1);
        let query = format!("SELECT COUNT(*) FROM jobs WHERE status = 'open'{where_clause}");

        let mut q = sqlx::query_as::<_, (i64,)>(&query);
        q = bind_filter(q, filter);

        let (count,) = q.fetch_one(pool).await?;

        Ok(count)
    }

    /// Lists jobs created by an employer, newest first
    pub async fn list_by_poster(
        pool: &PgPool,
        posted_by: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE posted_by = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        ))
        .bind(posted_by)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(jobs)
    }

    /// Counts jobs for an employer, optionally restricted to one status
    pub async fn count_by_poster(
        pool: &PgPool,
        posted_by: Uuid,
        status: Option<JobStatus>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = match status {
            Some(status) => {
                sqlx::query_as("SELECT COUNT(*) FROM jobs WHERE posted_by = $1 AND status = $2")
                    .bind(posted_by)
                    .bind(status)
                    .fetch_one(pool)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM jobs WHERE posted_by = $1")
                    .bind(posted_by)
                    .fetch_one(pool)
                    .await?
            }
        };

        Ok(count)
    }

    /// Counts all jobs, optionally restricted to one status
    pub async fn count(pool: &PgPool, status: Option<JobStatus>) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = match status {
            Some(status) => {
                sqlx::query_as("SELECT COUNT(*) FROM jobs WHERE status = $1")
                    .bind(status)
                    .fetch_one(pool)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM jobs")
                    .fetch_one(pool)
                    .await?
            }
        };

        Ok(count)
    }
}

/// Builds the filter portion of a WHERE clause
///
/// `first_bind` is the number of the first free positional parameter.
/// Returns the clause (with a leading " AND" per condition) and the next
/// free parameter number.
fn filter_clause(filter: &JobFilter, first_bind: usize) -> (String, usize) {
    let mut clause = String::new();
    let mut bind = first_bind;

    if filter.category.is_some() {
        clause.push_str(&format!(" AND category = ${}", bind));
        bind += 1;
    }
    if filter.job_type.is_some() {
        clause.push_str(&format!(" AND job_type = ${}", bind));
        bind += 1;
    }
    if filter.experience_level.is_some() {
        clause.push_str(&format!(" AND experience_level = ${}", bind));
        bind += 1;
    }
    if filter.location.is_some() {
        clause.push_str(&format!(" AND location ILIKE ${}", bind));
        bind += 1;
    }
    if filter.search.is_some() {
        clause.push_str(&format!(
            " AND (title ILIKE ${bind} OR company_name ILIKE ${bind})",
        ));
        bind += 1;
    }

    (clause, bind)
}

/// Binds filter values in the same order `filter_clause` emitted them
fn bind_filter<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    filter: &'q JobFilter,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    if let Some(ref category) = filter.category {
        q = q.bind(category.as_str());
    }
    if let Some(job_type) = filter.job_type {
        q = q.bind(job_type);
    }
    if let Some(level) = filter.experience_level {
        q = q.bind(level);
    }
    if let Some(ref location) = filter.location {
        q = q.bind(format!("%{}%", location));
    }
    if let Some(ref search) = filter.search {
        q = q.bind(format!("%{}%", search));
    }
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_type_as_str() {
        assert_eq!(JobType::FullTime.as_str(), "full_time");
        assert_eq!(JobType::PartTime.as_str(), "part_time");
        assert_eq!(JobType::Contract.as_str(), "contract");
        assert_eq!(JobType::Internship.as_str(), "internship");
        assert_eq!(JobType::Remote.as_str(), "remote");
    }

    #[test]
    fn test_job_type_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&JobType::FullTime).unwrap(),
            "\"full_time\""
        );
        let jt: JobType = serde_json::from_str("\"internship\"").unwrap();
        assert_eq!(jt, JobType::Internship);
    }

    #[test]
    fn test_job_status_accepts_applications() {
        assert!(JobStatus::Open.accepts_applications());
        assert!(!JobStatus::Closed.accepts_applications());
        assert!(!JobStatus::Draft.accepts_applications());
    }

    #[test]
    fn test_filter_clause_empty() {
        let filter = JobFilter::default();
        let (clause, next_bind) = filter_clause(&filter, 3);
        assert!(clause.is_empty());
        assert_eq!(next_bind, 3);
    }

    #[test]
    fn test_filter_clause_all_fields() {
        let filter = JobFilter {
            category: Some("Engineering".to_string()),
            job_type: Some(JobType::FullTime),
            experience_level: Some(ExperienceLevel::Senior),
            location: Some("Pune".to_string()),
            search: Some("backend".to_string()),
        };

        let (clause, next_bind) = filter_clause(&filter, 3);
        assert!(clause.contains("category = $3"));
        assert!(clause.contains("job_type = $4"));
        assert!(clause.contains("experience_level = $5"));
        assert!(clause.contains("location ILIKE $6"));
        assert!(clause.contains("title ILIKE $7 OR company_name ILIKE $7"));
        assert_eq!(next_bind, 8);
    }

    #[test]
    fn test_filter_clause_search_only() {
        let filter = JobFilter {
            search: Some("rust".to_string()),
            ..Default::default()
        };

        let (clause, next_bind) = filter_clause(&filter, 1);
        assert_eq!(
            clause,
            " AND (title ILIKE $1 OR company_name ILIKE $1)"
        );
        assert_eq!(next_bind, 2);
    }

    // Integration tests for database operations require a running database
}

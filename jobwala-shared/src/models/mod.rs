/// Database models for JobWala
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts (job seekers, employers, admins)
/// - `job`: Job postings with view/application counters
/// - `application`: Candidate submissions against a job, unique per (user, job)
/// - `blog`: CMS-style blog posts with publish/feature flags
/// - `subuser`: Employer team members with scoped permissions
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
/// let new_user = CreateUser {
///     email: "seeker@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     name: "Asha Verma".to_string(),
///     role: UserRole::Jobseeker,
///     employer_type: None,
///     company_name: None,
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```
pub mod application;
pub mod blog;
pub mod job;
pub mod subuser;
pub mod user;

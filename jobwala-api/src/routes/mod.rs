/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, refresh)
/// - `jobs`: Public job browsing and employer job management
/// - `applications`: Candidate applications and employer review
/// - `blogs`: Public blog reads
/// - `users`: Profile and role-based dashboard
/// - `subusers`: Employer team management
/// - `admin`: Platform stats, moderation, and blog CMS
/// - `resumes`: Resume upload and text extraction
/// - `chatbot`: Canned-response helper
pub mod admin;
pub mod applications;
pub mod auth;
pub mod blogs;
pub mod chatbot;
pub mod health;
pub mod jobs;
pub mod resumes;
pub mod subusers;
pub mod users;

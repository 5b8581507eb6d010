/// Authentication and authorization utilities
///
/// - `jwt`: Token generation and validation (HS256)
/// - `password`: Argon2id hashing and strength checks
/// - `middleware`: Axum auth context and error types
/// - `authorization`: Role and ownership checks for route handlers
pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;

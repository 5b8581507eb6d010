/// HTTP middleware for the API server
///
/// - `security`: Security headers applied to every response
pub mod security;

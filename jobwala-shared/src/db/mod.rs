/// Database infrastructure
///
/// - `pool`: PostgreSQL connection pool management
/// - `migrations`: Migration runner built on `sqlx::migrate!`
pub mod migrations;
pub mod pool;

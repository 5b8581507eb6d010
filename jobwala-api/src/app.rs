/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use jobwala_api::{app::AppState, config::Config};
/// use sqlx::postgres::PgPoolOptions;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPoolOptions::new().connect_lazy(&config.database.url)?;
/// let state = AppState::new(pool, config);
/// let app = jobwala_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use jobwala_shared::{
    auth::jwt,
    auth::middleware::{AuthContext, AuthError},
    resume::storage::ResumeStore,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// On-disk resume store
    pub resumes: ResumeStore,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        let resumes = ResumeStore::new(&config.uploads.resume_dir);
        Self {
            db,
            config: Arc::new(config),
            resumes,
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Optional authentication context
///
/// Inserted by [`optional_jwt_auth_layer`] on routes that are public but
/// behave differently for authenticated callers (e.g. admins can read
/// unpublished blogs).
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthContext>);

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                     # Health check (public)
/// ├── /v1/
/// │   ├── /auth/                  # register, login, refresh (public)
/// │   ├── /jobs/                  # public browsing (list + detail)
/// │   ├── /blogs/                 # public blog reads (optional auth)
/// │   ├── /chatbot/               # canned-response helper (public)
/// │   ├── /users/                 # profile + dashboard (JWT)
/// │   ├── /applications/          # apply + tracking (JWT)
/// │   ├── /employer/              # job + team management (JWT)
/// │   ├── /resumes/               # upload + parse (JWT)
/// │   └── /admin/                 # stats, moderation, blog CMS (JWT)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Security headers
/// 2. CORS (tower-http CorsLayer)
/// 3. Logging (tower-http TraceLayer)
/// 4. Authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    // Public job browsing
    let job_routes = Router::new()
        .route("/", get(routes::jobs::list_jobs))
        .route("/:id", get(routes::jobs::get_job));

    // Public blog reads; optional auth so admins see unpublished posts
    let blog_routes = Router::new()
        .route("/", get(routes::blogs::list_blogs))
        .route("/:id_or_slug", get(routes::blogs::get_blog))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            optional_jwt_auth_layer,
        ));

    // Chatbot (public)
    let chatbot_routes = Router::new().route("/message", post(routes::chatbot::message));

    // Profile + dashboard (require JWT)
    let user_routes = Router::new()
        .route("/me", get(routes::users::me).put(routes::users::update_me))
        .route("/me/dashboard", get(routes::users::dashboard))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Applications (require JWT)
    let application_routes = Router::new()
        .route("/", post(routes::applications::apply))
        .route("/mine", get(routes::applications::list_mine))
        .route("/job/:job_id", get(routes::applications::list_for_job))
        .route("/:id/status", put(routes::applications::update_status))
        .route("/:id", axum::routing::delete(routes::applications::withdraw))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Employer job + team management (require JWT)
    let employer_routes = Router::new()
        .route(
            "/jobs",
            post(routes::jobs::create_job).get(routes::jobs::list_my_jobs),
        )
        .route(
            "/jobs/:id",
            put(routes::jobs::update_job).delete(routes::jobs::delete_job),
        )
        .route("/jobs/:id/close", post(routes::jobs::close_job))
        .route(
            "/subusers",
            post(routes::subusers::invite).get(routes::subusers::list),
        )
        .route(
            "/subusers/:member_id",
            put(routes::subusers::update_permissions).delete(routes::subusers::revoke),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Resume upload + parse (require JWT). The body limit sits above the
    // store's 5 MB cap so oversized files get the store's clear error, with
    // slack for multipart framing.
    let resume_routes = Router::new()
        .route("/upload", post(routes::resumes::upload))
        .route("/parse", post(routes::resumes::parse))
        .layer(axum::extract::DefaultBodyLimit::max(
            jobwala_shared::resume::storage::MAX_RESUME_BYTES + 64 * 1024,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Admin surface (require JWT; handlers enforce the admin role)
    let admin_routes = Router::new()
        .route("/stats", get(routes::admin::stats))
        .route("/users", get(routes::admin::list_users))
        .route("/users/:id", axum::routing::delete(routes::admin::delete_user))
        .route("/jobs/:id/close", post(routes::admin::close_job))
        .route("/jobs/:id", axum::routing::delete(routes::admin::delete_job))
        .route(
            "/blogs",
            post(routes::admin::create_blog).get(routes::admin::list_blogs),
        )
        .route(
            "/blogs/:id",
            put(routes::admin::update_blog).delete(routes::admin::delete_blog),
        )
        .route("/blogs/:id/publish", post(routes::admin::publish_blog))
        .route("/blogs/:id/feature", post(routes::admin::feature_blog))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Build complete v1 API
    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/jobs", job_routes)
        .nest("/blogs", blog_routes)
        .nest("/chatbot", chatbot_routes)
        .nest("/users", user_routes)
        .nest("/applications", application_routes)
        .nest("/employer", employer_routes)
        .nest("/resumes", resume_routes)
        .nest("/admin", admin_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Extracts and validates the Bearer token from the Authorization header,
/// then injects an `AuthContext` into request extensions.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_access_token(token, state.jwt_secret())
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    let auth_context = AuthContext::from_jwt(claims.sub, claims.role);

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

/// Optional JWT authentication middleware layer
///
/// Like [`jwt_auth_layer`] but never rejects: a missing or invalid token just
/// produces an anonymous context.
async fn optional_jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let auth = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| jwt::validate_access_token(token, state.jwt_secret()).ok())
        .map(|claims| AuthContext::from_jwt(claims.sub, claims.role));

    req.extensions_mut().insert(OptionalAuth(auth));

    next.run(req).await
}

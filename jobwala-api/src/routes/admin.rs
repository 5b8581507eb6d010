/// Admin endpoints
///
/// Platform statistics, user and job moderation, and the blog CMS. Every
/// handler requires the admin role; deleting admin accounts requires
/// superadmin.
///
/// # Endpoints
///
/// - `GET    /v1/admin/stats` - Platform totals
/// - `GET    /v1/admin/users` - List users
/// - `DELETE /v1/admin/users/:id` - Delete a user
/// - `POST   /v1/admin/jobs/:id/close` - Close any posting
/// - `DELETE /v1/admin/jobs/:id` - Delete any posting
/// - `POST   /v1/admin/blogs` - Create post
/// - `GET    /v1/admin/blogs` - List all posts (drafts included)
/// - `PUT    /v1/admin/blogs/:id` - Update post
/// - `DELETE /v1/admin/blogs/:id` - Delete post
/// - `POST   /v1/admin/blogs/:id/publish` - Toggle published flag
/// - `POST   /v1/admin/blogs/:id/feature` - Toggle featured flag

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
    response::{ApiResponse, PageParams, Paginated},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use jobwala_shared::{
    auth::authorization::{require_admin, require_superadmin},
    auth::middleware::AuthContext,
    models::application::Application,
    models::blog::{slugify, Blog, CreateBlog, UpdateBlog},
    models::job::{Job, JobStatus},
    models::user::{User, UserRole},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Platform statistics
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_users: i64,
    pub jobseekers: i64,
    pub employers: i64,
    pub total_jobs: i64,
    pub open_jobs: i64,
    pub closed_jobs: i64,
    pub total_applications: i64,
    pub total_blogs: i64,
    pub published_blogs: i64,
}

/// Create blog request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// URL slug; derived from the title when omitted
    #[validate(length(max = 255, message = "Slug must be at most 255 characters"))]
    pub slug: Option<String>,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[validate(length(max = 512, message = "Excerpt must be at most 512 characters"))]
    pub excerpt: Option<String>,

    pub cover_image_url: Option<String>,

    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Update blog request
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub cover_image_url: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

/// Flag toggle request for publish/feature endpoints
#[derive(Debug, Deserialize)]
pub struct FlagRequest {
    /// Desired flag value (default true)
    pub value: Option<bool>,
}

/// Platform totals for the admin dashboard
pub async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<StatsResponse>>> {
    require_admin(&auth)?;

    let stats = StatsResponse {
        total_users: User::count(&state.db).await?,
        jobseekers: User::count_by_role(&state.db, UserRole::Jobseeker).await?,
        employers: User::count_by_role(&state.db, UserRole::Employer).await?,
        total_jobs: Job::count(&state.db, None).await?,
        open_jobs: Job::count(&state.db, Some(JobStatus::Open)).await?,
        closed_jobs: Job::count(&state.db, Some(JobStatus::Closed)).await?,
        total_applications: Application::count(&state.db).await?,
        total_blogs: Blog::count(&state.db, false).await?,
        published_blogs: Blog::count(&state.db, true).await?,
    };

    Ok(Json(ApiResponse::new("Stats fetched", stats)))
}

/// List users (admin)
pub async fn list_users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<ApiResponse<Paginated<User>>>> {
    require_admin(&auth)?;

    let (limit, offset, page_no, per_page) = page.resolve();

    let users = User::list(&state.db, limit, offset).await?;
    let total = User::count(&state.db).await?;

    Ok(Json(ApiResponse::new(
        "Users fetched",
        Paginated {
            items: users,
            total,
            page: page_no,
            per_page,
        },
    )))
}

/// Delete a user account
///
/// Deleting an admin account requires superadmin. Jobs, applications, and
/// team memberships cascade.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    require_admin(&auth)?;

    let target = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if target.role.is_admin() {
        require_superadmin(&auth)?;
    }

    if target.id == auth.user_id {
        return Err(ApiError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    User::delete(&state.db, id).await?;

    Ok(Json(ApiResponse::new(
        "User deleted",
        serde_json::json!({ "deleted": true }),
    )))
}

/// Close any posting (moderation)
pub async fn close_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Job>>> {
    require_admin(&auth)?;

    let job = Job::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    if job.status != JobStatus::Open {
        return Err(ApiError::BadRequest("Job is not open".to_string()));
    }

    let closed = Job::close(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Job is not open".to_string()))?;

    Ok(Json(ApiResponse::new("Job closed", closed)))
}

/// Delete any posting (moderation)
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    require_admin(&auth)?;

    let deleted = Job::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Job not found".to_string()));
    }

    Ok(Json(ApiResponse::new(
        "Job deleted",
        serde_json::json!({ "deleted": true }),
    )))
}

/// Create a blog post (starts unpublished)
pub async fn create_blog(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateBlogRequest>,
) -> ApiResult<Json<ApiResponse<Blog>>> {
    require_admin(&auth)?;
    req.validate().map_err(validation_error)?;

    let slug = match req.slug {
        Some(slug) if !slug.is_empty() => slug,
        _ => slugify(&req.title),
    };

    if slug.is_empty() {
        return Err(ApiError::BadRequest(
            "Could not derive a slug from the title".to_string(),
        ));
    }

    let blog = Blog::create(
        &state.db,
        CreateBlog {
            author_id: auth.user_id,
            title: req.title,
            slug,
            content: req.content,
            excerpt: req.excerpt,
            cover_image_url: req.cover_image_url,
            category: req.category,
            tags: req.tags,
        },
    )
    .await?;

    Ok(Json(ApiResponse::new("Blog created", blog)))
}

/// List all posts including drafts
pub async fn list_blogs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<ApiResponse<Paginated<Blog>>>> {
    require_admin(&auth)?;

    let (limit, offset, page_no, per_page) = page.resolve();

    let blogs = Blog::list_all(&state.db, limit, offset).await?;
    let total = Blog::count(&state.db, false).await?;

    Ok(Json(ApiResponse::new(
        "Blogs fetched",
        Paginated {
            items: blogs,
            total,
            page: page_no,
            per_page,
        },
    )))
}

/// Update a post's content fields
pub async fn update_blog(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBlogRequest>,
) -> ApiResult<Json<ApiResponse<Blog>>> {
    require_admin(&auth)?;

    let blog = Blog::update(
        &state.db,
        id,
        UpdateBlog {
            title: req.title,
            slug: req.slug,
            content: req.content,
            excerpt: req.excerpt,
            cover_image_url: req.cover_image_url,
            category: req.category,
            tags: req.tags,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Blog not found".to_string()))?;

    Ok(Json(ApiResponse::new("Blog updated", blog)))
}

/// Delete a post
pub async fn delete_blog(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    require_admin(&auth)?;

    let deleted = Blog::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Blog not found".to_string()));
    }

    Ok(Json(ApiResponse::new(
        "Blog deleted",
        serde_json::json!({ "deleted": true }),
    )))
}

/// Set or clear the published flag
pub async fn publish_blog(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<FlagRequest>,
) -> ApiResult<Json<ApiResponse<Blog>>> {
    require_admin(&auth)?;

    let blog = Blog::set_published(&state.db, id, req.value.unwrap_or(true))
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog not found".to_string()))?;

    Ok(Json(ApiResponse::new(
        if blog.published {
            "Blog published"
        } else {
            "Blog unpublished"
        },
        blog,
    )))
}

/// Set or clear the featured flag
pub async fn feature_blog(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<FlagRequest>,
) -> ApiResult<Json<ApiResponse<Blog>>> {
    require_admin(&auth)?;

    let blog = Blog::set_featured(&state.db, id, req.value.unwrap_or(true))
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog not found".to_string()))?;

    Ok(Json(ApiResponse::new(
        if blog.featured {
            "Blog featured"
        } else {
            "Blog unfeatured"
        },
        blog,
    )))
}

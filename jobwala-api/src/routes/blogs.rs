/// Public blog endpoints
///
/// Published posts are world-readable; unpublished posts are 404 for
/// everyone except admins. Authoring lives under `/v1/admin`.
///
/// # Endpoints
///
/// - `GET /v1/blogs` - List published posts
/// - `GET /v1/blogs/:id_or_slug` - Post detail, counts a view

use crate::{
    app::{AppState, OptionalAuth},
    error::{ApiError, ApiResult},
    response::{ApiResponse, Paginated},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use jobwala_shared::models::blog::Blog;
use serde::Deserialize;
use uuid::Uuid;

/// Query parameters for the public blog list
#[derive(Debug, Deserialize)]
pub struct ListBlogsQuery {
    /// Filter by category
    pub category: Option<String>,

    /// 1-based page number (default 1)
    pub page: Option<i64>,

    /// Page size (default 20, capped at 100)
    pub per_page: Option<i64>,
}

/// List published posts, featured first
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<ListBlogsQuery>,
) -> ApiResult<Json<ApiResponse<Paginated<Blog>>>> {
    let (limit, offset, page, per_page) = crate::response::PageParams {
        page: query.page,
        per_page: query.per_page,
    }
    .resolve();

    let blogs = Blog::list_published(&state.db, query.category.as_deref(), limit, offset).await?;
    let total = match query.category.as_deref() {
        Some(category) => Blog::count_published_in_category(&state.db, category).await?,
        None => Blog::count(&state.db, true).await?,
    };

    Ok(Json(ApiResponse::new(
        "Blogs fetched",
        Paginated {
            items: blogs,
            total,
            page,
            per_page,
        },
    )))
}

/// Post detail by ID or slug
///
/// Published posts count a view on every read. An unpublished post is 404
/// unless the caller is an authenticated admin, whose reads are not counted.
///
/// # Errors
///
/// - `404 Not Found`: No such post, or unpublished and caller is not an admin
pub async fn get_blog(
    State(state): State<AppState>,
    Extension(OptionalAuth(auth)): Extension<OptionalAuth>,
    Path(id_or_slug): Path<String>,
) -> ApiResult<Json<ApiResponse<Blog>>> {
    // Accept both the UUID and the slug form of the detail URL
    let blog = match id_or_slug.parse::<Uuid>() {
        Ok(id) => Blog::find_by_id(&state.db, id).await?,
        Err(_) => Blog::find_by_slug(&state.db, &id_or_slug).await?,
    };

    let blog = blog.ok_or_else(|| ApiError::NotFound("Blog not found".to_string()))?;

    if blog.published {
        let counted = Blog::find_published_counting_view(&state.db, blog.id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Blog not found".to_string()))?;
        return Ok(Json(ApiResponse::new("Blog fetched", counted)));
    }

    // Unpublished: only admins may see it, and their reads don't count views
    match auth {
        Some(auth) if auth.is_admin() => Ok(Json(ApiResponse::new("Blog fetched", blog))),
        _ => Err(ApiError::NotFound("Blog not found".to_string())),
    }
}

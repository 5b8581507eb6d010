/// Blog model and database operations
///
/// CMS-style content entity managed by admins. Posts carry publish and
/// feature flags plus a view counter; only published posts are visible to
/// non-admin callers.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE blogs (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     author_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     title VARCHAR(255) NOT NULL,
///     slug VARCHAR(255) NOT NULL UNIQUE,
///     content TEXT NOT NULL,
///     excerpt VARCHAR(512),
///     cover_image_url VARCHAR(512),
///     category VARCHAR(100),
///     tags TEXT[] NOT NULL DEFAULT '{}',
///     published BOOLEAN NOT NULL DEFAULT FALSE,
///     featured BOOLEAN NOT NULL DEFAULT FALSE,
///     views BIGINT NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Blog post model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Blog {
    /// Unique blog ID
    pub id: Uuid,

    /// Author (nullable if the account was deleted)
    pub author_id: Option<Uuid>,

    /// Post title
    pub title: String,

    /// URL slug, unique across all posts
    pub slug: String,

    /// Full post body
    pub content: String,

    /// Optional short summary for listing pages
    pub excerpt: Option<String>,

    /// Optional cover image URL
    pub cover_image_url: Option<String>,

    /// Optional category
    pub category: Option<String>,

    /// Free-form tags
    pub tags: Vec<String>,

    /// Whether the post is publicly visible
    pub published: bool,

    /// Whether the post is pinned to the featured slot
    pub featured: bool,

    /// Public read counter
    pub views: i64,

    /// When the post was created
    pub created_at: DateTime<Utc>,

    /// When the post was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlog {
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// Input for updating a blog post
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlog {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub cover_image_url: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

const BLOG_COLUMNS: &str = "id, author_id, title, slug, content, excerpt, cover_image_url, category, tags, \
     published, featured, views, created_at, updated_at";

impl Blog {
    /// Creates a new unpublished blog post
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is already taken (unique constraint
    /// violation) or the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateBlog) -> Result<Self, sqlx::Error> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            r#"
            INSERT INTO blogs (author_id, title, slug, content, excerpt, cover_image_url,
                               category, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {BLOG_COLUMNS}
            "#,
        ))
        .bind(data.author_id)
        .bind(data.title)
        .bind(data.slug)
        .bind(data.content)
        .bind(data.excerpt)
        .bind(data.cover_image_url)
        .bind(data.category)
        .bind(data.tags)
        .fetch_one(pool)
        .await?;

        Ok(blog)
    }

    /// Finds a blog post by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(blog)
    }

    /// Finds a blog post by slug
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE slug = $1",
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(blog)
    }

    /// Finds a published post by ID and atomically increments its view counter
    ///
    /// Returns None for unpublished posts: the public read path treats them
    /// as nonexistent.
    pub async fn find_published_counting_view(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            r#"
            UPDATE blogs
            SET views = views + 1
            WHERE id = $1 AND published = TRUE
            RETURNING {BLOG_COLUMNS}
            "#,
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(blog)
    }

    /// Updates a blog post's content fields
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateBlog,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE blogs SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.slug.is_some() {
            bind_count += 1;
            query.push_str(&format!(", slug = ${}", bind_count));
        }
        if data.content.is_some() {
            bind_count += 1;
            query.push_str(&format!(", content = ${}", bind_count));
        }
        if data.excerpt.is_some() {
            bind_count += 1;
            query.push_str(&format!(", excerpt = ${}", bind_count));
        }
        if data.cover_image_url.is_some() {
            bind_count += 1;
            query.push_str(&format!(", cover_image_url = ${}", bind_count));
        }
        if data.category.is_some() {
            bind_count += 1;
            query.push_str(&format!(", category = ${}", bind_count));
        }
        if data.tags.is_some() {
            bind_count += 1;
            query.push_str(&format!(", tags = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {BLOG_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Blog>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(slug) = data.slug {
            q = q.bind(slug);
        }
        if let Some(content) = data.content {
            q = q.bind(content);
        }
        if let Some(excerpt) = data.excerpt {
            q = q.bind(excerpt);
        }
        if let Some(cover_image_url) = data.cover_image_url {
            q = q.bind(cover_image_url);
        }
        if let Some(category) = data.category {
            q = q.bind(category);
        }
        if let Some(tags) = data.tags {
            q = q.bind(tags);
        }

        let blog = q.fetch_optional(pool).await?;

        Ok(blog)
    }

    /// Sets the published flag
    pub async fn set_published(
        pool: &PgPool,
        id: Uuid,
        published: bool,
    ) -> Result<Option<Self>, sqlx::Error> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            r#"
            UPDATE blogs
            SET published = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {BLOG_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(published)
        .fetch_optional(pool)
        .await?;

        Ok(blog)
    }

    /// Sets the featured flag
    pub async fn set_featured(
        pool: &PgPool,
        id: Uuid,
        featured: bool,
    ) -> Result<Option<Self>, sqlx::Error> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            r#"
            UPDATE blogs
            SET featured = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {BLOG_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(featured)
        .fetch_optional(pool)
        .await?;

        Ok(blog)
    }

    /// Deletes a blog post
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists published posts, featured first then newest first
    pub async fn list_published(
        pool: &PgPool,
        category: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let blogs = match category {
            Some(category) => {
                sqlx::query_as::<_, Blog>(&format!(
                    "SELECT {BLOG_COLUMNS} FROM blogs WHERE published = TRUE AND category = $3 \
                     ORDER BY featured DESC, created_at DESC LIMIT $1 OFFSET $2",
                ))
                .bind(limit)
                .bind(offset)
                .bind(category)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Blog>(&format!(
                    "SELECT {BLOG_COLUMNS} FROM blogs WHERE published = TRUE \
                     ORDER BY featured DESC, created_at DESC LIMIT $1 OFFSET $2",
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(blogs)
    }

    /// Lists all posts including drafts (admin view), newest first
    pub async fn list_all(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        let blogs = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(blogs)
    }

    /// Counts published posts in a category
    pub async fn count_published_in_category(
        pool: &PgPool,
        category: &str,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM blogs WHERE published = TRUE AND category = $1",
        )
        .bind(category)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Counts posts, optionally only published ones
    pub async fn count(pool: &PgPool, published_only: bool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = if published_only {
            sqlx::query_as("SELECT COUNT(*) FROM blogs WHERE published = TRUE")
                .fetch_one(pool)
                .await?
        } else {
            sqlx::query_as("SELECT COUNT(*) FROM blogs")
                .fetch_one(pool)
                .await?
        };

        Ok(count)
    }
}

/// Derives a URL slug from a post title
///
/// Lowercases, replaces runs of non-alphanumeric characters with a single
/// hyphen, and trims leading/trailing hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Top 10 Resume Tips!"), "top-10-resume-tips");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("a  --  b"), "a-b");
        assert_eq!(slugify("  spaced  out  "), "spaced-out");
    }

    #[test]
    fn test_slugify_non_ascii() {
        // Non-ASCII characters are treated as separators
        assert_eq!(slugify("café résumé"), "caf-r-sum");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_update_blog_default() {
        let update = UpdateBlog::default();
        assert!(update.title.is_none());
        assert!(update.slug.is_none());
        assert!(update.content.is_none());
        assert!(update.tags.is_none());
    }

    // Integration tests for database operations require a running database
}

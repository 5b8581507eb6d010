/// Success response envelope
///
/// Every successful endpoint wraps its payload as
/// `{ "success": true, "message": ..., "data": ... }` to mirror the error
/// envelope in `error.rs`.

use serde::Serialize;

/// Standard success body
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always true for successes
    pub success: bool,

    /// Short human-readable outcome
    pub message: String,

    /// Endpoint payload
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a payload with a message
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Paginated list payload
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    /// Items on this page
    pub items: Vec<T>,

    /// Total matching items across all pages
    pub total: i64,

    /// 1-based page number
    pub page: i64,

    /// Page size used
    pub per_page: i64,
}

/// Common pagination query parameters
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct PageParams {
    /// 1-based page number (default 1)
    pub page: Option<i64>,

    /// Page size (default 20, capped at 100)
    pub per_page: Option<i64>,
}

impl PageParams {
    /// Resolves raw query params into (limit, offset, page, per_page)
    pub fn resolve(self) -> (i64, i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (per_page, offset, page, per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_shape() {
        let body = ApiResponse::new("Job created", serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Job created");
        assert_eq!(json["data"]["id"], 1);
    }

    #[test]
    fn test_page_params_defaults() {
        let params = PageParams {
            page: None,
            per_page: None,
        };
        assert_eq!(params.resolve(), (20, 0, 1, 20));
    }

    #[test]
    fn test_page_params_offset() {
        let params = PageParams {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(params.resolve(), (10, 20, 3, 10));
    }

    #[test]
    fn test_page_params_clamped() {
        let params = PageParams {
            page: Some(0),
            per_page: Some(10_000),
        };
        let (per_page, offset, page, _) = params.resolve();
        assert_eq!(per_page, 100);
        assert_eq!(offset, 0);
        assert_eq!(page, 1);
    }
}

//! The JSON response envelope.
//!
//! Every endpoint answers with the same shape: `success`, a human-readable
//! `message`, optional `data`, and an `errors` array on failure. Paged
//! listings add camelCase pagination metadata alongside the data.

use marketd_core::page::Page;
use serde::Serialize;

/// The standard envelope for single-object responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// The payload, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure details, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A success envelope carrying `data`.
    #[must_use]
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    /// A failure envelope with no payload.
    #[must_use]
    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: Some(errors),
        }
    }
}

/// The envelope for paged listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedResponse<T> {
    /// Whether the request succeeded. Always true; failures use the plain
    /// envelope.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// The rows on this page.
    pub data: Vec<T>,
    /// The 1-based page number that was requested.
    #[serde(rename = "pageNumber")]
    pub page_number: u32,
    /// The page size that was requested.
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    /// Total matching rows across all pages.
    #[serde(rename = "totalSize")]
    pub total_size: i64,
}

impl<T: Serialize> PagedResponse<T> {
    /// Wrap one page of results.
    #[must_use]
    pub fn from_page(message: impl Into<String>, page: Page<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            page_number: page.page,
            page_size: page.limit,
            total_size: page.total,
            data: page.items,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use marketd_core::page::PageRequest;

    #[test]
    fn success_envelope_omits_errors() {
        let json = serde_json::to_value(ApiResponse::ok("Done", 42)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Done");
        assert_eq!(json["data"], 42);
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn failure_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::failure(
            "Nope",
            vec!["reason".to_string()],
        ))
        .unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["errors"][0], "reason");
    }

    #[test]
    fn paged_envelope_uses_camel_case_metadata() {
        let request = PageRequest::new(2, 10).unwrap();
        let page = Page::new(vec!["a", "b"], request, 12);
        let json = serde_json::to_value(PagedResponse::from_page("Listed", page)).unwrap();
        assert_eq!(json["pageNumber"], 2);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["totalSize"], 12);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }
}

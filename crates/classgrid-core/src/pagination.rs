//! Pagination utilities for API responses.
//!
//! List endpoints accept [`PaginationParams`] as query parameters and return a
//! [`Paginated`] body: the requested page of items plus [`PaginationMeta`].
//!
//! Two styles are supported:
//!
//! - **Offset-based**: `limit` and `offset`
//! - **Page-based**: `limit` and `page` (1-indexed, takes precedence over `offset`)
//!
//! Records come out of the document store as whole collections, so the page is
//! cut in memory with [`Paginated::from_vec`].
//!
//! # Example
//!
//! ```ignore
//! async fn list_rooms(
//!     Query(params): Query<PaginationParams>,
//! ) -> Result<Json<Paginated<Room>>, AppError> {
//!     let rooms = load_rooms().await?;
//!     Ok(Json(Paginated::from_vec(rooms, &params)))
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Deserializes an optional string into an optional i64.
///
/// Query parameters may arrive as empty strings, which are treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// Maximum items per page (the limit that was applied)
    pub limit: i64,
    /// Number of items skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Current page number (only present if page-based pagination was used)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Whether there are more items after this page
    pub has_more: bool,
}

/// Query parameters for pagination.
///
/// - `limit` is clamped to the range [1, 100] (default 10)
/// - `offset` is clamped to a minimum of 0
/// - `page` is clamped to a minimum of 1
#[derive(Debug, Clone, Default, Hash, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0, ignored if `page` is set)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// Page number (1-indexed)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    /// Returns the effective limit, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Returns the effective offset, derived from `page` when it is set.
    #[must_use]
    pub fn offset(&self) -> i64 {
        if let Some(page) = self.page {
            (page.max(1) - 1).saturating_mul(self.limit())
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }

    /// Returns the page number if provided, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}

/// One page of items plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    /// Cuts the requested page out of a fully loaded, already ordered list.
    pub fn from_vec(items: Vec<T>, params: &PaginationParams) -> Self {
        let total = items.len() as i64;
        let limit = params.limit();
        let offset = params.offset();

        let data: Vec<T> = items
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit as usize)
            .collect();

        Self {
            data,
            meta: PaginationMeta {
                total,
                limit,
                offset: Some(offset),
                page: params.page(),
                has_more: offset.saturating_add(limit) < total,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>, page: Option<i64>) -> PaginationParams {
        PaginationParams {
            limit,
            offset,
            page,
        }
    }

    #[test]
    fn test_pagination_params_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page(), None);
    }

    #[test]
    fn test_pagination_params_limit_boundary_cases() {
        let test_cases = vec![
            (Some(1), 1),
            (Some(50), 50),
            (Some(100), 100),
            (Some(101), 100),
            (Some(0), 1),
            (Some(-1), 1),
        ];

        for (input, expected) in test_cases {
            assert_eq!(params(input, None, None).limit(), expected);
        }
    }

    #[test]
    fn test_pagination_params_offset_negative() {
        assert_eq!(params(Some(10), Some(-5), None).offset(), 0);
    }

    #[test]
    fn test_page_takes_precedence_over_offset() {
        let p = params(Some(20), Some(5), Some(3));
        assert_eq!(p.offset(), 40);
        assert_eq!(p.page(), Some(3));

        assert_eq!(params(Some(20), None, Some(0)).offset(), 0);
    }

    #[test]
    fn test_pagination_params_deserialize_empty_strings() {
        let json = r#"{"limit":"","offset":""}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_params_deserialize_with_values() {
        let json = r#"{"limit":"25","page":"2"}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 25);
    }

    #[test]
    fn test_paginated_from_vec_first_page() {
        let page = Paginated::from_vec((1..=25).collect::<Vec<i32>>(), &params(Some(10), None, None));
        assert_eq!(page.data, (1..=10).collect::<Vec<_>>());
        assert_eq!(page.meta.total, 25);
        assert!(page.meta.has_more);
    }

    #[test]
    fn test_paginated_from_vec_last_page() {
        let page = Paginated::from_vec((1..=25).collect::<Vec<i32>>(), &params(Some(10), None, Some(3)));
        assert_eq!(page.data, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.meta.offset, Some(20));
        assert!(!page.meta.has_more);
    }

    #[test]
    fn test_paginated_from_vec_past_end() {
        let page = Paginated::from_vec(vec![1, 2, 3], &params(Some(10), Some(50), None));
        assert!(page.data.is_empty());
        assert_eq!(page.meta.total, 3);
        assert!(!page.meta.has_more);
    }

    #[test]
    fn test_huge_page_and_offset_saturate() {
        let by_page = Paginated::from_vec(vec![1, 2, 3], &params(Some(10), None, Some(i64::MAX)));
        assert!(by_page.data.is_empty());
        assert_eq!(by_page.meta.offset, Some(i64::MAX));
        assert!(!by_page.meta.has_more);

        let by_offset = Paginated::from_vec(vec![1, 2, 3], &params(Some(10), Some(i64::MAX), None));
        assert!(by_offset.data.is_empty());
        assert_eq!(by_offset.meta.offset, Some(i64::MAX));
        assert!(!by_offset.meta.has_more);
    }

    #[test]
    fn test_pagination_meta_serialize_skips_missing_page() {
        let page = Paginated::from_vec(vec!["a"], &PaginationParams::default());
        let serialized = serde_json::to_string(&page.meta).unwrap();
        assert!(serialized.contains(r#""total":1"#));
        assert!(!serialized.contains("page"));
    }
}

//! Pagination primitives and lenient query-string parsing.

use serde::{Deserialize, Deserializer, Serialize};

/// Pagination query parameters. Non-numeric values fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
}

impl Pagination {
    /// Maximum items per page.
    const MAX_LIMIT: i64 = 500;

    /// Default items per page.
    const DEFAULT_LIMIT: i64 = 50;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        (self.current_page() - 1).saturating_mul(self.limit())
    }

    pub fn current_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Pagination metadata returned alongside a page of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_records: i64,
    pub limit: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageInfo {
    pub fn new(total_records: i64, pagination: &Pagination) -> Self {
        let limit = pagination.limit();
        let current_page = pagination.current_page();
        let total_pages = (total_records + limit - 1) / limit;
        Self {
            current_page,
            total_pages,
            total_records,
            limit,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }
}

/// Accept any query value; keep it only when it parses as an integer.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.trim().parse().ok()))
}

/// Accept a text value; blank strings count as absent.
pub(crate) fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|v| !v.trim().is_empty()))
}

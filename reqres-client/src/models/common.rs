use serde::{Deserialize, Serialize};

/// Pagination envelope around a list of entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// `ceil(total / per_page)`, or 0 when `per_page` is 0.
    pub fn expected_total_pages(&self) -> u64 {
        if self.per_page == 0 {
            0
        } else {
            self.total.div_ceil(self.per_page)
        }
    }

    /// Whether this is the last (or only) page.
    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages
    }
}

/// `{ "data": ... }` envelope returned by get-by-id endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Single<T> {
    pub data: T,
}

/// Error body for rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

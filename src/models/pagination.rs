use chrono::{DateTime, Utc};

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Optional `{limit, offset}` pair as supplied by a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageRequest {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: None,
        }
    }

    /// Resolves missing values to `DEFAULT_PAGE_LIMIT` and offset 0.
    /// No upper bound is applied here.
    pub fn resolve(self) -> Pagination {
        Pagination {
            limit: self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            offset: self.offset.unwrap_or(0),
        }
    }
}

/// A concrete pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        PageRequest::default().resolve()
    }
}

impl Pagination {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    // Postgres LIMIT/OFFSET take BIGINT.
    pub fn sql_limit(&self) -> i64 {
        i64::from(self.limit)
    }

    pub fn sql_offset(&self) -> i64 {
        i64::from(self.offset)
    }
}

/// Records that carry a creation timestamp.
pub trait Chronological {
    fn created_at(&self) -> DateTime<Utc>;
}

/// Stable ascending sort by creation time.
/// Records with equal timestamps keep the order the store produced them in.
pub fn sort_chronologically<T: Chronological>(items: &mut [T]) {
    items.sort_by_key(|item| item.created_at());
}

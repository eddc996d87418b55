use serde::Serialize;

/// One page of query results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Rows matching the filters, ignoring pagination.
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        Self {
            data,
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        }
    }
}

/// `ceil(total / limit)`. Zero matches means zero pages, and a zero limit
/// (never produced by validation) also yields zero.
#[must_use]
pub fn total_pages(total: u64, limit: u32) -> u64 {
    if total == 0 || limit == 0 {
        return 0;
    }
    total.div_ceil(u64::from(limit))
}

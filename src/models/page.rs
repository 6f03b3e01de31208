use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

/// Normalized pagination parameters: zero-based page, size clamped to
/// 1..=100.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: u32,
    pub size: u32,
}

impl PageParams {
    pub fn new(page: Option<u32>, size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(0),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the totals a client needs to paginate.
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, params: PageParams, total_items: u64) -> Self {
        let total_pages = (total_items.div_ceil(u64::from(params.size))) as u32;
        Self {
            items,
            page: params.page,
            size: params.size,
            total_items,
            total_pages,
        }
    }
}

//! Catalog page navigation

/// Position within a paginated list, pages are 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: u32,
    total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl Pagination {
    /// Out-of-range starting pages are clamped into `1..=total_pages`
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            current_page: current_page.clamp(1, total_pages),
            total_pages,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Jump to `page`; pages outside `1..=total_pages` are ignored
    pub fn set_page(&mut self, page: u32) -> bool {
        if page >= 1 && page <= self.total_pages {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        self.set_page(self.current_page.saturating_add(1))
    }

    pub fn prev(&mut self) -> bool {
        self.set_page(self.current_page.saturating_sub(1))
    }

    pub fn first(&mut self) -> bool {
        self.set_page(1)
    }

    pub fn last(&mut self) -> bool {
        self.set_page(self.total_pages)
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl std::fmt::Display for Pagination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page {}/{}", self.current_page, self.total_pages)
    }
}

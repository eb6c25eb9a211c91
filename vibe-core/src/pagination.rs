use std::ops::{Range, RangeInclusive};

pub const DEFAULT_WINDOW: usize = 5;

/// Slice bounds and navigation flags for one page of a collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageInfo {
    pub fn new(total_items: usize, items_per_page: usize, current_page: usize) -> Self {
        debug_assert!(items_per_page > 0, "page size must be positive");
        let items_per_page = items_per_page.max(1);
        let total_pages = total_items.div_ceil(items_per_page);
        let start_index = current_page.saturating_mul(items_per_page).min(total_items);
        let end_index = start_index.saturating_add(items_per_page).min(total_items);
        Self {
            current_page,
            items_per_page,
            total_items,
            total_pages,
            start_index,
            end_index,
            has_previous: current_page > 0,
            has_next: current_page + 1 < total_pages,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range()]
    }

    pub fn contains_page(&self, page: usize) -> bool {
        page < self.total_pages
    }

    /// Page controls are pointless for a single page.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn summary(&self) -> Option<String> {
        if self.start_index == self.end_index {
            None
        } else {
            Some(format!(
                "Showing {}-{} of {}",
                self.start_index + 1,
                self.end_index,
                self.total_items
            ))
        }
    }

    pub fn window(&self, size: usize) -> Option<PageWindow> {
        PageWindow::new(self.current_page, self.total_pages, size)
    }
}

/// The run of page-number buttons shown around the current page.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub first: usize,
    pub last: usize,
    pub leading_ellipsis: bool,
    pub trailing_ellipsis: bool,
}

impl PageWindow {
    pub fn new(current_page: usize, total_pages: usize, size: usize) -> Option<Self> {
        if total_pages == 0 {
            return None;
        }
        let size = size.max(1);
        let current_page = current_page.min(total_pages - 1);
        let first = current_page.saturating_sub(size / 2);
        let last = (first + size - 1).min(total_pages - 1);
        // Slide back when the window got cut off by the last page.
        let first = last.saturating_sub(size - 1);
        Some(Self {
            first,
            last,
            leading_ellipsis: first > 0,
            trailing_ellipsis: last + 1 < total_pages,
        })
    }

    pub fn pages(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// Current-page state with guarded navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    per_page: usize,
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 0,
            per_page: per_page.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn info(&self, total_items: usize) -> PageInfo {
        PageInfo::new(total_items, self.per_page, self.page)
    }

    /// Moves to `page` if it exists, otherwise leaves the state untouched.
    pub fn go_to_page(&mut self, page: usize, total_items: usize) -> bool {
        if self.info(total_items).contains_page(page) && page != self.page {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self, total_items: usize) -> bool {
        self.go_to_page(self.page + 1, total_items)
    }

    pub fn previous(&mut self, total_items: usize) -> bool {
        match self.page.checked_sub(1) {
            Some(page) => self.go_to_page(page, total_items),
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Pulls the page back inside the collection after it shrank.
    pub fn clamp(&mut self, total_items: usize) {
        let total_pages = self.info(total_items).total_pages;
        self.page = self.page.min(total_pages.saturating_sub(1));
    }
}

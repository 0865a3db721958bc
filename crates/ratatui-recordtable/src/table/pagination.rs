use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [25, 50, 100, 250];

/// Caller-owned paging state. `current_page` is 1-based.
///
/// `total_count` present means the caller already fetched exactly one page (server-side
/// pagination) and the rows are displayed as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationState {
    pub page_size: usize,
    pub current_page: usize,
    pub total_count: Option<usize>,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
            total_count: None,
        }
    }
}

impl PaginationState {
    pub fn new(page_size: usize, current_page: usize) -> Self {
        Self {
            page_size,
            current_page,
            total_count: None,
        }
    }

    pub fn server(page_size: usize, current_page: usize, total_count: usize) -> Self {
        Self {
            page_size,
            current_page,
            total_count: Some(total_count),
        }
    }

    pub fn is_server_side(&self) -> bool {
        self.total_count.is_some()
    }

    fn page_size_or_one(&self) -> usize {
        self.page_size.max(1)
    }

    fn page_index(&self) -> usize {
        self.current_page.saturating_sub(1)
    }

    /// Absolute index of the first row of the current page.
    pub fn start_index(&self) -> usize {
        self.page_index().saturating_mul(self.page_size_or_one())
    }

    /// Rows of `row_count` displayed on the current page.
    pub fn window(&self, row_count: usize) -> Range<usize> {
        if self.is_server_side() {
            return 0..row_count;
        }
        let start = self.start_index().min(row_count);
        let end = start.saturating_add(self.page_size_or_one()).min(row_count);
        start..end
    }

    /// Total number of rows across all pages.
    pub fn total(&self, row_count: usize) -> usize {
        self.total_count.unwrap_or(row_count)
    }

    pub fn page_count(&self, row_count: usize) -> usize {
        self.total(row_count).div_ceil(self.page_size_or_one()).max(1)
    }

    /// The page "previous" leads to. A page past the end steps back to the last real page.
    pub fn previous_page(&self, row_count: usize) -> Option<usize> {
        let target = self
            .current_page
            .saturating_sub(1)
            .min(self.page_count(row_count));
        (target >= 1 && target != self.current_page).then_some(target)
    }

    pub fn next_page(&self, row_count: usize) -> Option<usize> {
        let current = self.current_page.max(1);
        (current < self.page_count(row_count)).then_some(current + 1)
    }

    pub fn has_previous(&self, row_count: usize) -> bool {
        self.previous_page(row_count).is_some()
    }

    pub fn has_next(&self, row_count: usize) -> bool {
        self.next_page(row_count).is_some()
    }
}

/// Everything the pager line shows, derived from [`PaginationState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagerModel {
    pub total: usize,
    /// 0-based page index.
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub first_row: usize,
    pub last_row: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// Page-size choices. Empty when nobody listens for page-size changes.
    pub page_size_options: Vec<usize>,
}

impl PagerModel {
    pub fn new(
        pagination: &PaginationState,
        row_count: usize,
        window_len: usize,
        page_size_options: Option<&[usize]>,
    ) -> Self {
        let total = pagination.total(row_count);
        let start = pagination.start_index();
        let (first_row, last_row) = if window_len == 0 {
            (0, 0)
        } else {
            (start + 1, start + window_len)
        };
        let page_size_options = page_size_options
            .map(|options| {
                let mut options = options.to_vec();
                if !options.contains(&pagination.page_size) {
                    options.push(pagination.page_size);
                }
                options.sort_unstable();
                options.dedup();
                options
            })
            .unwrap_or_default();

        Self {
            total,
            page: pagination.page_index(),
            page_count: pagination.page_count(row_count),
            page_size: pagination.page_size,
            first_row,
            last_row,
            has_previous: pagination.has_previous(row_count),
            has_next: pagination.has_next(row_count),
            page_size_options,
        }
    }

    /// The page-size option `step` positions away from the current size, if any.
    pub fn cycle_page_size(&self, step: isize) -> Option<usize> {
        let pos = self
            .page_size_options
            .iter()
            .position(|s| *s == self.page_size)?;
        let next = pos.checked_add_signed(step)?;
        self.page_size_options.get(next).copied()
    }
}

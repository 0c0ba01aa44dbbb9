/// Default number of records on one page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Maximum number of page buttons offered for navigation.
pub const WINDOW_WIDTH: usize = 5;

/// Position of the visible page within the filtered records.
///
/// `current_page` is 1-based and stays within `[1, total_pages]` whenever
/// there is at least one page. With no items there are no pages and the
/// current page is an empty page 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
    GoTo(usize),
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// A zero page size is bumped to one.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Replaces the item count, keeping the current page in range.
    pub fn with_total(self, total_items: usize) -> Self {
        let mut next = Self {
            total_items,
            ..self
        };
        next.current_page = next.current_page.clamp(1, next.total_pages().max(1));
        next
    }

    /// Back to page 1, as after a filter change.
    pub fn reset(self) -> Self {
        Self {
            current_page: 1,
            ..self
        }
    }

    /// Half-open index range of the current page, clamped to `len`.
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(len);
        let end = start.saturating_add(self.page_size).min(len);
        (start, end)
    }
}

/// Slice of `records` visible on the current page. Never panics: an
/// out-of-range page yields an empty or partial slice.
pub fn page<'a, T>(records: &'a [T], state: &PageState) -> &'a [T] {
    let (start, end) = state.bounds(records.len());
    &records[start..end]
}

/// Moves the current page. Requests outside `[1, total_pages]` are ignored.
pub fn advance(direction: Direction, state: PageState) -> PageState {
    let total = state.total_pages();
    let target = match direction {
        Direction::Previous if state.current_page > 1 => state.current_page - 1,
        Direction::Next if state.current_page < total => state.current_page + 1,
        Direction::GoTo(n) if (1..=total).contains(&n) => n,
        _ => return state,
    };
    PageState {
        current_page: target,
        ..state
    }
}

/// Page numbers to offer as navigation buttons.
///
/// At most [`WINDOW_WIDTH`] consecutive pages, always containing the current
/// page, kept centred on it unless that would run past either end.
pub fn page_window(state: &PageState) -> Vec<usize> {
    let total = state.total_pages();
    let width = WINDOW_WIDTH.min(total);
    if width == 0 {
        return Vec::new();
    }
    let half = width.div_ceil(2);
    let current = state.current_page;

    if current <= half {
        (1..=width).collect()
    } else if current > total - half {
        (total - width + 1..=total).collect()
    } else {
        (current - half + 1..=current + half - 1).collect()
    }
}

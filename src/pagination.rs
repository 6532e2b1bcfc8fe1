//! Fixed-size pages and the windowed pagination control

/// How many task rows a page shows
pub const PAGE_SIZE: usize = 10;
/// How many page links the pagination control shows at most
pub const MAX_PAGE_LINKS: usize = 5;

/// Number of pages needed for `count` items. An empty list still has no page
pub fn page_count(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    (count + page_size - 1) / page_size
}

/// Returns `page` if it is within `[1, total_pages]`, or 1 otherwise
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    if page >= 1 && page <= total_pages {
        page
    } else {
        1
    }
}

/// The items of the (1-based) `page`
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// A "previous" or "next" link
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepLink {
    /// The page this link leads to
    pub target: usize,
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLink {
    pub page: usize,
    pub active: bool,
}

/// The pagination control shown under the task list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub previous: StepLink,
    pub pages: Vec<PageLink>,
    pub next: StepLink,
    pub total_pages: usize,
}

impl Pagination {
    /// Build the control for `current` out of `total_pages`.
    ///
    /// Returns `None` when there is nothing to paginate (a single page or less).
    pub fn new(current: usize, total_pages: usize) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }
        let current = clamp_page(current, total_pages);

        let mut start = current.saturating_sub(MAX_PAGE_LINKS / 2).max(1);
        let end = (start + MAX_PAGE_LINKS - 1).min(total_pages);
        if end + 1 - start < MAX_PAGE_LINKS {
            start = (end + 1).saturating_sub(MAX_PAGE_LINKS).max(1);
        }

        let pages = (start..=end)
            .map(|page| PageLink { page, active: page == current })
            .collect();

        Some(Self {
            previous: StepLink { target: current.saturating_sub(1).max(1), disabled: current == 1 },
            pages,
            next: StepLink { target: (current + 1).min(total_pages), disabled: current == total_pages },
            total_pages,
        })
    }

    /// The page numbers shown, in order
    pub fn page_numbers(&self) -> Vec<usize> {
        self.pages.iter().map(|link| link.page).collect()
    }
}

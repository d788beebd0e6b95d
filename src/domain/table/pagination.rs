//! Dual-mode pagination behind one interface.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{DashboardError, Result};

/// Page size choices list screens offer.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// Caller-supplied paging metadata for tables whose backend serves one page
/// at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalPage {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}

/// What a list screen shows under the table. `window_start`/`window_end`
/// are 1-based positions of the visible rows, both zero on an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub window_start: usize,
    pub window_end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Internal { page: usize, page_size: usize },
    External(ExternalPage),
}

/// Pagination for one table, fixed to a mode at construction.
///
/// Internal mode slices the full filtered/sorted working set itself.
/// External mode trusts the caller completely: the rows handed to the table
/// are already the right page and the metadata is the backend's word. In
/// external mode the table applies neither sorting nor searching; a caller
/// paging externally must sort and filter server-side, because reordering
/// only the visible page would be quietly wrong. Columns may still render
/// sort indicators for backend-driven sorting the table does not perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    mode: Mode,
}

impl Paginator {
    /// Internal mode, starting on page 1. Page size zero has no meaningful
    /// slicing and is rejected.
    pub fn internal(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(DashboardError::InvalidPageSize(page_size));
        }
        Ok(Self {
            mode: Mode::Internal { page: 1, page_size },
        })
    }

    /// External mode wrapping backend-owned metadata.
    pub fn external(meta: ExternalPage) -> Self {
        Self {
            mode: Mode::External(meta),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self.mode, Mode::External(_))
    }

    pub fn external_meta(&self) -> Option<&ExternalPage> {
        match &self.mode {
            Mode::External(meta) => Some(meta),
            Mode::Internal { .. } => None,
        }
    }

    pub fn current_page(&self) -> usize {
        match &self.mode {
            Mode::Internal { page, .. } => *page,
            Mode::External(meta) => meta.current_page,
        }
    }

    /// Rows per page; `items_per_page` in external mode.
    pub fn page_size(&self) -> usize {
        match &self.mode {
            Mode::Internal { page_size, .. } => *page_size,
            Mode::External(meta) => meta.items_per_page,
        }
    }

    /// Page count over `total_items` in internal mode; the backend's figure
    /// in external mode.
    pub fn total_pages(&self, total_items: usize) -> usize {
        match &self.mode {
            Mode::Internal { page_size, .. } => total_items.div_ceil(*page_size),
            Mode::External(meta) => meta.total_pages,
        }
    }

    /// Clamp `requested` into `[1, totalPages]` and record it. Returns the
    /// page actually selected; an external caller fetches that page from
    /// the backend next.
    pub fn go_to_page(&mut self, requested: usize, total_items: usize) -> usize {
        let bound = self.total_pages(total_items).max(1);
        let page = requested.clamp(1, bound);
        if page != requested {
            debug!(requested, page, "page request clamped");
        }

        match &mut self.mode {
            Mode::Internal { page: current, .. } => *current = page,
            Mode::External(meta) => meta.current_page = page,
        }
        page
    }

    /// Internal mode: pick a new page size and restart from page 1.
    /// External metadata belongs to the backend and is left alone.
    pub fn set_page_size(&mut self, new_size: usize) -> Result<()> {
        if let Mode::Internal { page, page_size } = &mut self.mode {
            if new_size == 0 {
                return Err(DashboardError::InvalidPageSize(new_size));
            }
            *page_size = new_size;
            *page = 1;
        }
        Ok(())
    }

    /// Internal mode: back to page 1, e.g. after the search query changes.
    pub fn reset_to_first_page(&mut self) {
        if let Mode::Internal { page, .. } = &mut self.mode {
            *page = 1;
        }
    }

    /// Summary for a computed page holding `rows_on_page` rows out of
    /// `total_items`.
    pub fn summarize(&self, total_items: usize, rows_on_page: usize) -> PageSummary {
        let (current_page, items_per_page, total) = match &self.mode {
            Mode::Internal { page, page_size } => (*page, *page_size, total_items),
            Mode::External(meta) => (meta.current_page, meta.items_per_page, meta.total_items),
        };

        let window_start = if rows_on_page == 0 {
            0
        } else {
            current_page
                .saturating_sub(1)
                .saturating_mul(items_per_page)
                + 1
        };
        let window_end = if rows_on_page == 0 {
            0
        } else {
            window_start + rows_on_page - 1
        };

        PageSummary {
            current_page,
            total_pages: self.total_pages(total_items),
            total_items: total,
            items_per_page,
            window_start,
            window_end,
        }
    }
}

/// Internal-mode slice of the working set. Pages past the end are empty.
pub fn slice_page<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

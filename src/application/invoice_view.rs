//! Read-only projections of the order collection for the invoice screen, plus
//! the screen's transient selection state.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::order::{Order, OrderStatus};

pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 20];
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Page {page} is out of range (1..={total_pages})")]
    PageOutOfRange { page: usize, total_pages: usize },
    #[error("Unsupported page size: {0}")]
    UnsupportedPageSize(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => order.status == *status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("ALL"),
            StatusFilter::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

// ── Pure projections ─────────────────────────────────────────────────────────

pub fn filter_orders(orders: &[Order], filter: StatusFilter) -> Vec<&Order> {
    orders.iter().filter(|o| filter.matches(o)).collect()
}

/// Always at least 1, so an empty list still has a first page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Items on the 1-indexed `page`; empty when the page lies past the end.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn status_counts(orders: &[Order]) -> BTreeMap<OrderStatus, usize> {
    let mut counts = BTreeMap::new();
    for order in orders {
        *counts.entry(order.status).or_insert(0) += 1;
    }
    counts
}

/// `All` first, then every status that has at least one order.
pub fn visible_tabs(counts: &BTreeMap<OrderStatus, usize>) -> Vec<StatusFilter> {
    std::iter::once(StatusFilter::All)
        .chain(
            OrderStatus::ALL
                .into_iter()
                .filter(|s| counts.get(s).copied().unwrap_or(0) > 0)
                .map(StatusFilter::Only),
        )
        .collect()
}

/// Everything the list part of the screen renders for one read of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoicePage<'a> {
    pub filter: StatusFilter,
    pub items: Vec<&'a Order>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub filtered_total: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub counts: BTreeMap<OrderStatus, usize>,
    pub tabs: Vec<StatusFilter>,
}

// ── Selection state ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceView {
    filter: StatusFilter,
    page: usize,
    page_size: usize,
    selected: Option<Uuid>,
    carousel_index: usize,
    confirm_delete: bool,
}

impl Default for InvoiceView {
    fn default() -> Self {
        Self {
            filter: StatusFilter::All,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            selected: None,
            carousel_index: 0,
            confirm_delete: false,
        }
    }
}

impl InvoiceView {
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn carousel_index(&self) -> usize {
        self.carousel_index
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirm_delete
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.page = 1;
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ViewError> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(ViewError::UnsupportedPageSize(page_size));
        }
        if self.page_size != page_size {
            self.page_size = page_size;
            self.page = 1;
        }
        Ok(())
    }

    /// Moves to `page` if it exists for the current filter; otherwise leaves
    /// the view where it is.
    pub fn go_to_page(&mut self, page: usize, orders: &[Order]) -> Result<(), ViewError> {
        let total_pages = self.total_pages(orders);
        if page == 0 || page > total_pages {
            return Err(ViewError::PageOutOfRange { page, total_pages });
        }
        self.page = page;
        Ok(())
    }

    pub fn next_page(&mut self, orders: &[Order]) -> Result<(), ViewError> {
        self.go_to_page(self.page + 1, orders)
    }

    pub fn previous_page(&mut self, orders: &[Order]) -> Result<(), ViewError> {
        self.go_to_page(self.page.saturating_sub(1), orders)
    }

    /// Pulls the page back onto the last existing page after the collection
    /// shrank.
    pub fn clamp_page(&mut self, orders: &[Order]) {
        self.page = self.page.clamp(1, self.total_pages(orders));
    }

    pub fn total_pages(&self, orders: &[Order]) -> usize {
        let len = orders.iter().filter(|o| self.filter.matches(o)).count();
        total_pages(len, self.page_size)
    }

    pub fn project<'a>(&self, orders: &'a [Order]) -> InvoicePage<'a> {
        let filtered = filter_orders(orders, self.filter);
        let total_pages = total_pages(filtered.len(), self.page_size);
        let items = page_slice(&filtered, self.page, self.page_size).to_vec();
        let counts = status_counts(orders);
        let tabs = visible_tabs(&counts);
        InvoicePage {
            filter: self.filter,
            items,
            page: self.page,
            page_size: self.page_size,
            total_pages,
            filtered_total: filtered.len(),
            has_previous: self.page > 1,
            has_next: self.page < total_pages,
            counts,
            tabs,
        }
    }

    /// Opens the detail view for `id`. The caller is expected to fetch the
    /// order; the carousel and delete gate start over.
    pub fn select(&mut self, id: Uuid) {
        self.selected = Some(id);
        self.carousel_index = 0;
        self.confirm_delete = false;
    }

    pub fn close(&mut self) {
        self.selected = None;
        self.carousel_index = 0;
        self.confirm_delete = false;
    }

    pub fn reset_carousel(&mut self) {
        self.carousel_index = 0;
    }

    /// Returns whether the index moved.
    pub fn carousel_next(&mut self, line_count: usize) -> bool {
        if self.selected.is_none() || self.carousel_index + 1 >= line_count {
            return false;
        }
        self.carousel_index += 1;
        true
    }

    pub fn carousel_previous(&mut self) -> bool {
        if self.selected.is_none() || self.carousel_index == 0 {
            return false;
        }
        self.carousel_index -= 1;
        true
    }

    /// Arms the delete confirmation. Refused while a delete is in flight or
    /// for orders that are no longer pending.
    pub fn request_delete(&mut self, order: &Order, delete_in_flight: bool) -> bool {
        if delete_in_flight || self.selected != Some(order.id) || !order.is_deletable() {
            return false;
        }
        self.confirm_delete = true;
        true
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    /// Consumes the confirmation, yielding the order to delete.
    pub fn confirm_delete(&mut self) -> Option<Uuid> {
        if !self.confirm_delete {
            return None;
        }
        self.confirm_delete = false;
        self.selected
    }
}

//! Catalog controller
//!
//! Owns the browsing state (current page, active filter, the filter form and
//! the product slots of the current page) and decides which requests to
//! issue. It never performs I/O on its own: callers run the [`Action`]s it
//! hands out and feed the replies back through the `apply_*` methods.
//!
//! # Request tickets
//!
//! Every state change (page, filter, reload) bumps a generation counter and
//! hands out a [`RequestTicket`]. Replies are applied only if they carry the
//! current ticket, so a slow response for page 3 cannot overwrite page 4
//! after the user has moved on.
//!
//! ```text
//! on_page_change / on_filter_change / reload
//!        │  ticket N
//!        ▼
//! ids_request() ──► apply_ids(N, ..)   ──► slots (Loading)
//! count_request() ► apply_count(N, ..) ──► total_pages
//!                   apply_detail(N, i, ..) ──► slot i
//! ```

pub mod filter_form;
pub mod pagination;
pub mod product;

use crate::api::models::{Action, Field, FilterCriteria, IdsParams, Product, ProductId};
use crate::api::{ApiClient, ApiError};
use filter_form::{FilterForm, FilterFormError};
use futures::stream::{self, StreamExt};
use pagination::{PageIntent, Pagination};
use product::ProductSlot;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Generation of the controller state a request was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How the total matching count is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountStrategy {
    /// `get_ids` carrying the filter params, no offset/limit
    #[default]
    GetIds,
    /// `filter` when a filter is active, plain `get_ids` otherwise
    Filter,
}

impl CountStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetIds => "get_ids",
            Self::Filter => "filter",
        }
    }
}

impl FromStr for CountStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "get_ids" => Ok(Self::GetIds),
            "filter" => Ok(Self::Filter),
            other => Err(format!(
                "unknown count strategy '{}' (expected get_ids or filter)",
                other
            )),
        }
    }
}

/// Result of feeding a reply back into the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// State was updated
    Applied,
    /// Reply belonged to an older ticket and was dropped
    Stale,
    /// Reply was an error; state left untouched
    Failed,
}

/// De-duplicate identifiers, keeping the first occurrence of each
pub fn dedupe_ids(ids: Vec<ProductId>) -> Vec<ProductId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Browsing state and request orchestration
#[derive(Debug)]
pub struct CatalogController {
    pagination: Pagination,
    filter: FilterCriteria,
    form: FilterForm,
    products: Vec<ProductSlot>,
    generation: u64,
    count_strategy: CountStrategy,
    /// Set once the first id list has been applied
    loaded: bool,
}

impl CatalogController {
    pub fn new(page_size: u64, count_strategy: CountStrategy) -> Self {
        Self {
            pagination: Pagination::new(page_size),
            filter: FilterCriteria::new(),
            form: FilterForm::new(),
            products: Vec::new(),
            generation: 0,
            count_strategy,
            loaded: false,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn form(&self) -> &FilterForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FilterForm {
        &mut self.form
    }

    pub fn products(&self) -> &[ProductSlot] {
        &self.products
    }

    /// Ticket for the current state
    pub fn ticket(&self) -> RequestTicket {
        RequestTicket(self.generation)
    }

    /// Whether an id list has been applied at least once
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn next_ticket(&mut self) -> RequestTicket {
        self.generation += 1;
        self.ticket()
    }

    // ─────────────────────────────────────────────────────────────
    // Requests
    // ─────────────────────────────────────────────────────────────

    /// Request for the identifiers of the current page
    pub fn ids_request(&self) -> Action {
        if self.filter.is_empty() {
            Action::page_of_ids(self.pagination.offset(), self.pagination.page_size())
        } else {
            Action::Filter(self.filter.clone())
        }
    }

    /// Request for the total matching count
    pub fn count_request(&self) -> Action {
        match self.count_strategy {
            CountStrategy::Filter if !self.filter.is_empty() => Action::Filter(self.filter.clone()),
            _ => Action::GetIds(IdsParams {
                filter: self.filter.clone(),
                ..Default::default()
            }),
        }
    }

    /// Values request for `field`, tagged with the form's current ticket
    pub fn field_values_request(&self, field: Field) -> (RequestTicket, Action) {
        (self.form.values_ticket(), self.form.on_field_change(field))
    }

    /// Detail requests for every slot on the current page
    pub fn detail_requests(&self) -> Vec<(usize, ProductId)> {
        self.products
            .iter()
            .enumerate()
            .map(|(i, slot)| (i, slot.id.clone()))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────

    /// Initial load or manual refresh of the current state
    pub fn reload(&mut self) -> RequestTicket {
        self.next_ticket()
    }

    /// Replace the filter and go back to page 1
    pub fn on_filter_change(&mut self, filter: FilterCriteria) -> RequestTicket {
        tracing::info!("Filter: {}", filter);
        self.filter = filter;
        self.pagination.reset();
        self.next_ticket()
    }

    /// Commit the form's draft as the new filter
    pub fn submit_form(&mut self) -> Result<RequestTicket, FilterFormError> {
        let filter = self.form.submit()?;
        Ok(self.on_filter_change(filter))
    }

    /// Clear the filter, go back to page 1, collapse value selection
    pub fn on_reset_filters(&mut self) -> RequestTicket {
        tracing::info!("Filters reset");
        self.filter = FilterCriteria::new();
        self.pagination.reset();
        self.form.reset();
        self.next_ticket()
    }

    /// Jump to page `n`; None if navigation there is not allowed
    pub fn on_page_change(&mut self, page: u64) -> Option<RequestTicket> {
        if page == self.pagination.current_page() || !self.pagination.go_to(page) {
            return None;
        }
        tracing::debug!("Page {}", page);
        Some(self.next_ticket())
    }

    /// Follow a pagination intent; None at the edges
    pub fn navigate(&mut self, intent: PageIntent) -> Option<RequestTicket> {
        let target = self.pagination.target(intent)?;
        self.on_page_change(target)
    }

    // ─────────────────────────────────────────────────────────────
    // Replies
    // ─────────────────────────────────────────────────────────────

    fn check_ticket(&self, ticket: RequestTicket, what: &str) -> bool {
        if ticket != self.ticket() {
            tracing::debug!(
                "Dropping stale {} reply for {} (current {})",
                what,
                ticket,
                self.ticket()
            );
            return false;
        }
        true
    }

    /// Apply the identifier list for `ticket`
    ///
    /// The list is de-duplicated; a filtered list (which the service does not
    /// paginate) is windowed to the current page. Every slot starts loading.
    pub fn apply_ids(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<ProductId>, ApiError>,
    ) -> ApplyOutcome {
        if !self.check_ticket(ticket, "ids") {
            return ApplyOutcome::Stale;
        }
        let ids = match result {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!("Failed to fetch product ids: {}", e);
                return ApplyOutcome::Failed;
            }
        };

        let raw = ids.len();
        let mut ids = dedupe_ids(ids);
        if !self.filter.is_empty() {
            let offset = self.pagination.offset() as usize;
            let size = self.pagination.page_size() as usize;
            ids = ids.into_iter().skip(offset).take(size).collect();
        }
        tracing::debug!("Page {}: {} ids ({} raw)", self.pagination.current_page(), ids.len(), raw);

        self.products = ids.into_iter().map(ProductSlot::new).collect();
        self.loaded = true;
        ApplyOutcome::Applied
    }

    /// Apply the total-count reply for `ticket`
    pub fn apply_count(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<ProductId>, ApiError>,
    ) -> ApplyOutcome {
        if !self.check_ticket(ticket, "count") {
            return ApplyOutcome::Stale;
        }
        match result {
            Ok(ids) => {
                let page = self.pagination.current_page();
                self.pagination.set_total_count(ids.len() as u64);
                if self.pagination.current_page() != page {
                    tracing::info!(
                        "Page {} no longer exists, moved to page {}",
                        page,
                        self.pagination.current_page()
                    );
                }
                ApplyOutcome::Applied
            }
            Err(e) => {
                tracing::error!("Failed to fetch total product count: {}", e);
                ApplyOutcome::Failed
            }
        }
    }

    /// Apply a detail reply to slot `index`
    pub fn apply_detail(
        &mut self,
        ticket: RequestTicket,
        index: usize,
        id: &ProductId,
        result: Result<Option<Product>, ApiError>,
    ) -> ApplyOutcome {
        if !self.check_ticket(ticket, "detail") {
            return ApplyOutcome::Stale;
        }
        let Some(slot) = self.products.get_mut(index).filter(|s| &s.id == id) else {
            return ApplyOutcome::Stale;
        };
        let failed = result.is_err();
        slot.resolve(result);
        if failed {
            ApplyOutcome::Failed
        } else {
            ApplyOutcome::Applied
        }
    }

    /// Apply the reply to `get_fields(field)`
    ///
    /// Replies issued before the last form reset are dropped.
    pub fn apply_field_values(
        &mut self,
        ticket: RequestTicket,
        field: Field,
        result: Result<Vec<serde_json::Value>, ApiError>,
    ) -> ApplyOutcome {
        if ticket != self.form.values_ticket() {
            tracing::debug!("Dropping stale '{}' values reply for {}", field, ticket);
            return ApplyOutcome::Stale;
        }
        match result {
            Ok(values) => {
                self.form.set_field_values(field, &values);
                ApplyOutcome::Applied
            }
            Err(e) => {
                tracing::error!("Failed to fetch values for field '{}': {}", field, e);
                ApplyOutcome::Failed
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // One-shot loading
    // ─────────────────────────────────────────────────────────────

    /// Fetch ids, count and details for the current state, in order
    ///
    /// Details are fetched with at most `concurrency` requests in flight.
    /// Returns the outcome of the id request.
    pub async fn load(&mut self, client: &ApiClient, concurrency: usize) -> ApplyOutcome {
        let ticket = self.ticket();

        let ids = client.call(&self.ids_request()).await;
        let outcome = self.apply_ids(ticket, ids);
        if outcome != ApplyOutcome::Applied {
            return outcome;
        }

        let count = client.call(&self.count_request()).await;
        self.apply_count(ticket, count);

        let requests = self.detail_requests();
        let results: Vec<_> = stream::iter(requests)
            .map(|(index, id)| async move {
                let result = product::fetch_product(client, &id).await;
                (index, id, result)
            })
            .buffered(concurrency.max(1))
            .collect()
            .await;

        for (index, id, result) in results {
            self.apply_detail(ticket, index, &id, result);
        }
        outcome
    }
}

impl Default for CatalogController {
    fn default() -> Self {
        Self::new(pagination::DEFAULT_PAGE_SIZE, CountStrategy::default())
    }
}

//! Keeps a listing page's filters, its query string and its fetches in step.
//!
//! # Design
//! `FilterSync` owns one page's [`FilterState`]. Every transition that
//! actually changes the state rewrites the query string through the injected
//! [`Navigator`] and hands back a [`FetchTicket`] describing the fetch to
//! run. The host runs it however it likes (blocking, async, on another
//! thread) and reports back with [`FilterSync::resolve`].
//!
//! Fetches are never cancelled. Each ticket carries a sequence number and
//! only a response for the most recently issued ticket is accepted, so a
//! slow stale response can't overwrite a newer one.

use tracing::debug;

use crate::filter::{DrugQuery, FilterState, PrescriptionFilter, SortOrder};
use crate::gateway::Gateway;
use crate::transport::Transport;
use crate::types::Drug;

/// Path of the drug listing page.
pub const DRUGS_PATH: &str = "/drugs";

/// Routing capability handed to pages instead of mutating global location
/// state directly.
pub trait Navigator {
    /// Replace the current location's query string (no leading `?`; empty
    /// clears it).
    fn replace_query(&mut self, query: &str);

    /// Move to another location inside the application.
    fn navigate(&mut self, location: &str);
}

/// A fetch the host should run on behalf of a `FilterSync`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: DrugQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &DrugQuery {
        &self.query
    }
}

#[derive(Debug)]
pub struct FilterSync<N> {
    state: FilterState,
    navigator: N,
    issued: u64,
    accepted: u64,
    results: Option<Vec<Drug>>,
}

impl<N: Navigator> FilterSync<N> {
    /// Seed from the page's query string and issue the initial fetch. The
    /// query string is normalized right away.
    pub fn new(query: &str, navigator: N) -> (Self, FetchTicket) {
        let mut sync = Self {
            state: FilterState::from_query_string(query),
            navigator,
            issued: 0,
            accepted: 0,
            results: None,
        };
        let ticket = sync.publish();
        (sync, ticket)
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Latest accepted results; `None` until the first fetch resolves.
    pub fn results(&self) -> Option<&[Drug]> {
        self.results.as_deref()
    }

    /// Whether the most recently issued fetch is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.accepted != self.issued
    }

    pub fn set_search(&mut self, search: &str) -> Option<FetchTicket> {
        self.update(|s| s.search = search.to_string())
    }

    pub fn toggle_category(&mut self, id: &str) -> Option<FetchTicket> {
        self.update(|s| s.toggle_category(id))
    }

    pub fn set_prescription_filter(&mut self, filter: PrescriptionFilter) -> Option<FetchTicket> {
        self.update(|s| s.prescription_filter = filter)
    }

    pub fn set_sort_by(&mut self, sort: SortOrder) -> Option<FetchTicket> {
        self.update(|s| s.sort_by = sort)
    }

    /// Reset every filter at once: one query rewrite, one fetch.
    pub fn clear_filters(&mut self) -> Option<FetchTicket> {
        self.update(|s| *s = FilterState::default())
    }

    /// Accept `drugs` as the page's results if `ticket` is the latest one
    /// issued. Returns whether the response was kept.
    pub fn resolve(&mut self, ticket: FetchTicket, drugs: Vec<Drug>) -> bool {
        if ticket.seq != self.issued {
            debug!(
                stale = ticket.seq,
                latest = self.issued,
                "discarding superseded response"
            );
            return false;
        }
        self.accepted = ticket.seq;
        self.results = Some(drugs);
        true
    }

    /// Run `ticket` through `gateway` on the current thread and resolve it.
    pub fn fetch<T: Transport>(&mut self, ticket: FetchTicket, gateway: &Gateway<T>) -> bool {
        let drugs = gateway.list_drugs(ticket.query());
        self.resolve(ticket, drugs)
    }

    fn update(&mut self, change: impl FnOnce(&mut FilterState)) -> Option<FetchTicket> {
        let before = self.state.clone();
        change(&mut self.state);
        if self.state == before {
            return None;
        }
        Some(self.publish())
    }

    fn publish(&mut self) -> FetchTicket {
        let query = self.state.to_query_string();
        debug!(query = %query, "rewriting query string");
        self.navigator.replace_query(&query);
        self.issued += 1;
        FetchTicket {
            seq: self.issued,
            query: self.state.to_drug_query(),
        }
    }
}

/// Global search box: go to the drug listing seeded with `text`. Blank input
/// does nothing. Returns whether navigation happened.
pub fn submit_search<N: Navigator + ?Sized>(text: &str, navigator: &mut N) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    navigator.navigate(&format!("{DRUGS_PATH}?search={}", urlencoding::encode(text)));
    true
}

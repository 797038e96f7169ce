//! Filter configuration for drug listings and its two representations.
//!
//! # Design
//! A listing page's filters exist in three shapes:
//! - [`FilterState`]: what the user selected, owned by the page.
//! - The shareable query string (`search`, `categories`, `prescription`,
//!   `sort`), which lists only the fields that differ from the defaults.
//! - [`DrugQuery`]: the configuration forwarded to `GET /drugs`, using the
//!   API's own parameter names (`prescriptionFilter`, `sortBy`, ...).
//!
//! Decoding a query string seeds `search` only; categories, prescription and
//! sort start from their defaults on every page load.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseFilterError;
use crate::http::{decode_query, encode_query};

/// Which drugs to include by prescription requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrescriptionFilter {
    #[default]
    All,
    Prescription,
    Otc,
}

impl PrescriptionFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            PrescriptionFilter::All => "all",
            PrescriptionFilter::Prescription => "prescription",
            PrescriptionFilter::Otc => "otc",
        }
    }
}

impl FromStr for PrescriptionFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(PrescriptionFilter::All),
            "prescription" => Ok(PrescriptionFilter::Prescription),
            "otc" => Ok(PrescriptionFilter::Otc),
            other => Err(ParseFilterError {
                kind: "prescription filter",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PrescriptionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result ordering requested from the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    /// Category name, then drug name.
    Category,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::NameAsc => "name_asc",
            SortOrder::NameDesc => "name_desc",
            SortOrder::Category => "category",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name_asc" => Ok(SortOrder::NameAsc),
            "name_desc" => Ok(SortOrder::NameDesc),
            "category" => Ok(SortOrder::Category),
            other => Err(ParseFilterError {
                kind: "sort order",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options forwarded to `GET /drugs`. `None` and empty fields are omitted
/// from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrugQuery {
    pub search: Option<String>,
    /// Category ids; a drug matches if it is in any of them.
    pub categories: Vec<String>,
    pub prescription_filter: Option<PrescriptionFilter>,
    pub sort_by: Option<SortOrder>,
    pub limit: Option<u32>,
}

impl DrugQuery {
    /// Only cap the number of results.
    pub fn limited(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Query parameters in API spelling, in a fixed order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("search".to_string(), search.to_string()));
        }
        if !self.categories.is_empty() {
            params.push(("categories".to_string(), self.categories.join(",")));
        }
        if let Some(filter) = self.prescription_filter {
            params.push(("prescriptionFilter".to_string(), filter.as_str().to_string()));
        }
        if let Some(sort) = self.sort_by {
            params.push(("sortBy".to_string(), sort.as_str().to_string()));
        }
        params
    }
}

/// The filters a user has selected on a drug listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    /// Selected category ids in selection order, without duplicates.
    pub selected_categories: Vec<String>,
    pub prescription_filter: PrescriptionFilter,
    pub sort_by: SortOrder,
}

impl FilterState {
    /// Seed a state from a page's query string. Only `search` is read.
    pub fn from_query_string(query: &str) -> Self {
        let search = decode_query(query)
            .into_iter()
            .find(|(k, _)| k == "search")
            .map(|(_, v)| v)
            .unwrap_or_default();
        Self {
            search,
            ..Self::default()
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// The search text, or `None` when it is blank after trimming.
    pub fn effective_search(&self) -> Option<&str> {
        if self.search.trim().is_empty() {
            None
        } else {
            Some(&self.search)
        }
    }

    /// Add `id` to the selection when absent, remove it when present.
    pub fn toggle_category(&mut self, id: &str) {
        if let Some(pos) = self.selected_categories.iter().position(|c| c == id) {
            self.selected_categories.remove(pos);
        } else {
            self.selected_categories.push(id.to_string());
        }
    }

    /// Shareable parameters: only fields that differ from the default.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.effective_search() {
            pairs.push(("search", search.to_string()));
        }
        if !self.selected_categories.is_empty() {
            pairs.push(("categories", self.selected_categories.join(",")));
        }
        if self.prescription_filter != PrescriptionFilter::default() {
            pairs.push(("prescription", self.prescription_filter.as_str().to_string()));
        }
        if self.sort_by != SortOrder::default() {
            pairs.push(("sort", self.sort_by.as_str().to_string()));
        }
        pairs
    }

    /// Percent-encoded query string without a leading `?`; empty for the
    /// default state.
    pub fn to_query_string(&self) -> String {
        encode_query(&self.to_query_pairs())
    }

    /// The full configuration to fetch with.
    pub fn to_drug_query(&self) -> DrugQuery {
        DrugQuery {
            search: self.effective_search().map(str::to_string),
            categories: self.selected_categories.clone(),
            prescription_filter: Some(self.prescription_filter),
            sort_by: Some(self.sort_by),
            limit: None,
        }
    }
}

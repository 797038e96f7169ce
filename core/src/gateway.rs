//! Typed read operations over a `Transport`, with the catalog's failure
//! policy applied.
//!
//! # Design
//! List operations collapse every failure into an empty `Vec`: a listing
//! renders "fetch failed" and "no results" the same way. Single-entity
//! lookups return the `ApiError` so a detail page can tell "not found" apart
//! from "still loading". Either way the failure is logged here, once, and
//! never retried.

use tracing::{debug, warn};

use crate::client::CatalogClient;
use crate::config::GatewayConfig;
use crate::error::ApiError;
use crate::filter::DrugQuery;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Category, CategoryId, Drug, DrugId};

#[derive(Debug, Clone)]
pub struct Gateway<T> {
    client: CatalogClient,
    transport: T,
}

impl Gateway<UreqTransport> {
    /// Gateway over a fresh blocking `ureq` transport.
    pub fn connect(config: &GatewayConfig) -> Self {
        Self::new(config, UreqTransport::new())
    }
}

impl<T: Transport> Gateway<T> {
    pub fn new(config: &GatewayConfig, transport: T) -> Self {
        Self {
            client: CatalogClient::new(config.base_url()),
            transport,
        }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// The featured drugs, capped at [`TOP_DRUGS_LIMIT`](crate::client::TOP_DRUGS_LIMIT).
    pub fn list_top_drugs(&self) -> Vec<Drug> {
        let request = self.client.build_list_top_drugs();
        let result = self.fetch(request, |c, r| c.parse_list_drugs(r));
        or_empty("list_top_drugs", result)
    }

    pub fn list_categories(&self) -> Vec<Category> {
        let request = self.client.build_list_categories();
        let result = self.fetch(request, |c, r| c.parse_list_categories(r));
        or_empty("list_categories", result)
    }

    /// Drugs matching `query`. Filtering and ordering are the server's; the
    /// response is returned as received.
    pub fn list_drugs(&self, query: &DrugQuery) -> Vec<Drug> {
        let request = self.client.build_list_drugs(query);
        let result = self.fetch(request, |c, r| c.parse_list_drugs(r));
        or_empty("list_drugs", result)
    }

    pub fn get_drug(&self, id: DrugId) -> Result<Drug, ApiError> {
        let request = self.client.build_get_drug(id);
        self.fetch(request, |c, r| c.parse_get_drug(r))
            .inspect_err(|e| warn!(drug_id = id, error = %e, "get_drug failed"))
    }

    pub fn get_category(&self, id: CategoryId) -> Result<Category, ApiError> {
        let request = self.client.build_get_category(id);
        self.fetch(request, |c, r| c.parse_get_category(r))
            .inspect_err(|e| warn!(category_id = id, error = %e, "get_category failed"))
    }

    pub fn list_drugs_by_category(&self, id: CategoryId) -> Vec<Drug> {
        let request = self.client.build_list_drugs_by_category(id);
        self.fetch(request, |c, r| c.parse_list_drugs(r))
            .unwrap_or_else(|e| {
                warn!(category_id = id, error = %e, "list_drugs_by_category failed");
                Vec::new()
            })
    }

    fn fetch<R>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(&CatalogClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url(), "sending request");
        let response = self.transport.execute(&request)?;
        parse(&self.client, response)
    }
}

fn or_empty<R>(operation: &'static str, result: Result<Vec<R>, ApiError>) -> Vec<R> {
    result.unwrap_or_else(|e| {
        warn!(operation, error = %e, "request failed, returning no results");
        Vec::new()
    })
}

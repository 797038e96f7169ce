//! Client core for the pharmaceutical reference catalog.
//!
//! # Overview
//! Two pieces sit between a catalog front-end and the remote read-only API:
//! - the gateway: typed read operations for drugs and categories, with list
//!   lookups degrading to empty results and detail lookups surfacing errors;
//! - the filter synchronizer: a listing page's filters kept in step with its
//!   shareable query string and with the fetches they trigger.
//!
//! # Design
//! - `CatalogClient` is stateless and never touches the network: it builds
//!   `HttpRequest` values and parses `HttpResponse` values (host-does-IO).
//! - `Transport` is the only I/O seam; `UreqTransport` is the blocking
//!   implementation and `Gateway` composes it with the client.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod http;
pub mod sync;
pub mod transport;
pub mod types;

pub use client::{CatalogClient, TOP_DRUGS_LIMIT};
pub use config::GatewayConfig;
pub use error::{ApiError, ConfigError, ParseFilterError};
pub use filter::{DrugQuery, FilterState, PrescriptionFilter, SortOrder};
pub use gateway::Gateway;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use sync::{submit_search, FetchTicket, FilterSync, Navigator};
pub use transport::{Transport, UreqTransport};
pub use types::{Category, CategoryId, Drug, DrugId, Interaction};

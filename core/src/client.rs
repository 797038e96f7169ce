//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and carries no mutable state
//! between calls. Each read operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping the
//! core deterministic and free of I/O.
//!
//! List parsers accept a JSON `null` body as an empty list; the API encodes
//! an empty result set that way.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::filter::DrugQuery;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Category, CategoryId, Drug, DrugId};

/// Number of drugs shown in the featured listing.
pub const TOP_DRUGS_LIMIT: u32 = 6;

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    /// `base_url` is the API root, e.g. `http://localhost:8000/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_top_drugs(&self) -> HttpRequest {
        self.build_list_drugs(&DrugQuery::limited(TOP_DRUGS_LIMIT))
    }

    pub fn build_list_categories(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/categories", self.base_url))
    }

    pub fn build_list_drugs(&self, query: &DrugQuery) -> HttpRequest {
        let mut req = HttpRequest::get(format!("{}/drugs", self.base_url));
        req.query = query.to_params();
        req
    }

    pub fn build_get_drug(&self, id: DrugId) -> HttpRequest {
        HttpRequest::get(format!("{}/drugs/{id}", self.base_url))
    }

    pub fn build_get_category(&self, id: CategoryId) -> HttpRequest {
        HttpRequest::get(format!("{}/categories/{id}", self.base_url))
    }

    pub fn build_list_drugs_by_category(&self, id: CategoryId) -> HttpRequest {
        HttpRequest::get(format!("{}/categories/{id}/drugs", self.base_url))
    }

    pub fn parse_list_drugs(&self, response: HttpResponse) -> Result<Vec<Drug>, ApiError> {
        parse_list(response)
    }

    pub fn parse_list_categories(&self, response: HttpResponse) -> Result<Vec<Category>, ApiError> {
        parse_list(response)
    }

    pub fn parse_get_drug(&self, response: HttpResponse) -> Result<Drug, ApiError> {
        parse_one(response)
    }

    pub fn parse_get_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        parse_one(response)
    }
}

fn parse_one<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn parse_list<T: DeserializeOwned>(response: HttpResponse) -> Result<Vec<T>, ApiError> {
    check_status(&response)?;
    let items: Option<Vec<T>> =
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    Ok(items.unwrap_or_default())
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{PrescriptionFilter, SortOrder};
    use crate::http::HttpMethod;

    fn client() -> CatalogClient {
        CatalogClient::new("http://localhost:8000/api")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_top_drugs_caps_at_six() {
        let req = client().build_list_top_drugs();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url(), "http://localhost:8000/api/drugs?limit=6");
    }

    #[test]
    fn build_list_categories_produces_correct_request() {
        let req = client().build_list_categories();
        assert_eq!(req.path, "http://localhost:8000/api/categories");
        assert!(req.query.is_empty());
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_list_drugs_forwards_filters() {
        let query = DrugQuery {
            search: Some("statin".to_string()),
            categories: vec!["2".to_string(), "7".to_string()],
            prescription_filter: Some(PrescriptionFilter::Prescription),
            sort_by: Some(SortOrder::Category),
            limit: None,
        };
        let req = client().build_list_drugs(&query);
        assert_eq!(req.query_param("search"), Some("statin"));
        assert_eq!(req.query_param("categories"), Some("2,7"));
        assert_eq!(req.query_param("prescriptionFilter"), Some("prescription"));
        assert_eq!(req.query_param("sortBy"), Some("category"));
        assert_eq!(req.query_param("limit"), None);
    }

    #[test]
    fn build_detail_routes() {
        let c = client();
        assert_eq!(c.build_get_drug(42).url(), "http://localhost:8000/api/drugs/42");
        assert_eq!(c.build_get_category(3).url(), "http://localhost:8000/api/categories/3");
        assert_eq!(
            c.build_list_drugs_by_category(3).url(),
            "http://localhost:8000/api/categories/3/drugs"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CatalogClient::new("http://localhost:8000/api/");
        assert_eq!(client.build_list_categories().path, "http://localhost:8000/api/categories");
    }

    #[test]
    fn parse_list_drugs_success() {
        let drugs = client()
            .parse_list_drugs(ok(
                r#"[{"id":1,"name":"Ibuprofen","description":"NSAID","category":"Analgesics","category_id":2,"requires_prescription":false}]"#,
            ))
            .unwrap();
        assert_eq!(drugs.len(), 1);
        assert_eq!(drugs[0].name, "Ibuprofen");
    }

    #[test]
    fn parse_list_null_body_is_empty() {
        assert!(client().parse_list_drugs(ok("null")).unwrap().is_empty());
        assert!(client().parse_list_categories(ok("null")).unwrap().is_empty());
    }

    #[test]
    fn parse_get_drug_not_found() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: "Drug not found\n".to_string(),
        };
        let err = client().parse_get_drug(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_get_category_server_error() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_get_category(response).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[test]
    fn parse_list_categories_bad_json() {
        let err = client().parse_list_categories(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}

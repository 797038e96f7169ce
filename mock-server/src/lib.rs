use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

pub mod catalog;

pub use catalog::Catalog;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Drug {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category_id: u64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug_class: Option<String>,
    pub requires_prescription: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub side_effects: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_side_effects: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub serious_side_effects: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rare_side_effects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<Interaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contraindications: Option<Contraindications>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanism_of_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pharmacokinetics: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_life: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset_of_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_of_administration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pregnancy_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pregnancy_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lactation_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_info: Option<String>,
}

/// Older records store contraindications as one free-text string, newer ones
/// as a list; both shapes go out on the wire as stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contraindications {
    One(String),
    Many(Vec<String>),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Interaction {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub drug_count: u64,
}

/// Query parameters accepted by `GET /api/drugs`. Values are kept as raw
/// strings; malformed ones are ignored rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub categories: Option<String>,
    #[serde(rename = "prescriptionFilter")]
    pub prescription_filter: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub limit: Option<String>,
}

pub type Db = Arc<Catalog>;

/// Router over the seeded catalog.
pub fn app() -> Router {
    app_with(Catalog::seeded())
}

/// Router over `catalog`, with every route under `/api`.
pub fn app_with(catalog: Catalog) -> Router {
    let db: Db = Arc::new(catalog);
    let api = Router::new()
        .route("/drugs", get(list_drugs))
        .route("/drugs/{id}", get(get_drug))
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(get_category))
        .route("/categories/{id}/drugs", get(list_drugs_by_category))
        .with_state(db);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);
    Router::new().nest("/api", api).layer(cors)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_drugs(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<Drug>> {
    debug!(?params, "listing drugs");
    Json(db.list_drugs(&params))
}

async fn get_drug(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Drug>, (StatusCode, &'static str)> {
    db.drug(id)
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Drug not found"))
}

async fn list_categories(State(db): State<Db>) -> Json<Vec<Category>> {
    Json(db.categories())
}

async fn get_category(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Category>, (StatusCode, &'static str)> {
    db.category(id)
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Category not found"))
}

async fn list_drugs_by_category(State(db): State<Db>, Path(id): Path<u64>) -> Json<Vec<Drug>> {
    Json(db.drugs_in_category(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_clinical_fields_are_omitted() {
        let drug = Drug {
            id: 1,
            name: "Test".to_string(),
            category_id: 2,
            category: "Analgesics".to_string(),
            ..Drug::default()
        };
        let json = serde_json::to_value(&drug).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["requires_prescription"], false);
        assert!(json.get("dosage").is_none());
        assert!(json.get("interactions").is_none());
        assert!(json.get("contraindications").is_none());
    }

    #[test]
    fn contraindications_serialize_in_stored_shape() {
        let one = serde_json::to_value(Contraindications::One("Liver disease".to_string())).unwrap();
        let many = serde_json::to_value(Contraindications::Many(vec!["Asthma".to_string()])).unwrap();
        assert_eq!(one, serde_json::json!("Liver disease"));
        assert_eq!(many, serde_json::json!(["Asthma"]));
    }

    #[test]
    fn list_params_use_api_spelling() {
        let params: ListParams = serde_json::from_str(
            r#"{"prescriptionFilter":"otc","sortBy":"name_desc","limit":"3"}"#,
        )
        .unwrap();
        assert_eq!(params.prescription_filter.as_deref(), Some("otc"));
        assert_eq!(params.sort_by.as_deref(), Some("name_desc"));
        assert_eq!(params.limit.as_deref(), Some("3"));
        assert!(params.search.is_none());
    }
}

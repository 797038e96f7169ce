use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Category, Drug};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn names(drugs: &[Drug]) -> Vec<&str> {
    drugs.iter().map(|d| d.name.as_str()).collect()
}

// --- drugs ---

#[tokio::test]
async fn list_drugs_defaults_to_name_order() {
    let resp = app().oneshot(get("/api/drugs")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let drugs: Vec<Drug> = body_json(resp).await;
    assert_eq!(drugs.len(), 10);
    assert_eq!(drugs[0].name, "Acetaminophen");
    assert_eq!(drugs[9].name, "Vicoprofen");
}

#[tokio::test]
async fn list_drugs_with_limit() {
    let resp = app().oneshot(get("/api/drugs?limit=6")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let drugs: Vec<Drug> = body_json(resp).await;
    assert_eq!(drugs.len(), 6);
}

#[tokio::test]
async fn list_drugs_search_and_otc() {
    let resp = app()
        .oneshot(get(
            "/api/drugs?search=ibuprofen&prescriptionFilter=otc&sortBy=name_asc",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let drugs: Vec<Drug> = body_json(resp).await;
    assert_eq!(names(&drugs), vec!["Advil", "Ibuprofen"]);
    assert!(drugs.iter().all(|d| !d.requires_prescription));
}

#[tokio::test]
async fn list_drugs_encoded_category_list() {
    let resp = app()
        .oneshot(get("/api/drugs?categories=3%2C4&sortBy=name_desc"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let drugs: Vec<Drug> = body_json(resp).await;
    assert_eq!(
        names(&drugs),
        vec!["Loratadine", "Lisinopril", "Cetirizine", "Atorvastatin"]
    );
}

#[tokio::test]
async fn list_drugs_no_match_is_empty_array() {
    let resp = app().oneshot(get("/api/drugs?search=unobtainium")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"[]");
}

#[tokio::test]
async fn get_drug_returns_full_record() {
    let resp = app().oneshot(get("/api/drugs/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let drug: serde_json::Value = body_json(resp).await;
    assert_eq!(drug["name"], "Ibuprofen");
    assert_eq!(drug["category"], "Analgesics");
    assert_eq!(drug["interactions"][0]["severity"], "Major");
    assert_eq!(drug["side_effects"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn get_drug_string_contraindications() {
    let resp = app().oneshot(get("/api/drugs/2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let drug: serde_json::Value = body_json(resp).await;
    assert_eq!(drug["contraindications"], "Severe hepatic impairment");
}

#[tokio::test]
async fn get_drug_not_found() {
    let resp = app().oneshot(get("/api/drugs/9999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(&body_bytes(resp).await[..], b"Drug not found");
}

#[tokio::test]
async fn get_drug_bad_id_returns_400() {
    let resp = app().oneshot(get("/api/drugs/not-a-number")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- categories ---

#[tokio::test]
async fn list_categories_with_counts() {
    let resp = app().oneshot(get("/api/categories")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let categories: Vec<Category> = body_json(resp).await;
    let summary: Vec<_> = categories
        .iter()
        .map(|c| (c.name.as_str(), c.drug_count))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Analgesics", 4),
            ("Antibiotics", 2),
            ("Antihistamines", 2),
            ("Cardiovascular", 2),
        ]
    );
}

#[tokio::test]
async fn get_category_found_and_missing() {
    let resp = app().oneshot(get("/api/categories/2")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let category: Category = body_json(resp).await;
    assert_eq!(category.name, "Antibiotics");

    let resp = app().oneshot(get("/api/categories/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_drugs_by_category() {
    let resp = app().oneshot(get("/api/categories/3/drugs")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let drugs: Vec<Drug> = body_json(resp).await;
    assert_eq!(names(&drugs), vec!["Atorvastatin", "Lisinopril"]);
}

#[tokio::test]
async fn unknown_category_has_no_drugs() {
    let resp = app().oneshot(get("/api/categories/42/drugs")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let drugs: Vec<Drug> = body_json(resp).await;
    assert!(drugs.is_empty());
}

// --- cors ---

#[tokio::test]
async fn cors_allows_any_origin() {
    let req = Request::builder()
        .uri("/api/categories")
        .header("origin", "http://localhost:3000")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

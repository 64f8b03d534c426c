use std::collections::HashMap;
use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use ehr_service::api;
use ehr_service::db::FixtureStore;
use ehr_service::query::{QueryOptions, RecordService};
use fake::faker::lorem::en::Word;
use fake::Fake;
use serde_json::{json, Value};
use test_case::test_case;

fn service() -> web::Data<RecordService> {
    let store = FixtureStore::seeded().expect("seeded store");
    web::Data::new(RecordService::new(Arc::new(store), QueryOptions::default()))
}

macro_rules! app {
    () => {
        test::init_service(App::new().app_data(service()).configure(api::configure)).await
    };
}

fn complete_order() -> Value {
    json!({
        "patient_id": "12345",
        "medication": "Empagliflozin",
        "dose": "10 mg",
        "route": "PO",
        "frequency": "daily"
    })
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = app!();
    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_web::test]
async fn summary_returns_patient_record_and_key_labs() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/patients/12345/summary")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["demographics"]["name"], "Jordan Matthews");
    assert_eq!(
        body["problems"],
        json!(["Type 2 diabetes mellitus", "CKD stage 3", "Hypertension"])
    );
    assert_eq!(
        body["medications"],
        json!(["Metformin 1000 mg BID", "Lisinopril 20 mg daily"])
    );
    assert_eq!(body["vitals"]["updated_at"], "2024-09-12T09:45:00");
    assert_eq!(body["last_a1c"], 7.4);
    assert_eq!(body["last_egfr"], 54.0);
}

#[test_case("/patients/00000/summary" ; "summary")]
#[test_case("/patients/00000/labs" ; "labs")]
#[test_case("/patients/00000/labs?names=HbA1c&last_n=2" ; "labs with filters")]
#[actix_web::test]
async fn unknown_patient_is_404(uri: &str) {
    let app = app!();
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "detail": "Patient not found" }));
}

#[actix_web::test]
async fn labs_are_newest_first() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/patients/12873/labs")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["patient_id"], "12873");
    let stamps: Vec<&str> = body["labs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|lab| lab["collected_at"].as_str().unwrap())
        .collect();
    assert_eq!(stamps.len(), 6);
    assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
}

#[actix_web::test]
async fn labs_filter_by_name() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/patients/12345/labs?names=hba1c")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let labs = body["labs"].as_array().unwrap();
    assert_eq!(labs.len(), 2);
    assert!(labs.iter().all(|lab| lab["name"] == "HbA1c"));
    assert_eq!(labs[0]["value"], 7.4);
}

#[test_case(1 ; "one")]
#[test_case(2 ; "two")]
#[actix_web::test]
async fn labs_cap_per_test_name(last_n: usize) {
    let app = app!();
    let req = test::TestRequest::get()
        .uri(&format!("/patients/12873/labs?names=HbA1c,eGFR&last_n={last_n}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for lab in body["labs"].as_array().unwrap() {
        *counts
            .entry(lab["name"].as_str().unwrap().to_string())
            .or_default() += 1;
    }
    assert_eq!(counts.get("HbA1c"), Some(&last_n));
    assert_eq!(counts.get("eGFR"), Some(&last_n));
}

#[actix_web::test]
async fn labs_for_patient_without_history_are_empty() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/patients/13002/labs")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "patient_id": "13002", "labs": [] }));
}

#[actix_web::test]
async fn labs_reject_non_positive_last_n() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/patients/12345/labs?last_n=0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "last_n must be greater than zero");
}

#[actix_web::test]
async fn labs_reject_non_integer_last_n() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/patients/12345/labs?last_n=three")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"]["last_n"], json!(["must be an integer"]));
}

#[actix_web::test]
async fn complete_order_gets_draft_acknowledgement() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/orders/medication")
        .set_json(complete_order())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "draft");
    let order_id = body["order_id"].as_str().unwrap();
    assert!(order_id.starts_with("draft-") && order_id.len() > "draft-".len());
    assert_eq!(body["order"], complete_order());
}

#[actix_web::test]
async fn drug_is_accepted_as_medication_alias() {
    let app = app!();
    let drug: String = Word().fake();
    let mut payload = complete_order();
    let fields = payload.as_object_mut().unwrap();
    fields.remove("medication");
    fields.insert("drug".into(), json!(drug));

    let req = test::TestRequest::post()
        .uri("/orders/medication")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["order"]["medication"], json!(drug));
}

#[actix_web::test]
async fn order_missing_drug_is_400_with_field_detail() {
    let app = app!();
    let mut payload = complete_order();
    payload.as_object_mut().unwrap().remove("medication");

    let req = test::TestRequest::post()
        .uri("/orders/medication")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Missing required fields: medication");
    assert_eq!(body["fields"]["medication"], json!(["field is required"]));
}

#[actix_web::test]
async fn mistyped_order_field_is_400_with_field_detail() {
    let app = app!();
    let mut payload = complete_order();
    payload["dose"] = json!(500);

    let req = test::TestRequest::post()
        .uri("/orders/medication")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().starts_with("Invalid dose:"));
    let messages = body["fields"]["dose"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].as_str().unwrap().contains("invalid type: integer `500`"));
}

#[actix_web::test]
async fn non_object_order_is_400() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/orders/medication")
        .set_json(json!([1, 2, 3]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unparseable_order_body_is_400() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/orders/medication")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"patient_id\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().starts_with("Invalid JSON body"));
    assert!(body.get("fields").is_none());
}

#[actix_web::test]
async fn order_without_json_content_type_is_400() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/orders/medication")
        .insert_header((header::CONTENT_TYPE, "text/plain"))
        .set_payload("patient_id=12345")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn empty_evidence_query_returns_everything() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/evidence/search")
        .set_json(json!({}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["items"].as_array().unwrap().len(), 6);
    assert_eq!(body["guideline_ids"], json!(["ADA-2024-DM2", "KDIGO-2022-DKD"]));
    assert_eq!(body["rct_ids"], json!(["NCT01234567", "NCT07654321"]));
    assert_eq!(body["nearby_trials"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn evidence_geo_filter_drops_distant_trials() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/evidence/search")
        .set_json(json!({
            "condition": "type 2 diabetes",
            "comorbidity": "CKD",
            "geo": { "radius_km": 25 }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let items = body["items"].as_array().unwrap();
    assert!(!items.is_empty());
    assert!(items
        .iter()
        .all(|item| item["distance_km"].as_f64().map_or(true, |d| d <= 25.0)));
    assert_eq!(
        body["nearby_trials"],
        json!([{
            "id": "NCT05566789",
            "name": "Renal Outcomes in Diabetes",
            "distance_km": 12.4,
            "eligibility_summary": "Adults 40-75 with type 2 diabetes and eGFR 45-60"
        }])
    );
}

#[test_case(json!({ "geo": { "radius_km": -3 } }), "geo.radius_km" ; "negative radius")]
#[test_case(json!({ "geo": { "radius_km": "far" } }), "geo.radius_km" ; "non numeric radius")]
#[test_case(json!({ "geo": {} }), "geo" ; "missing radius")]
#[test_case(json!({ "query": 42 }), "query" ; "non string query")]
#[actix_web::test]
async fn evidence_rejects_bad_request_fields(payload: Value, field: &str) {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/evidence/search")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let fields = body["fields"].as_object().unwrap();
    assert_eq!(fields.keys().collect::<Vec<_>>(), vec![field]);
}

#[actix_web::test]
async fn cors_allows_configured_origin() {
    let origins = vec!["http://agent.test".to_string()];
    let app = test::init_service(
        App::new()
            .app_data(service())
            .wrap(api::middleware::cors(&origins))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header((header::ORIGIN, "http://agent.test"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://agent.test")
    );
}

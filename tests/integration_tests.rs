// Integration tests for Skillmatch

use actix_web::{http::StatusCode, test, App};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use skillmatch::config::{MatchingSettings, ServerSettings};
use skillmatch::core::{MatchMode, RecommendationEngine, ScoringStrategy, SkillExtractor};
use skillmatch::models::{JobRecord, SkillDictionary};
use skillmatch::routes::{configure_app, AppState};
use std::sync::Arc;

fn create_test_job(title: &str, skills: &[&str], day: Option<u32>) -> JobRecord {
    let mut job = JobRecord::new(title, "Acme", skills);
    job.location = Some("Remote".to_string());
    job.remote_type = Some("Remote".to_string());
    job.employment_type = Some("Full-time".to_string());
    job.seniority_level = Some("Associate".to_string());
    job.posted_date = day.map(|d| Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap());
    job
}

fn create_test_catalog() -> Vec<JobRecord> {
    vec![
        create_test_job("Frontend Engineer", &["javascript", "react"], Some(1)),
        create_test_job("Backend Developer", &["node", "sql"], Some(3)),
        create_test_job("Data Intern", &["python"], None),
        create_test_job("Full Stack", &["javascript", "react", "node", "python"], Some(2)),
    ]
}

fn create_app_state(engine: RecommendationEngine) -> AppState {
    let dictionary = SkillDictionary::new(["javascript", "react", "node", "python"]).unwrap();
    AppState {
        extractor: Arc::new(SkillExtractor::new(dictionary, MatchMode::Substring).unwrap()),
        catalog: Arc::new(create_test_catalog()),
        engine,
        matching: MatchingSettings::default(),
    }
}

#[actix_web::test]
async fn test_integration_text_to_recommendations() {
    let state = create_app_state(RecommendationEngine::default());
    let text = "Experienced React and Node developer, also knows Python.";

    let matched = state.extractor.extract(text);
    let outcome = state.engine.recommend(&matched, &state.catalog);
    let ranked = outcome.ranked();

    let titles: Vec<&str> = ranked.iter().map(|r| r.job.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Data Intern", "Full Stack", "Backend Developer", "Frontend Engineer"]
    );
    assert_eq!(ranked[0].score, 100);
    assert_eq!(ranked[1].score, 75);
    assert_eq!(ranked[2].score, 50);
    assert_eq!(ranked[3].score, 50);

    for i in 1..ranked.len() {
        assert!(ranked[i - 1].score >= ranked[i].score, "Recommendations not sorted by score");
    }
}

#[actix_web::test]
async fn test_recommend_endpoint() {
    let app = test::init_service(App::new().configure(configure_app(
        create_app_state(RecommendationEngine::default()),
        &ServerSettings::default(),
    )))
    .await;

    let req = test::TestRequest::post()
        .uri("/recommend")
        .set_json(json!({ "skills": ["React"] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let results = body["results"].as_array().unwrap();
    assert_eq!(body["total_results"], 4);
    assert_eq!(results[0]["title"], "Frontend Engineer");
    assert_eq!(results[0]["score"], 50);
    assert_eq!(results[0]["matched_skills"], json!(["react"]));
    assert_eq!(results[0]["remote_type"], "Remote");
    assert_eq!(results[0]["posted_date"], "2024-05-01T00:00:00Z");
}

#[actix_web::test]
async fn test_recommend_respects_limit() {
    let app = test::init_service(App::new().configure(configure_app(
        create_app_state(RecommendationEngine::default()),
        &ServerSettings::default(),
    )))
    .await;

    let req = test::TestRequest::post()
        .uri("/recommend")
        .set_json(json!({ "skills": ["node"], "limit": 1 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["title"], "Backend Developer");
    assert_eq!(body["total_results"], 4);
}

#[actix_web::test]
async fn test_recommend_caps_large_limit() {
    let app = test::init_service(App::new().configure(configure_app(
        create_app_state(RecommendationEngine::default()),
        &ServerSettings::default(),
    )))
    .await;

    let req = test::TestRequest::post()
        .uri("/recommend")
        .set_json(json!({ "skills": ["node"], "limit": 70_000 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 4);
}

#[actix_web::test]
async fn test_recommend_without_skills_returns_notice() {
    let app = test::init_service(App::new().configure(configure_app(
        create_app_state(RecommendationEngine::default()),
        &ServerSettings::default(),
    )))
    .await;

    for payload in [json!({ "skills": [] }), json!({})] {
        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(payload)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0]["message"]
            .as_str()
            .unwrap()
            .contains("No skills detected"));
        assert!(results[0].get("score").is_none());
    }
}

#[actix_web::test]
async fn test_recommend_rejects_non_list_skills() {
    let app = test::init_service(App::new().configure(configure_app(
        create_app_state(RecommendationEngine::default()),
        &ServerSettings::default(),
    )))
    .await;

    let req = test::TestRequest::post()
        .uri("/recommend")
        .set_json(json!({ "skills": "react" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status_code"], 400);
}

#[actix_web::test]
async fn test_recommend_rejects_oversized_body() {
    let server = ServerSettings {
        max_body_bytes: 64,
        ..ServerSettings::default()
    };
    let app = test::init_service(App::new().configure(configure_app(
        create_app_state(RecommendationEngine::default()),
        &server,
    )))
    .await;

    let skills: Vec<String> = (0..100).map(|i| format!("skill{}", i)).collect();
    let req = test::TestRequest::post()
        .uri("/recommend")
        .set_json(json!({ "skills": skills }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "payload_too_large");
}

#[actix_web::test]
async fn test_extract_endpoint() {
    let app = test::init_service(App::new().configure(configure_app(
        create_app_state(RecommendationEngine::default()),
        &ServerSettings::default(),
    )))
    .await;

    let req = test::TestRequest::post()
        .uri("/extract")
        .set_json(json!({ "text": "Experienced React and Node developer, also knows Python." }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["skills"], json!(["react", "node", "python"]));
}

#[actix_web::test]
async fn test_resume_endpoint_rejects_non_pdf() {
    let app = test::init_service(App::new().configure(configure_app(
        create_app_state(RecommendationEngine::default()),
        &ServerSettings::default(),
    )))
    .await;

    let req = test::TestRequest::post()
        .uri("/resume")
        .insert_header(("content-type", "application/pdf"))
        .set_payload("plain text, not a pdf")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Please upload a PDF file.");
}

#[actix_web::test]
async fn test_resume_endpoint_ranks_pdf_upload() {
    let app = test::init_service(App::new().configure(configure_app(
        create_app_state(RecommendationEngine::default()),
        &ServerSettings::default(),
    )))
    .await;

    let pdf = std::fs::read(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/resume.pdf"))
        .unwrap();
    let req = test::TestRequest::post()
        .uri("/resume?limit=2")
        .insert_header(("content-type", "application/pdf"))
        .set_payload(pdf)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["skills"], json!(["react", "node", "python"]));
    assert!(body["text"].as_str().unwrap().contains("React"));
    assert_eq!(body["total_results"], 4);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "Data Intern");
    assert_eq!(results[0]["score"], 100);
    assert_eq!(results[1]["title"], "Full Stack");
    assert_eq!(results[1]["score"], 75);
}

#[actix_web::test]
async fn test_resume_endpoint_rejects_corrupt_pdf() {
    let app = test::init_service(App::new().configure(configure_app(
        create_app_state(RecommendationEngine::default()),
        &ServerSettings::default(),
    )))
    .await;

    let bodies: [&[u8]; 3] = [
        b"%PDF-1.4\ngarbage garbage",
        b"%PDF-",
        b"%PDF-1.7\n1 0 obj << /Type /Catalog >> endobj\ntrailer << /Root 1 0 R >>\n%%EOF",
    ];

    for payload in bodies {
        let req = test::TestRequest::post()
            .uri("/resume")
            .insert_header(("content-type", "application/pdf"))
            .set_payload(payload.to_vec())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_failed");
        assert_eq!(body["message"], "Failed to parse PDF.");
    }
}

#[actix_web::test]
async fn test_resume_endpoint_rejects_oversized_upload() {
    let server = ServerSettings {
        max_upload_bytes: 16,
        ..ServerSettings::default()
    };
    let app = test::init_service(App::new().configure(configure_app(
        create_app_state(RecommendationEngine::default()),
        &server,
    )))
    .await;

    let req = test::TestRequest::post()
        .uri("/resume")
        .insert_header(("content-type", "application/pdf"))
        .set_payload(vec![b'x'; 1024])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[actix_web::test]
async fn test_health_and_skills_endpoints() {
    let app = test::init_service(App::new().configure(configure_app(
        create_app_state(RecommendationEngine::new(ScoringStrategy::RarityWeighted)),
        &ServerSettings::default(),
    )))
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["dictionary_size"], 4);
    assert_eq!(body["catalog_size"], 4);

    let req = test::TestRequest::get().uri("/skills").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["skills"], json!(["javascript", "react", "node", "python"]));
    assert_eq!(body["count"], 4);
}

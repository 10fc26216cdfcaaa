use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::{RecommendationEngine, SkillExtractor};
use crate::error::MatchError;
use crate::models::{
    AnalyzeQuery, AnalyzeResponse, ExtractRequest, ExtractResponse, HealthResponse, JobRecord,
    MatchedSkillSet, RecommendRequest, RecommendResponse, SkillsResponse,
};
use crate::services::extract_pdf_text;

/// Application state shared across all handlers
///
/// Everything here is loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<SkillExtractor>,
    pub catalog: Arc<Vec<JobRecord>>,
    pub engine: RecommendationEngine,
    pub matching: MatchingSettings,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/skills", web::get().to(list_skills))
        .route("/extract", web::post().to(extract_skills))
        .route("/recommend", web::post().to(recommend))
        .route("/resume", web::post().to(analyze_resume));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        dictionary_size: state.extractor.dictionary().len(),
        catalog_size: state.catalog.len(),
    })
}

/// Skill dictionary endpoint
///
/// GET /skills
async fn list_skills(state: web::Data<AppState>) -> impl Responder {
    let skills: Vec<String> = state
        .extractor
        .dictionary()
        .iter()
        .map(|s| s.to_string())
        .collect();

    HttpResponse::Ok().json(SkillsResponse {
        count: skills.len(),
        skills,
    })
}

/// Skill extraction endpoint
///
/// POST /extract
///
/// Request body:
/// ```json
/// { "text": "Experienced React and Node developer" }
/// ```
async fn extract_skills(
    state: web::Data<AppState>,
    req: web::Json<ExtractRequest>,
) -> impl Responder {
    let matched = state.extractor.extract(&req.text);

    tracing::debug!(
        "Extracted {} skills from {} characters",
        matched.len(),
        req.text.len()
    );

    HttpResponse::Ok().json(ExtractResponse {
        skills: matched.to_strings(),
    })
}

/// Recommendation endpoint
///
/// POST /recommend
///
/// Request body:
/// ```json
/// {
///   "skills": ["react", "node"],
///   "limit": 20
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> Result<HttpResponse, MatchError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return Err(MatchError::Validation(errors.to_string()));
    }

    let matched = MatchedSkillSet::from_tokens(&req.skills);
    let limit = state.matching.effective_limit(req.limit);

    let outcome = state.engine.recommend(&matched, &state.catalog);
    let response = RecommendResponse::from_outcome(&outcome, limit);

    tracing::info!(
        "Returning {} recommendations for {} skills (from {} ranked)",
        response.results.len(),
        matched.len(),
        response.total_results
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Resume upload endpoint
///
/// POST /resume?limit=20
///
/// The body is the raw PDF file. Text is extracted on the blocking pool,
/// matched against the dictionary and ranked in one call.
async fn analyze_resume(
    state: web::Data<AppState>,
    query: web::Query<AnalyzeQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, MatchError> {
    if let Err(errors) = query.validate() {
        return Err(MatchError::Validation(errors.to_string()));
    }

    let size = body.len();
    let text = web::block(move || extract_pdf_text(&body).map_err(MatchError::from))
        .await
        .map_err(|e| MatchError::Internal(format!("PDF extraction worker failed: {}", e)))??;

    let matched = state.extractor.extract(&text);
    let limit = state.matching.effective_limit(query.limit);
    let outcome = state.engine.recommend(&matched, &state.catalog);
    let ranked = RecommendResponse::from_outcome(&outcome, limit);

    tracing::info!(
        "Analyzed {} byte resume: {} skills, {} recommendations",
        size,
        matched.len(),
        ranked.results.len()
    );

    Ok(HttpResponse::Ok().json(AnalyzeResponse {
        skills: matched.to_strings(),
        results: ranked.results,
        total_results: ranked.total_results,
        text,
    }))
}

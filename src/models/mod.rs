// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    FieldValue, JobRecord, MatchedSkillSet, NoSkillsNotice, RecommendationOutcome,
    ScoredRecommendation, SkillDictionary, SkillId,
};
pub use requests::{AnalyzeQuery, ExtractRequest, RecommendRequest};
pub use responses::{
    AnalyzeResponse, ErrorResponse, ExtractResponse, HealthResponse, RecommendResponse,
    RecommendationEntry, RecommendationRecord, SkillsResponse,
};

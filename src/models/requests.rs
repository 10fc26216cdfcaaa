use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank catalog jobs against a set of skills
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    /// Skill tokens, normalized again on arrival. A missing field means no skills.
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub skills: Vec<String>,
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

/// Request to detect dictionary skills in already-decoded resume text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub text: String,
}

/// Query parameters for the PDF upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyzeQuery {
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{RecommendationOutcome, ScoredRecommendation};

/// One ranked job as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRecord {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub remote_type: Option<String>,
    pub employment_type: Option<String>,
    pub seniority_level: Option<String>,
    pub score: u8,
    pub matched_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<DateTime<Utc>>,
}

impl From<&ScoredRecommendation<'_>> for RecommendationRecord {
    fn from(rec: &ScoredRecommendation<'_>) -> Self {
        let job = rec.job;
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            remote_type: job.remote_type.clone(),
            employment_type: job.employment_type.clone(),
            seniority_level: job.seniority_level.clone(),
            score: rec.score,
            matched_skills: rec.matched_skills.iter().map(|s| s.to_string()).collect(),
            salary_range: job.salary_range.clone(),
            description: job.description.clone(),
            posted_date: job.posted_date,
        }
    }
}

/// Entry in a `results` list: a scored job, or the no-skills notice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RecommendationEntry {
    Scored(RecommendationRecord),
    Notice { message: String },
}

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub results: Vec<RecommendationEntry>,
    /// Ranked jobs before the limit was applied
    pub total_results: usize,
}

impl RecommendResponse {
    /// Render an engine outcome, keeping at most `limit` ranked entries
    pub fn from_outcome(outcome: &RecommendationOutcome<'_>, limit: usize) -> Self {
        match outcome {
            RecommendationOutcome::Ranked(recs) => Self {
                results: recs
                    .iter()
                    .take(limit)
                    .map(|rec| RecommendationEntry::Scored(rec.into()))
                    .collect(),
                total_results: recs.len(),
            },
            RecommendationOutcome::NoSkillsDetected(notice) => Self {
                results: vec![RecommendationEntry::Notice {
                    message: notice.message.clone(),
                }],
                total_results: 0,
            },
        }
    }
}

/// Response for the extract endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub skills: Vec<String>,
}

/// Response for the PDF upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub skills: Vec<String>,
    pub results: Vec<RecommendationEntry>,
    pub total_results: usize,
    pub text: String,
}

/// Dictionary listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub dictionary_size: usize,
    pub catalog_size: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

//! Skillmatch - resume skill extraction and job recommendation service
//!
//! This library provides the core pipeline behind the service: scanning resume
//! text for known skills and ranking a job catalog against the skills found.
//! The HTTP transport in `routes` is a thin shim over the same functions.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{extract, recommend, MatchMode, RecommendationEngine, ScoringStrategy, SkillExtractor};
pub use error::MatchError;
pub use models::{JobRecord, MatchedSkillSet, RecommendationOutcome, ScoredRecommendation, SkillDictionary, SkillId};

// Core algorithm exports
pub mod extractor;
pub mod recommender;
pub mod scoring;

pub use extractor::{extract, MatchMode, SkillExtractor};
pub use recommender::{recommend, RecommendationEngine};
pub use scoring::{calculate_match_score, ScoringStrategy, SkillWeights};

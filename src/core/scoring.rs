use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{JobRecord, MatchedSkillSet, SkillId};

/// How overlap between a candidate's skills and a job is turned into a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Share of the job's required skills that were matched
    #[default]
    Overlap,
    /// Like `Overlap`, but skills required by fewer catalog jobs count more
    RarityWeighted,
}

/// Per-skill weights derived from a catalog
///
/// `w(s) = 1 + ln(N / df(s))` where `N` is the catalog size and `df(s)` the
/// number of jobs requiring `s`. Every weight is at least 1.
#[derive(Debug, Clone, Default)]
pub struct SkillWeights {
    weights: HashMap<SkillId, f64>,
}

impl SkillWeights {
    pub fn from_catalog(catalog: &[JobRecord]) -> Self {
        let mut document_frequency: HashMap<&SkillId, usize> = HashMap::new();
        for job in catalog {
            for skill in &job.required_skills {
                *document_frequency.entry(skill).or_insert(0) += 1;
            }
        }

        let total = catalog.len().max(1) as f64;
        let weights = document_frequency
            .into_iter()
            .map(|(skill, df)| (skill.clone(), 1.0 + (total / df as f64).ln()))
            .collect();

        Self { weights }
    }

    /// Weight of a skill, 1.0 when the catalog never mentions it
    pub fn weight(&self, skill: &SkillId) -> f64 {
        self.weights.get(skill).copied().unwrap_or(1.0)
    }
}

/// Calculate a match score (0-100) for a job against the detected skills
///
/// Scoring formula:
/// - Overlap: `100 × |matched ∩ required| / max(1, |required|)`
/// - RarityWeighted: `100 × Σ w(matched ∩ required) / Σ w(required)`
///
/// A job with no required skills scores 0. `weights` is only read by the
/// rarity-weighted strategy.
///
/// # Returns
/// The rounded score and the matched skills in the job's own order
pub fn calculate_match_score(
    matched: &MatchedSkillSet,
    job: &JobRecord,
    strategy: ScoringStrategy,
    weights: &SkillWeights,
) -> (u8, Vec<SkillId>) {
    let shared: Vec<SkillId> = job
        .required_skills
        .iter()
        .filter(|skill| matched.contains(skill))
        .cloned()
        .collect();

    if job.required_skills.is_empty() {
        return (0, shared);
    }

    let ratio = match strategy {
        ScoringStrategy::Overlap => {
            shared.len() as f64 / job.required_skills.len() as f64
        }
        ScoringStrategy::RarityWeighted => {
            let total: f64 = job.required_skills.iter().map(|s| weights.weight(s)).sum();
            let hit: f64 = shared.iter().map(|s| weights.weight(s)).sum();
            if total > 0.0 {
                hit / total
            } else {
                0.0
            }
        }
    };

    let score = (ratio * 100.0).round().clamp(0.0, 100.0) as u8;
    (score, shared)
}

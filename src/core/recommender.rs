use std::cmp::Ordering;
use std::sync::Arc;

use crate::core::scoring::{calculate_match_score, ScoringStrategy, SkillWeights};
use crate::models::{
    JobRecord, MatchedSkillSet, NoSkillsNotice, RecommendationOutcome, ScoredRecommendation,
};

/// Ranks catalog jobs against a set of detected skills
///
/// # Pipeline Stages
/// 1. No-skills short circuit
/// 2. Per-job scoring
/// 3. Minimum score cut
/// 4. Deterministic ranking
///
/// The engine holds its settings and, once bound to a catalog, the skill
/// weights derived from it. The catalog and skills are borrowed per call and
/// never modified.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    strategy: ScoringStrategy,
    min_score: u8,
    weights: Option<Arc<SkillWeights>>,
}

impl RecommendationEngine {
    pub fn new(strategy: ScoringStrategy) -> Self {
        Self {
            strategy,
            min_score: 0,
            weights: None,
        }
    }

    /// Precompute rarity weights for the catalog this engine will serve
    ///
    /// Only the rarity-weighted strategy reads them. An unbound engine derives
    /// weights from whatever catalog each call receives.
    pub fn with_catalog(mut self, catalog: &[JobRecord]) -> Self {
        if self.strategy == ScoringStrategy::RarityWeighted {
            self.weights = Some(Arc::new(SkillWeights::from_catalog(catalog)));
        }
        self
    }

    /// Drop jobs scoring below `min_score`
    pub fn with_min_score(mut self, min_score: u8) -> Self {
        self.min_score = min_score.min(100);
        self
    }

    pub fn strategy(&self) -> ScoringStrategy {
        self.strategy
    }

    /// Score and rank every job in `catalog`
    ///
    /// # Arguments
    /// * `matched` - Skills detected for this request
    /// * `catalog` - Read-only job catalog
    ///
    /// # Returns
    /// `NoSkillsDetected` when `matched` is empty, otherwise the ranked jobs:
    /// score descending, then newest posting first (dated before undated),
    /// then catalog order.
    pub fn recommend<'a>(
        &self,
        matched: &MatchedSkillSet,
        catalog: &'a [JobRecord],
    ) -> RecommendationOutcome<'a> {
        // Stage 1: nothing to match on
        if matched.is_empty() {
            tracing::debug!("No skills supplied, returning no-skills notice");
            return RecommendationOutcome::NoSkillsDetected(NoSkillsNotice::default());
        }

        let weights = match (self.strategy, &self.weights) {
            (ScoringStrategy::RarityWeighted, Some(bound)) => Arc::clone(bound),
            (ScoringStrategy::RarityWeighted, None) => {
                Arc::new(SkillWeights::from_catalog(catalog))
            }
            (ScoringStrategy::Overlap, _) => Arc::new(SkillWeights::default()),
        };

        let mut ranked: Vec<ScoredRecommendation<'a>> = catalog
            .iter()
            // Stage 2: score
            .map(|job| {
                let (score, matched_skills) =
                    calculate_match_score(matched, job, self.strategy, &weights);
                ScoredRecommendation {
                    job,
                    score,
                    matched_skills,
                }
            })
            // Stage 3: cut
            .filter(|rec| rec.score >= self.min_score)
            .collect();

        // Stage 4: stable sort keeps catalog order for full ties
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| compare_recency(a.job, b.job))
        });

        tracing::debug!(
            "Ranked {} of {} jobs for {} skills",
            ranked.len(),
            catalog.len(),
            matched.len()
        );

        RecommendationOutcome::Ranked(ranked)
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(ScoringStrategy::default())
    }
}

/// Rank `matched` against `catalog` with overlap scoring and no score cut
pub fn recommend<'a>(
    matched: &MatchedSkillSet,
    catalog: &'a [JobRecord],
) -> RecommendationOutcome<'a> {
    RecommendationEngine::default().recommend(matched, catalog)
}

/// Newer postings first, undated postings last
fn compare_recency(a: &JobRecord, b: &JobRecord) -> Ordering {
    match (a.posted_date, b.posted_date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

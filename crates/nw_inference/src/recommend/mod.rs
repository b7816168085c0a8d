use nw_core::{ArticleId, Candidate, RankedCandidate, UserPreferences};
use rand::Rng;
use tracing::debug;
use crate::DEFAULT_RECOMMENDATION_LIMIT;

/// Score used when a candidate carries no (or a zero) analysis score.
pub const FALLBACK_SCORE: f64 = 50.0;
pub const CATEGORY_BOOST: f64 = 20.0;
pub const KEYWORD_BOOST: f64 = 15.0;
/// Jitter is drawn uniformly from `[0, MAX_JITTER)`.
pub const MAX_JITTER: f64 = 10.0;

/// Ranks candidate articles against a user's preferences.
///
/// Each call adds random jitter to every candidate, so identical inputs can
/// come back in a different order when their scores sit within
/// [`MAX_JITTER`] of each other. Use [`Recommender::rank_with_rng`] with a
/// seeded generator for reproducible output.
#[derive(Debug, Clone)]
pub struct Recommender {
    limit: usize,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(DEFAULT_RECOMMENDATION_LIMIT)
    }
}

impl Recommender {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Relevance of one candidate before jitter.
    pub fn base_relevance(preferences: &UserPreferences, candidate: &Candidate) -> f64 {
        let mut relevance = match candidate.ai_score {
            Some(score) if score != 0 => f64::from(score),
            _ => FALLBACK_SCORE,
        };

        if let Some(category) = &candidate.category {
            if preferences.categories.iter().any(|c| c == category) {
                relevance += CATEGORY_BOOST;
            }
        }

        if !preferences.keywords.is_empty() {
            let text = format!("{} {}", candidate.title, candidate.description).to_lowercase();
            let matches = preferences
                .keywords
                .iter()
                .filter(|keyword| text.contains(&keyword.to_lowercase()))
                .count();
            relevance += matches as f64 * KEYWORD_BOOST;
        }

        relevance
    }

    pub fn score_with_rng<R: Rng>(
        &self,
        preferences: &UserPreferences,
        candidates: &[Candidate],
        rng: &mut R,
    ) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = candidates
            .iter()
            .map(|candidate| RankedCandidate {
                article_id: candidate.id,
                relevance: Self::base_relevance(preferences, candidate) + rng.gen_range(0.0..MAX_JITTER),
            })
            .collect();
        // stable sort, so equal relevance keeps candidate order
        ranked.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
        ranked
    }

    /// Top ids, best first, drawing jitter from `rng`.
    pub fn rank_with_rng<R: Rng>(
        &self,
        preferences: &UserPreferences,
        candidates: &[Candidate],
        rng: &mut R,
    ) -> Vec<ArticleId> {
        let ranked = self.score_with_rng(preferences, candidates, rng);
        debug!("Ranked {} candidates, keeping {}", ranked.len(), self.limit.min(ranked.len()));
        ranked
            .into_iter()
            .take(self.limit)
            .map(|candidate| candidate.article_id)
            .collect()
    }

    /// Top ids, best first, using the thread-local generator for jitter.
    pub fn rank(&self, preferences: &UserPreferences, candidates: &[Candidate]) -> Vec<ArticleId> {
        self.rank_with_rng(preferences, candidates, &mut rand::thread_rng())
    }
}

use nw_core::Result;

pub mod models;
pub mod recommend;

/// Number of ids a recommendation request returns at most.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub model_name: Option<String>,
    pub recommendation_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_name: None,
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }
}

impl Config {
    pub fn recommender(&self) -> Result<recommend::Recommender> {
        if self.recommendation_limit == 0 {
            return Err(nw_core::Error::Validation(
                "recommendation limit must be at least 1".to_string(),
            ));
        }
        Ok(recommend::Recommender::new(self.recommendation_limit))
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::models::{create_analyzer, HeuristicScorer};
    pub use super::recommend::Recommender;
    pub use nw_core::{ArticleAnalyzer, Candidate, Error, Result, ScoreResult, Sentiment, UserPreferences};
}

pub use models::{create_analyzer, HeuristicScorer};
pub use recommend::Recommender;

#[cfg(test)]
mod tests {
    use super::*;
    use nw_core::{Candidate, UserPreferences};

    #[test]
    fn test_scoring_feeds_ranking() {
        let config = Config::default();
        let analyzer = create_analyzer(&config).unwrap();
        let recommender = config.recommender().unwrap();

        let hot = analyzer.analyze("Quantum breakthrough sets record", Some("A new milestone."), None);
        let cold = analyzer.analyze("Local council meets", Some("Minutes were read."), None);
        assert!(hot.score - cold.score > 10);

        let candidates = vec![
            Candidate {
                id: 1,
                title: "Local council meets".to_string(),
                description: "Minutes were read.".to_string(),
                category: Some(cold.primary_category().to_string()),
                ai_score: Some(cold.score),
            },
            Candidate {
                id: 2,
                title: "Quantum breakthrough sets record".to_string(),
                description: "A new milestone.".to_string(),
                category: Some(hot.primary_category().to_string()),
                ai_score: Some(hot.score),
            },
        ];
        let ids = recommender.rank(&UserPreferences::default(), &candidates);
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let config = Config { recommendation_limit: 0, ..Config::default() };
        assert!(config.recommender().is_err());
    }
}

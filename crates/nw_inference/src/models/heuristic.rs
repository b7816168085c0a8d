//! Keyword-matching article analysis.
//!
//! Nothing here is learned: every score, tag and sentiment comes from fixed
//! substring checks against a lower-cased scan buffer of the article text.

use std::fmt;
use nw_core::{ArticleAnalyzer, ScoreResult, Sentiment, GENERAL_CATEGORY};

pub const BASE_SCORE: i32 = 60;
pub const MIN_SCORE: i32 = 40;
pub const MAX_SCORE: i32 = 95;

const HIGH_IMPACT_BONUS: i32 = 10;
const TECHNOLOGY_BONUS: i32 = 15;

const HIGH_IMPACT_KEYWORDS: &[&str] = &[
    "breakthrough",
    "revolutionary",
    "discovers",
    "milestone",
    "record",
    "first",
    "new",
];

const TECHNOLOGY_KEYWORDS: &[&str] = &["ai", "technology", "quantum"];

/// Evaluated in order; an article collects every tag whose group matches.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("technology", &["ai", "tech", "quantum", "computing"]),
    ("business", &["market", "trade", "business", "economy"]),
    ("health", &["medical", "health", "cancer", "treatment"]),
    ("science", &["climate", "research", "discovery", "scientists"]),
    ("sports", &["olympic", "sport", "championship", "record"]),
    ("entertainment", &["streaming", "entertainment", "movie", "music"]),
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "breakthrough",
    "success",
    "improvement",
    "surge",
    "growth",
    "milestone",
];

const NEGATIVE_KEYWORDS: &[&str] = &["crisis", "decline", "threat", "problem", "concern", "risk"];

/// Join the present, non-empty fields with a space and lower-case the result.
pub fn scan_buffer(title: &str, description: Option<&str>, content: Option<&str>) -> String {
    [Some(title), description, content]
        .into_iter()
        .flatten()
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn count_matches(buffer: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|keyword| buffer.contains(*keyword)).count()
}

pub fn relevance_score(buffer: &str) -> i32 {
    let mut score = BASE_SCORE;
    score += count_matches(buffer, HIGH_IMPACT_KEYWORDS) as i32 * HIGH_IMPACT_BONUS;
    if count_matches(buffer, TECHNOLOGY_KEYWORDS) > 0 {
        score += TECHNOLOGY_BONUS;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

pub fn classify(buffer: &str) -> Vec<String> {
    let categories: Vec<String> = CATEGORY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| count_matches(buffer, keywords) > 0)
        .map(|(tag, _)| tag.to_string())
        .collect();

    if categories.is_empty() {
        vec![GENERAL_CATEGORY.to_string()]
    } else {
        categories
    }
}

pub fn sentiment(buffer: &str) -> Sentiment {
    let positive = count_matches(buffer, POSITIVE_KEYWORDS);
    let negative = count_matches(buffer, NEGATIVE_KEYWORDS);
    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// First two '.'-separated segments of the description, or the title when
/// there is no description.
pub fn summarize(title: &str, description: Option<&str>) -> String {
    match description.filter(|d| !d.is_empty()) {
        Some(description) => {
            let head: Vec<&str> = description.split('.').take(2).collect();
            format!("{}.", head.join("."))
        }
        None => title.to_string(),
    }
}

#[derive(Default)]
pub struct HeuristicScorer;

impl fmt::Debug for HeuristicScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeuristicScorer").finish()
    }
}

impl HeuristicScorer {
    pub const NAME: &'static str = "heuristic";

    pub fn new() -> Self {
        Self
    }
}

impl ArticleAnalyzer for HeuristicScorer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn analyze(&self, title: &str, description: Option<&str>, content: Option<&str>) -> ScoreResult {
        let buffer = scan_buffer(title, description, content);
        ScoreResult {
            score: relevance_score(&buffer),
            summary: summarize(title, description),
            categories: classify(&buffer),
            sentiment: sentiment(&buffer),
        }
    }
}

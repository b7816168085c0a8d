use std::fmt;
use crate::types::ScoreResult;

pub trait ArticleAnalyzer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Score, classify and summarize an article from its text fields
    fn analyze(&self, title: &str, description: Option<&str>, content: Option<&str>) -> ScoreResult;
}

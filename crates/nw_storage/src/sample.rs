use chrono::{DateTime, Duration, Utc};
use nw_core::{ArticleSource, NewArticle};

fn source(name: &str, id: &str) -> Option<ArticleSource> {
    Some(ArticleSource { name: name.to_string(), id: Some(id.to_string()) })
}

/// Articles a fresh store starts with, dated relative to `now`.
pub fn sample_articles(now: DateTime<Utc>) -> Vec<NewArticle> {
    vec![
        NewArticle {
            external_id: Some("ai-breakthrough-2024".to_string()),
            title: "AI Revolution: New Breakthrough in Machine Learning Changes Everything".to_string(),
            description: Some("Researchers at Stanford University have developed a new AI model that can understand context better than ever before, potentially revolutionizing how we interact with technology.".to_string()),
            content: Some("In a groundbreaking development, Stanford researchers have unveiled a new AI architecture that demonstrates unprecedented contextual understanding capabilities...".to_string()),
            url_to_image: Some("https://images.unsplash.com/photo-1677442136019-21780ecad995?w=800".to_string()),
            published_at: Some(now - Duration::hours(2)),
            source: source("TechCrunch", "techcrunch"),
            category: Some("technology".to_string()),
            ai_score: Some(92),
            ai_summary: Some("Stanford researchers develop revolutionary AI model with enhanced contextual understanding.".to_string()),
        },
        NewArticle {
            external_id: Some("ev-sales-surge".to_string()),
            title: "Electric Vehicle Sales Surge as Battery Technology Improves".to_string(),
            description: Some("Global electric vehicle sales have increased by 45% this quarter, driven by significant improvements in battery life and charging infrastructure.".to_string()),
            content: Some("The electric vehicle industry is experiencing unprecedented growth as manufacturers overcome key technological barriers...".to_string()),
            url_to_image: Some("https://images.unsplash.com/photo-1593941707882-a5bac6861d75?w=800".to_string()),
            published_at: Some(now - Duration::hours(4)),
            source: source("BBC News", "bbc-news"),
            category: Some("business".to_string()),
            ai_score: Some(85),
            ai_summary: Some("Electric vehicle sales jump 45% due to better battery technology and infrastructure.".to_string()),
        },
        NewArticle {
            external_id: Some("cancer-breakthrough".to_string()),
            title: "New Medical Discovery Could Transform Cancer Treatment".to_string(),
            description: Some("Scientists have identified a novel protein that could lead to more effective and less invasive cancer treatments, offering hope to millions of patients worldwide.".to_string()),
            content: Some("A team of international researchers has made a breakthrough discovery that could revolutionize cancer treatment approaches...".to_string()),
            url_to_image: Some("https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=800".to_string()),
            published_at: Some(now - Duration::hours(6)),
            source: source("Reuters", "reuters"),
            category: Some("health".to_string()),
            ai_score: Some(89),
            ai_summary: Some("Scientists discover novel protein that could revolutionize cancer treatment approaches.".to_string()),
        },
    ]
}

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use nw_core::{FeedArticle, FeedQuery, FeedSource, NewsSource, Result, GENERAL_CATEGORY};
use super::category_keywords;

struct Headline {
    source_id: &'static str,
    source_name: &'static str,
    author: &'static str,
    title: &'static str,
    description: &'static str,
    url: &'static str,
    url_to_image: &'static str,
    hours_ago: i64,
    content: &'static str,
}

const HEADLINES: &[Headline] = &[
    Headline {
        source_id: "techcrunch",
        source_name: "TechCrunch",
        author: "Sarah Perez",
        title: "AI Revolution: New Breakthrough in Machine Learning Changes Everything",
        description: "Researchers at Stanford University have developed a new AI model that can understand context better than ever before, potentially revolutionizing how we interact with technology.",
        url: "https://techcrunch.com/ai-breakthrough-2024",
        url_to_image: "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=800",
        hours_ago: 2,
        content: "In a groundbreaking development, Stanford researchers have unveiled a new AI architecture that demonstrates unprecedented contextual understanding capabilities...",
    },
    Headline {
        source_id: "bbc-news",
        source_name: "BBC News",
        author: "Technology Reporter",
        title: "Electric Vehicle Sales Surge as Battery Technology Improves",
        description: "Global electric vehicle sales have increased by 45% this quarter, driven by significant improvements in battery life and charging infrastructure.",
        url: "https://bbc.com/news/ev-sales-surge",
        url_to_image: "https://images.unsplash.com/photo-1593941707882-a5bac6861d75?w=800",
        hours_ago: 4,
        content: "The electric vehicle industry is experiencing unprecedented growth as manufacturers overcome key technological barriers...",
    },
    Headline {
        source_id: "reuters",
        source_name: "Reuters",
        author: "Health Correspondent",
        title: "New Medical Discovery Could Transform Cancer Treatment",
        description: "Scientists have identified a novel protein that could lead to more effective and less invasive cancer treatments, offering hope to millions of patients worldwide.",
        url: "https://reuters.com/health/cancer-breakthrough",
        url_to_image: "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=800",
        hours_ago: 6,
        content: "A team of international researchers has made a breakthrough discovery that could revolutionize cancer treatment approaches...",
    },
    Headline {
        source_id: "espn",
        source_name: "ESPN",
        author: "Sports Editor",
        title: "Olympic Records Shattered in Swimming Championships",
        description: "Multiple world records were broken at the international swimming championships, with athletes pushing the boundaries of human performance.",
        url: "https://espn.com/swimming-records-broken",
        url_to_image: "https://images.unsplash.com/photo-1544551763-46a013bb70d5?w=800",
        hours_ago: 8,
        content: "The swimming world witnessed history in the making as several Olympic records were shattered during the championship finals...",
    },
    Headline {
        source_id: "the-verge",
        source_name: "The Verge",
        author: "Tech Writer",
        title: "Quantum Computing Reaches New Milestone with 1000-Qubit Processor",
        description: "A major technology company has announced the development of a 1000-qubit quantum processor, marking a significant step toward practical quantum computing.",
        url: "https://theverge.com/quantum-computing-milestone",
        url_to_image: "https://images.unsplash.com/photo-1635070041078-e363dbe005cb?w=800",
        hours_ago: 12,
        content: "The quantum computing industry has reached a major milestone with the announcement of a revolutionary 1000-qubit processor...",
    },
    Headline {
        source_id: "cnn",
        source_name: "CNN",
        author: "Business Reporter",
        title: "Global Markets React to New Trade Agreement",
        description: "International markets are showing positive responses to the newly signed trade agreement between major economic powers, with tech stocks leading the gains.",
        url: "https://cnn.com/business/trade-agreement-markets",
        url_to_image: "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?w=800",
        hours_ago: 16,
        content: "Global financial markets are experiencing significant movement following the announcement of a comprehensive trade agreement...",
    },
    Headline {
        source_id: "nature",
        source_name: "Nature",
        author: "Science Correspondent",
        title: "Climate Scientists Discover New Method to Capture Carbon",
        description: "Researchers have developed an innovative technique that could capture carbon dioxide from the atmosphere more efficiently than existing methods.",
        url: "https://nature.com/carbon-capture-breakthrough",
        url_to_image: "https://images.unsplash.com/photo-1569163139061-de7e8d43c5fe?w=800",
        hours_ago: 20,
        content: "In a promising development for climate change mitigation, scientists have unveiled a new carbon capture technology...",
    },
    Headline {
        source_id: "entertainment-weekly",
        source_name: "Entertainment Weekly",
        author: "Entertainment Reporter",
        title: "Streaming Wars Heat Up with New Platform Launches",
        description: "The competition in the streaming industry intensifies as new platforms enter the market with exclusive content and innovative features.",
        url: "https://ew.com/streaming-wars-update",
        url_to_image: "https://images.unsplash.com/photo-1522869635100-9f4c5e86aa37?w=800",
        hours_ago: 24,
        content: "The entertainment landscape continues to evolve rapidly as streaming services compete for viewer attention with unprecedented content offerings...",
    },
];

impl Headline {
    fn to_feed_article(&self, now: DateTime<Utc>) -> FeedArticle {
        FeedArticle {
            source: FeedSource {
                id: Some(self.source_id.to_string()),
                name: self.source_name.to_string(),
            },
            author: Some(self.author.to_string()),
            title: Some(self.title.to_string()),
            description: Some(self.description.to_string()),
            url: self.url.to_string(),
            url_to_image: Some(self.url_to_image.to_string()),
            published_at: Some((now - Duration::hours(self.hours_ago)).to_rfc3339()),
            content: Some(self.content.to_string()),
        }
    }

    fn mentions(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

/// Offline feed serving a fixed set of headlines, dated relative to the fetch.
#[derive(Debug, Default, Clone)]
pub struct FixtureSource;

impl FixtureSource {
    pub const NAME: &'static str = "fixtures";

    pub fn new() -> Self {
        Self
    }

    fn matches(headline: &Headline, query: &FeedQuery) -> bool {
        if let Some(category) = query.category.as_deref().filter(|c| *c != GENERAL_CATEGORY) {
            let keywords = category_keywords(category);
            if !keywords.is_empty() && !keywords.iter().any(|k| headline.mentions(k)) {
                return false;
            }
        }
        match query.query.as_deref() {
            Some(term) => headline.mentions(term),
            None => true,
        }
    }
}

#[async_trait]
impl NewsSource for FixtureSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch(&self, query: &FeedQuery) -> Result<Vec<FeedArticle>> {
        let now = Utc::now();
        Ok(HEADLINES
            .iter()
            .filter(|headline| Self::matches(headline, query))
            .map(|headline| headline.to_feed_article(now))
            .collect())
    }
}

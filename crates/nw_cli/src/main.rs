use anyhow::Context;
use clap::Parser;
use nw_core::ArticleAnalyzer;
use nw_feeds::{handle_command, FeedArgs, FeedConfig, IngestManager, DEFAULT_NEWS_API_URL};
use nw_web::{AppState, ServerConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "News aggregation server with heuristic article scoring", long_about = None)]
pub struct Cli {
    #[arg(long, default_value = "memory", help = "Storage backend. Available backends: memory")]
    storage: String,
    /// Start with an empty store instead of the sample articles
    #[arg(long)]
    no_seed: bool,
    #[arg(long, default_value = "heuristic", help = "Article analyzer. Available analyzers: heuristic")]
    analyzer: String,
    /// NewsAPI key; without one the bundled fixture feed is used
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    news_api_key: Option<String>,
    #[arg(long, env = "NEWS_API_URL", default_value = DEFAULT_NEWS_API_URL)]
    news_api_url: String,
    #[arg(long, default_value = "us")]
    country: String,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "NW_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "NW_PORT", default_value_t = 5000)]
        port: u16,
    },
    /// Score a piece of text and print the result as JSON
    Analyze {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Work with news sources
    Feeds(FeedArgs),
}

impl Cli {
    fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            api_key: self.news_api_key.clone(),
            base_url: self.news_api_url.clone(),
            country: self.country.clone(),
        }
    }

    fn inference_config(&self) -> nw_inference::Config {
        nw_inference::Config {
            model_name: Some(self.analyzer.clone()),
            ..nw_inference::Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    nw_feeds::logging::init_logging(&cli.log_level);

    let inference_config = cli.inference_config();
    let analyzer = nw_inference::create_analyzer(&inference_config)?;
    info!("🧠 Analyzer initialized (using {})", analyzer.name());

    if let Commands::Analyze { title, description, content } = &cli.command {
        let result = analyzer.analyze(title, description.as_deref(), content.as_deref());
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let storage = nw_storage::create_storage(&cli.storage, !cli.no_seed)
        .await
        .with_context(|| format!("failed to initialize {} storage", cli.storage))?;
    let sources = nw_feeds::get_sources(&cli.feed_config());

    match cli.command {
        Commands::Serve { host, port } => {
            let recommender = inference_config.recommender()?;
            let state = AppState::new(storage, analyzer, sources, recommender);
            nw_web::serve(state, &ServerConfig { host, port }).await?;
        }
        Commands::Feeds(args) => {
            let manager = IngestManager::new(storage, analyzer, sources);
            for line in handle_command(args, &manager).await? {
                println!("{}", line);
            }
        }
        Commands::Analyze { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["nw", "serve", "--port", "8080"]).unwrap();
        assert_eq!(cli.storage, "memory");
        assert!(!cli.no_seed);
        match cli.command {
            Commands::Serve { port, .. } => assert_eq!(port, 8080),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_feeds_refresh() {
        let cli = Cli::try_parse_from(["nw", "--no-seed", "feeds", "refresh", "--category", "sports"]).unwrap();
        assert!(cli.no_seed);
        match cli.command {
            Commands::Feeds(args) => match args.command {
                nw_feeds::FeedCommands::Refresh { category, query } => {
                    assert_eq!(category, "sports");
                    assert!(query.is_none());
                }
                other => panic!("unexpected feed command: {:?}", other),
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_feed_config_from_flags() {
        let cli = Cli::try_parse_from([
            "nw",
            "--news-api-key",
            "k",
            "--country",
            "gb",
            "analyze",
            "AI breakthrough",
        ])
        .unwrap();
        let config = cli.feed_config();
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.country, "gb");
        assert_eq!(cli.inference_config().model_name.as_deref(), Some("heuristic"));
    }
}

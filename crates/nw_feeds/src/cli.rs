use clap::{Args, Subcommand};
use nw_core::Result;
use crate::manager::IngestManager;

#[derive(Args, Debug, Clone)]
pub struct FeedArgs {
    #[command(subcommand)]
    pub command: FeedCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FeedCommands {
    /// List configured news sources
    List,
    /// Fetch headlines and store the new ones
    Refresh {
        /// Category to fetch (e.g. technology, sports). Defaults to general.
        #[arg(long, default_value = "general")]
        category: String,
        /// Search term; when set, the category is ignored
        #[arg(long)]
        query: Option<String>,
    },
}

/// Run a feed subcommand, returning the lines to print.
pub async fn handle_command(args: FeedArgs, manager: &IngestManager) -> Result<Vec<String>> {
    match args.command {
        FeedCommands::List => Ok(manager
            .sources()
            .iter()
            .map(|source| format!("  {}", source.name()))
            .collect()),
        FeedCommands::Refresh { category, query } => {
            let processed = match query {
                Some(query) => manager.search(&query).await?,
                None => manager.refresh(&category).await?,
            };
            Ok(processed
                .iter()
                .map(|(article, status)| {
                    format!(
                        "{} [{}] {} ({})",
                        status.emoji(),
                        article.ai_score.unwrap_or_default(),
                        article.title,
                        article.category.as_deref().unwrap_or("general")
                    )
                })
                .collect())
        }
    }
}

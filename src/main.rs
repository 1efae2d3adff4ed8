//! `streamscout` CLI - aggregate playable sources for a movie or episode

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use streamscout::config::ScoutConfig;
use streamscout::http_client::ScraperClient;
use streamscout::scrape::{engine, merge, MediaRequest, ProviderRegistry, ScrapeError};
use streamscout::subtitles::SubtitleClient;

#[derive(Parser)]
#[command(name = "streamscout")]
#[command(about = "Aggregates playable video sources and subtitles from streaming providers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every playable source for a media item and print JSON
    Sources {
        /// TMDB id of the movie or series
        media_id: String,

        /// Season number (episode mode; requires --episode)
        #[arg(short, long, requires = "episode")]
        season: Option<u32>,

        /// Episode number (episode mode; requires --season)
        #[arg(short, long, requires = "season")]
        episode: Option<u32>,

        /// Client IP to forward to geo-filtered providers
        #[arg(long, default_value = "127.0.0.1")]
        ip: String,

        /// Batch deadline in seconds (overrides config)
        #[arg(short, long)]
        deadline: Option<u64>,

        /// Pretty-print the JSON response
        #[arg(short, long)]
        pretty: bool,
    },

    /// List registered providers and their mode applicability
    Providers,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sources {
            media_id,
            season,
            episode,
            ip,
            deadline,
            pretty,
        } => {
            cmd_sources(&media_id, season.zip(episode), &ip, deadline, pretty).await?;
        }
        Commands::Providers => {
            cmd_providers();
        }
    }

    Ok(())
}

async fn cmd_sources(
    media_id: &str,
    episode: Option<(u32, u32)>,
    ip: &str,
    deadline_secs: Option<u64>,
    pretty: bool,
) -> Result<()> {
    let mut config = ScoutConfig::from_env();
    if let Some(secs) = deadline_secs {
        config.deadline = std::time::Duration::from_secs(secs);
    }

    let client = ScraperClient::new()?;
    let registry = ProviderRegistry::standard(&config, client.clone());
    let subtitles = SubtitleClient::new(client, &config.subtitle_api_base);

    let request = match episode {
        Some((season, episode)) => MediaRequest::episode(media_id, season, episode, ip),
        None => MediaRequest::movie(media_id, ip),
    };

    let selection = registry.select(&request).await;
    let (aggregate, captions) = tokio::join!(
        engine::run(selection, config.deadline),
        subtitles.fetch(&request.media_id, request.episode.as_ref()),
    );

    let response = merge::merge(aggregate, captions);
    if response.sources.is_empty() {
        return Err(ScrapeError::EmptyAggregate.into());
    }

    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");

    Ok(())
}

fn cmd_providers() {
    let config = ScoutConfig::from_env();
    let client = ScraperClient::default();
    let registry = ProviderRegistry::standard(&config, client);

    println!("{:<12} {:<8} {:<8}", "provider", "movie", "episode");
    for (name, movie, episode) in registry.describe() {
        println!(
            "{name:<12} {:<8} {:<8}",
            if movie { "yes" } else { "-" },
            if episode { "yes" } else { "-" }
        );
    }
}

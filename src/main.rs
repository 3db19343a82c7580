use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use draft_model::fetch::{HttpFetcher, RetryPolicy, RetryingFetcher};
use draft_model::normalize::normalize_population;
use draft_model::pipeline::{self, ScoreConfig, ScrapeConfig};
use draft_model::report;
use draft_model::score::RankingMetric;
use draft_model::source::{self, SourceUrls, UrlTemplate};
use draft_model::store::{PlayerStore, DEFAULT_STORE_FILE};
use draft_model::read_roster;

#[derive(Parser)]
#[command(name = "draft-model")]
#[command(about = "Scrape prospect game logs and rank players by composite z-score totals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every roster player and append their features to the player store
    Scrape {
        /// Roster CSV (Player, Repeat Name, Position, Class Rating)
        #[arg(short, long, env = "DRAFT_ROSTER", default_value = "draft_prospects_2025.csv")]
        roster: PathBuf,

        /// Player store CSV
        #[arg(short, long, env = "DRAFT_STORE", default_value = DEFAULT_STORE_FILE)]
        store: PathBuf,

        /// Game log URL template built from an example player
        #[arg(long, env = "DRAFT_GAME_LOG_URL", default_value = source::DEFAULT_GAME_LOG_URL)]
        game_log_url: String,

        /// Season stats URL template built from an example player
        #[arg(long, env = "DRAFT_SEASON_URL", default_value = source::DEFAULT_SEASON_URL)]
        season_url: String,

        /// Text in the templates replaced by the player's name
        #[arg(long, default_value = source::DEFAULT_NAME_TOKEN)]
        name_token: String,

        /// Text in the templates replaced by the player's repeat number
        #[arg(long, default_value = source::DEFAULT_DISAMBIGUATOR_TOKEN)]
        disambiguator_token: String,

        /// Seconds to wait between players
        #[arg(long, default_value = "5")]
        delay_secs: u64,

        /// Season row to take shooting splits from (e.g. 2024-25); first row if unset
        #[arg(long)]
        season: Option<String>,

        /// Append players even if they are already in the store
        #[arg(long)]
        rescrape: bool,

        /// Attempts per page for transient failures (1 = fail fast)
        #[arg(long, default_value = "3")]
        max_attempts: u32,

        /// Initial retry backoff in milliseconds, doubled per attempt
        #[arg(long, default_value = "2000")]
        backoff_ms: u64,
    },

    /// Normalize the player store and write both rankings
    Score {
        /// Player store CSV
        #[arg(short, long, env = "DRAFT_STORE", default_value = DEFAULT_STORE_FILE)]
        store: PathBuf,

        /// Ranking by Net Raw Total
        #[arg(long, default_value = report::DEFAULT_NET_RAW_TOTAL_FILE)]
        net_output: PathBuf,

        /// Ranking by Adjusted Total
        #[arg(long, default_value = report::DEFAULT_ADJUSTED_TOTAL_FILE)]
        adjusted_output: PathBuf,

        /// Also write both rankings to an Excel workbook
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Number of top players to print per ranking
        #[arg(long, default_value = "10")]
        top_n: usize,
    },

    /// Display population statistics for the player store
    Inspect {
        /// Player store CSV
        #[arg(short, long, env = "DRAFT_STORE", default_value = DEFAULT_STORE_FILE)]
        store: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            roster,
            store,
            game_log_url,
            season_url,
            name_token,
            disambiguator_token,
            delay_secs,
            season,
            rescrape,
            max_attempts,
            backoff_ms,
        } => {
            let urls = SourceUrls {
                game_log: UrlTemplate::new(game_log_url).with_tokens(&name_token, &disambiguator_token),
                season: UrlTemplate::new(season_url).with_tokens(&name_token, &disambiguator_token),
            };
            let config = ScrapeConfig {
                urls,
                delay: Duration::from_secs(delay_secs),
                season,
                skip_existing: !rescrape,
            };
            let policy = RetryPolicy {
                max_attempts,
                initial_backoff: Duration::from_millis(backoff_ms),
                ..RetryPolicy::default()
            };
            scrape(&roster, &store, &config, policy)?;
        }
        Commands::Score {
            store,
            net_output,
            adjusted_output,
            xlsx,
            top_n,
        } => {
            let config = ScoreConfig {
                net_raw_total_path: net_output,
                adjusted_total_path: adjusted_output,
                xlsx_path: xlsx,
            };
            score(&store, &config, top_n)?;
        }
        Commands::Inspect { store } => {
            inspect(&store)?;
        }
    }

    Ok(())
}

fn scrape(roster_path: &PathBuf, store_path: &PathBuf, config: &ScrapeConfig, policy: RetryPolicy) -> Result<()> {
    println!("Reading roster: {}", roster_path.display());
    let roster = read_roster(roster_path).context("Failed to read roster")?;
    println!("Found {} players", roster.len());

    let store = PlayerStore::new(store_path);
    let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
    let mut source = RetryingFetcher::new(fetcher, policy);

    let summary = pipeline::scrape_roster(&mut source, &roster, &store, config)
        .context("Scrape aborted; players already stored are kept")?;

    println!("Stored {} players in {}", summary.stored.len(), store_path.display());
    if !summary.already_stored.is_empty() {
        println!("Skipped {} players already in the store", summary.already_stored.len());
    }
    if !summary.no_data.is_empty() {
        println!("No data for {} players:", summary.no_data.len());
        for name in &summary.no_data {
            println!("  - {}", name);
        }
    }

    println!("Done!");
    Ok(())
}

fn score(store_path: &PathBuf, config: &ScoreConfig, top_n: usize) -> Result<()> {
    println!("Reading player store: {}", store_path.display());
    let store = PlayerStore::new(store_path);
    let scored = pipeline::run_scoring(&store, config).context("Failed to score players")?;
    println!("Scored {} players", scored.len());

    for metric in RankingMetric::ALL {
        println!();
        println!("Top {} by {}:", top_n.min(scored.len()), metric);
        for (rank, player) in draft_model::score::rank_by(&scored, metric)
            .into_iter()
            .take(top_n)
            .enumerate()
        {
            println!(
                "  {:>3}. {:<28} {:<4} {}",
                rank + 1,
                truncate_name(&player.row.player, 28),
                player.row.position,
                metric.score(player)
            );
        }
        println!("Wrote {}", config.ranking_path(metric).display());
    }
    if let Some(path) = &config.xlsx_path {
        println!("Wrote {}", path.display());
    }

    println!("Done!");
    Ok(())
}

fn inspect(store_path: &PathBuf) -> Result<()> {
    let store = PlayerStore::new(store_path);
    let rows = store.load().context("Failed to read player store")?;
    println!("Player store: {}", store_path.display());
    println!("Players: {}", rows.len());

    let distinct = store.stored_players()?.len();
    if distinct != rows.len() {
        println!("  {} distinct names ({} duplicate rows)", distinct, rows.len() - distinct);
    }
    println!();

    let population = normalize_population(&rows).context("Failed to normalize player store")?;
    println!("{:<6} {:>6} {:>10} {:>10}", "Column", "Count", "Mean", "Std Dev");
    for column in &population.columns {
        let flag = if column.count > 0 && column.is_degenerate() {
            "  (undefined z-scores)"
        } else {
            ""
        };
        println!(
            "{:<6} {:>6} {:>10.3} {:>10.3}{}",
            column.feature.label(),
            column.count,
            column.mean,
            column.std_dev,
            flag
        );
    }

    Ok(())
}

fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else {
        let kept: String = name.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

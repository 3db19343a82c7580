//! The two batch phases: scrape-and-store, then score-and-rank.
//!
//! They share nothing but the player store file and are run as separate
//! invocations.

use crate::aggregate::aggregate_game_log;
use crate::error::{DraftError, Result};
use crate::extract::{extract_game_log, extract_season};
use crate::fetch::PageSource;
use crate::merge::merge_player;
use crate::model::{PlayerFeatureRow, RosterEntry};
use crate::page::locate_table;
use crate::report::{default_ranking_file, write_ranking_file};
use crate::score::{rank_by, score_population, RankingMetric, ScoredPlayer};
use crate::source::{SourceUrls, GAME_LOG_TABLE_ID, SEASON_TABLE_ID};
use crate::store::PlayerStore;
use crate::xlsx::write_rankings_to_xlsx;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Settings for the scrape phase
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub urls: SourceUrls,
    /// Idle time between players
    pub delay: Duration,
    /// Season label to read shooting splits from; first row when unset
    pub season: Option<String>,
    /// Skip roster players whose name is already in the store
    pub skip_existing: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            urls: SourceUrls::default(),
            delay: Duration::from_secs(5),
            season: None,
            skip_existing: true,
        }
    }
}

/// What happened to each roster entry in a scrape run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScrapeSummary {
    pub stored: Vec<String>,
    pub already_stored: Vec<String>,
    pub no_data: Vec<String>,
}

/// Fetch, extract, aggregate and merge one player.
///
/// Returns `Ok(None)` when either page lacks the expected table, a column, or
/// a matching season row. Fetch failures are returned as errors.
pub fn scrape_player<S: PageSource>(
    source: &mut S,
    entry: &RosterEntry,
    config: &ScrapeConfig,
) -> Result<Option<PlayerFeatureRow>> {
    let id = entry.id();

    let game_log_url = config.urls.game_log_url(entry)?;
    let html = source.fetch(&game_log_url)?;
    let Some(table) = locate_table(&html, GAME_LOG_TABLE_ID) else {
        log::warn!("{}: {}", entry.player, DraftError::TableNotFound(GAME_LOG_TABLE_ID.to_string()));
        return Ok(None);
    };
    let games = match extract_game_log(&table) {
        Ok(games) => games,
        Err(e) if e.is_page_shape() => {
            log::warn!("{}: {}", entry.player, e);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    let game_features = aggregate_game_log(&id, &games);

    let season_url = config.urls.season_url(entry)?;
    let html = source.fetch(&season_url)?;
    let Some(table) = locate_table(&html, SEASON_TABLE_ID) else {
        log::warn!("{}: {}", entry.player, DraftError::TableNotFound(SEASON_TABLE_ID.to_string()));
        return Ok(None);
    };
    let season = match extract_season(&id, &table, config.season.as_deref()) {
        Ok(Some(season)) => season,
        Ok(None) => {
            log::warn!(
                "{}: no season row{}",
                entry.player,
                config.season.as_deref().map(|s| format!(" for {}", s)).unwrap_or_default()
            );
            return Ok(None);
        }
        Err(e) if e.is_page_shape() => {
            log::warn!("{}: {}", entry.player, e);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    log::debug!(
        "{}: {} games logged, shooting from {}",
        entry.player,
        game_features.games,
        season.season.as_deref().unwrap_or("unlabelled season")
    );
    merge_player(entry, &game_features, &season).map(Some)
}

/// Scrape every roster entry in order and append each result to the store.
///
/// Players without data are skipped; any other error aborts the run, leaving
/// rows already appended in place.
pub fn scrape_roster<S: PageSource>(
    source: &mut S,
    roster: &[RosterEntry],
    store: &PlayerStore,
    config: &ScrapeConfig,
) -> Result<ScrapeSummary> {
    let mut existing = if config.skip_existing {
        store.stored_players()?
    } else {
        Default::default()
    };

    let mut summary = ScrapeSummary::default();
    let mut fetched_any = false;

    for (idx, entry) in roster.iter().enumerate() {
        if existing.contains(&entry.player) {
            log::info!("{} already in {}, skipping", entry.player, store.path().display());
            summary.already_stored.push(entry.player.clone());
            continue;
        }

        if fetched_any && !config.delay.is_zero() {
            thread::sleep(config.delay);
        }
        fetched_any = true;

        log::info!("[{}/{}] Scraping {}", idx + 1, roster.len(), entry.player);
        match scrape_player(source, entry, config)? {
            Some(row) => {
                store.append(&row)?;
                if config.skip_existing {
                    existing.insert(entry.player.clone());
                }
                summary.stored.push(entry.player.clone());
            }
            None => summary.no_data.push(entry.player.clone()),
        }
    }

    Ok(summary)
}

/// Settings for the score phase
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub net_raw_total_path: PathBuf,
    pub adjusted_total_path: PathBuf,
    pub xlsx_path: Option<PathBuf>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            net_raw_total_path: PathBuf::from(default_ranking_file(RankingMetric::NetRawTotal)),
            adjusted_total_path: PathBuf::from(default_ranking_file(RankingMetric::AdjustedTotal)),
            xlsx_path: None,
        }
    }
}

impl ScoreConfig {
    pub fn ranking_path(&self, metric: RankingMetric) -> &PathBuf {
        match metric {
            RankingMetric::NetRawTotal => &self.net_raw_total_path,
            RankingMetric::AdjustedTotal => &self.adjusted_total_path,
        }
    }
}

/// Read the whole store, score it from scratch, and write both rankings
pub fn run_scoring(store: &PlayerStore, config: &ScoreConfig) -> Result<Vec<ScoredPlayer>> {
    if !store.exists() {
        return Err(DraftError::EmptyPopulation);
    }
    let rows = store.load()?;
    log::info!("Loaded {} players from {}", rows.len(), store.path().display());

    let scored = score_population(&rows)?;

    write_rankings(&scored, config)?;
    Ok(scored)
}

fn write_rankings(scored: &[ScoredPlayer], config: &ScoreConfig) -> Result<()> {
    let rankings: Vec<(RankingMetric, Vec<&ScoredPlayer>)> = RankingMetric::ALL
        .iter()
        .map(|&metric| (metric, rank_by(scored, metric)))
        .collect();

    for (metric, ranked) in &rankings {
        write_ranking_file(config.ranking_path(*metric), ranked)?;
    }
    if let Some(path) = &config.xlsx_path {
        write_rankings_to_xlsx(&rankings, path)?;
        log::info!("Wrote ranking workbook {}", path.display());
    }
    Ok(())
}

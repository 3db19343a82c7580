//! Top-N averaging of game-log stats

use crate::model::{GameLogFeatures, GameStat, PlayerGameRow, PlayerId};

/// Number of best games averaged per stat
pub const TOP_GAMES: usize = 10;

/// Mean of the `n` largest values. With fewer than `n` values the mean is
/// taken over all of them; with none the result is `None`.
pub fn top_n_average(values: &[i64], n: usize) -> Option<f64> {
    if values.is_empty() || n == 0 {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let top = &sorted[..n.min(sorted.len())];
    let sum: f64 = top.iter().map(|&v| v as f64).sum();
    Some(sum / top.len() as f64)
}

/// Average each stat's best `TOP_GAMES` games independently.
///
/// Missing cells are skipped per stat, so a stat can average over fewer games
/// than the log holds. Short logs bias the averages upward; that is logged,
/// not corrected.
pub fn aggregate_game_log(player: &PlayerId, rows: &[PlayerGameRow]) -> GameLogFeatures {
    aggregate_top_n(player, rows, TOP_GAMES)
}

pub fn aggregate_top_n(player: &PlayerId, rows: &[PlayerGameRow], n: usize) -> GameLogFeatures {
    if rows.len() < n {
        log::debug!(
            "{}: only {} games logged, averaging fewer than {}",
            player,
            rows.len(),
            n
        );
    }

    let mut features = GameLogFeatures::new(player.clone());
    features.games = rows.len();
    for stat in GameStat::ALL {
        let values: Vec<i64> = rows.iter().filter_map(|r| r.get(stat)).collect();
        features = features.with(stat, top_n_average(&values, n));
    }
    features
}

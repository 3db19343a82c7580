//! Typed rows from raw game-log and season tables

use crate::error::{DraftError, Result};
use crate::model::{GameStat, PlayerGameRow, PlayerId, PlayerSeasonRow};
use crate::page::RawTable;

/// Games above this many points are treated as scrape errors
pub const MAX_VALID_POINTS: i64 = 60;

pub const SEASON_COLUMN: &str = "Season";
pub const THREE_POINT_PCT_COLUMN: &str = "3P%";
pub const FREE_THROW_PCT_COLUMN: &str = "FT%";
pub const THREE_POINT_ATTEMPTS_COLUMN: &str = "3PA";

/// Coerce a cell to an integer; anything non-numeric is missing
pub fn coerce_int(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    if let Ok(v) = cell.parse::<i64>() {
        return Some(v);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Some(v as i64),
        _ => None,
    }
}

/// Coerce a cell to a float; blanks and text are missing
pub fn coerce_float(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn require_column(table: &RawTable, column: &str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| DraftError::MissingColumn {
            table: table.id.clone(),
            column: column.to_string(),
        })
}

/// Extract the six stat columns from a game log.
///
/// Repeated header rows (points cell reads `PTS`) are dropped, cells are
/// coerced to integers, and games with missing points or more than
/// [`MAX_VALID_POINTS`] are discarded.
pub fn extract_game_log(table: &RawTable) -> Result<Vec<PlayerGameRow>> {
    let mut columns = Vec::with_capacity(GameStat::ALL.len());
    for stat in GameStat::ALL {
        columns.push((stat, require_column(table, stat.label())?));
    }
    let points_col = columns[0].1;

    let mut rows = Vec::new();
    for row_idx in 0..table.len() {
        if table.cell(row_idx, points_col) == GameStat::Points.label() {
            continue;
        }

        let mut row = PlayerGameRow::default();
        for &(stat, col) in &columns {
            row.set(stat, coerce_int(table.cell(row_idx, col)));
        }

        match row.points {
            Some(points) if points <= MAX_VALID_POINTS => rows.push(row),
            Some(points) => {
                log::debug!("Dropping game row {} with {} points", row_idx + 1, points);
            }
            None => {}
        }
    }

    Ok(rows)
}

/// Extract the shooting splits for one season.
///
/// Without a season filter the first row is used. With one, the first row
/// whose `Season` cell matches is used, and `None` is returned when no row does.
pub fn extract_season(
    player: &PlayerId,
    table: &RawTable,
    season: Option<&str>,
) -> Result<Option<PlayerSeasonRow>> {
    let three_pct = require_column(table, THREE_POINT_PCT_COLUMN)?;
    let ft_pct = require_column(table, FREE_THROW_PCT_COLUMN)?;
    let three_att = require_column(table, THREE_POINT_ATTEMPTS_COLUMN)?;
    let season_col = match season {
        Some(_) => Some(require_column(table, SEASON_COLUMN)?),
        None => table.column_index(SEASON_COLUMN),
    };

    let row_idx = match (season, season_col) {
        (Some(wanted), Some(col)) => {
            (0..table.len()).find(|&r| table.cell(r, col) == wanted)
        }
        _ if table.is_empty() => None,
        _ => Some(0),
    };

    let Some(row_idx) = row_idx else {
        return Ok(None);
    };

    Ok(Some(PlayerSeasonRow {
        player: player.clone(),
        season: season_col
            .map(|col| table.cell(row_idx, col).to_string())
            .filter(|s| !s.is_empty()),
        three_point_pct: coerce_float(table.cell(row_idx, three_pct)),
        free_throw_pct: coerce_float(table.cell(row_idx, ft_pct)),
        three_point_attempts: coerce_float(table.cell(row_idx, three_att)),
    }))
}

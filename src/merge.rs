use crate::error::{DraftError, Result};
use crate::model::{GameLogFeatures, PlayerFeatureRow, PlayerId, PlayerSeasonRow, RosterEntry};

fn check_identity(expected: &PlayerId, found: &PlayerId) -> Result<()> {
    if expected != found {
        return Err(DraftError::IdentityMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Join a player's game-log and season features into one store row.
///
/// All three inputs must describe the same player id.
pub fn merge_player(
    entry: &RosterEntry,
    game: &GameLogFeatures,
    season: &PlayerSeasonRow,
) -> Result<PlayerFeatureRow> {
    let id = entry.id();
    check_identity(&id, &game.player)?;
    check_identity(&id, &season.player)?;

    Ok(PlayerFeatureRow {
        player: entry.player.clone(),
        points: game.points,
        assists: game.assists,
        total_rebounds: game.total_rebounds,
        blocks: game.blocks,
        offensive_rebounds: game.offensive_rebounds,
        steals: game.steals,
        position: entry.position.clone(),
        class_rating: entry.class_rating,
        three_point_pct: season.three_point_pct,
        free_throw_pct: season.free_throw_pct,
        three_point_attempts: season.three_point_attempts,
    })
}

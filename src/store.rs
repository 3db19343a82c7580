//! Append-only CSV store of merged player rows

use crate::error::{DraftError, Result};
use crate::model::{PlayerFeatureRow, STORE_HEADER};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Default file name of the player store
pub const DEFAULT_STORE_FILE: &str = "transformed_player_db.csv";

/// Flat player table on disk.
///
/// The first append creates the file with the canonical header; later appends
/// add exactly one row each. Rows are never rewritten or deduplicated here.
#[derive(Debug, Clone)]
pub struct PlayerStore {
    path: PathBuf,
}

impl PlayerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store file exists and holds at least a header
    pub fn exists(&self) -> bool {
        std::fs::metadata(&self.path)
            .map(|m| m.is_file() && m.len() > 0)
            .unwrap_or(false)
    }

    /// Append one player row, writing the header first if the file is new
    pub fn append(&self, row: &PlayerFeatureRow) -> Result<()> {
        let write_header = !self.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(row)?;
        writer.flush()?;

        log::debug!("Appended {} to {}", row.player, self.path.display());
        Ok(())
    }

    /// Read every stored row, in append order
    pub fn load(&self) -> Result<Vec<PlayerFeatureRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let found: Vec<&str> = headers.iter().collect();
        if found != STORE_HEADER {
            return Err(DraftError::InvalidStore {
                path: self.path.display().to_string(),
                message: format!("unexpected header: {}", found.join(",")),
            });
        }

        let mut rows = Vec::new();
        for result in reader.deserialize::<PlayerFeatureRow>() {
            rows.push(result?);
        }
        Ok(rows)
    }

    /// Names of players already in the store; empty if the file doesn't exist yet
    pub fn stored_players(&self) -> Result<HashSet<String>> {
        if !self.exists() {
            return Ok(HashSet::new());
        }
        Ok(self.load()?.into_iter().map(|r| r.player).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, points: f64) -> PlayerFeatureRow {
        PlayerFeatureRow {
            player: name.to_string(),
            points: Some(points),
            assists: Some(4.2),
            total_rebounds: Some(9.1),
            blocks: Some(1.7),
            offensive_rebounds: Some(2.5),
            steals: Some(1.9),
            position: "F".to_string(),
            class_rating: 1.0,
            three_point_pct: Some(0.385),
            free_throw_pct: None,
            three_point_attempts: Some(4.3),
        }
    }

    #[test]
    fn test_append_n_rows_gives_n_plus_one_lines() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlayerStore::new(dir.path().join(DEFAULT_STORE_FILE));

        for i in 0..3 {
            store.append(&row(&format!("Player {}", i), 20.0 + i as f64)).unwrap();
        }

        let text = std::fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], STORE_HEADER.join(","));
        assert!(lines[1].starts_with("Player 0,20.0,"));
        assert_eq!(lines.iter().filter(|l| l.starts_with("Player,")).count(), 1);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlayerStore::new(dir.path().join("db.csv"));
        let original = row("Cooper Flagg", 25.3);

        store.append(&original).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, vec![original]);
    }

    #[test]
    fn test_duplicate_appends_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlayerStore::new(dir.path().join("db.csv"));
        store.append(&row("Cooper Flagg", 25.0)).unwrap();
        store.append(&row("Cooper Flagg", 25.0)).unwrap();

        assert_eq!(store.load().unwrap().len(), 2);
        assert_eq!(store.stored_players().unwrap().len(), 1);
    }

    #[test]
    fn test_write_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlayerStore::new(dir.path().join("missing").join("db.csv"));
        assert!(matches!(store.append(&row("X", 1.0)), Err(DraftError::Io(_))));
    }

    #[test]
    fn test_stored_players_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlayerStore::new(dir.path().join("db.csv"));
        assert!(!store.exists());
        assert!(store.stored_players().unwrap().is_empty());
    }

    #[test]
    fn test_load_rejects_foreign_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.csv");
        std::fs::write(&path, "Name,Points\nX,1\n").unwrap();
        let err = PlayerStore::new(&path).load().unwrap_err();
        assert!(matches!(err, DraftError::InvalidStore { .. }));
    }
}

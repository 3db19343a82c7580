use crate::error::{DraftError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Source-site slug for a player, e.g. `cooper-flagg-1`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(name: &str, disambiguator: u32) -> Self {
        let slug = name.trim().to_lowercase().replace(' ', "-");
        PlayerId(format!("{}-{}", slug, disambiguator))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the input roster
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RosterEntry {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Repeat Name")]
    pub repeat_name: u32,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Class Rating")]
    pub class_rating: f64,
}

impl RosterEntry {
    pub fn id(&self) -> PlayerId {
        PlayerId::new(&self.player, self.repeat_name)
    }
}

/// Read the roster CSV (`Player, Repeat Name, Position, Class Rating`)
pub fn read_roster(path: &Path) -> Result<Vec<RosterEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    read_roster_from(&mut reader)
}

fn read_roster_from<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<Vec<RosterEntry>> {
    let mut entries = Vec::new();
    for (idx, result) in reader.deserialize::<RosterEntry>().enumerate() {
        let entry = result.map_err(|e| DraftError::Roster(format!("row {}: {}", idx + 1, e)))?;
        if entry.player.is_empty() {
            return Err(DraftError::Roster(format!("row {}: empty player name", idx + 1)));
        }
        entries.push(entry);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_from_str(s: &str) -> Result<Vec<RosterEntry>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(s.as_bytes());
        read_roster_from(&mut reader)
    }

    #[test]
    fn test_player_id_slug() {
        assert_eq!(PlayerId::new("Cooper Flagg", 1).as_str(), "cooper-flagg-1");
        assert_eq!(PlayerId::new(" Ace Bailey ", 2).to_string(), "ace-bailey-2");
    }

    #[test]
    fn test_read_roster() {
        let roster = roster_from_str(
            "Player,Repeat Name,Position,Class Rating\n\
             Cooper Flagg,1,F,1\n\
             Dylan Harper,1,G,0.9\n",
        )
        .unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[1].player, "Dylan Harper");
        assert_eq!(roster[1].position, "G");
        assert!((roster[1].class_rating - 0.9).abs() < 1e-12);
        assert_eq!(roster[0].id().as_str(), "cooper-flagg-1");
    }

    #[test]
    fn test_read_roster_bad_row() {
        let err = roster_from_str(
            "Player,Repeat Name,Position,Class Rating\n\
             Cooper Flagg,one,F,1\n",
        )
        .unwrap_err();
        assert!(matches!(err, DraftError::Roster(msg) if msg.starts_with("row 1")));
    }
}

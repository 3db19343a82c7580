//! Ranking artifacts

use crate::error::Result;
use crate::model::{Feature, STORE_HEADER};
use crate::score::{RankingMetric, ScoredPlayer};
use std::io::Write;
use std::path::Path;

pub const DEFAULT_NET_RAW_TOTAL_FILE: &str = "net_raw_total_df.csv";
pub const DEFAULT_ADJUSTED_TOTAL_FILE: &str = "adjusted_total_df.csv";

pub const TOTAL_COLUMNS: [&str; 3] = ["Raw Total", "Net Raw Total", "Adjusted Total"];

pub fn default_ranking_file(metric: RankingMetric) -> &'static str {
    match metric {
        RankingMetric::NetRawTotal => DEFAULT_NET_RAW_TOTAL_FILE,
        RankingMetric::AdjustedTotal => DEFAULT_ADJUSTED_TOTAL_FILE,
    }
}

/// Store columns (features replaced by z-scores) followed by the totals
pub fn ranking_header() -> Vec<&'static str> {
    STORE_HEADER.iter().chain(TOTAL_COLUMNS.iter()).copied().collect()
}

/// One ranking row as text. Missing z-scores are blank; undefined ones read
/// `undefined`.
pub fn ranking_record(player: &ScoredPlayer) -> Vec<String> {
    let z = |f: Feature| player.normalized.get(f).to_string();
    vec![
        player.row.player.clone(),
        z(Feature::Points),
        z(Feature::Assists),
        z(Feature::TotalRebounds),
        z(Feature::Blocks),
        z(Feature::OffensiveRebounds),
        z(Feature::Steals),
        player.row.position.clone(),
        player.row.class_rating.to_string(),
        z(Feature::ThreePointPct),
        z(Feature::FreeThrowPct),
        z(Feature::ThreePointAttempts),
        player.raw_total.to_string(),
        player.net_raw_total.to_string(),
        player.adjusted_total.to_string(),
    ]
}

pub fn write_ranking<W: Write>(writer: W, ranked: &[&ScoredPlayer]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(ranking_header())?;
    for player in ranked {
        writer.write_record(ranking_record(player))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a ranking CSV, replacing any previous file
pub fn write_ranking_file(path: &Path, ranked: &[&ScoredPlayer]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_ranking(file, ranked)?;
    log::info!("Wrote {} ranked players to {}", ranked.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlayerFeatureRow;
    use crate::score::{rank_by, score_population};

    fn player(name: &str, points: f64, blocks: f64) -> PlayerFeatureRow {
        PlayerFeatureRow {
            player: name.to_string(),
            points: Some(points),
            assists: None,
            total_rebounds: None,
            blocks: Some(blocks),
            offensive_rebounds: None,
            steals: None,
            position: "C".to_string(),
            class_rating: 1.0,
            three_point_pct: None,
            free_throw_pct: None,
            three_point_attempts: None,
        }
    }

    #[test]
    fn test_ranking_csv() {
        let rows = vec![player("Low", 10.0, 1.0), player("High", 20.0, 3.0)];
        let scored = score_population(&rows).unwrap();
        let ranked = rank_by(&scored, RankingMetric::NetRawTotal);

        let mut buf = Vec::new();
        write_ranking(&mut buf, &ranked).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Player,PTS,AST,TRB,BLK,ORB,STL,Position,Class Rating,3P%,FT%,3PA,Raw Total,Net Raw Total,Adjusted Total"
        );
        assert!(lines[1].starts_with("High,1,,,1,,,C,1,,,,2,"));
        assert!(lines[2].starts_with("Low,-1,,,-1,,,C,1,,,,-2,"));
    }

    #[test]
    fn test_undefined_is_written() {
        let rows = vec![player("A", 10.0, 1.0), player("B", 20.0, 1.0)];
        let scored = score_population(&rows).unwrap();
        let record = ranking_record(&scored[0]);
        assert_eq!(record[4], "undefined");
        assert_eq!(record[14], "undefined");
    }

    #[test]
    fn test_write_ranking_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_ADJUSTED_TOTAL_FILE);
        let rows = vec![player("A", 10.0, 1.0), player("B", 20.0, 2.0)];
        let scored = score_population(&rows).unwrap();
        write_ranking_file(&path, &rank_by(&scored, RankingMetric::AdjustedTotal)).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let names: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().get(0).unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}

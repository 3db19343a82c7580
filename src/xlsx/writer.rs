use crate::error::Result;
use crate::model::Feature;
use crate::normalize::ZScore;
use crate::report::ranking_header;
use crate::score::{RankingMetric, Score, ScoredPlayer};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

/// Write one worksheet per ranking into a single workbook
pub fn write_rankings_to_xlsx(
    rankings: &[(RankingMetric, Vec<&ScoredPlayer>)],
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    for (metric, ranked) in rankings {
        let sheet = workbook.add_worksheet();
        write_ranking_sheet(sheet, *metric, ranked)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_ranking_sheet(
    sheet: &mut Worksheet,
    metric: RankingMetric,
    ranked: &[&ScoredPlayer],
) -> Result<()> {
    sheet.set_name(metric.label())?;

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin);
    let center_format = Format::new().set_align(FormatAlign::Center);
    let z_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.000");
    let total_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.00");

    // Rank column, then the CSV columns
    sheet.write_string_with_format(0, 0, "Rank", &header_format)?;
    for (col, header) in ranking_header().iter().enumerate() {
        sheet.write_string_with_format(0, (col + 1) as u16, *header, &header_format)?;
    }

    sheet.set_column_width(0, 6)?;
    sheet.set_column_width(1, 24)?;
    sheet.set_column_width(8, 10)?;
    sheet.set_column_width(9, 12)?;
    for col in 13..16u16 {
        sheet.set_column_width(col, 15)?;
    }
    sheet.set_freeze_panes(1, 2)?;

    for (idx, player) in ranked.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_number_with_format(row, 0, row as f64, &center_format)?;
        sheet.write_string(row, 1, &player.row.player)?;

        for feature in Feature::ALL {
            let col = feature_column(feature);
            write_z_score(sheet, row, col, player.normalized.get(feature), &z_format)?;
        }

        sheet.write_string_with_format(row, 8, &player.row.position, &center_format)?;
        sheet.write_number_with_format(row, 9, player.row.class_rating, &center_format)?;

        for (offset, score) in [player.raw_total, player.net_raw_total, player.adjusted_total]
            .into_iter()
            .enumerate()
        {
            write_score(sheet, row, 13 + offset as u16, score, &total_format)?;
        }
    }

    Ok(())
}

/// Worksheet column of a feature: store column + 1 for the rank column
fn feature_column(feature: Feature) -> u16 {
    match feature.index() {
        i @ 0..=5 => (i + 2) as u16,
        i => (i + 4) as u16,
    }
}

fn write_z_score(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    z: ZScore,
    format: &Format,
) -> Result<()> {
    match z {
        ZScore::Value(v) => {
            sheet.write_number_with_format(row, col, v, format)?;
        }
        ZScore::Missing => {}
        ZScore::Undefined => {
            sheet.write_string(row, col, "undefined")?;
        }
    }
    Ok(())
}

fn write_score(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    score: Score,
    format: &Format,
) -> Result<()> {
    match score {
        Score::Defined(v) => {
            sheet.write_number_with_format(row, col, v, format)?;
        }
        Score::Undefined => {
            sheet.write_string(row, col, "undefined")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlayerFeatureRow;
    use crate::score::{rank_by, score_population};

    #[test]
    fn test_feature_columns_skip_position_and_class() {
        // Rank, Player, PTS..STL, Position, Class Rating, 3P%, FT%, 3PA
        assert_eq!(feature_column(Feature::Points), 2);
        assert_eq!(feature_column(Feature::Steals), 7);
        assert_eq!(feature_column(Feature::ThreePointPct), 10);
        assert_eq!(feature_column(Feature::ThreePointAttempts), 12);
    }

    #[test]
    fn test_write_rankings_workbook() {
        let rows: Vec<PlayerFeatureRow> = [("A", 10.0), ("B", 14.0), ("C", 12.0)]
            .iter()
            .map(|(name, pts)| PlayerFeatureRow {
                player: name.to_string(),
                points: Some(*pts),
                assists: Some(3.0),
                total_rebounds: None,
                blocks: None,
                offensive_rebounds: None,
                steals: None,
                position: "G".to_string(),
                class_rating: 1.0,
                three_point_pct: None,
                free_throw_pct: None,
                three_point_attempts: None,
            })
            .collect();
        let scored = score_population(&rows).unwrap();
        let rankings: Vec<(RankingMetric, Vec<&ScoredPlayer>)> = RankingMetric::ALL
            .iter()
            .map(|m| (*m, rank_by(&scored, *m)))
            .collect();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rankings.xlsx");
        write_rankings_to_xlsx(&rankings, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}

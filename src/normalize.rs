//! Population z-scores over the player store

use crate::error::{DraftError, Result};
use crate::model::{Feature, PlayerFeatureRow};
use std::fmt;

/// A normalized feature value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZScore {
    Value(f64),
    /// The raw feature was blank for this player
    Missing,
    /// The column had zero (or non-finite) spread, so no z-score exists
    Undefined,
}

impl ZScore {
    pub fn value(&self) -> Option<f64> {
        match self {
            ZScore::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ZScore::Undefined)
    }
}

impl fmt::Display for ZScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZScore::Value(v) => write!(f, "{}", v),
            ZScore::Missing => Ok(()),
            ZScore::Undefined => write!(f, "undefined"),
        }
    }
}

/// Population statistics of one feature column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub feature: Feature,
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divisor N)
    pub std_dev: f64,
}

impl ColumnStats {
    pub fn from_values(feature: Feature, values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self { feature, count, mean: f64::NAN, std_dev: f64::NAN };
        }
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self { feature, count, mean, std_dev: variance.sqrt() }
    }

    /// Whether z-scores can be computed for this column
    pub fn is_degenerate(&self) -> bool {
        !(self.std_dev.is_finite() && self.std_dev > 0.0)
    }

    pub fn z_score(&self, value: Option<f64>) -> ZScore {
        match value {
            None => ZScore::Missing,
            Some(_) if self.is_degenerate() => ZScore::Undefined,
            Some(v) => ZScore::Value((v - self.mean) / self.std_dev),
        }
    }
}

/// One player's nine z-scores, in `Feature::ALL` order
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFeatures {
    pub values: [ZScore; 9],
}

impl NormalizedFeatures {
    pub fn get(&self, feature: Feature) -> ZScore {
        self.values[feature.index()]
    }
}

/// Z-scores for the whole population, row-aligned with the input
#[derive(Debug, Clone)]
pub struct NormalizedPopulation {
    pub columns: Vec<ColumnStats>,
    pub rows: Vec<NormalizedFeatures>,
}

impl NormalizedPopulation {
    pub fn undefined_columns(&self) -> impl Iterator<Item = Feature> + '_ {
        self.columns
            .iter()
            .filter(|c| c.count > 0 && c.is_degenerate())
            .map(|c| c.feature)
    }
}

/// Standardize every feature column over the full population.
///
/// Statistics are recomputed from all rows on every call. Blank values are
/// left out of a column's mean and spread and stay `Missing`.
pub fn normalize_population(rows: &[PlayerFeatureRow]) -> Result<NormalizedPopulation> {
    if rows.is_empty() {
        return Err(DraftError::EmptyPopulation);
    }

    let columns: Vec<ColumnStats> = Feature::ALL
        .iter()
        .map(|&feature| {
            let values: Vec<f64> = rows.iter().filter_map(|r| r.feature(feature)).collect();
            ColumnStats::from_values(feature, &values)
        })
        .collect();

    let normalized = NormalizedPopulation {
        rows: rows
            .iter()
            .map(|row| NormalizedFeatures {
                values: std::array::from_fn(|i| columns[i].z_score(row.feature(Feature::ALL[i]))),
            })
            .collect(),
        columns,
    };

    for feature in normalized.undefined_columns() {
        log::warn!(
            "Column {} has zero spread across {} players; its z-scores are undefined",
            feature,
            rows.len()
        );
    }

    Ok(normalized)
}

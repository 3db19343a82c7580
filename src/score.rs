//! Composite scores and rankings

use crate::error::Result;
use crate::model::PlayerFeatureRow;
use crate::normalize::{normalize_population, NormalizedFeatures, ZScore};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Net Raw Total = NET_SCALE * NET_BASE ^ raw_total
pub const NET_SCALE: f64 = 5.0;
pub const NET_BASE: f64 = 1.2;
/// Adjusted Total = net * CLASS_BASE ^ (1 - class_rating)
pub const CLASS_BASE: f64 = 1.7;

/// A composite score, or `Undefined` when an input z-score was undefined
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Defined(f64),
    Undefined,
}

impl Score {
    fn from_finite(v: f64) -> Self {
        if v.is_finite() {
            Score::Defined(v)
        } else {
            Score::Undefined
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Defined(v) => Some(*v),
            Score::Undefined => None,
        }
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Score {
        match self {
            Score::Defined(v) => Score::from_finite(f(v)),
            Score::Undefined => Score::Undefined,
        }
    }

    /// Descending order with every undefined score after every defined one
    pub fn cmp_desc(&self, other: &Score) -> Ordering {
        match (self, other) {
            (Score::Defined(a), Score::Defined(b)) => b.total_cmp(a),
            (Score::Defined(_), Score::Undefined) => Ordering::Less,
            (Score::Undefined, Score::Defined(_)) => Ordering::Greater,
            (Score::Undefined, Score::Undefined) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Defined(v) => write!(f, "{}", v),
            Score::Undefined => write!(f, "undefined"),
        }
    }
}

/// Sum of the nine z-scores. Missing features add nothing; a single undefined
/// feature makes the total undefined.
pub fn raw_total(features: &NormalizedFeatures) -> Score {
    let mut total = 0.0;
    for z in &features.values {
        match z {
            ZScore::Value(v) => total += v,
            ZScore::Missing => {}
            ZScore::Undefined => return Score::Undefined,
        }
    }
    Score::from_finite(total)
}

pub fn net_raw_total(raw_total: f64) -> f64 {
    NET_SCALE * NET_BASE.powf(raw_total)
}

/// Class multiplier: 1 at a rating of 1, above 1 for lower ratings, below 1 for higher
pub fn class_multiplier(class_rating: f64) -> f64 {
    CLASS_BASE.powf(1.0 - class_rating)
}

pub fn adjusted_total(net_raw_total: f64, class_rating: f64) -> f64 {
    net_raw_total * class_multiplier(class_rating)
}

/// A stored player with z-scores and composite totals attached
#[derive(Debug, Clone)]
pub struct ScoredPlayer {
    pub row: PlayerFeatureRow,
    pub normalized: NormalizedFeatures,
    pub raw_total: Score,
    pub net_raw_total: Score,
    pub adjusted_total: Score,
}

/// Normalize the whole population and compute every player's totals
pub fn score_population(rows: &[PlayerFeatureRow]) -> Result<Vec<ScoredPlayer>> {
    warn_duplicates(rows);

    let population = normalize_population(rows)?;

    let scored: Vec<ScoredPlayer> = rows
        .iter()
        .zip(population.rows)
        .map(|(row, normalized)| {
            let raw = raw_total(&normalized);
            let net = raw.map(net_raw_total);
            let class_rating = row.class_rating;
            let adjusted = net.map(|n| adjusted_total(n, class_rating));
            ScoredPlayer {
                row: row.clone(),
                normalized,
                raw_total: raw,
                net_raw_total: net,
                adjusted_total: adjusted,
            }
        })
        .collect();

    let undefined = scored.iter().filter(|p| p.adjusted_total == Score::Undefined).count();
    if undefined > 0 {
        log::warn!("{} of {} players have undefined totals", undefined, scored.len());
    }

    Ok(scored)
}

fn warn_duplicates(rows: &[PlayerFeatureRow]) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.player.as_str()).or_default() += 1;
    }
    let mut duplicated: Vec<(&str, usize)> = counts.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicated.sort();
    for (name, n) in duplicated {
        log::warn!("{} appears {} times in the player store; each row is scored", name, n);
    }
}

/// The two published rankings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMetric {
    NetRawTotal,
    AdjustedTotal,
}

impl RankingMetric {
    pub const ALL: [RankingMetric; 2] = [RankingMetric::NetRawTotal, RankingMetric::AdjustedTotal];

    pub fn label(&self) -> &'static str {
        match self {
            RankingMetric::NetRawTotal => "Net Raw Total",
            RankingMetric::AdjustedTotal => "Adjusted Total",
        }
    }

    pub fn score(&self, player: &ScoredPlayer) -> Score {
        match self {
            RankingMetric::NetRawTotal => player.net_raw_total,
            RankingMetric::AdjustedTotal => player.adjusted_total,
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Players sorted by `metric`, highest first. Ties keep store order.
pub fn rank_by(players: &[ScoredPlayer], metric: RankingMetric) -> Vec<&ScoredPlayer> {
    let mut ranked: Vec<&ScoredPlayer> = players.iter().collect();
    ranked.sort_by(|a, b| metric.score(a).cmp_desc(&metric.score(b)));
    ranked
}

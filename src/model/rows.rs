use super::player::PlayerId;
use super::stats::{Feature, GameStat};
use serde::{Deserialize, Serialize};

/// One game from a player's log; every stat is nullable after coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerGameRow {
    pub points: Option<i64>,
    pub assists: Option<i64>,
    pub total_rebounds: Option<i64>,
    pub blocks: Option<i64>,
    pub offensive_rebounds: Option<i64>,
    pub steals: Option<i64>,
}

impl PlayerGameRow {
    pub fn get(&self, stat: GameStat) -> Option<i64> {
        match stat {
            GameStat::Points => self.points,
            GameStat::Assists => self.assists,
            GameStat::TotalRebounds => self.total_rebounds,
            GameStat::Blocks => self.blocks,
            GameStat::OffensiveRebounds => self.offensive_rebounds,
            GameStat::Steals => self.steals,
        }
    }

    pub fn set(&mut self, stat: GameStat, value: Option<i64>) {
        match stat {
            GameStat::Points => self.points = value,
            GameStat::Assists => self.assists = value,
            GameStat::TotalRebounds => self.total_rebounds = value,
            GameStat::Blocks => self.blocks = value,
            GameStat::OffensiveRebounds => self.offensive_rebounds = value,
            GameStat::Steals => self.steals = value,
        }
    }
}

/// Shooting splits for one season
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSeasonRow {
    pub player: PlayerId,
    pub season: Option<String>,
    pub three_point_pct: Option<f64>,
    pub free_throw_pct: Option<f64>,
    pub three_point_attempts: Option<f64>,
}

/// Top-N averages of each game stat for one player
#[derive(Debug, Clone, PartialEq)]
pub struct GameLogFeatures {
    pub player: PlayerId,
    pub games: usize,
    pub points: Option<f64>,
    pub assists: Option<f64>,
    pub total_rebounds: Option<f64>,
    pub blocks: Option<f64>,
    pub offensive_rebounds: Option<f64>,
    pub steals: Option<f64>,
}

impl GameLogFeatures {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            games: 0,
            points: None,
            assists: None,
            total_rebounds: None,
            blocks: None,
            offensive_rebounds: None,
            steals: None,
        }
    }

    pub fn get(&self, stat: GameStat) -> Option<f64> {
        match stat {
            GameStat::Points => self.points,
            GameStat::Assists => self.assists,
            GameStat::TotalRebounds => self.total_rebounds,
            GameStat::Blocks => self.blocks,
            GameStat::OffensiveRebounds => self.offensive_rebounds,
            GameStat::Steals => self.steals,
        }
    }

    pub fn with(mut self, stat: GameStat, value: Option<f64>) -> Self {
        match stat {
            GameStat::Points => self.points = value,
            GameStat::Assists => self.assists = value,
            GameStat::TotalRebounds => self.total_rebounds = value,
            GameStat::Blocks => self.blocks = value,
            GameStat::OffensiveRebounds => self.offensive_rebounds = value,
            GameStat::Steals => self.steals = value,
        }
        self
    }
}

/// A player's merged record as persisted in the player store.
///
/// Field order is the store's canonical header:
/// `Player,PTS,AST,TRB,BLK,ORB,STL,Position,Class Rating,3P%,FT%,3PA`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerFeatureRow {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "PTS")]
    pub points: Option<f64>,
    #[serde(rename = "AST")]
    pub assists: Option<f64>,
    #[serde(rename = "TRB")]
    pub total_rebounds: Option<f64>,
    #[serde(rename = "BLK")]
    pub blocks: Option<f64>,
    #[serde(rename = "ORB")]
    pub offensive_rebounds: Option<f64>,
    #[serde(rename = "STL")]
    pub steals: Option<f64>,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Class Rating")]
    pub class_rating: f64,
    #[serde(rename = "3P%")]
    pub three_point_pct: Option<f64>,
    #[serde(rename = "FT%")]
    pub free_throw_pct: Option<f64>,
    #[serde(rename = "3PA")]
    pub three_point_attempts: Option<f64>,
}

pub const STORE_HEADER: [&str; 12] = [
    "Player",
    "PTS",
    "AST",
    "TRB",
    "BLK",
    "ORB",
    "STL",
    "Position",
    "Class Rating",
    "3P%",
    "FT%",
    "3PA",
];

impl PlayerFeatureRow {
    pub fn feature(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Points => self.points,
            Feature::Assists => self.assists,
            Feature::TotalRebounds => self.total_rebounds,
            Feature::Blocks => self.blocks,
            Feature::OffensiveRebounds => self.offensive_rebounds,
            Feature::Steals => self.steals,
            Feature::ThreePointPct => self.three_point_pct,
            Feature::FreeThrowPct => self.free_throw_pct,
            Feature::ThreePointAttempts => self.three_point_attempts,
        }
    }
}

use std::fmt;

/// The six per-game box score columns read from a game log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStat {
    Points,
    Assists,
    TotalRebounds,
    Blocks,
    OffensiveRebounds,
    Steals,
}

impl GameStat {
    pub const ALL: [GameStat; 6] = [
        GameStat::Points,
        GameStat::Assists,
        GameStat::TotalRebounds,
        GameStat::Blocks,
        GameStat::OffensiveRebounds,
        GameStat::Steals,
    ];

    /// Column header used by the source pages and the player store
    pub fn label(&self) -> &'static str {
        match self {
            GameStat::Points => "PTS",
            GameStat::Assists => "AST",
            GameStat::TotalRebounds => "TRB",
            GameStat::Blocks => "BLK",
            GameStat::OffensiveRebounds => "ORB",
            GameStat::Steals => "STL",
        }
    }
}

impl fmt::Display for GameStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The nine scored feature columns, in store order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Points,
    Assists,
    TotalRebounds,
    Blocks,
    OffensiveRebounds,
    Steals,
    ThreePointPct,
    FreeThrowPct,
    ThreePointAttempts,
}

impl Feature {
    pub const ALL: [Feature; 9] = [
        Feature::Points,
        Feature::Assists,
        Feature::TotalRebounds,
        Feature::Blocks,
        Feature::OffensiveRebounds,
        Feature::Steals,
        Feature::ThreePointPct,
        Feature::FreeThrowPct,
        Feature::ThreePointAttempts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Feature::Points => "PTS",
            Feature::Assists => "AST",
            Feature::TotalRebounds => "TRB",
            Feature::Blocks => "BLK",
            Feature::OffensiveRebounds => "ORB",
            Feature::Steals => "STL",
            Feature::ThreePointPct => "3P%",
            Feature::FreeThrowPct => "FT%",
            Feature::ThreePointAttempts => "3PA",
        }
    }

    /// Position within `Feature::ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_game_stat(stat: GameStat) -> Self {
        match stat {
            GameStat::Points => Feature::Points,
            GameStat::Assists => Feature::Assists,
            GameStat::TotalRebounds => Feature::TotalRebounds,
            GameStat::Blocks => Feature::Blocks,
            GameStat::OffensiveRebounds => Feature::OffensiveRebounds,
            GameStat::Steals => Feature::Steals,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

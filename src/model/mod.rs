pub mod player;
pub mod rows;
pub mod stats;

pub use player::{read_roster, PlayerId, RosterEntry};
pub use rows::{GameLogFeatures, PlayerFeatureRow, PlayerGameRow, PlayerSeasonRow, STORE_HEADER};
pub use stats::{Feature, GameStat};

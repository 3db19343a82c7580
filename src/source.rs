//! Source page URLs for a roster entry

use crate::error::{DraftError, Result};
use crate::model::RosterEntry;

pub const DEFAULT_GAME_LOG_URL: &str =
    "https://www.sports-reference.com/cbb/players/cooper-flagg-1/gamelog/2025";
pub const DEFAULT_SEASON_URL: &str =
    "https://www.sports-reference.com/cbb/players/cooper-flagg-1.html";

pub const GAME_LOG_TABLE_ID: &str = "player_game_log";
pub const SEASON_TABLE_ID: &str = "players_per_game";

/// Token in a template replaced by the player's lowercased name
pub const DEFAULT_NAME_TOKEN: &str = "cooper-flagg";
/// Token in a template replaced by the player's disambiguator
pub const DEFAULT_DISAMBIGUATOR_TOKEN: &str = "1";

/// A URL template built from an example player's page.
///
/// Substitution order: every name token becomes the lowercased display name,
/// then every disambiguator token becomes the repeat number, then spaces
/// become hyphens. Replacement is textual, so a disambiguator token that also
/// occurs elsewhere in the template is replaced there too.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplate {
    pub template: String,
    pub name_token: String,
    pub disambiguator_token: String,
}

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            name_token: DEFAULT_NAME_TOKEN.to_string(),
            disambiguator_token: DEFAULT_DISAMBIGUATOR_TOKEN.to_string(),
        }
    }

    pub fn with_tokens(mut self, name_token: &str, disambiguator_token: &str) -> Self {
        self.name_token = name_token.to_string();
        self.disambiguator_token = disambiguator_token.to_string();
        self
    }

    /// Substitute one player into the template and validate the result
    pub fn render(&self, player_name: &str, repeat_name: u32) -> Result<String> {
        let lower_name = player_name.to_lowercase();
        let rendered = self
            .template
            .replace(&self.name_token, &lower_name)
            .replace(&self.disambiguator_token, &repeat_name.to_string())
            .replace(' ', "-");

        url::Url::parse(&rendered).map_err(|e| DraftError::InvalidUrl {
            url: rendered.clone(),
            message: e.to_string(),
        })?;
        Ok(rendered)
    }
}

/// The pair of pages scraped for every player
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUrls {
    pub game_log: UrlTemplate,
    pub season: UrlTemplate,
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            game_log: UrlTemplate::new(DEFAULT_GAME_LOG_URL),
            season: UrlTemplate::new(DEFAULT_SEASON_URL),
        }
    }
}

impl SourceUrls {
    pub fn game_log_url(&self, entry: &RosterEntry) -> Result<String> {
        self.game_log.render(&entry.player, entry.repeat_name)
    }

    pub fn season_url(&self, entry: &RosterEntry) -> Result<String> {
        self.season.render(&entry.player, entry.repeat_name)
    }
}

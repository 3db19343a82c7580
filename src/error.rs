use thiserror::Error;

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("HTTP error: {status} fetching {url}")]
    Http { url: String, status: u16 },

    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("Rate limited fetching {0} - please wait and retry")]
    RateLimited(String),

    #[error("Table '{0}' not found on page")]
    TableNotFound(String),

    #[error("Column '{column}' not found in table '{table}'")]
    MissingColumn { table: String, column: String },

    #[error("Identity mismatch: expected {expected}, found {found}")]
    IdentityMismatch { expected: String, found: String },

    #[error("Player population is empty - run the scrape step first")]
    EmptyPopulation,

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Player store {path}: {message}")]
    InvalidStore { path: String, message: String },

    #[error("Roster error: {0}")]
    Roster(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

impl DraftError {
    /// Failures worth another attempt: dropped connections, throttling and 5xx.
    pub fn is_transient(&self) -> bool {
        match self {
            DraftError::Network { .. } | DraftError::RateLimited(_) => true,
            DraftError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Page-shape problems that skip one player instead of aborting the run.
    pub fn is_page_shape(&self) -> bool {
        matches!(
            self,
            DraftError::TableNotFound(_) | DraftError::MissingColumn { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DraftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let server = DraftError::Http { url: "u".into(), status: 503 };
        let missing = DraftError::Http { url: "u".into(), status: 404 };
        assert!(server.is_transient());
        assert!(!missing.is_transient());
        assert!(DraftError::RateLimited("u".into()).is_transient());
        assert!(!DraftError::EmptyPopulation.is_transient());
    }

    #[test]
    fn test_page_shape_classification() {
        assert!(DraftError::TableNotFound("player_game_log".into()).is_page_shape());
        assert!(DraftError::MissingColumn {
            table: "players_per_game".into(),
            column: "3P%".into()
        }
        .is_page_shape());
        assert!(!DraftError::Roster("bad".into()).is_page_shape());
    }
}

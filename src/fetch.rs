//! Blocking page fetches with browser-like headers and bounded retries

use crate::error::{DraftError, Result};
use std::thread;
use std::time::Duration;

/// Anything that turns a URL into page content
pub trait PageSource {
    fn fetch(&mut self, url: &str) -> Result<String>;
}

/// Fetches pages over HTTP
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .map_err(|e| DraftError::Network {
                url: String::new(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&mut self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .map_err(|e| DraftError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DraftError::RateLimited(url.to_string()));
        }
        if !status.is_success() {
            return Err(DraftError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| DraftError::Network {
            url: url.to_string(),
            message: format!("Failed to read response: {}", e),
        })
    }
}

/// Bounded exponential backoff for transient fetch failures
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per URL; 1 means fail fast
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub multiplier: u32,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(2),
            multiplier: 2,
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    pub fn fail_fast() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay after the given failed attempt (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = self
            .multiplier
            .saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Wraps a source and retries transient failures per `RetryPolicy`.
/// Non-transient errors (e.g. 404) are returned on the first attempt.
pub struct RetryingFetcher<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: PageSource> RetryingFetcher<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<S: PageSource> PageSource for RetryingFetcher<S> {
    fn fetch(&mut self, url: &str) -> Result<String> {
        let attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.inner.fetch(url) {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < attempts => {
                    let delay = self.policy.backoff(attempt);
                    log::warn!(
                        "Attempt {}/{} failed: {}; retrying in {:?}",
                        attempt,
                        attempts,
                        e,
                        delay
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted {
        responses: VecDeque<Result<String>>,
        calls: usize,
    }

    impl Scripted {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: responses.into(),
                calls: 0,
            }
        }
    }

    impl PageSource for Scripted {
        fn fetch(&mut self, _url: &str) -> Result<String> {
            self.calls += 1;
            self.responses
                .pop_front()
                .unwrap_or_else(|| Ok("<html></html>".to_string()))
        }
    }

    fn quick(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff: Duration::ZERO,
            ..RetryPolicy::default()
        }
    }

    fn server_error() -> DraftError {
        DraftError::Http {
            url: "u".to_string(),
            status: 502,
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(2), Duration::from_secs(4));
        assert_eq!(policy.backoff(3), Duration::from_secs(8));
        assert_eq!(policy.backoff(10), Duration::from_secs(60));
    }

    #[test]
    fn test_retries_transient_errors() {
        let inner = Scripted::new(vec![Err(server_error()), Ok("page".to_string())]);
        let mut fetcher = RetryingFetcher::new(inner, quick(3));
        assert_eq!(fetcher.fetch("u").unwrap(), "page");
        assert_eq!(fetcher.inner.calls, 2);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let inner = Scripted::new(vec![
            Err(server_error()),
            Err(server_error()),
            Err(server_error()),
        ]);
        let mut fetcher = RetryingFetcher::new(inner, quick(2));
        assert!(matches!(fetcher.fetch("u"), Err(DraftError::Http { status: 502, .. })));
        assert_eq!(fetcher.inner.calls, 2);
    }

    #[test]
    fn test_not_found_is_not_retried() {
        let inner = Scripted::new(vec![Err(DraftError::Http {
            url: "u".to_string(),
            status: 404,
        })]);
        let mut fetcher = RetryingFetcher::new(inner, quick(5));
        assert!(fetcher.fetch("u").is_err());
        assert_eq!(fetcher.inner.calls, 1);
    }

    #[test]
    fn test_fail_fast_policy() {
        let inner = Scripted::new(vec![Err(DraftError::RateLimited("u".to_string()))]);
        let mut fetcher = RetryingFetcher::new(inner, RetryPolicy::fail_fast());
        assert!(matches!(fetcher.fetch("u"), Err(DraftError::RateLimited(_))));
        assert_eq!(fetcher.inner.calls, 1);
    }

    #[test]
    #[ignore] // Requires network access
    fn test_fetch_live_page() {
        let mut fetcher = HttpFetcher::new().unwrap();
        match fetcher.fetch(crate::source::DEFAULT_SEASON_URL) {
            Ok(body) => assert!(body.contains("players_per_game")),
            Err(DraftError::RateLimited(_)) => println!("Rate limited - this is expected behavior"),
            Err(e) => panic!("Unexpected error: {}", e),
        }
    }
}

//! Result snapshot with loading flag and stale-response guard.

use tracing::{debug, error};

/// Identifies one fetch. Tickets increase monotonically per feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Rows of one dashboard section.
///
/// Only the result of the most recently issued ticket is applied; results of
/// superseded fetches are dropped when they arrive.
#[derive(Debug)]
pub struct Feed<T> {
    rows: Vec<T>,
    loading: bool,
    latest: u64,
    last_error: Option<String>,
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            loading: false,
            latest: 0,
            last_error: None,
        }
    }
}

impl<T> Feed<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch and mark the feed as loading.
    pub fn begin(&mut self) -> FetchTicket {
        self.latest += 1;
        self.loading = true;
        FetchTicket(self.latest)
    }

    /// Apply a fetch result.
    ///
    /// Returns `false` and leaves the feed untouched when `ticket` has been
    /// superseded. A failure clears the rows.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<T>, String>) -> bool {
        if ticket.0 != self.latest {
            debug!("Discarding stale response (ticket {}, latest {})", ticket.0, self.latest);
            return false;
        }

        self.loading = false;
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.last_error = None;
            }
            Err(message) => {
                error!("Fetch failed: {message}");
                self.rows.clear();
                self.last_error = Some(message);
            }
        }
        true
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Message of the last failed fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_flag_cycle() {
        let mut feed: Feed<u32> = Feed::new();
        assert!(!feed.is_loading());

        let ticket = feed.begin();
        assert!(feed.is_loading());

        assert!(feed.complete(ticket, Ok(vec![])));
        assert!(!feed.is_loading());
        assert!(feed.is_empty());
    }

    #[test]
    fn test_failure_clears_rows() {
        let mut feed = Feed::new();
        let first = feed.begin();
        feed.complete(first, Ok(vec![1, 2, 3]));
        assert_eq!(feed.rows(), &[1, 2, 3]);

        let second = feed.begin();
        feed.complete(second, Err("db down".to_string()));

        assert!(feed.is_empty());
        assert!(!feed.is_loading());
        assert_eq!(feed.last_error(), Some("db down"));
    }

    #[test]
    fn test_success_clears_error() {
        let mut feed = Feed::new();
        let first = feed.begin();
        feed.complete(first, Err("timeout".to_string()));
        let second = feed.begin();
        feed.complete(second, Ok(vec![7]));

        assert_eq!(feed.last_error(), None);
        assert_eq!(feed.rows(), &[7]);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut feed = Feed::new();
        let a = feed.begin();
        let b = feed.begin();

        assert!(feed.complete(b, Ok(vec!["b"])));
        assert!(!feed.complete(a, Ok(vec!["a"])));

        assert_eq!(feed.rows(), &["b"]);
        assert!(!feed.is_loading());
    }

    #[test]
    fn test_loading_until_latest_resolves() {
        let mut feed = Feed::new();
        let a = feed.begin();
        let b = feed.begin();

        assert!(!feed.complete(a, Ok(vec![1])));
        assert!(feed.is_loading());
        assert!(feed.is_empty());

        feed.complete(b, Ok(vec![2]));
        assert!(!feed.is_loading());
    }
}

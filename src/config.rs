use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Frontdesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Quiet window between searches. While the window is open, repeated search
/// requests are suppressed; a term change during the window triggers exactly
/// one catch-up search when it closes.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Terms shorter than this never trigger a search.
pub const MIN_SEARCH_TERM_LEN: usize = 3;

/// Base URL of the scheduling API.
/// `FRONTDESK_API_URL` overrides the default local mock server.
pub fn api_base_url() -> String {
    std::env::var("FRONTDESK_API_URL")
        .unwrap_or_else(|_| "http://localhost:3001".to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_is_local_mock() {
        if std::env::var("FRONTDESK_API_URL").is_err() {
            assert_eq!(api_base_url(), "http://localhost:3001");
        }
    }

    #[test]
    fn app_name_is_frontdesk() {
        assert_eq!(APP_NAME, "Frontdesk");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }

    #[test]
    fn debounce_window_is_half_a_second() {
        assert_eq!(DEBOUNCE_WINDOW, Duration::from_millis(500));
    }

    #[test]
    fn default_filter_names_this_crate() {
        assert!(default_log_filter().contains("frontdesk=debug"));
    }
}

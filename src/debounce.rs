//! Search rate limiting.
//!
//! The original behavior is leading-edge-plus-catch-up: the first qualifying
//! term runs immediately and opens a cooldown window; submissions during the
//! window are suppressed; when the window closes, a single catch-up run
//! fires if the live term moved while it was open. At most one run per
//! window plus the catch-up, never one per keystroke.
//!
//! The machine is pure — callers pass `Instant`s in and schedule the
//! cooldown timer off [`Debouncer::deadline`] — so every transition is
//! testable without waiting on a clock. At most one deadline is pending per
//! debouncer.
//!
//! In-flight requests are not cancelled. A run superseded by a later one can
//! still resolve afterwards and overwrite newer results ("last response
//! wins"); see `search::tests::stale_response_still_overwrites_results`.

use std::time::{Duration, Instant};

use crate::config;

#[derive(Debug, Clone)]
struct Cooldown {
    deadline: Instant,
    term_at_arm: String,
}

/// Debounce state machine for one search context.
#[derive(Debug)]
pub struct Debouncer {
    min_term_len: usize,
    window: Duration,
    cooldown: Option<Cooldown>,
    last_run_term: Option<String>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::with_settings(config::MIN_SEARCH_TERM_LEN, config::DEBOUNCE_WINDOW)
    }

    pub fn with_settings(min_term_len: usize, window: Duration) -> Self {
        Self {
            min_term_len,
            window,
            cooldown: None,
            last_run_term: None,
        }
    }

    /// A search request arrived. Returns the term to run right now, or
    /// `None` when the request is suppressed (too short, unchanged, or
    /// inside the cooldown window).
    pub fn submit(&mut self, term: &str, now: Instant) -> Option<String> {
        if term.chars().count() < self.min_term_len {
            return None;
        }
        if self.cooldown.is_some() {
            return None;
        }
        if self.last_run_term.as_deref() == Some(term) {
            return None;
        }

        self.cooldown = Some(Cooldown {
            deadline: now + self.window,
            term_at_arm: term.to_string(),
        });
        self.last_run_term = Some(term.to_string());
        Some(term.to_string())
    }

    /// The cooldown timer fired. If the live term moved while the window was
    /// open, this re-enters the submit path once, yielding the catch-up run
    /// (and arming a fresh window for it).
    pub fn timer_fired(&mut self, current_term: &str, now: Instant) -> Option<String> {
        let cooldown = self.cooldown.as_ref()?;
        if now < cooldown.deadline {
            return None;
        }
        let armed_with = self.cooldown.take().map(|c| c.term_at_arm)?;
        if current_term != armed_with {
            return self.submit(current_term, now);
        }
        None
    }

    /// When the pending cooldown window closes, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.cooldown.as_ref().map(|c| c.deadline)
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown.is_some()
    }

    /// Forget the window and the last term; the next qualifying submission
    /// runs immediately. Used when the search context changes (view switch,
    /// selection).
    pub fn reset(&mut self) {
        self.cooldown = None;
        self.last_run_term = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

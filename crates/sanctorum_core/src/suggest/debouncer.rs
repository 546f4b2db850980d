//! Debounced, stale-safe suggestion state.
//!
//! # Responsibility
//! - Coalesce keystrokes into at most one request per quiet period.
//! - Decide which request results may update the visible suggestions.
//!
//! # Invariants
//! - Input shorter than `min_chars` clears suggestions and issues nothing.
//! - A result is applied only when it answers the latest issued request and
//!   that request's text still equals the current text.
//! - A failed request behaves like an empty result and is never surfaced.
//! - Time is supplied by the caller; nothing here sleeps or spawns.

use crate::model::suggestion::SuggestionQuery;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::time::{Duration, Instant};

/// Tunables for the suggestion debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Minimum trimmed character count before any request is considered.
    pub min_chars: usize,
    /// Quiet period without input changes before a request fires.
    pub quiet_period_ms: u64,
    /// Maximum suggestions kept from one result.
    pub max_suggestions: usize,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            min_chars: 3,
            quiet_period_ms: 300,
            max_suggestions: 5,
        }
    }
}

impl DebounceConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_chars == 0 {
            return Err("debounce.min_chars must be at least 1".to_string());
        }
        if self.max_suggestions == 0 {
            return Err("debounce.max_suggestions must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Effect of one input change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Input too short: suggestions cleared, nothing scheduled.
    Cleared,
    /// A request will be issued once `deadline` passes without new input.
    Scheduled { deadline: Instant },
    /// Same text as before; the pending or issued request still stands.
    Unchanged,
}

/// What happened to a resolved request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Applied,
    DiscardedStale,
}

/// Suggestion state for one search box.
#[derive(Debug)]
pub struct SuggestionDebouncer {
    config: DebounceConfig,
    current_text: String,
    deadline: Option<Instant>,
    next_sequence_id: u64,
    latest_issued: Option<SuggestionQuery>,
    in_flight: HashSet<u64>,
    suggestions: Vec<String>,
}

impl Default for SuggestionDebouncer {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}

impl SuggestionDebouncer {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            current_text: String::new(),
            deadline: None,
            next_sequence_id: 1,
            latest_issued: None,
            in_flight: HashSet::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    /// Records the search box content at `now`.
    pub fn on_input(&mut self, text: &str, now: Instant) -> InputOutcome {
        let text = text.trim();

        if text == self.current_text && self.has_request_for_current_text() {
            return InputOutcome::Unchanged;
        }
        self.current_text = text.to_string();

        if text.chars().count() < self.config.min_chars {
            self.clear_pending();
            return InputOutcome::Cleared;
        }

        let deadline = now + self.config.quiet_period();
        self.deadline = Some(deadline);
        InputOutcome::Scheduled { deadline }
    }

    /// When the pending request becomes due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Issues the pending request once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<SuggestionQuery> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;

        let query = SuggestionQuery {
            raw_text: self.current_text.clone(),
            sequence_id: self.next_sequence_id,
        };
        self.next_sequence_id += 1;
        self.in_flight.insert(query.sequence_id);
        self.latest_issued = Some(query.clone());
        debug!(
            "event=suggest_issue module=suggest status=ok seq={} chars={}",
            query.sequence_id,
            query.raw_text.chars().count()
        );
        Some(query)
    }

    /// Feeds back the result of an issued request.
    ///
    /// Failures count as an empty list. Results for superseded or abandoned
    /// requests are dropped.
    pub fn resolve<E: Display>(
        &mut self,
        query: &SuggestionQuery,
        result: Result<Vec<String>, E>,
    ) -> ResolveOutcome {
        let was_outstanding = self.in_flight.remove(&query.sequence_id);

        let suggestions = match result {
            Ok(suggestions) => suggestions,
            Err(err) => {
                warn!(
                    "event=suggest_resolve module=suggest status=degraded seq={} error={}",
                    query.sequence_id, err
                );
                Vec::new()
            }
        };

        if !was_outstanding || !self.is_current(query) {
            debug!(
                "event=suggest_resolve module=suggest status=stale seq={}",
                query.sequence_id
            );
            return ResolveOutcome::DiscardedStale;
        }

        self.suggestions = suggestions
            .into_iter()
            .map(|suggestion| suggestion.trim().to_string())
            .filter(|suggestion| !suggestion.is_empty())
            .take(self.config.max_suggestions)
            .collect();
        debug!(
            "event=suggest_resolve module=suggest status=ok seq={} count={}",
            query.sequence_id,
            self.suggestions.len()
        );
        ResolveOutcome::Applied
    }

    /// Forgets all input and abandons outstanding requests (view switch).
    pub fn reset(&mut self) {
        self.current_text.clear();
        self.clear_pending();
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// True while any issued request has not resolved yet.
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    fn is_current(&self, query: &SuggestionQuery) -> bool {
        self.latest_issued
            .as_ref()
            .is_some_and(|latest| latest.sequence_id == query.sequence_id)
            && query.raw_text == self.current_text
    }

    fn has_request_for_current_text(&self) -> bool {
        self.deadline.is_some()
            || self
                .latest_issued
                .as_ref()
                .is_some_and(|latest| latest.raw_text == self.current_text)
    }

    fn clear_pending(&mut self) {
        self.deadline = None;
        self.in_flight.clear();
        self.latest_issued = None;
        self.suggestions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{DebounceConfig, InputOutcome, ResolveOutcome, SuggestionDebouncer};
    use std::time::{Duration, Instant};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn short_input_clears_without_request() {
        let start = Instant::now();
        let mut debouncer = SuggestionDebouncer::default();

        assert_eq!(debouncer.on_input("Fr", start), InputOutcome::Cleared);
        assert_eq!(debouncer.next_deadline(), None);
        assert!(debouncer.poll(start + ms(1_000)).is_none());
        assert!(debouncer.suggestions().is_empty());
    }

    #[test]
    fn whitespace_does_not_count_toward_minimum() {
        let start = Instant::now();
        let mut debouncer = SuggestionDebouncer::default();
        assert_eq!(debouncer.on_input("  ab  ", start), InputOutcome::Cleared);
    }

    #[test]
    fn fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = SuggestionDebouncer::default();

        debouncer.on_input("Fra", start);
        assert!(debouncer.poll(start + ms(299)).is_none());
        let query = debouncer.poll(start + ms(300)).expect("request due");
        assert_eq!(query.raw_text, "Fra");
        assert!(debouncer.is_loading());
        assert!(debouncer.poll(start + ms(900)).is_none());
    }

    #[test]
    fn same_text_does_not_reschedule() {
        let start = Instant::now();
        let mut debouncer = SuggestionDebouncer::default();

        debouncer.on_input("Fra", start);
        assert_eq!(debouncer.on_input("Fra ", start + ms(200)), InputOutcome::Unchanged);
        assert!(debouncer.poll(start + ms(300)).is_some());
        assert_eq!(debouncer.on_input("Fra", start + ms(400)), InputOutcome::Unchanged);
        assert!(debouncer.poll(start + ms(2_000)).is_none());
    }

    #[test]
    fn failure_resolves_to_empty_list() {
        let start = Instant::now();
        let mut debouncer = SuggestionDebouncer::default();
        debouncer.on_input("Aug", start);
        let query = debouncer.poll(start + ms(300)).expect("request due");

        let outcome = debouncer.resolve::<String>(&query, Err("offline".to_string()));
        assert_eq!(outcome, ResolveOutcome::Applied);
        assert!(debouncer.suggestions().is_empty());
        assert!(!debouncer.is_loading());
    }

    #[test]
    fn results_are_trimmed_and_capped() {
        let start = Instant::now();
        let mut debouncer = SuggestionDebouncer::new(DebounceConfig {
            max_suggestions: 2,
            ..DebounceConfig::default()
        });
        debouncer.on_input("Tho", start);
        let query = debouncer.poll(start + ms(300)).expect("request due");

        let results = vec![
            " Thomas Aquinas ".to_string(),
            String::new(),
            "Thomas More".to_string(),
            "Thomas Becket".to_string(),
        ];
        debouncer.resolve::<String>(&query, Ok(results));
        assert_eq!(debouncer.suggestions(), ["Thomas Aquinas", "Thomas More"]);
    }

    #[test]
    fn reset_abandons_outstanding_requests() {
        let start = Instant::now();
        let mut debouncer = SuggestionDebouncer::default();
        debouncer.on_input("Joan", start);
        let query = debouncer.poll(start + ms(300)).expect("request due");

        debouncer.reset();
        assert!(!debouncer.is_loading());
        let outcome = debouncer.resolve::<String>(&query, Ok(vec!["Joan of Arc".to_string()]));
        assert_eq!(outcome, ResolveOutcome::DiscardedStale);
        assert!(debouncer.suggestions().is_empty());
    }
}

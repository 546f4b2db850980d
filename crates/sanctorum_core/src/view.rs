//! View-state bookkeeping for model-backed screens.
//!
//! # Invariants
//! - A slot applies only the result of its latest `begin()`.
//! - `invalidate()` makes every outstanding ticket stale.

use crate::service::ServiceError;
use serde::{Deserialize, Serialize};

/// Top-level tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppView {
    #[default]
    Saints,
    Bible,
    Miracles,
    Chants,
}

/// Sub-modes of the Bible tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BibleMode {
    #[default]
    Read,
    Search,
    Bookmarks,
}

/// Display state of one asynchronously loaded value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Loadable<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// User-visible message.
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one request started on a [`ViewSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

/// A [`Loadable`] that ignores results of superseded requests.
#[derive(Debug, Default)]
pub struct ViewSlot<T> {
    state: Loadable<T>,
    generation: u64,
}

impl<T> ViewSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Loadable::Idle,
            generation: 0,
        }
    }

    /// Marks the slot loading and returns the ticket its result must carry.
    pub fn begin(&mut self) -> RequestTicket {
        self.generation += 1;
        self.state = Loadable::Loading;
        RequestTicket(self.generation)
    }

    /// Applies a result; returns `false` (and changes nothing) when stale.
    pub fn complete(&mut self, ticket: RequestTicket, result: Result<T, ServiceError>) -> bool {
        if ticket.0 != self.generation || !self.state.is_loading() {
            return false;
        }
        self.state = match result {
            Ok(value) => Loadable::Ready(value),
            Err(err) => Loadable::Failed(err.user_message()),
        };
        true
    }

    /// Drops the current state; results already in flight become stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.state = Loadable::Idle;
    }

    pub fn state(&self) -> &Loadable<T> {
        &self.state
    }
}

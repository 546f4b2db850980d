//! Core domain logic for Sanctorum.
//! Prompts, response parsing, bookmarks and suggestion state live here so
//! every host shares the same behavior.

pub mod bible;
pub mod bookmarks;
pub mod client;
pub mod config;
pub mod db;
pub mod device;
pub mod logging;
pub mod model;
pub mod prompts;
pub mod repo;
pub mod service;
pub mod suggest;
pub mod view;

pub use bookmarks::BookmarkStore;
pub use client::{
    ClientError, ClientResult, ImageRequest, ImageResponse, ModelClient, ModelRequest,
    ModelResponse,
};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::bookmark::{verse_reference, BookmarkValidationError, BookmarkedVerse};
pub use model::language::Language;
pub use prompts::PromptBook;
pub use repo::entry_repo::{
    EntryStore, FileEntryStore, MemoryEntryStore, SqliteEntryStore, StoreError, StoreResult,
};
pub use service::chant_service::ChantService;
pub use service::miracle_service::MiracleService;
pub use service::saint_service::SaintService;
pub use service::scripture_service::ScriptureService;
pub use service::{ServiceError, ServiceResult};
pub use suggest::debouncer::{DebounceConfig, InputOutcome, ResolveOutcome, SuggestionDebouncer};
pub use suggest::pipeline::SuggestionPipeline;
pub use suggest::source::{SaintSuggestionService, SuggestionSource};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

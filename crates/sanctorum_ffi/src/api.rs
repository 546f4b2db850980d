//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep model transport in the host: Rust prepares request JSON and
//!   interprets response JSON, Dart performs the HTTP call in between.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures come back inside envelopes with a user-visible message.
//! - Suggestion state is process-wide and driven by host-supplied epoch ms.

use log::warn;
use sanctorum_core::bible::catalog::{
    chapter_options as chapter_options_inner, BIBLE_BOOKS, DEFAULT_BOOK, FEATURED_SAINTS,
};
use sanctorum_core::db::open_db;
use sanctorum_core::device::share::SharePayload;
use sanctorum_core::model::bookmark::BookmarkedVerse;
use sanctorum_core::model::suggestion::SuggestionQuery;
use sanctorum_core::service::miracle_service::FEATURED_MIRACLES;
use sanctorum_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, BookmarkStore, ChantService, ClientError, ClientResult, ImageRequest,
    ImageResponse, InputOutcome, Language, MiracleService, ModelClient, ModelRequest,
    ModelResponse, PromptBook, SaintService, SaintSuggestionService, ScriptureService,
    ResolveOutcome, ServiceError, ServiceResult, SqliteEntryStore, StoreResult,
    SuggestionDebouncer,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static SUGGESTER: OnceLock<Mutex<SuggestState>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the directory holding the database.
///
/// # FFI contract
/// - Must run before the first bookmark call to take effect; prompt and
///   suggestion calls do not pin the directory.
/// - Repeating the same path is a no-op; a different path returns error.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_data_dir(path: String) -> String {
    let requested = PathBuf::from(path.trim());
    if !requested.is_absolute() {
        return format!(
            "data_dir must be absolute, got `{}`",
            requested.display()
        );
    }

    let active = DATA_DIR.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!("data directory already set to `{}`", active.display())
    }
}

/// Bookmark as shown by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkItem {
    pub book: String,
    pub chapter: String,
    /// Unique key, e.g. `John 3:16`.
    pub reference: String,
    /// Stored text, prefixed by the verse number.
    pub text: String,
    /// Text without its verse number.
    pub display_text: String,
}

/// Bookmark response envelope; `items` is the full set after the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkResponse {
    pub ok: bool,
    pub items: Vec<BookmarkItem>,
    pub message: String,
}

/// Saves the verse, or unsaves it when its reference is already saved.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - On failure the previous set is returned with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn bookmark_toggle(
    book: String,
    chapter: String,
    verse: String,
    verse_text: String,
) -> BookmarkResponse {
    let bookmark = BookmarkedVerse::new(book, chapter, &verse, &verse_text);
    if let Err(err) = bookmark.validate() {
        return bookmark_failure(format!("bookmark_toggle failed: {err}"));
    }
    with_bookmarks("bookmark_toggle", |store| {
        store.toggle(bookmark).map(<[_]>::to_vec)
    })
}

/// Removes the bookmark with this exact reference; no-op when absent.
#[flutter_rust_bridge::frb(sync)]
pub fn bookmark_remove(reference: String) -> BookmarkResponse {
    with_bookmarks("bookmark_remove", |store| {
        store.remove(reference.trim()).map(<[_]>::to_vec)
    })
}

/// Lists all saved bookmarks.
#[flutter_rust_bridge::frb(sync)]
pub fn bookmark_list() -> BookmarkResponse {
    with_bookmarks("bookmark_list", |store| Ok(store.list().to_vec()))
}

/// Whether a reference is saved; `false` when storage is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn bookmark_is_saved(reference: String) -> bool {
    bookmark_list()
        .items
        .iter()
        .any(|item| item.reference == reference.trim())
}

/// Current suggestion box state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestStateResponse {
    /// `cleared|scheduled|unchanged|applied|stale|reset`.
    pub outcome: String,
    /// Epoch ms at which `suggest_poll` should be called next.
    pub deadline_epoch_ms: Option<i64>,
    pub suggestions: Vec<String>,
    pub loading: bool,
}

/// Request the host must execute for the suggestion box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestPollResponse {
    pub due: bool,
    pub sequence_id: u64,
    pub text: String,
    /// `ModelRequest` JSON; empty when nothing is due.
    pub request_json: String,
}

/// Records the search box text.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - `now_epoch_ms` must come from one monotonic-enough host clock.
#[flutter_rust_bridge::frb(sync)]
pub fn suggest_input(text: String, now_epoch_ms: i64) -> SuggestStateResponse {
    with_suggester(|state| {
        let now = state.instant_at(now_epoch_ms);
        let outcome = match state.debouncer.on_input(&text, now) {
            InputOutcome::Cleared => "cleared",
            InputOutcome::Scheduled { .. } => "scheduled",
            InputOutcome::Unchanged => "unchanged",
        };
        state.snapshot(outcome)
    })
}

/// Issues the pending suggestion request once its quiet period elapsed.
#[flutter_rust_bridge::frb(sync)]
pub fn suggest_poll(now_epoch_ms: i64, language: String) -> SuggestPollResponse {
    let lang = Language::from_code(&language);
    let polled = with_suggester(|state| {
        let now = state.instant_at(now_epoch_ms);
        let query = state.debouncer.poll(now)?;
        Some((query, state.debouncer.config().max_suggestions))
    });
    let Some((query, limit)) = polled else {
        return SuggestPollResponse {
            due: false,
            sequence_id: 0,
            text: String::new(),
            request_json: String::new(),
        };
    };

    let request = suggestion_service().prepare(&query.raw_text, limit, lang);
    SuggestPollResponse {
        due: true,
        sequence_id: query.sequence_id,
        text: query.raw_text,
        request_json: to_json(&request),
    }
}

/// Feeds back the host's answer for a polled request.
///
/// `response_json` is the `ModelResponse` JSON, or `None` when the call
/// failed. Failures and stale answers never surface as errors.
#[flutter_rust_bridge::frb(sync)]
pub fn suggest_complete(
    sequence_id: u64,
    text: String,
    response_json: Option<String>,
) -> SuggestStateResponse {
    let query = SuggestionQuery {
        raw_text: text,
        sequence_id,
    };
    with_suggester(|state| {
        let limit = state.debouncer.config().max_suggestions;
        let result = match response_json {
            Some(raw) => parse_model_response(&raw)
                .and_then(|response| suggestion_service().interpret(&response.text, limit)),
            None => Err(ServiceError::Client {
                message: "Suggestions are unavailable.",
                source: ClientError::Transport("host request failed".to_string()),
            }),
        };
        let outcome = match state.debouncer.resolve(&query, result) {
            ResolveOutcome::Applied => "applied",
            ResolveOutcome::DiscardedStale => "stale",
        };
        state.snapshot(outcome)
    })
}

/// Clears the suggestion box and abandons outstanding requests.
#[flutter_rust_bridge::frb(sync)]
pub fn suggest_reset() -> SuggestStateResponse {
    with_suggester(|state| {
        state.debouncer.reset();
        state.snapshot("reset")
    })
}

/// Prepared model request envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequestResponse {
    pub ok: bool,
    /// `text` or `image`; tells the host which API to call.
    pub kind: String,
    /// `ModelRequest` or `ImageRequest` JSON.
    pub request_json: String,
    pub message: String,
}

/// Interpreted model answer envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretedResponse {
    pub ok: bool,
    /// Typed result as JSON; `null` for endpoints without a payload.
    pub payload_json: String,
    /// User-visible message on failure.
    pub message: String,
}

/// Builds the model request for one endpoint.
///
/// Input semantics:
/// - `endpoint`: one of [`ENDPOINTS`].
/// - `args_json`: JSON object with the endpoint's fields (`name`, `query`,
///   `book`, `chapter`, `date`, `passage`, `question`, `title`, `limit`).
/// - `language`: `en` or `es`.
#[flutter_rust_bridge::frb(sync)]
pub fn prepare_request(
    endpoint: String,
    args_json: String,
    language: String,
) -> PreparedRequestResponse {
    let lang = Language::from_code(&language);
    let result = parse_args(&args_json).and_then(|args| prepare(&endpoint, &args, lang));
    match result {
        Ok(Prepared::Text(request)) => PreparedRequestResponse {
            ok: true,
            kind: "text".to_string(),
            request_json: to_json(&request),
            message: String::new(),
        },
        Ok(Prepared::Image(request)) => PreparedRequestResponse {
            ok: true,
            kind: "image".to_string(),
            request_json: to_json(&request),
            message: String::new(),
        },
        Err(err) => PreparedRequestResponse {
            ok: false,
            kind: String::new(),
            request_json: String::new(),
            message: err.user_message(),
        },
    }
}

/// Turns the host's model answer into a typed result.
///
/// `response_json` is `ModelResponse` JSON for text endpoints and
/// `ImageResponse` JSON for image endpoints.
#[flutter_rust_bridge::frb(sync)]
pub fn interpret_response(
    endpoint: String,
    args_json: String,
    response_json: String,
) -> InterpretedResponse {
    let result =
        parse_args(&args_json).and_then(|args| interpret(&endpoint, &args, &response_json));
    match result {
        Ok(payload) => InterpretedResponse {
            ok: true,
            payload_json: payload.to_string(),
            message: String::new(),
        },
        Err(err) => {
            warn!(
                "event=ffi_interpret module=ffi status=error endpoint={} error={:?}",
                endpoint.trim(),
                err
            );
            InterpretedResponse {
                ok: false,
                payload_json: Value::Null.to_string(),
                message: err.user_message(),
            }
        }
    }
}

/// Endpoint names accepted by `prepare_request` and `interpret_response`.
pub const ENDPOINTS: &[&str] = &[
    "saint_validation",
    "saint_detail",
    "saint_portrait",
    "saint_suggestions",
    "saints_of_the_day",
    "bible_chapter",
    "chapter_illustration",
    "bible_search",
    "gospel_of_the_day",
    "ask_passage",
    "miracle_research",
    "chant_list",
    "chant_lyrics",
];

/// Canon entry for the book picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibleBookItem {
    pub name: String,
    pub chapters: u32,
}

/// All 73 books in canonical order.
#[flutter_rust_bridge::frb(sync)]
pub fn bible_books() -> Vec<BibleBookItem> {
    BIBLE_BOOKS
        .iter()
        .map(|(name, chapters)| BibleBookItem {
            name: (*name).to_string(),
            chapters: *chapters,
        })
        .collect()
}

/// `1..=n` for a known book; `[1]` for an unknown one.
#[flutter_rust_bridge::frb(sync)]
pub fn chapter_options(book: String) -> Vec<u32> {
    chapter_options_inner(book.trim())
}

/// Book opened when the reader starts.
#[flutter_rust_bridge::frb(sync)]
pub fn default_book() -> String {
    DEFAULT_BOOK.to_string()
}

/// Saints offered as one-tap searches before any query.
#[flutter_rust_bridge::frb(sync)]
pub fn featured_saints() -> Vec<String> {
    FEATURED_SAINTS.iter().map(|name| (*name).to_string()).collect()
}

/// Miracles offered before any search.
#[flutter_rust_bridge::frb(sync)]
pub fn featured_miracles() -> Vec<String> {
    FEATURED_MIRACLES.iter().map(|name| (*name).to_string()).collect()
}

/// Share sheet content with unsafe links removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareItem {
    pub title: String,
    pub text: String,
    pub url: Option<String>,
}

/// Drops `url` unless it is an absolute http(s) link.
#[flutter_rust_bridge::frb(sync)]
pub fn sanitize_share(title: String, text: String, url: Option<String>) -> ShareItem {
    let payload = SharePayload { title, text, url }.sanitized();
    ShareItem {
        title: payload.title,
        text: payload.text,
        url: payload.url,
    }
}

/// Transport placeholder: requests are executed by the host, so the services
/// are only used for their prepare and interpret halves.
struct HostTransport;

impl ModelClient for HostTransport {
    fn generate(&self, _request: &ModelRequest) -> ClientResult<ModelResponse> {
        Err(ClientError::Transport("requests are executed by the host".to_string()))
    }

    fn generate_image(&self, _request: &ImageRequest) -> ClientResult<ImageResponse> {
        Err(ClientError::Transport("requests are executed by the host".to_string()))
    }
}

enum Prepared {
    Text(ModelRequest),
    Image(ImageRequest),
}

fn prepare(endpoint: &str, args: &Value, lang: Language) -> ServiceResult<Prepared> {
    let prompts = prompt_book();
    let saints = SaintService::new(HostTransport, prompts.clone());
    let scripture = ScriptureService::new(HostTransport, prompts.clone());
    let prepared = match endpoint.trim() {
        "saint_validation" => {
            Prepared::Text(saints.prepare_validation(arg(args, "name"), lang)?)
        }
        "saint_detail" => Prepared::Text(saints.prepare_detail(arg(args, "name"), lang)?),
        "saint_portrait" => Prepared::Image(saints.prepare_portrait(arg(args, "name"), lang)?),
        "saint_suggestions" => Prepared::Text(suggestion_service().prepare(
            arg(args, "query"),
            suggestion_limit(args),
            lang,
        )),
        "saints_of_the_day" => {
            Prepared::Text(saints.prepare_saints_of_the_day(arg(args, "date"), lang)?)
        }
        "bible_chapter" => Prepared::Text(scripture.prepare_chapter(
            arg(args, "book"),
            arg(args, "chapter"),
            lang,
        )?),
        "chapter_illustration" => Prepared::Image(scripture.prepare_chapter_illustration(
            arg(args, "book"),
            arg(args, "chapter"),
            lang,
        )?),
        "bible_search" => match scripture.prepare_search(arg(args, "query"), lang) {
            Some(request) => Prepared::Text(request),
            None => {
                return Err(ServiceError::InvalidInput(
                    "Search query must not be empty.".to_string(),
                ))
            }
        },
        "gospel_of_the_day" => {
            Prepared::Text(scripture.prepare_gospel_of_the_day(arg(args, "date"), lang)?)
        }
        "ask_passage" => Prepared::Text(scripture.prepare_ask(
            arg(args, "passage"),
            arg(args, "question"),
            lang,
        )?),
        "miracle_research" => Prepared::Text(
            MiracleService::new(HostTransport, prompts)
                .prepare_research(arg(args, "query"), lang)?,
        ),
        "chant_list" => {
            Prepared::Text(ChantService::new(HostTransport, prompts).prepare_list(lang))
        }
        "chant_lyrics" => Prepared::Text(
            ChantService::new(HostTransport, prompts).prepare_lyrics(arg(args, "title"), lang)?,
        ),
        other => return Err(unknown_endpoint(other)),
    };
    Ok(prepared)
}

fn interpret(endpoint: &str, args: &Value, response_json: &str) -> ServiceResult<Value> {
    let prompts = prompt_book();
    let saints = SaintService::new(HostTransport, prompts.clone());
    let scripture = ScriptureService::new(HostTransport, prompts.clone());
    let payload = match endpoint.trim() {
        "saint_portrait" => {
            Value::String(saints.interpret_portrait(&parse_image_response(response_json)?)?)
        }
        "chapter_illustration" => Value::String(
            scripture.interpret_chapter_illustration(&parse_image_response(response_json)?)?,
        ),
        "miracle_research" => to_value(
            &MiracleService::new(HostTransport, prompts)
                .interpret_research(parse_model_response(response_json)?)?,
        ),
        other => {
            let text = parse_model_response(response_json)?.text;
            match other {
                "saint_validation" => {
                    saints.interpret_validation(&text)?;
                    Value::Null
                }
                "saint_detail" => to_value(&saints.interpret_detail(&text)?),
                "saint_suggestions" => to_value(
                    &suggestion_service().interpret(&text, suggestion_limit(args))?,
                ),
                "saints_of_the_day" => to_value(&saints.interpret_saints_of_the_day(&text)?),
                "bible_chapter" => to_value(&scripture.interpret_chapter(&text)?),
                "bible_search" => to_value(&scripture.interpret_search(&text)?),
                "gospel_of_the_day" => to_value(&scripture.interpret_gospel_of_the_day(&text)?),
                "ask_passage" => {
                    let answer = text.trim();
                    if answer.is_empty() {
                        return Err(ServiceError::Rejected(
                            "Could not answer your question right now. Please try again."
                                .to_string(),
                        ));
                    }
                    Value::String(answer.to_string())
                }
                "chant_list" => {
                    to_value(&ChantService::new(HostTransport, prompts).interpret_list(&text)?)
                }
                "chant_lyrics" => to_value(
                    &ChantService::new(HostTransport, prompts)
                        .interpret_lyrics(arg(args, "title"), &text)?,
                ),
                unknown => return Err(unknown_endpoint(unknown)),
            }
        }
    };
    Ok(payload)
}

fn prompt_book() -> PromptBook {
    PromptBook::from_config(resolve_config())
}

fn suggestion_service() -> SaintSuggestionService<HostTransport> {
    SaintSuggestionService::new(HostTransport, prompt_book())
}

fn suggestion_limit(args: &Value) -> usize {
    let max = resolve_config().debounce.max_suggestions;
    args.get("limit")
        .and_then(Value::as_u64)
        .map_or(max, |limit| (limit as usize).clamp(1, max))
}

fn arg<'a>(args: &'a Value, key: &str) -> &'a str {
    args.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn parse_args(args_json: &str) -> ServiceResult<Value> {
    if args_json.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    match serde_json::from_str::<Value>(args_json) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(ServiceError::InvalidInput(
            "Request arguments must be a JSON object.".to_string(),
        )),
        Err(err) => Err(ServiceError::InvalidInput(format!(
            "Request arguments are not valid JSON: {err}"
        ))),
    }
}

fn parse_model_response(raw: &str) -> ServiceResult<ModelResponse> {
    serde_json::from_str(raw).map_err(|err| ServiceError::InvalidResponse {
        message: "The response could not be read. Please try again.",
        detail: err.to_string(),
    })
}

fn parse_image_response(raw: &str) -> ServiceResult<ImageResponse> {
    serde_json::from_str(raw).map_err(|err| ServiceError::InvalidResponse {
        message: "The image could not be read. Please try again.",
        detail: err.to_string(),
    })
}

fn unknown_endpoint(endpoint: &str) -> ServiceError {
    ServiceError::InvalidInput(format!("Unknown endpoint: {endpoint}."))
}

fn to_json(value: &impl serde::Serialize) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn to_value(value: &impl serde::Serialize) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn resolve_config() -> &'static AppConfig {
    APP_CONFIG.get_or_init(|| {
        AppConfig::from_env().unwrap_or_else(|err| {
            warn!("event=ffi_config module=ffi status=degraded error={err}");
            AppConfig::default()
        })
    })
}

/// Data dir pinned by `configure_data_dir`, else the env/default one.
fn resolve_data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| resolve_config().data_dir.clone())
}

fn with_bookmarks(
    operation: &'static str,
    f: impl FnOnce(&mut BookmarkStore<SqliteEntryStore<'_>>) -> StoreResult<Vec<BookmarkedVerse>>,
) -> BookmarkResponse {
    let db_config = AppConfig {
        data_dir: resolve_data_dir().clone(),
        ..resolve_config().clone()
    };
    let conn = match open_db(db_config.database_path()) {
        Ok(conn) => conn,
        Err(err) => return bookmark_failure(format!("{operation} failed: {err}")),
    };
    let mut store = BookmarkStore::open(SqliteEntryStore::new(&conn));
    match f(&mut store) {
        Ok(items) => BookmarkResponse {
            ok: true,
            message: format!("{} bookmark(s).", items.len()),
            items: items.into_iter().map(to_bookmark_item).collect(),
        },
        Err(err) => BookmarkResponse {
            ok: false,
            items: store.list().iter().cloned().map(to_bookmark_item).collect(),
            message: format!("{operation} failed: {err}"),
        },
    }
}

fn bookmark_failure(message: String) -> BookmarkResponse {
    BookmarkResponse {
        ok: false,
        items: Vec::new(),
        message,
    }
}

fn to_bookmark_item(bookmark: BookmarkedVerse) -> BookmarkItem {
    BookmarkItem {
        display_text: bookmark.display_text().to_string(),
        book: bookmark.book,
        chapter: bookmark.chapter,
        reference: bookmark.reference,
        text: bookmark.text,
    }
}

struct SuggestState {
    debouncer: SuggestionDebouncer,
    origin: Instant,
    origin_epoch_ms: Option<i64>,
}

impl SuggestState {
    /// Maps host epoch ms onto the monotonic clock; earlier times clamp to
    /// the first observed call.
    fn instant_at(&mut self, epoch_ms: i64) -> Instant {
        let origin_epoch_ms = *self.origin_epoch_ms.get_or_insert(epoch_ms);
        let offset = epoch_ms.saturating_sub(origin_epoch_ms).max(0) as u64;
        self.origin + Duration::from_millis(offset)
    }

    fn epoch_ms_of(&self, instant: Instant) -> Option<i64> {
        let origin_epoch_ms = self.origin_epoch_ms?;
        let offset = instant.saturating_duration_since(self.origin).as_millis();
        Some(origin_epoch_ms.saturating_add(i64::try_from(offset).unwrap_or(i64::MAX)))
    }

    fn snapshot(&self, outcome: &str) -> SuggestStateResponse {
        SuggestStateResponse {
            outcome: outcome.to_string(),
            deadline_epoch_ms: self
                .debouncer
                .next_deadline()
                .and_then(|deadline| self.epoch_ms_of(deadline)),
            suggestions: self.debouncer.suggestions().to_vec(),
            loading: self.debouncer.is_loading(),
        }
    }
}

fn with_suggester<T>(f: impl FnOnce(&mut SuggestState) -> T) -> T {
    let lock = SUGGESTER.get_or_init(|| {
        Mutex::new(SuggestState {
            debouncer: SuggestionDebouncer::new(resolve_config().debounce),
            origin: Instant::now(),
            origin_epoch_ms: None,
        })
    });
    let mut state = match lock.lock() {
        Ok(state) => state,
        Err(poisoned) => poisoned.into_inner(),
    };
    f(&mut state)
}

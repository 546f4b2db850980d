use sanctorum_core::suggest::debouncer::{
    DebounceConfig, InputOutcome, ResolveOutcome, SuggestionDebouncer,
};
use sanctorum_core::suggest::pipeline::SuggestionPipeline;
use sanctorum_core::suggest::source::{SaintSuggestionService, SuggestionSource};
use sanctorum_core::{
    ClientError, ClientResult, ImageRequest, ImageResponse, Language, ModelClient, ModelRequest,
    ModelResponse, PromptBook, ServiceError, ServiceResult,
};
use std::cell::RefCell;
use std::time::{Duration, Instant};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn typing_fra_then_franc_requests_only_franc_once() {
    let start = Instant::now();
    let mut debouncer = SuggestionDebouncer::default();

    assert!(matches!(
        debouncer.on_input("Fra", start),
        InputOutcome::Scheduled { .. }
    ));
    assert!(debouncer.poll(start + ms(100)).is_none());
    debouncer.on_input("Franc", start + ms(100));

    assert!(debouncer.poll(start + ms(300)).is_none());
    let query = debouncer.poll(start + ms(400)).expect("request for Franc");
    assert_eq!(query.raw_text, "Franc");
    assert!(debouncer.poll(start + ms(1_000)).is_none());

    let names = vec![
        "Francis of Assisi".to_string(),
        "Frances Xavier Cabrini".to_string(),
        "Francis Xavier".to_string(),
    ];
    assert_eq!(
        debouncer.resolve::<ServiceError>(&query, Ok(names)),
        ResolveOutcome::Applied
    );
    assert_eq!(debouncer.suggestions().len(), 3);
    assert!(!debouncer.is_loading());
}

#[test]
fn stale_response_never_overwrites_newer_text() {
    let start = Instant::now();
    let mut debouncer = SuggestionDebouncer::default();

    debouncer.on_input("Aug", start);
    let first = debouncer.poll(start + ms(300)).expect("first request");
    debouncer.on_input("Augustine", start + ms(350));
    let second = debouncer.poll(start + ms(650)).expect("second request");
    assert!(debouncer.is_loading());

    let outcome =
        debouncer.resolve::<ServiceError>(&second, Ok(vec!["Augustine of Hippo".to_string()]));
    assert_eq!(outcome, ResolveOutcome::Applied);

    let outcome =
        debouncer.resolve::<ServiceError>(&first, Ok(vec!["Augustine of Canterbury".to_string()]));
    assert_eq!(outcome, ResolveOutcome::DiscardedStale);
    assert_eq!(debouncer.suggestions(), ["Augustine of Hippo"]);
}

#[test]
fn response_for_text_no_longer_in_box_is_dropped() {
    let start = Instant::now();
    let mut debouncer = SuggestionDebouncer::default();

    debouncer.on_input("Teresa", start);
    let query = debouncer.poll(start + ms(300)).expect("request due");
    debouncer.on_input("Teresa of", start + ms(320));

    let outcome =
        debouncer.resolve::<ServiceError>(&query, Ok(vec!["Teresa of Avila".to_string()]));
    assert_eq!(outcome, ResolveOutcome::DiscardedStale);
    assert!(debouncer.suggestions().is_empty());
}

#[test]
fn shrinking_below_minimum_clears_and_abandons() {
    let start = Instant::now();
    let mut debouncer = SuggestionDebouncer::default();

    debouncer.on_input("Ben", start);
    let query = debouncer.poll(start + ms(300)).expect("request due");
    assert_eq!(debouncer.on_input("Be", start + ms(310)), InputOutcome::Cleared);
    assert!(!debouncer.is_loading());

    let outcome =
        debouncer.resolve::<ServiceError>(&query, Ok(vec!["Benedict".to_string()]));
    assert_eq!(outcome, ResolveOutcome::DiscardedStale);
    assert!(debouncer.suggestions().is_empty());
}

#[test]
fn custom_quiet_period_is_honored() {
    let start = Instant::now();
    let mut debouncer = SuggestionDebouncer::new(DebounceConfig {
        quiet_period_ms: 50,
        ..DebounceConfig::default()
    });
    debouncer.on_input("Clare", start);
    assert!(debouncer.poll(start + ms(50)).is_some());
}

struct ScriptedSource {
    calls: RefCell<Vec<(String, usize, Language)>>,
    fail: bool,
}

impl ScriptedSource {
    fn new(fail: bool) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail,
        }
    }
}

impl SuggestionSource for ScriptedSource {
    fn suggest(&self, query: &str, limit: usize, lang: Language) -> ServiceResult<Vec<String>> {
        self.calls
            .borrow_mut()
            .push((query.to_string(), limit, lang));
        if self.fail {
            return Err(ServiceError::Rejected("offline".to_string()));
        }
        Ok((1..=8).map(|n| format!("{query} {n}")).collect())
    }
}

#[test]
fn pipeline_issues_one_request_per_quiet_period() {
    let start = Instant::now();
    let source = ScriptedSource::new(false);
    let mut pipeline = SuggestionPipeline::new(&source, DebounceConfig::default(), Language::Es);

    for (offset, text) in ["Fra", "Fran", "Franc", "Franci"].iter().enumerate() {
        pipeline.on_input(text, start + ms(offset as u64 * 50));
        assert!(pipeline.tick(start + ms(offset as u64 * 50)).is_none());
    }
    assert_eq!(pipeline.tick(start + ms(450)), Some(ResolveOutcome::Applied));
    assert!(pipeline.tick(start + ms(2_000)).is_none());

    let calls = source.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], ("Franci".to_string(), 5, Language::Es));
    assert_eq!(pipeline.suggestions().len(), 5);
}

#[test]
fn pipeline_swallows_source_failures() {
    let start = Instant::now();
    let source = ScriptedSource::new(true);
    let mut pipeline = SuggestionPipeline::new(&source, DebounceConfig::default(), Language::En);

    pipeline.on_input("Pio", start);
    assert_eq!(pipeline.tick(start + ms(300)), Some(ResolveOutcome::Applied));
    assert!(pipeline.suggestions().is_empty());
}

#[test]
fn language_switch_resets_pipeline() {
    let start = Instant::now();
    let source = ScriptedSource::new(false);
    let mut pipeline = SuggestionPipeline::new(&source, DebounceConfig::default(), Language::En);

    pipeline.on_input("Rita", start);
    pipeline.set_language(Language::Es);
    assert_eq!(pipeline.next_deadline(), None);
    assert!(pipeline.tick(start + ms(500)).is_none());
    assert!(source.calls.borrow().is_empty());
}

struct CannedClient {
    reply: ClientResult<String>,
    requests: RefCell<Vec<ModelRequest>>,
}

impl ModelClient for CannedClient {
    fn generate(&self, request: &ModelRequest) -> ClientResult<ModelResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.reply.clone().map(ModelResponse::text)
    }

    fn generate_image(&self, _request: &ImageRequest) -> ClientResult<ImageResponse> {
        Err(ClientError::EmptyResponse)
    }
}

#[test]
fn saint_suggestions_are_deduplicated_and_capped() {
    let client = CannedClient {
        reply: Ok(r#"["Thomas Aquinas", "Thomas More", "Thomas Aquinas", " ", "Thomas Becket"]"#
            .to_string()),
        requests: RefCell::new(Vec::new()),
    };
    let service = SaintSuggestionService::new(&client, PromptBook::default());

    let names = service.suggest("Thom", 2, Language::En).unwrap();
    assert_eq!(names, vec!["Thomas Aquinas", "Thomas More"]);

    let requests = client.requests.borrow();
    assert!(requests[0].prompt.contains("Thom"));
    assert!(requests[0].response_schema.is_some());
}

#[test]
fn saint_suggestion_transport_errors_are_reported() {
    let client = CannedClient {
        reply: Err(ClientError::Transport("timeout".to_string())),
        requests: RefCell::new(Vec::new()),
    };
    let service = SaintSuggestionService::new(&client, PromptBook::default());
    assert!(service.suggest("Thom", 5, Language::En).is_err());
}

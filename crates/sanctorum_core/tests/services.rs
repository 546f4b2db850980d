use sanctorum_core::model::miracle::MiracleSource;
use sanctorum_core::{
    ChantService, ClientError, ClientResult, ImageRequest, ImageResponse, Language,
    MiracleService, ModelClient, ModelRequest, ModelResponse, PromptBook, SaintService,
    ScriptureService, ServiceError,
};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Replays canned answers in order and records every request.
#[derive(Default)]
struct ScriptedClient {
    replies: RefCell<VecDeque<ClientResult<ModelResponse>>>,
    image: Option<ImageResponse>,
    requests: RefCell<Vec<ModelRequest>>,
}

impl ScriptedClient {
    fn replying(replies: impl IntoIterator<Item = ClientResult<ModelResponse>>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    fn text(replies: &[&str]) -> Self {
        Self::replying(replies.iter().map(|reply| Ok(ModelResponse::text(*reply))))
    }

    fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl ModelClient for ScriptedClient {
    fn generate(&self, request: &ModelRequest) -> ClientResult<ModelResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ClientError::EmptyResponse))
    }

    fn generate_image(&self, _request: &ImageRequest) -> ClientResult<ImageResponse> {
        self.image.clone().ok_or(ClientError::EmptyResponse)
    }
}

const FRANCIS_PROFILE: &str = r#"{
    "name": "Francis of Assisi",
    "feastDay": "October 4",
    "patronage": ["animals", "ecology"],
    "summary": "Founder of the Franciscan order.",
    "biography": "Born in Assisi around 1181...",
    "quotes": ["Preach the Gospel at all times."]
}"#;

#[test]
fn saint_lookup_validates_then_fetches_profile() {
    let client = ScriptedClient::text(&[
        r#"{"isSaint": true, "reasoning": "Canonized in 1228."}"#,
        FRANCIS_PROFILE,
    ]);
    let service = SaintService::new(&client, PromptBook::default());

    let info = service.lookup("Francis of Assisi", Language::En).unwrap();
    assert_eq!(info.feast_day, "October 4");
    assert_eq!(info.patronage.len(), 2);
    assert!(info.image_url.is_none());
    assert_eq!(client.request_count(), 2);
}

#[test]
fn saint_rejection_shows_model_reasoning_and_skips_profile() {
    let client = ScriptedClient::text(&[
        r#"{"isSaint": false, "reasoning": "Napoleon was an emperor, not a saint."}"#,
    ]);
    let service = SaintService::new(&client, PromptBook::default());

    let err = service.lookup("Napoleon", Language::En).unwrap_err();
    assert_eq!(err.user_message(), "Napoleon was an emperor, not a saint.");
    assert_eq!(client.request_count(), 1);
}

#[test]
fn blank_saint_name_sends_nothing() {
    let client = ScriptedClient::default();
    let service = SaintService::new(&client, PromptBook::default());

    let err = service.lookup("   ", Language::Es).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(client.request_count(), 0);
}

#[test]
fn portrait_failure_does_not_fail_lookup() {
    let client =
        ScriptedClient::text(&[r#"{"isSaint": true, "reasoning": "ok"}"#, FRANCIS_PROFILE]);
    let service = SaintService::new(&client, PromptBook::default());

    let info = service
        .lookup_with_portrait("Francis of Assisi", Language::En)
        .unwrap();
    assert_eq!(info.name, "Francis of Assisi");
    assert!(info.image_url.is_none());
}

#[test]
fn portrait_is_returned_as_data_url() {
    let client = ScriptedClient {
        image: Some(ImageResponse {
            bytes_base64: "AAAA".to_string(),
            mime_type: "image/jpeg".to_string(),
        }),
        ..ScriptedClient::default()
    };
    let service = SaintService::new(&client, PromptBook::default());

    let url = service.portrait("Clare of Assisi", Language::En).unwrap();
    assert_eq!(url, "data:image/jpeg;base64,AAAA");
}

#[test]
fn transport_failure_maps_to_feature_message() {
    let client = ScriptedClient::replying([Err(ClientError::Transport("dns".to_string()))]);
    let service = SaintService::new(&client, PromptBook::default());

    let err = service.lookup("Rita", Language::En).unwrap_err();
    assert_eq!(
        err.to_string(),
        "An unexpected error occurred while fetching saint information."
    );
}

#[test]
fn miracle_with_empty_summary_is_rejected() {
    let client = ScriptedClient::text(&["   "]);
    let service = MiracleService::new(&client, PromptBook::default());

    let err = service.research("Unknown Town", Language::En).unwrap_err();
    assert!(matches!(err, ServiceError::Rejected(_)));
    assert!(client.requests.borrow()[0].grounded_search);
}

#[test]
fn miracle_sources_without_uri_or_title_are_dropped() {
    let response = ModelResponse {
        text: "In Lanciano, around 750 AD...".to_string(),
        grounding_sources: vec![
            MiracleSource {
                uri: "https://example.org/lanciano".to_string(),
                title: "Lanciano".to_string(),
            },
            MiracleSource {
                uri: String::new(),
                title: "No link".to_string(),
            },
        ],
    };
    let client = ScriptedClient::replying([Ok(response)]);
    let service = MiracleService::new(&client, PromptBook::default());

    let miracle = service.research("Lanciano", Language::En).unwrap();
    assert_eq!(miracle.sources.len(), 1);
    assert_eq!(miracle.sources[0].title, "Lanciano");
}

#[test]
fn blank_bible_search_returns_empty_without_request() {
    let client = ScriptedClient::default();
    let service = ScriptureService::new(&client, PromptBook::default());

    assert!(service.search("  ", Language::En).unwrap().is_empty());
    assert_eq!(client.request_count(), 0);
}

#[test]
fn bible_search_parses_verses() {
    let client = ScriptedClient::text(&[
        r#"[{"reference": "John 3:16", "text": "For God so loved the world"}]"#,
    ]);
    let service = ScriptureService::new(&client, PromptBook::default());

    let verses = service.search("loved the world", Language::En).unwrap();
    assert_eq!(verses[0].reference, "John 3:16");
}

#[test]
fn chapter_is_split_into_numbered_verses() {
    let client = ScriptedClient::text(&[
        "1 In the beginning\n2 And the earth\nwas void\n3 Let there be light",
    ]);
    let service = ScriptureService::new(&client, PromptBook::default());

    let verses = service.chapter("Genesis", "1", Language::En).unwrap();
    assert_eq!(verses.len(), 3);
    assert_eq!(verses[1].text, "And the earth was void");
}

#[test]
fn out_of_range_chapter_is_refused_locally() {
    let client = ScriptedClient::default();
    let service = ScriptureService::new(&client, PromptBook::default());

    let err = service.chapter("Jude", "2", Language::En).unwrap_err();
    assert_eq!(err.to_string(), "Jude has chapters 1 to 1.");
    assert_eq!(client.request_count(), 0);
}

#[test]
fn chant_lyrics_keep_requested_title() {
    let client = ScriptedClient::text(&["Salve, Regina, mater misericordiae"]);
    let service = ChantService::new(&client, PromptBook::default());

    let details = service.lyrics(" Salve Regina ", Language::Es).unwrap();
    assert_eq!(details.title, "Salve Regina");
    assert!(details.lyrics.starts_with("Salve"));
}

#[test]
fn malformed_chant_list_is_an_invalid_response() {
    let client = ScriptedClient::text(&["not json"]);
    let service = ChantService::new(&client, PromptBook::default());

    let err = service.list(Language::En).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidResponse { .. }));
}

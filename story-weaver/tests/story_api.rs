mod support;

use std::io::Cursor;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use story_weaver::console::{self, NO_INPUT_MESSAGE, STORY_FOOTER, STORY_HEADER};
use story_weaver::story::{EMPTY_RESPONSE_MESSAGE, ERROR_PREFIX, NO_CANDIDATES_MESSAGE};
use story_weaver::{Error, StoryOutcome, StoryWeaver};

use support::{build_gemini_client, text_response, STORY_PATH};

async fn weave_with(body: ResponseTemplate, idea: &str) -> StoryOutcome {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORY_PATH))
        .respond_with(body)
        .expect(1)
        .mount(&server)
        .await;
    let client = build_gemini_client(&server.uri());
    StoryWeaver::new(&client).weave(idea).await
}

#[tokio::test]
async fn request_carries_prompt_sampling_and_safety_settings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORY_PATH))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [{
                    "text": "Write a short, imaginative story paragraph (about 3-5 sentences) based on this idea: 'a clockwork fox'"
                }]
            }],
            "generationConfig": {
                "temperature": 0.8,
                "topP": 0.9,
                "topK": 40.0,
                "maxOutputTokens": 200
            },
            "safetySettings": [
                {"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                {"category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                {"category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("The fox ticked.")))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_gemini_client(&server.uri());
    let outcome = StoryWeaver::new(&client).weave("a clockwork fox").await;
    assert_eq!(outcome.to_string(), "The fox ticked.");
}

#[tokio::test]
async fn story_text_is_trimmed() {
    let outcome = weave_with(
        ResponseTemplate::new(200).set_body_json(text_response("  Hello world.  ")),
        "greeting",
    )
    .await;
    assert!(matches!(outcome, StoryOutcome::Story(ref text) if text == "Hello world."));
}

#[tokio::test]
async fn unrecognized_response_enums_still_yield_story() {
    let outcome = weave_with(
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "  A fine tale.  "}]},
                "finishReason": "UNEXPECTED_TOOL_CALL",
                "safetyRatings": [
                    {"category": "HARM_CATEGORY_NEW_THING", "probability": "VERY_HIGH"}
                ]
            }],
            "promptFeedback": {"blockReason": "MODEL_ARMOR"}
        })),
        "a quiet harbor",
    )
    .await;
    assert!(matches!(outcome, StoryOutcome::Story(ref text) if text == "A fine tale."));
}

#[tokio::test]
async fn blocked_prompt_returns_safety_message() {
    let outcome = weave_with(
        ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })),
        "something unsafe",
    )
    .await;
    assert_eq!(outcome.to_string(), NO_CANDIDATES_MESSAGE);
}

#[tokio::test]
async fn candidate_without_parts_is_malformed() {
    let outcome = weave_with(
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"role": "model", "parts": []}, "finishReason": "MAX_TOKENS"}]
        })),
        "idea",
    )
    .await;
    assert_eq!(outcome.to_string(), EMPTY_RESPONSE_MESSAGE);

    let outcome = weave_with(
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        })),
        "idea",
    )
    .await;
    assert!(matches!(outcome, StoryOutcome::EmptyResponse));
}

#[tokio::test]
async fn api_failure_is_reported_not_propagated() {
    let outcome = weave_with(
        ResponseTemplate::new(500).set_body_string("backend exploded"),
        "idea",
    )
    .await;
    let text = outcome.to_string();
    assert!(text.starts_with(ERROR_PREFIX));
    assert!(text.contains("backend exploded"));
    assert!(matches!(
        outcome,
        StoryOutcome::Failed(Error::ApiError { status: 500, .. })
    ));
}

#[tokio::test]
async fn undecodable_body_is_reported() {
    let outcome = weave_with(
        ResponseTemplate::new(200).set_body_string("not json"),
        "idea",
    )
    .await;
    assert!(outcome.to_string().starts_with("An error occurred: "));
    assert!(matches!(outcome, StoryOutcome::Failed(_)));
}

#[tokio::test]
async fn unreachable_server_is_reported() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = build_gemini_client(&uri);
    let outcome = StoryWeaver::new(&client).weave("idea").await;
    assert!(matches!(
        outcome,
        StoryOutcome::Failed(Error::HttpClient { .. })
    ));
    assert!(outcome.to_string().starts_with(ERROR_PREFIX));
}

#[tokio::test]
async fn empty_idea_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_gemini_client(&server.uri());
    let weaver = StoryWeaver::new(&client);
    let mut out = Vec::new();
    let outcome = console::run_story_session(&weaver, &mut Cursor::new("\n"), &mut out)
        .await
        .unwrap();

    assert!(outcome.is_none());
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("No input provided"));
    assert!(text.ends_with(&format!("{NO_INPUT_MESSAGE}\n")));
}

#[tokio::test]
async fn session_prints_framed_story() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(" Once upon a time. ")))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_gemini_client(&server.uri());
    let weaver = StoryWeaver::new(&client);
    let mut out = Vec::new();
    let outcome = console::run_story_session(&weaver, &mut Cursor::new("a moon garden\n"), &mut out)
        .await
        .unwrap();

    assert!(outcome.is_some_and(|o| o.is_story()));
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with(console::BANNER));
    assert!(text.contains("Story idea: "));
    assert!(text.contains("Weaving your story..."));
    assert!(text.ends_with(&format!("{STORY_HEADER}\nOnce upon a time.\n{STORY_FOOTER}\n")));
}

#![allow(dead_code)]

use serde_json::{json, Value};

use story_weaver::Client;

pub const STORY_PATH: &str = "/v1beta/models/gemini-1.5-flash-latest:generateContent";

pub fn build_gemini_client(base_url: &str) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(base_url)
        .build()
        .unwrap()
}

pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [{"text": text}]
                },
                "finishReason": "STOP"
            }
        ]
    })
}

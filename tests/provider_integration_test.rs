//! Handlers driving the real adapters against mocked vendor APIs

use conduit::gateway::{ChannelSink, StatusCode, StreamingPromptHandler, UnaryPromptHandler};
use conduit::providers::http::{HttpClient, ReqwestClient};
use conduit::providers::{CohereBuilder, OpenAIBuilder, ProviderBuilder};
use conduit::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> Arc<dyn HttpClient> {
    Arc::new(ReqwestClient::new().unwrap())
}

fn openai(server: &MockServer) -> Arc<dyn Provider> {
    Arc::new(
        OpenAIBuilder::new("sk-test")
            .base_url(format!("{}/v1", server.uri()))
            .with_client(client())
            .build()
            .unwrap(),
    )
}

fn cohere(server: &MockServer) -> Arc<dyn Provider> {
    Arc::new(
        CohereBuilder::new("co-test")
            .base_url(server.uri())
            .with_client(client())
            .build()
            .unwrap(),
    )
}

async fn collect(handler: StreamingPromptHandler, request: PromptRequest) -> Vec<Value> {
    let (mut sink, mut rx) = ChannelSink::new(8);
    let relay = tokio::spawn(async move { handler.handle(&request, &mut sink).await });

    let mut chunks = Vec::new();
    while let Some(chunk) = rx.recv().await {
        let mut value = serde_json::to_value(&chunk).unwrap();
        if let Some(object) = value.as_object_mut() {
            object.remove("streamDuration");
        }
        chunks.push(value);
    }
    relay.await.unwrap();
    chunks
}

#[tokio::test]
async fn test_openai_unary_with_blank_names_and_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo-16k",
            "messages": [
                {"role": "system", "content": null},
                {"role": "user", "content": "hi", "name": "ada"}
            ],
            "user": "app-9"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "hello"}, "finish_reason": "length"}],
            "usage": {"prompt_tokens": 7, "completion_tokens": 2, "total_tokens": 9}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PromptRequest::builder()
        .model(Model::Gpt35Turbo16k)
        .message(Message::system("   ").with_name(" "))
        .message(Message::user("hi").with_name(" ada "))
        .application_id("app-9")
        .build();

    let response = UnaryPromptHandler::new(openai(&server))
        .handle(&request)
        .await
        .unwrap();
    assert_eq!(response.content, "hello");
    assert_eq!(response.finish_reason, FinishReason::Limit);
    assert_eq!(response.request_tokens, 7);
    assert_eq!(response.response_tokens, 2);
    assert_eq!(response.total_tokens, Some(9));
}

#[tokio::test]
async fn test_openai_unary_empty_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [],
            "usage": {"prompt_tokens": 4, "completion_tokens": 0, "total_tokens": 4}
        })))
        .mount(&server)
        .await;

    let response = UnaryPromptHandler::new(openai(&server))
        .handle(&PromptRequest::new(vec![Message::user("hi")]))
        .await
        .unwrap();
    assert_eq!(response.content, "");
    assert_eq!(response.request_tokens, 4);
    assert_eq!(response.finish_reason, FinishReason::Other);
}

#[tokio::test]
async fn test_openai_rate_limit_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "7")
                .set_body_string("slow down"),
        )
        .mount(&server)
        .await;

    let err = UnaryPromptHandler::new(openai(&server))
        .handle(&PromptRequest::new(vec![Message::user("hi")]))
        .await
        .unwrap_err();
    assert_eq!(err.code, StatusCode::ResourceExhausted);
    assert_eq!(err.message, "error communicating with OpenAI");
    assert_eq!(err.details.as_deref(), Some("retry after 7s"));
}

#[tokio::test]
async fn test_openai_stream_end_to_end() {
    let server = MockServer::start().await;
    let frames = [
        json!({"choices": [{"index": 0, "delta": {"content": "a"}, "finish_reason": null}]}),
        json!({"choices": [{"index": 0, "delta": {"content": "b"}, "finish_reason": null}]}),
        json!({"choices": [{"index": 0, "delta": {"content": "c"}, "finish_reason": null}]}),
        json!({"choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]}),
        json!({"choices": [], "usage": {"prompt_tokens": 5, "completion_tokens": 3, "total_tokens": 8}}),
    ];
    let mut body: String = frames.iter().map(|frame| format!("data: {frame}\n\n")).collect();
    body.push_str("data: [DONE]\n\n");

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"stream": true})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let chunks = collect(
        StreamingPromptHandler::new(openai(&server)),
        PromptRequest::new(vec![Message::user("count")]),
    )
    .await;

    assert_eq!(
        chunks,
        vec![
            json!({"content": "a"}),
            json!({"content": "b"}),
            json!({"content": "c"}),
            json!({"finishReason": "DONE", "requestTokens": 5, "responseTokens": 3}),
        ]
    );
}

#[tokio::test]
async fn test_openai_stream_unauthorized_is_single_error_chunk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let chunks = collect(
        StreamingPromptHandler::new(openai(&server)),
        PromptRequest::new(vec![Message::user("hi")]),
    )
    .await;
    assert_eq!(chunks, vec![json!({"finishReason": "ERROR"})]);
}

#[tokio::test]
async fn test_cohere_stream_end_to_end() {
    let server = MockServer::start().await;
    let body: String = [
        json!({"is_finished": false, "event_type": "stream-start", "generation_id": "g"}),
        json!({"is_finished": false, "event_type": "text-generation", "text": "a"}),
        json!({"is_finished": false, "event_type": "text-generation", "text": "b"}),
        json!({"is_finished": false, "event_type": "text-generation", "text": "c"}),
        json!({
            "is_finished": true,
            "event_type": "stream-end",
            "finish_reason": "MAX_TOKENS",
            "response": {"text": "abc", "meta": {"billed_units": {"input_tokens": 5, "output_tokens": 3}}}
        }),
    ]
    .iter()
    .map(|frame| format!("{frame}\n"))
    .collect();

    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .and(body_partial_json(json!({
            "model": "command-light",
            "message": "count",
            "chat_history": [{"role": "SYSTEM", "message": "be terse"}],
            "stream": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/stream+json"))
        .mount(&server)
        .await;

    let request = PromptRequest::builder()
        .model(Model::Gpt4_8k)
        .message(Message::system("be terse"))
        .message(Message::user("count"))
        .build();
    let chunks = collect(StreamingPromptHandler::new(cohere(&server)), request).await;

    assert_eq!(
        chunks,
        vec![
            json!({"content": "a"}),
            json!({"content": "b"}),
            json!({"content": "c"}),
            json!({"finishReason": "LIMIT", "requestTokens": 5, "responseTokens": 3}),
        ]
    );
}

#[tokio::test]
async fn test_cohere_function_message_is_rejected_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = PromptRequest::new(vec![Message::function("calc", "42")]);
    let err = UnaryPromptHandler::new(cohere(&server))
        .handle(&request)
        .await
        .unwrap_err();
    assert_eq!(err.code, StatusCode::InvalidArgument);

    let chunks = collect(StreamingPromptHandler::new(cohere(&server)), request).await;
    assert_eq!(chunks, vec![json!({"finishReason": "ERROR"})]);
}

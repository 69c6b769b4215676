//! Integration tests for OpenAiChatModel using wiremock

use agent::{AgentConfig, AgentError, BackgroundCheckManager, ChatMessage, ChatModel, OpenAiChatModel};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_model(mock_server: &MockServer) -> OpenAiChatModel {
    OpenAiChatModel::from_config(&AgentConfig {
        api_key: Some("sk-test".to_string()),
        base_url: format!("{}/v1", mock_server.uri()),
        model: "gpt-test".to_string(),
        ..Default::default()
    })
    .unwrap()
}

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-test",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_complete_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-test",
            "temperature": 0.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Acme looks fine.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let model = create_model(&mock_server);
    let reply = model
        .complete(&[ChatMessage::user("Run a background check on Acme")])
        .await
        .unwrap();
    assert_eq!(reply, "Acme looks fine.");
}

#[tokio::test]
async fn test_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "Incorrect API key provided" }
        })))
        .mount(&mock_server)
        .await;

    let err = create_model(&mock_server)
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();
    match err {
        AgentError::Unauthorized(message) => assert_eq!(message, "Incorrect API key provided"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
        .mount(&mock_server)
        .await;

    let err = create_model(&mock_server)
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::RateLimited(_)));
}

#[tokio::test]
async fn test_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let err = create_model(&mock_server)
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn test_empty_choices() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
        .mount(&mock_server)
        .await;

    let err = create_model(&mock_server)
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::EmptyResponse));
}

#[tokio::test]
async fn test_manager_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("No red flags found.")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut manager = BackgroundCheckManager::new(create_model(&mock_server));
    let first = manager.process_request("Acme Corp").await.unwrap();
    assert!(first.is_completed());
    assert_eq!(first.report.as_deref(), Some("No red flags found."));

    manager.process_request("Globex").await.unwrap();
    assert_eq!(manager.history().len(), 4);
}

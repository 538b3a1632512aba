// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

//! Integration tests for AI providers and the simplifier.
//!
//! Uses `wiremock` to mock HTTP endpoints so no real model servers are needed.

mod helpers;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::sample_report;
use plainterms::config::{Config, Provider};
use plainterms::domain::SAMPLE_AGREEMENT;
use plainterms::error::Error;
use plainterms::services::llm::huggingface::{HuggingFaceProvider, summary_chunks};
use plainterms::services::llm::ollama::OllamaProvider;
use plainterms::services::llm::openai::OpenAiProvider;
use plainterms::services::llm::{LlmProvider, create_provider};
use plainterms::services::simplifier::Simplifier;

// ─── Test helpers ────────────────────────────────────────────────────────────

fn ollama_config(server_url: &str) -> Config {
    Config {
        provider: Provider::Ollama,
        model: Some("qwen3:4b".into()),
        ollama_host: server_url.to_string(),
        timeout_secs: 5,
        ..Config::default()
    }
}

fn openai_config(server_url: &str) -> Config {
    Config {
        provider: Provider::OpenAI,
        openai_base_url: Some(server_url.to_string()),
        api_key: Some("test-key".into()),
        timeout_secs: 5,
        ..Config::default()
    }
}

fn huggingface_config(server_url: &str) -> Config {
    Config {
        provider: Provider::HuggingFace,
        huggingface_base_url: Some(server_url.to_string()),
        api_key: Some("hf_test".into()),
        timeout_secs: 5,
        ..Config::default()
    }
}

/// Drain the token receiver and return all collected tokens.
async fn drain_tokens(mut rx: mpsc::Receiver<String>) -> Vec<String> {
    let mut tokens = Vec::new();
    while let Some(tok) = rx.recv().await {
        tokens.push(tok);
    }
    tokens
}

fn openai_stream(text: &str) -> String {
    [
        format!(
            r#"data: {{"choices":[{{"delta":{{"content":"{text}"}},"finish_reason":null}}]}}"#
        ),
        String::new(),
        r#"data: {"choices":[{"delta":{},"finish_reason":"stop"}]}"#.to_string(),
        String::new(),
        "data: [DONE]".to_string(),
        String::new(),
    ]
    .join("\n")
}

// ─── Provider factory ────────────────────────────────────────────────────────

#[test]
fn no_provider_means_disabled() {
    let result = create_provider(&Config::default());
    assert!(matches!(result, Err(Error::ProviderDisabled)));
}

#[test]
fn factory_picks_configured_backend() {
    let provider = create_provider(&huggingface_config("http://localhost:1")).unwrap();
    assert_eq!(provider.name(), "huggingface");
    assert!(matches!(provider, LlmProvider::HuggingFace(_)));

    let provider = create_provider(&ollama_config("http://localhost:1")).unwrap();
    assert_eq!(provider.name(), "ollama");
}

// ─── Ollama ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ollama_health_check_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [
                {"name": "qwen3:4b"},
                {"name": "llama3:latest"}
            ]
        })))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(&ollama_config(&server.uri()));
    let models = provider.health_check().await.unwrap();
    assert_eq!(models, vec!["qwen3:4b", "llama3:latest"]);
    assert!(provider.verify_model().await.is_ok());

    // "llama3" resolves to the ":latest" tag
    let config = Config {
        model: Some("llama3".into()),
        ..ollama_config(&server.uri())
    };
    assert!(OllamaProvider::new(&config).verify_model().await.is_ok());
}

#[tokio::test]
async fn ollama_not_running() {
    // Use a port that is almost certainly not listening
    let provider = OllamaProvider::new(&ollama_config("http://127.0.0.1:1"));
    let err = provider.health_check().await.unwrap_err();
    assert!(
        matches!(err, Error::OllamaNotRunning { .. }),
        "expected OllamaNotRunning, got: {err:?}"
    );
}

#[tokio::test]
async fn ollama_model_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{"name": "mistral:7b"}]
        })))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(&ollama_config(&server.uri()));
    match provider.verify_model().await.unwrap_err() {
        Error::ModelNotFound { model, available } => {
            assert_eq!(model, "qwen3:4b");
            assert_eq!(available, vec!["mistral:7b"]);
        }
        other => panic!("expected ModelNotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn ollama_streaming_response() {
    let server = MockServer::start().await;

    // NDJSON; the final object has no trailing newline
    let body = [
        r#"{"response":"You pay","done":false}"#,
        r#"{"response":" within","done":false}"#,
        r#"{"response":" 30 days.","done":true}"#,
    ]
    .join("\n");

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({
            "model": "qwen3:4b",
            "stream": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(&ollama_config(&server.uri()));
    let (tx, rx) = mpsc::channel(32);
    let result = provider
        .generate("explain", tx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result, "You pay within 30 days.");
    let tokens = drain_tokens(rx).await;
    assert_eq!(tokens.len(), 2, "last object is parsed after the stream ends");
}

#[tokio::test]
async fn ollama_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(&ollama_config(&server.uri()));
    let (tx, _rx) = mpsc::channel(32);
    let err = provider
        .generate("explain", tx, CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        Error::Provider { provider, message } => {
            assert_eq!(provider, "ollama");
            assert!(message.contains("500"), "got: {message}");
        }
        other => panic!("expected Provider error, got: {other:?}"),
    }
}

// ─── OpenAI ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn openai_streaming_response() {
    let server = MockServer::start().await;

    let body = [
        r#"data: {"choices":[{"delta":{"content":"This is"},"finish_reason":null}]}"#,
        "",
        r#"data: {"choices":[{"delta":{"content":" a service contract."},"finish_reason":"stop"}]}"#,
        "",
        "data: [DONE]",
        "",
    ]
    .join("\n");

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-3.5-turbo",
            "stream": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(&openai_config(&server.uri()));
    let (tx, rx) = mpsc::channel(32);
    let result = provider
        .generate("explain", tx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result, "This is a service contract.");
    let tokens = drain_tokens(rx).await;
    assert_eq!(tokens, vec!["This is", " a service contract."]);
}

#[tokio::test]
async fn openai_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"message": "Incorrect API key provided"}
        })))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(&openai_config(&server.uri()));
    match provider.verify_connection().await.unwrap_err() {
        Error::Provider { provider, message } => {
            assert_eq!(provider, "openai");
            assert_eq!(message, "invalid API key");
        }
        other => panic!("expected Provider error, got: {other:?}"),
    }
}

#[tokio::test]
async fn openai_without_key_fails_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        api_key: None,
        ..openai_config(&server.uri())
    };
    let provider = OpenAiProvider::new(&config);
    match provider.verify_connection().await.unwrap_err() {
        Error::Provider { provider, message } => {
            assert_eq!(provider, "openai");
            assert_eq!(message, "API key not configured");
        }
        other => panic!("expected Provider error, got: {other:?}"),
    }
}

#[tokio::test]
async fn simplifier_stops_when_cancelled() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(openai_stream("late"))
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(&openai_config(&server.uri()));
    let (tx, _rx) = mpsc::channel(32);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = sample_report();
    let provider = LlmProvider::OpenAi(provider);
    let result = Simplifier::simplify(&provider, SAMPLE_AGREEMENT, &report, tx, &cancel).await;
    assert!(matches!(result, Err(Error::Cancelled)));
}

// ─── HuggingFace ─────────────────────────────────────────────────────────────

#[test]
fn chunks_skip_short_tails_and_cap_at_three() {
    let chunks = summary_chunks(&"a".repeat(3500));
    assert_eq!(chunks.len(), 3);
    assert!(chunks.iter().all(|c| c.chars().count() == 1024));

    // Second chunk is only 76 chars
    assert_eq!(summary_chunks(&"a".repeat(1100)).len(), 1);
    assert!(summary_chunks("too short to summarize").is_empty());
}

#[test]
fn chunks_split_on_characters_not_bytes() {
    let chunks = summary_chunks(&"é".repeat(2048));
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].chars().count(), 1024);
}

#[tokio::test]
async fn huggingface_summarizes_each_chunk() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/sshleifer/distilbart-cnn-12-6"))
        .and(header("authorization", "Bearer hf_test"))
        .and(body_partial_json(serde_json::json!({
            "parameters": {"max_length": 150, "min_length": 50, "do_sample": false}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"summary_text": " The provider consults for a fee. "}
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let provider = HuggingFaceProvider::new(&huggingface_config(&server.uri()));
    let (tx, rx) = mpsc::channel(32);
    let text = "x".repeat(1500);
    let result = provider
        .summarize(&text, tx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        result,
        "The provider consults for a fee. The provider consults for a fee."
    );
    assert_eq!(drain_tokens(rx).await.len(), 2);
}

#[tokio::test]
async fn huggingface_reports_api_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/sshleifer/distilbart-cnn-12-6"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": "Model is currently loading"
        })))
        .mount(&server)
        .await;

    let provider = HuggingFaceProvider::new(&huggingface_config(&server.uri()));
    let (tx, _rx) = mpsc::channel(32);
    let err = provider
        .summarize(&"x".repeat(500), tx, CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        Error::Provider { provider, message } => {
            assert_eq!(provider, "huggingface");
            assert!(message.contains("503"), "got: {message}");
            assert!(message.contains("Model is currently loading"), "got: {message}");
        }
        other => panic!("expected Provider error, got: {other:?}"),
    }
}

#[tokio::test]
async fn huggingface_without_token_fails_verification() {
    let config = Config {
        api_key: None,
        ..huggingface_config("http://localhost:1")
    };
    let provider = HuggingFaceProvider::new(&config);
    let err = provider.verify_connection().await.unwrap_err();
    assert!(err.to_string().contains("API token not configured"));
}

// ─── Simplifier ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn simplifier_uses_provider_answers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(openai_stream("Plain answer")))
        .expect(3)
        .mount(&server)
        .await;

    let provider = create_provider(&openai_config(&server.uri())).unwrap();
    let report = sample_report();
    let (tx, rx) = mpsc::channel(64);
    let drain = tokio::spawn(drain_tokens(rx));

    let ai = Simplifier::simplify(
        &provider,
        SAMPLE_AGREEMENT,
        &report,
        tx,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(ai.provider, "openai");
    assert_eq!(ai.summary, "Plain answer");
    assert_eq!(ai.key_points, "Plain answer");
    assert_eq!(ai.risks, "Plain answer");
    assert!(!ai.fallback);
    assert!(ai.error.is_none());
    assert_eq!(drain.await.unwrap().len(), 3);
}

#[tokio::test]
async fn simplifier_falls_back_when_provider_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let provider = create_provider(&openai_config(&server.uri())).unwrap();
    let report = sample_report();
    let (tx, _rx) = mpsc::channel(64);

    let ai = Simplifier::simplify(
        &provider,
        SAMPLE_AGREEMENT,
        &report,
        tx,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert!(ai.fallback);
    assert_eq!(ai.summary, report.summary);
    assert!(ai.key_points.starts_with("• SERVICES Provider agrees"));
    assert_eq!(ai.key_points.lines().count(), 6);
    assert_eq!(ai.risks, report.risks.join("\n"));
    let error = ai.error.unwrap();
    assert_eq!(error.matches("upstream down").count(), 3);
}

#[tokio::test]
async fn simplifier_mixes_huggingface_summary_with_rule_based_rest() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/sshleifer/distilbart-cnn-12-6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"summary_text": "Consulting for a fee."}
        ])))
        .mount(&server)
        .await;

    let provider = create_provider(&huggingface_config(&server.uri())).unwrap();
    let report = sample_report();
    let (tx, rx) = mpsc::channel(64);
    let drain = tokio::spawn(drain_tokens(rx));

    let ai = Simplifier::simplify(
        &provider,
        SAMPLE_AGREEMENT,
        &report,
        tx,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    // The normalized sample is 1151 chars: two chunks
    assert_eq!(ai.summary, "Consulting for a fee. Consulting for a fee.");
    assert_eq!(ai.risks, report.risks.join("\n"));
    assert!(ai.key_points.starts_with("• "));
    assert!(ai.fallback);
    assert!(ai.error.is_none());
    drain.await.unwrap();
}

#[tokio::test]
async fn simplifier_falls_back_on_empty_answer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"response":"   ","done":true}"#),
        )
        .mount(&server)
        .await;

    let provider = create_provider(&ollama_config(&server.uri())).unwrap();
    let report = plainterms::services::analyzer::DocumentAnalyzer::analyze("The sky is blue.");
    let (tx, rx) = mpsc::channel(64);
    let drain = tokio::spawn(drain_tokens(rx));

    let ai = Simplifier::simplify(
        &provider,
        "The sky is blue.",
        &report,
        tx,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert!(ai.fallback);
    assert!(ai.error.is_none());
    assert_eq!(ai.key_points, "No key points identified.");
    assert_eq!(ai.risks, "No obvious risks identified.");
    drain.await.unwrap();
}

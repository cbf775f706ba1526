//! End-to-end gateway tests against a mocked OpenAI backend.

use serde_json::json;
use tokenforge::config::Config;
use tokenforge::gateway::run_gateway_with_listener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Bind an ephemeral port, run the gateway pointed at the mock backend, and
/// return its base URL.
async fn spawn_gateway(backend_url: &str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = Config {
        api_key: Some("sk-test".to_string()),
        base_url: Some(backend_url.to_string()),
        ..Config::default()
    };
    tokio::spawn(async move {
        let _ = run_gateway_with_listener(listener, &config).await;
    });
    format!("http://{addr}")
}

/// An OpenAI-shaped chat completion whose message content is `content`.
fn model_says(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "content": content } }]
    }))
}

async fn mock_backend(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

fn five_colors() -> serde_json::Value {
    json!(["#112233", "#445566", "#778899", "#aabbcc", "#ddeeff"])
}

fn generate_body() -> serde_json::Value {
    json!({
        "brandName": "Acme",
        "purpose": "Sell widgets",
        "values": "Trust",
        "niche": "tech",
        "theme": "minimal",
        "warmth": "50",
        "brightness": "50",
        "typography": "modern"
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let backend = mock_backend(model_says("{}")).await;
    let base = spawn_gateway(&backend.uri()).await;

    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn analyze_echoes_the_submitted_palette_not_the_models() {
    // The model tries to return a different palette; the endpoint must
    // discard it and echo the submitted one.
    let backend = mock_backend(model_says(
        r##"{"mainColor":{"name":"Midnight","hex":"#112233"},"style":"Minimal","colors":["#000000","#ffffff","#ff0000","#00ff00","#0000ff"]}"##,
    ))
    .await;
    let base = spawn_gateway(&backend.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/analyze-moodboard"))
        .json(&json!({ "colors": five_colors() }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["mainColor"]["name"], "Midnight");
    assert_eq!(body["style"], "Minimal");
    assert_eq!(body["colors"], five_colors());
}

#[tokio::test]
async fn analyze_accepts_fenced_model_output() {
    let backend = mock_backend(model_says(
        "```json\n{\"mainColor\":{\"name\":\"Slate\",\"hex\":\"#112233\"},\"style\":\"Editorial\"}\n```",
    ))
    .await;
    let base = spawn_gateway(&backend.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/analyze-moodboard"))
        .json(&json!({ "colors": five_colors() }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["style"], "Editorial");
}

#[tokio::test]
async fn analyze_tolerates_an_image_base64_field_in_the_body() {
    // The original client submitted the image alongside the palette; the
    // endpoint reads only the colors and ignores the rest.
    let backend = mock_backend(model_says(
        r##"{"mainColor":{"name":"Midnight","hex":"#112233"},"style":"Minimal"}"##,
    ))
    .await;
    let base = spawn_gateway(&backend.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/analyze-moodboard"))
        .json(&json!({
            "imageBase64": "data:image/png;base64,aGVsbG8=",
            "colors": five_colors()
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["colors"], five_colors());
    assert_eq!(body["style"], "Minimal");
}

#[tokio::test]
async fn analyze_rejects_wrong_palette_arity() {
    let backend = mock_backend(model_says("{}")).await;
    let base = spawn_gateway(&backend.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/analyze-moodboard"))
        .json(&json!({ "colors": ["#112233", "#445566"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn analyze_maps_upstream_failure_to_stable_error() {
    let backend = mock_backend(ResponseTemplate::new(500).set_body_string("boom")).await;
    let base = spawn_gateway(&backend.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/analyze-moodboard"))
        .json(&json!({ "colors": five_colors() }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Moodboard analysis error");
}

#[tokio::test]
async fn generate_returns_the_token_set() {
    let backend = mock_backend(model_says(
        r##"{
            "color": { "primary": "#3D5AFE", "background": "#F8F9FB", "text": "#23272F" },
            "font": { "family": "Inter, sans-serif", "base": "16px", "h1": "32px" },
            "spacing": { "sm": "8px", "md": "16px", "lg": "32px" },
            "radius": { "md": "12px" },
            "illustrations": ["one", "two", "three"]
        }"##,
    ))
    .await;
    let base = spawn_gateway(&backend.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/generate-tokens"))
        .json(&generate_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["tokens"]["color"]["primary"], "#3D5AFE");
    assert_eq!(body["tokens"]["illustrations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn generate_maps_malformed_model_output_to_stable_error() {
    let backend = mock_backend(model_says("sorry, no JSON today")).await;
    let base = spawn_gateway(&backend.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/generate-tokens"))
        .json(&generate_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Token generation error");
}

#[tokio::test]
async fn generate_rejects_a_body_missing_required_fields() {
    let backend = mock_backend(model_says("{}")).await;
    let base = spawn_gateway(&backend.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/generate-tokens"))
        .json(&json!({ "brandName": "Acme" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

use listing_studio::ai::generate_product_content;
use listing_studio::tests::util::{content_json, gemini_body, sample_input};
use listing_studio::{AiConfig, ErrorCategory, GenerationError, ImageAttachment, InterpretError};
use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

async fn mock_reply(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(text)))
        .mount(server)
        .await;
}

fn config(server: &MockServer) -> AiConfig {
    AiConfig::new("k").with_api_base(server.uri())
}

#[tokio::test]
async fn generates_content_and_derives_pricing() {
    let server = MockServer::start().await;
    mock_reply(&server, &content_json().to_string()).await;

    let content = generate_product_content(&config(&server), &sample_input())
        .await
        .unwrap();
    assert_eq!(content.url_slug, "refurbished-lenovo-e51-80");
    let pricing = &content.pricing_analysis;
    assert_eq!(pricing.suggested_price, Some(5199.0));
    assert_eq!(pricing.price_gap, Some(5199.0 - 5325.0));
    assert_eq!(pricing.profit, None);
    assert_eq!(pricing.competitors.len(), 2);
}

#[tokio::test]
async fn prose_wrapped_reply_is_accepted() {
    let server = MockServer::start().await;
    let text = format!("Here you go:\n{}\nThanks!", content_json());
    mock_reply(&server, &text).await;

    let content = generate_product_content(&config(&server), &sample_input())
        .await
        .unwrap();
    assert!(content.product_title.starts_with("Refurbished Lenovo"));
}

#[tokio::test]
async fn image_is_sent_before_prompt() {
    let server = MockServer::start().await;
    mock_reply(&server, &content_json().to_string()).await;

    let mut input = sample_input();
    input.image = Some(ImageAttachment::new("image/png", b"label".to_vec()));
    generate_product_content(&config(&server), &input)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = requests[0].body_json().unwrap();
    let parts = body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
    assert_eq!(parts[0]["inlineData"]["data"], "bGFiZWw=");
    assert!(parts[1]["text"].as_str().unwrap().contains("Takealot: 5500, Evetech: 5150"));
}

#[tokio::test]
async fn api_error_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = generate_product_content(&config(&server), &sample_input())
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Api { status: 500, .. }));
    assert_eq!(err.category(), ErrorCategory::Transport);
}

#[tokio::test]
async fn missing_pricing_analysis_is_rejected() {
    let server = MockServer::start().await;
    let mut reply = content_json();
    reply.as_object_mut().unwrap().remove("pricingAnalysis");
    mock_reply(&server, &reply.to_string()).await;

    let err = generate_product_content(&config(&server), &sample_input())
        .await
        .unwrap_err();
    match err {
        GenerationError::Interpret(InterpretError::MissingFields(fields)) => {
            assert_eq!(fields, vec!["pricingAnalysis"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn reply_without_json_is_a_shape_error() {
    let server = MockServer::start().await;
    mock_reply(&server, "Sorry, I cannot help with that.").await;

    let err = generate_product_content(&config(&server), &sample_input())
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ResponseShape);
    assert_eq!(
        err.user_message(),
        "The AI did not return any content we could read. Please try again."
    );
}

#[tokio::test]
async fn truncated_json_is_malformed() {
    let server = MockServer::start().await;
    mock_reply(&server, r#"{"productTitle": "x", "pricingAnalysis": {"rationale": "y"}"#).await;

    let err = generate_product_content(&config(&server), &sample_input())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Interpret(InterpretError::MalformedJson(_))
    ));
}

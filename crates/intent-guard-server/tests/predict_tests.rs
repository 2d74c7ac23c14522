mod common;

use common::harness::{TestWeights, spawn_test_server};
use common::http_client::{TestClient, TestClientError};

#[tokio::test]
async fn test_predict_over_http() {
    let server = spawn_test_server(TestWeights::Zero).await;
    let client = TestClient::new(server.url());

    let response = client.predict("You are such a loser").await.unwrap();
    assert!(!response.is_bullying);
    assert_eq!(response.intent_score, 50.0);
    assert_eq!(response.severity, 0);
}

#[tokio::test]
async fn test_missing_text_over_http() {
    let server = spawn_test_server(TestWeights::Zero).await;
    let client = TestClient::new(server.url());

    let response = client
        .predict_json(serde_json::json!({}))
        .await
        .expect("missing text should be scored as empty");
    assert_eq!(response.severity, 0);
}

#[tokio::test]
async fn test_outputs_in_range_with_random_weights() {
    let server = spawn_test_server(TestWeights::Random).await;
    let client = TestClient::new(server.url());

    let long_text = "you are so very stupid ".repeat(40);
    let texts = [
        "",
        "nobody likes you",
        "have a nice day friend",
        "words the vocabulary has never seen",
        long_text.as_str(),
    ];

    for text in texts {
        let response = client.predict(text).await.unwrap();
        assert!(
            (0.0..=100.0).contains(&response.intent_score),
            "intent out of range: {}",
            response.intent_score
        );
        assert!(response.severity < 5);
    }
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let server = spawn_test_server(TestWeights::Random).await;
    let client = TestClient::new(server.url());

    let first = client.predict("go away you idiot").await.unwrap();
    let second = client.predict("go away you idiot").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_requests_share_the_model() {
    let server = spawn_test_server(TestWeights::Random).await;
    let client = std::sync::Arc::new(TestClient::new(server.url()));

    let expected = client.predict("great job").await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.predict("great job").await })
        })
        .collect();

    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response, expected);
    }
}

#[tokio::test]
async fn test_non_string_text_is_rejected() {
    let server = spawn_test_server(TestWeights::Zero).await;
    let client = TestClient::new(server.url());

    let err = client
        .predict_json(serde_json::json!({"text": ["a", "b"]}))
        .await
        .unwrap_err();
    assert!(matches!(err, TestClientError::BadRequest(_)));
}

#[tokio::test]
async fn test_non_json_body_is_rejected() {
    let server = spawn_test_server(TestWeights::Zero).await;
    let client = TestClient::new(server.url());

    let (status, body) = client.post_raw("text/plain", "you are a loser").await.unwrap();
    assert_eq!(status, 400);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["code"], 400);
}

use httpmock::prelude::*;
use myhomestay::core::assistant::{
    AiAssistant, DescriptionRequest, PriceRequest, FALLBACK_DESCRIPTION, FALLBACK_PRICE_REASON,
};
use myhomestay::core::booking::BookingPolicy;
use myhomestay::core::{GenerationRequest, GenerativeModel, ListingType, NewListing};
use myhomestay::{GeminiClient, HomestayError, InMemoryListingRepository, Marketplace};
use serde_json::json;
use std::time::Duration;

const MODEL_PATH: &str = "/v1beta/models/test-model:generateContent";

fn client_for(server: &MockServer, api_key: Option<&str>) -> GeminiClient {
    GeminiClient::new(
        server.url("/v1beta"),
        "test-model",
        api_key.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn text_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn langkawi_villa() -> PriceRequest {
    PriceRequest {
        city: "Langkawi".to_string(),
        listing_type: ListingType::EntireHome,
        amenities: vec!["wifi".to_string(), "pool".to_string()],
        bedrooms: 3,
    }
}

#[tokio::test]
async fn test_smart_price_round_trip_against_mock_model() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(MODEL_PATH)
                .header("x-goog-api-key", "test-key")
                .body_contains("City: Langkawi")
                .body_contains("\"responseMimeType\":\"application/json\"")
                .body_contains("suggestedPrice");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(text_reply(
                    r#"{"suggestedPrice": 720, "reason": "Pool villas near Cenang book out early."}"#,
                ));
        })
        .await;

    let assistant = AiAssistant::new(client_for(&server, Some("test-key")));
    let suggestion = assistant.suggest_smart_price(&langkawi_villa()).await;

    mock.assert_async().await;
    assert_eq!(suggestion.suggested_price, 720.0);
    assert_eq!(suggestion.reason, "Pool villas near Cenang book out early.");
}

#[tokio::test]
async fn test_smart_price_falls_back_on_server_error() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(500).body("internal error");
        })
        .await;

    let assistant = AiAssistant::new(client_for(&server, Some("test-key")));
    let suggestion = assistant.suggest_smart_price(&langkawi_villa()).await;

    mock.assert_async().await;
    assert_eq!(suggestion.suggested_price, 0.0);
    assert_eq!(suggestion.reason, FALLBACK_PRICE_REASON);
}

#[tokio::test]
async fn test_missing_api_key_never_reaches_the_network() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).json_body(text_reply("unused"));
        })
        .await;

    let assistant = AiAssistant::new(client_for(&server, None));
    let description = assistant
        .generate_description(&DescriptionRequest {
            title: "Loft".to_string(),
            amenities: vec![],
            vibe: "quiet".to_string(),
        })
        .await;

    assert_eq!(description, FALLBACK_DESCRIPTION);
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_client_reports_empty_candidates() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).json_body(json!({ "candidates": [] }));
        })
        .await;

    let err = client_for(&server, Some("test-key"))
        .generate(GenerationRequest::text("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, HomestayError::AiResponseError { .. }));
}

#[tokio::test]
async fn test_create_listing_drafts_description_with_amenity_names() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(MODEL_PATH)
                .body_contains("Beach Hut")
                .body_contains("Beach access");
            then.status(200)
                .json_body(text_reply("Fall asleep to the waves in this breezy hut."));
        })
        .await;

    let market = Marketplace::new(
        InMemoryListingRepository::seeded(),
        BookingPolicy::default(),
        client_for(&server, Some("test-key")),
    );
    let created = market
        .create_listing_with_ai_description(
            NewListing {
                title: "Beach Hut".to_string(),
                price_per_night: 150.0,
                max_guests: 2,
                amenities: vec!["wifi".to_string(), "beach".to_string()],
                ..Default::default()
            },
            "breezy",
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        created.description,
        "Fall asleep to the waves in this breezy hut."
    );
    assert_eq!(market.get_listing(&created.id).unwrap(), created);
}

#[tokio::test]
async fn test_suggest_price_for_unknown_listing_is_not_found() {
    let server = MockServer::start_async().await;
    let market = Marketplace::new(
        InMemoryListingRepository::seeded(),
        BookingPolicy::default(),
        client_for(&server, Some("test-key")),
    );

    let err = market.suggest_price("nope").await.unwrap_err();
    assert!(matches!(err, HomestayError::NotFound { .. }));
}

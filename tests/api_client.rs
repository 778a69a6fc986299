//! Wire-level tests for the backend API client against a mock server.

use httpmock::prelude::*;
use serde_json::json;

use solvault_wallet::domain::session::{Network, SOL_COIN_TYPE};
use solvault_wallet::infra::api::ApiClient;

#[tokio::test]
async fn create_new_posts_coin_type_and_parses_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/create-new")
                .header("content-type", "application/json")
                .json_body(json!({"coinType": 501}));
            then.status(200).json_body(json!({
                "phrase": "abandon ability able about",
                "key": {"public": "A1", "private": "B1"},
            }));
        })
        .await;

    let client = ApiClient::new(&server.base_url()).unwrap();
    let response = client.create_new(SOL_COIN_TYPE).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.phrase.as_deref(), Some("abandon ability able about"));
    assert_eq!(response.key.public, "A1");
    assert_eq!(response.key.private, "B1");
}

#[tokio::test]
async fn create_new_without_phrase_still_returns_key() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/create-new");
            then.status(200)
                .json_body(json!({"key": {"public": "A2", "private": "B2"}}));
        })
        .await;

    let client = ApiClient::new(&server.base_url()).unwrap();
    let response = client.create_new(SOL_COIN_TYPE).await.unwrap();

    assert!(response.phrase.is_none());
    assert_eq!(response.key.public, "A2");
}

#[tokio::test]
async fn create_new_rejects_empty_key_pair() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/create-new");
            then.status(200)
                .json_body(json!({"key": {"public": "", "private": ""}}));
        })
        .await;

    let client = ApiClient::new(&server.base_url()).unwrap();
    assert!(client.create_new(SOL_COIN_TYPE).await.is_err());
}

#[tokio::test]
async fn create_new_surfaces_service_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/create-new");
            then.status(500);
        })
        .await;

    let client = ApiClient::new(&server.base_url()).unwrap();
    assert!(client.create_new(SOL_COIN_TYPE).await.is_err());
}

#[tokio::test]
async fn fetch_balance_sends_stage_and_address() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/fetch-balance")
                .json_body(json!({"stage": "devnet", "address": "A1"}));
            then.status(200).json_body(json!({"amount": 5}));
        })
        .await;

    let client = ApiClient::new(&server.base_url()).unwrap();
    let amount = client.fetch_balance(Network::Devnet, "A1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(amount, 5.0);
}

#[tokio::test]
async fn fetch_balance_mainnet_stage_name() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/fetch-balance")
                .json_body(json!({"stage": "mainnet", "address": "A1"}));
            then.status(200).json_body(json!({"amount": 0.25}));
        })
        .await;

    let client = ApiClient::new(&server.base_url()).unwrap();
    let amount = client.fetch_balance(Network::Mainnet, "A1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(amount, 0.25);
}

#[tokio::test]
async fn fetch_balance_surfaces_service_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/fetch-balance");
            then.status(502);
        })
        .await;

    let client = ApiClient::new(&server.base_url()).unwrap();
    assert!(client.fetch_balance(Network::Devnet, "A1").await.is_err());
}

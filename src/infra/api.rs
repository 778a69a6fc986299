//! HTTP client for the solvault backend API.
//!
//! The backend owns all key derivation and chain access; this client only
//! shuttles JSON. Two endpoints: `/api/create-new` returns a fresh key pair
//! (plus the recovery phrase when a whole session is being created), and
//! `/api/fetch-balance` returns the balance for a public key on a given
//! network stage.

use std::time::Duration;

use color_eyre::eyre::{eyre, Result};
use serde::{Deserialize, Serialize};

use crate::domain::session::{Network, WalletRecord};

/// Request timeout for both endpoints.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct CreateNewRequest {
    #[serde(rename = "coinType")]
    coin_type: u32,
}

/// Response of `/api/create-new`. `phrase` is only present when the backend
/// created a new session rather than derived another account.
#[derive(Debug, Deserialize)]
pub struct CreateNewResponse {
    #[serde(default)]
    pub phrase: Option<String>,
    pub key: WalletRecord,
}

#[derive(Debug, Serialize)]
struct FetchBalanceRequest<'a> {
    stage: Network,
    address: &'a str,
}

#[derive(Debug, Deserialize)]
struct FetchBalanceResponse {
    amount: f64,
}

/// Thin client over the backend base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the key service for a fresh key pair.
    pub async fn create_new(&self, coin_type: u32) -> Result<CreateNewResponse> {
        let url = format!("{}/api/create-new", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&CreateNewRequest { coin_type })
            .send()
            .await?
            .error_for_status()?
            .json::<CreateNewResponse>()
            .await?;

        if response.key.public.is_empty() || response.key.private.is_empty() {
            return Err(eyre!("key service returned an empty key pair"));
        }

        Ok(response)
    }

    /// Fetch the balance of `address` on `network`.
    pub async fn fetch_balance(&self, network: Network, address: &str) -> Result<f64> {
        let url = format!("{}/api/fetch-balance", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&FetchBalanceRequest {
                stage: network,
                address,
            })
            .send()
            .await?
            .error_for_status()?
            .json::<FetchBalanceResponse>()
            .await?;

        Ok(response.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_new_request_wire_shape() {
        let body = serde_json::to_value(CreateNewRequest { coin_type: 501 }).unwrap();
        assert_eq!(body, serde_json::json!({"coinType": 501}));
    }

    #[test]
    fn fetch_balance_request_wire_shape() {
        let body = serde_json::to_value(FetchBalanceRequest {
            stage: Network::Devnet,
            address: "A1",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"stage": "devnet", "address": "A1"}));
    }

    #[test]
    fn create_new_response_parses_with_and_without_phrase() {
        let with: CreateNewResponse = serde_json::from_str(
            r#"{"phrase": "word1 word2", "key": {"public": "A1", "private": "B1"}}"#,
        )
        .unwrap();
        assert_eq!(with.phrase.as_deref(), Some("word1 word2"));
        assert_eq!(with.key.public, "A1");

        let without: CreateNewResponse =
            serde_json::from_str(r#"{"key": {"public": "A2", "private": "B2"}}"#).unwrap();
        assert!(without.phrase.is_none());
        assert_eq!(without.key.private, "B2");
    }

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:3000");
    }
}

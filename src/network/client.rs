//! HTTP client for the funds API

use reqwest::header::CONTENT_TYPE;
use std::time::Instant;

use crate::config::Config;
use crate::error::FundsError;
use crate::messages::NetworkResponse;
use crate::models::{AccountSnapshot, Credential, DepositOutcome, DepositRequest};

/// Authenticated access to `{base}/funds` and `{base}/funds/deposit`
#[derive(Clone)]
pub struct FundsClient {
    http: reqwest::Client,
    funds_url: String,
    deposit_url: String,
}

impl FundsClient {
    pub fn new(config: &Config) -> Self {
        FundsClient {
            http: create_client(config),
            funds_url: config.funds_url(),
            deposit_url: config.deposit_url(),
        }
    }

    /// Attach bearer auth and the JSON content type
    fn authorize(
        &self,
        builder: reqwest::RequestBuilder,
        credential: &Credential,
    ) -> Result<reqwest::RequestBuilder, FundsError> {
        let token = credential.bearer()?;
        Ok(builder
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json"))
    }

    /// `GET {base}/funds`
    pub async fn fetch_funds(&self, credential: &Credential) -> Result<AccountSnapshot, FundsError> {
        let builder = self.authorize(self.http.get(&self.funds_url), credential)?;
        let body = send(builder).await?;
        serde_json::from_str(&body)
            .map_err(|e| FundsError::TransportError(format!("Invalid response body: {}", e)))
    }

    /// `POST {base}/funds/deposit`
    pub async fn submit_deposit(
        &self,
        credential: &Credential,
        request: &DepositRequest,
    ) -> Result<DepositOutcome, FundsError> {
        let builder = self
            .authorize(self.http.post(&self.deposit_url), credential)?
            .json(request);
        let body = send(builder).await?;
        DepositOutcome::from_json(&body)
            .map_err(|e| FundsError::TransportError(format!("Invalid response body: {}", e)))
    }
}

/// Send a request and return the body of a 2xx response
async fn send(builder: reqwest::RequestBuilder) -> Result<String, FundsError> {
    let resp = builder
        .send()
        .await
        .map_err(|e| FundsError::from_transport(&e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FundsError::RequestFailed { status: status.as_u16() });
    }

    resp.text().await.map_err(|e| FundsError::from_transport(&e))
}

/// Execute a balance fetch and wrap it for the App layer
pub async fn execute_fetch(client: &FundsClient, id: u64, credential: Credential) -> NetworkResponse {
    let start = Instant::now();
    let result = client.fetch_funds(&credential).await;
    NetworkResponse::Funds {
        id,
        result,
        time_ms: start.elapsed().as_millis() as u64,
    }
}

/// Execute a deposit and wrap it for the App layer
pub async fn execute_deposit(
    client: &FundsClient,
    id: u64,
    credential: Credential,
    request: DepositRequest,
) -> NetworkResponse {
    let start = Instant::now();
    let result = client.submit_deposit(&credential, &request).await;
    NetworkResponse::Deposit {
        id,
        request,
        result,
        time_ms: start.elapsed().as_millis() as u64,
    }
}

/// Create an HTTP client with the configured timeout
pub fn create_client(config: &Config) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

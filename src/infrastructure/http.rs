use crate::domain::application::{ApplicationRecord, PaymentRecord};
use crate::domain::money::ChargeAmount;
use crate::domain::payment::ClientSecret;
use crate::domain::ports::CheckoutBackend;
use crate::domain::scholarship::Scholarship;
use crate::error::{CheckoutError, Result};
use crate::infrastructure::mask;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct PaymentIntentRequest {
    amount: ChargeAmount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentIntentResponse {
    client_secret: String,
}

/// The scholarship REST API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    /// Creates a client for the API at `base_url`.
    ///
    /// When `token` is set every request carries it as a bearer token.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn post_json<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<Response> {
        tracing::debug!(
            path,
            data = %mask::secure_value(&serde_json::to_value(body)?),
            "Backend request"
        );
        let res = self.request(Method::POST, path).json(body).send().await?;
        ensure_success(res).await
    }
}

async fn ensure_success(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let message = res.text().await.unwrap_or_default();
    tracing::debug!(%status, %message, "Backend returned an error");
    Err(CheckoutError::Backend {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl CheckoutBackend for HttpBackend {
    async fn scholarship(&self, id: &str) -> Result<Option<Scholarship>> {
        let path = format!("/scholarships/{id}");
        tracing::debug!(%path, "Backend request");
        let res = self.request(Method::GET, &path).send().await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = ensure_success(res).await?.text().await?;
        // Some deployments answer a missing id with `200 null`.
        let scholarship: Option<Scholarship> = serde_json::from_str(&body)?;
        Ok(scholarship)
    }

    async fn create_payment_intent(&self, amount: ChargeAmount) -> Result<ClientSecret> {
        let res = self
            .post_json("/create-payment-intent", &PaymentIntentRequest { amount })
            .await?;
        let body: PaymentIntentResponse = res.json().await?;
        Ok(ClientSecret::new(body.client_secret))
    }

    async fn create_application(&self, record: &ApplicationRecord) -> Result<()> {
        self.post_json("/applications", record).await?;
        Ok(())
    }

    async fn create_payment(&self, record: &PaymentRecord) -> Result<()> {
        self.post_json("/payments", record).await?;
        Ok(())
    }
}

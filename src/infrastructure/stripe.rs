use crate::config::PublishableKey;
use crate::domain::payment::{
    BillingDetails, CardDetails, ClientSecret, PaymentIntent, PaymentMethod,
};
use crate::domain::ports::PaymentProvider;
use crate::error::{CheckoutError, Result};
use crate::infrastructure::mask;
use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
    code: Option<String>,
}

/// Card tokenization and charge confirmation against a Stripe-compatible API,
/// authenticated with the publishable key only.
#[derive(Debug, Clone)]
pub struct StripeProvider {
    client: reqwest::Client,
    base_url: String,
    key: PublishableKey,
}

impl StripeProvider {
    pub fn new(base_url: impl Into<String>, key: PublishableKey) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            key,
        }
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, data = ?mask::secure_form(params), "Payment provider request");
        let res = self
            .client
            .post(&url)
            .bearer_auth(self.key.expose())
            .form(params)
            .send()
            .await?;
        parse(res).await
    }
}

async fn parse<T: DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    let body = res.text().await?;
    if status.is_success() {
        return Ok(serde_json::from_str(&body)?);
    }
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody { error }) => {
            tracing::debug!(%status, code = ?error.code, "Payment provider rejected the request");
            let message = error
                .message
                .unwrap_or_else(|| "Your payment could not be processed".to_string());
            Err(CheckoutError::Provider(message))
        }
        Err(_) => Err(CheckoutError::Backend {
            status: status.as_u16(),
            message: body,
        }),
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    fn is_ready(&self) -> bool {
        !self.key.is_placeholder()
    }

    async fn create_payment_method(
        &self,
        card: &CardDetails,
        billing: &BillingDetails,
    ) -> Result<PaymentMethod> {
        let params = [
            ("type", "card".to_string()),
            ("card[number]", card.number.clone()),
            ("card[exp_month]", card.exp_month.to_string()),
            ("card[exp_year]", card.exp_year.to_string()),
            ("card[cvc]", card.cvc.clone()),
            ("billing_details[name]", billing.name.clone()),
            ("billing_details[email]", billing.email.clone()),
        ];
        self.post_form("/v1/payment_methods", &params).await
    }

    async fn confirm_card_payment(
        &self,
        secret: &ClientSecret,
        method: &PaymentMethod,
    ) -> Result<PaymentIntent> {
        let path = format!("/v1/payment_intents/{}/confirm", secret.intent_id());
        let params = [
            ("client_secret", secret.expose().to_string()),
            ("payment_method", method.id.clone()),
        ];
        self.post_form(&path, &params).await
    }
}

use super::application::{ApplicationRecord, PaymentRecord};
use super::money::ChargeAmount;
use super::payment::{BillingDetails, CardDetails, ClientSecret, PaymentIntent, PaymentMethod};
use super::scholarship::Scholarship;
use super::outcome::{Notice, Route};
use crate::error::Result;
use async_trait::async_trait;

/// The scholarship REST API.
#[async_trait]
pub trait CheckoutBackend: Send + Sync {
    /// `Ok(None)` when no scholarship has this id.
    async fn scholarship(&self, id: &str) -> Result<Option<Scholarship>>;
    async fn create_payment_intent(&self, amount: ChargeAmount) -> Result<ClientSecret>;
    async fn create_application(&self, record: &ApplicationRecord) -> Result<()>;
    async fn create_payment(&self, record: &PaymentRecord) -> Result<()>;
}

/// The hosted card-payment provider.
///
/// Errors the provider reports about the card or the charge come back as
/// `CheckoutError::Provider`; anything else is a transport or decoding failure.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    fn is_ready(&self) -> bool;
    async fn create_payment_method(
        &self,
        card: &CardDetails,
        billing: &BillingDetails,
    ) -> Result<PaymentMethod>;
    async fn confirm_card_payment(
        &self,
        secret: &ClientSecret,
        method: &PaymentMethod,
    ) -> Result<PaymentIntent>;
}

/// Client-side routing.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Toast notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub type CheckoutBackendBox = Box<dyn CheckoutBackend>;
pub type PaymentProviderBox = Box<dyn PaymentProvider>;
pub type NavigatorBox = Box<dyn Navigator>;
pub type NotifierBox = Box<dyn Notifier>;

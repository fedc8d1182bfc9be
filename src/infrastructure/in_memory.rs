use crate::domain::application::{ApplicationRecord, PaymentRecord};
use crate::domain::money::ChargeAmount;
use crate::domain::outcome::{Notice, Route};
use crate::domain::payment::{
    BillingDetails, CardDetails, ClientSecret, IntentStatus, PaymentIntent, PaymentMethod,
};
use crate::domain::ports::{CheckoutBackend, Navigator, Notifier, PaymentProvider};
use crate::domain::scholarship::Scholarship;
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::RwLock;

fn unavailable(what: &str) -> CheckoutError {
    CheckoutError::Backend {
        status: 503,
        message: format!("{what} unavailable"),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct BackendState {
    scholarships: HashMap<String, Scholarship>,
    applications: Vec<ApplicationRecord>,
    payments: Vec<PaymentRecord>,
    intent_requests: Vec<Decimal>,
    fail_reads: bool,
    fail_payment_intents: bool,
    fail_writes: bool,
    fail_payments: bool,
}

/// An in-memory stand-in for the scholarship REST API.
///
/// Clones share the same state, so a test can keep one handle while the page owns another.
#[derive(Default, Clone)]
pub struct InMemoryBackend {
    state: Arc<RwLock<BackendState>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a scholarship. Only meant for setup before the backend is shared.
    pub fn with_scholarship(self, scholarship: Scholarship) -> Self {
        if let Ok(mut state) = self.state.try_write() {
            state
                .scholarships
                .insert(scholarship.id.clone(), scholarship);
        }
        self
    }

    pub async fn fail_reads(&self, fail: bool) {
        self.state.write().await.fail_reads = fail;
    }

    pub async fn fail_payment_intents(&self, fail: bool) {
        self.state.write().await.fail_payment_intents = fail;
    }

    pub async fn fail_writes(&self, fail: bool) {
        self.state.write().await.fail_writes = fail;
    }

    /// Fails only `create_payment`, leaving application writes working.
    pub async fn fail_payments(&self, fail: bool) {
        self.state.write().await.fail_payments = fail;
    }

    pub async fn applications(&self) -> Vec<ApplicationRecord> {
        self.state.read().await.applications.clone()
    }

    pub async fn payments(&self) -> Vec<PaymentRecord> {
        self.state.read().await.payments.clone()
    }

    /// Amounts of every payment intent requested so far, in order.
    pub async fn intent_requests(&self) -> Vec<Decimal> {
        self.state.read().await.intent_requests.clone()
    }
}

#[async_trait]
impl CheckoutBackend for InMemoryBackend {
    async fn scholarship(&self, id: &str) -> Result<Option<Scholarship>> {
        let state = self.state.read().await;
        if state.fail_reads {
            return Err(unavailable("scholarships"));
        }
        Ok(state.scholarships.get(id).cloned())
    }

    async fn create_payment_intent(&self, amount: ChargeAmount) -> Result<ClientSecret> {
        let mut state = self.state.write().await;
        if state.fail_payment_intents {
            return Err(unavailable("payment intents"));
        }
        state.intent_requests.push(amount.value());
        let n = state.intent_requests.len();
        Ok(ClientSecret::new(format!("pi_test{n}_secret_{n}")))
    }

    async fn create_application(&self, record: &ApplicationRecord) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_writes {
            return Err(unavailable("applications"));
        }
        state.applications.push(record.clone());
        Ok(())
    }

    async fn create_payment(&self, record: &PaymentRecord) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_writes || state.fail_payments {
            return Err(unavailable("payments"));
        }
        state.payments.push(record.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeResponse {
    Accept,
    Reject(String),
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmResponse {
    /// Succeeds with the given transaction id.
    Succeed(String),
    /// Returns an intent in a non-final status.
    Status(IntentStatus),
    Decline(String),
    Unreachable,
}

struct ProviderState {
    ready: bool,
    tokenize: VecDeque<TokenizeResponse>,
    confirm: VecDeque<ConfirmResponse>,
    tokenize_calls: Vec<BillingDetails>,
    confirm_calls: Vec<String>,
}

/// A payment provider that answers from queued responses.
///
/// With an empty queue every card is accepted and every confirmation succeeds, using the
/// intent id embedded in the client secret as transaction id.
#[derive(Clone)]
pub struct ScriptedPaymentProvider {
    state: Arc<Mutex<ProviderState>>,
}

impl Default for ScriptedPaymentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedPaymentProvider {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ProviderState {
                ready: true,
                tokenize: VecDeque::new(),
                confirm: VecDeque::new(),
                tokenize_calls: Vec::new(),
                confirm_calls: Vec::new(),
            })),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        lock(&self.state).ready = ready;
    }

    pub fn push_tokenize(&self, response: TokenizeResponse) {
        lock(&self.state).tokenize.push_back(response);
    }

    pub fn push_confirm(&self, response: ConfirmResponse) {
        lock(&self.state).confirm.push_back(response);
    }

    /// Billing identity sent with every tokenization.
    pub fn tokenize_calls(&self) -> Vec<BillingDetails> {
        lock(&self.state).tokenize_calls.clone()
    }

    /// Client secrets used for every confirmation.
    pub fn confirm_calls(&self) -> Vec<String> {
        lock(&self.state).confirm_calls.clone()
    }
}

#[async_trait]
impl PaymentProvider for ScriptedPaymentProvider {
    fn is_ready(&self) -> bool {
        lock(&self.state).ready
    }

    async fn create_payment_method(
        &self,
        _card: &CardDetails,
        billing: &BillingDetails,
    ) -> Result<PaymentMethod> {
        let mut state = lock(&self.state);
        state.tokenize_calls.push(billing.clone());
        let n = state.tokenize_calls.len();
        match state.tokenize.pop_front().unwrap_or(TokenizeResponse::Accept) {
            TokenizeResponse::Accept => Ok(PaymentMethod {
                id: format!("pm_test{n}"),
            }),
            TokenizeResponse::Reject(message) => Err(CheckoutError::Provider(message)),
            TokenizeResponse::Unreachable => Err(unavailable("payment provider")),
        }
    }

    async fn confirm_card_payment(
        &self,
        secret: &ClientSecret,
        _method: &PaymentMethod,
    ) -> Result<PaymentIntent> {
        let mut state = lock(&self.state);
        state.confirm_calls.push(secret.expose().to_string());
        let response = state
            .confirm
            .pop_front()
            .unwrap_or_else(|| ConfirmResponse::Succeed(secret.intent_id().to_string()));
        match response {
            ConfirmResponse::Succeed(id) => Ok(PaymentIntent {
                id,
                status: IntentStatus::Succeeded,
            }),
            ConfirmResponse::Status(status) => Ok(PaymentIntent {
                id: secret.intent_id().to_string(),
                status,
            }),
            ConfirmResponse::Decline(message) => Err(CheckoutError::Provider(message)),
            ConfirmResponse::Unreachable => Err(unavailable("payment provider")),
        }
    }
}

/// Records every navigation instead of performing it.
#[derive(Default, Clone)]
pub struct RecordingNavigator {
    routes: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        lock(&self.routes).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        lock(&self.routes).push(route);
    }
}

/// Records every toast instead of showing it.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        lock(&self.notices).push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_in_memory_backend_issues_distinct_secrets() {
        let backend = InMemoryBackend::new();
        let amount = ChargeAmount::new(Money::new(dec!(10))).unwrap();

        let first = backend.create_payment_intent(amount).await.unwrap();
        let second = backend.create_payment_intent(amount).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(backend.intent_requests().await, vec![dec!(10), dec!(10)]);
    }

    #[tokio::test]
    async fn test_scripted_provider_defaults_to_success() {
        let provider = ScriptedPaymentProvider::new();
        let card = CardDetails {
            number: "4242424242424242".to_string(),
            exp_month: 1,
            exp_year: 2031,
            cvc: "000".to_string(),
        };
        let billing = BillingDetails {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };

        let method = provider.create_payment_method(&card, &billing).await.unwrap();
        let intent = provider
            .confirm_card_payment(&ClientSecret::new("pi_9_secret_x"), &method)
            .await
            .unwrap();
        assert_eq!(intent.id, "pi_9");
        assert!(intent.succeeded());
    }

    #[tokio::test]
    async fn test_scripted_provider_replays_queue_in_order() {
        let provider = ScriptedPaymentProvider::new();
        provider.push_confirm(ConfirmResponse::Decline("declined".to_string()));
        let method = PaymentMethod {
            id: "pm_1".to_string(),
        };
        let secret = ClientSecret::new("pi_1_secret_1");

        let first = provider.confirm_card_payment(&secret, &method).await;
        assert_eq!(first.unwrap_err().provider_message(), Some("declined"));
        assert!(provider.confirm_card_payment(&secret, &method).await.is_ok());
        assert_eq!(provider.confirm_calls().len(), 2);
    }
}

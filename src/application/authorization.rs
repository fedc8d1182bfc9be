use crate::domain::money::{ChargeAmount, Money};
use crate::domain::outcome::Notice;
use crate::domain::payment::ClientSecret;
use crate::domain::ports::{CheckoutBackend, Notifier};

/// What happened when the checkout total was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationEvent {
    /// A handle was already requested for this total.
    Unchanged,
    /// The total is zero, so there is nothing to authorize.
    NotChargeable,
    Acquired,
    Failed,
}

/// Holds the payment authorization handle for the current total.
///
/// A handle is requested once per distinct total. Once a confirmation attempt has used the
/// handle it is discarded, and `reacquire` fetches a fresh one for the same total.
#[derive(Debug, Default)]
pub struct PaymentAuthorization {
    requested_for: Option<Money>,
    secret: Option<ClientSecret>,
}

impl PaymentAuthorization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn secret(&self) -> Option<&ClientSecret> {
        self.secret.as_ref()
    }

    /// Removes the handle ahead of a confirmation attempt.
    pub fn take(&mut self) -> Option<ClientSecret> {
        self.secret.take()
    }

    pub async fn on_total_changed(
        &mut self,
        total: Money,
        backend: &dyn CheckoutBackend,
        notifier: &dyn Notifier,
    ) -> AuthorizationEvent {
        if self.requested_for == Some(total) {
            return AuthorizationEvent::Unchanged;
        }
        self.requested_for = Some(total);
        self.secret = None;

        let Ok(amount) = ChargeAmount::new(total) else {
            tracing::info!(%total, "Nothing to charge, skipping payment intent");
            return AuthorizationEvent::NotChargeable;
        };

        match backend.create_payment_intent(amount).await {
            Ok(secret) => {
                tracing::info!(
                    %total,
                    intent = secret.intent_id(),
                    "Acquired payment authorization"
                );
                self.secret = Some(secret);
                AuthorizationEvent::Acquired
            }
            Err(e) => {
                tracing::error!(%total, "Failed to create payment intent: {e}");
                notifier.notify(Notice::error(
                    "Failed to initialize payment. Please try again later.",
                ));
                AuthorizationEvent::Failed
            }
        }
    }

    /// Requests a fresh handle for the last reported total.
    pub async fn reacquire(
        &mut self,
        backend: &dyn CheckoutBackend,
        notifier: &dyn Notifier,
    ) -> AuthorizationEvent {
        match self.requested_for.take() {
            Some(total) => self.on_total_changed(total, backend, notifier).await,
            None => AuthorizationEvent::NotChargeable,
        }
    }
}

use super::authorization::{AuthorizationEvent, PaymentAuthorization};
use super::summary::{self, SummaryView};
use crate::domain::applicant::Applicant;
use crate::domain::application::{
    ApplicationForm, ApplicationRecord, FormErrors, PaymentRecord, PaymentStatus,
};
use crate::domain::money::Money;
use crate::domain::outcome::{Notice, Route};
use crate::domain::payment::{BillingDetails, CardDetails, PaymentIntent};
use crate::domain::ports::{CheckoutBackendBox, NavigatorBox, NotifierBox, PaymentProviderBox};
use crate::domain::scholarship::OrderSummary;
use crate::error::{CheckoutError, Result};
use chrono::Utc;
use tracing::instrument;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";
pub const PAYMENT_SUCCESS: &str = "Payment successful! Your application has been submitted.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    ChargeFailed,
    ChargeSucceeded,
}

/// Why the submit control is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    ScholarshipNotLoaded,
    ProviderNotReady,
    NoAuthorization,
    Processing,
    /// A charge already went through during this page visit.
    AlreadyCharged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Blocked(SubmitBlocked),
    Invalid(FormErrors),
    /// The provider refused to tokenize the card. Nothing was recorded.
    CardRejected { message: String },
    /// The charge failed; the application was recorded as unpaid.
    Unpaid { message: String },
    Paid { transaction_id: String, amount: Money },
    /// An unexpected error interrupted the workflow.
    Failed { error: String },
}

/// The checkout page: order summary plus the application and payment form.
///
/// Owns its ports and its state. Mutating operations take `&mut self`, so only one
/// submission can be in flight at a time.
pub struct CheckoutPage {
    applicant: Applicant,
    backend: CheckoutBackendBox,
    provider: PaymentProviderBox,
    navigator: NavigatorBox,
    notifier: NotifierBox,
    summary: SummaryView,
    authorization: PaymentAuthorization,
    state: SubmissionState,
    processing: bool,
    charged: bool,
}

impl CheckoutPage {
    /// Creates a checkout page for the signed-in applicant.
    ///
    /// # Arguments
    ///
    /// * `applicant` - Identity from the session provider, used as billing identity.
    /// * `backend` - The scholarship REST API.
    /// * `provider` - The hosted card-payment provider.
    /// * `navigator` - Receives the outcome route.
    /// * `notifier` - Receives toast notifications.
    pub fn new(
        applicant: Applicant,
        backend: CheckoutBackendBox,
        provider: PaymentProviderBox,
        navigator: NavigatorBox,
        notifier: NotifierBox,
    ) -> Self {
        Self {
            applicant,
            backend,
            provider,
            navigator,
            notifier,
            summary: SummaryView::Loading,
            authorization: PaymentAuthorization::new(),
            state: SubmissionState::Idle,
            processing: false,
            charged: false,
        }
    }

    pub fn summary(&self) -> &SummaryView {
        &self.summary
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Loads the scholarship and, once its total is known, requests a payment authorization.
    pub async fn load(&mut self, scholarship_id: &str) -> &SummaryView {
        self.summary = SummaryView::Loading;
        self.summary = summary::load_summary(self.backend.as_ref(), scholarship_id).await;
        if let Some(total) = self.summary.loaded().map(|s| s.total) {
            self.on_total_changed(total).await;
        }
        &self.summary
    }

    /// Reports the current total. A new authorization is requested only when it differs
    /// from the last reported total.
    pub async fn on_total_changed(&mut self, total: Money) -> AuthorizationEvent {
        self.authorization
            .on_total_changed(total, self.backend.as_ref(), self.notifier.as_ref())
            .await
    }

    pub fn submit_blocker(&self) -> Option<SubmitBlocked> {
        if self.processing {
            Some(SubmitBlocked::Processing)
        } else if self.charged {
            Some(SubmitBlocked::AlreadyCharged)
        } else if self.summary.loaded().is_none() {
            Some(SubmitBlocked::ScholarshipNotLoaded)
        } else if !self.provider.is_ready() {
            Some(SubmitBlocked::ProviderNotReady)
        } else if self.authorization.secret().is_none() {
            Some(SubmitBlocked::NoAuthorization)
        } else {
            None
        }
    }

    pub fn can_submit(&self) -> bool {
        self.submit_blocker().is_none()
    }

    /// Runs the checkout: tokenize the card, confirm the charge, record the application
    /// (and the payment when it went through), then navigate to the outcome page.
    #[instrument(skip_all, fields(applicant = %self.applicant.id))]
    pub async fn submit(
        &mut self,
        form: &ApplicationForm,
        card: &CardDetails,
    ) -> SubmissionOutcome {
        if let Some(blocked) = self.submit_blocker() {
            tracing::debug!(?blocked, "Submit is disabled");
            return SubmissionOutcome::Blocked(blocked);
        }
        if let Err(errors) = form.validate() {
            tracing::debug!(%errors, "Application form is incomplete");
            return SubmissionOutcome::Invalid(errors);
        }
        let Some(summary) = self.summary.loaded().cloned() else {
            return SubmissionOutcome::Blocked(SubmitBlocked::ScholarshipNotLoaded);
        };

        self.processing = true;
        self.set_state(SubmissionState::Submitting);

        let outcome = match self.run(&summary, form, card).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Checkout failed unexpectedly: {e}");
                self.notifier.notify(Notice::error(GENERIC_FAILURE));
                SubmissionOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        self.processing = false;
        self.set_state(SubmissionState::Idle);

        // A used handle cannot confirm another charge.
        if self.authorization.secret().is_none() && !self.charged {
            self.authorization
                .reacquire(self.backend.as_ref(), self.notifier.as_ref())
                .await;
        }

        outcome
    }

    async fn run(
        &mut self,
        summary: &OrderSummary,
        form: &ApplicationForm,
        card: &CardDetails,
    ) -> Result<SubmissionOutcome> {
        let billing = BillingDetails {
            name: self.applicant.name.clone(),
            email: self.applicant.email.clone(),
        };

        let method = match self.provider.create_payment_method(card, &billing).await {
            Ok(method) => method,
            Err(CheckoutError::Provider(message)) => {
                tracing::warn!(%message, "Card was not accepted");
                self.notifier.notify(Notice::error(message.clone()));
                return Ok(SubmissionOutcome::CardRejected { message });
            }
            Err(e) => return Err(e),
        };

        let secret = self.authorization.take().ok_or_else(|| {
            CheckoutError::ValidationError("No payment authorization available".to_string())
        })?;

        match self.provider.confirm_card_payment(&secret, &method).await {
            Ok(intent) if intent.succeeded() => self.record_paid(summary, form, intent).await,
            Ok(intent) => {
                let message = format!("Payment not completed (status: {})", intent.status);
                self.record_unpaid(summary, form, message).await
            }
            Err(CheckoutError::Provider(message)) => {
                self.record_unpaid(summary, form, message).await
            }
            Err(e) => Err(e),
        }
    }

    async fn record_paid(
        &mut self,
        summary: &OrderSummary,
        form: &ApplicationForm,
        intent: PaymentIntent,
    ) -> Result<SubmissionOutcome> {
        self.charged = true;
        self.set_state(SubmissionState::ChargeSucceeded);
        let scholarship = &summary.scholarship;
        let now = Utc::now();

        let application =
            ApplicationRecord::new(scholarship, &self.applicant, form, PaymentStatus::Paid, now);
        self.backend.create_application(&application).await?;

        let payment = PaymentRecord {
            email: self.applicant.email.clone(),
            transaction_id: intent.id.clone(),
            amount: summary.total,
            scholarship_id: scholarship.id.clone(),
            scholarship_name: scholarship.scholarship_name.clone(),
            date: now,
        };
        self.backend.create_payment(&payment).await?;

        tracing::info!(transaction_id = %intent.id, amount = %summary.total, "Payment succeeded");
        self.notifier.notify(Notice::success(PAYMENT_SUCCESS));
        self.navigator.navigate(Route::PaymentSuccess {
            scholarship_name: scholarship.scholarship_name.clone(),
            university_name: scholarship.university_name.clone(),
            amount: summary.total,
            transaction_id: intent.id.clone(),
        });

        Ok(SubmissionOutcome::Paid {
            transaction_id: intent.id,
            amount: summary.total,
        })
    }

    // Recorded even though the charge failed.
    async fn record_unpaid(
        &mut self,
        summary: &OrderSummary,
        form: &ApplicationForm,
        message: String,
    ) -> Result<SubmissionOutcome> {
        self.set_state(SubmissionState::ChargeFailed);
        tracing::warn!(%message, "Payment confirmation failed");
        let scholarship = &summary.scholarship;

        let application = ApplicationRecord::new(
            scholarship,
            &self.applicant,
            form,
            PaymentStatus::Unpaid,
            Utc::now(),
        );
        self.backend.create_application(&application).await?;

        self.navigator.navigate(Route::PaymentFailed {
            scholarship_name: scholarship.scholarship_name.clone(),
            error: message.clone(),
        });

        Ok(SubmissionOutcome::Unpaid { message })
    }

    fn set_state(&mut self, state: SubmissionState) {
        tracing::debug!(from = ?self.state, to = ?state, "Checkout state change");
        self.state = state;
    }
}

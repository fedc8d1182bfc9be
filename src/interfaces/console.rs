use crate::application::checkout::{SubmissionOutcome, SubmitBlocked};
use crate::application::summary::SummaryView;
use crate::domain::outcome::{Notice, NoticeLevel, Route};
use crate::domain::ports::{Navigator, Notifier};
use std::fmt::Write;

/// Renders the order summary panel as text.
pub fn render_summary(view: &SummaryView) -> String {
    match view {
        SummaryView::Loading => "Loading scholarship...".to_string(),
        SummaryView::Failed(reason) => format!("Error: {reason}"),
        SummaryView::Loaded(summary) => {
            let s = &summary.scholarship;
            let mut out = String::new();
            let _ = writeln!(out, "Order Summary");
            let _ = writeln!(
                out,
                "  University:       {} ({})",
                s.university_name, s.university_country
            );
            let _ = writeln!(
                out,
                "  Scholarship:      {} [{}]",
                s.scholarship_name, s.scholarship_category
            );
            let _ = writeln!(out, "  Subject:          {}", s.subject_category);
            let _ = writeln!(out, "  Degree:           {}", s.degree);
            let _ = writeln!(out, "  Application fees: {}", s.application_fees);
            let _ = writeln!(out, "  Service charge:   {}", s.service_charge);
            let _ = write!(out, "  Total:            {}", summary.total);
            out
        }
    }
}

pub fn render_route(route: &Route) -> String {
    match route {
        Route::PaymentFailed {
            scholarship_name,
            error,
        } => format!(
            "[{}] Payment failed for {scholarship_name}: {error}\n\
             Your application was saved as unpaid.",
            route.path()
        ),
        Route::PaymentSuccess {
            scholarship_name,
            university_name,
            amount,
            transaction_id,
        } => format!(
            "[{}] Payment successful\n  \
             Scholarship: {scholarship_name}\n  \
             University:  {university_name}\n  \
             Amount:      {amount}\n  \
             Transaction: {transaction_id}",
            route.path()
        ),
    }
}

pub fn describe_blocker(blocked: SubmitBlocked) -> &'static str {
    match blocked {
        SubmitBlocked::ScholarshipNotLoaded => "the scholarship is not loaded",
        SubmitBlocked::ProviderNotReady => "the payment form is not ready",
        SubmitBlocked::NoAuthorization => "no payment authorization is available",
        SubmitBlocked::Processing => "a payment is already being processed",
        SubmitBlocked::AlreadyCharged => "this application has already been paid for",
    }
}

pub fn describe_outcome(outcome: &SubmissionOutcome) -> String {
    match outcome {
        SubmissionOutcome::Blocked(blocked) => {
            format!("Cannot submit: {}", describe_blocker(*blocked))
        }
        SubmissionOutcome::Invalid(errors) => {
            let mut out = "Please fix the form:".to_string();
            for (_, message) in errors.iter() {
                let _ = write!(out, "\n  - {message}");
            }
            out
        }
        SubmissionOutcome::CardRejected { message } => format!("Card rejected: {message}"),
        SubmissionOutcome::Unpaid { message } => format!("Payment failed: {message}"),
        SubmissionOutcome::Paid {
            transaction_id,
            amount,
        } => format!("Paid {amount} ({transaction_id})"),
        SubmissionOutcome::Failed { error } => format!("Checkout failed: {error}"),
    }
}

/// Prints the outcome page to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(path = route.path(), "Navigating");
        println!("{}", render_route(&route));
    }
}

/// Prints toasts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let level = match notice.level {
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{level}] {notice}");
    }
}

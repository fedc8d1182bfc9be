use crate::domain::ports::CheckoutBackend;
use crate::domain::scholarship::OrderSummary;

/// State of the order summary panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SummaryView {
    #[default]
    Loading,
    /// The scholarship could not be loaded; nothing else on the page is usable.
    Failed(String),
    Loaded(OrderSummary),
}

impl SummaryView {
    pub fn loaded(&self) -> Option<&OrderSummary> {
        match self {
            Self::Loaded(summary) => Some(summary),
            _ => None,
        }
    }
}

/// Fetches a scholarship and turns the result into a summary view.
///
/// Failures are terminal for the page visit. There is no retry.
pub async fn load_summary(backend: &dyn CheckoutBackend, scholarship_id: &str) -> SummaryView {
    match backend.scholarship(scholarship_id).await {
        Ok(Some(scholarship))
            if scholarship.application_fees.is_negative()
                || scholarship.service_charge.is_negative() =>
        {
            tracing::error!(scholarship_id, "Scholarship has a negative fee");
            SummaryView::Failed("Scholarship has an invalid fee".to_string())
        }
        Ok(Some(scholarship)) => {
            let summary = OrderSummary::from(scholarship);
            tracing::info!(scholarship_id, total = %summary.total, "Loaded scholarship");
            SummaryView::Loaded(summary)
        }
        Ok(None) => {
            tracing::warn!(scholarship_id, "Scholarship not found");
            SummaryView::Failed("Scholarship not found".to_string())
        }
        Err(e) => {
            tracing::error!(scholarship_id, "Failed to load scholarship: {e}");
            SummaryView::Failed(format!("Could not load scholarship: {e}"))
        }
    }
}

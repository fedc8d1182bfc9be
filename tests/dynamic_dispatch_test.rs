use rust_decimal_macros::dec;
use scholarship_checkout::application::checkout::{CheckoutPage, SubmissionOutcome};
use scholarship_checkout::domain::applicant::Applicant;
use scholarship_checkout::domain::application::ApplicationForm;
use scholarship_checkout::domain::money::Money;
use scholarship_checkout::domain::payment::CardDetails;
use scholarship_checkout::domain::ports::{
    CheckoutBackendBox, NavigatorBox, NotifierBox, PaymentProviderBox,
};
use scholarship_checkout::domain::scholarship::Scholarship;
use scholarship_checkout::infrastructure::in_memory::{
    InMemoryBackend, RecordingNavigator, RecordingNotifier, ScriptedPaymentProvider,
};

#[tokio::test]
async fn test_checkout_page_runs_in_spawned_task() {
    let backend = InMemoryBackend::new().with_scholarship(Scholarship {
        id: "s9".to_string(),
        university_name: "Sorbonne".to_string(),
        university_country: "France".to_string(),
        university_image: String::new(),
        scholarship_name: "Eiffel Excellence".to_string(),
        scholarship_category: "Self fund".to_string(),
        subject_category: "Arts".to_string(),
        degree: "Masters".to_string(),
        application_fees: Money::new(dec!(45.50)),
        service_charge: Money::new(dec!(4.50)),
    });

    let backend_box: CheckoutBackendBox = Box::new(backend.clone());
    let provider_box: PaymentProviderBox = Box::new(ScriptedPaymentProvider::new());
    let navigator_box: NavigatorBox = Box::new(RecordingNavigator::new());
    let notifier_box: NotifierBox = Box::new(RecordingNotifier::new());

    let mut page = CheckoutPage::new(
        Applicant::new("Marie Curie", "marie@example.com", "u3"),
        backend_box,
        provider_box,
        navigator_box,
        notifier_box,
    );

    // Verify the page and its boxed ports are Send by moving them into a task
    let handle = tokio::spawn(async move {
        page.load("s9").await;
        let form = ApplicationForm {
            phone: "+33 1 40 46 22 11".to_string(),
            address: "1 Rue Victor Cousin, Paris".to_string(),
            ssc_result: "18/20".to_string(),
            hsc_result: "17/20".to_string(),
            study_gap: None,
        };
        let card = CardDetails {
            number: "4242424242424242".to_string(),
            exp_month: 9,
            exp_year: 2029,
            cvc: "321".to_string(),
        };
        page.submit(&form, &card).await
    });

    let outcome = handle.await.unwrap();
    assert!(matches!(
        outcome,
        SubmissionOutcome::Paid { amount, .. } if amount == Money::new(dec!(50))
    ));
    assert_eq!(backend.payments().await.len(), 1);
}

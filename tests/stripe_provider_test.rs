mod common;

use scholarship_checkout::config::PublishableKey;
use scholarship_checkout::domain::payment::{
    BillingDetails, CardDetails, ClientSecret, PaymentMethod,
};
use scholarship_checkout::domain::ports::PaymentProvider;
use scholarship_checkout::infrastructure::stripe::StripeProvider;

fn card(number: &str) -> CardDetails {
    CardDetails {
        number: number.to_string(),
        exp_month: 4,
        exp_year: 2032,
        cvc: "424".to_string(),
    }
}

fn billing() -> BillingDetails {
    BillingDetails {
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
    }
}

#[test]
fn test_placeholder_key_is_not_ready() {
    let provider = StripeProvider::new("http://127.0.0.1:9", PublishableKey::placeholder());
    assert!(!provider.is_ready());

    let provider = StripeProvider::new("http://127.0.0.1:9", PublishableKey::new("pk_test_51X"));
    assert!(provider.is_ready());
}

#[tokio::test]
async fn test_tokenize_sends_card_and_billing_identity() {
    let shared = common::Shared::default();
    let url = common::provider(shared.clone()).await;
    let provider = StripeProvider::new(url, PublishableKey::new("pk_test_51X"));

    let method = provider
        .create_payment_method(&card(common::GOOD_CARD), &billing())
        .await
        .unwrap();
    assert_eq!(method.id, "pm_4242");

    let received = shared.lock().unwrap();
    let params = &received.payment_methods[0];
    assert_eq!(params["type"], "card");
    assert_eq!(params["card[exp_month]"], "4");
    assert_eq!(params["billing_details[name]"], "Grace Hopper");
    assert_eq!(params["billing_details[email]"], "grace@example.com");
}

#[tokio::test]
async fn test_incomplete_card_is_a_provider_error() {
    let url = common::provider(common::Shared::default()).await;
    let provider = StripeProvider::new(url, PublishableKey::new("pk_test_51X"));

    let err = provider
        .create_payment_method(&card("4242"), &billing())
        .await
        .unwrap_err();
    assert_eq!(err.provider_message(), Some("Your card number is incomplete."));
}

#[tokio::test]
async fn test_confirm_uses_intent_from_client_secret() {
    let shared = common::Shared::default();
    let url = common::provider(shared.clone()).await;
    let provider = StripeProvider::new(url, PublishableKey::new("pk_test_51X"));

    let secret = ClientSecret::new("pi_123_secret_xyz");
    let method = PaymentMethod {
        id: "pm_4242".to_string(),
    };
    let intent = provider.confirm_card_payment(&secret, &method).await.unwrap();

    assert_eq!(intent.id, "pi_123");
    assert!(intent.succeeded());
    let received = shared.lock().unwrap();
    let (intent_id, params) = &received.confirmations[0];
    assert_eq!(intent_id, "pi_123");
    assert_eq!(params["client_secret"], "pi_123_secret_xyz");
    assert_eq!(params["payment_method"], "pm_4242");
}

#[tokio::test]
async fn test_declined_confirmation_is_a_provider_error() {
    let url = common::provider(common::Shared::default()).await;
    let provider = StripeProvider::new(url, PublishableKey::new("pk_test_51X"));

    let method = PaymentMethod {
        id: "pm_0002".to_string(),
    };
    let err = provider
        .confirm_card_payment(&ClientSecret::new("pi_9_secret_1"), &method)
        .await
        .unwrap_err();
    assert_eq!(err.provider_message(), Some("Your card was declined."));
}

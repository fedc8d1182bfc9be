#![allow(dead_code)]

use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const DECLINED_CARD: &str = "4000000000000002";
pub const GOOD_CARD: &str = "4242424242424242";

/// Everything the mock servers received.
#[derive(Default)]
pub struct Received {
    pub scholarships: HashMap<String, Value>,
    pub intents: Vec<Value>,
    pub applications: Vec<Value>,
    pub payments: Vec<Value>,
    pub authorization: Vec<Option<String>>,
    pub payment_methods: Vec<HashMap<String, String>>,
    pub confirmations: Vec<(String, HashMap<String, String>)>,
}

pub type Shared = Arc<Mutex<Received>>;

pub fn scholarship_json(id: &str, fees: f64, charge: f64) -> Value {
    json!({
        "_id": id,
        "universityName": "University of Melbourne",
        "universityCountry": "Australia",
        "universityImage": "https://img.example/melbourne.png",
        "scholarshipName": "Graduate Research",
        "scholarshipCategory": "Full fund",
        "subjectCategory": "Engineering",
        "degree": "Masters",
        "applicationFees": fees,
        "serviceCharge": charge,
        "postedAt": "2024-05-01T00:00:00Z"
    })
}

pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn record_auth(shared: &Shared, headers: &HeaderMap) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    shared.lock().unwrap().authorization.push(auth);
}

async fn scholarship(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    record_auth(&shared, &headers);
    let found = shared.lock().unwrap().scholarships.get(&id).cloned();
    found.map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_payment_intent(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record_auth(&shared, &headers);
    let mut received = shared.lock().unwrap();
    if body["amount"].as_f64().unwrap_or(0.0) <= 0.0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "amount must be positive" })),
        );
    }
    received.intents.push(body);
    let n = received.intents.len();
    (
        StatusCode::OK,
        Json(json!({ "clientSecret": format!("pi_mock{n}_secret_abc{n}") })),
    )
}

async fn applications(State(shared): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    shared.lock().unwrap().applications.push(body);
    Json(json!({ "acknowledged": true, "insertedId": "a1" }))
}

async fn payments(State(shared): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    shared.lock().unwrap().payments.push(body);
    Json(json!({ "acknowledged": true, "insertedId": "p1" }))
}

/// Serves the scholarship REST API.
pub async fn backend(shared: Shared) -> String {
    let router = Router::new()
        .route("/scholarships/{id}", get(scholarship))
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/applications", post(applications))
        .route("/payments", post(payments))
        .with_state(shared);
    serve(router).await
}

fn provider_error(message: &str, code: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::PAYMENT_REQUIRED,
        Json(json!({ "error": { "type": "card_error", "code": code, "message": message } })),
    )
}

async fn payment_methods(
    State(shared): State<Shared>,
    Form(params): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let number = params.get("card[number]").cloned().unwrap_or_default();
    shared.lock().unwrap().payment_methods.push(params);
    if number.len() < 16 {
        return provider_error("Your card number is incomplete.", "incomplete_number");
    }
    let last4 = &number[number.len() - 4..];
    (
        StatusCode::OK,
        Json(json!({ "id": format!("pm_{last4}"), "object": "payment_method" })),
    )
}

async fn confirm(
    State(shared): State<Shared>,
    Path(intent): Path<String>,
    Form(params): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let method = params.get("payment_method").cloned().unwrap_or_default();
    shared
        .lock()
        .unwrap()
        .confirmations
        .push((intent.clone(), params));
    if method == "pm_0002" {
        return provider_error("Your card was declined.", "card_declined");
    }
    (
        StatusCode::OK,
        Json(json!({ "id": intent, "object": "payment_intent", "status": "succeeded" })),
    )
}

/// Serves the card tokenization and confirmation endpoints of the payment provider.
pub async fn provider(shared: Shared) -> String {
    let router = Router::new()
        .route("/v1/payment_methods", post(payment_methods))
        .route("/v1/payment_intents/{intent}/confirm", post(confirm))
        .with_state(shared);
    serve(router).await
}

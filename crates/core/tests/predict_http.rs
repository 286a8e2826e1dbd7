//! End-to-end tests for `HttpPredictionClient` against an in-process stub
//! of the prediction service.

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use churn_core::client::error::ServiceError;
use churn_core::client::http::HttpPredictionClient;
use churn_core::client::PredictionBackend;
use churn_core::config::Settings;
use churn_core::domain::assessment::RiskLevel;
use churn_core::domain::prediction::PredictionRequest;

fn sample_request() -> PredictionRequest {
    PredictionRequest {
        is_standard: 0,
        is_premium: 1,
        is_metal: 0,
        user_settings_crypto_unlocked: 1,
        is_apple: 0,
        is_gb: 1,
        is_pl: 0,
        is_fr: 0,
        age: 34,
        total_transactions: 120,
        avg_transaction_amount: 42.5,
        first_month_transactions: 9,
        first_month_active_days: 14,
        days_to_first_transaction: 3,
        notification_success_rate: 0.85,
        total_notifications: 200,
    }
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: &str) -> HttpPredictionClient {
    let settings = Settings {
        predict_base_url: Some(base_url.to_string()),
        ..Default::default()
    };
    HttpPredictionClient::from_settings(&settings).unwrap()
}

#[tokio::test]
async fn successful_prediction_renders_high_risk() {
    let router = Router::new().route(
        "/predict",
        post(|| async {
            Json(json!({
                "success": true,
                "prediction": 1,
                "probability": 0.82,
                "message": "High churn risk",
            }))
        }),
    );
    let base_url = serve(router).await;

    let assessment = client_for(&base_url)
        .predict(&sample_request())
        .await
        .unwrap();

    assert_eq!(assessment.risk, RiskLevel::High);
    assert_eq!(assessment.percent_text(), "82.0%");
    assert_eq!(assessment.message.as_deref(), Some("High churn risk"));
}

#[tokio::test]
async fn request_body_carries_exact_wire_field_names() {
    // The stub only reports success when the payload looks like the
    // contract, so a rename on our side fails the whole test.
    let router = Router::new().route(
        "/predict",
        post(|Json(body): Json<Value>| async move {
            let ok = body.get("is_premium") == Some(&json!(1))
                && body.get("is_standard") == Some(&json!(0))
                && body.get("is_metal") == Some(&json!(0))
                && body.get("user_settings_crypto_unlocked") == Some(&json!(1))
                && body.get("avg_transaction_amount") == Some(&json!(42.5))
                && body.get("notification_success_rate") == Some(&json!(0.85))
                && body.get("age") == Some(&json!(34));

            if ok {
                Json(json!({"success": true, "prediction": 0, "probability": 0.2}))
            } else {
                Json(json!({"success": false, "error": "unexpected payload"}))
            }
        }),
    );
    let base_url = serve(router).await;

    let assessment = client_for(&base_url)
        .predict(&sample_request())
        .await
        .unwrap();

    assert_eq!(assessment.risk, RiskLevel::Low);
    assert_eq!(assessment.percent_text(), "20.0%");
}

#[tokio::test]
async fn service_error_surfaces_its_message() {
    let router = Router::new().route(
        "/predict",
        post(|| async { Json(json!({"success": false, "error": "bad input"})) }),
    );
    let base_url = serve(router).await;

    let err = client_for(&base_url)
        .predict(&sample_request())
        .await
        .unwrap_err();

    let service = err.downcast_ref::<ServiceError>().expect("ServiceError");
    assert_eq!(service.message(), "bad input");
}

#[tokio::test]
async fn service_error_without_message_uses_fallback() {
    let router = Router::new().route(
        "/predict",
        post(|| async { Json(json!({"success": false})) }),
    );
    let base_url = serve(router).await;

    let err = client_for(&base_url)
        .predict(&sample_request())
        .await
        .unwrap_err();

    let service = err.downcast_ref::<ServiceError>().expect("ServiceError");
    assert_eq!(service.message(), "An error occurred during prediction");
}

#[tokio::test]
async fn malformed_body_is_a_transport_error() {
    let router = Router::new().route("/predict", post(|| async { "not json" }));
    let base_url = serve(router).await;

    let err = client_for(&base_url)
        .predict(&sample_request())
        .await
        .unwrap_err();

    assert!(err.downcast_ref::<ServiceError>().is_none());
    assert!(format!("{err:#}").contains("not valid JSON"));
}

#[tokio::test]
async fn http_error_status_is_a_transport_error() {
    let router = Router::new().route(
        "/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = serve(router).await;

    let err = client_for(&base_url)
        .predict(&sample_request())
        .await
        .unwrap_err();

    assert!(err.downcast_ref::<ServiceError>().is_none());
    assert!(format!("{err:#}").contains("500"));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // Port 9 (discard) is a safe dead endpoint.
    let err = client_for("http://127.0.0.1:9")
        .predict(&sample_request())
        .await
        .unwrap_err();

    assert!(err.downcast_ref::<ServiceError>().is_none());
}

#[tokio::test]
async fn invalid_probability_is_rejected() {
    let router = Router::new().route(
        "/predict",
        post(|| async { Json(json!({"success": true, "prediction": 1, "probability": 1.7})) }),
    );
    let base_url = serve(router).await;

    let err = client_for(&base_url)
        .predict(&sample_request())
        .await
        .unwrap_err();

    assert!(err.downcast_ref::<ServiceError>().is_none());
    assert!(format!("{err:#}").contains("probability"));
}

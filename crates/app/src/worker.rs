//! Background prediction job so the UI loop never blocks on the network.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use churn_core::client::error::ServiceError;
use churn_core::client::PredictionBackend;
use churn_core::domain::assessment::Assessment;
use churn_core::domain::prediction::PredictionRequest;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

#[derive(Debug)]
pub enum PredictOutcome {
    Success(Assessment),
    Failure { message: String },
}

pub struct PredictJobHandle {
    rx: Receiver<PredictOutcome>,
}

impl PredictJobHandle {
    /// Non-blocking poll. Yields `Some` exactly once per job; a job that
    /// died without reporting resolves to a transport failure, so the
    /// caller always sees a completion.
    pub fn try_recv(&self) -> Option<PredictOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(PredictOutcome::Failure {
                message: NETWORK_ERROR_MESSAGE.to_string(),
            }),
        }
    }
}

pub fn spawn(
    runtime: tokio::runtime::Handle,
    backend: Arc<dyn PredictionBackend>,
    request: PredictionRequest,
) -> PredictJobHandle {
    let (tx, rx) = mpsc::channel();

    runtime.spawn(async move {
        let outcome = match backend.predict(&request).await {
            Ok(assessment) => PredictOutcome::Success(assessment),
            Err(err) => {
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "prediction failed");
                PredictOutcome::Failure {
                    message: failure_message(&err),
                }
            }
        };
        let _ = tx.send(outcome);
    });

    PredictJobHandle { rx }
}

/// Application errors keep the service's message; everything else is
/// shown as a generic transport failure.
fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ServiceError>() {
        Some(service) => service.message().to_string(),
        None => NETWORK_ERROR_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::Utc;
    use churn_core::domain::assessment::RiskLevel;
    use churn_core::domain::prediction::PredictionResponse;
    use std::time::Duration;

    fn sample_request() -> PredictionRequest {
        PredictionRequest {
            is_standard: 1,
            is_premium: 0,
            is_metal: 0,
            user_settings_crypto_unlocked: 0,
            is_apple: 0,
            is_gb: 0,
            is_pl: 0,
            is_fr: 0,
            age: 40,
            total_transactions: 10,
            avg_transaction_amount: 5.0,
            first_month_transactions: 2,
            first_month_active_days: 4,
            days_to_first_transaction: 7,
            notification_success_rate: 0.5,
            total_notifications: 30,
        }
    }

    struct HighRiskBackend;

    #[async_trait]
    impl PredictionBackend for HighRiskBackend {
        async fn predict(&self, _request: &PredictionRequest) -> anyhow::Result<Assessment> {
            let response = PredictionResponse {
                success: true,
                prediction: Some(1),
                probability: Some(0.82),
                message: None,
                error: None,
            };
            Assessment::from_success(response, Utc::now())
        }
    }

    struct RejectingBackend;

    #[async_trait]
    impl PredictionBackend for RejectingBackend {
        async fn predict(&self, _request: &PredictionRequest) -> anyhow::Result<Assessment> {
            Err(ServiceError::new("bad input").into())
        }
    }

    struct OfflineBackend;

    #[async_trait]
    impl PredictionBackend for OfflineBackend {
        async fn predict(&self, _request: &PredictionRequest) -> anyhow::Result<Assessment> {
            Err(anyhow!("connection refused"))
        }
    }

    fn run_job(backend: Arc<dyn PredictionBackend>) -> PredictOutcome {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let handle = spawn(runtime.handle().clone(), backend, sample_request());
        handle
            .rx
            .recv_timeout(Duration::from_secs(5))
            .expect("job must complete")
    }

    #[test]
    fn success_yields_assessment() {
        match run_job(Arc::new(HighRiskBackend)) {
            PredictOutcome::Success(a) => {
                assert_eq!(a.risk, RiskLevel::High);
                assert_eq!(a.percent_text(), "82.0%");
            }
            PredictOutcome::Failure { message } => panic!("unexpected failure: {message}"),
        }
    }

    #[test]
    fn service_rejection_keeps_its_message() {
        match run_job(Arc::new(RejectingBackend)) {
            PredictOutcome::Failure { message } => assert_eq!(message, "bad input"),
            PredictOutcome::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn transport_failure_uses_generic_message() {
        match run_job(Arc::new(OfflineBackend)) {
            PredictOutcome::Failure { message } => assert_eq!(message, NETWORK_ERROR_MESSAGE),
            PredictOutcome::Success(_) => panic!("expected failure"),
        }
    }
}

pub mod error;
pub mod http;

use crate::domain::assessment::Assessment;
use crate::domain::prediction::PredictionRequest;

#[async_trait::async_trait]
pub trait PredictionBackend: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> anyhow::Result<Assessment>;
}

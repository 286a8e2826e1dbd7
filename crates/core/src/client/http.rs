use std::time::Duration;

use anyhow::{bail, Context};
use chrono::Utc;
use uuid::Uuid;

use crate::client::error::ServiceError;
use crate::client::PredictionBackend;
use crate::config::Settings;
use crate::domain::assessment::Assessment;
use crate::domain::prediction::{PredictionRequest, PredictionResponse};

const DEFAULT_PATH: &str = "/predict";

#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    base_url: String,
    path: String,
}

impl HttpPredictionClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let base_url = settings.require_predict_base_url()?.to_string();

        let path = settings
            .predict_path
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());

        // No timeout unless configured: a stalled request keeps the caller
        // waiting, and the UI keeps its loading overlay up.
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.predict_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .context("failed to build prediction http client")?;

        Ok(Self {
            http,
            base_url,
            path,
        })
    }

    fn url(&self) -> String {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };

        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_once(&self, request: &PredictionRequest) -> anyhow::Result<PredictionResponse> {
        let res = self
            .http
            .post(self.url())
            .json(request)
            .send()
            .await
            .context("prediction request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read prediction response")?;
        if !status.is_success() {
            bail!("prediction service HTTP {status}: {text}");
        }

        serde_json::from_str::<PredictionResponse>(&text)
            .with_context(|| format!("prediction response is not valid JSON: {text}"))
    }
}

#[async_trait::async_trait]
impl PredictionBackend for HttpPredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> anyhow::Result<Assessment> {
        let submission_id = Uuid::new_v4();
        tracing::debug!(%submission_id, url = %self.url(), "sending prediction request");

        let response = self.post_once(request).await?;

        if !response.success {
            let err = ServiceError::from_response_error(response.error.clone());
            tracing::warn!(%submission_id, error = %err, "prediction rejected by service");
            return Err(err.into());
        }

        let assessment = Assessment::from_success(response, Utc::now())?;
        tracing::info!(
            %submission_id,
            risk = assessment.risk.headline(),
            probability = assessment.probability,
            "prediction received"
        );
        Ok(assessment)
    }
}

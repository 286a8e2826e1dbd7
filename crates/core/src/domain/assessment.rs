use anyhow::{ensure, Context};
use chrono::{DateTime, Utc};

use crate::domain::prediction::PredictionResponse;

const HIGH_RISK_ACTIONS: &[&str] = &[
    "Implement targeted retention campaigns",
    "Offer personalized incentives and rewards",
    "Increase engagement through notifications",
    "Schedule follow-up calls with customer success team",
    "Consider account upgrade offers",
];

const LOW_RISK_ACTIONS: &[&str] = &[
    "Continue current engagement strategies",
    "Monitor for any changes in behavior patterns",
    "Maintain regular communication",
    "Consider upselling opportunities",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    High,
}

impl RiskLevel {
    pub fn headline(self) -> &'static str {
        match self {
            Self::High => "High Churn Risk",
            Self::Low => "Low Churn Risk",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::High => "This customer shows signs of potential churn",
            Self::Low => "This customer appears to be stable",
        }
    }

    /// The service reports churn probability for prediction 1 and retention
    /// probability for prediction 0, so the meter label follows the risk.
    pub fn meter_label(self) -> &'static str {
        match self {
            Self::High => "Churn Probability",
            Self::Low => "Retention Probability",
        }
    }

    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::High => HIGH_RISK_ACTIONS,
            Self::Low => LOW_RISK_ACTIONS,
        }
    }
}

/// A successful prediction, validated and ready to render.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub risk: RiskLevel,
    pub probability: f64,
    pub message: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl Assessment {
    pub fn from_success(
        response: PredictionResponse,
        received_at: DateTime<Utc>,
    ) -> anyhow::Result<Self> {
        ensure!(response.success, "response did not report success");

        let prediction = response
            .prediction
            .context("prediction missing from successful response")?;
        let probability = response
            .probability
            .context("probability missing from successful response")?;

        ensure!(
            prediction == 0 || prediction == 1,
            "prediction must be 0 or 1 (got {prediction})"
        );
        ensure!(
            (0.0..=1.0).contains(&probability),
            "probability must be between 0 and 1 (got {probability})"
        );

        let risk = if prediction == 1 {
            RiskLevel::High
        } else {
            RiskLevel::Low
        };

        Ok(Self {
            risk,
            probability,
            message: response.message,
            received_at,
        })
    }

    /// Probability as a percentage with one decimal, e.g. `82.0%`.
    pub fn percent_text(&self) -> String {
        format!("{:.1}%", self.probability * 100.0)
    }

    pub fn meter_ratio(&self) -> f64 {
        self.probability
    }
}

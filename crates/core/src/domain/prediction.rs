use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Standard,
    Premium,
    Metal,
}

impl AccountType {
    pub const ALL: [AccountType; 3] = [Self::Standard, Self::Premium, Self::Metal];

    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Premium => "Premium",
            Self::Metal => "Metal",
        }
    }

    /// Wire flags `(is_standard, is_premium, is_metal)`. Exactly one is 1.
    pub fn flags(self) -> (u8, u8, u8) {
        match self {
            Self::Standard => (1, 0, 0),
            Self::Premium => (0, 1, 0),
            Self::Metal => (0, 0, 1),
        }
    }
}

/// Request body for `POST /predict`. Field names are the wire contract;
/// boolean inputs are normalized to 0/1 before construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub is_standard: u8,
    pub is_premium: u8,
    pub is_metal: u8,
    pub user_settings_crypto_unlocked: u8,
    pub is_apple: u8,
    pub is_gb: u8,
    pub is_pl: u8,
    pub is_fr: u8,
    pub age: i64,
    pub total_transactions: i64,
    pub avg_transaction_amount: f64,
    pub first_month_transactions: i64,
    pub first_month_active_days: i64,
    pub days_to_first_transaction: i64,
    pub notification_success_rate: f64,
    pub total_notifications: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub success: bool,

    #[serde(default)]
    pub prediction: Option<i64>,

    #[serde(default)]
    pub probability: Option<f64>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

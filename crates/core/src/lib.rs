pub mod client;
pub mod domain;
pub mod form;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub predict_base_url: Option<String>,
        pub predict_path: Option<String>,
        pub predict_timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                predict_base_url: std::env::var("PREDICT_BASE_URL").ok(),
                predict_path: std::env::var("PREDICT_PATH").ok(),
                predict_timeout_secs: std::env::var("PREDICT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok()),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_predict_base_url(&self) -> anyhow::Result<&str> {
            self.predict_base_url
                .as_deref()
                .context("PREDICT_BASE_URL is required")
        }
    }
}

use crate::domain::{
    errors::AppError,
    logging::{LogComponent, get_logger},
    market_data::IntradayInterval,
};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
/// Alpha Vantage's public key; only answers for a handful of tickers.
pub const DEMO_API_KEY: &str = "demo";
pub const DEFAULT_TIMEOUT_MS: u32 = 30_000;

/// Connection settings for the Alpha Vantage client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub interval: IntradayInterval,
    /// `None` disables the timeout.
    pub request_timeout_ms: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEMO_API_KEY.to_string(),
            interval: IntradayInterval::default(),
            request_timeout_ms: Some(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ApiConfig {
    /// Values baked in at build time: `ALPHA_VANTAGE_API_KEY` and the
    /// optional `ALPHA_VANTAGE_BASE_URL`.
    pub fn from_env() -> Self {
        Self::from_values(option_env!("ALPHA_VANTAGE_API_KEY"), option_env!("ALPHA_VANTAGE_BASE_URL"))
    }

    /// Blank values count as unset.
    pub fn from_values(api_key: Option<&str>, base_url: Option<&str>) -> Self {
        let mut config = Self::default();

        match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => config.api_key = key.to_string(),
            None => get_logger().warn(
                LogComponent::Infrastructure("Config"),
                "⚠️ ALPHA_VANTAGE_API_KEY not set at build time, using the demo key",
            ),
        }
        if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.base_url = url.to_string();
        }
        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_interval(mut self, interval: IntradayInterval) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u32>) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// `{base_url}/query`
    pub fn query_endpoint(&self) -> Result<Url, AppError> {
        let base = Url::parse(&self.base_url)?;
        if base.cannot_be_a_base() {
            return Err(AppError::Configuration(format!("not a base url: {}", self.base_url)));
        }
        Ok(base.join("query")?)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Configuration("API key is empty".to_string()));
        }
        if self.request_timeout_ms == Some(0) {
            return Err(AppError::Configuration("timeout must be positive".to_string()));
        }
        self.query_endpoint().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_falls_back_to_demo() {
        let config = ApiConfig::from_values(Some("  "), None);
        assert_eq!(config.api_key, DEMO_API_KEY);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn explicit_values_win() {
        let config = ApiConfig::from_values(Some("KEY123"), Some("http://localhost:8080"));
        assert_eq!(config.api_key, "KEY123");
        assert_eq!(config.query_endpoint().unwrap().as_str(), "http://localhost:8080/query");
    }

    #[test]
    fn validation_rejects_bad_settings() {
        assert!(ApiConfig::default().validate().is_ok());
        assert!(matches!(
            ApiConfig::default().with_api_key("").validate(),
            Err(AppError::Configuration(_))
        ));
        assert!(ApiConfig::default().with_base_url("not a url").validate().is_err());
        assert!(ApiConfig::default().with_timeout_ms(Some(0)).validate().is_err());
    }
}

pub mod dto;

use crate::domain::{
    errors::{AppError, NetworkResult},
    logging::{LogComponent, get_logger},
    market_data::{StockDataRepository, Symbol, SymbolSuggestion, TimeSeriesSample},
};
use crate::infrastructure::config::ApiConfig;
use dto::{SymbolSearchResponse, decode_intraday};
use futures::future::{Either, select};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use url::Url;

/// HTTP client for the Alpha Vantage `query` endpoint
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    config: ApiConfig,
}

impl Default for AlphaVantageClient {
    fn default() -> Self {
        Self::new(ApiConfig::from_env())
    }
}

impl AlphaVantageClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn symbol_search_url(&self, keywords: &str) -> NetworkResult<Url> {
        self.query_url(&[("function", "SYMBOL_SEARCH"), ("keywords", keywords)])
    }

    pub fn intraday_url(&self, symbol: &Symbol) -> NetworkResult<Url> {
        self.query_url(&[
            ("function", "TIME_SERIES_INTRADAY"),
            ("symbol", symbol.value()),
            ("interval", self.config.interval.as_query_value()),
        ])
    }

    fn query_url(&self, params: &[(&str, &str)]) -> NetworkResult<Url> {
        let mut url = self.config.query_endpoint()?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().copied())
            .append_pair("apikey", &self.config.api_key);
        Ok(url)
    }

    /// GET + decode, bounded by the configured timeout.
    async fn get_json(&self, url: Url) -> NetworkResult<Value> {
        let request = Self::send(url);
        match self.config.request_timeout_ms {
            Some(ms) => match select(Box::pin(request), TimeoutFuture::new(ms)).await {
                Either::Left((result, _)) => result,
                Either::Right(_) => Err(AppError::Network(format!("request timed out after {} ms", ms))),
            },
            None => request.await,
        }
    }

    async fn send(url: Url) -> NetworkResult<Value> {
        let response = Request::get(url.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to send request: {}", e)))?;

        if !response.ok() {
            return Err(AppError::Network(format!(
                "HTTP error: {} - {}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Parse(format!("Failed to parse JSON: {}", e)))
    }
}

impl StockDataRepository for AlphaVantageClient {
    async fn search_symbols(&self, keywords: &str) -> Result<Vec<SymbolSuggestion>, AppError> {
        let url = self.symbol_search_url(keywords)?;
        get_logger().debug(
            LogComponent::Infrastructure("AlphaVantage"),
            &format!("🔎 SYMBOL_SEARCH {:?}", keywords),
        );

        let body = self.get_json(url).await?;
        let response = SymbolSearchResponse::from_body(&body)?;
        if response.best_matches.is_none() {
            if let Some(message) = response.notice.message() {
                get_logger().warn(
                    LogComponent::Infrastructure("AlphaVantage"),
                    &format!("⚠️ Search returned no matches field: {}", message),
                );
            }
        }
        Ok(response.into_suggestions())
    }

    async fn fetch_intraday(&self, symbol: &Symbol) -> Result<Vec<TimeSeriesSample>, AppError> {
        let url = self.intraday_url(symbol)?;
        get_logger().info(
            LogComponent::Infrastructure("AlphaVantage"),
            &format!("📡 Fetching {} intraday series for {}", self.config.interval, symbol),
        );

        let body = self.get_json(url).await?;
        let samples = decode_intraday(&body, self.config.interval)?;

        get_logger().info(
            LogComponent::Infrastructure("AlphaVantage"),
            &format!("✅ Loaded {} samples for {}", samples.len(), symbol),
        );
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::IntradayInterval;

    fn client() -> AlphaVantageClient {
        AlphaVantageClient::new(ApiConfig::default().with_api_key("KEY"))
    }

    #[test]
    fn test_symbol_search_url() {
        let url = client().symbol_search_url("AAP").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.alphavantage.co/query?function=SYMBOL_SEARCH&keywords=AAP&apikey=KEY"
        );
    }

    #[test]
    fn test_keywords_are_encoded() {
        let url = client().symbol_search_url("S&P 500").unwrap();
        assert_eq!(
            url.query(),
            Some("function=SYMBOL_SEARCH&keywords=S%26P+500&apikey=KEY")
        );
    }

    #[test]
    fn test_intraday_url() {
        let url = client()
            .intraday_url(&Symbol::from("IBM"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.alphavantage.co/query?function=TIME_SERIES_INTRADAY&symbol=IBM&interval=5min&apikey=KEY"
        );

        let hourly = AlphaVantageClient::new(
            ApiConfig::default().with_api_key("KEY").with_interval(IntradayInterval::SixtyMinutes),
        );
        assert!(hourly.intraday_url(&Symbol::from("IBM")).unwrap().as_str().contains("interval=60min"));
    }
}

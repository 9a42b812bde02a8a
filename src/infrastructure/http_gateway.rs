// HTTP gateway - reqwest adapter for the aggregation API
use crate::application::error::GatewayError;
use crate::application::gateway::{DataGateway, Endpoint, QueryParams, effective_params};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Full request URL. Parameters without a value are left out entirely.
    pub fn build_query_url(&self, endpoint: Endpoint, params: &QueryParams) -> String {
        let query: Vec<String> = effective_params(params)
            .map(|(name, value)| {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
            })
            .collect();

        if query.is_empty() {
            format!("{}{}", self.base_url, endpoint.path())
        } else {
            format!("{}{}?{}", self.base_url, endpoint.path(), query.join("&"))
        }
    }

    async fn execute(&self, endpoint: Endpoint, url: &str) -> Result<serde_json::Value, GatewayError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(transport_error(endpoint, status.to_string()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(endpoint, e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| GatewayError::Parse {
            endpoint: endpoint.path(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl DataGateway for HttpGateway {
    async fn query(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<serde_json::Value, GatewayError> {
        let url = self.build_query_url(endpoint, params);
        tracing::debug!("GET {}", url);

        let result = self.execute(endpoint, &url).await;
        if let Err(e) = &result {
            tracing::error!("API error {}: {}", endpoint.path(), e);
        }
        result
    }
}

fn transport_error(endpoint: Endpoint, message: String) -> GatewayError {
    GatewayError::Transport {
        endpoint: endpoint.path(),
        message,
    }
}

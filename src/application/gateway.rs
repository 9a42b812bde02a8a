// Gateway trait for the remote aggregation API
use crate::application::error::GatewayError;
use async_trait::async_trait;

/// Endpoints exposed under the API base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Health,
    Trips,
    Stats,
    Hourly,
    BoroughPatterns,
    DailyPatterns,
    Boroughs,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Health => "/health",
            Self::Trips => "/trips",
            Self::Stats => "/stats",
            Self::Hourly => "/hourly",
            Self::BoroughPatterns => "/patterns-borough",
            Self::DailyPatterns => "/patterns-daily",
            Self::Boroughs => "/boroughs",
        }
    }
}

/// Query parameters as name/value pairs. `None` and empty values are not sent.
pub type QueryParams = [(&'static str, Option<String>)];

#[async_trait]
pub trait DataGateway: Send + Sync {
    /// Issue one GET against `endpoint` and return the parsed JSON body.
    async fn query(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<serde_json::Value, GatewayError>;
}

/// Parameters that are actually sent: present and non-empty, in order.
pub fn effective_params(params: &QueryParams) -> impl Iterator<Item = (&'static str, &str)> {
    params.iter().filter_map(|(name, value)| {
        value
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(|value| (*name, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_params_skips_empty_values() {
        let params = [
            ("start_date", Some("2019-01-01".to_string())),
            ("end_date", Some(String::new())),
            ("borough", None),
            ("page", Some("2".to_string())),
        ];
        let sent: Vec<_> = effective_params(&params).collect();
        assert_eq!(sent, vec![("start_date", "2019-01-01"), ("page", "2")]);
    }
}

// Error taxonomy for dashboard data loading
use crate::domain::dashboard::Region;
use thiserror::Error;

/// Failure of a single gateway call. The gateway never retries; callers
/// decide whether a failure is fatal or isolated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("request to {endpoint} failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },
    #[error("malformed response from {endpoint}: {message}")]
    Parse {
        endpoint: &'static str,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The startup probe failed; the session cannot start.
    #[error("backend health check failed: {0}")]
    HealthCheck(#[source] GatewayError),

    /// One aggregate fetch failed. Its region stays unpopulated; siblings are unaffected.
    #[error("{region} failed to load: {source}")]
    PartialAggregate {
        region: Region,
        #[source]
        source: GatewayError,
    },

    #[error("trip listing page {page} failed to load: {source}")]
    TripListing {
        page: u32,
        #[source]
        source: GatewayError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn transport() -> GatewayError {
        GatewayError::Transport {
            endpoint: "/stats",
            message: "connection refused".to_string(),
        }
    }

    #[test]
    fn test_dashboard_errors_keep_gateway_source() {
        let errors = [
            DashboardError::HealthCheck(transport()),
            DashboardError::PartialAggregate {
                region: Region::Stats,
                source: transport(),
            },
            DashboardError::TripListing {
                page: 3,
                source: transport(),
            },
        ];

        for err in &errors {
            let source = err.source().and_then(|s| s.downcast_ref::<GatewayError>());
            assert_eq!(source, Some(&transport()), "{err}");
            assert!(err.to_string().contains("connection refused"), "{err}");
        }
    }

    #[test]
    fn test_trip_listing_names_page() {
        let err = DashboardError::TripListing {
            page: 3,
            source: transport(),
        };
        assert_eq!(
            err.to_string(),
            "trip listing page 3 failed to load: request to /stats failed: connection refused"
        );
    }
}

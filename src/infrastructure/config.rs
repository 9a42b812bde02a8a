// Configuration loading - API location and default filters
use crate::domain::filters::{BoroughFilter, FilterState};
use chrono::NaiveDate;
use config::builder::{ConfigBuilder, DefaultState};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001/api";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub filters: FilterDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Filters selected when the session starts.
#[derive(Debug, Deserialize, Clone)]
pub struct FilterDefaults {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub borough: String,
}

impl FilterDefaults {
    pub fn to_filter_state(&self) -> FilterState {
        FilterState::new(
            self.start_date,
            self.end_date,
            BoroughFilter::parse(&self.borough),
        )
    }
}

/// Built-in defaults, then `config/dashboard.{toml,...}` if present, then
/// `DASHBOARD__SECTION__KEY` environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = with_defaults(config::Config::builder())?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    builder
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("api.timeout_secs", 10_i64)?
        .set_default("filters.start_date", "2019-01-01")?
        .set_default("filters.end_date", "2019-01-31")?
        .set_default("filters.borough", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> DashboardConfig {
        with_defaults(config::Config::builder())
            .unwrap()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout(), Duration::from_secs(10));

        let filters = config.filters.to_filter_state();
        assert_eq!(filters.start_date, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        assert_eq!(filters.end_date, NaiveDate::from_ymd_opt(2019, 1, 31).unwrap());
        assert_eq!(filters.borough, BoroughFilter::All);
    }

    #[test]
    fn test_file_overrides() {
        let config = parse(
            r#"
            [api]
            base_url = "http://taxi.internal:8080/api"
            timeout_secs = 3

            [filters]
            start_date = "2019-02-01"
            end_date = "2019-02-28"
            borough = "Brooklyn"
            "#,
        );
        assert_eq!(config.api.base_url, "http://taxi.internal:8080/api");
        assert_eq!(config.api.timeout_secs, 3);

        let filters = config.filters.to_filter_state();
        assert_eq!(filters.start_date, NaiveDate::from_ymd_opt(2019, 2, 1).unwrap());
        assert_eq!(filters.borough, BoroughFilter::Named("Brooklyn".to_string()));
    }
}

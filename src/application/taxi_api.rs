// Typed client for the taxi aggregation API
use crate::application::error::GatewayError;
use crate::application::gateway::{DataGateway, Endpoint, QueryParams};
use crate::domain::aggregates::{BoroughBucket, DailyBucket, HourlyBucket, StatsSummary};
use crate::domain::filters::FilterState;
use crate::domain::trips::{PAGE_SIZE, TripPage, TripsPayload};
use serde::de::DeserializeOwned;
use std::sync::Arc;

#[derive(Clone)]
pub struct TaxiApi {
    gateway: Arc<dyn DataGateway>,
}

impl TaxiApi {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self { gateway }
    }

    pub async fn health(&self) -> Result<serde_json::Value, GatewayError> {
        self.gateway.query(Endpoint::Health, &[]).await
    }

    /// Borough names for the filter dropdown. Null entries are dropped.
    pub async fn boroughs(&self) -> Result<Vec<String>, GatewayError> {
        let names: Vec<Option<String>> = self.fetch(Endpoint::Boroughs, &[]).await?;
        Ok(names.into_iter().flatten().collect())
    }

    pub async fn stats(&self, filters: &FilterState) -> Result<StatsSummary, GatewayError> {
        self.fetch(Endpoint::Stats, &filters.query_params()).await
    }

    pub async fn hourly(&self, filters: &FilterState) -> Result<Vec<HourlyBucket>, GatewayError> {
        let buckets: Vec<HourlyBucket> = self.fetch(Endpoint::Hourly, &filters.query_params()).await?;
        if let Some(bucket) = buckets.iter().find(|b| b.hour > 23) {
            return Err(parse_error(
                Endpoint::Hourly,
                format!("hour {} is outside 0..=23", bucket.hour),
            ));
        }
        Ok(buckets)
    }

    pub async fn borough_patterns(
        &self,
        filters: &FilterState,
    ) -> Result<Vec<BoroughBucket>, GatewayError> {
        self.fetch(Endpoint::BoroughPatterns, &filters.query_params()).await
    }

    pub async fn daily_patterns(
        &self,
        filters: &FilterState,
    ) -> Result<Vec<DailyBucket>, GatewayError> {
        self.fetch(Endpoint::DailyPatterns, &filters.query_params()).await
    }

    pub async fn trips(&self, filters: &FilterState, page: u32) -> Result<TripPage, GatewayError> {
        let mut params = filters.query_params();
        params.push(("page", Some(page.to_string())));

        let payload: TripsPayload = self.fetch(Endpoint::Trips, &params).await?;
        if payload.trips.len() as u64 > PAGE_SIZE {
            return Err(parse_error(
                Endpoint::Trips,
                format!("page holds {} records, limit is {}", payload.trips.len(), PAGE_SIZE),
            ));
        }
        Ok(TripPage::new(payload.trips, payload.total))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<T, GatewayError> {
        let value = self.gateway.query(endpoint, params).await?;
        serde_json::from_value(value).map_err(|e| parse_error(endpoint, e.to_string()))
    }
}

fn parse_error(endpoint: Endpoint, message: String) -> GatewayError {
    GatewayError::Parse {
        endpoint: endpoint.path(),
        message,
    }
}

// Test doubles for the gateway and view seams
use crate::application::error::GatewayError;
use crate::application::gateway::{DataGateway, Endpoint, QueryParams, effective_params};
use crate::domain::aggregates::{BoroughBucket, DailyBucket, HourlyBucket, StatsSummary};
use crate::domain::dashboard::{RefreshState, Region};
use crate::domain::filters::{BoroughFilter, FilterState};
use crate::domain::pagination::PageWindow;
use crate::domain::trips::{PAGE_SIZE, TripPage, TripRecord};
use crate::application::view::DashboardView;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub(crate) fn january() -> FilterState {
    FilterState::new(
        NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2019, 1, 31).unwrap(),
        BoroughFilter::All,
    )
}

pub(crate) fn trip_page(page: u32, records: usize, total: u64) -> TripPage {
    let day = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
    let records = (0..records)
        .map(|i| TripRecord {
            id: format!("{page}-{i}"),
            pickup_time: day.and_hms_opt(8, 0, 0).unwrap(),
            dropoff_time: day.and_hms_opt(8, 15, 0).unwrap(),
            distance_miles: 2.5,
            fare_amount: 12.0,
        })
        .collect();
    TripPage::new(records, total)
}

type Call = (Endpoint, Vec<(String, String)>);

/// Canned API. `/trips` pages are generated from `trips_total` unless a
/// body is configured for the endpoint.
#[derive(Default)]
pub(crate) struct FakeGateway {
    responses: HashMap<(Endpoint, Option<String>), Result<Value, GatewayError>>,
    trips_total: u64,
    failing_pages: HashSet<u32>,
    calls: Mutex<Vec<Call>>,
}

impl FakeGateway {
    pub(crate) fn new() -> Self {
        Self::default()
            .respond(Endpoint::Health, json!({ "status": "ok" }))
            .respond(
                Endpoint::Stats,
                json!({ "total_trips": 1200, "revenue": 15432.5, "avg_speed": 11.2, "avg_distance": 2.9 }),
            )
            .respond(
                Endpoint::Hourly,
                json!([
                    { "hour": 0, "count": 40 },
                    { "hour": 8, "count": 120 },
                    { "hour": 17, "count": 150 }
                ]),
            )
            .respond(
                Endpoint::BoroughPatterns,
                json!([
                    { "borough": "Manhattan", "count": 900 },
                    { "borough": "Queens", "count": 300 }
                ]),
            )
            .respond(
                Endpoint::DailyPatterns,
                json!([
                    { "date": "2019-01-01", "count": 600 },
                    { "date": "2019-01-02", "count": 600 }
                ]),
            )
            .respond(
                Endpoint::Boroughs,
                json!(["Bronx", "Brooklyn", "Manhattan", "Queens", "Staten Island"]),
            )
            .with_trips_total(1200)
    }

    pub(crate) fn respond(mut self, endpoint: Endpoint, body: Value) -> Self {
        self.responses.insert((endpoint, None), Ok(body));
        self
    }

    /// Body returned only when the request filters on `borough`.
    pub(crate) fn respond_for_borough(mut self, endpoint: Endpoint, borough: &str, body: Value) -> Self {
        self.responses
            .insert((endpoint, Some(borough.to_string())), Ok(body));
        self
    }

    pub(crate) fn fail(mut self, endpoint: Endpoint, message: &str) -> Self {
        self.responses.insert(
            (endpoint, None),
            Err(GatewayError::Transport {
                endpoint: endpoint.path(),
                message: message.to_string(),
            }),
        );
        self
    }

    pub(crate) fn with_trips_total(mut self, total: u64) -> Self {
        self.trips_total = total;
        self
    }

    pub(crate) fn fail_trips_page(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_to(&self, endpoint: Endpoint) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| *e == endpoint)
            .count()
    }

    fn trips_body(&self, page: u32) -> Value {
        let start = u64::from(page.saturating_sub(1)) * PAGE_SIZE;
        let count = self.trips_total.saturating_sub(start).min(PAGE_SIZE);
        let trips: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "trip_id": format!("{page}-{i}"),
                    "pickup": "2019-01-01 08:00:00",
                    "dropoff": "2019-01-01 08:15:00",
                    "distance": 2.5,
                    "amount": 12.0
                })
            })
            .collect();
        json!({ "trips": trips, "total": self.trips_total })
    }
}

#[async_trait]
impl DataGateway for FakeGateway {
    async fn query(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Value, GatewayError> {
        let sent: Vec<(String, String)> = effective_params(params)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        self.calls.lock().unwrap().push((endpoint, sent.clone()));

        let param = |name: &str| {
            sent.iter()
                .find(|(n, _)| n == name)
                .map(|(_, value)| value.clone())
        };

        if let Some(response) = self
            .responses
            .get(&(endpoint, param("borough")))
            .or_else(|| self.responses.get(&(endpoint, None)))
        {
            return response.clone();
        }

        if endpoint == Endpoint::Trips {
            let page = param("page").and_then(|p| p.parse().ok()).unwrap_or(1);
            if self.failing_pages.contains(&page) {
                return Err(GatewayError::Transport {
                    endpoint: endpoint.path(),
                    message: "502 Bad Gateway".to_string(),
                });
            }
            return Ok(self.trips_body(page));
        }

        Err(GatewayError::Transport {
            endpoint: endpoint.path(),
            message: "404 Not Found".to_string(),
        })
    }
}

/// Remembers the last thing rendered into each region.
#[derive(Default)]
pub(crate) struct RecordingView {
    pub loading: HashMap<Region, bool>,
    pub stats: Option<StatsSummary>,
    pub stats_renders: usize,
    pub hourly: Option<Vec<HourlyBucket>>,
    pub borough: Option<Vec<BoroughBucket>>,
    pub daily: Option<Vec<DailyBucket>>,
    pub trips: Option<(TripPage, PageWindow)>,
    pub trips_renders: usize,
    pub borough_options: Vec<String>,
    pub refresh_states: Vec<RefreshState>,
    pub notices: Vec<String>,
    pub alerts: Vec<String>,
}

impl RecordingView {
    pub(crate) fn is_loading(&self, region: Region) -> bool {
        self.loading.get(&region).copied().unwrap_or(false)
    }
}

impl DashboardView for RecordingView {
    fn set_loading(&mut self, region: Region, loading: bool) {
        self.loading.insert(region, loading);
    }

    fn show_stats(&mut self, stats: &StatsSummary) {
        self.stats = Some(stats.clone());
        self.stats_renders += 1;
    }

    fn show_hourly(&mut self, buckets: &[HourlyBucket]) {
        self.hourly = Some(buckets.to_vec());
    }

    fn show_borough_patterns(&mut self, buckets: &[BoroughBucket]) {
        self.borough = Some(buckets.to_vec());
    }

    fn show_daily(&mut self, buckets: &[DailyBucket]) {
        self.daily = Some(buckets.to_vec());
    }

    fn show_trips(&mut self, page: &TripPage, window: &PageWindow) {
        self.trips = Some((page.clone(), window.clone()));
        self.trips_renders += 1;
    }

    fn show_borough_options(&mut self, boroughs: &[String]) {
        self.borough_options = boroughs.to_vec();
    }

    fn show_refresh_state(&mut self, state: &RefreshState) {
        self.refresh_states.push(state.clone());
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

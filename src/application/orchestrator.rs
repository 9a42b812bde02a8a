// Dashboard orchestrator - fans out fetches and applies their results
use crate::application::error::{DashboardError, GatewayError};
use crate::application::session::Session;
use crate::application::taxi_api::TaxiApi;
use crate::application::view::DashboardView;
use crate::domain::aggregates::{BoroughBucket, DailyBucket, HourlyBucket, StatsSummary};
use crate::domain::dashboard::{RefreshState, Region};
use crate::domain::filters::{BoroughFilter, FilterState};
use crate::domain::pagination::{self, PageMove, PageWindow};
use crate::domain::trips::TripPage;
use chrono::NaiveDate;
use tokio::sync::mpsc;

const EVENT_BUFFER: usize = 100;

#[derive(Debug, Clone)]
pub enum AggregateData {
    Stats(StatsSummary),
    Hourly(Vec<HourlyBucket>),
    Borough(Vec<BoroughBucket>),
    Daily(Vec<DailyBucket>),
}

/// The session snapshot a trip-listing request was issued under.
#[derive(Debug, Clone)]
pub struct TripRequest {
    pub generation: u64,
    pub page: u32,
    pub filters: FilterState,
}

/// Completion of a spawned fetch, delivered back to the controller.
#[derive(Debug)]
pub enum DashboardEvent {
    Aggregate {
        generation: u64,
        region: Region,
        result: Result<AggregateData, GatewayError>,
    },
    Trips {
        request: TripRequest,
        result: Result<TripPage, GatewayError>,
    },
    /// Every aggregate fetch of one refresh has finished.
    Settled {
        generation: u64,
        state: RefreshState,
    },
    Boroughs(Result<Vec<String>, GatewayError>),
}

/// Owns the session and drives the view.
///
/// Fetches run as spawned tasks and report back over a channel; the
/// controller applies those reports one at a time, so session state is only
/// ever touched from here. Reports tagged with an older generation are
/// dropped on arrival.
pub struct DashboardController<V> {
    api: TaxiApi,
    view: V,
    session: Session,
    tx: mpsc::Sender<DashboardEvent>,
    rx: mpsc::Receiver<DashboardEvent>,
    outstanding: usize,
}

impl<V: DashboardView> DashboardController<V> {
    pub fn new(api: TaxiApi, view: V, filters: FilterState) -> Self {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        Self {
            api,
            view,
            session: Session::new(filters),
            tx,
            rx,
            outstanding: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Probe the backend, then kick off the first refresh and the borough
    /// list. A failed probe is fatal: the user is alerted and nothing else
    /// is loaded.
    pub async fn startup(&mut self) -> Result<(), DashboardError> {
        match self.api.health().await {
            Ok(health) => tracing::info!("Health: {}", health),
            Err(source) => {
                let err = DashboardError::HealthCheck(source);
                tracing::error!("{}", err);
                self.view.alert(&format!("Backend error: {err}"));
                return Err(err);
            }
        }

        self.refresh();
        self.load_boroughs();
        Ok(())
    }

    pub fn load_boroughs(&mut self) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.outstanding += 1;

        tokio::spawn(async move {
            let result = api.boroughs().await;
            let _ = tx.send(DashboardEvent::Boroughs(result)).await;
        });
    }

    /// Re-render the borough choices already loaded.
    pub fn show_borough_options(&mut self) {
        self.view.show_borough_options(self.session.boroughs());
    }

    /// Reload every aggregate region and the current listing page for the
    /// current filters.
    pub fn refresh(&mut self) {
        let generation = self.session.generation();
        let filters = self.session.filters().clone();
        tracing::debug!("Refreshing dashboard for {} (generation {})", filters, generation);

        self.session.set_refresh_state(RefreshState::Loading);
        self.view.show_refresh_state(&RefreshState::Loading);
        for region in Region::AGGREGATES {
            self.view.set_loading(region, true);
        }

        self.outstanding += 1;
        tokio::spawn(fetch_aggregates(
            self.api.clone(),
            filters,
            generation,
            self.tx.clone(),
        ));

        self.load_trips();
    }

    pub fn set_date_range(&mut self, start_date: NaiveDate, end_date: NaiveDate) {
        let filters = self.session.filters().with_date_range(start_date, end_date);
        self.change_filters(filters);
    }

    pub fn set_start_date(&mut self, start_date: NaiveDate) {
        let filters = self.session.filters().with_start_date(start_date);
        self.change_filters(filters);
    }

    pub fn set_end_date(&mut self, end_date: NaiveDate) {
        let filters = self.session.filters().with_end_date(end_date);
        self.change_filters(filters);
    }

    pub fn set_borough(&mut self, borough: BoroughFilter) {
        let filters = self.session.filters().with_borough(borough);
        self.change_filters(filters);
    }

    /// Re-apply the current filters as if they had just been chosen.
    pub fn apply_filters(&mut self) {
        let filters = self.session.filters().clone();
        self.change_filters(filters);
    }

    fn change_filters(&mut self, filters: FilterState) {
        tracing::info!("Filters changed: {}", filters);
        // Cache is cleared before any fetch under the new filters is issued.
        self.session.replace_filters(filters);
        self.refresh();
    }

    /// Move through the listing. Returns `false` when the move is a no-op,
    /// in which case nothing is fetched.
    pub fn navigate(&mut self, movement: PageMove) -> bool {
        let Some(total_pages) = self.session.total_pages() else {
            return false;
        };

        match pagination::navigate(self.session.current_page(), total_pages, movement) {
            Some(page) => {
                self.session.set_current_page(page);
                self.load_trips();
                true
            }
            None => false,
        }
    }

    fn load_trips(&mut self) {
        let page = self.session.current_page();
        self.view.set_loading(Region::Trips, true);

        if let Some(cached) = self.session.cache().get(page, self.session.filters()) {
            tracing::debug!("Loading trips page {} from cache", page);
            let window = PageWindow::new(page, cached.total_pages());
            self.view.show_trips(cached, &window);
            self.view.set_loading(Region::Trips, false);
            self.session.mark_shown(page, window.total_pages);
            return;
        }

        let request = TripRequest {
            generation: self.session.generation(),
            page,
            filters: self.session.filters().clone(),
        };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.outstanding += 1;

        tokio::spawn(async move {
            let result = api.trips(&request.filters, request.page).await;
            let _ = tx.send(DashboardEvent::Trips { request, result }).await;
        });
    }

    /// Whether any spawned fetch has yet to report back.
    pub fn has_outstanding(&self) -> bool {
        self.outstanding > 0
    }

    pub async fn next_event(&mut self) -> Option<DashboardEvent> {
        self.rx.recv().await
    }

    /// Apply events until every spawned fetch has reported back.
    pub async fn settle(&mut self) {
        while self.has_outstanding() {
            match self.rx.recv().await {
                Some(event) => self.apply(event),
                None => break,
            }
        }
    }

    pub fn apply(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Aggregate {
                generation,
                region,
                result,
            } => {
                if !self.session.is_current(generation) {
                    tracing::debug!("Discarding stale {} response (generation {})", region, generation);
                    return;
                }
                match result {
                    Ok(data) => {
                        self.show_aggregate(&data);
                        self.view.set_loading(region, false);
                    }
                    Err(source) => {
                        let err = DashboardError::PartialAggregate { region, source };
                        tracing::error!("{}", err);
                    }
                }
            }
            DashboardEvent::Trips { request, result } => {
                self.outstanding = self.outstanding.saturating_sub(1);
                self.apply_trips(request, result);
            }
            DashboardEvent::Settled { generation, state } => {
                self.outstanding = self.outstanding.saturating_sub(1);
                if !self.session.is_current(generation) {
                    return;
                }
                tracing::info!("Refresh settled: {:?}", state);
                self.view.show_refresh_state(&state);
                self.session.set_refresh_state(state);
            }
            DashboardEvent::Boroughs(result) => {
                self.outstanding = self.outstanding.saturating_sub(1);
                match result {
                    Ok(boroughs) => {
                        self.view.show_borough_options(&boroughs);
                        self.session.set_boroughs(boroughs);
                    }
                    Err(e) => tracing::error!("Failed to load boroughs: {}", e),
                }
            }
        }
    }

    fn show_aggregate(&mut self, data: &AggregateData) {
        match data {
            AggregateData::Stats(stats) => self.view.show_stats(stats),
            AggregateData::Hourly(buckets) => self.view.show_hourly(buckets),
            AggregateData::Borough(buckets) => self.view.show_borough_patterns(buckets),
            AggregateData::Daily(buckets) => self.view.show_daily(buckets),
        }
    }

    fn apply_trips(&mut self, request: TripRequest, result: Result<TripPage, GatewayError>) {
        if !self.session.is_current(request.generation) {
            tracing::debug!(
                "Discarding stale trips page {} (generation {})",
                request.page,
                request.generation
            );
            return;
        }
        let on_screen = request.page == self.session.current_page();

        match result {
            Ok(trip_page) => {
                let page = request.page;
                let cached = self.session.cache_mut().put(page, request.filters, trip_page);
                let total_pages = cached.total_pages();
                if !on_screen {
                    // The user has already moved on; keep the page for later.
                    return;
                }
                let window = PageWindow::new(page, total_pages);
                self.view.show_trips(cached, &window);
                self.view.set_loading(Region::Trips, false);
                self.session.mark_shown(page, total_pages);
            }
            Err(source) => {
                let err = DashboardError::TripListing {
                    page: request.page,
                    source,
                };
                tracing::error!("Error loading trips: {}", err);
                if on_screen {
                    if let Some(shown) = self.session.shown_page() {
                        self.session.set_current_page(shown);
                    }
                    self.view.set_loading(Region::Trips, false);
                }
            }
        }
    }
}

/// Fetch the stats summary, then the three chart aggregates concurrently.
/// Each result is reported as soon as it arrives; a failure never stops the
/// other fetches. Ends with a `Settled` report naming the failures.
async fn fetch_aggregates(
    api: TaxiApi,
    filters: FilterState,
    generation: u64,
    tx: mpsc::Sender<DashboardEvent>,
) {
    let mut failed = Vec::new();

    let stats = api.stats(&filters).await.map(AggregateData::Stats);
    if !report(&tx, generation, Region::Stats, stats).await {
        failed.push(Region::Stats);
    }

    let (hourly_ok, borough_ok, daily_ok) = futures::join!(
        async {
            let result = api.hourly(&filters).await.map(AggregateData::Hourly);
            report(&tx, generation, Region::Hourly, result).await
        },
        async {
            let result = api.borough_patterns(&filters).await.map(AggregateData::Borough);
            report(&tx, generation, Region::Borough, result).await
        },
        async {
            let result = api.daily_patterns(&filters).await.map(AggregateData::Daily);
            report(&tx, generation, Region::Daily, result).await
        },
    );

    for (region, ok) in [
        (Region::Hourly, hourly_ok),
        (Region::Borough, borough_ok),
        (Region::Daily, daily_ok),
    ] {
        if !ok {
            failed.push(region);
        }
    }

    let state = RefreshState::settled(failed);
    let _ = tx.send(DashboardEvent::Settled { generation, state }).await;
}

async fn report(
    tx: &mpsc::Sender<DashboardEvent>,
    generation: u64,
    region: Region,
    result: Result<AggregateData, GatewayError>,
) -> bool {
    let ok = result.is_ok();
    let _ = tx
        .send(DashboardEvent::Aggregate {
            generation,
            region,
            result,
        })
        .await;
    ok
}

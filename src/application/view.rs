// View trait - the rendering surface the controller drives, implemented by presentation
use crate::domain::aggregates::{BoroughBucket, DailyBucket, HourlyBucket, StatsSummary};
use crate::domain::dashboard::{RefreshState, Region};
use crate::domain::pagination::PageWindow;
use crate::domain::trips::TripPage;

/// Receives render calls from the controller. Each method writes only to
/// its own region, so calls for different regions may arrive in any order.
pub trait DashboardView {
    /// Toggle the loading indicator of one region.
    fn set_loading(&mut self, region: Region, loading: bool);

    fn show_stats(&mut self, stats: &StatsSummary);

    fn show_hourly(&mut self, buckets: &[HourlyBucket]);

    fn show_borough_patterns(&mut self, buckets: &[BoroughBucket]);

    fn show_daily(&mut self, buckets: &[DailyBucket]);

    /// Replace the trip table and its pagination controls.
    fn show_trips(&mut self, page: &TripPage, window: &PageWindow);

    fn show_borough_options(&mut self, boroughs: &[String]);

    fn show_refresh_state(&mut self, state: &RefreshState);

    /// Informational line outside any region (help text, no-op feedback).
    fn notice(&mut self, message: &str);

    /// Blocking, user-facing error message.
    fn alert(&mut self, message: &str);
}

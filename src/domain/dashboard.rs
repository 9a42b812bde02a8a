// Dashboard domain model - display regions and refresh lifecycle
use std::fmt;

/// A separately loaded part of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Stats,
    Hourly,
    Borough,
    Daily,
    Trips,
}

impl Region {
    /// Regions filled by the aggregate fetches of a refresh, in issue order.
    pub const AGGREGATES: [Self; 4] = [Self::Stats, Self::Hourly, Self::Borough, Self::Daily];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Stats => "Summary",
            Self::Hourly => "Trips by Hour",
            Self::Borough => "Trips by Borough",
            Self::Daily => "Daily Trend",
            Self::Trips => "Trips",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the most recent refresh cycle stands.
///
/// `Idle -> Loading -> {Success, PartialSuccess}`. Only a new refresh leaves a
/// terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RefreshState {
    #[default]
    Idle,
    Loading,
    Success,
    PartialSuccess { failed: Vec<Region> },
}

impl RefreshState {
    /// Terminal state for a cycle whose aggregate fetches failed for `failed`.
    pub fn settled(failed: Vec<Region>) -> Self {
        if failed.is_empty() {
            Self::Success
        } else {
            Self::PartialSuccess { failed }
        }
    }
}

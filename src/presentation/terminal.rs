// Terminal view - plain-text rendering of the dashboard regions
use crate::domain::aggregates::{BoroughBucket, DailyBucket, HourlyBucket, StatsSummary};
use crate::domain::dashboard::{RefreshState, Region};
use crate::domain::filters::ALL_BOROUGHS_LABEL;
use crate::domain::pagination::{PageWindow, PaginationToken};
use crate::domain::trips::TripPage;
use crate::presentation::charts::{self, ChartData, ChartKind};
use crate::application::view::DashboardView;
use std::fmt::Write as _;
use std::io::Write;

const BAR_WIDTH: u64 = 40;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes each region as a block of text as soon as it is rendered.
pub struct TerminalView<W> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> DashboardView for TerminalView<W> {
    fn set_loading(&mut self, region: Region, loading: bool) {
        if loading {
            self.emit(&format!("... loading {region}\n"));
        }
    }

    fn show_stats(&mut self, stats: &StatsSummary) {
        self.emit(&render_stats(stats));
    }

    fn show_hourly(&mut self, buckets: &[HourlyBucket]) {
        self.emit(&render_chart(&charts::hourly_chart(buckets)));
    }

    fn show_borough_patterns(&mut self, buckets: &[BoroughBucket]) {
        self.emit(&render_chart(&charts::borough_chart(buckets)));
    }

    fn show_daily(&mut self, buckets: &[DailyBucket]) {
        self.emit(&render_chart(&charts::daily_chart(buckets)));
    }

    fn show_trips(&mut self, page: &TripPage, window: &PageWindow) {
        self.emit(&render_trips(page, window));
    }

    fn show_borough_options(&mut self, boroughs: &[String]) {
        let mut options = vec![ALL_BOROUGHS_LABEL];
        options.extend(boroughs.iter().map(String::as_str));
        self.emit(&format!("Boroughs: {}\n", options.join(", ")));
    }

    fn show_refresh_state(&mut self, state: &RefreshState) {
        let line = match state {
            RefreshState::Idle | RefreshState::Loading => return,
            RefreshState::Success => "Dashboard up to date".to_string(),
            RefreshState::PartialSuccess { failed } => {
                let names: Vec<&str> = failed.iter().map(|r| r.label()).collect();
                format!("Dashboard partially loaded; unavailable: {}", names.join(", "))
            }
        };
        self.emit(&format!("{line}\n"));
    }

    fn notice(&mut self, message: &str) {
        self.emit(&format!("{message}\n"));
    }

    fn alert(&mut self, message: &str) {
        self.emit(&format!("!! {message}\n!! Check the log output for details.\n"));
    }
}

pub fn render_stats(stats: &StatsSummary) -> String {
    format!(
        "== {} ==\nTotal trips:  {}\nRevenue:      ${}\nAvg speed:    {} mph\nAvg distance: {} mi (avg)\n",
        Region::Stats,
        group_thousands(stats.total_trips),
        format_amount(stats.revenue),
        stats.avg_speed,
        stats.avg_distance
    )
}

pub fn render_chart(chart: &ChartData) -> String {
    let mut out = format!("== {} ==\n", chart.title);
    if chart.values.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let label_width = chart.labels.iter().map(String::len).max().unwrap_or(0);
    match chart.kind {
        ChartKind::Bar | ChartKind::Line => {
            let max = chart.max_value().max(1);
            let mark = if chart.kind == ChartKind::Bar { '#' } else { '*' };
            for (label, value) in chart.points() {
                let width = usize::try_from(value * BAR_WIDTH / max).unwrap_or(0);
                let _ = writeln!(
                    out,
                    "{label:>label_width$} | {} {}",
                    mark.to_string().repeat(width),
                    group_thousands(value)
                );
            }
        }
        ChartKind::Doughnut => {
            let total = chart.total().max(1);
            for (label, value) in chart.points() {
                let share = value as f64 * 100.0 / total as f64;
                let _ = writeln!(
                    out,
                    "{label:<label_width$}  {:>10}  {share:5.1}%",
                    group_thousands(value)
                );
            }
        }
    }
    out
}

pub fn render_trips(page: &TripPage, window: &PageWindow) -> String {
    let mut out = format!("== {} ==\n", Region::Trips);
    let _ = writeln!(
        out,
        "{:<12} {:<19} {:<19} {:>10} {:>10}",
        "Trip ID", "Pickup", "Dropoff", "Distance", "Amount"
    );
    for record in &page.records {
        let _ = writeln!(
            out,
            "{:<12} {:<19} {:<19} {:>10} {:>10}",
            record.id,
            record.pickup_time.format(TIME_FORMAT).to_string(),
            record.dropoff_time.format(TIME_FORMAT).to_string(),
            format!("{:.2} mi", record.distance_miles),
            format!("${:.2}", record.fare_amount)
        );
    }
    out.push_str(&render_pagination(window, page.total_count));
    out
}

/// One line of pagination controls; the current page is bracketed and
/// disabled arrows are blanked.
pub fn render_pagination(window: &PageWindow, total_count: u64) -> String {
    let mut parts = vec![if window.has_prev() { "<" } else { " " }.to_string()];
    parts.extend(window.tokens.iter().map(|token| match token {
        PaginationToken::Page(page) if *page == window.current_page => format!("[{page}]"),
        other => other.to_string(),
    }));
    parts.push(if window.has_next() { ">" } else { " " }.to_string());

    format!(
        "{}   Total: {} records\n",
        parts.join(" "),
        group_thousands(total_count)
    )
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Money with grouped thousands and two decimals.
fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}{}.{:02}", group_thousands(cents / 100), cents % 100)
}

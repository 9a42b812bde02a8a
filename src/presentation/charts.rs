// Chart models - aggregate buckets shaped into labelled series
use crate::domain::aggregates::{BoroughBucket, DailyBucket, HourlyBucket};

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartData {
    pub fn new(title: String, kind: ChartKind, labels: Vec<String>, values: Vec<u64>) -> Self {
        Self {
            title,
            kind,
            labels,
            values,
        }
    }

    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

pub fn hourly_chart(buckets: &[HourlyBucket]) -> ChartData {
    ChartData::new(
        "Trips by Hour".to_string(),
        ChartKind::Bar,
        buckets.iter().map(|b| format!("{}:00", b.hour)).collect(),
        buckets.iter().map(|b| b.count).collect(),
    )
}

pub fn borough_chart(buckets: &[BoroughBucket]) -> ChartData {
    ChartData::new(
        "Trips by Borough".to_string(),
        ChartKind::Doughnut,
        buckets.iter().map(|b| b.borough.clone()).collect(),
        buckets.iter().map(|b| b.count).collect(),
    )
}

/// Daily trend, labelled like "Jan 5".
pub fn daily_chart(buckets: &[DailyBucket]) -> ChartData {
    ChartData::new(
        "All Trip Trend".to_string(),
        ChartKind::Line,
        buckets
            .iter()
            .map(|b| b.date.format("%b %-d").to_string())
            .collect(),
        buckets.iter().map(|b| b.count).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_hourly_labels() {
        let chart = hourly_chart(&[
            HourlyBucket { hour: 0, count: 4 },
            HourlyBucket { hour: 17, count: 9 },
        ]);
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.labels, vec!["0:00", "17:00"]);
        assert_eq!(chart.max_value(), 9);
        assert_eq!(chart.total(), 13);
    }

    #[test]
    fn test_daily_labels() {
        let chart = daily_chart(&[DailyBucket {
            date: NaiveDate::from_ymd_opt(2019, 1, 5).unwrap(),
            count: 10,
        }]);
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.labels, vec!["Jan 5"]);
    }

    #[test]
    fn test_empty_chart() {
        let chart = borough_chart(&[]);
        assert_eq!(chart.max_value(), 0);
        assert_eq!(chart.points().count(), 0);
    }
}

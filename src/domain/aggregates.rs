// Aggregate statistics returned by the dashboard endpoints
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Headline metrics for the filtered range (`/stats`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsSummary {
    pub total_trips: u64,
    pub revenue: f64,
    pub avg_speed: f64,
    pub avg_distance: f64,
}

/// Trip count for one hour of the day (`/hourly`). `hour` is 0..=23.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyBucket {
    pub hour: u8,
    pub count: u64,
}

/// Trip count for one borough (`/patterns-borough`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoroughBucket {
    #[serde(deserialize_with = "deserialize_borough")]
    pub borough: String,
    pub count: u64,
}

/// Trip count for one calendar day (`/patterns-daily`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub count: u64,
}

pub const UNKNOWN_BOROUGH: &str = "Unknown";

// Trips outside the zone lookup come back with a null borough.
fn deserialize_borough<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(|| UNKNOWN_BOROUGH.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borough_bucket_null_name() {
        let bucket: BoroughBucket =
            serde_json::from_value(serde_json::json!({ "borough": null, "count": 3 })).unwrap();
        assert_eq!(bucket.borough, UNKNOWN_BOROUGH);
        assert_eq!(bucket.count, 3);
    }

    #[test]
    fn test_daily_bucket_date() {
        let bucket: DailyBucket =
            serde_json::from_value(serde_json::json!({ "date": "2019-01-05", "count": 12 }))
                .unwrap();
        assert_eq!(bucket.date, NaiveDate::from_ymd_opt(2019, 1, 5).unwrap());
    }
}

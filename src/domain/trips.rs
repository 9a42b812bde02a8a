// Trip listing domain models
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Records per trip-listing page. Fixed by the server.
pub const PAGE_SIZE: u64 = 50;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TripRecord {
    #[serde(rename = "trip_id", deserialize_with = "deserialize_trip_id")]
    pub id: String,
    #[serde(rename = "pickup", deserialize_with = "deserialize_instant")]
    pub pickup_time: NaiveDateTime,
    #[serde(rename = "dropoff", deserialize_with = "deserialize_instant")]
    pub dropoff_time: NaiveDateTime,
    #[serde(rename = "distance")]
    pub distance_miles: f64,
    #[serde(rename = "amount")]
    pub fare_amount: f64,
}

/// Body of `/trips`.
#[derive(Debug, Clone, Deserialize)]
pub struct TripsPayload {
    pub trips: Vec<TripRecord>,
    pub total: u64,
}

/// One page of the filtered trip listing.
///
/// `total_count` is the size of the whole filtered result set, not of this page.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPage {
    pub records: Vec<TripRecord>,
    pub total_count: u64,
}

impl TripPage {
    pub fn new(records: Vec<TripRecord>, total_count: u64) -> Self {
        Self {
            records,
            total_count,
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count)
    }
}

/// Number of listing pages needed for `total_count` records.
pub fn total_pages(total_count: u64) -> u32 {
    u32::try_from(total_count.div_ceil(PAGE_SIZE)).unwrap_or(u32::MAX)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTripId {
    Text(String),
    Number(i64),
}

fn deserialize_trip_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawTripId::deserialize(deserializer)? {
        RawTripId::Text(id) => id,
        RawTripId::Number(id) => id.to_string(),
    })
}

fn deserialize_instant<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_instant(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised timestamp: {raw}")))
}

/// Parse a timestamp as the API emits it: SQL-style (`2019-01-01 00:46:40`,
/// optionally with fractional seconds or a `T` separator), RFC 3339, or the
/// RFC 2822 form Flask uses when it serialises datetimes.
pub fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|t| t.naive_utc()))
        .or_else(|| DateTime::parse_from_rfc2822(raw).ok().map(|t| t.naive_utc()))
}

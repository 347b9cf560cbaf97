use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Local storage key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// One row of a search result: arrivals from `country`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightCountEntry {
    pub country: String,
    #[serde(rename = "flightCount")]
    pub flight_count: u64,
}

/// Server order is preserved. An empty set is a real answer, not "not searched yet".
pub type ResultSet = Vec<FlightCountEntry>;

/// Country used when the backend could not resolve an origin country.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalSummary {
    #[serde(default = "unknown_country", deserialize_with = "country_or_unknown")]
    pub country: String,
    pub count: u64,
}

fn unknown_country() -> String {
    UNKNOWN_COUNTRY.to_string()
}

fn country_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let country = Option::<String>::deserialize(deserializer)?;
    Ok(country
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(unknown_country))
}

impl From<ArrivalSummary> for FlightCountEntry {
    fn from(summary: ArrivalSummary) -> Self {
        Self {
            country: summary.country,
            flight_count: summary.count,
        }
    }
}

/// A single arrival as listed by the lookup endpoint. Upstream data has gaps, so every
/// field may be null or missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalRecord {
    pub airline: Option<String>,
    pub flight_number: Option<String>,
    pub origin: Option<String>,
    pub origin_country: Option<String>,
    /// Unix seconds.
    pub scheduled_arrival: Option<i64>,
}

impl ArrivalRecord {
    pub fn scheduled_arrival_utc(&self) -> Option<DateTime<Utc>> {
        self.scheduled_arrival
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupRequest {
    pub airport_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub summary: Option<Vec<ArrivalSummary>>,
    #[serde(default, deserialize_with = "skip_malformed_arrivals")]
    pub arrivals: Vec<ArrivalRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The arrivals listing is supplementary; entries that do not fit are dropped so they
/// cannot take the summary down with them.
fn skip_malformed_arrivals<'de, D>(deserializer: D) -> Result<Vec<ArrivalRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = raw.len();

    let arrivals: Vec<ArrivalRecord> = raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if arrivals.len() < total {
        tracing::warn!(
            "⚠️ Skipped {} malformed arrival entries",
            total - arrivals.len()
        );
    }
    Ok(arrivals)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Warning,
    Info,
    Success,
}

impl NotificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Error => "Error",
            NotificationKind::Warning => "Warning",
            NotificationKind::Info => "Info",
            NotificationKind::Success => "Success",
        }
    }
}

/// User-facing alert raised outside the normal render path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub duration: Duration,
}

impl Notification {
    pub const DEFAULT_DURATION: Duration = Duration::from_secs(5);

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error".to_string(),
            message: message.into(),
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flight_count_entry_uses_camel_case_on_the_wire() {
        let entries: ResultSet =
            serde_json::from_value(json!([{"country": "VN", "flightCount": 5}])).unwrap();
        assert_eq!(
            entries,
            vec![FlightCountEntry {
                country: "VN".to_string(),
                flight_count: 5
            }]
        );
    }

    #[test]
    fn test_negative_counts_are_rejected() {
        let parsed: Result<ResultSet, _> =
            serde_json::from_value(json!([{"country": "VN", "flightCount": -1}]));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_lookup_response_without_summary() {
        let parsed: LookupResponse = serde_json::from_value(json!({"error": "Invalid input"})).unwrap();
        assert!(parsed.summary.is_none());
        assert_eq!(parsed.error.as_deref(), Some("Invalid input"));
        assert!(parsed.arrivals.is_empty());
    }

    #[test]
    fn test_arrival_time_is_utc() {
        let record = ArrivalRecord {
            airline: Some("Vietnam Airlines".to_string()),
            flight_number: Some("VN300".to_string()),
            origin: Some("Tokyo Narita".to_string()),
            origin_country: Some("Japan".to_string()),
            scheduled_arrival: Some(1_700_000_000),
        };
        let when = record.scheduled_arrival_utc().unwrap();
        assert_eq!(when.to_rfc3339(), "2023-11-14T22:13:20+00:00");
        assert_eq!(ArrivalRecord::default().scheduled_arrival_utc(), None);
    }

    #[test]
    fn test_arrivals_with_gaps_are_kept_and_garbage_is_dropped() {
        let parsed: LookupResponse = serde_json::from_value(json!({
            "summary": [{"country": "Japan", "count": 2}],
            "arrivals": [
                {"airline": "ANA", "flight_number": null, "origin": "Haneda",
                 "origin_country": "Japan", "scheduled_arrival": 1_700_000_000},
                {"airline": "JAL", "scheduled_arrival": "soon"},
                "not an object"
            ]
        }))
        .unwrap();

        assert_eq!(parsed.summary.map(|s| s.len()), Some(1));
        assert_eq!(parsed.arrivals.len(), 1);
        assert_eq!(parsed.arrivals[0].airline.as_deref(), Some("ANA"));
        assert_eq!(parsed.arrivals[0].flight_number, None);
    }

    #[test]
    fn test_null_arrivals_list_is_empty() {
        let parsed: LookupResponse =
            serde_json::from_value(json!({"summary": [], "arrivals": null})).unwrap();
        assert!(parsed.arrivals.is_empty());
    }

    #[test]
    fn test_summary_without_country_is_unknown() {
        let parsed: Vec<ArrivalSummary> = serde_json::from_value(json!([
            {"country": null, "count": 3},
            {"count": 1},
            {"country": "Japan", "count": 2}
        ]))
        .unwrap();

        let countries: Vec<&str> = parsed.iter().map(|s| s.country.as_str()).collect();
        assert_eq!(countries, vec![UNKNOWN_COUNTRY, UNKNOWN_COUNTRY, "Japan"]);
    }

    #[test]
    fn test_error_notification_shape() {
        let notification = Notification::error("boom", Notification::DEFAULT_DURATION);
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.title, "Error");
        assert_eq!(notification.duration, Duration::from_secs(5));
    }
}

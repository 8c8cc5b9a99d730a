use chrono::{DateTime, Utc};
use serde::Serialize;

/// A predicted observation window over the ground station.
///
/// Field names and rounding are part of the output contract consumed by
/// downstream tooling; do not rename without versioning the JSON schema.
#[derive(Debug, Clone, Serialize)]
pub struct Pass {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_elevation: f64,
    pub max_elevation_time: DateTime<Utc>,
    pub duration_minutes: f64,
}

/// Time remaining until the first pass of a prediction batch.
#[derive(Debug, Clone, Serialize)]
pub struct NextPass {
    pub time_to_next_pass_minutes: f64,
    pub next_pass: Pass,
}

#[cfg(test)]
mod test {
    use super::Pass;
    use chrono::{TimeZone, Utc};

    #[test]
    fn pass_serializes_with_contract_fields() {
        let pass = Pass {
            start_time: Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 8, 6, 12, 6, 0).unwrap(),
            max_elevation: 45.68,
            max_elevation_time: Utc.with_ymd_and_hms(2026, 8, 6, 12, 3, 0).unwrap(),
            duration_minutes: 6.0,
        };

        let value = serde_json::to_value(&pass).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "duration_minutes",
                "end_time",
                "max_elevation",
                "max_elevation_time",
                "start_time",
            ]
        );

        assert_eq!(value["start_time"], "2026-08-06T12:00:00Z");
        assert_eq!(value["end_time"], "2026-08-06T12:06:00Z");
        assert_eq!(value["max_elevation_time"], "2026-08-06T12:03:00Z");
        assert_eq!(value["max_elevation"], 45.68);
        assert_eq!(value["duration_minutes"], 6.0);
    }
}

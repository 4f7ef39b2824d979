use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::warn;

/// Date-time layout the manager expects in request bodies.
const HINEMOS_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Convert an ISO-8601 timestamp to `yyyy-MM-dd HH:mm:ss.SSS`.
///
/// The wall-clock time is kept as written; an offset or `Z` suffix is
/// accepted but not applied. Values that cannot be parsed are returned
/// unchanged.
pub fn to_hinemos_datetime(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match parse_iso_datetime(raw) {
        Some(dt) => dt.format(HINEMOS_DATETIME_FORMAT).to_string(),
        None => {
            warn!(value = raw, "Could not convert date-time, sending as is");
            raw.to_string()
        }
    }
}

fn parse_iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    // rfc3339 requires 'T'; accept a space separator with an offset too
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.naive_local());
    }
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Rewrite the named string fields of a JSON object with `to_hinemos_datetime`.
/// Returns a new value; non-objects and non-string fields pass through.
pub fn normalize_datetime_fields(body: &Value, fields: &[&str]) -> Value {
    let mut converted = body.clone();
    if let Some(obj) = converted.as_object_mut() {
        for field in fields {
            if let Some(Value::String(s)) = obj.get(*field) {
                let formatted = to_hinemos_datetime(s);
                obj.insert((*field).to_string(), Value::String(formatted));
            }
        }
    }
    converted
}

/// Join identifiers into the comma-separated form used by delete endpoints.
pub fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_hinemos_datetime() {
        assert_eq!(
            to_hinemos_datetime("2024-01-01T00:00:00.000Z"),
            "2024-01-01 00:00:00.000"
        );
        assert_eq!(
            to_hinemos_datetime("2024-12-31T23:59:59.999Z"),
            "2024-12-31 23:59:59.999"
        );
        assert_eq!(
            to_hinemos_datetime("2024-06-15T09:30:00+09:00"),
            "2024-06-15 09:30:00.000"
        );
        assert_eq!(
            to_hinemos_datetime("2024-06-15T09:30:00.123456"),
            "2024-06-15 09:30:00.123"
        );
        assert_eq!(to_hinemos_datetime("2024-06-15"), "2024-06-15 00:00:00.000");
        // Already in the target layout
        assert_eq!(
            to_hinemos_datetime("2024-06-15 09:30:00.000"),
            "2024-06-15 09:30:00.000"
        );
    }

    #[test]
    fn test_unparsable_passes_through() {
        assert_eq!(to_hinemos_datetime("next tuesday"), "next tuesday");
        assert_eq!(to_hinemos_datetime(""), "");
    }

    #[test]
    fn test_normalize_datetime_fields() {
        let body = json!({
            "calendarId": "CAL1",
            "validTimeFrom": "2024-01-01T00:00:00.000Z",
            "validTimeTo": 12345
        });
        let converted = normalize_datetime_fields(&body, &["validTimeFrom", "validTimeTo"]);
        assert_eq!(converted["validTimeFrom"], "2024-01-01 00:00:00.000");
        assert_eq!(converted["validTimeTo"], 12345);
        assert_eq!(converted["calendarId"], "CAL1");
        // Input untouched
        assert_eq!(body["validTimeFrom"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&["NODE001", "NODE002"]), "NODE001,NODE002");
        assert_eq!(join_ids(&["ONE"]), "ONE");
        assert_eq!(join_ids::<&str>(&[]), "");
    }
}

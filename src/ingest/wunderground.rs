/// Weather Underground API client: URL construction + response extraction
///
/// Handles the two endpoint shapes used by the collector:
///   geolookup  - nested list of nearby personal weather stations
///   conditions - one "current_observation" object per station
///
/// Query shape: `<base>/<api_key>/<operation>/q/<spec>.json`
///
/// The provider delivers loosely-typed JSON: numbers arrive as numbers or
/// as strings, some fields carry unit suffixes ("54%", "120 ft"), and
/// precipitation uses dash/999 placeholders for "no reading". Extraction
/// here is explicit field-by-field so every failure names the offending
/// field. See `fixtures.rs` for annotated examples of both payloads.

use crate::model::{
    escape_quotes, ExtractError, MalformedFieldError, Observation, SchemaError, StationCandidate,
};
use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the geolookup URL for a location spec (lat/lon pair, ZIP, or any
/// other form the provider accepts).
pub fn geolookup_url(base_url: &str, api_key: &str, location: &str) -> String {
    format!(
        "{}/{}/geolookup/q/{}.json",
        base_url,
        api_key,
        urlencoding::encode(location)
    )
}

/// Builds the current-conditions URL for a personal weather station.
pub fn conditions_url(base_url: &str, api_key: &str, station_id: &str) -> String {
    format!("{}/{}/conditions/q/pws:{}.json", base_url, api_key, station_id)
}

// ---------------------------------------------------------------------------
// JSON navigation helpers
// ---------------------------------------------------------------------------

/// Walks a dotted path of object keys, failing with the full path on the
/// first missing step.
fn descend<'a>(root: &'a Value, path: &str) -> Result<&'a Value, SchemaError> {
    let mut current = root;
    for key in path.split('.') {
        current = current.get(key).ok_or_else(|| SchemaError {
            path: path.to_string(),
        })?;
    }
    Ok(current)
}

fn field<'a>(obj: &'a Value, context: &str, key: &str) -> Result<&'a Value, SchemaError> {
    obj.get(key).ok_or_else(|| SchemaError {
        path: format!("{}.{}", context, key),
    })
}

/// Coerces a string or number value to String. Other JSON types are a
/// malformed field, not a schema problem - the key was present.
fn string_value(name: &str, value: &Value) -> Result<String, MalformedFieldError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(MalformedFieldError::new(
            name,
            format!("expected text, got {}", other),
        )),
    }
}

/// Parses a number delivered as either a JSON number or a numeric string
/// (whitespace-trimmed).
fn float_value(name: &str, value: &Value) -> Result<f64, MalformedFieldError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| MalformedFieldError::new(name, "not representable as f64")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| MalformedFieldError::new(name, format!("'{}': {}", s, e))),
        other => Err(MalformedFieldError::new(
            name,
            format!("expected number, got {}", other),
        )),
    }
}

// ---------------------------------------------------------------------------
// Unit/field normalization
// ---------------------------------------------------------------------------

/// Parses an RFC-822-style timestamp ("Mon, 01 Jan 2024 08:00:00 -0800")
/// and keeps the wall-clock value. The numeric offset must be present for
/// the parse to succeed but is not applied - no timezone conversion.
pub fn normalize_timestamp(raw: &str) -> Result<NaiveDateTime, MalformedFieldError> {
    DateTime::parse_from_rfc2822(raw.trim())
        .map(|dt| dt.naive_local())
        .map_err(|e| {
            MalformedFieldError::new("observation_time_rfc822", format!("'{}': {}", raw, e))
        })
}

/// Strips one trailing '%' and parses the rest as an integer percentage.
/// Any other formatting is a hard failure - the provider has only ever
/// sent the single fixed suffix.
pub fn normalize_humidity(raw: &str) -> Result<i16, MalformedFieldError> {
    let stripped = raw.strip_suffix('%').unwrap_or(raw).trim();
    stripped.parse::<i16>().map_err(|_| {
        MalformedFieldError::new(
            "relative_humidity",
            format!("'{}' not numeric after stripping '%'", raw),
        )
    })
}

/// Normalizes the precipitation field, collapsing all of the provider's
/// "no reading" spellings to 0.0:
///   "--"      - dash-only placeholder
///   "999"     - positive sentinel
///   "-999.00" - negative sentinel (the minus strip folds it into 999)
pub fn normalize_precip(raw: &str) -> Result<f64, MalformedFieldError> {
    let stripped: String = raw.chars().filter(|c| *c != '-').collect();
    let stripped = stripped.trim();

    if stripped.is_empty() {
        // Dash-only input: nothing left after stripping means no reading
        return Ok(0.0);
    }

    let value = stripped.parse::<f64>().map_err(|e| {
        MalformedFieldError::new("precip_today_in", format!("'{}': {}", raw, e))
    })?;

    if value == 999.0 {
        Ok(0.0)
    } else {
        Ok(value)
    }
}

/// Strips one trailing "ft" token and parses the rest as an integer number
/// of feet.
pub fn normalize_elevation(raw: &str) -> Result<i32, MalformedFieldError> {
    let stripped = raw.trim().strip_suffix("ft").unwrap_or(raw).trim();
    stripped.parse::<i32>().map_err(|_| {
        MalformedFieldError::new(
            "elevation",
            format!("'{}' not numeric after stripping 'ft'", raw),
        )
    })
}

// ---------------------------------------------------------------------------
// Response extraction
// ---------------------------------------------------------------------------

/// Extracts the nearby-station candidate list from a geolookup response.
///
/// # Errors
/// - `ExtractError::Schema` - the nested list is missing or not an array.
/// - `ExtractError::Field` - a station entry has an unparsable field.
pub fn extract_nearby_stations(response: &Value) -> Result<Vec<StationCandidate>, ExtractError> {
    const STATION_LIST: &str = "location.nearby_weather_stations.pws.station";

    let list = descend(response, STATION_LIST)?
        .as_array()
        .ok_or_else(|| SchemaError {
            path: STATION_LIST.to_string(),
        })?;

    let mut candidates = Vec::with_capacity(list.len());
    for entry in list {
        candidates.push(extract_candidate(entry)?);
    }
    Ok(candidates)
}

fn extract_candidate(entry: &Value) -> Result<StationCandidate, ExtractError> {
    const CONTEXT: &str = "nearby_weather_stations.pws.station[]";

    Ok(StationCandidate {
        id: string_value("id", field(entry, CONTEXT, "id")?)?,
        distance_km: float_value("distance_km", field(entry, CONTEXT, "distance_km")?)?,
        latitude: float_value("lat", field(entry, CONTEXT, "lat")?)?,
        longitude: float_value("lon", field(entry, CONTEXT, "lon")?)?,
        city: escape_quotes(&string_value("city", field(entry, CONTEXT, "city")?)?),
        neighborhood: escape_quotes(&string_value(
            "neighborhood",
            field(entry, CONTEXT, "neighborhood")?,
        )?),
    })
}

/// Extracts and normalizes one observation from a conditions response.
///
/// Text fields destined for storage (weather, city) are escaped here; the
/// report layer unescapes them on the way back out.
pub fn extract_observation(response: &Value) -> Result<Observation, ExtractError> {
    let obs = descend(response, "current_observation")?;
    let location = field(obs, "current_observation", "observation_location")?;
    let display = field(obs, "current_observation", "display_location")?;

    const CTX: &str = "current_observation";
    const LOC: &str = "current_observation.observation_location";
    const DISP: &str = "current_observation.display_location";

    let time_raw = string_value(
        "observation_time_rfc822",
        field(obs, CTX, "observation_time_rfc822")?,
    )?;
    let humidity_raw = string_value(
        "relative_humidity",
        field(obs, CTX, "relative_humidity")?,
    )?;
    let precip_raw = string_value("precip_today_in", field(obs, CTX, "precip_today_in")?)?;
    let elevation_raw = string_value("elevation", field(location, LOC, "elevation")?)?;

    Ok(Observation {
        station_id: string_value("station_id", field(obs, CTX, "station_id")?)?,
        time: normalize_timestamp(&time_raw)?,
        weather: escape_quotes(&string_value("weather", field(obs, CTX, "weather")?)?),
        temp_f: float_value("temp_f", field(obs, CTX, "temp_f")?)?,
        temp_c: float_value("temp_c", field(obs, CTX, "temp_c")?)?,
        relative_humidity: normalize_humidity(&humidity_raw)?,
        uv_index: float_value("UV", field(obs, CTX, "UV")?)?,
        precip_in: normalize_precip(&precip_raw)?,
        pressure_in: float_value("pressure_in", field(obs, CTX, "pressure_in")?)?,
        pressure_mb: float_value("pressure_mb", field(obs, CTX, "pressure_mb")?)?,
        latitude: float_value("latitude", field(location, LOC, "latitude")?)?,
        longitude: float_value("longitude", field(location, LOC, "longitude")?)?,
        elevation: normalize_elevation(&elevation_raw)?,
        city: escape_quotes(&string_value("city", field(location, LOC, "city")?)?),
        zip: string_value("zip", field(display, DISP, "zip")?)?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures;
    use crate::model::ExtractError;

    #[test]
    fn test_geolookup_url_shape() {
        let url = geolookup_url(
            "http://api.wunderground.com/api",
            "abc123",
            "37.392089,-122.083347",
        );
        assert_eq!(
            url,
            "http://api.wunderground.com/api/abc123/geolookup/q/37.392089%2C-122.083347.json"
        );
    }

    #[test]
    fn test_conditions_url_shape() {
        let url = conditions_url("http://api.wunderground.com/api", "abc123", "KCAMOUNT64");
        assert_eq!(
            url,
            "http://api.wunderground.com/api/abc123/conditions/q/pws:KCAMOUNT64.json"
        );
    }

    #[test]
    fn test_normalize_timestamp_drops_offset() {
        let time = normalize_timestamp("Mon, 01 Jan 2024 08:00:00 -0800").expect("valid rfc822");
        assert_eq!(time.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-01 08:00:00");
    }

    #[test]
    fn test_normalize_timestamp_rejects_garbage() {
        let err = normalize_timestamp("yesterday around noon").expect_err("must fail");
        assert_eq!(err.field, "observation_time_rfc822");
    }

    #[test]
    fn test_normalize_humidity() {
        assert_eq!(normalize_humidity("54%").expect("valid"), 54);
        assert_eq!(normalize_humidity("100").expect("valid without suffix"), 100);
    }

    #[test]
    fn test_normalize_humidity_rejects_non_numeric() {
        let err = normalize_humidity("N/A%").expect_err("must fail");
        assert_eq!(err.field, "relative_humidity");
        assert!(err.detail.contains("N/A%"));
    }

    #[test]
    fn test_normalize_precip_sentinels() {
        assert_eq!(normalize_precip("--").expect("dash placeholder"), 0.0);
        assert_eq!(normalize_precip("999").expect("positive sentinel"), 0.0);
        assert_eq!(normalize_precip("-999").expect("negative sentinel"), 0.0);
        assert_eq!(normalize_precip("-999.00").expect("negative sentinel"), 0.0);
        assert_eq!(normalize_precip("0.12").expect("real reading"), 0.12);
        assert_eq!(normalize_precip(" 0.5 ").expect("whitespace"), 0.5);
    }

    #[test]
    fn test_normalize_elevation() {
        assert_eq!(normalize_elevation("120 ft").expect("valid"), 120);
        assert_eq!(normalize_elevation("37").expect("bare number"), 37);
    }

    #[test]
    fn test_normalize_elevation_rejects_other_units() {
        let err = normalize_elevation("36 m").expect_err("meters are not handled");
        assert_eq!(err.field, "elevation");
    }

    #[test]
    fn test_extract_nearby_stations() {
        let response: serde_json::Value =
            serde_json::from_str(fixtures::fixture_geolookup_json()).expect("fixture parses");

        let candidates = extract_nearby_stations(&response).expect("extraction succeeds");
        assert_eq!(candidates.len(), 5);

        let distances: Vec<f64> = candidates.iter().map(|c| c.distance_km).collect();
        assert_eq!(distances, vec![1.0, 5.0, 2.9, 3.0, 10.0]);

        assert_eq!(candidates[0].id, "KCAMOUNT64");
        assert_eq!(candidates[0].city, "Mountain View");
        // Apostrophes are escaped at extraction time
        assert_eq!(candidates[1].neighborhood, "St. Aloysius\\' Green");
    }

    #[test]
    fn test_extract_nearby_stations_missing_list_is_schema_error() {
        let response: serde_json::Value =
            serde_json::from_str(r#"{"location": {"city": "Mountain View"}}"#).expect("parses");

        match extract_nearby_stations(&response) {
            Err(ExtractError::Schema(e)) => {
                assert_eq!(e.path, "location.nearby_weather_stations.pws.station");
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_observation() {
        let response: serde_json::Value =
            serde_json::from_str(fixtures::fixture_conditions_json()).expect("fixture parses");

        let obs = extract_observation(&response).expect("extraction succeeds");
        assert_eq!(obs.station_id, "KCAMOUNT64");
        assert_eq!(
            obs.time.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-01-01 08:00:00"
        );
        assert_eq!(obs.weather, "Partly Cloudy");
        assert_eq!(obs.temp_f, 52.3);
        assert_eq!(obs.temp_c, 11.3);
        assert_eq!(obs.relative_humidity, 54);
        assert_eq!(obs.uv_index, 2.0);
        assert_eq!(obs.precip_in, 0.12);
        assert_eq!(obs.pressure_in, 30.1);
        assert_eq!(obs.pressure_mb, 1019.3);
        assert_eq!(obs.latitude, 37.392234);
        assert_eq!(obs.longitude, -122.083512);
        assert_eq!(obs.elevation, 120);
        assert_eq!(obs.city, "O\\'Brien Corners");
        assert_eq!(obs.zip, "94043");
    }

    #[test]
    fn test_extract_observation_sentinel_precip() {
        let response: serde_json::Value =
            serde_json::from_str(fixtures::fixture_conditions_sentinel_precip_json())
                .expect("fixture parses");

        let obs = extract_observation(&response).expect("extraction succeeds");
        assert_eq!(obs.precip_in, 0.0);
    }

    #[test]
    fn test_extract_observation_malformed_humidity() {
        let response: serde_json::Value =
            serde_json::from_str(fixtures::fixture_conditions_bad_humidity_json())
                .expect("fixture parses");

        match extract_observation(&response) {
            Err(ExtractError::Field(e)) => assert_eq!(e.field, "relative_humidity"),
            other => panic!("expected field error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_observation_missing_envelope_is_schema_error() {
        let response: serde_json::Value =
            serde_json::from_str(r#"{"response": {"version": "0.1"}}"#).expect("parses");

        match extract_observation(&response) {
            Err(ExtractError::Schema(e)) => assert_eq!(e.path, "current_observation"),
            other => panic!("expected schema error, got {:?}", other),
        }
    }
}

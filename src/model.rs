/// Shared data types for the PWS collector
///
/// Domain records flowing from the API extraction layer into the upsert
/// planner, plus the parse-seam error types (SchemaError, MalformedFieldError)
/// and the quote-escaping helpers used for stored text fields.

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Domain records
// ---------------------------------------------------------------------------

/// One entry from the geolookup "nearby stations" list, before filtering.
/// Ephemeral - the distance is only used by the selection step and is not
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StationCandidate {
    pub id: String,
    pub distance_km: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub neighborhood: String,
}

/// Persisted station metadata, one row per physical station. The station
/// identifier is the natural key; text fields are stored with embedded
/// single quotes backslash-escaped (see `escape_quotes`).
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub neighborhood: String,
}

impl From<&StationCandidate> for Station {
    fn from(c: &StationCandidate) -> Self {
        Station {
            id: c.id.clone(),
            latitude: c.latitude,
            longitude: c.longitude,
            city: c.city.clone(),
            neighborhood: c.neighborhood.clone(),
        }
    }
}

/// A station row as read back from the store. Latitude/longitude come back
/// as single-precision REAL values - the width lost on write is what the
/// change detector has to account for.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredStation {
    pub autoid: i32,
    pub id: String,
    pub latitude: f32,
    pub longitude: f32,
    pub city: String,
    pub neighborhood: String,
}

/// One normalized current-conditions reading. Append-only: a new row per
/// fetch per station, never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub station_id: String,
    /// Wall-clock time as reported by the station; the source offset is
    /// validated by the parse and then discarded (no timezone conversion).
    pub time: NaiveDateTime,
    pub weather: String,
    pub temp_f: f64,
    pub temp_c: f64,
    pub relative_humidity: i16,
    pub uv_index: f64,
    pub precip_in: f64,
    pub pressure_in: f64,
    pub pressure_mb: f64,
    /// Observation-location coordinates - distinct from the station's
    /// registered coordinates and never truncation-compared.
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: i32,
    pub city: String,
    pub zip: String,
}

// ---------------------------------------------------------------------------
// Text escaping for stored fields
// ---------------------------------------------------------------------------

/// Backslash-escapes embedded single quotes in a value destined for a text
/// column. Statements bind values as parameters, so this is a storage/report
/// convention (the report layer unescapes on the way out), not an injection
/// defense.
pub fn escape_quotes(raw: &str) -> String {
    raw.replace('\'', "\\'")
}

/// Inverse of `escape_quotes`, applied by the report layer when rendering
/// stored text.
pub fn unescape_quotes(stored: &str) -> String {
    stored.replace("\\'", "'")
}

// ---------------------------------------------------------------------------
// Parse-seam errors
// ---------------------------------------------------------------------------

/// A response was structurally missing an expected shape (object, array, or
/// key). Fatal for that response, non-fatal for the run.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Dotted path to the missing/mistyped element, e.g.
    /// `location.nearby_weather_stations.pws.station`.
    pub path: String,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "response missing expected shape at '{}'", self.path)
    }
}

impl std::error::Error for SchemaError {}

/// A specific field failed unit-stripping or parsing. Fatal for that single
/// record only.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedFieldError {
    pub field: String,
    pub detail: String,
}

impl MalformedFieldError {
    pub fn new(field: &str, detail: impl Into<String>) -> Self {
        MalformedFieldError {
            field: field.to_string(),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for MalformedFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed field '{}': {}", self.field, self.detail)
    }
}

impl std::error::Error for MalformedFieldError {}

/// Everything that can go wrong turning a raw payload into typed records.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    Schema(SchemaError),
    Field(MalformedFieldError),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::Schema(e) => e.fmt(f),
            ExtractError::Field(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Schema(e) => Some(e),
            ExtractError::Field(e) => Some(e),
        }
    }
}

impl From<SchemaError> for ExtractError {
    fn from(e: SchemaError) -> Self {
        ExtractError::Schema(e)
    }
}

impl From<MalformedFieldError> for ExtractError {
    fn from(e: MalformedFieldError) -> Self {
        ExtractError::Field(e)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

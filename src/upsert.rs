/// Change detection + upsert planning
///
/// Pure logic, no I/O. Decides INSERT vs UPDATE vs no-op for station rows
/// and builds the ordered column/value lists the storage gateway binds as
/// statement parameters. Observations are append-only and always get an
/// INSERT list.
///
/// The float comparison here exists because the station table stores
/// coordinates in single-precision REAL columns: a freshly fetched f64 will
/// never bit-compare equal to the value that survived a write/read cycle,
/// so a naive comparison would flag every station as changed on every run
/// and turn the upsert into an unconditional rewrite.

use crate::model::{Observation, Station, StoredStation};
use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Truncation-aware float comparison
// ---------------------------------------------------------------------------

/// Integer-part and fractional-part digit counts of the stored value's
/// shortest decimal representation. The sign is not a digit and is not
/// counted.
fn digit_widths(stored: f32) -> (usize, usize) {
    let repr = stored.abs().to_string();
    match repr.split_once('.') {
        Some((int_part, frac_part)) => (int_part.len(), frac_part.len()),
        None => (repr.len(), 0),
    }
}

/// Total significant-digit width of the stored value (integer digits plus
/// fractional digits).
pub fn stored_digit_width(stored: f32) -> usize {
    let (int_digits, frac_digits) = digit_widths(stored);
    int_digits + frac_digits
}

/// Rounds the fresh value to the stored value's total digit width, which
/// after subtracting the integer digits means rounding to the stored
/// fractional digit count. Half-away-from-zero rounding.
pub fn round_to_stored_width(stored: f32, fresh: f64) -> f64 {
    let (_, frac_digits) = digit_widths(stored);
    let factor = 10f64.powi(frac_digits as i32);
    (fresh * factor).round() / factor
}

/// True when the fresh value, rounded to the stored value's digit width and
/// narrowed the same way a write would narrow it, lands exactly on the
/// stored value.
pub fn float_matches_stored(stored: f32, fresh: f64) -> bool {
    round_to_stored_width(stored, fresh) as f32 == stored
}

// ---------------------------------------------------------------------------
// Change detection
// ---------------------------------------------------------------------------

/// Compares a previously stored station row against a freshly fetched
/// record. String fields compare exactly (both sides carry the storage
/// escaping), coordinates compare truncation-aware.
pub fn has_station_changed(stored: &StoredStation, fresh: &Station) -> bool {
    stored.id != fresh.id
        || !float_matches_stored(stored.latitude, fresh.latitude)
        || !float_matches_stored(stored.longitude, fresh.longitude)
        || stored.city != fresh.city
        || stored.neighborhood != fresh.neighborhood
}

// ---------------------------------------------------------------------------
// Column/value lists
// ---------------------------------------------------------------------------

/// A typed value headed for a bind parameter. The variant doubles as the
/// "requires quoting" kind from the statement-building protocol: text and
/// datetime values are quoted kinds, the numeric variants are not. The
/// gateway binds all of them as parameters either way; the kind only
/// matters for verbose statement rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    /// Destined for a single-precision REAL column; the gateway narrows to
    /// f32 at bind time.
    Real(f64),
    SmallInt(i16),
    Int(i32),
    DateTime(NaiveDateTime),
}

impl SqlValue {
    pub fn requires_quoting(&self) -> bool {
        matches!(self, SqlValue::Text(_) | SqlValue::DateTime(_))
    }

    /// Display-only literal rendering for verbose statement dumps. Never
    /// executed - statements always use bind parameters.
    pub fn render_literal(&self) -> String {
        match self {
            SqlValue::Text(s) => format!("'{}'", s),
            SqlValue::Real(v) => v.to_string(),
            SqlValue::SmallInt(v) => v.to_string(),
            SqlValue::Int(v) => v.to_string(),
            SqlValue::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// One (column name, value) pair in a plan. Column order within a plan is
/// fixed and deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValue {
    pub column: &'static str,
    pub value: SqlValue,
}

impl ColumnValue {
    fn new(column: &'static str, value: SqlValue) -> Self {
        ColumnValue { column, value }
    }
}

/// The full station column list, identical for INSERT and UPDATE plans.
pub fn station_columns(station: &Station) -> Vec<ColumnValue> {
    vec![
        ColumnValue::new("id", SqlValue::Text(station.id.clone())),
        ColumnValue::new("latitude", SqlValue::Real(station.latitude)),
        ColumnValue::new("longitude", SqlValue::Real(station.longitude)),
        ColumnValue::new("city", SqlValue::Text(station.city.clone())),
        ColumnValue::new("neighborhood", SqlValue::Text(station.neighborhood.clone())),
    ]
}

/// The full observation column list. Observations never update, so this is
/// always an INSERT list; uniqueness comes from the table's surrogate key.
pub fn observation_columns(obs: &Observation) -> Vec<ColumnValue> {
    vec![
        ColumnValue::new("station_id", SqlValue::Text(obs.station_id.clone())),
        ColumnValue::new("time", SqlValue::DateTime(obs.time)),
        ColumnValue::new("weather", SqlValue::Text(obs.weather.clone())),
        ColumnValue::new("temp_f", SqlValue::Real(obs.temp_f)),
        ColumnValue::new("temp_c", SqlValue::Real(obs.temp_c)),
        ColumnValue::new("relative_humidity", SqlValue::SmallInt(obs.relative_humidity)),
        ColumnValue::new("uv_index", SqlValue::Real(obs.uv_index)),
        ColumnValue::new("precip_in", SqlValue::Real(obs.precip_in)),
        ColumnValue::new("pressure_in", SqlValue::Real(obs.pressure_in)),
        ColumnValue::new("pressure_mb", SqlValue::Real(obs.pressure_mb)),
        ColumnValue::new("latitude", SqlValue::Real(obs.latitude)),
        ColumnValue::new("longitude", SqlValue::Real(obs.longitude)),
        ColumnValue::new("elevation", SqlValue::Int(obs.elevation)),
        ColumnValue::new("city", SqlValue::Text(obs.city.clone())),
        ColumnValue::new("zip", SqlValue::Text(obs.zip.clone())),
    ]
}

// ---------------------------------------------------------------------------
// Station upsert planning
// ---------------------------------------------------------------------------

/// What the gateway should do for one station.
#[derive(Debug, Clone, PartialEq)]
pub enum StationPlan {
    /// First sighting of this identifier
    Insert(Vec<ColumnValue>),
    /// Row exists and at least one field differs; keyed by the surrogate key
    Update {
        autoid: i32,
        columns: Vec<ColumnValue>,
    },
    /// Row exists and nothing meaningful changed
    Unchanged,
}

/// Decides the plan for one fetched station given the stored row (if any)
/// looked up by the caller.
pub fn plan_station_upsert(fresh: &Station, existing: Option<&StoredStation>) -> StationPlan {
    match existing {
        None => StationPlan::Insert(station_columns(fresh)),
        Some(stored) => {
            if has_station_changed(stored, fresh) {
                StationPlan::Update {
                    autoid: stored.autoid,
                    columns: station_columns(fresh),
                }
            } else {
                StationPlan::Unchanged
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Test fixtures: representative JSON payloads from the Weather
/// Underground REST API.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the extraction code.
///
/// Geolookup response shape:
///   response.location.nearby_weather_stations.pws.station[]
///     .id            — station identifier (string)
///     .distance_km   — distance from the query point (number)
///     .lat / .lon    — registered coordinates (number or numeric string)
///     .city / .neighborhood
///
/// Conditions response shape:
///   response.current_observation
///     .observation_time_rfc822 — "Mon, 01 Jan 2024 08:00:00 -0800"
///     .relative_humidity       — percent-suffixed STRING ("54%")
///     .precip_today_in         — STRING; "--", "999", or "-999.00" mean
///                                no reading
///     .observation_location.elevation — STRING with "ft" suffix
///     .observation_location.latitude/longitude — numeric STRINGS
///     .display_location.zip
///
/// Note: several numeric fields arrive as JSON strings. Extraction must
/// handle both spellings.

/// Five nearby stations at distances [1.0, 5.0, 2.9, 3.0, 10.0] km. With
/// the default 3 km cap, exactly {KCAMOUNT64, KCASUNNY18, KCAMOUNT12} are
/// eligible. One neighborhood carries an apostrophe to exercise escaping.
#[cfg(test)]
pub(crate) fn fixture_geolookup_json() -> &'static str {
    r#"{
      "response": { "version": "0.1" },
      "location": {
        "city": "Mountain View",
        "state": "CA",
        "nearby_weather_stations": {
          "pws": {
            "station": [
              {
                "neighborhood": "Old Mountain View",
                "city": "Mountain View",
                "state": "CA",
                "id": "KCAMOUNT64",
                "lat": 37.392089,
                "lon": -122.083347,
                "distance_km": 1.0,
                "distance_mi": 0.6
              },
              {
                "neighborhood": "St. Aloysius' Green",
                "city": "Palo Alto",
                "state": "CA",
                "id": "KCAPALOA22",
                "lat": 37.429112,
                "lon": -122.138493,
                "distance_km": 5.0,
                "distance_mi": 3.1
              },
              {
                "neighborhood": "Heritage District",
                "city": "Sunnyvale",
                "state": "CA",
                "id": "KCASUNNY18",
                "lat": "37.371681",
                "lon": "-122.047119",
                "distance_km": 2.9,
                "distance_mi": 1.8
              },
              {
                "neighborhood": "Whisman Station",
                "city": "Mountain View",
                "state": "CA",
                "id": "KCAMOUNT12",
                "lat": 37.402512,
                "lon": -122.066541,
                "distance_km": 3.0,
                "distance_mi": 1.9
              },
              {
                "neighborhood": "Willow Glen",
                "city": "San Jose",
                "state": "CA",
                "id": "KCASANJO91",
                "lat": 37.303733,
                "lon": -121.891674,
                "distance_km": 10.0,
                "distance_mi": 6.2
              }
            ]
          }
        }
      }
    }"#
}

/// Fully-populated conditions payload exercising every normalization rule:
/// percent-suffixed humidity, "ft"-suffixed elevation, string-typed
/// coordinates, and an apostrophe in the observation city.
#[cfg(test)]
pub(crate) fn fixture_conditions_json() -> &'static str {
    r#"{
      "response": { "version": "0.1" },
      "current_observation": {
        "station_id": "KCAMOUNT64",
        "observation_time_rfc822": "Mon, 01 Jan 2024 08:00:00 -0800",
        "weather": "Partly Cloudy",
        "temp_f": 52.3,
        "temp_c": 11.3,
        "relative_humidity": "54%",
        "UV": " 2.0",
        "precip_today_in": "0.12",
        "pressure_in": "30.10",
        "pressure_mb": "1019.3",
        "observation_location": {
          "city": "O'Brien Corners",
          "latitude": "37.392234",
          "longitude": "-122.083512",
          "elevation": "120 ft"
        },
        "display_location": {
          "city": "Mountain View",
          "zip": "94043"
        }
      }
    }"#
}

/// Station reporting the negative "no reading" precipitation sentinel.
/// Normalization must yield 0.0, not -999 inches of rain.
#[cfg(test)]
pub(crate) fn fixture_conditions_sentinel_precip_json() -> &'static str {
    r#"{
      "response": { "version": "0.1" },
      "current_observation": {
        "station_id": "KCASUNNY18",
        "observation_time_rfc822": "Mon, 01 Jan 2024 08:05:00 -0800",
        "weather": "Clear",
        "temp_f": 50.0,
        "temp_c": 10.0,
        "relative_humidity": "61%",
        "UV": "1.5",
        "precip_today_in": "-999.00",
        "pressure_in": "30.08",
        "pressure_mb": "1018.6",
        "observation_location": {
          "city": "Sunnyvale",
          "latitude": "37.371681",
          "longitude": "-122.047119",
          "elevation": "95 ft"
        },
        "display_location": {
          "city": "Sunnyvale",
          "zip": "94086"
        }
      }
    }"#
}

/// Humidity that is not numeric after stripping the percent sign - must
/// fail extraction with a field-level error, never default.
#[cfg(test)]
pub(crate) fn fixture_conditions_bad_humidity_json() -> &'static str {
    r#"{
      "response": { "version": "0.1" },
      "current_observation": {
        "station_id": "KCAMOUNT12",
        "observation_time_rfc822": "Mon, 01 Jan 2024 08:10:00 -0800",
        "weather": "Overcast",
        "temp_f": 49.1,
        "temp_c": 9.5,
        "relative_humidity": "N/A%",
        "UV": "0.0",
        "precip_today_in": "--",
        "pressure_in": "30.02",
        "pressure_mb": "1016.5",
        "observation_location": {
          "city": "Mountain View",
          "latitude": "37.402512",
          "longitude": "-122.066541",
          "elevation": "30 ft"
        },
        "display_location": {
          "city": "Mountain View",
          "zip": "94043"
        }
      }
    }"#
}

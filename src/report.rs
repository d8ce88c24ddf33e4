/// Console report sink
///
/// Renders fetched candidates and observations before the storage phase,
/// and dumps a stored-data subset per station after it. Escaped text fields
/// are unescaped on the way out so the console shows the original values.

use crate::config::CollectorConfig;
use crate::db::Store;
use crate::model::{unescape_quotes, Observation, StationCandidate};

const RULE: &str = "________________________________________________________________________________";

pub fn print_candidates(candidates: &[StationCandidate], max_stations: usize) {
    println!("{}", RULE);
    println!();
    println!("PWS FOUND NEARBY (MAX:{:^3})", max_stations);
    for candidate in candidates {
        println!("{}", RULE);
        println!();
        println!("ID: {}", candidate.id);
        println!("KM: {}", candidate.distance_km);
        println!("NEIGHBORHOOD: {}", unescape_quotes(&candidate.neighborhood));
    }
}

pub fn print_observations(observations: &[Observation]) {
    println!();
    println!("{}", RULE);
    println!();
    println!("OBSERVATION DATA FOR THE PWS LISTED ABOVE");
    for obs in observations {
        println!("{}", RULE);
        println!();
        println!("STATION ID: {}", obs.station_id);
        println!("TIME: {}", obs.time.format("%Y-%m-%d %H:%M:%S"));
        println!("WEATHER: {}", unescape_quotes(&obs.weather));
        println!("T(F): {}", obs.temp_f);
        println!("T(C): {}", obs.temp_c);
        println!("REL HUM: {}%", obs.relative_humidity);
        println!("UV: {}", obs.uv_index);
        println!("PRECIP(IN): {}", obs.precip_in);
        println!("PRESSURE(IN): {}", obs.pressure_in);
        println!("PRESSURE(MB): {}", obs.pressure_mb);
        println!("LATITUDE: {}", obs.latitude);
        println!("LONGITUDE: {}", obs.longitude);
        println!("ELEVATION(ft): {}", obs.elevation);
        println!("CITY: {}", unescape_quotes(&obs.city));
        println!("ZIPCODE: {}", obs.zip);
    }
}

/// Reads back every stored station and prints a column subset of its
/// observations. Failures here are reported but never fail the run - the
/// data is already committed.
pub fn dump_database(store: &mut Store, config: &CollectorConfig) {
    println!();
    println!("PRINT THE OBSERVATION DATA FOR EACH STORED STATION");
    println!("{}", RULE);

    let station_ids = match store.station_ids(&config.database.station_table) {
        Ok(ids) => ids,
        Err(e) => {
            eprintln!("Could not list stored stations: {}", e);
            return;
        }
    };

    for station_id in station_ids {
        println!();
        println!("{}", RULE);
        println!("QUERYING OBSERVATION TABLE FOR SUBSET OF DATA FOR PWS = \"{}\"...", station_id);
        println!("{}", RULE);

        let summaries =
            match store.observations_for_station(&config.database.observation_table, &station_id) {
                Ok(rows) => rows,
                Err(e) => {
                    eprintln!("Could not read observations for {}: {}", station_id, e);
                    continue;
                }
            };

        for summary in summaries {
            println!("________________________________________");
            println!("ENTRYID: {}", summary.entry_id);
            println!("WEATHER: {}", unescape_quotes(&summary.weather));
            println!("TEMP(F): {}", summary.temp_f);
            println!("HUM(%): {}", summary.relative_humidity);
            println!("CITY: {}", unescape_quotes(&summary.city));
            println!("TIME: {}", summary.time.format("%Y-%m-%d %H:%M:%S"));
            println!();
        }
    }

    println!("{}", RULE);
}

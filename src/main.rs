//! PWS Conditions Collector - Batch Run
//!
//! A single-pass batch that:
//! 1. Queries the provider's geolookup endpoint for nearby personal
//!    weather stations and samples up to the configured extraction cap
//! 2. Queries current conditions per selected station and normalizes the
//!    loosely-typed payloads into strict records
//! 3. Upserts station metadata (insert / update / no-op) and appends one
//!    observation row per station into PostgreSQL
//! 4. Optionally dumps the stored data back to the console
//!
//! Sequential on purpose: the provider credential has per-minute and
//! per-day call quotas, so one geolookup call plus at most N conditions
//! calls per run is the whole budget.
//!
//! Usage:
//!   cargo run --release        # reads collector.toml in the working directory
//!
//! Environment:
//!   DATABASE_URL - PostgreSQL connection string
//!   WU_API_KEY   - provider API credential (overrides collector.toml)

use pws_collector::collector::Collector;
use pws_collector::config;
use pws_collector::db::{Store, UpsertOutcome};
use pws_collector::model::Station;
use pws_collector::report;
use pws_collector::upsert::{observation_columns, plan_station_upsert};

fn main() {
    println!("🌤  PWS Conditions Collector");
    println!("============================\n");

    let config = config::load_config();

    let api_key = match config.api_key() {
        Some(key) => key,
        None => {
            eprintln!("\n❌ No API credential found\n");
            eprintln!("Set WU_API_KEY in the environment (or .env), or api_key in collector.toml\n");
            std::process::exit(1);
        }
    };

    // Fetch phase: geolookup failure is fatal, per-station conditions
    // failures were already reported and skipped inside the collector
    println!("📡 Fetching nearby stations for {}...", config.query.location);
    let mut collector = Collector::new(&config, api_key);
    let (candidates, observations) = match collector.fetch_nearby_and_observations() {
        Ok(results) => results,
        Err(e) => {
            eprintln!("\n❌ Fetch failed: {}\n", e);
            std::process::exit(1);
        }
    };

    report::print_candidates(&candidates, config.query.max_stations);
    report::print_observations(&observations);

    // Storage phase
    println!();
    println!("💾 Adding data to the database...");
    let mut store = match Store::connect(config.database.verbose) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("\n❌ Database connection failed: {}\n", e);
            std::process::exit(1);
        }
    };

    if config.database.reset_tables {
        if let Err(e) = store.reset_tables(&config.database) {
            eprintln!("\n❌ Table reset failed: {}\n", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = store.ensure_schema(&config.database) {
        eprintln!("\n❌ Schema bootstrap failed: {}\n", e);
        std::process::exit(1);
    }

    // Stations first: every observation references a station row via the
    // foreign key, so an out-of-order insert would be rejected. A failed
    // unit is reported and the run moves on to the next item.
    let station_table = &config.database.station_table;
    for candidate in &candidates {
        let fresh = Station::from(candidate);
        let result = store
            .find_station(station_table, &fresh.id)
            .map(|existing| plan_station_upsert(&fresh, existing.as_ref()))
            .and_then(|plan| store.apply_station_plan(station_table, &plan));

        match result {
            Ok(UpsertOutcome::Inserted) => println!("   ✓ {} - new station stored", fresh.id),
            Ok(UpsertOutcome::Updated) => println!("   ✓ {} - station updated", fresh.id),
            Ok(UpsertOutcome::Unchanged) => println!("   · {} - no change", fresh.id),
            Err(e) => eprintln!("   ✗ {} - station upsert failed: {}", fresh.id, e),
        }
    }

    // Observations are append-only; every fetch adds a row per station
    let observation_table = &config.database.observation_table;
    for obs in &observations {
        let columns = observation_columns(obs);
        match store.insert_observation(observation_table, &columns) {
            Ok(()) => println!("   ✓ {} - observation stored", obs.station_id),
            Err(e) => eprintln!("   ✗ {} - observation insert failed: {}", obs.station_id, e),
        }
    }

    if config.database.dump_after_run {
        report::dump_database(&mut store, &config);
    } else {
        println!("Database dump disabled by settings...");
    }

    println!("\nClosing database...");
    if let Err(e) = store.close() {
        eprintln!("Close reported an error: {}", e);
    }
}

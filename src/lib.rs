/// pws_collector: nearby personal weather station conditions collector.
///
/// # Module structure
///
/// ```text
/// pws_collector
/// ├── model       — shared data types (StationCandidate, Observation, ExtractError, …)
/// ├── config      — collector.toml loader (immutable CollectorConfig)
/// ├── fetch       — live/replay JSON transport with optional response cache
/// ├── ingest
/// │   ├── wunderground — Weather Underground API: URL construction +
/// │   │                  extraction/normalization of loosely-typed payloads
/// │   └── fixtures (test only) — representative API response payloads
/// ├── collector   — fetch orchestrator (shuffle, distance filter, extraction cap)
/// ├── upsert      — change detector + upsert planner (pure, no I/O)
/// ├── db          — storage gateway (PostgreSQL, bind parameters, per-unit commits)
/// └── report      — console rendering of fetched and stored data
/// ```

/// Public modules
pub mod collector;
pub mod config;
pub mod db;
pub mod fetch;
pub mod ingest;
pub mod model;
pub mod report;
pub mod upsert;

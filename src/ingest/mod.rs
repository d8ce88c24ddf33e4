/// Provider API ingestion
///
/// Each provider gets its own file under ingest/. Today that is only the
/// Weather Underground REST API; the cfg(test)-gated fixtures file holds
/// representative response payloads for the parser tests.

pub mod wunderground;

#[cfg(test)]
pub(crate) mod fixtures;

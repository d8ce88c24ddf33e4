/// Fetch orchestrator
///
/// Runs the geolookup query, selects which nearby stations to extract, then
/// queries each selected station for its current conditions. Sequential on
/// purpose: the provider credential has per-minute and per-day call quotas,
/// and one geolookup call plus at most `max_stations` conditions calls per
/// run stays inside them.

use crate::config::CollectorConfig;
use crate::fetch::Fetcher;
use crate::ingest::wunderground;
use crate::model::{Observation, StationCandidate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::error::Error;

/// Shuffles, filters, and caps the candidate list.
///
/// The shuffle happens before filtering so that when more eligible stations
/// exist than the extraction cap, different stations get sampled across
/// runs instead of always the same prefix of the provider's ordering. The
/// distance cap is inclusive.
pub fn select_candidates(
    mut candidates: Vec<StationCandidate>,
    max_distance_km: f64,
    max_stations: usize,
    rng: &mut impl Rng,
) -> Vec<StationCandidate> {
    candidates.shuffle(rng);
    candidates
        .into_iter()
        .filter(|c| c.distance_km <= max_distance_km)
        .take(max_stations)
        .collect()
}

/// Owns the transport and the sampling RNG for one run.
pub struct Collector<'a> {
    config: &'a CollectorConfig,
    api_key: String,
    fetcher: Fetcher,
    rng: StdRng,
}

impl<'a> Collector<'a> {
    pub fn new(config: &'a CollectorConfig, api_key: String) -> Self {
        Self::with_rng(config, api_key, StdRng::from_entropy())
    }

    /// Deterministic sampling for tests.
    pub fn with_seed(config: &'a CollectorConfig, api_key: String, seed: u64) -> Self {
        Self::with_rng(config, api_key, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &'a CollectorConfig, api_key: String, rng: StdRng) -> Self {
        Collector {
            config,
            api_key,
            fetcher: Fetcher::new(&config.fetch, config.database.verbose),
            rng,
        }
    }

    /// Finds nearby stations, queries each selected one for conditions, and
    /// returns both result lists.
    ///
    /// A geolookup failure aborts the run. A single station's conditions
    /// failure (transport, schema, or malformed field) is reported and that
    /// station is skipped, so the observation list may be shorter than the
    /// candidate list; both follow the same traversal order.
    pub fn fetch_nearby_and_observations(
        &mut self,
    ) -> Result<(Vec<StationCandidate>, Vec<Observation>), Box<dyn Error>> {
        let url = wunderground::geolookup_url(
            &self.config.api.base_url,
            &self.api_key,
            &self.config.query.location,
        );
        let payload = self.fetcher.get_json(&url)?;
        let candidates = wunderground::extract_nearby_stations(&payload)?;

        let selected = select_candidates(
            candidates,
            self.config.query.max_distance_km,
            self.config.query.max_stations,
            &mut self.rng,
        );

        let mut observations = Vec::with_capacity(selected.len());
        for candidate in &selected {
            match self.fetch_conditions(&candidate.id) {
                Ok(obs) => observations.push(obs),
                Err(e) => {
                    eprintln!("   ✗ {} - conditions fetch failed: {}", candidate.id, e);
                }
            }
        }

        Ok((selected, observations))
    }

    fn fetch_conditions(&self, station_id: &str) -> Result<Observation, Box<dyn Error>> {
        let url = wunderground::conditions_url(&self.config.api.base_url, &self.api_key, station_id);
        let payload = self.fetcher.get_json(&url)?;
        let observation = wunderground::extract_observation(&payload)?;
        Ok(observation)
    }
}

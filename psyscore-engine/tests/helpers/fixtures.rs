//! Response fixtures
//!
//! Builders for realistic response sets used across the integration tests.

use psyscore_engine::{ResponseRecord, Trait, TraitMap};

/// Varied, plausible answer times (ms)
pub const TIMINGS_MS: [u64; 8] = [2800, 4100, 3500, 5200, 2600, 6100, 3900, 4700];

/// Per-trait answers that hang together and show no careless pattern
const BALANCED_VALUES: [(Trait, f64); 5] = [
    (Trait::Openness, 4.0),
    (Trait::Conscientiousness, 4.0),
    (Trait::Extraversion, 3.0),
    (Trait::Agreeableness, 3.0),
    (Trait::Neuroticism, 2.0),
];

/// `rounds` passes over the five traits, interleaved, with varied timings
pub fn balanced_likert_responses(rounds: usize) -> Vec<ResponseRecord> {
    (0..rounds)
        .flat_map(|round| {
            BALANCED_VALUES.iter().enumerate().map(move |(i, &(t, value))| {
                let n = round * BALANCED_VALUES.len() + i;
                ResponseRecord::likert(format!("{}_{}", t.as_str(), round + 1), t, value)
                    .with_response_time(TIMINGS_MS[n % TIMINGS_MS.len()])
            })
        })
        .collect()
}

/// Four answers per trait cycling through 1, 2, 4, 5
pub fn extreme_likert_responses() -> Vec<ResponseRecord> {
    Trait::ALL
        .iter()
        .flat_map(|&t| [1.0, 2.0, 4.0, 5.0].into_iter().map(move |v| (t, v)))
        .enumerate()
        .map(|(n, (t, value))| {
            ResponseRecord::likert(format!("{}_{}", t.as_str(), n % 4 + 1), t, value)
                .with_response_time(TIMINGS_MS[n % TIMINGS_MS.len()])
        })
        .collect()
}

/// Overwrite answers with `value`, keeping the first `keep` records as they were
pub fn straight_lined(responses: &[ResponseRecord], value: f64, keep: usize) -> Vec<ResponseRecord> {
    responses
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mut r = r.clone();
            if i >= keep {
                r.value = Some(value);
            }
            r
        })
        .collect()
}

/// Instrument items `<prefix>_1..` with the given values
pub fn instrument_items(prefix: &str, values: &[f64]) -> Vec<ResponseRecord> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| ResponseRecord::instrument(format!("{}_{}", prefix, i + 1), v).with_response_time(3000))
        .collect()
}

pub fn gad7(values: &[f64]) -> Vec<ResponseRecord> {
    instrument_items("gad7", values)
}

pub fn phq9(values: &[f64]) -> Vec<ResponseRecord> {
    instrument_items("phq9", values)
}

/// Trait map in canonical order (O, C, E, A, N)
pub fn trait_map(scores: [f64; 5]) -> TraitMap<f64> {
    TraitMap::from_fn(|t| scores[Trait::ALL.iter().position(|&x| x == t).unwrap_or(0)])
}

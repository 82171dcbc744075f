use strum_macros::Display;

use super::epoch::parse_epoch;
use super::record::StateVector;
use super::store::VectorStore;

/// Why a lookup handed back something other than the record the scan chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Degradation {
    StoreUnavailable,
    EmptyStore,
    IndexFallback,
}

/// Outcome of a nearest-epoch lookup: always a usable record, plus a note
/// when that record was substituted rather than resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub record: StateVector,
    pub degraded: Option<Degradation>,
}

impl Resolved {
    fn found(record: StateVector) -> Self {
        Resolved {
            record,
            degraded: None,
        }
    }

    fn substituted(record: StateVector, why: Degradation) -> Self {
        Resolved {
            record,
            degraded: Some(why),
        }
    }
}

/// Finds the stored record whose timestamp is numerically closest to
/// `target_epoch` (seconds since the reference instant).
///
/// Linear scan over all indices; the comparison is strictly `<`, so equal
/// distances keep the earliest-encountered (lowest) index. No index or
/// cache is maintained, every call rescans. Degraded storage never fails
/// the lookup: an unreachable store yields the sentinel record, an
/// unreadable best index falls back to index 0, and an unreadable index 0
/// yields the sentinel.
pub fn nearest_to(store: &dyn VectorStore, target_epoch: f64) -> Resolved {
    let count = match store.count() {
        Ok(count) => count,
        Err(e) => {
            log::error!("unable to reach the ephemeris store: {}", e);
            return Resolved::substituted(StateVector::sentinel(), Degradation::StoreUnavailable);
        }
    };

    let mut best_index = 0;
    let mut best_difference = f64::MAX;
    for index in 0..count {
        let record = match store.get(index) {
            Ok(record) => record,
            Err(e) => {
                log::error!("skipping unreadable record {}: {}", index, e);
                continue;
            }
        };
        let difference = (target_epoch - parse_epoch(&record.epoch)).abs();
        if difference < best_difference {
            best_difference = difference;
            best_index = index;
        }
    }

    match store.get(best_index) {
        Ok(record) => Resolved::found(record),
        Err(e) => {
            log::error!(
                "record {} unavailable ({}), defaulting to index 0",
                best_index,
                e
            );
            match store.get(0) {
                Ok(record) => Resolved::substituted(record, Degradation::IndexFallback),
                Err(e) => {
                    log::error!("no records available: {}", e);
                    Resolved::substituted(StateVector::sentinel(), Degradation::EmptyStore)
                }
            }
        }
    }
}

use strum_macros::Display;

use super::record::StateVector;
use super::store::VectorStore;

/// A coercion applied while mapping raw query parameters to a valid window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Adjustment {
    LimitNotInteger,
    LimitNegative,
    LimitBeyondCount,
    OffsetNotInteger,
    OffsetNegative,
    OffsetBeyondCount,
}

/// A clamped half-open index window `[start, end)` over the record
/// collection, together with the coercions that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    pub adjustments: Vec<Adjustment>,
}

impl Window {
    /// Maps raw `limit`/`offset` query parameters onto a valid index
    /// window over `count` records.
    ///
    /// The window is named by positional bounds, not by a page length:
    /// `limit` is the start index (absent -> 0) and `offset` the end index
    /// (absent -> `count`). Coercions, applied in order and each logged:
    /// non-integer limit -> 0; negative limit -> 0; limit beyond the
    /// record count -> count; non-integer offset -> 0, unlike the
    /// absent-offset default; negative offset -> 0;
    /// offset beyond `count - limit` -> `count - limit`. The defaulted
    /// offset runs through the same bounds clamp, so a non-zero start
    /// shrinks the default end. The result may be empty when
    /// `start >= end`.
    pub fn clamp(limit: Option<&str>, offset: Option<&str>, count: usize) -> Window {
        let mut adjustments = Vec::new();

        let start_value = match limit {
            None => 0,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(value) => value,
                Err(_) => {
                    log::warn!("invalid limit parameter {:?}, defaulting to 0", raw);
                    adjustments.push(Adjustment::LimitNotInteger);
                    0
                }
            },
        };
        let start = if start_value < 0 {
            log::warn!("limit {} out of bounds, defaulting to 0", start_value);
            adjustments.push(Adjustment::LimitNegative);
            0
        } else if start_value as usize > count {
            log::warn!(
                "limit {} out of bounds, defaulting to the record count {}",
                start_value,
                count
            );
            adjustments.push(Adjustment::LimitBeyondCount);
            count
        } else {
            start_value as usize
        };

        let end_value = match offset {
            None => count as i64,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(value) => value,
                Err(_) => {
                    log::warn!("invalid offset parameter {:?}, defaulting to 0", raw);
                    adjustments.push(Adjustment::OffsetNotInteger);
                    0
                }
            },
        };
        let cap = count - start;
        let end = if end_value < 0 {
            log::warn!("offset {} out of bounds, defaulting to 0", end_value);
            adjustments.push(Adjustment::OffsetNegative);
            0
        } else if end_value as usize > cap {
            log::warn!("offset {} out of bounds, defaulting to {}", end_value, cap);
            adjustments.push(Adjustment::OffsetBeyondCount);
            cap
        } else {
            end_value as usize
        };

        Window {
            start,
            end,
            adjustments,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads the window's records from the store in index order. A row that
/// fails to read is logged and skipped rather than failing the slice.
pub fn slice_records(store: &dyn VectorStore, window: &Window) -> Vec<StateVector> {
    let mut records = Vec::new();
    for index in window.start..window.end {
        match store.get(index) {
            Ok(record) => records.push(record),
            Err(e) => log::error!("skipping unreadable record {}: {}", index, e),
        }
    }
    records
}

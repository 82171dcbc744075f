use super::epoch::{format_epoch, parse_epoch};
use super::store::VectorStore;

/// Returned whenever the boundaries of the stored data cannot be named.
pub const UNDETERMINED: &str = "Data range undetermined";

/// Summarizes the stored collection as a single human-readable line.
///
/// The boundary epochs are decoded and re-rendered in calendar form. An
/// empty collection, an unreachable store, or a boundary record with no
/// epoch text all collapse to [`UNDETERMINED`] rather than an error.
pub fn range_report(store: &dyn VectorStore) -> String {
    let count = match store.count() {
        Ok(count) => count,
        Err(e) => {
            log::error!("record count unavailable: {}", e);
            return UNDETERMINED.to_string();
        }
    };
    if count == 0 {
        return UNDETERMINED.to_string();
    }

    let first = match store.get(0) {
        Ok(record) => record,
        Err(e) => {
            log::error!("first record unreadable: {}", e);
            return UNDETERMINED.to_string();
        }
    };
    let last = match store.get(count - 1) {
        Ok(record) => record,
        Err(e) => {
            log::error!("last record unreadable: {}", e);
            return UNDETERMINED.to_string();
        }
    };
    if first.epoch.is_empty() || last.epoch.is_empty() {
        log::warn!("boundary record carries no epoch text");
        return UNDETERMINED.to_string();
    }

    format!(
        "Data consists of {} indices and ranges from {} to {}",
        count,
        format_epoch(parse_epoch(&first.epoch)),
        format_epoch(parse_epoch(&last.epoch)),
    )
}

use chrono::{DateTime, NaiveDateTime, Utc};

/// Timestamp layout used by the ephemeris feed: four-digit year, day of
/// year, 24h time, fractional seconds after a required dot, literal `Z`.
pub const EPOCH_FORMAT: &str = "%Y-%jT%H:%M:%S.%fZ";

/// Converts an ephemeris timestamp to seconds since 1970-01-01T00:00:00 UTC.
///
/// The conversion is fixed to UTC and does not depend on the process time
/// zone. Fractional seconds are validated but do not contribute; epochs
/// resolve at whole-second granularity. The year is matched at exactly
/// four digits and the fraction at one to six.
///
/// Malformed or out-of-range input never propagates an error: the failure
/// is logged and `0.0` (the reference instant) is returned, so callers
/// cannot distinguish a bad timestamp from a legitimately-zero epoch.
pub fn parse_epoch(text: &str) -> f64 {
    if !shaped_like_epoch(text) {
        log::error!("timestamp {:?} not in ephemeris format", text);
        return 0.0;
    }
    match NaiveDateTime::parse_from_str(text, EPOCH_FORMAT) {
        Ok(naive) => naive.and_utc().timestamp() as f64,
        Err(e) => {
            log::error!("timestamp {:?} not in ephemeris format: {}", text, e);
            0.0
        }
    }
}

// chrono matches %Y and %f at flexible widths; the feed layout fixes the
// year at four digits and the fraction at one to six
fn shaped_like_epoch(text: &str) -> bool {
    let four_digit_year = text
        .split_once('-')
        .map(|(year, _)| year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false);
    let bounded_fraction = text
        .rsplit_once('.')
        .and_then(|(_, tail)| tail.strip_suffix('Z'))
        .map(|digits| {
            !digits.is_empty() && digits.len() <= 6 && digits.chars().all(|c| c.is_ascii_digit())
        })
        .unwrap_or(false);
    four_digit_year && bounded_fraction
}

/// Renders a numeric epoch as a human-readable UTC calendar string, e.g.
/// `"Thu Jan  1 00:00:00 1970"`. Not required to round-trip through
/// [`parse_epoch`].
pub fn format_epoch(epoch: f64) -> String {
    let at = DateTime::from_timestamp(epoch as i64, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    at.format("%a %b %e %H:%M:%S %Y").to_string()
}

use std::time::Duration;

use thiserror::Error;

use crate::ephemeris::{StateVector, StoreError, VectorStore};

// a stalled feed must not wedge startup
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("ephemeris download failed: {0}")]
    Download(#[from] reqwest::Error),
    #[error("no state vectors found in ephemeris document")]
    EmptyDocument,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Downloads the ephemeris document and replaces the store's contents
/// with the state vectors it carries. Returns the number of records.
/// The download runs under a bounded timeout.
pub async fn populate(store: &dyn VectorStore, source_url: &str) -> Result<usize, IngestError> {
    let client = reqwest::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()?;
    populate_with(&client, store, source_url).await
}

async fn populate_with(
    client: &reqwest::Client,
    store: &dyn VectorStore,
    source_url: &str,
) -> Result<usize, IngestError> {
    log::info!("fetching ephemeris from {}", source_url);
    let body = client
        .get(source_url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let records = parse_oem_text(&body);
    if records.is_empty() {
        return Err(IngestError::EmptyDocument);
    }

    let count = records.len();
    store.replace_all(records)?;
    log::info!("loaded {} state vectors", count);
    Ok(count)
}

/// Parses a CCSDS OEM document in its plain-text form.
///
/// Header and metadata lines carry `=` assignments, data rows are seven
/// whitespace-separated tokens: the epoch, three position components in
/// km and three velocity components in km/s. COMMENT lines may appear
/// between data rows and are skipped.
pub fn parse_oem_text(content: &str) -> Vec<StateVector> {
    let mut records = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty()
            || line.contains('=')
            || line.starts_with("COMMENT")
            || line == "META_START"
            || line == "META_STOP"
        {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 7 || !tokens[0].starts_with(|c: char| c.is_ascii_digit()) {
            log::warn!("skipping malformed ephemeris line: {:?}", line);
            continue;
        }

        // some feed variants drop the zulu suffix
        let epoch = if tokens[0].ends_with('Z') {
            tokens[0].to_string()
        } else {
            format!("{}Z", tokens[0])
        };

        records.push(StateVector::from_parts(
            &epoch,
            [tokens[1], tokens[2], tokens[3]],
            [tokens[4], tokens[5], tokens[6]],
        ));
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
CCSDS_OEM_VERS = 2.0
CREATION_DATE  = 2025-045T18:02:33.000Z
ORIGINATOR     = NASA

META_START
OBJECT_NAME          = ISS
OBJECT_ID            = 1998-067-A
CENTER_NAME          = EARTH
REF_FRAME            = EME2000
TIME_SYSTEM          = UTC
START_TIME           = 2025-046T12:00:00.000Z
STOP_TIME            = 2025-061T12:00:00.000Z
META_STOP

COMMENT Units are in kg and m^2
COMMENT DRAG_AREA = 1487.80
2025-046T12:00:00.000Z 2820.04 -3602.78 -5038.43 5.69 4.95 -0.38
2025-046T12:04:00.000Z 4036.46 -2191.85 -5087.72 4.37 6.63 0.77
COMMENT Mass update
2025-046T12:08:00.000Z 4918.21 -524.39 -4852.06 2.93 7.22 1.43
";

    #[test]
    fn parses_data_rows_and_skips_header_and_comments() {
        let records = parse_oem_text(SAMPLE);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].epoch, "2025-046T12:00:00.000Z");
        assert_eq!(records[0].x.value, "2820.04");
        assert_eq!(records[0].x.units, "km");
        assert_eq!(records[0].x_dot.value, "5.69");
        assert_eq!(records[0].x_dot.units, "km/s");
        assert_eq!(records[2].epoch, "2025-046T12:08:00.000Z");
        assert_eq!(records[2].z_dot.value, "1.43");
    }

    #[test]
    fn content_without_data_rows_parses_to_nothing() {
        assert!(parse_oem_text("").is_empty());
        assert!(parse_oem_text("CCSDS_OEM_VERS = 2.0\nMETA_START\nMETA_STOP\n").is_empty());
    }

    #[test]
    fn malformed_rows_are_skipped_without_losing_the_rest() {
        let content = "\
2025-046T12:00:00.000Z 2820.04 -3602.78 -5038.43 5.69 4.95 -0.38
2025-046T12:04:00.000Z 4036.46 -2191.85
2025-046T12:08:00.000Z 4918.21 -524.39 -4852.06 2.93 7.22 1.43
";
        let records = parse_oem_text(content);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].epoch, "2025-046T12:08:00.000Z");
    }

    #[test]
    fn missing_zulu_suffix_is_restored() {
        let records =
            parse_oem_text("2025-046T12:00:00.000 2820.04 -3602.78 -5038.43 5.69 4.95 -0.38\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].epoch, "2025-046T12:00:00.000Z");
    }

    #[test]
    fn windows_line_endings_are_tolerated() {
        let content =
            "META_START\r\nMETA_STOP\r\n2025-046T12:00:00.000Z 1.0 2.0 3.0 4.0 5.0 6.0\r\n";
        let records = parse_oem_text(content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].y.value, "2.0");
    }

    #[tokio::test]
    async fn stalled_source_times_out_instead_of_hanging() {
        use crate::ephemeris::MemoryStore;

        // bound but never accepted, so the request can only time out
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/ISS.OEM_J2K_EPH.txt", listener.local_addr().unwrap());
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(250))
            .build()
            .unwrap();

        let store = MemoryStore::open(None);
        let outcome = populate_with(&client, &store, &url).await;
        assert!(matches!(outcome, Err(IngestError::Download(_))));
        assert_eq!(store.count().unwrap(), 0);
    }
}

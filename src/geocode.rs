use std::time::Duration;

use serde::Deserialize;

/// Stand-in text used whenever no place name can be produced.
pub const NO_RESULT: &str = "None";

const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";

// coarse, region-level lookups
const ZOOM: &str = "5";
const LANGUAGE: &str = "en";

#[derive(Debug, Deserialize)]
struct ReverseReply {
    display_name: Option<String>,
}

/// Reverse geocoder over the Nominatim HTTP API.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    endpoint: String,
}

impl NominatimClient {
    pub fn new(
        endpoint: Option<&str>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.unwrap_or(DEFAULT_ENDPOINT).to_string(),
        })
    }

    /// Names the region under a ground point, or [`NO_RESULT`] when the
    /// service has no answer. Transport failures are logged and collapse
    /// to [`NO_RESULT`] as well.
    pub async fn reverse(&self, latitude_deg: f64, longitude_deg: f64) -> String {
        let request = self.http.get(&self.endpoint).query(&[
            ("format", "jsonv2"),
            ("lat", &latitude_deg.to_string()),
            ("lon", &longitude_deg.to_string()),
            ("zoom", ZOOM),
            ("accept-language", LANGUAGE),
        ]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("reverse geocoding request failed: {}", e);
                return NO_RESULT.to_string();
            }
        };
        if !response.status().is_success() {
            log::error!("reverse geocoding returned HTTP {}", response.status());
            return NO_RESULT.to_string();
        }

        match response.json::<ReverseReply>().await {
            Ok(reply) => reply
                .display_name
                .unwrap_or_else(|| NO_RESULT.to_string()),
            Err(e) => {
                log::error!("reverse geocoding reply unreadable: {}", e);
                NO_RESULT.to_string()
            }
        }
    }
}

/// The place-name source for location queries. Reverse lookups go out to
/// Nominatim when configured and degrade to [`NO_RESULT`] otherwise.
#[derive(Debug, Clone)]
pub enum Geocoder {
    Nominatim(NominatimClient),
    Disabled,
}

impl Geocoder {
    pub async fn reverse(&self, latitude_deg: f64, longitude_deg: f64) -> String {
        match self {
            Geocoder::Nominatim(client) => client.reverse(latitude_deg, longitude_deg).await,
            Geocoder::Disabled => NO_RESULT.to_string(),
        }
    }
}

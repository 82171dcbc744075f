use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ephemeris::{parse_epoch, StateVector};
use crate::geocode::Geocoder;
use crate::geodesy::{inertial_to_terrestrial, terrestrial_to_geodetic};

/// The ground point under a state vector, with a region-level place name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GroundFix {
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Altitude")]
    pub altitude: f64,
    #[serde(rename = "Geolocation")]
    pub geolocation: String,
}

/// Projects a record's inertial position onto the rotating Earth at the
/// record's own timestamp and names the region underneath it.
pub async fn ground_fix(record: &StateVector, geocoder: &Geocoder) -> GroundFix {
    let epoch = parse_epoch(&record.epoch);
    let terrestrial = inertial_to_terrestrial(record.position_km(), epoch);
    let fix = terrestrial_to_geodetic(terrestrial);
    let geolocation = geocoder.reverse(fix.latitude_deg, fix.longitude_deg).await;

    GroundFix {
        latitude: fix.latitude_deg,
        longitude: fix.longitude_deg,
        altitude: fix.altitude_km,
        geolocation,
    }
}

use chrono::{DateTime, Utc};

// WGS-84 constants
const WGS84_A_KM: f64 = 6378.137;
const WGS84_E2: f64 = 0.00669437999014;

/// A point on (or above) the WGS-84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

/// Greenwich mean sidereal time in radians at a Unix timestamp.
pub fn gmst_at(epoch: f64) -> f64 {
    let at = DateTime::from_timestamp(epoch as i64, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()))
}

pub fn rotate_to_earth_fixed(position: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        position[0] * cos_gmst + position[1] * sin_gmst,
        -position[0] * sin_gmst + position[1] * cos_gmst,
        position[2],
    ]
}

/// Rotates an inertial position into the rotating terrestrial frame at
/// the given epoch.
pub fn inertial_to_terrestrial(position: [f64; 3], epoch: f64) -> [f64; 3] {
    rotate_to_earth_fixed(position, gmst_at(epoch))
}

/// Converts a terrestrial position to geodetic coordinates against the
/// WGS-84 ellipsoid, iterating the latitude to convergence.
pub fn terrestrial_to_geodetic(ecef_km: [f64; 3]) -> Geodetic {
    let [x, y, z] = ecef_km;
    let p = (x * x + y * y).sqrt();

    if p < 1e-9 {
        // on the polar axis the longitude is arbitrary
        let polar_radius = WGS84_A_KM * (1.0 - WGS84_E2).sqrt();
        return Geodetic {
            latitude_deg: if z >= 0.0 { 90.0 } else { -90.0 },
            longitude_deg: 0.0,
            altitude_km: z.abs() - polar_radius,
        };
    }

    let longitude = y.atan2(x);
    let mut latitude = z.atan2(p * (1.0 - WGS84_E2));
    for _ in 0..5 {
        let sin_lat = latitude.sin();
        let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        let altitude = p / latitude.cos() - n;
        latitude = z.atan2(p * (1.0 - WGS84_E2 * n / (n + altitude)));
    }
    let sin_lat = latitude.sin();
    let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    let altitude = p / latitude.cos() - n;

    Geodetic {
        latitude_deg: latitude.to_degrees(),
        longitude_deg: longitude.to_degrees(),
        altitude_km: altitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn geodetic_to_ecef(latitude_deg: f64, longitude_deg: f64, altitude_km: f64) -> [f64; 3] {
        let lat = latitude_deg.to_radians();
        let lon = longitude_deg.to_radians();
        let sin_lat = lat.sin();
        let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        [
            (n + altitude_km) * lat.cos() * lon.cos(),
            (n + altitude_km) * lat.cos() * lon.sin(),
            (n * (1.0 - WGS84_E2) + altitude_km) * sin_lat,
        ]
    }

    #[test]
    fn gmst_matches_the_j2000_reference_angle() {
        // 2000-01-01T12:00:00 UTC, GMST 280.4606 degrees
        let gmst = gmst_at(946_728_000.0);
        assert!((gmst - 4.894_961_2).abs() < 1e-3, "gmst {}", gmst);
    }

    #[test]
    fn gmst_repeats_after_one_sidereal_day() {
        let g1 = gmst_at(1_700_000_000.0);
        let g2 = gmst_at(1_700_000_000.0 + 86_164.0);
        let delta = (g2 - g1).rem_euclid(TAU);
        assert!(delta < 1e-2 || delta > TAU - 1e-2, "delta {}", delta);
    }

    #[test]
    fn zero_angle_rotation_is_identity() {
        let rotated = rotate_to_earth_fixed([1.0, 2.0, 3.0], 0.0);
        assert_eq!(rotated, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn quarter_turn_swaps_axes() {
        let rotated = rotate_to_earth_fixed([1.0, 0.0, 0.0], FRAC_PI_2);
        assert!(rotated[0].abs() < 1e-12);
        assert!((rotated[1] + 1.0).abs() < 1e-12);
        assert_eq!(rotated[2], 0.0);
    }

    #[test]
    fn rotation_preserves_norm_and_z() {
        let position = [4000.0, -2500.0, 5100.0];
        let rotated = rotate_to_earth_fixed(position, 2.71);
        let norm = |v: [f64; 3]| (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((norm(rotated) - norm(position)).abs() < 1e-9);
        assert_eq!(rotated[2], position[2]);
    }

    #[test]
    fn equatorial_point_has_zero_latitude() {
        let fix = terrestrial_to_geodetic([WGS84_A_KM + 420.0, 0.0, 0.0]);
        assert!(fix.latitude_deg.abs() < 1e-9);
        assert!(fix.longitude_deg.abs() < 1e-9);
        assert!((fix.altitude_km - 420.0).abs() < 1e-9);
    }

    #[test]
    fn polar_point_has_ninety_degree_latitude() {
        let polar_radius = WGS84_A_KM * (1.0 - WGS84_E2).sqrt();
        let fix = terrestrial_to_geodetic([0.0, 0.0, polar_radius + 420.0]);
        assert_eq!(fix.latitude_deg, 90.0);
        assert!((fix.altitude_km - 420.0).abs() < 1e-9);

        let south = terrestrial_to_geodetic([0.0, 0.0, -(polar_radius + 100.0)]);
        assert_eq!(south.latitude_deg, -90.0);
    }

    #[test]
    fn longitude_follows_the_y_axis() {
        let fix = terrestrial_to_geodetic([0.0, WGS84_A_KM + 420.0, 0.0]);
        assert!((fix.longitude_deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn geodetic_conversion_round_trips() {
        for &(lat, lon, alt) in &[
            (51.0, -30.0, 420.0),
            (-23.5, 133.9, 417.3),
            (0.1, 179.9, 410.0),
            (-80.0, 0.0, 425.0),
        ] {
            let fix = terrestrial_to_geodetic(geodetic_to_ecef(lat, lon, alt));
            assert!((fix.latitude_deg - lat).abs() < 1e-6, "lat {}", lat);
            assert!((fix.longitude_deg - lon).abs() < 1e-6, "lon {}", lon);
            assert!((fix.altitude_km - alt).abs() < 1e-5, "alt {}", alt);
        }
    }

    #[test]
    fn origin_does_not_panic() {
        let fix = terrestrial_to_geodetic([0.0, 0.0, 0.0]);
        assert!(fix.latitude_deg.is_finite());
        assert!(fix.longitude_deg.is_finite());
        assert!(fix.altitude_km.is_finite());
    }
}

use std::f64::consts::PI;

use crate::predict::ground_station::GroundStation;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Nominal LEO altitude used to size the circle. The footprint is a
/// visualization aid, never an elevation predicate, so one fixed altitude
/// is enough regardless of the tracked object.
pub const REFERENCE_ALTITUDE_KM: f64 = 400.0;
pub const FOOTPRINT_POINTS: usize = 100;

/// Boundary of the region from which a satellite at the reference altitude
/// appears at `min_elevation_deg` or higher, as (latitude, longitude)
/// degree pairs around the station.
pub fn visibility_footprint(station: &GroundStation, min_elevation_deg: f64) -> Vec<(f64, f64)> {
    visibility_footprint_points(station, min_elevation_deg, FOOTPRINT_POINTS)
}

pub fn visibility_footprint_points(
    station: &GroundStation,
    min_elevation_deg: f64,
    count: usize,
) -> Vec<(f64, f64)> {
    let horizon_km = (2.0 * EARTH_RADIUS_KM * REFERENCE_ALTITUDE_KM).sqrt();
    let ground_km = if min_elevation_deg <= 0.0 {
        horizon_km
    } else {
        // flat-slant approximation, capped at the geometric horizon
        (REFERENCE_ALTITUDE_KM / min_elevation_deg.to_radians().tan()).min(horizon_km)
    };
    let angular = ground_km / EARTH_RADIUS_KM;

    let lat1 = station.lat_rad();
    let lon1 = station.lon_rad();
    let (sin_lat1, cos_lat1) = (lat1.sin(), lat1.cos());
    let (sin_d, cos_d) = (angular.sin(), angular.cos());

    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let bearing = 2.0 * PI * i as f64 / count as f64;
        let lat2 = (sin_lat1 * cos_d + cos_lat1 * sin_d * bearing.cos()).asin();
        let lon2 = lon1 + (bearing.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * lat2.sin());
        points.push((lat2.to_degrees(), normalize_lon(lon2.to_degrees())));
    }
    points
}

fn normalize_lon(lon_deg: f64) -> f64 {
    (lon_deg + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod test {
    use super::*;

    fn station() -> GroundStation {
        GroundStation {
            latitude_deg: 40.0,
            longitude_deg: -88.0,
            altitude_km: 0.2,
        }
    }

    fn central_angle(a: (f64, f64), b: (f64, f64)) -> f64 {
        let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
        let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());
        let h = ((lat2 - lat1) / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * ((lon2 - lon1) / 2.0).sin().powi(2);
        2.0 * h.sqrt().asin()
    }

    #[test]
    fn returns_the_configured_point_count() {
        assert_eq!(visibility_footprint(&station(), 10.0).len(), 100);
        assert_eq!(visibility_footprint_points(&station(), 10.0, 36).len(), 36);
    }

    #[test]
    fn points_are_finite_and_in_range() {
        for (lat, lon) in visibility_footprint(&station(), 5.0) {
            assert!(lat.is_finite() && lon.is_finite());
            assert!((-90.0..=90.0).contains(&lat));
            assert!((-180.0..180.0).contains(&lon));
        }
    }

    #[test]
    fn circle_has_constant_radius_around_the_station() {
        let center = (40.0, -88.0);
        let expected = (REFERENCE_ALTITUDE_KM / 30.0_f64.to_radians().tan()) / EARTH_RADIUS_KM;
        for point in visibility_footprint(&station(), 30.0) {
            let radius = central_angle(center, point);
            assert!((radius - expected).abs() < 1e-6, "radius {}", radius);
        }
    }

    #[test]
    fn closes_into_a_loop() {
        let points = visibility_footprint(&station(), 30.0);
        let gap = central_angle(points[0], points[99]);
        let spacing = central_angle(points[0], points[1]);
        assert!(gap < 2.0 * spacing, "gap {} spacing {}", gap, spacing);
    }

    #[test]
    fn radius_shrinks_as_the_threshold_rises() {
        let center = (40.0, -88.0);
        let radius_at = |elevation: f64| {
            central_angle(center, visibility_footprint(&station(), elevation)[0])
        };
        assert!(radius_at(45.0) < radius_at(30.0));
        assert!(radius_at(30.0) < radius_at(0.0));
        // at or below the horizon the radius is pinned to the geometric horizon
        assert!((radius_at(0.0) - radius_at(-10.0)).abs() < 1e-12);
    }
}

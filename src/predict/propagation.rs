use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::ground_station::{GroundStation, ECC_SQ, SEMI_MAJOR_KM};

/// Topocentric look angles to the satellite at one instant.
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
}

/// Geodetic subsatellite point plus inertial speed.
#[derive(Debug, Clone, Copy)]
pub struct SubPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
    pub speed_km_s: f64,
}

/// Answers "where is the satellite, as seen from the station, at instant t".
///
/// The pass scanner depends only on this seam, so tests can drive the state
/// machine with synthetic elevation profiles instead of real orbits.
pub trait ObservationModel {
    fn observe(&self, timestamp: DateTime<Utc>) -> Result<Observation, PredictError>;
}

/// SGP4-backed model for one station/element-set pair.
pub struct Sgp4Model<'a> {
    pub station: &'a GroundStation,
    pub elements: &'a Elements,
    pub constants: &'a Constants,
}

impl Sgp4Model<'_> {
    pub fn subpoint(&self, timestamp: DateTime<Utc>) -> Result<SubPoint, PredictError> {
        subpoint(self.elements, self.constants, timestamp)
    }
}

impl ObservationModel for Sgp4Model<'_> {
    fn observe(&self, timestamp: DateTime<Utc>) -> Result<Observation, PredictError> {
        propagate_sample(self.station, self.elements, self.constants, timestamp)
    }
}

/// Propagate to `timestamp` and rotate into the Earth-fixed frame.
///
/// A non-success propagator status surfaces as `PredictError::Propagation`;
/// position and velocity are never read in that case.
fn propagate_ecef(
    elements: &Elements,
    constants: &Constants,
    timestamp: DateTime<Utc>,
) -> Result<([f64; 3], f64), PredictError> {
    let minutes = elements
        .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let prediction = constants
        .propagate(minutes)
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let sidereal =
        sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp.naive_utc()));

    let ecef = teme_to_ecef_position(prediction.position, sidereal);
    let v = prediction.velocity;
    let speed = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    Ok((ecef, speed))
}

pub fn propagate_sample(
    station: &GroundStation,
    elements: &Elements,
    constants: &Constants,
    timestamp: DateTime<Utc>,
) -> Result<Observation, PredictError> {
    let (sat_ecef, _) = propagate_ecef(elements, constants, timestamp)?;
    let sta_ecef = station.position_ecef_km();

    let dr = [
        sat_ecef[0] - sta_ecef[0],
        sat_ecef[1] - sta_ecef[1],
        sat_ecef[2] - sta_ecef[2],
    ];
    let range_km = (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt();

    let enu = ecef_to_enu(dr, station.lat_rad(), station.lon_rad());
    let azimuth = enu.0.atan2(enu.1).to_degrees().rem_euclid(360.0);
    let elevation = if range_km > 0.0 {
        (enu.2 / range_km).asin().to_degrees()
    } else {
        0.0
    };

    Ok(Observation {
        azimuth_deg: round2(azimuth),
        elevation_deg: round2(elevation),
        range_km: round2(range_km),
    })
}

pub fn subpoint(
    elements: &Elements,
    constants: &Constants,
    timestamp: DateTime<Utc>,
) -> Result<SubPoint, PredictError> {
    let (ecef, speed) = propagate_ecef(elements, constants, timestamp)?;
    let (latitude_deg, longitude_deg, altitude_km) = ecef_to_geodetic(ecef);
    Ok(SubPoint {
        latitude_deg,
        longitude_deg,
        altitude_km,
        speed_km_s: speed,
    })
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

pub fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}

/// Iterative WGS-84 inversion; converges to well below a meter in a few
/// rounds for orbital altitudes.
fn ecef_to_geodetic(ecef: [f64; 3]) -> (f64, f64, f64) {
    let [x, y, z] = ecef;
    let p = (x * x + y * y).sqrt();
    if p < 1e-6 {
        // over a pole
        let polar_radius = SEMI_MAJOR_KM * (1.0 - ECC_SQ).sqrt();
        let lat = if z >= 0.0 { 90.0 } else { -90.0 };
        return (lat, 0.0, z.abs() - polar_radius);
    }

    let lon = y.atan2(x);
    let mut lat = (z / (p * (1.0 - ECC_SQ))).atan();
    let mut alt = 0.0;
    for _ in 0..5 {
        let sin_lat = lat.sin();
        let n = SEMI_MAJOR_KM / (1.0 - ECC_SQ * sin_lat * sin_lat).sqrt();
        alt = p / lat.cos() - n;
        lat = (z / (p * (1.0 - ECC_SQ * n / (n + alt)))).atan();
    }
    (lat.to_degrees(), lon.to_degrees(), alt)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

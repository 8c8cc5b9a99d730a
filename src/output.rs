use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::predict::{GroundStation, NextPass, Observation, Pass, SubPoint};

/// Everything one invocation reports, in the JSON shape downstream tooling
/// consumes.
#[derive(Debug, Serialize)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub satellite: SatelliteReport,
    pub ground_station: StationReport,
    pub visibility: VisibilityReport,
    pub predictions: PredictionsReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footprint: Option<Vec<(f64, f64)>>,
}

#[derive(Debug, Serialize)]
pub struct SatelliteReport {
    pub name: String,
    pub position: PositionReport,
    pub orbital_period_minutes: f64,
}

#[derive(Debug, Serialize)]
pub struct PositionReport {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
    pub velocity_kms: f64,
}

#[derive(Debug, Serialize)]
pub struct StationReport {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
}

#[derive(Debug, Serialize)]
pub struct VisibilityReport {
    pub azimuth_degrees: f64,
    pub elevation_degrees: f64,
    pub range_km: f64,
    pub is_visible: bool,
}

#[derive(Debug, Serialize)]
pub struct PredictionsReport {
    pub prediction_period_hours: f64,
    pub minimum_elevation_degrees: f64,
    pub total_passes: usize,
    pub passes: Vec<Pass>,
    pub next_pass: Option<NextPass>,
}

impl Report {
    pub fn new(
        timestamp: DateTime<Utc>,
        satellite_name: &str,
        position: &SubPoint,
        observation: &Observation,
        orbital_period_minutes: f64,
        station: &GroundStation,
        horizon: Duration,
        min_elevation_deg: f64,
        passes: Vec<Pass>,
        next_pass: Option<NextPass>,
        footprint: Option<Vec<(f64, f64)>>,
    ) -> Self {
        Self {
            timestamp,
            satellite: SatelliteReport {
                name: satellite_name.to_string(),
                position: PositionReport {
                    latitude: round6(position.latitude_deg),
                    longitude: round6(position.longitude_deg),
                    altitude_km: round2(position.altitude_km),
                    velocity_kms: round2(position.speed_km_s),
                },
                orbital_period_minutes: round2(orbital_period_minutes),
            },
            ground_station: StationReport {
                latitude: station.latitude_deg,
                longitude: station.longitude_deg,
                altitude_km: station.altitude_km,
            },
            visibility: VisibilityReport {
                azimuth_degrees: observation.azimuth_deg,
                elevation_degrees: observation.elevation_deg,
                range_km: observation.range_km,
                is_visible: observation.elevation_deg > 0.0,
            },
            predictions: PredictionsReport {
                prediction_period_hours: round2(
                    horizon.num_milliseconds() as f64 / 3_600_000.0,
                ),
                minimum_elevation_degrees: min_elevation_deg,
                total_passes: passes.len(),
                passes,
                next_pass,
            },
            footprint,
        }
    }
}

pub fn print_json(report: &Report) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn print_human(report: &Report) {
    let position = &report.satellite.position;
    println!("Satellite: {}", report.satellite.name);
    println!("Latitude:  {:.4}°", position.latitude);
    println!("Longitude: {:.4}°", position.longitude);
    println!("Altitude:  {:.2} km", position.altitude_km);
    println!("Velocity:  {:.2} km/s", position.velocity_kms);
    println!(
        "Orbital period: {:.1} minutes",
        report.satellite.orbital_period_minutes
    );

    let visibility = &report.visibility;
    println!();
    println!("Azimuth:   {:.2}°", visibility.azimuth_degrees);
    println!("Elevation: {:.2}°", visibility.elevation_degrees);
    println!("Range:     {:.2} km", visibility.range_km);
    if visibility.is_visible {
        println!("Satellite is currently visible from the ground station.");
    } else {
        println!("Satellite is NOT currently visible from the ground station.");
    }

    let predictions = &report.predictions;
    println!();
    println!(
        "Pass predictions (next {} hours, min elevation {}°):",
        predictions.prediction_period_hours, predictions.minimum_elevation_degrees
    );
    println!("Total passes: {}", predictions.total_passes);

    if predictions.passes.is_empty() {
        println!("No passes found in the prediction window.");
    } else {
        for (i, pass) in predictions.passes.iter().take(5).enumerate() {
            println!();
            println!("Pass {}:", i + 1);
            println!(
                "  Start:    {}",
                pass.start_time.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!(
                "  End:      {}",
                pass.end_time.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("  Duration: {} minutes", pass.duration_minutes);
            println!(
                "  Max elevation: {}° at {}",
                pass.max_elevation,
                pass.max_elevation_time.format("%H:%M:%S UTC")
            );
        }

        if let Some(next) = &predictions.next_pass {
            println!();
            if next.time_to_next_pass_minutes > 0.0 {
                println!("Next pass in {:.1} minutes", next.time_to_next_pass_minutes);
            } else {
                println!("Pass is happening now or just started");
            }
        }
    }

    if let Some(points) = &report.footprint {
        println!();
        println!("Visibility footprint: {} boundary points", points.len());
    }
}

#[derive(Debug, Serialize)]
struct ErrorReport {
    error: String,
    timestamp: DateTime<Utc>,
}

pub fn print_error(message: &str, json: bool) {
    if json {
        let report = ErrorReport {
            error: message.to_string(),
            timestamp: Utc::now(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(body) => println!("{}", body),
            Err(_) => eprintln!("Error: {}", message),
        }
    } else {
        eprintln!("Error: {}", message);
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn report() -> Report {
        let start = Utc.with_ymd_and_hms(2026, 8, 6, 13, 10, 0).unwrap();
        let pass = Pass {
            start_time: start,
            end_time: start + Duration::minutes(6),
            max_elevation: 42.5,
            max_elevation_time: start + Duration::minutes(3),
            duration_minutes: 6.0,
        };
        let next_pass = NextPass {
            time_to_next_pass_minutes: 70.0,
            next_pass: pass.clone(),
        };
        Report::new(
            Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap(),
            "ISS (ZARYA)",
            &SubPoint {
                latitude_deg: 12.3456789,
                longitude_deg: -45.6789012,
                altitude_km: 417.234,
                speed_km_s: 7.6612,
            },
            &Observation {
                azimuth_deg: 123.45,
                elevation_deg: -12.3,
                range_km: 2345.67,
            },
            92.92834,
            &GroundStation {
                latitude_deg: 40.0,
                longitude_deg: -88.0,
                altitude_km: 0.2,
            },
            Duration::hours(24),
            10.0,
            vec![pass],
            Some(next_pass),
            None,
        )
    }

    #[test]
    fn report_shape_matches_the_output_contract() {
        let value = serde_json::to_value(report()).unwrap();

        assert_eq!(value["satellite"]["name"], "ISS (ZARYA)");
        assert_eq!(value["satellite"]["position"]["latitude"], 12.345679);
        assert_eq!(value["satellite"]["position"]["altitude_km"], 417.23);
        assert_eq!(value["satellite"]["position"]["velocity_kms"], 7.66);
        assert_eq!(value["satellite"]["orbital_period_minutes"], 92.93);
        assert_eq!(value["ground_station"]["latitude"], 40.0);
        assert_eq!(value["visibility"]["is_visible"], false);
        assert_eq!(value["predictions"]["prediction_period_hours"], 24.0);
        assert_eq!(value["predictions"]["total_passes"], 1);
        assert_eq!(
            value["predictions"]["next_pass"]["time_to_next_pass_minutes"],
            70.0
        );
        assert_eq!(
            value["predictions"]["passes"][0]["start_time"],
            "2026-08-06T13:10:00Z"
        );
        // footprint is omitted entirely when not requested
        assert!(value.get("footprint").is_none());
    }
}

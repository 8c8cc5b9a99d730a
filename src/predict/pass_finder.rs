use chrono::{DateTime, Duration, Utc};

use crate::predict::error::PredictError;
use crate::predict::propagation::ObservationModel;
use crate::predict::types::{NextPass, Pass};

const MIN_STEP_MINUTES: f64 = 1.0;
const SAMPLES_PER_REVOLUTION: f64 = 60.0;

/// Sampling step in minutes for a given orbital period: at least 60 samples
/// per revolution, with a 1 minute floor to bound the total sample count.
pub fn step_minutes(period_minutes: f64) -> f64 {
    (period_minutes / SAMPLES_PER_REVOLUTION).max(MIN_STEP_MINUTES)
}

/// Time span scanned by one prediction run.
#[derive(Debug, Clone, Copy)]
pub struct PredictionWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step: Duration,
}

impl PredictionWindow {
    pub fn new(
        start: DateTime<Utc>,
        horizon: Duration,
        period_minutes: f64,
    ) -> Result<Self, PredictError> {
        if horizon <= Duration::zero() {
            return Err(PredictError::EmptyWindow);
        }
        let step = Duration::milliseconds((step_minutes(period_minutes) * 60_000.0).round() as i64);
        Ok(Self {
            start,
            end: start + horizon,
            step,
        })
    }
}

/// Scan the window at the fixed step and materialize contiguous
/// above-threshold runs as [Pass] records, ordered by start time.
///
/// A pass closes on the first sample at or below the threshold; its end is
/// taken one step back, the last instant known to be above. A pass still
/// open when the horizon runs out is emitted truncated at the last sampled
/// instant rather than dropped.
pub fn predict_passes(
    model: &dyn ObservationModel,
    window: &PredictionWindow,
    min_elevation_deg: f64,
) -> Result<Vec<Pass>, PredictError> {
    if !(-90.0..=90.0).contains(&min_elevation_deg) {
        return Err(PredictError::InvalidThreshold(min_elevation_deg));
    }

    let mut passes = Vec::new();
    let mut cursor = window.start;

    let mut pass_start: Option<DateTime<Utc>> = None;
    let mut max_el = f64::NEG_INFINITY;
    let mut max_el_time = cursor;
    let mut last_above = cursor;

    while cursor <= window.end {
        let elevation = match model.observe(cursor) {
            Ok(sample) => sample.elevation_deg,
            Err(e) => {
                // A failed sample reads as below the horizon, but is never
                // silently swallowed.
                log::warn!("propagation failed at {}: {}", cursor, e);
                f64::NEG_INFINITY
            }
        };

        if elevation > min_elevation_deg {
            if pass_start.is_none() {
                pass_start = Some(cursor);
                max_el = elevation;
                max_el_time = cursor;
            } else if elevation > max_el {
                max_el = elevation;
                max_el_time = cursor;
            }
            last_above = cursor;
        } else if let Some(start) = pass_start.take() {
            let end = cursor - window.step;
            passes.push(finish_pass(start, end, max_el, max_el_time));
            max_el = f64::NEG_INFINITY;
        }

        cursor += window.step;
    }

    if let Some(start) = pass_start {
        passes.push(finish_pass(start, last_above, max_el, max_el_time));
    }

    Ok(passes)
}

fn finish_pass(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    max_el: f64,
    max_el_time: DateTime<Utc>,
) -> Pass {
    let duration = (end - start).num_milliseconds() as f64 / 60_000.0;
    Pass {
        start_time: start,
        end_time: end,
        max_elevation: round2(max_el),
        max_elevation_time: max_el_time,
        duration_minutes: round1(duration),
    }
}

/// Reduce an ordered pass list to "time until the first pass", measured
/// against the same reference instant the scan started from. Zero or
/// negative minutes mean the pass is already in progress.
pub fn summarize_next_pass(passes: &[Pass], now: DateTime<Utc>) -> Option<NextPass> {
    let next_pass = passes.first()?.clone();
    let minutes = (next_pass.start_time - now).num_milliseconds() as f64 / 60_000.0;
    Some(NextPass {
        time_to_next_pass_minutes: round1(minutes),
        next_pass,
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

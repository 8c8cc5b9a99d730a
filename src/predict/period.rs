use sgp4::Elements;

use crate::predict::error::PredictError;

const MINUTES_PER_DAY: f64 = 1440.0;

/// Orbital period in minutes, from the mean-motion field of the element set.
///
/// The period is only used to size the sampling step; it is never asserted
/// against the propagator's own orbit model.
pub fn estimate_period(elements: &Elements) -> Result<f64, PredictError> {
    let mean_motion = elements.mean_motion;
    if !mean_motion.is_finite() || mean_motion <= 0.0 {
        return Err(PredictError::InvalidElements(format!(
            "mean motion must be a positive number of rev/day, got {}",
            mean_motion
        )));
    }
    Ok(MINUTES_PER_DAY / mean_motion)
}

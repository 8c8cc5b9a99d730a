mod error;
mod footprint;
mod ground_station;
mod pass_finder;
mod period;
mod propagation;
mod types;

pub use error::PredictError;
pub use footprint::visibility_footprint;
pub use ground_station::GroundStation;
pub use pass_finder::{predict_passes, summarize_next_pass, PredictionWindow};
pub use period::estimate_period;
pub use propagation::{Observation, ObservationModel, Sgp4Model, SubPoint};
pub use types::{NextPass, Pass};

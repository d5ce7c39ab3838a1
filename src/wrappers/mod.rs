// Environment wrappers and observation transforms.

pub mod range_rescaler;
pub mod rescale_observation;

use ndarray::ArrayD;

use crate::core::Result;
use crate::spaces::BoxSpace;

pub use range_rescaler::{RangeRescaler, RescaleConfig, rescale_values};
pub use rescale_observation::RescaleObservation;

/// A per-observation transform that declares the domain of its output.
pub trait ObservationTransform<T> {
    fn transform(&self, value: &ArrayD<T>) -> Result<ArrayD<T>>;

    fn output_space(&self) -> &BoxSpace<T>;
}

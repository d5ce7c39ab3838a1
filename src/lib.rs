pub mod core;
pub mod spaces;
pub mod utils;
pub mod wrappers;
pub mod policies;

pub use crate::core::{Env, GymError, Info, InfoValue, ObservationSpace, Result, Step};
pub use crate::spaces::{Bound, BoxSpace, DType, Discrete, DynSpace, MultiBinary, MultiDiscrete, Scalar, Space};
pub use crate::wrappers::{ObservationTransform, RangeRescaler, RescaleConfig, RescaleObservation, rescale_values};
pub use crate::policies::{Policy, UniformPolicy};
pub use crate::utils::{RngStream, SeedSequence, rng_from_seed, spherical};

pub mod interval;
pub mod random;
pub mod rng;

pub use random::{spherical, standard_exponential, standard_normal};
pub use rng::{RngStream, SeedSequence, rng_from_seed};

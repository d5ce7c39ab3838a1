// Action-selection policies.

pub mod uniform;

use ndarray::ArrayD;
use rand::Rng;

use crate::core::Result;
use crate::spaces::Scalar;

pub use uniform::UniformPolicy;

/// A stochastic policy over batched array observations.
pub trait Policy<T: Scalar> {
    /// Sample one action per observation in the batch.
    fn actions<R: Rng + ?Sized>(&self, observations: &ArrayD<T>, rng: &mut R) -> Result<ArrayD<T>>;

    /// Log-density of `actions` given `observations`, with a trailing axis of length 1.
    fn log_probs(&self, observations: &ArrayD<T>, actions: &ArrayD<T>) -> Result<ArrayD<T>>;

    fn probs(&self, observations: &ArrayD<T>, actions: &ArrayD<T>) -> Result<ArrayD<T>> {
        Ok(self.log_probs(observations, actions)?.mapv(|v| T::from_f64(v.to_f64().exp())))
    }
}

//! Random sampling helpers that need more than a uniform draw.

use ndarray::{ArrayD, Axis, IxDyn, Zip};
use rand::distributions::Standard;
use rand::Rng;

use crate::core::{GymError, Result};

/// Draw from N(0, 1) with the Box-Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - u lies in (0, 1], keeping ln() finite.
    let u1: f64 = 1.0 - rng.sample::<f64, _>(Standard);
    let u2: f64 = rng.sample(Standard);
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Draw from Exp(1) by inversion.
pub fn standard_exponential<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u: f64 = rng.sample(Standard);
    -(1.0 - u).ln()
}

/// Sample points uniformly on the unit sphere in `ndim` dimensions.
///
/// The result has shape `(ndim, *size)`: every lane along axis 0 is one unit
/// vector. An empty `size` yields a single vector of shape `(ndim,)`.
pub fn spherical<R: Rng + ?Sized>(size: &[usize], ndim: usize, rng: &mut R) -> Result<ArrayD<f64>> {
    if ndim == 0 {
        return Err(GymError::InvalidArgument("spherical sampling requires ndim > 0".into()));
    }
    let mut shape = Vec::with_capacity(size.len() + 1);
    shape.push(ndim);
    shape.extend_from_slice(size);

    let mut out = ArrayD::zeros(IxDyn(&shape));
    Zip::from(out.lanes_mut(Axis(0))).for_each(|mut lane| {
        loop {
            lane.iter_mut().for_each(|x| *x = standard_normal(rng));
            let norm = lane.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm > 0.0 {
                lane.mapv_inplace(|x| x / norm);
                break;
            }
        }
    });
    Ok(out)
}

use ndarray::{ArrayD, Axis, IxDyn, Zip};
use rand::Rng;
use tracing::debug;

use crate::core::{GymError, Result};
use crate::policies::Policy;
use crate::spaces::{BoxSpace, Scalar, Space};
use crate::utils::interval::log_width;

/// Samples actions uniformly from a bounded box, independently of the observation.
///
/// Batched calls follow the usual convention: the trailing `input_shape.len()`
/// axes of an observation array are one observation, and every leading axis is
/// a batch axis. Each action element is an independent uniform, so the joint
/// density is the product over the action's elements.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformPolicy<T> {
    input_shape: Vec<usize>,
    action_space: BoxSpace<T>,
    log_density: f64,
}

impl<T: Scalar> UniformPolicy<T> {
    pub fn new(input_shape: Vec<usize>, action_space: BoxSpace<T>) -> Result<Self> {
        if !action_space.is_bounded() {
            return Err(GymError::InvalidBounds(format!(
                "uniform policy needs a bounded action space, got low={}, high={}",
                action_space.low(),
                action_space.high()
            )));
        }
        if !Zip::from(action_space.low()).and(action_space.high()).all(|l, h| l < h) {
            return Err(GymError::InvalidBounds(format!(
                "uniform policy needs low < high, got low={}, high={}",
                action_space.low(),
                action_space.high()
            )));
        }
        let log_density = Zip::from(action_space.low())
            .and(action_space.high())
            .fold(0.0, |acc, &l, &h| acc - log_width(l.to_f64(), h.to_f64()));
        debug!(
            input_shape = ?input_shape,
            action_shape = ?action_space.shape(),
            dtype = %action_space.dtype(),
            "constructed uniform policy"
        );
        Ok(Self { input_shape, action_space, log_density })
    }

    pub fn action_space(&self) -> &BoxSpace<T> { &self.action_space }
    pub fn input_shape(&self) -> &[usize] { &self.input_shape }

    /// Leading axes of `observations` that are not part of a single observation.
    fn batch_shape<'a>(&self, observations: &'a ArrayD<T>) -> Result<&'a [usize]> {
        let shape = observations.shape();
        let rank = self.input_shape.len();
        if shape.len() < rank || shape[shape.len() - rank..] != self.input_shape[..] {
            return Err(GymError::shape_mismatch(&self.input_shape, shape));
        }
        Ok(&shape[..shape.len() - rank])
    }

    fn action_batch_len(&self, batch: &[usize], actions: &ArrayD<T>) -> Result<usize> {
        let expected: Vec<usize> = batch.iter().chain(self.action_space.shape()).copied().collect();
        if actions.shape() != expected.as_slice() {
            return Err(GymError::shape_mismatch(&expected, actions.shape()));
        }
        Ok(batch.iter().product())
    }
}

impl<T: Scalar> Policy<T> for UniformPolicy<T> {
    fn actions<R: Rng + ?Sized>(&self, observations: &ArrayD<T>, rng: &mut R) -> Result<ArrayD<T>> {
        let batch = self.batch_shape(observations)?;
        let action_shape = self.action_space.shape();
        let n: usize = batch.iter().product();
        let mut data = Vec::with_capacity(n * action_shape.iter().product::<usize>());
        for _ in 0..n {
            data.extend(self.action_space.sample(rng).iter().copied());
        }
        let shape: Vec<usize> = batch.iter().chain(action_shape).copied().collect();
        ArrayD::from_shape_vec(IxDyn(&shape), data)
            .map_err(|_| GymError::shape_mismatch(&shape, &[n]))
    }

    fn log_probs(&self, observations: &ArrayD<T>, actions: &ArrayD<T>) -> Result<ArrayD<T>> {
        let batch = self.batch_shape(observations)?;
        let n = self.action_batch_len(batch, actions)?;
        let action_len = self.action_space.low().len();
        let flat = actions.to_shape((n, action_len)).map_err(|_| {
            GymError::shape_mismatch(&[n, action_len], actions.shape())
        })?;
        let values: Vec<T> = flat
            .axis_iter(Axis(0))
            .map(|row| {
                let inside = row
                    .iter()
                    .zip(self.action_space.low().iter().zip(self.action_space.high().iter()))
                    .all(|(a, (l, h))| l <= a && a <= h);
                T::from_f64(if inside { self.log_density } else { f64::NEG_INFINITY })
            })
            .collect();
        let shape: Vec<usize> = batch.iter().copied().chain(std::iter::once(1)).collect();
        ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|_| GymError::shape_mismatch(&shape, &[n]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::rng::rng_from_seed;

    fn policy() -> UniformPolicy<f32> {
        let space = BoxSpace::from_bounds(vec![-1.0f32, 0.0], vec![1.0f32, 0.5], &[2]).unwrap();
        UniformPolicy::new(vec![3], space).unwrap()
    }

    #[test]
    fn actions_follow_batch_shape_and_stay_in_bounds() {
        let p = policy();
        let mut rng = rng_from_seed(1);
        let obs = ArrayD::<f32>::zeros(IxDyn(&[4, 5, 3]));
        let acts = p.actions(&obs, &mut rng).unwrap();
        assert_eq!(acts.shape(), &[4, 5, 2]);
        for row in acts.to_shape((20, 2)).unwrap().axis_iter(Axis(0)) {
            assert!(p.action_space().contains(&row.to_owned().into_dyn()));
        }
    }

    #[test]
    fn single_observation_yields_single_action() {
        let p = policy();
        let mut rng = rng_from_seed(2);
        let acts = p.actions(&ArrayD::zeros(IxDyn(&[3])), &mut rng).unwrap();
        assert_eq!(acts.shape(), &[2]);
    }

    #[test]
    fn observation_shape_must_end_with_input_shape() {
        let p = policy();
        let mut rng = rng_from_seed(3);
        let err = p.actions(&ArrayD::zeros(IxDyn(&[4, 2])), &mut rng).unwrap_err();
        assert!(matches!(err, GymError::ShapeMismatch { .. }));
    }

    #[test]
    fn log_probs_inside_and_outside() {
        let p = policy();
        let obs = ArrayD::<f32>::zeros(IxDyn(&[2, 3]));
        let acts = ndarray::arr2(&[[0.0f32, 0.25], [2.0, 0.25]]).into_dyn();
        let lp = p.log_probs(&obs, &acts).unwrap();
        assert_eq!(lp.shape(), &[2, 1]);
        // -ln(2) - ln(0.5) == 0
        assert!(lp[[0, 0]].abs() < 1e-6);
        assert_eq!(lp[[1, 0]], f32::NEG_INFINITY);

        let pr = p.probs(&obs, &acts).unwrap();
        assert!((pr[[0, 0]] - 1.0).abs() < 1e-6);
        assert_eq!(pr[[1, 0]], 0.0);
    }

    #[test]
    fn log_probs_reject_misshapen_actions() {
        let p = policy();
        let obs = ArrayD::<f32>::zeros(IxDyn(&[2, 3]));
        let acts = ArrayD::<f32>::zeros(IxDyn(&[3, 2]));
        assert!(matches!(p.log_probs(&obs, &acts), Err(GymError::ShapeMismatch { .. })));
    }

    #[test]
    fn full_range_action_space_is_usable() {
        let space = BoxSpace::from_bounds(-f64::MAX, f64::MAX, &[2]).unwrap();
        let p = UniformPolicy::new(vec![1], space).unwrap();
        let mut rng = rng_from_seed(4);
        let obs = ArrayD::<f64>::zeros(IxDyn(&[3, 1]));
        let acts = p.actions(&obs, &mut rng).unwrap();
        assert_eq!(acts.shape(), &[3, 2]);
        assert!(acts.iter().all(|a| a.is_finite()));
        let lp = p.log_probs(&obs, &acts).unwrap();
        let expected = -2.0 * (f64::MAX.ln() + std::f64::consts::LN_2);
        assert!(lp.iter().all(|&v| v.is_finite() && (v - expected).abs() < 1e-9));

        let narrow = BoxSpace::from_bounds(-f32::MAX, f32::MAX, &[1]).unwrap();
        let p = UniformPolicy::new(vec![1], narrow).unwrap();
        let acts = p.actions(&ArrayD::<f32>::zeros(IxDyn(&[1])), &mut rng).unwrap();
        assert!(p.action_space().contains(&acts));
        let lp = p.log_probs(&ArrayD::<f32>::zeros(IxDyn(&[1])), &acts).unwrap();
        assert!(lp[[0]].is_finite());
    }

    #[test]
    fn unbounded_or_degenerate_action_space_is_invalid() {
        let unbounded = BoxSpace::from_bounds(f64::NEG_INFINITY, 1.0, &[1]).unwrap();
        assert!(matches!(UniformPolicy::new(vec![1], unbounded), Err(GymError::InvalidBounds(_))));
        let flat = BoxSpace::from_bounds(1.0f64, 1.0, &[1]).unwrap();
        assert!(matches!(UniformPolicy::new(vec![1], flat), Err(GymError::InvalidBounds(_))));
    }
}

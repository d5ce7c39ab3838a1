use ndarray::ArrayD;

use crate::core::{Env, GymError, Info, ObservationSpace, Result, Step};
use crate::spaces::{Bound, BoxSpace, DynSpace, Scalar};
use crate::wrappers::{ObservationTransform, RangeRescaler, RescaleConfig};

/// Rescales every observation of a box-observation environment into `[low, high]`.
///
/// The wrapped environment's observation space is consulted on each
/// observation, so environments that re-declare their bounds mid-episode are
/// rescaled against the bounds in effect at that step.
pub struct RescaleObservation<E: ObservationSpace> {
    inner: E,
    rescaler: RangeRescaler<E::Scalar>,
    space: DynSpace<E::Scalar>,
}

impl<E, T> RescaleObservation<E>
where
    E: Env<Obs = ArrayD<T>> + ObservationSpace<Scalar = T>,
    T: Scalar,
{
    pub fn new<L, H>(inner: E, low: L, high: H) -> Result<Self>
    where
        L: Into<Bound<T>>,
        H: Into<Bound<T>>,
    {
        let rescaler = RangeRescaler::new(inner.observation_space(), low, high)?;
        let space = DynSpace::Box(rescaler.output_space().clone());
        Ok(Self { inner, rescaler, space })
    }

    pub fn from_config(inner: E, config: RescaleConfig<T>) -> Result<Self> {
        Self::new(inner, config.low, config.high)
    }

    pub fn rescaler(&self) -> &RangeRescaler<T> { &self.rescaler }
    pub fn inner(&self) -> &E { &self.inner }
    pub fn inner_mut(&mut self) -> &mut E { &mut self.inner }
    pub fn into_inner(self) -> E { self.inner }
}

impl<E, T> ObservationTransform<T> for RescaleObservation<E>
where
    E: Env<Obs = ArrayD<T>> + ObservationSpace<Scalar = T>,
    T: Scalar,
{
    fn transform(&self, value: &ArrayD<T>) -> Result<ArrayD<T>> {
        let source = self.inner.observation_space();
        let source = source.as_box().ok_or_else(|| {
            GymError::UnsupportedSpace(format!(
                "wrapped environment now declares a {} observation space",
                source.kind()
            ))
        })?;
        self.rescaler.rescale(source, value)
    }

    fn output_space(&self) -> &BoxSpace<T> { self.rescaler.output_space() }
}

impl<E, T> ObservationSpace for RescaleObservation<E>
where
    E: Env<Obs = ArrayD<T>> + ObservationSpace<Scalar = T>,
    T: Scalar,
{
    type Scalar = T;

    fn observation_space(&self) -> &DynSpace<T> { &self.space }
}

impl<E, T> Env for RescaleObservation<E>
where
    E: Env<Obs = ArrayD<T>> + ObservationSpace<Scalar = T>,
    T: Scalar,
{
    type Obs = ArrayD<T>;
    type Act = E::Act;

    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Obs, Info)> {
        let (obs, info) = self.inner.reset(seed)?;
        Ok((self.transform(&obs)?, info))
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        let s = self.inner.step(action)?;
        let obs = self.transform(&s.observation)?;
        Ok(Step::new(obs, s.reward, s.terminated, s.truncated, s.info))
    }

    fn close(&mut self) { self.inner.close() }
}

// Linear remapping of box-bounded observations into a target range.

use ndarray::{ArrayD, Zip};
use tracing::{debug, trace};

use crate::core::{GymError, Result};
use crate::spaces::bound::broadcast_shapes;
use crate::spaces::{Bound, BoxSpace, DynSpace, Scalar};
use crate::utils::interval::{lerp, unit_position};

/// Maps values from a source box's bounds onto `[low, high]`, clamping the result.
///
/// The source bounds are passed to every [`RangeRescaler::rescale`] call rather
/// than captured at construction, so a source that re-declares its bounds
/// between observations is mapped with the bounds current at that moment.
/// [`RescaleObservation`](crate::wrappers::RescaleObservation) is the
/// [`ObservationTransform`](crate::wrappers::ObservationTransform) built on it,
/// since `rescale` needs the source box that only the wrapped env can supply.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeRescaler<T> {
    space: BoxSpace<T>,
}

impl<T: Scalar> RangeRescaler<T> {
    /// Validate the target range against `source` and broadcast it to the source shape.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// 1. `InvalidBounds` when `low` or `high` holds a non-finite value.
    /// 2. `InvalidBounds` when `high <= low` anywhere.
    /// 3. `UnsupportedSpace` when `source` is not a box.
    /// 4. `InvalidBounds` when the source box has a non-finite bound.
    /// 5. `InvalidBounds` when the source box is degenerate (`high <= low`).
    pub fn new<L, H>(source: &DynSpace<T>, low: L, high: H) -> Result<Self>
    where
        L: Into<Bound<T>>,
        H: Into<Bound<T>>,
    {
        let low = low.into();
        let high = high.into();

        if !low.is_finite() || !high.is_finite() {
            return Err(GymError::InvalidBounds(format!(
                "target low and high must be finite, got low={low:?}, high={high:?}"
            )));
        }

        let (low_shape, high_shape) = (low.shape(), high.shape());
        let common = broadcast_shapes(&low_shape, &high_shape)
            .ok_or_else(|| GymError::shape_mismatch(&low_shape, &high_shape))?;
        if !strictly_below(&low.broadcast_to(&common)?, &high.broadcast_to(&common)?) {
            return Err(GymError::InvalidBounds(format!(
                "target low must be smaller than high, got low={low:?}, high={high:?}"
            )));
        }

        let src = source.as_box().ok_or_else(|| {
            GymError::UnsupportedSpace(format!("expected a Box observation space, got {}", source.kind()))
        })?;

        check_source(src)?;

        let shape = src.shape();
        let space = BoxSpace::new(low.broadcast_to(shape)?, high.broadcast_to(shape)?)?;
        debug!(shape = ?shape, dtype = %space.dtype(), "constructed range rescaler");
        Ok(Self { space })
    }

    /// Remap `value` from `source`'s current bounds into the target range.
    ///
    /// Out-of-range inputs are clamped to the nearest target bound rather than
    /// rejected. Fails with `ShapeMismatch` when shapes disagree and with
    /// `InvalidBounds` when `source` has a non-finite or degenerate bound.
    pub fn rescale(&self, source: &BoxSpace<T>, value: &ArrayD<T>) -> Result<ArrayD<T>> {
        let shape = self.space.shape();
        if source.shape() != shape {
            return Err(GymError::shape_mismatch(shape, source.shape()));
        }
        check_source(source)?;
        if value.shape() != shape {
            return Err(GymError::shape_mismatch(shape, value.shape()));
        }
        let (out, clamped) = remap(value, source.low(), source.high(), self.space.low(), self.space.high());
        if clamped > 0 {
            trace!(clamped, "rescaled observation clamped into target range");
        }
        Ok(out)
    }

    /// The declared domain of rescaled values, `[low, high]`.
    pub fn output_space(&self) -> &BoxSpace<T> { &self.space }
    pub fn low(&self) -> &ArrayD<T> { self.space.low() }
    pub fn high(&self) -> &ArrayD<T> { self.space.high() }
}

/// Remap `values` from `[old_low, old_high]` to `[new_low, new_high]` and clamp.
/// All five arrays must share one shape.
pub fn rescale_values<T: Scalar>(
    values: &ArrayD<T>,
    old_low: &ArrayD<T>,
    old_high: &ArrayD<T>,
    new_low: &ArrayD<T>,
    new_high: &ArrayD<T>,
) -> Result<ArrayD<T>> {
    let shape = values.shape();
    for bound in [old_low, old_high, new_low, new_high] {
        if bound.shape() != shape {
            return Err(GymError::shape_mismatch(shape, bound.shape()));
        }
    }
    Ok(remap(values, old_low, old_high, new_low, new_high).0)
}

// Shapes are checked by the callers. The position is clamped to [0, 1] before
// interpolating so that finite inputs never produce NaN or infinities.
fn remap<T: Scalar>(
    values: &ArrayD<T>,
    old_low: &ArrayD<T>,
    old_high: &ArrayD<T>,
    new_low: &ArrayD<T>,
    new_high: &ArrayD<T>,
) -> (ArrayD<T>, usize) {
    let mut clamped = 0usize;
    let out = Zip::from(values).and(old_low).and(old_high).and(new_low).and(new_high).map_collect(
        |&v, &ol, &oh, &nl, &nh| {
            let t = unit_position(v.to_f64(), ol.to_f64(), oh.to_f64());
            let t = if t < 0.0 {
                clamped += 1;
                0.0
            } else if t > 1.0 {
                clamped += 1;
                1.0
            } else {
                t
            };
            let x = T::from_f64(lerp(nl.to_f64(), nh.to_f64(), t));
            if x < nl {
                nl
            } else if x > nh {
                nh
            } else {
                x
            }
        },
    );
    (out, clamped)
}

fn check_source<T: Scalar>(src: &BoxSpace<T>) -> Result<()> {
    if !src.is_bounded() {
        return Err(GymError::InvalidBounds(format!(
            "observation space low and high must be finite, got low={}, high={}",
            src.low(),
            src.high()
        )));
    }
    if !strictly_below(src.low(), src.high()) {
        return Err(GymError::InvalidBounds(format!(
            "observation space is degenerate (high <= low), got low={}, high={}",
            src.low(),
            src.high()
        )));
    }
    Ok(())
}

fn strictly_below<T: Scalar>(low: &ArrayD<T>, high: &ArrayD<T>) -> bool {
    Zip::from(low).and(high).all(|l, h| l < h)
}

/// Serializable target range, resolved against a source space with [`RescaleConfig::build`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RescaleConfig<T> {
    pub low: Bound<T>,
    pub high: Bound<T>,
}

impl<T: Scalar> RescaleConfig<T> {
    pub fn new<L: Into<Bound<T>>, H: Into<Bound<T>>>(low: L, high: H) -> Self {
        Self { low: low.into(), high: high.into() }
    }

    pub fn build(self, source: &DynSpace<T>) -> Result<RangeRescaler<T>> {
        RangeRescaler::new(source, self.low, self.high)
    }
}

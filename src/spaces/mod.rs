/// Space implementations: discrete, multi-discrete, box and composite domains.

pub mod bound;
pub mod dtype;
pub mod interop;
pub mod space;

use std::collections::BTreeMap;

use ndarray::{ArrayD, IxDyn, Zip};
use rand::distributions::{Distribution, Standard, Uniform};
use rand::Rng;

use crate::core::{GymError, Result};
use crate::utils::interval::lerp;
use crate::utils::random::{standard_exponential, standard_normal};

pub use bound::Bound;
pub use dtype::{DType, Scalar};
pub use space::Space;

/// A discrete space of integers in [0, n).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Discrete {
    n: u32,
}

impl Discrete {
    pub fn new(n: u32) -> Self {
        assert!(n > 0, "Discrete space requires n > 0");
        Self { n }
    }

    pub fn n(&self) -> u32 { self.n }
}

impl Space for Discrete {
    type Element = u32;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element {
        if self.n == 1 { return 0; }
        Uniform::from(0..self.n).sample(rng)
    }

    fn contains(&self, elem: &Self::Element) -> bool { *elem < self.n }
}

/// A fixed-length binary vector space of size `n`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiBinary {
    n: usize,
}

impl MultiBinary {
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "MultiBinary requires n > 0");
        Self { n }
    }

    pub fn n(&self) -> usize { self.n }
}

impl Space for MultiBinary {
    type Element = Vec<u8>;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element {
        let dist = Uniform::from(0u8..=1u8);
        (0..self.n).map(|_| dist.sample(rng)).collect()
    }

    fn contains(&self, elem: &Self::Element) -> bool {
        elem.len() == self.n && elem.iter().all(|&v| v == 0 || v == 1)
    }
}

/// A multi-dimensional discrete space with per-dimension sizes nvec[i] (values in [0, nvec[i])).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiDiscrete {
    nvec: Vec<u32>,
}

impl MultiDiscrete {
    pub fn new<I: Into<Vec<u32>>>(nvec: I) -> Self {
        let nvec = nvec.into();
        assert!(!nvec.is_empty(), "MultiDiscrete requires at least one dimension");
        for (i, &n) in nvec.iter().enumerate() {
            assert!(n > 0, "MultiDiscrete nvec[{i}] must be > 0");
        }
        Self { nvec }
    }

    pub fn nvec(&self) -> &[u32] { &self.nvec }
    pub fn ndim(&self) -> usize { self.nvec.len() }
}

impl Space for MultiDiscrete {
    type Element = Vec<u32>;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element {
        self.nvec
            .iter()
            .map(|&n| if n == 1 { 0 } else { Uniform::from(0..n).sample(rng) })
            .collect()
    }

    fn contains(&self, elem: &Self::Element) -> bool {
        if elem.len() != self.nvec.len() { return false; }
        elem.iter().zip(self.nvec.iter()).all(|(&v, &n)| v < n)
    }
}

/// A box of real numbers with arbitrary shape and per-element inclusive bounds.
///
/// Bounds may be infinite (an unbounded observation dimension) but never NaN,
/// and `low <= high` holds element-wise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxSpace<T> {
    low: ArrayD<T>,
    high: ArrayD<T>,
}

impl<T: Scalar> BoxSpace<T> {
    pub fn new(low: ArrayD<T>, high: ArrayD<T>) -> Result<Self> {
        if low.shape() != high.shape() {
            return Err(GymError::shape_mismatch(low.shape(), high.shape()));
        }
        if low.iter().chain(high.iter()).any(|v| v.is_nan()) {
            return Err(GymError::InvalidBounds("box bounds must not contain NaN".into()));
        }
        if !Zip::from(&low).and(&high).all(|l, h| l <= h) {
            return Err(GymError::InvalidBounds(format!(
                "box requires low <= high element-wise: low={low}, high={high}"
            )));
        }
        Ok(Self { low, high })
    }

    /// Build from scalar-or-array bounds broadcast to `shape`.
    pub fn from_bounds<L, H>(low: L, high: H, shape: &[usize]) -> Result<Self>
    where
        L: Into<Bound<T>>,
        H: Into<Bound<T>>,
    {
        let low = low.into().broadcast_to(shape)?;
        let high = high.into().broadcast_to(shape)?;
        Self::new(low, high)
    }

    pub fn low(&self) -> &ArrayD<T> { &self.low }
    pub fn high(&self) -> &ArrayD<T> { &self.high }
    pub fn shape(&self) -> &[usize] { self.low.shape() }
    pub fn dtype(&self) -> DType { T::DTYPE }

    /// True when every bound is finite.
    pub fn is_bounded(&self) -> bool {
        self.low.iter().chain(self.high.iter()).all(|v| v.is_finite())
    }
}

impl<T: Scalar> Space for BoxSpace<T> {
    type Element = ArrayD<T>;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element {
        let mut out = ArrayD::from_elem(IxDyn(self.shape()), T::ZERO);
        Zip::from(&mut out).and(&self.low).and(&self.high).for_each(|o, &l, &h| {
            *o = match (l.is_finite(), h.is_finite()) {
                (true, true) if (h - l).is_finite() => Uniform::new_inclusive(l, h).sample(rng),
                (true, true) => {
                    // Width overflows T; draw the position in f64 and clamp back.
                    let u: f64 = Standard.sample(rng);
                    let x = T::from_f64(lerp(l.to_f64(), h.to_f64(), u));
                    if x < l { l } else if x > h { h } else { x }
                }
                (true, false) => l + T::from_f64(standard_exponential(rng)),
                (false, true) => h - T::from_f64(standard_exponential(rng)),
                (false, false) => T::from_f64(standard_normal(rng)),
            };
        });
        out
    }

    fn contains(&self, elem: &Self::Element) -> bool {
        elem.shape() == self.shape()
            && Zip::from(elem).and(&self.low).and(&self.high).all(|&v, &l, &h| l <= v && v <= h)
    }
}

/// Any observation or action domain, as declared by an environment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DynSpace<T> {
    Box(BoxSpace<T>),
    Discrete(Discrete),
    MultiBinary(MultiBinary),
    MultiDiscrete(MultiDiscrete),
    Tuple(Vec<DynSpace<T>>),
    Dict(BTreeMap<String, DynSpace<T>>),
}

impl<T> DynSpace<T> {
    pub fn as_box(&self) -> Option<&BoxSpace<T>> {
        match self {
            DynSpace::Box(b) => Some(b),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DynSpace::Box(_) => "Box",
            DynSpace::Discrete(_) => "Discrete",
            DynSpace::MultiBinary(_) => "MultiBinary",
            DynSpace::MultiDiscrete(_) => "MultiDiscrete",
            DynSpace::Tuple(_) => "Tuple",
            DynSpace::Dict(_) => "Dict",
        }
    }
}

impl<T> From<BoxSpace<T>> for DynSpace<T> {
    fn from(b: BoxSpace<T>) -> Self { DynSpace::Box(b) }
}

impl<T> From<Discrete> for DynSpace<T> {
    fn from(d: Discrete) -> Self { DynSpace::Discrete(d) }
}

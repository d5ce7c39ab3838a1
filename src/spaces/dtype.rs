// Element types for box-shaped spaces.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use rand::distributions::uniform::SampleUniform;

/// Runtime tag for the element type of a box space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DType {
    Float32,
    Float64,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::Float32 => f.write_str("float32"),
            DType::Float64 => f.write_str("float64"),
        }
    }
}

/// Floating-point element type usable in a `BoxSpace`.
///
/// The dtype of every space, rescaler and policy is fixed by this parameter at
/// compile time and reported through [`Scalar::DTYPE`].
pub trait Scalar:
    Copy
    + PartialOrd
    + Default
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + SampleUniform
{
    const DTYPE: DType;
    const ZERO: Self;

    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;
    fn is_finite(self) -> bool;
    fn is_nan(self) -> bool;
}

macro_rules! impl_scalar {
    ($t:ty, $dtype:expr) => {
        impl Scalar for $t {
            const DTYPE: DType = $dtype;
            const ZERO: Self = 0.0;

            #[inline]
            fn from_f64(v: f64) -> Self { v as $t }
            #[inline]
            fn to_f64(self) -> f64 { self as f64 }
            #[inline]
            fn is_finite(self) -> bool { <$t>::is_finite(self) }
            #[inline]
            fn is_nan(self) -> bool { <$t>::is_nan(self) }
        }
    };
}

impl_scalar!(f32, DType::Float32);
impl_scalar!(f64, DType::Float64);

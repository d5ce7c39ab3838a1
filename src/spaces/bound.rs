// Scalar-or-array bound arguments and their broadcasting.

use ndarray::{Array1, ArrayD, IxDyn};

use crate::core::{GymError, Result};
use crate::spaces::Scalar;

/// A lower or upper bound given either as one value for every element or as
/// an array broadcast against a target shape.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(untagged))]
pub enum Bound<T> {
    Scalar(T),
    Values(Vec<T>),
    Array(ArrayD<T>),
}

impl<T: Scalar> Bound<T> {
    /// The shape of the bound as given, before broadcasting.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Bound::Scalar(_) => Vec::new(),
            Bound::Values(v) => vec![v.len()],
            Bound::Array(a) => a.shape().to_vec(),
        }
    }

    /// True when no element is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        match self {
            Bound::Scalar(v) => v.is_finite(),
            Bound::Values(v) => v.iter().all(|x| x.is_finite()),
            Bound::Array(a) => a.iter().all(|x| x.is_finite()),
        }
    }

    pub fn to_array(&self) -> ArrayD<T> {
        match self {
            Bound::Scalar(v) => ArrayD::from_elem(IxDyn(&[]), *v),
            Bound::Values(v) => Array1::from(v.clone()).into_dyn(),
            Bound::Array(a) => a.clone(),
        }
    }

    /// Broadcast to `shape` using numpy rules.
    pub fn broadcast_to(&self, shape: &[usize]) -> Result<ArrayD<T>> {
        let arr = self.to_array();
        match arr.broadcast(shape) {
            Some(view) => Ok(view.to_owned()),
            None => Err(GymError::shape_mismatch(shape, arr.shape())),
        }
    }
}

/// Common shape of two broadcast operands, if one exists.
pub fn broadcast_shapes(a: &[usize], b: &[usize]) -> Option<Vec<usize>> {
    let ndim = a.len().max(b.len());
    let mut out = vec![0; ndim];
    for i in 0..ndim {
        let da = if i < ndim - a.len() { 1 } else { a[i - (ndim - a.len())] };
        let db = if i < ndim - b.len() { 1 } else { b[i - (ndim - b.len())] };
        out[i] = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => return None,
        };
    }
    Some(out)
}

macro_rules! impl_from_scalar {
    ($($t:ty),*) => {
        $(impl From<$t> for Bound<$t> {
            fn from(v: $t) -> Self { Bound::Scalar(v) }
        })*
    };
}

impl_from_scalar!(f32, f64);

impl<T> From<Vec<T>> for Bound<T> {
    fn from(v: Vec<T>) -> Self { Bound::Values(v) }
}

impl<T: Clone, const N: usize> From<[T; N]> for Bound<T> {
    fn from(v: [T; N]) -> Self { Bound::Values(v.to_vec()) }
}

impl<T> From<ArrayD<T>> for Bound<T> {
    fn from(a: ArrayD<T>) -> Self { Bound::Array(a) }
}

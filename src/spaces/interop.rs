//! Optional conversions between BoxSpace elements and nalgebra vectors.
//!
//! Gated behind the `nalgebra` feature. Elements are flattened in row-major
//! order, so a box of shape `[2, 3]` maps to a `DVector` of length 6.

#[cfg(feature = "nalgebra")]
pub mod nalgebra_impl {
    use nalgebra::DVector;
    use ndarray::{ArrayD, IxDyn};

    use crate::core::{GymError, Result};
    use crate::spaces::{BoxSpace, Scalar};

    impl<T: Scalar + nalgebra::Scalar> BoxSpace<T> {
        /// Flatten a BoxSpace element into an `nalgebra::DVector<T>`.
        pub fn to_nalgebra(elem: &ArrayD<T>) -> DVector<T> {
            DVector::from_iterator(elem.len(), elem.iter().copied())
        }

        /// Reshape an `nalgebra::DVector<T>` into an element of this space's shape.
        pub fn from_nalgebra(&self, v: &DVector<T>) -> Result<ArrayD<T>> {
            let shape = self.shape();
            ArrayD::from_shape_vec(IxDyn(shape), v.iter().copied().collect())
                .map_err(|_| GymError::shape_mismatch(shape, &[v.len()]))
        }
    }

}

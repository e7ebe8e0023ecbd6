use crate::linalg::Float;
use crate::DecompositionError;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};

/// A reversible per-feature transformation of a sample table.
pub trait Scale<A, S>
where
    A: Float,
    S: Data<Elem = A>,
{
    /// Applies the transformation to every row of `input`.
    fn scale(&self, input: &ArrayBase<S, Ix2>) -> Array2<A>;

    /// Undoes [`scale`](Scale::scale).
    fn inverse_scale(&self, input: &ArrayBase<S, Ix2>) -> Array2<A>;
}

/// Subtracts the per-feature mean learned from a sample table.
#[derive(Clone, Debug)]
pub struct MeanCentered<A>
where
    A: Float,
{
    means: Array1<A>,
}

impl<A> MeanCentered<A>
where
    A: Float,
{
    /// Learns the column means of `input`.
    ///
    /// # Errors
    ///
    /// Returns [`DecompositionError::InvalidInput`] if `input` has no rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use eigen_pca::{Scale, MeanCentered};
    /// let x = ndarray::arr2(&[[1_f64, 4.], [3., 8.]]);
    /// let centering = MeanCentered::new(&x).unwrap();
    /// assert_eq!(centering.means(), &ndarray::arr1(&[2., 6.]));
    ///
    /// let centered = centering.scale(&x);
    /// assert_eq!(centered, ndarray::arr2(&[[-1., -2.], [1., 2.]]));
    /// assert_eq!(centering.inverse_scale(&centered), x);
    /// ```
    pub fn new<S>(input: &ArrayBase<S, Ix2>) -> Result<Self, DecompositionError>
    where
        S: Data<Elem = A>,
    {
        let means = input.mean_axis(Axis(0)).ok_or_else(|| {
            DecompositionError::InvalidInput("cannot take the mean of zero rows".to_string())
        })?;
        Ok(Self { means })
    }

    /// Returns the column means.
    #[inline]
    pub fn means(&self) -> &Array1<A> {
        &self.means
    }

    /// Returns the number of columns the means were computed over.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.means.len()
    }
}

impl<A, S> Scale<A, S> for MeanCentered<A>
where
    A: Float,
    S: Data<Elem = A>,
{
    /// Subtracts the means from every row of `input`.
    fn scale(&self, input: &ArrayBase<S, Ix2>) -> Array2<A> {
        input - &self.means
    }

    /// Adds the means back to every row of `input`.
    fn inverse_scale(&self, input: &ArrayBase<S, Ix2>) -> Array2<A> {
        input + &self.means
    }
}

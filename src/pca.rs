use crate::linalg::{self, Float};
use crate::scale::{MeanCentered, Scale};
use crate::DecompositionError;
use ndarray::{Array1, Array2, ArrayBase, Data, Ix2};

/// Principal component analysis.
///
/// This reduces the dimensionality of the input data by projecting it onto the
/// eigenvectors of its sample covariance matrix with the largest eigenvalues.
/// The data is centered for each feature before the covariance is computed.
///
/// A model starts out unfitted and holds only its configuration. [`fit`]
/// computes the feature means and the principal axes; calling it again
/// replaces them.
///
/// [`fit`]: #method.fit
///
/// # Examples
///
/// ```
/// use eigen_pca::Pca;
///
/// let x = ndarray::arr2(&[[0_f64, 0_f64], [1_f64, 1_f64], [2_f64, 2_f64]]);
/// let mut pca = Pca::new(1);
/// let y = pca.fit_transform(&x).unwrap();  // [-2_f64.sqrt(), 0_f64, 2_f64.sqrt()]
/// assert!((y[(0, 0)].abs() - 2_f64.sqrt()).abs() < 1e-8);
/// assert!(y[(1, 0)].abs() < 1e-8);
/// assert!((y[(2, 0)].abs() - 2_f64.sqrt()).abs() < 1e-8);
/// ```
#[derive(Clone, Debug)]
pub struct Pca<A>
where
    A: Float,
{
    settings: Settings,
    state: State<A>,
}

#[derive(Clone, Debug)]
enum State<A>
where
    A: Float,
{
    Unfitted,
    Fitted(FittedPca<A>),
}

#[derive(Clone, Copy, Debug)]
struct Settings {
    n_components: usize,
    flip_signs: bool,
}

impl<A> Pca<A>
where
    A: Float,
{
    /// Creates an unfitted PCA model with the given number of components.
    #[must_use]
    pub fn new(n_components: usize) -> Self {
        PcaBuilder::new(n_components).build()
    }

    /// Returns the number of components.
    #[inline]
    pub fn n_components(&self) -> usize {
        self.settings.n_components
    }

    /// Returns `true` once [`fit`] has succeeded.
    ///
    /// [`fit`]: #method.fit
    #[inline]
    pub fn is_fitted(&self) -> bool {
        matches!(self.state, State::Fitted(_))
    }

    /// Returns the fitted parameters, or `None` if the model has not been
    /// fitted.
    #[inline]
    pub fn fitted(&self) -> Option<&FittedPca<A>> {
        match &self.state {
            State::Fitted(fitted) => Some(fitted),
            State::Unfitted => None,
        }
    }

    /// Returns the principal axes in feature space, or `None` if the model
    /// has not been fitted.
    pub fn components(&self) -> Option<&Array2<A>> {
        self.fitted().map(FittedPca::components)
    }

    /// Returns the per-feature empirical mean, or `None` if the model has not
    /// been fitted.
    pub fn mean(&self) -> Option<&Array1<A>> {
        self.fitted().map(FittedPca::mean)
    }

    /// Fits the model with `input`.
    ///
    /// Previously fitted parameters are replaced only if fitting succeeds.
    ///
    /// # Errors
    ///
    /// * [`DecompositionError::InvalidInput`] if `input` has no rows or no
    ///   columns.
    /// * [`DecompositionError::InvalidComponentCount`] if the number of
    ///   components is zero or larger than the number of columns of `input`.
    /// * [`DecompositionError::LinalgError`] if the eigen-decomposition of the
    ///   covariance matrix fails.
    pub fn fit<S>(&mut self, input: &ArrayBase<S, Ix2>) -> Result<(), DecompositionError>
    where
        S: Data<Elem = A>,
    {
        let fitted = FittedPca::fit(&self.settings, input)?;
        self.state = State::Fitted(fitted);
        Ok(())
    }

    /// Applies dimensionality reduction to `input`.
    ///
    /// # Errors
    ///
    /// * [`DecompositionError::NotFitted`] if the model has not been fitted.
    /// * [`DecompositionError::ShapeMismatch`] if the number of features in
    ///   `input` does not match that of the training data.
    pub fn transform<S>(&self, input: &ArrayBase<S, Ix2>) -> Result<Array2<A>, DecompositionError>
    where
        S: Data<Elem = A>,
    {
        self.fitted()
            .ok_or(DecompositionError::NotFitted)?
            .transform(input)
    }

    /// Fits the model with `input` and apply the dimensionality reduction on
    /// `input`.
    ///
    /// This is equivalent to calling both [`fit`] and [`transform`] for the
    /// same input.
    ///
    /// [`fit`]: #method.fit
    /// [`transform`]: #method.transform
    ///
    /// # Errors
    ///
    /// Same as [`fit`].
    pub fn fit_transform<S>(
        &mut self,
        input: &ArrayBase<S, Ix2>,
    ) -> Result<Array2<A>, DecompositionError>
    where
        S: Data<Elem = A>,
    {
        let fitted = FittedPca::fit(&self.settings, input)?;
        let transformed = fitted.transform(input)?;
        self.state = State::Fitted(fitted);
        Ok(transformed)
    }

    /// Transforms data back to its original space.
    ///
    /// # Errors
    ///
    /// * [`DecompositionError::NotFitted`] if the model has not been fitted.
    /// * [`DecompositionError::ShapeMismatch`] if the number of columns of
    ///   `input` is different from the number of components.
    pub fn inverse_transform<S>(
        &self,
        input: &ArrayBase<S, Ix2>,
    ) -> Result<Array2<A>, DecompositionError>
    where
        S: Data<Elem = A>,
    {
        self.fitted()
            .ok_or(DecompositionError::NotFitted)?
            .inverse_transform(input)
    }
}

/// Parameters of a fitted [`Pca`] model.
///
/// Obtained from [`Pca::fitted`]. The projection methods on this type cannot
/// fail because of a missing fit.
#[derive(Clone, Debug)]
pub struct FittedPca<A>
where
    A: Float,
{
    components: Array2<A>,
    scale: MeanCentered<A>,
    explained_variance: Array1<A>,
    total_variance: A,
    n_samples: usize,
}

impl<A> FittedPca<A>
where
    A: Float,
{
    fn fit<S>(settings: &Settings, input: &ArrayBase<S, Ix2>) -> Result<Self, DecompositionError>
    where
        S: Data<Elem = A>,
    {
        let (n_samples, n_features) = input.dim();
        if n_samples == 0 || n_features == 0 {
            return Err(DecompositionError::InvalidInput(format!(
                "input should have at least one row and one column, got ({}, {})",
                n_samples, n_features
            )));
        }
        if settings.n_components == 0 || settings.n_components > n_features {
            return Err(DecompositionError::InvalidComponentCount {
                n_components: settings.n_components,
                n_features,
            });
        }
        if n_samples == 1 {
            log::warn!("fitting PCA on a single sample; the covariance matrix is undefined");
        }
        log::debug!(
            "fitting PCA with {} components on {} samples x {} features",
            settings.n_components,
            n_samples,
            n_features
        );

        let scale = MeanCentered::new(input)?;
        let cov = linalg::covariance(&scale.scale(input));
        let (eigenvalues, eigenvectors) = linalg::eigh(cov)?;
        let total_variance = eigenvalues.sum();
        let (explained_variance, mut components) =
            linalg::descending(&eigenvalues, &eigenvectors, settings.n_components);
        if settings.flip_signs {
            linalg::flip_signs(&mut components);
        }
        log::debug!("explained variance: {:?}", explained_variance);

        Ok(Self {
            components,
            scale,
            explained_variance,
            total_variance,
            n_samples,
        })
    }

    /// Returns the principal axes in feature space, one per row, in
    /// decreasing order of explained variance.
    #[inline]
    pub fn components(&self) -> &Array2<A> {
        &self.components
    }

    /// Returns the per-feature empirical mean.
    #[inline]
    pub fn mean(&self) -> &Array1<A> {
        self.scale.means()
    }

    /// Returns the number of components.
    #[inline]
    pub fn n_components(&self) -> usize {
        self.components.nrows()
    }

    /// Returns the number of features seen during fitting.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.scale.n_features()
    }

    /// Returns the number of samples seen during fitting.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Returns the variance explained by each component, i.e., the
    /// corresponding eigenvalues of the covariance matrix.
    #[inline]
    pub fn explained_variance(&self) -> &Array1<A> {
        &self.explained_variance
    }

    /// Returns the ratio of explained variance for each component.
    pub fn explained_variance_ratio(&self) -> Array1<A> {
        &self.explained_variance / self.total_variance
    }

    /// Applies dimensionality reduction to `input`.
    ///
    /// # Errors
    ///
    /// Returns [`DecompositionError::ShapeMismatch`] if the number of features
    /// in `input` does not match that of the training data.
    pub fn transform<S>(&self, input: &ArrayBase<S, Ix2>) -> Result<Array2<A>, DecompositionError>
    where
        S: Data<Elem = A>,
    {
        if input.ncols() != self.n_features() {
            return Err(DecompositionError::ShapeMismatch {
                expected: self.n_features(),
                found: input.ncols(),
            });
        }
        Ok(self.scale.scale(input).dot(&self.components.t()))
    }

    /// Transforms data back to its original space.
    ///
    /// The result is exact only if no component was discarded.
    ///
    /// # Errors
    ///
    /// Returns [`DecompositionError::ShapeMismatch`] if the number of columns
    /// of `input` is different from the number of components.
    pub fn inverse_transform<S>(
        &self,
        input: &ArrayBase<S, Ix2>,
    ) -> Result<Array2<A>, DecompositionError>
    where
        S: Data<Elem = A>,
    {
        if input.ncols() != self.n_components() {
            return Err(DecompositionError::ShapeMismatch {
                expected: self.n_components(),
                found: input.ncols(),
            });
        }
        Ok(self.scale.inverse_scale(&input.dot(&self.components)))
    }
}

/// Builder for [`Pca`].
///
/// # Examples
///
/// ```
/// use eigen_pca::PcaBuilder;
///
/// let x = ndarray::arr2(&[[0_f64, 0_f64], [1_f64, 1_f64], [2_f64, 2_f64]]);
/// let mut pca = PcaBuilder::new(1).flip_signs(false).build();
/// pca.fit(&x).unwrap();
/// ```
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug)]
pub struct PcaBuilder {
    settings: Settings,
}

impl PcaBuilder {
    /// Sets the number of components for PCA.
    #[must_use]
    pub fn new(n_components: usize) -> Self {
        Self {
            settings: Settings {
                n_components,
                flip_signs: true,
            },
        }
    }

    /// Indicates whether or not to normalize the signs of the components. It
    /// is enabled by default, flipping each component so that its entry with
    /// the largest absolute value is positive. If disabled, the signs are
    /// whatever the eigen-solver returns.
    #[must_use]
    pub fn flip_signs(mut self, flip_signs: bool) -> Self {
        self.settings.flip_signs = flip_signs;
        self
    }

    /// Creates an instance of [`Pca`].
    #[must_use]
    pub fn build<A: Float>(self) -> Pca<A> {
        Pca {
            settings: self.settings,
            state: State::Unfitted,
        }
    }
}

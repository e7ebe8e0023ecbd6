use super::{Eigh, Error};
use faer::{Mat, Side};
use ndarray::{Array1, Array2};

macro_rules! impl_eigh {
    ($scalar:ty) => {
        impl Eigh for $scalar {
            fn eigh(a: Array2<Self>) -> Result<(Array1<Self>, Array2<Self>), Error> {
                let n = a.nrows();
                let mat = Mat::<$scalar>::from_fn(n, n, |i, j| a[(i, j)]);
                let eig = mat.as_ref().self_adjoint_eigen(Side::Lower).map_err(|err| {
                    Error::OperationFailure(format!(
                        "self-adjoint eigen-decomposition failed: {:?}",
                        err
                    ))
                })?;

                let diag = eig.S().column_vector();
                let basis = eig.U();
                let values = Array1::from_shape_fn(n, |i| diag[i]);
                let vectors = Array2::from_shape_fn((n, n), |(i, j)| basis[(i, j)]);
                Ok((values, vectors))
            }
        }
    };
}

impl_eigh!(f32);
impl_eigh!(f64);

#[cfg(test)]
mod test {
    use super::Eigh;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr2, Array1, Array2};

    fn check_eigenpairs(a: &Array2<f64>, values: &Array1<f64>, vectors: &Array2<f64>) {
        for (i, &value) in values.iter().enumerate() {
            let v = vectors.column(i);
            let av = a.dot(&v);
            for (x, y) in av.iter().zip(v.iter()) {
                assert_abs_diff_eq!(*x, value * y, epsilon = 1e-10);
            }
        }
        let vtv = vectors.t().dot(vectors);
        for ((i, j), e) in vtv.indexed_iter() {
            let expected = if i == j { 1. } else { 0. };
            assert_abs_diff_eq!(*e, expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn two_by_two() {
        let a = arr2(&[[2_f64, 1.], [1., 2.]]);
        let (values, vectors) = f64::eigh(a.clone()).unwrap();
        let mut sorted = values.to_vec();
        sorted.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert_abs_diff_eq!(sorted[0], 1., epsilon = 1e-12);
        assert_abs_diff_eq!(sorted[1], 3., epsilon = 1e-12);
        check_eigenpairs(&a, &values, &vectors);
    }

    #[test]
    fn dense_symmetric() {
        let a = arr2(&[
            [4_f64, 1., -2., 2.],
            [1., 2., 0., 1.],
            [-2., 0., 3., -2.],
            [2., 1., -2., -1.],
        ]);
        let (values, vectors) = f64::eigh(a.clone()).unwrap();
        assert_abs_diff_eq!(values.sum(), 8., epsilon = 1e-10);
        check_eigenpairs(&a, &values, &vectors);
    }

    #[test]
    fn single_precision() {
        let a = arr2(&[[2_f32, 1.], [1., 2.]]);
        let (values, _) = f32::eigh(a).unwrap();
        assert_abs_diff_eq!(values.sum(), 4., epsilon = 1e-5);
    }
}

use super::{Eigh, Error, LayoutError};
use ndarray::{Array1, Array2};
use num_traits::ToPrimitive;

pub trait Lapack: Sized {
    /// Calls `?syev` on a column-major `n`-by-`n` matrix.
    ///
    /// # Safety
    ///
    /// `a` must hold at least `ld_a * n` elements.
    unsafe fn syev(jobz: u8, uplo: u8, n: i32, a: &mut [Self], ld_a: i32)
        -> Result<Vec<Self>, i32>;
}

macro_rules! impl_lapack {
    ($scalar:ty, $syev:path) => {
        impl Lapack for $scalar {
            unsafe fn syev(
                jobz: u8,
                uplo: u8,
                n: i32,
                a: &mut [Self],
                ld_a: i32,
            ) -> Result<Vec<Self>, i32> {
                let mut eigs = vec![0.; n as usize];

                let mut info = 0;
                let mut work_size = [0.];
                $syev(
                    jobz,
                    uplo,
                    n,
                    a,
                    ld_a,
                    &mut eigs,
                    &mut work_size,
                    -1,
                    &mut info,
                );
                if info != 0 {
                    return Err(info);
                }

                let lwork = work_size[0].to_usize().ok_or(-1)?;
                let mut work = vec![0.; lwork];
                $syev(
                    jobz,
                    uplo,
                    n,
                    a,
                    ld_a,
                    &mut eigs,
                    &mut work,
                    lwork as i32,
                    &mut info,
                );
                if info != 0 {
                    return Err(info);
                }

                Ok(eigs)
            }
        }
    };
}

impl_lapack!(f32, lapack::ssyev);
impl_lapack!(f64, lapack::dsyev);

impl Eigh for f32 {
    fn eigh(a: Array2<Self>) -> Result<(Array1<Self>, Array2<Self>), Error> {
        eigh(a)
    }
}

impl Eigh for f64 {
    fn eigh(a: Array2<Self>) -> Result<(Array1<Self>, Array2<Self>), Error> {
        eigh(a)
    }
}

/// Computes all eigenpairs of a symmetric matrix with `?syev`.
///
/// Eigenvalues come back in ascending order; eigenvectors are the columns of
/// the returned matrix.
fn eigh<A: Lapack + Clone>(a: Array2<A>) -> Result<(Array1<A>, Array2<A>), Error> {
    let n = i32::try_from(a.nrows())
        .map_err(|_| LayoutError::TooManyRows(format!("{} > {}", a.nrows(), i32::MAX)))?;
    let mut a = a.as_standard_layout().into_owned();
    let a_ptr = a
        .as_slice_memory_order_mut()
        .ok_or(LayoutError::NotContiguous)?;
    // A symmetric matrix reads the same in row- and column-major order.
    let ev = unsafe { A::syev(b'V', b'L', n, a_ptr, n) }
        .map_err(|info| Error::OperationFailure(format!("?syev failed with info = {}", info)))?;
    // Eigenvector `j` occupies the `j`th column-major column, which is row
    // `j` of the row-major array.
    Ok((Array1::from(ev), a.reversed_axes()))
}

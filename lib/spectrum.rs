//! Exact diagonalization of Hermitian operators.

use ndarray::{ self as nd, s };
use num_complex::Complex64 as C64;
use tracing::debug;
use crate::{
    error::{ JcError, JcResult },
    hilbert::outer_prod,
    operators::{ Ket, Op, Operator, check_square, hermitian_deviation },
};

/// Default elementwise tolerance for the Hermiticity precondition.
pub const HERMITIAN_TOL: f64 = 1e-9;

/// Eigenvalues and eigenvectors of a Hermitian operator.
///
/// `energies` are in ascending order; `eigenstates` holds the corresponding
/// unit-normalized eigenvectors as its columns, so that `energies[k]` belongs
/// to `eigenstates.column(k)`.
#[derive(Clone, Debug, PartialEq)]
pub struct EigenDecomposition {
    pub energies: nd::Array1<f64>,
    pub eigenstates: nd::Array2<C64>,
}

impl EigenDecomposition {
    /// Number of eigenpairs.
    pub fn len(&self) -> usize { self.energies.len() }

    /// Return `true` if there are no eigenpairs.
    pub fn is_empty(&self) -> bool { self.energies.is_empty() }

    /// Return the `k`-th eigenvector, if it exists.
    pub fn state(&self, k: usize) -> Option<Ket> {
        (k < self.len()).then(|| self.eigenstates.slice(s![.., k]).to_owned())
    }

    /// Return the lowest-energy eigenvector.
    ///
    /// *Panics* if the decomposition is empty, which cannot happen for a
    /// decomposition produced by [`diagonalize`].
    pub fn ground_state(&self) -> Ket {
        self.eigenstates.slice(s![.., 0]).to_owned()
    }

    /// Return the lowest energy.
    pub fn ground_energy(&self) -> f64 { self.energies[0] }

    /// Iterate over `(energy, eigenvector)` pairs in ascending energy order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, nd::ArrayView1<'_, C64>)> + '_ {
        self.energies.iter().copied().zip(self.eigenstates.columns())
    }

    /// Rebuild the diagonalized operator as `Σ_k E_k |ψ_k><ψ_k|`.
    pub fn reconstruct(&self) -> Op {
        let n = self.eigenstates.nrows();
        self.iter()
            .fold(nd::Array2::zeros((n, n)), |acc: Op, (e, v)| {
                let v = v.to_owned();
                acc + outer_prod(&v, &v) * C64::from(e)
            })
    }
}

/// Diagonalize a Hermitian operator, using the default tolerance
/// [`HERMITIAN_TOL`] for the Hermiticity check.
pub fn diagonalize(H: &Op) -> JcResult<EigenDecomposition> {
    diagonalize_tol(H, HERMITIAN_TOL)
}

/// Diagonalize a Hermitian operator.
///
/// Fails with [`JcError::DimensionMismatch`] if `H` is not square or empty,
/// and with [`JcError::NonHermitianInput`] if `max |H - H^dag| > tol`; both
/// checks happen before the eigensolver is called. The eigensolver's ascending
/// order is kept as-is.
pub fn diagonalize_tol(H: &Op, tol: f64) -> JcResult<EigenDecomposition> {
    check_square(H, H.nrows())?;
    if H.is_empty() {
        return Err(JcError::DimensionMismatch { expected: 1, found: 0 });
    }
    let deviation = hermitian_deviation(H);
    if deviation > tol {
        return Err(JcError::NonHermitianInput { deviation });
    }
    let (energies, eigenstates) = H.eigenstates()?;
    if energies.len() != H.nrows() || eigenstates.dim() != H.dim() {
        return Err(JcError::DimensionMismatch {
            expected: H.nrows(),
            found: energies.len(),
        });
    }
    debug!(
        dim = energies.len(),
        ground_energy = energies[0],
        top_energy = energies[energies.len() - 1],
        "diagonalized",
    );
    Ok(EigenDecomposition { energies, eigenstates })
}

//! Dense operator algebra on finite-dimensional Hilbert spaces.
//!
//! Operators are square `Array2<C64>`s and kets are `Array1<C64>`s. Composite
//! spaces are built with the Kronecker product, leftmost factor slowest.

use ndarray::{ self as nd, linalg::kron };
use ndarray_linalg::{ Eigh, Inverse, OperationNorm, UPLO };
use num_complex::Complex64 as C64;
use num_traits::{ One, Zero };
use crate::error::{ JcError, JcResult };

/// A linear operator on a finite-dimensional space.
pub type Op = nd::Array2<C64>;

/// A state vector.
pub type Ket = nd::Array1<C64>;

/// Lowering (annihilation) operator on a `dim`-dimensional truncated ladder,
/// with `a |n> = sqrt(n) |n - 1>` for `n < dim`.
pub fn destroy(dim: usize) -> Op {
    let mut a: Op = nd::Array2::zeros((dim, dim));
    (1..dim).for_each(|n| { a[[n - 1, n]] = C64::from((n as f64).sqrt()); });
    a
}

/// Identity on a `dim`-dimensional space.
pub fn qeye(dim: usize) -> Op { nd::Array2::eye(dim) }

/// Population inversion `2 σ₊σ₋ - 1` of a two-level system, in the basis
/// `[|g>, |e>]` ordered by excitation count.
///
/// This is `diag(-1, +1)`; the matching lowering operator is `destroy(2)`.
pub fn sigmaz() -> Op {
    nd::array![
        [-C64::one(), C64::zero()],
        [ C64::zero(), C64::one()],
    ]
}

/// Operator on the product space of `a`'s (left) and `b`'s (right) spaces.
pub fn tensor(a: &Op, b: &Op) -> Op { kron(a, b) }

/// Commutator `[a, b] = ab - ba`.
pub fn commutator(a: &Op, b: &Op) -> Op { a.dot(b) - b.dot(a) }

/// Largest elementwise deviation `max |A - A^dag|`.
///
/// Returns `f64::INFINITY` for non-square input.
pub fn hermitian_deviation(a: &Op) -> f64 {
    if !a.is_square() { return f64::INFINITY; }
    a.iter().zip(a.t().iter())
        .map(|(aij, aji)| (*aij - aji.conj()).norm())
        .fold(0.0, f64::max)
}

/// Return `true` if `a` is Hermitian to within `tol` elementwise.
pub fn is_hermitian(a: &Op, tol: f64) -> bool {
    hermitian_deviation(a) <= tol
}

/// Return `true` if `a` and `b` have equal shapes and agree to within `tol`
/// elementwise.
pub fn all_close<D>(a: &nd::Array<C64, D>, b: &nd::Array<C64, D>, tol: f64)
    -> bool
where D: nd::Dimension
{
    a.shape() == b.shape()
        && a.iter().zip(b.iter()).all(|(ai, bi)| (*ai - *bi).norm() <= tol)
}

/// Euclidean norm of a state vector.
pub fn ket_norm(psi: &Ket) -> f64 {
    psi.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
}

/// Fail with [`JcError::DimensionMismatch`] unless `a` is `dim × dim`.
pub(crate) fn check_square(a: &Op, dim: usize) -> JcResult<()> {
    let (n, m) = a.dim();
    if n != m {
        return Err(JcError::DimensionMismatch { expected: n, found: m });
    }
    if n != dim {
        return Err(JcError::DimensionMismatch { expected: dim, found: n });
    }
    Ok(())
}

// Padé(6, 6) coefficients for exp(x)
const PADE6: [f64; 7] = [
    1.0,
    1.0 / 2.0,
    5.0 / 44.0,
    1.0 / 66.0,
    1.0 / 792.0,
    1.0 / 15840.0,
    1.0 / 665280.0,
];

// scaling target for the 1-norm before applying the Padé approximant
const EXPM_THETA: f64 = 0.5;

/// Operations on square operators beyond plain matrix arithmetic.
pub trait Operator {
    /// Hermitian conjugate (conjugate transpose).
    fn dag(&self) -> Op;

    /// Matrix exponential.
    fn expm(&self) -> JcResult<Op>;

    /// Eigendecomposition of a Hermitian operator.
    ///
    /// Eigenvalues are returned in ascending order, with unit-normalized
    /// eigenvectors in the corresponding columns of the second item. Only the
    /// lower triangle is read; Hermiticity is the caller's responsibility.
    fn eigenstates(&self) -> JcResult<(nd::Array1<f64>, Op)>;
}

impl Operator for Op {
    fn dag(&self) -> Op { self.t().mapv(|a| a.conj()) }

    fn expm(&self) -> JcResult<Op> {
        let n = self.nrows();
        check_square(self, n)?;
        if n == 0 { return Ok(self.clone()); }

        // scale so that ||X||_1 <= θ, approximate, then square back up
        let norm: f64 = self.opnorm_one()?;
        let s: i32
            = if norm > EXPM_THETA {
                (norm / EXPM_THETA).log2().ceil() as i32
            } else {
                0
            };
        let X: Op = self.mapv(|a| a / 2.0_f64.powi(s));

        let mut P: Op = qeye(n) * PADE6[0];
        let mut Q: Op = qeye(n) * PADE6[0];
        let mut Xk: Op = qeye(n);
        for (k, ck) in PADE6.iter().enumerate().skip(1) {
            Xk = Xk.dot(&X);
            let term: Op = &Xk * *ck;
            P += &term;
            if k % 2 == 0 { Q += &term; } else { Q -= &term; }
        }
        let mut E: Op = Q.inv()?.dot(&P);
        for _ in 0..s {
            E = E.dot(&E);
        }
        Ok(E)
    }

    fn eigenstates(&self) -> JcResult<(nd::Array1<f64>, Op)> {
        check_square(self, self.nrows())?;
        let (E, V) = self.eigh(UPLO::Lower)?;
        Ok((E, V))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use approx::assert_abs_diff_eq;

    #[test]
    fn destroy_ladder() {
        let a = destroy(4);
        assert_abs_diff_eq!(a[[0, 1]].re, 1.0);
        assert_abs_diff_eq!(a[[1, 2]].re, 2.0_f64.sqrt());
        assert_abs_diff_eq!(a[[2, 3]].re, 3.0_f64.sqrt());
        assert_abs_diff_eq!(a.iter().map(|x| x.norm_sqr()).sum::<f64>(), 6.0);

        // [a, a^dag] = 1 everywhere except the truncated top level
        let c = commutator(&a, &a.dag());
        for k in 0..3 {
            assert_abs_diff_eq!(c[[k, k]].re, 1.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(c[[3, 3]].re, -3.0, epsilon = 1e-12);
    }

    #[test]
    fn number_operator_is_diagonal() {
        let a = destroy(5);
        let n = a.dag().dot(&a);
        for i in 0..5 {
            for j in 0..5 {
                let expected = if i == j { i as f64 } else { 0.0 };
                assert_abs_diff_eq!(n[[i, j]].re, expected, epsilon = 1e-12);
                assert_abs_diff_eq!(n[[i, j]].im, 0.0);
            }
        }
    }

    #[test]
    fn sigmaz_matches_two_level_ladder() {
        let sm = destroy(2);
        let expected = sm.dag().dot(&sm) * C64::from(2.0) - qeye(2);
        assert!(all_close(&sigmaz(), &expected, 1e-15));
    }

    #[test]
    fn tensor_dims_and_ordering() {
        let a = destroy(3);
        let t = tensor(&a, &qeye(2));
        assert_eq!(t.dim(), (6, 6));
        // |n=1, j> -> |n=0, j> for both atomic states
        assert_abs_diff_eq!(t[[0, 2]].re, 1.0);
        assert_abs_diff_eq!(t[[1, 3]].re, 1.0);
        assert_abs_diff_eq!(t[[0, 3]].re, 0.0);
    }

    #[test]
    fn dag_conjugates() {
        let a: Op = nd::array![
            [C64::new(1.0, 2.0), C64::new(0.0, 1.0)],
            [C64::new(3.0, 0.0), C64::new(0.0, -4.0)],
        ];
        let ad = a.dag();
        assert_eq!(ad[[0, 1]], C64::new(3.0, 0.0));
        assert_eq!(ad[[1, 0]], C64::new(0.0, -1.0));
        assert_eq!(ad[[0, 0]], C64::new(1.0, -2.0));
        assert!(all_close(&ad.dag(), &a, 0.0));
    }

    #[test]
    fn hermiticity_predicates() {
        let a = destroy(3);
        let x = &a + &a.dag();
        assert!(is_hermitian(&x, 1e-14));
        assert!(!is_hermitian(&a, 1e-3));
        assert_abs_diff_eq!(hermitian_deviation(&a), 2.0_f64.sqrt());
        let rect: Op = nd::Array2::zeros((2, 3));
        assert!(hermitian_deviation(&rect).is_infinite());
    }

    #[test]
    fn expm_zero_is_identity() {
        let z: Op = nd::Array2::zeros((4, 4));
        assert!(all_close(&z.expm().unwrap(), &qeye(4), 1e-14));
    }

    #[test]
    fn expm_parity_generator() {
        let a = destroy(6);
        let gen: Op = a.dag().dot(&a) * C64::new(0.0, PI);
        let p = gen.expm().unwrap();
        for i in 0..6 {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            assert_abs_diff_eq!(p[[i, i]].re, sign, epsilon = 1e-10);
            assert_abs_diff_eq!(p[[i, i]].im, 0.0, epsilon = 1e-10);
        }
        let off: f64
            = p.indexed_iter()
            .filter(|((i, j), _)| i != j)
            .map(|(_, x)| x.norm())
            .fold(0.0, f64::max);
        assert!(off < 1e-10);
    }

    #[test]
    fn expm_rotation() {
        // exp(-iθσx) = cos θ - i sin θ σx
        let theta = 1.3;
        let sx: Op = destroy(2) + destroy(2).dag();
        let e = (&sx * C64::new(0.0, -theta)).expm().unwrap();
        assert_abs_diff_eq!(e[[0, 0]].re, theta.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(e[[1, 1]].re, theta.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(e[[0, 1]].im, -theta.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(e[[1, 0]].im, -theta.sin(), epsilon = 1e-12);
    }

    #[test]
    fn expm_rejects_non_square() {
        let rect: Op = nd::Array2::zeros((2, 3));
        assert!(matches!(rect.expm(), Err(JcError::DimensionMismatch { .. })));
    }

    #[test]
    fn eigenstates_ascending_and_normalized() {
        let a = destroy(4);
        let x: Op = &a + &a.dag();
        let (E, V) = x.eigenstates().unwrap();
        assert_eq!(E.len(), 4);
        assert!(E.iter().zip(E.iter().skip(1)).all(|(e0, e1)| e0 <= e1));
        for col in V.columns() {
            assert_abs_diff_eq!(ket_norm(&col.to_owned()), 1.0, epsilon = 1e-12);
        }
        // eigenvalues of the truncated position operator are symmetric about 0
        assert_abs_diff_eq!(E[0], -E[3], epsilon = 1e-12);
    }
}

//! Joint excitation-parity symmetry of the cavity-emitter system.
//!
//! The parity operator is
//! ```math
//! P = -\exp(i \pi a^\dagger a) \otimes \sigma_z
//! ```
//! i.e. the cavity photon-number parity `(-1)^n` combined with the atomic
//! inversion, overall negated. In the basis `|n, s>` this is
//! `(-1)^(n + s)`, the parity of the total excitation number, so that the
//! vacuum `|0, g>` is even. Both coupling forms change the excitation number by
//! 0 or ±2, so `P` commutes with either Hamiltonian exactly, even under
//! truncation.

use std::f64::consts::PI;
use num_complex::Complex64 as C64;
use tracing::debug;
use crate::{
    builder::JcOperators,
    config::ModelConfig,
    error::{ JcError, JcResult },
    operators::{ Ket, Op, Operator, check_square, ket_norm, tensor },
};

/// Default absolute tolerance used to classify a state's parity.
pub const PARITY_TOL: f64 = 1e-6;

/// Parity eigenvalue of a state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Parity {
    /// Eigenvalue +1.
    Even,
    /// Eigenvalue -1.
    Odd,
}

impl Parity {
    /// Return the associated eigenvalue of [`ParityOperator`].
    pub fn eigenvalue(&self) -> f64 {
        match *self {
            Self::Even => 1.0,
            Self::Odd => -1.0,
        }
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Even => write!(f, "even (+1)"),
            Self::Odd => write!(f, "odd (-1)"),
        }
    }
}

/// The joint parity operator on the cavity ⊗ atom space.
#[derive(Clone, Debug, PartialEq)]
pub struct ParityOperator {
    op: Op,
}

impl ParityOperator {
    /// Build the parity operator from the cavity number operator and the atomic
    /// population inversion of `ops`.
    pub fn new(ops: &JcOperators) -> JcResult<Self> {
        let generator: Op
            = ops.cavity_number_factor() * C64::new(0.0, PI);
        let cavity_parity: Op = generator.expm()?;
        let op: Op = -tensor(&cavity_parity, &ops.atom_population_factor());
        check_square(&op, ops.dim())?;
        debug!(dim = op.nrows(), "built parity operator");
        Ok(Self { op })
    }

    /// Build the elementary operators for `config`, then the parity operator.
    pub fn from_config(config: &ModelConfig) -> JcResult<Self> {
        Self::new(&JcOperators::new(config)?)
    }

    /// Return a reference to the operator matrix.
    pub fn op(&self) -> &Op { &self.op }

    /// Dimension of the space `self` acts on.
    pub fn dim(&self) -> usize { self.op.nrows() }

    fn check_state(&self, state: &Ket) -> JcResult<()> {
        if state.len() != self.dim() {
            return Err(JcError::DimensionMismatch {
                expected: self.dim(),
                found: state.len(),
            });
        }
        Ok(())
    }

    /// Compute `P |ψ>`.
    pub fn apply(&self, state: &Ket) -> JcResult<Ket> {
        self.check_state(state)?;
        Ok(self.op.dot(state))
    }

    /// Compute `P |ψ> + |ψ>`.
    ///
    /// For a parity eigenstate the result is either the zero vector (odd) or
    /// `2 |ψ>` (even).
    pub fn apply_and_combine(&self, state: &Ket) -> JcResult<Ket> {
        Ok(self.apply(state)? + state)
    }

    /// Compute the real part of `<ψ|P|ψ>`.
    pub fn expectation(&self, state: &Ket) -> JcResult<f64> {
        let p_psi = self.apply(state)?;
        let val: C64
            = state.iter().zip(&p_psi)
            .map(|(a, b)| a.conj() * b)
            .sum();
        Ok(val.re)
    }

    /// Classify `state` by the norm of [`Self::apply_and_combine`]: `Odd` if it
    /// is within `tol` of zero, `Even` if it is within `tol` of twice the norm
    /// of `state`, `None` if neither.
    pub fn classify(&self, state: &Ket, tol: f64) -> JcResult<Option<Parity>> {
        let combined = self.apply_and_combine(state)?;
        Ok(classify_combined(&combined, ket_norm(state), tol))
    }
}

/// Classify the output of [`ParityOperator::apply_and_combine`] given the norm
/// of the input state.
pub fn classify_combined(combined: &Ket, state_norm: f64, tol: f64)
    -> Option<Parity>
{
    let norm = ket_norm(combined);
    if norm <= tol {
        Some(Parity::Odd)
    } else if (norm - 2.0 * state_norm).abs() <= tol {
        Some(Parity::Even)
    } else {
        None
    }
}

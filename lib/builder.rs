//! Elementary operators on the cavity ⊗ atom space.

use num_complex::Complex64 as C64;
use tracing::debug;
use crate::{
    config::ModelConfig,
    error::{ JcError, JcResult },
    hilbert::HilbertSpace,
    operators::{ Op, Operator, destroy, qeye, sigmaz, tensor },
};

/// The composite ladder and number operators of a single-mode cavity coupled
/// to a two-level emitter.
///
/// Every operator here is built as `tensor(cavity_part, atom_part)` over the
/// same two factor spaces, so all share the joint dimension `2N`.
#[derive(Clone, Debug, PartialEq)]
pub struct JcOperators {
    space: HilbertSpace,
    /// `a ⊗ 1`
    pub cavity_lowering: Op,
    /// `1 ⊗ σ₋`
    pub atom_lowering: Op,
    /// `1 ⊗ σ_z`
    pub atom_population: Op,
    /// `a†a ⊗ 1`
    pub cavity_number: Op,
}

impl JcOperators {
    /// Build all elementary operators for `config`.
    ///
    /// Fails with [`JcError::InvalidConfig`] before any matrix is formed if
    /// `config` is malformed.
    pub fn new(config: &ModelConfig) -> JcResult<Self> {
        let space = HilbertSpace::new(config)?;
        let nc = space.cavity_dim();
        let na = space.atom_dim();
        let a = destroy(nc);
        let ops = Self {
            cavity_lowering: tensor(&a, &qeye(na)),
            atom_lowering: tensor(&qeye(nc), &destroy(na)),
            atom_population: tensor(&qeye(nc), &sigmaz()),
            cavity_number: tensor(&a.dag().dot(&a), &qeye(na)),
            space,
        };
        ops.check_dims()?;
        debug!(
            cavity_dim = nc,
            atom_dim = na,
            joint_dim = ops.dim(),
            "built elementary operators",
        );
        Ok(ops)
    }

    /// Fail with [`JcError::DimensionMismatch`] if any operator does not act on
    /// the joint space.
    pub fn check_dims(&self) -> JcResult<()> {
        let dim = self.dim();
        [
            &self.cavity_lowering,
            &self.atom_lowering,
            &self.atom_population,
            &self.cavity_number,
        ]
        .into_iter()
        .try_for_each(|op| {
            let (n, m) = op.dim();
            if n != dim || m != dim {
                Err(JcError::DimensionMismatch {
                    expected: dim,
                    found: if n != dim { n } else { m },
                })
            } else {
                Ok(())
            }
        })
    }

    /// Return a reference to the joint space.
    pub fn space(&self) -> &HilbertSpace { &self.space }

    /// Dimension of the joint space.
    pub fn dim(&self) -> usize { self.space.dim() }

    /// `a† ⊗ 1`
    pub fn cavity_raising(&self) -> Op { self.cavity_lowering.dag() }

    /// `1 ⊗ σ₊`
    pub fn atom_raising(&self) -> Op { self.atom_lowering.dag() }

    /// Cavity number operator `a†a` on the cavity factor alone.
    pub fn cavity_number_factor(&self) -> Op {
        let a = destroy(self.space.cavity_dim());
        a.dag().dot(&a)
    }

    /// Population inversion `σ_z` on the atomic factor alone.
    pub fn atom_population_factor(&self) -> Op { sigmaz() }

    /// Total excitation number `a†a + (σ_z + 1) / 2`.
    pub fn excitation_number(&self) -> Op {
        let half: Op = (&self.atom_population + &qeye(self.dim())) * C64::from(0.5);
        &self.cavity_number + &half
    }
}

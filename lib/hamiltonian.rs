//! Hamiltonian of a single cavity mode coupled to a two-level emitter, with or
//! without the rotating wave approximation.

use num_complex::Complex64 as C64;
use tracing::debug;
use crate::{
    builder::JcOperators,
    config::ModelConfig,
    error::{ JcError, JcResult },
    hilbert::HilbertSpace,
    operators::{ Ket, Op, hermitian_deviation },
    spectrum::{ self, EigenDecomposition },
};

/// Hamiltonian builder for the Jaynes-Cummings (RWA) and quantum Rabi (full
/// coupling) models.
///
/// The Hamiltonian is
/// ```math
/// H = \omega_c a^\dagger a + \omega_a \sigma_z + g H_1
/// ```
/// where, under the rotating wave approximation,
/// ```math
/// H_1 = a^\dagger \sigma_- + a \sigma_+
/// ```
/// and otherwise
/// ```math
/// H_1 = (a^\dagger + a) (\sigma_- + \sigma_+).
/// ```
/// Both forms are sums of conjugate pairs, so `H` is Hermitian by
/// construction.
#[derive(Clone, Debug)]
pub struct HBuilderJc {
    pub(crate) ops: JcOperators,
    pub(crate) config: ModelConfig,
}

impl HBuilderJc {
    /// Create a new `HBuilderJc`, building the elementary operators for
    /// `config`.
    pub fn new(config: &ModelConfig) -> JcResult<Self> {
        let ops = JcOperators::new(config)?;
        Ok(Self { ops, config: *config })
    }

    /// Create a new `HBuilderJc` from pre-built operators.
    ///
    /// Fails if the operators were built for a different truncation.
    pub fn from_operators(ops: JcOperators, config: &ModelConfig)
        -> JcResult<Self>
    {
        config.validate()?;
        ops.check_dims()?;
        if ops.dim() != config.joint_dim() {
            return Err(JcError::DimensionMismatch {
                expected: config.joint_dim(),
                found: ops.dim(),
            });
        }
        Ok(Self { ops, config: *config })
    }

    /// Return a reference to the elementary operators.
    pub fn operators(&self) -> &JcOperators { &self.ops }

    /// Return a reference to the joint cavity-atom space.
    pub fn space(&self) -> &HilbertSpace { self.ops.space() }

    /// Return the model parameters.
    pub fn params(&self) -> ModelConfig { self.config }

    /// Decoupled part `ωc a†a + ωa σz`.
    pub fn bare(&self) -> Op {
        &self.ops.cavity_number * C64::from(self.config.cavity_freq())
            + &self.ops.atom_population * C64::from(self.config.atom_freq())
    }

    /// Coupling operator `H_1`, without the coupling strength.
    pub fn interaction(&self) -> Op {
        let a = &self.ops.cavity_lowering;
        let ad = self.ops.cavity_raising();
        let sm = &self.ops.atom_lowering;
        let sp = self.ops.atom_raising();
        if self.config.use_rwa() {
            ad.dot(sm) + a.dot(&sp)
        } else {
            (&ad + a).dot(&(sm + &sp))
        }
    }

    /// Compute the (time-independent) total Hamiltonian `H_0 + g H_1`.
    pub fn gen_static(&self) -> Op {
        let H: Op
            = self.bare()
            + self.interaction() * C64::from(self.config.coupling());
        debug!(
            dim = H.nrows(),
            rwa = self.config.use_rwa(),
            hermitian_deviation = hermitian_deviation(&H),
            "assembled hamiltonian",
        );
        H
    }

    /// Diagonalize the [time-independent Hamiltonian][Self::gen_static].
    pub fn diagonalize(&self) -> JcResult<EigenDecomposition> {
        spectrum::diagonalize(&self.gen_static())
    }

    /// Diagonalize the [time-independent Hamiltonian][Self::gen_static] and
    /// return a ground state of the system.
    ///
    /// Note that, in general, there may be more than one state that minimizes
    /// the energy of the system; this method offers no guarantees about which
    /// ground state is returned.
    pub fn ground_state(&self) -> JcResult<(f64, Ket)> {
        let eig = self.diagonalize()?;
        Ok((eig.energies[0], eig.ground_state()))
    }
}

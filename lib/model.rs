//! The full computation: build operators, assemble and diagonalize the
//! Hamiltonian, and classify the parity of the ground state.

use tracing::info;
use crate::{
    config::ModelConfig,
    error::JcResult,
    hamiltonian::HBuilderJc,
    hilbert::{ Fock, TwoLevel },
    operators::{ Ket, Op, ket_norm },
    parity::{ Parity, ParityOperator, PARITY_TOL, classify_combined },
    spectrum::{ self, EigenDecomposition },
};

/// Everything computed for one model configuration.
#[derive(Clone, Debug)]
pub struct JcReport {
    pub config: ModelConfig,
    pub hamiltonian: Op,
    pub spectrum: EigenDecomposition,
    /// `P |ψ_0> + |ψ_0>` for the ground state `|ψ_0>`.
    pub parity_combined: Ket,
    /// Parity of the ground state, if it is a parity eigenstate to within
    /// [`PARITY_TOL`].
    pub ground_parity: Option<Parity>,
    /// Largest bare-state components of the ground state, by probability.
    pub ground_components: Vec<(Fock<TwoLevel>, f64)>,
}

impl JcReport {
    /// Lowest energy of the spectrum.
    pub fn ground_energy(&self) -> f64 { self.spectrum.ground_energy() }

    /// Norm of [`Self::parity_combined`].
    pub fn parity_combined_norm(&self) -> f64 { ket_norm(&self.parity_combined) }
}

/// Number of ground state components kept in a [`JcReport`].
const NUM_COMPONENTS: usize = 4;

/// Run the whole computation for `config`.
///
/// The parity operator is applied to the lowest-energy eigenstate of the
/// Hamiltonian (index 0 of the ascending spectrum).
pub fn run(config: &ModelConfig) -> JcResult<JcReport> {
    config.validate()?;
    let builder = HBuilderJc::new(config)?;
    let hamiltonian = builder.gen_static();
    let spectrum = spectrum::diagonalize(&hamiltonian)?;

    let parity = ParityOperator::new(builder.operators())?;
    let psi0 = spectrum.ground_state();
    let parity_combined = parity.apply_and_combine(&psi0)?;
    let ground_parity
        = classify_combined(&parity_combined, ket_norm(&psi0), PARITY_TOL);

    let ground_components: Vec<(Fock<TwoLevel>, f64)>
        = builder.space().basis().components(&psi0)?
        .into_iter()
        .take(NUM_COMPONENTS)
        .map(|(s, p)| (*s, p))
        .collect();

    info!(
        dim = spectrum.len(),
        rwa = config.use_rwa(),
        ground_energy = spectrum.ground_energy(),
        parity_norm = ket_norm(&parity_combined),
        parity = ?ground_parity,
        "solved model",
    );
    Ok(JcReport {
        config: *config,
        hamiltonian,
        spectrum,
        parity_combined,
        ground_parity,
        ground_components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;
    use approx::assert_abs_diff_eq;
    use crate::{
        error::JcError,
        operators::{ all_close, is_hermitian },
    };

    #[test]
    fn default_pipeline() {
        let report = run(&ModelConfig::default()).unwrap();
        assert_eq!(report.hamiltonian.dim(), (10, 10));
        assert!(is_hermitian(&report.hamiltonian, 1e-9));
        assert_eq!(report.spectrum.len(), 10);
        assert_eq!(report.ground_parity, Some(Parity::Even));
        assert_abs_diff_eq!(report.parity_combined_norm(), 2.0, epsilon = 1e-6);
        assert!(all_close(
            &report.parity_combined,
            &(report.spectrum.ground_state() * num_complex::Complex64::from(2.0)),
            1e-6,
        ));
        assert_eq!(report.ground_components.len(), 4);
        let probs: Vec<f64>
            = report.ground_components.iter().map(|(_, p)| *p).collect();
        assert!(probs.iter().zip(probs.iter().skip(1)).all(|(a, b)| a >= b));
    }

    #[test]
    fn rwa_ground_state_is_vacuum() {
        let report = run(&ModelConfig::default().with_rwa(true)).unwrap();
        assert_abs_diff_eq!(report.ground_energy(), -TAU, epsilon = 1e-9);
        let (state, prob) = report.ground_components[0];
        assert_eq!(state, Fock(TwoLevel::Ground, 0));
        assert_abs_diff_eq!(prob, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn single_fock_level() {
        let config = ModelConfig::new(TAU, TAU, TAU, 0.0, 1, false).unwrap();
        let report = run(&config).unwrap();
        assert_eq!(report.spectrum.len(), 2);
        assert_eq!(report.ground_components.len(), 2);
        assert_eq!(report.ground_parity, Some(Parity::Even));
    }

    #[test]
    fn invalid_config() {
        assert!(matches!(
            run(&ModelConfig::unchecked(0)),
            Err(JcError::InvalidConfig(_)),
        ));
    }
}

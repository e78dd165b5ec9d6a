//! Physical parameters of the cavity-emitter model.

use std::{ f64::consts::TAU, path::Path };
use serde::Deserialize;
use crate::error::{ JcError, JcResult };

/// Immutable model parameters.
///
/// All frequencies are angular (already multiplied by 2π). Values are checked
/// once on construction; every later stage may assume they are well-formed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ModelConfig {
    cavity_freq: f64,
    atom_freq: f64,
    coupling: f64,
    decay_rate: f64,
    truncation: usize,
    use_rwa: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            cavity_freq: TAU,
            atom_freq: TAU,
            coupling: TAU,
            decay_rate: TAU,
            truncation: 5,
            use_rwa: false,
        }
    }
}

impl ModelConfig {
    /// Create a new `ModelConfig` from angular frequencies.
    ///
    /// Fails with [`JcError::InvalidConfig`] if `truncation` is zero or any of
    /// the frequencies is not finite.
    pub fn new(
        cavity_freq: f64,
        atom_freq: f64,
        coupling: f64,
        decay_rate: f64,
        truncation: usize,
        use_rwa: bool,
    ) -> JcResult<Self>
    {
        let config = Self {
            cavity_freq,
            atom_freq,
            coupling,
            decay_rate,
            truncation,
            use_rwa,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that all parameters are usable.
    pub fn validate(&self) -> JcResult<()> {
        if self.truncation < 1 {
            return Err(JcError::InvalidConfig(
                "cavity truncation must be at least 1".into()));
        }
        let named = [
            ("cavity_freq", self.cavity_freq),
            ("atom_freq", self.atom_freq),
            ("coupling", self.coupling),
        ];
        if let Some((name, val)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(JcError::InvalidConfig(
                format!("{name} must be finite, got {val}")));
        }
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(JcError::InvalidConfig(
                format!(
                    "decay_rate must be finite and non-negative, got {}",
                    self.decay_rate,
                )
            ));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn unchecked(truncation: usize) -> Self {
        Self { truncation, ..Self::default() }
    }

    /// Return a copy of `self` with the interaction branch switched.
    pub fn with_rwa(self, use_rwa: bool) -> Self {
        Self { use_rwa, ..self }
    }

    /// Cavity mode frequency `wc` (angular).
    pub fn cavity_freq(&self) -> f64 { self.cavity_freq }

    /// Atomic transition frequency `wa` (angular).
    pub fn atom_freq(&self) -> f64 { self.atom_freq }

    /// Atom-cavity coupling strength `g` (angular).
    pub fn coupling(&self) -> f64 { self.coupling }

    /// Decay rate `ga` (angular). Carried for reference only.
    pub fn decay_rate(&self) -> f64 { self.decay_rate }

    /// Number of cavity Fock states kept.
    pub fn truncation(&self) -> usize { self.truncation }

    /// Whether the rotating-wave approximation is applied to the coupling.
    pub fn use_rwa(&self) -> bool { self.use_rwa }

    /// Dimension of the joint cavity ⊗ atom space.
    pub fn joint_dim(&self) -> usize { 2 * self.truncation }

    /// Parse a TOML document giving frequencies in cycles (not angular).
    ///
    /// Missing keys take the values of [`ModelConfig::default`].
    pub fn from_toml_str(s: &str) -> JcResult<Self> {
        let file: ConfigFile = toml::from_str(s)?;
        file.into_config()
    }

    /// Read and parse a TOML config file. See [`Self::from_toml_str`].
    pub fn load<P>(path: P) -> JcResult<Self>
    where P: AsRef<Path>
    {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// On-disk representation of [`ModelConfig`], in cycles.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    cavity_freq: f64,
    atom_freq: f64,
    coupling: f64,
    decay_rate: f64,
    truncation: usize,
    use_rwa: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let def = ModelConfig::default();
        Self {
            cavity_freq: def.cavity_freq / TAU,
            atom_freq: def.atom_freq / TAU,
            coupling: def.coupling / TAU,
            decay_rate: def.decay_rate / TAU,
            truncation: def.truncation,
            use_rwa: def.use_rwa,
        }
    }
}

impl ConfigFile {
    fn into_config(self) -> JcResult<ModelConfig> {
        ModelConfig::new(
            TAU * self.cavity_freq,
            TAU * self.atom_freq,
            TAU * self.coupling,
            TAU * self.decay_rate,
            self.truncation,
            self.use_rwa,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_matches_exploratory_constants() {
        let config = ModelConfig::default();
        assert_abs_diff_eq!(config.cavity_freq(), TAU);
        assert_abs_diff_eq!(config.atom_freq(), TAU);
        assert_abs_diff_eq!(config.coupling(), TAU);
        assert_eq!(config.truncation(), 5);
        assert_eq!(config.joint_dim(), 10);
        assert!(!config.use_rwa());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_truncation_rejected() {
        let res = ModelConfig::new(TAU, TAU, TAU, 0.0, 0, true);
        assert!(matches!(res, Err(JcError::InvalidConfig(_))));
    }

    #[test]
    fn non_finite_parameters_rejected() {
        let res = ModelConfig::new(f64::NAN, TAU, TAU, 0.0, 3, true);
        assert!(matches!(res, Err(JcError::InvalidConfig(_))));
        let res = ModelConfig::new(TAU, TAU, f64::INFINITY, 0.0, 3, true);
        assert!(matches!(res, Err(JcError::InvalidConfig(_))));
        let res = ModelConfig::new(TAU, TAU, TAU, -1.0, 3, true);
        assert!(matches!(res, Err(JcError::InvalidConfig(_))));
    }

    #[test]
    fn toml_scales_to_angular() {
        let config = ModelConfig::from_toml_str(
            "cavity_freq = 2.0\ncoupling = 0.5\ntruncation = 8\nuse_rwa = true\n"
        ).unwrap();
        assert_abs_diff_eq!(config.cavity_freq(), 2.0 * TAU, epsilon = 1e-12);
        assert_abs_diff_eq!(config.atom_freq(), TAU, epsilon = 1e-12);
        assert_abs_diff_eq!(config.coupling(), 0.5 * TAU, epsilon = 1e-12);
        assert_eq!(config.truncation(), 8);
        assert!(config.use_rwa());
    }

    #[test]
    fn toml_empty_gives_default() {
        let config = ModelConfig::from_toml_str("").unwrap();
        let def = ModelConfig::default();
        assert_abs_diff_eq!(config.cavity_freq(), def.cavity_freq(), epsilon = 1e-12);
        assert_eq!(config.truncation(), def.truncation());
        assert_eq!(config.use_rwa(), def.use_rwa());
    }

    #[test]
    fn toml_bad_values() {
        assert!(matches!(
            ModelConfig::from_toml_str("truncation = 0"),
            Err(JcError::InvalidConfig(_)),
        ));
        assert!(matches!(
            ModelConfig::from_toml_str("truncation = \"five\""),
            Err(JcError::ConfigParse(_)),
        ));
        assert!(matches!(
            ModelConfig::from_toml_str("detuning = 1.0"),
            Err(JcError::ConfigParse(_)),
        ));
    }
}

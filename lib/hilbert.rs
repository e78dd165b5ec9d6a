//! Definitions to describe states, bases, and combinations thereof.

use std::{ hash::Hash, ops::Deref };
use ndarray as nd;
use indexmap::IndexMap;
use itertools::Itertools;
use num_complex::Complex64 as C64;
use num_traits::{ Zero, One };
use crate::{
    config::ModelConfig,
    error::{ JcError, JcResult },
};

/* States *********************************************************************/

/// Bare state of a two-level emitter.
///
/// Variants are ordered by excitation count, which is also their index in the
/// atomic factor space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TwoLevel {
    /// Ground state, population inversion -1.
    Ground,
    /// Excited state, population inversion +1.
    Excited,
}

impl TwoLevel {
    /// Both states, in basis order.
    pub const ALL: [Self; 2] = [Self::Ground, Self::Excited];

    /// Return the appropriate `σ_z` eigenvalue.
    pub fn sz(&self) -> f64 {
        match *self {
            Self::Ground => -1.0,
            Self::Excited => 1.0,
        }
    }

    /// Number of atomic excitations (0 or 1).
    pub fn excitations(&self) -> usize {
        match *self {
            Self::Ground => 0,
            Self::Excited => 1,
        }
    }
}

/// Combination of an atomic state `S` with a cavity Fock state index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fock<S>(pub S, pub usize);

impl<S> Fock<S> {
    /// Return the atomic state.
    pub fn atomic_state(&self) -> &S { &self.0 }

    /// Return the number of photons in the cavity mode.
    pub fn photons(&self) -> usize { self.1 }
}

impl Fock<TwoLevel> {
    /// Total number of excitations, photons plus atomic.
    pub fn excitations(&self) -> usize { self.1 + self.0.excitations() }
}

impl<S> From<(S, usize)> for Fock<S> {
    fn from(sn: (S, usize)) -> Self {
        let (s, n) = sn;
        Self(s, n)
    }
}

/// Compute the outer product of two state vectors.
pub fn outer_prod(a: &nd::Array1<C64>, b: &nd::Array1<C64>)
    -> nd::Array2<C64>
{
    let na = a.len();
    let nb = b.len();
    nd::Array2::from_shape_fn((na, nb), |(i, j)| a[i] * b[j].conj())
}

/* Bases **********************************************************************/

/// A collection of unique basis states with associated bare energies in units
/// of angular frequency.
///
/// This collection is backed by a single [`IndexMap`], which can be accessed
/// via [`AsRef`] and [`Deref`]. Insertion order is the vector index order.
#[derive(Clone, Debug, PartialEq)]
pub struct Basis<S>
where S: Clone + Eq + Hash
{
    energies: IndexMap<S, f64>,
}

impl<S> AsRef<IndexMap<S, f64>> for Basis<S>
where S: Clone + Eq + Hash
{
    fn as_ref(&self) -> &IndexMap<S, f64> { &self.energies }
}

impl<S> Deref for Basis<S>
where S: Clone + Eq + Hash
{
    type Target = IndexMap<S, f64>;

    fn deref(&self) -> &Self::Target { &self.energies }
}

impl<S> Default for Basis<S>
where S: Clone + Eq + Hash
{
    fn default() -> Self { Self { energies: IndexMap::default() } }
}

impl<S> FromIterator<(S, f64)> for Basis<S>
where S: Clone + Eq + Hash
{
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = (S, f64)>
    {
        Self { energies: iter.into_iter().collect() }
    }
}

impl<S> Basis<S>
where S: Clone + Eq + Hash
{
    /// Create a new, empty basis.
    pub fn new() -> Self { Self::default() }

    /// Number of basis states.
    pub fn num_states(&self) -> usize { self.energies.len() }

    /// Get the energy in units of angular frequency of a particular basis
    /// state.
    pub fn get_energy(&self, state: &S) -> Option<f64> {
        self.energies.get(state).copied()
    }

    /// Get the energy in units of angular frequency of a particular basis state
    /// by index.
    pub fn get_energy_index(&self, index: usize) -> Option<f64> {
        self.energies.get_index(index).map(|(_, e)| e).copied()
    }

    /// Get an array representation of a particular basis state.
    ///
    /// The array is sized to match the number of states currently in `self`.
    pub fn get_vector(&self, state: &S) -> Option<nd::Array1<C64>> {
        self.energies.get_index_of(state)
            .and_then(|k| self.get_vector_index(k))
    }

    /// Get an array representation of a particular basis state by index.
    ///
    /// The array is sized to match the number of states currently in `self`.
    pub fn get_vector_index(&self, index: usize) -> Option<nd::Array1<C64>> {
        let n = self.energies.len();
        (index < n).then(|| {
            (0..n).map(|j| if j == index { C64::one() } else { C64::zero() })
                .collect()
        })
    }

    /// Get the diagonal matrix of bare state energies.
    pub fn energy_matrix(&self) -> nd::Array2<C64> {
        let diag: nd::Array1<C64>
            = self.energies.values().map(|e| C64::from(*e)).collect();
        nd::Array2::from_diag(&diag)
    }

    /// Decompose a state vector into basis state probabilities, in descending
    /// order of probability.
    ///
    /// Fails if `psi` is not sized to match `self`.
    pub fn components<'a>(&'a self, psi: &nd::Array1<C64>)
        -> JcResult<Vec<(&'a S, f64)>>
    {
        if psi.len() != self.energies.len() {
            return Err(JcError::DimensionMismatch {
                expected: self.energies.len(),
                found: psi.len(),
            });
        }
        let comps: Vec<(&S, f64)>
            = self.energies.keys()
            .zip(psi)
            .map(|(s, a)| (s, a.norm_sqr()))
            .sorted_by(|(_, p1), (_, p2)| p2.total_cmp(p1))
            .collect();
        Ok(comps)
    }
}

/* Cavity ⊗ atom space ********************************************************/

/// The joint space of a truncated cavity mode and a two-level emitter.
///
/// States are ordered cavity-major, so that the state `|n, s>` sits at index
/// `2 n + s`, matching `tensor(cavity_op, atom_op)`. Bare energies are
/// `wc n + wa s_z`.
#[derive(Clone, Debug, PartialEq)]
pub struct HilbertSpace {
    basis: Basis<Fock<TwoLevel>>,
    truncation: usize,
}

impl HilbertSpace {
    /// Build the joint space for a model.
    pub fn new(config: &ModelConfig) -> JcResult<Self> {
        config.validate()?;
        let wc = config.cavity_freq();
        let wa = config.atom_freq();
        let basis: Basis<Fock<TwoLevel>>
            = (0..config.truncation())
            .cartesian_product(TwoLevel::ALL)
            .map(|(n, s)| (Fock(s, n), wc * n as f64 + wa * s.sz()))
            .collect();
        Ok(Self { basis, truncation: config.truncation() })
    }

    /// Dimension of the cavity factor.
    pub fn cavity_dim(&self) -> usize { self.truncation }

    /// Dimension of the atomic factor.
    pub fn atom_dim(&self) -> usize { TwoLevel::ALL.len() }

    /// Dimension of the joint space.
    pub fn dim(&self) -> usize { self.basis.num_states() }

    /// Return a reference to the product basis.
    pub fn basis(&self) -> &Basis<Fock<TwoLevel>> { &self.basis }

    /// Return the index of a product state, if it is in the truncated space.
    pub fn index_of(&self, state: &Fock<TwoLevel>) -> Option<usize> {
        self.basis.get_index_of(state)
    }
}

#![allow(non_snake_case)]

//! Spectrum and excitation-parity symmetry of a single cavity mode coupled to
//! a two-level emitter, with (Jaynes-Cummings) or without (quantum Rabi) the
//! rotating wave approximation.

pub mod error;
pub mod config;
pub mod operators;
pub mod hilbert;
pub mod builder;
pub mod hamiltonian;
pub mod spectrum;
pub mod parity;
pub mod model;
pub mod output;

pub use error::{ JcError, JcResult };
pub use config::ModelConfig;
pub use builder::JcOperators;
pub use hamiltonian::HBuilderJc;
pub use spectrum::EigenDecomposition;
pub use parity::{ Parity, ParityOperator };
pub use model::{ JcReport, run };

//! # Core Module
//!
//! Stateless building blocks of the simulation: data models, the chain path generators, and the
//! observables computed from a single conformation.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Conformations, per-batch chain configuration, result records
//! - **Chain Generators** ([`chains`]) - Wormlike and self-avoiding wormlike chain growth
//! - **Observables** ([`observables`]) - Radius of gyration, its Kratky-Porod expectation, and
//!   localization noise
//! - **Utilities** ([`utils`]) - Sphere and Gaussian sampling, rotation helpers
//! - **Errors** ([`error`]) - The simulation error taxonomy shared by every layer
//!
//! Nothing in this module owns a random generator. Every stochastic function borrows one from
//! its caller, which keeps runs reproducible under a fixed seed and lets each worker own an
//! independent stream.

pub mod chains;
pub mod error;
pub mod models;
pub mod observables;
pub mod utils;

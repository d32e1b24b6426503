//! # wlcsim
//!
//! Monte Carlo sampling of wormlike-chain polymer conformations, with radius-of-gyration
//! ensembles and simulated localization-microscopy noise.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ChainConformation`,
//!   `ChainConfiguration`), the chain generators (`ChainModel`), and the observables computed from
//!   a single path, including the closed-form Kratky-Porod radius of gyration.
//!
//! - **[`engine`]: The Logic Core.** Sweep configuration and validation, single-trial execution,
//!   the per-worker random stream layout, result sinks and running statistics.
//!
//! - **[`workflows`]: The Public API.** `EnsembleCollector` runs a complete sweep on a worker
//!   pool and hands every record to a single sink in a deterministic order.
//!
//! [`logging`] installs a `tracing` subscriber for applications that do not bring their own.

pub mod core;
pub mod engine;
pub mod logging;
pub mod workflows;

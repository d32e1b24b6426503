//! # Workflows Module
//!
//! Top-level entry points. A workflow takes a validated configuration, drives the engine across
//! the whole parameter sweep, and streams records into a caller-supplied sink.
//!
//! - **Ensemble Sweep** ([`sweep`]) - Radius-of-gyration ensembles over every combination of
//!   linear density, persistence length and localization precision.

pub mod sweep;

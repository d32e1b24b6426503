//! Geometry helpers and the random sampling primitives every stochastic step is built on.
//!
//! All samplers take an explicit random generator; there is no process-wide generator state.

pub mod geometry;
pub mod sampling;

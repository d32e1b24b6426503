//! Quantities extracted from a conformation: its radius of gyration, and the noisy copy a
//! localization microscope would record.

pub mod gyration;
pub mod localization;

//! Plain data carried between the generators, the observables and the ensemble layer.

pub mod conformation;
pub mod parameters;
pub mod results;

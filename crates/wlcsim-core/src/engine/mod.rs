//! # Engine Module
//!
//! The stateful layer between the pure chain models in [`crate::core`] and the public sweep
//! workflow. It turns a sweep description into validated batches, runs single trials, owns the
//! random stream layout, and collects results.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Sweep parameters, builder, TOML loading, sweep cells
//! - **Trials** ([`trial`]) - One generate, measure, blur, measure cycle per chain
//! - **Random Streams** ([`streams`]) - Run seed resolution and per-worker ChaCha streams
//! - **Result Sinks** ([`sink`]) - The single-writer destination for sweep records
//! - **Statistics** ([`statistics`]) - Running accumulators and per-cell reports
//! - **Progress Monitoring** ([`progress`]) - Progress events for embedding applications
//! - **Error Handling** ([`error`]) - Sweep-level error type

pub mod config;
pub mod error;
pub mod progress;
pub mod sink;
pub mod statistics;
pub mod streams;
pub mod trial;

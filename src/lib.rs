//! `goldswarm` runs particle swarm optimization (PSO) experiments on the two-dimensional
//! [Goldstein–Price](test_functions::GoldsteinPrice) benchmark function and renders the results
//! as convergence curves or animated particle contours.
//!
//! The crate is split into a handful of small pieces:
//!
//! * [`test_functions`] contains the objective functions. Each one can be evaluated at a single
//!   point ([`CostFunction`](traits::CostFunction)) or on a whole batch of candidate points at
//!   once ([`BatchCostFunction`](traits::BatchCostFunction)).
//! * [`algorithms::particles`] contains the [`PSO`](algorithms::particles::PSO) optimizer with
//!   global-best, ring (local-best) and von Neumann topologies.
//! * [`experiments`] is a small driver which assembles a hyperparameter configuration, runs the
//!   optimizer for a fixed number of iterations and collects the cost and position history.
//! * [`plot`] turns that history into self-contained HTML charts.
//!
//! # Quick Start
//!
//! ```rust
//! use goldswarm::prelude::*;
//! use goldswarm::experiments::{run_experiment, ExperimentConfig, TopologyKind};
//! use goldswarm::test_functions::GoldsteinPrice;
//!
//! fn main() -> Result<(), goldswarm::Error> {
//!     let config = ExperimentConfig::default()
//!         .with_topology(TopologyKind::Global)
//!         .with_bounds([(-2.0, 2.0), (-2.0, 2.0)])
//!         .with_seed(0);
//!     let record = run_experiment(&config, &GoldsteinPrice)?;
//!     assert_eq!(record.history.costs.len(), config.n_iterations);
//!     assert!((record.summary.fx - 3.0).abs() < 1e-2);
//!     Ok(())
//! }
//! ```
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `f32` | Use `f32` instead of `f64` as the [`Float`] type | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) while optimizing | off |
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

/// Module containing optimization algorithms
pub mod algorithms;
/// Core types shared by all algorithms ([`Bound`](core::Bound), [`Point`](core::Point),
/// callbacks, abort signals and summaries)
pub mod core;
mod error;
/// Experiment driver which runs preconfigured optimizers and collects their history
pub mod experiments;
/// HTML chart rendering for run histories
pub mod plot;
/// Module containing standard functions for testing algorithms
pub mod test_functions;
/// Traits which define the interfaces between problems, algorithms and callbacks
pub mod traits;

pub use error::{Error, Result};

/// Prelude module containing everything someone should need to use this crate for non-development
/// purposes
pub mod prelude {
    pub use crate::core::{Bound, Bounds, Callbacks, MaxSteps, MinimizationSummary, Point};
    pub use crate::traits::{
        Algorithm, BatchCostFunction, Bounded, CostFunction, Observer, Status, Terminator,
    };
    pub use crate::{Error, Float};
}

/// The floating-point type used throughout the crate.
#[cfg(not(feature = "f32"))]
pub type Float = f64;
/// The floating-point type used throughout the crate.
#[cfg(feature = "f32")]
pub type Float = f32;

/// The mathematical constant $`\pi`$ in the crate's [`Float`] type.
#[cfg(not(feature = "f32"))]
pub const PI: Float = std::f64::consts::PI;
/// The mathematical constant $`\pi`$ in the crate's [`Float`] type.
#[cfg(feature = "f32")]
pub const PI: Float = std::f32::consts::PI;

pub use nalgebra::{DMatrix, DVector};

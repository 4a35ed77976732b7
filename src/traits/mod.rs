/// Module containing the [`AbortSignal`] trait.
pub mod abort_signal;
/// Module containing the [`Algorithm`] and [`Bounded`] traits.
pub mod algorithm;
/// Module containing the [`Boundable`] trait.
pub mod boundable;
/// Module containing the [`Terminator`] and [`Observer`] traits.
pub mod callback;
/// Module containing the [`CostFunction`] and [`BatchCostFunction`] traits.
pub mod cost_function;
/// Module containing the [`Status`] trait.
pub mod status;

pub use abort_signal::AbortSignal;
pub use algorithm::{Algorithm, Bounded};
pub use boundable::Boundable;
pub use callback::{Observer, Terminator};
pub use cost_function::{BatchCostFunction, CostFunction};
pub use status::Status;

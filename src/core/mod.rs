/// Basic implementations of [`AbortSignal`](crate::traits::AbortSignal)
pub mod abort_signal;
/// [`Bound`] type for binding variables to a range.
pub mod bound;
/// [`Callbacks`] and the basic [`Terminator`](crate::traits::Terminator)s and
/// [`Observer`](crate::traits::Observer)s.
pub mod callbacks;
/// [`Point`] type for defining a point in the parameter space.
pub mod point;
/// [`MinimizationSummary`] type for the result of the minimization.
pub mod summary;
/// Random-number and numeric helpers.
pub mod utils;

pub use abort_signal::{AtomicAbortSignal, CtrlCAbortSignal, NopAbortSignal};
pub use bound::{Bound, Bounds};
pub use callbacks::{Callbacks, DebugObserver, LoggingObserver, MaxSteps};
pub use point::Point;
pub use summary::MinimizationSummary;

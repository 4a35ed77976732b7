use crate::traits::{Algorithm, Observer, Status, Terminator};
use std::{fmt::Debug, ops::ControlFlow};

enum CallbackLike<A, P, S, U, E, C> {
    Terminator(Box<dyn Terminator<A, P, S, U, E, C>>),
    Observer(Box<dyn Observer<A, P, S, U, E, C>>),
}
impl<A, P, S, U, E, C> CallbackLike<A, P, S, U, E, C>
where
    A: Algorithm<P, S, U, E, Config = C>,
    S: Status,
{
    fn callback(
        &mut self,
        current_step: usize,
        algorithm: &mut A,
        problem: &P,
        status: &mut S,
        args: &U,
        config: &C,
    ) -> ControlFlow<()> {
        match self {
            Self::Terminator(terminator) => terminator.check_for_termination(
                current_step,
                algorithm,
                problem,
                status,
                args,
                config,
            ),
            Self::Observer(observer) => {
                observer.observe(current_step, algorithm, problem, status, args, config);
                ControlFlow::Continue(())
            }
        }
    }
}

/// A set of [`Terminator`]s and/or [`Observer`]s which can be used as an input to
/// [`Algorithm::process`]. Callbacks run in the order they were added, and the first
/// [`Terminator`] to break ends the step (later callbacks are skipped for that step).
pub struct Callbacks<A, P, S, U, E, C>(Vec<CallbackLike<A, P, S, U, E, C>>);
impl<A, P, S, U, E, C> Callbacks<A, P, S, U, E, C> {
    /// Create an empty set of callbacks.
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Return the set of [`Callbacks`] with an additional [`Terminator`] added.
    pub fn with_terminator<T>(mut self, terminator: T) -> Self
    where
        T: Terminator<A, P, S, U, E, C> + 'static,
        A: Algorithm<P, S, U, E, Config = C>,
        S: Status,
    {
        self.0.push(CallbackLike::Terminator(Box::new(terminator)));
        self
    }

    /// Return the set of [`Callbacks`] with an additional [`Observer`] added.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: Observer<A, P, S, U, E, C> + 'static,
        A: Algorithm<P, S, U, E, Config = C>,
        S: Status,
    {
        self.0.push(CallbackLike::Observer(Box::new(observer)));
        self
    }

    /// The number of registered callbacks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl<A, P, S, U, E, C> Terminator<A, P, S, U, E, C> for Callbacks<A, P, S, U, E, C>
where
    A: Algorithm<P, S, U, E, Config = C>,
    S: Status,
{
    fn check_for_termination(
        &mut self,
        current_step: usize,
        algorithm: &mut A,
        problem: &P,
        status: &mut S,
        args: &U,
        config: &C,
    ) -> ControlFlow<()> {
        if self.0.iter_mut().any(|callback| {
            callback
                .callback(current_step, algorithm, problem, status, args, config)
                .is_break()
        }) {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

/// A [`Terminator`] which terminates the algorithm after a number of steps.
pub struct MaxSteps(pub usize);
impl Default for MaxSteps {
    fn default() -> Self {
        Self(4000)
    }
}
impl<A, P, S, U, E, C> Terminator<A, P, S, U, E, C> for MaxSteps
where
    A: Algorithm<P, S, U, E, Config = C>,
    S: Status,
{
    fn check_for_termination(
        &mut self,
        current_step: usize,
        _algorithm: &mut A,
        _problem: &P,
        status: &mut S,
        _args: &U,
        _config: &C,
    ) -> ControlFlow<()> {
        if current_step >= self.0.saturating_sub(1) {
            status.update_message(&format!("Maximum number of steps reached ({})!", self.0));
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

/// A debugging callback which prints out the step and status at the current step in an
/// algorithm.
///
/// # Usage:
///
/// ```rust
/// use goldswarm::prelude::*;
/// use goldswarm::algorithms::particles::{PSO, PSOConfig};
/// use goldswarm::core::DebugObserver;
/// use goldswarm::test_functions::GoldsteinPrice;
///
/// let mut pso = PSO::new(2, fastrand::Rng::with_seed(0));
/// let result = pso
///     .process(
///         &GoldsteinPrice,
///         &(),
///         PSOConfig::default().setup_swarm(|swarm| swarm.with_n_particles(4)),
///         PSO::default_callbacks()
///             .with_observer(DebugObserver)
///             .with_terminator(MaxSteps(2)),
///     )
///     .unwrap();
/// // ^ This will print debug messages for each step
/// assert!(result.fx >= 3.0 - 1e-9);
/// ```
pub struct DebugObserver;
impl<A, P, S, U, E, C> Observer<A, P, S, U, E, C> for DebugObserver
where
    A: Algorithm<P, S, U, E, Config = C>,
    S: Status + Debug,
{
    fn observe(
        &mut self,
        current_step: usize,
        _algorithm: &A,
        _problem: &P,
        status: &S,
        _args: &U,
        _config: &C,
    ) {
        println!("Step: {}\n{:#?}", current_step, status);
    }
}

/// An [`Observer`] which emits a `tracing` event with the step number and status message at
/// every step. It does nothing unless the `tracing` feature is enabled.
pub struct LoggingObserver;
impl<A, P, S, U, E, C> Observer<A, P, S, U, E, C> for LoggingObserver
where
    A: Algorithm<P, S, U, E, Config = C>,
    S: Status,
{
    #[allow(unused_variables)]
    fn observe(
        &mut self,
        current_step: usize,
        _algorithm: &A,
        _problem: &P,
        status: &S,
        _args: &U,
        _config: &C,
    ) {
        trace_debug!(
            step = current_step,
            converged = status.converged(),
            message = status.message(),
            "optimizer step"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algorithms::particles::{PSOConfig, SwarmStatus, PSO},
        test_functions::GoldsteinPrice,
    };

    #[test]
    fn test_max_steps_stops_on_the_requested_step() {
        let mut pso = PSO::new(2, fastrand::Rng::with_seed(0));
        let res = pso
            .process(
                &GoldsteinPrice,
                &(),
                PSOConfig::default().setup_swarm(|swarm| swarm.with_n_particles(5)),
                Callbacks::empty().with_terminator(MaxSteps(7)),
            )
            .unwrap();
        assert_eq!(res.message, "Maximum number of steps reached (7)!");
        assert_eq!(res.steps, 7);
    }

    #[test]
    fn test_callbacks_len() {
        let cbs: Callbacks<PSO, GoldsteinPrice, SwarmStatus, (), crate::Error, PSOConfig> =
            Callbacks::empty()
                .with_terminator(MaxSteps(3))
                .with_observer(LoggingObserver);
        assert_eq!(cbs.len(), 2);
        assert!(!cbs.is_empty());
    }
}

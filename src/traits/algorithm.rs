use crate::{
    core::{Bound, Bounds, Callbacks},
    traits::{Status, Terminator},
};
use std::convert::Infallible;

/// A trait representing an optimization algorithm.
///
/// This trait is implemented for the algorithms found in the [`algorithms`](crate::algorithms)
/// module, and contains all the methods needed to be run by [`Algorithm::process`].
pub trait Algorithm<P, S: Status, U = (), E = Infallible> {
    /// A type which holds a summary of the algorithm's ending state.
    type Summary;
    /// The configuration struct for the algorithm.
    type Config;

    /// Any setup work done before the main steps of the algorithm should be done here.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See
    /// [`CostFunction::evaluate`](crate::traits::CostFunction::evaluate) for more information.
    fn initialize(
        &mut self,
        problem: &P,
        status: &mut S,
        args: &U,
        config: &Self::Config,
    ) -> Result<(), E>;

    /// The main "step" of an algorithm, which is repeated until one of the
    /// [`Terminator`]s given to [`Algorithm::process`] ends the run.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See
    /// [`CostFunction::evaluate`](crate::traits::CostFunction::evaluate) for more information.
    fn step(
        &mut self,
        current_step: usize,
        problem: &P,
        status: &mut S,
        args: &U,
        config: &Self::Config,
    ) -> Result<(), E>;

    /// Runs any steps needed by the [`Algorithm`] after termination or convergence. This will run
    /// regardless of whether the [`Algorithm`] converged.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See
    /// [`CostFunction::evaluate`](crate::traits::CostFunction::evaluate) for more information.
    #[allow(unused_variables)]
    fn postprocessing(
        &mut self,
        problem: &P,
        status: &mut S,
        args: &U,
        config: &Self::Config,
    ) -> Result<(), E> {
        Ok(())
    }

    /// Generates a new [`Algorithm::Summary`] from the current state of the [`Algorithm`], which
    /// can be displayed or used elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if any internal evaluation fails while creating the
    /// [`Algorithm::Summary`].
    fn summarize(
        &self,
        current_step: usize,
        problem: &P,
        status: &S,
        args: &U,
        config: &Self::Config,
    ) -> Result<Self::Summary, E>;

    /// Reset the algorithm to its initial state.
    fn reset(&mut self) {}

    /// The [`Callbacks`] an algorithm should run with if the caller has no preference.
    fn default_callbacks() -> Callbacks<Self, P, S, U, E, Self::Config>
    where
        Self: Sized,
    {
        Callbacks::empty()
    }

    /// Run the algorithm on the given problem until one of the `callbacks` signals termination.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if any evaluation of the problem fails. See
    /// [`CostFunction::evaluate`](crate::traits::CostFunction::evaluate) for more information.
    fn process(
        &mut self,
        problem: &P,
        args: &U,
        config: Self::Config,
        callbacks: Callbacks<Self, P, S, U, E, Self::Config>,
    ) -> Result<Self::Summary, E>
    where
        Self: Sized,
    {
        let mut callbacks = callbacks;
        let mut status = S::default();
        status.reset();
        self.reset();
        self.initialize(problem, &mut status, args, &config)?;
        let mut current_step = 0;
        loop {
            self.step(current_step, problem, &mut status, args, &config)?;
            if callbacks
                .check_for_termination(current_step, self, problem, &mut status, args, &config)
                .is_break()
            {
                break;
            }
            current_step += 1;
        }
        self.postprocessing(problem, &mut status, args, &config)?;
        self.summarize(current_step, problem, &status, args, &config)
    }
}

/// A trait which can be implemented on the configuration structs of [`Algorithm`]s to imply that
/// the algorithm can be run with parameter bounds.
pub trait Bounded
where
    Self: Sized,
{
    /// A helper method to get the mutable internal [`Bounds`] object.
    fn get_bounds_mut(&mut self) -> &mut Option<Bounds>;
    /// Sets all [`Bound`]s used by the [`Algorithm`]. This can be [`None`] for an unbounded
    /// problem, or [`Some`] [`Vec<(T, T)>`] with length equal to the number of free parameters.
    /// Individual upper or lower bounds can be unbounded by setting them equal to
    /// `Float::INFINITY` or `Float::NEG_INFINITY`.
    fn with_bounds<I: IntoIterator<Item = B>, B: Into<Bound>>(mut self, bounds: I) -> Self {
        let bounds = bounds
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .into();
        *self.get_bounds_mut() = Some(bounds);
        self
    }
}

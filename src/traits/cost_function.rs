use std::convert::Infallible;

use crate::{DMatrix, DVector, Float};

/// A trait which describes a function $`f(\mathbb{R}^n) \to \mathbb{R}`$
///
/// Such a function may also take an `args: &U` field which can be used to pass external
/// arguments to the function during minimization.
///
/// The `CostFunction` trait takes a generic `U` representing the type of user data/arguments
/// and a generic `E` representing any possible errors that might be returned during function
/// execution.
pub trait CostFunction<U = (), E = Infallible> {
    /// The input space consumed by the cost function.
    type Input;
    /// The evaluation of the function at a point `x` with the given arguments/user data.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// [`std::convert::Infallible`] if the function evaluation never fails.
    fn evaluate(&self, x: &Self::Input, args: &U) -> Result<Float, E>;
}

/// A trait which evaluates a [`CostFunction`] on a whole batch of candidate points at once.
///
/// The batch is a matrix with one candidate per row, and the result holds one cost per row in
/// the same order. The default implementation just evaluates each row in turn, but functions
/// with a closed form can override it with a vectorized version.
pub trait BatchCostFunction<U = (), E = Infallible>:
    CostFunction<U, E, Input = DVector<Float>>
{
    /// Evaluate every row of `xs`, returning a vector with one cost per row.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation of any row fails. See [`CostFunction::evaluate`] for
    /// more information.
    fn evaluate_batch(&self, xs: &DMatrix<Float>, args: &U) -> Result<DVector<Float>, E> {
        let mut fxs = DVector::zeros(xs.nrows());
        for (i, row) in xs.row_iter().enumerate() {
            fxs[i] = self.evaluate(&row.transpose(), args)?;
        }
        Ok(fxs)
    }
}

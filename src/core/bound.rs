use crate::{core::utils::SampleFloat, Float};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, ops::Deref};

/// An enum that describes a bound/limit on a parameter in a minimization.
///
/// [`Bound`]s can be used by bounded algorithms directly, or by unbounded algorithms through the
/// nonlinear parameter transformation in [`Bound::to_bounded`] and [`Bound::to_unbounded`].
#[derive(Default, Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Bound {
    #[default]
    /// `(-inf, +inf)`
    NoBound,
    /// `(min, +inf)`
    LowerBound(Float),
    /// `(-inf, max)`
    UpperBound(Float),
    /// `(min, max)`
    LowerAndUpperBound(Float, Float),
}
impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lower(), self.upper())
    }
}
impl From<(Float, Float)> for Bound {
    fn from(value: (Float, Float)) -> Self {
        assert!(value.0 < value.1, "lower bound must be below upper bound");
        match (value.0.is_finite(), value.1.is_finite()) {
            (true, true) => Self::LowerAndUpperBound(value.0, value.1),
            (true, false) => Self::LowerBound(value.0),
            (false, true) => Self::UpperBound(value.1),
            (false, false) => Self::NoBound,
        }
    }
}

impl Bound {
    /// Get a value in the uniform distribution between `lower` and `upper`.
    pub fn get_uniform(&self, rng: &mut Rng) -> Float {
        rng.range(self.lower(), self.upper())
    }
    /// Returns `true` if both ends of the bound are finite.
    pub const fn is_finite(&self) -> bool {
        matches!(self, Self::LowerAndUpperBound(_, _))
    }
    /// Checks whether the given `value` is compatible with the bounds.
    pub fn contains(&self, value: Float) -> bool {
        match self {
            Self::NoBound => true,
            Self::LowerBound(lb) => value >= *lb,
            Self::UpperBound(ub) => value <= *ub,
            Self::LowerAndUpperBound(lb, ub) => value >= *lb && value <= *ub,
        }
    }
    /// Checks whether the given `value` is compatible with the bound and returns `0.0` if it is,
    /// and the distance to the bound otherwise signed by whether the bound is a lower (`-`) or
    /// upper (`+`) bound.
    pub fn bound_excess(&self, value: Float) -> Float {
        match self {
            Self::NoBound => 0.0,
            Self::LowerBound(lb) => {
                if value >= *lb {
                    0.0
                } else {
                    value - lb
                }
            }
            Self::UpperBound(ub) => {
                if value <= *ub {
                    0.0
                } else {
                    value - ub
                }
            }
            Self::LowerAndUpperBound(lb, ub) => {
                if value < *lb {
                    value - lb
                } else if value > *ub {
                    value - ub
                } else {
                    0.0
                }
            }
        }
    }
    /// Returns the lower bound or `-inf` if there is none.
    pub const fn lower(&self) -> Float {
        match self {
            Self::NoBound => Float::NEG_INFINITY,
            Self::LowerBound(lb) => *lb,
            Self::UpperBound(_) => Float::NEG_INFINITY,
            Self::LowerAndUpperBound(lb, _) => *lb,
        }
    }
    /// Returns the upper bound or `+inf` if there is none.
    pub const fn upper(&self) -> Float {
        match self {
            Self::NoBound => Float::INFINITY,
            Self::LowerBound(_) => Float::INFINITY,
            Self::UpperBound(ub) => *ub,
            Self::LowerAndUpperBound(_, ub) => *ub,
        }
    }
    /// Checks if the given value is equal to one of the bounds.
    pub fn at_bound(&self, value: Float) -> bool {
        match self {
            Self::NoBound => false,
            Self::LowerBound(lb) => value == *lb,
            Self::UpperBound(ub) => value == *ub,
            Self::LowerAndUpperBound(lb, ub) => value == *lb || value == *ub,
        }
    }
    /// Wraps a value periodically into the bound. A value which lies below the lower bound
    /// re-enters from the upper bound and vice versa:
    ///
    /// ```math
    /// x < x_\text{min} \implies x' = x_\text{max} - \left[(x_\text{min} - x) \bmod (x_\text{max} - x_\text{min})\right]
    /// ```
    /// ```math
    /// x > x_\text{max} \implies x' = x_\text{min} + \left[(x - x_\text{max}) \bmod (x_\text{max} - x_\text{min})\right]
    /// ```
    /// Half-open bounds have no period, so values outside them are clamped to the finite end.
    pub fn wrap(&self, value: Float) -> Float {
        match *self {
            Self::LowerAndUpperBound(lb, ub) => {
                let width = ub - lb;
                if value < lb {
                    ub - (lb - value).rem_euclid(width)
                } else if value > ub {
                    lb + (value - ub).rem_euclid(width)
                } else {
                    value
                }
            }
            _ => value - self.bound_excess(value),
        }
    }
    /// Converts an unbounded "internal" parameter into a bounded "external" one via the transform:
    ///
    /// Upper and lower bounds:
    /// ```math
    /// x_\text{ext} = x_\text{min} + \left(\sin(x_\text{int}) + 1\right)\frac{x_\text{max} - x_\text{min}}{2}
    /// ```
    /// Upper bound only:
    /// ```math
    /// x_\text{ext} = x_\text{max} + 1 - \sqrt{x_\text{int}^2 + 1}
    /// ```
    /// Lower bound only:
    /// ```math
    /// x_\text{ext} = x_\text{min} - 1 + \sqrt{x_\text{int}^2 + 1}
    /// ```
    pub fn to_bounded(&self, val: Float) -> Float {
        match *self {
            Self::LowerBound(lb) => lb - 1.0 + Float::sqrt(Float::powi(val, 2) + 1.0),
            Self::UpperBound(ub) => ub + 1.0 - Float::sqrt(Float::powi(val, 2) + 1.0),
            Self::LowerAndUpperBound(lb, ub) => lb + (Float::sin(val) + 1.0) * (ub - lb) / 2.0,
            Self::NoBound => val,
        }
    }
    /// Converts a bounded "external" parameter into an unbounded "internal" one via the transform:
    ///
    /// Upper and lower bounds:
    /// ```math
    /// x_\text{int} = \arcsin\left(2\frac{x_\text{ext} - x_\text{min}}{x_\text{max} - x_\text{min}} - 1\right)
    /// ```
    /// Upper bound only:
    /// ```math
    /// x_\text{int} = \sqrt{(x_\text{max} - x_\text{ext} + 1)^2 - 1}
    /// ```
    /// Lower bound only:
    /// ```math
    /// x_\text{int} = \sqrt{(x_\text{ext} - x_\text{min} + 1)^2 - 1}
    /// ```
    pub fn to_unbounded(&self, val: Float) -> Float {
        match *self {
            Self::LowerBound(lb) => Float::sqrt(Float::powi(val - lb + 1.0, 2) - 1.0),
            Self::UpperBound(ub) => Float::sqrt(Float::powi(ub - val + 1.0, 2) - 1.0),
            Self::LowerAndUpperBound(lb, ub) => Float::asin(2.0 * (val - lb) / (ub - lb) - 1.0),
            Self::NoBound => val,
        }
    }
}

/// A struct that contains a list of [`Bound`]s, one per dimension.
#[derive(Default, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds(Vec<Bound>);

impl Bounds {
    /// Returns the inner Vector of bounds.
    pub fn into_inner(self) -> Vec<Bound> {
        self.0
    }
    /// Returns `true` if every [`Bound`] has two finite ends.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(Bound::is_finite)
    }
    /// Returns the `(lower, upper)` pair of every [`Bound`].
    pub fn limits(&self) -> Vec<(Float, Float)> {
        self.0.iter().map(|b| (b.lower(), b.upper())).collect()
    }
}

impl From<Vec<Bound>> for Bounds {
    fn from(value: Vec<Bound>) -> Self {
        Self(value)
    }
}

impl Deref for Bounds {
    type Target = Vec<Bound>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_contains_and_excess() {
        let b1 = Bound::LowerBound(0.0);
        assert!(b1.contains(1.0));
        assert!(!b1.contains(-1.0));
        assert_eq!(b1.bound_excess(-1.0), -1.0);

        let b2 = Bound::UpperBound(5.0);
        assert!(b2.contains(4.0));
        assert!(!b2.contains(6.0));
        assert_eq!(b2.bound_excess(6.0), 1.0);

        let b3 = Bound::LowerAndUpperBound(-1.0, 1.0);
        assert!(b3.contains(0.0));
        assert!(!b3.contains(2.0));
    }

    #[test]
    fn test_bound_from_tuples() {
        assert_eq!(
            Bound::from((-2.0, 2.0)),
            Bound::LowerAndUpperBound(-2.0, 2.0)
        );
        assert_eq!(
            Bound::from((Float::NEG_INFINITY, 2.0)),
            Bound::UpperBound(2.0)
        );
        assert_eq!(
            Bound::from((Float::NEG_INFINITY, Float::INFINITY)),
            Bound::NoBound
        );
    }

    #[test]
    fn test_bound_lower_upper_at_bound() {
        let b = Bound::LowerAndUpperBound(-2.0, 3.0);
        assert_eq!(b.lower(), -2.0);
        assert_eq!(b.upper(), 3.0);
        assert!(b.at_bound(-2.0));
        assert!(b.at_bound(3.0));
        assert!(!b.at_bound(0.0));
    }

    #[test]
    fn test_bound_transformations() {
        let b = Bound::LowerAndUpperBound(0.0, 2.0);
        let val = 1.0;
        let bounded = b.to_bounded(val);
        let unbounded = b.to_unbounded(bounded);
        assert!((val - unbounded).abs() < 1e-6);
    }

    #[test]
    fn test_periodic_wrap() {
        let b = Bound::LowerAndUpperBound(-2.0, 2.0);
        assert_eq!(b.wrap(0.5), 0.5);
        assert!((b.wrap(2.5) - -1.5).abs() < 1e-12);
        assert!((b.wrap(-2.5) - 1.5).abs() < 1e-12);
        // several periods away still lands inside
        assert!((b.wrap(13.0) - 1.0).abs() < 1e-12);
        assert!((b.wrap(-13.0) - -1.0).abs() < 1e-12);
        let half_open = Bound::LowerBound(0.0);
        assert_eq!(half_open.wrap(-3.0), 0.0);
        assert_eq!(Bound::NoBound.wrap(-3.0), -3.0);
    }

    #[test]
    fn test_bounds_container() {
        let b = Bound::LowerBound(0.0);
        let bounds: Bounds = vec![b].into();
        assert!(!bounds.is_finite());
        assert_eq!(bounds.limits(), vec![(0.0, Float::INFINITY)]);
        assert_eq!(bounds.into_inner(), vec![b]);
        let square: Bounds = vec![Bound::from((-2.0, 2.0)), Bound::from((-2.0, 2.0))].into();
        assert!(square.is_finite());
    }
}

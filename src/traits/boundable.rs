use crate::{core::Bounds, DVector};
use fastrand::Rng;

/// A trait for types which can be constrained to a set of [`Bounds`].
pub trait Boundable {
    /// Creates a random vector of values in the bounds.
    fn random_vector_in(bounds: &Bounds, rng: &mut Rng) -> Self;
    /// Checks whether [`self`] is contained in the given [`Bounds`] .
    fn is_in(&self, bounds: &Bounds) -> bool;
    /// Returns the signed amount that [`self`] exceeds the given [`Bounds`].
    fn excess_from(&self, bounds: &Bounds) -> Self;
    /// Transform [`self`] to an instance constrained inside the given [`Bounds`].
    fn constrain_to(&self, bounds: Option<&Bounds>) -> Self;
    /// Transform [`self`] from an instance constrained inside the given [`Bounds`] to an
    /// unconstrained instance.
    fn unconstrain_from(&self, bounds: Option<&Bounds>) -> Self;
    /// Wrap [`self`] periodically into the given [`Bounds`], so that a value leaving through one
    /// face re-enters through the opposite one.
    fn wrap_into(&self, bounds: &Bounds) -> Self;
    /// Clamp [`self`] onto the nearest face of the given [`Bounds`].
    fn clamp_into(&self, bounds: &Bounds) -> Self;
}

impl Boundable for DVector<crate::Float> {
    fn random_vector_in(bounds: &Bounds, rng: &mut Rng) -> Self {
        bounds
            .iter()
            .map(|b| b.get_uniform(rng))
            .collect::<Vec<_>>()
            .into()
    }
    fn is_in(&self, bounds: &Bounds) -> bool {
        self.iter()
            .zip(bounds.iter())
            .all(|(value, bound)| bound.contains(*value))
    }

    fn excess_from(&self, bounds: &Bounds) -> Self {
        self.iter()
            .zip(bounds.iter())
            .map(|(v, b)| b.bound_excess(*v))
            .collect::<Vec<_>>()
            .into()
    }

    fn constrain_to(&self, bounds: Option<&Bounds>) -> Self {
        bounds.map_or_else(
            || self.clone(),
            |bounds| {
                self.iter()
                    .zip(bounds.iter())
                    .map(|(val, bound)| bound.to_bounded(*val))
                    .collect::<Vec<_>>()
                    .into()
            },
        )
    }

    fn unconstrain_from(&self, bounds: Option<&Bounds>) -> Self {
        bounds.map_or_else(
            || self.clone(),
            |bounds| {
                self.iter()
                    .zip(bounds.iter())
                    .map(|(val, bound)| bound.to_unbounded(*val))
                    .collect::<Vec<_>>()
                    .into()
            },
        )
    }

    fn wrap_into(&self, bounds: &Bounds) -> Self {
        self.iter()
            .zip(bounds.iter())
            .map(|(val, bound)| bound.wrap(*val))
            .collect::<Vec<_>>()
            .into()
    }

    fn clamp_into(&self, bounds: &Bounds) -> Self {
        self - self.excess_from(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Bound;
    use nalgebra::dvector;

    fn square() -> Bounds {
        vec![
            Bound::LowerAndUpperBound(-2.0, 2.0),
            Bound::LowerAndUpperBound(-2.0, 2.0),
        ]
        .into()
    }

    #[test]
    fn test_random_vector_is_in_bounds() {
        let mut rng = Rng::with_seed(0);
        let bounds = square();
        for _ in 0..100 {
            let v = DVector::random_vector_in(&bounds, &mut rng);
            assert_eq!(v.len(), 2);
            assert!(v.is_in(&bounds));
        }
    }

    #[test]
    fn test_wrap_and_clamp() {
        let bounds = square();
        let v = dvector![2.5, -3.0];
        let wrapped = v.wrap_into(&bounds);
        assert!(wrapped.is_in(&bounds));
        assert!((wrapped[0] - -1.5).abs() < 1e-12);
        assert!((wrapped[1] - 1.0).abs() < 1e-12);
        let clamped = v.clamp_into(&bounds);
        assert_eq!(clamped, dvector![2.0, -2.0]);
    }

    #[test]
    fn test_constrain_round_trip() {
        let bounds = square();
        let v = dvector![0.5, -1.25];
        let internal = v.unconstrain_from(Some(&bounds));
        let external = internal.constrain_to(Some(&bounds));
        assert!((external - v).norm() < 1e-9);
        let untouched = dvector![10.0, 20.0];
        assert_eq!(untouched.constrain_to(None), untouched);
    }
}

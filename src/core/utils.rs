use crate::{DVector, Float};
use fastrand::Rng;
use fastrand_contrib::RngExt;

pub(crate) fn generate_random_vector(
    dimension: usize,
    lb: Float,
    ub: Float,
    rng: &mut Rng,
) -> DVector<Float> {
    DVector::from_vec((0..dimension).map(|_| rng.range(lb, ub)).collect())
}

pub(crate) fn generate_random_vector_in_limits(
    limits: &[(Float, Float)],
    rng: &mut Rng,
) -> DVector<Float> {
    DVector::from_vec(limits.iter().map(|(lb, ub)| rng.range(*lb, *ub)).collect())
}

/// A helper trait to get feature-gated floating-point random values
pub trait SampleFloat {
    /// Get a random value in a range
    fn range(&mut self, lower: Float, upper: Float) -> Float;
    /// Get a random value in the range [0, 1)
    fn float(&mut self) -> Float;
}
impl SampleFloat for Rng {
    #[cfg(not(feature = "f32"))]
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        self.f64_range(lower..upper)
    }
    #[cfg(feature = "f32")]
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        self.f32_range(lower..upper)
    }
    #[cfg(not(feature = "f32"))]
    fn float(&mut self) -> Float {
        self.f64()
    }
    #[cfg(feature = "f32")]
    fn float(&mut self) -> Float {
        self.f32()
    }
}

/// The Minkowski distance of order `p` between two vectors.
pub fn minkowski_distance(a: &DVector<Float>, b: &DVector<Float>, p: Float) -> Float {
    a.iter()
        .zip(b.iter())
        .map(|(ai, bi)| Float::powf(Float::abs(ai - bi), p))
        .sum::<Float>()
        .powf(1.0 / p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    #[test]
    fn test_random_vectors_respect_limits() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..50 {
            let v = generate_random_vector(3, -1.0, 1.0, &mut rng);
            assert!(v.iter().all(|x| (-1.0..1.0).contains(x)));
            let w = generate_random_vector_in_limits(&[(0.0, 1.0), (10.0, 20.0)], &mut rng);
            assert!((0.0..1.0).contains(&w[0]));
            assert!((10.0..20.0).contains(&w[1]));
        }
    }

    #[test]
    fn test_float_is_unit_interval() {
        let mut rng = Rng::with_seed(3);
        for _ in 0..100 {
            let u = rng.float();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_minkowski_distance() {
        let a = dvector![0.0, 0.0];
        let b = dvector![3.0, 4.0];
        assert_relative_eq!(minkowski_distance(&a, &b, 1.0), 7.0);
        assert_relative_eq!(minkowski_distance(&a, &b, 2.0), 5.0);
    }
}

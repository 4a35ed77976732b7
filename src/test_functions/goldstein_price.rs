use crate::{
    traits::{BatchCostFunction, CostFunction},
    DMatrix, DVector, Error, Float,
};

/// The Goldstein–Price function, a two-dimensional polynomial with several local minima and a
/// narrow global minimum.
///
/// ```math
/// f(x, y) = \left[1 + (x + y + 1)^2 (19 - 14x + 3x^2 - 14y + 6xy + 3y^2)\right]
///   \left[30 + (2x - 3y)^2 (18 - 32x + 12x^2 + 48y - 36xy + 27y^2)\right]
/// ```
/// The global minimum is $`f(0, -1) = 3`$. The function is usually studied on the square
/// $`[-2, 2]^2`$, where it is strictly positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoldsteinPrice;

impl GoldsteinPrice {
    /// The value of the global minimum.
    pub const MINIMUM: Float = 3.0;
    /// The location of the global minimum.
    pub const MINIMIZER: [Float; 2] = [0.0, -1.0];

    /// Evaluate the function at a single `(x, y)` coordinate.
    #[allow(clippy::suboptimal_flops)]
    pub fn value(x: Float, y: Float) -> Float {
        let a = 1.0
            + (x + y + 1.0).powi(2)
                * (19.0 - 14.0 * x + 3.0 * x.powi(2) - 14.0 * y + 6.0 * x * y + 3.0 * y.powi(2));
        let b = 30.0
            + (2.0 * x - 3.0 * y).powi(2)
                * (18.0 - 32.0 * x + 12.0 * x.powi(2) + 48.0 * y - 36.0 * x * y
                    + 27.0 * y.powi(2));
        a * b
    }
}

impl CostFunction<(), Error> for GoldsteinPrice {
    type Input = DVector<Float>;
    fn evaluate(&self, x: &DVector<Float>, _args: &()) -> Result<Float, Error> {
        if x.len() != 2 {
            return Err(Error::Shape {
                expected: 2,
                got: x.len(),
            });
        }
        Ok(Self::value(x[0], x[1]))
    }
}

impl BatchCostFunction<(), Error> for GoldsteinPrice {
    fn evaluate_batch(&self, xs: &DMatrix<Float>, _args: &()) -> Result<DVector<Float>, Error> {
        if xs.ncols() != 2 {
            return Err(Error::Shape {
                expected: 2,
                got: xs.ncols(),
            });
        }
        Ok(xs.column(0).zip_map(&xs.column(1), Self::value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fastrand::Rng;
    use nalgebra::{dmatrix, dvector};

    fn random_batch(n: usize, rng: &mut Rng) -> DMatrix<Float> {
        DMatrix::from_fn(n, 2, |_, _| 4.0 * rng.f64() as Float - 2.0)
    }

    #[test]
    fn test_global_minimum() {
        let [x, y] = GoldsteinPrice::MINIMIZER;
        assert_relative_eq!(GoldsteinPrice::value(x, y), GoldsteinPrice::MINIMUM);
        let fx = GoldsteinPrice
            .evaluate(&dvector![0.0, -1.0], &())
            .unwrap();
        assert_relative_eq!(fx, 3.0);
    }

    #[test]
    fn test_known_values() {
        assert_relative_eq!(GoldsteinPrice::value(0.0, 0.0), 600.0);
        // one of the local minima
        assert_relative_eq!(GoldsteinPrice::value(1.2, 0.8), 840.0, epsilon = 1e-9);
    }

    #[test]
    fn test_batch_keeps_row_order_and_size() {
        let xs = dmatrix![0.0, -1.0; 0.0, 0.0; 1.2, 0.8];
        let fxs = GoldsteinPrice.evaluate_batch(&xs, &()).unwrap();
        assert_eq!(fxs.len(), 3);
        assert_relative_eq!(fxs[0], 3.0);
        assert_relative_eq!(fxs[1], 600.0);
        assert_relative_eq!(fxs[2], 840.0, epsilon = 1e-9);
    }

    #[test]
    fn test_batch_matches_single_point_evaluation() {
        let mut rng = Rng::with_seed(0);
        let xs = random_batch(50, &mut rng);
        let fxs = GoldsteinPrice.evaluate_batch(&xs, &()).unwrap();
        for (row, fx) in xs.row_iter().zip(fxs.iter()) {
            let single = GoldsteinPrice.evaluate(&row.transpose(), &()).unwrap();
            assert_relative_eq!(single, *fx);
        }
    }

    #[test]
    fn test_batch_is_deterministic() {
        let mut rng = Rng::with_seed(1);
        let xs = random_batch(20, &mut rng);
        let first = GoldsteinPrice.evaluate_batch(&xs, &()).unwrap();
        let second = GoldsteinPrice.evaluate_batch(&xs, &()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_wrong_column_count_is_a_shape_error() {
        let xs = DMatrix::<Float>::zeros(4, 3);
        let err = GoldsteinPrice.evaluate_batch(&xs, &()).unwrap_err();
        assert!(matches!(
            err,
            Error::Shape {
                expected: 2,
                got: 3
            }
        ));
        let err = GoldsteinPrice
            .evaluate(&dvector![1.0], &())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Shape {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_non_negative_on_the_studied_square() {
        let mut rng = Rng::with_seed(2);
        let xs = random_batch(1000, &mut rng);
        let fxs = GoldsteinPrice.evaluate_batch(&xs, &()).unwrap();
        assert!(fxs.iter().all(|fx| *fx >= 3.0 - 1e-9));
    }

    #[test]
    fn test_batch_size_scales_without_changing_rows() {
        let mut rng = Rng::with_seed(3);
        let xs = random_batch(1000, &mut rng);
        let all = GoldsteinPrice.evaluate_batch(&xs, &()).unwrap();
        assert_eq!(all.len(), 1000);
        let first = GoldsteinPrice
            .evaluate_batch(&xs.rows(0, 1).into_owned(), &())
            .unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0], all[0]);
        let empty = GoldsteinPrice
            .evaluate_batch(&DMatrix::zeros(0, 2), &())
            .unwrap();
        assert!(empty.is_empty());
    }
}

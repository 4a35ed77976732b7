/// Module containing the Goldstein–Price test function.
pub mod goldstein_price;
pub use goldstein_price::GoldsteinPrice;

/// Module containing the Rosenbrock test function.
pub mod rosenbrock;
pub use rosenbrock::Rosenbrock;

/// Module containing the Rastrigin test function.
pub mod rastrigin;
pub use rastrigin::Rastrigin;

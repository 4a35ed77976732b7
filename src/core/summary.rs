use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Float;

use super::{Bound, Bounds};

/// A struct that holds the results of a minimization run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MinimizationSummary {
    /// The bounds of the parameters. This is `None` if no bounds were set.
    pub bounds: Option<Bounds>,
    /// The names of the parameters. This is `None` if no names were set.
    pub parameter_names: Option<Vec<String>>,
    /// A message that can be set by minimization algorithms.
    pub message: String,
    /// The best parameters found by the minimization.
    pub x: Vec<Float>,
    /// The value of the minimization problem function at [`MinimizationSummary::x`].
    pub fx: Float,
    /// The number of function evaluations.
    pub cost_evals: usize,
    /// The number of steps taken.
    pub steps: usize,
    /// Flag that says whether or not the fit is in a converged state.
    pub converged: bool,
}

impl MinimizationSummary {
    /// Set the names associated with each parameter.
    pub fn with_parameter_names<I: IntoIterator<Item = S>, S: AsRef<str>>(
        mut self,
        parameter_names: I,
    ) -> Self {
        self.parameter_names = Some(
            parameter_names
                .into_iter()
                .map(|name| name.as_ref().to_string())
                .collect(),
        );
        self
    }
}

impl Display for MinimizationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.parameter_names.clone().unwrap_or_else(|| {
            (0..self.x.len())
                .map(|i| format!("x_{}", i))
                .collect::<Vec<_>>()
        });
        let bounds = self
            .bounds
            .clone()
            .map(|b| b.into_inner())
            .unwrap_or_else(|| vec![Bound::NoBound; self.x.len()]);
        writeln!(f, "MSG:       {}", self.message)?;
        writeln!(f, "F(X):      {:+.5}", self.fx)?;
        writeln!(f, "N_F_EVALS: {}", self.cost_evals)?;
        writeln!(f, "N_STEPS:   {}", self.steps)?;
        writeln!(f, "CONVERGED: {}", self.converged)?;
        writeln!(
            f,
            "{:<10} {:>12} {:>12} {:>12}  AT LIMIT?",
            "PARAMETER", "VALUE", "LOWER", "UPPER"
        )?;
        for ((name, value), bound) in names.iter().zip(&self.x).zip(&bounds) {
            writeln!(
                f,
                "{:<10} {:>+12.5} {:>12.5} {:>12.5}  {}",
                name,
                value,
                bound.lower(),
                bound.upper(),
                if bound.at_bound(*value) { "Yes" } else { "No" }
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimization_summary_display() {
        let result = MinimizationSummary {
            bounds: Some(vec![Bound::LowerAndUpperBound(-2.0, 2.0), Bound::NoBound].into()),
            parameter_names: None,
            message: "Success".to_string(),
            x: vec![0.0, -1.0],
            fx: 3.0,
            cost_evals: 10,
            steps: 5,
            converged: false,
        }
        .with_parameter_names(["x", "y"]);
        let text = result.to_string();
        assert!(text.contains("MSG:       Success"));
        assert!(text.contains("F(X):      +3.00000"));
        assert!(text.contains("N_F_EVALS: 10"));
        assert!(text.lines().any(|line| line.starts_with('y')));
    }
}

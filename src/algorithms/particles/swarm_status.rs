use crate::{
    algorithms::particles::{Swarm, SwarmBoundaryMethod},
    core::Point,
    traits::Status,
    DVector, Float,
};
use serde::{Deserialize, Serialize};

/// A status for particle swarm optimization and similar methods.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct SwarmStatus {
    /// The global best position found by all particles (in unbounded space when using
    /// [`SwarmBoundaryMethod::Transform`])
    pub gbest: Point<DVector<Float>>,
    /// An indicator of whether the swarm has converged
    pub converged: bool,
    /// A message containing information about the condition of the swarm or convergence
    pub message: String,
    /// The swarm
    pub swarm: Swarm,
    /// The number of function evaluations
    pub n_f_evals: usize,
}

impl SwarmStatus {
    /// Get the global best position found by the swarm. If the boundary method is set to
    /// [`SwarmBoundaryMethod::Transform`], this will return the position in the original bounded space.
    pub fn get_best(&self) -> Point<DVector<Float>> {
        if matches!(self.swarm.boundary_method, SwarmBoundaryMethod::Transform) {
            self.gbest.constrain_to(self.swarm.bounds.as_ref())
        } else {
            self.gbest.clone()
        }
    }
    /// Replace the global best with the best personal best in the swarm if it is better.
    pub fn update_global_best(&mut self) {
        if let Some(best) = self.swarm.best() {
            if best.total_cmp(&self.gbest).is_lt() {
                self.gbest = best.clone();
            }
        }
    }
}

impl Status for SwarmStatus {
    fn reset(&mut self) {
        self.converged = false;
        self.message = String::new();
        self.gbest = Point::default();
        self.swarm.particles = vec![];
        self.swarm.neighbourhoods = vec![];
        self.n_f_evals = 0;
    }
    fn converged(&self) -> bool {
        self.converged
    }
    fn message(&self) -> &str {
        &self.message
    }
    fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algorithms::particles::SwarmParticle,
        core::{Bound, Bounds},
    };
    use nalgebra::dvector;

    #[test]
    fn test_global_best_only_improves() {
        let mut status = SwarmStatus::default();
        let mut particle = SwarmParticle::new(dvector![1.0, 1.0], dvector![0.0, 0.0]);
        particle.best.fx = Some(10.0);
        status.swarm.particles = vec![particle];
        status.update_global_best();
        assert_eq!(status.gbest.fx, Some(10.0));
        status.swarm.particles[0].best = Point {
            x: dvector![0.0, 0.0],
            fx: Some(20.0),
        };
        status.update_global_best();
        assert_eq!(status.gbest.fx, Some(10.0));
        assert_eq!(status.gbest.x, dvector![1.0, 1.0]);
    }

    #[test]
    fn test_get_best_maps_transformed_positions() {
        let bounds: Bounds = vec![Bound::from((-2.0, 2.0)), Bound::from((-2.0, 2.0))].into();
        let mut status = SwarmStatus::default();
        status.swarm.bounds = Some(bounds);
        status.gbest = Point {
            x: dvector![0.0, 0.0],
            fx: Some(600.0),
        };
        assert_eq!(status.get_best().x, dvector![0.0, 0.0]);
        status.swarm.boundary_method = SwarmBoundaryMethod::Transform;
        let best = status.get_best();
        assert!(best.x.iter().all(|x| x.abs() < 1e-12));
        status.gbest.x = dvector![Float::asin(1.0), 0.0];
        assert!((status.get_best().x[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset_clears_the_run() {
        let mut status = SwarmStatus {
            converged: true,
            message: "done".to_string(),
            n_f_evals: 40,
            ..Default::default()
        };
        status.reset();
        assert!(!status.converged());
        assert_eq!(status.message(), "");
        assert_eq!(status.n_f_evals, 0);
        assert!(status.gbest.fx.is_none());
    }
}

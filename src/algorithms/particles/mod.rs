/// Implementation of Particle Swarm Optimization (PSO) algorithm
pub mod pso;
pub use pso::{PSOConfig, PSO};

/// [`Swarm`] type for swarm-based optimizers.
pub mod swarm;
use serde::{Deserialize, Serialize};
pub use swarm::{
    delannoy, Norm, Swarm, SwarmBoundaryMethod, SwarmParticle, SwarmPositionInitializer,
    SwarmTopology, SwarmUpdateMethod, SwarmVelocityInitializer,
};

/// [`SwarmStatus`] type for swarm-based optimizers.
pub mod swarm_status;
pub use swarm_status::SwarmStatus;

use crate::{
    core::Point,
    traits::{BatchCostFunction, Observer, Status, Terminator},
    DVector, Float,
};
use std::ops::ControlFlow;

/// An [`Observer`] which stores the swarm particles' history as well as the
/// history of global best positions.
#[derive(Serialize, Deserialize, Default, Clone)]
pub struct TrackingSwarmObserver {
    /// The history of the swarm particles
    pub history: Vec<Vec<SwarmParticle>>,
    /// The history of the best position in the swarm
    pub best_history: Vec<Point<DVector<Float>>>,
}

impl<P, U, E> Observer<PSO, P, SwarmStatus, U, E, PSOConfig> for TrackingSwarmObserver
where
    P: BatchCostFunction<U, E>,
{
    fn observe(
        &mut self,
        _current_step: usize,
        _algorithm: &PSO,
        _problem: &P,
        status: &SwarmStatus,
        _args: &U,
        _config: &PSOConfig,
    ) {
        self.history.push(status.swarm.get_particles());
        self.best_history.push(status.get_best());
    }
}

/// A [`Terminator`] which stops the [`PSO`] once the best cost has changed by less than
/// `ftol * (1 + |best|)` for `ftol_iter` consecutive steps.
///
/// The default tolerance is $`-\infty`$, which never terminates.
#[derive(Clone, Debug)]
pub struct PSOFTerminator {
    /// Relative tolerance on the change of the best cost
    pub ftol: Float,
    /// Number of consecutive steps the change must stay below the tolerance
    pub ftol_iter: usize,
    previous_best: Option<Float>,
    stalled: usize,
}
impl PSOFTerminator {
    /// Create a terminator with the given tolerance and patience.
    ///
    /// # Panics
    ///
    /// This method will panic if `ftol_iter` is zero.
    pub fn new(ftol: Float, ftol_iter: usize) -> Self {
        assert!(ftol_iter > 0, "ftol_iter must be at least 1");
        Self {
            ftol,
            ftol_iter,
            previous_best: None,
            stalled: 0,
        }
    }
}
impl Default for PSOFTerminator {
    fn default() -> Self {
        Self::new(Float::NEG_INFINITY, 1)
    }
}
impl<P, U, E> Terminator<PSO, P, SwarmStatus, U, E, PSOConfig> for PSOFTerminator
where
    P: BatchCostFunction<U, E>,
{
    fn check_for_termination(
        &mut self,
        _current_step: usize,
        _algorithm: &mut PSO,
        _problem: &P,
        status: &mut SwarmStatus,
        _args: &U,
        _config: &PSOConfig,
    ) -> ControlFlow<()> {
        let best = status.gbest.fx.unwrap_or(Float::INFINITY);
        if let Some(previous) = self.previous_best {
            if (best - previous).abs() < self.ftol * (1.0 + previous.abs()) {
                self.stalled += 1;
            } else {
                self.stalled = 0;
            }
        }
        self.previous_best = Some(best);
        if self.stalled >= self.ftol_iter {
            status.converged = true;
            status.update_message(&format!(
                "Best cost changed by less than ftol for {} steps",
                self.ftol_iter
            ));
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

use fastrand::Rng;

use crate::{
    algorithms::particles::Swarm,
    core::{Bounds, Callbacks, MaxSteps, MinimizationSummary},
    traits::{Algorithm, BatchCostFunction, Bounded, Status},
    DVector, Float,
};

use super::{SwarmStatus, SwarmUpdateMethod};

/// The configuration struct for the [`PSO`] algorithm.
#[derive(Clone, Debug)]
pub struct PSOConfig {
    swarm: Swarm,
    bounds: Option<Bounds>,
    omega: Float,
    c1: Float,
    c2: Float,
    velocity_clamp: Option<(Float, Float)>,
}
impl PSOConfig {
    /// Sets the inertial weight $`\omega`$ (default = `0.9`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`\omega < 0`$.
    pub fn with_omega(mut self, value: Float) -> Self {
        assert!(value >= 0.0, "omega must be non-negative");
        self.omega = value;
        self
    }
    /// Sets the cognitive weight $`c_1`$ which controls the particle's tendency
    /// to move towards its personal best (default = `0.5`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`c_1 < 0`$.
    pub fn with_c1(mut self, value: Float) -> Self {
        assert!(value >= 0.0, "c1 must be non-negative");
        self.c1 = value;
        self
    }
    /// Sets the social weight $`c_2`$ which controls the particle's tendency
    /// to move towards the global (or neighborhood) best depending on the swarm
    /// [`SwarmTopology`](super::SwarmTopology) (default = `0.3`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`c_2 < 0`$.
    pub fn with_c2(mut self, value: Float) -> Self {
        assert!(value >= 0.0, "c2 must be non-negative");
        self.c2 = value;
        self
    }
    /// Clamp every velocity component into `[min, max]` (default = no clamp).
    ///
    /// # Panics
    ///
    /// This method will panic if `min >= max`.
    pub fn with_velocity_clamp(mut self, min: Float, max: Float) -> Self {
        assert!(min < max, "velocity clamp must satisfy min < max");
        self.velocity_clamp = Some((min, max));
        self
    }
    /// Convenience method to configure the swarm.
    pub fn setup_swarm<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Swarm) -> Swarm,
    {
        self.swarm = f(self.swarm);
        self
    }
    /// The configured swarm.
    pub const fn swarm(&self) -> &Swarm {
        &self.swarm
    }
    /// The inertial weight $`\omega`$.
    pub const fn omega(&self) -> Float {
        self.omega
    }
    /// The cognitive weight $`c_1`$.
    pub const fn c1(&self) -> Float {
        self.c1
    }
    /// The social weight $`c_2`$.
    pub const fn c2(&self) -> Float {
        self.c2
    }
}
impl Bounded for PSOConfig {
    fn get_bounds_mut(&mut self) -> &mut Option<Bounds> {
        &mut self.bounds
    }
}
impl Default for PSOConfig {
    fn default() -> Self {
        Self {
            swarm: Swarm::default(),
            bounds: None,
            omega: 0.9,
            c1: 0.5,
            c2: 0.3,
            velocity_clamp: None,
        }
    }
}

/// Particle Swarm Optimizer
///
/// The PSO algorithm involves an ensemble of particles which are aware of the position of all or
/// nearby particles in the swarm. The general algorithm involves updating each particle's velocity
/// as follows:
///
/// ```math
/// v_i^{t+1} = \omega v_i^t + c_1 r_{1,i}^{t+1}(p^t_i - x^t_i) + c_2 r_{2,i}^{t+1}(g^t - x^t_i)
/// ```
/// where $`r_1`$ and $`r_2`$ are uniformly distributed random vectors in $`[0,1)`$, $`\omega`$ is
/// an inertial weight parameter, $`c_1`$ and $`c_2`$ are cognitive and social weights
/// respectively, $`p_i^t`$ is the particle's personal best position, and $`g_i^t`$ is the swarm's best
/// position (or the best position of the particle's neighbourhood depending on the swarm
/// topology). See [^1] for more information.
///
/// The first step of a run does not move the swarm. It reports the positions and costs found by
/// [`Algorithm::initialize`], so a run of `N` steps evaluates the swarm `N` times and the first
/// observed state is the initial swarm.
///
/// For bounds handling, see [^2]. The
/// [`SwarmBoundaryMethod::Transform`](crate::algorithms::particles::SwarmBoundaryMethod) option
/// uses the nonlinear bounds transformation supplied by this crate instead.
///
/// [^1]: [Houssein, E. H., Gad, A. G., Hussain, K., & Suganthan, P. N. (2021). Major Advances in Particle Swarm Optimization: Theory, Analysis, and Application. In Swarm and Evolutionary Computation (Vol. 63, p. 100868). Elsevier BV.](https://doi.org/10.1016/j.swevo.2021.100868)
/// [^2]: [Chu, W., Gao, X., & Sorooshian, S. (2011). Handling boundary constraints for particle swarm optimization in high-dimensional search space. In Information Sciences (Vol. 181, Issue 20, pp. 4569–4581). Elsevier BV.](https://doi.org/10.1016/j.ins.2010.11.030)
#[derive(Clone, Debug)]
pub struct PSO {
    rng: Rng,
    dimension: usize,
}

impl PSO {
    /// Construct a new particle swarm optimizer working in a `dimension` dimensional space.
    pub const fn new(dimension: usize, rng: Rng) -> Self {
        Self { rng, dimension }
    }
    fn update_sync<P, U, E>(
        &mut self,
        problem: &P,
        status: &mut SwarmStatus,
        args: &U,
        config: &PSOConfig,
    ) -> Result<(), E>
    where
        P: BatchCostFunction<U, E>,
    {
        let nbests: Vec<DVector<Float>> = status.swarm.neighbourhood_bests(&status.gbest);
        let boundary_method = status.swarm.boundary_method;
        for (particle, nbest) in status.swarm.particles.iter_mut().zip(&nbests) {
            particle.update_velocity(
                nbest,
                config.omega,
                config.c1,
                config.c2,
                config.velocity_clamp,
                &mut self.rng,
            );
            particle.update_position(config.bounds.as_ref(), boundary_method);
        }
        status.swarm.evaluate(problem, args)?;
        status.n_f_evals += status.swarm.particles.len();
        status.swarm.update_personal_bests();
        status.update_global_best();
        Ok(())
    }
    fn update_async<P, U, E>(
        &mut self,
        problem: &P,
        status: &mut SwarmStatus,
        args: &U,
        config: &PSOConfig,
    ) -> Result<(), E>
    where
        P: BatchCostFunction<U, E>,
    {
        let boundary_method = status.swarm.boundary_method;
        for i in 0..status.swarm.particles.len() {
            // later particles see the improvements of earlier ones
            let nbest = status.swarm.neighbourhood_best(i, &status.gbest);
            let particle = &mut status.swarm.particles[i];
            particle.update_velocity(
                &nbest,
                config.omega,
                config.c1,
                config.c2,
                config.velocity_clamp,
                &mut self.rng,
            );
            particle.update_position(config.bounds.as_ref(), boundary_method);
            particle.evaluate(problem, args, config.bounds.as_ref(), boundary_method)?;
            status.n_f_evals += 1;
            particle.update_best();
            if particle.best.total_cmp(&status.gbest).is_lt() {
                status.gbest = particle.best.clone();
            }
        }
        Ok(())
    }
}

impl<P, U, E> Algorithm<P, SwarmStatus, U, E> for PSO
where
    P: BatchCostFunction<U, E>,
{
    type Summary = MinimizationSummary;
    type Config = PSOConfig;

    fn initialize(
        &mut self,
        problem: &P,
        status: &mut SwarmStatus,
        args: &U,
        config: &Self::Config,
    ) -> Result<(), E> {
        if let Some(bounds) = &config.bounds {
            assert_eq!(
                bounds.len(),
                self.dimension,
                "expected one bound per dimension"
            );
        }
        status.swarm = config.swarm.clone();
        status.swarm.initialize(
            &mut self.rng,
            self.dimension,
            config.bounds.as_ref(),
            config.velocity_clamp,
            problem,
            args,
        )?;
        status.n_f_evals += status.swarm.particles.len();
        status.update_global_best();
        status.update_message("Initialized");
        trace_info!(
            n_particles = status.swarm.particles.len(),
            topology = ?status.swarm.topology,
            best = ?status.gbest.fx,
            "initialized swarm"
        );
        Ok(())
    }

    fn step(
        &mut self,
        current_step: usize,
        problem: &P,
        status: &mut SwarmStatus,
        args: &U,
        config: &Self::Config,
    ) -> Result<(), E> {
        // the first step reports the swarm evaluated in `initialize`
        if current_step == 0 {
            status.update_message("Initial swarm");
            return Ok(());
        }
        match status.swarm.update_method {
            SwarmUpdateMethod::Synchronous => self.update_sync(problem, status, args, config)?,
            SwarmUpdateMethod::Asynchronous => self.update_async(problem, status, args, config)?,
        }
        status.swarm.compute_neighbourhoods(self.dimension);
        trace_debug!(step = current_step, best = ?status.gbest.fx, "swarm step");
        Ok(())
    }

    fn summarize(
        &self,
        current_step: usize,
        _problem: &P,
        status: &SwarmStatus,
        _args: &U,
        config: &Self::Config,
    ) -> Result<Self::Summary, E> {
        let best = status.get_best();
        Ok(MinimizationSummary {
            bounds: config.bounds.clone(),
            parameter_names: None,
            message: status.message.clone(),
            x: best.x.iter().copied().collect(),
            fx: best.fx.unwrap_or(Float::INFINITY),
            cost_evals: status.n_f_evals,
            steps: current_step + 1,
            converged: status.converged,
        })
    }

    fn default_callbacks() -> Callbacks<Self, P, SwarmStatus, U, E, Self::Config>
    where
        Self: Sized,
    {
        Callbacks::empty().with_terminator(MaxSteps::default())
    }
}

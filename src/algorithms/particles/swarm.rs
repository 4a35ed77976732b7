use crate::{
    core::{
        utils::{
            generate_random_vector, generate_random_vector_in_limits, minkowski_distance,
            SampleFloat,
        },
        Bounds, Point,
    },
    traits::{BatchCostFunction, Boundable, CostFunction},
    DMatrix, DVector, Float,
};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A swarm of particles used in particle swarm optimization and similar methods.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Swarm {
    /// The boundaries used by the swarm
    pub bounds: Option<Bounds>,
    /// The number of particles
    pub n_particles: usize,
    /// A list of the particles in the swarm
    pub particles: Vec<SwarmParticle>,
    /// The topology used by the swarm
    pub topology: SwarmTopology,
    /// The update method used by the swarm
    pub update_method: SwarmUpdateMethod,
    /// The boundary method used by the swarm
    pub boundary_method: SwarmBoundaryMethod,
    /// The position initializer used by the swarm
    pub position_initializer: SwarmPositionInitializer,
    /// The velocity initializer used by the swarm
    pub velocity_initializer: SwarmVelocityInitializer,
    /// The indices of the particles in each particle's neighbourhood (empty for
    /// [`SwarmTopology::Global`])
    pub neighbourhoods: Vec<Vec<usize>>,
}

impl Default for Swarm {
    fn default() -> Self {
        Self {
            bounds: None,
            n_particles: 100,
            particles: Vec::default(),
            topology: SwarmTopology::default(),
            update_method: SwarmUpdateMethod::default(),
            boundary_method: SwarmBoundaryMethod::default(),
            position_initializer: SwarmPositionInitializer::default(),
            velocity_initializer: SwarmVelocityInitializer::default(),
            neighbourhoods: Vec::default(),
        }
    }
}

impl Swarm {
    /// Get list of the particles in the swarm. If the boundary method is set to
    /// [`SwarmBoundaryMethod::Transform`], this will transform the particles' coordinates to the
    /// original bounded space.
    pub fn get_particles(&self) -> Vec<SwarmParticle> {
        if matches!(self.boundary_method, SwarmBoundaryMethod::Transform) {
            self.particles
                .iter()
                .map(|p| p.to_bounded(self.bounds.as_ref()))
                .collect()
        } else {
            self.particles.clone()
        }
    }
    /// The current particle positions in the bounded space, one particle per row.
    pub fn positions(&self) -> DMatrix<Float> {
        let particles = self.get_particles();
        let dimension = particles.first().map_or(0, |p| p.position.x.len());
        DMatrix::from_fn(particles.len(), dimension, |i, j| particles[i].position.x[j])
    }
    /// Create the particles in the swarm and evaluate their starting positions in a single batch.
    /// The method uses the configured [`SwarmPositionInitializer`] and [`SwarmVelocityInitializer`]
    /// to create the particles. Personal bests start at the initial positions.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    pub fn initialize<P, U, E>(
        &mut self,
        rng: &mut Rng,
        dimension: usize,
        bounds: Option<&Bounds>,
        velocity_clamp: Option<(Float, Float)>,
        problem: &P,
        args: &U,
    ) -> Result<(), E>
    where
        P: BatchCostFunction<U, E>,
    {
        self.bounds = bounds.cloned();
        let mut positions =
            self.position_initializer
                .init_positions(rng, dimension, self.n_particles, bounds);
        let velocities = self.velocity_initializer.init_velocities(
            rng,
            dimension,
            self.n_particles,
            velocity_clamp,
        );
        // Transform keeps the particles in the unbounded internal space
        if matches!(self.boundary_method, SwarmBoundaryMethod::Transform) {
            positions
                .iter_mut()
                .for_each(|position| *position = position.unconstrain_from(bounds));
        }
        self.particles = positions
            .into_iter()
            .zip(velocities)
            .map(|(position, velocity)| SwarmParticle::new(position, velocity))
            .collect();
        self.evaluate(problem, args)?;
        self.particles
            .iter_mut()
            .for_each(|particle| particle.best = particle.position.clone());
        self.compute_neighbourhoods(dimension);
        Ok(())
    }
    /// Evaluate every particle at its current position with a single call to
    /// [`BatchCostFunction::evaluate_batch`].
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    pub fn evaluate<P, U, E>(&mut self, problem: &P, args: &U) -> Result<(), E>
    where
        P: BatchCostFunction<U, E>,
    {
        let fxs = problem.evaluate_batch(&self.positions(), args)?;
        let bounds = self.bounds.as_ref();
        for (particle, fx) in self.particles.iter_mut().zip(fxs.iter()) {
            particle.position.fx = Some(penalize(
                &particle.position.x,
                *fx,
                bounds,
                self.boundary_method,
            ));
        }
        Ok(())
    }
    /// Replace each particle's personal best with its current position if the latter is better.
    pub fn update_personal_bests(&mut self) {
        self.particles
            .iter_mut()
            .for_each(SwarmParticle::update_best);
    }
    /// The best personal best position held by any particle.
    pub fn best(&self) -> Option<&Point<DVector<Float>>> {
        self.particles
            .iter()
            .min_by(|a, b| a.total_cmp(b))
            .map(|particle| &particle.best)
    }
    /// Recompute the neighbourhood of every particle from the current positions. This does nothing
    /// for [`SwarmTopology::Global`], and for fixed topologies whose neighbourhoods are already
    /// known.
    pub fn compute_neighbourhoods(&mut self, dimension: usize) {
        let Some(k) = self.topology.neighbourhood_size(dimension) else {
            return;
        };
        if self.topology.is_fixed() && self.neighbourhoods.len() == self.particles.len() {
            return;
        }
        let p = self.topology.norm().p();
        let k = k.min(self.particles.len());
        // distances are measured where the particles are evaluated
        let positions: Vec<DVector<Float>> = self
            .get_particles()
            .into_iter()
            .map(|particle| particle.position.x)
            .collect();
        self.neighbourhoods = (0..positions.len())
            .map(|i| {
                let distances: Vec<Float> = positions
                    .iter()
                    .map(|other| minkowski_distance(&positions[i], other, p))
                    .collect();
                let mut indices: Vec<usize> = (0..positions.len()).collect();
                // the particle itself always wins a tie at zero distance
                indices.sort_by(|&a, &b| {
                    distances[a]
                        .total_cmp(&distances[b])
                        .then((a != i).cmp(&(b != i)))
                });
                indices.truncate(k);
                indices
            })
            .collect();
    }
    /// The best position currently known to the neighbourhood of particle `i`. This is `gbest`
    /// for [`SwarmTopology::Global`] or when no neighbourhood has been computed.
    pub fn neighbourhood_best(&self, i: usize, gbest: &Point<DVector<Float>>) -> DVector<Float> {
        if matches!(self.topology, SwarmTopology::Global) {
            return gbest.x.clone();
        }
        self.neighbourhoods
            .get(i)
            .and_then(|neighbourhood| {
                neighbourhood
                    .iter()
                    .map(|&j| &self.particles[j])
                    .min_by(|a, b| a.total_cmp(b))
            })
            .map_or_else(|| gbest.x.clone(), |particle| particle.best.x.clone())
    }
    /// The best position known to each particle's neighbourhood, in particle order.
    pub fn neighbourhood_bests(&self, gbest: &Point<DVector<Float>>) -> Vec<DVector<Float>> {
        (0..self.particles.len())
            .map(|i| self.neighbourhood_best(i, gbest))
            .collect()
    }
    /// Sets the number of particles in the swarm (default = `100`).
    ///
    /// # Panics
    ///
    /// This method will panic if `value` is zero.
    pub fn with_n_particles(mut self, value: usize) -> Self {
        assert!(value > 0, "a swarm needs at least one particle");
        self.n_particles = value;
        self
    }
    /// Sets the topology used by the swarm (default = [`SwarmTopology::Global`]).
    pub const fn with_topology(mut self, value: SwarmTopology) -> Self {
        self.topology = value;
        self
    }
    /// Sets the update method used by the swarm (default = [`SwarmUpdateMethod::Synchronous`]).
    pub const fn with_update_method(mut self, value: SwarmUpdateMethod) -> Self {
        self.update_method = value;
        self
    }
    /// Set the [`PSO`](super::PSO)'s [`SwarmVelocityInitializer`].
    pub fn with_velocity_initializer(
        mut self,
        velocity_initializer: SwarmVelocityInitializer,
    ) -> Self {
        self.velocity_initializer = velocity_initializer;
        self
    }
    /// Set the [`PSO`](super::PSO)'s [`SwarmPositionInitializer`].
    pub fn with_position_initializer(
        mut self,
        position_initializer: SwarmPositionInitializer,
    ) -> Self {
        self.position_initializer = position_initializer;
        self
    }
    /// Set the [`SwarmBoundaryMethod`] for the [`PSO`](super::PSO)
    /// (default = [`SwarmBoundaryMethod::Periodic`]).
    pub const fn with_boundary_method(mut self, boundary_method: SwarmBoundaryMethod) -> Self {
        self.boundary_method = boundary_method;
        self
    }
}

fn penalize(
    x: &DVector<Float>,
    fx: Float,
    bounds: Option<&Bounds>,
    boundary_method: SwarmBoundaryMethod,
) -> Float {
    match (bounds, boundary_method) {
        (Some(bounds), SwarmBoundaryMethod::Inf) if !x.is_in(bounds) => Float::INFINITY,
        _ => fx,
    }
}

/// Methods for handling boundaries in swarm optimizations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwarmBoundaryMethod {
    /// Wrap positions which leave the bounds back in through the opposite face
    #[default]
    Periodic,
    /// Move positions which leave the bounds onto the nearest face
    Nearest,
    /// Set infeasible values to +inf
    Inf,
    /// Transform the function inputs nonlinearly to map the infinite plane to a bounded subset
    Transform,
}

/// The Minkowski norm used to measure distances between particles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Norm {
    /// Sum of absolute differences (`p = 1`)
    L1,
    /// Euclidean distance (`p = 2`)
    #[default]
    L2,
}
impl Norm {
    /// The order `p` of the norm.
    pub const fn p(&self) -> Float {
        match self {
            Self::L1 => 1.0,
            Self::L2 => 2.0,
        }
    }
}

/// Swarm topologies which determine the flow of information
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwarmTopology {
    /// Each particle is connected to all others
    #[default]
    Global,
    /// Each particle is connected to its `k` nearest particles (itself included)
    Ring {
        /// The number of particles in each neighbourhood
        k: usize,
        /// The norm used to find the nearest particles
        p: Norm,
        /// Compute the neighbourhoods once at initialization instead of at every step
        fixed: bool,
    },
    /// A ring whose neighbourhood size is the Delannoy number $`D(d, r)`$ for a `d`-dimensional
    /// problem
    VonNeumann {
        /// The range of the neighbourhood
        r: usize,
        /// The norm used to find the nearest particles
        p: Norm,
        /// Compute the neighbourhoods once at initialization instead of at every step
        fixed: bool,
    },
}
impl SwarmTopology {
    /// The number of particles in each neighbourhood, or `None` for [`SwarmTopology::Global`].
    pub fn neighbourhood_size(&self, dimension: usize) -> Option<usize> {
        match *self {
            Self::Global => None,
            Self::Ring { k, .. } => Some(k.max(1)),
            Self::VonNeumann { r, .. } => Some(delannoy(dimension, r)),
        }
    }
    const fn norm(&self) -> Norm {
        match *self {
            Self::Global => Norm::L2,
            Self::Ring { p, .. } | Self::VonNeumann { p, .. } => p,
        }
    }
    const fn is_fixed(&self) -> bool {
        match *self {
            Self::Global => true,
            Self::Ring { fixed, .. } | Self::VonNeumann { fixed, .. } => fixed,
        }
    }
}

/// The Delannoy number $`D(d, r)`$, which counts the lattice points within an $`L_1`$ distance
/// of `r` in `d` dimensions.
///
/// ```math
/// D(d, r) = D(d - 1, r) + D(d - 1, r - 1) + D(d, r - 1)
/// ```
/// with $`D(0, r) = D(d, 0) = 1`$.
pub fn delannoy(d: usize, r: usize) -> usize {
    if d == 0 || r == 0 {
        1
    } else {
        delannoy(d - 1, r) + delannoy(d - 1, r - 1) + delannoy(d, r - 1)
    }
}

/// The algorithmic method to update the swarm positions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwarmUpdateMethod {
    /// Move every particle, then evaluate the whole swarm in one batch
    #[default]
    Synchronous,
    /// Move, evaluate and update each particle in turn so later particles see earlier
    /// improvements
    Asynchronous,
}

/// Methods to initialize the positions of particles in a swarm.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum SwarmPositionInitializer {
    /// Uniform distribution inside the bounds if they are all finite, otherwise in the unit
    /// hypercube `[0, 1)`
    #[default]
    Uniform,
    /// Start all particles at the origin.
    Zero,
    /// Random distribution within the given limits for each dimension
    RandomInLimits(Vec<(Float, Float)>),
    /// Custom distribution from a given vector of positions
    Custom(Vec<DVector<Float>>),
    /// Latin Hypercube sampling within the given limits for each dimension
    LatinHypercube(Vec<(Float, Float)>),
}
impl SwarmPositionInitializer {
    /// Initialize the positions of the particles in the swarm
    /// using the given random number generator and dimension.
    pub fn init_positions(
        &self,
        rng: &mut Rng,
        dimension: usize,
        n_particles: usize,
        bounds: Option<&Bounds>,
    ) -> Vec<DVector<Float>> {
        match self {
            Self::Uniform => match bounds {
                Some(bounds) if bounds.is_finite() => (0..n_particles)
                    .map(|_| DVector::random_vector_in(bounds, rng))
                    .collect(),
                _ => (0..n_particles)
                    .map(|_| generate_random_vector(dimension, 0.0, 1.0, rng))
                    .collect(),
            },
            Self::Zero => (0..n_particles)
                .map(|_| DVector::zeros(dimension))
                .collect(),
            Self::RandomInLimits(limits) => (0..n_particles)
                .map(|_| generate_random_vector_in_limits(limits, rng))
                .collect(),
            Self::Custom(positions) => positions.clone(),
            Self::LatinHypercube(limits) => {
                let dimension = limits.len();
                let mut lhs_matrix = vec![vec![0.0; dimension]; n_particles];
                for (d, (min, max)) in limits.iter().enumerate() {
                    let mut bins: Vec<usize> = (0..n_particles).collect();
                    rng.shuffle(&mut bins);
                    let bin_size = (max - min) / n_particles as Float;
                    for (i, &bin) in bins.iter().enumerate() {
                        let lower = min + bin as Float * bin_size;
                        lhs_matrix[i][d] = rng.range(lower, lower + bin_size);
                    }
                }
                lhs_matrix.into_iter().map(DVector::from_vec).collect()
            }
        }
    }
}

/// Methods for setting the initial velocity of particles in a swarm
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum SwarmVelocityInitializer {
    /// Initialize velocities uniformly in `[0, 1)`, or inside the velocity clamp if one is set
    #[default]
    Uniform,
    /// Initialize all velocities to zero
    Zero,
    /// Initialize velocities randomly within the given limits
    RandomInLimits(Vec<(Float, Float)>),
}
impl SwarmVelocityInitializer {
    /// Initialize the velocities of the particles in the swarm
    /// using the given random number generator and dimension.
    pub fn init_velocities(
        &self,
        rng: &mut Rng,
        dimension: usize,
        n_particles: usize,
        velocity_clamp: Option<(Float, Float)>,
    ) -> Vec<DVector<Float>> {
        match self {
            Self::Uniform => {
                let (lower, upper) = velocity_clamp.unwrap_or((0.0, 1.0));
                (0..n_particles)
                    .map(|_| generate_random_vector(dimension, lower, upper, rng))
                    .collect()
            }
            Self::Zero => (0..n_particles)
                .map(|_| DVector::zeros(dimension))
                .collect(),
            Self::RandomInLimits(limits) => (0..n_particles)
                .map(|_| generate_random_vector_in_limits(limits, rng))
                .collect(),
        }
    }
}

/// A particle with a position, velocity, and best known position
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct SwarmParticle {
    /// The position of the particle (in unbounded space when using
    /// [`SwarmBoundaryMethod::Transform`])
    pub position: Point<DVector<Float>>,
    /// The velocity of the particle
    pub velocity: DVector<Float>,
    /// The best position of the particle (as measured by the minimum value of `fx`)
    pub best: Point<DVector<Float>>,
}
impl SwarmParticle {
    /// Create a new, unevaluated particle with the given position and velocity.
    pub fn new(position: DVector<Float>, velocity: DVector<Float>) -> Self {
        let position: Point<DVector<Float>> = position.into();
        Self {
            best: position.clone(),
            position,
            velocity,
        }
    }
    /// Compare the best position to another particle
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.best.total_cmp(&other.best)
    }
    /// Replace the personal best with the current position if it is better.
    pub fn update_best(&mut self) {
        if self.position.total_cmp(&self.best) == Ordering::Less {
            self.best = self.position.clone();
        }
    }
    /// Update the particle's velocity:
    ///
    /// ```math
    /// v \leftarrow \omega v + c_1 r_1 \odot (p - x) + c_2 r_2 \odot (n - x)
    /// ```
    /// where $`p`$ is the personal best, $`n`$ is the neighbourhood best, and
    /// $`r_1, r_2 \sim U[0, 1)^d`$. If a velocity clamp is given, each component is clamped into
    /// it.
    pub fn update_velocity(
        &mut self,
        nbest: &DVector<Float>,
        omega: Float,
        c1: Float,
        c2: Float,
        velocity_clamp: Option<(Float, Float)>,
        rng: &mut Rng,
    ) {
        let dim = self.position.x.len();
        let rv1 = generate_random_vector(dim, 0.0, 1.0, rng);
        let rv2 = generate_random_vector(dim, 0.0, 1.0, rng);
        let mut velocity = self.velocity.scale(omega)
            + rv1
                .component_mul(&(&self.best.x - &self.position.x))
                .scale(c1)
            + rv2.component_mul(&(nbest - &self.position.x)).scale(c2);
        if let Some((lower, upper)) = velocity_clamp {
            velocity.apply(|v| *v = v.clamp(lower, upper));
        }
        self.velocity = velocity;
    }
    /// Move the particle along its velocity and apply the boundary method. This resets the
    /// particle's evaluation.
    pub fn update_position(
        &mut self,
        bounds: Option<&Bounds>,
        boundary_method: SwarmBoundaryMethod,
    ) {
        let new_position = &self.position.x + &self.velocity;
        let new_position = match (bounds, boundary_method) {
            (Some(bounds), SwarmBoundaryMethod::Periodic) => new_position.wrap_into(bounds),
            (Some(bounds), SwarmBoundaryMethod::Nearest) => new_position.clamp_into(bounds),
            _ => new_position,
        };
        self.position.set_position(new_position);
    }
    /// Evaluate the particle at its current position with a single-point call.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    pub fn evaluate<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E, Input = DVector<Float>>,
        args: &U,
        bounds: Option<&Bounds>,
        boundary_method: SwarmBoundaryMethod,
    ) -> Result<(), E> {
        if matches!(boundary_method, SwarmBoundaryMethod::Transform) {
            self.position.evaluate_bounded(func, bounds, args)?;
        } else {
            self.position.evaluate(func, args)?;
            self.position.fx = self
                .position
                .fx
                .map(|fx| penalize(&self.position.x, fx, bounds, boundary_method));
        }
        Ok(())
    }
    /// Convert the particle's coordinates from the unbounded space to the bounded space using a
    /// nonlinear transformation.
    pub fn to_bounded(&self, bounds: Option<&Bounds>) -> Self {
        Self {
            position: self.position.constrain_to(bounds),
            velocity: self.velocity.clone(),
            best: self.best.constrain_to(bounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::Bound, test_functions::GoldsteinPrice};
    use nalgebra::dvector;

    fn square() -> Bounds {
        vec![Bound::from((-2.0, 2.0)), Bound::from((-2.0, 2.0))].into()
    }

    fn line_swarm(topology: SwarmTopology) -> Swarm {
        let mut swarm = Swarm::default().with_n_particles(5).with_topology(topology);
        swarm.particles = (0..5)
            .map(|i| SwarmParticle::new(dvector![i as Float, 0.0], dvector![0.0, 0.0]))
            .collect();
        swarm
    }

    #[test]
    fn test_delannoy_numbers() {
        assert_eq!(delannoy(2, 1), 5);
        assert_eq!(delannoy(2, 2), 13);
        assert_eq!(delannoy(3, 1), 7);
        assert_eq!(delannoy(0, 4), 1);
        assert_eq!(delannoy(5, 0), 1);
    }

    #[test]
    fn test_neighbourhood_sizes() {
        assert_eq!(SwarmTopology::Global.neighbourhood_size(2), None);
        let ring = SwarmTopology::Ring {
            k: 3,
            p: Norm::L2,
            fixed: false,
        };
        assert_eq!(ring.neighbourhood_size(2), Some(3));
        let von_neumann = SwarmTopology::VonNeumann {
            r: 1,
            p: Norm::L2,
            fixed: false,
        };
        assert_eq!(von_neumann.neighbourhood_size(2), Some(5));
    }

    #[test]
    fn test_ring_neighbourhoods_are_nearest_particles() {
        let mut swarm = line_swarm(SwarmTopology::Ring {
            k: 3,
            p: Norm::L1,
            fixed: false,
        });
        swarm.compute_neighbourhoods(2);
        assert_eq!(swarm.neighbourhoods.len(), 5);
        for (i, neighbourhood) in swarm.neighbourhoods.iter().enumerate() {
            assert_eq!(neighbourhood.len(), 3);
            assert_eq!(neighbourhood[0], i);
        }
        let mut middle = swarm.neighbourhoods[2].clone();
        middle.sort_unstable();
        assert_eq!(middle, vec![1, 2, 3]);
        let mut end = swarm.neighbourhoods[4].clone();
        end.sort_unstable();
        assert_eq!(end, vec![2, 3, 4]);
    }

    #[test]
    fn test_neighbourhood_is_capped_at_swarm_size() {
        let mut swarm = line_swarm(SwarmTopology::VonNeumann {
            r: 2,
            p: Norm::L2,
            fixed: true,
        });
        swarm.compute_neighbourhoods(2);
        assert!(swarm.neighbourhoods.iter().all(|n| n.len() == 5));
    }

    #[test]
    fn test_neighbourhood_bests() {
        let mut swarm = line_swarm(SwarmTopology::Ring {
            k: 2,
            p: Norm::L2,
            fixed: false,
        });
        for (i, particle) in swarm.particles.iter_mut().enumerate() {
            particle.best.fx = Some(i as Float);
        }
        swarm.compute_neighbourhoods(2);
        let gbest = swarm.best().cloned().unwrap();
        assert_eq!(gbest.fx, Some(0.0));
        let nbests = swarm.neighbourhood_bests(&gbest);
        // particle 3 only sees particles 2 and 3 or 3 and 4
        assert!(nbests[3][0] >= 2.0);
        assert_eq!(nbests[0], dvector![0.0, 0.0]);
        swarm.topology = SwarmTopology::Global;
        assert!(swarm
            .neighbourhood_bests(&gbest)
            .iter()
            .all(|x| *x == gbest.x));
    }

    #[test]
    fn test_transformed_neighbourhoods_use_bounded_distances() {
        let mut swarm = Swarm::default().with_topology(SwarmTopology::Ring {
            k: 2,
            p: Norm::L2,
            fixed: false,
        });
        swarm.boundary_method = SwarmBoundaryMethod::Transform;
        swarm.bounds = Some(square());
        // internally 0 and pi are far apart but both map to the bounded origin
        swarm.particles = [0.0, crate::PI, 0.5]
            .iter()
            .map(|&x| SwarmParticle::new(dvector![x, 0.0], dvector![0.0, 0.0]))
            .collect();
        swarm.compute_neighbourhoods(2);
        assert_eq!(swarm.neighbourhoods[0], vec![0, 1]);
        assert_eq!(swarm.neighbourhoods[1], vec![1, 0]);
        assert_eq!(swarm.neighbourhoods[2][0], 2);
    }

    #[test]
    fn test_neighbourhood_best_follows_personal_bests() {
        let mut swarm = line_swarm(SwarmTopology::Ring {
            k: 2,
            p: Norm::L2,
            fixed: false,
        });
        for particle in &mut swarm.particles {
            particle.best.fx = Some(10.0);
        }
        swarm.compute_neighbourhoods(2);
        let gbest = swarm.particles[0].best.clone();
        assert_eq!(swarm.neighbourhood_best(1, &gbest), dvector![1.0, 0.0]);
        swarm.particles[1].best = Point {
            x: dvector![1.5, 0.0],
            fx: Some(1.0),
        };
        assert_eq!(swarm.neighbourhood_best(1, &gbest), dvector![1.5, 0.0]);
        swarm.neighbourhoods.clear();
        assert_eq!(swarm.neighbourhood_best(1, &gbest), gbest.x);
    }

    #[test]
    fn test_uniform_positions_use_finite_bounds() {
        let mut rng = Rng::with_seed(0);
        let bounds = square();
        let inside =
            SwarmPositionInitializer::Uniform.init_positions(&mut rng, 2, 50, Some(&bounds));
        assert!(inside.iter().all(|x| x.is_in(&bounds)));
        let unit = SwarmPositionInitializer::Uniform.init_positions(&mut rng, 2, 50, None);
        assert!(unit
            .iter()
            .all(|x| x.iter().all(|v| (0.0..1.0).contains(v))));
    }

    #[test]
    fn test_latin_hypercube_fills_every_bin() {
        let mut rng = Rng::with_seed(0);
        let positions = SwarmPositionInitializer::LatinHypercube(vec![(0.0, 10.0), (0.0, 10.0)])
            .init_positions(&mut rng, 2, 10, None);
        for d in 0..2 {
            let mut bins: Vec<usize> = positions.iter().map(|x| x[d] as usize).collect();
            bins.sort_unstable();
            assert_eq!(bins, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_uniform_velocities_respect_clamp() {
        let mut rng = Rng::with_seed(0);
        let velocities =
            SwarmVelocityInitializer::Uniform.init_velocities(&mut rng, 2, 20, Some((-0.5, 0.5)));
        assert!(velocities
            .iter()
            .all(|v| v.iter().all(|c| (-0.5..0.5).contains(c))));
    }

    #[test]
    fn test_update_position_applies_boundary_method() {
        let bounds = square();
        let mut particle = SwarmParticle::new(dvector![1.5, -1.5], dvector![1.0, -1.0]);
        particle.update_position(Some(&bounds), SwarmBoundaryMethod::Periodic);
        assert!((particle.position.x[0] - -1.5).abs() < 1e-12);
        assert!((particle.position.x[1] - 1.5).abs() < 1e-12);
        assert!(particle.position.fx.is_none());

        let mut particle = SwarmParticle::new(dvector![1.5, -1.5], dvector![1.0, -1.0]);
        particle.update_position(Some(&bounds), SwarmBoundaryMethod::Nearest);
        assert_eq!(particle.position.x, dvector![2.0, -2.0]);

        let mut particle = SwarmParticle::new(dvector![1.5, -1.5], dvector![1.0, -1.0]);
        particle.update_position(None, SwarmBoundaryMethod::Periodic);
        assert_eq!(particle.position.x, dvector![2.5, -2.5]);
    }

    #[test]
    fn test_velocity_update_and_clamp() {
        let mut rng = Rng::with_seed(0);
        let mut particle = SwarmParticle::new(dvector![0.0, 0.0], dvector![1.0, 1.0]);
        // with no attraction the velocity only decays
        particle.update_velocity(&dvector![0.0, 0.0], 0.5, 0.3, 0.3, None, &mut rng);
        assert_eq!(particle.velocity, dvector![0.5, 0.5]);
        particle.update_velocity(
            &dvector![100.0, -100.0],
            1.0,
            0.0,
            1.0,
            Some((-1.0, 1.0)),
            &mut rng,
        );
        assert!(particle.velocity.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_inf_boundary_penalizes_outside_points() {
        let bounds = square();
        let mut swarm = Swarm::default()
            .with_n_particles(2)
            .with_boundary_method(SwarmBoundaryMethod::Inf);
        swarm.bounds = Some(bounds);
        swarm.particles = vec![
            SwarmParticle::new(dvector![0.0, -1.0], dvector![0.0, 0.0]),
            SwarmParticle::new(dvector![3.0, 0.0], dvector![0.0, 0.0]),
        ];
        swarm.evaluate(&GoldsteinPrice, &()).unwrap();
        assert_eq!(swarm.particles[0].position.fx, Some(3.0));
        assert_eq!(swarm.particles[1].position.fx, Some(Float::INFINITY));
    }

    #[test]
    fn test_single_point_evaluation_matches_batch() {
        let mut particle = SwarmParticle::new(dvector![0.0, 0.0], dvector![0.0, 0.0]);
        particle
            .evaluate(&GoldsteinPrice, &(), None, SwarmBoundaryMethod::Periodic)
            .unwrap();
        assert_eq!(particle.position.fx, Some(600.0));
        particle.update_best();
        assert_eq!(particle.best.fx, Some(600.0));
    }

    #[test]
    #[should_panic(expected = "a swarm needs at least one particle")]
    fn test_empty_swarm_panics() {
        let _ = Swarm::default().with_n_particles(0);
    }
}

use std::{fmt::Display, fs::File, io::BufWriter, path::Path, sync::Arc};

use fastrand::Rng;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::particles::{Norm, PSOConfig, SwarmStatus, SwarmTopology, PSO},
    core::{Callbacks, MaxSteps, MinimizationSummary, NopAbortSignal},
    traits::{Algorithm, BatchCostFunction, Bounded, Observer, Terminator},
    Error, Float,
};

/// The square most experiments are bounded to.
pub const DEFAULT_BOUNDS: [(Float, Float); 2] = [(-2.0, 2.0), (-2.0, 2.0)];

/// The values each coefficient takes in a [`hyperparameter_sweep`].
pub const SWEEP_VALUES: [Float; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// The PSO variant used by an experiment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopologyKind {
    /// Every particle follows the best position of the whole swarm.
    #[default]
    Global,
    /// Every particle follows the best of its `k` nearest neighbours (local-best PSO).
    Ring {
        /// The neighbourhood size
        k: usize,
        /// The distance norm
        p: Norm,
    },
    /// A ring whose neighbourhood size is the Delannoy number of range `r`.
    VonNeumann {
        /// The neighbourhood range
        r: usize,
        /// The distance norm
        p: Norm,
    },
}

impl TopologyKind {
    /// The local-best ring used throughout the experiments (`k = 3`, `p = 2`).
    pub const RING: Self = Self::Ring { k: 3, p: Norm::L2 };
    /// The von Neumann topology used throughout the experiments (`r = 1`, `p = 2`).
    pub const VON_NEUMANN: Self = Self::VonNeumann { r: 1, p: Norm::L2 };

    /// The swarm topology with neighbourhoods recomputed at every step.
    pub const fn to_swarm_topology(self) -> SwarmTopology {
        match self {
            Self::Global => SwarmTopology::Global,
            Self::Ring { k, p } => SwarmTopology::Ring { k, p, fixed: false },
            Self::VonNeumann { r, p } => SwarmTopology::VonNeumann { r, p, fixed: false },
        }
    }

    /// The conventional name of the optimizer variant.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Global => "GlobalBestPSO",
            Self::Ring { .. } => "LocalBestPSO",
            Self::VonNeumann { .. } => "VonNeumann",
        }
    }
}

/// The coefficient varied by a [`hyperparameter_sweep`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hyperparameter {
    /// The cognitive coefficient $`c_1`$
    C1,
    /// The social coefficient $`c_2`$
    C2,
    /// The inertia weight $`\omega`$
    Omega,
}

impl Hyperparameter {
    /// The short name used as a chart legend title.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::C1 => "c1",
            Self::C2 => "c2",
            Self::Omega => "w",
        }
    }
}

/// The settings of a single optimizer run.
///
/// Every run works on a two-dimensional problem and stops after exactly
/// [`ExperimentConfig::n_iterations`] steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Label of the run in charts and reports (defaults to the topology name)
    pub label: Option<String>,
    /// Number of particles in the swarm
    pub n_particles: usize,
    /// Number of optimizer steps
    pub n_iterations: usize,
    /// Inertia weight
    pub omega: Float,
    /// Cognitive coefficient
    pub c1: Float,
    /// Social coefficient
    pub c2: Float,
    /// The PSO variant
    pub topology: TopologyKind,
    /// Optional `(lower, upper)` search limits for each coordinate
    pub bounds: Option<[(Float, Float); 2]>,
    /// Seed for the random number generator (`None` draws a fresh seed)
    pub seed: Option<u64>,
    /// Keep every particle position at every step
    pub record_positions: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            label: None,
            n_particles: 100,
            n_iterations: 100,
            omega: 0.9,
            c1: 0.5,
            c2: 0.3,
            topology: TopologyKind::Global,
            bounds: None,
            seed: None,
            record_positions: false,
        }
    }
}

impl ExperimentConfig {
    /// Set the label of the run.
    pub fn with_label<S: AsRef<str>>(mut self, label: S) -> Self {
        self.label = Some(label.as_ref().to_string());
        self
    }
    /// Set the number of particles (default = `100`).
    ///
    /// # Panics
    ///
    /// This method will panic if `value` is zero.
    pub fn with_n_particles(mut self, value: usize) -> Self {
        assert!(value > 0, "a swarm needs at least one particle");
        self.n_particles = value;
        self
    }
    /// Set the number of optimizer steps (default = `100`).
    ///
    /// # Panics
    ///
    /// This method will panic if `value` is zero.
    pub fn with_n_iterations(mut self, value: usize) -> Self {
        assert!(value > 0, "a run needs at least one iteration");
        self.n_iterations = value;
        self
    }
    /// Set the inertia weight (default = `0.9`).
    pub const fn with_omega(mut self, value: Float) -> Self {
        self.omega = value;
        self
    }
    /// Set the cognitive coefficient (default = `0.5`).
    pub const fn with_c1(mut self, value: Float) -> Self {
        self.c1 = value;
        self
    }
    /// Set the social coefficient (default = `0.3`).
    pub const fn with_c2(mut self, value: Float) -> Self {
        self.c2 = value;
        self
    }
    /// Set a single coefficient by name.
    pub const fn with_hyperparameter(self, hyperparameter: Hyperparameter, value: Float) -> Self {
        match hyperparameter {
            Hyperparameter::C1 => self.with_c1(value),
            Hyperparameter::C2 => self.with_c2(value),
            Hyperparameter::Omega => self.with_omega(value),
        }
    }
    /// Set the PSO variant (default = [`TopologyKind::Global`]).
    pub const fn with_topology(mut self, topology: TopologyKind) -> Self {
        self.topology = topology;
        self
    }
    /// Restrict the search to the given `(lower, upper)` limits for each coordinate.
    ///
    /// # Panics
    ///
    /// This method will panic if a lower limit is not below its upper limit.
    pub fn with_bounds(mut self, bounds: [(Float, Float); 2]) -> Self {
        assert!(
            bounds.iter().all(|(lower, upper)| lower < upper),
            "lower limits must be below upper limits"
        );
        self.bounds = Some(bounds);
        self
    }
    /// Remove any search limits.
    pub const fn without_bounds(mut self) -> Self {
        self.bounds = None;
        self
    }
    /// Seed the random number generator.
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    /// Keep (or drop) the particle positions of every step.
    pub const fn with_record_positions(mut self, value: bool) -> Self {
        self.record_positions = value;
        self
    }
    /// Check that a run can be built from this configuration.
    ///
    /// The builder methods already reject most invalid values, but the fields are public and the
    /// struct can be deserialized, so [`run_experiment`] checks again before running.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |message: String| Err(Error::InvalidConfig(message));
        if self.n_particles == 0 {
            return invalid("a swarm needs at least one particle".to_string());
        }
        if self.n_iterations == 0 {
            return invalid("a run needs at least one iteration".to_string());
        }
        for (name, value) in [("omega", self.omega), ("c1", self.c1), ("c2", self.c2)] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("{name} must be non-negative (got {value})"));
            }
        }
        if let TopologyKind::Ring { k: 0, .. } = self.topology {
            return invalid("a ring neighbourhood needs at least one member".to_string());
        }
        if let Some(bounds) = self.bounds {
            if let Some((lower, upper)) = bounds
                .iter()
                .find(|(lower, upper)| !(lower.is_finite() && upper.is_finite() && lower < upper))
            {
                return invalid(format!("invalid limits ({lower}, {upper})"));
            }
        }
        Ok(())
    }
    /// The label of the run, falling back to the topology name.
    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.topology.name().to_string())
    }
    /// Build the optimizer configuration described by this experiment.
    pub fn pso_config(&self) -> PSOConfig {
        let topology = self.topology.to_swarm_topology();
        let n_particles = self.n_particles;
        let config = PSOConfig::default()
            .with_omega(self.omega)
            .with_c1(self.c1)
            .with_c2(self.c2)
            .setup_swarm(|swarm| {
                swarm
                    .with_n_particles(n_particles)
                    .with_topology(topology)
            });
        match self.bounds {
            Some(bounds) => config.with_bounds(bounds),
            None => config,
        }
    }
}

/// The per-step record of a run.
///
/// As an [`Observer`] it appends the best cost found so far after every step and, if asked to,
/// the positions of all particles.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunHistory {
    /// Best cost found so far, one entry per step
    pub costs: Vec<Float>,
    /// Particle positions, one entry per step (empty unless positions were recorded)
    pub positions: Vec<Vec<[Float; 2]>>,
    #[serde(skip)]
    record_positions: bool,
}

impl RunHistory {
    /// Create an empty history, optionally recording particle positions.
    pub const fn new(record_positions: bool) -> Self {
        Self {
            costs: Vec::new(),
            positions: Vec::new(),
            record_positions,
        }
    }
    /// Returns `true` if particle positions were recorded.
    pub fn has_positions(&self) -> bool {
        !self.positions.is_empty()
    }
    /// Write the history to a Python pickle file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be created and [`Error::Pickle`] if serialization
    /// fails.
    pub fn to_pickle<T: AsRef<Path>>(&self, path: T) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_pickle::to_writer(&mut writer, self, Default::default())?;
        Ok(())
    }
}

impl<P, U, E> Observer<PSO, P, SwarmStatus, U, E, PSOConfig> for RunHistory
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
        self.costs
            .push(status.get_best().fx.unwrap_or(Float::INFINITY));
        if self.record_positions {
            let positions = status.swarm.positions();
            self.positions.push(
                positions
                    .row_iter()
                    .map(|row| [row[0], row[1]])
                    .collect(),
            );
        }
    }
}

/// The outcome of one experiment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRecord {
    /// The run's label
    pub label: String,
    /// Best position, best cost and bookkeeping of the run
    pub summary: MinimizationSummary,
    /// Cost (and possibly position) history of the run
    pub history: RunHistory,
}

impl Display for RunRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.label)?;
        writeln!(f, "Best position: {:?}", self.summary.x)?;
        write!(f, "Function value at this point: {}", self.summary.fx)
    }
}

/// Run the particle swarm optimizer on a two-dimensional `problem` with the given settings.
///
/// The run lasts exactly `config.n_iterations` steps, so the returned cost history always has
/// that many entries. The first entry describes the freshly initialized swarm and every step
/// evaluates the swarm once, so the summary reports `n_particles * n_iterations` evaluations.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `config` fails [`ExperimentConfig::validate`], and any
/// error raised by the problem, such as [`Error::Shape`].
pub fn run_experiment<P, E>(config: &ExperimentConfig, problem: &P) -> Result<RunRecord, Error>
where
    P: BatchCostFunction<(), E>,
    Error: From<E>,
{
    run_experiment_with_abort(config, problem, NopAbortSignal::new())
}

/// Like [`run_experiment`], but the run also stops early once `signal` is raised, for instance
/// by a [`CtrlCAbortSignal`](crate::core::CtrlCAbortSignal). The history of an aborted run
/// ends at the step where the signal was noticed.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `config` fails [`ExperimentConfig::validate`], and any
/// error raised by the problem, such as [`Error::Shape`].
pub fn run_experiment_with_abort<P, E, T>(
    config: &ExperimentConfig,
    problem: &P,
    signal: T,
) -> Result<RunRecord, Error>
where
    P: BatchCostFunction<(), E>,
    Error: From<E>,
    T: Terminator<PSO, P, SwarmStatus, (), E, PSOConfig> + 'static,
{
    config.validate()?;
    let label = config.label();
    let history = Arc::new(RwLock::new(RunHistory::new(config.record_positions)));
    let rng = config.seed.map_or_else(Rng::new, Rng::with_seed);
    trace_info!(
        label = %label,
        n_particles = config.n_particles,
        n_iterations = config.n_iterations,
        omega = config.omega,
        c1 = config.c1,
        c2 = config.c2,
        "starting run"
    );
    let summary = PSO::new(2, rng)
        .process(
            problem,
            &(),
            config.pso_config(),
            Callbacks::empty()
                .with_observer(history.clone())
                .with_terminator(MaxSteps(config.n_iterations))
                .with_terminator(signal),
        )?
        .with_parameter_names(["x", "y"]);
    trace_info!(label = %label, best = summary.fx, "finished run");
    let history = std::mem::take(&mut *history.write());
    Ok(RunRecord {
        label,
        summary,
        history,
    })
}

/// Run every configuration in turn.
///
/// # Errors
///
/// Returns the first invalid configuration or error raised by the problem.
pub fn run_all<P, E>(configs: &[ExperimentConfig], problem: &P) -> Result<Vec<RunRecord>, Error>
where
    P: BatchCostFunction<(), E>,
    Error: From<E>,
{
    configs
        .iter()
        .map(|config| run_experiment(config, problem))
        .collect()
}

/// Print the best position and cost of a run.
pub fn report(record: &RunRecord) {
    println!("{}", record);
}

/// The same 100-particle, 20-iteration run without and with the [`DEFAULT_BOUNDS`].
pub fn bounds_comparison(topology: TopologyKind) -> [ExperimentConfig; 2] {
    let base = ExperimentConfig::default()
        .with_topology(topology)
        .with_n_particles(100)
        .with_n_iterations(20)
        .with_c1(0.5)
        .with_c2(0.3)
        .with_omega(0.9);
    [
        base.clone().with_label("Without bounds"),
        base.with_bounds(DEFAULT_BOUNDS).with_label("With bounds"),
    ]
}

/// A 100-particle, 100-iteration run which records particle positions for a contour animation.
pub fn contour_run(topology: TopologyKind, bounded: bool) -> ExperimentConfig {
    let config = ExperimentConfig::default()
        .with_topology(topology)
        .with_n_particles(100)
        .with_n_iterations(100)
        .with_record_positions(true);
    if bounded {
        config.with_bounds(DEFAULT_BOUNDS)
    } else {
        config
    }
}

/// Local-best runs (`k = 3`, `p = 2`) that vary one coefficient over [`SWEEP_VALUES`] while the
/// other two are held at `0.5`. Each run is labelled with its value.
pub fn hyperparameter_sweep(hyperparameter: Hyperparameter) -> Vec<ExperimentConfig> {
    let base = ExperimentConfig::default()
        .with_topology(TopologyKind::RING)
        .with_n_particles(100)
        .with_n_iterations(20)
        .with_c1(0.5)
        .with_c2(0.5)
        .with_omega(0.5);
    SWEEP_VALUES
        .iter()
        .map(|&value| {
            base.clone()
                .with_hyperparameter(hyperparameter, value)
                .with_label(value.to_string())
        })
        .collect()
}

/// Small (10 particles, 25 iterations) runs of the global-best, von Neumann and local-best
/// variants with identical coefficients.
pub fn topology_comparison() -> Vec<ExperimentConfig> {
    [
        TopologyKind::Global,
        TopologyKind::VON_NEUMANN,
        TopologyKind::RING,
    ]
    .into_iter()
    .map(|topology| {
        ExperimentConfig::default()
            .with_topology(topology)
            .with_n_particles(10)
            .with_n_iterations(25)
            .with_c1(0.5)
            .with_c2(0.3)
            .with_omega(0.9)
    })
    .collect()
}

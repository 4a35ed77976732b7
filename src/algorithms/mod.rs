/// Particle swarm optimizers.
pub mod particles;

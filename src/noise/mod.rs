//! Random stimulation of neuron potentials and synapse strengths.

use rand::Rng;
use rand_distr::{Normal, Distribution};
use crate::{
    error::{AvalancheError, DistributionError, NetworkError, NeuronError},
    neuron::{Population, ReadySink},
};


/// How a single stimulation is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseMode {
    /// Uniform on `[0, range)`
    Up { range: f64 },
    /// Normally distributed with the parameters of the [`NeuronNoise`]
    Down,
}

/// Stimulates exactly one uniformly chosen neuron per call, used to drive the
/// network between avalanches
#[derive(Debug, Clone)]
pub struct NeuronNoise {
    mean: f64,
    std_dev: f64,
    down_dist: Normal<f64>,
}

impl NeuronNoise {
    /// Creates noise whose down state stimulation has the given mean and standard deviation
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, DistributionError> {
        let down_dist = Normal::new(mean, std_dev)
            .map_err(|_| DistributionError::InvalidNormal { mean, std_dev })?;

        Ok(NeuronNoise { mean, std_dev, down_dist })
    }

    pub fn get_mean(&self) -> f64 {
        self.mean
    }

    pub fn get_std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Picks a neuron uniformly and increases its potential by a value drawn
    /// according to `mode`, returns the change actually applied
    pub fn stimulate<R: Rng, S: ReadySink>(
        &self,
        mode: NoiseMode,
        population: &mut Population,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<f64, AvalancheError> {
        if population.is_empty() {
            return Err(NetworkError::EmptyPopulation.into());
        }

        let n = rng.gen_range(0..population.len());
        let delta = match mode {
            NoiseMode::Up { range } => {
                if !(range > 0. && range.is_finite()) {
                    return Err(DistributionError::InvalidNoiseRange(range).into());
                }

                rng.gen_range(0.0..range)
            },
            NoiseMode::Down => self.down_dist.sample(rng),
        };

        Ok(population.neurons_mut()[n].increase_potential(delta, sink)?)
    }
}

/// Randomly strengthens or weakens the synapse between one pair of neurons per call,
/// creating it when missing and pruning it when it is no longer positive
#[derive(Debug, Clone)]
pub struct WeightNoise {
    mean: f64,
    std_dev: f64,
    dist: Normal<f64>,
    /// Whether a neuron may be paired with itself
    pub allow_self_loops: bool,
}

impl WeightNoise {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, DistributionError> {
        let dist = Normal::new(mean, std_dev)
            .map_err(|_| DistributionError::InvalidNormal { mean, std_dev })?;

        Ok(WeightNoise { mean, std_dev, dist, allow_self_loops: false })
    }

    pub fn get_mean(&self) -> f64 {
        self.mean
    }

    pub fn get_std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Applies one perturbation, returns the strength change drawn (`0.` if the
    /// population cannot form a valid pair)
    pub fn apply<R: Rng>(&self, population: &mut Population, rng: &mut R) -> Result<f64, NeuronError> {
        let size = population.len();
        if size == 0 || (size == 1 && !self.allow_self_loops) {
            return Ok(0.);
        }

        let presynaptic = rng.gen_range(0..size);
        let postsynaptic = loop {
            let postsynaptic = rng.gen_range(0..size);
            if self.allow_self_loops || postsynaptic != presynaptic {
                break postsynaptic;
            }
        };
        let delta = self.dist.sample(rng);

        let presynaptic = population.neurons()[presynaptic].get_id();
        let postsynaptic = population.neurons()[postsynaptic].get_id();
        population.strengthen_connection(presynaptic, postsynaptic, delta)?;

        Ok(delta)
    }
}

//! Random construction of a neuron population and its initial synapses.

use rand::{Rng, distributions::{Bernoulli, Distribution, Uniform}};
use log::info;
use crate::{
    distribution::DegreeSampler,
    error::{AvalancheError, DistributionError, NetworkError},
    neuron::{Neuron, NeuronId, Population, PotentiationType},
};


/// Hands out neuron ids in increasing order, an id is never handed out twice
/// by the same generator
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Generator whose first id is `first`
    pub fn starting_at(first: u64) -> Self {
        IdGenerator { next: first }
    }

    pub fn next_id(&mut self) -> NeuronId {
        let id = NeuronId(self.next);
        self.next += 1;

        id
    }
}

/// Builds a population where each neuron draws its role (output, inhibitory or
/// excitatory), an out degree from a [`DegreeSampler`], and for each outgoing
/// synapse a uniformly chosen target and a uniform initial strength
/// 
/// Repeated targets strengthen the existing synapse instead of adding a second one.
/// 
/// ```rust
/// # use rand::SeedableRng;
/// # use rand_chacha::ChaCha8Rng;
/// # use neural_avalanches::{
/// #     connectome::{ConnectomeBuilder, IdGenerator},
/// #     distribution::DegreeSampler,
/// #     error::AvalancheError,
/// # };
/// #
/// # fn main() -> Result<(), AvalancheError> {
/// let builder = ConnectomeBuilder {
///     inhibitory_fraction: 0.2,
///     ..ConnectomeBuilder::new(100, DegreeSampler::power_law(1, 100, 2.)?)
/// };
/// 
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let population = builder.build(&mut IdGenerator::default(), &mut rng)?;
/// 
/// assert_eq!(population.len(), 100);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConnectomeBuilder {
    /// Number of neurons
    pub size: usize,
    /// Firing threshold of every neuron
    pub fire_threshold: f64,
    /// Down state disfacilitation of every neuron
    pub disfacilitation: f64,
    /// Starting potential of every neuron
    pub initial_potential: f64,
    /// Chance of a neuron being inhibitory
    pub inhibitory_fraction: f64,
    /// Chance of a neuron being an output neuron, takes precedence over inhibitory
    pub output_fraction: f64,
    /// Lower bound of initial synapse strength
    pub min_strength: f64,
    /// Upper bound (exclusive) of initial synapse strength
    pub max_strength: f64,
    /// Whether a neuron may synapse onto itself, otherwise targets are redrawn
    pub allow_self_loops: bool,
    /// Out degree distribution
    pub degree: DegreeSampler,
}

impl ConnectomeBuilder {
    /// Builder with unit threshold, no disfacilitation, only excitatory neurons
    /// and initial strengths in `[0, 1)`
    pub fn new(size: usize, degree: DegreeSampler) -> Self {
        ConnectomeBuilder {
            size,
            fire_threshold: 1.,
            disfacilitation: 0.,
            initial_potential: 0.,
            inhibitory_fraction: 0.,
            output_fraction: 0.,
            min_strength: 0.,
            max_strength: 1.,
            allow_self_loops: false,
            degree,
        }
    }

    fn check_parameters(&self) -> Result<(), AvalancheError> {
        if self.size == 0 {
            return Err(NetworkError::EmptyPopulation.into());
        }
        if !(self.fire_threshold > 0.) {
            return Err(NetworkError::NonPositiveThreshold(self.fire_threshold).into());
        }
        if !(self.min_strength >= 0. && self.min_strength < self.max_strength && self.max_strength.is_finite()) {
            return Err(
                DistributionError::InvalidStrengthRange { min: self.min_strength, max: self.max_strength }.into()
            );
        }

        Ok(())
    }

    /// Creates the neurons, taking their ids from `ids`, and wires their initial synapses
    pub fn build<R: Rng>(&self, ids: &mut IdGenerator, rng: &mut R) -> Result<Population, AvalancheError> {
        self.check_parameters()?;

        let output = Bernoulli::new(self.output_fraction)
            .map_err(|_| DistributionError::InvalidProbability(self.output_fraction))?;
        let inhibit = Bernoulli::new(self.inhibitory_fraction)
            .map_err(|_| DistributionError::InvalidProbability(self.inhibitory_fraction))?;
        let strength_dist = Uniform::new(self.min_strength, self.max_strength);
        let target_dist = Uniform::new(0, self.size);

        let mut neurons: Vec<Neuron> = (0..self.size)
            .map(|_| {
                let is_output = output.sample(rng);
                let character = if inhibit.sample(rng) {
                    PotentiationType::Inhibitory
                } else {
                    PotentiationType::Excitatory
                };

                Neuron::new(
                    ids.next_id(),
                    character,
                    is_output,
                    self.initial_potential,
                    self.fire_threshold,
                    self.disfacilitation,
                )
            })
            .collect();

        let neuron_ids: Vec<NeuronId> = neurons.iter().map(|neuron| neuron.get_id()).collect();
        let can_wire = self.allow_self_loops || self.size > 1;

        for (n, neuron) in neurons.iter_mut().enumerate() {
            let out_degree = self.degree.sample(rng);
            if !can_wire {
                continue;
            }

            for _ in 0..out_degree {
                let target = loop {
                    let target = target_dist.sample(rng);
                    if self.allow_self_loops || target != n {
                        break target;
                    }
                };
                let strength = strength_dist.sample(rng);

                neuron.strengthen_connection(strength, neuron_ids[target]);
            }
        }

        let mut population = Population::new(neurons)?;
        population.refresh_in_degrees();

        let inhibitory = population.neurons().iter()
            .filter(|neuron| !neuron.is_output() && neuron.get_character() == PotentiationType::Inhibitory)
            .count();
        let outputs = population.neurons().iter().filter(|neuron| neuron.is_output()).count();
        info!(
            "built population of {} neurons ({} inhibitory, {} output) with {} synapses",
            population.len(), inhibitory, outputs, population.total_out_degree(),
        );

        Ok(population)
    }
}

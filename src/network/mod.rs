//! The avalanche simulation loop.
//! 
//! Each cycle the network is stimulated by noise until some neuron crosses its
//! threshold, the resulting avalanche is propagated until no neuron is ready to
//! fire, synapses are updated with Hebbian learning and homeostatic lowering,
//! statistics are reported and the network transitions to the up or down state.

use std::io::Write;
use rand::Rng;
use log::{debug, info, warn};
use crate::{
    connectome::{ConnectomeBuilder, IdGenerator},
    error::{AvalancheError, NetworkError},
    neuron::{NeuronId, Population, ReadySink, plasticity::HebbianLearning},
    noise::{NeuronNoise, NoiseMode, WeightNoise},
};
pub mod report;
use report::{AvalancheStatistics, format_eeg_row};


/// Run parameters of a [`Network`]
#[derive(Debug, Clone)]
pub struct NetworkParameters {
    /// Number of avalanche cycles to simulate
    pub avalanches: usize,
    /// Depolarization against which avalanches are compared for up/down transitions
    pub transition_threshold: f64,
    /// Number of cycles before reporting starts
    pub delay: usize,
    /// Hebbian learning rule applied after each avalanche
    pub learning: HebbianLearning,
    /// Whether the network may enter the up state, if `false` every transition is down
    pub up_states: bool,
    /// Whether to record the EEG signal of each avalanche
    pub psd: bool,
    /// Number of EEG samples after which the run stops, `None` for no limit
    pub max_psd: Option<usize>,
}

impl Default for NetworkParameters {
    fn default() -> Self {
        NetworkParameters {
            avalanches: 1000,
            transition_threshold: 1.,
            delay: 0,
            learning: HebbianLearning::default(),
            up_states: true,
            psd: false,
            max_psd: None,
        }
    }
}

/// Everything needed to construct a [`Network`]
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub parameters: NetworkParameters,
    pub builder: ConnectomeBuilder,
    pub noise: NeuronNoise,
    pub weight_noise: Option<WeightNoise>,
}

/// Records whether any neuron became ready to fire
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadyFlag {
    ready: bool,
}

impl ReadyFlag {
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn clear(&mut self) {
        self.ready = false;
    }
}

impl ReadySink for ReadyFlag {
    fn notify_ready(&mut self, _id: NeuronId) {
        self.ready = true;
    }
}

/// Stores the recorded EEG signal, one value per propagation round
#[derive(Debug, Clone, Default)]
pub struct EEGHistory {
    /// Signed charge transmitted in each recorded round
    pub history: Vec<f64>,
}

impl EEGHistory {
    pub fn update(&mut self, value: f64) {
        self.history.push(value);
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

/// Result of a single avalanche cycle
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub statistics: AvalancheStatistics,
    /// EEG samples recorded during this cycle
    pub eeg: Vec<f64>,
    /// Whether the EEG sample limit was hit, ending the run
    pub limit_reached: bool,
}

/// Totals of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles simulated
    pub cycles: usize,
    /// Cycles written to the report
    pub reported: usize,
    /// EEG samples recorded
    pub psd_samples: usize,
    /// Whether the run stopped at the EEG sample limit
    pub terminated_early: bool,
}

struct Propagation {
    duration: usize,
    depol_sum: f64,
    eeg: Vec<f64>,
    limit_reached: bool,
}

/// A population of neurons driven by noise into avalanches, every random draw
/// comes from the network's single random number generator so a run is
/// reproducible given its seed
/// 
/// ```rust
/// # use rand::SeedableRng;
/// # use rand_chacha::ChaCha8Rng;
/// # use neural_avalanches::{
/// #     connectome::ConnectomeBuilder,
/// #     distribution::DegreeSampler,
/// #     error::AvalancheError,
/// #     network::{Network, NetworkConfig, NetworkParameters},
/// #     noise::NeuronNoise,
/// # };
/// #
/// # fn main() -> Result<(), AvalancheError> {
/// let config = NetworkConfig {
///     parameters: NetworkParameters {
///         avalanches: 20,
///         transition_threshold: 10.,
///         ..NetworkParameters::default()
///     },
///     builder: ConnectomeBuilder {
///         output_fraction: 0.1,
///         ..ConnectomeBuilder::new(50, DegreeSampler::fixed(5))
///     },
///     noise: NeuronNoise::new(0.1, 0.1)?,
///     weight_noise: None,
/// };
/// 
/// let mut network = Network::new(config, ChaCha8Rng::seed_from_u64(7))?;
/// let mut report = Vec::new();
/// let summary = network.run(&mut report)?;
/// 
/// assert_eq!(summary.cycles, 20);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Network<R: Rng> {
    population: Population,
    parameters: NetworkParameters,
    noise: NeuronNoise,
    weight_noise: Option<WeightNoise>,
    rng: R,
    ready: ReadyFlag,
    is_up: bool,
    last_depol_sum: f64,
    cycle: usize,
    psd_samples: usize,
    eeg_history: EEGHistory,
}

impl<R: Rng> Network<R> {
    /// Builds the population described by the config and wraps it in a network
    pub fn new(config: NetworkConfig, mut rng: R) -> Result<Self, AvalancheError> {
        let population = config.builder.build(&mut IdGenerator::default(), &mut rng)?;

        Self::from_population(population, config.parameters, config.noise, config.weight_noise, rng)
    }

    /// Wraps an existing population, errors if it is empty, a neuron has a
    /// non-positive threshold, the parameters are invalid, or no avalanche
    /// could ever start and transmit charge
    pub fn from_population(
        population: Population,
        parameters: NetworkParameters,
        noise: NeuronNoise,
        weight_noise: Option<WeightNoise>,
        rng: R,
    ) -> Result<Self, AvalancheError> {
        if population.is_empty() {
            return Err(NetworkError::EmptyPopulation.into());
        }
        if let Some(neuron) = population.neurons().iter().find(|neuron| !(neuron.get_threshold() > 0.)) {
            return Err(NetworkError::NonPositiveThreshold(neuron.get_threshold()).into());
        }
        if !(parameters.transition_threshold > 0. && parameters.transition_threshold.is_finite()) {
            return Err(NetworkError::NonPositiveTransition(parameters.transition_threshold).into());
        }
        let learning_rate = parameters.learning.learning_rate;
        if !(learning_rate >= 0. && learning_rate.is_finite()) {
            return Err(NetworkError::InvalidLearningRate(learning_rate).into());
        }
        if population.neurons().iter().all(|neuron| neuron.is_output()) {
            return Err(NetworkError::NoFiringNeurons.into());
        }
        if !population.can_transmit() {
            return Err(NetworkError::NoSynapses.into());
        }

        Ok(Network {
            population,
            parameters,
            noise,
            weight_noise,
            rng,
            ready: ReadyFlag::default(),
            is_up: false,
            last_depol_sum: 0.,
            cycle: 0,
            psd_samples: 0,
            eeg_history: EEGHistory::default(),
        })
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    pub fn parameters(&self) -> &NetworkParameters {
        &self.parameters
    }

    /// Whether the network is currently in the up state
    pub fn is_up(&self) -> bool {
        self.is_up
    }

    /// Number of cycles simulated so far
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Every EEG sample recorded so far
    pub fn eeg_history(&self) -> &EEGHistory {
        &self.eeg_history
    }

    fn noise_mode(&self) -> NoiseMode {
        if self.is_up {
            NoiseMode::Up { range: self.parameters.transition_threshold / self.last_depol_sum }
        } else {
            NoiseMode::Down
        }
    }

    /// Applies noise until a neuron is ready to fire, returns the number of stimulations
    fn wait_for_threshold(&mut self) -> Result<usize, AvalancheError> {
        let mode = self.noise_mode();
        let mut wait_time = 0;

        while !self.ready.is_ready() {
            self.noise.stimulate(mode, &mut self.population, &mut self.rng, &mut self.ready)?;
            wait_time += 1;
        }

        Ok(wait_time)
    }

    /// Steps the whole population until no neuron is ready to fire
    fn propagate(&mut self, record: bool) -> Result<Propagation, AvalancheError> {
        let mut propagation = Propagation { duration: 0, depol_sum: 0., eeg: Vec::new(), limit_reached: false };

        while self.ready.is_ready() {
            self.ready.clear();
            self.population.reset();

            let mut eeg = 0.;
            for n in 0..self.population.len() {
                let depol = self.population.time_step_at(n, &mut self.ready)?;
                propagation.depol_sum += depol.abs();
                eeg += depol;
            }

            if record && propagation.depol_sum != 0. {
                propagation.eeg.push(eeg);
                self.eeg_history.update(eeg);
                self.psd_samples += 1;

                if self.parameters.max_psd.map_or(false, |max_psd| self.psd_samples >= max_psd) {
                    propagation.limit_reached = true;
                    self.ready.clear();
                    break;
                }
            }

            propagation.duration += 1;
        }

        Ok(propagation)
    }

    /// Moves every neuron to the up state if the avalanche stayed within the
    /// transition threshold (and up states are enabled), otherwise to the down
    /// state, returns whether the network is now up
    pub fn transition(&mut self, depol_sum: f64) -> bool {
        let transition_threshold = self.parameters.transition_threshold;
        self.is_up = self.parameters.up_states && depol_sum <= transition_threshold;

        for neuron in self.population.neurons_mut() {
            if self.is_up {
                let potential = neuron.get_threshold() * (1. - depol_sum / transition_threshold);
                neuron.go_up(potential);
            } else {
                neuron.go_down();
            }
        }

        self.is_up
    }

    /// Applies Hebbian learning then lowers every synapse uniformly by the total increase
    fn learn(&mut self) {
        let summary = self.parameters.learning.apply(&mut self.population);

        match HebbianLearning::homeostatic_delta(&summary) {
            Some(delta) => {
                for neuron in self.population.neurons_mut() {
                    neuron.strengthen_all_connections(delta);
                }
            },
            None => warn!("cycle {}: no synapses left, skipping homeostasis", self.cycle),
        }
    }

    fn collect_statistics(&mut self, wait_time: usize, duration: usize, depol_sum: f64) -> AvalancheStatistics {
        self.population.refresh_in_degrees();

        let mut bond_number = 0;
        let mut total_weight = 0.;
        let mut active_neurons = 0;

        for neuron in self.population.neurons() {
            total_weight += neuron.get_weight_sum();
            bond_number += neuron.get_out_degree();
            if neuron.was_active() {
                active_neurons += 1;
            }
        }

        let mean_degree_ratio = self.population.mean_degree_ratio().unwrap_or_else(|| {
            warn!("cycle {}: no connected neurons, degree ratio undefined", self.cycle);
            f64::NAN
        });

        let size = self.population.len() as f64;

        AvalancheStatistics {
            bond_density: bond_number as f64 / size / size,
            total_weight,
            wait_time,
            duration,
            depolarization: depol_sum,
            active_neurons,
            is_up: self.is_up,
            mean_degree_ratio,
        }
    }

    /// Simulates one cycle: waiting for threshold, the avalanche, learning,
    /// statistics and the up/down transition, errors if a potential becomes nonfinite
    /// or if every synapse able to carry charge has been pruned
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, AvalancheError> {
        if !self.population.can_transmit() {
            return Err(NetworkError::NoSynapses.into());
        }

        let record = self.parameters.psd && self.cycle >= self.parameters.delay;

        let mut wait_time = 0;
        let mut propagation = Propagation { duration: 0, depol_sum: 0., eeg: Vec::new(), limit_reached: false };
        let mut eeg = Vec::new();

        // readiness without any transmitted charge does not count as an avalanche
        while propagation.depol_sum == 0. {
            wait_time += self.wait_for_threshold()?;
            propagation = self.propagate(record)?;
            eeg.append(&mut propagation.eeg);
        }
        self.last_depol_sum = propagation.depol_sum;

        self.learn();

        let statistics = self.collect_statistics(wait_time, propagation.duration, propagation.depol_sum);

        self.transition(propagation.depol_sum);

        if let Some(weight_noise) = &self.weight_noise {
            weight_noise.apply(&mut self.population, &mut self.rng)?;
        }

        debug!(
            "cycle {}: wait {}, duration {}, depolarization {}, {} active, up {}",
            self.cycle, wait_time, propagation.duration, propagation.depol_sum,
            statistics.active_neurons, statistics.is_up,
        );

        self.cycle += 1;

        Ok(CycleOutcome { statistics, eeg, limit_reached: propagation.limit_reached })
    }

    /// Runs the configured number of cycles, writing a report line for every cycle
    /// past the delay (preceded by its EEG row when recording), stops early
    /// once the EEG sample limit is reached
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunSummary, AvalancheError> {
        let mut summary = RunSummary::default();

        for _ in 0..self.parameters.avalanches {
            let reporting = self.cycle >= self.parameters.delay;
            let outcome = self.run_cycle()?;
            summary.cycles += 1;

            if reporting {
                if self.parameters.psd {
                    writeln!(out, "{}", format_eeg_row(&outcome.eeg))?;
                }
                writeln!(out, "{}", outcome.statistics)?;
                summary.reported += 1;
            }

            if outcome.limit_reached {
                warn!("EEG sample limit reached after {} cycles", summary.cycles);
                summary.terminated_early = true;
                break;
            }
        }

        out.flush()?;
        summary.psd_samples = self.psd_samples;

        info!(
            "finished {} cycles ({} reported, {} EEG samples)",
            summary.cycles, summary.reported, summary.psd_samples,
        );

        Ok(summary)
    }
}

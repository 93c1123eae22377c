//! The neuron state machine, its outgoing synapses and the population of
//! neurons that make up a network.
//! 
//! Each tick is split in two phases: [`Population::reset`] snapshots the potential
//! and refractory state of every neuron, then [`Population::time_step`] is called
//! on every neuron, so the outcome of a tick never depends on the order neurons
//! are visited in.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::{Display, Formatter},
    mem,
};
use crate::error::NeuronError;
pub mod plasticity;
pub mod synapse;
use synapse::Synapse;


/// Identifier of a neuron, unique within a run and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeuronId(pub u64);

impl Display for NeuronId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a neuron excites or inhibits its postsynaptic neurons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotentiationType {
    Excitatory,
    Inhibitory,
}

impl PotentiationType {
    /// Returns `1.` for excitatory neurons and `-1.` for inhibitory neurons
    pub fn get_sign(&self) -> f64 {
        match self {
            PotentiationType::Excitatory => 1.,
            PotentiationType::Inhibitory => -1.,
        }
    }
}

/// Observable state of a neuron
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeuronState {
    /// Output neurons never fire and never become refractory
    Output,
    /// Able to accumulate potential and fire
    Resting,
    /// Has fired, cannot accumulate potential or fire until the next tick
    Refractory,
}

/// Receives a signal whenever a neuron's potential crosses its threshold, meaning
/// the neuron wants to fire on the next tick, signals may repeat within a tick
pub trait ReadySink {
    fn notify_ready(&mut self, id: NeuronId);
}

/// Potential and weight sum a neuron discharges with when it fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discharge {
    /// Sign of the presynaptic neuron
    pub sign: f64,
    /// Potential at the start of the tick
    pub potential: f64,
    /// Sum of outgoing synapse strengths
    pub weight_sum: f64,
}

/// Integrate and fire neuron with a one tick refractory period, tracks the
/// depolarization it received and whether it fired since the last up/down
/// transition, and owns its outgoing synapses keyed by postsynaptic id
#[derive(Debug, Clone)]
pub struct Neuron {
    id: NeuronId,
    threshold: f64,
    disfacilitation: f64,
    character: PotentiationType,
    is_output: bool,
    potential: f64,
    potential_prev: f64,
    depol: f64,
    weight_sum: f64,
    refractory: bool,
    refractory_prev: bool,
    active: bool,
    in_degree: usize,
    synapses: BTreeMap<NeuronId, Synapse>,
}

impl Neuron {
    /// Creates an unconnected neuron, the character of output neurons is ignored
    pub fn new(
        id: NeuronId,
        character: PotentiationType,
        is_output: bool,
        initial_potential: f64,
        threshold: f64,
        disfacilitation: f64,
    ) -> Self {
        Neuron {
            id,
            threshold,
            disfacilitation,
            character,
            is_output,
            potential: initial_potential,
            potential_prev: initial_potential,
            depol: 0.,
            weight_sum: 0.,
            refractory: false,
            refractory_prev: false,
            active: false,
            in_degree: 0,
            synapses: BTreeMap::new(),
        }
    }

    pub fn get_id(&self) -> NeuronId {
        self.id
    }

    /// Potential above which the neuron fires (output neurons never do)
    pub fn get_threshold(&self) -> f64 {
        self.threshold
    }

    pub fn get_disfacilitation(&self) -> f64 {
        self.disfacilitation
    }

    pub fn get_character(&self) -> PotentiationType {
        self.character
    }

    pub fn is_output(&self) -> bool {
        self.is_output
    }

    pub fn get_potential(&self) -> f64 {
        self.potential
    }

    /// Absolute potential change accumulated since the last up/down transition
    pub fn get_depol(&self) -> f64 {
        self.depol
    }

    /// Cached sum of outgoing synapse strengths
    pub fn get_weight_sum(&self) -> f64 {
        self.weight_sum
    }

    pub fn is_refractory(&self) -> bool {
        self.refractory
    }

    /// Whether the neuron fired since the last up/down transition
    pub fn was_active(&self) -> bool {
        self.active
    }

    pub fn get_state(&self) -> NeuronState {
        if self.is_output {
            NeuronState::Output
        } else if self.refractory {
            NeuronState::Refractory
        } else {
            NeuronState::Resting
        }
    }

    /// Number of incoming synapses as last counted by the owning population
    pub fn get_in_degree(&self) -> usize {
        self.in_degree
    }

    pub fn set_in_degree(&mut self, in_degree: usize) {
        self.in_degree = in_degree;
    }

    pub fn get_out_degree(&self) -> usize {
        self.synapses.len()
    }

    /// Outgoing synapses in order of postsynaptic id
    pub fn synapses(&self) -> impl Iterator<Item = &Synapse> {
        self.synapses.values()
    }

    /// Returns the synapse to `target` if it exists
    pub fn get_connection(&self, target: NeuronId) -> Option<&Synapse> {
        self.synapses.get(&target)
    }

    /// Gets the strength of the synapse to `target`, errors if there is no such synapse
    pub fn get_connection_strength(&self, target: NeuronId) -> Result<f64, NeuronError> {
        self.synapses.get(&target)
            .map(|synapse| synapse.get_strength())
            .ok_or(NeuronError::SynapseNotFound { presynaptic: self.id, postsynaptic: target })
    }

    /// Snapshots potential and refractory state, must be called on every neuron
    /// of a population before any of them takes a time step
    pub fn reset(&mut self) {
        self.potential_prev = self.potential;
        self.refractory_prev = self.refractory;
    }

    /// Advances the neuron by one tick, a refractory neuron recovers with its
    /// potential cleared, a neuron above threshold becomes refractory and
    /// returns the [`Discharge`] to transmit through its synapses
    pub fn time_step(&mut self) -> Option<Discharge> {
        if self.is_output {
            self.potential = 0.;
        } else if self.refractory_prev {
            self.refractory = false;
            self.potential = 0.;
        } else if self.potential_prev > self.threshold {
            self.refractory = true;
            self.active = true;

            return Some(Discharge {
                sign: self.character.get_sign(),
                potential: self.potential_prev,
                weight_sum: self.weight_sum,
            });
        }

        None
    }

    /// Adds `delta` to the potential unless the neuron was refractory at the start
    /// of the tick, notifies `sink` if the potential crosses threshold, returns the
    /// change applied, errors if the potential becomes nonfinite
    pub fn increase_potential<S: ReadySink>(&mut self, delta: f64, sink: &mut S) -> Result<f64, NeuronError> {
        if self.refractory_prev {
            return Ok(0.);
        }

        self.potential += delta;
        self.depol += delta.abs();

        if !self.potential.is_finite() {
            return Err(NeuronError::NonfinitePotential { id: self.id });
        }

        if self.potential > self.threshold && !self.is_output {
            sink.notify_ready(self.id);
        }

        Ok(delta)
    }

    /// Up state transition, a neuron that fired is set to `potential`
    pub fn go_up(&mut self, potential: f64) {
        if self.active {
            self.potential = potential;
        }

        self.depol = 0.;
        self.active = false;
    }

    /// Down state transition, a neuron that fired loses potential proportional
    /// to the depolarization it received since the last transition
    pub fn go_down(&mut self) {
        if self.active {
            self.potential -= self.disfacilitation * self.depol;
        }

        self.depol = 0.;
        self.active = false;
    }

    /// Strengthens every synapse proportionally to its activity since the last
    /// call, returns the sum of all increases
    pub fn hebbian(&mut self, rate: f64) -> f64 {
        let increase_sum = self.synapses.values_mut()
            .map(|synapse| synapse.hebbian_increase(rate))
            .sum::<f64>();

        self.synapses.retain(|_, synapse| synapse.get_strength() > 0.);
        self.renormalize_weights();

        increase_sum
    }

    /// Adds `delta` to every outgoing synapse, pruning those that are no longer
    /// positive, returns the new weight sum
    pub fn strengthen_all_connections(&mut self, delta: f64) -> f64 {
        self.synapses.retain(|_, synapse| !synapse.increase_strength(delta));
        self.renormalize_weights();

        self.weight_sum
    }

    /// Strengthens the synapse to `target` by `delta`, pruning it if it is no longer
    /// positive, or creates it with strength `delta` if it does not exist (a
    /// non-positive `delta` creates nothing)
    pub fn strengthen_connection(&mut self, delta: f64, target: NeuronId) {
        match self.synapses.get_mut(&target) {
            Some(synapse) => {
                if synapse.increase_strength(delta) {
                    self.synapses.remove(&target);
                }
            },
            None => {
                if delta > 0. {
                    self.synapses.insert(target, Synapse::new(self.id, target, delta));
                }
            }
        }

        self.renormalize_weights();
    }

    fn renormalize_weights(&mut self) {
        self.weight_sum = self.synapses.values()
            .map(|synapse| synapse.get_strength())
            .sum();
    }

    fn take_synapses(&mut self) -> BTreeMap<NeuronId, Synapse> {
        mem::take(&mut self.synapses)
    }

    fn restore_synapses(&mut self, synapses: BTreeMap<NeuronId, Synapse>) {
        self.synapses = synapses;
    }
}

/// Every neuron of a network stored contiguously, synapses refer to their
/// postsynaptic neuron by id and are resolved through this arena
/// 
/// ```rust
/// # use neural_avalanches::{
/// #     neuron::{Neuron, NeuronId, Population, PotentiationType, ReadySink},
/// #     error::NeuronError,
/// # };
/// #
/// struct Count(usize);
/// 
/// impl ReadySink for Count {
///     fn notify_ready(&mut self, _id: NeuronId) {
///         self.0 += 1;
///     }
/// }
/// 
/// # fn main() -> Result<(), NeuronError> {
/// let neurons = (0..2)
///     .map(|i| Neuron::new(NeuronId(i), PotentiationType::Excitatory, false, 0., 0.5, 0.))
///     .collect();
/// let mut population = Population::new(neurons)?;
/// population.strengthen_connection(NeuronId(0), NeuronId(1), 1.)?;
/// 
/// let mut sink = Count(0);
/// population.get_mut(NeuronId(0))?.increase_potential(0.6, &mut sink)?;
/// assert_eq!(sink.0, 1);
/// 
/// population.reset();
/// let transmitted = population.time_step(NeuronId(0), &mut sink)?;
/// assert_eq!(transmitted, 0.6);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Population {
    neurons: Vec<Neuron>,
    index: HashMap<NeuronId, usize>,
}

impl Population {
    /// Creates a population from neurons with distinct ids
    pub fn new(neurons: Vec<Neuron>) -> Result<Self, NeuronError> {
        let mut index = HashMap::with_capacity(neurons.len());

        for (n, neuron) in neurons.iter().enumerate() {
            if index.insert(neuron.get_id(), n).is_some() {
                return Err(NeuronError::DuplicateNeuron(neuron.get_id()));
            }
        }

        Ok(Population { neurons, index })
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// Position of the neuron with the given id
    pub fn index_of(&self, id: NeuronId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn get(&self, id: NeuronId) -> Result<&Neuron, NeuronError> {
        self.index_of(id)
            .map(|n| &self.neurons[n])
            .ok_or(NeuronError::NeuronNotFound(id))
    }

    pub fn get_mut(&mut self, id: NeuronId) -> Result<&mut Neuron, NeuronError> {
        match self.index_of(id) {
            Some(n) => Ok(&mut self.neurons[n]),
            None => Err(NeuronError::NeuronNotFound(id)),
        }
    }

    /// Prepares every neuron for the next time step
    pub fn reset(&mut self) {
        self.neurons.iter_mut().for_each(|neuron| neuron.reset());
    }

    /// Advances neuron `id` by one tick, if it fires the charge is transmitted
    /// through each of its synapses, returns the signed sum of the transmitted
    /// charge, errors if `id` is not in the population
    pub fn time_step<S: ReadySink>(&mut self, id: NeuronId, sink: &mut S) -> Result<f64, NeuronError> {
        let index = self.index_of(id).ok_or(NeuronError::NeuronNotFound(id))?;

        self.time_step_at(index, sink)
    }

    pub(crate) fn time_step_at<S: ReadySink>(&mut self, index: usize, sink: &mut S) -> Result<f64, NeuronError> {
        let discharge = match self.neurons[index].time_step() {
            Some(discharge) => discharge,
            None => return Ok(0.),
        };

        let mut synapses = self.neurons[index].take_synapses();
        let result = self.transmit(&mut synapses, &discharge, sink);
        self.neurons[index].restore_synapses(synapses);

        result
    }

    fn transmit<S: ReadySink>(
        &mut self,
        synapses: &mut BTreeMap<NeuronId, Synapse>,
        discharge: &Discharge,
        sink: &mut S,
    ) -> Result<f64, NeuronError> {
        let mut out_sum = 0.;

        for synapse in synapses.values_mut() {
            let target = self.index.get(&synapse.postsynaptic)
                .copied()
                .ok_or(NeuronError::NeuronNotFound(synapse.postsynaptic))?;

            out_sum += synapse.fire(
                discharge.sign,
                discharge.potential,
                discharge.weight_sum,
                &mut self.neurons[target],
                sink,
            )?;
        }

        Ok(out_sum)
    }

    /// Strengthens (or creates) the synapse from `presynaptic` to `postsynaptic`,
    /// errors if either neuron is not in the population
    pub fn strengthen_connection(
        &mut self,
        presynaptic: NeuronId,
        postsynaptic: NeuronId,
        delta: f64,
    ) -> Result<(), NeuronError> {
        if !self.index.contains_key(&postsynaptic) {
            return Err(NeuronError::NeuronNotFound(postsynaptic));
        }

        self.get_mut(presynaptic)?.strengthen_connection(delta, postsynaptic);

        Ok(())
    }

    /// Gets the strength of the synapse between two neurons, errors if either
    /// neuron or the synapse does not exist
    pub fn connection_strength(&self, presynaptic: NeuronId, postsynaptic: NeuronId) -> Result<f64, NeuronError> {
        self.get(postsynaptic)?;

        self.get(presynaptic)?.get_connection_strength(postsynaptic)
    }

    /// Recounts the in degree of every neuron from the live synapses
    pub fn refresh_in_degrees(&mut self) {
        let mut in_degrees = vec![0; self.neurons.len()];

        for neuron in self.neurons.iter() {
            for synapse in neuron.synapses() {
                if let Some(&n) = self.index.get(&synapse.postsynaptic) {
                    in_degrees[n] += 1;
                }
            }
        }

        self.neurons.iter_mut()
            .zip(in_degrees)
            .for_each(|(neuron, in_degree)| neuron.set_in_degree(in_degree));
    }

    /// Total number of synapses
    pub fn total_out_degree(&self) -> usize {
        self.neurons.iter().map(|neuron| neuron.get_out_degree()).sum()
    }

    /// Sum of every neuron's weight sum
    pub fn total_weight(&self) -> f64 {
        self.neurons.iter().map(|neuron| neuron.get_weight_sum()).sum()
    }

    /// Whether some neuron that can fire has an outgoing synapse, without one
    /// no firing ever transmits charge
    pub fn can_transmit(&self) -> bool {
        self.neurons.iter().any(|neuron| !neuron.is_output() && neuron.get_out_degree() > 0)
    }

    /// Mean ratio of in degree to out degree over neurons with outgoing weight,
    /// `None` if no neuron has any, in degrees are as last counted by
    /// [`Population::refresh_in_degrees`]
    pub fn mean_degree_ratio(&self) -> Option<f64> {
        let (ratio_sum, connected_count) = self.neurons.iter()
            .filter(|neuron| neuron.get_weight_sum() > 0.)
            .fold((0., 0usize), |(ratio_sum, count), neuron| {
                (ratio_sum + neuron.get_in_degree() as f64 / neuron.get_out_degree() as f64, count + 1)
            });

        if connected_count == 0 {
            None
        } else {
            Some(ratio_sum / connected_count as f64)
        }
    }
}

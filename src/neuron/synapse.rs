//! Directed, weighted connection between two neurons.

use super::{Neuron, NeuronId, ReadySink};
use crate::error::NeuronError;


/// Synapse from a presynaptic neuron to a postsynaptic neuron, owned by the
/// presynaptic neuron and referring to both ends by id, the sign of the
/// synapse comes from the presynaptic neuron's [`PotentiationType`](super::PotentiationType)
#[derive(Debug, Clone, PartialEq)]
pub struct Synapse {
    /// Presynaptic neuron
    pub presynaptic: NeuronId,
    /// Postsynaptic neuron
    pub postsynaptic: NeuronId,
    strength: f64,
    activity: f64,
}

impl Synapse {
    pub fn new(presynaptic: NeuronId, postsynaptic: NeuronId, strength: f64) -> Self {
        Synapse { presynaptic, postsynaptic, strength, activity: 0. }
    }

    /// Current (unsigned) strength
    pub fn get_strength(&self) -> f64 {
        self.strength
    }

    /// Activity accumulated since the last Hebbian update
    pub fn get_activity(&self) -> f64 {
        self.activity
    }

    /// Transmits charge to the postsynaptic neuron, the charge is the presynaptic
    /// potential scaled by this synapse's share of the presynaptic weight sum and
    /// signed by the presynaptic character, returns the charge actually applied
    /// (`0.` if the postsynaptic neuron is refractory)
    pub fn fire<S: ReadySink>(
        &mut self,
        sign: f64,
        presynaptic_potential: f64,
        presynaptic_weight_sum: f64,
        postsynaptic: &mut Neuron,
        sink: &mut S,
    ) -> Result<f64, NeuronError> {
        let charge = sign * presynaptic_potential * self.strength / presynaptic_weight_sum;
        let transmitted = postsynaptic.increase_potential(charge, sink)?;

        self.activity += transmitted.abs();

        Ok(transmitted)
    }

    /// Strengthens the synapse proportionally to the activity recorded since the
    /// last call and clears that activity, returns the increase
    pub fn hebbian_increase(&mut self, rate: f64) -> f64 {
        let increase = rate * self.activity;

        self.strength += increase;
        self.activity = 0.;

        increase
    }

    /// Adds `delta` to the strength, returns `true` if the synapse should be pruned
    /// (strength is no longer positive)
    pub fn increase_strength(&mut self, delta: f64) -> bool {
        self.strength += delta;

        !(self.strength > 0.)
    }
}

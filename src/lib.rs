//! # Neural Avalanches
//! 
//! `neural_avalanches` simulates a randomly wired network of simple spiking
//! neurons that produces self-organized critical avalanches. Noise stimulates
//! single neurons until one crosses its threshold, the resulting cascade of
//! firings is propagated to completion, synapses that carried charge are
//! strengthened (Hebbian learning) while every synapse is lowered by the same
//! total (homeostasis), and the network switches between up and down excitability
//! states depending on the size of the avalanche.
//! 
//! Every random draw comes from a single seeded generator, so a run is
//! reproducible given its seed and parameters.
//! 
//! ## Example Code
//! 
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use neural_avalanches::{
//!     connectome::ConnectomeBuilder,
//!     distribution::DegreeSampler,
//!     error::AvalancheError,
//!     network::{Network, NetworkConfig, NetworkParameters},
//!     noise::NeuronNoise,
//! };
//! 
//! fn main() -> Result<(), AvalancheError> {
//!     // 200 neurons with power law distributed out degrees, a fifth inhibitory,
//!     // output neurons absorb the charge they receive
//!     let builder = ConnectomeBuilder {
//!         inhibitory_fraction: 0.2,
//!         output_fraction: 0.1,
//!         disfacilitation: 0.05,
//!         ..ConnectomeBuilder::new(200, DegreeSampler::power_law(2, 200, 2.)?)
//!     };
//! 
//!     let config = NetworkConfig {
//!         parameters: NetworkParameters {
//!             avalanches: 100,
//!             transition_threshold: 20.,
//!             delay: 10,
//!             ..NetworkParameters::default()
//!         },
//!         builder,
//!         noise: NeuronNoise::new(0.05, 0.1)?,
//!         weight_noise: None,
//!     };
//! 
//!     let mut network = Network::new(config, ChaCha8Rng::seed_from_u64(42))?;
//! 
//!     // one tab separated line per avalanche after the first 10
//!     let mut report = Vec::new();
//!     let summary = network.run(&mut report)?;
//!     assert_eq!(summary.reported, 90);
//! 
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod connectome;
pub mod distribution;
pub mod eeg;
pub mod error;
pub mod network;
pub mod neuron;
pub mod noise;

use std::fmt::{Display, Debug, Formatter, Result};
use crate::neuron::NeuronId;


/// Error set for neuron and synapse operations
pub enum NeuronError {
    /// Potential became `NaN` or infinite after an update
    NonfinitePotential { id: NeuronId },
    /// No synapse exists between the given neurons
    SynapseNotFound { presynaptic: NeuronId, postsynaptic: NeuronId },
    /// Neuron id is not part of the population
    NeuronNotFound(NeuronId),
    /// Neuron id appears more than once in a population
    DuplicateNeuron(NeuronId),
}

impl Display for NeuronError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            NeuronError::NonfinitePotential { id } => 
                write!(f, "Nonfinite potential in neuron {}", id),
            NeuronError::SynapseNotFound { presynaptic, postsynaptic } => 
                write!(f, "No synapse from neuron {} to neuron {}", presynaptic, postsynaptic),
            NeuronError::NeuronNotFound(id) => write!(f, "Neuron {} not found in population", id),
            NeuronError::DuplicateNeuron(id) => write!(f, "Neuron {} already present in population", id),
        }
    }
}

impl Debug for NeuronError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for invalid distribution parameters
pub enum DistributionError {
    /// Degree bounds are reversed or a power law includes degree `0`
    InvalidDegreeRange { min: usize, max: usize },
    /// Power law exponent is not finite
    InvalidExponent(f64),
    /// Role fraction is not a probability
    InvalidProbability(f64),
    /// Initial strength range is empty, negative or not finite
    InvalidStrengthRange { min: f64, max: f64 },
    /// Normal distribution cannot be built from the given mean and standard deviation
    InvalidNormal { mean: f64, std_dev: f64 },
    /// Up state noise range must be positive and finite
    InvalidNoiseRange(f64),
}

impl Display for DistributionError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DistributionError::InvalidDegreeRange { min, max } => 
                write!(f, "Invalid degree range [{}, {}]", min, max),
            DistributionError::InvalidExponent(exponent) => 
                write!(f, "Power law exponent must be finite, got {}", exponent),
            DistributionError::InvalidProbability(p) => 
                write!(f, "Fraction must be within [0, 1], got {}", p),
            DistributionError::InvalidStrengthRange { min, max } => 
                write!(f, "Invalid initial strength range [{}, {})", min, max),
            DistributionError::InvalidNormal { mean, std_dev } => 
                write!(f, "Cannot build normal distribution with mean {} and standard deviation {}", mean, std_dev),
            DistributionError::InvalidNoiseRange(range) => 
                write!(f, "Noise range must be positive and finite, got {}", range),
        }
    }
}

impl Debug for DistributionError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for invalid network parameters
pub enum NetworkError {
    /// Population must contain at least one neuron
    EmptyPopulation,
    /// Firing threshold must be positive
    NonPositiveThreshold(f64),
    /// Transition threshold must be positive
    NonPositiveTransition(f64),
    /// Learning rate must be finite and non-negative
    InvalidLearningRate(f64),
    /// Every neuron is an output neuron so no avalanche can start
    NoFiringNeurons,
    /// No neuron that can fire has an outgoing synapse so no avalanche can transmit charge
    NoSynapses,
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            NetworkError::EmptyPopulation => write!(f, "Population must contain at least one neuron"),
            NetworkError::NonPositiveThreshold(value) => 
                write!(f, "Firing threshold must be positive, got {}", value),
            NetworkError::NonPositiveTransition(value) => 
                write!(f, "Transition threshold must be positive, got {}", value),
            NetworkError::InvalidLearningRate(value) => 
                write!(f, "Learning rate must be finite and non-negative, got {}", value),
            NetworkError::NoFiringNeurons => write!(f, "Population must contain a neuron that is not an output neuron"),
            NetworkError::NoSynapses => 
                write!(f, "Population must contain a non-output neuron with an outgoing synapse"),
        }
    }
}

impl Debug for NetworkError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for configuration loading
pub enum ConfigError {
    /// Configuration file cannot be read
    Io(std::io::Error),
    /// Configuration is not valid TOML
    Parse(String),
    /// Required field is absent
    MissingField(String),
    /// Field is present but has the wrong type or value
    InvalidField(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ConfigError::Io(err) => write!(f, "Cannot read config: {}", err),
            ConfigError::Parse(msg) => write!(f, "Cannot parse config: {}", msg),
            ConfigError::MissingField(field) => write!(f, "Missing required field '{}'", field),
            ConfigError::InvalidField(msg) => write!(f, "{}", msg),
        }
    }
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// A set of errors for potential EEG processing errors
pub enum EEGProcessingError {
    /// Signal needs at least two samples to have a spectrum
    SignalTooShort(usize),
    /// Sampling interval must be positive
    NonPositiveTimestep(f64),
}

impl Display for EEGProcessingError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            EEGProcessingError::SignalTooShort(len) => 
                write!(f, "Signal must have at least two samples, got {}", len),
            EEGProcessingError::NonPositiveTimestep(dt) => 
                write!(f, "Timestep must be positive, got {}", dt),
        }
    }
}

impl Debug for EEGProcessingError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// A set of errors that may occur when using the library
pub enum AvalancheError {
    /// Errors related to neurons and synapses
    NeuronRelatedError(NeuronError),
    /// Errors related to distribution parameters
    DistributionRelatedError(DistributionError),
    /// Errors related to network parameters
    NetworkRelatedError(NetworkError),
    /// Errors related to configuration
    ConfigRelatedError(ConfigError),
    /// Errors related to EEG processing
    EEGRelatedError(EEGProcessingError),
    /// Report output could not be written
    Io(std::io::Error),
}

impl Display for AvalancheError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            AvalancheError::NeuronRelatedError(err) => write!(f, "{}", err),
            AvalancheError::DistributionRelatedError(err) => write!(f, "{}", err),
            AvalancheError::NetworkRelatedError(err) => write!(f, "{}", err),
            AvalancheError::ConfigRelatedError(err) => write!(f, "{}", err),
            AvalancheError::EEGRelatedError(err) => write!(f, "{}", err),
            AvalancheError::Io(err) => write!(f, "Cannot write output: {}", err),
        }
    }
}

impl Debug for AvalancheError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

impl From<NeuronError> for AvalancheError {
    fn from(err: NeuronError) -> AvalancheError {
        AvalancheError::NeuronRelatedError(err)
    }
}

impl From<DistributionError> for AvalancheError {
    fn from(err: DistributionError) -> AvalancheError {
        AvalancheError::DistributionRelatedError(err)
    }
}

impl From<NetworkError> for AvalancheError {
    fn from(err: NetworkError) -> AvalancheError {
        AvalancheError::NetworkRelatedError(err)
    }
}

impl From<ConfigError> for AvalancheError {
    fn from(err: ConfigError) -> AvalancheError {
        AvalancheError::ConfigRelatedError(err)
    }
}

impl From<EEGProcessingError> for AvalancheError {
    fn from(err: EEGProcessingError) -> AvalancheError {
        AvalancheError::EEGRelatedError(err)
    }
}

impl From<std::io::Error> for AvalancheError {
    fn from(err: std::io::Error) -> AvalancheError {
        AvalancheError::Io(err)
    }
}

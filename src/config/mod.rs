//! Loading of simulation parameters from a TOML file.
//! 
//! ```toml
//! [network]
//! size = 1000
//! avalanches = 10000
//! fire_threshold = 1.0
//! disfacilitation = 0.05
//! transition_threshold = 100.0
//! delay = 1000
//! seed = 42
//! 
//! [connectome]
//! degree = "power_law"
//! exponent = 2.0
//! inhibitory_fraction = 0.2
//! 
//! [noise]
//! mean = 0.0
//! std_dev = 0.1
//! 
//! [psd]
//! enabled = true
//! max_samples = 100000
//! spectrum_file = "spectrum.tsv"
//! ```

use std::{fs::read_to_string, path::Path};
use log::info;
use toml::Value;
use crate::{
    connectome::ConnectomeBuilder,
    distribution::DegreeSampler,
    error::{AvalancheError, ConfigError},
    network::{NetworkConfig, NetworkParameters},
    neuron::plasticity::HebbianLearning,
    noise::{NeuronNoise, WeightNoise},
};


/// Fully constructed simulation settings
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Seed of the random number generator shared by every stochastic component
    pub seed: u64,
    pub network: NetworkConfig,
    /// Where to write the power spectrum of the recorded EEG signal, if anywhere
    pub spectrum_file: Option<String>,
}

fn parse_bool(value: &Value, field_name: &str) -> Result<bool, ConfigError> {
    value
        .as_bool()
        .ok_or_else(|| ConfigError::InvalidField(format!("Cannot parse {} as boolean", field_name)))
}

fn parse_usize(value: &Value, field_name: &str) -> Result<usize, ConfigError> {
    value
        .as_integer()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| ConfigError::InvalidField(format!("Cannot parse {} as unsigned integer", field_name)))
}

fn parse_u64(value: &Value, field_name: &str) -> Result<u64, ConfigError> {
    value
        .as_integer()
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| ConfigError::InvalidField(format!("Cannot parse {} as unsigned integer", field_name)))
}

fn parse_f64(value: &Value, field_name: &str) -> Result<f64, ConfigError> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|v| v as f64))
        .ok_or_else(|| ConfigError::InvalidField(format!("Cannot parse {} as float", field_name)))
}

fn parse_string(value: &Value, field_name: &str) -> Result<String, ConfigError> {
    value
        .as_str()
        .ok_or_else(|| ConfigError::InvalidField(format!("Cannot parse {} as string", field_name)))
        .map(String::from)
}

fn parse_value_with_default<T>(
    table: &Value,
    key: &str,
    parser: impl Fn(&Value, &str) -> Result<T, ConfigError>,
    default: T,
) -> Result<T, ConfigError> {
    table
        .get(key)
        .map_or(Ok(default), |value| parser(value, key))
}

fn parse_required<T>(
    table: &Value,
    key: &str,
    parser: impl Fn(&Value, &str) -> Result<T, ConfigError>,
) -> Result<T, ConfigError> {
    match table.get(key) {
        Some(value) => parser(value, key),
        None => Err(ConfigError::MissingField(String::from(key))),
    }
}

fn get_degree_sampler(table: &Value, size: usize) -> Result<DegreeSampler, AvalancheError> {
    let degree: String = parse_value_with_default(table, "degree", parse_string, String::from("power_law"))?;
    info!("degree: {}", degree);

    match degree.as_str() {
        "power_law" => {
            let exponent = parse_required(table, "exponent", parse_f64)?;
            let min_degree = parse_value_with_default(table, "min_degree", parse_usize, 1)?;
            let max_degree = parse_value_with_default(table, "max_degree", parse_usize, size)?;
            info!("exponent: {}, min_degree: {}, max_degree: {}", exponent, min_degree, max_degree);

            Ok(DegreeSampler::power_law(min_degree, max_degree, exponent)?)
        },
        "fixed" => {
            let out_degree = parse_required(table, "out_degree", parse_usize)?;
            info!("out_degree: {}", out_degree);

            Ok(DegreeSampler::fixed(out_degree))
        },
        _ => Err(ConfigError::InvalidField(
            format!("Cannot parse 'degree' as one of the valid types (power_law, fixed), got '{}'", degree)
        ).into()),
    }
}

fn get_builder(network_table: &Value, table: &Value, size: usize) -> Result<ConnectomeBuilder, AvalancheError> {
    let degree = get_degree_sampler(table, size)?;
    let defaults = ConnectomeBuilder::new(size, degree);

    let builder = ConnectomeBuilder {
        fire_threshold: parse_value_with_default(network_table, "fire_threshold", parse_f64, defaults.fire_threshold)?,
        disfacilitation: parse_value_with_default(network_table, "disfacilitation", parse_f64, defaults.disfacilitation)?,
        initial_potential: parse_value_with_default(table, "initial_potential", parse_f64, defaults.initial_potential)?,
        inhibitory_fraction: parse_value_with_default(table, "inhibitory_fraction", parse_f64, defaults.inhibitory_fraction)?,
        output_fraction: parse_value_with_default(table, "output_fraction", parse_f64, defaults.output_fraction)?,
        min_strength: parse_value_with_default(table, "min_strength", parse_f64, defaults.min_strength)?,
        max_strength: parse_value_with_default(table, "max_strength", parse_f64, defaults.max_strength)?,
        allow_self_loops: parse_value_with_default(table, "allow_self_loops", parse_bool, defaults.allow_self_loops)?,
        ..defaults
    };
    info!(
        "fire_threshold: {}, disfacilitation: {}, inhibitory_fraction: {}, output_fraction: {}",
        builder.fire_threshold, builder.disfacilitation, builder.inhibitory_fraction, builder.output_fraction,
    );
    info!(
        "strength range: [{}, {}), allow_self_loops: {}",
        builder.min_strength, builder.max_strength, builder.allow_self_loops,
    );

    Ok(builder)
}

/// Parses simulation settings from the contents of a TOML file
pub fn parse_config(content: &str) -> Result<SimulationConfig, AvalancheError> {
    let config: Value = content.parse()
        .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;
    let empty = Value::Table(toml::map::Map::new());

    let network_table = config.get("network")
        .ok_or_else(|| ConfigError::MissingField(String::from("network")))?;
    let connectome_table = config.get("connectome").unwrap_or(&empty);
    let noise_table = config.get("noise")
        .ok_or_else(|| ConfigError::MissingField(String::from("noise")))?;
    let psd_table = config.get("psd").unwrap_or(&empty);

    let size = parse_required(network_table, "size", parse_usize)?;
    info!("size: {}", size);

    let defaults = NetworkParameters::default();
    let parameters = NetworkParameters {
        avalanches: parse_value_with_default(network_table, "avalanches", parse_usize, defaults.avalanches)?,
        transition_threshold: parse_required(network_table, "transition_threshold", parse_f64)?,
        delay: parse_value_with_default(network_table, "delay", parse_usize, defaults.delay)?,
        learning: HebbianLearning {
            learning_rate: parse_value_with_default(
                network_table, "learning_rate", parse_f64, defaults.learning.learning_rate,
            )?,
        },
        up_states: parse_value_with_default(network_table, "up_states", parse_bool, defaults.up_states)?,
        psd: parse_value_with_default(psd_table, "enabled", parse_bool, defaults.psd)?,
        max_psd: match psd_table.get("max_samples") {
            Some(value) => Some(parse_usize(value, "max_samples")?),
            None => None,
        },
    };
    info!(
        "avalanches: {}, transition_threshold: {}, delay: {}, learning_rate: {}, up_states: {}",
        parameters.avalanches, parameters.transition_threshold, parameters.delay,
        parameters.learning.learning_rate, parameters.up_states,
    );
    info!("psd: {}, max_samples: {:?}", parameters.psd, parameters.max_psd);

    let seed = parse_value_with_default(network_table, "seed", parse_u64, 0)?;
    info!("seed: {}", seed);

    let builder = get_builder(network_table, connectome_table, size)?;

    let noise = NeuronNoise::new(
        parse_value_with_default(noise_table, "mean", parse_f64, 0.)?,
        parse_required(noise_table, "std_dev", parse_f64)?,
    )?;
    info!("noise mean: {}, std_dev: {}", noise.get_mean(), noise.get_std_dev());

    let weight_noise = match config.get("weight_noise") {
        Some(table) => {
            let mut weight_noise = WeightNoise::new(
                parse_value_with_default(table, "mean", parse_f64, 0.)?,
                parse_required(table, "std_dev", parse_f64)?,
            )?;
            weight_noise.allow_self_loops = builder.allow_self_loops;
            info!("weight noise mean: {}, std_dev: {}", weight_noise.get_mean(), weight_noise.get_std_dev());

            Some(weight_noise)
        },
        None => None,
    };

    let spectrum_file = match psd_table.get("spectrum_file") {
        Some(value) => Some(parse_string(value, "spectrum_file")?),
        None => None,
    };

    Ok(SimulationConfig {
        seed,
        network: NetworkConfig { parameters, builder, noise, weight_noise },
        spectrum_file,
    })
}

/// Reads and parses a TOML configuration file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SimulationConfig, AvalancheError> {
    let content = read_to_string(path).map_err(ConfigError::Io)?;

    parse_config(&content)
}

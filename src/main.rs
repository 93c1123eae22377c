use std::{
    env,
    fs::File,
    io::{self, BufWriter, Write},
};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use neural_avalanches::{
    config::load_config,
    eeg::{get_power_density, peak_frequency},
    error::{AvalancheError, ConfigError},
    network::{Network, report::{format_significant, REPORT_PRECISION}},
};


fn write_spectrum<W: Write>(out: &mut W, signal: &[f64]) -> Result<(), AvalancheError> {
    let (frequencies, power) = get_power_density(signal, 1.)?;

    for (frequency, value) in frequencies.iter().zip(power.iter()) {
        writeln!(
            out,
            "{}\t{}",
            format_significant(*frequency, REPORT_PRECISION),
            format_significant(*value, REPORT_PRECISION),
        )?;
    }

    if let Some(peak) = peak_frequency(&frequencies, &power) {
        info!("peak EEG frequency: {} per round", peak);
    }

    Ok(())
}

fn main() -> Result<(), AvalancheError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.toml> [output]", args[0]);
        return Err(ConfigError::MissingField(String::from("config file argument")).into());
    }

    let config = load_config(&args[1])?;

    let rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut network = Network::new(config.network, rng)?;

    let summary = match args.get(2) {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            network.run(&mut out)?
        },
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            network.run(&mut out)?
        }
    };

    if let Some(path) = config.spectrum_file {
        if network.eeg_history().len() < 2 {
            info!("not enough EEG samples recorded ({}) for a spectrum", network.eeg_history().len());
        } else {
            let mut out = BufWriter::new(File::create(&path)?);
            write_spectrum(&mut out, &network.eeg_history().history)?;
            out.flush()?;
            info!("wrote EEG spectrum to {}", path);
        }
    }

    if summary.terminated_early {
        info!("run stopped at the EEG sample limit");
    }

    Ok(())
}

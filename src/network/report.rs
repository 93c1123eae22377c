//! Formatting of the per avalanche report line.

use std::fmt::{Display, Formatter, Result};


/// Number of significant digits every real valued report field is written with
pub const REPORT_PRECISION: usize = 6;

/// Statistics collected over one avalanche cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvalancheStatistics {
    /// Number of synapses divided by the squared population size
    pub bond_density: f64,
    /// Sum of every synapse strength after homeostasis
    pub total_weight: f64,
    /// Noise stimulations applied before the avalanche started
    pub wait_time: usize,
    /// Propagation rounds of the avalanche
    pub duration: usize,
    /// Total absolute charge transmitted during the avalanche
    pub depolarization: f64,
    /// Neurons that fired during the cycle
    pub active_neurons: usize,
    /// Whether the network was in the up state during the cycle
    pub is_up: bool,
    /// Mean ratio of in degree to out degree over neurons with outgoing weight,
    /// `NaN` when no neuron has any
    pub mean_degree_ratio: f64,
}

impl Display for AvalancheStatistics {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{:>10}\t{:>10}\t{:>10}\t{:>10}\t{:>10}\t{:>10}\t{}\t{:>10}",
            format_significant(self.bond_density, REPORT_PRECISION),
            format_significant(self.total_weight, REPORT_PRECISION),
            self.wait_time,
            self.duration,
            format_significant(self.depolarization, REPORT_PRECISION),
            self.active_neurons,
            self.is_up as u8,
            format_significant(self.mean_degree_ratio, REPORT_PRECISION),
        )
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Writes `value` with `precision` significant digits in the shortest of fixed or
/// scientific notation with trailing zeros removed, the way C's `%g` does
/// 
/// ```rust
/// # use neural_avalanches::network::report::format_significant;
/// assert_eq!(format_significant(0.5, 6), "0.5");
/// assert_eq!(format_significant(1234567., 6), "1.23457e+06");
/// assert_eq!(format_significant(0.0000123, 6), "1.23e-05");
/// assert_eq!(format_significant(f64::NAN, 6), "nan");
/// ```
pub fn format_significant(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return String::from("nan");
    }
    if value.is_infinite() {
        return String::from(if value > 0. { "inf" } else { "-inf" });
    }
    if value == 0. {
        return String::from(if value.is_sign_negative() { "-0" } else { "0" });
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };

        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        let fixed = format!("{:.*}", decimals, value);

        String::from(trim_fraction(&fixed))
    }
}

/// Writes one EEG sample per propagation round, each followed by a tab
pub fn format_eeg_row(samples: &[f64]) -> String {
    samples.iter()
        .map(|sample| format!("{}\t", format_significant(*sample, REPORT_PRECISION)))
        .collect()
}

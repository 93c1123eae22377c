//! Power spectral density of the EEG signal recorded during avalanches.

use std::result::Result;
use ndarray::{Array1, s};
use num_complex::Complex;
use rustfft::{FftPlanner, FftDirection};
use crate::error::EEGProcessingError;


/// Retrieves the one sided power density of the given time series sampled every
/// `dt` (one propagation round is `1.`), returns tuple of frequency axis and
/// power spectrum respectively, the mean is removed before transforming
/// 
/// ```rust
/// # use neural_avalanches::{eeg::get_power_density, error::EEGProcessingError};
/// #
/// # fn main() -> Result<(), EEGProcessingError> {
/// let signal: Vec<f64> = (0..64).map(|i| if i % 4 < 2 { 1. } else { -1. }).collect();
/// let (frequencies, power) = get_power_density(&signal, 1.)?;
/// 
/// assert_eq!(frequencies.len(), power.len());
/// assert_eq!(frequencies[16], 0.25);
/// # Ok(())
/// # }
/// ```
pub fn get_power_density(x: &[f64], dt: f64) -> Result<(Array1<f64>, Array1<f64>), EEGProcessingError> {
    if x.len() < 2 {
        return Err(EEGProcessingError::SignalTooShort(x.len()));
    }
    if !(dt > 0.) {
        return Err(EEGProcessingError::NonPositiveTimestep(dt));
    }

    let n = x.len();
    let x_mean = x.iter().sum::<f64>() / n as f64;

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft(n, FftDirection::Forward);

    let mut x_fft: Vec<Complex<f64>> = x.iter()
        .map(|&x_i| Complex::new(x_i - x_mean, 0.0))
        .collect();
    fft.process(&mut x_fft);

    let x_fft_array: Array1<Complex<f64>> = Array1::from(x_fft);

    let sxx: Array1<f64> = x_fft_array.mapv(|val| {
        (2.0 * dt.powi(2) / (n as f64 * dt) * (val * val.conj())).re
    });

    let sxx_positive = sxx.slice(s![0..(n / 2)]).to_owned();

    let df = 1.0 / (n as f64 * dt);
    let faxis: Array1<f64> = Array1::from_iter((0..(n / 2)).map(|k| k as f64 * df));

    Ok((faxis, sxx_positive))
}

/// Frequency with the most power, ignoring the zero frequency bin, `None` if the
/// spectrum has no other bins
pub fn peak_frequency(frequencies: &Array1<f64>, power: &Array1<f64>) -> Option<f64> {
    power.iter()
        .enumerate()
        .skip(1)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .and_then(|(i, _)| frequencies.get(i).copied())
}

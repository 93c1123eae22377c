#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use neural_avalanches::{
        eeg::{get_power_density, peak_frequency},
        error::EEGProcessingError,
    };


    #[test]
    pub fn test_peak_of_sine_wave() -> Result<(), EEGProcessingError> {
        let signal: Vec<f64> = (0..128).map(|i| (2. * PI * i as f64 / 8.).sin()).collect();

        let (frequencies, power) = get_power_density(&signal, 1.)?;

        assert_eq!(frequencies.len(), 64);
        assert_eq!(power.len(), 64);
        assert_eq!(peak_frequency(&frequencies, &power), Some(0.125));

        Ok(())
    }

    #[test]
    pub fn test_timestep_scales_frequencies() -> Result<(), EEGProcessingError> {
        let signal: Vec<f64> = (0..128).map(|i| (2. * PI * i as f64 / 8.).sin()).collect();

        let (frequencies, power) = get_power_density(&signal, 0.5)?;

        assert_eq!(frequencies[1], 1. / 64.);
        assert_eq!(peak_frequency(&frequencies, &power), Some(0.25));

        Ok(())
    }

    #[test]
    pub fn test_constant_signal_has_no_power() -> Result<(), EEGProcessingError> {
        let (_, power) = get_power_density(&[3.; 32], 1.)?;

        assert!(power.iter().all(|value| value.abs() < 1e-12));

        Ok(())
    }

    #[test]
    pub fn test_invalid_input() {
        assert!(matches!(get_power_density(&[1.], 1.), Err(EEGProcessingError::SignalTooShort(1))));
        assert!(matches!(get_power_density(&[], 1.), Err(EEGProcessingError::SignalTooShort(0))));
        assert!(matches!(
            get_power_density(&[1., 2., 3.], 0.),
            Err(EEGProcessingError::NonPositiveTimestep(_))
        ));
    }
}

#[cfg(test)]
mod tests {
    use neural_avalanches::network::report::{
        AvalancheStatistics, format_eeg_row, format_significant, REPORT_PRECISION,
    };


    #[test]
    pub fn test_fixed_notation() {
        assert_eq!(format_significant(1., REPORT_PRECISION), "1");
        assert_eq!(format_significant(-2.5, REPORT_PRECISION), "-2.5");
        assert_eq!(format_significant(123.456789, REPORT_PRECISION), "123.457");
        assert_eq!(format_significant(100000., REPORT_PRECISION), "100000");
        assert_eq!(format_significant(0.0001, REPORT_PRECISION), "0.0001");
        assert_eq!(format_significant(0.1 + 0.2, REPORT_PRECISION), "0.3");
    }

    #[test]
    pub fn test_scientific_notation() {
        assert_eq!(format_significant(1000000., REPORT_PRECISION), "1e+06");
        assert_eq!(format_significant(999999.5, REPORT_PRECISION), "1e+06");
        assert_eq!(format_significant(0.00001, REPORT_PRECISION), "1e-05");
        assert_eq!(format_significant(-3.25e-7, REPORT_PRECISION), "-3.25e-07");
        assert_eq!(format_significant(6.02e23, REPORT_PRECISION), "6.02e+23");
        assert_eq!(format_significant(1e100, REPORT_PRECISION), "1e+100");
    }

    #[test]
    pub fn test_special_values() {
        assert_eq!(format_significant(0., REPORT_PRECISION), "0");
        assert_eq!(format_significant(f64::NAN, REPORT_PRECISION), "nan");
        assert_eq!(format_significant(f64::INFINITY, REPORT_PRECISION), "inf");
        assert_eq!(format_significant(f64::NEG_INFINITY, REPORT_PRECISION), "-inf");
    }

    #[test]
    pub fn test_statistics_line() {
        let statistics = AvalancheStatistics {
            bond_density: 0.0125,
            total_weight: 512.25,
            wait_time: 17,
            duration: 4,
            depolarization: 3.5,
            active_neurons: 9,
            is_up: true,
            mean_degree_ratio: f64::NAN,
        };

        let line = statistics.to_string();
        let fields: Vec<&str> = line.split('\t').collect();

        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0], "    0.0125");
        assert_eq!(fields[6], "1");
        assert_eq!(
            fields.iter().map(|field| field.trim()).collect::<Vec<&str>>(),
            vec!["0.0125", "512.25", "17", "4", "3.5", "9", "1", "nan"],
        );
    }

    #[test]
    pub fn test_eeg_row() {
        assert_eq!(format_eeg_row(&[]), "");
        assert_eq!(format_eeg_row(&[1.5, -0.25, 0.]), "1.5\t-0.25\t0\t");
    }
}

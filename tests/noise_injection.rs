#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use neural_avalanches::{
        error::{AvalancheError, DistributionError, NeuronError},
        neuron::{Neuron, NeuronId, Population, PotentiationType, ReadySink},
        noise::{NeuronNoise, NoiseMode, WeightNoise},
    };


    #[derive(Default)]
    struct ReadyCount(usize);

    impl ReadySink for ReadyCount {
        fn notify_ready(&mut self, _id: NeuronId) {
            self.0 += 1;
        }
    }

    fn population(size: u64, threshold: f64) -> Result<Population, NeuronError> {
        Population::new(
            (0..size)
                .map(|id| Neuron::new(NeuronId(id), PotentiationType::Excitatory, false, 0., threshold, 0.))
                .collect()
        )
    }

    fn potentials(population: &Population) -> Vec<f64> {
        population.neurons().iter().map(|neuron| neuron.get_potential()).collect()
    }

    #[test]
    pub fn test_stimulation_changes_one_neuron() -> Result<(), AvalancheError> {
        let noise = NeuronNoise::new(0.5, 0.)?;
        let mut population = population(10, 100.)?;
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut sink = ReadyCount::default();

        for _ in 0..50 {
            let before = potentials(&population);
            let applied = noise.stimulate(NoiseMode::Down, &mut population, &mut rng, &mut sink)?;
            let after = potentials(&population);

            let changed = before.iter().zip(after.iter()).filter(|(i, j)| i != j).count();

            assert_eq!(applied, 0.5);
            assert_eq!(changed, 1);
        }

        assert_eq!(potentials(&population).iter().sum::<f64>(), 25.);
        assert_eq!(sink.0, 0);

        Ok(())
    }

    #[test]
    pub fn test_stimulation_signals_readiness() -> Result<(), AvalancheError> {
        let noise = NeuronNoise::new(2., 0.)?;
        let mut population = population(4, 1.)?;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut sink = ReadyCount::default();

        noise.stimulate(NoiseMode::Down, &mut population, &mut rng, &mut sink)?;

        assert_eq!(sink.0, 1);

        Ok(())
    }

    #[test]
    pub fn test_up_state_stimulation_is_bounded() -> Result<(), AvalancheError> {
        let noise = NeuronNoise::new(0., 1.)?;
        let mut population = population(10, 1000.)?;
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut sink = ReadyCount::default();

        for _ in 0..1000 {
            let applied = noise.stimulate(NoiseMode::Up { range: 0.3 }, &mut population, &mut rng, &mut sink)?;
            assert!((0. ..0.3).contains(&applied));
        }

        Ok(())
    }

    #[test]
    pub fn test_stimulation_is_reproducible() -> Result<(), AvalancheError> {
        let noise = NeuronNoise::new(0.1, 0.2)?;
        let mut sink = ReadyCount::default();

        let mut first = population(10, 1000.)?;
        let mut second = population(10, 1000.)?;
        let mut first_rng = ChaCha8Rng::seed_from_u64(77);
        let mut second_rng = ChaCha8Rng::seed_from_u64(77);

        for _ in 0..100 {
            noise.stimulate(NoiseMode::Down, &mut first, &mut first_rng, &mut sink)?;
            noise.stimulate(NoiseMode::Down, &mut second, &mut second_rng, &mut sink)?;
        }

        assert_eq!(potentials(&first), potentials(&second));

        Ok(())
    }

    #[test]
    pub fn test_invalid_noise_is_rejected() -> Result<(), AvalancheError> {
        assert!(matches!(NeuronNoise::new(0., -1.), Err(DistributionError::InvalidNormal { .. })));
        assert!(matches!(WeightNoise::new(0., f64::NAN), Err(DistributionError::InvalidNormal { .. })));

        let noise = NeuronNoise::new(0., 1.)?;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut sink = ReadyCount::default();

        let mut neurons = population(3, 1.)?;
        let result = noise.stimulate(NoiseMode::Up { range: 0. }, &mut neurons, &mut rng, &mut sink);
        assert!(matches!(
            result,
            Err(AvalancheError::DistributionRelatedError(DistributionError::InvalidNoiseRange(_)))
        ));

        let mut empty = population(0, 1.)?;
        assert!(noise.stimulate(NoiseMode::Down, &mut empty, &mut rng, &mut sink).is_err());

        Ok(())
    }

    #[test]
    pub fn test_weight_noise_creates_synapse() -> Result<(), AvalancheError> {
        let noise = WeightNoise::new(1., 0.)?;
        let mut population = population(5, 1.)?;
        let mut rng = ChaCha8Rng::seed_from_u64(13);

        let delta = noise.apply(&mut population, &mut rng)?;

        assert_eq!(delta, 1.);
        assert_eq!(population.total_out_degree(), 1);
        assert_eq!(population.total_weight(), 1.);

        for neuron in population.neurons() {
            assert!(neuron.get_connection(neuron.get_id()).is_none());
        }

        Ok(())
    }

    #[test]
    pub fn test_weight_noise_prunes_synapse() -> Result<(), AvalancheError> {
        let noise = WeightNoise::new(-5., 0.)?;
        let mut population = population(2, 1.)?;
        population.strengthen_connection(NeuronId(0), NeuronId(1), 1.)?;
        population.strengthen_connection(NeuronId(1), NeuronId(0), 1.)?;
        let mut rng = ChaCha8Rng::seed_from_u64(13);

        noise.apply(&mut population, &mut rng)?;

        assert_eq!(population.total_out_degree(), 1);
        assert_eq!(population.total_weight(), 1.);

        Ok(())
    }

    #[test]
    pub fn test_weight_noise_needs_a_pair() -> Result<(), AvalancheError> {
        let noise = WeightNoise::new(1., 0.)?;
        let mut population = population(1, 1.)?;
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert_eq!(noise.apply(&mut population, &mut rng)?, 0.);
        assert_eq!(population.total_out_degree(), 0);

        Ok(())
    }
}

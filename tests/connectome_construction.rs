#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use neural_avalanches::{
        connectome::{ConnectomeBuilder, IdGenerator},
        distribution::DegreeSampler,
        error::{AvalancheError, DistributionError, NetworkError},
        neuron::{NeuronId, Population, PotentiationType},
    };


    fn connection_list(population: &Population) -> Vec<(NeuronId, NeuronId, f64)> {
        population.neurons().iter()
            .flat_map(|neuron| {
                neuron.synapses().map(|synapse| (synapse.presynaptic, synapse.postsynaptic, synapse.get_strength()))
            })
            .collect()
    }

    #[test]
    pub fn test_fixed_degree_connectome() -> Result<(), AvalancheError> {
        let builder = ConnectomeBuilder::new(100, DegreeSampler::fixed(10));
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let population = builder.build(&mut IdGenerator::default(), &mut rng)?;

        assert_eq!(population.len(), 100);

        for (n, neuron) in population.neurons().iter().enumerate() {
            assert_eq!(neuron.get_id(), NeuronId(n as u64));
            assert!((1..=10).contains(&neuron.get_out_degree()));
            assert!(neuron.get_connection(neuron.get_id()).is_none());
            assert!(neuron.synapses().all(|synapse| synapse.get_strength() > 0.));

            let live_sum: f64 = neuron.synapses().map(|synapse| synapse.get_strength()).sum();
            assert!((neuron.get_weight_sum() - live_sum).abs() < 1e-12);
            assert_eq!(neuron.get_character(), PotentiationType::Excitatory);
            assert!(!neuron.is_output());
            assert_eq!(neuron.get_potential(), 0.);
            assert_eq!(neuron.get_threshold(), 1.);
        }

        let in_degree_sum: usize = population.neurons().iter().map(|neuron| neuron.get_in_degree()).sum();
        assert_eq!(in_degree_sum, population.total_out_degree());

        Ok(())
    }

    #[test]
    pub fn test_strengths_within_range() -> Result<(), AvalancheError> {
        let builder = ConnectomeBuilder {
            min_strength: 0.5,
            max_strength: 0.75,
            ..ConnectomeBuilder::new(30, DegreeSampler::fixed(1))
        };
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let population = builder.build(&mut IdGenerator::default(), &mut rng)?;

        for neuron in population.neurons() {
            assert_eq!(neuron.get_out_degree(), 1);

            let strength = neuron.synapses().next().map(|synapse| synapse.get_strength()).unwrap_or(0.);
            assert!((0.5..0.75).contains(&strength));
        }

        Ok(())
    }

    #[test]
    pub fn test_construction_is_reproducible() -> Result<(), AvalancheError> {
        let builder = ConnectomeBuilder {
            inhibitory_fraction: 0.3,
            output_fraction: 0.1,
            ..ConnectomeBuilder::new(80, DegreeSampler::power_law(1, 80, 2.)?)
        };

        let first = builder.build(&mut IdGenerator::default(), &mut ChaCha8Rng::seed_from_u64(17))?;
        let second = builder.build(&mut IdGenerator::default(), &mut ChaCha8Rng::seed_from_u64(17))?;

        assert_eq!(connection_list(&first), connection_list(&second));

        let first_roles: Vec<(PotentiationType, bool)> = first.neurons().iter()
            .map(|neuron| (neuron.get_character(), neuron.is_output()))
            .collect();
        let second_roles: Vec<(PotentiationType, bool)> = second.neurons().iter()
            .map(|neuron| (neuron.get_character(), neuron.is_output()))
            .collect();

        assert_eq!(first_roles, second_roles);

        Ok(())
    }

    #[test]
    pub fn test_role_fractions() -> Result<(), AvalancheError> {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let inhibitory = ConnectomeBuilder {
            inhibitory_fraction: 1.,
            ..ConnectomeBuilder::new(20, DegreeSampler::fixed(2))
        }.build(&mut IdGenerator::default(), &mut rng)?;

        assert!(inhibitory.neurons().iter().all(|neuron| neuron.get_character() == PotentiationType::Inhibitory));
        assert!(inhibitory.neurons().iter().all(|neuron| !neuron.is_output()));

        let output = ConnectomeBuilder {
            output_fraction: 1.,
            ..ConnectomeBuilder::new(20, DegreeSampler::fixed(2))
        }.build(&mut IdGenerator::default(), &mut rng)?;

        assert!(output.neurons().iter().all(|neuron| neuron.is_output()));

        Ok(())
    }

    #[test]
    pub fn test_ids_continue_across_builds() -> Result<(), AvalancheError> {
        let builder = ConnectomeBuilder::new(5, DegreeSampler::fixed(1));
        let mut ids = IdGenerator::starting_at(500);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let first = builder.build(&mut ids, &mut rng)?;
        let second = builder.build(&mut ids, &mut rng)?;

        let first_ids: Vec<NeuronId> = first.neurons().iter().map(|neuron| neuron.get_id()).collect();
        let second_ids: Vec<NeuronId> = second.neurons().iter().map(|neuron| neuron.get_id()).collect();

        assert_eq!(first_ids, (500..505).map(NeuronId).collect::<Vec<_>>());
        assert_eq!(second_ids, (505..510).map(NeuronId).collect::<Vec<_>>());

        Ok(())
    }

    #[test]
    pub fn test_single_neuron_self_loops() -> Result<(), AvalancheError> {
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let isolated = ConnectomeBuilder::new(1, DegreeSampler::fixed(3))
            .build(&mut IdGenerator::default(), &mut rng)?;
        assert_eq!(isolated.total_out_degree(), 0);

        let looped = ConnectomeBuilder {
            allow_self_loops: true,
            ..ConnectomeBuilder::new(1, DegreeSampler::fixed(3))
        }.build(&mut IdGenerator::default(), &mut rng)?;

        let neuron = &looped.neurons()[0];
        assert_eq!(neuron.get_out_degree(), 1);
        assert!(neuron.get_connection(neuron.get_id()).is_some());
        assert_eq!(neuron.get_in_degree(), 1);

        Ok(())
    }

    #[test]
    pub fn test_invalid_builders_are_rejected() -> Result<(), AvalancheError> {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let empty = ConnectomeBuilder::new(0, DegreeSampler::fixed(1))
            .build(&mut IdGenerator::default(), &mut rng);
        assert!(matches!(empty, Err(AvalancheError::NetworkRelatedError(NetworkError::EmptyPopulation))));

        let zero_threshold = ConnectomeBuilder {
            fire_threshold: 0.,
            ..ConnectomeBuilder::new(10, DegreeSampler::fixed(1))
        }.build(&mut IdGenerator::default(), &mut rng);
        assert!(matches!(
            zero_threshold,
            Err(AvalancheError::NetworkRelatedError(NetworkError::NonPositiveThreshold(_)))
        ));

        let bad_fraction = ConnectomeBuilder {
            inhibitory_fraction: 1.5,
            ..ConnectomeBuilder::new(10, DegreeSampler::fixed(1))
        }.build(&mut IdGenerator::default(), &mut rng);
        assert!(matches!(
            bad_fraction,
            Err(AvalancheError::DistributionRelatedError(DistributionError::InvalidProbability(_)))
        ));

        let bad_strengths = ConnectomeBuilder {
            min_strength: 1.,
            max_strength: 0.5,
            ..ConnectomeBuilder::new(10, DegreeSampler::fixed(1))
        }.build(&mut IdGenerator::default(), &mut rng);
        assert!(matches!(
            bad_strengths,
            Err(AvalancheError::DistributionRelatedError(DistributionError::InvalidStrengthRange { .. }))
        ));

        Ok(())
    }
}

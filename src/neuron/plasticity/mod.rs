use super::Population;


/// Hebbian learning followed by homeostatic renormalization, after each avalanche
/// every synapse grows in proportion to the charge it carried, then the total
/// growth is taken back uniformly from every synapse
#[derive(Debug, Clone, Copy)]
pub struct HebbianLearning {
    /// Learning rate applied to synaptic activity
    pub learning_rate: f64,
}

impl Default for HebbianLearning {
    fn default() -> Self {
        HebbianLearning { 
            learning_rate: 0.01,
        }
    }
}

/// Totals collected over one Hebbian pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HebbianSummary {
    /// Sum of every strength increase
    pub total_increase: f64,
    /// Number of synapses before homeostatic lowering
    pub out_degree_sum: usize,
}

impl HebbianLearning {
    /// Applies the Hebbian increase to every neuron of the population
    pub fn apply(&self, population: &mut Population) -> HebbianSummary {
        let mut total_increase = 0.;
        let mut out_degree_sum = 0;

        for neuron in population.neurons_mut() {
            total_increase += neuron.hebbian(self.learning_rate);
            out_degree_sum += neuron.get_out_degree();
        }

        HebbianSummary { total_increase, out_degree_sum }
    }

    /// Per synapse strength change that removes the Hebbian growth again,
    /// `None` if there are no synapses to spread it over
    pub fn homeostatic_delta(summary: &HebbianSummary) -> Option<f64> {
        if summary.out_degree_sum == 0 {
            return None;
        }

        Some(-summary.total_increase / summary.out_degree_sum as f64)
    }
}

//! Out-degree distributions used to wire a connectome.

use rand::{Rng, distributions::{Distribution, WeightedIndex}};
use crate::error::DistributionError;


/// Samples the number of outgoing synapses of a neuron, every sample
/// lies within `[min, max]`
/// 
/// ```rust
/// # use rand::SeedableRng;
/// # use rand_chacha::ChaCha8Rng;
/// # use rand::distributions::Distribution;
/// # use neural_avalanches::{distribution::DegreeSampler, error::DistributionError};
/// #
/// # fn main() -> Result<(), DistributionError> {
/// let sampler = DegreeSampler::power_law(1, 100, 2.)?;
/// let mut rng = ChaCha8Rng::seed_from_u64(0);
/// 
/// let degree = sampler.sample(&mut rng);
/// assert!((1..=100).contains(&degree));
/// 
/// let fixed = DegreeSampler::fixed(10);
/// assert_eq!(fixed.sample(&mut rng), 10);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub enum DegreeSampler {
    /// Discrete power law, `P(k)` proportional to `k^(-exponent)` on `[min, max]`
    PowerLaw {
        min: usize,
        max: usize,
        exponent: f64,
        /// Cumulative weights searched when inverting the distribution function
        table: WeightedIndex<f64>,
    },
    /// Every sample is the same degree
    Fixed(usize),
}

impl DegreeSampler {
    /// Generates a power law sampler over the bounded support `[min, max]`,
    /// `min` must be at least `1`
    pub fn power_law(min: usize, max: usize, exponent: f64) -> Result<Self, DistributionError> {
        if min == 0 || min > max {
            return Err(DistributionError::InvalidDegreeRange { min, max });
        }
        if !exponent.is_finite() {
            return Err(DistributionError::InvalidExponent(exponent));
        }

        let weights = (min..=max).map(|k| (k as f64).powf(-exponent));
        let table = WeightedIndex::new(weights)
            .map_err(|_| DistributionError::InvalidExponent(exponent))?;

        Ok(DegreeSampler::PowerLaw { min, max, exponent, table })
    }

    /// Generates a degenerate sampler that always returns `degree`
    pub fn fixed(degree: usize) -> Self {
        DegreeSampler::Fixed(degree)
    }

    /// Smallest degree the sampler can return
    pub fn min(&self) -> usize {
        match self {
            DegreeSampler::PowerLaw { min, .. } => *min,
            DegreeSampler::Fixed(degree) => *degree,
        }
    }

    /// Largest degree the sampler can return
    pub fn max(&self) -> usize {
        match self {
            DegreeSampler::PowerLaw { max, .. } => *max,
            DegreeSampler::Fixed(degree) => *degree,
        }
    }
}

impl Distribution<usize> for DegreeSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self {
            DegreeSampler::PowerLaw { min, table, .. } => min + table.sample(rng),
            DegreeSampler::Fixed(degree) => *degree,
        }
    }
}

use crate::CompassError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Seeded random source shared by every random command, so a run can be
/// replayed from its seed.
#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// `count` distinct items in random order.
    pub fn sample<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        items
            .choose_multiple(&mut self.rng, count)
            .cloned()
            .collect()
    }

    /// `count` indices drawn with replacement, proportional to `weights`.
    pub fn weighted_indices(
        &mut self,
        weights: &[f64],
        count: usize,
    ) -> Result<Vec<usize>, CompassError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let dist = WeightedIndex::new(weights)
            .map_err(|err| CompassError::InvalidArgument(format!("weights: {err}")))?;
        Ok((0..count).map(|_| dist.sample(&mut self.rng)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_the_same_draws() {
        let mut a = RngState::from_seed(7);
        let mut b = RngState::from_seed(7);
        let items: Vec<u32> = (0..50).collect();
        assert_eq!(a.sample(&items, 10), b.sample(&items, 10));
        assert_eq!(
            a.weighted_indices(&[1.0, 2.0, 3.0], 20).expect("weights"),
            b.weighted_indices(&[1.0, 2.0, 3.0], 20).expect("weights")
        );
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn zero_weights_never_drawn() {
        let mut rng = RngState::from_seed(1);
        let picks = rng.weighted_indices(&[0.0, 5.0, 0.0], 100).expect("weights");
        assert!(picks.iter().all(|idx| *idx == 1));
    }

    #[test]
    fn invalid_weights_are_rejected() {
        let mut rng = RngState::from_seed(1);
        assert!(rng.weighted_indices(&[], 1).is_err());
        assert!(rng.weighted_indices(&[0.0, 0.0], 1).is_err());
        assert!(rng.weighted_indices(&[], 0).expect("nothing to draw").is_empty());
    }

    #[test]
    fn sample_returns_distinct_items() {
        let mut rng = RngState::from_seed(3);
        let mut picked = rng.sample(&[1, 2, 3, 4, 5], 5);
        picked.sort();
        assert_eq!(picked, vec![1, 2, 3, 4, 5]);
        assert!(rng.choose::<u8>(&[]).is_none());
    }
}

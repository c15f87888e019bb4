use crate::{Card, CardCatalog, CardFilter, CompassError, Rarity, RngState};
use tracing::debug;

/// One slice of a rarity's pool: every card matching `filter`, each drawn
/// with `weight`.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolCondition {
    pub filter: CardFilter,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GachaDef {
    pub name: String,
    /// Cards per pull.
    pub draws: usize,
    pub weights: Vec<(Rarity, f64)>,
    pub pools: Vec<(Rarity, Vec<PoolCondition>)>,
}

impl GachaDef {
    fn conditions(&self, rarity: Rarity) -> &[PoolCondition] {
        self.pools
            .iter()
            .find(|(pool_rarity, _)| *pool_rarity == rarity)
            .map(|(_, conditions)| conditions.as_slice())
            .unwrap_or(&[])
    }

    /// Draws `draws` rarities by weight, fills each rarity's share from its
    /// weighted pool with replacement, then shuffles the pull.
    pub fn simulate<'a>(
        &self,
        cards: &'a CardCatalog,
        rng: &mut RngState,
    ) -> Result<Vec<&'a Card>, CompassError> {
        let rarity_weights: Vec<f64> = self.weights.iter().map(|(_, weight)| *weight).collect();
        let drawn = rng.weighted_indices(&rarity_weights, self.draws)?;

        let mut pulled = Vec::with_capacity(self.draws);
        for (slot, (rarity, _)) in self.weights.iter().enumerate() {
            let count = drawn.iter().filter(|idx| **idx == slot).count();
            if count == 0 {
                continue;
            }
            let mut population: Vec<&Card> = Vec::new();
            let mut weights: Vec<f64> = Vec::new();
            for condition in self.conditions(*rarity) {
                let matched = cards.filter(&condition.filter);
                weights.extend(std::iter::repeat(condition.weight).take(matched.len()));
                population.extend(matched);
            }
            if population.is_empty() {
                return Err(CompassError::EmptyPool(format!("{} {rarity}", self.name)));
            }
            debug!(gacha = %self.name, %rarity, count, population = population.len(), "draw");
            for idx in rng.weighted_indices(&weights, count)? {
                pulled.push(population[idx]);
            }
        }
        rng.shuffle(&mut pulled);
        Ok(pulled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Activation, Attribute, Collabo, LocalizedString, Parameter, Rank, Status};

    fn card(name: &str, rarity: Rarity) -> Card {
        Card {
            name: LocalizedString::new(name).expect("name"),
            rarity,
            types: vec!["近".to_string()],
            cool_time: 10,
            activation: Activation::Short,
            attribute: Attribute::Fire,
            rank: Rank::B,
            ability: LocalizedString::new("-").expect("ability"),
            status: Status::uniform(Parameter::default()),
            abbreviation: Vec::new(),
            collabo: Collabo::Original,
            filename: name.to_string(),
        }
    }

    fn only(rarity: Rarity, weight: f64) -> PoolCondition {
        PoolCondition {
            filter: CardFilter {
                rarities: vec![rarity],
                ..CardFilter::default()
            },
            weight,
        }
    }

    fn gacha() -> GachaDef {
        GachaDef {
            name: "test".to_string(),
            draws: 10,
            weights: vec![(Rarity::UR, 1.0), (Rarity::R, 3.0)],
            pools: vec![
                (Rarity::UR, vec![only(Rarity::UR, 1.0)]),
                (Rarity::R, vec![only(Rarity::R, 1.0)]),
            ],
        }
    }

    #[test]
    fn pull_has_requested_size_from_allowed_pools() {
        let cards = CardCatalog::new(vec![
            card("ur", Rarity::UR),
            card("sr", Rarity::SR),
            card("r", Rarity::R),
        ]);
        let mut rng = RngState::from_seed(11);
        let pulled = gacha().simulate(&cards, &mut rng).expect("pull");
        assert_eq!(pulled.len(), 10);
        assert!(pulled.iter().all(|card| card.rarity != Rarity::SR));
    }

    #[test]
    fn same_seed_gives_same_pull() {
        let cards = CardCatalog::new(vec![card("ur", Rarity::UR), card("r", Rarity::R)]);
        let first = gacha()
            .simulate(&cards, &mut RngState::from_seed(4))
            .expect("pull");
        let second = gacha()
            .simulate(&cards, &mut RngState::from_seed(4))
            .expect("pull");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_pool_for_drawn_rarity_fails() {
        let cards = CardCatalog::new(vec![card("r", Rarity::R)]);
        let mut def = gacha();
        def.weights = vec![(Rarity::UR, 1.0)];
        let err = def
            .simulate(&cards, &mut RngState::from_seed(0))
            .expect_err("no UR cards");
        assert!(matches!(err, CompassError::EmptyPool(_)));
    }

    #[test]
    fn zero_weight_conditions_are_never_drawn() {
        let cards = CardCatalog::new(vec![card("ur", Rarity::UR), card("r", Rarity::R)]);
        let mut def = gacha();
        def.weights = vec![(Rarity::R, 1.0)];
        def.pools = vec![(Rarity::R, vec![only(Rarity::UR, 0.0), only(Rarity::R, 2.0)])];
        let pulled = def
            .simulate(&cards, &mut RngState::from_seed(9))
            .expect("pull");
        assert!(pulled.iter().all(|card| card.rarity == Rarity::R));
    }
}

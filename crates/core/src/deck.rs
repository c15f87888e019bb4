use crate::{
    Attribute, Card, CardCatalog, CardDivision, CardFilter, CompassError, Rarity, RngState,
    MAX_DECK_SIZE,
};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeckMode {
    /// Cards drawn by role following one of the balance patterns.
    #[default]
    Balance,
    /// Any four distinct cards from the pool.
    Random,
}

/// A switch on the deck settings panel. The mode is switched separately
/// because it is never invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckKey {
    Season,
    Normal,
    Collabo,
    Attribute(Attribute),
    Rarity(Rarity),
}

impl FromStr for DeckKey {
    type Err = CompassError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "season" => Ok(Self::Season),
            "normal" => Ok(Self::Normal),
            "collabo" => Ok(Self::Collabo),
            _ => value
                .parse::<Attribute>()
                .map(Self::Attribute)
                .or_else(|_| value.parse::<Rarity>().map(Self::Rarity))
                .map_err(|_| CompassError::unknown("deck key", value)),
        }
    }
}

/// Per-user deck settings. Starts in balance mode over normal and
/// collaboration UR cards of every attribute. A toggle that would leave a
/// group (card kinds, attributes or rarities) empty is undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckParameter {
    mode: DeckMode,
    season: bool,
    normal: bool,
    collabo: bool,
    attributes: [bool; 3],
    rarities: [bool; 4],
}

impl Default for DeckParameter {
    fn default() -> Self {
        Self {
            mode: DeckMode::Balance,
            season: false,
            normal: true,
            collabo: true,
            attributes: [true; 3],
            rarities: [true, false, false, false],
        }
    }
}

// slots follow Attribute::ALL and Rarity::ALL
fn attribute_slot(attribute: Attribute) -> usize {
    match attribute {
        Attribute::Water => 0,
        Attribute::Fire => 1,
        Attribute::Wood => 2,
    }
}

fn rarity_slot(rarity: Rarity) -> usize {
    match rarity {
        Rarity::UR => 0,
        Rarity::SR => 1,
        Rarity::R => 2,
        Rarity::N => 3,
    }
}

impl DeckParameter {
    pub fn mode(&self) -> DeckMode {
        self.mode
    }

    pub fn switch_mode(&mut self) {
        self.mode = match self.mode {
            DeckMode::Balance => DeckMode::Random,
            DeckMode::Random => DeckMode::Balance,
        };
    }

    pub fn is_valid(&self) -> bool {
        (self.season || self.normal || self.collabo)
            && self.attributes.iter().any(|on| *on)
            && self.rarities.iter().any(|on| *on)
    }

    pub fn is_on(&self, key: DeckKey) -> bool {
        match key {
            DeckKey::Season => self.season,
            DeckKey::Normal => self.normal,
            DeckKey::Collabo => self.collabo,
            DeckKey::Attribute(attribute) => self.attributes[attribute_slot(attribute)],
            DeckKey::Rarity(rarity) => self.rarities[rarity_slot(rarity)],
        }
    }

    fn flip(&mut self, key: DeckKey) {
        let flag = match key {
            DeckKey::Season => &mut self.season,
            DeckKey::Normal => &mut self.normal,
            DeckKey::Collabo => &mut self.collabo,
            DeckKey::Attribute(attribute) => &mut self.attributes[attribute_slot(attribute)],
            DeckKey::Rarity(rarity) => &mut self.rarities[rarity_slot(rarity)],
        };
        *flag = !*flag;
    }

    /// Flips `key`; returns whether the change was kept.
    pub fn toggle(&mut self, key: DeckKey) -> bool {
        self.flip(key);
        if self.is_valid() {
            return true;
        }
        self.flip(key);
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn card_filter(&self) -> CardFilter {
        CardFilter {
            attributes: Attribute::ALL
                .into_iter()
                .filter(|attribute| self.attributes[attribute_slot(*attribute)])
                .collect(),
            rarities: Rarity::ALL
                .into_iter()
                .filter(|rarity| self.rarities[rarity_slot(*rarity)])
                .collect(),
            collabos: Vec::new(),
            season: self.season,
            normal: self.normal,
            collabo: self.collabo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Offensive,
    Defensive,
    Supportive,
    Recovery,
}

use Group::{Defensive as D, Offensive as O, Recovery as R, Supportive as S};

const PATTERNS: &[[Group; 4]] = &[
    [O, D, D, D],
    [O, O, D, D],
    [O, O, O, D],
    [O, D, D, S],
    [D, D, S, S],
    [D, D, D, S],
];

const PATTERNS_WITH_RECOVERY: &[[Group; 4]] = &[
    [O, O, D, R],
    [O, D, D, R],
    [O, D, R, R],
    [O, S, D, R],
    [S, S, D, R],
    [S, D, D, R],
    [O, O, D, D],
    [O, D, D, D],
];

fn balanced<'a>(pool: &[&'a Card], rng: &mut RngState) -> Vec<&'a Card> {
    let mut division = CardDivision::from_cards(pool.iter().copied());
    for group in [
        &mut division.offensive,
        &mut division.defensive,
        &mut division.supportive,
        &mut division.recovery,
    ] {
        rng.shuffle(group);
    }
    let patterns = if division.recovery.is_empty() {
        PATTERNS
    } else {
        PATTERNS_WITH_RECOVERY
    };
    let Some(mut pattern) = rng.choose(patterns).copied() else {
        return Vec::new();
    };
    rng.shuffle(&mut pattern);

    let mut deck: Vec<&Card> = Vec::with_capacity(MAX_DECK_SIZE);
    for group in pattern {
        let cards = match group {
            Group::Offensive => &mut division.offensive,
            Group::Defensive => &mut division.defensive,
            Group::Supportive => &mut division.supportive,
            Group::Recovery => &mut division.recovery,
        };
        // a card with types in two groups must not fill two slots
        while let Some(card) = cards.pop() {
            if !deck.iter().any(|picked| std::ptr::eq(*picked, card)) {
                deck.push(card);
                break;
            }
        }
    }
    deck
}

impl CardCatalog {
    /// Four distinct cards matching `param`. Fails with `EmptyPool` when the
    /// pool, or the groups the drawn pattern asks for, cannot fill a deck.
    pub fn random_deck(
        &self,
        param: &DeckParameter,
        rng: &mut RngState,
    ) -> Result<[&Card; MAX_DECK_SIZE], CompassError> {
        let pool = self.filter(&param.card_filter());
        let deck = match param.mode() {
            DeckMode::Random => rng.sample(&pool, MAX_DECK_SIZE),
            DeckMode::Balance => balanced(&pool, rng),
        };
        debug!(mode = ?param.mode(), pool = pool.len(), drawn = deck.len(), "deck");
        deck.try_into().map_err(|_| {
            CompassError::EmptyPool(format!("{:?} deck from {} cards", param.mode(), pool.len()))
        })
    }
}

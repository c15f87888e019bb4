use crate::{
    Attribute, Card, Collabo, CompassError, EntityResolver, Hero, Parameter, Rarity, RngState,
    Role, Searchable, Stage, Transliterator,
};
use tracing::debug;

/// Card levels a deck can be built at.
pub const DECK_LEVELS: [u32; 5] = [20, 30, 40, 50, 60];
pub const MAX_DECK_SIZE: usize = 4;

/// Order-preserving, read-only entity list. Catalog order doubles as the
/// resolver's tie-break order, so it must match the source data.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<T> {
    entries: Vec<T>,
}

pub type CardCatalog = Catalog<Card>;
pub type HeroCatalog = Catalog<Hero>;
pub type StageCatalog = Catalog<Stage>;

/// Everything loaded at startup, handed to commands explicitly.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub cards: CardCatalog,
    pub heroes: HeroCatalog,
    pub stages: StageCatalog,
}

impl<T> Catalog<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Result<&T, CompassError> {
        self.entries.get(index).ok_or(CompassError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }
}

impl<T> FromIterator<T> for Catalog<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Catalog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T: Searchable> Catalog<T> {
    pub fn resolve(&self, query: &str) -> Result<&T, CompassError> {
        self.resolve_with(&EntityResolver::new(), query)
    }

    pub fn resolve_with<X: Transliterator>(
        &self,
        resolver: &EntityResolver<X>,
        query: &str,
    ) -> Result<&T, CompassError> {
        let resolution =
            resolver.resolve_match(query, &self.entries, |entry: &T| entry.search_labels())?;
        debug!(query, index = resolution.index, kind = ?resolution.kind, "resolved");
        self.get(resolution.index)
    }

    /// An all-digit key addresses by position; anything else is resolved.
    pub fn lookup(&self, key: &str) -> Result<&T, CompassError> {
        let key = key.trim();
        if !key.is_empty() && key.chars().all(|ch| ch.is_ascii_digit()) {
            let index = key.parse::<usize>().unwrap_or(usize::MAX);
            return self.get(index);
        }
        self.resolve(key)
    }

    /// One lookup per whitespace-separated token, keeping at most `limit`
    /// tokens when given.
    pub fn lookup_many(&self, text: &str, limit: Option<usize>) -> Result<Vec<&T>, CompassError> {
        text.split_whitespace()
            .take(limit.unwrap_or(usize::MAX))
            .map(|token| self.lookup(token))
            .collect()
    }
}

/// Card selection as used by random picks and gacha pools.
///
/// Empty attribute, rarity and collabo lists mean "any". The three flags
/// pick which card groups are included: season cards (rank EX), normal
/// cards (regular ranks) and collaboration cards (collaboration ranks whose
/// collabo is listed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFilter {
    pub attributes: Vec<Attribute>,
    pub rarities: Vec<Rarity>,
    pub collabos: Vec<Collabo>,
    pub season: bool,
    pub normal: bool,
    pub collabo: bool,
}

impl Default for CardFilter {
    fn default() -> Self {
        Self {
            attributes: Vec::new(),
            rarities: Vec::new(),
            collabos: Vec::new(),
            season: false,
            normal: true,
            collabo: true,
        }
    }
}

impl CardFilter {
    /// Sorts loosely typed condition words into attributes, rarities and
    /// collabo titles.
    pub fn with_args<S: AsRef<str>>(mut self, args: &[S]) -> Result<Self, CompassError> {
        for arg in args {
            let arg = arg.as_ref();
            if let Ok(attribute) = arg.parse::<Attribute>() {
                self.attributes.push(attribute);
            } else if let Ok(rarity) = arg.parse::<Rarity>() {
                self.rarities.push(rarity);
            } else if let Ok(collabo) = arg.parse::<Collabo>() {
                self.collabos.push(collabo);
            } else {
                return Err(CompassError::unknown("card condition", arg));
            }
        }
        Ok(self)
    }

    fn shared(&self, card: &Card) -> bool {
        (self.attributes.is_empty() || self.attributes.contains(&card.attribute))
            && (self.rarities.is_empty() || self.rarities.contains(&card.rarity))
    }

    fn is_season(&self, card: &Card) -> bool {
        card.rank.is_season() && self.shared(card)
    }

    fn is_normal(&self, card: &Card) -> bool {
        card.rank.is_regular() && self.shared(card)
    }

    fn is_collabo(&self, card: &Card) -> bool {
        card.rank.is_collabo()
            && card.collabo != Collabo::Original
            && (self.collabos.is_empty() || self.collabos.contains(&card.collabo))
            && self.shared(card)
    }
}

/// Cards split by what they do. A card lands in every group one of its
/// types belongs to; cards with no known type count as supportive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardDivision<'a> {
    pub offensive: Vec<&'a Card>,
    pub defensive: Vec<&'a Card>,
    pub supportive: Vec<&'a Card>,
    pub recovery: Vec<&'a Card>,
}

const RECOVERY_TYPES: &[&str] = &["癒"];
const SUPPORTIVE_TYPES: &[&str] = &[
    "奪", "止", "閃", "毒", "害", "人", "除", "押", "黙", "爆", "弱", "罠",
];
const DEFENSIVE_TYPES: &[&str] = &["返", "防", "強"];
const OFFENSIVE_TYPES: &[&str] = &["近", "周", "遠", "連"];

impl<'a> CardDivision<'a> {
    pub fn from_cards(cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut division = Self::default();
        for card in cards {
            let has = |group: &[&str]| card.types.iter().any(|kind| group.contains(&kind.as_str()));
            let mut placed = false;
            if has(RECOVERY_TYPES) {
                division.recovery.push(card);
                placed = true;
            }
            if has(SUPPORTIVE_TYPES) {
                division.supportive.push(card);
                placed = true;
            }
            if has(DEFENSIVE_TYPES) {
                division.defensive.push(card);
                placed = true;
            }
            if has(OFFENSIVE_TYPES) {
                division.offensive.push(card);
                placed = true;
            }
            if !placed {
                division.supportive.push(card);
            }
        }
        division
    }
}

impl Catalog<Card> {
    /// Season cards first, then normal, then collaboration, each group in
    /// catalog order.
    pub fn filter(&self, filter: &CardFilter) -> Vec<&Card> {
        let mut out = Vec::new();
        if filter.season {
            out.extend(self.iter().filter(|card| filter.is_season(card)));
        }
        if filter.normal {
            out.extend(self.iter().filter(|card| filter.is_normal(card)));
        }
        if filter.collabo {
            out.extend(self.iter().filter(|card| filter.is_collabo(card)));
        }
        out
    }

    pub fn pick(&self, filter: &CardFilter, rng: &mut RngState) -> Result<&Card, CompassError> {
        let cards = self.filter(filter);
        rng.choose(&cards)
            .copied()
            .ok_or_else(|| CompassError::EmptyPool(format!("{filter:?}")))
    }

    pub fn divide(&self) -> CardDivision<'_> {
        CardDivision::from_cards(self)
    }
}

/// Sum of each card's parameters at its own level.
pub fn deck_status(cards: &[&Card], levels: &[u32]) -> Result<Parameter, CompassError> {
    if cards.len() > MAX_DECK_SIZE {
        return Err(CompassError::InvalidArgument(format!(
            "a deck holds at most {MAX_DECK_SIZE} cards, got {}",
            cards.len()
        )));
    }
    if cards.len() != levels.len() {
        return Err(CompassError::InvalidArgument(format!(
            "{} cards but {} levels",
            cards.len(),
            levels.len()
        )));
    }
    cards
        .iter()
        .zip(levels)
        .map(|(card, level)| {
            if !DECK_LEVELS.contains(level) {
                return Err(CompassError::unknown("deck level", level.to_string()));
            }
            card.status.at(*level)
        })
        .sum()
}

/// Hero selection for the roulette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroFilter {
    /// Empty means every role.
    pub roles: Vec<Role>,
    pub original: bool,
    pub collabo: bool,
    /// Drops alternate forms that would skew a random pick and strips the
    /// form marker from the heroes left behind.
    pub exclusion: bool,
}

impl Default for HeroFilter {
    fn default() -> Self {
        Self {
            roles: Vec::new(),
            original: true,
            collabo: true,
            exclusion: true,
        }
    }
}

const HERO_FILTER_ORDER: [Role; 4] = [Role::Attacker, Role::Gunner, Role::Sprinter, Role::Tank];

fn excluded_heroes(role: Role) -> &'static [&'static str] {
    match role {
        Role::Attacker => &[
            "マルコス'55(1凸)",
            "マルコス'55(2凸)",
            "マルコス'55(3凸)",
            "サーティーン(atk)",
        ],
        Role::Gunner => &["猫宮ひなた(SG)"],
        Role::Sprinter => &["ピエール77世(HS)"],
        Role::Tank => &[],
    }
}

/// Heroes whose form marker is dropped once their sibling forms are excluded.
const RENAMED_HEROES: &[(&str, &str)] = &[("サーティーン(gun)", "(gun)"), ("猫宮ひなた(AR)", "(AR)")];

impl HeroFilter {
    fn accepts(&self, hero: &Hero, role: Role) -> bool {
        hero.role == role
            && !(self.exclusion
                && excluded_heroes(role)
                    .iter()
                    .any(|name| hero.name == *name))
            && ((!hero.is_collabo && self.original) || (hero.is_collabo && self.collabo))
    }
}

impl Catalog<Hero> {
    /// Grouped by role (attacker, gunner, sprinter, tank), each group in
    /// catalog order. Returns owned heroes because exclusion may rename some.
    pub fn filter(&self, filter: &HeroFilter) -> Result<Vec<Hero>, CompassError> {
        let mut out = Vec::new();
        for role in HERO_FILTER_ORDER {
            if !filter.roles.is_empty() && !filter.roles.contains(&role) {
                continue;
            }
            for hero in self.iter().filter(|hero| filter.accepts(hero, role)) {
                let renamed = RENAMED_HEROES
                    .iter()
                    .find(|(name, _)| filter.exclusion && hero.name == *name);
                match renamed {
                    Some((_, suffix)) => out.push(hero.without_suffix(suffix)?),
                    None => out.push(hero.clone()),
                }
            }
        }
        Ok(out)
    }

    pub fn pick(&self, filter: &HeroFilter, rng: &mut RngState) -> Result<Hero, CompassError> {
        let heroes = self.filter(filter)?;
        rng.choose(&heroes)
            .cloned()
            .ok_or_else(|| CompassError::EmptyPool(format!("{filter:?}")))
    }
}

impl Catalog<Stage> {
    /// Official stages played `number` against `number`.
    pub fn official(&self, number: u32) -> Vec<&Stage> {
        self.iter()
            .filter(|stage| stage.number == number && stage.is_official)
            .collect()
    }

    pub fn pick(&self, number: u32, rng: &mut RngState) -> Result<&Stage, CompassError> {
        let stages = self.official(number);
        rng.choose(&stages)
            .copied()
            .ok_or_else(|| CompassError::EmptyPool(format!("{number}on{number} stages")))
    }
}

//! Categorical card and hero attributes.
//!
//! Each tag is a closed enum; its display text lives in a separate
//! `label()` table so ordering and identity stay on the tag itself.

use crate::{CompassError, LocalizedString};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum Attribute {
    Water,
    Fire,
    Wood,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Water, Attribute::Fire, Attribute::Wood];

    pub fn label(self) -> LocalizedString {
        match self {
            Self::Water => LocalizedString::from_labels("水", "水", "water"),
            Self::Fire => LocalizedString::from_labels("火", "火", "fire"),
            Self::Wood => LocalizedString::from_labels("木", "木", "wood"),
        }
    }

    /// Type advantage: water beats fire, fire beats wood, wood beats water.
    pub fn beats(self, other: Attribute) -> bool {
        matches!(
            (self, other),
            (Self::Water, Self::Fire) | (Self::Fire, Self::Wood) | (Self::Wood, Self::Water)
        )
    }

    /// Other words players use for the attribute.
    pub fn related_terms(self) -> &'static [&'static str] {
        match self {
            Self::Water => &["水", "青", "藍"],
            Self::Wood => &["木", "緑"],
            Self::Fire => &["火", "赤", "紅"],
        }
    }

    pub fn color(self) -> u32 {
        match self {
            Self::Water => 0x0D1BCE,
            Self::Fire => 0xE7382A,
            Self::Wood => 0x59B93A,
        }
    }
}

impl FromStr for Attribute {
    type Err = CompassError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.label().matches_ignore_ascii_case(value.trim()))
            .ok_or_else(|| CompassError::unknown("attribute", value))
    }
}

impl TryFrom<String> for Attribute {
    type Error = CompassError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum Activation {
    Long,
    Short,
    #[serde(rename = "none")]
    Instant,
}

impl Activation {
    pub const ALL: [Activation; 3] = [Activation::Long, Activation::Short, Activation::Instant];

    pub fn label(self) -> LocalizedString {
        match self {
            Self::Long => LocalizedString::from_labels("長", "長", "long"),
            Self::Short => LocalizedString::from_labels("短", "短", "short"),
            Self::Instant => LocalizedString::from_labels("無", "無", "none"),
        }
    }
}

impl FromStr for Activation {
    type Err = CompassError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|act| act.label().matches_ignore_ascii_case(value.trim()))
            .ok_or_else(|| CompassError::unknown("activation", value))
    }
}

impl TryFrom<String> for Activation {
    type Error = CompassError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Card rarity, ordered `N < R < SR < UR`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String")]
pub enum Rarity {
    N,
    R,
    SR,
    UR,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::UR, Rarity::SR, Rarity::R, Rarity::N];

    pub fn code(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::R => "R",
            Self::SR => "SR",
            Self::UR => "UR",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Rarity {
    type Err = CompassError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rarity| rarity.code().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| CompassError::unknown("rarity", value))
    }
}

impl TryFrom<String> for Rarity {
    type Error = CompassError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Rank at which a card becomes obtainable.
///
/// Regular ranks compare `F < E < D < C < B < A < S1`. Season (`Ex`) and
/// collaboration ranks only compare equal to themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rank {
    S1,
    A,
    B,
    C,
    D,
    E,
    F,
    Ex,
    Bl,
    Bunsuto,
    Danmachi,
    Danron,
    Fate,
    Ff,
    Gg,
    Hakka,
    Kabuki,
    Konosuba,
    Kyojin,
    Miku,
    Na,
    Nekomiya,
    Ol,
    P5,
    Ref,
    Rezero,
    Ryza,
    Sao,
    Satsuten,
    Sf,
    Sg,
    Tensura,
}

const REGULAR_RANK_ORDER: [Rank; 7] = [
    Rank::F,
    Rank::E,
    Rank::D,
    Rank::C,
    Rank::B,
    Rank::A,
    Rank::S1,
];

impl Rank {
    pub const ALL: [Rank; 32] = [
        Rank::S1,
        Rank::A,
        Rank::B,
        Rank::C,
        Rank::D,
        Rank::E,
        Rank::F,
        Rank::Ex,
        Rank::Bl,
        Rank::Bunsuto,
        Rank::Danmachi,
        Rank::Danron,
        Rank::Fate,
        Rank::Ff,
        Rank::Gg,
        Rank::Hakka,
        Rank::Kabuki,
        Rank::Konosuba,
        Rank::Kyojin,
        Rank::Miku,
        Rank::Na,
        Rank::Nekomiya,
        Rank::Ol,
        Rank::P5,
        Rank::Ref,
        Rank::Rezero,
        Rank::Ryza,
        Rank::Sao,
        Rank::Satsuten,
        Rank::Sf,
        Rank::Sg,
        Rank::Tensura,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::S1 => "s",
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
            Self::E => "e",
            Self::F => "f",
            Self::Ex => "ex",
            Self::Bl => "bl",
            Self::Bunsuto => "bunsuto",
            Self::Danmachi => "danmachi",
            Self::Danron => "danron",
            Self::Fate => "fate",
            Self::Ff => "ff",
            Self::Gg => "gg",
            Self::Hakka => "hakka",
            Self::Kabuki => "kabuki",
            Self::Konosuba => "konosuba",
            Self::Kyojin => "kyojin",
            Self::Miku => "miku",
            Self::Na => "na",
            Self::Nekomiya => "nekomiya",
            Self::Ol => "ol",
            Self::P5 => "p5",
            Self::Ref => "ref",
            Self::Rezero => "rezero",
            Self::Ryza => "ryza",
            Self::Sao => "sao",
            Self::Satsuten => "satsuten",
            Self::Sf => "sf",
            Self::Sg => "sg",
            Self::Tensura => "tensura",
        }
    }

    fn order(self) -> Option<usize> {
        REGULAR_RANK_ORDER.iter().position(|rank| *rank == self)
    }

    pub fn is_regular(self) -> bool {
        self.order().is_some()
    }

    pub fn is_season(self) -> bool {
        self == Self::Ex
    }

    pub fn is_collabo(self) -> bool {
        !self.is_regular() && !self.is_season()
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        Some(self.order()?.cmp(&other.order()?))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S1 => f.write_str("S1"),
            other => f.write_str(&other.code().to_ascii_uppercase()),
        }
    }
}

impl FromStr for Rank {
    type Err = CompassError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        let lowered = if lowered == "s1" { "s" } else { lowered.as_str() };
        Self::ALL
            .into_iter()
            .find(|rank| rank.code() == lowered)
            .ok_or_else(|| CompassError::unknown("rank", value))
    }
}

impl From<Rank> for String {
    fn from(value: Rank) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Rank {
    type Error = CompassError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Role {
    #[serde(rename = "atk")]
    Attacker,
    #[serde(rename = "spr")]
    Sprinter,
    #[serde(rename = "gun")]
    Gunner,
    #[serde(rename = "tnk")]
    Tank,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Attacker, Role::Sprinter, Role::Gunner, Role::Tank];

    pub fn code(self) -> &'static str {
        match self {
            Self::Attacker => "atk",
            Self::Sprinter => "spr",
            Self::Gunner => "gun",
            Self::Tank => "tnk",
        }
    }

    pub fn label(self) -> LocalizedString {
        match self {
            Self::Attacker => LocalizedString::from_labels("アタッカー", "戰士", "attacker"),
            Self::Sprinter => LocalizedString::from_labels("スプリンター", "快跑手", "sprinter"),
            Self::Gunner => LocalizedString::from_labels("ガンナー", "狙擊手", "gunner"),
            Self::Tank => LocalizedString::from_labels("タンク", "坦克", "tank"),
        }
    }
}

impl FromStr for Role {
    type Err = CompassError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|role| {
                role.code().eq_ignore_ascii_case(trimmed)
                    || role.label().matches_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| CompassError::unknown("role", value))
    }
}

impl TryFrom<String> for Role {
    type Error = CompassError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Collaboration event a card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Collabo {
    Original,
    EnergyCan,
    Beatless,
    Bunsuto,
    Danmachi,
    Danganronpa,
    Fate,
    FinalFantasy,
    GuiltyGear,
    GuiltyGearExtra,
    HackaDoll,
    Kabuki,
    Konosuba,
    AttackOnTitan,
    Miku,
    RinLen,
    NierAutomata,
    Nekomiya,
    Overlord,
    Persona5,
    Reflection,
    ReZero,
    Ryza,
    Sao,
    Satsuten,
    StreetFighter,
    SteinsGate,
    Tensura,
}

impl Collabo {
    pub const ALL: [Collabo; 28] = [
        Collabo::Original,
        Collabo::EnergyCan,
        Collabo::Beatless,
        Collabo::Bunsuto,
        Collabo::Danmachi,
        Collabo::Danganronpa,
        Collabo::Fate,
        Collabo::FinalFantasy,
        Collabo::GuiltyGear,
        Collabo::GuiltyGearExtra,
        Collabo::HackaDoll,
        Collabo::Kabuki,
        Collabo::Konosuba,
        Collabo::AttackOnTitan,
        Collabo::Miku,
        Collabo::RinLen,
        Collabo::NierAutomata,
        Collabo::Nekomiya,
        Collabo::Overlord,
        Collabo::Persona5,
        Collabo::Reflection,
        Collabo::ReZero,
        Collabo::Ryza,
        Collabo::Sao,
        Collabo::Satsuten,
        Collabo::StreetFighter,
        Collabo::SteinsGate,
        Collabo::Tensura,
    ];

    /// Title as it appears in the card records.
    pub fn title(self) -> &'static str {
        match self {
            Self::Original => "",
            Self::EnergyCan => "エナ缶",
            Self::Beatless => "BEATLESS",
            Self::Bunsuto => "文豪ストレイドッグス",
            Self::Danmachi => "ダンまち",
            Self::Danganronpa => "ダンガンロンパ",
            Self::Fate => "fate",
            Self::FinalFantasy => "ファイナルファンタジーXV",
            Self::GuiltyGear => "ギルティギア",
            Self::GuiltyGearExtra => "ギルティギア追加",
            Self::HackaDoll => "ハッカドール",
            Self::Kabuki => "超歌舞伎×千本桜",
            Self::Konosuba => "この素晴らしい世界に祝福を!",
            Self::AttackOnTitan => "進撃の巨人",
            Self::Miku => "初音ミク",
            Self::RinLen => "鏡音リン・レン",
            Self::NierAutomata => "NieR:Automata",
            Self::Nekomiya => "猫宮ひなた",
            Self::Overlord => "オーバーロード",
            Self::Persona5 => "ペルソナ5",
            Self::Reflection => "THE REFLECTION",
            Self::ReZero => "Re:ゼロから始める異世界生活",
            Self::Ryza => "ライザのアトリエ2",
            Self::Sao => "ソードアートオンライン",
            Self::Satsuten => "殺戮の天使",
            Self::StreetFighter => "ストリートファイターV",
            Self::SteinsGate => "STEINS;GATE",
            Self::Tensura => "転生したらスライムだった件",
        }
    }

    pub fn is_collaboration(self) -> bool {
        !matches!(self, Self::Original | Self::EnergyCan)
    }
}

impl fmt::Display for Collabo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Collabo {
    type Err = CompassError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|collabo| collabo.title() == value)
            .ok_or_else(|| CompassError::unknown("collabo", value))
    }
}

impl From<Collabo> for String {
    fn from(value: Collabo) -> Self {
        value.title().to_string()
    }
}

impl TryFrom<String> for Collabo {
    type Error = CompassError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_advantage_is_cyclic() {
        assert!(Attribute::Water.beats(Attribute::Fire));
        assert!(Attribute::Fire.beats(Attribute::Wood));
        assert!(Attribute::Wood.beats(Attribute::Water));
        assert!(!Attribute::Fire.beats(Attribute::Water));
        assert!(!Attribute::Water.beats(Attribute::Water));
    }

    #[test]
    fn attribute_colors_are_distinct() {
        assert_eq!(Attribute::Fire.color(), 0xE7382A);
        assert_ne!(Attribute::Water.color(), Attribute::Wood.color());
    }

    #[test]
    fn parses_japanese_and_english_labels() {
        assert_eq!("水".parse::<Attribute>(), Ok(Attribute::Water));
        assert_eq!("Fire".parse::<Attribute>(), Ok(Attribute::Fire));
        assert_eq!("無".parse::<Activation>(), Ok(Activation::Instant));
        assert_eq!("gun".parse::<Role>(), Ok(Role::Gunner));
        assert_eq!("タンク".parse::<Role>(), Ok(Role::Tank));
        assert_eq!("快跑手".parse::<Role>(), Ok(Role::Sprinter));
        assert_eq!("Attacker".parse::<Role>(), Ok(Role::Attacker));
        assert!(matches!(
            "earth".parse::<Attribute>(),
            Err(CompassError::UnknownValue { kind: "attribute", .. })
        ));
    }

    #[test]
    fn rarity_orders_from_common_to_ultra() {
        assert!(Rarity::UR > Rarity::SR);
        assert!(Rarity::SR > Rarity::R);
        assert!(Rarity::R > Rarity::N);
        assert_eq!("ur".parse::<Rarity>(), Ok(Rarity::UR));
    }

    #[test]
    fn collaboration_ranks_are_incomparable() {
        assert!(Rank::S1 > Rank::A);
        assert!(Rank::F < Rank::E);
        assert_eq!("S1".parse::<Rank>(), Ok(Rank::S1));
        assert_eq!("s".parse::<Rank>(), Ok(Rank::S1));
        assert_eq!(Rank::Sao.partial_cmp(&Rank::A), None);
        assert_eq!(Rank::Ex.partial_cmp(&Rank::F), None);
        assert_eq!(Rank::Sao.partial_cmp(&Rank::Sao), Some(Ordering::Equal));
        assert!(Rank::Sao.is_collabo());
        assert!(Rank::Ex.is_season());
    }

    #[test]
    fn collabo_titles_round_trip() {
        for collabo in Collabo::ALL {
            assert_eq!(collabo.title().parse::<Collabo>(), Ok(collabo));
        }
        assert!(!Collabo::Original.is_collaboration());
        assert!(!Collabo::EnergyCan.is_collaboration());
        assert!(Collabo::SteinsGate.is_collaboration());
    }
}

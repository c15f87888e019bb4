use compass_core::{Activation, Attribute, Collabo, Rank, Rarity, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of `card.json`. Text fields are the Japanese source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub rarity: Rarity,
    pub types: Vec<String>,
    pub cool_time: u32,
    pub activation: Activation,
    pub attribute: Attribute,
    pub rank: Rank,
    pub ability: String,
    #[serde(default)]
    pub abbreviation: Vec<String>,
    #[serde(default = "original_collabo")]
    pub collabo: Collabo,
    pub filename: String,
    pub atk: BTreeMap<String, f64>,
    #[serde(rename = "def")]
    pub defense: BTreeMap<String, f64>,
    pub phs: BTreeMap<String, f64>,
}

fn original_collabo() -> Collabo {
    Collabo::Original
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroRecord {
    pub num: u32,
    pub name: String,
    pub setname: String,
    pub attack: f64,
    pub defense: f64,
    pub physical: f64,
    pub speed: f64,
    pub role: Role,
    pub ultname: String,
    pub ultinvincible: String,
    pub haname: String,
    #[serde(default)]
    pub is_collabo: bool,
    pub icon_name: String,
    #[serde(default)]
    pub icon_color: u32,
    pub image_name: String,
    #[serde(default)]
    pub image_color: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRecord {
    pub name: String,
    pub number: u32,
    pub portal: u32,
    pub filename: String,
    #[serde(default)]
    pub is_official: bool,
}

/// Translated card text; empty fields fall back to the source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardOverlay {
    pub name: String,
    pub ability: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroOverlay {
    pub name: String,
    pub ultname: String,
    pub haname: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageOverlay {
    pub name: String,
    pub filename: String,
}

/// Overlay files map the Japanese source name to its translation.
pub type Overlay<T> = BTreeMap<String, T>;

/// One entry of `gacha.json`. Every key besides `name`, `k` and `weight`
/// is a rarity code holding that rarity's pool conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GachaRecord {
    pub name: String,
    pub k: usize,
    pub weight: BTreeMap<String, f64>,
    #[serde(flatten)]
    pub pools: BTreeMap<String, Vec<ConditionRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionRecord {
    /// Attribute, rarity or collabo words.
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub kwargs: ConditionFlags,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionFlags {
    pub season: Option<bool>,
    pub normal: Option<bool>,
    pub collabo: Option<bool>,
}

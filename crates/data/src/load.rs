use crate::schema::{
    CardOverlay, CardRecord, GachaRecord, HeroOverlay, HeroRecord, Overlay, StageOverlay,
    StageRecord,
};
use anyhow::{anyhow, Context};
use compass_core::{
    Card, CardCatalog, CardFilter, Catalogs, GachaDef, Hero, HeroCatalog, Locale,
    LocalizedString, Parameter, PoolCondition, Rarity, Stage, StageCatalog, Status,
    CANONICAL_LOCALE,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DATA_DIR_ENV: &str = "COMPASS_DATA_DIR";
pub const LANG_ENV: &str = "COMPASS_LANG";
pub const DEFAULT_DATA_DIR: &str = "data";

const CARD_FILE: &str = "card.json";
const HERO_FILE: &str = "hero.json";
const STAGE_FILE: &str = "stage.json";
const GACHA_FILE: &str = "gacha.json";
const TRANS_DIR: &str = "trans";
const EN_TRANS: &str = "en";
const TW_TRANS: &str = "zh-TW";

/// Where catalog files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `COMPASS_DATA_DIR`, or `data` under the working directory.
    pub fn from_env() -> Self {
        let root = std::env::var_os(DATA_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cards(&self) -> PathBuf {
        self.root.join(CARD_FILE)
    }

    pub fn heroes(&self) -> PathBuf {
        self.root.join(HERO_FILE)
    }

    pub fn stages(&self) -> PathBuf {
        self.root.join(STAGE_FILE)
    }

    pub fn gachas(&self) -> PathBuf {
        self.root.join(GACHA_FILE)
    }

    fn overlay(&self, lang: &str, file: &str) -> PathBuf {
        self.root.join(TRANS_DIR).join(lang).join(file)
    }
}

/// Maps loosely written locale names onto a supported locale. Anything
/// unrecognised renders the canonical text.
pub fn normalize_locale(locale: Option<&str>) -> Locale {
    let raw = locale.unwrap_or_default().trim();
    if raw.is_empty() {
        return CANONICAL_LOCALE;
    }
    let lowered = raw.replace('_', "-").to_ascii_lowercase();
    match lowered.as_str() {
        "en" | "en-us" => Locale::AmericanEnglish,
        "en-gb" | "en-uk" => Locale::BritishEnglish,
        "zh-tw" | "zh-hant" | "zh-hant-tw" | "tw" => Locale::TaiwanChinese,
        "ja" | "ja-jp" | "jp" => Locale::Japanese,
        _ => {
            warn!(locale = raw, "unsupported locale, using canonical text");
            CANONICAL_LOCALE
        }
    }
}

/// `COMPASS_LANG` run through [`normalize_locale`].
pub fn locale_from_env() -> Locale {
    normalize_locale(std::env::var(LANG_ENV).ok().as_deref())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

/// Overlays are optional: a missing file leaves every entry untranslated.
fn load_overlay<T: DeserializeOwned>(path: PathBuf) -> anyhow::Result<Overlay<T>> {
    if !path.exists() {
        debug!(path = %path.display(), "no overlay");
        return Ok(Overlay::new());
    }
    load_json(path)
}

fn localized(
    source: &str,
    en: Option<&str>,
    tw: Option<&str>,
) -> anyhow::Result<LocalizedString> {
    LocalizedString::from_source(source, en, en, tw)
        .with_context(|| format!("localize '{source}'"))
}

pub fn load_cards(paths: &DataPaths) -> anyhow::Result<CardCatalog> {
    let records: Vec<CardRecord> = load_json(paths.cards())?;
    let en: Overlay<CardOverlay> = load_overlay(paths.overlay(EN_TRANS, CARD_FILE))?;
    let tw: Overlay<CardOverlay> = load_overlay(paths.overlay(TW_TRANS, CARD_FILE))?;
    let cards = records
        .into_iter()
        .map(|record| card_from_record(record, &en, &tw))
        .collect::<anyhow::Result<Vec<_>>>()?;
    info!(count = cards.len(), "loaded cards");
    Ok(CardCatalog::new(cards))
}

pub fn card_from_record(
    record: CardRecord,
    en: &Overlay<CardOverlay>,
    tw: &Overlay<CardOverlay>,
) -> anyhow::Result<Card> {
    let en = en.get(&record.name);
    let tw = tw.get(&record.name);
    let name = localized(
        &record.name,
        en.map(|entry| entry.name.as_str()),
        tw.map(|entry| entry.name.as_str()),
    )?;
    let ability = localized(
        &record.ability,
        en.map(|entry| entry.ability.as_str()),
        tw.map(|entry| entry.ability.as_str()),
    )?;
    let status = Status::from_level_maps(&record.atk, &record.defense, &record.phs)
        .with_context(|| format!("status of card '{}'", record.name))?;
    Ok(Card {
        name,
        rarity: record.rarity,
        types: record.types,
        cool_time: record.cool_time,
        activation: record.activation,
        attribute: record.attribute,
        rank: record.rank,
        ability,
        status,
        abbreviation: record.abbreviation,
        collabo: record.collabo,
        filename: record.filename,
    })
}

pub fn load_heroes(paths: &DataPaths) -> anyhow::Result<HeroCatalog> {
    let records: Vec<HeroRecord> = load_json(paths.heroes())?;
    let en: Overlay<HeroOverlay> = load_overlay(paths.overlay(EN_TRANS, HERO_FILE))?;
    let tw: Overlay<HeroOverlay> = load_overlay(paths.overlay(TW_TRANS, HERO_FILE))?;
    let heroes = records
        .into_iter()
        .map(|record| hero_from_record(record, &en, &tw))
        .collect::<anyhow::Result<Vec<_>>>()?;
    info!(count = heroes.len(), "loaded heroes");
    Ok(HeroCatalog::new(heroes))
}

pub fn hero_from_record(
    record: HeroRecord,
    en: &Overlay<HeroOverlay>,
    tw: &Overlay<HeroOverlay>,
) -> anyhow::Result<Hero> {
    let en = en.get(&record.name);
    let tw = tw.get(&record.name);
    let name = localized(
        &record.name,
        en.map(|entry| entry.name.as_str()),
        tw.map(|entry| entry.name.as_str()),
    )?;
    let ultname = localized(
        &record.ultname,
        en.map(|entry| entry.ultname.as_str()),
        tw.map(|entry| entry.ultname.as_str()),
    )?;
    let haname = localized(
        &record.haname,
        en.map(|entry| entry.haname.as_str()),
        tw.map(|entry| entry.haname.as_str()),
    )?;
    Ok(Hero {
        num: record.num,
        name,
        setname: record.setname,
        parameter: Parameter::new(record.attack, record.defense, record.physical),
        speed: record.speed,
        role: record.role,
        ultname,
        ultinvincible: record.ultinvincible,
        haname,
        is_collabo: record.is_collabo,
        icon_name: record.icon_name,
        icon_color: record.icon_color,
        image_name: record.image_name,
        image_color: record.image_color,
    })
}

pub fn load_stages(paths: &DataPaths) -> anyhow::Result<StageCatalog> {
    let records: Vec<StageRecord> = load_json(paths.stages())?;
    let en: Overlay<StageOverlay> = load_overlay(paths.overlay(EN_TRANS, STAGE_FILE))?;
    let tw: Overlay<StageOverlay> = load_overlay(paths.overlay(TW_TRANS, STAGE_FILE))?;
    let stages = records
        .into_iter()
        .map(|record| stage_from_record(record, &en, &tw))
        .collect::<anyhow::Result<Vec<_>>>()?;
    info!(count = stages.len(), "loaded stages");
    Ok(StageCatalog::new(stages))
}

pub fn stage_from_record(
    record: StageRecord,
    en: &Overlay<StageOverlay>,
    tw: &Overlay<StageOverlay>,
) -> anyhow::Result<Stage> {
    let en = en.get(&record.name);
    let tw = tw.get(&record.name);
    let name = localized(
        &record.name,
        en.map(|entry| entry.name.as_str()),
        tw.map(|entry| entry.name.as_str()),
    )?;
    let filename = localized(
        &record.filename,
        en.map(|entry| entry.filename.as_str()),
        tw.map(|entry| entry.filename.as_str()),
    )?;
    Ok(Stage {
        name,
        number: record.number,
        portal: record.portal,
        filename,
        is_official: record.is_official,
    })
}

pub fn load_catalogs(paths: &DataPaths) -> anyhow::Result<Catalogs> {
    Ok(Catalogs {
        cards: load_cards(paths)?,
        heroes: load_heroes(paths)?,
        stages: load_stages(paths)?,
    })
}

/// Gacha tables are optional; a data directory without `gacha.json` has none.
pub fn load_gachas(paths: &DataPaths) -> anyhow::Result<Vec<GachaDef>> {
    let path = paths.gachas();
    if !path.exists() {
        debug!(path = %path.display(), "no gacha tables");
        return Ok(Vec::new());
    }
    let records: Vec<GachaRecord> = load_json(&path)?;
    records
        .into_iter()
        .map(|record| {
            let name = record.name.clone();
            gacha_from_record(record)
                .with_context(|| format!("gacha '{name}' in {}", path.display()))
        })
        .collect()
}

pub fn gacha_from_record(record: GachaRecord) -> anyhow::Result<GachaDef> {
    let weights = record
        .weight
        .iter()
        .map(|(code, weight)| -> anyhow::Result<(Rarity, f64)> {
            Ok((code.parse()?, *weight))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let mut pools = Vec::with_capacity(record.pools.len());
    for (code, conditions) in record.pools {
        let rarity: Rarity = code.parse()?;
        let conditions = conditions
            .into_iter()
            .map(|condition| -> anyhow::Result<PoolCondition> {
                let defaults = CardFilter::default();
                let filter = CardFilter {
                    season: condition.kwargs.season.unwrap_or(defaults.season),
                    normal: condition.kwargs.normal.unwrap_or(defaults.normal),
                    collabo: condition.kwargs.collabo.unwrap_or(defaults.collabo),
                    ..defaults
                }
                .with_args(condition.args.as_slice())?;
                Ok(PoolCondition {
                    filter,
                    weight: condition.weight,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        pools.push((rarity, conditions));
    }
    for (rarity, _) in &weights {
        if !pools.iter().any(|(pool, _)| pool == rarity) {
            return Err(anyhow!("rarity {rarity} has a weight but no pool"));
        }
    }
    Ok(GachaDef {
        name: record.name,
        draws: record.k,
        weights,
        pools,
    })
}

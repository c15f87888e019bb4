use compass_core::{
    Attribute, CardFilter, Collabo, HeroFilter, Locale, Rank, Rarity, RngState, Role,
};
use compass_data::{load_catalogs, load_cards, load_gachas, load_heroes, load_stages, DataPaths};
use std::fs;
use std::path::{Path, PathBuf};

fn data_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("data")
}

fn bundled() -> DataPaths {
    DataPaths::new(data_root())
}

fn write(dir: &Path, relative: &str, body: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, body).expect("write fixture");
}

const ONE_CARD: &str = r#"[{
    "name": "近距離攻撃", "rarity": "R", "types": ["近"], "cool_time": 10,
    "activation": "短", "attribute": "火", "rank": "e", "ability": "攻撃",
    "abbreviation": ["近攻"], "collabo": "", "filename": "card_0002",
    "atk": {"1": 1, "20": 2, "30": 3, "40": 4, "50": 5, "60": 6},
    "def": {"1": 1, "20": 1, "30": 1, "40": 1, "50": 1, "60": 1},
    "phs": {"1": 10, "20": 10, "30": 10, "40": 10, "50": 10, "60": 10}
}]"#;

#[test]
fn bundled_catalogs_load_in_source_order() {
    let catalogs = load_catalogs(&bundled()).expect("load catalogs");
    assert_eq!(catalogs.cards.len(), 6);
    assert_eq!(catalogs.heroes.len(), 10);
    assert_eq!(catalogs.stages.len(), 4);
    let first = catalogs.cards.get(0).expect("first card");
    assert_eq!(first.rarity, Rarity::N);
    assert_eq!(first.attribute, Attribute::Wood);
}

#[test]
fn card_overlays_fill_translations_with_fallback() {
    let cards = load_cards(&bundled()).expect("load cards");
    let melee = cards.lookup("近距離攻撃").expect("melee");
    assert_eq!(melee.name.render(Locale::AmericanEnglish), "Melee Attack");
    assert_eq!(melee.name.render(Locale::BritishEnglish), "Melee Attack");
    assert_eq!(melee.name.render(Locale::TaiwanChinese), "近距離攻擊");

    let void = cards.lookup("Void of Light").expect("void");
    assert_eq!(void.ability.render(Locale::AmericanEnglish), void.ability.canonical_text());
    assert_eq!(void.name.render(Locale::TaiwanChinese), "ヴォイドオブライト");
}

#[test]
fn cards_resolve_by_abbreviation_and_attribute_words() {
    let cards = load_cards(&bundled()).expect("load cards");
    assert_eq!(cards.lookup("ダンシ").expect("abbr").filename, "card_0004");
    assert_eq!(cards.lookup("赤遠").expect("attribute word").filename, "card_0004");
    assert_eq!(cards.lookup("3").expect("index").filename, "card_0004");
    let many = cards.lookup_many("ミク ヴォイド 近攻 ダンシ ヒーキャン", Some(4)).expect("many");
    let files: Vec<&str> = many.iter().map(|card| card.filename.as_str()).collect();
    assert_eq!(files, vec!["card_0006", "card_0003", "card_0002", "card_0004"]);
}

#[test]
fn card_groups_follow_rank_and_collabo() {
    let cards = load_cards(&bundled()).expect("load cards");
    let season = cards.filter(&CardFilter {
        season: true,
        normal: false,
        collabo: false,
        ..CardFilter::default()
    });
    assert_eq!(season.len(), 1);
    assert_eq!(season[0].rank, Rank::Ex);
    assert_eq!(season[0].collabo, Collabo::EnergyCan);

    let collab = cards.filter(&CardFilter {
        normal: false,
        ..CardFilter::default()
    });
    assert_eq!(collab.len(), 1);
    assert!(collab[0].is_collabo());
}

#[test]
fn hero_filter_hides_alternate_forms() {
    let heroes = load_heroes(&bundled()).expect("load heroes");
    let picked = heroes.filter(&HeroFilter::default()).expect("filter");
    let names: Vec<&str> = picked.iter().map(|hero| hero.name.canonical_text()).collect();
    assert_eq!(
        names,
        vec![
            "十文字アタリ",
            "マルコス'55",
            "サーティーン",
            "猫宮ひなた",
            "ピエール77世",
            "ジャスティス・ハンコック",
        ]
    );
    let thirteen = &picked[2];
    assert_eq!(thirteen.name.render(Locale::AmericanEnglish), "Thirteen");
    assert_eq!(thirteen.role, Role::Gunner);
}

#[test]
fn hero_text_uses_matching_overlay_fields() {
    let heroes = load_heroes(&bundled()).expect("load heroes");
    let atari = heroes.lookup("atari jumonji").expect("atari");
    assert_eq!(atari.name.render(Locale::TaiwanChinese), "十文字亞他利");
    assert_eq!(atari.ultname.render(Locale::TaiwanChinese), "ブレイジング・ファイア");
    assert_eq!(atari.haname.canonical_text(), "リベンジブースト");
    assert_eq!(atari.haname.render(Locale::BritishEnglish), "Revenge Boost");
    assert_eq!(heroes.lookup("002_justice").expect("key").num, 2);
}

#[test]
fn stage_images_follow_locale() {
    let stages = load_stages(&bundled()).expect("load stages");
    let mansion = stages.lookup("Twisted Mansion").expect("stage");
    assert_eq!(mansion.image_file(Locale::AmericanEnglish), "stage_01_en.png");
    assert_eq!(mansion.image_file(Locale::TaiwanChinese), "stage_01.png");
    let mut rng = RngState::from_seed(21);
    for _ in 0..10 {
        let stage = stages.pick(3, &mut rng).expect("pick");
        assert!(stage.is_official && stage.number == 3);
    }
}

#[test]
fn bundled_gachas_simulate() {
    let paths = bundled();
    let cards = load_cards(&paths).expect("load cards");
    let gachas = load_gachas(&paths).expect("load gachas");
    assert_eq!(gachas.len(), 2);
    let mut rng = RngState::from_seed(99);
    for gacha in &gachas {
        let pulled = gacha.simulate(&cards, &mut rng).expect("simulate");
        assert_eq!(pulled.len(), gacha.draws);
    }
}

#[test]
fn missing_overlays_fall_back_to_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "card.json", ONE_CARD);
    let cards = load_cards(&DataPaths::new(dir.path())).expect("load cards");
    let card = cards.get(0).expect("card");
    for locale in Locale::ALL {
        assert_eq!(card.name.render(locale), "近距離攻撃");
    }
    assert!(load_gachas(&DataPaths::new(dir.path())).expect("no gachas").is_empty());
}

#[test]
fn british_english_reuses_american_overlay() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "card.json", ONE_CARD);
    write(
        dir.path(),
        "trans/en/card.json",
        r#"{"近距離攻撃": {"name": "Melee Attack"}}"#,
    );
    let cards = load_cards(&DataPaths::new(dir.path())).expect("load cards");
    let card = cards.get(0).expect("card");
    assert_eq!(card.name.render(Locale::BritishEnglish), "Melee Attack");
    assert_eq!(card.ability.render(Locale::BritishEnglish), "攻撃");
}

#[test]
fn errors_name_the_failing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_cards(&DataPaths::new(dir.path())).expect_err("missing file");
    assert!(err.to_string().contains("card.json"));

    write(dir.path(), "card.json", r#"[{"name": "broken"}]"#);
    let err = load_cards(&DataPaths::new(dir.path())).expect_err("bad record");
    assert!(err.to_string().starts_with("parse"));
}

#[test]
fn unknown_enum_values_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "card.json", &ONE_CARD.replace("\"火\"", "\"土\""));
    let err = load_cards(&DataPaths::new(dir.path())).expect_err("bad attribute");
    assert!(format!("{err:#}").contains("unknown attribute"));
}

#[test]
fn missing_status_level_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "card.json", &ONE_CARD.replace("\"60\": 6", "\"70\": 6"));
    let err = load_cards(&DataPaths::new(dir.path())).expect_err("missing level");
    assert!(format!("{err:#}").contains("status of card"));
}

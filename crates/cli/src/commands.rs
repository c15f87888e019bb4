use anyhow::{bail, Context as _};
use compass_core::{
    deck_status, divide_teams, resolve, Attribute, Card, CardDivision, DeckKey, DeckParameter,
    GachaDef, Hero, Locale, Rarity, RngState, Role, RouletteKey, RouletteParameter, Stage,
    DECK_LEVELS, MAX_DECK_SIZE,
};
use compass_data::{load_cards, load_gachas, load_heroes, load_stages, DataPaths};
use serde::Serialize;
use tracing::warn;

const DEFAULT_CARD_LEVEL: u32 = 50;
const DEFAULT_STAGE_NUMBER: u32 = 3;
const DEFAULT_TEAM_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Card { names: Vec<String>, level: u32 },
    Deck(DeckOptions),
    Hero { name: String },
    Stage { name: String },
    StageGacha { number: u32 },
    Roulette { original: bool, collabo: bool, roles: Vec<RouletteKey> },
    Gacha { key: String },
    GachaList,
    Team { per_team: usize, members: Vec<String> },
    Divide,
    Help,
}

/// Deck switches as given on the command line. Empty attribute and rarity
/// lists keep the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckOptions {
    pub random: bool,
    pub season: bool,
    pub no_normal: bool,
    pub no_collabo: bool,
    pub attributes: Vec<Attribute>,
    pub rarities: Vec<Rarity>,
    pub level: u32,
}

pub struct Context<'a> {
    pub paths: &'a DataPaths,
    pub locale: Locale,
    pub json: bool,
}

fn flag_value<'a>(args: &'a [String], idx: usize, flag: &str) -> anyhow::Result<&'a str> {
    args.get(idx + 1)
        .map(String::as_str)
        .with_context(|| format!("{flag} needs a value"))
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> anyhow::Result<T> {
    value
        .parse::<T>()
        .ok()
        .with_context(|| format!("invalid {flag} '{value}'"))
}

pub fn parse_command(args: &[String]) -> anyhow::Result<Command> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };
    let mut positional: Vec<String> = Vec::new();
    let mut level = DEFAULT_CARD_LEVEL;
    let mut number: Option<u32> = None;
    let mut original = true;
    let mut collabo = true;
    let mut roles: Vec<RouletteKey> = Vec::new();
    let mut deck = DeckOptions::default();
    let mut idx = 0usize;
    while idx < rest.len() {
        match rest[idx].as_str() {
            "--level" => {
                level = parse_number(flag_value(rest, idx, "--level")?, "level")?;
                idx += 1;
            }
            "--number" | "-n" => {
                number = Some(parse_number(flag_value(rest, idx, "--number")?, "number")?);
                idx += 1;
            }
            "--role" => {
                let value = flag_value(rest, idx, "--role")?;
                match value.parse::<RouletteKey>()? {
                    key @ RouletteKey::Role(_) => roles.push(key),
                    _ => bail!("'{value}' is not a role"),
                }
                idx += 1;
            }
            "--attribute" => {
                deck.attributes.push(flag_value(rest, idx, "--attribute")?.parse::<Attribute>()?);
                idx += 1;
            }
            "--rarity" => {
                deck.rarities.push(flag_value(rest, idx, "--rarity")?.parse::<Rarity>()?);
                idx += 1;
            }
            "--random" => deck.random = true,
            "--season" => deck.season = true,
            "--no-normal" => deck.no_normal = true,
            "--no-original" => original = false,
            "--no-collabo" => collabo = false,
            other => positional.push(other.to_string()),
        }
        idx += 1;
    }

    if !DECK_LEVELS.contains(&level) {
        bail!("level must be one of {DECK_LEVELS:?}, got {level}");
    }
    let command = match name.as_str() {
        "card" | "c" => {
            if positional.is_empty() {
                bail!("card needs at least one name");
            }
            Command::Card {
                names: positional,
                level,
            }
        }
        "deck" => Command::Deck(DeckOptions {
            no_collabo: !collabo,
            level,
            ..deck
        }),
        "hero" | "h" => Command::Hero {
            name: joined(positional, "hero")?,
        },
        "stage" | "s" => Command::Stage {
            name: joined(positional, "stage")?,
        },
        "stage-gacha" => Command::StageGacha {
            number: number.unwrap_or(DEFAULT_STAGE_NUMBER),
        },
        "roulette" => Command::Roulette {
            original,
            collabo,
            roles,
        },
        "gacha" => Command::Gacha {
            key: joined(positional, "gacha")?,
        },
        "gacha-list" => Command::GachaList,
        "team" => Command::Team {
            per_team: number.map(|n| n as usize).unwrap_or(DEFAULT_TEAM_SIZE),
            members: positional,
        },
        "divide" => Command::Divide,
        "help" | "--help" | "-h" => Command::Help,
        other => bail!("unknown command '{other}'"),
    };
    Ok(command)
}

fn joined(words: Vec<String>, what: &str) -> anyhow::Result<String> {
    if words.is_empty() {
        bail!("{what} needs a name");
    }
    Ok(words.join(" "))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut text = serde_json::to_string_pretty(value).context("serialize output")?;
    text.push('\n');
    Ok(text)
}

pub fn run_command(ctx: &Context<'_>, command: &Command, rng: &mut RngState) -> anyhow::Result<String> {
    match command {
        Command::Card { names, level } => card_command(ctx, names, *level),
        Command::Deck(options) => deck_command(ctx, options, rng),
        Command::Hero { name } => {
            let heroes = load_heroes(ctx.paths)?;
            let hero = heroes.lookup(name)?;
            if ctx.json {
                return to_json(hero);
            }
            Ok(render_hero(hero, ctx.locale))
        }
        Command::Stage { name } => {
            let stages = load_stages(ctx.paths)?;
            let stage = stages.lookup(name)?;
            if ctx.json {
                return to_json(stage);
            }
            Ok(render_stage(stage, ctx.locale))
        }
        Command::StageGacha { number } => {
            let stages = load_stages(ctx.paths)?;
            let stage = stages.pick(*number, rng)?;
            if ctx.json {
                return to_json(stage);
            }
            Ok(render_stage(stage, ctx.locale))
        }
        Command::Roulette {
            original,
            collabo,
            roles,
        } => {
            let param = roulette_parameter(*original, *collabo, roles);
            let heroes = load_heroes(ctx.paths)?;
            let hero = heroes.pick(&param.hero_filter(), rng)?;
            if ctx.json {
                return to_json(&hero);
            }
            Ok(render_hero(&hero, ctx.locale))
        }
        Command::Gacha { key } => gacha_command(ctx, key, rng),
        Command::GachaList => {
            let gachas = load_gachas(ctx.paths)?;
            Ok(gachas
                .iter()
                .enumerate()
                .map(|(idx, gacha)| format!("{idx}: {} ({} cards)\n", gacha.name, gacha.draws))
                .collect())
        }
        Command::Team { per_team, members } => {
            let teams = divide_teams(members, *per_team, rng)?;
            if ctx.json {
                return to_json(&teams);
            }
            Ok(teams
                .iter()
                .map(|team| {
                    format!(
                        "{} #{:06x}: {}\n",
                        team.color,
                        team.color.color(),
                        team.members.join(", ")
                    )
                })
                .collect())
        }
        Command::Divide => {
            let cards = load_cards(ctx.paths)?;
            Ok(render_division(&cards.divide(), ctx.locale))
        }
        Command::Help => Ok(String::new()),
    }
}

/// Starts from everything on and switches off what the flags leave out.
/// A switch that would empty the pool is refused and logged.
fn roulette_parameter(original: bool, collabo: bool, roles: &[RouletteKey]) -> RouletteParameter {
    let mut param = RouletteParameter::default();
    let mut off: Vec<RouletteKey> = Vec::new();
    if !roles.is_empty() {
        off.extend(
            Role::ALL
                .into_iter()
                .map(RouletteKey::Role)
                .filter(|key| !roles.contains(key)),
        );
    }
    if !original {
        off.push(RouletteKey::Original);
    }
    if !collabo {
        off.push(RouletteKey::Collabo);
    }
    for key in off {
        if param.is_on(key) && !param.toggle(key) {
            warn!(?key, "roulette would have no heroes left; keeping it on");
        }
    }
    param
}

/// Starts from the defaults and moves each switch the options name. Switches
/// being turned on go first so a narrowing never passes through an empty
/// group; a switch that would still empty a group is refused and logged.
fn deck_parameter(options: &DeckOptions) -> DeckParameter {
    let mut param = DeckParameter::default();
    if options.random {
        param.switch_mode();
    }
    let mut wanted = vec![
        (DeckKey::Season, options.season),
        (DeckKey::Normal, !options.no_normal),
        (DeckKey::Collabo, !options.no_collabo),
    ];
    if !options.attributes.is_empty() {
        wanted.extend(Attribute::ALL.map(|attribute| {
            (DeckKey::Attribute(attribute), options.attributes.contains(&attribute))
        }));
    }
    if !options.rarities.is_empty() {
        wanted.extend(
            Rarity::ALL.map(|rarity| (DeckKey::Rarity(rarity), options.rarities.contains(&rarity))),
        );
    }
    wanted.sort_by_key(|(_, on)| !*on);
    for (key, on) in wanted {
        if param.is_on(key) != on && !param.toggle(key) {
            warn!(?key, "deck would have no cards left; keeping it");
        }
    }
    param
}

fn render_total(cards: &[&Card], level: u32, locale: Locale) -> anyhow::Result<String> {
    let total = deck_status(cards, &vec![level; cards.len()])?;
    let mut out: String = cards
        .iter()
        .map(|card| format!("{}\n", card.title(locale)))
        .collect();
    out.push_str(&format!(
        "Lv{level} total: attack {} / defense {} / physical {}\n",
        total.attack, total.defense, total.physical
    ));
    Ok(out)
}

fn card_command(ctx: &Context<'_>, names: &[String], level: u32) -> anyhow::Result<String> {
    let cards = load_cards(ctx.paths)?;
    let picked = cards.lookup_many(&names.join(" "), Some(MAX_DECK_SIZE))?;
    let [card] = picked.as_slice() else {
        if ctx.json {
            return to_json(&deck_status(&picked, &vec![level; picked.len()])?);
        }
        return render_total(&picked, level, ctx.locale);
    };
    if ctx.json {
        return to_json(*card);
    }
    render_card(card, level, ctx.locale)
}

fn deck_command(ctx: &Context<'_>, options: &DeckOptions, rng: &mut RngState) -> anyhow::Result<String> {
    let cards = load_cards(ctx.paths)?;
    let param = deck_parameter(options);
    let deck = cards
        .random_deck(&param, rng)
        .context("build deck; widen the attribute or rarity switches")?;
    if ctx.json {
        return to_json(&deck);
    }
    render_total(&deck, options.level, ctx.locale)
}

fn render_card(card: &Card, level: u32, locale: Locale) -> anyhow::Result<String> {
    let status = card.status.at(level)?;
    let mut lines = vec![
        card.title(locale),
        format!(
            "{} {} #{:06x} {} / CT {}s / {}",
            card.rarity,
            card.attribute.label().render(locale),
            card.attribute.color(),
            card.activation.label().render(locale),
            card.cool_time,
            card.rank
        ),
    ];
    if card.is_collabo() {
        lines.push(card.collabo.to_string());
    }
    lines.push(card.ability.render(locale).to_string());
    lines.push(format!(
        "Lv{level}: attack {} / defense {} / physical {}",
        status.attack, status.defense, status.physical
    ));
    lines.push(card.image_file());
    Ok(lines.iter().map(|line| format!("{line}\n")).collect())
}

fn render_hero(hero: &Hero, locale: Locale) -> String {
    let lines = [
        format!("{} ({})", hero.name.render(locale), hero.role.label().render(locale)),
        format!(
            "attack {} / defense {} / physical {} / speed {}",
            hero.parameter.attack, hero.parameter.defense, hero.parameter.physical, hero.speed
        ),
        format!("HS: {}", hero.ultname.render(locale)),
        format!("HA: {}", hero.haname.render(locale)),
        format!("{} {}", hero.icon_file(), hero.image_file()),
    ];
    lines.iter().map(|line| format!("{line}\n")).collect()
}

fn render_stage(stage: &Stage, locale: Locale) -> String {
    format!(
        "{}\nportals {}\n{}\n",
        stage.title(locale),
        stage.portal,
        stage.image_file(locale)
    )
}

fn render_division(division: &CardDivision<'_>, locale: Locale) -> String {
    let groups: [(&str, &[&Card]); 4] = [
        ("offensive", &division.offensive),
        ("defensive", &division.defensive),
        ("supportive", &division.supportive),
        ("recovery", &division.recovery),
    ];
    groups
        .iter()
        .map(|(label, cards)| {
            let names: Vec<&str> = cards.iter().map(|card| card.name.render(locale)).collect();
            format!("{label} ({}): {}\n", cards.len(), names.join(", "))
        })
        .collect()
}

fn find_gacha<'a>(gachas: &'a [GachaDef], key: &str) -> anyhow::Result<&'a GachaDef> {
    if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()) {
        let index: usize = key.parse().unwrap_or(usize::MAX);
        return gachas
            .get(index)
            .with_context(|| format!("gacha index {index} out of range for {} tables", gachas.len()));
    }
    Ok(resolve(key, gachas, |gacha: &GachaDef| vec![gacha.name.clone()])?)
}

fn gacha_command(ctx: &Context<'_>, key: &str, rng: &mut RngState) -> anyhow::Result<String> {
    let cards = load_cards(ctx.paths)?;
    let gachas = load_gachas(ctx.paths)?;
    let gacha = find_gacha(&gachas, key)?;
    let pulled = gacha.simulate(&cards, rng)?;
    if ctx.json {
        return to_json(&pulled);
    }
    let mut out = format!("{}\n", gacha.name);
    for card in pulled {
        out.push_str(&format!("[{}] {}\n", card.rarity, card.title(ctx.locale)));
    }
    Ok(out)
}

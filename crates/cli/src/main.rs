mod commands;

use commands::{parse_command, run_command, Command};
use compass_core::{Locale, RngState};
use compass_data::{locale_from_env, normalize_locale, DataPaths};
use std::path::PathBuf;
use tracing::debug;

const USAGE: &str = "\
usage: compass [--data DIR] [--lang TAG] [--seed N] [--json] <command> [args]

commands:
  card <names...> [--level N]        one card in detail, or a deck of up to 4
  deck [--random] [--season] [--no-normal] [--no-collabo]
       [--attribute A]... [--rarity R]... [--level N]
                                     random deck of 4 cards
  hero <name>                        hero details
  stage <name>                       stage details
  stage-gacha [--number 2|3]         random official stage
  roulette [--no-original] [--no-collabo] [--role R]...
                                     random hero
  gacha <index|name>                 simulate one pull
  gacha-list                         list gacha tables
  team [--number N] <members...>     split members into teams
  divide                             cards grouped by category
";

#[derive(Debug, Clone)]
struct CliOptions {
    data: Option<PathBuf>,
    locale: Locale,
    seed: Option<u64>,
    json: bool,
    rest: Vec<String>,
}

fn parse_cli_options(args: &[String]) -> Result<CliOptions, String> {
    let mut data = None;
    let mut locale = None;
    let mut seed = None;
    let mut json = false;
    let mut rest = Vec::new();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--data" | "-d" => {
                let value = args.get(idx + 1).ok_or("--data needs a directory")?;
                data = Some(PathBuf::from(value));
                idx += 1;
            }
            "--lang" | "-l" => {
                let value = args.get(idx + 1).ok_or("--lang needs a locale tag")?;
                locale = Some(normalize_locale(Some(value.as_str())));
                idx += 1;
            }
            "--seed" => {
                let value = args.get(idx + 1).ok_or("--seed needs a number")?;
                seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("invalid seed '{value}'"))?,
                );
                idx += 1;
            }
            "--json" => json = true,
            other => rest.push(other.to_string()),
        }
        idx += 1;
    }
    Ok(CliOptions {
        data,
        locale: locale.unwrap_or_else(locale_from_env),
        seed,
        json,
        rest,
    })
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    let command = match parse_command(&options.rest) {
        Ok(Command::Help) => {
            print!("{USAGE}");
            return;
        }
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err:#}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    let paths = options
        .data
        .clone()
        .map(DataPaths::new)
        .unwrap_or_else(DataPaths::from_env);
    let mut rng = options
        .seed
        .map(RngState::from_seed)
        .unwrap_or_else(RngState::from_entropy);
    debug!(seed = rng.seed(), locale = %options.locale, data = %paths.root().display(), "options");

    let ctx = commands::Context {
        paths: &paths,
        locale: options.locale,
        json: options.json,
    };
    match run_command(&ctx, &command, &mut rng) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn global_flags_are_pulled_out_of_the_command() {
        let options = parse_cli_options(&args(&[
            "card", "--seed", "7", "アルト", "--lang", "en-US", "--json", "--level", "60",
        ]))
        .expect("options");
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.locale, Locale::AmericanEnglish);
        assert!(options.json);
        assert_eq!(options.rest, args(&["card", "アルト", "--level", "60"]));
    }

    #[test]
    fn missing_flag_values_are_errors() {
        assert!(parse_cli_options(&args(&["--seed"])).is_err());
        assert!(parse_cli_options(&args(&["--seed", "x"])).is_err());
        assert!(parse_cli_options(&args(&["--data"])).is_err());
    }
}

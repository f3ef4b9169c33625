use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use lexicon_i18n::{Config, I18n, TranslateOptions, Translation};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("lexicon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Look up a translation key in translation files")
        .arg(
            Arg::new("key")
                .help("Translation key, e.g. app.menu.open")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .short('d')
                .help("Directory to search for translation files (repeatable)")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file with lexicon options")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("locale")
                .long("locale")
                .short('l')
                .help("Locale to translate to (default: from config, else en)"),
        )
        .arg(
            Arg::new("fallback")
                .long("fallback")
                .short('f')
                .help("Locale to try when the key is missing"),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .short('c')
                .help("Count used to select a plural form")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("default")
                .long("default")
                .help("Text to print when the key is not found"),
        )
        .arg(
            Arg::new("var")
                .long("var")
                .help("Placeholder value as NAME=VALUE (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Translation file format")
                .value_parser(["json", "toml", "yml", "yaml"]),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on missing translations, placeholders and plural forms")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the result as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log how the key is resolved")
                .action(ArgAction::SetTrue),
        )
}

fn parse_var(var: &str) -> anyhow::Result<(&str, &str)> {
    match var.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("invalid --var '{}', expected NAME=VALUE", var),
    }
}

fn build_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(dirs) = matches.get_many::<PathBuf>("dir") {
        config.load_path.extend(dirs.cloned());
    }
    if let Some(locale) = matches.get_one::<String>("locale") {
        config.locale = locale.clone();
    }
    if let Some(fallback) = matches.get_one::<String>("fallback") {
        config.fallback = fallback.clone();
    }
    if let Some(format) = matches.get_one::<String>("format") {
        config.file_format = format.clone();
    }
    if matches.get_flag("strict") {
        config.set_strict(true);
    }
    Ok(config)
}

fn build_options(matches: &ArgMatches) -> anyhow::Result<TranslateOptions> {
    let mut options = TranslateOptions::new();
    if let Some(count) = matches.get_one::<i64>("count") {
        options = options.with_count(*count);
    }
    if let Some(default) = matches.get_one::<String>("default") {
        options = options.with_default(default);
    }
    if let Some(vars) = matches.get_many::<String>("var") {
        for var in vars {
            let (name, value) = parse_var(var)?;
            options = options.with_value(name, value);
        }
    }
    Ok(options)
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let key = matches
        .get_one::<String>("key")
        .context("missing translation key")?;
    let config = build_config(&matches)?;
    let options = build_options(&matches)?;

    tracing::debug!(
        "resolving '{}' for locale '{}' (fallback '{}') in {:?}",
        key,
        config.locale,
        config.fallback,
        config.load_path
    );

    let mut i18n = I18n::new();
    i18n.with_config(config);
    let translation = i18n
        .resolve(key, &options)
        .with_context(|| format!("failed to resolve '{}'", key))?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&translation)?);
        return Ok(());
    }
    match &translation {
        Translation::Text(text) => println!("{}", text),
        Translation::List(items) => {
            for item in items {
                match item.as_str() {
                    Some(text) => println!("{}", text),
                    None => println!("{}", serde_json::to_string(item)?),
                }
            }
        }
    }
    Ok(())
}

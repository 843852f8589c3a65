//! # wikterm
//!
//! Read Wiktionary and Wikipedia pages in the terminal.
//!
//! ## Usage
//!
//! Show the outline of a page:
//! ```sh
//! wikterm dict en cat
//! ```
//!
//! Print a section by path:
//! ```sh
//! wikterm dict en cat English.Noun
//! ```
//!
//! Print every part of speech:
//! ```sh
//! wikterm dict en cat English.defs
//! ```

mod cli;

use chrono::Local;
use clap::Parser as ClapParser;
use cli::Cli;
use color_eyre::Result;
use std::process;
use unicode_width::UnicodeWidthStr;
use wikterm::lang::{Language, SUPPORTED};
use wikterm::lookup::{Lookup, LookupPolicy};
use wikterm::render::{RenderOptions, render_section_titled, render_structure};
use wikterm::source::{Page, PageCache, SearchHistory, Site, WikiApi};
use wikterm::{Config, query};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    init_logging(args.verbose);

    let mut config = Config::load();
    apply_overrides(&mut config, &args);

    if args.list_searches {
        return print_searches();
    }
    if args.list_pages {
        return print_pages(&config);
    }

    // clap requires all three unless a list flag was given
    let (Some(mode), Some(lang), Some(title)) = (args.mode, &args.language, &args.title) else {
        eprintln!("Error: mode, language and title are required");
        eprintln!("\nUsage: wikterm [OPTIONS] <MODE> <LANGUAGE> <TITLE> [PATH]");
        process::exit(1);
    };

    let Some(language) = Language::lookup(lang) else {
        eprintln!("Unsupported language: \"{}\"", lang);
        eprintln!("Supported languages:");
        for supported in SUPPORTED {
            eprintln!("  {}\t{}", supported.code, supported.english_name);
        }
        process::exit(1);
    };

    let site = mode.site();
    let api = WikiApi::new(
        language.code,
        site,
        &config.wiki.user_agent,
        config.search_limit(),
    )?;
    let lookup = build_lookup(api, language, site, &config, args.force_web);

    if args.search {
        let titles = lookup.search(title)?;
        if titles.is_empty() {
            eprintln!("No results for '{}'.", title);
            process::exit(1);
        }
        for found in titles {
            println!("{}", found);
        }
        return Ok(());
    }

    let Some(page) = lookup.page(title)? else {
        eprintln!(
            "Cannot find a {} entry for '{}' in {}.",
            site, title, language.english_name
        );
        process::exit(1);
    };

    let options = config.render_options();
    match args.path.as_deref() {
        None => print_page(&page, args.raw, &options),
        Some(path) => print_sections(&page, path, language, &config, args.raw, &options),
    }

    Ok(())
}

/// Warnings by default, lookup progress with `--verbose`. `RUST_LOG` wins.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,wikterm=info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn apply_overrides(config: &mut Config, args: &Cli) {
    if args.compact {
        config.render.compact = true;
    }
    if args.quotes {
        config.render.show_quotations = true;
    }
    if let Some(color) = args.color {
        config.render.color = color.into();
    }
}

fn build_lookup(
    api: WikiApi,
    language: &Language,
    site: Site,
    config: &Config,
    force_web: bool,
) -> Lookup<WikiApi> {
    let mut lookup = Lookup::new(api, language.code, site).with_policy(LookupPolicy {
        save_pages: config.cache.save_pages,
        use_saved_pages: config.cache.use_saved_pages,
        save_searches: config.cache.save_searches,
        force_web,
    });

    match config.expiration() {
        Ok(expiration) => match PageCache::default_dir() {
            Ok(dir) => lookup = lookup.with_cache(PageCache::new(dir, expiration)),
            Err(err) => log::warn!("page cache disabled: {}", err),
        },
        Err(err) => eprintln!("Warning: {} (page cache disabled)", err),
    }

    match SearchHistory::default_path() {
        Ok(path) => lookup = lookup.with_history(SearchHistory::new(path)),
        Err(err) => log::warn!("search history disabled: {}", err),
    }

    lookup
}

fn print_searches() -> Result<()> {
    let history = SearchHistory::new(SearchHistory::default_path()?);
    for record in history.list()? {
        println!(
            "{}  {} {}  {}",
            record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            record.site,
            record.language,
            record.text
        );
    }
    Ok(())
}

fn print_pages(config: &Config) -> Result<()> {
    // Expiration only matters for loading; listing shows everything.
    let expiration = config.expiration().unwrap_or_default();
    let cache = PageCache::new(PageCache::default_dir()?, expiration);
    let saved = cache.list()?;

    let name_width = saved
        .iter()
        .map(|entry| entry.name.width())
        .max()
        .unwrap_or(0);

    for entry in saved {
        let padding = " ".repeat(name_width - entry.name.width());
        println!(
            "{}  {} {}  {}{}  {}",
            entry.saved_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            entry.page.site,
            entry.page.language,
            entry.name,
            padding,
            entry.page.title
        );
    }
    Ok(())
}

/// Without a path: the outline, or the whole page with `--raw`.
fn print_page(page: &Page, raw: bool, options: &RenderOptions) {
    if raw {
        println!("{}", page.text);
    } else {
        println!("{}", render_structure(&page.sections(), options));
    }
}

fn print_sections(
    page: &Page,
    path: &str,
    language: &Language,
    config: &Config,
    raw: bool,
    options: &RenderOptions,
) {
    let root = page.sections();
    let result = match query::execute(&root, path, &config.query.path_separator, Some(language)) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Invalid section path '{}': {}", path, err);
            process::exit(1);
        }
    };

    if result.is_empty() {
        eprintln!("No section '{}'.", path);
        process::exit(1);
    }

    let blocks: Vec<String> = result
        .matches
        .iter()
        .map(|found| {
            if result.structure_only {
                render_structure(found.section, options)
            } else if raw {
                found.section.content().trim_end().to_string()
            } else {
                render_section_titled(found.section, &found.title, language.code, options)
            }
        })
        .collect();

    println!("{}", blocks.join("\n\n"));
}

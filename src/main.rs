//! Bindings inspector: load section files, resolve, print the result

use anyhow::{Context, Result};
use clap::Parser;

use keystack::cli::CliArgs;
use keystack::keybind::{load_sections_file, normalize_key};
use keystack::{AppInputConfig, InputConfigStore};

fn main() -> Result<()> {
    keystack::tracing::init();
    let args = CliArgs::parse();

    let store = InputConfigStore::new();
    let mut last_section: Option<String> = None;

    for path in &args.files {
        let sections = load_sections_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        for section in sections {
            let name = section.name.clone();
            store.stack().define_section(section);
            store.stack().set_enabled(&name, false);
            last_section = Some(name);
        }
    }

    if args.exclusive_last {
        if let Some(name) = &last_section {
            store.stack().set_enabled(name, true);
        }
    }

    let config = store.rebuild();
    print_candidates(&config, args.all);

    if !args.query.is_empty() {
        println!();
        for raw in &args.query {
            print_lookup(&config, raw);
        }
    }

    Ok(())
}

fn print_candidates(config: &AppInputConfig, show_all: bool) {
    println!(
        "{} candidates, {} resolved keys ({} synthesized)",
        config.candidate_count(),
        config.resolved_count(),
        config.synthesized().len()
    );

    for (idx, binding) in config.candidates().iter().enumerate() {
        if !binding.is_enabled && !show_all {
            continue;
        }
        let editable = if config.is_default_section_index(idx) {
            "*"
        } else {
            " "
        };
        let state = if binding.is_enabled { "on " } else { "off" };
        let message = binding
            .display_message
            .as_deref()
            .map(|m| format!("  ({})", m))
            .unwrap_or_default();
        println!(
            "{:>4} {} [{}] {:<20} {:<24} {}{}",
            idx,
            editable,
            state,
            binding.mapping.raw_key,
            binding.normalized_key(),
            binding.mapping.action_string(),
            message
        );
    }
}

fn print_lookup(config: &AppInputConfig, raw: &str) {
    let key = normalize_key(raw);
    match config.lookup(&key) {
        Some(binding) => println!(
            "{} -> {} (section \"{}\", {})",
            key,
            binding.mapping.action_string(),
            binding.source_section,
            binding.origin.label()
        ),
        None => println!("{} -> (unbound)", key),
    }
}

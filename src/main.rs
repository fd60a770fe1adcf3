use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

mod cli;
mod config;

use cli::Cli;
use cli::commands::{Commands, ModeKind, Switch};
use cli::render;
use config::Config;
use playlistr::catalog::Catalog;
use playlistr::domain::{Content, normalize_name, random_color};
use playlistr::engine::ComputeOptions;
use playlistr::storage::{CatalogStore, JsonFileStore, read_content_list};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("playlistr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("playlistr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

fn load_catalog(store: &impl CatalogStore) -> Result<Catalog> {
    store.load().context("Failed to restore catalog")
}

fn save_catalog(store: &impl CatalogStore, catalog: &Catalog) -> Result<()> {
    store.save(catalog).context("Failed to save catalog")
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let state_file = cli.state.as_ref().unwrap_or(&config.storage.state_file);
    let store = JsonFileStore::new(state_file);
    info!("Using state file: {}", store.path().display());

    match &cli.command {
        None | Some(Commands::List) => handle_list_command(&store),
        Some(Commands::Add {
            name,
            duration,
            saturation,
            color,
        }) => handle_add_command(&store, name, *duration, *saturation, color.as_deref()),
        Some(Commands::Edit {
            name,
            duration,
            saturation,
        }) => handle_edit_command(&store, name, *duration, *saturation),
        Some(Commands::Rename { old, new }) => handle_rename_command(&store, old, new),
        Some(Commands::Remove { name }) => handle_remove_command(&store, name),
        Some(Commands::Link { a, b }) => handle_link_command(&store, a, b, true),
        Some(Commands::Unlink { a, b }) => handle_link_command(&store, a, b, false),
        Some(Commands::Mode { kind, switch }) => handle_mode_command(&store, *kind, *switch),
        Some(Commands::Compute {
            seed,
            budget,
            input,
            json,
        }) => handle_compute_command(&store, config, *seed, *budget, input.as_deref(), *json, cli.is_verbose()),
        Some(Commands::Graph { json }) => handle_graph_command(&store, *json),
    }
}

fn handle_list_command(store: &impl CatalogStore) -> Result<()> {
    let catalog = load_catalog(store)?;
    print_lines(render::catalog_lines(&catalog));
    Ok(())
}

fn handle_add_command(
    store: &impl CatalogStore,
    name: &str,
    duration: f64,
    saturation: u32,
    color: Option<&str>,
) -> Result<()> {
    info!("Adding content {} (duration {}, saturation {})", name, duration, saturation);
    let mut catalog = load_catalog(store)?;

    let color = match color {
        Some(c) => c.to_string(),
        None => random_color(&mut rand::rng()),
    };
    let content = Content::new(name, duration, saturation).with_color(color);
    let added = content.name.clone();

    catalog.add(content)?;
    save_catalog(store, &catalog)?;

    println!("{} {}", "Added:".green(), added);
    Ok(())
}

fn handle_edit_command(
    store: &impl CatalogStore,
    name: &str,
    duration: Option<f64>,
    saturation: Option<u32>,
) -> Result<()> {
    info!("Editing content {}: duration {:?}, saturation {:?}", name, duration, saturation);
    let mut catalog = load_catalog(store)?;
    catalog.edit(name, duration, saturation)?;
    save_catalog(store, &catalog)?;

    println!("{} {}", "Updated:".green(), normalize_name(name));
    Ok(())
}

fn handle_rename_command(store: &impl CatalogStore, old: &str, new: &str) -> Result<()> {
    info!("Renaming content {} to {}", old, new);
    let mut catalog = load_catalog(store)?;
    catalog.rename(old, new)?;
    save_catalog(store, &catalog)?;

    println!("{} {} -> {}", "Renamed:".green(), normalize_name(old), normalize_name(new));
    Ok(())
}

fn handle_remove_command(store: &impl CatalogStore, name: &str) -> Result<()> {
    info!("Removing content {}", name);
    let mut catalog = load_catalog(store)?;
    let removed = catalog.remove(name)?;
    save_catalog(store, &catalog)?;

    println!("{} {}", "Removed:".red(), removed.name);
    Ok(())
}

fn handle_link_command(store: &impl CatalogStore, a: &str, b: &str, link: bool) -> Result<()> {
    info!("{} {} and {}", if link { "Linking" } else { "Unlinking" }, a, b);
    let mut catalog = load_catalog(store)?;
    let (name_a, name_b) = (normalize_name(a), normalize_name(b));

    if link {
        catalog.link(a, b)?;
        println!("{} {} -- {}", "Separated:".green(), name_a, name_b);
    } else if catalog.unlink(a, b)? {
        println!("{} {} -- {}", "Unlinked:".yellow(), name_a, name_b);
    } else {
        println!("{} {} and {} were not separated", "Unchanged:".dimmed(), name_a, name_b);
    }

    save_catalog(store, &catalog)
}

fn handle_mode_command(store: &impl CatalogStore, kind: ModeKind, switch: Switch) -> Result<()> {
    info!("Setting {:?} separation {:?}", kind, switch);
    let mut catalog = load_catalog(store)?;
    catalog.set_mode(kind.into(), switch.is_on());
    save_catalog(store, &catalog)?;

    print_lines(render::catalog_lines(&catalog).into_iter().take(1).collect());
    Ok(())
}

/// Build a catalog from a bare content list, keeping the stored modes.
fn import_catalog(path: &Path, stored: &Catalog) -> Result<Catalog> {
    let contents = read_content_list(path).context(format!("Failed to read contents from {}", path.display()))?;
    Ok(Catalog::import(contents, stored.modes, &mut rand::rng())?)
}

fn handle_compute_command(
    store: &impl CatalogStore,
    config: &Config,
    seed: Option<u64>,
    budget: Option<u32>,
    input: Option<&Path>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let mut catalog = load_catalog(store)?;
    if let Some(path) = input {
        catalog = import_catalog(path, &catalog)?;
    }

    let retry_budget = budget.unwrap_or(config.engine.retry_budget);
    if retry_budget == 0 {
        eyre::bail!("--budget must be > 0");
    }

    let options = ComputeOptions {
        seed: seed.or(config.engine.seed),
        ..ComputeOptions::default().with_retry_budget(retry_budget)
    };
    let summary = catalog.compute(options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_lines(render::summary_lines(&summary, verbose));
    }
    Ok(())
}

fn handle_graph_command(store: &impl CatalogStore, json: bool) -> Result<()> {
    let catalog = load_catalog(store)?;
    let view = catalog.adjacency_view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_lines(render::graph_lines(&view));
    }
    Ok(())
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}

//! Tolvu-Catalog main entry point
//!
//! This is the command-line interface for browsing the shop catalog and
//! putting together a PC build.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tolvu_catalog::builder::{BuildSelection, BuildSlot, Builder, DriveKind};
use tolvu_catalog::catalog::{Catalog, ExtractMode, LazyProduct};
use tolvu_catalog::config::{load_config_with_hash, Config};
use tolvu_catalog::output::write_report;
use tolvu_catalog::prompt::{Choice, Prompt, PASSWORD_ENV};
use tolvu_catalog::CatalogError;
use tracing_subscriber::EnvFilter;

/// Tolvu-Catalog: a catalog client for a server-rendered web shop
///
/// Logs into the shop, lists categories and products, and walks through
/// picking the parts for a PC build.
#[derive(Parser, Debug)]
#[command(name = "tolvu-catalog")]
#[command(version)]
#[command(about = "Web shop catalog client and PC build helper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Shop account name (prompted for if omitted)
    #[arg(short, long)]
    user: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the category tree
    Categories,

    /// List the products in a category, cheapest first
    List {
        category: String,
        subcategory: String,
        subsubcategory: Option<String>,

        /// Load every product's detail page
        #[arg(long)]
        full: bool,
    },

    /// Search the shop
    Search {
        query: String,

        /// Load every product's detail page
        #[arg(long)]
        full: bool,
    },

    /// Pick the parts for a PC build and write a price report
    Build {
        /// Report path (defaults to output.report-path)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let mut prompt = Prompt::stdio();
    let username = match cli.user {
        Some(user) => user,
        None => prompt.text("Notendanafn: ")?,
    };
    let password = match std::env::var(PASSWORD_ENV) {
        Ok(password) => password,
        Err(_) => {
            tracing::warn!("{} is not set, reading the password from stdin", PASSWORD_ENV);
            prompt.password("Lykilorð: ")?
        }
    };

    let catalog = Catalog::connect(&config, &username, &password)
        .await
        .map_err(report_error)?;

    let result = match cli.command {
        Command::Categories => {
            print_categories(&catalog);
            Ok(())
        }
        Command::List {
            category,
            subcategory,
            subsubcategory,
            full,
        } => {
            let products = catalog
                .list_products(&category, &subcategory, subsubcategory.as_deref(), mode(full))
                .await;
            products.map(|p| print_products(&p))
        }
        Command::Search { query, full } => catalog
            .search(&query, mode(full))
            .await
            .map(|p| print_products(&p)),
        Command::Build { out } => {
            let out = out.unwrap_or_else(|| PathBuf::from(&config.output.report_path));
            handle_build(Builder::new(catalog), &mut prompt, out).await
        }
    };

    result.map_err(report_error)?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tolvu_catalog=info,warn"),
            1 => EnvFilter::new("tolvu_catalog=debug,info"),
            2 => EnvFilter::new("tolvu_catalog=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn report_error(e: CatalogError) -> anyhow::Error {
    tracing::error!("{}", e);
    anyhow::anyhow!(e.user_message())
}

fn mode(full: bool) -> ExtractMode {
    if full {
        ExtractMode::Full
    } else {
        ExtractMode::Quick
    }
}

fn print_categories(catalog: &Catalog) {
    for category in catalog.categories().categories() {
        println!("{}", category.name);
        for sub in &category.subcategories {
            println!("  {}", sub.name);
            for child in &sub.children {
                println!("    {}", child);
            }
        }
    }
}

fn print_products(products: &[LazyProduct]) {
    for (i, product) in products.iter().enumerate() {
        match product.details() {
            Some(details) => println!(
                "{} - {} - {} / {} kr. [{}] {}",
                i + 1,
                product.name(),
                details.discount_price,
                details.common_price,
                details.catalog_no,
                product.url()
            ),
            None => println!("{} - {} {}", i + 1, product, product.url()),
        }
    }
    println!("\n{} products", products.len());
}

/// Walks the user through every build slot, then writes the report
async fn handle_build<R: BufRead, W: Write>(
    builder: Builder,
    prompt: &mut Prompt<R, W>,
    out: PathBuf,
) -> Result<(), CatalogError> {
    let mut selection = BuildSelection::new();

    let sockets = builder.sockets()?;
    let socket = pick_name(prompt, "Veldu sökkul:", &sockets)?;
    let cpus = builder.cpus(socket).await?;
    pick_product(prompt, &mut selection, BuildSlot::Cpu, "Veldu örgjörva:", cpus).await?;
    let boards = builder.motherboards(socket).await?;
    pick_product(prompt, &mut selection, BuildSlot::Motherboard, "Veldu móðurborð:", boards).await?;

    let ram_types = builder.ram_types()?;
    let ram_type = pick_name(prompt, "Veldu gerð vinnsluminnis:", &ram_types)?;
    let memory = builder.memory(ram_type).await?;
    pick_product(prompt, &mut selection, BuildSlot::Memory, "Veldu vinnsluminni:", memory).await?;

    let kinds = [DriveKind::Ssd, DriveKind::Hdd];
    let kind = pick_name(prompt, "Veldu gerð disks:", &kinds)?;
    let drives = builder.storage(&kind.to_string()).await?;
    pick_product(prompt, &mut selection, BuildSlot::Storage, "Veldu disk:", drives).await?;

    let cases = builder.cases().await?;
    pick_product(prompt, &mut selection, BuildSlot::Case, "Veldu kassa:", cases).await?;
    let psus = builder.psus().await?;
    pick_product(prompt, &mut selection, BuildSlot::Psu, "Veldu aflgjafa:", psus).await?;
    let systems = builder.operating_systems().await?;
    pick_product(prompt, &mut selection, BuildSlot::Os, "Veldu stýrikerfi:", systems).await?;

    selection.ensure_full().await?;
    write_report(&selection, &out)?;

    let totals = selection.totals()?;
    prompt.show(&format!(
        "\nSamtals: {} kr. (fullt verð {} kr.)\nSkýrsla: {}",
        totals.discount,
        totals.common,
        out.display()
    ))?;
    Ok(())
}

/// Picks one of a list of plain names; `?N` just echoes the name
fn pick_name<'a, T: std::fmt::Display, R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    question: &str,
    options: &'a [T],
) -> Result<&'a T, CatalogError> {
    loop {
        match prompt.ask(question, options)? {
            Choice::Selected(i) => return Ok(&options[i]),
            Choice::Details(i) => prompt.show(&options[i].to_string())?,
        }
    }
}

/// Picks a product for `slot`; `?N` loads and shows its details first
async fn pick_product<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    selection: &mut BuildSelection,
    slot: BuildSlot,
    question: &str,
    options: Vec<LazyProduct>,
) -> Result<(), CatalogError> {
    loop {
        match prompt.ask(question, &options)? {
            Choice::Selected(i) => {
                selection.set(slot, options[i].clone());
                return Ok(());
            }
            Choice::Details(i) => {
                let product = &options[i];
                let description = product.description().await?;
                prompt.show(&format!("\n{}\n{}\n{}", product, description, product.url()))?;
            }
        }
    }
}

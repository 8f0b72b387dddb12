//! Geodir CLI - serve and query the company/location directory

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use geodir::config::{self, GeodirConfig};
use geodir::output::{emit_json, OutputMode};
use geodir::query::{CompanyQuery, FilterEngine};
use geodir::storage::DatasetStore;
use geodir::ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "geodir")]
#[command(version)]
#[command(about = "Read-only query service over company and location datasets")]
#[command(long_about = r#"
Geodir loads a companies CSV and a locations CSV once and answers:
  • Company listing filtered by name or by distance from a point
  • Company lookup by id
  • Locations of a company

Example usage:
  geodir serve --companies data/companies.csv --locations data/locations.csv
  geodir companies --latitude 40.71 --longitude -74.0 --radius 25
  geodir locations 1
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    sources: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Path to the companies CSV
    #[arg(long, global = true)]
    companies: Option<String>,

    /// Path to the locations CSV
    #[arg(long, global = true)]
    locations: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the datasets and serve the HTTP API
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,

        /// Radius in kilometers when a center is given without one
        #[arg(long)]
        radius: Option<f64>,

        /// Report an unknown company separately from a company without locations
        #[arg(long)]
        strict_locations: bool,
    },

    /// Show statistics about the loaded datasets
    Stats,

    /// List companies, optionally filtered by name or distance
    Companies {
        /// Case-insensitive name substring (takes precedence over the radius search)
        #[arg(short, long)]
        name: Option<String>,

        /// Latitude of the search center
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,

        /// Longitude of the search center
        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,

        /// Search radius in kilometers
        #[arg(short, long)]
        radius: Option<f64>,
    },

    /// Show a single company
    Company {
        /// Company id
        #[arg(allow_hyphen_values = true)]
        id: i64,
    },

    /// List the locations of a company
    Locations {
        /// Company id
        #[arg(allow_hyphen_values = true)]
        company_id: i64,

        /// Report an unknown company separately from a company without locations
        #[arg(long)]
        strict: bool,
    },

    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let output_mode = OutputMode::from_flag(cli.json);
    let file_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let cli_config = GeodirConfig {
        companies: cli.sources.companies,
        locations: cli.sources.locations,
        ..GeodirConfig::default()
    };

    match cli.command {
        Commands::Serve { host, port, radius, strict_locations } => {
            let config = GeodirConfig {
                host,
                port,
                default_radius_km: radius,
                strict_locations: strict_locations.then_some(true),
                ..cli_config
            }
            .or(file_config);

            ui::header("Loading datasets");
            let store = Arc::new(load_store(&config)?);
            ui::success(&format!(
                "Loaded {} companies and {} locations",
                store.all_companies().len(),
                store.all_locations().len()
            ));

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(geodir::server::start_server(&config, store))?;
        }

        Commands::Stats => {
            let config = cli_config.or(file_config);
            let store = load_store(&config)?;
            let stats = store.stats();

            if output_mode.is_human() {
                ui::section("Dataset Statistics");
                ui::info("Companies", &config.companies_path().display().to_string());
                ui::info("Locations", &config.locations_path().display().to_string());
                println!("{}", ui::stats_table(&stats));
                if stats.orphan_locations > 0 {
                    ui::warn(&format!(
                        "{} locations reference a company that does not exist",
                        stats.orphan_locations
                    ));
                }
            } else {
                emit_json("stats", &stats)?;
            }
        }

        Commands::Companies { name, latitude, longitude, radius } => {
            let config = cli_config.or(file_config);
            let store = load_store(&config)?;
            let engine = FilterEngine::new(&store).with_default_radius(config.radius_km());

            let query = CompanyQuery { name, latitude, longitude, radius };
            let filter = query.filter(config.radius_km())?;
            let companies = engine.apply(&filter);

            if output_mode.is_human() {
                ui::section(&format!("Companies ({})", filter));
                if companies.is_empty() {
                    ui::output::empty("No companies found.");
                }
                for company in &companies {
                    ui::output::company(company);
                }
            } else {
                emit_json("companies", &companies)?;
            }
        }

        Commands::Company { id } => {
            let config = cli_config.or(file_config);
            let store = load_store(&config)?;
            let company = FilterEngine::new(&store).find_company_by_id(id)?;

            if output_mode.is_human() {
                ui::output::company(company);
            } else {
                emit_json("company", company)?;
            }
        }

        Commands::Locations { company_id, strict } => {
            let config = GeodirConfig {
                strict_locations: strict.then_some(true),
                ..cli_config
            }
            .or(file_config);
            let store = load_store(&config)?;
            let locations = FilterEngine::new(&store)
                .with_locations_policy(config.locations_policy())
                .find_locations_by_company_id(company_id)?;

            if output_mode.is_human() {
                ui::section(&format!("Locations of company {}", company_id));
                if locations.is_empty() {
                    ui::output::empty("Company has no locations.");
                }
                for location in &locations {
                    ui::output::location(location);
                }
            } else {
                emit_json("locations", &locations)?;
            }
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &GeodirConfig::starter(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}

fn load_store(config: &GeodirConfig) -> anyhow::Result<DatasetStore> {
    let companies = config.companies_path();
    let locations = config.locations_path();
    tracing::info!("Loading {} and {}", companies.display(), locations.display());
    Ok(DatasetStore::load(&companies, &locations)?)
}

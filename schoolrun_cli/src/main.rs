use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{
    config::Config, dashboard::DashboardArgs, format::FormatSubcommands,
    generate::GenerateSubcommands, geocode::GeocodeArgs, route::RouteArgs, track::TrackArgs,
};

mod config;
mod dashboard;
mod format;
mod generate;
mod geocode;
mod parsers;
mod route;
mod track;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, global = true)]
    debug: bool,

    /// Seed for the random jitter, overrides SCHOOLRUN_SEED
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a place name or postcode to a coordinate
    Geocode {
        #[command(flatten)]
        args: GeocodeArgs,
    },
    /// Directions between two places
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
    Format {
        #[command(subcommand)]
        commands: FormatSubcommands,
    },
    /// Simulate the live position of a bus
    Track {
        #[command(flatten)]
        args: TrackArgs,
    },
    Dashboard {
        #[command(flatten)]
        args: DashboardArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = Config::from_env()?.with_seed(cli.seed);

    match cli.command {
        Some(Commands::Geocode { args }) => geocode::run(&config, args)?,
        Some(Commands::Route { args }) => route::run(&config, args)?,
        Some(Commands::Format { commands }) => format::run(commands),
        Some(Commands::Track { args }) => track::run(&config, args).await?,
        Some(Commands::Dashboard { args }) => dashboard::run(&config, args)?,
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => {}
    }

    Ok(())
}

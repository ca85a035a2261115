use clap::Subcommand;
use schoolrun_routing::{format_distance, format_duration};

use crate::parsers;

#[derive(Subcommand)]
pub enum FormatSubcommands {
    /// Format meters, e.g. "1.5 km"
    Distance {
        #[arg(value_parser = parsers::parse_non_negative)]
        meters: f64,
    },
    /// Format seconds, e.g. "1 hr 5 min"
    Duration {
        #[arg(value_parser = parsers::parse_non_negative)]
        seconds: f64,
    },
}

pub fn run(subcommand: FormatSubcommands) {
    match subcommand {
        FormatSubcommands::Distance { meters } => println!("{}", format_distance(meters)),
        FormatSubcommands::Duration { seconds } => println!("{}", format_duration(seconds)),
    }
}

use clap::Args;
use schoolrun_routing::GeocodeMatch;
use tracing::info;

use crate::config::Config;

#[derive(Args)]
pub struct GeocodeArgs {
    /// Place name, alias or postcode
    text: String,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(config: &Config, args: GeocodeArgs) -> Result<(), anyhow::Error> {
    let router = config.router()?;
    let geocoded = router.geocode(&args.text)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&geocoded)?);
        return Ok(());
    }

    let matched = match &geocoded.matched {
        GeocodeMatch::Exact { place } => format!("exact match \"{}\"", place),
        GeocodeMatch::Fuzzy { place, key, score } => {
            format!("fuzzy match \"{}\" via \"{}\" ({:.2})", place, key, score)
        }
        GeocodeMatch::Fallback => "no match, default location".to_string(),
    };
    info!("{}", matched);
    println!("{:.6}, {:.6}", geocoded.point.lat, geocoded.point.lng);

    Ok(())
}

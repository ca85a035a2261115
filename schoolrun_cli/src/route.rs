use clap::Args;
use comfy_table::Table;
use schoolrun_routing::{
    RouteOptions, RoutePreference, RouteResponse, TravelProfile, format_distance, format_duration,
};
use tracing::info;

use crate::config::Config;

#[derive(Args)]
pub struct RouteArgs {
    #[arg(short, long)]
    from: String,

    #[arg(short, long)]
    to: String,

    /// fastest, shortest or recommended
    #[arg(long, default_value_t = RoutePreference::Recommended)]
    preference: RoutePreference,

    /// driving-car, foot-walking or cycling-regular
    #[arg(long, default_value_t = TravelProfile::DrivingCar)]
    profile: TravelProfile,

    /// Print a GeoJSON feature instead of the directions
    #[arg(long, conflicts_with = "json")]
    geojson: bool,

    /// Print the route result, or the error object, as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(config: &Config, args: RouteArgs) -> Result<(), anyhow::Error> {
    let router = config.router()?;
    let options = RouteOptions {
        preference: args.preference,
        profile: args.profile,
    };
    let result = router.directions(&args.from, &args.to, &options);

    if args.json {
        let response = RouteResponse::from(result);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let route = result?;

    if args.geojson {
        println!("{}", geojson::GeoJson::Feature(route.to_geojson_feature()));
        return Ok(());
    }

    info!(
        "{} -> {}: {}, {} ({})",
        args.from,
        args.to,
        format_distance(route.distance().value()),
        format_duration(route.duration().value()),
        if route.is_predefined() {
            "predefined"
        } else {
            "generated"
        }
    );

    let mut table = Table::new();
    table.set_header(vec!["#", "Instruction", "Distance", "Duration"]);
    for (index, segment) in route.segments().iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            segment.instruction.clone(),
            segment.distance.to_string(),
            segment.duration.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}

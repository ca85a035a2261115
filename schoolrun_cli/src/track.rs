use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use schoolrun_dashboard::{DashboardParams, LiveTracker, SchoolData};
use schoolrun_routing::{format_distance, format_duration};
use tracing::info;

use crate::{config::Config, parsers};

#[derive(Args)]
pub struct TrackArgs {
    #[arg(short, long, default_value = "bus-1")]
    bus: String,

    /// How long to track for (e.g., "10s", "PT1M", "30")
    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "10s")]
    duration: jiff::SignedDuration,

    /// Seconds between position updates
    #[arg(short, long, value_parser = parsers::parse_positive_duration, default_value = "3s")]
    interval: jiff::SignedDuration,
}

pub async fn run(config: &Config, args: TrackArgs) -> Result<(), anyhow::Error> {
    let router = Arc::new(config.router()?);
    let data = SchoolData::mock();

    let bus = data.buses.get_active(&args.bus)?;
    let route_id = bus
        .route_id
        .as_deref()
        .with_context(|| format!("Bus {} has no route", bus.registration))?;
    let route = data.routes.get_active(route_id)?;
    let first_stop = route
        .stops
        .first()
        .with_context(|| format!("Route {} has no stops", route.name))?;
    let origin = router.gazetteer().place(&first_stop.place).map_or_else(
        || router.geocode_point(&first_stop.place),
        |place| Ok(place.point),
    )?;

    info!(
        "Tracking {} ({}) near {} for {}",
        bus.registration,
        route.name,
        first_stop.place,
        format_duration(args.duration.as_secs_f64())
    );

    let params = DashboardParams {
        tracking_interval: args.interval,
        seed: config.seed,
        ..DashboardParams::default()
    };
    let tracker = LiveTracker::start(origin, &params)?;
    let mut positions = tracker.subscribe();

    let deadline = tokio::time::sleep(args.duration.unsigned_abs());
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => break,
            changed = positions.changed() => {
                if changed.is_err() {
                    break;
                }
                let position = *positions.borrow_and_update();
                println!(
                    "{:.6}, {:.6} ({} from {})",
                    position.lat,
                    position.lng,
                    format_distance(position.haversine_distance(&origin).value()),
                    first_stop.place
                );
            }
        }
    }

    tracker.stop();
    Ok(())
}

use std::sync::Arc;

use clap::{Args, ValueEnum};
use comfy_table::Table;
use schoolrun_dashboard::{
    DashboardParams, SchoolData,
    dashboards::{
        admin::AdminDashboard, driver::DriverDashboard, parent::ParentDashboard,
        student::StudentDashboard,
    },
};
use schoolrun_routing::{RouteOptions, Router};

use crate::config::Config;

#[derive(Clone, Copy, ValueEnum)]
pub enum Role {
    Admin,
    Driver,
    Parent,
    Student,
}

#[derive(Args)]
pub struct DashboardArgs {
    role: Role,

    /// Record id of the driver, parent or student
    #[arg(long)]
    id: Option<String>,

    #[arg(long)]
    json: bool,
}

pub fn run(config: &Config, args: DashboardArgs) -> Result<(), anyhow::Error> {
    let router = Arc::new(config.router()?);
    let data = SchoolData::mock().shared();
    let params = DashboardParams {
        seed: config.seed,
        ..DashboardParams::default()
    };
    let options = RouteOptions::default();

    match args.role {
        Role::Admin => {
            let dashboard = AdminDashboard::new(data, &params);
            admin(&dashboard, args.json)
        }
        Role::Driver => {
            let id = args.id.as_deref().unwrap_or("driver-1");
            let dashboard = DriverDashboard::new(data, router, &params, id)?;
            driver(&dashboard, &options, args.json)
        }
        Role::Parent => {
            let id = args.id.as_deref().unwrap_or("parent-1");
            let snapshot = data.read().clone();
            let dashboard = ParentDashboard::new(data, Arc::clone(&router), id)?;
            parent(&dashboard, &snapshot, &router, &options, args.json)
        }
        Role::Student => {
            let id = args.id.as_deref().unwrap_or("student-1");
            let dashboard = StudentDashboard::new(data, router, id)?;
            let overview = dashboard.overview(&options)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
                return Ok(());
            }

            println!("{} ({})", overview.student.name, overview.route_name);
            println!(
                "Bus {} from {} at {}",
                overview
                    .bus
                    .as_ref()
                    .map_or("unassigned", |bus| bus.registration.as_str()),
                overview.stop,
                overview
                    .pickup
                    .map_or_else(|| "-".to_string(), |time| time.strftime("%H:%M").to_string())
            );
            println!("Journey: {}", overview.journey.summary());
            for announcement in &overview.announcements {
                println!("* {}: {}", announcement.title, announcement.body);
            }
            Ok(())
        }
    }
}

fn admin(dashboard: &AdminDashboard, json: bool) -> Result<(), anyhow::Error> {
    let overview = dashboard.overview();
    if json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(());
    }

    let mut summary = Table::new();
    summary.set_header(vec!["Students", "Parents", "Buses", "Drivers", "Routes", "Announcements"]);
    summary.add_row(vec![
        overview.students,
        overview.parents,
        overview.buses,
        overview.drivers,
        overview.routes,
        overview.announcements,
    ]);
    println!("{summary}");

    let mut buses = Table::new();
    buses.set_header(vec!["Bus", "Registration", "Capacity", "Driver", "Route"]);
    for bus in dashboard.buses() {
        buses.add_row(vec![
            bus.id.clone(),
            bus.registration.clone(),
            bus.capacity.to_string(),
            bus.driver_id.clone().unwrap_or_default(),
            bus.route_id.clone().unwrap_or_default(),
        ]);
    }
    println!("{buses}");

    Ok(())
}

fn driver(
    dashboard: &DriverDashboard,
    options: &RouteOptions,
    json: bool,
) -> Result<(), anyhow::Error> {
    let assignment = dashboard.assignment()?;
    let preview = dashboard.route_preview(options)?;

    if json {
        let value = serde_json::json!({
            "assignment": assignment,
            "trip": dashboard.trip(),
            "preview": preview,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "{} drives {} on {} ({})",
        assignment.driver.name,
        assignment.bus.registration,
        assignment.route.name,
        preview.summary()
    );

    let mut stops = Table::new();
    stops.set_header(vec!["#", "Stop", "Pickup"]);
    for (index, stop) in assignment.route.stops.iter().enumerate() {
        stops.add_row(vec![
            (index + 1).to_string(),
            stop.place.clone(),
            stop.pickup.strftime("%H:%M").to_string(),
        ]);
    }
    println!("{stops}");

    Ok(())
}

fn parent(
    dashboard: &ParentDashboard,
    data: &SchoolData,
    router: &Router,
    options: &RouteOptions,
    json: bool,
) -> Result<(), anyhow::Error> {
    let children = dashboard.children()?;

    let mut rows = Vec::with_capacity(children.len());
    for child in &children {
        // The bus is assumed to be at the first stop of its route.
        let start = data
            .routes
            .get_active(&child.student.route_id)
            .ok()
            .and_then(|route| route.stops.first())
            .and_then(|stop| router.gazetteer().place(&stop.place))
            .map(|place| place.point);
        let eta = match start {
            Some(start) => Some(dashboard.eta(&child.student.id, &start, options)?),
            None => None,
        };
        rows.push((child, eta));
    }

    if json {
        let value: Vec<_> = rows
            .iter()
            .map(|(child, eta)| serde_json::json!({ "child": child, "eta": eta }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Child", "Bus", "Stop", "Pickup", "ETA"]);
    for (child, eta) in rows {
        table.add_row(vec![
            child.student.name.clone(),
            child
                .bus
                .as_ref()
                .map_or_else(String::new, |bus| bus.registration.clone()),
            child.stop.clone(),
            child
                .pickup
                .map_or_else(String::new, |time| time.strftime("%H:%M").to_string()),
            eta.map_or_else(String::new, |eta| eta.text),
        ]);
    }
    println!("{table}");

    Ok(())
}

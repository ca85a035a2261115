use std::sync::Arc;

use schoolrun_routing::{RouteOptions, Router};
use serde::Serialize;
use tracing::info;

use crate::{
    dialog::FormDialog,
    error::DashboardError,
    mock_data::{SchoolData, SharedData},
    params::DashboardParams,
    records::{Bus, Driver, IssueReport, RouteStop, SchoolRoute},
    submission::{FormSubmission, SimulatedBackend},
};

use super::{RoutePreview, route_preview};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TripState {
    #[default]
    NotStarted,
    /// `next_stop` indexes the route's stops.
    InProgress { next_stop: usize },
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverAssignment {
    pub driver: Driver,
    pub bus: Bus,
    pub route: SchoolRoute,
}

fn file_issue(data: &mut SchoolData, issue: IssueReport) -> Result<(), DashboardError> {
    data.buses.get_active(&issue.bus_id)?;
    data.issues.add(issue)
}

pub struct DriverDashboard {
    data: SharedData,
    router: Arc<Router>,
    driver_id: String,
    trip: TripState,
    issue_dialog: FormDialog<SimulatedBackend<IssueReport>>,
}

impl DriverDashboard {
    pub fn new(
        data: SharedData,
        router: Arc<Router>,
        params: &DashboardParams,
        driver_id: &str,
    ) -> Result<Self, DashboardError> {
        data.read().drivers.get_active(driver_id)?;

        let backend = SimulatedBackend::new(Arc::clone(&data), params, file_issue);
        let issue_dialog = FormDialog::new("Report an issue", FormSubmission::new(backend, params));

        Ok(Self {
            data,
            router,
            driver_id: driver_id.to_string(),
            trip: TripState::NotStarted,
            issue_dialog,
        })
    }

    pub fn assignment(&self) -> Result<DriverAssignment, DashboardError> {
        let data = self.data.read();
        let driver = data.drivers.get_active(&self.driver_id)?;

        let bus_id = driver.bus_id.as_deref().ok_or_else(|| {
            DashboardError::InvalidState(format!("{} has no bus assigned", driver.name))
        })?;
        let bus = data.buses.get_active(bus_id)?;

        let route_id = bus.route_id.as_deref().ok_or_else(|| {
            DashboardError::InvalidState(format!("bus {} has no route", bus.registration))
        })?;
        let route = data.routes.get_active(route_id)?;

        Ok(DriverAssignment {
            driver: driver.clone(),
            bus: bus.clone(),
            route: route.clone(),
        })
    }

    pub fn stops(&self) -> Result<Vec<RouteStop>, DashboardError> {
        Ok(self.assignment()?.route.stops)
    }

    pub fn trip(&self) -> TripState {
        self.trip
    }

    /// The stop the bus is heading to, while a trip is in progress.
    pub fn next_stop(&self) -> Result<Option<RouteStop>, DashboardError> {
        match self.trip {
            TripState::InProgress { next_stop } => Ok(self.stops()?.get(next_stop).cloned()),
            _ => Ok(None),
        }
    }

    pub fn start_trip(&mut self) -> Result<TripState, DashboardError> {
        if self.trip != TripState::NotStarted {
            return Err(DashboardError::InvalidState(
                "the trip has already started".to_string(),
            ));
        }
        if self.stops()?.is_empty() {
            return Err(DashboardError::InvalidState("the route has no stops".to_string()));
        }

        info!("Driver {} started their trip", self.driver_id);
        self.trip = TripState::InProgress { next_stop: 0 };
        Ok(self.trip)
    }

    /// Marks the next stop as served. Serving the last stop completes the trip.
    pub fn arrive_at_stop(&mut self) -> Result<TripState, DashboardError> {
        let TripState::InProgress { next_stop } = self.trip else {
            return Err(DashboardError::InvalidState(
                "the trip is not in progress".to_string(),
            ));
        };

        let stop_count = self.stops()?.len();
        self.trip = if next_stop + 1 >= stop_count {
            info!("Driver {} completed their trip", self.driver_id);
            TripState::Completed
        } else {
            TripState::InProgress {
                next_stop: next_stop + 1,
            }
        };

        Ok(self.trip)
    }

    pub fn reset_trip(&mut self) {
        self.trip = TripState::NotStarted;
    }

    pub fn route_preview(&self, options: &RouteOptions) -> Result<RoutePreview, DashboardError> {
        let stops = self.stops()?;
        route_preview(&self.router, &stops, options)
    }

    pub fn issue_dialog(&mut self) -> &mut FormDialog<SimulatedBackend<IssueReport>> {
        &mut self.issue_dialog
    }

    /// Opens the issue dialog and submits a report for the assigned bus.
    pub fn report_issue(&mut self, description: &str) -> Result<(), DashboardError> {
        let bus_id = self.assignment()?.bus.id;
        let dialog = &mut self.issue_dialog;
        dialog.open();
        dialog.submit(IssueReport::new(bus_id, description))
    }
}

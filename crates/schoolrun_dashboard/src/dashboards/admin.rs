use std::sync::Arc;

use serde::Serialize;

use crate::{
    dialog::FormDialog,
    error::DashboardError,
    mock_data::{SchoolData, SharedData},
    params::DashboardParams,
    records::{Announcement, Bus, Driver, SchoolRoute, Student},
    submission::{FormSubmission, SimulatedBackend},
};

pub type AddDialog<T> = FormDialog<SimulatedBackend<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FleetOverview {
    pub students: usize,
    pub parents: usize,
    pub buses: usize,
    pub drivers: usize,
    pub routes: usize,
    pub announcements: usize,
}

fn add_student(data: &mut SchoolData, student: Student) -> Result<(), DashboardError> {
    let route = data.routes.get_active(&student.route_id)?;
    if route.stop(&student.stop).is_none() {
        return Err(DashboardError::InvalidState(format!(
            "{} is not a stop on {}",
            student.stop, route.name
        )));
    }
    let mut parent = data.parents.get_active(&student.parent_id)?.clone();

    parent.children.push(student.id.clone());
    data.students.add(student)?;
    data.parents.update(parent)
}

fn add_driver(data: &mut SchoolData, driver: Driver) -> Result<(), DashboardError> {
    data.drivers.add(driver)
}

fn add_bus(data: &mut SchoolData, bus: Bus) -> Result<(), DashboardError> {
    data.buses.add(bus)
}

fn add_announcement(data: &mut SchoolData, announcement: Announcement) -> Result<(), DashboardError> {
    data.announcements.add(announcement)
}

fn add_dialog<T: Send + 'static>(
    title: &str,
    data: &SharedData,
    params: &DashboardParams,
    apply: fn(&mut SchoolData, T) -> Result<(), DashboardError>,
) -> AddDialog<T> {
    let backend = SimulatedBackend::new(Arc::clone(data), params, apply);
    FormDialog::new(title, FormSubmission::new(backend, params))
}

pub struct AdminDashboard {
    data: SharedData,
    student_dialog: AddDialog<Student>,
    driver_dialog: AddDialog<Driver>,
    bus_dialog: AddDialog<Bus>,
    announcement_dialog: AddDialog<Announcement>,
}

impl AdminDashboard {
    pub fn new(data: SharedData, params: &DashboardParams) -> Self {
        Self {
            student_dialog: add_dialog("Add student", &data, params, add_student),
            driver_dialog: add_dialog("Add driver", &data, params, add_driver),
            bus_dialog: add_dialog("Add bus", &data, params, add_bus),
            announcement_dialog: add_dialog("New announcement", &data, params, add_announcement),
            data,
        }
    }

    pub fn overview(&self) -> FleetOverview {
        let data = self.data.read();

        FleetOverview {
            students: data.students.active_count(),
            parents: data.parents.active_count(),
            buses: data.buses.active_count(),
            drivers: data.drivers.active_count(),
            routes: data.routes.active_count(),
            announcements: data.announcements.active_count(),
        }
    }

    pub fn students(&self) -> Vec<Student> {
        self.data.read().students.active().cloned().collect()
    }

    pub fn drivers(&self) -> Vec<Driver> {
        self.data.read().drivers.active().cloned().collect()
    }

    pub fn buses(&self) -> Vec<Bus> {
        self.data.read().buses.active().cloned().collect()
    }

    pub fn routes(&self) -> Vec<SchoolRoute> {
        self.data.read().routes.active().cloned().collect()
    }

    pub fn announcements(&self) -> Vec<Announcement> {
        self.data.read().announcements.active().cloned().collect()
    }

    pub fn student_dialog(&mut self) -> &mut AddDialog<Student> {
        &mut self.student_dialog
    }

    pub fn driver_dialog(&mut self) -> &mut AddDialog<Driver> {
        &mut self.driver_dialog
    }

    pub fn bus_dialog(&mut self) -> &mut AddDialog<Bus> {
        &mut self.bus_dialog
    }

    pub fn announcement_dialog(&mut self) -> &mut AddDialog<Announcement> {
        &mut self.announcement_dialog
    }

    pub fn archive_student(&self, id: &str) -> Result<(), DashboardError> {
        self.data.write().students.archive(id)
    }

    /// Archives the driver and unassigns them from their bus.
    pub fn archive_driver(&self, id: &str) -> Result<(), DashboardError> {
        let mut data = self.data.write();
        data.drivers.archive(id)?;

        let assigned: Vec<Bus> = data
            .buses
            .all()
            .iter()
            .filter(|bus| bus.driver_id.as_deref() == Some(id))
            .cloned()
            .collect();
        for mut bus in assigned {
            bus.driver_id = None;
            data.buses.update(bus)?;
        }

        Ok(())
    }

    pub fn archive_bus(&self, id: &str) -> Result<(), DashboardError> {
        self.data.write().buses.archive(id)
    }

    pub fn archive_announcement(&self, id: &str) -> Result<(), DashboardError> {
        self.data.write().announcements.archive(id)
    }
}

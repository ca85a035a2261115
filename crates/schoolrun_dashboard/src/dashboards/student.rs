use std::sync::Arc;

use jiff::civil::Time;
use schoolrun_routing::{RouteOptions, Router};
use serde::Serialize;

use crate::{
    error::DashboardError,
    mock_data::SharedData,
    records::{Announcement, Audience, Bus, Student},
};

use super::{RoutePreview, route_preview};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentOverview {
    pub student: Student,
    pub bus: Option<Bus>,
    pub route_name: String,
    pub stop: String,
    pub pickup: Option<Time>,
    /// From the student's stop to the end of the route.
    pub journey: RoutePreview,
    pub announcements: Vec<Announcement>,
}

pub struct StudentDashboard {
    data: SharedData,
    router: Arc<Router>,
    student_id: String,
}

impl StudentDashboard {
    pub fn new(
        data: SharedData,
        router: Arc<Router>,
        student_id: &str,
    ) -> Result<Self, DashboardError> {
        data.read().students.get_active(student_id)?;

        Ok(Self {
            data,
            router,
            student_id: student_id.to_string(),
        })
    }

    pub fn overview(&self, options: &RouteOptions) -> Result<StudentOverview, DashboardError> {
        let (student, bus, route, announcements) = {
            let data = self.data.read();
            let student = data.students.get_active(&self.student_id)?.clone();
            let route = data.routes.get_active(&student.route_id)?.clone();
            let bus = data.bus_for_route(&route.id).cloned();
            (student, bus, route, data.announcements_for(Audience::Students))
        };

        let boarding = route
            .stops
            .iter()
            .position(|stop| stop.place == student.stop)
            .ok_or_else(|| {
                DashboardError::InvalidState(format!(
                    "{} is not a stop on {}",
                    student.stop, route.name
                ))
            })?;
        let journey = route_preview(&self.router, &route.stops[boarding..], options)?;

        Ok(StudentOverview {
            bus,
            route_name: route.name.clone(),
            stop: student.stop.clone(),
            pickup: Some(route.stops[boarding].pickup),
            journey,
            announcements,
            student,
        })
    }
}

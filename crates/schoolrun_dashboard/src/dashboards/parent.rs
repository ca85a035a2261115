use std::sync::Arc;

use jiff::civil::Time;
use schoolrun_routing::{GeoPoint, RouteOptions, Router};
use serde::Serialize;

use crate::{
    error::DashboardError,
    mock_data::SharedData,
    records::{Announcement, Audience, Bus, Parent, Student},
};

use super::{Eta, eta};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildOverview {
    pub student: Student,
    pub bus: Option<Bus>,
    pub stop: String,
    pub pickup: Option<Time>,
}

pub struct ParentDashboard {
    data: SharedData,
    router: Arc<Router>,
    parent_id: String,
}

impl ParentDashboard {
    pub fn new(
        data: SharedData,
        router: Arc<Router>,
        parent_id: &str,
    ) -> Result<Self, DashboardError> {
        data.read().parents.get_active(parent_id)?;

        Ok(Self {
            data,
            router,
            parent_id: parent_id.to_string(),
        })
    }

    pub fn parent(&self) -> Result<Parent, DashboardError> {
        Ok(self.data.read().parents.get_active(&self.parent_id)?.clone())
    }

    /// Active children with their bus, stop and pickup time.
    pub fn children(&self) -> Result<Vec<ChildOverview>, DashboardError> {
        let data = self.data.read();
        let parent = data.parents.get_active(&self.parent_id)?;

        let children = parent
            .children
            .iter()
            .filter_map(|id| data.students.get_active(id).ok())
            .map(|student| {
                let route = data.routes.get_active(&student.route_id).ok();
                ChildOverview {
                    student: student.clone(),
                    bus: data.bus_for_route(&student.route_id).cloned(),
                    stop: student.stop.clone(),
                    pickup: route
                        .and_then(|route| route.stop(&student.stop))
                        .map(|stop| stop.pickup),
                }
            })
            .collect();

        Ok(children)
    }

    /// How far the bus at `bus_position` is from the child's stop.
    pub fn eta(
        &self,
        student_id: &str,
        bus_position: &GeoPoint,
        options: &RouteOptions,
    ) -> Result<Eta, DashboardError> {
        let stop = {
            let data = self.data.read();
            let parent = data.parents.get_active(&self.parent_id)?;
            if !parent.children.iter().any(|child| child == student_id) {
                return Err(DashboardError::not_found("student", student_id));
            }
            data.students.get_active(student_id)?.stop.clone()
        };

        eta(&self.router, bus_position, &stop, options)
    }

    pub fn announcements(&self) -> Vec<Announcement> {
        self.data.read().announcements_for(Audience::Parents)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use crate::mock_data::SchoolData;

    use super::*;

    fn dashboard(parent_id: &str) -> ParentDashboard {
        ParentDashboard::new(
            SchoolData::mock().shared(),
            Arc::new(Router::default()),
            parent_id,
        )
        .unwrap()
    }

    #[test]
    fn test_children_overview() {
        let dashboard = dashboard("parent-3");
        let children = dashboard.children().unwrap();

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].student.name, "Amira Begum");
        assert_eq!(children[0].stop, "london bridge");
        assert_eq!(children[0].pickup, Some(time(7, 15, 0, 0)));
        assert_eq!(
            children[1].bus.as_ref().map(|bus| bus.id.as_str()),
            Some("bus-3")
        );
    }

    #[test]
    fn test_eta_from_live_position() {
        let dashboard = dashboard("parent-1");
        let eta = dashboard
            .eta(
                "student-1",
                &GeoPoint::new(51.5077, 0.0650),
                &RouteOptions::default(),
            )
            .unwrap();

        // the bus sits at the docklands campus, so the predefined route applies
        assert_eq!(eta.distance.value(), 11200.0);
        assert_eq!(eta.text, "18 min away (11.2 km)");
    }

    #[test]
    fn test_eta_for_someone_elses_child() {
        let dashboard = dashboard("parent-1");
        let result = dashboard.eta(
            "student-3",
            &GeoPoint::new(51.5, 0.0),
            &RouteOptions::default(),
        );

        assert!(matches!(result, Err(DashboardError::NotFound { .. })));
    }

    #[test]
    fn test_parent_announcements() {
        let dashboard = dashboard("parent-2");
        let titles: Vec<String> = dashboard
            .announcements()
            .into_iter()
            .map(|announcement| announcement.title)
            .collect();

        assert_eq!(titles, vec!["Welcome back", "A13 roadworks"]);
    }
}

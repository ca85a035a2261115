use std::sync::Arc;

use jiff::civil::{date, time};
use parking_lot::RwLock;
use serde::Serialize;

use crate::{
    collection::Collection,
    records::{
        Announcement, Audience, Bus, Driver, IssueReport, Parent, RecordStatus, RouteStop,
        SchoolRoute, Student,
    },
};

pub type SharedData = Arc<RwLock<SchoolData>>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SchoolData {
    pub students: Collection<Student>,
    pub parents: Collection<Parent>,
    pub drivers: Collection<Driver>,
    pub buses: Collection<Bus>,
    pub routes: Collection<SchoolRoute>,
    pub announcements: Collection<Announcement>,
    pub issues: Collection<IssueReport>,
}

fn stop(place: &str, hour: i8, minute: i8) -> RouteStop {
    RouteStop {
        place: place.to_string(),
        pickup: time(hour, minute, 0, 0),
    }
}

fn student(id: &str, name: &str, grade: u8, parent: &str, route: &str, stop: &str) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        grade,
        parent_id: parent.to_string(),
        route_id: route.to_string(),
        stop: stop.to_string(),
        status: RecordStatus::Active,
    }
}

fn parent(id: &str, name: &str, phone: &str, email: &str, children: &[&str]) -> Parent {
    Parent {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        children: children.iter().map(|child| child.to_string()).collect(),
        status: RecordStatus::Active,
    }
}

fn driver(id: &str, name: &str, phone: &str, license: &str, bus: &str) -> Driver {
    Driver {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        license_number: license.to_string(),
        bus_id: Some(bus.to_string()),
        status: RecordStatus::Active,
    }
}

fn bus(id: &str, registration: &str, capacity: u32, driver: &str, route: &str) -> Bus {
    Bus {
        id: id.to_string(),
        registration: registration.to_string(),
        capacity,
        driver_id: Some(driver.to_string()),
        route_id: Some(route.to_string()),
        status: RecordStatus::Active,
    }
}

fn announcement(id: &str, title: &str, body: &str, audience: Audience, day: i8) -> Announcement {
    Announcement {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        audience,
        posted_on: date(2025, 9, day),
        status: RecordStatus::Active,
    }
}

impl SchoolData {
    /// The demo school: three routes into the UEL campuses and the City,
    /// every stop a gazetteer place.
    pub fn mock() -> Self {
        let routes = vec![
            SchoolRoute {
                id: "route-1".to_string(),
                name: "Dagenham Express".to_string(),
                stops: vec![
                    stop("rm10 9qb", 7, 20),
                    stop("uel docklands campus", 7, 45),
                ],
                status: RecordStatus::Active,
            },
            SchoolRoute {
                id: "route-2".to_string(),
                name: "Stratford Shuttle".to_string(),
                stops: vec![
                    stop("stratford", 7, 25),
                    stop("uel stratford campus", 7, 32),
                    stop("royal docks", 7, 50),
                    stop("uel docklands campus", 8, 0),
                ],
                status: RecordStatus::Active,
            },
            SchoolRoute {
                id: "route-3".to_string(),
                name: "City Link".to_string(),
                stops: vec![
                    stop("london bridge", 7, 15),
                    stop("tower bridge", 7, 20),
                    stop("canary wharf", 7, 40),
                ],
                status: RecordStatus::Active,
            },
        ];

        let buses = vec![
            bus("bus-1", "LX21 SRB", 48, "driver-1", "route-1"),
            bus("bus-2", "LK19 DKE", 32, "driver-2", "route-2"),
            bus("bus-3", "LV70 TWR", 56, "driver-3", "route-3"),
        ];

        let drivers = vec![
            driver("driver-1", "Sam Okafor", "07700 900101", "OKAFO701234SA9AB", "bus-1"),
            driver("driver-2", "Priya Shah", "07700 900102", "SHAHP805219PS7CD", "bus-2"),
            driver("driver-3", "Tom Reilly", "07700 900103", "REILL612075TR3EF", "bus-3"),
        ];

        let parents = vec![
            parent(
                "parent-1",
                "Grace Adeyemi",
                "07700 900201",
                "grace.adeyemi@example.com",
                &["student-1", "student-2"],
            ),
            parent(
                "parent-2",
                "Mark Hughes",
                "07700 900202",
                "mark.hughes@example.com",
                &["student-3"],
            ),
            parent(
                "parent-3",
                "Fatima Begum",
                "07700 900203",
                "fatima.begum@example.com",
                &["student-4", "student-5"],
            ),
        ];

        let students = vec![
            student("student-1", "Tobi Adeyemi", 9, "parent-1", "route-1", "rm10 9qb"),
            student("student-2", "Ada Adeyemi", 7, "parent-1", "route-1", "rm10 9qb"),
            student("student-3", "Leo Hughes", 10, "parent-2", "route-2", "stratford"),
            student("student-4", "Amira Begum", 8, "parent-3", "route-3", "london bridge"),
            student("student-5", "Zain Begum", 11, "parent-3", "route-3", "tower bridge"),
        ];

        let announcements = vec![
            announcement(
                "announcement-1",
                "Welcome back",
                "Buses run from Monday. Please be at your stop five minutes early.",
                Audience::Everyone,
                1,
            ),
            announcement(
                "announcement-2",
                "A13 roadworks",
                "Expect delays of up to ten minutes on the Dagenham Express this week.",
                Audience::Parents,
                8,
            ),
            announcement(
                "announcement-3",
                "Vehicle checks",
                "Complete the walk-around check before every morning run.",
                Audience::Drivers,
                8,
            ),
            announcement(
                "announcement-4",
                "Bus passes",
                "Collect your new bus pass from reception.",
                Audience::Students,
                10,
            ),
        ];

        Self {
            students: Collection::new(students),
            parents: Collection::new(parents),
            drivers: Collection::new(drivers),
            buses: Collection::new(buses),
            routes: Collection::new(routes),
            announcements: Collection::new(announcements),
            issues: Collection::default(),
        }
    }

    pub fn shared(self) -> SharedData {
        Arc::new(RwLock::new(self))
    }

    /// The active bus serving a route.
    pub fn bus_for_route(&self, route_id: &str) -> Option<&Bus> {
        self.buses
            .active()
            .find(|bus| bus.route_id.as_deref() == Some(route_id))
    }

    pub fn announcements_for(&self, audience: Audience) -> Vec<Announcement> {
        self.announcements
            .active()
            .filter(|announcement| announcement.audience.includes(audience))
            .cloned()
            .collect()
    }
}

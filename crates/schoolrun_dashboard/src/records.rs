use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Active,
    Archived,
}

/// A row of one of the local collections. Records are archived, never deleted.
pub trait Record: Clone {
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn status(&self) -> RecordStatus;
    fn set_status(&mut self, status: RecordStatus);

    fn is_active(&self) -> bool {
        self.status() == RecordStatus::Active
    }
}

macro_rules! impl_record {
    ($record:ty, $kind:literal) => {
        impl Record for $record {
            const KIND: &'static str = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn status(&self) -> RecordStatus {
                self.status
            }

            fn set_status(&mut self, status: RecordStatus) {
                self.status = status;
            }
        }
    };
}

fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub grade: u8,
    pub parent_id: String,
    pub route_id: String,
    /// Gazetteer name of the stop the student is picked up at.
    pub stop: String,
    #[serde(default)]
    pub status: RecordStatus,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        grade: u8,
        parent_id: impl Into<String>,
        route_id: impl Into<String>,
        stop: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id("student"),
            name: name.into(),
            grade,
            parent_id: parent_id.into(),
            route_id: route_id.into(),
            stop: stop.into(),
            status: RecordStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub children: Vec<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub license_number: String,
    pub bus_id: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

impl Driver {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        license_number: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id("driver"),
            name: name.into(),
            phone: phone.into(),
            license_number: license_number.into(),
            bus_id: None,
            status: RecordStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    pub id: String,
    pub registration: String,
    pub capacity: u32,
    pub driver_id: Option<String>,
    pub route_id: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

impl Bus {
    pub fn new(registration: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: new_id("bus"),
            registration: registration.into(),
            capacity,
            driver_id: None,
            route_id: None,
            status: RecordStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub place: String,
    pub pickup: Time,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRoute {
    pub id: String,
    pub name: String,
    /// In driving order. The last stop is the school.
    pub stops: Vec<RouteStop>,
    #[serde(default)]
    pub status: RecordStatus,
}

impl SchoolRoute {
    pub fn stop(&self, place: &str) -> Option<&RouteStop> {
        self.stops.iter().find(|stop| stop.place == place)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Everyone,
    Parents,
    Drivers,
    Students,
}

impl Audience {
    pub fn includes(&self, other: Audience) -> bool {
        *self == Audience::Everyone || *self == other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    pub audience: Audience,
    pub posted_on: Date,
    #[serde(default)]
    pub status: RecordStatus,
}

impl Announcement {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        audience: Audience,
        posted_on: Date,
    ) -> Self {
        Self {
            id: new_id("announcement"),
            title: title.into(),
            body: body.into(),
            audience,
            posted_on,
            status: RecordStatus::Active,
        }
    }
}

/// Problem reported by a driver from the road.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueReport {
    pub id: String,
    pub bus_id: String,
    pub description: String,
    #[serde(default)]
    pub status: RecordStatus,
}

impl IssueReport {
    pub fn new(bus_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: new_id("issue"),
            bus_id: bus_id.into(),
            description: description.into(),
            status: RecordStatus::Active,
        }
    }
}

impl_record!(Student, "student");
impl_record!(Parent, "parent");
impl_record!(Driver, "driver");
impl_record!(Bus, "bus");
impl_record!(SchoolRoute, "route");
impl_record!(Announcement, "announcement");
impl_record!(IssueReport, "issue");

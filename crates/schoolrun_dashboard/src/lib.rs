pub mod collection;
pub mod dashboards;
pub mod dialog;
pub mod error;
pub mod mock_data;
pub mod params;
pub mod records;
pub mod submission;
pub mod tracking;

pub use collection::Collection;
pub use dialog::{DialogPhase, FormDialog};
pub use error::DashboardError;
pub use mock_data::{SchoolData, SharedData};
pub use params::DashboardParams;
pub use submission::{FormSubmission, SimulatedBackend, SubmissionBackend, SubmissionState};
pub use tracking::LiveTracker;

use schoolrun_routing::RoutingError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    #[error("{kind} \"{id}\" not found")]
    NotFound { kind: &'static str, id: String },

    #[error("A submission is already in flight")]
    AlreadySubmitting,

    #[error("The dialog is closed")]
    DialogClosed,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Submission rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

impl DashboardError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        DashboardError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

use serde::Serialize;

use crate::{
    error::DashboardError,
    submission::{FormSubmission, SubmissionBackend, SubmissionState},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DialogPhase {
    Closed,
    Open,
    Submitting,
    Success,
    /// The dialog stays open so the form can be sent again.
    Failed { message: String },
}

/// Modal form: `Closed -> Open -> Submitting -> Success -> Closed`.
///
/// The dialog closes on its own once a successful submission returns to idle.
pub struct FormDialog<B: SubmissionBackend> {
    title: String,
    open: bool,
    successes_at_open: usize,
    submission: FormSubmission<B>,
}

impl<B: SubmissionBackend> FormDialog<B> {
    pub fn new(title: impl Into<String>, submission: FormSubmission<B>) -> Self {
        Self {
            title: title.into(),
            open: false,
            successes_at_open: 0,
            submission,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> DialogPhase {
        if !self.open {
            return DialogPhase::Closed;
        }

        match self.submission.state() {
            SubmissionState::Idle if self.submission.successes() > self.successes_at_open => {
                DialogPhase::Closed
            }
            SubmissionState::Idle => DialogPhase::Open,
            SubmissionState::Submitting => DialogPhase::Submitting,
            SubmissionState::Succeeded => DialogPhase::Success,
            SubmissionState::Failed { message } => DialogPhase::Failed { message },
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase() != DialogPhase::Closed
    }

    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }

        self.submission.cancel();
        self.open = true;
        self.successes_at_open = self.submission.successes();
    }

    /// Closing cancels any in-flight submission.
    pub fn close(&mut self) {
        self.submission.cancel();
        self.open = false;
    }

    pub fn submit(&self, payload: B::Payload) -> Result<(), DashboardError> {
        match self.phase() {
            DialogPhase::Closed => Err(DashboardError::DialogClosed),
            DialogPhase::Success => Err(DashboardError::InvalidState(
                "the form was already sent".to_string(),
            )),
            _ => self.submission.submit(payload),
        }
    }

    pub fn submission(&self) -> &FormSubmission<B> {
        &self.submission
    }
}

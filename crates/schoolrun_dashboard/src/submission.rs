use std::{
    future::Future,
    marker::PhantomData,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use jiff::SignedDuration;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    error::DashboardError,
    mock_data::{SchoolData, SharedData},
    params::{DashboardParams, to_std},
};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed { message: String },
}

/// Where a form payload goes once the user submits it.
pub trait SubmissionBackend: Send + Sync + 'static {
    type Payload: Send + 'static;

    fn submit(
        &self,
        payload: Self::Payload,
    ) -> impl Future<Output = Result<(), DashboardError>> + Send;
}

pub type ApplyFn<T> = fn(&mut SchoolData, T) -> Result<(), DashboardError>;

/// Answers after a fixed latency by applying the payload to the local data.
pub struct SimulatedBackend<T> {
    data: SharedData,
    latency: SignedDuration,
    fail: bool,
    apply: ApplyFn<T>,
    _payload: PhantomData<fn(T)>,
}

impl<T> SimulatedBackend<T> {
    pub fn new(data: SharedData, params: &DashboardParams, apply: ApplyFn<T>) -> Self {
        Self {
            data,
            latency: params.submit_latency,
            fail: params.fail_submissions,
            apply,
            _payload: PhantomData,
        }
    }
}

impl<T: Send + 'static> SubmissionBackend for SimulatedBackend<T> {
    type Payload = T;

    fn submit(&self, payload: T) -> impl Future<Output = Result<(), DashboardError>> + Send {
        let data = Arc::clone(&self.data);
        let latency = to_std(self.latency);
        let fail = self.fail;
        let apply = self.apply;

        async move {
            tokio::time::sleep(latency).await;

            if fail {
                return Err(DashboardError::Rejected(
                    "the server could not be reached".to_string(),
                ));
            }

            let mut data = data.write();
            apply(&mut data, payload)
        }
    }
}

/// `Idle -> Submitting -> Succeeded | Failed -> Idle`, driven by a spawned task.
///
/// Must be used from within a tokio runtime. Dropping the submission aborts
/// any in-flight task.
pub struct FormSubmission<B: SubmissionBackend> {
    backend: Arc<B>,
    reset_delay: SignedDuration,
    state: Arc<watch::Sender<SubmissionState>>,
    task: Mutex<Option<JoinHandle<()>>>,
    successes: Arc<AtomicUsize>,
}

impl<B: SubmissionBackend> FormSubmission<B> {
    pub fn new(backend: B, params: &DashboardParams) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);

        Self {
            backend: Arc::new(backend),
            reset_delay: params.reset_delay,
            state: Arc::new(state),
            task: Mutex::new(None),
            successes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Number of submissions that completed successfully so far.
    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::Acquire)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(*self.state.borrow(), SubmissionState::Submitting)
    }

    pub fn submit(&self, payload: B::Payload) -> Result<(), DashboardError> {
        let mut task = self.task.lock();

        if self.is_submitting() {
            return Err(DashboardError::AlreadySubmitting);
        }

        // A previous outcome may still be on display.
        if let Some(previous) = task.take() {
            previous.abort();
        }

        self.state.send_replace(SubmissionState::Submitting);
        debug!("Submission started");

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let successes = Arc::clone(&self.successes);
        let reset_delay = to_std(self.reset_delay);

        *task = Some(tokio::spawn(async move {
            let outcome = match backend.submit(payload).await {
                Ok(()) => {
                    successes.fetch_add(1, Ordering::AcqRel);
                    debug!("Submission succeeded");
                    SubmissionState::Succeeded
                }
                Err(error) => {
                    warn!("Submission failed: {}", error);
                    SubmissionState::Failed {
                        message: error.to_string(),
                    }
                }
            };

            state.send_replace(outcome);
            tokio::time::sleep(reset_delay).await;
            state.send_replace(SubmissionState::Idle);
        }));

        Ok(())
    }

    /// Aborts the in-flight task, if any, and returns to `Idle`.
    pub fn cancel(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
            debug!("Submission cancelled");
        }
        self.state.send_replace(SubmissionState::Idle);
    }
}

impl<B: SubmissionBackend> Drop for FormSubmission<B> {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::records::{Bus, Record};

    use super::*;

    fn add_bus(data: &mut SchoolData, bus: Bus) -> Result<(), DashboardError> {
        data.buses.add(bus)
    }

    fn setup(params: &DashboardParams) -> (SharedData, FormSubmission<SimulatedBackend<Bus>>) {
        let data = SchoolData::default().shared();
        let backend = SimulatedBackend::new(Arc::clone(&data), params, add_bus);
        (data, FormSubmission::new(backend, params))
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_lifecycle() {
        let params = DashboardParams::default();
        let (data, submission) = setup(&params);
        let bus = Bus::new("LX25 NEW", 40);
        let id = bus.id.clone();

        assert_eq!(submission.state(), SubmissionState::Idle);
        submission.submit(bus).unwrap();
        assert_eq!(submission.state(), SubmissionState::Submitting);

        tokio::time::sleep(Duration::from_millis(1400)).await;
        assert_eq!(submission.state(), SubmissionState::Submitting);
        assert!(data.read().buses.get(&id).is_none());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(submission.state(), SubmissionState::Succeeded);
        assert_eq!(submission.successes(), 1);
        assert!(data.read().buses.get(&id).is_some_and(|bus| bus.is_active()));

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(submission.state(), SubmissionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_is_rejected() {
        let params = DashboardParams::default();
        let (_, submission) = setup(&params);

        submission.submit(Bus::new("LX25 ONE", 40)).unwrap();
        assert_eq!(
            submission.submit(Bus::new("LX25 TWO", 40)),
            Err(DashboardError::AlreadySubmitting)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_published() {
        let params = DashboardParams {
            fail_submissions: true,
            ..DashboardParams::default()
        };
        let (data, submission) = setup(&params);

        submission.submit(Bus::new("LX25 BAD", 40)).unwrap();
        let mut states = submission.subscribe();
        states.changed().await.unwrap();
        assert!(matches!(*states.borrow(), SubmissionState::Failed { .. }));
        assert_eq!(submission.successes(), 0);
        assert!(data.read().buses.is_empty());

        states.changed().await.unwrap();
        assert_eq!(*states.borrow(), SubmissionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_error_is_a_failure() {
        let params = DashboardParams::default();
        let (data, submission) = setup(&params);
        let bus = Bus::new("LX25 DUP", 40);
        data.write().buses.add(bus.clone()).unwrap();

        submission.submit(bus).unwrap();
        tokio::time::sleep(Duration::from_millis(1600)).await;

        assert!(matches!(
            submission.state(),
            SubmissionState::Failed { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_aborts_in_flight_submission() {
        let params = DashboardParams::default();
        let (data, submission) = setup(&params);

        submission.submit(Bus::new("LX25 CXL", 40)).unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        submission.cancel();
        assert_eq!(submission.state(), SubmissionState::Idle);

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(submission.state(), SubmissionState::Idle);
        assert!(data.read().buses.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_in_flight_submission() {
        let params = DashboardParams::default();
        let (data, submission) = setup(&params);

        submission.submit(Bus::new("LX25 DRP", 40)).unwrap();
        drop(submission);

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(data.read().buses.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resubmit_while_succeeded_restarts() {
        let params = DashboardParams::default();
        let (data, submission) = setup(&params);

        submission.submit(Bus::new("LX25 FST", 40)).unwrap();
        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(submission.state(), SubmissionState::Succeeded);

        submission.submit(Bus::new("LX25 SND", 40)).unwrap();
        assert_eq!(submission.state(), SubmissionState::Submitting);

        // the first reset would have fired at 3500ms
        tokio::time::sleep(Duration::from_millis(1400)).await;
        assert_eq!(submission.state(), SubmissionState::Submitting);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(submission.state(), SubmissionState::Succeeded);
        assert_eq!(submission.successes(), 2);
        assert_eq!(data.read().buses.len(), 2);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(submission.state(), SubmissionState::Idle);
    }
}

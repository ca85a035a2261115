use jiff::SignedDuration;

#[derive(Clone, Debug)]
pub struct DashboardParams {
    /// Time the simulated backend takes to answer a submission.
    pub submit_latency: SignedDuration,

    /// How long a successful submission is shown before returning to idle.
    pub reset_delay: SignedDuration,

    pub tracking_interval: SignedDuration,
    /// Max offset in degrees applied per axis to a tracked position.
    pub tracking_jitter: f64,

    /// Makes every simulated submission fail.
    pub fail_submissions: bool,
    pub seed: Option<u64>,
}

impl Default for DashboardParams {
    fn default() -> Self {
        Self {
            submit_latency: SignedDuration::from_millis(1500),
            reset_delay: SignedDuration::from_millis(2000),
            tracking_interval: SignedDuration::from_secs(3),
            tracking_jitter: 0.0005,
            fail_submissions: false,
            seed: None,
        }
    }
}

pub(crate) fn to_std(duration: SignedDuration) -> std::time::Duration {
    duration.unsigned_abs()
}

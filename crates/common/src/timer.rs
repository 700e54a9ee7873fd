use std::borrow::Cow;
use std::time::{Duration, Instant};

/// Scoped diagnostic timer: logs the elapsed time for a named phase when it
/// goes out of scope.
///
/// Used around one-off startup phases (asset loading, GPU resource creation)
/// where a surprising duration is worth seeing in the log. Sub-second phases
/// are reported in milliseconds, longer ones in seconds.
#[derive(Debug)]
pub struct ScopedTimer {
    label: Cow<'static, str>,
    start: Instant,
}

impl ScopedTimer {
    /// Start a timer for the given phase. The label may be a literal or a
    /// computed string.
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }

    /// The phase name this timer reports under.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Time elapsed since the timer was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        if elapsed >= Duration::from_secs(1) {
            tracing::info!("{} took {:.2}s", self.label, elapsed.as_secs_f64());
        } else {
            tracing::info!(
                "{} took {:.2}ms",
                self.label,
                elapsed.as_secs_f64() * 1000.0
            );
        }
    }
}

use std::time::SystemTime;

/// Wall-clock source for session timestamps. Injected so tests can drive
/// time by hand instead of sleeping.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

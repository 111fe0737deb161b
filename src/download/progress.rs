//! Rate limiting for progress reports

use std::time::{Duration, Instant};

use crate::observability::TaskLog;

/// Lets at most one report through per `interval`. The first call always
/// passes.
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl ProgressThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Where and how often a transfer reports its byte count
pub struct ProgressSink<'a> {
    pub log: &'a dyn TaskLog,
    pub key: &'a str,
    pub interval: Duration,
}

// src/core/services/health.rs
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

pub struct HealthService {
    start_time: i64,
    sessions_started: AtomicU64,
    submissions: AtomicU64,
}

#[derive(Debug, Serialize)]
pub struct HealthMetrics {
    pub uptime: i64,
    pub sessions_started: u64,
    pub submissions: u64,
}

impl HealthService {
    pub fn new() -> Self {
        Self {
            start_time: chrono::Utc::now().timestamp(),
            sessions_started: AtomicU64::new(0),
            submissions: AtomicU64::new(0),
        }
    }

    pub fn record_session(&self) {
        self.sessions_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submission(&self) {
        self.submissions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_metrics(&self) -> HealthMetrics {
        HealthMetrics {
            uptime: chrono::Utc::now().timestamp() - self.start_time,
            sessions_started: self.sessions_started.load(Ordering::Relaxed),
            submissions: self.submissions.load(Ordering::Relaxed),
        }
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let service = HealthService::new();
        service.record_session();
        service.record_session();
        service.record_submission();

        let metrics = service.get_metrics();
        assert_eq!(metrics.sessions_started, 2);
        assert_eq!(metrics.submissions, 1);
        assert!(metrics.uptime >= 0);
    }
}

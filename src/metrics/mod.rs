use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Lifecycle counters kept by an alert model.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AlertMetrics {
    shown: u64,
    replaced: u64,
    rejected: u64,
    expired: u64,
    dismissed: u64,
    ticks: u64,
    stray_ticks: u64,
}

impl AlertMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_shown(&mut self, replaced: bool) {
        self.shown = self.shown.saturating_add(1);
        if replaced {
            self.replaced = self.replaced.saturating_add(1);
        }
    }

    pub fn record_rejected(&mut self) {
        self.rejected = self.rejected.saturating_add(1);
    }

    pub fn record_expired(&mut self) {
        self.expired = self.expired.saturating_add(1);
    }

    pub fn record_dismissed(&mut self) {
        self.dismissed = self.dismissed.saturating_add(1);
    }

    pub fn record_tick(&mut self, stray: bool) {
        if stray {
            self.stray_ticks = self.stray_ticks.saturating_add(1);
        } else {
            self.ticks = self.ticks.saturating_add(1);
        }
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            shown: self.shown,
            replaced: self.replaced,
            rejected: self.rejected,
            expired: self.expired,
            dismissed: self.dismissed,
            ticks: self.ticks,
            stray_ticks: self.stray_ticks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub shown: u64,
    pub replaced: u64,
    pub rejected: u64,
    pub expired: u64,
    pub dismissed: u64,
    pub ticks: u64,
    pub stray_ticks: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "alert_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("shown".to_string(), json!(self.shown));
        map.insert("replaced".to_string(), json!(self.replaced));
        map.insert("rejected".to_string(), json!(self.rejected));
        map.insert("expired".to_string(), json!(self.expired));
        map.insert("dismissed".to_string(), json!(self.dismissed));
        map.insert("ticks".to_string(), json!(self.ticks));
        map.insert("stray_ticks".to_string(), json!(self.stray_ticks));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::METRICS_TARGET;

    #[test]
    fn counters_feed_snapshot() {
        let mut metrics = AlertMetrics::new();
        metrics.record_shown(false);
        metrics.record_shown(true);
        metrics.record_tick(false);
        metrics.record_tick(true);
        metrics.record_expired();

        let snapshot = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snapshot.shown, 2);
        assert_eq!(snapshot.replaced, 1);
        assert_eq!(snapshot.ticks, 1);
        assert_eq!(snapshot.stray_ticks, 1);
        assert_eq!(snapshot.expired, 1);

        let event = snapshot.to_log_event(METRICS_TARGET);
        assert_eq!(event.message, "alert_metrics");
        assert_eq!(event.field("uptime_ms"), Some(&json!(1500)));
    }
}

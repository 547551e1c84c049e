//! Security-focused logging module to track authentication events
//!
//! Events never carry passwords, tokens or the signing secret.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Types of security events to track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityEvent {
    RegistrationConflict { email: String },
    AuthenticationFailed { email: String },
    AuthenticationSuccess { subject: String, token_id: String },
    TokenValidationFailed { reason: String },
    InvalidInput { route: String, details: String },
    SigningFailure { error: String },
}

impl SecurityEvent {
    /// Key used for counters and alert thresholds
    pub fn key(&self) -> &'static str {
        match self {
            Self::RegistrationConflict { .. } => "registration_conflict",
            Self::AuthenticationFailed { .. } => "auth_failed",
            Self::AuthenticationSuccess { .. } => "auth_success",
            Self::TokenValidationFailed { .. } => "token_validation_failed",
            Self::InvalidInput { .. } => "invalid_input",
            Self::SigningFailure { .. } => "signing_failure",
        }
    }
}

/// Security event with timestamp
#[derive(Debug, Clone)]
struct TimestampedEvent {
    event: SecurityEvent,
    timestamp: Instant,
}

/// Security logger for tracking and alerting on security events
pub struct SecurityLogger {
    events: RwLock<Vec<TimestampedEvent>>,
    event_counts: RwLock<HashMap<&'static str, usize>>,
    alerts_raised: RwLock<HashMap<&'static str, usize>>,
    max_events: usize,
    alert_thresholds: HashMap<&'static str, usize>,
}

impl Default for SecurityLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityLogger {
    /// Create a new security logger
    pub fn new() -> Self {
        let mut alert_thresholds = HashMap::new();
        alert_thresholds.insert("auth_failed", 5);
        alert_thresholds.insert("token_validation_failed", 10);
        alert_thresholds.insert("registration_conflict", 10);
        alert_thresholds.insert("invalid_input", 20);
        alert_thresholds.insert("signing_failure", 1);

        Self {
            events: RwLock::new(Vec::new()),
            event_counts: RwLock::new(HashMap::new()),
            alerts_raised: RwLock::new(HashMap::new()),
            max_events: 10000,
            alert_thresholds,
        }
    }

    /// Log a security event
    pub async fn log_event(&self, event: SecurityEvent) {
        let event_key = event.key();

        {
            let mut events = self.events.write().await;
            events.push(TimestampedEvent {
                event: event.clone(),
                timestamp: Instant::now(),
            });

            // Limit memory usage
            if events.len() > self.max_events {
                let events_to_remove = events.len() - self.max_events;
                events.drain(0..events_to_remove);
            }
        }

        {
            let mut counts = self.event_counts.write().await;
            let count = counts.entry(event_key).or_insert(0);
            *count += 1;

            if let Some(&threshold) = self.alert_thresholds.get(event_key) {
                if *count >= threshold {
                    self.trigger_alert(event_key, *count, &event).await;
                    *count = 0;
                }
            }
        }

        match event {
            SecurityEvent::RegistrationConflict { email } => {
                log::info!("SECURITY: Registration rejected, email already taken - Email: {}", email);
            }
            SecurityEvent::AuthenticationFailed { email } => {
                log::warn!("SECURITY: Authentication failed - Email: {}", email);
            }
            SecurityEvent::AuthenticationSuccess { subject, token_id } => {
                log::info!("SECURITY: Authentication success - Subject: {}, Token: {}", subject, token_id);
            }
            SecurityEvent::TokenValidationFailed { reason } => {
                log::warn!("SECURITY: Token validation failed - Reason: {}", reason);
            }
            SecurityEvent::InvalidInput { route, details } => {
                log::warn!("SECURITY: Invalid input - Route: {}, Details: {}", route, details);
            }
            SecurityEvent::SigningFailure { error } => {
                log::error!("SECURITY: Token signing failed - Error: {}", error);
            }
        }
    }

    async fn trigger_alert(&self, event_type: &'static str, count: usize, sample_event: &SecurityEvent) {
        log::error!("SECURITY ALERT: {} events of type '{}' detected", count, event_type);
        log::error!("Sample event: {:?}", sample_event);

        *self.alerts_raised.write().await.entry(event_type).or_insert(0) += 1;
    }

    /// Get recent security events
    pub async fn get_recent_events(&self, duration: Duration) -> Vec<SecurityEvent> {
        let events = self.events.read().await;
        let now = Instant::now();

        events
            .iter()
            .filter(|event| now.duration_since(event.timestamp) <= duration)
            .map(|event| event.event.clone())
            .collect()
    }

    /// Events counted since the last alert, per kind
    pub async fn get_event_stats(&self) -> HashMap<&'static str, usize> {
        self.event_counts.read().await.clone()
    }

    /// Number of alerts raised for an event kind
    pub async fn alerts_raised(&self, event_type: &str) -> usize {
        self.alerts_raised
            .read()
            .await
            .get(event_type)
            .copied()
            .unwrap_or(0)
    }

    /// Drop events older than `max_age`
    pub async fn cleanup_old_events(&self, max_age: Duration) {
        let mut events = self.events.write().await;
        let now = Instant::now();

        events.retain(|event| now.duration_since(event.timestamp) <= max_age);
    }

    /// Start periodic cleanup task
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(300));
            loop {
                interval.tick().await;
                self.cleanup_old_events(Duration::from_secs(3600 * 24)).await;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_recorded() {
        let logger = SecurityLogger::new();
        logger
            .log_event(SecurityEvent::TokenValidationFailed {
                reason: "token expired".into(),
            })
            .await;

        let recent = logger.get_recent_events(Duration::from_secs(60)).await;
        assert_eq!(recent.len(), 1);
        assert_eq!(logger.get_event_stats().await["token_validation_failed"], 1);
    }

    #[tokio::test]
    async fn test_alert_after_repeated_login_failures() {
        let logger = SecurityLogger::new();
        for _ in 0..5 {
            logger
                .log_event(SecurityEvent::AuthenticationFailed {
                    email: "a@x.com".into(),
                })
                .await;
        }

        assert_eq!(logger.alerts_raised("auth_failed").await, 1);
        // Counter resets after the alert
        assert_eq!(logger.get_event_stats().await["auth_failed"], 0);
    }

    #[tokio::test]
    async fn test_cleanup_keeps_recent() {
        let logger = SecurityLogger::new();
        logger
            .log_event(SecurityEvent::InvalidInput {
                route: "/login".into(),
                details: "eof".into(),
            })
            .await;
        logger.cleanup_old_events(Duration::from_secs(60)).await;
        assert_eq!(logger.get_recent_events(Duration::from_secs(60)).await.len(), 1);
    }
}

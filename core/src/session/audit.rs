//! Session audit events.
//!
//! The gate's boolean contract deliberately conflates "never logged
//! in", "logged in with no authorities", and "corrupted stored data"
//! into a single `false`. This module is the separate diagnostic
//! channel for telling those apart: a denial caused by undecodable
//! storage emits [`SessionEventType::MalformedAuthorityData`] while
//! the gate still just returns `false`.
//!
//! # Example
//!
//! ```
//! use session_gate_core::session::audit::{AuditLogger, SessionEvent};
//!
//! let logger = AuditLogger::new().with_handler(|event| {
//!     println!("[AUDIT] {}", event.to_log_line());
//! });
//!
//! logger.log(SessionEvent::session_established("ada@example.com"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

/// Session event types for audit logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEventType {
    // Lifecycle events
    /// Login flow persisted a full set of session artifacts
    SessionEstablished,
    /// Logout flow cleared the stored session
    SessionCleared,

    // Gate events
    /// A guarded feature was unlocked
    AccessGranted,
    /// A guarded feature was withheld
    AccessDenied,

    // Store events
    /// Stored authority data could not be decoded
    MalformedAuthorityData,
    /// A write was rejected by the configured capacity
    QuotaExceeded,

    /// Custom event
    Custom(String),
}

impl fmt::Display for SessionEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEventType::SessionEstablished => write!(f, "SESSION_ESTABLISHED"),
            SessionEventType::SessionCleared => write!(f, "SESSION_CLEARED"),
            SessionEventType::AccessGranted => write!(f, "ACCESS_GRANTED"),
            SessionEventType::AccessDenied => write!(f, "ACCESS_DENIED"),
            SessionEventType::MalformedAuthorityData => write!(f, "MALFORMED_AUTHORITY_DATA"),
            SessionEventType::QuotaExceeded => write!(f, "QUOTA_EXCEEDED"),
            SessionEventType::Custom(name) => write!(f, "CUSTOM_{}", name.to_uppercase()),
        }
    }
}

/// Severity level of session events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum SessionEventSeverity {
    /// Informational (expected operations)
    #[default]
    Info,
    /// Warning (denied but routine)
    Warning,
    /// Error (failed operations)
    Error,
    /// Critical (corrupted session state)
    Critical,
}

impl fmt::Display for SessionEventSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEventSeverity::Info => write!(f, "INFO"),
            SessionEventSeverity::Warning => write!(f, "WARNING"),
            SessionEventSeverity::Error => write!(f, "ERROR"),
            SessionEventSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl SessionEventType {
    /// Get the default severity for this event type.
    pub fn default_severity(&self) -> SessionEventSeverity {
        match self {
            SessionEventType::SessionEstablished
            | SessionEventType::SessionCleared
            | SessionEventType::AccessGranted => SessionEventSeverity::Info,

            SessionEventType::AccessDenied => SessionEventSeverity::Warning,

            SessionEventType::QuotaExceeded => SessionEventSeverity::Error,

            SessionEventType::MalformedAuthorityData => SessionEventSeverity::Critical,

            SessionEventType::Custom(_) => SessionEventSeverity::Info,
        }
    }
}

/// A session audit event.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    /// Unique event ID
    pub id: String,
    /// Event timestamp (Unix epoch milliseconds)
    pub timestamp: u64,
    /// Event type
    pub event_type: SessionEventType,
    /// Event severity
    pub severity: SessionEventSeverity,
    /// Username or email of the session's user (if known)
    pub username: Option<String>,
    /// Storage key involved (if applicable)
    pub key: Option<String>,
    /// Additional details
    pub details: HashMap<String, String>,
    /// Error message (for failure events)
    pub error: Option<String>,
}

impl SessionEvent {
    /// Create a new session event.
    pub fn new(event_type: SessionEventType) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        Self {
            id: generate_event_id(),
            timestamp: now,
            severity: event_type.default_severity(),
            event_type,
            username: None,
            key: None,
            details: HashMap::new(),
            error: None,
        }
    }

    /// Set the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the storage key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the severity (overrides default).
    pub fn severity(mut self, severity: SessionEventSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Add a detail.
    pub fn detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Set the error message.
    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    // Convenience constructors

    /// Create a session-established event.
    pub fn session_established(username: &str) -> Self {
        Self::new(SessionEventType::SessionEstablished).username(username)
    }

    /// Create a session-cleared event.
    pub fn session_cleared() -> Self {
        Self::new(SessionEventType::SessionCleared)
    }

    /// Create an access-granted event for a required role set.
    pub fn access_granted(required_roles: &[impl AsRef<str>]) -> Self {
        Self::new(SessionEventType::AccessGranted).detail("required", join_roles(required_roles))
    }

    /// Create an access-denied event for a required role set.
    pub fn access_denied(required_roles: &[impl AsRef<str>]) -> Self {
        Self::new(SessionEventType::AccessDenied).detail("required", join_roles(required_roles))
    }

    /// Create a malformed-authority-data event.
    pub fn malformed_authority_data(key: &str) -> Self {
        Self::new(SessionEventType::MalformedAuthorityData).key(key)
    }

    /// Create a quota-exceeded event.
    pub fn quota_exceeded(key: &str) -> Self {
        Self::new(SessionEventType::QuotaExceeded).key(key)
    }

    /// Format the event as a log line.
    pub fn to_log_line(&self) -> String {
        let mut parts = vec![
            format!("[{}]", self.severity),
            format!("[{}]", self.event_type),
        ];

        if let Some(ref username) = self.username {
            parts.push(format!("user={}", username));
        }
        if let Some(ref key) = self.key {
            parts.push(format!("key={}", key));
        }
        if let Some(ref error) = self.error {
            parts.push(format!("error=\"{}\"", error));
        }
        for (k, v) in &self.details {
            parts.push(format!("{}={}", k, v));
        }

        parts.join(" ")
    }

    /// Format the event as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.to_log_line())
    }
}

impl serde::Serialize for SessionEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("SessionEvent", 8)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("event_type", &self.event_type.to_string())?;
        state.serialize_field("severity", &self.severity.to_string())?;
        state.serialize_field("username", &self.username)?;
        state.serialize_field("key", &self.key)?;
        state.serialize_field("details", &self.details)?;
        state.serialize_field("error", &self.error)?;
        state.end()
    }
}

fn join_roles(roles: &[impl AsRef<str>]) -> String {
    roles
        .iter()
        .map(|role| role.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

/// Generate a unique event ID.
fn generate_event_id() -> String {
    use rand::Rng;
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros();
    let random: u32 = rand::thread_rng().gen();
    format!("{:x}-{:08x}", timestamp, random)
}

/// Trait for handling session events.
pub trait SessionEventHandler: Send + Sync {
    /// Handle a session event.
    fn handle(&self, event: &SessionEvent);
}

/// Simple logging handler that prints to stdout.
#[derive(Default)]
pub struct StdoutHandler {
    min_severity: SessionEventSeverity,
}

impl StdoutHandler {
    /// Create a new stdout handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum severity to log.
    pub fn min_severity(mut self, severity: SessionEventSeverity) -> Self {
        self.min_severity = severity;
        self
    }
}

impl SessionEventHandler for StdoutHandler {
    fn handle(&self, event: &SessionEvent) {
        if event.severity >= self.min_severity {
            println!("[SESSION] {}", event.to_log_line());
        }
    }
}

/// Handler that calls a closure.
pub struct ClosureHandler<F>
where
    F: Fn(&SessionEvent) + Send + Sync,
{
    handler: F,
}

impl<F> ClosureHandler<F>
where
    F: Fn(&SessionEvent) + Send + Sync,
{
    /// Create a new closure handler.
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F> SessionEventHandler for ClosureHandler<F>
where
    F: Fn(&SessionEvent) + Send + Sync,
{
    fn handle(&self, event: &SessionEvent) {
        (self.handler)(event);
    }
}

/// In-memory event store for testing and debugging.
///
/// Synchronous: events land before the emitting call returns, so a
/// test can assert on them immediately.
#[derive(Clone)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<SessionEvent>>>,
    max_events: usize,
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventStore {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            max_events: 10000,
        }
    }

    /// Set maximum events to keep.
    pub fn max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Get all stored events.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Get events filtered by type.
    pub fn events_by_type(&self, event_type: &SessionEventType) -> Vec<SessionEvent> {
        self.events()
            .into_iter()
            .filter(|event| &event.event_type == event_type)
            .collect()
    }

    /// Clear all events.
    pub fn clear(&self) {
        self.events
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl SessionEventHandler for InMemoryEventStore {
    fn handle(&self, event: &SessionEvent) {
        let mut events = self
            .events
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        events.push(event.clone());
        if events.len() > self.max_events {
            events.remove(0);
        }
    }
}

/// The main audit logger.
#[derive(Clone)]
pub struct AuditLogger {
    handlers: Arc<Vec<Arc<dyn SessionEventHandler>>>,
    enabled: bool,
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditLogger {
    /// Create a new audit logger with no handlers.
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Vec::new()),
            enabled: true,
        }
    }

    /// Create an audit logger with stdout logging.
    pub fn with_stdout() -> Self {
        Self::new().add_handler(StdoutHandler::new())
    }

    /// Add an event handler.
    pub fn add_handler<H: SessionEventHandler + 'static>(mut self, handler: H) -> Self {
        let handlers = Arc::make_mut(&mut self.handlers);
        handlers.push(Arc::new(handler));
        self
    }

    /// Add a closure as event handler.
    pub fn with_handler<F>(self, handler: F) -> Self
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.add_handler(ClosureHandler::new(handler))
    }

    /// Enable or disable the logger.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Log a session event.
    pub fn log(&self, event: SessionEvent) {
        if !self.enabled {
            return;
        }

        for handler in self.handlers.iter() {
            handler.handle(&event);
        }
    }
}

/// Global audit logger instance.
static GLOBAL_LOGGER: std::sync::OnceLock<AuditLogger> = std::sync::OnceLock::new();

/// Initialize the global audit logger.
pub fn init_global_logger(logger: AuditLogger) {
    let _ = GLOBAL_LOGGER.set(logger);
}

/// Get the global audit logger.
pub fn global_logger() -> &'static AuditLogger {
    GLOBAL_LOGGER.get_or_init(AuditLogger::new)
}

/// Log a session event using the global logger.
pub fn audit_log(event: SessionEvent) {
    global_logger().log(event);
}

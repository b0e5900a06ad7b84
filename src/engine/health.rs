//! engine::health
//!
//! Validation messages and the report built from running the rules.
//!
//! # Architecture
//!
//! Every rule produces [`ValidationMessage`]s. The engine collects all of
//! them into one [`ValidationReport`] along with summary counters taken from
//! the context. Messages have stable, deterministic IDs computed from the
//! rule code and the subject the message is about, so the same problem
//! reports the same ID across runs.
//!
//! # Example
//!
//! ```
//! use metadv::engine::health::{Severity, ValidationMessage, ValidationReport};
//!
//! let mut report = ValidationReport::new();
//! report.add(ValidationMessage::warning(
//!     "column_no_connection",
//!     "stg_customers.notes",
//!     "Column 'notes' in source 'stg_customers' has no connection",
//! ));
//!
//! assert!(!report.has_errors());
//! assert_eq!(report.warnings().count(), 1);
//! assert!(report.messages()[0].id.as_str().starts_with("column_no_connection:"));
//! ```

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Severity of a validation message.
///
/// Severity determines whether the message blocks generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks generation.
    Error,

    /// Surfaced for visibility; never blocks.
    Warning,
}

impl Severity {
    /// Check if this severity blocks generation.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A stable, deterministic message identifier.
///
/// # Example
///
/// ```
/// use metadv::engine::health::MessageId;
///
/// let id = MessageId::new("entity_no_source", "customer");
/// assert!(id.as_str().starts_with("entity_no_source:"));
/// assert_eq!(id, MessageId::new("entity_no_source", "customer"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// Create a message ID from a rule code and a subject.
    ///
    /// The ID is formatted as `code:hash(subject)` where hash is a truncated
    /// SHA-256 of the subject.
    pub fn new(code: &str, subject: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(subject.as_bytes());
        let hash = hasher.finalize();
        let short_hash = hex::encode(&hash[..4]); // 8 hex chars
        Self(format!("{}:{}", code, short_hash))
    }

    /// Get the string representation of the ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for MessageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// One message produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    /// Stable identifier.
    pub id: MessageId,
    /// Error or warning.
    pub severity: Severity,
    /// Code of the rule that produced the message.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationMessage {
    /// Create a message. `subject` identifies what the message is about and
    /// feeds the stable ID.
    pub fn new(
        severity: Severity,
        code: &str,
        subject: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: MessageId::new(code, subject),
            severity,
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// Create an error-severity message.
    pub fn error(code: &str, subject: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, subject, message)
    }

    /// Create a warning-severity message.
    pub fn warning(code: &str, subject: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, subject, message)
    }

    /// Check if this message blocks generation.
    pub fn is_blocking(&self) -> bool {
        self.severity.is_blocking()
    }
}

impl std::fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Counters describing the validated model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    /// Unique targets declared.
    pub total_targets: usize,
    /// Columns across all sources.
    pub total_columns: usize,
    /// Columns with at least one connection.
    pub columns_with_connections: usize,
    /// Error-severity messages.
    pub error_count: usize,
    /// Warning-severity messages.
    pub warning_count: usize,
}

/// Aggregated result of running every registered rule.
///
/// Serializes as `{errors, warnings, summary}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    messages: Vec<ValidationMessage>,
    totals: ValidationSummary,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the model counters.
    pub fn set_totals(&mut self, total_targets: usize, total_columns: usize, connected: usize) {
        self.totals.total_targets = total_targets;
        self.totals.total_columns = total_columns;
        self.totals.columns_with_connections = connected;
    }

    /// Add a message to the report.
    pub fn add(&mut self, message: ValidationMessage) {
        self.messages.push(message);
    }

    /// Add several messages to the report.
    pub fn extend(&mut self, messages: impl IntoIterator<Item = ValidationMessage>) {
        self.messages.extend(messages);
    }

    /// All messages in rule order.
    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    /// Error-severity messages.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(|m| m.is_blocking())
    }

    /// Warning-severity messages.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(|m| !m.is_blocking())
    }

    /// Check if any message blocks generation.
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.is_blocking())
    }

    /// Messages produced by one rule.
    pub fn by_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a ValidationMessage> {
        self.messages.iter().filter(move |m| m.code == code)
    }

    /// Find a message by ID.
    pub fn find(&self, id: &MessageId) -> Option<&ValidationMessage> {
        self.messages.iter().find(|m| &m.id == id)
    }

    /// Check if the report has no messages at all.
    pub fn is_clean(&self) -> bool {
        self.messages.is_empty()
    }

    /// Summary counters, including message counts.
    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary {
            error_count: self.errors().count(),
            warning_count: self.warnings().count(),
            ..self.totals
        }
    }

    /// Format the report for display. Warnings are listed only when asked.
    pub fn format(&self, include_warnings: bool) -> String {
        let summary = self.summary();
        let mut lines = vec![format!(
            "Checked {} targets, {} columns ({} connected): {} errors, {} warnings",
            summary.total_targets,
            summary.total_columns,
            summary.columns_with_connections,
            summary.error_count,
            summary.warning_count
        )];

        let shown: Vec<&ValidationMessage> = self
            .messages
            .iter()
            .filter(|m| include_warnings || m.is_blocking())
            .collect();
        if !shown.is_empty() {
            lines.push(String::new());
        }
        for message in shown {
            let severity = if message.is_blocking() { "ERROR" } else { "WARN" };
            lines.push(format!("[{}] {} ({})", severity, message.message, message.id));
        }

        if !include_warnings && summary.warning_count > 0 {
            lines.push(String::new());
            lines.push("Run with --verbose to list warnings.".to_string());
        }

        lines.join("\n")
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct View<'a> {
            errors: Vec<&'a ValidationMessage>,
            warnings: Vec<&'a ValidationMessage>,
            summary: ValidationSummary,
        }

        View {
            errors: self.errors().collect(),
            warnings: self.warnings().collect(),
            summary: self.summary(),
        }
        .serialize(serializer)
    }
}

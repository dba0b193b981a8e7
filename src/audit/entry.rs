//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of user mutation recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Import,
    Assign,
    Rename,
    Correct,
    Ignore,
    Unignore,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Import => write!(f, "IMPORT"),
            Action::Assign => write!(f, "ASSIGN"),
            Action::Rename => write!(f, "RENAME"),
            Action::Correct => write!(f, "CORRECT"),
            Action::Ignore => write!(f, "IGNORE"),
            Action::Unignore => write!(f, "UNIGNORE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the mutation happened (UTC)
    pub timestamp: DateTime<Utc>,

    pub action: Action,

    /// What was acted on: a store, a category, a (date, store) pair or a file list
    pub target: String,

    /// Structured parameters of the mutation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    /// Number of transactions affected
    #[serde(default)]
    pub affected: usize,
}

impl AuditEntry {
    pub fn new(action: Action, target: impl Into<String>, affected: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            target: target.into(),
            details: None,
            affected,
        }
    }

    /// Attach serialized parameters; values that fail to serialize are dropped
    pub fn with_details<T: Serialize>(mut self, details: &T) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} ({} affected)",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.action,
            self.target,
            self.affected
        );

        if let Some(details) = &self.details {
            output.push_str(&format!("\n  {}", details));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Ignore.to_string(), "IGNORE");
        assert_eq!(Action::Unignore.to_string(), "UNIGNORE");
    }

    #[test]
    fn test_entry_serialization() {
        let entry = AuditEntry::new(Action::Rename, "Groceries", 3)
            .with_details(&json!({"from": "Groceries", "to": "Food"}));

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"action\":\"rename\""));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.action, Action::Rename);
        assert_eq!(back.affected, 3);
        assert_eq!(back.details, entry.details);
    }

    #[test]
    fn test_format_human_readable() {
        let entry = AuditEntry::new(Action::Assign, "Tesco", 2);
        let text = entry.format_human_readable();
        assert!(text.contains("ASSIGN Tesco"));
        assert!(text.contains("2 affected"));
    }
}

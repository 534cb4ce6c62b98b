use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an operator notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Success => f.write_str("success"),
            NoticeKind::Error => f.write_str("error"),
            NoticeKind::Warning => f.write_str("warning"),
            NoticeKind::Info => f.write_str("info"),
        }
    }
}

/// Port for transient operator notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// A yes/no question put to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
}

/// Port for yes/no confirmation prompts
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool;
}

/// Notifier that only logs, for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Error => tracing::error!(kind = %kind, "{}", message),
            NoticeKind::Warning => tracing::warn!(kind = %kind, "{}", message),
            NoticeKind::Success | NoticeKind::Info => tracing::info!(kind = %kind, "{}", message),
        }
    }
}

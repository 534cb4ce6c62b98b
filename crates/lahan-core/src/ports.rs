//! Port trait definitions
//!
//! These traits define the interfaces the UI collaborators must implement.

pub mod notify;

pub use notify::{ConfirmationPrompt, Confirmer, NoticeKind, Notifier, TracingNotifier};

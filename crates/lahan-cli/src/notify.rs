//! Console implementations of the notification and confirmation ports

use dialoguer::Confirm;
use lahan_core::ports::{ConfirmationPrompt, Confirmer, NoticeKind, Notifier};

use crate::output::OutputWriter;

impl Notifier for OutputWriter {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Success => self.success(message),
            NoticeKind::Info => self.info(message),
            NoticeKind::Warning => self.warning(message),
            NoticeKind::Error => self.error(message),
        }
    }
}

/// Asks on the terminal
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool {
        match Confirm::new().with_prompt(&prompt.message).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "Confirmation prompt failed; treating as no");
                false
            }
        }
    }
}

/// Answers yes without asking (`--yes`)
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool {
        tracing::debug!(title = %prompt.title, "Confirmation skipped");
        true
    }
}

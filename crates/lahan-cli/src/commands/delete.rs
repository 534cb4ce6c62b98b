//! Delete command implementation

use crate::cli::DeleteArgs;
use crate::notify::{AssumeYes, TerminalConfirmer};
use crate::output::OutputWriter;
use crate::output_types::DeleteOutput;
use anyhow::Result;
use lahan_core::models::RecordKind;
use lahan_core::ports::{Confirmer, Notifier, TracingNotifier};
use lahan_editor::PersistenceCoordinator;
use lahan_store::ports::ParcelStore;
use std::sync::Arc;

use super::load_catalog;

pub async fn execute(
    args: &DeleteArgs,
    store: Arc<dyn ParcelStore>,
    output: Arc<OutputWriter>,
) -> Result<()> {
    let kind: RecordKind = args.kind.parse()?;
    let mut catalog = load_catalog(store.as_ref(), &output).await?;

    // JSON mode reports through the result object only
    let notifier: Arc<dyn Notifier> =
        if output.is_json() { Arc::new(TracingNotifier) } else { output.clone() };
    let mut coordinator = PersistenceCoordinator::new(store, notifier);

    let confirmer: &dyn Confirmer = if args.yes { &AssumeYes } else { &TerminalConfirmer };
    let deleted = coordinator.delete_interactive(kind, &args.id, confirmer, &mut catalog).await?;

    if output.is_json() {
        output.result(DeleteOutput { kind: kind.to_string(), id: args.id.clone(), deleted })?;
    } else if !deleted {
        output.info("Delete cancelled");
    }
    Ok(())
}

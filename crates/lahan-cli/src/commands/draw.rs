//! Draw command implementation
//!
//! Reads console commands from stdin and drives a drawing session. Store
//! calls run in the background; the console keeps accepting clicks while a
//! save or delete is in flight.

use crate::cli::DrawArgs;
use crate::console_input::{ConsoleCommand, HELP};
use crate::output::OutputWriter;
use anyhow::Result;
use futures::FutureExt;
use lahan_core::config::LayeredConfig;
use lahan_core::models::{Point, PolygonStatus};
use lahan_editor::{
    Catalog, ClickEvent, ClickOutcome, DeleteResponse, DrawingSession, PersistenceCoordinator,
    RenderSet, SaveResponse,
};
use lahan_store::ports::ParcelStore;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::list::print_catalog;

enum Settled {
    Save(SaveResponse),
    Delete(DeleteResponse),
}

type InFlight = Pin<Box<dyn Future<Output = Settled> + Send>>;

struct Console {
    session: DrawingSession,
    catalog: Catalog,
    coordinator: PersistenceCoordinator,
    output: Arc<OutputWriter>,
    in_flight: Option<InFlight>,
}

pub async fn execute(
    args: &DrawArgs,
    store: Arc<dyn ParcelStore>,
    config: &LayeredConfig,
    output: Arc<OutputWriter>,
) -> Result<()> {
    let catalog = match super::load_catalog(store.as_ref(), &output).await {
        Ok(catalog) => catalog,
        Err(e) => {
            output.error(format!("{:#}", e));
            output.warning("Drawing without saved parcels; cross-parcel checks are disabled");
            Catalog::new()
        }
    };

    let mut session = DrawingSession::new(config.session_settings());
    if let Some(name) = &args.name {
        session.set_draft_name(name.clone());
    }

    let mut console = Console {
        session,
        catalog,
        coordinator: PersistenceCoordinator::new(store, output.clone()),
        output: output.clone(),
        in_flight: None,
    };

    if !output.is_json() {
        output.info("Drawing console ready. Type 'help' for commands");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            settled = wait_for(&mut console.in_flight) => {
                console.in_flight = None;
                console.settle(settled);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() || line.trim_start().starts_with('#') {
                    continue;
                }
                match line.parse::<ConsoleCommand>() {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(command) => console.handle(command)?,
                    Err(e) => output.error(e),
                }
            }
        }
    }

    // Let an outstanding store call finish before exiting
    if let Some(pending) = console.in_flight.take() {
        let settled = pending.await;
        console.settle(settled);
    }

    Ok(())
}

async fn wait_for(in_flight: &mut Option<InFlight>) -> Settled {
    match in_flight {
        Some(pending) => pending.await,
        None => std::future::pending().await,
    }
}

impl Console {
    fn handle(&mut self, command: ConsoleCommand) -> Result<()> {
        match command {
            ConsoleCommand::Click { lat, lng } => {
                let outcome = self.session.handle_click(ClickEvent::at(Point::new(lat, lng)), &self.catalog);
                self.report_click(outcome);
            }
            ConsoleCommand::Pick(index) => match self.session.vertices().get(index).copied() {
                Some(point) => {
                    let outcome =
                        self.session.handle_click(ClickEvent::on_vertex(point, index), &self.catalog);
                    self.report_click(outcome);
                }
                None => self.output.error(format!("No vertex {}", index)),
            },
            ConsoleCommand::Mode(mode) => {
                self.session.set_mode(mode);
                self.output.info(format!("Mode: {}", mode));
            }
            ConsoleCommand::Name(name) => {
                self.output.info(format!("Name: {}", name));
                self.session.set_draft_name(name);
            }
            ConsoleCommand::Save => self.start_save(),
            ConsoleCommand::Reset => {
                self.session.reset();
                self.output.info("Session reset");
            }
            ConsoleCommand::Status => self.print_status()?,
            ConsoleCommand::Render => {
                self.output.result(RenderSet::build(&self.session, &self.catalog))?;
            }
            ConsoleCommand::List => print_catalog(&self.catalog, None, &self.output)?,
            ConsoleCommand::Delete { kind, id } => {
                match self.coordinator.request_delete(kind, &id, &self.catalog) {
                    Ok(prompt) => {
                        self.output.warning(&prompt.message);
                        self.output.info("Type 'confirm' or 'cancel'");
                    }
                    Err(e) => self.output.error(e),
                }
            }
            ConsoleCommand::Confirm => self.start_delete(),
            ConsoleCommand::Cancel => {
                if self.coordinator.cancel_delete() {
                    self.output.info("Delete cancelled");
                } else {
                    self.output.warning("No delete pending");
                }
            }
            ConsoleCommand::Help => println!("{}", HELP),
            ConsoleCommand::Quit => {}
        }
        Ok(())
    }

    fn report_click(&self, outcome: ClickOutcome) {
        let status = self.session.status(&self.catalog);
        match outcome {
            ClickOutcome::Appended => {
                self.output.info(format!(
                    "Vertex {} added ({})",
                    self.session.vertices().len(),
                    status
                ));
                if status == PolygonStatus::Invalid {
                    self.output.warning("Boundary crosses itself or a saved parcel");
                }
            }
            ClickOutcome::Closed => match status {
                PolygonStatus::Complete => self.output.success(format!(
                    "Boundary closed: {:.2} ha",
                    self.session.area_hectares()
                )),
                _ => self.output.warning(format!("Boundary closed but {}", status)),
            },
            ClickOutcome::Ignored => {
                self.output.warning("Boundary is complete; save or reset before drawing more")
            }
            ClickOutcome::WarehouseStaged => {
                if let Some(point) = self.session.pending_warehouse() {
                    self.output.info(format!("Warehouse location staged at {}", point));
                }
            }
            ClickOutcome::Removed { index } => self.output.info(format!(
                "Removed vertex {} ({} left, {})",
                index,
                self.session.vertices().len(),
                status
            )),
            ClickOutcome::NoOp => self.output.info("No vertex close enough to delete"),
            ClickOutcome::Rejected => self.output.error("Coordinates must be finite numbers"),
        }
    }

    fn start_save(&mut self) {
        if self.in_flight.is_some() {
            self.output.warning("A store call is still in flight");
            return;
        }

        match self.coordinator.prepare_save(&self.session, &self.catalog) {
            Ok(request) => {
                self.output.info(format!("Saving '{}'...", request.record.name()));
                let pending = self.coordinator.submit(request).map(Settled::Save);
                self.in_flight = Some(Box::pin(pending));
            }
            Err(e) => self.output.warning(e),
        }
    }

    fn start_delete(&mut self) {
        if self.in_flight.is_some() {
            self.output.warning("A store call is still in flight");
            return;
        }

        match self.coordinator.confirm_delete() {
            Some(pending) => self.in_flight = Some(Box::pin(pending.map(Settled::Delete))),
            None => self.output.warning("No delete pending"),
        }
    }

    fn settle(&mut self, settled: Settled) {
        // Outcomes are reported through the coordinator's notifier
        let result = match settled {
            Settled::Save(response) => self
                .coordinator
                .apply_save(&mut self.session, &mut self.catalog, response)
                .map(|_| ()),
            Settled::Delete(response) => self.coordinator.apply_delete(&mut self.catalog, response),
        };
        if let Err(e) = result {
            tracing::debug!(error = %e, "Store call settled with an error");
        }
    }

    fn print_status(&self) -> Result<()> {
        let status = self.session.status(&self.catalog);

        if self.output.is_json() {
            return self.output.result(serde_json::json!({
                "mode": self.session.mode(),
                "status": status,
                "vertices": self.session.vertices(),
                "staged_warehouse": self.session.pending_warehouse(),
                "name": self.session.draft_name(),
                "area_hectares": self.session.area_hectares(),
                "saving": self.in_flight.is_some(),
            }));
        }

        self.output.section("Session");
        self.output.kv("Mode", self.session.mode());
        self.output.kv("Status", status);
        self.output.kv("Vertices", self.session.vertices().len());
        for (index, vertex) in self.session.vertices().iter().enumerate() {
            println!("  {:>3}  {}", index, vertex);
        }
        if let Some(point) = self.session.pending_warehouse() {
            self.output.kv("Warehouse", point);
        }
        self.output.kv("Area", format!("{:.2} ha", self.session.area_hectares()));
        if !self.session.draft_name().is_empty() {
            self.output.kv("Name", self.session.draft_name());
        }
        self.output.kv(
            "Catalog",
            format!(
                "{} parcels, {} warehouses",
                self.catalog.parcel_count(),
                self.catalog.warehouse_count()
            ),
        );
        if let Some(request) = self.coordinator.pending_delete() {
            self.output.kv("Pending delete", format!("{} '{}'", request.kind, request.name));
        }
        Ok(())
    }
}

//! The HTTP store adapter talking to the development server over a real socket

use std::net::SocketAddr;
use std::sync::Arc;

use lahan_api::{create_router, AppState};
use lahan_core::error::LahanError;
use lahan_core::models::{EditingMode, Point, PolygonStatus, RecordKind};
use lahan_core::ports::{ConfirmationPrompt, Confirmer, TracingNotifier};
use lahan_editor::{Catalog, ClickEvent, DrawingSession, PersistenceCoordinator};
use lahan_store::ports::ParcelStore;
use lahan_store::{HttpParcelStore, MemoryParcelStore};

async fn spawn_server() -> SocketAddr {
    let state = Arc::new(AppState::new(Arc::new(MemoryParcelStore::new())));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    addr
}

struct AlwaysYes;

impl Confirmer for AlwaysYes {
    fn confirm(&self, _prompt: &ConfirmationPrompt) -> bool {
        true
    }
}

#[tokio::test]
async fn test_session_saves_through_http_store() {
    let addr = spawn_server().await;
    let store = Arc::new(HttpParcelStore::new(format!("http://{}/api", addr)).unwrap());
    let mut coordinator = PersistenceCoordinator::new(store.clone(), Arc::new(TracingNotifier));

    let mut catalog = Catalog::load(store.as_ref()).await.unwrap();
    assert!(catalog.is_empty());

    let mut session = DrawingSession::default();
    for (lat, lng) in [(-5.30, 105.40), (-5.30, 105.41), (-5.31, 105.41), (-5.31, 105.40), (-5.3002, 105.4001)] {
        session.handle_click(ClickEvent::at(Point::new(lat, lng)), &catalog);
    }
    assert_eq!(session.status(&catalog), PolygonStatus::Complete);

    let parcel = coordinator.save_as(&mut session, &mut catalog, "Kebun A").await.unwrap();

    session.set_mode(EditingMode::PlaceWarehouse);
    session.handle_click(ClickEvent::at(Point::new(-5.35, 105.5)), &catalog);
    coordinator.save_as(&mut session, &mut catalog, "Gudang Pusat").await.unwrap();

    // Fresh load sees both records, with coordinates back in (lat, lng) order
    let reloaded = Catalog::load(store.as_ref()).await.unwrap();
    assert_eq!(reloaded.parcel_count(), 1);
    assert_eq!(reloaded.warehouse_count(), 1);
    let loaded = &reloaded.parcels_sorted()[0];
    assert_eq!(loaded.ring.points()[0], Point::new(-5.30, 105.40));
    assert!(loaded.ring.is_closed());

    let deleted = coordinator
        .delete_interactive(RecordKind::Parcel, parcel.id(), &AlwaysYes, &mut catalog)
        .await
        .unwrap();
    assert!(deleted);
    assert!(store.list_parcels().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_store_rejection_surfaces_status() {
    let addr = spawn_server().await;
    let store = HttpParcelStore::new(format!("http://{}/api", addr)).unwrap();

    let err = store
        .delete_parcel(&lahan_core::models::ParcelId("missing".to_string()))
        .await
        .unwrap_err();

    match err {
        LahanError::Store { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("not found"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

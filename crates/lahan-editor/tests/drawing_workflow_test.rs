//! Full operator workflow against the in-memory store

use lahan_core::models::{EditingMode, Point, PolygonStatus, Record};
use lahan_core::ports::TracingNotifier;
use lahan_editor::{Catalog, ClickEvent, ClickOutcome, DrawingSession, PersistenceCoordinator};
use lahan_store::ports::ParcelStore;
use lahan_store::MemoryParcelStore;
use std::sync::Arc;

fn click(session: &mut DrawingSession, catalog: &Catalog, lat: f64, lng: f64) -> ClickOutcome {
    session.handle_click(ClickEvent::at(Point::new(lat, lng)), catalog)
}

#[tokio::test]
async fn test_draw_save_and_reload() {
    let store = Arc::new(MemoryParcelStore::new());
    let coordinator = PersistenceCoordinator::new(store.clone(), Arc::new(TracingNotifier));
    let mut catalog = Catalog::load(store.as_ref()).await.unwrap();
    let mut session = DrawingSession::default();

    for (lat, lng) in [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)] {
        assert_eq!(click(&mut session, &catalog, lat, lng), ClickOutcome::Appended);
        assert_ne!(session.status(&catalog), PolygonStatus::Complete);
    }
    assert_eq!(click(&mut session, &catalog, 0.0003, 0.0004), ClickOutcome::Closed);
    assert_eq!(session.status(&catalog), PolygonStatus::Complete);

    let saved = coordinator.save_as(&mut session, &mut catalog, "Plot A").await.unwrap();
    assert!(session.vertices().is_empty());

    let Record::Parcel(parcel) = saved else { panic!("expected a parcel") };
    assert_eq!(parcel.name, "Plot A");
    assert_eq!(parcel.ring.len(), 5);
    assert_eq!(parcel.ring.first(), parcel.ring.last());
    assert!(parcel.area_hectares > 0.0);

    session.set_mode(EditingMode::PlaceWarehouse);
    click(&mut session, &catalog, 0.5, 0.5);
    coordinator.save_as(&mut session, &mut catalog, "Gudang Pusat").await.unwrap();

    let reloaded = Catalog::load(store.as_ref()).await.unwrap();
    assert_eq!(reloaded.parcel_count(), 1);
    assert_eq!(reloaded.warehouse_count(), 1);
    assert_eq!(store.list_parcels().await.unwrap(), vec![parcel]);
}

#[tokio::test]
async fn test_new_boundary_touching_saved_parcel_is_invalid() {
    let store = Arc::new(MemoryParcelStore::new());
    let coordinator = PersistenceCoordinator::new(store.clone(), Arc::new(TracingNotifier));
    let mut catalog = Catalog::new();
    let mut session = DrawingSession::default();

    for (lat, lng) in [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)] {
        click(&mut session, &catalog, lat, lng);
    }
    coordinator.save_as(&mut session, &mut catalog, "Plot A").await.unwrap();

    // Neighbour reusing the eastern edge of Plot A
    for (lat, lng) in [(0.0, 1.0), (1.0, 1.0), (1.0, 2.0)] {
        click(&mut session, &catalog, lat, lng);
    }
    assert_eq!(session.status(&catalog), PolygonStatus::Invalid);

    let err = coordinator.save_as(&mut session, &mut catalog, "Plot B").await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(catalog.parcel_count(), 1);
}

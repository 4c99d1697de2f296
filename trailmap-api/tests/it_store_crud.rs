//! CRUD, cascade and persistence behavior of the store.

mod support;

use support::{memory_store, park_input, poi_input, trail_input, TICKNOCK_BOUNDARY, TICKNOCK_PATH};
use tempfile::TempDir;
use trailmap_api::{seed_demo, ApiError, TrailStore};
use trailmap_spatial::BBox;

#[tokio::test]
async fn park_crud_round_trip() {
    let store = memory_store().await;

    let park = store
        .create_park(park_input("Ticknock Forest", TICKNOCK_BOUNDARY))
        .await
        .unwrap();
    assert_eq!(park.id, 1);
    assert_eq!(
        store.get_park(park.id).await.unwrap().name,
        "Ticknock Forest"
    );

    let mut update = park_input("Ticknock", TICKNOCK_BOUNDARY);
    update.boundary = None;
    let updated = store.update_park(park.id, update).await.unwrap();
    assert_eq!(updated.name, "Ticknock");
    assert_eq!(updated.created_at, park.created_at);
    assert!(updated.updated_at >= park.updated_at);
    // absent boundary keeps the stored geometry
    assert_eq!(updated.boundary, park.boundary);

    store.delete_park(park.id).await.unwrap();
    assert!(matches!(
        store.get_park(park.id).await,
        Err(ApiError::NotFound { .. })
    ));
}

#[tokio::test]
async fn ids_are_never_reused() {
    let store = memory_store().await;
    let first = store
        .create_park(park_input("First", TICKNOCK_BOUNDARY))
        .await
        .unwrap();
    let second = store
        .create_park(park_input("Second", TICKNOCK_BOUNDARY))
        .await
        .unwrap();
    assert_eq!((first.id, second.id), (1, 2));

    store.delete_park(second.id).await.unwrap();
    let third = store
        .create_park(park_input("Third", TICKNOCK_BOUNDARY))
        .await
        .unwrap();
    assert_eq!(third.id, 3);
}

#[tokio::test]
async fn validation_rejects_bad_entities() {
    let store = memory_store().await;

    let err = store
        .create_park(park_input("", TICKNOCK_BOUNDARY))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Core(_)));

    let mut nan_length = trail_input("NaN Trail", "beginner", TICKNOCK_PATH, None);
    nan_length.length_km = f64::NAN;
    let err = store.create_trail(nan_length).await.unwrap_err();
    assert!(matches!(err, ApiError::Core(_)));

    let err = store
        .create_trail(trail_input("Bad Grade", "impossible", TICKNOCK_PATH, None))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Core(_)));

    let mut no_boundary = park_input("No Boundary", TICKNOCK_BOUNDARY);
    no_boundary.boundary = None;
    let err = store.create_park(no_boundary).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn trail_park_reference_must_exist() {
    let store = memory_store().await;
    let err = store
        .create_trail(trail_input("Orphan", "beginner", TICKNOCK_PATH, Some(99)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::DanglingPark(99)));

    let err = store
        .create_poi(poi_input("Orphan", "cafe", "POINT(-6.26 53.25)", Some(99)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::DanglingPark(99)));
}

#[tokio::test]
async fn park_delete_cascades_to_trails_and_pois() {
    let store = memory_store().await;
    let park = store
        .create_park(park_input("Ticknock Forest", TICKNOCK_BOUNDARY))
        .await
        .unwrap();
    let in_park = store
        .create_trail(trail_input(
            "In Park",
            "intermediate",
            TICKNOCK_PATH,
            Some(park.id),
        ))
        .await
        .unwrap();
    let loose = store
        .create_trail(trail_input(
            "Loose",
            "beginner",
            "LINESTRING(-8.45 52.12, -8.46 52.13)",
            None,
        ))
        .await
        .unwrap();
    let poi = store
        .create_poi(poi_input(
            "Trailhead",
            "trailhead",
            "POINT(-6.26 53.25)",
            Some(park.id),
        ))
        .await
        .unwrap();

    let cascade = store.delete_park(park.id).await.unwrap();
    assert_eq!(cascade.trails_deleted, 1);
    assert_eq!(cascade.pois_deleted, 1);

    assert!(store.get_trail(in_park.id).await.is_err());
    assert!(store.get_poi(poi.id).await.is_err());
    assert_eq!(store.get_trail(loose.id).await.unwrap().name, "Loose");

    // the park-scoped listings fail along with the park
    assert!(matches!(
        store.trails_in_park(park.id).await,
        Err(ApiError::NotFound { .. })
    ));
    assert!(matches!(
        store.pois_in_park(park.id).await,
        Err(ApiError::NotFound { .. })
    ));
}

#[tokio::test]
async fn update_reindexes_geometry() {
    let store = memory_store().await;
    let trail = store
        .create_trail(trail_input("Mover", "beginner", TICKNOCK_PATH, None))
        .await
        .unwrap();

    let dublin = BBox::new(53.0, 53.5, -6.5, -6.0);
    let kerry = BBox::new(51.9, 52.3, -9.8, -9.3);
    assert_eq!(store.list_trails(Some(&dublin)).await.unwrap().len(), 1);
    assert!(store.list_trails(Some(&kerry)).await.unwrap().is_empty());

    store
        .update_trail(
            trail.id,
            trail_input("Mover", "beginner", "LINESTRING(-9.6 52.0, -9.5 52.1)", None),
        )
        .await
        .unwrap();
    assert!(store.list_trails(Some(&dublin)).await.unwrap().is_empty());
    assert_eq!(store.list_trails(Some(&kerry)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = TrailStore::file(dir.path()).await.unwrap();
        let park = store
            .create_park(park_input("Ticknock Forest", TICKNOCK_BOUNDARY))
            .await
            .unwrap();
        store
            .create_trail(trail_input(
                "Ticknock Trail",
                "intermediate",
                TICKNOCK_PATH,
                Some(park.id),
            ))
            .await
            .unwrap();
    }

    let reopened = TrailStore::file(dir.path()).await.unwrap();
    let counts = reopened.counts().await;
    assert_eq!((counts.parks, counts.trails, counts.pois), (1, 1, 0));

    let park = reopened.get_park(1).await.unwrap();
    assert_eq!(park.name, "Ticknock Forest");
    let trail = reopened.get_trail(1).await.unwrap();
    assert_eq!(trail.park_id, Some(1));

    // id allocation resumes past persisted entities
    let next = reopened
        .create_park(park_input("Second", TICKNOCK_BOUNDARY))
        .await
        .unwrap();
    assert_eq!(next.id, 2);
}

#[tokio::test]
async fn seed_runs_once() {
    let store = memory_store().await;
    let first = seed_demo(&store).await.unwrap();
    assert!(first.seeded);
    assert_eq!(first.trails, 4);
    let counts = store.counts().await;
    assert_eq!((counts.parks, counts.trails, counts.pois), (1, 4, 1));

    let second = seed_demo(&store).await.unwrap();
    assert!(!second.seeded);
    assert_eq!(store.counts().await.trails, 4);
}

//! End-to-end pipeline tests against in-memory fakes.
//!
//! The fakes implement the same seams production wires to Postgres and the
//! live directory, so these tests exercise the full reconciliation machine:
//! create/update/skip decisions, validation gating, count conservation,
//! region isolation, capping, and cooperative cancellation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use serde_json::json;
use tokio::time::Duration;

use scoopdb_core::{Coordinates, NewImportedReview, NewShopRecord, RegionConfig};
use scoopdb_directory::{DirectoryError, PlaceCandidate, PlaceDetail, PlaceReview, SearchFilters};
use scoopdb_import::{
    resolve_search, CancelToken, DirectoryProvider, ExistingShop, ImportError, ImportOptions,
    Importer, ImporterConfig, InsertOutcome, SearchParams, ShopStore, StoreError,
};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct DirectoryState {
    geocode: HashMap<String, Coordinates>,
    text_results: Vec<PlaceCandidate>,
    nearby_results: Vec<PlaceCandidate>,
    details: HashMap<String, PlaceDetail>,
    detail_calls: Vec<String>,
    fail_searches: bool,
    cancel_after_first_detail: Option<CancelToken>,
}

#[derive(Clone, Default)]
struct FakeDirectory {
    state: Arc<Mutex<DirectoryState>>,
}

impl FakeDirectory {
    fn lock(&self) -> std::sync::MutexGuard<'_, DirectoryState> {
        self.state.lock().unwrap()
    }

    fn detail_calls(&self) -> Vec<String> {
        self.lock().detail_calls.clone()
    }
}

impl DirectoryProvider for FakeDirectory {
    async fn geocode(&self, address: &str) -> Result<Coordinates, DirectoryError> {
        self.lock()
            .geocode
            .get(address)
            .copied()
            .ok_or_else(|| DirectoryError::GeocodeNotFound {
                address: address.to_owned(),
            })
    }

    async fn search_text(
        &self,
        _query: &str,
        _filters: &SearchFilters,
    ) -> Result<Vec<PlaceCandidate>, DirectoryError> {
        let state = self.lock();
        if state.fail_searches {
            return Err(DirectoryError::UnexpectedStatus {
                status: 502,
                url: "fake://search".to_owned(),
            });
        }
        Ok(state.text_results.clone())
    }

    async fn search_nearby(
        &self,
        _center: Coordinates,
        _radius_m: u32,
        _filters: &SearchFilters,
    ) -> Result<Vec<PlaceCandidate>, DirectoryError> {
        let state = self.lock();
        if state.fail_searches {
            return Err(DirectoryError::UnexpectedStatus {
                status: 502,
                url: "fake://nearby".to_owned(),
            });
        }
        Ok(state.nearby_results.clone())
    }

    async fn place_details(&self, external_id: &str) -> Result<PlaceDetail, DirectoryError> {
        let mut state = self.lock();
        state.detail_calls.push(external_id.to_owned());
        if state.detail_calls.len() == 1 {
            if let Some(token) = &state.cancel_after_first_detail {
                token.cancel();
            }
        }
        state
            .details
            .get(external_id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound {
                url: format!("fake://places/{external_id}"),
            })
    }
}

struct StoredShop {
    id: i64,
    record: NewShopRecord,
    update_count: u32,
}

#[derive(Default)]
struct StoreState {
    shops: Vec<StoredShop>,
    reviews: Vec<(i64, NewImportedReview)>,
    next_id: i64,
    force_insert_conflict: bool,
    fail_review_inserts: bool,
    /// Number of initial lookups that report "not found" even when the row
    /// exists, to model a concurrent insert landing mid-import.
    hide_lookups: u32,
    lookups: u32,
}

#[derive(Clone, Default)]
struct FakeStore {
    state: Arc<Mutex<StoreState>>,
}

impl FakeStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    fn seed(&self, external_id: &str, name: &str) -> i64 {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.shops.push(StoredShop {
            id,
            record: NewShopRecord {
                external_id: Some(external_id.to_owned()),
                name: name.to_owned(),
                address: Some("old address".to_owned()),
                latitude: Some(44.0),
                longitude: Some(-93.0),
                phone: None,
                website: None,
                hours: None,
                rating: None,
                imported_by: None,
            },
            update_count: 0,
        });
        id
    }

    fn shop_count(&self) -> usize {
        self.lock().shops.len()
    }

    fn shop(&self, id: i64) -> (NewShopRecord, u32) {
        let state = self.lock();
        let shop = state.shops.iter().find(|s| s.id == id).unwrap();
        (shop.record.clone(), shop.update_count)
    }

    fn review_count(&self) -> usize {
        self.lock().reviews.len()
    }
}

impl ShopStore for FakeStore {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<ExistingShop>, StoreError> {
        let mut state = self.lock();
        state.lookups += 1;
        if state.lookups <= state.hide_lookups {
            return Ok(None);
        }
        Ok(state
            .shops
            .iter()
            .find(|s| s.record.external_id.as_deref() == Some(external_id))
            .map(|s| ExistingShop {
                id: s.id,
                external_id: s.record.external_id.clone(),
            }))
    }

    async fn insert_shop(&self, shop: &NewShopRecord) -> Result<InsertOutcome, StoreError> {
        let mut state = self.lock();
        if state.force_insert_conflict {
            return Ok(InsertOutcome::Conflict);
        }
        let taken = state
            .shops
            .iter()
            .any(|s| s.record.external_id == shop.external_id && shop.external_id.is_some());
        if taken {
            return Ok(InsertOutcome::Conflict);
        }
        state.next_id += 1;
        let id = state.next_id;
        state.shops.push(StoredShop {
            id,
            record: shop.clone(),
            update_count: 0,
        });
        Ok(InsertOutcome::Inserted(id))
    }

    async fn update_shop(&self, id: i64, shop: &NewShopRecord) -> Result<(), StoreError> {
        let mut state = self.lock();
        let existing = state
            .shops
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound { id })?;
        // Identity fields are immutable on update.
        let external_id = existing.record.external_id.clone();
        existing.record = shop.clone();
        existing.record.external_id = external_id;
        existing.update_count += 1;
        Ok(())
    }

    async fn list_external_ids(&self) -> Result<Vec<String>, StoreError> {
        let state = self.lock();
        Ok(state
            .shops
            .iter()
            .filter_map(|s| s.record.external_id.clone())
            .collect())
    }

    async fn insert_reviews(
        &self,
        shop_id: i64,
        reviews: &[NewImportedReview],
    ) -> Result<u64, StoreError> {
        let mut state = self.lock();
        if state.fail_review_inserts {
            return Err(StoreError::Backend("reviews table unavailable".to_owned()));
        }
        for review in reviews {
            state.reviews.push((shop_id, review.clone()));
        }
        Ok(reviews.len() as u64)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn detail(external_id: &str, name: &str) -> PlaceDetail {
    PlaceDetail {
        external_id: external_id.to_owned(),
        name: name.to_owned(),
        address: Some("402 Waffle Way, Minneapolis, MN".to_owned()),
        lat: Some(44.9778),
        lng: Some(-93.2650),
        phone: Some("+1-612-555-0199".to_owned()),
        website: Some("https://example.test/scoops".to_owned()),
        hours: Some(json!({"mon": "12:00-21:00", "sat": "11:00-22:00"})),
        photos: vec![],
        reviews: vec![],
        rating: Some(4.4),
    }
}

fn candidate(external_id: &str, name: &str) -> PlaceCandidate {
    PlaceCandidate {
        external_id: external_id.to_owned(),
        name: name.to_owned(),
        address: None,
        lat: Some(44.9778),
        lng: Some(-93.2650),
        rating: Some(4.4),
        open: true,
    }
}

fn importer(directory: &FakeDirectory, store: &FakeStore) -> Importer<FakeDirectory, FakeStore> {
    // Zero delays so tests never sleep.
    let config = ImporterConfig {
        item_delay: Duration::ZERO,
        region_delay: Duration::ZERO,
        ..ImporterConfig::default()
    };
    Importer::new(directory.clone(), store.clone(), config)
}

// ---------------------------------------------------------------------------
// Single-record reconciliation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn import_one_creates_a_new_shop() {
    let directory = FakeDirectory::default();
    directory
        .lock()
        .details
        .insert("p1".to_owned(), detail("p1", "Sundae Social"));
    let store = FakeStore::default();
    let importer = importer(&directory, &store);

    let options = ImportOptions {
        actor_id: Some("cli-import".to_owned()),
        ..ImportOptions::default()
    };
    let result = importer.import_one("p1", &options).await;

    assert!(result.success);
    assert_eq!(result.imported, 1);
    assert_eq!(result.processed(), 1);
    assert_eq!(result.shop_ids.len(), 1);

    let (record, _) = store.shop(result.shop_ids[0]);
    assert_eq!(record.external_id.as_deref(), Some("p1"));
    assert_eq!(record.name, "Sundae Social");
    assert_eq!(record.imported_by.as_deref(), Some("cli-import"));
}

#[tokio::test]
async fn skipping_an_existing_shop_never_fetches_details() {
    let directory = FakeDirectory::default();
    let store = FakeStore::default();
    let id = store.seed("p1", "Sundae Social");
    let importer = importer(&directory, &store);

    let result = importer.import_one("p1", &ImportOptions::default()).await;

    assert!(result.success);
    assert_eq!(result.skipped, 1);
    assert_eq!(result.shop_ids, vec![id]);
    assert!(directory.detail_calls().is_empty());
}

#[tokio::test]
async fn existing_shop_fails_when_neither_skip_nor_update_is_set() {
    let directory = FakeDirectory::default();
    let store = FakeStore::default();
    store.seed("p1", "Sundae Social");
    let importer = importer(&directory, &store);

    let options = ImportOptions {
        skip_existing: false,
        ..ImportOptions::default()
    };
    let result = importer.import_one("p1", &options).await;

    assert!(!result.success);
    assert_eq!(result.failed, 1);
    assert!(result.errors[0].contains("already exists"));
}

#[tokio::test]
async fn update_existing_refreshes_in_place_and_preserves_identity() {
    let directory = FakeDirectory::default();
    directory
        .lock()
        .details
        .insert("p1".to_owned(), detail("p1", "Sundae Social (Renamed)"));
    let store = FakeStore::default();
    let id = store.seed("p1", "Sundae Social");
    let importer = importer(&directory, &store);

    let options = ImportOptions {
        update_existing: true,
        ..ImportOptions::default()
    };
    let result = importer.import_one("p1", &options).await;

    assert!(result.success);
    assert_eq!(result.imported, 1);
    assert_eq!(result.shop_ids, vec![id]);
    assert_eq!(store.shop_count(), 1);

    let (record, update_count) = store.shop(id);
    assert_eq!(record.name, "Sundae Social (Renamed)");
    assert_eq!(record.external_id.as_deref(), Some("p1"));
    assert_eq!(update_count, 1);
}

#[tokio::test]
async fn validation_gate_blocks_incomplete_records() {
    let directory = FakeDirectory::default();
    let mut bad = detail("p1", "No Fixed Abode Gelato");
    bad.address = None;
    bad.lat = None;
    bad.lng = None;
    directory.lock().details.insert("p1".to_owned(), bad);
    let store = FakeStore::default();
    let importer = importer(&directory, &store);

    let result = importer.import_one("p1", &ImportOptions::default()).await;
    assert_eq!(result.failed, 1);
    assert!(result.errors[0].contains("validation failed"));
    assert_eq!(store.shop_count(), 0);

    // The same record passes when validation is disabled.
    let trusting = ImportOptions {
        validate_before_import: false,
        ..ImportOptions::default()
    };
    let result = importer.import_one("p1", &trusting).await;
    assert_eq!(result.imported, 1);
    assert_eq!(store.shop_count(), 1);
}

#[tokio::test]
async fn insert_conflict_counts_as_skipped_when_skip_is_set() {
    let directory = FakeDirectory::default();
    directory
        .lock()
        .details
        .insert("p1".to_owned(), detail("p1", "Sundae Social"));
    let store = FakeStore::default();
    // A concurrent import commits this row between our lookup and our
    // insert: the first lookup misses, the insert conflicts, the re-lookup
    // resolves the winner's id.
    let id = store.seed("p1", "Sundae Social");
    {
        let mut state = store.lock();
        state.force_insert_conflict = true;
        state.hide_lookups = 1;
    }
    let importer = importer(&directory, &store);

    let result = importer.import_one("p1", &ImportOptions::default()).await;
    assert!(result.success);
    assert_eq!(result.skipped, 1);
    assert_eq!(result.imported, 0);
    assert_eq!(result.shop_ids, vec![id]);
}

#[tokio::test]
async fn insert_conflict_fails_without_skip() {
    let directory = FakeDirectory::default();
    directory
        .lock()
        .details
        .insert("p1".to_owned(), detail("p1", "Sundae Social"));
    let store = FakeStore::default();
    store.lock().force_insert_conflict = true;
    let importer = importer(&directory, &store);

    let options = ImportOptions {
        skip_existing: false,
        ..ImportOptions::default()
    };
    let result = importer.import_one("p1", &options).await;
    assert_eq!(result.failed, 1);
    assert!(result.errors[0].contains("already exists"));
}

#[tokio::test]
async fn reviews_are_imported_alongside_a_created_shop() {
    let directory = FakeDirectory::default();
    let mut with_reviews = detail("p1", "Sundae Social");
    with_reviews.reviews = vec![
        PlaceReview {
            author: Some("Ada".to_owned()),
            rating: Some(5.0),
            text: Some("Incredible salted caramel".to_owned()),
            published_at: Some(Utc.with_ymd_and_hms(2025, 6, 14, 18, 30, 0).unwrap()),
        },
        PlaceReview {
            author: None,
            rating: None,
            text: Some("  ".to_owned()),
            published_at: None,
        },
    ];
    directory.lock().details.insert("p1".to_owned(), with_reviews);
    let store = FakeStore::default();
    let importer = importer(&directory, &store);

    let options = ImportOptions {
        import_reviews: true,
        ..ImportOptions::default()
    };
    let result = importer.import_one("p1", &options).await;

    assert_eq!(result.imported, 1);
    // The no-signal review is dropped.
    assert_eq!(store.review_count(), 1);
}

#[tokio::test]
async fn review_store_failure_never_undoes_the_shop_import() {
    let directory = FakeDirectory::default();
    let mut with_reviews = detail("p1", "Sundae Social");
    with_reviews.reviews = vec![PlaceReview {
        author: Some("Ada".to_owned()),
        rating: Some(5.0),
        text: Some("Incredible salted caramel".to_owned()),
        published_at: None,
    }];
    directory.lock().details.insert("p1".to_owned(), with_reviews);
    let store = FakeStore::default();
    store.lock().fail_review_inserts = true;
    let importer = importer(&directory, &store);

    let options = ImportOptions {
        import_reviews: true,
        ..ImportOptions::default()
    };
    let result = importer.import_one("p1", &options).await;

    assert!(result.success);
    assert_eq!(result.imported, 1);
    assert_eq!(store.shop_count(), 1);
    assert_eq!(store.review_count(), 0);
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_counts_are_conserved_across_mixed_outcomes() {
    let directory = FakeDirectory::default();
    {
        let mut state = directory.lock();
        state.details.insert("new1".to_owned(), detail("new1", "Cone Zone"));
        state.details.insert("new2".to_owned(), detail("new2", "Churn Baby"));
        // "missing" has no detail and will fail.
    }
    let store = FakeStore::default();
    store.seed("known", "Sundae Social");
    let importer = importer(&directory, &store);

    let ids = vec![
        "new1".to_owned(),
        "known".to_owned(),
        "missing".to_owned(),
        "new2".to_owned(),
    ];
    let result = importer.import_batch(&ids, &ImportOptions::default()).await;

    assert_eq!(result.imported, 2);
    assert_eq!(result.skipped, 1);
    assert_eq!(result.failed, 1);
    assert_eq!(result.processed(), 4);
    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("missing: "));
}

#[tokio::test]
async fn repeating_a_batch_is_idempotent_under_skip() {
    let directory = FakeDirectory::default();
    {
        let mut state = directory.lock();
        state.details.insert("p1".to_owned(), detail("p1", "Cone Zone"));
        state.details.insert("p2".to_owned(), detail("p2", "Churn Baby"));
    }
    let store = FakeStore::default();
    let importer = importer(&directory, &store);
    let ids = vec!["p1".to_owned(), "p2".to_owned()];

    let first = importer.import_batch(&ids, &ImportOptions::default()).await;
    assert_eq!(first.imported, 2);
    assert_eq!(store.shop_count(), 2);

    let second = importer.import_batch(&ids, &ImportOptions::default()).await;
    assert!(second.success);
    assert_eq!(second.imported, 0);
    assert_eq!(second.skipped, 2);
    assert_eq!(store.shop_count(), 2);
}

#[tokio::test]
async fn cancelled_batch_processes_nothing() {
    let directory = FakeDirectory::default();
    let store = FakeStore::default();
    let importer = importer(&directory, &store);
    importer.cancel_token().cancel();

    let ids = vec!["p1".to_owned(), "p2".to_owned(), "p3".to_owned()];
    let result = importer.import_batch(&ids, &ImportOptions::default()).await;

    assert_eq!(result.processed(), 0);
    assert_eq!(
        result.errors,
        vec!["cancelled with 3 ids unprocessed".to_owned()]
    );
}

#[tokio::test]
async fn mid_batch_cancellation_keeps_the_partial_aggregate() {
    let directory = FakeDirectory::default();
    let store = FakeStore::default();
    let importer = importer(&directory, &store);
    {
        let mut state = directory.lock();
        state.details.insert("p1".to_owned(), detail("p1", "Cone Zone"));
        state.details.insert("p2".to_owned(), detail("p2", "Churn Baby"));
        state.details.insert("p3".to_owned(), detail("p3", "Scoop Dreams"));
        state.cancel_after_first_detail = Some(importer.cancel_token());
    }

    let ids = vec!["p1".to_owned(), "p2".to_owned(), "p3".to_owned()];
    let result = importer.import_batch(&ids, &ImportOptions::default()).await;

    assert_eq!(result.imported, 1);
    assert_eq!(result.processed(), 1);
    assert_eq!(
        result.errors,
        vec!["cancelled with 2 ids unprocessed".to_owned()]
    );
    assert_eq!(store.shop_count(), 1);
}

// ---------------------------------------------------------------------------
// Search-driven imports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_without_query_or_location_is_rejected() {
    let directory = FakeDirectory::default();
    let store = FakeStore::default();
    let importer = importer(&directory, &store);

    let err = importer
        .import_from_search(&SearchParams::default(), &ImportOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::InvalidSearch));
}

#[tokio::test]
async fn resolving_a_search_needs_no_store_at_all() {
    let directory = FakeDirectory::default();
    directory.lock().text_results = vec![candidate("p1", "Cone Zone")];

    let params = SearchParams {
        query: Some("ice cream".to_owned()),
        ..SearchParams::default()
    };
    let candidates = resolve_search(&directory, &params, 5_000).await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].external_id, "p1");
}

#[tokio::test]
async fn empty_search_yields_the_no_candidate_result() {
    let directory = FakeDirectory::default();
    let store = FakeStore::default();
    let importer = importer(&directory, &store);

    let params = SearchParams {
        query: Some("ice cream".to_owned()),
        ..SearchParams::default()
    };
    let result = importer
        .import_from_search(&params, &ImportOptions::default())
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.processed(), 0);
    assert!(result.errors.is_empty());
    assert_eq!(result.message, "search returned no candidates");
}

#[tokio::test]
async fn search_transport_failure_is_captured_not_propagated() {
    let directory = FakeDirectory::default();
    directory.lock().fail_searches = true;
    let store = FakeStore::default();
    let importer = importer(&directory, &store);

    let params = SearchParams {
        query: Some("ice cream".to_owned()),
        ..SearchParams::default()
    };
    let result = importer
        .import_from_search(&params, &ImportOptions::default())
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.processed(), 0);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("search failed"));
}

#[tokio::test]
async fn area_import_geocodes_once_and_imports_nearby_candidates() {
    let directory = FakeDirectory::default();
    {
        let mut state = directory.lock();
        state.geocode.insert(
            "Uptown, Minneapolis, MN".to_owned(),
            Coordinates {
                lat: 44.9489,
                lng: -93.2983,
            },
        );
        state.nearby_results = vec![candidate("p1", "Cone Zone"), candidate("p2", "Churn Baby")];
        state.details.insert("p1".to_owned(), detail("p1", "Cone Zone"));
        state.details.insert("p2".to_owned(), detail("p2", "Churn Baby"));
    }
    let store = FakeStore::default();
    let importer = importer(&directory, &store);

    let result = importer
        .import_area("Uptown, Minneapolis, MN", None, &ImportOptions::default())
        .await;

    assert!(result.success);
    assert_eq!(result.imported, 2);
    assert_eq!(store.shop_count(), 2);
}

#[tokio::test]
async fn area_import_with_unresolvable_address_is_a_sweep_failure() {
    let directory = FakeDirectory::default();
    let store = FakeStore::default();
    let importer = importer(&directory, &store);

    let result = importer
        .import_area("Nowhere@@@", None, &ImportOptions::default())
        .await;

    assert!(!result.success);
    assert_eq!(result.processed(), 0);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(store.shop_count(), 0);
}

// ---------------------------------------------------------------------------
// Region sweeps
// ---------------------------------------------------------------------------

fn region(name: &str) -> RegionConfig {
    RegionConfig {
        name: name.to_owned(),
        notes: None,
    }
}

#[tokio::test]
async fn one_failing_region_never_aborts_the_others() {
    let directory = FakeDirectory::default();
    {
        let mut state = directory.lock();
        // Only the second region geocodes.
        state.geocode.insert(
            "Minneapolis, MN".to_owned(),
            Coordinates {
                lat: 44.9778,
                lng: -93.2650,
            },
        );
        state.nearby_results = vec![candidate("p1", "Cone Zone")];
        state.details.insert("p1".to_owned(), detail("p1", "Cone Zone"));
    }
    let store = FakeStore::default();
    let importer = importer(&directory, &store);

    let regions = vec![region("Atlantis"), region("Minneapolis, MN")];
    let result = importer
        .import_regions(&regions, &ImportOptions::default())
        .await;

    // The geocode miss is an error entry, not a failed count, so the sweep
    // still succeeds overall.
    assert!(result.success);
    assert_eq!(result.imported, 1);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("Atlantis: "));
}

#[tokio::test]
async fn region_sweep_caps_candidates_per_region() {
    let directory = FakeDirectory::default();
    {
        let mut state = directory.lock();
        state.geocode.insert(
            "Minneapolis, MN".to_owned(),
            Coordinates {
                lat: 44.9778,
                lng: -93.2650,
            },
        );
        state.nearby_results = (0..8)
            .map(|i| candidate(&format!("p{i}"), &format!("Shop {i}")))
            .collect();
        for i in 0..8 {
            state
                .details
                .insert(format!("p{i}"), detail(&format!("p{i}"), &format!("Shop {i}")));
        }
    }
    let store = FakeStore::default();
    let importer = importer(&directory, &store);

    let result = importer
        .import_regions(&[region("Minneapolis, MN")], &ImportOptions::default())
        .await;

    // Built-in per-region cap of 5.
    assert_eq!(result.processed(), 5);
    assert_eq!(store.shop_count(), 5);

    let raised = ImportOptions {
        max_results_per_region: Some(8),
        ..ImportOptions::default()
    };
    let result = importer
        .import_regions(&[region("Minneapolis, MN")], &raised)
        .await;
    assert_eq!(result.processed(), 8);
    assert_eq!(store.shop_count(), 8);
}

#[tokio::test]
async fn cancelled_region_sweep_reports_unswept_regions() {
    let directory = FakeDirectory::default();
    let store = FakeStore::default();
    let importer = importer(&directory, &store);
    importer.cancel_token().cancel();

    let regions = vec![region("Minneapolis, MN"), region("Madison, WI")];
    let result = importer
        .import_regions(&regions, &ImportOptions::default())
        .await;

    assert_eq!(result.processed(), 0);
    assert_eq!(
        result.errors,
        vec!["cancelled with 2 regions unprocessed".to_owned()]
    );
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_all_updates_every_linked_shop() {
    let directory = FakeDirectory::default();
    {
        let mut state = directory.lock();
        state.details.insert("p1".to_owned(), detail("p1", "Cone Zone v2"));
        state.details.insert("p2".to_owned(), detail("p2", "Churn Baby v2"));
    }
    let store = FakeStore::default();
    let id1 = store.seed("p1", "Cone Zone");
    let id2 = store.seed("p2", "Churn Baby");
    let importer = importer(&directory, &store);

    // Default options would skip; refresh forces the update path.
    let result = importer.refresh_all(&ImportOptions::default()).await;

    assert!(result.success);
    assert_eq!(result.imported, 2);
    assert_eq!(result.skipped, 0);
    let (record1, updates1) = store.shop(id1);
    let (record2, updates2) = store.shop(id2);
    assert_eq!(record1.name, "Cone Zone v2");
    assert_eq!(record2.name, "Churn Baby v2");
    assert_eq!(updates1, 1);
    assert_eq!(updates2, 1);
}

#[tokio::test]
async fn refresh_all_with_no_linked_shops_is_an_empty_success() {
    let directory = FakeDirectory::default();
    let store = FakeStore::default();
    let importer = importer(&directory, &store);

    let result = importer.refresh_all(&ImportOptions::default()).await;
    assert!(result.success);
    assert_eq!(result.processed(), 0);
}

//! End-to-end tests for the collection store and list session.
//!
//! These drive the public API the way a front-end would: load, mutate,
//! and re-derive the view after each change.

use roster_core::{
    filter, sort, Gender, SequentialIdGenerator, SortKey, SortOrder, Status, StudentDraft,
    UuidIdGenerator,
};
use roster_store::{CollectionStore, RosterSession, StoreConfig};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::Duration;

fn draft(first: &str, last: &str, major: &str) -> StudentDraft {
    StudentDraft {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.edu", first.to_lowercase(), last.to_lowercase()),
        grade: "B-".to_string(),
        major: major.to_string(),
        enrollment_date: "2024-09-02".to_string(),
        status: Status::Inactive,
        gender: Gender::Female,
        phone_number: "555-2024".to_string(),
        address: "9 Quad Ln".to_string(),
    }
}

async fn loaded_store() -> Arc<CollectionStore> {
    let store = Arc::new(CollectionStore::new(StoreConfig::for_testing()));
    store.load().await;
    store
}

#[tokio::test]
async fn test_create_adds_exactly_one_record_with_fresh_id() {
    let store = loaded_store().await;
    let before = store.list();
    let prior_ids: HashSet<String> = before.iter().map(|r| r.id.clone()).collect();

    let input = draft("Rosalind", "Franklin", "Chemistry");
    let created = store.create(input.clone()).await;

    let after = store.list();
    assert_eq!(after.len(), before.len() + 1);
    assert!(!created.id.is_empty());
    assert!(!prior_ids.contains(&created.id));

    let stored = after.iter().find(|r| r.id == created.id).unwrap();
    assert_eq!(stored.data, input);
}

#[tokio::test]
async fn test_update_existing_and_unknown() {
    let store = loaded_store().await;
    let target = store.list()[2].clone();

    let replacement = draft("Mike", "Johnson-Lee", "Statistics");
    assert!(store.update(&target.id, replacement.clone()).await);

    let after = store.list();
    assert_eq!(after.len(), 5);
    assert_eq!(after[2].id, target.id);
    assert_eq!(after[2].data, replacement);

    let snapshot = store.list();
    assert!(!store.update("no-such-id", draft("X", "Y", "Z")).await);
    assert_eq!(store.list(), snapshot);
}

#[tokio::test]
async fn test_delete_existing_and_unknown() {
    let store = loaded_store().await;
    let target = store.list()[0].id.clone();

    assert!(store.delete(&target).await);
    let after = store.list();
    assert_eq!(after.len(), 4);
    assert!(after.iter().all(|r| r.id != target));

    assert!(!store.delete(&target).await);
    assert_eq!(store.list(), after);
}

#[tokio::test]
async fn test_insertion_order_is_preserved() {
    let store = Arc::new(CollectionStore::with_id_generator(
        StoreConfig::for_testing(),
        Arc::new(SequentialIdGenerator::new("t")),
    ));
    store.create(draft("Zed", "Zulu", "Art")).await;
    store.create(draft("Amy", "Alpha", "Art")).await;
    store.create(draft("Max", "Mike", "Art")).await;

    let ids: Vec<String> = store.list().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec!["t-1", "t-2", "t-3"]);
}

#[tokio::test]
async fn test_psychology_scenario() {
    let store = loaded_store().await;
    let records = store.list();

    let found = filter(&records, "psychology");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].data.first_name, "David");
    assert_eq!(found[0].data.last_name, "Brown");

    let sorted = sort(&found, SortKey::LastName, SortOrder::Asc);
    assert_eq!(sorted, found);
}

#[tokio::test]
async fn test_session_view_tracks_mutations() {
    let store = loaded_store().await;
    let mut session = RosterSession::new(store.clone());
    session.set_search_term("example.edu");
    assert!(session.view().is_empty());

    let created = session.create(draft("Barbara", "Liskov", "Computer Science")).await;
    let view = session.watch_view().await;
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, created.id);

    session.toggle_sort(SortKey::Major);
    session.set_search_term("");
    let majors: Vec<String> = session.view().iter().map(|r| r.data.major.clone()).collect();
    assert_eq!(
        majors,
        vec![
            "Biology",
            "Business Administration",
            "Computer Science",
            "Computer Science",
            "Mathematics",
            "Psychology",
        ]
    );
}

#[tokio::test]
async fn test_concurrent_creates_all_land() {
    let store = Arc::new(CollectionStore::with_id_generator(
        StoreConfig {
            load_delay: Duration::ZERO,
            mutation_delay: Duration::from_millis(5),
        },
        Arc::new(UuidIdGenerator),
    ));

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.create(draft(&format!("S{i}"), "Parallel", "Physics")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.len(), 20);
    assert_eq!(store.stats().created, 20);
    assert!(!store.is_pending());
    let ids: HashSet<String> = store.list().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids.len(), 20);
}

#![forbid(unsafe_code)]

use dd_storage::{DealCounts, NewRequest, SqliteStore};
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("dd_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn open_store(test_name: &str) -> SqliteStore {
    SqliteStore::open(temp_dir(test_name)).expect("open store")
}

fn seed(store: &mut SqliteStore, deal_id: &str, status: &str, title: &str) {
    let category_id = store.list_categories().expect("list categories")[0].id.clone();
    store
        .create_request(NewRequest {
            deal_id: deal_id.to_string(),
            category_id,
            subcategory_id: None,
            title: title.to_string(),
            description: None,
            priority: "medium".to_string(),
            status: status.to_string(),
            assignee_ids: Vec::new(),
            reviewer_ids: Vec::new(),
            document_ids: Vec::new(),
            due_date: None,
            notes: None,
            order_index: 0,
            risk_score: None,
            stage: None,
            created_by: "maker".to_string(),
        })
        .expect("create request");
}

#[test]
fn counts_for_an_empty_deal_are_zero() {
    let store = open_store("counts_for_an_empty_deal_are_zero");
    let counts = store.deal_counts("deal-none").expect("deal counts");
    assert_eq!(
        counts,
        DealCounts {
            deal_id: "deal-none".to_string(),
            total: 0,
            completed: 0
        }
    );
}

#[test]
fn counts_track_completed_versus_total() {
    let mut store = open_store("counts_track_completed_versus_total");
    seed(&mut store, "deal-1", "completed", "Done one");
    seed(&mut store, "deal-1", "open", "Open one");
    seed(&mut store, "deal-1", "in_progress", "Working");
    seed(&mut store, "deal-1", "blocked", "Stuck");

    let counts = store.deal_counts("deal-1").expect("deal counts");
    assert_eq!(counts.total, 4);
    assert_eq!(counts.completed, 1);
}

#[test]
fn all_deal_counts_agree_with_per_deal_queries() {
    let mut store = open_store("all_deal_counts_agree_with_per_deal_queries");
    seed(&mut store, "deal-a", "completed", "a1");
    seed(&mut store, "deal-a", "open", "a2");
    seed(&mut store, "deal-b", "completed", "b1");
    seed(&mut store, "deal-b", "completed", "b2");
    seed(&mut store, "deal-b", "blocked", "b3");

    let all = store.all_deal_counts().expect("all counts");
    assert_eq!(all.len(), 2);
    for counts in all {
        let single = store.deal_counts(&counts.deal_id).expect("single counts");
        assert_eq!(counts, single);
    }
}

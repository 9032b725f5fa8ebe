#![forbid(unsafe_code)]

use dd_storage::{NewComment, NewRequest, SqliteStore, StoreError};
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

fn seed_request(store: &mut SqliteStore) -> String {
    let category_id = store.list_categories().expect("list categories")[0].id.clone();
    store
        .create_request(NewRequest {
            deal_id: "deal-1".to_string(),
            category_id,
            subcategory_id: None,
            title: "Questions about revenue".to_string(),
            description: None,
            priority: "medium".to_string(),
            status: "open".to_string(),
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
        .expect("create request")
        .id
}

fn comment(request_id: &str, user_id: &str, content: &str) -> NewComment {
    NewComment {
        request_id: request_id.to_string(),
        user_id: user_id.to_string(),
        content: content.to_string(),
        parent_comment_id: None,
        approve: false,
    }
}

#[test]
fn insert_comment_defaults_to_internal() {
    let mut store = open_store("insert_comment_defaults_to_internal");
    let request_id = seed_request(&mut store);

    let inserted = store
        .insert_comment(comment(&request_id, "anna", "What drove Q3 churn?"))
        .expect("insert comment");
    assert!(inserted.id.starts_with("CMT-"));
    assert_eq!(inserted.comment_type, "internal");
    assert_eq!(inserted.approved_by, None);
    assert_eq!(inserted.approved_at_ms, None);

    // Comment activity marks the request.
    let request = store
        .get_request(&request_id)
        .expect("get request")
        .expect("request exists");
    assert!(request.last_activity_at_ms.is_some());
}

#[test]
fn insert_approved_comment_sets_the_unit_at_creation() {
    let mut store = open_store("insert_approved_comment_sets_the_unit_at_creation");
    let request_id = seed_request(&mut store);

    let inserted = store
        .insert_comment(NewComment {
            approve: true,
            ..comment(&request_id, "anna", "Churn was one lost logo.")
        })
        .expect("insert approved comment");
    assert_eq!(inserted.comment_type, "approved");
    assert_eq!(inserted.approved_by.as_deref(), Some("anna"));
    assert!(inserted.approved_at_ms.is_some());
}

#[test]
fn approve_and_unapprove_toggle_the_three_fields_together() {
    let mut store = open_store("approve_and_unapprove_toggle_the_three_fields_together");
    let request_id = seed_request(&mut store);
    let inserted = store
        .insert_comment(comment(&request_id, "anna", "Answer drafted."))
        .expect("insert comment");

    let approved = store
        .approve_comment(&inserted.id, "boris")
        .expect("approve comment");
    assert_eq!(approved.comment_type, "approved");
    assert_eq!(approved.approved_by.as_deref(), Some("boris"));
    assert!(approved.approved_at_ms.is_some());
    assert_eq!(approved.content, "Answer drafted.");

    let unapproved = store
        .unapprove_comment(&inserted.id)
        .expect("unapprove comment");
    assert_eq!(unapproved.comment_type, "internal");
    assert_eq!(unapproved.approved_by, None);
    assert_eq!(unapproved.approved_at_ms, None);
}

#[test]
fn update_touches_content_only() {
    let mut store = open_store("update_touches_content_only");
    let request_id = seed_request(&mut store);
    let inserted = store
        .insert_comment(comment(&request_id, "anna", "typo"))
        .expect("insert comment");

    let updated = store
        .update_comment_content(&inserted.id, "fixed")
        .expect("update comment");
    assert_eq!(updated.content, "fixed");
    assert_eq!(updated.comment_type, "internal");
    assert_eq!(updated.parent_comment_id, None);
}

#[test]
fn list_comments_in_creation_order_and_commenters_distinct() {
    let mut store = open_store("list_comments_in_creation_order_and_commenters_distinct");
    let request_id = seed_request(&mut store);

    store
        .insert_comment(comment(&request_id, "anna", "first"))
        .expect("first");
    store
        .insert_comment(comment(&request_id, "boris", "second"))
        .expect("second");
    store
        .insert_comment(comment(&request_id, "anna", "third"))
        .expect("third");

    let listed = store.list_comments(&request_id).expect("list comments");
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].content, "first");
    assert_eq!(listed[2].content, "third");

    let commenters = store.list_commenters(&request_id).expect("commenters");
    assert_eq!(commenters, vec!["anna", "boris"]);
}

#[test]
fn guards_on_missing_request_and_empty_content() {
    let mut store = open_store("guards_on_missing_request_and_empty_content");
    let request_id = seed_request(&mut store);

    assert!(matches!(
        store.insert_comment(comment("REQ-9999", "anna", "hello")),
        Err(StoreError::UnknownId)
    ));
    assert!(matches!(
        store.insert_comment(comment(&request_id, "anna", "   ")),
        Err(StoreError::InvalidInput(_))
    ));
    assert!(matches!(
        store.approve_comment("CMT-9999", "anna"),
        Err(StoreError::UnknownId)
    ));
}

#[test]
fn delete_comment_removes_the_row() {
    let mut store = open_store("delete_comment_removes_the_row");
    let request_id = seed_request(&mut store);
    let inserted = store
        .insert_comment(comment(&request_id, "anna", "to delete"))
        .expect("insert comment");

    assert!(store.delete_comment(&inserted.id).expect("delete"));
    assert!(store.get_comment(&inserted.id).expect("get").is_none());
    assert!(!store.delete_comment(&inserted.id).expect("second delete"));
}

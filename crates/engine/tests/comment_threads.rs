#![forbid(unsafe_code)]

use dd_core::ids::{DealId, UserId};
use dd_engine::{CommentOptions, EngineError, RequestDraft, StaticIdentityResolver, Tracker};
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("dd_engine_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn user(value: &str) -> UserId {
    UserId::try_new(value).expect("user id")
}

fn open_tracker(test_name: &str) -> Tracker {
    let identity = StaticIdentityResolver::new()
        .with_name(&user("anna"), "Anna Kovacs")
        .with_name(&user("boris"), "Boris Lindqvist")
        .with_name(&user("carol"), "Carol Mbeki");
    Tracker::open(temp_dir(test_name), Box::new(identity)).expect("open tracker")
}

/// anna creates the request with carol as first assignee.
fn seed_request(tracker: &mut Tracker, assignees: &[&str]) -> String {
    let category_id = tracker.list_categories().expect("categories")[0].id.clone();
    let mut draft = RequestDraft::new(
        DealId::try_new("deal-1").expect("deal id"),
        category_id,
        "Explain churn spike",
    );
    draft.assignee_ids = assignees.iter().map(|value| user(value)).collect();
    tracker
        .create_request(&user("anna"), draft)
        .expect("create request")
        .request
        .id
}

#[test]
fn comment_notifies_assignee_creator_and_prior_commenters_once_each() {
    let mut tracker =
        open_tracker("comment_notifies_assignee_creator_and_prior_commenters_once_each");
    let request_id = seed_request(&mut tracker, &["carol"]);

    // dora comments first: recipients are carol (first assignee) and anna
    // (creator).
    let outcome = tracker
        .add_comment(
            &user("dora"),
            &request_id,
            "Which customers churned?",
            CommentOptions::default(),
        )
        .expect("first comment");
    assert_eq!(outcome.notifications_emitted, 2);

    // boris comments next: carol, anna, and prior commenter dora.
    let outcome = tracker
        .add_comment(
            &user("boris"),
            &request_id,
            "Adding the Q3 numbers.",
            CommentOptions::default(),
        )
        .expect("second comment");
    assert_eq!(outcome.notifications_emitted, 3);

    let dora_inbox = tracker.list_notifications(&user("dora")).expect("inbox");
    assert_eq!(dora_inbox.len(), 1);
    assert_eq!(dora_inbox[0].kind, "comment");
    assert!(dora_inbox[0].message.contains("Boris Lindqvist"));
}

#[test]
fn commenter_who_is_also_assignee_gets_exactly_one_ping() {
    let mut tracker = open_tracker("commenter_who_is_also_assignee_gets_exactly_one_ping");
    let request_id = seed_request(&mut tracker, &["carol"]);

    // carol is the first assignee and becomes a prior commenter.
    tracker
        .add_comment(
            &user("carol"),
            &request_id,
            "Looking into it.",
            CommentOptions::default(),
        )
        .expect("carol comments");

    // boris comments: carol qualifies twice (assignee + prior commenter)
    // but the recipient set is deduplicated.
    let outcome = tracker
        .add_comment(
            &user("boris"),
            &request_id,
            "Any update?",
            CommentOptions::default(),
        )
        .expect("boris comments");
    assert_eq!(outcome.notifications_emitted, 2); // carol + anna

    let carol_comment_pings: Vec<_> = tracker
        .list_notifications(&user("carol"))
        .expect("inbox")
        .into_iter()
        .filter(|notification| notification.kind == "comment")
        .collect();
    assert_eq!(carol_comment_pings.len(), 1);
}

#[test]
fn immediate_approval_is_one_event_with_approved_answer_kind() {
    let mut tracker = open_tracker("immediate_approval_is_one_event_with_approved_answer_kind");
    let request_id = seed_request(&mut tracker, &["carol"]);

    let outcome = tracker
        .add_comment(
            &user("boris"),
            &request_id,
            "Churn was a single contract ending.",
            CommentOptions {
                parent_id: None,
                approve_immediately: true,
            },
        )
        .expect("approved comment");
    assert_eq!(outcome.comment.comment_type, "approved");
    assert_eq!(outcome.comment.approved_by.as_deref(), Some("boris"));
    assert!(outcome.comment.approved_at.is_some());

    // Round trip: no separate approval call needed.
    let threads = tracker.list_comments(&request_id).expect("list comments");
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].comment.comment_type, "approved");
    assert_eq!(
        threads[0].comment.approver_name.as_deref(),
        Some("Boris Lindqvist")
    );

    let carol_inbox = tracker.list_notifications(&user("carol")).expect("inbox");
    assert!(carol_inbox.iter().any(|n| n.kind == "approved_answer"));
    assert!(carol_inbox.iter().all(|n| n.kind != "comment"));
}

#[test]
fn approve_then_unapprove_toggles_the_unit() {
    let mut tracker = open_tracker("approve_then_unapprove_toggles_the_unit");
    let request_id = seed_request(&mut tracker, &[]);

    let added = tracker
        .add_comment(
            &user("boris"),
            &request_id,
            "Draft answer.",
            CommentOptions::default(),
        )
        .expect("add comment");
    assert_eq!(added.comment.comment_type, "internal");

    let approved = tracker
        .approve_comment(&user("anna"), &added.comment.id)
        .expect("approve");
    assert_eq!(approved.comment.comment_type, "approved");
    assert_eq!(approved.comment.approved_by.as_deref(), Some("anna"));
    assert_eq!(
        approved.comment.approver_name.as_deref(),
        Some("Anna Kovacs")
    );

    // boris authored the answer, so the approval pings him.
    let boris_inbox = tracker.list_notifications(&user("boris")).expect("inbox");
    assert!(boris_inbox.iter().any(|n| n.kind == "approved_answer"));

    let unapproved = tracker
        .unapprove_comment(&added.comment.id)
        .expect("unapprove");
    assert_eq!(unapproved.comment_type, "internal");
    assert_eq!(unapproved.approved_by, None);
    assert_eq!(unapproved.approved_at, None);
}

#[test]
fn replies_attach_to_their_top_level_comment_in_order() {
    let mut tracker = open_tracker("replies_attach_to_their_top_level_comment_in_order");
    let request_id = seed_request(&mut tracker, &[]);

    let first = tracker
        .add_comment(&user("anna"), &request_id, "Thread one", CommentOptions::default())
        .expect("first thread");
    let second = tracker
        .add_comment(&user("anna"), &request_id, "Thread two", CommentOptions::default())
        .expect("second thread");

    tracker
        .add_comment(
            &user("boris"),
            &request_id,
            "Reply 1 to one",
            CommentOptions {
                parent_id: Some(first.comment.id.clone()),
                approve_immediately: false,
            },
        )
        .expect("reply one");
    tracker
        .add_comment(
            &user("carol"),
            &request_id,
            "Reply 2 to one",
            CommentOptions {
                parent_id: Some(first.comment.id.clone()),
                approve_immediately: false,
            },
        )
        .expect("reply two");

    let threads = tracker.list_comments(&request_id).expect("list comments");
    assert_eq!(threads.len(), 2);
    assert_eq!(threads[0].comment.content, "Thread one");
    assert_eq!(threads[0].replies.len(), 2);
    assert_eq!(threads[0].replies[0].content, "Reply 1 to one");
    assert_eq!(threads[0].replies[0].author_name, "Boris Lindqvist");
    assert_eq!(threads[0].replies[1].content, "Reply 2 to one");
    assert!(threads[1].replies.is_empty());
    assert_eq!(second.comment.content, "Thread two");

    // Unknown commenters fall back to their raw id as the label.
    let anon = tracker
        .add_comment(&user("zed"), &request_id, "Who am I?", CommentOptions::default())
        .expect("anonymous comment");
    assert_eq!(anon.comment.author_name, "zed");
}

#[test]
fn replies_to_replies_are_rejected_at_write_time() {
    let mut tracker = open_tracker("replies_to_replies_are_rejected_at_write_time");
    let request_id = seed_request(&mut tracker, &[]);

    let top = tracker
        .add_comment(&user("anna"), &request_id, "Top", CommentOptions::default())
        .expect("top-level");
    let reply = tracker
        .add_comment(
            &user("boris"),
            &request_id,
            "Reply",
            CommentOptions {
                parent_id: Some(top.comment.id.clone()),
                approve_immediately: false,
            },
        )
        .expect("reply");

    let result = tracker.add_comment(
        &user("carol"),
        &request_id,
        "Reply to the reply",
        CommentOptions {
            parent_id: Some(reply.comment.id.clone()),
            approve_immediately: false,
        },
    );
    assert!(matches!(result, Err(EngineError::Validation(_))));
}

#[test]
fn reply_parent_must_belong_to_the_same_request() {
    let mut tracker = open_tracker("reply_parent_must_belong_to_the_same_request");
    let request_a = seed_request(&mut tracker, &[]);
    let request_b = seed_request(&mut tracker, &[]);

    let comment_on_a = tracker
        .add_comment(&user("anna"), &request_a, "On A", CommentOptions::default())
        .expect("comment on a");

    let result = tracker.add_comment(
        &user("boris"),
        &request_b,
        "Cross-thread reply",
        CommentOptions {
            parent_id: Some(comment_on_a.comment.id.clone()),
            approve_immediately: false,
        },
    );
    assert!(matches!(result, Err(EngineError::Validation(_))));
}

#[test]
fn update_and_delete_guard_missing_comments() {
    let mut tracker = open_tracker("update_and_delete_guard_missing_comments");
    let request_id = seed_request(&mut tracker, &[]);

    let added = tracker
        .add_comment(&user("anna"), &request_id, "typo here", CommentOptions::default())
        .expect("add comment");

    let edited = tracker
        .update_comment(&added.comment.id, "typo fixed")
        .expect("update comment");
    assert_eq!(edited.content, "typo fixed");

    tracker.delete_comment(&added.comment.id).expect("delete");
    assert!(matches!(
        tracker.delete_comment(&added.comment.id),
        Err(EngineError::NotFound { kind: "comment", .. })
    ));
    assert!(matches!(
        tracker.update_comment(&added.comment.id, "gone"),
        Err(EngineError::NotFound { kind: "comment", .. })
    ));
}

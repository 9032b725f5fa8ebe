#![forbid(unsafe_code)]

//! Recipient computation for notification fan-out.
//!
//! Every rule answers one question: given a state change and the actor who
//! made it, which users must be notified. The actor is never a recipient,
//! and each function returns a duplicate-free list in stable order so one
//! trigger writes at most one notification per user.

use crate::ids::UserId;

/// Users newly added to the assignee set: `new - old - {actor}`.
/// Removing members or re-adding an existing member yields nobody.
pub fn assignment_added(old: &[UserId], new: &[UserId], actor: &UserId) -> Vec<UserId> {
    let mut recipients = Vec::new();
    for user in new {
        if user == actor || old.contains(user) {
            continue;
        }
        push_unique(&mut recipients, user);
    }
    recipients
}

/// Every member of the set except the actor. Used for creation (notify the
/// initial assignees) and for status changes (notify the current assignees).
pub fn members_except(members: &[UserId], actor: &UserId) -> Vec<UserId> {
    let mut recipients = Vec::new();
    for user in members {
        if user == actor {
            continue;
        }
        push_unique(&mut recipients, user);
    }
    recipients
}

/// Recipients of a comment or approved-answer event: the first assignee (the
/// single-assignee projection), the request creator, and every distinct
/// prior commenter — deduplicated, minus the actor.
pub fn comment_recipients(
    first_assignee: Option<&UserId>,
    created_by: &UserId,
    prior_commenters: &[UserId],
    actor: &UserId,
) -> Vec<UserId> {
    let mut recipients = Vec::new();
    if let Some(assignee) = first_assignee
        && assignee != actor
    {
        push_unique(&mut recipients, assignee);
    }
    if created_by != actor {
        push_unique(&mut recipients, created_by);
    }
    for user in prior_commenters {
        if user == actor {
            continue;
        }
        push_unique(&mut recipients, user);
    }
    recipients
}

fn push_unique(recipients: &mut Vec<UserId>, user: &UserId) {
    if !recipients.contains(user) {
        recipients.push(user.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(value: &str) -> UserId {
        UserId::try_new(value).expect("user id")
    }

    #[test]
    fn assignment_added_is_new_minus_old_minus_actor() {
        let old = [user("a"), user("b")];
        let new = [user("b"), user("c")];
        assert_eq!(assignment_added(&old, &new, &user("a")), vec![user("c")]);
    }

    #[test]
    fn shrinking_or_readding_notifies_nobody() {
        let old = [user("a"), user("b"), user("c")];
        let new = [user("a"), user("b")];
        assert!(assignment_added(&old, &new, &user("x")).is_empty());
        assert!(assignment_added(&old, &old, &user("x")).is_empty());
    }

    #[test]
    fn actor_added_by_someone_else_is_still_notified() {
        let old: [UserId; 0] = [];
        let new = [user("a"), user("b")];
        assert_eq!(
            assignment_added(&old, &new, &user("b")),
            vec![user("a")]
        );
    }

    #[test]
    fn members_except_skips_actor_and_duplicates() {
        let members = [user("a"), user("b"), user("b"), user("c")];
        assert_eq!(
            members_except(&members, &user("a")),
            vec![user("b"), user("c")]
        );
    }

    #[test]
    fn comment_recipients_deduplicate_across_roles() {
        // b is both the first assignee and a prior commenter: one entry.
        let prior = [user("b"), user("d")];
        let recipients =
            comment_recipients(Some(&user("b")), &user("creator"), &prior, &user("actor"));
        assert_eq!(recipients, vec![user("b"), user("creator"), user("d")]);
    }

    #[test]
    fn comment_recipients_never_include_actor() {
        let prior = [user("actor"), user("d")];
        let recipients =
            comment_recipients(Some(&user("actor")), &user("actor"), &prior, &user("actor"));
        assert_eq!(recipients, vec![user("d")]);
    }
}

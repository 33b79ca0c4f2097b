#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Domain-level tests for the bug store: creation, the assigner/assignee
//! permission rules, filtering, cascade and user removal.

use bugs::domain::error::DomainError;
use bugs::domain::messages;
use bugs::{BugFilter, BugPatch, NewBug, NewComment};
use bugs_sdk::UpdateBugRequest;
use uuid::Uuid;

mod support;
use support::TestContext;

fn patch_req(id: Uuid, patch: BugPatch) -> UpdateBugRequest {
    UpdateBugRequest { id, patch }
}

fn resolve(resolved: bool) -> BugPatch {
    BugPatch {
        resolved: Some(resolved),
        ..Default::default()
    }
}

// ==================== Creation ====================

#[tokio::test]
async fn create_assigns_and_rejects_duplicate_title() {
    let t = TestContext::new().await;
    let (x, x_ctx) = t.user("xavier").await;
    let (y, _) = t.user("yolanda").await;

    let detail = t.bug(&x_ctx, "B1", Some(y.id)).await;
    assert_eq!(detail.bug.title, "B1");
    assert!(!detail.bug.resolved);
    assert_eq!(detail.bug.assigner, Some(x.id));
    assert_eq!(detail.bug.assignee, Some(y.id));
    assert_eq!(detail.assigner.as_ref().map(|u| u.username.as_str()), Some("xavier"));
    assert_eq!(detail.assignee.as_ref().map(|u| u.username.as_str()), Some("yolanda"));
    assert!(detail.comments.is_empty());

    let err = t
        .services()
        .bugs
        .create_bug(
            &x_ctx,
            NewBug {
                title: "B1".to_owned(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::field("title", messages::BUG_TITLE_TAKEN));
}

#[tokio::test]
async fn create_rejects_self_assignment_and_unknown_assignee() {
    let t = TestContext::new().await;
    let (x, x_ctx) = t.user("xavier").await;

    let err = t
        .services()
        .bugs
        .create_bug(
            &x_ctx,
            NewBug {
                title: "Mine".to_owned(),
                body: String::new(),
                assignee: Some(x.id),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::validation(messages::SELF_ASSIGNMENT));

    let err = t
        .services()
        .bugs
        .create_bug(
            &x_ctx,
            NewBug {
                title: "Ghost".to_owned(),
                body: String::new(),
                assignee: Some(Uuid::now_v7()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::field("assignee", messages::UNKNOWN_ASSIGNEE));

    let err = t
        .services()
        .bugs
        .create_bug(&x_ctx, NewBug::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { field: Some(ref f), .. } if f == "title"));

    assert!(
        t.services()
            .bugs
            .list_bugs(&x_ctx, BugFilter::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn unassigned_bug_is_allowed() {
    let t = TestContext::new().await;
    let (_, x_ctx) = t.user("xavier").await;
    let detail = t.bug(&x_ctx, "Nobody's problem", None).await;
    assert_eq!(detail.bug.assignee, None);
    assert!(detail.assignee.is_none());
}

// ==================== Update rules ====================

#[tokio::test]
async fn assignee_may_only_resolve() {
    let t = TestContext::new().await;
    let (_, x_ctx) = t.user("xavier").await;
    let (y, y_ctx) = t.user("yolanda").await;
    let bug = t.bug(&x_ctx, "B1", Some(y.id)).await.bug;

    let updated = t
        .services()
        .bugs
        .update_bug(&y_ctx, patch_req(bug.id, resolve(true)))
        .await
        .unwrap();
    assert!(updated.bug.resolved);
    assert!(updated.bug.updated_at >= bug.updated_at);

    let err = t
        .services()
        .bugs
        .update_bug(
            &y_ctx,
            patch_req(
                bug.id,
                BugPatch {
                    resolved: Some(true),
                    title: Some("new".to_owned()),
                    ..Default::default()
                },
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::permission(messages::ASSIGNEE_RESOLVE_ONLY));

    let current = t.services().bugs.get_bug(&y_ctx, bug.id).await.unwrap();
    assert_eq!(current.bug.title, "B1");
}

#[tokio::test]
async fn assigner_cannot_assign_self() {
    let t = TestContext::new().await;
    let (x, x_ctx) = t.user("xavier").await;
    let (y, _) = t.user("yolanda").await;
    let bug = t.bug(&x_ctx, "B1", Some(y.id)).await.bug;

    let err = t
        .services()
        .bugs
        .update_bug(
            &x_ctx,
            patch_req(
                bug.id,
                BugPatch {
                    assignee: Some(Some(x.id)),
                    ..Default::default()
                },
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::validation(messages::SELF_ASSIGNMENT));

    let current = t.services().bugs.get_bug(&x_ctx, bug.id).await.unwrap();
    assert_eq!(current.bug.assignee, Some(y.id));
}

#[tokio::test]
async fn outsider_cannot_update() {
    let t = TestContext::new().await;
    let (_, x_ctx) = t.user("xavier").await;
    let (y, _) = t.user("yolanda").await;
    let (_, z_ctx) = t.user("zachary").await;
    let bug = t.bug(&x_ctx, "B1", Some(y.id)).await.bug;

    for patch in [
        resolve(true),
        BugPatch {
            title: Some("hijacked".to_owned()),
            ..Default::default()
        },
        BugPatch::default(),
    ] {
        let err = t
            .services()
            .bugs
            .update_bug(&z_ctx, patch_req(bug.id, patch))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::permission(messages::NOT_A_PARTICIPANT));
    }
}

#[tokio::test]
async fn assigner_edits_reassigns_and_unassigns() {
    let t = TestContext::new().await;
    let (_, x_ctx) = t.user("xavier").await;
    let (y, _) = t.user("yolanda").await;
    let (w, _) = t.user("wilhelmina").await;
    let bug = t.bug(&x_ctx, "B1", Some(y.id)).await.bug;

    let updated = t
        .services()
        .bugs
        .update_bug(
            &x_ctx,
            patch_req(
                bug.id,
                BugPatch {
                    title: Some("B1 renamed".to_owned()),
                    body: Some("more detail".to_owned()),
                    assignee: Some(Some(w.id)),
                    resolved: None,
                },
            ),
        )
        .await
        .unwrap();
    assert_eq!(updated.bug.title, "B1 renamed");
    assert_eq!(updated.bug.body, "more detail");
    assert_eq!(updated.bug.assignee, Some(w.id));
    assert_eq!(updated.assignee.map(|u| u.id), Some(w.id));

    let cleared = t
        .services()
        .bugs
        .update_bug(
            &x_ctx,
            patch_req(
                bug.id,
                BugPatch {
                    assignee: Some(None),
                    ..Default::default()
                },
            ),
        )
        .await
        .unwrap();
    assert_eq!(cleared.bug.assignee, None);
    assert_eq!(cleared.bug.title, "B1 renamed");
}

#[tokio::test]
async fn update_keeping_own_title_is_not_a_duplicate() {
    let t = TestContext::new().await;
    let (_, x_ctx) = t.user("xavier").await;
    let bug = t.bug(&x_ctx, "B1", None).await.bug;
    t.bug(&x_ctx, "B2", None).await;

    let same = BugPatch {
        title: Some("B1".to_owned()),
        ..Default::default()
    };
    t.services()
        .bugs
        .update_bug(&x_ctx, patch_req(bug.id, same))
        .await
        .unwrap();

    let taken = BugPatch {
        title: Some("B2".to_owned()),
        ..Default::default()
    };
    let err = t
        .services()
        .bugs
        .update_bug(&x_ctx, patch_req(bug.id, taken))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::field("title", messages::BUG_TITLE_TAKEN));
}

#[tokio::test]
async fn update_missing_bug_is_not_found() {
    let t = TestContext::new().await;
    let (_, x_ctx) = t.user("xavier").await;
    let id = Uuid::now_v7();
    let err = t
        .services()
        .bugs
        .update_bug(&x_ctx, patch_req(id, resolve(true)))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found("Bug", id));
}

// ==================== Delete ====================

#[tokio::test]
async fn only_assigner_deletes_and_comments_cascade() {
    let t = TestContext::new().await;
    let (_, x_ctx) = t.user("xavier").await;
    let (y, y_ctx) = t.user("yolanda").await;
    let bug = t.bug(&x_ctx, "B1", Some(y.id)).await.bug;

    let comment = t
        .services()
        .comments
        .create_comment(
            &y_ctx,
            NewComment {
                bug_id: bug.id,
                title: "C1".to_owned(),
                body: "seen it too".to_owned(),
            },
        )
        .await
        .unwrap();

    let err = t
        .services()
        .bugs
        .delete_bug(&y_ctx, bug.id)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::permission(messages::NOT_BUG_CREATOR));

    t.services().bugs.delete_bug(&x_ctx, bug.id).await.unwrap();

    let err = t.services().bugs.get_bug(&x_ctx, bug.id).await.unwrap_err();
    assert_eq!(err, DomainError::not_found("Bug", bug.id));

    let err = t
        .services()
        .comments
        .delete_comment(&y_ctx, comment.comment.id)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found("Comment", comment.comment.id));

    let err = t.services().bugs.delete_bug(&x_ctx, bug.id).await.unwrap_err();
    assert_eq!(err, DomainError::not_found("Bug", bug.id));
}

// ==================== Listing ====================

#[tokio::test]
async fn list_filters_and_orders_by_most_recent_update() {
    let t = TestContext::new().await;
    let (x, x_ctx) = t.user("xavier").await;
    let (y, y_ctx) = t.user("yolanda").await;

    let b1 = t.bug(&x_ctx, "B1", Some(y.id)).await.bug;
    let b2 = t.bug(&x_ctx, "B2", None).await.bug;
    let b3 = t.bug(&y_ctx, "B3", Some(x.id)).await.bug;

    // Touch B1 last so it moves to the front.
    t.services()
        .bugs
        .update_bug(&y_ctx, patch_req(b1.id, resolve(true)))
        .await
        .unwrap();

    let all = t
        .services()
        .bugs
        .list_bugs(&x_ctx, BugFilter::default())
        .await
        .unwrap();
    let ids: Vec<Uuid> = all.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![b1.id, b3.id, b2.id]);

    let resolved = t
        .services()
        .bugs
        .list_bugs(
            &x_ctx,
            BugFilter {
                resolved: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(resolved.iter().map(|b| b.id).collect::<Vec<_>>(), vec![b1.id]);

    let unresolved = t
        .services()
        .bugs
        .list_bugs(
            &x_ctx,
            BugFilter {
                resolved: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        unresolved.iter().map(|b| b.id).collect::<Vec<_>>(),
        vec![b3.id, b2.id]
    );

    let by_x_for_y = t
        .services()
        .bugs
        .list_bugs(
            &x_ctx,
            BugFilter {
                assigner: Some(x.id),
                assignee: Some(y.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_x_for_y.iter().map(|b| b.id).collect::<Vec<_>>(), vec![b1.id]);
}

// ==================== User removal ====================

#[tokio::test]
async fn removing_a_user_keeps_bugs_and_comments() {
    let t = TestContext::new().await;
    let (x, x_ctx) = t.user("xavier").await;
    let (y, y_ctx) = t.user("yolanda").await;
    let bug = t.bug(&x_ctx, "B1", Some(y.id)).await.bug;
    t.services()
        .comments
        .create_comment(
            &y_ctx,
            NewComment {
                bug_id: bug.id,
                title: "C1".to_owned(),
                body: "on it".to_owned(),
            },
        )
        .await
        .unwrap();

    t.services().users.remove_user(y.id).await.unwrap();

    let detail = t.services().bugs.get_bug(&x_ctx, bug.id).await.unwrap();
    assert_eq!(detail.bug.assigner, Some(x.id));
    assert_eq!(detail.bug.assignee, None);
    assert!(detail.assignee.is_none());
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].comment.author, None);
    assert_eq!(detail.comments[0].author_username, None);

    let err = t.services().users.remove_user(y.id).await.unwrap_err();
    assert_eq!(err, DomainError::not_found("User", y.id));

    // With the assigner gone too, nobody can modify the bug any more.
    t.services().users.remove_user(x.id).await.unwrap();
    let err = t
        .services()
        .bugs
        .update_bug(&x_ctx, patch_req(bug.id, resolve(true)))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::permission(messages::NOT_A_PARTICIPANT));
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bugs::NewComment;
use bugs::domain::error::DomainError;
use bugs::domain::messages;
use uuid::Uuid;

mod support;
use support::TestContext;

fn comment(bug_id: Uuid, title: &str) -> NewComment {
    NewComment {
        bug_id,
        title: title.to_owned(),
        body: "Reproduced on staging".to_owned(),
    }
}

#[tokio::test]
async fn comment_titles_are_unique_per_author_and_bug() {
    let t = TestContext::new().await;
    let (_, x_ctx) = t.user("xavier").await;
    let (y, y_ctx) = t.user("yolanda").await;
    let b1 = t.bug(&x_ctx, "B1", Some(y.id)).await.bug;
    let b2 = t.bug(&x_ctx, "B2", None).await.bug;

    let first = t
        .services()
        .comments
        .create_comment(&x_ctx, comment(b1.id, "C1"))
        .await
        .unwrap();
    assert_eq!(first.author_username.as_deref(), Some("xavier"));
    assert_eq!(first.comment.bug_id, b1.id);

    let err = t
        .services()
        .comments
        .create_comment(&x_ctx, comment(b1.id, "C1"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::validation(messages::COMMENT_TITLE_TAKEN));

    // Another author, or another bug, may reuse the title.
    t.services()
        .comments
        .create_comment(&y_ctx, comment(b1.id, "C1"))
        .await
        .unwrap();
    t.services()
        .comments
        .create_comment(&x_ctx, comment(b2.id, "C1"))
        .await
        .unwrap();

    let detail = t.services().bugs.get_bug(&x_ctx, b1.id).await.unwrap();
    assert_eq!(detail.comments.len(), 2);
    let mut authors: Vec<_> = detail
        .comments
        .iter()
        .filter_map(|c| c.author_username.clone())
        .collect();
    authors.sort();
    assert_eq!(authors, vec!["xavier".to_owned(), "yolanda".to_owned()]);
}

#[tokio::test]
async fn any_user_may_comment_on_any_bug() {
    let t = TestContext::new().await;
    let (_, x_ctx) = t.user("xavier").await;
    let (_, z_ctx) = t.user("zachary").await;
    let bug = t.bug(&x_ctx, "B1", None).await.bug;

    let created = t
        .services()
        .comments
        .create_comment(&z_ctx, comment(bug.id, "drive-by"))
        .await
        .unwrap();
    assert_eq!(created.comment.author, Some(z_ctx.subject_id()));
}

#[tokio::test]
async fn rejects_unknown_bug_and_blank_fields() {
    let t = TestContext::new().await;
    let (_, x_ctx) = t.user("xavier").await;
    let bug = t.bug(&x_ctx, "B1", None).await.bug;

    let err = t
        .services()
        .comments
        .create_comment(&x_ctx, comment(Uuid::now_v7(), "C1"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::field("bug", messages::UNKNOWN_BUG));

    let err = t
        .services()
        .comments
        .create_comment(&x_ctx, comment(bug.id, "   "))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::field("title", messages::REQUIRED));

    let err = t
        .services()
        .comments
        .create_comment(
            &x_ctx,
            NewComment {
                bug_id: bug.id,
                title: "C1".to_owned(),
                body: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::field("body", messages::REQUIRED));

    let err = t
        .services()
        .comments
        .create_comment(&x_ctx, comment(bug.id, &"t".repeat(101)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { field: Some(ref f), .. } if f == "title"));
}

#[tokio::test]
async fn only_the_author_deletes_a_comment() {
    let t = TestContext::new().await;
    let (_, x_ctx) = t.user("xavier").await;
    let (_, y_ctx) = t.user("yolanda").await;
    let bug = t.bug(&x_ctx, "B1", None).await.bug;

    let created = t
        .services()
        .comments
        .create_comment(&y_ctx, comment(bug.id, "C1"))
        .await
        .unwrap();
    let id = created.comment.id;

    // Not even the bug's assigner.
    let err = t
        .services()
        .comments
        .delete_comment(&x_ctx, id)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::permission(messages::NOT_COMMENT_AUTHOR));

    t.services()
        .comments
        .delete_comment(&y_ctx, id)
        .await
        .unwrap();

    let err = t
        .services()
        .comments
        .delete_comment(&y_ctx, id)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found("Comment", id));

    // The title is free again once the comment is gone.
    t.services()
        .comments
        .create_comment(&y_ctx, comment(bug.id, "C1"))
        .await
        .unwrap();
}

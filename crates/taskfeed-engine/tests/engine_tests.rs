use std::sync::Arc;

use uuid::Uuid;

use taskfeed_db::Database;
use taskfeed_db::queries as q;
use taskfeed_engine::content::ContentQuery;
use taskfeed_engine::{Engine, EngineError};
use taskfeed_types::models::{ContentKind, NotificationKind, TaskKind, TaskStatus};

fn setup() -> (Engine, Arc<Database>) {
    let db = Arc::new(Database::open_in_memory().unwrap());
    (Engine::with_default_cache(db.clone()), db)
}

fn add_user(db: &Database, username: &str) -> Uuid {
    let id = Uuid::new_v4();
    db.with_conn(|conn| q::users::insert_user(conn, &id.to_string(), username, "hash", None))
        .unwrap();
    id
}

fn like_count(db: &Database, user: Uuid, target: Uuid) -> i64 {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT COUNT(*) FROM likes WHERE user_id = ?1 AND content_id = ?2",
            [user.to_string(), target.to_string()],
            |row| row.get(0),
        )
    })
    .unwrap()
}

fn notification_count(db: &Database, recipient: Uuid, actor: Uuid, kind: NotificationKind) -> i64 {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT COUNT(*) FROM notifications
             WHERE recipient_id = ?1 AND actor_id = ?2 AND kind = ?3",
            [recipient.to_string(), actor.to_string(), kind.as_str().to_string()],
            |row| row.get(0),
        )
    })
    .unwrap()
}

// -- Content store --

#[test]
fn create_content_defaults_status_by_kind() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");

    let post = engine
        .create_content(alice, ContentKind::Post, "hello", None)
        .unwrap();
    assert_eq!(post.status, None);

    let task = engine
        .create_content(alice, ContentKind::Task, "chores", None)
        .unwrap();
    assert_eq!(task.status, Some(TaskStatus::Pending));

    let shared = engine
        .create_content(alice, ContentKind::SharedTask, "Finish report", Some("img.png"))
        .unwrap();
    assert_eq!(shared.status, Some(TaskStatus::Pending));
    assert_eq!(shared.image.as_deref(), Some("img.png"));
    assert_eq!(shared.author_id, alice);
}

#[test]
fn update_and_delete_require_the_author() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let bob = add_user(&db, "bob");

    let post = engine
        .create_content(alice, ContentKind::Post, "original", None)
        .unwrap();

    let err = engine
        .update_content(post.id, bob, Some("hijacked"), None)
        .unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized));

    let err = engine.delete_content(post.id, bob).unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized));

    // item is unchanged after both rejections
    let feed = engine
        .get_content(&ContentQuery {
            id: Some(post.id),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].content, "original");

    // the author can do both
    let updated = engine
        .update_content(post.id, alice, Some("edited"), None)
        .unwrap();
    assert_eq!(updated.content, "edited");
    engine.delete_content(post.id, alice).unwrap();

    let err = engine
        .update_content(post.id, alice, Some("gone"), None)
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound));
}

#[test]
fn update_content_patches_only_provided_fields() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");

    let post = engine
        .create_content(alice, ContentKind::Post, "text", Some("pic.png"))
        .unwrap();

    let updated = engine
        .update_content(post.id, alice, Some("new text"), None)
        .unwrap();
    assert_eq!(updated.content, "new text");
    assert_eq!(updated.image.as_deref(), Some("pic.png"));
}

#[test]
fn feed_is_newest_first_with_oldest_first_comments() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let bob = add_user(&db, "bob");

    let first = engine
        .create_content(alice, ContentKind::Post, "first", None)
        .unwrap();
    let second = engine
        .create_content(alice, ContentKind::SharedTask, "second", None)
        .unwrap();

    engine.create_comment(bob, first.id, "older").unwrap();
    engine.create_comment(alice, first.id, "newer").unwrap();
    engine.toggle_like(bob, first.id).unwrap();

    let feed = engine.get_content(&ContentQuery::default()).unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].id, second.id);
    assert_eq!(feed[1].id, first.id);

    let item = &feed[1];
    assert_eq!(item.author.username, "alice");
    assert_eq!(item.comment_count, 2);
    assert_eq!(item.comments[0].content, "older");
    assert_eq!(item.comments[0].author.username, "bob");
    assert_eq!(item.comments[1].content, "newer");
    assert_eq!(item.like_count, 1);
    assert_eq!(item.liked_by, vec![bob]);
}

#[test]
fn feed_filters_by_author_kind_and_status() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let bob = add_user(&db, "bob");

    engine.create_content(alice, ContentKind::Post, "a post", None).unwrap();
    let task = engine
        .create_content(alice, ContentKind::Task, "a task", None)
        .unwrap();
    engine.create_content(bob, ContentKind::Post, "b post", None).unwrap();

    let alices = engine
        .get_content(&ContentQuery {
            author_username: Some("alice".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(alices.len(), 2);

    engine
        .update_status(task.id, TaskKind::Task, TaskStatus::Completed)
        .unwrap();

    let completed = engine
        .get_content(&ContentQuery {
            author_username: Some("alice".into()),
            kind: Some(ContentKind::Task),
            status: Some(TaskStatus::Completed),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, task.id);
}

// -- Like toggle --

#[test]
fn double_toggle_flips_like_and_notification_together() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let bob = add_user(&db, "bob");

    let task = engine
        .create_content(alice, ContentKind::SharedTask, "Finish report", None)
        .unwrap();

    let first = engine.toggle_like(bob, task.id).unwrap();
    assert!(first.liked);
    assert_eq!(like_count(&db, bob, task.id), 1);
    assert_eq!(notification_count(&db, alice, bob, NotificationKind::Like), 1);

    let second = engine.toggle_like(bob, task.id).unwrap();
    assert!(!second.liked);
    assert_eq!(like_count(&db, bob, task.id), 0);
    assert_eq!(notification_count(&db, alice, bob, NotificationKind::Like), 0);
}

#[test]
fn self_like_never_notifies() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");

    let task = engine
        .create_content(alice, ContentKind::SharedTask, "mine", None)
        .unwrap();

    let toggled = engine.toggle_like(alice, task.id).unwrap();
    assert!(toggled.liked);
    assert_eq!(like_count(&db, alice, task.id), 1);
    assert_eq!(notification_count(&db, alice, alice, NotificationKind::Like), 0);
}

#[test]
fn unlike_removes_exactly_the_matching_notification() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let bob = add_user(&db, "bob");
    let carol = add_user(&db, "carol");

    let task = engine
        .create_content(alice, ContentKind::SharedTask, "shared", None)
        .unwrap();

    engine.toggle_like(bob, task.id).unwrap();
    engine.toggle_like(carol, task.id).unwrap();

    engine.toggle_like(bob, task.id).unwrap(); // bob unlikes

    assert_eq!(notification_count(&db, alice, bob, NotificationKind::Like), 0);
    assert_eq!(notification_count(&db, alice, carol, NotificationKind::Like), 1);
}

#[test]
fn posts_get_like_fanout_too() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let bob = add_user(&db, "bob");

    let post = engine
        .create_content(alice, ContentKind::Post, "plain post", None)
        .unwrap();

    engine.toggle_like(bob, post.id).unwrap();
    assert_eq!(notification_count(&db, alice, bob, NotificationKind::Like), 1);
}

#[test]
fn private_tasks_are_not_like_targets() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let bob = add_user(&db, "bob");

    let task = engine
        .create_content(alice, ContentKind::Task, "private", None)
        .unwrap();

    let err = engine.toggle_like(bob, task.id).unwrap_err();
    assert!(matches!(err, EngineError::NotFound));

    let err = engine.toggle_like(bob, Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, EngineError::NotFound));
}

// -- Comments --

#[test]
fn empty_comment_is_rejected() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");

    let task = engine
        .create_content(alice, ContentKind::SharedTask, "shared", None)
        .unwrap();

    let err = engine.create_comment(alice, task.id, "").unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[test]
fn comment_fanout_skips_self() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let carol = add_user(&db, "carol");

    let task = engine
        .create_content(alice, ContentKind::SharedTask, "shared", None)
        .unwrap();

    engine.create_comment(carol, task.id, "Nice!").unwrap();
    assert_eq!(notification_count(&db, alice, carol, NotificationKind::Comment), 1);

    engine.create_comment(alice, task.id, "thanks").unwrap();
    assert_eq!(notification_count(&db, alice, alice, NotificationKind::Comment), 0);
}

#[test]
fn comment_delete_is_dual_authorized() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let bob = add_user(&db, "bob");
    let carol = add_user(&db, "carol");

    let task = engine
        .create_content(alice, ContentKind::SharedTask, "shared", None)
        .unwrap();

    // content owner may remove carol's comment
    let owned = engine.create_comment(carol, task.id, "Nice!").unwrap();
    engine.delete_comment(alice, owned.id).unwrap();

    // an unrelated user may not
    let other = engine.create_comment(carol, task.id, "Still here").unwrap();
    let err = engine.delete_comment(bob, other.id).unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized));

    let remaining: i64 = db
        .with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM comments WHERE id = ?1",
                [other.id.to_string()],
                |row| row.get(0),
            )
        })
        .unwrap();
    assert_eq!(remaining, 1);

    // the comment author may remove their own
    engine.delete_comment(carol, other.id).unwrap();

    let err = engine.delete_comment(carol, other.id).unwrap_err();
    assert!(matches!(err, EngineError::NotFound));
}

#[test]
fn deleting_a_comment_cascades_exactly_its_notifications() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let bob = add_user(&db, "bob");
    let carol = add_user(&db, "carol");

    let task = engine
        .create_content(alice, ContentKind::SharedTask, "shared", None)
        .unwrap();

    let bobs = engine.create_comment(bob, task.id, "from bob").unwrap();
    let carols = engine.create_comment(carol, task.id, "from carol").unwrap();

    engine.delete_comment(bob, bobs.id).unwrap();

    let for_comment = |id: Uuid| {
        db.with_conn(|conn| q::notifications::count_for_comment(conn, &id.to_string()))
            .unwrap()
    };
    assert_eq!(for_comment(bobs.id), 0);
    assert_eq!(for_comment(carols.id), 1);
}

// -- Follow graph --

#[test]
fn self_follow_is_always_rejected() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");

    for _ in 0..2 {
        let err = engine.toggle_follow(alice, alice).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }
}

#[test]
fn follow_toggles_and_counters_derive() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let bob = add_user(&db, "bob");

    assert!(engine.toggle_follow(bob, alice).unwrap().following);

    let profile = engine.get_profile("alice").unwrap();
    assert_eq!(profile.followers, 1);
    assert_eq!(profile.following, 0);

    let followers = engine.list_followers("alice").unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].username, "bob");

    assert!(!engine.toggle_follow(bob, alice).unwrap().following);
    assert_eq!(engine.get_profile("alice").unwrap().followers, 0);
}

#[test]
fn following_a_missing_user_is_not_found() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");

    let err = engine.toggle_follow(alice, Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, EngineError::NotFound));
}

// -- Status state machine --

#[test]
fn status_moves_from_pending_to_terminal_once() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");

    let task = engine
        .create_content(alice, ContentKind::Task, "todo", None)
        .unwrap();

    let done = engine
        .update_status(task.id, TaskKind::Task, TaskStatus::Completed)
        .unwrap();
    assert_eq!(done.status, Some(TaskStatus::Completed));

    let err = engine
        .update_status(task.id, TaskKind::Task, TaskStatus::Failed)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition { .. }));

    // re-asserting the terminal state is a no-op success
    let again = engine
        .update_status(task.id, TaskKind::Task, TaskStatus::Completed)
        .unwrap();
    assert_eq!(again.status, Some(TaskStatus::Completed));
}

#[test]
fn status_kind_must_match_the_stored_item() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");

    let shared = engine
        .create_content(alice, ContentKind::SharedTask, "shared todo", None)
        .unwrap();
    let post = engine
        .create_content(alice, ContentKind::Post, "post", None)
        .unwrap();

    let err = engine
        .update_status(shared.id, TaskKind::Task, TaskStatus::Completed)
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound));

    // posts carry no status at all
    let err = engine
        .update_status(post.id, TaskKind::Task, TaskStatus::Completed)
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound));

    engine
        .update_status(shared.id, TaskKind::SharedTask, TaskStatus::Failed)
        .unwrap();
}

// -- Notifications surface --

#[test]
fn notification_listing_and_mark_read() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let bob = add_user(&db, "bob");

    let task = engine
        .create_content(alice, ContentKind::SharedTask, "shared", None)
        .unwrap();

    engine.toggle_like(bob, task.id).unwrap();
    let comment = engine.create_comment(bob, task.id, "hey").unwrap();

    let inbox = engine.list_notifications(alice).unwrap();
    assert_eq!(inbox.len(), 2);
    // newest first: the comment came after the like
    assert_eq!(inbox[0].kind, NotificationKind::Comment);
    assert_eq!(inbox[0].comment_id, Some(comment.id));
    assert_eq!(inbox[0].actor.username, "bob");
    assert!(inbox.iter().all(|n| !n.read));

    assert_eq!(engine.mark_notifications_read(alice).unwrap(), 2);
    let inbox = engine.list_notifications(alice).unwrap();
    assert!(inbox.iter().all(|n| n.read));

    // bob triggered everything, so bob has no inbox entries
    assert!(engine.list_notifications(bob).unwrap().is_empty());
}

// -- Cascade on content delete --

#[test]
fn deleting_content_removes_dependent_records() {
    let (engine, db) = setup();
    let alice = add_user(&db, "alice");
    let bob = add_user(&db, "bob");

    let task = engine
        .create_content(alice, ContentKind::SharedTask, "shared", None)
        .unwrap();
    engine.toggle_like(bob, task.id).unwrap();
    engine.create_comment(bob, task.id, "hello").unwrap();

    engine.delete_content(task.id, alice).unwrap();

    let count = |table: &str| -> i64 {
        db.with_conn(|conn| {
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        })
        .unwrap()
    };
    assert_eq!(count("likes"), 0);
    assert_eq!(count("comments"), 0);
    assert_eq!(count("notifications"), 0);
}

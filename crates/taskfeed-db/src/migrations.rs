use rusqlite::{Connection, Result};
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            name        TEXT,
            bio         TEXT,
            location    TEXT,
            website     TEXT,
            image       TEXT,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Tagged-variant content: one base record for all three kinds,
        -- status populated exactly when the kind carries one.
        CREATE TABLE IF NOT EXISTS content_items (
            id          TEXT PRIMARY KEY,
            kind        TEXT NOT NULL CHECK (kind IN ('post', 'task', 'shared_task')),
            author_id   TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            content     TEXT NOT NULL,
            image       TEXT,
            status      TEXT CHECK (status IN ('pending', 'completed', 'failed')),
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            CHECK ((kind = 'post') = (status IS NULL))
        );

        CREATE INDEX IF NOT EXISTS idx_content_author
            ON content_items(author_id, created_at);

        CREATE TABLE IF NOT EXISTS comments (
            id          TEXT PRIMARY KEY,
            author_id   TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            content_id  TEXT NOT NULL REFERENCES content_items(id) ON DELETE CASCADE,
            content     TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_comments_content
            ON comments(content_id, created_at);

        -- Composite primary key is the uniqueness guarantee the like
        -- toggle relies on under concurrent double-submission.
        CREATE TABLE IF NOT EXISTS likes (
            user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            content_id  TEXT NOT NULL REFERENCES content_items(id) ON DELETE CASCADE,
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (user_id, content_id)
        );

        CREATE INDEX IF NOT EXISTS idx_likes_content
            ON likes(content_id);

        CREATE TABLE IF NOT EXISTS follows (
            follower_id  TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            followee_id  TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at   TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (follower_id, followee_id),
            CHECK (follower_id <> followee_id)
        );

        CREATE INDEX IF NOT EXISTS idx_follows_followee
            ON follows(followee_id);

        -- Notifications exist only as a side effect of a like or comment;
        -- recipient <> actor because self-actions never notify.
        CREATE TABLE IF NOT EXISTS notifications (
            id            TEXT PRIMARY KEY,
            recipient_id  TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            actor_id      TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            kind          TEXT NOT NULL CHECK (kind IN ('like', 'comment')),
            content_id    TEXT REFERENCES content_items(id) ON DELETE CASCADE,
            comment_id    TEXT REFERENCES comments(id) ON DELETE CASCADE,
            read          INTEGER NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL DEFAULT (datetime('now')),
            CHECK (recipient_id <> actor_id)
        );

        CREATE INDEX IF NOT EXISTS idx_notifications_recipient
            ON notifications(recipient_id, created_at);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}

//! Content store: CRUD for the three content kinds plus the feed
//! projection and the status-transition path.

use std::collections::HashMap;

use uuid::Uuid;

use taskfeed_db::queries::{comments, content, likes};
use taskfeed_types::api::{CommentView, ContentItem, ContentView, UserSummary};
use taskfeed_types::models::{ContentKind, TaskKind, TaskStatus};

use crate::error::{EngineError, EngineResult};
use crate::status::{self, Transition};
use crate::{Engine, guard, project, retry_on_conflict};

/// Feed filter. All fields optional; an empty query lists the whole feed.
#[derive(Debug, Default, Clone)]
pub struct ContentQuery {
    pub id: Option<Uuid>,
    pub author_username: Option<String>,
    pub kind: Option<ContentKind>,
    pub status: Option<TaskStatus>,
}

impl Engine {
    pub fn create_content(
        &self,
        author_id: Uuid,
        kind: ContentKind,
        content: &str,
        image: Option<&str>,
    ) -> EngineResult<ContentItem> {
        if content.is_empty() {
            return Err(EngineError::Validation("content is required"));
        }

        let id = Uuid::new_v4();
        let status = kind.has_status().then_some(TaskStatus::Pending);

        let row = self.db().with_tx(|tx| {
            content::insert_content(
                tx,
                &id.to_string(),
                kind.as_str(),
                &author_id.to_string(),
                content,
                image,
                status.map(TaskStatus::as_str),
            )?;
            content::content_by_id(tx, &id.to_string())?.ok_or(EngineError::NotFound)
        })?;

        self.invalidate("feed");
        Ok(project::content_item(row))
    }

    /// Feed projection: newest-first content, each item carrying its author
    /// summary, oldest-first comments with their authors, like count and
    /// the liking-user-id list. Three batched queries total, regardless of
    /// feed size.
    pub fn get_content(&self, query: &ContentQuery) -> EngineResult<Vec<ContentView>> {
        let id = query.id.map(|v| v.to_string());

        let (items, comment_rows, like_rows) = self.db().with_conn(|conn| {
            let filter = content::ContentFilter {
                id: id.as_deref(),
                author_username: query.author_username.as_deref(),
                kind: query.kind.map(ContentKind::as_str),
                status: query.status.map(TaskStatus::as_str),
            };
            let items = content::list_content(conn, &filter)?;
            let ids: Vec<String> = items.iter().map(|r| r.id.clone()).collect();
            let comment_rows = comments::comments_for_content(conn, &ids)?;
            let like_rows = likes::likes_for_content(conn, &ids)?;
            Ok((items, comment_rows, like_rows))
        })?;

        let mut comment_map: HashMap<String, Vec<CommentView>> = HashMap::new();
        for row in comment_rows {
            let key = row.content_id.clone();
            comment_map.entry(key).or_default().push(project::comment_view(row));
        }

        let mut like_map: HashMap<String, Vec<Uuid>> = HashMap::new();
        for row in like_rows {
            like_map
                .entry(row.content_id)
                .or_default()
                .push(project::parse_id(&row.user_id));
        }

        let views = items
            .into_iter()
            .map(|row| {
                let comments = comment_map.remove(&row.id).unwrap_or_default();
                let liked_by = like_map.remove(&row.id).unwrap_or_default();
                ContentView {
                    id: project::parse_id(&row.id),
                    kind: project::parse_kind(&row.kind),
                    author: UserSummary {
                        id: project::parse_id(&row.author_id),
                        name: row.author_name,
                        username: row.author_username,
                        image: row.author_image,
                    },
                    content: row.content,
                    image: row.image,
                    status: project::parse_status(row.status.as_deref()),
                    created_at: project::parse_timestamp(&row.created_at),
                    comment_count: comments.len(),
                    comments,
                    like_count: liked_by.len(),
                    liked_by,
                }
            })
            .collect();

        Ok(views)
    }

    pub fn update_content(
        &self,
        id: Uuid,
        author_id: Uuid,
        content_patch: Option<&str>,
        image_patch: Option<&str>,
    ) -> EngineResult<ContentItem> {
        let cid = id.to_string();
        let uid = author_id.to_string();

        let row = self.db().with_tx(|tx| {
            let row = content::content_by_id(tx, &cid)?.ok_or(EngineError::NotFound)?;
            if !guard::can_mutate_content(&uid, &row.author_id) {
                return Err(EngineError::Unauthorized);
            }
            content::update_content(tx, &cid, content_patch, image_patch)?;
            content::content_by_id(tx, &cid)?.ok_or(EngineError::NotFound)
        })?;

        self.invalidate("feed");
        Ok(project::content_item(row))
    }

    pub fn delete_content(&self, id: Uuid, author_id: Uuid) -> EngineResult<()> {
        let cid = id.to_string();
        let uid = author_id.to_string();

        self.db().with_tx(|tx| {
            let row = content::content_by_id(tx, &cid)?.ok_or(EngineError::NotFound)?;
            if !guard::can_mutate_content(&uid, &row.author_id) {
                return Err(EngineError::Unauthorized);
            }
            // comments, likes and notifications cascade with the item
            content::delete_content(tx, &cid)?;
            Ok(())
        })?;

        self.invalidate("feed");
        Ok(())
    }

    /// Status lifecycle for the two task kinds. `kind` discriminates which
    /// table the id is expected in; a post id never matches. Re-asserting
    /// the current state is a no-op returning the unchanged item.
    pub fn update_status(
        &self,
        task_id: Uuid,
        kind: TaskKind,
        new_status: TaskStatus,
    ) -> EngineResult<ContentItem> {
        let tid = task_id.to_string();
        let expected_kind = kind.as_content_kind().as_str();

        let row = retry_on_conflict(|| {
            self.db().with_tx(|tx| {
                let row = content::content_by_id(tx, &tid)?.ok_or(EngineError::NotFound)?;
                if row.kind != expected_kind {
                    return Err(EngineError::NotFound);
                }
                let current = project::parse_status(row.status.as_deref())
                    .unwrap_or(TaskStatus::Pending);
                match status::check_transition(current, new_status)? {
                    Transition::NoOp => Ok(row),
                    Transition::Apply => {
                        content::update_status(tx, &tid, new_status.as_str())?;
                        content::content_by_id(tx, &tid)?.ok_or(EngineError::NotFound)
                    }
                }
            })
        })?;

        self.invalidate("feed");
        Ok(project::content_item(row))
    }
}

//! Like toggle and comment create/delete against a shared content item.
//! Each operation composes the content store, the authorization guard and
//! the notification fan-out inside a single transaction, so a like can
//! never exist without a consistent notification presence or absence.

use uuid::Uuid;

use taskfeed_db::queries::{comments, content, likes};
use taskfeed_types::api::{CommentView, LikeToggle};

use crate::error::{EngineError, EngineResult};
use crate::{Engine, guard, notifications, project, retry_on_conflict};

impl Engine {
    /// Flip the like state for (user, target). Repeated calls toggle each
    /// time; callers needing convergence track their own optimistic state.
    pub fn toggle_like(&self, user_id: Uuid, target_id: Uuid) -> EngineResult<LikeToggle> {
        let uid = user_id.to_string();
        let tid = target_id.to_string();

        let result = retry_on_conflict(|| {
            self.db().with_tx(|tx| {
                let target =
                    content::shared_target_by_id(tx, &tid)?.ok_or(EngineError::NotFound)?;

                if likes::like_exists(tx, &uid, &tid)? {
                    likes::delete_like(tx, &uid, &tid)?;
                    notifications::like_removed(tx, &target.author_id, &uid, &tid)?;
                    Ok(LikeToggle { liked: false })
                } else {
                    likes::insert_like(tx, &uid, &tid)?;
                    notifications::like_created(tx, &target.author_id, &uid, &tid)?;
                    Ok(LikeToggle { liked: true })
                }
            })
        })?;

        self.invalidate("feed");
        Ok(result)
    }

    pub fn create_comment(
        &self,
        user_id: Uuid,
        target_id: Uuid,
        comment_content: &str,
    ) -> EngineResult<CommentView> {
        if comment_content.is_empty() {
            return Err(EngineError::Validation("comment content is required"));
        }

        let uid = user_id.to_string();
        let tid = target_id.to_string();
        let comment_id = Uuid::new_v4().to_string();

        let row = self.db().with_tx(|tx| {
            let target = content::shared_target_by_id(tx, &tid)?.ok_or(EngineError::NotFound)?;

            comments::insert_comment(tx, &comment_id, &uid, &tid, comment_content)?;
            notifications::comment_created(tx, &target.author_id, &uid, &tid, &comment_id)?;

            comments::comment_view_by_id(tx, &comment_id)?.ok_or(EngineError::NotFound)
        })?;

        self.invalidate("feed");
        Ok(project::comment_view(row))
    }

    /// Dual authorization: the comment's author or the target content's
    /// owner may remove it. The notification cascade and the comment delete
    /// commit together.
    pub fn delete_comment(&self, user_id: Uuid, comment_id: Uuid) -> EngineResult<()> {
        let uid = user_id.to_string();
        let cid = comment_id.to_string();

        self.db().with_tx(|tx| {
            let comment = comments::comment_with_target(tx, &cid)?.ok_or(EngineError::NotFound)?;

            if !guard::can_delete_comment(&uid, &comment.author_id, &comment.target_author_id) {
                return Err(EngineError::Unauthorized);
            }

            notifications::comment_removed(tx, &cid)?;
            comments::delete_comment(tx, &cid)?;
            Ok(())
        })?;

        self.invalidate("feed");
        Ok(())
    }
}

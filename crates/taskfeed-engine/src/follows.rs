//! Directed follow edges and their idempotent toggle. No notification
//! fan-out for follow events; that is an explicit extension point.

use uuid::Uuid;

use taskfeed_db::queries::{follows, users};
use taskfeed_types::api::FollowToggle;

use crate::error::{EngineError, EngineResult};
use crate::{Engine, guard, retry_on_conflict};

impl Engine {
    pub fn toggle_follow(&self, follower_id: Uuid, followee_id: Uuid) -> EngineResult<FollowToggle> {
        let follower = follower_id.to_string();
        let followee = followee_id.to_string();

        if !guard::can_toggle_follow(&follower, &followee) {
            return Err(EngineError::Validation("cannot follow yourself"));
        }

        let result = retry_on_conflict(|| {
            self.db().with_tx(|tx| {
                if users::user_by_id(tx, &followee)?.is_none() {
                    return Err(EngineError::NotFound);
                }

                if follows::follow_exists(tx, &follower, &followee)? {
                    follows::delete_follow(tx, &follower, &followee)?;
                    Ok(FollowToggle { following: false })
                } else {
                    follows::insert_follow(tx, &follower, &followee)?;
                    Ok(FollowToggle { following: true })
                }
            })
        })?;

        self.invalidate("feed");
        Ok(result)
    }
}

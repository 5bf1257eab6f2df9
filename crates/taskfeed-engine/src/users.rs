//! Profile reads and edits. Counters (followers, following, content) are
//! derived by COUNT queries at read time, never stored.

use rusqlite::Connection;
use uuid::Uuid;

use taskfeed_db::models::UserRow;
use taskfeed_db::queries::users;
use taskfeed_types::api::{ProfileView, UserSummary};

use crate::error::{EngineError, EngineResult};
use crate::{Engine, project};

fn profile_view(conn: &Connection, user: UserRow) -> rusqlite::Result<ProfileView> {
    let followers = users::follower_count(conn, &user.id)?;
    let following = users::following_count(conn, &user.id)?;
    let content_count = users::content_count(conn, &user.id)?;

    Ok(ProfileView {
        id: project::parse_id(&user.id),
        username: user.username,
        name: user.name,
        bio: user.bio,
        location: user.location,
        website: user.website,
        image: user.image,
        created_at: project::parse_timestamp(&user.created_at),
        followers,
        following,
        content_count,
    })
}

impl Engine {
    pub fn get_profile(&self, username: &str) -> EngineResult<ProfileView> {
        let view = self.db().with_conn(|conn| {
            let user = match users::user_by_username(conn, username)? {
                Some(user) => user,
                None => return Ok(None),
            };
            profile_view(conn, user).map(Some)
        })?;
        view.ok_or(EngineError::NotFound)
    }

    pub fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
        bio: Option<&str>,
        location: Option<&str>,
        website: Option<&str>,
    ) -> EngineResult<ProfileView> {
        let uid = user_id.to_string();

        let view = self.db().with_tx(|tx| {
            let changed = users::update_profile(tx, &uid, name, bio, location, website)?;
            if changed == 0 {
                return Err(EngineError::NotFound);
            }
            let user = users::user_by_id(tx, &uid)?.ok_or(EngineError::NotFound)?;
            profile_view(tx, user).map_err(EngineError::from)
        })?;

        self.invalidate("feed");
        Ok(view)
    }

    pub fn list_followers(&self, username: &str) -> EngineResult<Vec<UserSummary>> {
        self.follow_listing(username, users::list_followers)
    }

    pub fn list_following(&self, username: &str) -> EngineResult<Vec<UserSummary>> {
        self.follow_listing(username, users::list_following)
    }

    fn follow_listing(
        &self,
        username: &str,
        list: fn(&Connection, &str) -> rusqlite::Result<Vec<taskfeed_db::models::UserSummaryRow>>,
    ) -> EngineResult<Vec<UserSummary>> {
        let rows = self.db().with_conn(|conn| {
            let user = match users::user_by_username(conn, username)? {
                Some(user) => user,
                None => return Ok(None),
            };
            list(conn, &user.id).map(Some)
        })?;
        let rows = rows.ok_or(EngineError::NotFound)?;
        Ok(rows.into_iter().map(project::user_summary).collect())
    }
}

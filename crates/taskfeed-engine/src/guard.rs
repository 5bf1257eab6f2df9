//! Pure authorization decisions, no side effects. Invoked inside the same
//! transaction as the mutation they guard, against the freshly loaded
//! ownership facts, so there is no check-to-use gap.

/// Content edits and deletes are reserved to the author.
pub fn can_mutate_content(user_id: &str, author_id: &str) -> bool {
    user_id == author_id
}

/// A comment may be removed by its author or by the owner of the content it
/// targets.
pub fn can_delete_comment(user_id: &str, comment_author_id: &str, content_author_id: &str) -> bool {
    user_id == comment_author_id || user_id == content_author_id
}

/// Self-follow is forbidden.
pub fn can_toggle_follow(follower_id: &str, followee_id: &str) -> bool {
    follower_id != followee_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_author_mutates_content() {
        assert!(can_mutate_content("alice", "alice"));
        assert!(!can_mutate_content("bob", "alice"));
    }

    #[test]
    fn comment_delete_is_dual_authorized() {
        // comment by carol on alice's content
        assert!(can_delete_comment("carol", "carol", "alice"));
        assert!(can_delete_comment("alice", "carol", "alice"));
        assert!(!can_delete_comment("bob", "carol", "alice"));
    }

    #[test]
    fn self_follow_rejected() {
        assert!(!can_toggle_follow("alice", "alice"));
        assert!(can_toggle_follow("alice", "bob"));
    }
}

use serde::{Deserialize, Serialize};

/// The three author-owned content kinds. Posts and shared tasks are visible
/// to the social graph; plain tasks are private to their author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Post,
    Task,
    SharedTask,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Task => "task",
            ContentKind::SharedTask => "shared_task",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "post" => Some(ContentKind::Post),
            "task" => Some(ContentKind::Task),
            "shared_task" => Some(ContentKind::SharedTask),
            _ => None,
        }
    }

    /// Posts carry no status; both task kinds do.
    pub fn has_status(self) -> bool {
        !matches!(self, ContentKind::Post)
    }

    /// Whether this kind can be the target of a like or comment.
    pub fn is_shared(self) -> bool {
        !matches!(self, ContentKind::Task)
    }
}

/// Discriminates which task table an `update_status` id belongs to.
/// Posts carry no status, so they are unrepresentable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Task,
    SharedTask,
}

impl TaskKind {
    pub fn as_content_kind(self) -> ContentKind {
        match self {
            TaskKind::Task => ContentKind::Task,
            TaskKind::SharedTask => ContentKind::SharedTask,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "completed" => Some(TaskStatus::Completed),
            "failed" => Some(TaskStatus::Failed),
            _ => None,
        }
    }

    /// Completed and failed admit no further transition.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TaskStatus::Pending)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Like,
    Comment,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Like => "like",
            NotificationKind::Comment => "comment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(NotificationKind::Like),
            "comment" => Some(NotificationKind::Comment),
            _ => None,
        }
    }
}

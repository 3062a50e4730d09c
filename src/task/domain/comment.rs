//! Threaded task comments.

use super::{CommentId, EmployeeId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A single comment on a task, optionally replying to another comment.
///
/// Reply threads are stored flat: each comment carries its parent comment
/// identifier and trees are reassembled in memory from the flat list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskComment {
    id: CommentId,
    task: TaskId,
    author: EmployeeId,
    text: String,
    parent_comment: Option<CommentId>,
    created_at: DateTime<Utc>,
}

impl TaskComment {
    /// Creates a top-level comment on a task.
    #[must_use]
    pub fn new(task: TaskId, author: EmployeeId, text: String, clock: &impl Clock) -> Self {
        Self {
            id: CommentId::new(),
            task,
            author,
            text,
            parent_comment: None,
            created_at: clock.utc(),
        }
    }

    /// Creates a reply to an existing comment on the same task.
    #[must_use]
    pub fn reply(
        task: TaskId,
        parent_comment: CommentId,
        author: EmployeeId,
        text: String,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CommentId::new(),
            task,
            author,
            text,
            parent_comment: Some(parent_comment),
            created_at: clock.utc(),
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the commented task.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the comment author.
    #[must_use]
    pub const fn author(&self) -> EmployeeId {
        self.author
    }

    /// Returns the comment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the parent comment when this comment is a reply.
    #[must_use]
    pub const fn parent_comment(&self) -> Option<CommentId> {
        self.parent_comment
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A comment with its reply subtree, assembled from the flat comment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentThread {
    /// The comment at this node.
    pub comment: TaskComment,
    /// Direct replies, each with their own subtree.
    pub replies: Vec<CommentThread>,
}

impl CommentThread {
    /// Wraps a comment with no replies.
    #[must_use]
    pub const fn leaf(comment: TaskComment) -> Self {
        Self {
            comment,
            replies: Vec::new(),
        }
    }

    /// Counts the comments in this thread, this node included.
    #[must_use]
    pub fn total_comments(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.replies.iter());
        }
        count
    }
}

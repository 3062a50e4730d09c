//! Threaded comment management.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::automation::domain::TaskEvent;
use crate::automation::ports::AutomationHook;
use crate::context::RequestContext;
use crate::task::domain::{CommentId, CommentThread, TaskComment, TaskId};
use crate::task::error::ValidationError;
use crate::task::ports::{
    AccessDenied, Action, Authorizer, CommentRepository, RepositoryError, Resource,
    TaskRepository, TaskValidator,
};

/// Errors returned by comment thread operations.
#[derive(Debug, Error)]
pub enum CommentThreadError {
    /// Authorization denial.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// Rule check failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The commented task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The identified comment does not exist.
    #[error("comment not found: {0}")]
    CommentNotFound(CommentId),

    /// Task store failure.
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

impl CommentThreadError {
    /// Returns the stable machine-readable key for this failure.
    #[must_use]
    pub const fn error_key(&self) -> &'static str {
        match self {
            Self::Forbidden(err) => err.error_key(),
            Self::Validation(err) => err.error_key(),
            Self::TaskNotFound(_) => "task.not_found",
            Self::CommentNotFound(_) => "comment.not_found",
            Self::Store(_) => "store.failure",
        }
    }
}

/// Manages comment threads on tasks.
///
/// Comments are persisted flat and reassembled into reply trees in memory.
/// Both tree assembly and cascade deletion walk the thread with explicit
/// work lists rather than call-stack recursion, so deep or corrupt parent
/// chains cannot overflow the stack.
#[derive(Clone)]
pub struct CommentThreadService<K>
where
    K: Clock + Send + Sync,
{
    tasks: Arc<dyn TaskRepository>,
    comments: Arc<dyn CommentRepository>,
    validator: Arc<dyn TaskValidator>,
    authorizer: Arc<dyn Authorizer>,
    automation: Arc<dyn AutomationHook>,
    clock: Arc<K>,
}

impl<K> CommentThreadService<K>
where
    K: Clock + Send + Sync,
{
    /// Creates a new comment thread service.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        comments: Arc<dyn CommentRepository>,
        validator: Arc<dyn TaskValidator>,
        authorizer: Arc<dyn Authorizer>,
        automation: Arc<dyn AutomationHook>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            tasks,
            comments,
            validator,
            authorizer,
            automation,
            clock,
        }
    }

    /// Adds a top-level comment to a task.
    ///
    /// # Errors
    ///
    /// Returns [`CommentThreadError::TaskNotFound`] when the task is
    /// missing and [`CommentThreadError::Validation`] for blank or overlong
    /// text.
    pub async fn add_comment(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
        text: String,
    ) -> Result<TaskComment, CommentThreadError> {
        self.authorizer
            .authorize(ctx, Resource::TaskComments, Action::Create)
            .await?;
        self.validator.validate_comment_text(&text)?;

        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(CommentThreadError::TaskNotFound(task_id))?;

        let comment = TaskComment::new(task_id, ctx.employee(), text, &*self.clock);
        self.comments.store(&comment).await?;
        self.automation
            .publish(&TaskEvent::TaskCommentAdded {
                task,
                comment: comment.clone(),
            })
            .await;
        Ok(comment)
    }

    /// Adds a reply beneath an existing comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentThreadError::CommentNotFound`] when the parent
    /// comment is missing.
    pub async fn reply_to_comment(
        &self,
        ctx: &RequestContext,
        parent_comment: CommentId,
        text: String,
    ) -> Result<TaskComment, CommentThreadError> {
        self.authorizer
            .authorize(ctx, Resource::TaskComments, Action::Create)
            .await?;
        self.validator.validate_comment_text(&text)?;

        let parent = self
            .comments
            .find_by_id(parent_comment)
            .await?
            .ok_or(CommentThreadError::CommentNotFound(parent_comment))?;
        let task = self
            .tasks
            .find_by_id(parent.task())
            .await?
            .ok_or(CommentThreadError::TaskNotFound(parent.task()))?;

        let comment = TaskComment::reply(
            parent.task(),
            parent_comment,
            ctx.employee(),
            text,
            &*self.clock,
        );
        self.comments.store(&comment).await?;
        self.automation
            .publish(&TaskEvent::TaskCommentAdded {
                task,
                comment: comment.clone(),
            })
            .await;
        Ok(comment)
    }

    /// Returns the task's top-level comments, each with its reply subtree
    /// assembled from the flat comment list.
    ///
    /// # Errors
    ///
    /// Returns [`CommentThreadError::TaskNotFound`] when the task is
    /// missing.
    pub async fn comments_for_task(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
    ) -> Result<Vec<CommentThread>, CommentThreadError> {
        self.authorizer
            .authorize(ctx, Resource::TaskComments, Action::Read)
            .await?;
        if !self.tasks.exists(task_id).await? {
            return Err(CommentThreadError::TaskNotFound(task_id));
        }

        let flat = self.comments.find_by_task(task_id).await?;
        Ok(build_threads(flat))
    }

    /// Deletes a comment and every descendant reply, deepest replies first.
    /// Returns the number of removed records (the comment itself included).
    ///
    /// # Errors
    ///
    /// Returns [`CommentThreadError::CommentNotFound`] when the comment is
    /// missing.
    pub async fn delete_comment(
        &self,
        ctx: &RequestContext,
        id: CommentId,
    ) -> Result<usize, CommentThreadError> {
        self.authorizer
            .authorize(ctx, Resource::TaskComments, Action::Delete)
            .await?;
        if self.comments.find_by_id(id).await?.is_none() {
            return Err(CommentThreadError::CommentNotFound(id));
        }

        // Gather the subtree breadth-first; the visited set makes corrupt
        // cyclic parent chains terminate.
        let mut order: Vec<CommentId> = Vec::new();
        let mut visited: HashSet<CommentId> = HashSet::new();
        let mut queue: VecDeque<CommentId> = VecDeque::new();
        visited.insert(id);
        queue.push_back(id);
        while let Some(current) = queue.pop_front() {
            order.push(current);
            for reply in self.comments.find_by_parent_comment(current).await? {
                if visited.insert(reply.id()) {
                    queue.push_back(reply.id());
                }
            }
        }

        // Deepest first so no reply ever outlives its parent.
        for comment_id in order.iter().rev() {
            self.comments.delete(*comment_id).await?;
        }
        Ok(order.len())
    }
}

/// Assembles reply trees from a flat comment list.
///
/// Comments are ordered by creation time at every level. A comment whose
/// parent is absent from the list is treated as top-level; comments only
/// reachable through corrupt cyclic parent chains are dropped.
fn build_threads(mut flat: Vec<TaskComment>) -> Vec<CommentThread> {
    flat.sort_by_key(|comment| (comment.created_at(), comment.id()));

    let mut nodes: HashMap<CommentId, CommentThread> = HashMap::new();
    let mut parent_of: HashMap<CommentId, Option<CommentId>> = HashMap::new();
    let mut children: HashMap<CommentId, Vec<CommentId>> = HashMap::new();
    let mut roots: Vec<CommentId> = Vec::new();

    let known: HashSet<CommentId> = flat.iter().map(TaskComment::id).collect();
    for comment in flat {
        let id = comment.id();
        let parent = comment.parent_comment().filter(|candidate| known.contains(candidate));
        parent_of.insert(id, parent);
        match parent {
            Some(parent_id) => children.entry(parent_id).or_default().push(id),
            None => roots.push(id),
        }
        nodes.insert(id, CommentThread::leaf(comment));
    }

    // Post-order finish sequence via explicit stack: children finish before
    // their parent, so every subtree is complete before it is attached.
    let mut finish_order: Vec<CommentId> = Vec::new();
    let mut stack: Vec<(CommentId, bool)> = roots
        .iter()
        .rev()
        .map(|root| (*root, false))
        .collect();
    while let Some((current, expanded)) = stack.pop() {
        if expanded {
            finish_order.push(current);
            continue;
        }
        stack.push((current, true));
        if let Some(child_ids) = children.get(&current) {
            for child in child_ids.iter().rev() {
                stack.push((*child, false));
            }
        }
    }

    for id in finish_order {
        let Some(Some(parent_id)) = parent_of.get(&id).copied() else {
            continue;
        };
        if let Some(node) = nodes.remove(&id)
            && let Some(parent_node) = nodes.get_mut(&parent_id)
        {
            parent_node.replies.push(node);
        }
    }

    roots
        .into_iter()
        .filter_map(|root| nodes.remove(&root))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::build_threads;
    use crate::task::domain::{EmployeeId, TaskComment, TaskId};
    use mockable::DefaultClock;
    use rstest::rstest;

    fn comment(task: TaskId, author: EmployeeId, text: &str) -> TaskComment {
        TaskComment::new(task, author, text.to_owned(), &DefaultClock)
    }

    #[rstest]
    fn build_threads_nests_replies_under_their_parents() {
        let task = TaskId::new();
        let author = EmployeeId::new();
        let top = comment(task, author, "top");
        let reply = TaskComment::reply(task, top.id(), author, "reply".to_owned(), &DefaultClock);
        let nested =
            TaskComment::reply(task, reply.id(), author, "nested".to_owned(), &DefaultClock);

        let threads = build_threads(vec![nested.clone(), top.clone(), reply.clone()]);

        assert_eq!(threads.len(), 1);
        let root = threads.first().expect("one thread");
        assert_eq!(root.comment, top);
        assert_eq!(root.replies.len(), 1);
        let mid = root.replies.first().expect("one reply");
        assert_eq!(mid.comment, reply);
        assert_eq!(mid.replies.first().map(|node| node.comment.clone()), Some(nested));
    }

    #[rstest]
    fn build_threads_treats_dangling_parents_as_top_level() {
        let task = TaskId::new();
        let author = EmployeeId::new();
        let orphan = TaskComment::reply(
            task,
            crate::task::domain::CommentId::new(),
            author,
            "orphan".to_owned(),
            &DefaultClock,
        );

        let threads = build_threads(vec![orphan.clone()]);

        assert_eq!(threads.len(), 1);
        assert_eq!(threads.first().map(|node| node.comment.clone()), Some(orphan));
    }
}

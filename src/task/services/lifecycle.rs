//! Task lifecycle orchestration.
//!
//! The lifecycle service sequences every mutating operation the same way:
//! authorize, validate, load, mutate the aggregate, persist, run dependent
//! aggregation, and only then publish automation events. Events always ride
//! behind durable state.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use thiserror::Error;

use crate::automation::domain::TaskEvent;
use crate::automation::ports::AutomationHook;
use crate::context::RequestContext;
use crate::task::domain::{
    AttachmentId, AttachmentVisibility, DependencyId, EmployeeId, NewAttachmentData, NewTaskData,
    ProjectId, TagId, Task, TaskAttachment, TaskDependency, TaskDomainError, TaskId, TaskPriority,
    TaskStatus, TaskTag,
};
use crate::task::error::ValidationError;
use crate::task::ports::{
    AccessDenied, Action, Authorizer, DirectoryError, EmployeeDirectory, FileStore,
    FileStoreError, ProjectDirectory, RepositoryError, Resource, TaskQuery, TaskStore,
    TaskValidator,
};
use crate::task::services::dependencies::{DependencyGraphError, DependencyGraphService};
use crate::task::services::progress::{ProgressError, ProgressService};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskRequest {
    project: ProjectId,
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    parent: Option<TaskId>,
    owner: Option<EmployeeId>,
    assignees: Vec<EmployeeId>,
    tags: Vec<TagId>,
    start_at: Option<DateTime<Utc>>,
    due_at: Option<DateTime<Utc>>,
    estimated_minutes: Option<u32>,
}

impl NewTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(project: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project,
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
            parent: None,
            owner: None,
            assignees: Vec::new(),
            tags: Vec::new(),
            start_at: None,
            due_at: None,
            estimated_minutes: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the parent task, making the new task a subtask.
    #[must_use]
    pub const fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets an explicit owner; the caller owns the task otherwise.
    #[must_use]
    pub const fn with_owner(mut self, owner: EmployeeId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the requested assignees. Unknown ids are dropped silently.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = EmployeeId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Sets the requested tags. Unknown ids are dropped silently.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagId>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the scheduled start.
    #[must_use]
    pub const fn with_start_at(mut self, start_at: DateTime<Utc>) -> Self {
        self.start_at = Some(start_at);
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Sets the effort estimate in whole minutes.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }
}

/// Partial update for a task. Only populated fields are applied; absent
/// fields leave the task untouched. A populated assignee or tag list
/// replaces the prior set wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement parent task.
    pub parent: Option<TaskId>,
    /// Replacement assignee set.
    pub assignees: Option<Vec<EmployeeId>>,
    /// Replacement tag set.
    pub tags: Option<Vec<TagId>>,
    /// Replacement scheduled start.
    pub start_at: Option<DateTime<Utc>>,
    /// Replacement due timestamp.
    pub due_at: Option<DateTime<Utc>>,
    /// Replacement effort estimate in whole minutes.
    pub estimated_minutes: Option<u32>,
    /// Replacement recorded effort in whole minutes.
    pub actual_minutes: Option<u32>,
    /// Replacement progress percentage; rejected on tasks with subtasks,
    /// whose progress is derived.
    pub progress: Option<u8>,
}

impl TaskPatch {
    /// Creates an empty patch that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Upload payload for a task attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
    visibility: AttachmentVisibility,
    description: Option<String>,
}

impl AttachmentUpload {
    /// Creates an upload with the required fields.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
            visibility: AttachmentVisibility::default(),
            description: None,
        }
    }

    /// Sets the visibility.
    #[must_use]
    pub const fn with_visibility(mut self, visibility: AttachmentVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Authorization denial, surfaced before any other check.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// Rule check failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Domain invariant failure.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The referenced task does not exist in the caller's organization.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced parent task does not exist.
    #[error("parent task not found: {0}")]
    ParentTaskNotFound(TaskId),

    /// The owning project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The referenced employee does not exist.
    #[error("employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    /// The referenced attachment does not exist.
    #[error("attachment not found: {0}")]
    AttachmentNotFound(AttachmentId),

    /// The employee is not currently assigned to the task.
    #[error("employee {employee} is not assigned to task {task}")]
    NotAssigned {
        /// The task whose assignee set was inspected.
        task: TaskId,
        /// The employee that was expected to be assigned.
        employee: EmployeeId,
    },

    /// Task store failure.
    #[error(transparent)]
    Store(#[from] RepositoryError),

    /// Directory lookup failure.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// File store failure while storing attachment bytes.
    #[error(transparent)]
    Files(#[from] FileStoreError),

    /// Progress aggregation failure.
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

impl TaskLifecycleError {
    /// Returns the stable machine-readable key for this failure.
    #[must_use]
    pub const fn error_key(&self) -> &'static str {
        match self {
            Self::Forbidden(err) => err.error_key(),
            Self::Validation(err) => err.error_key(),
            Self::Domain(err) => err.error_key(),
            Self::TaskNotFound(_) => "task.not_found",
            Self::ParentTaskNotFound(_) => "task.parent_not_found",
            Self::ProjectNotFound(_) => "project.not_found",
            Self::EmployeeNotFound(_) => "employee.not_found",
            Self::AttachmentNotFound(_) => "attachment.not_found",
            Self::NotAssigned { .. } => "task.not_assigned",
            Self::Store(_) => "store.failure",
            Self::Directory(_) => "directory.failure",
            Self::Files(_) => "files.failure",
            Self::Progress(err) => err.error_key(),
        }
    }
}

/// Collaborator bundle for constructing the lifecycle service.
#[derive(Clone)]
pub struct TaskEngineWiring<K>
where
    K: Clock + Send + Sync,
{
    /// Aggregated persistence handle.
    pub store: TaskStore,
    /// Employee directory.
    pub directory: Arc<dyn EmployeeDirectory>,
    /// Project directory.
    pub projects: Arc<dyn ProjectDirectory>,
    /// Attachment byte storage.
    pub files: Arc<dyn FileStore>,
    /// Rule validator.
    pub validator: Arc<dyn TaskValidator>,
    /// Authorization decisioning.
    pub authorizer: Arc<dyn Authorizer>,
    /// Lifecycle event consumer.
    pub automation: Arc<dyn AutomationHook>,
    /// Clock for timestamps.
    pub clock: Arc<K>,
}

/// Orchestrates every task mutation.
///
/// The only component allowed to touch more than one collaborator per call.
/// Dependency and progress management are composed as sub-services sharing
/// this service's wiring.
#[derive(Clone)]
pub struct TaskLifecycleService<K>
where
    K: Clock + Send + Sync,
{
    store: TaskStore,
    directory: Arc<dyn EmployeeDirectory>,
    projects: Arc<dyn ProjectDirectory>,
    files: Arc<dyn FileStore>,
    validator: Arc<dyn TaskValidator>,
    authorizer: Arc<dyn Authorizer>,
    automation: Arc<dyn AutomationHook>,
    progress: ProgressService<K>,
    graph: DependencyGraphService<K>,
    clock: Arc<K>,
}

impl<K> TaskLifecycleService<K>
where
    K: Clock + Send + Sync,
{
    /// Creates a new lifecycle service from its collaborator bundle.
    #[must_use]
    pub fn new(wiring: TaskEngineWiring<K>) -> Self {
        let progress = ProgressService::new(
            Arc::clone(&wiring.store.tasks),
            Arc::clone(&wiring.automation),
            Arc::clone(&wiring.clock),
        );
        let graph = DependencyGraphService::new(
            Arc::clone(&wiring.store.tasks),
            Arc::clone(&wiring.store.dependencies),
            Arc::clone(&wiring.authorizer),
            Arc::clone(&wiring.automation),
            Arc::clone(&wiring.clock),
        );
        Self {
            store: wiring.store,
            directory: wiring.directory,
            projects: wiring.projects,
            files: wiring.files,
            validator: wiring.validator,
            authorizer: wiring.authorizer,
            automation: wiring.automation,
            progress,
            graph,
            clock: wiring.clock,
        }
    }

    /// Returns the composed dependency graph service.
    #[must_use]
    pub const fn graph(&self) -> &DependencyGraphService<K> {
        &self.graph
    }

    /// Creates a task in the caller's organization.
    ///
    /// Requested assignees and tags are resolved against their directories;
    /// unknown ids are dropped silently. Publishes
    /// [`TaskEvent::TaskCreated`] after persistence.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when validation fails or a referenced
    /// project, parent, or owner is missing.
    pub async fn create_task(
        &self,
        ctx: &RequestContext,
        request: NewTaskRequest,
    ) -> Result<Task, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Create)
            .await?;

        self.validator.validate_title(&request.title)?;
        self.validator
            .validate_description(request.description.as_deref())?;
        self.validator
            .validate_schedule(request.start_at, request.due_at)?;

        if !self.projects.exists(request.project).await? {
            return Err(TaskLifecycleError::ProjectNotFound(request.project));
        }
        let owner = request.owner.unwrap_or_else(|| ctx.employee());
        if !self.directory.exists(owner).await? {
            return Err(TaskLifecycleError::EmployeeNotFound(owner));
        }
        if let Some(parent) = request.parent
            && !self.store.tasks.exists(parent).await?
        {
            return Err(TaskLifecycleError::ParentTaskNotFound(parent));
        }

        let assignees = self.resolve_assignees(&request.assignees).await?;
        let tags = self.resolve_tags(ctx, &request.tags).await?;

        let task = Task::new(
            NewTaskData {
                organization: ctx.organization(),
                project: request.project,
                title: request.title,
                description: request.description,
                priority: request.priority,
                parent: request.parent,
                owner,
                assignees,
                tags,
                start_at: request.start_at,
                due_at: request.due_at,
                estimated_minutes: request.estimated_minutes,
            },
            &*self.clock,
        );
        self.store.tasks.store(&task).await?;
        self.automation
            .publish(&TaskEvent::TaskCreated { task: task.clone() })
            .await;
        Ok(task)
    }

    /// Retrieves a task in the caller's organization.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when absent.
    pub async fn get_task(
        &self,
        ctx: &RequestContext,
        id: TaskId,
    ) -> Result<Task, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Read)
            .await?;
        self.load_task(ctx, id).await
    }

    /// Returns every task in the caller's organization.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the lookup fails.
    pub async fn list_tasks(&self, ctx: &RequestContext) -> Result<Vec<Task>, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Read)
            .await?;
        Ok(self
            .store
            .tasks
            .find_by_organization(ctx.organization())
            .await?)
    }

    /// Returns the tasks in the caller's organization matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the lookup fails.
    pub async fn search_tasks(
        &self,
        ctx: &RequestContext,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Read)
            .await?;
        Ok(self.store.tasks.search(ctx.organization(), query).await?)
    }

    /// Returns the tasks where the caller is an assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the lookup fails.
    pub async fn my_tasks(&self, ctx: &RequestContext) -> Result<Vec<Task>, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Read)
            .await?;
        Ok(self
            .store
            .tasks
            .find_by_assignee(ctx.organization(), ctx.employee())
            .await?)
    }

    /// Applies a partial update. Publishes no event; only dedicated
    /// sub-operations (status, priority, assignment) notify.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when validation fails, the task is
    /// missing, or an explicit progress value targets a task whose progress
    /// is derived from subtasks.
    pub async fn update_task(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        patch: TaskPatch,
    ) -> Result<Task, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Update)
            .await?;
        let mut task = self.load_task(ctx, id).await?;

        if let Some(title) = &patch.title {
            self.validator.validate_title(title)?;
        }
        if let Some(description) = &patch.description {
            self.validator.validate_description(Some(description.as_str()))?;
        }
        let effective_start = patch.start_at.or(task.start_at());
        let effective_due = patch.due_at.or(task.due_at());
        self.validator
            .validate_schedule(effective_start, effective_due)?;
        if let Some(progress) = patch.progress {
            self.validator.validate_progress(progress)?;
            if !self.store.tasks.find_by_parent(id).await?.is_empty() {
                return Err(ValidationError::ProgressDerived(id).into());
            }
        }
        if let Some(parent) = patch.parent {
            if parent == id {
                return Err(ValidationError::ParentIsSelf(id).into());
            }
            if !self.store.tasks.exists(parent).await? {
                return Err(TaskLifecycleError::ParentTaskNotFound(parent));
            }
        }

        let clock = &*self.clock;
        if let Some(title) = patch.title {
            task.set_title(title, clock);
        }
        if let Some(description) = patch.description {
            task.set_description(description, clock);
        }
        if let Some(priority) = patch.priority {
            task.set_priority(priority, clock);
        }
        if let Some(parent) = patch.parent {
            task.set_parent(parent, clock);
        }
        if let Some(start_at) = patch.start_at {
            task.set_start_at(start_at, clock);
        }
        if let Some(due_at) = patch.due_at {
            task.set_due_at(due_at, clock);
        }
        if let Some(minutes) = patch.estimated_minutes {
            task.set_estimated_minutes(minutes, clock);
        }
        if let Some(minutes) = patch.actual_minutes {
            task.set_actual_minutes(minutes, clock);
        }
        if let Some(progress) = patch.progress {
            task.set_progress(progress, clock)?;
        }
        if let Some(assignees) = patch.assignees {
            let resolved = self.resolve_assignees(&assignees).await?;
            task.replace_assignees(resolved, clock);
        }
        if let Some(tags) = patch.tags {
            let resolved = self.resolve_tags(ctx, &tags).await?;
            task.replace_tags(resolved, clock);
        }

        self.store.tasks.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task, optionally with its direct subtasks.
    ///
    /// Each removed task takes its comments, dependency edges in both
    /// directions, and attachment records with it; stored attachment bytes
    /// are removed best-effort. Publishes [`TaskEvent::TaskDeleted`] for
    /// the requested task after removal.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::SubtasksPresent`] (wrapped) when subtasks
    /// exist and `delete_subtasks` is `false`.
    pub async fn delete_task(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        delete_subtasks: bool,
    ) -> Result<(), TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Delete)
            .await?;
        let task = self.load_task(ctx, id).await?;

        let children = self.store.tasks.find_by_parent(id).await?;
        if !children.is_empty() && !delete_subtasks {
            return Err(ValidationError::SubtasksPresent(id).into());
        }
        for child in &children {
            self.remove_task_records(child).await?;
        }
        self.remove_task_records(&task).await?;

        self.automation
            .publish(&TaskEvent::TaskDeleted { task })
            .await;
        Ok(())
    }

    /// Applies a caller-driven status change.
    ///
    /// On a transition into `Done` the task's own progress is recalculated
    /// (meaningful only when it has subtasks) and
    /// [`TaskEvent::TaskCompleted`] is published.
    /// [`TaskEvent::TaskStatusChanged`] is always published. When the task
    /// has a parent, the parent's progress is recalculated and the parent
    /// auto-closes once its incomplete-subtask count reaches zero.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IllegalTransition`] (wrapped) when the
    /// transition table rejects the change; the task is left untouched.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        new_status: TaskStatus,
    ) -> Result<Task, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Update)
            .await?;
        let mut task = self.load_task(ctx, id).await?;

        let previous = task.status();
        self.validator
            .validate_status_transition(previous, new_status)?;
        task.transition_to(new_status, &*self.clock)?;
        self.store.tasks.update(&task).await?;

        if new_status.is_done() {
            self.progress.recalculate(id).await?;
            task = self.load_task(ctx, id).await?;
            self.automation
                .publish(&TaskEvent::TaskCompleted { task: task.clone() })
                .await;
        }
        self.automation
            .publish(&TaskEvent::TaskStatusChanged {
                task: task.clone(),
                from: previous,
                to: new_status,
            })
            .await;

        if let Some(parent) = task.parent() {
            self.progress.recalculate(parent).await?;
            self.progress.auto_close(parent).await?;
        }
        Ok(task)
    }

    /// Sets the priority unconditionally and publishes
    /// [`TaskEvent::TaskPriorityChanged`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task is
    /// missing.
    pub async fn update_priority(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        new_priority: TaskPriority,
    ) -> Result<Task, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Update)
            .await?;
        let mut task = self.load_task(ctx, id).await?;

        let previous = task.priority();
        task.set_priority(new_priority, &*self.clock);
        self.store.tasks.update(&task).await?;
        self.automation
            .publish(&TaskEvent::TaskPriorityChanged {
                task: task.clone(),
                from: previous,
                to: new_priority,
            })
            .await;
        Ok(task)
    }

    /// Replaces the assignee set and publishes one
    /// [`TaskEvent::TaskAssigned`] per member of the entire new set, not
    /// just the additions.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AssigneesRequired`] (wrapped) for an
    /// empty input list; the prior set is left untouched.
    pub async fn assign_users(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        employees: &[EmployeeId],
    ) -> Result<Task, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Update)
            .await?;
        let mut task = self.load_task(ctx, id).await?;

        if employees.is_empty() {
            return Err(ValidationError::AssigneesRequired.into());
        }
        let resolved = self.resolve_assignees(employees).await?;
        task.replace_assignees(resolved, &*self.clock);
        self.store.tasks.update(&task).await?;

        for assignee in task.assignees().clone() {
            self.automation
                .publish(&TaskEvent::TaskAssigned {
                    task: task.clone(),
                    assignee,
                })
                .await;
        }
        Ok(task)
    }

    /// Removes one assignee from the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotAssigned`] when the employee is not
    /// currently assigned.
    pub async fn unassign_user(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        employee: EmployeeId,
    ) -> Result<Task, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Update)
            .await?;
        let mut task = self.load_task(ctx, id).await?;

        if !task.remove_assignee(employee, &*self.clock) {
            return Err(TaskLifecycleError::NotAssigned { task: id, employee });
        }
        self.store.tasks.update(&task).await?;
        Ok(task)
    }

    /// Explicitly recalculates a task's progress from its subtasks.
    ///
    /// Returns the persisted percentage, or `None` when the task has no
    /// subtasks and was left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task is
    /// missing.
    pub async fn recalculate_progress(
        &self,
        ctx: &RequestContext,
        id: TaskId,
    ) -> Result<Option<u8>, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Update)
            .await?;
        self.load_task(ctx, id).await?;
        Ok(self.progress.recalculate(id).await?)
    }

    /// Creates a dependency edge; convenience passthrough to the composed
    /// [`DependencyGraphService`].
    ///
    /// # Errors
    ///
    /// See [`DependencyGraphService::create_dependency`].
    pub async fn add_dependency(
        &self,
        ctx: &RequestContext,
        task: TaskId,
        depends_on: TaskId,
        dependency_type: Option<String>,
    ) -> Result<TaskDependency, DependencyGraphError> {
        self.graph
            .create_dependency(ctx, task, depends_on, dependency_type)
            .await
    }

    /// Removes a dependency edge; convenience passthrough to the composed
    /// [`DependencyGraphService`].
    ///
    /// # Errors
    ///
    /// See [`DependencyGraphService::delete_dependency`].
    pub async fn remove_dependency(
        &self,
        ctx: &RequestContext,
        id: DependencyId,
    ) -> Result<(), DependencyGraphError> {
        self.graph.delete_dependency(ctx, id).await
    }

    /// Stores attachment bytes, records the metadata (including a SHA-256
    /// digest), and publishes [`TaskEvent::TaskAttachmentAdded`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when validation fails or byte storage
    /// rejects the payload.
    pub async fn add_attachment(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        upload: AttachmentUpload,
    ) -> Result<TaskAttachment, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::TaskAttachments, Action::Create)
            .await?;
        let task = self.load_task(ctx, id).await?;

        let size_bytes = u64::try_from(upload.bytes.len()).unwrap_or(u64::MAX);
        self.validator
            .validate_attachment(&upload.file_name, size_bytes)?;

        let storage_path = self.files.store(&upload.file_name, &upload.bytes).await?;
        let checksum_sha256 = TaskAttachment::digest(&upload.bytes);
        let attachment = TaskAttachment::new(
            NewAttachmentData {
                task: id,
                file_name: upload.file_name,
                storage_path,
                content_type: upload.content_type,
                size_bytes,
                checksum_sha256,
                visibility: upload.visibility,
                description: upload.description,
                uploaded_by: ctx.employee(),
            },
            &*self.clock,
        );
        self.store.attachments.store(&attachment).await?;
        self.automation
            .publish(&TaskEvent::TaskAttachmentAdded {
                task,
                attachment: attachment.clone(),
            })
            .await;
        Ok(attachment)
    }

    /// Removes an attachment record; stored bytes are removed best-effort.
    /// The record removal is authoritative even when byte cleanup fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::AttachmentNotFound`] when the record
    /// is missing.
    pub async fn delete_attachment(
        &self,
        ctx: &RequestContext,
        id: AttachmentId,
    ) -> Result<(), TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::TaskAttachments, Action::Delete)
            .await?;

        let attachment = self
            .store
            .attachments
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::AttachmentNotFound(id))?;
        self.store.attachments.delete(id).await?;
        if let Err(err) = self.files.delete(attachment.storage_path()).await {
            tracing::warn!(
                path = %attachment.storage_path(),
                error = %err,
                "attachment bytes were not removed"
            );
        }
        Ok(())
    }

    /// Returns the attachments on a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task is
    /// missing.
    pub async fn list_attachments(
        &self,
        ctx: &RequestContext,
        id: TaskId,
    ) -> Result<Vec<TaskAttachment>, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::TaskAttachments, Action::Read)
            .await?;
        self.load_task(ctx, id).await?;
        Ok(self.store.attachments.find_by_task(id).await?)
    }

    /// Creates an organization-scoped tag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for a blank or overlong
    /// name.
    pub async fn create_tag(
        &self,
        ctx: &RequestContext,
        name: impl Into<String> + Send,
        colour: impl Into<String> + Send,
    ) -> Result<TaskTag, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::TaskTags, Action::Create)
            .await?;
        let tag_name = name.into();
        self.validator.validate_tag_name(&tag_name)?;

        let tag = TaskTag::new(ctx.organization(), tag_name, colour.into(), &*self.clock);
        self.store.tags.store(&tag).await?;
        Ok(tag)
    }

    /// Returns every tag in the caller's organization.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the lookup fails.
    pub async fn list_tags(&self, ctx: &RequestContext) -> Result<Vec<TaskTag>, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::TaskTags, Action::Read)
            .await?;
        Ok(self
            .store
            .tags
            .find_by_organization(ctx.organization())
            .await?)
    }

    /// Publishes [`TaskEvent::TaskDueSoon`] for every not-done task due
    /// within the window. Mutates nothing; an external scheduler is
    /// expected to invoke this periodically. Returns the match count.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the scan fails.
    pub async fn notify_due_soon(
        &self,
        ctx: &RequestContext,
        within: Duration,
    ) -> Result<usize, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Read)
            .await?;
        let now = self.clock.utc();
        let matches = self
            .store
            .tasks
            .find_due_between(ctx.organization(), now, now + within)
            .await?;
        for task in &matches {
            self.automation
                .publish(&TaskEvent::TaskDueSoon { task: task.clone() })
                .await;
        }
        Ok(matches.len())
    }

    /// Publishes [`TaskEvent::TaskOverdue`] for every not-done task whose
    /// due timestamp has passed. Returns the match count.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the scan fails.
    pub async fn notify_overdue(
        &self,
        ctx: &RequestContext,
    ) -> Result<usize, TaskLifecycleError> {
        self.authorizer
            .authorize(ctx, Resource::Tasks, Action::Read)
            .await?;
        let now = self.clock.utc();
        let matches = self
            .store
            .tasks
            .find_overdue(ctx.organization(), now)
            .await?;
        for task in &matches {
            self.automation
                .publish(&TaskEvent::TaskOverdue { task: task.clone() })
                .await;
        }
        Ok(matches.len())
    }

    /// Loads a task, treating records outside the caller's organization as
    /// absent.
    async fn load_task(
        &self,
        ctx: &RequestContext,
        id: TaskId,
    ) -> Result<Task, TaskLifecycleError> {
        self.store
            .tasks
            .find_by_id(id)
            .await?
            .filter(|task| task.organization() == ctx.organization())
            .ok_or(TaskLifecycleError::TaskNotFound(id))
    }

    /// Resolves requested assignees against the directory, dropping unknown
    /// ids silently.
    async fn resolve_assignees(
        &self,
        requested: &[EmployeeId],
    ) -> Result<BTreeSet<EmployeeId>, TaskLifecycleError> {
        let mut resolved = BTreeSet::new();
        for employee in requested {
            if self.directory.exists(*employee).await? {
                resolved.insert(*employee);
            } else {
                tracing::debug!(employee = %employee, "dropping unknown assignee");
            }
        }
        Ok(resolved)
    }

    /// Resolves requested tags against the tag store, dropping unknown ids
    /// and tags from other organizations silently.
    async fn resolve_tags(
        &self,
        ctx: &RequestContext,
        requested: &[TagId],
    ) -> Result<BTreeSet<TagId>, TaskLifecycleError> {
        let mut resolved = BTreeSet::new();
        for tag_id in requested {
            match self.store.tags.find_by_id(*tag_id).await? {
                Some(tag) if tag.organization() == ctx.organization() => {
                    resolved.insert(*tag_id);
                }
                _ => {
                    tracing::debug!(tag = %tag_id, "dropping unknown tag");
                }
            }
        }
        Ok(resolved)
    }

    /// Removes one task record with its comments, dependency edges, and
    /// attachments. Stored attachment bytes are removed best-effort.
    async fn remove_task_records(&self, task: &Task) -> Result<(), TaskLifecycleError> {
        self.store.comments.delete_by_task(task.id()).await?;
        self.store.dependencies.delete_touching(task.id()).await?;
        let attachments = self.store.attachments.delete_by_task(task.id()).await?;
        for attachment in attachments {
            if let Err(err) = self.files.delete(attachment.storage_path()).await {
                tracing::warn!(
                    path = %attachment.storage_path(),
                    error = %err,
                    "attachment bytes were not removed"
                );
            }
        }
        self.store.tasks.delete(task.id()).await?;
        Ok(())
    }
}

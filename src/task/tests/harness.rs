//! Shared wiring for service-level tests: a fully assembled engine over the
//! in-memory adapters with a recording automation hook.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::automation::adapters::memory::RecordingHook;
use crate::context::RequestContext;
use crate::task::adapters::memory::{
    AllowAllAuthorizer, DenyAllAuthorizer, InMemoryAttachmentRepository,
    InMemoryCommentRepository, InMemoryDependencyRepository, InMemoryDirectory,
    InMemoryFileStore, InMemoryTagRepository, InMemoryTaskRepository,
};
use crate::task::domain::{OrganizationId, ProjectId, Task, TaskId, TaskStatus};
use crate::task::ports::{
    Authorizer, CommentRepository, DependencyRepository, TaskRepository, TaskStore, TaskValidator,
};
use crate::task::services::{
    CommentThreadService, DependencyGraphService, NewTaskRequest, TaskEngineWiring,
    TaskLifecycleError, TaskLifecycleService,
};
use crate::task::validation::RuleBasedTaskValidator;

pub(super) struct EngineHarness {
    pub service: TaskLifecycleService<DefaultClock>,
    pub comments: CommentThreadService<DefaultClock>,
    pub graph: DependencyGraphService<DefaultClock>,
    pub hook: RecordingHook,
    pub directory: InMemoryDirectory,
    pub files: InMemoryFileStore,
    pub ctx: RequestContext,
    pub project: ProjectId,
}

impl EngineHarness {
    pub(super) fn new() -> Self {
        Self::build(Arc::new(AllowAllAuthorizer))
    }

    /// Builds a harness whose authorizer denies every call.
    pub(super) fn deny_all() -> Self {
        Self::build(Arc::new(DenyAllAuthorizer))
    }

    fn build(authorizer: Arc<dyn Authorizer>) -> Self {
        let tasks: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
        let comments_repo: Arc<dyn CommentRepository> = Arc::new(InMemoryCommentRepository::new());
        let dependencies: Arc<dyn DependencyRepository> =
            Arc::new(InMemoryDependencyRepository::new());
        let store = TaskStore {
            tasks: Arc::clone(&tasks),
            comments: Arc::clone(&comments_repo),
            dependencies: Arc::clone(&dependencies),
            tags: Arc::new(InMemoryTagRepository::new()),
            attachments: Arc::new(InMemoryAttachmentRepository::new()),
        };
        let directory = InMemoryDirectory::new();
        let files = InMemoryFileStore::new();
        let hook = RecordingHook::new();
        let validator: Arc<dyn TaskValidator> = Arc::new(RuleBasedTaskValidator::default());
        let clock = Arc::new(DefaultClock);

        let caller = directory.add_employee("Avery Chen");
        let project = directory.add_project();
        let ctx = RequestContext::new(caller, OrganizationId::new());

        let service = TaskLifecycleService::new(TaskEngineWiring {
            store: store.clone(),
            directory: Arc::new(directory.clone()),
            projects: Arc::new(directory.clone()),
            files: Arc::new(files.clone()),
            validator: Arc::clone(&validator),
            authorizer: Arc::clone(&authorizer),
            automation: Arc::new(hook.clone()),
            clock: Arc::clone(&clock),
        });
        let comments = CommentThreadService::new(
            Arc::clone(&tasks),
            Arc::clone(&comments_repo),
            Arc::clone(&validator),
            Arc::clone(&authorizer),
            Arc::new(hook.clone()),
            Arc::clone(&clock),
        );
        let graph = DependencyGraphService::new(
            Arc::clone(&tasks),
            Arc::clone(&dependencies),
            Arc::clone(&authorizer),
            Arc::new(hook.clone()),
            Arc::clone(&clock),
        );

        Self {
            service,
            comments,
            graph,
            hook,
            directory,
            files,
            ctx,
            project,
        }
    }

    /// Creates a task with the given title in the harness project.
    pub(super) async fn create_task(&self, title: &str) -> Result<Task, TaskLifecycleError> {
        self.service
            .create_task(&self.ctx, NewTaskRequest::new(self.project, title))
            .await
    }

    /// Creates a subtask of `parent` with the given title.
    pub(super) async fn create_subtask(
        &self,
        parent: TaskId,
        title: &str,
    ) -> Result<Task, TaskLifecycleError> {
        self.service
            .create_task(
                &self.ctx,
                NewTaskRequest::new(self.project, title).with_parent(parent),
            )
            .await
    }

    /// Drives a task from `Backlog` straight to `Done`.
    pub(super) async fn complete_task(&self, id: TaskId) -> Result<Task, TaskLifecycleError> {
        self.service
            .update_status(&self.ctx, id, TaskStatus::Done)
            .await
    }
}

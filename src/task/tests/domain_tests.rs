//! Domain-focused tests for the task aggregate and its satellite entities.

use std::collections::BTreeSet;

use mockable::DefaultClock;
use rstest::{fixture, rstest};

use crate::task::domain::{
    EmployeeId, NewTaskData, OrganizationId, ProjectId, Task, TaskAttachment, TaskComment,
    TaskDependency, TaskDomainError, TaskId, TaskPriority, TaskStatus, DEFAULT_DEPENDENCY_TYPE,
};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn new_task_data(title: &str) -> NewTaskData {
    NewTaskData {
        organization: OrganizationId::new(),
        project: ProjectId::new(),
        title: title.to_owned(),
        description: None,
        priority: TaskPriority::default(),
        parent: None,
        owner: EmployeeId::new(),
        assignees: BTreeSet::new(),
        tags: BTreeSet::new(),
        start_at: None,
        due_at: None,
        estimated_minutes: None,
    }
}

#[rstest]
fn new_task_starts_in_backlog_with_zero_progress(clock: DefaultClock) {
    let task = Task::new(new_task_data("Design API"), &clock);

    assert_eq!(task.status(), TaskStatus::Backlog);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.progress(), 0);
    assert_eq!(task.completed_at(), None);
    assert_eq!(task.created_at(), task.updated_at());
    assert!(task.assignees().is_empty());
}

#[rstest]
fn transition_into_done_stamps_completion_and_progress(clock: DefaultClock) {
    let mut task = Task::new(new_task_data("Ship it"), &clock);

    task.transition_to(TaskStatus::InProgress, &clock)
        .expect("backlog -> in_progress is legal");
    task.transition_to(TaskStatus::Done, &clock)
        .expect("in_progress -> done is legal");

    assert_eq!(task.status(), TaskStatus::Done);
    assert_eq!(task.progress(), 100);
    assert!(task.completed_at().is_some());
}

#[rstest]
fn reopening_clears_the_completion_timestamp(clock: DefaultClock) {
    let mut task = Task::new(new_task_data("Ship it"), &clock);
    task.transition_to(TaskStatus::Done, &clock)
        .expect("backlog -> done is legal");

    task.transition_to(TaskStatus::Reopened, &clock)
        .expect("done -> reopened is legal");

    assert_eq!(task.status(), TaskStatus::Reopened);
    assert_eq!(task.completed_at(), None);
}

#[rstest]
fn complete_by_rollup_closes_from_any_status(clock: DefaultClock) {
    let mut task = Task::new(new_task_data("Parent"), &clock);
    task.transition_to(TaskStatus::Blocked, &clock)
        .expect("backlog -> blocked is legal");

    assert!(task.complete_by_rollup(&clock));
    assert_eq!(task.status(), TaskStatus::Done);
    assert_eq!(task.progress(), 100);

    // Second roll-up completion is a no-op.
    assert!(!task.complete_by_rollup(&clock));
}

#[rstest]
fn set_progress_rejects_values_above_one_hundred(clock: DefaultClock) {
    let mut task = Task::new(new_task_data("Track"), &clock);

    let result = task.set_progress(101, &clock);

    assert_eq!(result, Err(TaskDomainError::ProgressOutOfRange(101)));
    assert_eq!(task.progress(), 0);
}

#[rstest]
fn replace_assignees_discards_the_prior_set(clock: DefaultClock) {
    let mut task = Task::new(new_task_data("Staff me"), &clock);
    let first = EmployeeId::new();
    let second = EmployeeId::new();
    task.replace_assignees(BTreeSet::from([first]), &clock);

    task.replace_assignees(BTreeSet::from([second]), &clock);

    assert!(!task.assignees().contains(&first));
    assert!(task.assignees().contains(&second));
}

#[rstest]
fn remove_assignee_reports_absent_members(clock: DefaultClock) {
    let mut task = Task::new(new_task_data("Staff me"), &clock);
    let member = EmployeeId::new();
    task.replace_assignees(BTreeSet::from([member]), &clock);

    assert!(task.remove_assignee(member, &clock));
    assert!(!task.remove_assignee(member, &clock));
}

#[rstest]
fn status_round_trips_through_storage_representation() {
    for status in [
        TaskStatus::Backlog,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
        TaskStatus::Blocked,
        TaskStatus::Reopened,
    ] {
        let parsed = TaskStatus::try_from(status.as_str()).expect("round trip");
        assert_eq!(parsed, status);
    }
    assert!(TaskStatus::try_from("archived").is_err());
}

#[rstest]
fn dependency_defaults_its_label(clock: DefaultClock) {
    let edge = TaskDependency::new(TaskId::new(), TaskId::new(), None, &clock);
    assert_eq!(edge.dependency_type(), DEFAULT_DEPENDENCY_TYPE);

    let labelled = TaskDependency::new(
        TaskId::new(),
        TaskId::new(),
        Some("FOLLOW_UP".to_owned()),
        &clock,
    );
    assert_eq!(labelled.dependency_type(), "FOLLOW_UP");
}

#[rstest]
fn reply_comments_reference_their_parent(clock: DefaultClock) {
    let task = TaskId::new();
    let author = EmployeeId::new();
    let top = TaskComment::new(task, author, "looks good".to_owned(), &clock);
    let reply = TaskComment::reply(task, top.id(), author, "thanks".to_owned(), &clock);

    assert_eq!(top.parent_comment(), None);
    assert_eq!(reply.parent_comment(), Some(top.id()));
    assert_eq!(reply.task(), task);
}

#[rstest]
fn attachment_digest_is_a_sha256_hex_string() {
    let digest = TaskAttachment::digest(b"hello world");

    assert_eq!(digest.len(), 64);
    assert_eq!(
        digest,
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
}

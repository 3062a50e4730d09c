//! Unit tests pinning the status transition table.

use rstest::rstest;

use crate::task::domain::TaskStatus;
use crate::task::error::ValidationError;
use crate::task::validation::rules::validate_status_transition;

#[rstest]
#[case(TaskStatus::Backlog, TaskStatus::Backlog, false)]
#[case(TaskStatus::Backlog, TaskStatus::InProgress, true)]
#[case(TaskStatus::Backlog, TaskStatus::Review, false)]
#[case(TaskStatus::Backlog, TaskStatus::Done, true)]
#[case(TaskStatus::Backlog, TaskStatus::Blocked, true)]
#[case(TaskStatus::Backlog, TaskStatus::Reopened, false)]
#[case(TaskStatus::InProgress, TaskStatus::Backlog, false)]
#[case(TaskStatus::InProgress, TaskStatus::InProgress, false)]
#[case(TaskStatus::InProgress, TaskStatus::Review, true)]
#[case(TaskStatus::InProgress, TaskStatus::Done, true)]
#[case(TaskStatus::InProgress, TaskStatus::Blocked, true)]
#[case(TaskStatus::InProgress, TaskStatus::Reopened, false)]
#[case(TaskStatus::Review, TaskStatus::Backlog, false)]
#[case(TaskStatus::Review, TaskStatus::InProgress, true)]
#[case(TaskStatus::Review, TaskStatus::Review, false)]
#[case(TaskStatus::Review, TaskStatus::Done, true)]
#[case(TaskStatus::Review, TaskStatus::Blocked, true)]
#[case(TaskStatus::Review, TaskStatus::Reopened, false)]
#[case(TaskStatus::Done, TaskStatus::Backlog, false)]
#[case(TaskStatus::Done, TaskStatus::InProgress, false)]
#[case(TaskStatus::Done, TaskStatus::Review, false)]
#[case(TaskStatus::Done, TaskStatus::Done, false)]
#[case(TaskStatus::Done, TaskStatus::Blocked, false)]
#[case(TaskStatus::Done, TaskStatus::Reopened, true)]
#[case(TaskStatus::Blocked, TaskStatus::Backlog, true)]
#[case(TaskStatus::Blocked, TaskStatus::InProgress, true)]
#[case(TaskStatus::Blocked, TaskStatus::Review, true)]
#[case(TaskStatus::Blocked, TaskStatus::Done, false)]
#[case(TaskStatus::Blocked, TaskStatus::Blocked, false)]
#[case(TaskStatus::Blocked, TaskStatus::Reopened, false)]
#[case(TaskStatus::Reopened, TaskStatus::Backlog, false)]
#[case(TaskStatus::Reopened, TaskStatus::InProgress, true)]
#[case(TaskStatus::Reopened, TaskStatus::Review, true)]
#[case(TaskStatus::Reopened, TaskStatus::Done, true)]
#[case(TaskStatus::Reopened, TaskStatus::Blocked, true)]
#[case(TaskStatus::Reopened, TaskStatus::Reopened, false)]
fn can_transition_to_returns_expected(
    #[case] from: TaskStatus,
    #[case] to: TaskStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
fn validation_rule_mirrors_the_domain_table() {
    assert!(validate_status_transition(TaskStatus::Review, TaskStatus::Done).is_ok());
    assert_eq!(
        validate_status_transition(TaskStatus::Blocked, TaskStatus::Done),
        Err(ValidationError::IllegalTransition {
            from: TaskStatus::Blocked,
            to: TaskStatus::Done
        })
    );
}

#[rstest]
fn done_is_only_reachable_again_through_reopened() {
    let reachable_from_done: Vec<TaskStatus> = [
        TaskStatus::Backlog,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
        TaskStatus::Blocked,
        TaskStatus::Reopened,
    ]
    .into_iter()
    .filter(|target| TaskStatus::Done.can_transition_to(*target))
    .collect();

    assert_eq!(reachable_from_done, vec![TaskStatus::Reopened]);
}

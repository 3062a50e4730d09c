//! Unit test suites for lifecycle automation.

mod notification_tests;
mod template_tests;

use std::collections::BTreeSet;

use mockable::DefaultClock;

use crate::task::domain::{
    EmployeeId, NewTaskData, OrganizationId, ProjectId, Task, TaskPriority,
};

/// Builds a plain task owned by the given employee with the given assignees.
fn task_with_people(owner: EmployeeId, assignees: &[EmployeeId]) -> Task {
    Task::new(
        NewTaskData {
            organization: OrganizationId::new(),
            project: ProjectId::new(),
            title: "Quarterly report".to_owned(),
            description: None,
            priority: TaskPriority::High,
            parent: None,
            owner,
            assignees: assignees.iter().copied().collect::<BTreeSet<_>>(),
            tags: BTreeSet::new(),
            start_at: None,
            due_at: None,
            estimated_minutes: None,
        },
        &DefaultClock,
    )
}

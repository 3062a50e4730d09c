//! Template rendering tests across the full event vocabulary.

use rstest::rstest;

use crate::automation::domain::TaskEventKind;
use crate::automation::services::templates::render_notification;
use serde_json::{Map, Value};

fn context() -> Map<String, Value> {
    let mut context = Map::new();
    context.insert("recipient".to_owned(), Value::String("Avery".to_owned()));
    context.insert(
        "task_title".to_owned(),
        Value::String("Quarterly report".to_owned()),
    );
    context.insert(
        "task_priority".to_owned(),
        Value::String("high".to_owned()),
    );
    context
}

#[rstest]
#[case(TaskEventKind::TaskCreated)]
#[case(TaskEventKind::TaskAssigned)]
#[case(TaskEventKind::TaskStatusChanged)]
#[case(TaskEventKind::TaskCompleted)]
#[case(TaskEventKind::SubtasksCompleted)]
#[case(TaskEventKind::TaskCommentAdded)]
#[case(TaskEventKind::TaskAttachmentAdded)]
#[case(TaskEventKind::TaskPriorityChanged)]
#[case(TaskEventKind::TaskDeleted)]
#[case(TaskEventKind::DependencyResolved)]
#[case(TaskEventKind::TaskDueSoon)]
#[case(TaskEventKind::TaskOverdue)]
fn every_event_kind_renders_a_subject_and_body(#[case] kind: TaskEventKind) {
    let rendered = render_notification(kind, &context()).expect("rendering succeeds");

    assert!(!rendered.subject.trim().is_empty());
    assert!(rendered.subject.contains("Quarterly report"));
    assert!(rendered.body.starts_with("Hello Avery,"));
}

#[rstest]
fn missing_context_keys_render_as_empty_rather_than_failing() {
    // The status-change template references old/new status, which this
    // context does not provide.
    let rendered = render_notification(TaskEventKind::TaskStatusChanged, &context())
        .expect("rendering succeeds");

    assert!(rendered.body.contains("moved from"));
}

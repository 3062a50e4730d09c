//! Notification automation tests: recipient fan-out and failure isolation.

use std::sync::Arc;

use rstest::rstest;

use super::task_with_people;
use crate::automation::adapters::memory::InMemoryMailbox;
use crate::automation::domain::TaskEvent;
use crate::automation::ports::AutomationHook;
use crate::automation::ports::mailer::{MailerError, MockMailer};
use crate::automation::services::NotificationAutomation;
use crate::task::adapters::memory::InMemoryDirectory;
use crate::task::domain::TaskStatus;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn publish_notifies_assignees_and_owner() {
    let directory = InMemoryDirectory::new();
    let owner = directory.add_employee("Avery Chen");
    let assignee = directory.add_employee("Riley Okafor");
    let mailbox = InMemoryMailbox::new();
    let hook = NotificationAutomation::new(
        Arc::new(mailbox.clone()),
        Arc::new(directory),
    );
    let task = task_with_people(owner, &[assignee]);

    hook.publish(&TaskEvent::TaskCreated { task }).await;

    let messages = mailbox.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|message| {
        message.subject.contains("Quarterly report")
    }));
    let recipients: Vec<&str> = messages.iter().map(|message| message.to.as_str()).collect();
    assert!(recipients.contains(&"avery.chen@example.test"));
    assert!(recipients.contains(&"riley.okafor@example.test"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn publish_deduplicates_owner_who_is_also_assigned() {
    let directory = InMemoryDirectory::new();
    let owner = directory.add_employee("Avery Chen");
    let mailbox = InMemoryMailbox::new();
    let hook = NotificationAutomation::new(
        Arc::new(mailbox.clone()),
        Arc::new(directory),
    );
    let task = task_with_people(owner, &[owner]);

    hook.publish(&TaskEvent::TaskCreated { task }).await;

    assert_eq!(mailbox.messages().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn publish_skips_recipients_missing_from_the_directory() {
    let directory = InMemoryDirectory::new();
    let known = directory.add_employee("Avery Chen");
    let unknown = crate::task::domain::EmployeeId::new();
    let mailbox = InMemoryMailbox::new();
    let hook = NotificationAutomation::new(
        Arc::new(mailbox.clone()),
        Arc::new(directory),
    );
    let task = task_with_people(known, &[unknown]);

    hook.publish(&TaskEvent::TaskCreated { task }).await;

    assert_eq!(mailbox.messages().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delivery_failures_are_swallowed() {
    let directory = InMemoryDirectory::new();
    let owner = directory.add_employee("Avery Chen");
    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .times(1)
        .returning(|_| Err(MailerError::delivery(std::io::Error::other("smtp down"))));
    let hook = NotificationAutomation::new(Arc::new(mailer), Arc::new(directory));
    let task = task_with_people(owner, &[]);

    // publish is infallible; a dead mailer must not surface anywhere.
    hook.publish(&TaskEvent::TaskCompleted { task }).await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_change_bodies_name_both_statuses() {
    let directory = InMemoryDirectory::new();
    let owner = directory.add_employee("Avery Chen");
    let mailbox = InMemoryMailbox::new();
    let hook = NotificationAutomation::new(
        Arc::new(mailbox.clone()),
        Arc::new(directory),
    );
    let task = task_with_people(owner, &[]);

    hook.publish(&TaskEvent::TaskStatusChanged {
        task,
        from: TaskStatus::Backlog,
        to: TaskStatus::InProgress,
    })
    .await;

    let messages = mailbox.messages();
    let body = &messages.first().expect("one message").body;
    assert!(body.contains("backlog"));
    assert!(body.contains("in_progress"));
    assert!(body.contains("Hello Avery Chen"));
}

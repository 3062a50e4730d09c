//! Dependency graph service tests.

use rstest::{fixture, rstest};

use super::harness::EngineHarness;
use crate::automation::domain::TaskEventKind;
use crate::task::domain::{DependencyId, TaskId};
use crate::task::error::ValidationError;
use crate::task::services::DependencyGraphError;

#[fixture]
fn harness() -> EngineHarness {
    EngineHarness::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_dependency_links_two_tasks(harness: EngineHarness) {
    let blocked = harness.create_task("Blocked").await.expect("created");
    let blocking = harness.create_task("Blocking").await.expect("created");

    let edge = harness
        .graph
        .create_dependency(&harness.ctx, blocked.id(), blocking.id(), None)
        .await
        .expect("edge created");

    assert_eq!(edge.task(), blocked.id());
    assert_eq!(edge.depends_on(), blocking.id());

    let dependencies = harness
        .graph
        .dependencies_of(&harness.ctx, blocked.id())
        .await
        .expect("listing");
    assert_eq!(dependencies.len(), 1);

    let dependents = harness
        .graph
        .dependents_of(&harness.ctx, blocking.id())
        .await
        .expect("listing");
    assert_eq!(dependents.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_dependency_rejects_the_second_identical_edge(harness: EngineHarness) {
    let blocked = harness.create_task("Blocked").await.expect("created");
    let blocking = harness.create_task("Blocking").await.expect("created");
    harness
        .graph
        .create_dependency(&harness.ctx, blocked.id(), blocking.id(), None)
        .await
        .expect("first edge");

    let result = harness
        .graph
        .create_dependency(&harness.ctx, blocked.id(), blocking.id(), None)
        .await;

    assert!(matches!(
        result,
        Err(DependencyGraphError::Validation(
            ValidationError::DependencyExists { .. }
        ))
    ));
    let dependencies = harness
        .graph
        .dependencies_of(&harness.ctx, blocked.id())
        .await
        .expect("listing");
    assert_eq!(dependencies.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_dependency_rejects_self_edges(harness: EngineHarness) {
    let task = harness.create_task("Loner").await.expect("created");

    let result = harness
        .graph
        .create_dependency(&harness.ctx, task.id(), task.id(), None)
        .await;

    assert!(matches!(
        result,
        Err(DependencyGraphError::Validation(
            ValidationError::DependencyOnSelf(id)
        )) if id == task.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_dependency_rejects_cycle_closing_edges(harness: EngineHarness) {
    let a = harness.create_task("A").await.expect("created");
    let b = harness.create_task("B").await.expect("created");
    let c = harness.create_task("C").await.expect("created");
    harness
        .graph
        .create_dependency(&harness.ctx, a.id(), b.id(), None)
        .await
        .expect("a -> b");
    harness
        .graph
        .create_dependency(&harness.ctx, b.id(), c.id(), None)
        .await
        .expect("b -> c");

    let result = harness
        .graph
        .create_dependency(&harness.ctx, c.id(), a.id(), None)
        .await;

    assert!(matches!(
        result,
        Err(DependencyGraphError::Validation(
            ValidationError::DependencyCycle { .. }
        ))
    ));
    let edges = harness
        .graph
        .dependencies_of(&harness.ctx, c.id())
        .await
        .expect("listing");
    assert!(edges.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_dependency_requires_both_endpoints(harness: EngineHarness) {
    let task = harness.create_task("Here").await.expect("created");
    let ghost = TaskId::new();

    let result = harness
        .graph
        .create_dependency(&harness.ctx, task.id(), ghost, None)
        .await;

    assert!(matches!(
        result,
        Err(DependencyGraphError::TaskNotFound(id)) if id == ghost
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn has_unresolved_dependencies_tracks_target_status(harness: EngineHarness) {
    let blocked = harness.create_task("Blocked").await.expect("created");
    let blocking = harness.create_task("Blocking").await.expect("created");
    harness
        .graph
        .create_dependency(&harness.ctx, blocked.id(), blocking.id(), None)
        .await
        .expect("edge");

    assert!(
        harness
            .graph
            .has_unresolved_dependencies(&harness.ctx, blocked.id())
            .await
            .expect("check")
    );

    harness.complete_task(blocking.id()).await.expect("completion");

    assert!(
        !harness
            .graph
            .has_unresolved_dependencies(&harness.ctx, blocked.id())
            .await
            .expect("check")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_dependency_publishes_dependency_resolved(harness: EngineHarness) {
    let blocked = harness.create_task("Blocked").await.expect("created");
    let blocking = harness.create_task("Blocking").await.expect("created");
    let edge = harness
        .graph
        .create_dependency(&harness.ctx, blocked.id(), blocking.id(), None)
        .await
        .expect("edge");
    harness.hook.clear();

    harness
        .graph
        .delete_dependency(&harness.ctx, edge.id())
        .await
        .expect("removal");

    assert_eq!(
        harness.hook.kinds(),
        vec![TaskEventKind::DependencyResolved]
    );
    let remaining = harness
        .graph
        .dependencies_of(&harness.ctx, blocked.id())
        .await
        .expect("listing");
    assert!(remaining.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_dependency_rejects_unknown_edges(harness: EngineHarness) {
    let ghost = DependencyId::new();

    let result = harness.graph.delete_dependency(&harness.ctx, ghost).await;

    assert!(matches!(
        result,
        Err(DependencyGraphError::DependencyNotFound(id)) if id == ghost
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lifecycle_passthrough_reaches_the_graph_service(harness: EngineHarness) {
    let blocked = harness.create_task("Blocked").await.expect("created");
    let blocking = harness.create_task("Blocking").await.expect("created");

    let edge = harness
        .service
        .add_dependency(
            &harness.ctx,
            blocked.id(),
            blocking.id(),
            Some("FOLLOW_UP".to_owned()),
        )
        .await
        .expect("edge via orchestrator");
    assert_eq!(edge.dependency_type(), "FOLLOW_UP");

    harness
        .service
        .remove_dependency(&harness.ctx, edge.id())
        .await
        .expect("removal via orchestrator");
    let remaining = harness
        .graph
        .dependencies_of(&harness.ctx, blocked.id())
        .await
        .expect("listing");
    assert!(remaining.is_empty());
}

//! Todo CRUD, filtering and today's schedule against `SQLite`.

use super::helpers::{TestStore, store};
use chrono::{NaiveDate, TimeDelta};
use rstest::rstest;
use secondbrain::todo::{
    domain::{Recognized, TaskPriority, TaskStatus, Todo, TodoDomainError, TodoId},
    services::{ListTodosRequest, TodoRequest, TodoServiceError},
};

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
}

fn titles(todos: &[Todo]) -> Vec<&str> {
    todos.iter().map(Todo::title).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_todo_round_trips_through_storage(store: TestStore) {
    let service = store.todos();
    let created = service
        .create(
            TodoRequest::new("  Write report ")
                .with_description("   ")
                .with_priority("critical")
                .with_target_date("2026-10-25")
                .with_start_date("2026-10-20")
                .with_end_date("2026-10-24"),
        )
        .await
        .expect("creation should succeed");

    let fetched = service
        .get(created.id())
        .await
        .expect("lookup should succeed")
        .expect("todo should exist");

    assert_eq!(fetched, created);
    assert_eq!(fetched.title(), "Write report");
    assert_eq!(fetched.description(), None);
    assert_eq!(fetched.status(), &Recognized::Known(TaskStatus::InQueue));
    assert_eq!(fetched.priority(), &Recognized::Known(TaskPriority::Critical));
    assert_eq!(fetched.schedule().target_date, Some(day("2026-10-25")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_todo_gets_a_distinct_token(store: TestStore) {
    let service = store.todos();
    let first = service
        .create(TodoRequest::new("Same title"))
        .await
        .expect("creation should succeed");
    let second = service
        .create(TodoRequest::new("Same title"))
        .await
        .expect("creation should succeed");

    assert_ne!(first.id(), second.id());
    assert_ne!(first.token(), second.token());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_fields_and_stamps_time(store: TestStore) {
    let service = store.todos();
    let created = service
        .create(
            TodoRequest::new("Draft")
                .with_description("first pass")
                .with_target_date("2026-10-30"),
        )
        .await
        .expect("creation should succeed");
    store.clock.advance(TimeDelta::hours(2));

    let updated = service
        .update(
            created.id(),
            TodoRequest::new("Final").with_status("in-progress"),
        )
        .await
        .expect("update should succeed");
    let fetched = service
        .get(created.id())
        .await
        .expect("lookup should succeed")
        .expect("todo should exist");

    assert!(updated);
    assert_eq!(fetched.title(), "Final");
    assert_eq!(fetched.description(), None);
    assert_eq!(fetched.schedule().target_date, None);
    assert!(fetched.status().is(TaskStatus::InProgress));
    assert_eq!(fetched.token(), created.token());
    assert_eq!(fetched.created_at(), created.created_at());
    assert_eq!(fetched.updated_at(), created.updated_at() + TimeDelta::hours(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_update_validates_before_writing(store: TestStore) {
    let service = store.todos();
    let created = service
        .create(TodoRequest::new("Triaged"))
        .await
        .expect("creation should succeed");

    let rejected = service.update_status(created.id(), "pending").await;
    let accepted = service
        .update_status(created.id(), "Ready")
        .await
        .expect("status update should succeed");
    let fetched = service
        .get(created.id())
        .await
        .expect("lookup should succeed")
        .expect("todo should exist");

    assert!(matches!(
        rejected,
        Err(TodoServiceError::Domain(TodoDomainError::UnknownStatus(_)))
    ));
    assert!(accepted);
    assert!(fetched.status().is(TaskStatus::Ready));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_keys_report_false(store: TestStore) {
    let service = store.todos();
    let missing = TodoId::new(404);

    assert!(
        service
            .get(missing)
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    assert!(
        !service
            .update(missing, TodoRequest::new("Nothing"))
            .await
            .expect("update should succeed")
    );
    assert!(
        !service
            .update_status(missing, "done")
            .await
            .expect("status update should succeed")
    );
    assert!(!service.delete(missing).await.expect("delete should succeed"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_the_row(store: TestStore) {
    let service = store.todos();
    let created = service
        .create(TodoRequest::new("Ephemeral"))
        .await
        .expect("creation should succeed");

    assert!(service.delete(created.id()).await.expect("delete should succeed"));
    assert!(
        service
            .get(created.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_hides_done_unless_asked(store: TestStore) {
    let service = store.todos();
    service
        .create(TodoRequest::new("Open"))
        .await
        .expect("creation should succeed");
    service
        .create(TodoRequest::new("Closed").with_status("done"))
        .await
        .expect("creation should succeed");

    let default_view = service
        .list(ListTodosRequest::new())
        .await
        .expect("listing should succeed");
    let everything = service
        .list(ListTodosRequest::new().including_done(true))
        .await
        .expect("listing should succeed");
    let only_done = service
        .list(ListTodosRequest::new().with_status("done"))
        .await
        .expect("listing should succeed");

    assert_eq!(titles(&default_view), vec!["Open"]);
    assert_eq!(everything.len(), 2);
    assert_eq!(titles(&only_done), vec!["Closed"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_creation_date(store: TestStore) {
    let service = store.todos();
    for title in ["Monday", "Tuesday", "Wednesday"] {
        service
            .create(TodoRequest::new(title))
            .await
            .expect("creation should succeed");
        store.clock.advance(TimeDelta::days(1));
    }

    let window = service
        .list(
            ListTodosRequest::new()
                .with_from_date("2026-10-20")
                .with_to_date("2026-10-21")
                .sorted_by("created_at", "ASC"),
        )
        .await
        .expect("listing should succeed");
    let malformed = service
        .list(ListTodosRequest::new().with_from_date("20/10/2026"))
        .await;

    assert_eq!(titles(&window), vec!["Tuesday", "Wednesday"]);
    assert!(matches!(
        malformed,
        Err(TodoServiceError::Domain(TodoDomainError::InvalidDate { .. }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn todays_tasks_put_overdue_then_urgent_first(store: TestStore) {
    let service = store.todos();
    let requests = [
        TodoRequest::new("Window low")
            .with_priority("Low")
            .with_start_date("2026-10-18")
            .with_end_date("2026-10-20"),
        TodoRequest::new("Overdue")
            .with_priority("Low")
            .with_start_date("2026-10-10")
            .with_end_date("2026-10-15"),
        TodoRequest::new("Finished late")
            .with_status("done")
            .with_start_date("2026-10-10")
            .with_end_date("2026-10-15"),
        TodoRequest::new("Unscheduled").with_priority("Critical"),
        TodoRequest::new("Starts tomorrow")
            .with_start_date("2026-10-20")
            .with_end_date("2026-10-22"),
        TodoRequest::new("Window critical")
            .with_priority("Critical")
            .with_start_date("2026-10-19")
            .with_end_date("2026-10-19"),
    ];
    for request in requests {
        service
            .create(request)
            .await
            .expect("creation should succeed");
    }

    let today = service
        .todays_tasks()
        .await
        .expect("schedule should load");
    let summary: Vec<(&str, bool)> = today
        .iter()
        .map(|entry| (entry.todo.title(), entry.overdue))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Overdue", true),
            ("Window critical", false),
            ("Window low", false),
        ]
    );
}

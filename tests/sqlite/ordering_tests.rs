//! List ordering composed in SQL.

use super::helpers::{SqliteTodoService, TestStore, store};
use rstest::rstest;
use secondbrain::todo::{
    domain::Todo,
    services::{ListTodosRequest, TodoRequest},
};

async fn create_all(service: &SqliteTodoService, requests: Vec<TodoRequest>) -> Vec<i64> {
    let mut ids = Vec::with_capacity(requests.len());
    for request in requests {
        let created = service
            .create(request)
            .await
            .expect("creation should succeed");
        ids.push(created.id().value());
    }
    ids
}

async fn sorted_titles(service: &SqliteTodoService, key: &str, order: &str) -> Vec<String> {
    service
        .list(ListTodosRequest::new().including_done(true).sorted_by(key, order))
        .await
        .expect("listing should succeed")
        .iter()
        .map(|todo: &Todo| todo.title().to_owned())
        .collect()
}

async fn sorted_ids(service: &SqliteTodoService, key: &str, order: &str) -> Vec<i64> {
    service
        .list(ListTodosRequest::new().sorted_by(key, order))
        .await
        .expect("listing should succeed")
        .iter()
        .map(|todo| todo.id().value())
        .collect()
}

#[rstest]
#[case("ASC", vec!["queued", "ready", "working", "paused", "finished"])]
#[case("DESC", vec!["finished", "paused", "working", "ready", "queued"])]
#[tokio::test(flavor = "multi_thread")]
async fn status_sorts_by_workflow_rank(
    store: TestStore,
    #[case] order: &str,
    #[case] expected: Vec<&str>,
) {
    let service = store.todos();
    create_all(
        &service,
        vec![
            TodoRequest::new("paused").with_status("hold"),
            TodoRequest::new("finished").with_status("done"),
            TodoRequest::new("queued").with_status("in-queue"),
            TodoRequest::new("working").with_status("in-progress"),
            TodoRequest::new("ready").with_status("ready"),
        ],
    )
    .await;

    assert_eq!(sorted_titles(&service, "status", order).await, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn priority_sorts_by_rank_not_alphabet(store: TestStore) {
    let service = store.todos();
    create_all(
        &service,
        vec![
            TodoRequest::new("medium").with_priority("Medium"),
            TodoRequest::new("critical").with_priority("Critical"),
            TodoRequest::new("low").with_priority("Low"),
            TodoRequest::new("high").with_priority("High"),
        ],
    )
    .await;

    assert_eq!(
        sorted_titles(&service, "priority", "DESC").await,
        vec!["critical", "high", "medium", "low"]
    );
}

#[rstest]
#[case("ASC", vec!["soon", "later", "undated"])]
#[case("DESC", vec!["later", "soon", "undated"])]
#[tokio::test(flavor = "multi_thread")]
async fn remaining_days_keeps_undated_last(
    store: TestStore,
    #[case] order: &str,
    #[case] expected: Vec<&str>,
) {
    let service = store.todos();
    create_all(
        &service,
        vec![
            TodoRequest::new("undated"),
            TodoRequest::new("later").with_target_date("2026-12-01"),
            TodoRequest::new("soon").with_target_date("2026-10-21"),
        ],
    )
    .await;

    assert_eq!(sorted_titles(&service, "remaining_days", order).await, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ties_break_by_key_in_requested_direction(store: TestStore) {
    let service = store.todos();
    let ids = create_all(
        &service,
        vec![
            TodoRequest::new("same"),
            TodoRequest::new("same"),
            TodoRequest::new("same"),
        ],
    )
    .await;
    let ascending = sorted_ids(&service, "title", "ASC").await;
    let descending = sorted_ids(&service, "title", "DESC").await;
    let mut reversed = ids.clone();
    reversed.reverse();

    assert_eq!(ascending, ids);
    assert_eq!(descending, reversed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_sort_falls_back_to_newest_first(store: TestStore) {
    let service = store.todos();
    create_all(
        &service,
        vec![TodoRequest::new("older"), TodoRequest::new("newer")],
    )
    .await;

    assert_eq!(
        sorted_titles(&service, "title; DROP TABLE todos", "sideways").await,
        vec!["newer", "older"]
    );
}

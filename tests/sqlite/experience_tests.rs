//! Experience journal CRUD and listing against `SQLite`.

use super::helpers::{TestStore, store};
use chrono::TimeDelta;
use rstest::rstest;
use secondbrain::experience::{
    domain::{Experience, ExperienceDomainError, ExperienceId},
    services::{ExperienceRequest, ExperienceServiceError, ListExperiencesRequest},
};

fn titles(entries: &[Experience]) -> Vec<&str> {
    entries.iter().map(Experience::title).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn experience_round_trips_with_optional_fields(store: TestStore) {
    let service = store.experiences();
    let created = service
        .create(
            ExperienceRequest::new(" Rolled back a release ")
                .with_content("Migrations ran out of order.")
                .with_tags(" deploy, ,database ")
                .with_category("  ")
                .with_context("Friday evening"),
        )
        .await
        .expect("creation should succeed");

    let fetched = service
        .get(created.id())
        .await
        .expect("lookup should succeed")
        .expect("experience should exist");

    assert_eq!(fetched, created);
    assert_eq!(fetched.title(), "Rolled back a release");
    assert_eq!(fetched.tag_tokens(), vec!["deploy", "database"]);
    assert_eq!(fetched.category(), None);
    assert_eq!(fetched.context(), Some("Friday evening"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_is_rejected(store: TestStore) {
    let result = store.experiences().create(ExperienceRequest::new("   ")).await;

    assert!(matches!(
        result,
        Err(ExperienceServiceError::Domain(ExperienceDomainError::EmptyTitle))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_report_whether_a_row_changed(store: TestStore) {
    let service = store.experiences();
    let created = service
        .create(ExperienceRequest::new("Draft").with_tags("one"))
        .await
        .expect("creation should succeed");
    store.clock.advance(TimeDelta::minutes(5));

    let updated = service
        .update(
            created.id(),
            ExperienceRequest::new("Revised").with_category("Learning"),
        )
        .await
        .expect("update should succeed");
    let fetched = service
        .get(created.id())
        .await
        .expect("lookup should succeed")
        .expect("experience should exist");

    assert!(updated);
    assert_eq!(fetched.title(), "Revised");
    assert_eq!(fetched.tags(), None);
    assert_eq!(fetched.category(), Some("Learning"));
    assert_eq!(fetched.updated_at(), created.updated_at() + TimeDelta::minutes(5));

    assert!(service.delete(created.id()).await.expect("delete should succeed"));
    assert!(!service.delete(created.id()).await.expect("delete should succeed"));
    assert!(
        !service
            .update(ExperienceId::new(99), ExperienceRequest::new("Ghost"))
            .await
            .expect("update should succeed")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_orders_and_filters_by_creation_date(store: TestStore) {
    let service = store.experiences();
    for title in ["beta", "alpha", "gamma"] {
        service
            .create(ExperienceRequest::new(title))
            .await
            .expect("creation should succeed");
        store.clock.advance(TimeDelta::days(1));
    }

    let newest_first = service
        .list(ListExperiencesRequest::new())
        .await
        .expect("listing should succeed");
    let by_title = service
        .list(ListExperiencesRequest::new().sorted_by("title", "ASC"))
        .await
        .expect("listing should succeed");
    let windowed = service
        .list(ListExperiencesRequest::new().with_to_date("2026-10-20"))
        .await
        .expect("listing should succeed");

    assert_eq!(titles(&newest_first), vec!["gamma", "alpha", "beta"]);
    assert_eq!(titles(&by_title), vec!["alpha", "beta", "gamma"]);
    assert_eq!(titles(&windowed), vec!["alpha", "beta"]);
}

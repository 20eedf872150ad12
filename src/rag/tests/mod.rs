//! Unit tests for the retrieval module.


use crate::experience::domain::{Experience, ExperienceId, PersistedExperienceData, Tags};
use chrono::{TimeZone, Utc};

/// Builds a stored experience with fixed timestamps.
fn experience(
    id: i64,
    title: &str,
    tags: Option<&str>,
    category: Option<&str>,
    context: Option<&str>,
) -> Experience {
    let at = Utc
        .with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Experience::from_persisted(PersistedExperienceData {
        id: ExperienceId::new(id),
        title: title.to_owned(),
        content: Some(format!("content of {title}")),
        tags: tags.map(Tags::new),
        category: category.map(str::to_owned),
        context: context.map(str::to_owned),
        created_at: at,
        updated_at: at,
    })
}

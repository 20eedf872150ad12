//! Diesel row models for experience persistence.

use super::schema::experiences;
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Query result row for experience records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = experiences)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExperienceRow {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub tags: Option<String>,
    pub category: Option<String>,
    pub context: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert model for experience records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = experiences)]
pub struct NewExperienceRow {
    pub title: String,
    pub content: Option<String>,
    pub tags: Option<String>,
    pub category: Option<String>,
    pub context: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full-update changeset; absent optional fields clear the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = experiences)]
#[diesel(treat_none_as_null = true)]
pub struct ExperienceChangeset {
    pub title: String,
    pub content: Option<String>,
    pub tags: Option<String>,
    pub category: Option<String>,
    pub context: Option<String>,
    pub updated_at: NaiveDateTime,
}

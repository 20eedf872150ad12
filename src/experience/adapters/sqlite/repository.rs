//! `SQLite` repository implementation for experience storage.

use super::{
    models::{ExperienceChangeset, ExperienceRow, NewExperienceRow},
    schema::experiences,
};
use crate::experience::{
    domain::{
        Experience, ExperienceFields, ExperienceId, ExperienceQuery, ExperienceSortKey,
        NewExperience, PersistedExperienceData, Tags,
    },
    ports::{ExperienceRepository, ExperienceRepositoryError, ExperienceRepositoryResult},
};
use crate::listing::SortOrder;
use crate::storage::{SqlitePool, get_conn_with, run_blocking_with};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::date;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

type BoxedExperienceQuery = experiences::BoxedQuery<'static, Sqlite>;

/// `SQLite`-backed experience repository.
#[derive(Debug, Clone)]
pub struct SqliteExperienceRepository {
    pool: SqlitePool,
}

impl SqliteExperienceRepository {
    /// Creates a repository over an opened and migrated pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ExperienceRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> ExperienceRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection =
                    get_conn_with(&pool, ExperienceRepositoryError::persistence)?;
                f(&mut connection)
            },
            ExperienceRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl ExperienceRepository for SqliteExperienceRepository {
    async fn store(&self, experience: &NewExperience) -> ExperienceRepositoryResult<ExperienceId> {
        let new_row = to_new_row(experience);
        self.run_blocking(move |connection| {
            let id = diesel::insert_into(experiences::table)
                .values(&new_row)
                .returning(experiences::id)
                .get_result::<i64>(connection)
                .map_err(ExperienceRepositoryError::persistence)?;
            Ok(ExperienceId::new(id))
        })
        .await
    }

    async fn list(&self, query: &ExperienceQuery) -> ExperienceRepositoryResult<Vec<Experience>> {
        let statement = list_query(query);
        tracing::debug!(
            sql = %diesel::debug_query::<Sqlite, _>(&statement),
            "composed experience list query"
        );

        self.run_blocking(move |connection| {
            statement
                .select(ExperienceRow::as_select())
                .load::<ExperienceRow>(connection)
                .map_err(ExperienceRepositoryError::persistence)
                .map(|rows| rows.into_iter().map(row_to_experience).collect())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: ExperienceId,
    ) -> ExperienceRepositoryResult<Option<Experience>> {
        self.run_blocking(move |connection| {
            let row = experiences::table
                .filter(experiences::id.eq(id.value()))
                .select(ExperienceRow::as_select())
                .first::<ExperienceRow>(connection)
                .optional()
                .map_err(ExperienceRepositoryError::persistence)?;
            Ok(row.map(row_to_experience))
        })
        .await
    }

    async fn update(
        &self,
        id: ExperienceId,
        fields: &ExperienceFields,
        updated_at: DateTime<Utc>,
    ) -> ExperienceRepositoryResult<bool> {
        let changeset = ExperienceChangeset {
            title: fields.title().to_owned(),
            content: fields.content().map(str::to_owned),
            tags: fields.tags().map(|tags| tags.as_str().to_owned()),
            category: fields.category().map(str::to_owned),
            context: fields.context().map(str::to_owned),
            updated_at: updated_at.naive_utc(),
        };
        self.run_blocking(move |connection| {
            let affected =
                diesel::update(experiences::table.filter(experiences::id.eq(id.value())))
                    .set(&changeset)
                    .execute(connection)
                    .map_err(ExperienceRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn delete(&self, id: ExperienceId) -> ExperienceRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(experiences::table.filter(experiences::id.eq(id.value())))
                    .execute(connection)
                    .map_err(ExperienceRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }
}

fn list_query(query: &ExperienceQuery) -> BoxedExperienceQuery {
    let mut statement = experiences::table.into_boxed();
    if let Some(from) = query.created.from {
        statement = statement.filter(date(experiences::created_at).ge(from));
    }
    if let Some(to) = query.created.to {
        statement = statement.filter(date(experiences::created_at).le(to));
    }

    match (query.sort.key, query.sort.order) {
        (ExperienceSortKey::CreatedAt, SortOrder::Asc) => {
            statement.order_by((experiences::created_at.asc(), experiences::id.asc()))
        }
        (ExperienceSortKey::CreatedAt, SortOrder::Desc) => {
            statement.order_by((experiences::created_at.desc(), experiences::id.desc()))
        }
        (ExperienceSortKey::UpdatedAt, SortOrder::Asc) => {
            statement.order_by((experiences::updated_at.asc(), experiences::id.asc()))
        }
        (ExperienceSortKey::UpdatedAt, SortOrder::Desc) => {
            statement.order_by((experiences::updated_at.desc(), experiences::id.desc()))
        }
        (ExperienceSortKey::Title, SortOrder::Asc) => {
            statement.order_by((experiences::title.asc(), experiences::id.asc()))
        }
        (ExperienceSortKey::Title, SortOrder::Desc) => {
            statement.order_by((experiences::title.desc(), experiences::id.desc()))
        }
    }
}

fn to_new_row(experience: &NewExperience) -> NewExperienceRow {
    let fields = experience.fields();
    let created_at = experience.created_at().naive_utc();
    NewExperienceRow {
        title: fields.title().to_owned(),
        content: fields.content().map(str::to_owned),
        tags: fields.tags().map(|tags| tags.as_str().to_owned()),
        category: fields.category().map(str::to_owned),
        context: fields.context().map(str::to_owned),
        created_at,
        updated_at: created_at,
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn row_to_experience(row: ExperienceRow) -> Experience {
    Experience::from_persisted(PersistedExperienceData {
        id: ExperienceId::new(row.id),
        title: row.title,
        content: present(row.content),
        tags: present(row.tags).map(Tags::new),
        category: present(row.category),
        context: present(row.context),
        created_at: row.created_at.and_utc(),
        updated_at: row.updated_at.and_utc(),
    })
}

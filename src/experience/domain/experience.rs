//! Experience journal entry and its editable fields.

use super::{ExperienceDomainError, ExperienceId, Tags};
use crate::text::{BODY_MAX_CHARS, TITLE_MAX_CHARS, non_blank, truncate_chars};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Validated, user-editable fields of an experience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceFields {
    title: String,
    content: Option<String>,
    tags: Option<Tags>,
    category: Option<String>,
    context: Option<String>,
}

impl ExperienceFields {
    /// Creates a field set with the given title.
    ///
    /// The title is trimmed and truncated to [`TITLE_MAX_CHARS`] characters.
    ///
    /// # Errors
    ///
    /// Returns [`ExperienceDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: &str) -> Result<Self, ExperienceDomainError> {
        let trimmed = non_blank(title).ok_or(ExperienceDomainError::EmptyTitle)?;
        Ok(Self {
            title: truncate_chars(trimmed, TITLE_MAX_CHARS),
            content: None,
            tags: None,
            category: None,
            context: None,
        })
    }

    /// Sets the content, truncated to [`BODY_MAX_CHARS`] characters.
    ///
    /// Blank content is stored as absent.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        let text = content.into();
        self.content = (!text.trim().is_empty()).then(|| truncate_chars(text, BODY_MAX_CHARS));
        self
    }

    /// Sets the raw comma-separated tags; blank input clears them.
    #[must_use]
    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags = non_blank(tags).map(Tags::new);
        self
    }

    /// Sets the category; blank input clears it.
    #[must_use]
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = non_blank(category);
        self
    }

    /// Sets the situational context; blank input clears it.
    #[must_use]
    pub fn with_context(mut self, context: &str) -> Self {
        self.context = non_blank(context);
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the raw tags, if any.
    #[must_use]
    pub const fn tags(&self) -> Option<&Tags> {
        self.tags.as_ref()
    }

    /// Returns the category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the context, if any.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

/// An experience that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExperience {
    fields: ExperienceFields,
    created_at: DateTime<Utc>,
}

impl NewExperience {
    /// Prepares an experience for storage at the clock's current time.
    #[must_use]
    pub fn new(fields: ExperienceFields, clock: &impl Clock) -> Self {
        Self {
            fields,
            created_at: clock.utc(),
        }
    }

    /// Returns the fields.
    #[must_use]
    pub const fn fields(&self) -> &ExperienceFields {
        &self.fields
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Parameter object for reconstructing a stored experience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedExperienceData {
    /// Stored key.
    pub id: ExperienceId,
    /// Stored title.
    pub title: String,
    /// Stored content.
    pub content: Option<String>,
    /// Stored raw tags.
    pub tags: Option<Tags>,
    /// Stored category.
    pub category: Option<String>,
    /// Stored context.
    pub context: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A stored experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Experience {
    id: ExperienceId,
    title: String,
    content: Option<String>,
    tags: Option<Tags>,
    category: Option<String>,
    context: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Experience {
    /// Reconstructs an experience from storage.
    #[must_use]
    pub fn from_persisted(data: PersistedExperienceData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            content: data.content,
            tags: data.tags,
            category: data.category,
            context: data.context,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Builds the stored form of a freshly inserted experience.
    #[must_use]
    pub fn from_new(id: ExperienceId, new_experience: &NewExperience) -> Self {
        let mut experience = Self {
            id,
            title: String::new(),
            content: None,
            tags: None,
            category: None,
            context: None,
            created_at: new_experience.created_at(),
            updated_at: new_experience.created_at(),
        };
        experience.apply(new_experience.fields(), new_experience.created_at());
        experience
    }

    /// Replaces the editable fields.
    pub fn apply(&mut self, fields: &ExperienceFields, updated_at: DateTime<Utc>) {
        self.title = fields.title().to_owned();
        self.content = fields.content().map(str::to_owned);
        self.tags = fields.tags().cloned();
        self.category = fields.category().map(str::to_owned);
        self.context = fields.context().map(str::to_owned);
        self.updated_at = updated_at;
    }

    /// Returns the key.
    #[must_use]
    pub const fn id(&self) -> ExperienceId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the raw tags, if any.
    #[must_use]
    pub const fn tags(&self) -> Option<&Tags> {
        self.tags.as_ref()
    }

    /// Returns the parsed tag tokens; empty when no tags are stored.
    #[must_use]
    pub fn tag_tokens(&self) -> Vec<&str> {
        self.tags.as_ref().map(Tags::tokens).unwrap_or_default()
    }

    /// Returns the category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the context, if any.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

//! Task model and the commands that create or change tasks.
//!
//! Tasks belong to exactly one [`UserId`]. The owner is fixed at creation;
//! [`Task::apply`] only touches title, description and completion.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::UserId;
use super::validation::parse_identifier;

/// Message for an identifier that is not a canonical UUID.
pub const TASK_ID_NOT_VALID: &str = "Task id not valid";
/// Message for a create or update body lacking title or description.
pub const TASK_CONTENT_MISSING: &str = "Title or description of task not found";

/// Validation errors for task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    InvalidId,
    MissingContent,
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => f.write_str(TASK_ID_NOT_VALID),
            Self::MissingContent => f.write_str(TASK_CONTENT_MISSING),
        }
    }
}

impl std::error::Error for TaskValidationError {}

/// Task identifier.
///
/// # Examples
/// ```
/// use taskboard::domain::TaskId;
///
/// assert!(TaskId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
/// assert!(TaskId::parse("invalid-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn parse(raw: &str) -> Result<Self, TaskValidationError> {
        parse_identifier(raw)
            .map(Self)
            .ok_or(TaskValidationError::InvalidId)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Title and description supplied together on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
}

impl TaskDraft {
    /// Build a draft, rejecting absent or empty fields.
    ///
    /// # Examples
    /// ```
    /// use taskboard::domain::{TaskDraft, TaskValidationError};
    ///
    /// let draft = TaskDraft::try_from_parts(Some("Buy milk".into()), Some("2L".into()));
    /// assert!(draft.is_ok());
    ///
    /// let missing = TaskDraft::try_from_parts(Some("Buy milk".into()), Some(String::new()));
    /// assert_eq!(missing, Err(TaskValidationError::MissingContent));
    /// ```
    pub fn try_from_parts(
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Self, TaskValidationError> {
        match (non_empty(title), non_empty(description)) {
            (Some(title), Some(description)) => Ok(Self { title, description }),
            _ => Err(TaskValidationError::MissingContent),
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Update payload: a full draft plus an optional completion flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    draft: TaskDraft,
    completed: Option<bool>,
}

impl TaskChanges {
    pub fn new(draft: TaskDraft, completed: Option<bool>) -> Self {
        Self { draft, completed }
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn completed(&self) -> Option<bool> {
        self.completed
    }
}

/// Persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    title: String,
    description: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Fields for rebuilding a [`Task`] from storage.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: TaskId,
    pub owner: UserId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a fresh, incomplete task owned by `owner`.
    pub fn create(owner: UserId, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        let TaskDraft { title, description } = draft;
        Self {
            id: TaskId::random(),
            owner,
            title,
            description,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// Apply `changes`, leaving `completed` alone when it was not supplied.
    pub fn apply(&mut self, changes: TaskChanges, now: DateTime<Utc>) {
        let TaskChanges { draft, completed } = changes;
        self.title = draft.title;
        self.description = draft.description;
        if let Some(completed) = completed {
            self.completed = completed;
        }
        self.updated_at = now;
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            owner: record.owner,
            title: record.title,
            description: record.description,
            completed: record.completed,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

//! Tasks with status, priority, and category.

use super::{Resource, ValidationErrors, non_blank};
use chrono::{DateTime, NaiveDate, Utc};
use composable_crud_lifecycle::Entity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Wire representation
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, ()> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum! {
    /// Progress of a task.
    TaskStatus {
        /// Not started (default)
        Pending => "pending",
        /// Being worked on
        InProgress => "in-progress",
        /// Done
        Completed => "completed",
    }
}

choice_enum! {
    /// Urgency of a task.
    Priority {
        /// Can wait
        Low => "low",
        /// Default
        Medium => "medium",
        /// Urgent
        High => "high",
    }
}

choice_enum! {
    /// Area of life a task belongs to.
    Category {
        /// Job-related
        Work => "Work",
        /// Personal errands
        Personal => "Personal",
        /// Things to buy
        Shopping => "Shopping",
        /// Health and fitness
        Health => "Health",
        /// Anything else
        Other => "Other",
    }
}

/// A to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned id
    pub id: u64,
    /// Short title, at most 100 characters
    pub title: String,
    /// Optional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Progress
    pub status: TaskStatus,
    /// Urgency
    pub priority: Priority,
    /// Deadline
    pub due_date: DateTime<Utc>,
    /// Area
    pub category: Category,
    /// Set once on creation
    pub created_at: DateTime<Utc>,
    /// Set on creation and on every update
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/tasks`.
///
/// Choice fields arrive as text so unknown values are reported per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Defaults to `pending`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Defaults to `medium`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Required; RFC 3339 timestamp or `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Body of `PUT /api/tasks/{id}`; absent fields are left unchanged.
pub type TaskPatch = TaskDraft;

impl TaskDraft {
    /// Draft with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: impl Into<String>, category: Category) -> Self {
        Self {
            title: Some(title.into()),
            due_date: Some(due_date.into()),
            category: Some(category.as_str().to_string()),
            ..Self::default()
        }
    }
}

fn title_rule(errors: &mut ValidationErrors, title: Option<&str>) {
    if let Some(title) = title {
        errors.check(
            title.chars().count() <= MAX_TITLE_CHARS,
            "Title cannot exceed 100 characters",
        );
    }
}

fn choice<T: FromStr>(
    errors: &mut ValidationErrors,
    value: Option<String>,
    what: &str,
) -> Option<T> {
    let value = value?;
    let parsed = value.trim().parse().ok();
    errors.check(parsed.is_some(), format!("{value} is not a valid {what}"));
    parsed
}

fn due_date(errors: &mut ValidationErrors, value: Option<String>) -> Option<DateTime<Utc>> {
    let value = value?;
    let value = value.trim();
    let parsed = DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
        });
    errors.check(parsed.is_some(), format!("{value} is not a valid due date"));
    parsed
}

impl Resource for Task {
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    const COLLECTION: &'static str = "tasks";
    const LABEL: &'static str = "Task";

    fn record_id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: TaskDraft, now: DateTime<Utc>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = non_blank(draft.title);
        errors.check(title.is_some(), "Title is required");
        title_rule(&mut errors, title.as_deref());

        let status = choice(&mut errors, draft.status, "status");
        let priority = choice(&mut errors, draft.priority, "priority");

        errors.check(draft.due_date.is_some(), "Due date is required");
        let due = due_date(&mut errors, draft.due_date);

        errors.check(draft.category.is_some(), "Category is required");
        let category = choice(&mut errors, draft.category, "category");

        match (title, due, category) {
            (Some(title), Some(due_date), Some(category)) => errors.finish(Self {
                id,
                title,
                description: non_blank(draft.description),
                status: status.unwrap_or(TaskStatus::Pending),
                priority: priority.unwrap_or(Priority::Medium),
                due_date,
                category,
                created_at: now,
                updated_at: now,
            }),
            _ => Err(errors),
        }
    }

    fn apply(&mut self, patch: TaskPatch, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = patch.title.map(|t| non_blank(Some(t)));
        errors.check(!matches!(title, Some(None)), "Title is required");
        title_rule(&mut errors, title.clone().flatten().as_deref());

        let status = choice(&mut errors, patch.status, "status");
        let priority = choice(&mut errors, patch.priority, "priority");
        let due = due_date(&mut errors, patch.due_date);
        let category = choice(&mut errors, patch.category, "category");

        errors.finish(())?;

        if let Some(Some(title)) = title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = non_blank(Some(description));
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(due) = due {
            self.due_date = due;
        }
        if let Some(category) = category {
            self.category = category;
        }
        self.updated_at = now;
        Ok(())
    }

    fn arrange(records: &mut [Self]) {
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    }
}

impl Entity for Task {
    type Id = u64;
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    const COLLECTION: &'static str = <Self as Resource>::COLLECTION;
    const LABEL: &'static str = <Self as Resource>::LABEL;

    fn id(&self) -> &u64 {
        &self.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use composable_crud_core::environment::Clock;
    use composable_crud_testing::{stepping_test_clock, test_clock};

    fn valid() -> TaskDraft {
        TaskDraft::new("File taxes", "2025-04-15T17:00:00Z", Category::Personal)
    }

    #[test]
    fn defaults_apply_and_timestamps_are_set() {
        let now = test_clock().now();
        let task = Task::from_draft(1, valid(), now).unwrap();

        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.created_at, now);
        assert_eq!(task.updated_at, now);
    }

    #[test]
    fn enum_values_are_validated_per_field() {
        let mut draft = valid();
        draft.status = Some("archived".to_string());
        draft.priority = Some("urgent".to_string());
        draft.category = Some("Hobby".to_string());

        let errors = Task::from_draft(1, draft, test_clock().now()).unwrap_err();

        assert_eq!(
            errors.messages(),
            [
                "archived is not a valid status".to_string(),
                "urgent is not a valid priority".to_string(),
                "Hobby is not a valid category".to_string(),
            ]
        );
    }

    #[test]
    fn required_fields_are_reported() {
        let errors = Task::from_draft(1, TaskDraft::default(), test_clock().now()).unwrap_err();
        assert_eq!(
            errors.messages(),
            [
                "Title is required".to_string(),
                "Due date is required".to_string(),
                "Category is required".to_string(),
            ]
        );
    }

    #[test]
    fn title_is_trimmed_and_bounded() {
        let mut draft = valid();
        draft.title = Some(format!("  {}  ", "x".repeat(100)));
        assert_eq!(Task::from_draft(1, draft, test_clock().now()).unwrap().title.len(), 100);

        let mut draft = valid();
        draft.title = Some("x".repeat(101));
        let errors = Task::from_draft(1, draft, test_clock().now()).unwrap_err();
        assert_eq!(errors.messages(), ["Title cannot exceed 100 characters".to_string()]);
    }

    #[test]
    fn plain_dates_are_accepted() {
        let mut draft = valid();
        draft.due_date = Some("2025-04-15".to_string());
        let task = Task::from_draft(1, draft, test_clock().now()).unwrap();
        assert_eq!(task.due_date.to_rfc3339(), "2025-04-15T00:00:00+00:00");
    }

    #[test]
    fn apply_moves_updated_at_only() {
        let clock = stepping_test_clock();
        let mut task = Task::from_draft(1, valid(), clock.now()).unwrap();
        let created = task.created_at;

        task.apply(
            TaskPatch {
                status: Some("completed".to_string()),
                ..TaskPatch::default()
            },
            clock.now(),
        )
        .unwrap();

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.created_at, created);
        assert!(task.updated_at > created);
    }

    #[test]
    fn arrange_lists_newest_first() {
        let clock = stepping_test_clock();
        let mut tasks: Vec<Task> = (1..=3)
            .map(|id| Task::from_draft(id, valid(), clock.now()).unwrap())
            .collect();

        Task::arrange(&mut tasks);

        let ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("in-progress")
        );
        assert_eq!(Category::from_str("Work"), Ok(Category::Work));
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,

    pub title: String,

    #[serde(default)]
    pub is_completed: bool,

    #[serde(default)]
    pub is_editing: bool,
}

/// Flag overrides for [`Task::new`]; both default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskOptions {
    pub is_completed: bool,
    pub is_editing: bool,
}

impl Task {
    /// Builds a task with a fresh v4 id. The title is taken as given; callers
    /// run it through [`normalize_title`] first.
    pub fn new(title: impl Into<String>, options: TaskOptions) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            is_completed: options.is_completed,
            is_editing: options.is_editing,
        }
    }

    pub fn pending(title: impl Into<String>) -> Self {
        Self::new(title, TaskOptions::default())
    }

    pub fn with_completed_toggled(&self) -> Self {
        Self {
            is_completed: !self.is_completed,
            ..self.clone()
        }
    }

    /// Leaving edit mode commits `draft` when it trims to something non-empty;
    /// entering edit mode never touches the title.
    pub fn with_editing_toggled(&self, draft: Option<&str>) -> Self {
        let title = if self.is_editing {
            draft
                .and_then(normalize_title)
                .unwrap_or_else(|| self.title.clone())
        } else {
            self.title.clone()
        };

        Self {
            title,
            is_editing: !self.is_editing,
            ..self.clone()
        }
    }
}

/// Trims raw input. `None` means there is nothing to store.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Rebuilds `tasks` with the task matching `id` replaced by `update(task)`.
/// Returns `None` when no task has that id.
pub(crate) fn replace_by_id<F>(tasks: &[Task], id: Uuid, update: F) -> Option<Vec<Task>>
where
    F: Fn(&Task) -> Task,
{
    if !tasks.iter().any(|task| task.id == id) {
        return None;
    }

    Some(
        tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    update(task)
                } else {
                    task.clone()
                }
            })
            .collect(),
    )
}

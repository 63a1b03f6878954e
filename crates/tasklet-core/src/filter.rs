use std::fmt;

use serde::{
  Deserialize,
  Serialize
};
use tracing::debug;

use crate::task::Task;

/// Which subset of the task list is shown.
///
/// Persisted as a bare lowercase string. Strings other than the three known
/// modes survive a load as `Unrecognized` and select nothing, so a stale
/// snapshot still opens instead of being discarded.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Filter {
  #[default]
  All,
  Done,
  Todo,
  Unrecognized(String)
}

impl Filter {
  /// Selectable modes in tab order.
  pub const ALL_MODES: [Filter; 3] =
    [Filter::All, Filter::Done, Filter::Todo];

  pub fn as_str(&self) -> &str {
    match self {
      | Filter::All => "all",
      | Filter::Done => "done",
      | Filter::Todo => "todo",
      | Filter::Unrecognized(raw) => raw
    }
  }

  pub fn label(&self) -> &str {
    match self {
      | Filter::All => "All",
      | Filter::Done => "Done",
      | Filter::Todo => "Todo",
      | Filter::Unrecognized(raw) => raw
    }
  }

  pub fn matches(
    &self,
    task: &Task
  ) -> bool {
    match self {
      | Filter::All => true,
      | Filter::Done => task.is_completed,
      | Filter::Todo => {
        !task.is_completed
      }
      | Filter::Unrecognized(_) => false
    }
  }
}

impl From<String> for Filter {
  fn from(raw: String) -> Self {
    match raw.as_str() {
      | "all" => Filter::All,
      | "done" => Filter::Done,
      | "todo" => Filter::Todo,
      | _ => Filter::Unrecognized(raw)
    }
  }
}

impl From<Filter> for String {
  fn from(filter: Filter) -> Self {
    filter.as_str().to_string()
  }
}

impl fmt::Display for Filter {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Tasks selected by `filter`, order preserved.
pub fn filtered_tasks(
  tasks: &[Task],
  filter: &Filter
) -> Vec<Task> {
  if let Filter::Unrecognized(raw) =
    filter
  {
    debug!(
      filter = %raw,
      "unrecognized filter selects no tasks"
    );
  }

  tasks
    .iter()
    .filter(|task| filter.matches(task))
    .cloned()
    .collect()
}

pub fn filtered_count(
  tasks: &[Task],
  filter: &Filter
) -> usize {
  tasks
    .iter()
    .filter(|task| filter.matches(task))
    .count()
}

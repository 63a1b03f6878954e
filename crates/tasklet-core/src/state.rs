use anyhow::Context;
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};
use uuid::Uuid;

use crate::filter::{
  Filter,
  filtered_count
};
use crate::pagination::{
  self,
  Pagination
};
use crate::storage::SnapshotStorage;
use crate::task::{
  self,
  Task
};
use crate::view::{
  ListOrder,
  TaskView,
  derive_view
};

/// Everything a session knows. `tasks` is newest-first.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct State {
  pub name:       String,
  pub tasks:      Vec<Task>,
  pub filter:     Filter,
  pub pagination: Pagination
}

/// State minus its storage key, as supplied at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialState {
  pub tasks:      Vec<Task>,
  pub filter:     Filter,
  pub pagination: Pagination
}

impl InitialState {
  pub fn empty(per_page: usize) -> Self {
    Self {
      tasks:      vec![],
      filter:     Filter::All,
      pagination: Pagination::first_page(
        per_page
      )
    }
  }

  fn named(self, name: &str) -> State {
    State {
      name:       name.to_string(),
      tasks:      self.tasks,
      filter:     self.filter,
      pagination: self.pagination
    }
  }
}

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq,
)]
pub struct StoreOptions {
  pub is_persistent: bool
}

/// One field replacement. Each applied change is its own snapshot write.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
  Tasks(Vec<Task>),
  Filter(Filter),
  Pagination(Pagination)
}

impl StateChange {
  fn field(&self) -> &'static str {
    match self {
      | StateChange::Tasks(_) => "tasks",
      | StateChange::Filter(_) => {
        "filter"
      }
      | StateChange::Pagination(_) => {
        "pagination"
      }
    }
  }
}

/// A state paired with its options and the medium it persists to.
///
/// The only way to write the state is through [`Store::change`] (or the
/// operations built on it), so every write reaches the medium when the
/// store is persistent.
#[derive(Debug)]
pub struct Store<S> {
  state:   State,
  options: StoreOptions,
  storage: S
}

impl<S: SnapshotStorage> Store<S> {
  /// Opens the state called `name`.
  ///
  /// A persistent store resumes from the snapshot under `name` when one
  /// exists and parses; otherwise it starts from `initial`. A restored
  /// snapshot is always renamed to `name` so later writes land on the key
  /// it was read from.
  #[tracing::instrument(skip(
    initial, storage
  ))]
  pub fn create(
    name: &str,
    initial: InitialState,
    options: StoreOptions,
    storage: S
  ) -> Self {
    let restored = if options
      .is_persistent
    {
      load_snapshot(&storage, name)
    } else {
      None
    };

    let state = match restored {
      | Some(state) => {
        info!(
          name = %name,
          tasks = state.tasks.len(),
          "restored state from snapshot"
        );
        state
      }
      | None => {
        info!(
          name = %name,
          persistent =
            options.is_persistent,
          "starting from initial state"
        );
        initial.named(name)
      }
    };

    Self {
      state,
      options,
      storage
    }
  }

  pub fn state(&self) -> &State {
    &self.state
  }

  pub fn options(&self) -> StoreOptions {
    self.options
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  pub fn into_storage(self) -> S {
    self.storage
  }

  /// Replaces one field and, when persistent, writes the whole state.
  #[tracing::instrument(
    skip(self, change),
    fields(name = %self.state.name, field = change.field())
  )]
  pub fn change(
    &mut self,
    change: StateChange
  ) -> anyhow::Result<()> {
    match change {
      | StateChange::Tasks(tasks) => {
        self.state.tasks = tasks
      }
      | StateChange::Filter(filter) => {
        self.state.filter = filter
      }
      | StateChange::Pagination(
        pagination
      ) => {
        self.state.pagination =
          pagination
      }
    }

    if self.options.is_persistent {
      self.persist()?;
    }
    Ok(())
  }

  fn persist(
    &mut self
  ) -> anyhow::Result<()> {
    let json =
      serde_json::to_string(&self.state)
        .context(
          "failed to serialize state \
           snapshot"
        )?;
    self
      .storage
      .write(&self.state.name, &json)
      .with_context(|| {
        format!(
          "failed to persist state {}",
          self.state.name
        )
      })?;
    debug!(
      name = %self.state.name,
      bytes = json.len(),
      "persisted state snapshot"
    );
    Ok(())
  }

  /// Switches the filter and rewinds to page 1. `false` when `next` is
  /// already active; nothing is written in that case.
  #[tracing::instrument(skip(self))]
  pub fn set_next_filter(
    &mut self,
    next: Filter
  ) -> anyhow::Result<bool> {
    if self.state.filter == next {
      return Ok(false);
    }

    let rewound = Pagination::first_page(
      self.state.pagination.per_page
    );
    // Both fields land in memory even when the first write fails.
    let filtered =
      self.change(StateChange::Filter(next));
    let paged = self.change(
      StateChange::Pagination(rewound)
    );
    filtered.and(paged)?;
    Ok(true)
  }

  /// Moves the page pointer to `page`, keeping `per_page`.
  #[tracing::instrument(skip(self))]
  pub fn select_page(
    &mut self,
    page: usize
  ) -> anyhow::Result<()> {
    let next = self
      .state
      .pagination
      .with_page(page.max(1));
    self.change(
      StateChange::Pagination(next)
    )
  }

  /// Pulls the page pointer back onto the last page of the filtered list
  /// when a mutation has shrunk it. Returns whether the pointer moved.
  #[tracing::instrument(skip(self))]
  pub fn recalculate_pagination(
    &mut self
  ) -> anyhow::Result<bool> {
    let count = filtered_count(
      &self.state.tasks,
      &self.state.filter
    );
    let Some(clamped) = pagination::clamp(
      &self.state.pagination,
      count
    ) else {
      return Ok(false);
    };

    debug!(
      from = self.state.pagination.page,
      to = clamped.page,
      filtered = count,
      "reclamping page pointer"
    );
    self.change(
      StateChange::Pagination(clamped)
    )?;
    Ok(true)
  }

  /// Reclamps, then derives what the view should paint.
  pub fn render(
    &mut self,
    order: ListOrder
  ) -> anyhow::Result<TaskView> {
    self.recalculate_pagination()?;
    Ok(derive_view(&self.state, order))
  }

  /// Prepends `task`.
  #[tracing::instrument(
    skip(self, task),
    fields(id = %task.id)
  )]
  pub fn add_task(
    &mut self,
    task: Task
  ) -> anyhow::Result<()> {
    let mut tasks = Vec::with_capacity(
      self.state.tasks.len() + 1
    );
    tasks.push(task);
    tasks.extend(
      self.state.tasks.iter().cloned()
    );
    self.change(StateChange::Tasks(tasks))
  }

  #[tracing::instrument(skip(self))]
  pub fn toggle_completed(
    &mut self,
    id: Uuid
  ) -> anyhow::Result<bool> {
    self.replace_task(
      id,
      Task::with_completed_toggled
    )
  }

  /// Flips edit mode on the task; leaving edit mode commits `draft` if it
  /// holds a non-blank title.
  #[tracing::instrument(skip(
    self, draft
  ))]
  pub fn toggle_editing(
    &mut self,
    id: Uuid,
    draft: Option<&str>
  ) -> anyhow::Result<bool> {
    self.replace_task(id, |task| {
      task.with_editing_toggled(draft)
    })
  }

  #[tracing::instrument(skip(self))]
  pub fn remove_task(
    &mut self,
    id: Uuid
  ) -> anyhow::Result<bool> {
    if !self
      .state
      .tasks
      .iter()
      .any(|task| task.id == id)
    {
      warn!(%id, "remove requested for unknown task");
      return Ok(false);
    }

    let tasks = self
      .state
      .tasks
      .iter()
      .filter(|task| task.id != id)
      .cloned()
      .collect();
    self.change(StateChange::Tasks(tasks))?;
    Ok(true)
  }

  fn replace_task<F>(
    &mut self,
    id: Uuid,
    update: F
  ) -> anyhow::Result<bool>
  where
    F: Fn(&Task) -> Task
  {
    let Some(tasks) = task::replace_by_id(
      &self.state.tasks,
      id,
      update
    ) else {
      warn!(%id, "update requested for unknown task");
      return Ok(false);
    };

    self.change(StateChange::Tasks(tasks))?;
    Ok(true)
  }
}

fn load_snapshot<S: SnapshotStorage>(
  storage: &S,
  name: &str
) -> Option<State> {
  let raw = match storage.read(name) {
    | Ok(raw) => raw?,
    | Err(error) => {
      warn!(
        name = %name,
        error = %error,
        "failed reading state snapshot; \
         using initial state"
      );
      return None;
    }
  };

  let mut state =
    match serde_json::from_str::<State>(
      &raw
    ) {
      | Ok(state) => state,
      | Err(error) => {
        warn!(
          name = %name,
          %error,
          "failed parsing state snapshot; \
           using initial state"
        );
        return None;
      }
    };

  if state.pagination.per_page == 0 {
    warn!(
      name = %name,
      "state snapshot has zero tasks per \
       page; using initial state"
    );
    return None;
  }

  if state.pagination.page == 0 {
    warn!(
      name = %name,
      "state snapshot points at page 0; \
       moving to page 1"
    );
    state.pagination =
      state.pagination.with_page(1);
  }

  if state.name != name {
    warn!(
      name = %name,
      stored = %state.name,
      "state snapshot carries another \
       name; renaming to its key"
    );
    state.name = name.to_string();
  }

  Some(state)
}

use serde::{
  Deserialize,
  Serialize
};
use tracing::debug;

use crate::filter::{
  Filter,
  filtered_count,
  filtered_tasks
};
use crate::pagination::{
  page_count,
  paginated_tasks
};
use crate::state::State;
use crate::task::Task;

/// Order in which the displayed list is filtered and windowed.
///
/// Page selectors are always counted over the filtered list.
/// `PaginateThenFilter` windows the unfiltered list first and filters inside
/// the window, which can show fewer than `per_page` rows; it matches the
/// page's historical behaviour.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
  #[default]
  FilterThenPaginate,
  PaginateThenFilter
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTab {
  pub filter: Filter,
  pub active: bool
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct PageSelector {
  pub number: usize,
  pub active: bool
}

/// Everything the view paints after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
  pub filters:        Vec<FilterTab>,
  pub tasks:          Vec<Task>,
  pub pages:          Vec<PageSelector>,
  pub page_count:     usize,
  pub filtered_count: usize
}

impl TaskView {
  pub fn active_page(
    &self
  ) -> Option<usize> {
    self
      .pages
      .iter()
      .find(|page| page.active)
      .map(|page| page.number)
  }
}

pub fn visible_tasks(
  state: &State,
  order: ListOrder
) -> Vec<Task> {
  match order {
    | ListOrder::FilterThenPaginate => {
      paginated_tasks(
        &filtered_tasks(
          &state.tasks,
          &state.filter
        ),
        &state.pagination
      )
    }
    | ListOrder::PaginateThenFilter => {
      filtered_tasks(
        &paginated_tasks(
          &state.tasks,
          &state.pagination
        ),
        &state.filter
      )
    }
  }
}

pub fn filter_tabs(
  active: &Filter
) -> Vec<FilterTab> {
  Filter::ALL_MODES
    .into_iter()
    .map(|filter| FilterTab {
      active: &filter == active,
      filter
    })
    .collect()
}

pub fn page_selectors(
  page_count: usize,
  current: usize
) -> Vec<PageSelector> {
  (1..=page_count)
    .map(|number| PageSelector {
      number,
      active: number == current
    })
    .collect()
}

/// Pure derivation of the painted view. Does not reclamp; callers go through
/// `Store::render` so the page pointer is in range first.
pub fn derive_view(
  state: &State,
  order: ListOrder
) -> TaskView {
  let filtered_count = filtered_count(
    &state.tasks,
    &state.filter
  );
  let page_count = page_count(
    filtered_count,
    state.pagination.per_page
  );
  let tasks = visible_tasks(state, order);

  debug!(
    filter = %state.filter,
    page = state.pagination.page,
    page_count,
    filtered_count,
    visible = tasks.len(),
    "derived task view"
  );

  TaskView {
    filters: filter_tabs(&state.filter),
    tasks,
    pages: page_selectors(
      page_count,
      state.pagination.page
    ),
    page_count,
    filtered_count
  }
}

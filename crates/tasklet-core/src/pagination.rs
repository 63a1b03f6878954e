use serde::{
  Deserialize,
  Serialize
};

use crate::task::Task;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
  pub per_page: usize,
  pub page:     usize
}

impl Pagination {
  pub fn first_page(
    per_page: usize
  ) -> Self {
    Self {
      per_page,
      page: 1
    }
  }

  pub fn with_page(
    self,
    page: usize
  ) -> Self {
    Self {
      page,
      ..self
    }
  }

  fn window(
    &self
  ) -> (usize, usize) {
    let start = self
      .page
      .saturating_sub(1)
      .saturating_mul(self.per_page);
    let end =
      start.saturating_add(self.per_page);
    (start, end)
  }
}

/// The `page`-th window of `per_page` tasks. Windows past the end come back
/// short or empty.
pub fn paginated_tasks(
  tasks: &[Task],
  pagination: &Pagination
) -> Vec<Task> {
  let (start, end) =
    pagination.window();
  let start = start.min(tasks.len());
  let end = end.min(tasks.len());
  tasks[start..end].to_vec()
}

/// Number of pages needed for `count` items. Zero for an empty list.
pub fn page_count(
  count: usize,
  per_page: usize
) -> usize {
  if per_page == 0 {
    return 0;
  }
  count.div_ceil(per_page)
}

/// Highest page the pointer may rest on; never below 1.
pub fn max_page(
  count: usize,
  per_page: usize
) -> usize {
  page_count(count, per_page).max(1)
}

/// `Some(clamped)` when `pagination` points past the last page for `count`
/// items, `None` when it is already in range.
pub fn clamp(
  pagination: &Pagination,
  count: usize
) -> Option<Pagination> {
  let max =
    max_page(count, pagination.per_page);
  (pagination.page > max)
    .then(|| pagination.with_page(max))
}

pub mod config;
pub mod filter;
pub mod pagination;
pub mod state;
pub mod storage;
pub mod task;
pub mod view;

use tracing::info;

pub use config::AppConfig;
pub use filter::Filter;
pub use pagination::Pagination;
pub use state::{
  InitialState,
  State,
  StateChange,
  Store,
  StoreOptions
};
pub use storage::{
  MemoryStorage,
  SnapshotStorage
};
pub use task::{
  Task,
  TaskOptions
};
pub use view::{
  ListOrder,
  TaskView
};

/// Opens the store described by `cfg` on `storage`.
#[tracing::instrument(skip_all)]
pub fn open_store<S>(
  cfg: &AppConfig,
  storage: S
) -> Store<S>
where
  S: SnapshotStorage
{
  info!(
    name = %cfg.store.name,
    persistent = cfg.store.persistent,
    per_page = cfg.pagination.per_page,
    list_order = ?cfg.view.list_order,
    "opening task store"
  );

  Store::create(
    &cfg.store.name,
    cfg.initial_state(),
    cfg.store_options(),
    storage
  )
}

use anyhow::{
  Context,
  bail
};
use serde::Deserialize;
use tracing::debug;

use crate::state::{
  InitialState,
  StoreOptions
};
use crate::view::ListOrder;

pub const DEFAULT_STORE_NAME: &str =
  "store";
pub const DEFAULT_PER_PAGE: usize = 5;

/// Startup configuration, read from TOML. Every key is optional.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
  Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
  pub store:      StoreSection,
  pub pagination: PaginationSection,
  pub view:       ViewSection
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
  pub name:       String,
  pub persistent: bool
}

impl Default for StoreSection {
  fn default() -> Self {
    Self {
      name:       DEFAULT_STORE_NAME
        .to_string(),
      persistent: true
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationSection {
  pub per_page: usize
}

impl Default for PaginationSection {
  fn default() -> Self {
    Self {
      per_page: DEFAULT_PER_PAGE
    }
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
  Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct ViewSection {
  pub list_order: ListOrder
}

impl AppConfig {
  #[tracing::instrument(skip(text))]
  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let cfg: AppConfig =
      toml::from_str(text).context(
        "failed to parse tasklet config"
      )?;
    cfg.validate()?;
    debug!(?cfg, "loaded config");
    Ok(cfg)
  }

  pub fn validate(
    &self
  ) -> anyhow::Result<()> {
    if self.store.name.trim().is_empty()
    {
      bail!(
        "store.name must not be empty"
      );
    }
    if self.pagination.per_page == 0 {
      bail!(
        "pagination.per_page must be at \
         least 1"
      );
    }
    Ok(())
  }

  pub fn store_options(
    &self
  ) -> StoreOptions {
    StoreOptions {
      is_persistent: self
        .store
        .persistent
    }
  }

  pub fn initial_state(
    &self
  ) -> InitialState {
    InitialState::empty(
      self.pagination.per_page
    )
  }
}

#[cfg(test)]
mod tests {
  use super::AppConfig;
  use crate::view::ListOrder;

  #[test]
  fn empty_document_yields_defaults() {
    let cfg =
      AppConfig::from_toml_str("")
        .unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.store.name, "store");
    assert!(cfg.store.persistent);
    assert_eq!(cfg.pagination.per_page, 5);
    assert_eq!(
      cfg.view.list_order,
      ListOrder::FilterThenPaginate
    );
  }

  #[test]
  fn reads_every_section() {
    let cfg = AppConfig::from_toml_str(
      r#"
[store]
name = "todos"
persistent = false

[pagination]
per_page = 10

[view]
list_order = "paginate_then_filter"
"#
    )
    .unwrap();

    assert_eq!(cfg.store.name, "todos");
    assert!(
      !cfg.store_options().is_persistent
    );
    assert_eq!(
      cfg
        .initial_state()
        .pagination
        .per_page,
      10
    );
    assert_eq!(
      cfg.view.list_order,
      ListOrder::PaginateThenFilter
    );
  }

  #[test]
  fn rejects_invalid_values() {
    assert!(
      AppConfig::from_toml_str(
        "[pagination]\nper_page = 0\n"
      )
      .is_err()
    );
    assert!(
      AppConfig::from_toml_str(
        "[store]\nname = \"  \"\n"
      )
      .is_err()
    );
    assert!(
      AppConfig::from_toml_str(
        "[store]\ncolour = \"red\"\n"
      )
      .is_err()
    );
  }
}

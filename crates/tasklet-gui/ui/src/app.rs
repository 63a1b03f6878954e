mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console::log;
use tasklet_core::task::normalize_title;
use tasklet_core::view::derive_view;
use tasklet_core::{
  AppConfig,
  Filter,
  ListOrder,
  Store,
  Task,
  TaskView
};
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  UseStateHandle,
  function_component,
  html,
  use_mut_ref,
  use_state
};

use self::storage::BrowserSessionStorage;
use crate::components::{
  FilterTabs,
  PageSelectors,
  TaskForm,
  TaskList
};

const APP_CONFIG_TOML: &str =
  include_str!("../assets/tasklet.toml");

type SharedStore = Rc<
  RefCell<Store<BrowserSessionStorage>>
>;

#[function_component(App)]
pub fn app() -> Html {
  let config = use_state(load_app_config);
  let order = config.view.list_order;
  let store: SharedStore = {
    let config = (*config).clone();
    use_mut_ref(move || {
      tasklet_core::open_store(
        &config,
        BrowserSessionStorage::open()
      )
    })
  };
  let view = {
    let store = store.clone();
    use_state(move || {
      repaint(
        &mut store.borrow_mut(),
        order
      )
    })
  };

  let on_submit = {
    let store = store.clone();
    let view = view.clone();
    Callback::from(move |raw: String| {
      let Some(title) =
        normalize_title(&raw)
      else {
        ui_debug(
          "add",
          "ignored blank title"
        );
        return;
      };
      ui_debug("add", &title);
      apply(
        &store,
        &view,
        order,
        "add task",
        |store| {
          store
            .add_task(Task::pending(title))
            .map(|()| true)
        }
      );
    })
  };

  let on_select_filter = {
    let store = store.clone();
    let view = view.clone();
    Callback::from(move |next: Filter| {
      ui_debug("filter", next.as_str());
      apply(
        &store,
        &view,
        order,
        "change filter",
        |store| store.set_next_filter(next)
      );
    })
  };

  let on_select_page = {
    let store = store.clone();
    let view = view.clone();
    Callback::from(move |page: usize| {
      ui_debug(
        "page",
        &page.to_string()
      );
      apply(
        &store,
        &view,
        order,
        "select page",
        |store| {
          store
            .select_page(page)
            .map(|()| true)
        }
      );
    })
  };

  let on_toggle = {
    let store = store.clone();
    let view = view.clone();
    Callback::from(move |id: Uuid| {
      apply(
        &store,
        &view,
        order,
        "toggle completion",
        |store| store.toggle_completed(id)
      );
    })
  };

  let on_edit = {
    let store = store.clone();
    let view = view.clone();
    Callback::from(
      move |(id, draft): (
        Uuid,
        Option<String>
      )| {
        apply(
          &store,
          &view,
          order,
          "toggle editing",
          |store| {
            store.toggle_editing(
              id,
              draft.as_deref()
            )
          }
        );
      }
    )
  };

  let on_remove = {
    let store = store.clone();
    let view = view.clone();
    Callback::from(move |id: Uuid| {
      apply(
        &store,
        &view,
        order,
        "remove task",
        |store| store.remove_task(id)
      );
    })
  };

  html! {
      <main class="tasklet">
          <TaskForm on_submit={on_submit} />
          <FilterTabs
              tabs={view.filters.clone()}
              on_select={on_select_filter}
          />
          <TaskList
              tasks={view.tasks.clone()}
              on_toggle={on_toggle}
              on_edit={on_edit}
              on_remove={on_remove}
          />
          <PageSelectors
              pages={view.pages.clone()}
              on_select={on_select_page}
          />
      </main>
  }
}

/// Runs one store operation and repaints when it reports a change. A
/// failed write is logged; the in-memory state is still painted.
fn apply<F>(
  store: &SharedStore,
  view: &UseStateHandle<TaskView>,
  order: ListOrder,
  action: &str,
  op: F
) where
  F: FnOnce(
    &mut Store<BrowserSessionStorage>
  ) -> anyhow::Result<bool>
{
  let mut store = store.borrow_mut();
  match op(&mut *store) {
    | Ok(true) => {}
    | Ok(false) => {
      tracing::debug!(
        action,
        "nothing changed; skipping \
         repaint"
      );
      return;
    }
    | Err(error) => {
      tracing::error!(
        action,
        error = ?error,
        "store operation failed"
      );
    }
  }

  view.set(repaint(&mut *store, order));
}

fn repaint(
  store: &mut Store<
    BrowserSessionStorage
  >,
  order: ListOrder
) -> TaskView {
  match store.render(order) {
    | Ok(view) => view,
    | Err(error) => {
      tracing::error!(
        error = ?error,
        "failed persisting reclamped \
         page; painting current state"
      );
      derive_view(store.state(), order)
    }
  }
}

fn load_app_config() -> AppConfig {
  match AppConfig::from_toml_str(
    APP_CONFIG_TOML
  ) {
    | Ok(config) => {
      tracing::info!(
        store = %config.store.name,
        per_page =
          config.pagination.per_page,
        "loaded tasklet config"
      );
      config
    }
    | Err(error) => {
      tracing::error!(
        error = ?error,
        "failed to load tasklet config; \
         using defaults"
      );
      AppConfig::default()
    }
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}

use std::cell::Cell;

use tasklet_core::storage::FileStorage;
use tasklet_core::{
    AppConfig, Filter, InitialState, ListOrder, MemoryStorage, SnapshotStorage, Store,
    StoreOptions, Task, open_store,
};
use tempfile::tempdir;

/// Medium that accepts writes until `full` is set, like session storage
/// once its quota is spent.
#[derive(Default)]
struct QuotaStorage {
    inner: MemoryStorage,
    full: Cell<bool>,
}

impl SnapshotStorage for QuotaStorage {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.inner.read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.full.get() {
            anyhow::bail!("quota exceeded");
        }
        self.inner.write(key, value)
    }
}

/// Medium whose every read fails.
struct BrokenStorage;

impl SnapshotStorage for BrokenStorage {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        anyhow::bail!("cannot read {key}")
    }

    fn write(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

fn store_with(titles: &[&str], storage: MemoryStorage) -> Store<MemoryStorage> {
    let mut store = Store::create(
        "store",
        InitialState::empty(5),
        StoreOptions {
            is_persistent: true,
        },
        storage,
    );
    for title in titles {
        store
            .add_task(Task::pending(*title))
            .expect("add task should succeed");
    }
    store
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}

#[test]
fn six_tasks_span_two_pages_newest_first() {
    let mut store = store_with(&["t1", "t2", "t3", "t4", "t5", "t6"], MemoryStorage::new());

    let view = store.render(ListOrder::default()).expect("render");
    assert_eq!(view.page_count, 2);
    assert_eq!(view.active_page(), Some(1));
    assert_eq!(titles(&view.tasks), vec!["t6", "t5", "t4", "t3", "t2"]);

    store.select_page(2).expect("select page");
    let view = store.render(ListOrder::default()).expect("render");
    assert_eq!(titles(&view.tasks), vec!["t1"]);
    assert_eq!(view.active_page(), Some(2));
}

#[test]
fn switching_to_todo_rewinds_and_shows_the_open_task() {
    let mut store = store_with(&["t1", "t2", "t3", "t4", "t5", "t6"], MemoryStorage::new());
    let ids: Vec<_> = store.state().tasks.iter().map(|t| t.id).collect();
    for id in &ids[..5] {
        assert!(store.toggle_completed(*id).expect("toggle"));
    }
    store.select_page(2).expect("select page");

    assert!(store.set_next_filter(Filter::Todo).expect("set filter"));
    let view = store.render(ListOrder::default()).expect("render");
    assert_eq!(view.page_count, 1);
    assert_eq!(store.state().pagination.page, 1);
    assert_eq!(titles(&view.tasks), vec!["t1"]);
}

#[test]
fn completing_last_todo_on_page_two_reclamps_to_page_one() {
    let mut store = store_with(&["t1", "t2", "t3", "t4", "t5", "t6"], MemoryStorage::new());
    assert!(store.set_next_filter(Filter::Todo).expect("set filter"));
    store.select_page(2).expect("select page");

    let view = store.render(ListOrder::default()).expect("render");
    assert_eq!(view.page_count, 2);
    assert_eq!(titles(&view.tasks), vec!["t1"]);
    let lone = view.tasks[0].id;

    store.toggle_completed(lone).expect("toggle");
    let view = store.render(ListOrder::default()).expect("render");
    assert_eq!(view.page_count, 1);
    assert_eq!(store.state().pagination.page, 1);
    assert_eq!(view.active_page(), Some(1));
    assert_eq!(view.tasks.len(), 5);
}

#[test]
fn removing_only_task_on_last_page_moves_back() {
    let mut store = store_with(&["t1", "t2", "t3", "t4", "t5", "t6"], MemoryStorage::new());
    store.select_page(2).expect("select page");
    let oldest = store.state().tasks[5].id;

    assert!(store.remove_task(oldest).expect("remove"));
    let view = store.render(ListOrder::default()).expect("render");
    assert_eq!(store.state().pagination.page, 1);
    assert_eq!(view.page_count, 1);
}

#[test]
fn legacy_order_windows_before_filtering() {
    let mut store = store_with(&["t1", "t2", "t3", "t4", "t5", "t6"], MemoryStorage::new());
    let newest = store.state().tasks[0].id;
    store.toggle_completed(newest).expect("toggle");
    store.set_next_filter(Filter::Todo).expect("set filter");

    let legacy = store.render(ListOrder::PaginateThenFilter).expect("render");
    assert_eq!(legacy.page_count, 1);
    assert_eq!(titles(&legacy.tasks), vec!["t5", "t4", "t3", "t2"]);

    let uniform = store.render(ListOrder::FilterThenPaginate).expect("render");
    assert_eq!(titles(&uniform.tasks), vec!["t5", "t4", "t3", "t2", "t1"]);
}

#[test]
fn reload_restores_the_last_snapshot() {
    let mut store = store_with(&["a", "b"], MemoryStorage::new());
    let b = store.state().tasks[0].id;
    store.toggle_editing(b, None).expect("enter edit");
    store.set_next_filter(Filter::Done).expect("set filter");
    let before = store.state().clone();

    let reopened = store_with(&[], store.into_storage());
    assert_eq!(reopened.state(), &before);
    assert!(reopened.state().tasks[0].is_editing);
}

#[test]
fn file_backed_store_survives_reopen() {
    let temp = tempdir().expect("tempdir");
    let cfg = AppConfig::from_toml_str("[pagination]\nper_page = 2\n").expect("config");

    let mut store = open_store(&cfg, FileStorage::open(temp.path()).expect("open storage"));
    store.add_task(Task::pending("write docs")).expect("add");
    store.add_task(Task::pending("ship")).expect("add");
    let saved = store.state().clone();

    let reopened = open_store(&cfg, FileStorage::open(temp.path()).expect("open storage"));
    assert_eq!(reopened.state(), &saved);
    assert!(temp.path().join("store.json").exists());
}

#[test]
fn stale_filter_in_snapshot_loads_and_shows_nothing() {
    let mut storage = MemoryStorage::new();
    tasklet_core::SnapshotStorage::write(
        &mut storage,
        "store",
        r#"{"name":"store","tasks":[{"id":"6f1c1a52-3a1e-4c55-9a53-2b0f4c5a1d10","title":"x","isCompleted":false,"isEditing":false}],"filter":"archived","pagination":{"perPage":5,"page":3}}"#,
    )
    .expect("seed snapshot");

    let mut store = store_with(&[], storage);
    assert_eq!(store.state().tasks.len(), 1);

    let view = store.render(ListOrder::default()).expect("render");
    assert!(view.tasks.is_empty());
    assert_eq!(view.page_count, 0);
    assert_eq!(store.state().pagination.page, 1);

    assert!(store.set_next_filter(Filter::All).expect("set filter"));
    let view = store.render(ListOrder::default()).expect("render");
    assert_eq!(titles(&view.tasks), vec!["x"]);
}

#[test]
fn full_medium_reports_errors_but_keeps_view_consistent() {
    let mut store = Store::create(
        "store",
        InitialState::empty(5),
        StoreOptions {
            is_persistent: true,
        },
        QuotaStorage::default(),
    );
    for i in 1..=12 {
        store
            .add_task(Task::pending(format!("t{i}")))
            .expect("add task should succeed");
    }
    store.select_page(3).expect("select page");
    let saved = store.storage().inner.get("store").map(str::to_owned);
    store.storage().full.set(true);

    let error = store
        .set_next_filter(Filter::Todo)
        .expect_err("write should fail");
    assert!(format!("{error:#}").contains("quota exceeded"));
    assert_eq!(store.state().filter, Filter::Todo);
    assert_eq!(store.state().pagination.page, 1);

    assert!(store.add_task(Task::pending("t13")).is_err());
    assert_eq!(store.state().tasks.len(), 13);
    assert_eq!(
        store.storage().inner.get("store").map(str::to_owned),
        saved
    );

    let view = store.render(ListOrder::default()).expect("render");
    assert_eq!(view.active_page(), Some(1));
    assert_eq!(titles(&view.tasks), vec!["t13", "t12", "t11", "t10", "t9"]);
}

#[test]
fn unreadable_medium_starts_from_initial_state() {
    let store = Store::create(
        "store",
        InitialState::empty(3),
        StoreOptions {
            is_persistent: true,
        },
        BrokenStorage,
    );
    assert_eq!(store.state().name, "store");
    assert!(store.state().tasks.is_empty());
    assert_eq!(store.state().pagination.per_page, 3);
}

use anyhow::anyhow;
use tasklet_core::SnapshotStorage;
use wasm_bindgen::JsValue;

/// `window.sessionStorage`; snapshots last until the tab closes.
///
/// When the browser refuses access (private mode, sandboxed frames) the
/// store keeps working in memory and every read misses.
pub struct BrowserSessionStorage {
  inner: Option<web_sys::Storage>
}

impl BrowserSessionStorage {
  pub fn open() -> Self {
    let inner = web_sys::window()
      .and_then(|window| {
        window
          .session_storage()
          .ok()
          .flatten()
      });

    if inner.is_none() {
      tracing::warn!(
        "session storage unavailable; \
         state will not survive a reload"
      );
    }

    Self {
      inner
    }
  }
}

impl SnapshotStorage
  for BrowserSessionStorage
{
  fn read(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    let Some(storage) = &self.inner
    else {
      return Ok(None);
    };

    storage
      .get_item(key)
      .map_err(|error| {
        js_error("reading", key, error)
      })
  }

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    let Some(storage) = &self.inner
    else {
      return Ok(());
    };

    storage
      .set_item(key, value)
      .map_err(|error| {
        js_error("writing", key, error)
      })
  }
}

fn js_error(
  action: &str,
  key: &str,
  error: JsValue
) -> anyhow::Error {
  let detail = error
    .as_string()
    .unwrap_or_else(|| {
      format!("{error:?}")
    });
  anyhow!(
    "failed {action} session storage \
     key {key}: {detail}"
  )
}

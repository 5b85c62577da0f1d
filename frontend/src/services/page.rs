//! Page-level side effects: reloading and running local tasks.

use futures::future::LocalBoxFuture;

/// Reloads the current page.
pub trait Reload {
    fn reload(&self);
}

/// Runs a task on the UI event loop without waiting for it.
pub trait Spawn {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// `window.location.reload()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PageReload;

impl Reload for PageReload {
    fn reload(&self) {
        log::debug!("🔄 Reloading page");
        if let Err(e) = gloo_utils::window().location().reload() {
            log::error!("Failed to reload page: {:?}", e);
        }
    }
}

/// Browser microtask queue via `wasm_bindgen_futures::spawn_local`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WasmSpawner;

impl Spawn for WasmSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

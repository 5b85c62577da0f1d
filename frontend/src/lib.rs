//! nasdrop - Drag & drop upload widget for the NAS file browser
//!
//! A WebAssembly widget that posts every file the user picks or drops to
//! the file browser's upload endpoint, one request per file, and reloads
//! the page after each request settles.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐     ┌──────────────────────────────┐
//! │ dom::attach                  │     │ DropZone (Leptos component)  │
//! │ existing #drop-area/#fileElem│     │ mounted by App               │
//! └──────────────┬───────────────┘     └──────────────┬───────────────┘
//!                │  DropZoneEvent::reaction()          │
//!                └──────────────┬──────────────────────┘
//!                               ▼
//!                    Uploader::submit_all(files)
//!                               │  one spawned task per file
//!                               ▼
//!              submit_file: POST multipart `file` → reload
//! ```
//!
//! # Modules
//!
//! - [`config`] - Defaults and [`WidgetConfig`]
//! - [`types`] - Drop-zone state, file and error types
//! - [`services`] - Upload transport, page reload, task spawning
//! - [`dom`] - Attaching to a server-rendered drop-zone
//! - [`components`] - The [`DropZone`] component

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod services;
pub mod dom;
pub mod components;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Drop-zone
    DropZoneEvent, Highlight, Reaction,
    // Files
    SelectedFile, UploadTarget,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Start the widget.
///
/// Attaches to the page's own `#drop-area` when there is one, otherwise
/// mounts [`App`] to the body.
#[wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(LOG_LEVEL);

    log::info!("🦀 nasdrop - Starting upload widget");

    match dom::find_drop_zone() {
        Some((zone, input)) => {
            let config = dom::read_config(&zone);
            if let Err(e) = dom::attach(zone, input, config) {
                log::error!("❌ Could not attach upload widget: {}", e);
            }
        }
        None => mount_to_body(|| view! { <App/> }),
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Upload"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/*any" view=UploadPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn UploadPage() -> impl IntoView {
    view! {
        <div class="container">
            <DropZone/>
        </div>
    }
}

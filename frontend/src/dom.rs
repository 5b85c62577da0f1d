//! Wiring onto a drop-zone that already exists in a server-rendered page.
//!
//! The file browser renders a `#drop-area` element and a hidden
//! `#fileElem` input. [`attach`] takes both explicitly and installs the
//! click, change and drag listeners on them.

use std::rc::Rc;

use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, EventTarget, File, FileList, HtmlElement, HtmlInputElement, MouseEvent};

use crate::{
    AppError, AppResult, BrowserUploader, DropZoneEvent, Reaction, WidgetConfig, CONFIG_ATTRIBUTE,
    DROP_ZONE_ID, FILE_INPUT_ID,
};

/// Files of a `FileList`, in list order. `None` yields nothing.
pub fn files_of(list: Option<FileList>) -> Vec<File> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Look up the page's drop-zone and file input by id.
pub fn find_drop_zone() -> Option<(HtmlElement, HtmlInputElement)> {
    let document = gloo_utils::document();
    let zone = document
        .get_element_by_id(DROP_ZONE_ID)?
        .dyn_into::<HtmlElement>()
        .ok()?;
    let input = document
        .get_element_by_id(FILE_INPUT_ID)?
        .dyn_into::<HtmlInputElement>()
        .ok()?;
    Some((zone, input))
}

/// Config carried by the drop-zone's `data-upload-config` attribute.
pub fn read_config(zone: &HtmlElement) -> WidgetConfig {
    config_from_attribute(zone.get_attribute(CONFIG_ATTRIBUTE).as_deref())
}

fn config_from_attribute(value: Option<&str>) -> WidgetConfig {
    match value {
        None => WidgetConfig::default(),
        Some(json) => WidgetConfig::from_json(json).unwrap_or_else(|e| {
            log::warn!("Ignoring {}: {}", CONFIG_ATTRIBUTE, e);
            WidgetConfig::default()
        }),
    }
}

/// Install the upload widget on an existing drop-zone and file input.
pub fn attach(drop_zone: HtmlElement, file_input: HtmlInputElement, config: WidgetConfig) -> AppResult<()> {
    let uploader = BrowserUploader::for_page(&config);
    log::info!(
        "🧲 Attaching upload widget to #{} (posting to {})",
        drop_zone.id(),
        uploader.target().url
    );
    let config = Rc::new(config);

    // Click anywhere on the zone opens the picker
    let input = file_input.clone();
    let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
        input.click();
    }) as Box<dyn FnMut(MouseEvent)>);
    listen(&drop_zone, "click", on_click)?;

    let picker_uploader = uploader.clone();
    let input = file_input.clone();
    let on_change = Closure::wrap(Box::new(move |_: Event| {
        let count = picker_uploader.submit_all(files_of(input.files()));
        log::debug!("Picker returned {} file(s)", count);
    }) as Box<dyn FnMut(Event)>);
    listen(&file_input, "change", on_change)?;

    for event in [
        DropZoneEvent::DragEnter,
        DropZoneEvent::DragOver,
        DropZoneEvent::DragLeave,
        DropZoneEvent::Drop,
    ] {
        let zone = drop_zone.clone();
        let config = Rc::clone(&config);
        let uploader = uploader.clone();

        let handler = Closure::wrap(Box::new(move |ev: DragEvent| {
            apply_reaction(&zone, &config, &ev, event.reaction());

            if event == DropZoneEvent::Drop {
                let files = files_of(ev.data_transfer().and_then(|dt| dt.files()));
                let count = uploader.submit_all(files);
                log::debug!("Drop carried {} file(s)", count);
            }
        }) as Box<dyn FnMut(DragEvent)>);
        listen(&drop_zone, event.dom_name(), handler)?;
    }

    Ok(())
}

fn apply_reaction(zone: &HtmlElement, config: &WidgetConfig, ev: &Event, reaction: Reaction) {
    if reaction.prevent_default {
        ev.prevent_default();
    }
    if let Err(e) = zone
        .style()
        .set_property("background", config.background(reaction.highlight))
    {
        log::warn!("Failed to restyle drop-zone: {:?}", e);
    }
}

fn listen<T>(target: &EventTarget, event: &str, handler: Closure<T>) -> AppResult<()>
where
    T: ?Sized + WasmClosure,
{
    target
        .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
        .map_err(|e| AppError::Dom(format!("Failed to listen for {}: {:?}", event, e)))?;

    // Listeners stay registered for the page's lifetime
    handler.forget();
    Ok(())
}

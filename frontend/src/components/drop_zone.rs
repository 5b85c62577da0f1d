//! File upload zone with click-to-browse and drag & drop.
//!
//! Every selected file is posted on its own; the page reloads after each
//! request settles.

use leptos::*;
use web_sys::{DragEvent, Event, HtmlInputElement};

use crate::dom::files_of;
use crate::{BrowserUploader, DropZoneEvent, Highlight, WidgetConfig};

#[component]
pub fn DropZone(
    /// Widget settings, defaults when omitted
    #[prop(optional)]
    config: Option<WidgetConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let uploader = BrowserUploader::for_page(&config);
    let (highlight, set_highlight) = create_signal(Highlight::Neutral);
    let input_ref = create_node_ref::<html::Input>();

    // Click anywhere on the zone opens the picker
    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let picker_uploader = uploader.clone();
    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let count = picker_uploader.submit_all(files_of(input.files()));
        log::debug!("Picker returned {} file(s)", count);
    };

    let react = move |ev: &DragEvent, event: DropZoneEvent| {
        let reaction = event.reaction();
        if reaction.prevent_default {
            ev.prevent_default();
        }
        set_highlight.set(reaction.highlight);
    };

    let on_drop = move |ev: DragEvent| {
        react(&ev, DropZoneEvent::Drop);
        let files = files_of(ev.data_transfer().and_then(|dt| dt.files()));
        let count = uploader.submit_all(files);
        log::debug!("Drop carried {} file(s)", count);
    };

    let neutral = config.neutral_background.clone();
    let highlighted = config.highlight_background.clone();
    let background = move || match highlight.get() {
        Highlight::Neutral => neutral.clone(),
        Highlight::Highlighted => highlighted.clone(),
    };

    view! {
        <div
            class="drop-zone"
            class:highlighted=move || highlight.get().is_highlighted()
            style:background=background
            on:click=open_picker
            on:dragenter=move |ev: DragEvent| react(&ev, DropZoneEvent::DragEnter)
            on:dragover=move |ev: DragEvent| react(&ev, DropZoneEvent::DragOver)
            on:dragleave=move |ev: DragEvent| react(&ev, DropZoneEvent::DragLeave)
            on:drop=on_drop
        >
            <div class="upload-icon">"📤"</div>
            <div class="upload-text">"Drop files here"</div>
            <div class="upload-hint">"or click to browse"</div>

            <input
                type="file"
                multiple=true
                style="display:none"
                node_ref=input_ref
                on:change=on_file_change
            />
        </div>
    }
}

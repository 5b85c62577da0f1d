//! Common types used across the widget.
//!
//! # Categories
//!
//! - **Drop-zone Types** - Visual state and event reactions
//! - **File Types** - What a selection hands to the transport
//! - **Error Types** - Frontend error handling

use std::fmt;

// =============================================================================
// Drop-zone Types
// =============================================================================

/// Visual state of the drop-zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Highlight {
    /// Nothing hovering
    #[default]
    Neutral,
    /// A drag is over the zone
    Highlighted,
}

impl Highlight {
    /// Whether the zone is highlighted.
    pub fn is_highlighted(self) -> bool {
        self == Highlight::Highlighted
    }
}

/// Drag events the drop-zone reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropZoneEvent {
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
}

/// What the widget does in response to a [`DropZoneEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reaction {
    /// Suppress the browser's "open the file" navigation.
    pub prevent_default: bool,
    /// State the drop-zone ends up in.
    pub highlight: Highlight,
}

impl DropZoneEvent {
    /// DOM event type name.
    pub fn dom_name(self) -> &'static str {
        match self {
            DropZoneEvent::DragEnter => "dragenter",
            DropZoneEvent::DragOver => "dragover",
            DropZoneEvent::DragLeave => "dragleave",
            DropZoneEvent::Drop => "drop",
        }
    }

    /// Reaction to this event. Independent of the current state and of
    /// whether the drag carries files.
    pub fn reaction(self) -> Reaction {
        match self {
            DropZoneEvent::DragEnter | DropZoneEvent::DragOver => Reaction {
                prevent_default: true,
                highlight: Highlight::Highlighted,
            },
            DropZoneEvent::DragLeave => Reaction {
                prevent_default: false,
                highlight: Highlight::Neutral,
            },
            DropZoneEvent::Drop => Reaction {
                prevent_default: true,
                highlight: Highlight::Neutral,
            },
        }
    }
}

// =============================================================================
// File Types
// =============================================================================

/// A file chosen through the picker or a drop.
///
/// Opaque to the widget apart from its name, which is only used for logging.
pub trait SelectedFile {
    fn file_name(&self) -> String;
}

impl SelectedFile for web_sys::File {
    fn file_name(&self) -> String {
        self.name()
    }
}

/// Where a submission is posted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadTarget {
    /// Request URL (path relative to the page origin)
    pub url: String,
    /// Multipart field name
    pub field: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend errors.
#[derive(Clone, Debug)]
pub enum AppError {
    /// Invalid widget configuration.
    Config(String),
    /// DOM lookup or wiring failed.
    Dom(String),
    /// Request could not be built.
    Request(String),
    /// Network/HTTP error.
    Network(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Dom(msg) => write!(f, "DOM error: {}", msg),
            AppError::Request(msg) => write!(f, "Request error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

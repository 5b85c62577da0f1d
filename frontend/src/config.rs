//! Widget configuration.
//!
//! Centralized defaults for the upload widget. A server-rendered page can
//! override them through JSON in the drop-zone's `data-upload-config`
//! attribute (see [`WidgetConfig::from_json`]).

use serde::Deserialize;

use crate::{AppError, AppResult, Highlight, UploadTarget};

/// Path every submission is posted to.
pub const UPLOAD_PATH: &str = "/upload";

/// Multipart field carrying the file.
pub const UPLOAD_FIELD: &str = "file";

/// Id of the drop-zone in server-rendered pages.
pub const DROP_ZONE_ID: &str = "drop-area";

/// Id of the hidden file input in server-rendered pages.
pub const FILE_INPUT_ID: &str = "fileElem";

/// Attribute on the drop-zone holding a JSON [`WidgetConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-upload-config";

/// Drop-zone background while a drag hovers over it.
pub const HIGHLIGHT_BACKGROUND: &str = "#f0f0f0";

/// Drop-zone background at rest.
pub const NEUTRAL_BACKGROUND: &str = "white";

/// Console log level.
pub const LOG_LEVEL: log::Level = log::Level::Debug;

/// Runtime settings of one widget instance.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Upload endpoint path.
    pub upload_path: String,
    /// Multipart field name.
    pub field_name: String,
    /// Post to `<upload_path>/<current directory>` instead of the bare path.
    pub follow_directory: bool,
    /// CSS background while highlighted.
    pub highlight_background: String,
    /// CSS background at rest.
    pub neutral_background: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            upload_path: UPLOAD_PATH.to_string(),
            field_name: UPLOAD_FIELD.to_string(),
            follow_directory: false,
            highlight_background: HIGHLIGHT_BACKGROUND.to_string(),
            neutral_background: NEUTRAL_BACKGROUND.to_string(),
        }
    }
}

impl WidgetConfig {
    /// Parse a (possibly partial) JSON override. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))
    }

    /// URL a submission made from `page_path` is posted to.
    ///
    /// With `follow_directory` the browsed directory is appended, matching the
    /// file browser's `/upload/<dir>` route; `/upload/` at the root.
    pub fn upload_url(&self, page_path: &str) -> String {
        if !self.follow_directory {
            return self.upload_path.clone();
        }

        let base = self.upload_path.trim_end_matches('/');
        let dir = page_path.trim_matches('/');
        if dir.is_empty() {
            format!("{}/", base)
        } else {
            format!("{}/{}", base, dir)
        }
    }

    /// Upload target for a page at `page_path`.
    pub fn target(&self, page_path: &str) -> UploadTarget {
        UploadTarget {
            url: self.upload_url(page_path),
            field: self.field_name.clone(),
        }
    }

    /// Background for the given visual state.
    pub fn background(&self, highlight: Highlight) -> &str {
        match highlight {
            Highlight::Neutral => &self.neutral_background,
            Highlight::Highlighted => &self.highlight_background,
        }
    }
}

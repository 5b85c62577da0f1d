//! UI Components.
//!
//! - [`DropZone`] - Click or drag & drop file upload zone

mod drop_zone;

pub use drop_zone::*;

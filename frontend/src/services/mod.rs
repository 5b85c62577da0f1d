//! Upload and page services.
//!
//! # Services
//!
//! - [`upload`] - Multipart submission of one file, and the per-file [`Uploader`]
//! - [`page`] - Page reload and local task spawning
//!
//! Each browser side effect sits behind a trait ([`Transport`], [`Reload`],
//! [`Spawn`]) so the upload flow also runs outside a browser.

pub mod upload;
pub mod page;

pub use upload::*;
pub use page::*;

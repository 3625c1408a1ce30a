//! Shared helpers for rendering and writing the site.

pub mod fs;
pub mod html;
pub mod minify;
pub mod slug;

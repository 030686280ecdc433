pub mod components;
pub mod layouts;
pub mod pages;

pub use layouts::{admin_layout, site_layout, PageMeta};

//! Strategy Hub: multi-year strategy scenarios with a draggable roadmap.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod timeline;
pub mod ui;

pub use error::{HubError, Result};

pub mod file;

pub use file::{load_workspace, save_workspace};

//! Command handlers

mod config;
mod delete;
mod list;
mod serve;
mod upload;

pub use config::cmd_config;
pub use delete::{cmd_delete_app, cmd_delete_build};
pub use list::cmd_list;
pub use serve::cmd_serve;
pub use upload::cmd_upload;

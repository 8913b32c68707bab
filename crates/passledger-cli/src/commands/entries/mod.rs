//! Entry commands: add, list, show, edit, rm, search, export, import.

mod add;
mod edit;
mod exchange;
mod export;
mod import;
mod list;
mod remove;
mod search;
mod show;

pub use add::handle_add;
pub use edit::handle_edit;
pub use export::handle_export;
pub use import::handle_import;
pub use list::handle_list;
pub use remove::handle_remove;
pub use search::handle_search;
pub use show::handle_show;

//! Configuration, command line and dependency wiring.

mod cli;
mod dependencies;
mod settings;

pub use cli::{Cli, Command};
pub use dependencies::{Dependencies, Job};
pub use settings::{
    EmployeeSettings, ObjectsSettings, PagesSettings, Settings, DEFAULT_ENGINE_NAME,
    DEFAULT_ENTERPRISE_SEARCH_URL, DEFAULT_OBJECTS_SLUG, DEFAULT_PAGES_SLUG,
};

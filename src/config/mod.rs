//! Environment file loading.
mod loader;


pub use loader::{
    EnvironmentSelector, environment_from_entries, load_environment, load_environment_file,
};

pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod ui;
pub mod version_file;

pub use error::{ReleaseError, Result};

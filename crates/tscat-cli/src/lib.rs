#![forbid(unsafe_code)]

//! `tscat`: inspect Qt Linguist `.ts` catalogs from the command line.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use cli::{run, run_from_env};
pub use error::{CliError, Result};

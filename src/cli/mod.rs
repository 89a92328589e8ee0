//! Command-line interface module.

mod args;
pub mod atlasnye;
pub mod brescia;
pub mod common;
pub mod ddl;
pub mod htdebeer;
pub mod validate;

pub use args::{Cli, Commands, DownloadArgs, ValidateArgs, XmlChecker};

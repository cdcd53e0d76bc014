//! Command-line interface and orchestration for dvschema
//!
//! This module implements the CLI commands and wires the extraction pipeline,
//! the Web API client and the report generators together. It handles argument
//! parsing, configuration management, and the high-level workflows.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **extract**: Connect to an environment, run the extraction pipeline, write
//!   the JSON schema document and, optionally, Excel and CSV renditions
//! - **convert**: Read a schema document written by `extract` and render it as
//!   Excel and/or CSV without contacting the environment
//! - **init**: Generate a default configuration file
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. Output meant for the user goes through the
//! [`Host`] abstraction so that commands can be exercised in tests.
//!
//! Configuration is managed through an optional `dvschema.toml` file; command-line
//! options take precedence over it.

mod common;
mod config;
mod convert;
mod extract;
mod host;
mod init;
mod progress_reporter;
mod run;

#[cfg(debug_assertions)]
pub use config::Config;

pub use convert::{ConvertArgs, process_convert};
pub use extract::{ExtractArgs, process_extract};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use run::run;

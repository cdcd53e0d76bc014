//! Shared plumbing for the extract and convert commands.

use crate::Result;
use crate::reports::{generate_csv, generate_json, generate_xlsx};
use crate::schema::SchemaDocument;
use camino::{Utf8Path, Utf8PathBuf};
use clap::ValueEnum;
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::io::{BufWriter, IsTerminal, Write, stderr};

const LOG_TARGET: &str = "   reports";

/// Output file used when extracting without `--output`.
const DEFAULT_OUTPUT_STEM: &str = "dataverse-schema";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// How long progress stays hidden. Logging and a progress bar fight over
/// stderr, so the bar effectively never shows while logging is on.
#[must_use]
pub const fn progress_delay(log_level: LogLevel) -> Duration {
    if matches!(log_level, LogLevel::None) {
        Duration::from_millis(300)
    } else {
        Duration::from_hours(365 * 24)
    }
}

#[must_use]
pub fn use_colors(color: ColorMode) -> bool {
    match color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => stderr().is_terminal(),
    }
}

/// `dataverse-schema.json`, or `dataverse-schema-<solution>.json` when extracting a solution.
#[must_use]
pub fn default_output_path(solution: Option<&str>) -> Utf8PathBuf {
    match solution.map(str::trim).filter(|s| !s.is_empty()) {
        Some(solution) => Utf8PathBuf::from(format!("{DEFAULT_OUTPUT_STEM}-{solution}.json")),
        None => Utf8PathBuf::from(format!("{DEFAULT_OUTPUT_STEM}.json")),
    }
}

pub fn write_json(document: &SchemaDocument, path: &Utf8Path) -> Result<()> {
    let mut json_output = String::new();
    generate_json(document, &mut json_output)?;
    fs::write(path, json_output).into_app_err_with(|| format!("writing schema document to '{path}'"))?;

    log::info!(target: LOG_TARGET, "wrote schema document to '{path}'");
    Ok(())
}

/// Write the optional Excel and CSV renditions of a document.
pub fn write_reports(document: &SchemaDocument, excel: Option<&Utf8Path>, csv: Option<&Utf8Path>) -> Result<()> {
    if let Some(path) = excel {
        let mut file = fs::File::create(path).into_app_err_with(|| format!("creating Excel report '{path}'"))?;
        generate_xlsx(document, &mut file)?;
        log::info!(target: LOG_TARGET, "wrote Excel report to '{path}'");
    }

    if let Some(path) = csv {
        let file = fs::File::create(path).into_app_err_with(|| format!("creating CSV report '{path}'"))?;
        let mut writer = BufWriter::new(file);
        generate_csv(document, &mut writer)?;
        writer.flush().into_app_err_with(|| format!("writing CSV report '{path}'"))?;
        log::info!(target: LOG_TARGET, "wrote CSV report to '{path}'");
    }

    Ok(())
}

use super::Host;
use super::common::{LogLevel, init_logging, write_reports};
use crate::Result;
use crate::reports::parse_json;
use camino::Utf8PathBuf;
use clap::Args;
use ohno::{IntoAppError, app_err};
use std::fs;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Schema document previously written by `extract`
    #[arg(value_name = "INPUT")]
    pub input: Utf8PathBuf,

    /// Write an Excel workbook
    #[arg(long, value_name = "PATH")]
    pub excel: Option<Utf8PathBuf>,

    /// Write a flat CSV listing of attributes
    #[arg(long, value_name = "PATH")]
    pub csv: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

pub fn process_convert<H: Host>(host: &mut H, args: &ConvertArgs) -> Result<()> {
    init_logging(args.log_level);

    if args.excel.is_none() && args.csv.is_none() {
        return Err(app_err!("nothing to do, specify --excel and/or --csv"));
    }

    let text = fs::read_to_string(&args.input).into_app_err_with(|| format!("reading schema document '{}'", args.input))?;
    let document = parse_json(&text)?;

    write_reports(&document, args.excel.as_deref(), args.csv.as_deref())?;

    let mut out = host.output();
    for path in [&args.excel, &args.csv].into_iter().flatten() {
        let _ = writeln!(out, "Report written to {path}");
    }

    Ok(())
}

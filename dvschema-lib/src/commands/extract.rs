use super::Host;
use super::common::{ColorMode, LogLevel, default_output_path, init_logging, progress_delay, use_colors, write_json, write_reports};
use super::config::Config;
use super::progress_reporter::ProgressReporter;
use crate::Result;
use crate::extraction::{ExtractOptions, Extractor, Progress};
use crate::metadata::{ConnectionSettings, MetadataService, WebApiClient};
use crate::schema::SchemaDocument;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use ohno::app_err;
use std::io::Write;
use url::Url;

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Environment URL (e.g. <https://contoso.crm.dynamics.com>)
    #[arg(long, value_name = "URL", env = "DATAVERSE_URL")]
    pub url: Url,

    /// OAuth bearer token for the environment
    #[arg(long, value_name = "TOKEN", env = "DATAVERSE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Only extract the entities that belong to this solution (unique name)
    #[arg(short, long, value_name = "NAME")]
    pub solution: Option<String>,

    /// Path of the JSON schema document to write [default: dataverse-schema[-<SOLUTION>].json]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Also write an Excel workbook
    #[arg(long, value_name = "PATH")]
    pub excel: Option<Utf8PathBuf>,

    /// Also write a flat CSV listing of attributes
    #[arg(long, value_name = "PATH")]
    pub csv: Option<Utf8PathBuf>,

    /// Only extract attributes whose logical name starts with this prefix (case-insensitive)
    #[arg(long, value_name = "PREFIX")]
    pub attribute_prefix: Option<String>,

    /// Leave out attributes with these logical names
    #[arg(long, value_name = "NAME", value_delimiter = ',')]
    pub exclude_attribute: Vec<String>,

    /// Path to configuration file [default: dvschema.toml]
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

pub async fn process_extract<H: Host>(host: &mut H, args: &ExtractArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(&Utf8PathBuf::from("."), args.config.as_ref())?;

    let mut settings = ConnectionSettings::new(args.url.clone());
    settings.access_token.clone_from(&args.access_token);
    settings.api_version.clone_from(&config.api_version);
    settings.request_timeout = config.request_timeout();

    let client = WebApiClient::connect(&settings).await?;

    let options = ExtractOptions {
        solution: args.solution.clone(),
        attribute_filter: config.attribute_filter(args.attribute_prefix.as_deref(), &args.exclude_attribute),
    };

    let document = extract(&client, &options, &config, args).await?;

    let output = args.output.clone().unwrap_or_else(|| default_output_path(args.solution.as_deref()));
    write_json(&document, &output)?;
    write_reports(&document, args.excel.as_deref(), args.csv.as_deref())?;

    report_summary(host, &document, &output);
    Ok(())
}

async fn extract<S: MetadataService>(service: &S, options: &ExtractOptions, config: &Config, args: &ExtractArgs) -> Result<SchemaDocument> {
    let progress = ProgressReporter::new(progress_delay(args.log_level), use_colors(args.color));

    let result = Extractor::new(service)
        .with_progress(&progress)
        .with_max_concurrent_lookups(config.max_concurrent_lookups)
        .extract(options)
        .await;

    progress.done();
    result.map_err(|error| app_err!("unable to extract schema: {error}"))
}

fn report_summary<H: Host>(host: &mut H, document: &SchemaDocument, output: &Utf8Path) {
    {
        let mut out = host.output();

        let _ = writeln!(out, "Schema written to {output}");
        let _ = writeln!(out, "  Entities:      {}", document.entities.len());
        let _ = writeln!(out, "  Attributes:    {}", document.attribute_count());
        let _ = writeln!(out, "  Option sets:   {}", document.option_set_count());
        let _ = writeln!(out, "  Relationships: {}", document.relationships.len());

        if let (Some(solution), Some(components)) = (&document.solution_name, &document.solution_components) {
            let _ = writeln!(out, "  Solution:      {solution} ({} entities)", components.len());
        }
    }

    if document.entities.is_empty() {
        let _ = writeln!(host.error(), "warning: no entities were extracted");
    }
}

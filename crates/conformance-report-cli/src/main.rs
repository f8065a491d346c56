// crates/conformance-report-cli/src/main.rs
// ============================================================================
// Module: Conformance Report CLI Entry Point
// Description: Resolves settings, discovers result files, and runs the generator.
// Purpose: One-shot CI step turning Cucumber JSON results into an HTML report.
// Dependencies: clap, conformance-report-config, conformance-report-core, serde, tracing.
// ============================================================================

//! ## Overview
//! `conformance-report` reads its settings from the environment (optionally
//! overridden by flags), discovers every `-report.json` file under the input
//! root, and invokes the report generator exactly once. Every failure is
//! fatal: the message goes to stderr and the process exits non-zero. All
//! user-facing strings are routed through the i18n catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use conformance_report_cli::i18n::Locale;
use conformance_report_cli::i18n::set_locale;
use conformance_report_cli::logging::LOG_ENV;
use conformance_report_cli::logging::init_logging;
use conformance_report_cli::t;
use conformance_report_config::ReportSettings;
use conformance_report_config::SettingsOverrides;
use conformance_report_core::GenerationSummary;
use conformance_report_core::HtmlReportGenerator;
use conformance_report_core::ReportGenerator;
use conformance_report_core::discover_report_files;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "CONFORMANCE_REPORT_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "conformance-report",
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `CONFORMANCE_REPORT_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Path overrides shared by every subcommand.
    #[command(flatten)]
    settings: SettingsArgs,
    /// Selected subcommand; defaults to `generate`.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags that take precedence over environment variables.
#[derive(Args, Debug, Clone, Default)]
struct SettingsArgs {
    /// Input root file or directory (overrides `INPUT_JSON_FILES`).
    #[arg(long, value_name = "PATH", global = true)]
    input: Option<PathBuf>,
    /// Report output directory (overrides `OUTPUT_DIRECTORY`).
    #[arg(long = "output-dir", value_name = "DIR", global = true)]
    output_dir: Option<PathBuf>,
    /// Trend file (overrides `TREND_JSON`).
    #[arg(long = "trend-file", value_name = "PATH", global = true)]
    trend_file: Option<PathBuf>,
    /// Report profile TOML (overrides `REPORT_PROFILE`).
    #[arg(long, value_name = "PATH", global = true)]
    profile: Option<PathBuf>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Discover result files and generate the report.
    Generate,
    /// List discovered result files without generating a report.
    Discover(DiscoverCommand),
}

/// Arguments for `discover`.
#[derive(Args, Debug)]
struct DiscoverCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Output formats for `discover`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// One path per line.
    Text,
    /// JSON object with the input root and file list.
    Json,
}

/// Supported `--lang` values.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let log_directive = std::env::var(LOG_ENV).ok();
    init_logging(log_directive.as_deref())
        .map_err(|err| CliError::new(t!("logging.init_failed", error = err)))?;

    let overrides = SettingsOverrides::from(cli.settings);
    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Generate => command_generate(&overrides, &HtmlReportGenerator::new()),
        Commands::Discover(command) => command_discover(&overrides, &command),
    }
}

// ============================================================================
// SECTION: Generate Command
// ============================================================================

/// Executes the `generate` command.
fn command_generate<G: ReportGenerator>(
    overrides: &SettingsOverrides,
    generator: &G,
) -> CliResult<ExitCode> {
    let settings = resolve_settings(overrides)?;
    let summary = generate_report(settings, generator)?;
    write_stdout_line(&t!(
        "generate.ok",
        path = summary.overview_path.display(),
        features = summary.totals.total_features(),
        scenarios = summary.totals.total_scenarios(),
        failed = summary.totals.failed_scenarios
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!(
        "generate.trends",
        path = summary.trend_file.display(),
        builds = summary.trend_builds
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Discovers inputs, assembles the run configuration, and invokes the
/// generator exactly once (also when no inputs were found).
fn generate_report<G: ReportGenerator>(
    settings: ReportSettings,
    generator: &G,
) -> CliResult<GenerationSummary> {
    let input_files = discover(&settings.input_root)?;
    let config = settings.into_run_configuration(input_files);
    info!(
        output_dir = %config.output_dir.display(),
        trend_file = %config.trend_file.display(),
        build_number = %config.build_number,
        inputs = config.input_files.len(),
        "invoking report generator"
    );
    generator
        .generate(&config)
        .map_err(|err| CliError::new(t!("generate.failed", error = err)))
}

// ============================================================================
// SECTION: Discover Command
// ============================================================================

/// JSON shape of `discover --format json`.
#[derive(Debug, Serialize)]
struct DiscoverOutput<'a> {
    /// Input root as resolved.
    input_root: &'a Path,
    /// Discovered result files.
    files: &'a [PathBuf],
}

/// Executes the `discover` command.
fn command_discover(
    overrides: &SettingsOverrides,
    command: &DiscoverCommand,
) -> CliResult<ExitCode> {
    let settings = resolve_settings(overrides)?;
    let files = discover(&settings.input_root)?;
    let output = render_discover_output(&settings.input_root, &files, command.format)?;
    write_stdout_bytes(output.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Renders discovered files in the requested format.
fn render_discover_output(
    input_root: &Path,
    files: &[PathBuf],
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Text if files.is_empty() => {
            Ok(format!("{}\n", t!("discover.none", path = input_root.display())))
        }
        OutputFormat::Text => {
            let mut output = String::new();
            for file in files {
                output.push_str(&file.display().to_string());
                output.push('\n');
            }
            Ok(output)
        }
        OutputFormat::Json => {
            let output = DiscoverOutput {
                input_root,
                files,
            };
            let mut json = serde_json::to_string_pretty(&output).map_err(|err| {
                CliError::new(t!("discover.serialize_failed", error = err))
            })?;
            json.push('\n');
            Ok(json)
        }
    }
}

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Resolves settings from the process environment and overrides.
fn resolve_settings(overrides: &SettingsOverrides) -> CliResult<ReportSettings> {
    ReportSettings::from_env(overrides)
        .map_err(|err| CliError::new(t!("config.resolve_failed", error = err)))
}

/// Runs discovery under the input root.
fn discover(input_root: &Path) -> CliResult<Vec<PathBuf>> {
    let files = discover_report_files(input_root)
        .map_err(|err| CliError::new(t!("discover.failed", error = err)))?;
    info!(root = %input_root.display(), files = files.len(), "discovered result files");
    Ok(files)
}

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang.filter(|value| !value.trim().is_empty()) {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Converts CLI language selections into locales.
impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

/// Converts CLI path flags into settings overrides.
impl From<SettingsArgs> for SettingsOverrides {
    fn from(value: SettingsArgs) -> Self {
        Self {
            input: value.input,
            output_dir: value.output_dir,
            trend_file: value.trend_file,
            profile: value.profile,
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

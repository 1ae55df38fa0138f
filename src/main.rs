use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use bids_methods::layout::ImageReader;
use bids_methods::report::json::render_report_json;
use bids_methods::{
    InMemoryLayout, NiftiHeaderReader, ReportConfig, ReportError, ReportOptions, SeenTasks,
    TargetMatching, generate_report,
};

#[derive(Parser, Debug)]
#[command(
    name = "bids-methods",
    version,
    about = "Generate the MRI data-acquisition paragraph of a methods section from BIDS metadata"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Describe one subject's acquisitions
    Report(ReportArgs),
}

#[derive(clap::Args, Debug)]
struct ReportArgs {
    /// Dataset index (JSON, optionally gzipped)
    #[arg(long)]
    manifest: PathBuf,

    /// Subject label without the `sub-` prefix
    #[arg(long)]
    subject: String,

    /// Session label without the `ses-` prefix
    #[arg(long)]
    session: Option<String>,

    /// Code tables replacing the built-in sequence/variant/direction config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read image geometry from NIfTI headers below this directory instead of the manifest
    #[arg(long)]
    nifti_root: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Match field-map targets by exact file name instead of substring
    #[arg(long)]
    exact_targets: bool,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    bids_methods::tracing::init_logging(cli.verbose);
    if let Err(err) = run(cli.command) {
        bids_methods::error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), ReportError> {
    match command {
        Command::Report(args) => run_report(&args),
    }
}

fn run_report(args: &ReportArgs) -> Result<(), ReportError> {
    let mut layout = InMemoryLayout::load(&args.manifest)?;
    if let Some(root) = &args.nifti_root {
        layout.set_root(root);
    }
    let config = match &args.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::builtin()?,
    };
    let matching = if args.exact_targets {
        TargetMatching::Exact
    } else {
        TargetMatching::Containment
    };
    let options = ReportOptions::for_subject(&args.subject)
        .with_session(args.session.as_deref())
        .with_target_matching(matching);

    let files = layout.subject_files(&args.subject, args.session.as_deref());
    if files.is_empty() {
        return Err(ReportError::Configuration(format!(
            "no files for subject '{}' in {}",
            args.subject,
            args.manifest.display()
        )));
    }

    let nifti;
    let images: &dyn ImageReader = match &args.nifti_root {
        Some(root) => {
            nifti = NiftiHeaderReader::new(root);
            &nifti
        }
        None => &layout,
    };

    let report = generate_report(&layout, images, &config, &options, &files, SeenTasks::new());
    if !report.diagnostics.is_empty() {
        bids_methods::warn!(
            "{} group(s) could not be described; see messages above",
            report.diagnostics.len()
        );
    }

    let rendered = match args.format {
        OutputFormat::Text => format!("{}\n", report.narrative()),
        OutputFormat::Json => format!(
            "{}\n",
            render_report_json(&report, &args.subject, args.session.as_deref())?
        ),
    };
    write_output(args.out.as_deref(), &rendered)
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<(), ReportError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, rendered)?;
            bids_methods::info!("wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;

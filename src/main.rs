use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use jar_inspector::analysis::Analyzer;
use jar_inspector::archive::collect_resources;
use jar_inspector::report::{ReportOptions, write_json};
use jar_inspector::specification::{Specifications, VersionTable};

/// CLI arguments for jar-inspector.
#[derive(Parser, Debug)]
#[command(
    name = "jar-inspector",
    about = "Reports compiler versions, constant pools and referenced classes of JVM class files and archives.",
    version
)]
struct Cli {
    /// Class files, archives (.jar, .zip, .war, .ear) or directories to inspect.
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,
    /// Where to write the JSON report; `-` is stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// JSON file replacing the built-in specification tables.
    #[arg(long, value_name = "PATH")]
    specification: Option<PathBuf>,
    /// JSON file replacing the built-in version table.
    #[arg(long, value_name = "PATH")]
    versions: Option<PathBuf>,
    /// Include the constant pool of every class file in the report.
    #[arg(long)]
    constant_pool: bool,
    /// Log debug messages.
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let specifications = match &cli.specification {
        Some(path) => Specifications::from_reader(open(path)?)
            .with_context(|| format!("failed to load specification {}", path.display()))?,
        None => Specifications::default(),
    };
    let versions = match &cli.versions {
        Some(path) => VersionTable::from_reader(open(path)?)
            .with_context(|| format!("failed to load version table {}", path.display()))?,
        None => VersionTable::default(),
    };

    let mut resources = Vec::new();
    for input in &cli.inputs {
        if !input.exists() {
            anyhow::bail!("input not found: {}", input.display());
        }
        let found = collect_resources(input)
            .with_context(|| format!("failed to collect class files from {}", input.display()))?;
        tracing::info!(input = %input.display(), count = found.len(), "Collected class files");
        resources.extend(found);
    }

    let analysis = Analyzer::new(specifications, versions).analyze(resources);

    let options = ReportOptions {
        include_constant_pool: cli.constant_pool,
    };
    let mut writer = output_writer(cli.output.as_deref())?;
    write_json(&analysis, &mut writer, options).context("failed to serialize report")?;
    writer.write_all(b"\n").context("failed to write report")?;
    writer.flush().context("failed to write report")?;
    Ok(())
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn output_writer(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) if path == Path::new("-") => Ok(Box::new(BufWriter::new(io::stdout()))),
        Some(path) => Ok(Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to open {}", path.display()))?,
        ))),
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Initialize logging with stderr output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use relocator_core::{
    load_config, validate_config, MediaKind, RelocateConfig, Relocator, RunConfig, RunReport,
};

/// Classify loosely-named media files and relocate them into a normalized
/// library layout. Moves are atomic where the filesystem allows it and fall
/// back to a checksum-verified copy where it does not.
#[derive(Debug, Parser)]
#[command(name = "relocator", version, about)]
struct Opts {
    /// Source directory to scan recursively.
    #[arg(long, required_unless_present = "config")]
    source: Option<PathBuf>,

    /// File extension to keep, including the leading dot (e.g. ".mkv").
    #[arg(long, required_unless_present = "config")]
    ext: Option<String>,

    /// How the discovered files are classified.
    #[arg(long, value_enum, required_unless_present = "config")]
    kind: Option<KindArg>,

    /// Destination root directory (must be absolute).
    #[arg(long, required_unless_present = "config")]
    dest: Option<PathBuf>,

    /// Skip the atomic-rename fast path and always copy-verify-delete.
    #[arg(long)]
    copy: bool,

    /// Read the run configuration from a TOML file instead of flags.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv). Default INFO.
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q). Each -q reduces level by one step.
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    quiet: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum KindArg {
    Tv,
    Movie,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Tv => MediaKind::Tv,
            KindArg::Movie => MediaKind::Movie,
        }
    }
}

fn init_tracing(verbosity: i16) {
    let level = match verbosity {
        i16::MIN..=-1 => Level::ERROR,
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn assemble_config(opts: &Opts) -> Result<RunConfig> {
    if let Some(path) = &opts.config {
        let mut config = load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;
        if opts.copy {
            config.relocate = config.relocate.with_atomic_moves(false);
        }
        return Ok(config);
    }

    let relocate = if opts.copy {
        RelocateConfig::default().with_atomic_moves(false)
    } else {
        RelocateConfig::default()
    };

    Ok(RunConfig {
        source: opts.source.clone().expect("clap enforces --source"),
        extension: opts.ext.clone().expect("clap enforces --ext"),
        kind: opts.kind.expect("clap enforces --kind").into(),
        destination: opts.dest.clone().expect("clap enforces --dest"),
        relocate,
    })
}

fn run(opts: Opts) -> Result<RunReport> {
    let config = assemble_config(&opts)?;
    validate_config(&config).context("invalid run configuration")?;

    let mut groups = relocator_core::scan(&config).context("scan failed")?;
    if groups.is_empty() {
        warn!("no matching files found under {}", config.source.display());
        return Ok(RunReport::new());
    }

    println!("Overview of operations:");
    for group in &groups {
        print!("{group}");
    }

    let relocator = Relocator::new(config.relocate.clone());
    let mut report = RunReport::new();
    for group in &mut groups {
        for item in group.items_mut() {
            if item.is_valid() {
                let outcome = relocator.relocate(item, &config.destination);
                report.record(item, Some(outcome));
            } else {
                warn!(
                    file = %item.file_name(),
                    "incomplete metadata, item will not be relocated"
                );
                report.record(item, None);
            }
        }
    }

    info!("run complete");
    Ok(report)
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    init_tracing(opts.verbose as i16 - opts.quiet as i16);

    match run(opts) {
        Ok(report) => {
            if !report.is_empty() {
                print!("{report}");
            }
            if report.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

mod config;
mod domain;
mod error;
mod infrastructure;
mod modules;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::config::{FileConfig, Overrides};
use crate::modules::export::{self, Mode, PlannedFile, Summary};

#[derive(Debug, Parser)]
#[command(
    name = "deploygen",
    version,
    about = "Generate SDK ABI files and address tables from contract build output"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to $DEPLOYGEN_CONFIG, then ./deploygen.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Whether to print debug info.
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract the `abi` field of relevant artifacts into <out-dir>/<Contract>.json
    Abis {
        #[command(flatten)]
        manifest: ManifestArg,

        /// Compiled artifacts root (defaults to <indexer>/packages/contracts/artifacts)
        #[arg(long)]
        artifacts: Option<PathBuf>,

        /// Output directory for ABI files
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Fail when a relevant contract has no artifact
        #[arg(long)]
        require_all: bool,

        #[command(flatten)]
        check: CheckArg,
    },
    /// Render the deployment manifest as a TypeScript address table
    Addresses {
        #[command(flatten)]
        manifest: ManifestArg,

        /// Output module path
        #[arg(long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        check: CheckArg,
    },
    /// Run `abis` then `addresses` with configured or default paths
    All {
        #[command(flatten)]
        check: CheckArg,
    },
}

#[derive(Debug, ClapArgs)]
struct ManifestArg {
    /// Deployment manifest (defaults to ./deploys.json)
    #[arg(long)]
    manifest: Option<PathBuf>,
}

#[derive(Debug, ClapArgs)]
struct CheckArg {
    /// Compare generated output with disk instead of writing
    #[arg(long)]
    check: bool,
}

impl CheckArg {
    fn mode(&self) -> Mode {
        if self.check {
            Mode::Check
        } else {
            Mode::Write
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("failed to set up logger: {err}");
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let file_config = config::load(args.config.as_deref(), &cwd)?;

    let (plan, orphans, mode) = match args.command {
        Command::Abis {
            manifest,
            artifacts,
            out_dir,
            require_all,
            check,
        } => {
            let overrides = Overrides {
                manifest: manifest.manifest,
                artifacts,
                out_dir,
                require_all,
                ..Default::default()
            };
            let (plan, orphans) = plan_abis(&file_config, &overrides, &cwd)?;
            (plan, orphans, check.mode())
        }
        Command::Addresses { manifest, out, check } => {
            let overrides = Overrides {
                manifest: manifest.manifest,
                out,
                ..Default::default()
            };
            (plan_addresses(&file_config, &overrides, &cwd)?, Vec::new(), check.mode())
        }
        Command::All { check } => {
            let overrides = Overrides::default();
            let (mut plan, orphans) = plan_abis(&file_config, &overrides, &cwd)?;
            plan.extend(plan_addresses(&file_config, &overrides, &cwd)?);
            (plan, orphans, check.mode())
        }
    };

    let mut summary = export::apply(&plan, mode)?;
    match mode {
        Mode::Check => summary.stale.extend(orphans),
        Mode::Write => {
            for orphan in &orphans {
                log::warn!("{} is no longer generated", orphan.display());
            }
        }
    }
    report(&summary, mode)
}

/// Planned ABI files plus stray ABI files in the output directory
fn plan_abis(
    file_config: &FileConfig,
    overrides: &Overrides,
    cwd: &Path,
) -> Result<(Vec<PlannedFile>, Vec<PathBuf>)> {
    let config = file_config.abi_extract(overrides, cwd)?;
    log::debug!("abis: {:?}", config);
    let plan = export::plan_abis(&config)
        .with_context(|| format!("extract ABIs from {}", config.artifacts.display()))?;
    let orphans = export::orphaned_abis(&config.out_dir, &plan)?;
    Ok((plan, orphans))
}

fn plan_addresses(
    file_config: &FileConfig,
    overrides: &Overrides,
    cwd: &Path,
) -> Result<Vec<PlannedFile>> {
    let config = file_config.address_table(overrides, cwd);
    log::debug!("addresses: {:?}", config);
    let plan = export::plan_addresses(&config)
        .with_context(|| format!("generate {}", config.out.display()))?;
    Ok(vec![plan])
}

fn report(summary: &Summary, mode: Mode) -> Result<()> {
    match mode {
        Mode::Write => {
            log::info!(
                "{} file(s) written, {} unchanged",
                summary.written,
                summary.unchanged
            );
            Ok(())
        }
        Mode::Check if summary.stale.is_empty() => {
            log::info!("{} file(s) up to date", summary.unchanged);
            Ok(())
        }
        Mode::Check => {
            let stale: Vec<String> = summary
                .stale
                .iter()
                .map(|path| path.display().to_string())
                .collect();
            bail!(
                "{} generated file(s) out of date: {}",
                stale.len(),
                stale.join(", ")
            )
        }
    }
}

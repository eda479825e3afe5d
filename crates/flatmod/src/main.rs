use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use flatmod::{Config, Topology, bundle, config::resolve_package_name};
use log::debug;

#[derive(Parser, Debug)]
#[command(name = "flatmod", version, about, long_about = None)]
struct Cli {
    /// Output file for the bundle (truncated if it exists)
    #[arg(short, long)]
    output: PathBuf,

    /// Project directory containing Cargo.toml and src/
    #[arg(short = 'C', long, default_value = ".")]
    project_dir: PathBuf,

    /// Entry-point arrangement
    #[arg(long, value_enum, default_value_t = EntryMode::LibMain)]
    topology: EntryMode,

    /// Name of the module wrapping src/lib.rs (defaults to the crate name from Cargo.toml)
    #[arg(long)]
    package: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EntryMode {
    /// src/lib.rs wrapped as `pub mod <package>`, followed by src/main.rs
    LibMain,
    /// src/main.rs alone
    Single,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let topology = resolve_topology(cli.topology, &cli.project_dir, cli.package.as_deref())?;
    let config = Config::new(cli.project_dir, cli.output, topology);
    debug!("Configuration: {config:?}");
    bundle(&config)?;
    Ok(())
}

fn resolve_topology(
    mode: EntryMode,
    project_dir: &Path,
    package: Option<&str>,
) -> Result<Topology> {
    Ok(match mode {
        EntryMode::Single => Topology::single_entry(),
        EntryMode::LibMain => {
            Topology::library_plus_main(resolve_package_name(project_dir, package)?)
        }
    })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

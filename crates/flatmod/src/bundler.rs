//! Bundle driver: owns the output for one run and expands the entry files of the
//! selected topology into it.

use std::{
    fs::File,
    io::{BufWriter, Write},
};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    classify::Visibility,
    config::{Config, Topology},
    expander::{BundleStats, Expander},
    resolver::ModuleResolver,
};

/// Bundle the project described by `config` into `config.output`.
///
/// The output file is truncated before anything is written. If expansion fails,
/// whatever was emitted before the failure is flushed and left in place.
pub fn bundle(config: &Config) -> Result<BundleStats> {
    let resolver = ModuleResolver::new(config.source_root());
    debug!(
        "Bundling {} into {} ({:?})",
        resolver.source_root().display(),
        config.output.display(),
        config.topology
    );

    let file = File::create(&config.output)
        .with_context(|| format!("failed to create output file {}", config.output.display()))?;
    let mut writer = BufWriter::new(file);

    let result = bundle_to_writer(&config.topology, &resolver, &mut writer);
    let flushed = writer
        .flush()
        .with_context(|| format!("failed to write {}", config.output.display()));
    let stats = result?;
    flushed?;

    info!(
        "Wrote {} ({} lines, {} modules inlined, {} lines suppressed)",
        config.output.display(),
        stats.lines_written,
        stats.modules_expanded,
        stats.lines_suppressed
    );
    Ok(stats)
}

/// Expand the entry files of `topology` into `out`.
pub fn bundle_to_writer<W: Write>(
    topology: &Topology,
    resolver: &ModuleResolver,
    out: &mut W,
) -> Result<BundleStats> {
    let mut expander = Expander::new(resolver, out);

    match topology {
        Topology::SingleEntry { entry } => {
            let entry = resolver.open_entry(entry).context("failed to open entry file")?;
            expander.expand_file(&entry)?;
        }
        Topology::LibraryPlusMain {
            library,
            main,
            package,
        } => {
            let library = resolver
                .open_entry(library)
                .context("failed to open library entry file")?;
            expander.expand_module(Visibility::Public, package, &library)?;

            let main = resolver
                .open_entry(main)
                .context("failed to open main entry file")?;
            expander.expand_file(&main)?;
        }
    }

    Ok(expander.stats())
}

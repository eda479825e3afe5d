//! Depth-first expansion of `mod name;` references.
//!
//! A reference line is replaced in place by the boundary-wrapped expansion of the
//! referenced file before the rest of the referencing file is processed. The same
//! module referenced twice is expanded twice.

use std::{fmt, io::Write};

use anyhow::{Context, Result, bail};
use indexmap::IndexSet;
use log::{debug, trace};

use crate::{
    classify::{LineKind, ModuleReference, Visibility, classify_line},
    module_wrapper::{closing_boundary, opening_boundary},
    resolver::{ModuleResolver, SourceFile},
};

/// Counters collected over one bundle run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundleStats {
    /// Number of wrapped module expansions, including the package wrapper
    pub modules_expanded: usize,
    /// Lines written to the output, boundary lines included
    pub lines_written: usize,
    /// Lines dropped because of the suppress marker
    pub lines_suppressed: usize,
}

pub struct Expander<'a, W: Write> {
    resolver: &'a ModuleResolver,
    out: &'a mut W,
    /// Files currently being expanded, outermost first
    expanding: IndexSet<String>,
    stats: BundleStats,
}

impl<W: Write> fmt::Debug for Expander<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expander")
            .field("source_root", &self.resolver.source_root())
            .field("expanding", &self.expanding)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<'a, W: Write> Expander<'a, W> {
    pub fn new(resolver: &'a ModuleResolver, out: &'a mut W) -> Self {
        Self {
            resolver,
            out,
            expanding: IndexSet::new(),
            stats: BundleStats::default(),
        }
    }

    pub fn stats(&self) -> BundleStats {
        self.stats
    }

    /// Emit the expansion of `file` without any enclosing boundary.
    pub fn expand_file(&mut self, file: &SourceFile) -> Result<()> {
        if self.expanding.contains(file.name()) {
            let chain: Vec<&str> = self
                .expanding
                .iter()
                .skip_while(|name| name.as_str() != file.name())
                .map(String::as_str)
                .chain(std::iter::once(file.name()))
                .collect();
            bail!("cyclic module reference: {}", chain.join(" -> "));
        }

        self.expanding.insert(file.name().to_owned());
        let result = self.expand_lines(file);
        self.expanding.pop();
        result
    }

    /// Emit `file` wrapped in a `mod name { ... }` boundary pair.
    pub fn expand_module(
        &mut self,
        visibility: Visibility,
        module_name: &str,
        file: &SourceFile,
    ) -> Result<()> {
        self.stats.modules_expanded += 1;
        self.emit(&opening_boundary(visibility, module_name))?;
        self.expand_file(file)?;
        self.emit(&closing_boundary(module_name))
    }

    fn expand_lines(&mut self, file: &SourceFile) -> Result<()> {
        for line in file.lines() {
            match classify_line(line) {
                LineKind::Suppress => {
                    trace!("Suppressing line in {}: {}", file.name(), line.trim_end());
                    self.stats.lines_suppressed += 1;
                }
                LineKind::ModuleReference(reference) => {
                    self.expand_reference(reference, file)?;
                }
                LineKind::Passthrough => self.emit(line)?,
            }
        }
        Ok(())
    }

    fn expand_reference(
        &mut self,
        reference: ModuleReference<'_>,
        from: &SourceFile,
    ) -> Result<()> {
        debug!("Inlining `{reference}` from {}", from.name());
        let target = self
            .resolver
            .open_module(reference.name)
            .with_context(|| format!("`{reference}` in {}", from.name()))?;
        self.expand_module(reference.visibility, reference.name, &target)
    }

    fn emit(&mut self, line: &str) -> Result<()> {
        self.out
            .write_all(line.as_bytes())
            .context("failed to write bundle output")?;
        self.stats.lines_written += 1;
        Ok(())
    }
}

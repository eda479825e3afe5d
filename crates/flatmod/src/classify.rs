//! Line classification for the bundler.
//!
//! Every raw source line (terminator included) is either dropped, replaced by an
//! inlined module, or forwarded verbatim. Both special shapes must match the whole
//! line; anything with extra leading or trailing content is ordinary text.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing comment that removes a line from the bundle.
pub const SUPPRESS_MARKER: &str = "// submission::skip";

static SUPPRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\A[^\n]*{}\n\z", regex::escape(SUPPRESS_MARKER)))
        .expect("suppress pattern is valid")
});

static MODULE_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A(pub )?mod ([a-z_]+);\n\z").expect("module pattern is valid"));

/// Visibility captured from a `mod` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// `pub mod name;`
    Public,
    /// `mod name;`
    Default,
}

impl Visibility {
    /// Keyword prefix to put in front of `mod`, including its trailing space.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Public => "pub ",
            Self::Default => "",
        }
    }
}

/// A `[pub ]mod name;` line whose file gets inlined in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleReference<'a> {
    pub visibility: Visibility,
    pub name: &'a str,
}

impl fmt::Display for ModuleReference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mod {};", self.visibility.prefix(), self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Drop the line.
    Suppress,
    /// Replace the line with the expansion of the referenced module.
    ModuleReference(ModuleReference<'a>),
    /// Forward the line unchanged.
    Passthrough,
}

/// Classify one raw line. `line` must carry its `\n` terminator for either special
/// shape to match.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if SUPPRESS_RE.is_match(line) {
        return LineKind::Suppress;
    }

    if let Some(captures) = MODULE_REF_RE.captures(line) {
        let visibility = if captures.get(1).is_some() {
            Visibility::Public
        } else {
            Visibility::Default
        };
        let name = captures.get(2).map_or("", |name| name.as_str());
        return LineKind::ModuleReference(ModuleReference { visibility, name });
    }

    LineKind::Passthrough
}

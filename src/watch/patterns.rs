// src/watch/patterns.rs

use std::fmt;
use std::path::Path;

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::errors::Result;

/// Directories never worth rerunning checks for: version control and the
/// dependency cache.
pub const DEFAULT_IGNORE: [&str; 2] = ["**/node_modules/**", "**/.git/**"];

/// Compiled ignore globs, matched against paths relative to the watch root.
#[derive(Clone)]
pub struct IgnoreSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl fmt::Debug for IgnoreSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgnoreSet")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl IgnoreSet {
    /// Compile caller-supplied patterns.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pat in patterns {
            let pat = pat.as_ref();
            let glob = Glob::new(pat).with_context(|| format!("invalid ignore pattern: {pat}"))?;
            builder.add(glob);
        }
        let set = builder.build().context("building ignore globset")?;

        Ok(Self {
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            set,
        })
    }

    /// The built-in ignore set.
    pub fn defaults() -> Result<Self> {
        Self::new(&DEFAULT_IGNORE[..])
    }

    /// Caller patterns when given, otherwise the defaults.
    pub fn from_config(patterns: Option<&[String]>) -> Result<Self> {
        match patterns {
            Some(patterns) => Self::new(patterns),
            None => Self::defaults(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// `rel_path` uses forward slashes, e.g. `"node_modules/x/index.js"`.
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        self.set.is_match(rel_path)
    }

    /// Like [`IgnoreSet::is_ignored`] for an absolute event path. Paths that
    /// cannot be related to `root` are never ignored.
    pub fn is_ignored_path(&self, root: &Path, path: &Path) -> bool {
        relative_str(root, path).is_some_and(|rel| self.is_ignored(&rel))
    }
}

/// `path` relative to `root` with forward slashes.
///
/// Falls back to comparing canonical forms, since some platforms report
/// event paths through a different prefix (symlinked temp dirs on macOS).
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let to_slashes = |rel: &Path| rel.to_string_lossy().replace('\\', "/");

    if let Ok(rel) = path.strip_prefix(root) {
        return Some(to_slashes(rel));
    }

    let root = root.canonicalize().ok()?;
    let path = path.canonicalize().ok()?;
    path.strip_prefix(&root).ok().map(to_slashes)
}

//! Candidate font discovery
//!
//! Paths reach a scan in two ways. Roots named by the caller are taken at
//! their word: a named file is inspected whatever its extension, and a named
//! path that does not exist is an error. Paths read from a listing (one per
//! line, usually piped in from `find` or `fc-list`) get the same extension
//! rule as files found while walking a directory, and listed paths that no
//! longer exist are logged and skipped.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use walkdir::WalkDir;

/// Path to a candidate font file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSourceRef {
    pub path: PathBuf,
}

/// Trait for enumerating candidate fonts from some backing store.
pub trait FontDiscovery {
    fn discover(&self) -> Result<Vec<FontSourceRef>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Named,
    Listed,
}

/// Filesystem discovery over named roots and listed paths.
///
/// Directories are walked recursively for `.ttf`/`.otf` files. The result is
/// sorted by path with duplicates removed, so a font both named and listed is
/// inspected once.
#[derive(Debug, Clone, Default)]
pub struct PathDiscovery {
    roots: Vec<(PathBuf, Origin)>,
    follow_symlinks: bool,
}

impl PathDiscovery {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::default().with_roots(roots, Origin::Named)
    }

    /// Add paths that came from a listing rather than from the caller.
    pub fn with_listed<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.with_roots(paths, Origin::Listed)
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    fn with_roots<I, P>(mut self, paths: I, origin: Origin) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots
            .extend(paths.into_iter().map(|p| (p.into(), origin)));
        self
    }

    fn walk(&self, dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
        for entry in WalkDir::new(dir).follow_links(self.follow_symlinks) {
            let entry = entry?;
            if entry.file_type().is_file() && is_single_font(entry.path()) {
                found.push(entry.into_path());
            }
        }
        Ok(())
    }
}

impl FontDiscovery for PathDiscovery {
    fn discover(&self) -> Result<Vec<FontSourceRef>> {
        let mut found = Vec::new();

        for (path, origin) in &self.roots {
            if path.is_dir() {
                self.walk(path, &mut found)?;
                continue;
            }

            match (*origin, path.exists()) {
                (Origin::Named, true) => found.push(path.clone()),
                (Origin::Named, false) => {
                    return Err(anyhow!("root path does not exist: {}", path.display()));
                }
                (Origin::Listed, true) if is_single_font(path) => found.push(path.clone()),
                (Origin::Listed, true) => {
                    debug!("{}: listed file is not a .ttf/.otf font", path.display());
                }
                (Origin::Listed, false) => {
                    warn!("{}: listed path does not exist", path.display());
                }
            }
        }

        found.sort();
        found.dedup();
        Ok(found
            .into_iter()
            .map(|path| FontSourceRef { path })
            .collect())
    }
}

/// Read a newline-separated path listing. Blank lines are ignored.
pub fn read_listing(reader: impl BufRead) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line.context("reading path listing")?;
        let line = line.trim();
        if !line.is_empty() {
            paths.push(PathBuf::from(line));
        }
    }
    Ok(paths)
}

/// Collections (`.ttc`/`.otc`) and web fonts are not handled by the parser.
fn is_single_font(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
}

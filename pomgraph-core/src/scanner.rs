//! Descriptor discovery using the `ignore` crate.
//!
//! Walks one or more roots and collects every file named exactly
//! `pom.xml`. Results keep walk order (roots in the order given, then the
//! walker's order inside each root); they are not sorted.
//!
//! # Features
//!
//! - Native `.gitignore` support at all levels (optional)
//! - Custom `.pomgraphignore` file support
//! - Extra override globs, e.g. `target/` so that the copies Maven leaves in
//!   `target/classes/META-INF/maven/` are not mistaken for modules

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use crate::descriptor::DESCRIPTOR_FILE_NAME;
use crate::error::{GraphError, Result};

/// Per-directory ignore file honoured in addition to `.gitignore`.
pub const IGNORE_FILE_NAME: &str = ".pomgraphignore";

/// How to walk the scan roots.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Glob patterns to skip, e.g. `target/`.
    pub ignore_patterns: Vec<String>,
    pub respect_gitignore: bool,
    pub include_hidden: bool,
    pub follow_symlinks: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ignore_patterns: Vec::new(),
            respect_gitignore: true,
            include_hidden: false,
            follow_symlinks: false,
        }
    }
}

/// Result of scanning one or more roots.
#[derive(Clone, Debug, Default)]
pub struct ScanResult {
    /// Descriptor paths in walk order.
    pub descriptors: Vec<PathBuf>,

    /// Number of entries the walker failed on and skipped.
    pub error_count: usize,

    /// Time taken for the scan in milliseconds.
    pub duration_ms: f64,
}

impl ScanResult {
    /// Get the number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Scan every root in order and concatenate the results.
pub fn scan_roots<P: AsRef<Path>>(roots: &[P], options: &ScanOptions) -> Result<ScanResult> {
    let start = Instant::now();
    let mut result = ScanResult::default();

    for root in roots {
        let root = root.as_ref();
        let found = scan_directory(root, options)?;
        result.descriptors.extend(found.descriptors);
        result.error_count += found.error_count;
    }

    result.duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        "Found {} descriptors under {} root(s) in {:.1}ms",
        result.len(),
        roots.len(),
        result.duration_ms
    );
    Ok(result)
}

/// Scan a single directory tree for descriptors.
///
/// Module directories that are gitignored or hidden are skipped unless
/// `respect_gitignore` is off or `include_hidden` is on.
pub fn scan_directory(root: &Path, options: &ScanOptions) -> Result<ScanResult> {
    let start = Instant::now();

    if !root.exists() {
        return Err(GraphError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(!options.include_hidden)
        .git_ignore(options.respect_gitignore)
        .git_global(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .parents(options.respect_gitignore)
        .follow_links(options.follow_symlinks)
        .add_custom_ignore_filename(IGNORE_FILE_NAME);

    if !options.ignore_patterns.is_empty() {
        let mut override_builder = OverrideBuilder::new(root);
        for pattern in &options.ignore_patterns {
            // The ! prefix turns an override whitelist glob into an ignore
            if let Err(e) = override_builder.add(&format!("!{}", pattern)) {
                warn!("Invalid ignore pattern '{}': {}", pattern, e);
            }
        }
        match override_builder.build() {
            Ok(overrides) => {
                builder.overrides(overrides);
            }
            Err(e) => warn!("Ignoring override patterns: {}", e),
        }
    }

    let mut descriptors = Vec::new();
    let mut error_count = 0;

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if e.io_error().is_some() && entry_is_root(&e, root) {
                    return Err(GraphError::Walk {
                        path: root.to_path_buf(),
                        message: e.to_string(),
                    });
                }
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                error_count += 1;
                continue;
            }
        };

        let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
        if is_file && entry.file_name() == DESCRIPTOR_FILE_NAME {
            descriptors.push(entry.into_path());
        }
    }

    Ok(ScanResult {
        descriptors,
        error_count,
        duration_ms: start.elapsed().as_secs_f64() * 1000.0,
    })
}

/// Whether a walker error happened at depth 0, i.e. on the root itself.
fn entry_is_root(err: &ignore::Error, root: &Path) -> bool {
    match err {
        ignore::Error::WithDepth { depth, .. } => *depth == 0,
        ignore::Error::WithPath { path, .. } => path == root,
        _ => false,
    }
}

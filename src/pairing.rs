//! Ground-truth to generated-image correspondence.
//!
//! The ground-truth and generated directories are populated independently and
//! may differ in count and ordering, so pairing is always by derived filename,
//! never by directory position. A generated counterpart is expected to be
//! named `<ground-truth base name><suffix>`, e.g. `img1.png` + `_En.png` ->
//! `img1_En.png`.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// A validated association between a ground-truth image and its generated
/// counterpart. Both paths existed on disk at resolution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrespondencePair {
    /// Path of the ground-truth image.
    pub ground_truth: PathBuf,
    /// Path of the matching generated image.
    pub generated: PathBuf,
}

/// Result of resolving a ground-truth directory against a generated directory.
#[derive(Debug, Clone, Default)]
pub struct Pairing {
    /// Matched pairs, in sorted ground-truth filename order.
    pub pairs: Vec<CorrespondencePair>,
    /// Ground-truth file names with no generated counterpart.
    pub unmatched: Vec<String>,
}

/// List all regular files in a directory, sorted by file name.
///
/// Extension is not inspected here; undecodable entries surface later as
/// per-image load failures rather than being silently excluded from the scan.
///
/// # Errors
///
/// Returns [`Error::Discovery`] if the path does not exist, is not a
/// directory, or cannot be read. These are fatal before any measurement loop.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(Error::Discovery(format!(
            "Path does not exist: {}",
            dir.display()
        )));
    }
    if !dir.is_dir() {
        return Err(Error::Discovery(format!(
            "Path is not a directory: {}",
            dir.display()
        )));
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        Error::Discovery(format!("Failed to read directory {}: {}", dir.display(), e))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::Discovery(format!("Failed to read entry in {}: {}", dir.display(), e))
        })?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Normalize a path for equality comparison: absolute, with `.` removed and
/// `..` resolved lexically.
///
/// All membership checks in the resolver go through this one function, so
/// path equality is OS-independent and never depends on how a caller spelled
/// the directory.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// The portion of the file name before the first dot.
///
/// Dataset filenames use single-token extensions, so `"a.b.png"` has base
/// name `"a"`, and an extensionless name passes through whole.
#[must_use]
pub fn base_name(path: &Path) -> &str {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    name.split('.').next().unwrap_or(name)
}

/// Resolve correspondence between a ground-truth and a generated directory.
///
/// For every file in `gtr_dir` (sorted by name), the expected generated file
/// name is `base_name + suffix`. Membership is tested against the normalized
/// set of files actually present in `gen_dir`, so every emitted pair's
/// generated path exists at resolution time. Ground-truth files without a
/// counterpart are reported in [`Pairing::unmatched`] and never abort the run.
///
/// # Errors
///
/// Returns [`Error::Discovery`] if either directory cannot be listed.
pub fn resolve_pairs(gtr_dir: &Path, gen_dir: &Path, suffix: &str) -> Result<Pairing> {
    let gtr_paths = list_images(gtr_dir)?;
    let gen_present: HashSet<PathBuf> = list_images(gen_dir)?
        .iter()
        .map(|p| normalize_path(p))
        .collect();

    let mut pairing = Pairing::default();
    for gtr_path in gtr_paths {
        let expected = normalize_path(&gen_dir.join(format!("{}{}", base_name(&gtr_path), suffix)));
        if gen_present.contains(&expected) {
            pairing.pairs.push(CorrespondencePair {
                ground_truth: gtr_path,
                generated: expected,
            });
        } else {
            let name = gtr_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            pairing.unmatched.push(name);
        }
    }

    Ok(pairing)
}
